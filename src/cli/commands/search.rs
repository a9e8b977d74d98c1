//! Search command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::rag::CorpusIndex;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    corpus: &str,
    query: &str,
    k: Option<usize>,
    settings: Settings,
) -> Result<()> {
    let library = super::open_library(&settings)?;
    let fragments = library.require_corpus(corpus).await?;

    let index = CorpusIndex::build(&fragments)?;
    let results = index.retrieve(query, k.unwrap_or(settings.retrieval.top_k))?;

    Output::success(&format!(
        "Top {} of {} fragments ({} terms)",
        results.len(),
        index.len(),
        index.vectorizer().vocabulary().len()
    ));

    for (rank, fragment) in results.iter().enumerate() {
        Output::fragment(rank + 1, fragment.position, fragment.distance, &fragment.text);
    }

    Ok(())
}
