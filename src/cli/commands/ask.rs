//! Ask command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    corpus: &str,
    query: &str,
    k: Option<usize>,
    model: Option<String>,
    settings: Settings,
) -> Result<()> {
    let mut orchestrator = Orchestrator::new(settings).await?;
    if let Some(model) = &model {
        orchestrator = orchestrator.with_model(model);
    }

    let spinner = Output::spinner("Searching and asking the backend...");

    match orchestrator.ask(corpus, query, k).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.answer);

            if !response.sources.is_empty() {
                Output::header("Sources");
                for (rank, source) in response.sources.iter().enumerate() {
                    Output::fragment(rank + 1, source.position, source.distance, &source.text);
                }
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
