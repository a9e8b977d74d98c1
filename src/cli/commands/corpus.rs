//! Corpus command implementation.

use crate::cli::{CorpusAction, Output};
use crate::config::Settings;
use crate::orchestrator::split_fragments;
use anyhow::{bail, Context, Result};
use std::io::Read;

/// Run the corpus command.
pub async fn run_corpus(action: &CorpusAction, settings: Settings) -> Result<()> {
    let library = super::open_library(&settings)?;

    match action {
        CorpusAction::Import { name, file, title } => {
            let text = read_input(file)?;
            let fragments = split_fragments(&text);
            if fragments.is_empty() {
                bail!("'{}' contains no non-empty lines", file);
            }

            let source = library
                .save_corpus(name, &fragments, file, title.as_deref())
                .await?;
            Output::success(&format!(
                "Saved corpus '{}' ({} fragments)",
                name, source.fragment_count
            ));
        }

        CorpusAction::List => {
            let names = library.corpus_names().await?;
            if names.is_empty() {
                Output::info("No corpora yet. Use 'murmur corpus import <name> <file>' to add one.");
                return Ok(());
            }

            Output::header(&format!("Corpora ({})", names.len()));
            for name in &names {
                match library.corpus_source(name).await? {
                    Some(source) => Output::list_item(&format!(
                        "{} - {} fragments from {}{}",
                        name,
                        source.fragment_count,
                        source.origin,
                        source
                            .title
                            .map(|t| format!(" ({})", t))
                            .unwrap_or_default()
                    )),
                    None => Output::list_item(name),
                }
            }
        }

        CorpusAction::Show { name } => {
            let fragments = library.require_corpus(name).await?;
            for fragment in &fragments {
                println!("{}", fragment);
            }
        }

        CorpusAction::Delete { name } => {
            if library.delete_corpus(name).await? {
                Output::success(&format!("Deleted corpus '{}' and its history", name));
            } else {
                Output::warning(&format!("No corpus named '{}'", name));
            }
        }
    }

    Ok(())
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))
    }
}
