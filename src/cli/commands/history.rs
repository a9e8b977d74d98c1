//! History command implementation.

use crate::cli::{HistoryAction, Output};
use crate::config::Settings;
use crate::library::ChatTurn;
use anyhow::Result;

/// Run the history command.
pub async fn run_history(action: &HistoryAction, settings: Settings) -> Result<()> {
    let library = super::open_library(&settings)?;

    match action {
        HistoryAction::Show { corpus } => {
            let history = library.history(corpus).await?;
            if history.is_empty() {
                Output::info(&format!("No questions asked about '{}' yet.", corpus));
            } else {
                print!("{}", render_history(corpus, &history));
            }
        }

        HistoryAction::Clear { corpus } => {
            if library.clear_history(corpus).await? {
                Output::success(&format!("Deleted chat history for '{}'", corpus));
            } else {
                Output::warning(&format!("No chat history for '{}'", corpus));
            }
        }
    }

    Ok(())
}

/// Render a chat history as Markdown.
pub fn render_history(corpus: &str, history: &[ChatTurn]) -> String {
    let mut out = format!("# {}\n", corpus);
    for turn in history {
        out.push_str(&format!(
            "\n## {}\n\n**Q:** {}\n\n**A:** {}\n",
            turn.asked_at.format("%Y-%m-%d %H:%M:%S UTC"),
            turn.query,
            turn.response
        ));
    }
    out
}
