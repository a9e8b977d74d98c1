//! Keys command implementation.

use crate::cli::{KeysAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the keys command.
pub async fn run_keys(action: &KeysAction, settings: Settings) -> Result<()> {
    let library = super::open_library(&settings)?;

    match action {
        KeysAction::Add { name, value } => {
            library.save_api_key(name, value).await?;
            Output::success(&format!("API key '{}' saved", name));
            if settings.backend.api_key_name.is_none() && settings.backend.api_key.is_none() {
                Output::info(&format!(
                    "Set backend.api_key_name = \"{}\" in the config to use it.",
                    name
                ));
            }
        }

        KeysAction::List => {
            let names = library.api_key_names().await?;
            if names.is_empty() {
                Output::info("No API keys saved.");
            } else {
                Output::header(&format!("API keys ({})", names.len()));
                for name in &names {
                    Output::list_item(name);
                }
            }
        }

        KeysAction::Remove { name } => {
            if library.remove_api_key(name).await? {
                Output::success(&format!("API key '{}' removed", name));
            } else {
                Output::warning(&format!("No API key named '{}'", name));
            }
        }
    }

    Ok(())
}
