//! Models command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the models command.
pub async fn run_models(settings: Settings) -> Result<()> {
    let configured = settings.backend.model.clone();
    let base_url = settings.backend.base_url.clone();
    let orchestrator = Orchestrator::new(settings).await?;

    let spinner = Output::spinner(&format!("Querying {}...", base_url));
    let models = orchestrator.list_models().await;
    spinner.finish_and_clear();

    match models {
        Ok(models) if models.is_empty() => {
            Output::warning("The backend reported no models.");
        }
        Ok(models) => {
            Output::header(&format!("Models ({})", models.len()));
            for model in &models {
                if *model == configured {
                    Output::list_item(&format!("{} (configured)", model));
                } else {
                    Output::list_item(model);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Failed to list models: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
