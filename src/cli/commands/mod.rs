//! CLI command implementations.

mod ask;
mod config;
mod corpus;
mod history;
mod keys;
mod models;
mod search;

pub use ask::run_ask;
pub use config::run_config;
pub use corpus::run_corpus;
pub use history::{render_history, run_history};
pub use keys::run_keys;
pub use models::run_models;
pub use search::run_search;

use crate::config::Settings;
use crate::library::Library;
use crate::store::SqliteStore;
use std::sync::Arc;

/// Open the on-disk library without connecting to the backend.
pub(crate) fn open_library(settings: &Settings) -> crate::error::Result<Library> {
    let store = SqliteStore::new(&settings.database_path())?;
    Ok(Library::new(Arc::new(store)))
}
