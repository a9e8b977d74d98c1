//! Query pipeline for Murmur.
//!
//! Loads a named corpus, rebuilds its index, retrieves context, asks the
//! backend and records the exchange in the corpus' chat history.

use crate::config::{Prompts, Settings};
use crate::error::{MurmurError, Result};
use crate::library::{ChatTurn, CorpusSource, Library};
use crate::rag::{Answerer, CorpusIndex, Generator, OpenAIGenerator, RetrievedFragment};
use crate::store::SqliteStore;
use std::sync::Arc;
use tracing::{info, instrument};

/// Key sent when none is configured. LM Studio accepts any value.
const PLACEHOLDER_API_KEY: &str = "lm-studio";

/// An answer with the fragments it was generated from.
#[derive(Debug, Clone)]
pub struct AskResponse {
    /// The backend's answer, unmodified.
    pub answer: String,
    /// Retrieved fragments, closest first.
    pub sources: Vec<RetrievedFragment>,
}

/// The main orchestrator for the Murmur pipeline.
pub struct Orchestrator {
    settings: Settings,
    library: Library,
    generator: Arc<dyn Generator>,
    answerer: Answerer,
}

impl Orchestrator {
    /// Open the on-disk store and connect to the configured backend.
    pub async fn new(settings: Settings) -> Result<Self> {
        let store = Arc::new(SqliteStore::new(&settings.database_path())?);
        let library = Library::new(store);

        let api_key = resolve_api_key(&settings, &library).await?;
        let generator: Arc<dyn Generator> =
            Arc::new(OpenAIGenerator::from_settings(&settings.backend, &api_key)?);

        Self::with_parts(settings, library, generator)
    }

    /// Assemble an orchestrator from an existing library and generator.
    pub fn with_parts(
        settings: Settings,
        library: Library,
        generator: Arc<dyn Generator>,
    ) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let answerer = Answerer::new(generator.clone(), &settings.backend.model)
            .with_prompts(prompts);

        Ok(Self {
            settings,
            library,
            generator,
            answerer,
        })
    }

    /// Use `model` instead of the configured one.
    pub fn with_model(mut self, model: &str) -> Self {
        self.answerer = self.answerer.with_model(model);
        self
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// `k`, or the configured default.
    pub fn top_k(&self, k: Option<usize>) -> usize {
        k.unwrap_or(self.settings.retrieval.top_k)
    }

    /// Retrieve the fragments of a stored corpus closest to `query`.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        corpus_name: &str,
        query: &str,
        k: Option<usize>,
    ) -> Result<Vec<RetrievedFragment>> {
        let corpus = self.library.require_corpus(corpus_name).await?;
        let index = CorpusIndex::build(&corpus)?;
        index.retrieve(query, self.top_k(k))
    }

    /// Answer `query` from a stored corpus and record the exchange.
    #[instrument(skip(self))]
    pub async fn ask(
        &self,
        corpus_name: &str,
        query: &str,
        k: Option<usize>,
    ) -> Result<AskResponse> {
        if query.trim().is_empty() {
            return Err(MurmurError::InvalidInput("Query must not be empty".to_string()));
        }

        let sources = self.search(corpus_name, query, k).await?;
        let context: Vec<String> = sources.iter().map(|f| f.text.clone()).collect();

        let answer = self.answerer.answer(&context, query).await?;

        self.library
            .append_turn(corpus_name, ChatTurn::new(query, &answer))
            .await?;

        info!("Answered query against '{}' with {} fragments", corpus_name, sources.len());

        Ok(AskResponse { answer, sources })
    }

    /// Split text into fragments and save it as a corpus.
    pub async fn import_text(
        &self,
        name: &str,
        text: &str,
        origin: &str,
        title: Option<&str>,
    ) -> Result<CorpusSource> {
        let fragments = split_fragments(text);
        if fragments.is_empty() {
            return Err(MurmurError::EmptyCorpus);
        }
        self.library.save_corpus(name, &fragments, origin, title).await
    }

    /// Models the backend reports.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        self.generator.list_models().await
    }
}

/// One fragment per non-blank line, trimmed.
pub fn split_fragments(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pick the backend key: literal setting, then a stored key by name, then a placeholder.
pub async fn resolve_api_key(settings: &Settings, library: &Library) -> Result<String> {
    if let Some(key) = &settings.backend.api_key {
        return Ok(key.clone());
    }

    if let Some(name) = &settings.backend.api_key_name {
        return library
            .api_key(name)
            .await?
            .ok_or_else(|| MurmurError::NotFound(format!("API key '{}'", name)));
    }

    Ok(PLACEHOLDER_API_KEY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::mock::MockGenerator;
    use crate::store::MemoryStore;

    fn orchestrator(generator: Arc<MockGenerator>) -> Orchestrator {
        let library = Library::new(Arc::new(MemoryStore::new()));
        Orchestrator::with_parts(Settings::default(), library, generator).unwrap()
    }

    async fn with_pets(orchestrator: &Orchestrator) {
        orchestrator
            .import_text(
                "pets",
                "I love cats\n\n  I love dogs  \nThe weather is nice today\n",
                "pets.txt",
                None,
            )
            .await
            .unwrap();
    }

    #[test]
    fn test_split_fragments() {
        assert_eq!(
            split_fragments("a\n\n  b \r\n\t\nc"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[tokio::test]
    async fn test_ask_pipeline() {
        let generator = Arc::new(MockGenerator::replying("Cats."));
        let orchestrator = orchestrator(generator.clone());
        with_pets(&orchestrator).await;

        let response = orchestrator.ask("pets", "cats", Some(1)).await.unwrap();
        assert_eq!(response.answer, "Cats.");
        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.sources[0].text, "I love cats");

        let requests = generator.requests();
        assert_eq!(requests[0].user, "Comments: I love cats\n\nQuery: cats");
        assert_eq!(requests[0].model, "microsoft/Phi-3-mini-4k-instruct-gguf");

        let history = orchestrator.library().history("pets").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].query, "cats");
        assert_eq!(history[0].response, "Cats.");
    }

    #[tokio::test]
    async fn test_default_k_is_clamped() {
        let orchestrator = orchestrator(Arc::new(MockGenerator::replying("")));
        with_pets(&orchestrator).await;

        let results = orchestrator.search("pets", "weather", None).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].text, "The weather is nice today");
    }

    #[tokio::test]
    async fn test_failed_generation_is_not_recorded() {
        let orchestrator = orchestrator(Arc::new(MockGenerator::failing("offline")));
        with_pets(&orchestrator).await;

        let result = orchestrator.ask("pets", "cats", None).await;
        assert!(matches!(result, Err(MurmurError::Generation(_))));
        assert!(orchestrator.library().history("pets").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_corpus() {
        let generator = Arc::new(MockGenerator::replying(""));
        let orchestrator = orchestrator(generator.clone());

        let result = orchestrator.ask("nope", "cats", None).await;
        assert!(matches!(result, Err(MurmurError::NotFound(_))));
        assert!(generator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_import_blank_text() {
        let orchestrator = orchestrator(Arc::new(MockGenerator::replying("")));
        let result = orchestrator.import_text("empty", "\n  \n", "-", None).await;
        assert!(matches!(result, Err(MurmurError::EmptyCorpus)));
    }

    #[tokio::test]
    async fn test_model_override() {
        let generator = Arc::new(MockGenerator::replying("ok"));
        let orchestrator = orchestrator(generator.clone()).with_model("llama-3");
        with_pets(&orchestrator).await;

        orchestrator.ask("pets", "dogs", None).await.unwrap();
        assert_eq!(generator.requests()[0].model, "llama-3");
    }

    #[tokio::test]
    async fn test_resolve_api_key() {
        let library = Library::new(Arc::new(MemoryStore::new()));
        let mut settings = Settings::default();

        assert_eq!(resolve_api_key(&settings, &library).await.unwrap(), "lm-studio");

        settings.backend.api_key_name = Some("work".to_string());
        assert!(resolve_api_key(&settings, &library).await.is_err());

        library.save_api_key("work", "sk-123").await.unwrap();
        assert_eq!(resolve_api_key(&settings, &library).await.unwrap(), "sk-123");

        settings.backend.api_key = Some("literal".to_string());
        assert_eq!(resolve_api_key(&settings, &library).await.unwrap(), "literal");
    }
}
