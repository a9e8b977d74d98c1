//! Prompt assembly and answer generation.

use super::generator::{GenerationRequest, Generator};
use crate::config::Prompts;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Sampling temperature used for every answer.
pub const ANSWER_TEMPERATURE: f32 = 0.7;

/// Turns retrieved fragments and a query into a backend answer.
///
/// The generator is built once and shared across queries.
#[derive(Clone)]
pub struct Answerer {
    generator: Arc<dyn Generator>,
    model: String,
    prompts: Prompts,
}

impl Answerer {
    /// Create an answerer using the default prompts.
    pub fn new(generator: Arc<dyn Generator>, model: &str) -> Self {
        Self {
            generator,
            model: model.to_string(),
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Use a different model identifier.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the backend request for a query and its context fragments.
    pub fn build_request(&self, fragments: &[String], query: &str) -> GenerationRequest {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), format_context(fragments));
        vars.insert("query".to_string(), query.to_string());

        GenerationRequest {
            system: self.prompts.answer.system.clone(),
            user: self.prompts.render_with_custom(&self.prompts.answer.user, &vars),
            model: self.model.clone(),
            temperature: ANSWER_TEMPERATURE,
        }
    }

    /// Ask the backend to answer `query` from `fragments`.
    ///
    /// The backend's text is returned unmodified; failures are not retried.
    #[instrument(skip(self, fragments, query), fields(fragments = fragments.len(), query = %query))]
    pub async fn answer(&self, fragments: &[String], query: &str) -> Result<String> {
        let request = self.build_request(fragments, query);
        info!("Requesting answer from {}", self.model);
        self.generator.generate(&request).await
    }
}

/// Render fragments for the prompt, one per line, verbatim.
pub fn format_context(fragments: &[String]) -> String {
    fragments.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MurmurError;
    use crate::rag::mock::MockGenerator;

    fn fragments() -> Vec<String> {
        vec!["I love cats".to_string(), "cats are great".to_string()]
    }

    #[tokio::test]
    async fn test_prompt_contract() {
        let generator = Arc::new(MockGenerator::replying("They love cats."));
        let answerer = Answerer::new(generator.clone(), "phi-3");

        let answer = answerer.answer(&fragments(), "what do people love?").await.unwrap();
        assert_eq!(answer, "They love cats.");

        let requests = generator.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.system, "Use the provided comments to answer the query.");
        assert_eq!(
            request.user,
            "Comments: I love cats\ncats are great\n\nQuery: what do people love?"
        );
        assert_eq!(request.model, "phi-3");
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_answer_is_returned_verbatim() {
        let raw = "  **Answer**\n\n- not trimmed  ";
        let answerer = Answerer::new(Arc::new(MockGenerator::replying(raw)), "m");
        assert_eq!(answerer.answer(&fragments(), "q").await.unwrap(), raw);
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let generator = Arc::new(MockGenerator::failing("connection refused"));
        let answerer = Answerer::new(generator.clone(), "m");

        let result = answerer.answer(&fragments(), "q").await;
        assert!(matches!(result, Err(MurmurError::Generation(_))));
        assert_eq!(generator.requests().len(), 1);
    }

    #[test]
    fn test_fragments_and_query_are_inserted_literally() {
        let answerer = Answerer::new(Arc::new(MockGenerator::replying("")), "m");
        let fragments = vec![
            "template says {{query}} here".to_string(),
            "and {{context}} there".to_string(),
        ];

        for _ in 0..20 {
            let request = answerer.build_request(&fragments, "explain {{context}}");
            assert_eq!(
                request.user,
                "Comments: template says {{query}} here\nand {{context}} there\n\nQuery: explain {{context}}"
            );
        }
    }

    #[test]
    fn test_custom_prompts_and_model() {
        let mut prompts = Prompts::default();
        prompts.answer.user = "{{query}} ({{channel}}):\n{{context}}".to_string();
        prompts
            .variables
            .insert("channel".to_string(), "cooking".to_string());

        let answerer = Answerer::new(Arc::new(MockGenerator::replying("")), "m")
            .with_prompts(prompts)
            .with_model("other");

        let request = answerer.build_request(&fragments(), "why?");
        assert_eq!(request.user, "why? (cooking):\nI love cats\ncats are great");
        assert_eq!(request.model, "other");
        assert!((request.temperature - ANSWER_TEMPERATURE).abs() < f32::EPSILON);
    }
}
