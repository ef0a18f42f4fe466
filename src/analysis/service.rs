//! Request orchestration: resolve theme, build prompt, call the model,
//! salvage the reply.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::analysis::{extract_json_with, has_gaps, ExtractionStrategy};
use crate::llm::LlmProvider;
use crate::prompts::{self, HistoryEntry};
use crate::themes::{self, ThemeDefinition, DEFAULT_THEME_ID};
use crate::{MeetingMindError, Result};

/// Confidence reported when the model omits one.
const DEFAULT_DETECTION_CONFIDENCE: u64 = 5;

/// Scoring of a single statement.
#[derive(Debug, Clone)]
pub struct TranscriptAnalysis {
    /// Raw model reply, passed through untouched
    pub analysis: String,
    /// Theme id as requested by the caller
    pub theme_used: String,
    /// Definition the request resolved to
    pub theme: &'static ThemeDefinition,
}

/// Theme chosen by the model for a meeting.
#[derive(Debug, Clone)]
pub struct ThemeDetection {
    /// Theme id as returned by the model
    pub theme_id: String,
    pub theme: &'static ThemeDefinition,
    pub confidence: Value,
    pub reason: Value,
}

#[derive(Debug, Clone)]
pub struct GapAnalysis {
    pub has_gaps: bool,
    pub analysis: Value,
    pub theme_used: String,
    pub theme: &'static ThemeDefinition,
}

#[derive(Debug, Clone)]
pub enum GapOutcome {
    /// Too few statements; the model was not called.
    Skipped { actual: usize },
    Analyzed(GapAnalysis),
}

#[derive(Debug, Clone)]
pub enum TopicOutcome {
    /// Too few statements; the model was not called.
    Skipped { actual: usize },
    Classified(Value),
}

/// Runs the analytical tasks against an injected model.
#[derive(Clone)]
pub struct Analyzer {
    provider: Arc<dyn LlmProvider>,
    extraction: ExtractionStrategy,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn LlmProvider>, extraction: ExtractionStrategy) -> Self {
        Self {
            provider,
            extraction,
        }
    }

    /// Score one statement on the dimensions of `theme_id`.
    pub async fn analyze(&self, transcript: &str, theme_id: &str) -> Result<TranscriptAnalysis> {
        let theme = themes::lookup(theme_id);
        info!(
            theme = theme_id,
            resolved = theme.id,
            chars = transcript.chars().count(),
            "Analyzing transcript"
        );

        let prompt = prompts::build_analysis_prompt(transcript, theme);
        let analysis = self.generate("analysis", &prompt).await?;

        Ok(TranscriptAnalysis {
            analysis,
            theme_used: theme_id.to_string(),
            theme,
        })
    }

    /// Ask the model which catalog theme the opening statements belong to.
    pub async fn detect_theme(&self, history: &[HistoryEntry]) -> Result<ThemeDetection> {
        info!(entries = history.len(), "Detecting theme");

        let prompt = prompts::build_theme_detection_prompt(history)?;
        let reply = self.generate("theme detection", &prompt).await?;
        let parsed = self.extract(&reply)?;

        let theme_id = parsed
            .get("theme")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_THEME_ID)
            .to_string();
        let theme = themes::lookup(&theme_id);

        Ok(ThemeDetection {
            theme_id,
            theme,
            confidence: parsed
                .get("confidence")
                .cloned()
                .unwrap_or_else(|| Value::from(DEFAULT_DETECTION_CONFIDENCE)),
            reason: parsed
                .get("reason")
                .cloned()
                .unwrap_or_else(|| Value::from("")),
        })
    }

    /// Find dimensions the discussion has neglected so far.
    pub async fn analyze_gaps(&self, history: &[HistoryEntry], theme_id: &str) -> Result<GapOutcome> {
        let theme = themes::lookup(theme_id);
        info!(entries = history.len(), theme = theme_id, resolved = theme.id, "Analyzing gaps");

        let prompt = match prompts::build_gap_analysis_prompt(history, theme) {
            Ok(prompt) => prompt,
            Err(MeetingMindError::InsufficientHistory { actual, .. }) => {
                debug!(actual, "Skipping gap analysis");
                return Ok(GapOutcome::Skipped { actual });
            }
            Err(e) => return Err(e),
        };

        let reply = self.generate("gap analysis", &prompt).await?;
        let analysis = self.extract(&reply)?;

        Ok(GapOutcome::Analyzed(GapAnalysis {
            has_gaps: has_gaps(&analysis),
            analysis,
            theme_used: theme_id.to_string(),
            theme,
        }))
    }

    /// Group statements into 3-5 topics.
    pub async fn classify_topics(&self, history: &[HistoryEntry]) -> Result<TopicOutcome> {
        info!(entries = history.len(), "Classifying topics");

        let prompt = match prompts::build_topic_classification_prompt(history) {
            Ok(prompt) => prompt,
            Err(MeetingMindError::InsufficientHistory { actual, .. }) => {
                debug!(actual, "Skipping topic classification");
                return Ok(TopicOutcome::Skipped { actual });
            }
            Err(e) => return Err(e),
        };

        let reply = self.generate("topic classification", &prompt).await?;
        let classification = self.extract(&reply)?;
        debug!(%classification, "Topic classification result");

        Ok(TopicOutcome::Classified(classification))
    }

    async fn generate(&self, task: &str, prompt: &str) -> Result<String> {
        debug!(task, "Prompt:\n{}", prompt);
        self.provider
            .generate(prompt)
            .await
            .map_err(MeetingMindError::ModelCall)
    }

    fn extract(&self, reply: &str) -> Result<Value> {
        extract_json_with(reply, self.extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with canned text and records every prompt it receives.
    struct ScriptedProvider {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl LlmProvider for FailingProvider {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            anyhow::bail!("quota exceeded")
        }
    }

    fn analyzer(provider: Arc<dyn LlmProvider>) -> Analyzer {
        Analyzer::new(provider, ExtractionStrategy::Legacy)
    }

    fn history(n: usize) -> Vec<HistoryEntry> {
        (0..n).map(|i| HistoryEntry::new(format!("発言 {i}"))).collect()
    }

    #[tokio::test]
    async fn analyze_passes_raw_reply_through() {
        let provider = ScriptedProvider::new("```json\n{\"topic\": \"x\"}\n```");
        let result = analyzer(provider.clone()).analyze("hello", "nope").await.unwrap();

        assert_eq!(result.analysis, "```json\n{\"topic\": \"x\"}\n```");
        assert_eq!(result.theme_used, "nope");
        assert_eq!(result.theme.id, "general");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn gap_analysis_with_one_entry_skips_model() {
        let provider = ScriptedProvider::new("{}");
        let outcome = analyzer(provider.clone())
            .analyze_gaps(&history(1), "general")
            .await
            .unwrap();

        assert!(matches!(outcome, GapOutcome::Skipped { actual: 1 }));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn gap_analysis_reports_missing_perspectives() {
        let provider =
            ScriptedProvider::new(r#"{"coverage": {}, "missing_perspectives": ["risk"], "suggestions": []}"#);
        let outcome = analyzer(provider)
            .analyze_gaps(&history(2), "budget_planning")
            .await
            .unwrap();

        let GapOutcome::Analyzed(gaps) = outcome else {
            panic!("expected an analysis");
        };
        assert!(gaps.has_gaps);
        assert_eq!(gaps.theme.id, "budget_planning");
        assert_eq!(gaps.analysis["missing_perspectives"][0], "risk");
    }

    #[tokio::test]
    async fn topic_classification_with_two_entries_skips_model() {
        let provider = ScriptedProvider::new("{}");
        let outcome = analyzer(provider.clone())
            .classify_topics(&history(2))
            .await
            .unwrap();

        assert!(matches!(outcome, TopicOutcome::Skipped { actual: 2 }));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn detection_defaults_missing_fields() {
        let provider = ScriptedProvider::new("Sure! {\"reason\": \"機械の話\"}");
        let detection = analyzer(provider).detect_theme(&history(3)).await.unwrap();

        assert_eq!(detection.theme_id, "general");
        assert_eq!(detection.confidence, Value::from(5));
        assert_eq!(detection.reason, Value::from("機械の話"));
    }

    #[tokio::test]
    async fn detection_keeps_model_theme_and_resolves_definition() {
        let provider = ScriptedProvider::new(r#"{"theme": "hr_evaluation", "confidence": 9}"#);
        let detection = analyzer(provider).detect_theme(&history(1)).await.unwrap();

        assert_eq!(detection.theme_id, "hr_evaluation");
        assert_eq!(detection.theme.display_name, "人事評価・採用");
        assert_eq!(detection.reason, Value::from(""));
    }

    #[tokio::test]
    async fn detection_rejects_empty_history_without_model_call() {
        let provider = ScriptedProvider::new("{}");
        let err = analyzer(provider.clone()).detect_theme(&[]).await.unwrap_err();

        assert!(matches!(err, MeetingMindError::InsufficientHistory { .. }));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn model_failure_is_reported() {
        let err = analyzer(Arc::new(FailingProvider))
            .analyze("x", "general")
            .await
            .unwrap_err();

        assert!(matches!(err, MeetingMindError::ModelCall(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn unparseable_reply_is_reported() {
        let provider = ScriptedProvider::new("I cannot help with that.");
        let err = analyzer(provider).classify_topics(&history(3)).await.unwrap_err();

        assert!(matches!(err, MeetingMindError::ResponseParse(_)));
    }
}
