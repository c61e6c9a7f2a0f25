// Analysis stage: sentiment, passive voice, assertive suggestions, highlighting.
// Every entry point goes through `Analyzer::analyze`, so upload and JSON callers
// always see identical results for identical text.

pub mod handlers;
pub mod highlight;
pub mod lexicon;
pub mod parser;
pub mod passive;
pub mod sentiment;
pub mod suggestions;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::highlight::Highlighter;
use crate::analysis::parser::DependencyParser;
use crate::analysis::passive::passive_sentences;
use crate::analysis::sentiment::{SentimentScorer, SentimentSummary};
use crate::analysis::suggestions::{suggest_rewordings, ReplacementTable};

/// The three derived artifacts of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: SentimentSummary,
    pub passive_sents: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Read-only analysis services, built once at startup and shared across requests.
#[derive(Clone)]
pub struct Analyzer {
    replacements: Arc<ReplacementTable>,
    highlighter: Arc<Highlighter>,
    parser: Arc<dyn DependencyParser>,
    scorer: SentimentScorer,
}

impl Analyzer {
    pub fn new(
        replacements: Arc<ReplacementTable>,
        parser: Arc<dyn DependencyParser>,
        scorer: SentimentScorer,
    ) -> Self {
        let highlighter = Highlighter::new(&replacements);
        debug!("Highlighter compiled {} pattern(s)", highlighter.pattern_count());
        Self {
            replacements,
            highlighter: Arc::new(highlighter),
            parser,
            scorer,
        }
    }

    /// Runs every analysis pass over `text`. Empty text is valid input.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let sentiment = self.scorer.score(text);
        let parsed = self.parser.parse(text);
        let passive_sents = passive_sentences(&parsed);
        let suggestions = suggest_rewordings(text, &self.replacements);
        debug!(
            "Analyzed {} sentence(s): {} passive, {} suggestion(s)",
            parsed.len(),
            passive_sents.len(),
            suggestions.len()
        );
        AnalysisResult {
            sentiment,
            passive_sents,
            suggestions,
        }
    }

    pub fn highlight(&self, text: &str) -> String {
        self.highlighter.highlight(text)
    }
}
