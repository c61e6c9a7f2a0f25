//! Two independent sentiment passes, reported side by side and never reconciled.
//!
//! - Intensity pass: VADER (`vader_sentiment`), giving compound/pos/neg/neu.
//! - Polarity pass: a `PolarityModel`, giving polarity/subjectivity.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::lexicon::{PatternLexicon, PolarityModel};

/// VADER intensity scores. Compound is in [-1, 1]; the rest are proportions in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntensityScores {
    pub compound: f64,
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
}

/// Fixed-shape sentiment record. Keys match the analysis JSON contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    #[serde(rename = "VADER")]
    pub intensity: IntensityScores,
    #[serde(rename = "Polarity")]
    pub polarity: f64,
    #[serde(rename = "Subjectivity")]
    pub subjectivity: f64,
}

/// Runs both passes. Built once at startup and shared across requests.
#[derive(Clone)]
pub struct SentimentScorer {
    polarity_model: Arc<dyn PolarityModel>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(Arc::new(PatternLexicon))
    }
}

impl SentimentScorer {
    pub fn new(polarity_model: Arc<dyn PolarityModel>) -> Self {
        Self { polarity_model }
    }

    /// Scores `text`. Empty or whitespace-only text is all zeros from both passes.
    pub fn score(&self, text: &str) -> SentimentSummary {
        if text.trim().is_empty() {
            return SentimentSummary::default();
        }
        let (polarity, subjectivity) = self.polarity_model.polarity_subjectivity(text);
        SentimentSummary {
            intensity: intensity_scores(text),
            polarity,
            subjectivity,
        }
    }
}

fn intensity_scores(text: &str) -> IntensityScores {
    // The analyzer borrows VADER's static lexicons, so construction is cheap.
    let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
    let scores = analyzer.polarity_scores(text);
    let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);
    IntensityScores {
        compound: get("compound"),
        pos: get("pos"),
        neg: get("neg"),
        neu: get("neu"),
    }
}
