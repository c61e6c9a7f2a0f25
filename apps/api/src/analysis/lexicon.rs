//! Pattern-style polarity/subjectivity model.
//!
//! Each lexicon hit is one assessment of (polarity, subjectivity). An intensifier
//! directly before the hit scales both; a negation within the two preceding tokens
//! flips polarity by -0.5. The summary is the mean over all assessments.

use once_cell::sync::Lazy;
use regex::Regex;

/// The polarity pass of sentiment scoring. Separate from the intensity (VADER) pass.
pub trait PolarityModel: Send + Sync {
    /// Returns `(polarity, subjectivity)` in `[-1, 1]` and `[0, 1]`.
    fn polarity_subjectivity(&self, text: &str) -> (f64, f64);
}

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+(?:['’][A-Za-z]+)*").expect("valid word regex"));

const NEGATIONS: &[&str] = &[
    "not", "never", "no", "n't", "nothing", "neither", "nor", "hardly", "without",
];

/// (word, multiplier)
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("really", 1.2),
    ("truly", 1.2),
    ("exceptionally", 1.5),
    ("incredibly", 1.4),
    ("remarkably", 1.3),
    ("particularly", 1.2),
    ("consistently", 1.1),
    ("somewhat", 0.7),
    ("slightly", 0.6),
    ("fairly", 0.8),
    ("quite", 1.1),
];

/// (word, polarity, subjectivity)
#[rustfmt::skip]
const LEXICON: &[(&str, f64, f64)] = &[
    // positive
    ("able", 0.50, 0.63),           ("accomplished", 0.40, 0.50),   ("accurate", 0.40, 0.57),
    ("active", -0.13, 0.40),        ("adept", 0.50, 0.60),          ("advanced", 0.40, 0.50),
    ("amazing", 0.60, 0.90),        ("ambitious", 0.30, 0.60),      ("awesome", 1.00, 1.00),
    ("beautiful", 0.85, 1.00),      ("best", 1.00, 0.30),           ("better", 0.50, 0.50),
    ("brilliant", 0.90, 1.00),      ("capable", 0.25, 0.40),        ("clean", 0.37, 0.69),
    ("clear", 0.10, 0.38),          ("competent", 0.40, 0.60),      ("complete", 0.10, 0.40),
    ("confident", 0.50, 0.83),      ("consistent", 0.25, 0.25),     ("creative", 0.50, 0.50),
    ("critical", 0.00, 0.80),       ("dedicated", 0.40, 0.60),      ("dependable", 0.40, 0.50),
    ("diligent", 0.40, 0.60),       ("dynamic", 0.00, 0.00),        ("easy", 0.43, 0.83),
    ("effective", 0.60, 0.80),      ("efficient", 0.50, 0.70),      ("energetic", 0.40, 0.60),
    ("enthusiastic", 0.50, 0.70),   ("excellent", 1.00, 1.00),      ("exceptional", 0.67, 1.00),
    ("expert", 0.50, 0.60),         ("extensive", 0.00, 0.50),      ("fantastic", 0.40, 0.90),
    ("fast", 0.20, 0.60),           ("favorite", 0.50, 1.00),       ("fine", 0.42, 0.50),
    ("flexible", 0.20, 0.50),       ("fortunate", 0.40, 0.70),      ("friendly", 0.38, 0.50),
    ("good", 0.70, 0.60),           ("great", 0.80, 0.75),          ("happy", 0.80, 1.00),
    ("hardworking", 0.40, 0.60),    ("helpful", 0.50, 0.50),        ("high", 0.16, 0.54),
    ("ideal", 0.90, 0.90),          ("impressive", 1.00, 1.00),     ("improved", 0.40, 0.50),
    ("innovative", 0.50, 0.60),     ("insightful", 0.50, 0.70),     ("intelligent", 0.80, 0.90),
    ("interesting", 0.50, 0.50),    ("key", 0.00, 0.00),            ("knowledgeable", 0.50, 0.60),
    ("large", 0.21, 0.43),          ("leading", 0.30, 0.40),        ("love", 0.50, 0.60),
    ("loyal", 0.33, 0.50),          ("major", 0.06, 0.50),          ("meticulous", 0.40, 0.70),
    ("motivated", 0.40, 0.60),      ("new", 0.14, 0.45),            ("nice", 0.60, 1.00),
    ("optimal", 0.40, 0.50),        ("organized", 0.30, 0.50),      ("outstanding", 0.50, 0.67),
    ("passionate", 0.50, 0.90),     ("perfect", 1.00, 1.00),        ("positive", 0.23, 0.55),
    ("powerful", 0.30, 0.80),       ("proactive", 0.40, 0.60),      ("productive", 0.40, 0.50),
    ("professional", 0.10, 0.10),   ("proficient", 0.50, 0.60),     ("proud", 0.80, 1.00),
    ("quick", 0.33, 0.50),          ("reliable", 0.40, 0.50),       ("remarkable", 0.75, 0.75),
    ("resourceful", 0.40, 0.60),    ("robust", 0.30, 0.50),         ("scalable", 0.20, 0.30),
    ("secure", 0.40, 0.60),         ("significant", 0.38, 0.88),    ("skilled", 0.50, 0.60),
    ("smart", 0.21, 0.64),          ("solid", 0.00, 0.10),          ("strategic", 0.10, 0.30),
    ("strong", 0.43, 0.73),         ("substantial", 0.20, 0.50),    ("successful", 0.75, 0.95),
    ("superb", 1.00, 1.00),         ("talented", 0.70, 0.90),       ("thorough", 0.40, 0.60),
    ("top", 0.50, 0.50),            ("useful", 0.30, 0.00),         ("valuable", 0.50, 0.60),
    ("versatile", 0.40, 0.60),      ("wonderful", 1.00, 1.00),
    // negative
    ("awful", -1.00, 1.00),         ("bad", -0.70, 0.67),           ("boring", -1.00, 1.00),
    ("broken", -0.40, 0.40),        ("careless", -0.50, 0.70),      ("complicated", -0.50, 1.00),
    ("confusing", -0.30, 0.70),     ("difficult", -0.50, 1.00),     ("disappointing", -0.60, 0.70),
    ("failed", -0.50, 0.30),        ("poor", -0.40, 0.60),          ("hard", -0.29, 0.54),
    ("horrible", -1.00, 1.00),      ("inadequate", -0.50, 0.50),    ("incompetent", -0.70, 0.80),
    ("ineffective", -0.50, 0.70),   ("inefficient", -0.50, 0.70),   ("late", -0.30, 0.60),
    ("lazy", -0.25, 1.00),          ("limited", -0.07, 0.14),       ("low", 0.00, 0.30),
    ("mediocre", -0.50, 0.80),      ("negative", -0.30, 0.40),      ("problematic", -0.50, 0.60),
    ("sad", -0.50, 1.00),           ("slow", -0.30, 0.39),          ("terrible", -1.00, 1.00),
    ("tedious", -0.40, 0.80),       ("unreliable", -0.50, 0.60),    ("unsuccessful", -0.50, 0.60),
    ("weak", -0.38, 0.63),          ("worse", -0.40, 0.60),         ("worst", -1.00, 1.00),
    ("wrong", -0.50, 0.90),
];

/// Lexicon-backed `PolarityModel` built from the static table above.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternLexicon;

impl PatternLexicon {
    fn lookup(word: &str) -> Option<(f64, f64)> {
        LEXICON
            .iter()
            .find(|(w, _, _)| *w == word)
            .map(|&(_, p, s)| (p, s))
    }

    fn intensity(word: &str) -> Option<f64> {
        INTENSIFIERS
            .iter()
            .find(|(w, _)| *w == word)
            .map(|&(_, m)| m)
    }

    fn is_negation(word: &str) -> bool {
        NEGATIONS.contains(&word) || word.ends_with("n't") || word.ends_with("n’t")
    }
}

impl PolarityModel for PatternLexicon {
    fn polarity_subjectivity(&self, text: &str) -> (f64, f64) {
        let words: Vec<String> = WORD_RE
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect();

        let mut assessments: Vec<(f64, f64)> = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let Some((mut polarity, mut subjectivity)) = Self::lookup(word) else {
                continue;
            };
            if let Some(multiplier) = i.checked_sub(1).and_then(|j| Self::intensity(&words[j])) {
                polarity *= multiplier;
                subjectivity *= multiplier;
            }
            let negated = words[i.saturating_sub(2)..i]
                .iter()
                .any(|w| Self::is_negation(w));
            if negated {
                polarity *= -0.5;
            }
            assessments.push((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)));
        }

        if assessments.is_empty() {
            return (0.0, 0.0);
        }
        let n = assessments.len() as f64;
        let polarity = assessments.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = assessments.iter().map(|(_, s)| s).sum::<f64>() / n;
        (polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0))
    }
}
