//! Sentence segmentation and passive-auxiliary labelling.
//!
//! `DependencyParser` is the seam the passive-voice detector consumes. `RuleParser` is the
//! built-in implementation: it segments sentences, tokenises them, and labels a form of
//! *be* or *get* as `AuxPass` when the next content token (after adverbs and negations)
//! is a past participle.
//!
//! The parser is built once at startup and shared read-only. A broken model file is a
//! startup failure, never a per-request one.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9]+(?:[-'’][A-Za-z0-9]+)*|\S").expect("valid token regex")
});

const BE_FORMS: &[&str] = &["am", "is", "are", "was", "were", "be", "been", "being"];
const GET_FORMS: &[&str] = &["get", "gets", "got", "gotten", "getting"];
const OTHER_AUXILIARIES: &[&str] = &[
    "have", "has", "had", "having", "do", "does", "did", "will", "would", "shall", "should",
    "can", "could", "may", "might", "must",
];

/// Tokens allowed between an auxiliary and its participle.
const SKIPPABLE: &[&str] = &[
    "not", "never", "also", "already", "just", "still", "then", "often", "always", "soon",
    "ever", "later", "all", "both", "each", "indeed", "once", "further", "again",
];

#[rustfmt::skip]
const IRREGULAR_PARTICIPLES: &[&str] = &[
    "arisen", "awoken", "beaten", "begun", "bent", "bet", "bid", "bitten", "blown", "bought",
    "broken", "brought", "built", "burnt", "caught", "chosen", "cost", "cut", "dealt", "done",
    "drawn", "driven", "eaten", "fallen", "fed", "felt", "forbidden", "forgiven", "forgotten",
    "fought", "found", "flown", "frozen", "given", "gone", "grown", "heard", "held", "hidden",
    "hit", "hung", "hurt", "kept", "known", "laid", "led", "left", "lent", "let", "lost",
    "made", "meant", "met", "overseen", "paid", "put", "quit", "read", "rebuilt", "redone",
    "rewritten", "ridden", "risen", "run", "rung", "said", "sat", "seen", "sent", "set",
    "shaken", "shown", "shut", "slept", "slid", "sold", "sought", "spent", "spoken", "spread",
    "spun", "stolen", "stood", "struck", "stuck", "sung", "sunk", "swept", "sworn", "swum",
    "taken", "taught", "thought", "thrown", "told", "torn", "undertaken", "understood",
    "withdrawn", "woken", "won", "worn", "written",
];

/// `-ed` words that read as adjectives after *be* ("I am interested in ...").
#[rustfmt::skip]
const ADJECTIVAL_ED: &[&str] = &[
    "interested", "excited", "experienced", "skilled", "motivated", "self-motivated",
    "dedicated", "talented", "detailed", "advanced", "pleased", "delighted", "thrilled",
    "tired", "bored", "concerned", "worried", "satisfied", "determined", "devoted",
    "accustomed", "oriented", "detail-oriented", "results-oriented",
];

/// Words ending in `-ed` that are not verb forms at all.
#[rustfmt::skip]
const NON_PARTICIPLE_ED: &[&str] = &[
    "need", "speed", "feed", "seed", "bleed", "proceed", "exceed", "succeed", "breed", "greed",
    "heed", "deed", "embed", "shed", "bed", "red", "hundred", "sacred", "naked", "wicked",
    "kindred", "rugged", "crooked", "ragged", "beloved",
];

/// Dependency relation assigned to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepLabel {
    /// Passive auxiliary ("was" in "was promoted").
    AuxPass,
    /// Any other auxiliary or copula.
    Aux,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub dep: DepLabel,
}

/// One segmented sentence. `text` is the raw span, untrimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSentence {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl ParsedSentence {
    pub fn has_passive_aux(&self) -> bool {
        self.tokens.iter().any(|t| t.dep == DepLabel::AuxPass)
    }
}

/// Sentence segmentation plus per-token dependency labels.
pub trait DependencyParser: Send + Sync {
    fn parse(&self, text: &str) -> Vec<ParsedSentence>;
}

/// Rule-based English parser. Only the passive-auxiliary relation is modelled precisely.
#[derive(Debug, Clone)]
pub struct RuleParser {
    participles: HashSet<String>,
}

impl Default for RuleParser {
    fn default() -> Self {
        Self {
            participles: IRREGULAR_PARTICIPLES.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl RuleParser {
    /// Builds the parser, extending the participle lexicon from `model_path` when given.
    ///
    /// The model file holds one participle per line; blank lines and `#` comments are
    /// ignored. A missing or malformed file is an error.
    pub fn load(model_path: Option<&Path>) -> Result<Self> {
        let mut parser = Self::default();
        let Some(path) = model_path else {
            return Ok(parser);
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read parser model {}", path.display()))?;
        for (line_no, line) in raw.lines().enumerate() {
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            if !entry.chars().all(|c| c.is_alphabetic() || c == '-') {
                bail!(
                    "Parser model {} line {}: '{}' is not a single word",
                    path.display(),
                    line_no + 1,
                    entry
                );
            }
            parser.participles.insert(entry.to_lowercase());
        }
        Ok(parser)
    }

    pub fn lexicon_size(&self) -> usize {
        self.participles.len()
    }

    fn is_past_participle(&self, word: &str) -> bool {
        if self.participles.contains(word) {
            return true;
        }
        if ADJECTIVAL_ED.contains(&word) || NON_PARTICIPLE_ED.contains(&word) {
            return false;
        }
        word.len() >= 4 && word.ends_with("ed")
    }

    fn label(&self, words: &[String]) -> Vec<DepLabel> {
        let normalized: Vec<String> = words.iter().map(|w| normalize(w)).collect();
        let mut labels = vec![DepLabel::Other; normalized.len()];

        for (i, word) in normalized.iter().enumerate() {
            let word = word.as_str();
            let is_be = BE_FORMS.contains(&word);
            let is_get = GET_FORMS.contains(&word);
            if is_be || OTHER_AUXILIARIES.contains(&word) {
                labels[i] = DepLabel::Aux;
            }
            if !(is_be || is_get) {
                continue;
            }
            let next = normalized[i + 1..]
                .iter()
                .find(|w| !is_skippable(w));
            if next.is_some_and(|w| self.is_past_participle(w)) {
                labels[i] = DepLabel::AuxPass;
            }
        }
        labels
    }
}

impl DependencyParser for RuleParser {
    fn parse(&self, text: &str) -> Vec<ParsedSentence> {
        split_sentences(text)
            .into_iter()
            .map(|span| {
                let words: Vec<String> = TOKEN_RE
                    .find_iter(span)
                    .map(|m| m.as_str().to_string())
                    .collect();
                let labels = self.label(&words);
                ParsedSentence {
                    text: span.to_string(),
                    tokens: words
                        .into_iter()
                        .zip(labels)
                        .map(|(text, dep)| Token { text, dep })
                        .collect(),
                }
            })
            .collect()
    }
}

/// Lowercases, unifies apostrophes, and strips a trailing negative contraction
/// ("wasn't" → "was").
fn normalize(word: &str) -> String {
    let lower = word.to_lowercase().replace('’', "'");
    match lower.strip_suffix("n't") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => lower,
    }
}

fn is_skippable(word: &str) -> bool {
    SKIPPABLE.contains(&word) || (word.len() > 4 && word.ends_with("ly"))
}

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "inc", "ltd", "co", "corp", "e.g",
    "i.e", "u.s", "approx", "dept", "est", "fig", "jan", "feb", "mar", "apr", "jun", "jul",
    "aug", "sep", "sept", "oct", "nov", "dec",
];

const BULLETS: &[char] = &['•', '·', '▪', '●', '◦', '‣', '○', '■', '-', '*', '–'];

/// Capitalised nouns that take a single-letter label ("Plan B", "Series A").
#[rustfmt::skip]
const LABEL_NOUNS: &[&str] = &[
    "appendix", "block", "building", "category", "class", "company", "exhibit", "floor",
    "grade", "group", "level", "model", "option", "part", "phase", "plan", "project", "round",
    "schedule", "section", "series", "site", "stage", "step", "team", "tier", "track", "type",
    "unit", "version", "vitamin", "wing", "zone",
];

/// Words that commonly open a new sentence, so never continue a name.
#[rustfmt::skip]
const SENTENCE_OPENERS: &[&str] = &[
    "a", "after", "also", "an", "as", "at", "before", "by", "during", "for", "from", "he",
    "her", "his", "i", "in", "it", "its", "my", "on", "our", "she", "that", "the", "their",
    "then", "these", "they", "this", "those", "we", "when", "while", "with",
];

fn trim_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// "J." style token: one uppercase letter and a period.
fn is_initial_token(token: &str) -> bool {
    let token = token.trim_start_matches(|c: char| !c.is_alphanumeric());
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some('.'), None) if letter.is_uppercase()
    )
}

/// Whether a period after `preceding` belongs to an abbreviation or a name initial
/// rather than ending the sentence. `following` is the text after the period.
fn is_abbreviation(preceding: &str, following: &str) -> bool {
    let mut words = preceding.split_whitespace().rev();
    let last = trim_word(words.next().unwrap_or_default());
    if ABBREVIATIONS.contains(&last.to_lowercase().as_str()) {
        return true;
    }
    let mut letters = last.chars();
    let single_upper = matches!(
        (letters.next(), letters.next()),
        (Some(letter), None) if letter.is_uppercase()
    );
    if !single_upper {
        return false;
    }

    // "J. Smith ..." at the start of a span, or a run of initials ("J. R. Smith").
    let Some(previous) = words.next() else {
        return true;
    };
    if is_initial_token(previous) {
        return true;
    }

    // Middle initial ("John F. Kennedy"): a name on both sides.
    let previous = trim_word(previous);
    let next = trim_word(following.split_whitespace().next().unwrap_or_default());
    starts_uppercase(previous)
        && !LABEL_NOUNS.contains(&previous.to_lowercase().as_str())
        && starts_uppercase(next)
        && !SENTENCE_OPENERS.contains(&next.to_lowercase().as_str())
}

fn continues_on_next_line(line: &str) -> bool {
    line.trim_end()
        .ends_with(|c: char| matches!(c, ',' | ';' | ':' | '&' | '/' | '(' | '-'))
}

fn push_span<'a>(out: &mut Vec<&'a str>, span: &'a str) {
    if !span.trim().is_empty() {
        out.push(span);
    }
}

/// Splits text into sentence spans.
///
/// Boundaries: terminal punctuation followed by whitespace or end of text (not after an
/// abbreviation or initial), blank lines, and line breaks that open a bullet or a new
/// capitalised line. Whitespace-only spans are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let (pos, c) = chars[i];
        match c {
            '.' | '!' | '?' => {
                let mut j = i + 1;
                while j < chars.len()
                    && matches!(chars[j].1, '.' | '!' | '?' | '"' | '\'' | ')' | ']' | '”' | '’')
                {
                    j += 1;
                }
                let end = chars.get(j).map_or(text.len(), |&(p, _)| p);
                let at_boundary = chars.get(j).map_or(true, |&(_, n)| n.is_whitespace());
                if at_boundary && !(c == '.' && is_abbreviation(&text[start..pos], &text[end..]))
                {
                    push_span(&mut sentences, &text[start..end]);
                    start = end;
                }
                i = j;
            }
            '\n' => {
                let mut j = i + 1;
                let mut blank_line = false;
                while j < chars.len() && chars[j].1.is_whitespace() {
                    blank_line |= chars[j].1 == '\n';
                    j += 1;
                }
                if let Some(&(_, next)) = chars.get(j) {
                    let new_line_starts_sentence = BULLETS.contains(&next)
                        || ((next.is_uppercase() || next.is_ascii_digit())
                            && !continues_on_next_line(&text[start..pos]));
                    if blank_line || new_line_starts_sentence {
                        push_span(&mut sentences, &text[start..pos]);
                        start = pos;
                    }
                }
                i = j;
            }
            _ => i += 1,
        }
    }
    push_span(&mut sentences, &text[start..]);
    sentences
}
