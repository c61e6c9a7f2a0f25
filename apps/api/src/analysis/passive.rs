use crate::analysis::parser::{DependencyParser, ParsedSentence};

/// Returns every sentence carrying a passive auxiliary, trimmed, in document order.
pub fn detect_passive_sentences(text: &str, parser: &dyn DependencyParser) -> Vec<String> {
    passive_sentences(&parser.parse(text))
}

/// Same as `detect_passive_sentences`, over sentences that are already parsed.
pub fn passive_sentences(parsed: &[ParsedSentence]) -> Vec<String> {
    parsed
        .iter()
        .filter(|sentence| sentence.has_passive_aux())
        .map(|sentence| sentence.text.trim().to_string())
        .collect()
}
