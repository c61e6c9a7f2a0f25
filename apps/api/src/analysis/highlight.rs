//! HTML highlighting of weak phrases and passive-voice marker words.
//!
//! Substitutions run phrase by phrase, table order first and marker words second, each
//! over the output of the previous one. Overlapping matches therefore nest, and the
//! last-applied style is the one that shows.

use regex::{Captures, Regex, RegexBuilder};

use crate::analysis::suggestions::ReplacementTable;

/// Words that commonly signal passive constructions.
pub const PASSIVE_MARKERS: &[&str] = &["was", "were", "been", "being", "by"];

const WEAK_STYLE: (&str, &str) = ("weak-phrase", "#fff2b2");
const PASSIVE_STYLE: (&str, &str) = ("passive-marker", "#ffd6d6");

/// Case-insensitive literal matchers, compiled once from the replacement table.
#[derive(Debug, Clone)]
pub struct Highlighter {
    patterns: Vec<(Regex, (&'static str, &'static str))>,
}

impl Highlighter {
    pub fn new(table: &ReplacementTable) -> Self {
        let patterns = table
            .entries()
            .iter()
            .map(|entry| (entry.weak.as_str(), WEAK_STYLE))
            .chain(PASSIVE_MARKERS.iter().map(|&marker| (marker, PASSIVE_STYLE)))
            .map(|(phrase, style)| (literal_regex(phrase), style))
            .collect();
        Self { patterns }
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Marks every case-insensitive occurrence of each weak phrase and marker word.
    /// Newlines become `<br>` after all substitutions.
    pub fn highlight(&self, text: &str) -> String {
        let mut html = escape_html(text);
        for (re, (class, color)) in &self.patterns {
            html = re
                .replace_all(&html, |caps: &Captures| {
                    format!(
                        "<mark class=\"{class}\" style=\"background:{color};padding:0.1rem;border-radius:3px\">{}</mark>",
                        &caps[0]
                    )
                })
                .into_owned();
        }
        let html = html.replace('\n', "<br>");
        format!("<div style=\"font-family:sans-serif; line-height:1.6; font-size:15px\">{html}</div>")
    }
}

fn literal_regex(phrase: &str) -> Regex {
    RegexBuilder::new(&regex::escape(phrase))
        .case_insensitive(true)
        .build()
        .expect("escaped literal is a valid regex")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::suggestions::Replacement;

    fn highlight(text: &str) -> String {
        Highlighter::new(&ReplacementTable::default()).highlight(text)
    }

    fn inner(html: &str) -> &str {
        html.strip_prefix("<div style=\"font-family:sans-serif; line-height:1.6; font-size:15px\">")
            .and_then(|s| s.strip_suffix("</div>"))
            .expect("wrapped in container div")
    }

    #[test]
    fn test_plain_text_is_only_wrapped() {
        assert_eq!(inner(&highlight("Shipped features")), "Shipped features");
    }

    #[test]
    fn test_weak_phrase_marked_case_insensitively_keeping_case() {
        let html = highlight("Helped launch. helped again.");
        assert_eq!(html.matches("class=\"weak-phrase\"").count(), 2);
        assert!(html.contains(">Helped</mark>"));
        assert!(html.contains(">helped</mark>"));
    }

    #[test]
    fn test_passive_markers_use_distinct_style() {
        let html = highlight("It WAS done");
        assert!(html.contains("class=\"passive-marker\" style=\"background:#ffd6d6"));
        assert!(html.contains(">WAS</mark>"));
        assert!(!html.contains("weak-phrase"));
    }

    #[test]
    fn test_newlines_become_breaks() {
        assert_eq!(inner(&highlight("line one\nline two")), "line one<br>line two");
    }

    #[test]
    fn test_markup_in_source_is_escaped() {
        assert_eq!(
            inner(&highlight("<script>&</script>")),
            "&lt;script&gt;&amp;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_overlapping_matches_nest() {
        let table = ReplacementTable::new(vec![Replacement {
            weak: "was responsible for".to_string(),
            strong: "owned".to_string(),
        }])
        .unwrap();
        let html = Highlighter::new(&table).highlight("I was responsible for QA");
        let weak = html.find("weak-phrase").unwrap();
        let passive = html.find("passive-marker").unwrap();
        let weak_close = html.rfind("</mark>").unwrap();
        assert!(weak < passive && passive < weak_close, "{html}");
        assert!(html.contains(">was</mark> responsible for</mark>"));
    }

    #[test]
    fn test_patterns_compiled_once_per_table() {
        let table = ReplacementTable::default();
        let highlighter = Highlighter::new(&table);
        assert_eq!(highlighter.pattern_count(), table.len() + PASSIVE_MARKERS.len());
        let first = highlighter.highlight("Helped ship. It was done.");
        assert_eq!(highlighter.highlight("Helped ship. It was done."), first);
        assert_eq!(highlighter.pattern_count(), table.len() + PASSIVE_MARKERS.len());
    }

    #[test]
    fn test_phrases_with_regex_metacharacters_match_literally() {
        let table = ReplacementTable::new(vec![Replacement {
            weak: "c++ (basic)".to_string(),
            strong: "C++".to_string(),
        }])
        .unwrap();
        let html = Highlighter::new(&table).highlight("Knows C++ (basic) and cpp");
        assert!(html.contains(">C++ (basic)</mark>"), "{html}");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(inner(&highlight("")), "");
    }
}
