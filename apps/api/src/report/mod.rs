// Downloadable PDF report of one analysis run.
// Content is assembled as blocks, laid out onto pages, then written with lopdf.
// Rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod pdf_writer;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::analysis::AnalysisResult;
use crate::errors::AppError;

pub use font_metrics::{default_page_config, PageConfig};
use layout::{layout_pages, Block};

pub const REPORT_TITLE: &str = "Resume Tone Analyzer Report";
pub const REPORT_FILENAME: &str = "resume_tone_report.pdf";
/// Characters of source text reproduced at the end of the report.
pub const EXCERPT_CHARS: usize = 5000;

const SECTION_GAP_PT: f32 = 12.0;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to encode page content: {0}")]
    Encode(String),
    #[error("failed to write PDF: {0}")]
    Write(String),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        AppError::Report(err.to_string())
    }
}

/// Assembles the report content in section order.
pub fn build_report_blocks(
    text: &str,
    analysis: &AnalysisResult,
    generated_at: NaiveDateTime,
) -> Vec<Block> {
    let sentiment = &analysis.sentiment;
    let mut blocks = vec![
        Block::Title(REPORT_TITLE.to_string()),
        Block::Paragraph(format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"))),
        Block::Spacer(SECTION_GAP_PT),
        Block::Heading("Sentiment Analysis".to_string()),
        Block::Paragraph(format!("VADER compound: {:.3}", sentiment.intensity.compound)),
        Block::Paragraph(format!(
            "Pos/Neg/Neu: {:.2}/{:.2}/{:.2}",
            sentiment.intensity.pos, sentiment.intensity.neg, sentiment.intensity.neu
        )),
        Block::Paragraph(format!(
            "Lexicon Polarity: {:.3}, Subjectivity: {:.3}",
            sentiment.polarity, sentiment.subjectivity
        )),
        Block::Spacer(SECTION_GAP_PT),
        Block::Heading("Passive Voice Sentences".to_string()),
    ];

    if analysis.passive_sents.is_empty() {
        blocks.push(Block::Paragraph("No passive voice sentences detected.".to_string()));
    } else {
        blocks.extend(analysis.passive_sents.iter().cloned().map(Block::Bullet));
    }
    blocks.push(Block::Spacer(SECTION_GAP_PT));

    blocks.push(Block::Heading("Assertive Rewording Suggestions".to_string()));
    if analysis.suggestions.is_empty() {
        blocks.push(Block::Paragraph("No weak phrases detected.".to_string()));
    } else {
        blocks.extend(analysis.suggestions.iter().cloned().map(Block::Bullet));
    }
    blocks.push(Block::Spacer(SECTION_GAP_PT));

    blocks.push(Block::Heading(format!(
        "Extracted Resume Text (first {EXCERPT_CHARS} chars)"
    )));
    blocks.push(Block::Paragraph(excerpt(text)));
    blocks
}

/// First `EXCERPT_CHARS` characters, counted as chars rather than bytes.
fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}

/// Renders the full report and returns the PDF bytes.
pub fn render_report(
    text: &str,
    analysis: &AnalysisResult,
    generated_at: NaiveDateTime,
    config: &PageConfig,
) -> Result<Vec<u8>, ReportError> {
    let blocks = build_report_blocks(text, analysis, generated_at);
    let pages = layout_pages(&blocks, config);
    tracing::debug!("Report laid out on {} page(s)", pages.len());
    pdf_writer::write_pdf(&pages, config, REPORT_TITLE)
}
