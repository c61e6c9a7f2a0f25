//! Report layout: flows styled blocks into positioned lines on fixed-size pages.
//!
//! Pure and synchronous. The PDF writer only draws what this stage places, so every
//! pagination decision can be checked without producing a document.

use serde::{Deserialize, Serialize};

use crate::report::font_metrics::{get_metrics, FontFace, PageConfig};
use crate::report::pdf_writer::to_win_ansi_text;

/// One unit of report content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading(String),
    /// Body text. `\n` forces a line break; an empty line between breaks is kept.
    Paragraph(String),
    /// Body text with a leading bullet and hanging indent.
    Bullet(String),
    /// Vertical gap in points.
    Spacer(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    face: FontFace,
    size_pt: f32,
    leading_pt: f32,
    space_before_pt: f32,
    space_after_pt: f32,
    align: Align,
}

const TITLE_STYLE: TextStyle = TextStyle {
    face: FontFace::HelveticaBold,
    size_pt: 18.0,
    leading_pt: 22.0,
    space_before_pt: 0.0,
    space_after_pt: 6.0,
    align: Align::Center,
};

const HEADING_STYLE: TextStyle = TextStyle {
    face: FontFace::HelveticaBold,
    size_pt: 14.0,
    leading_pt: 18.0,
    space_before_pt: 12.0,
    space_after_pt: 6.0,
    align: Align::Left,
};

const BODY_STYLE: TextStyle = TextStyle {
    face: FontFace::Helvetica,
    size_pt: 10.0,
    leading_pt: 12.0,
    space_before_pt: 0.0,
    space_after_pt: 0.0,
    align: Align::Left,
};

const BULLET_PREFIX: &str = "• ";

/// A single line of text at its final position. `y_pt` is the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLine {
    pub text: String,
    pub face: FontFace,
    pub size_pt: f32,
    pub x_pt: f32,
    pub y_pt: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

struct Flow<'a> {
    config: &'a PageConfig,
    pages: Vec<PageLayout>,
    cursor_pt: f32,
}

impl<'a> Flow<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            pages: vec![PageLayout::default()],
            cursor_pt: config.top_pt(),
        }
    }

    fn at_page_top(&self) -> bool {
        self.cursor_pt >= self.config.top_pt()
    }

    fn new_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.cursor_pt = self.config.top_pt();
    }

    /// Gaps are dropped at the top of a page and never carried onto the next one.
    fn gap(&mut self, height_pt: f32) {
        if height_pt <= 0.0 || self.at_page_top() {
            return;
        }
        self.cursor_pt -= height_pt;
        if self.cursor_pt < self.config.bottom_pt() {
            self.new_page();
        }
    }

    fn line(&mut self, text: String, style: &TextStyle, indent_pt: f32) {
        if self.cursor_pt - style.leading_pt < self.config.bottom_pt() && !self.at_page_top() {
            self.new_page();
        }
        self.cursor_pt -= style.leading_pt;

        let metrics = get_metrics(style.face);
        let x_pt = match style.align {
            Align::Left => self.config.margin_pt + indent_pt,
            Align::Center => {
                let width = metrics.measure_str(&text, style.size_pt);
                self.config.margin_pt + ((self.config.text_width_pt() - width) / 2.0).max(0.0)
            }
        };
        // Baseline sits a descender's depth above the bottom of the line box.
        let y_pt = self.cursor_pt + (style.leading_pt - style.size_pt) / 2.0 + style.size_pt * 0.2;

        if let Some(page) = self.pages.last_mut() {
            page.lines.push(PlacedLine {
                text,
                face: style.face,
                size_pt: style.size_pt,
                x_pt,
                y_pt,
            });
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Title(text) => self.styled(text, &TITLE_STYLE),
            Block::Heading(text) => self.styled(text, &HEADING_STYLE),
            Block::Paragraph(text) => self.styled(text, &BODY_STYLE),
            Block::Bullet(text) => self.bullet(text),
            Block::Spacer(height) => self.gap(*height),
        }
    }

    fn styled(&mut self, text: &str, style: &TextStyle) {
        self.gap(style.space_before_pt);
        let width = self.config.text_width_pt();
        for line in wrap_hard_lines(&to_win_ansi_text(text), style, width) {
            self.line(line, style, 0.0);
        }
        self.gap(style.space_after_pt);
    }

    fn bullet(&mut self, text: &str) {
        let style = &BODY_STYLE;
        let indent = get_metrics(style.face).measure_str(BULLET_PREFIX, style.size_pt);
        let width = self.config.text_width_pt() - indent;
        let lines = wrap_hard_lines(&to_win_ansi_text(text), style, width);
        for (i, line) in lines.into_iter().enumerate() {
            if i == 0 {
                self.line(format!("{BULLET_PREFIX}{line}"), style, 0.0);
            } else {
                self.line(line, style, indent);
            }
        }
    }
}

/// Wraps each `\n`-separated line on its own. Blank lines between breaks survive as
/// empty lines; fully empty text produces nothing.
fn wrap_hard_lines(text: &str, style: &TextStyle, max_width_pt: f32) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let metrics = get_metrics(style.face);
    text.split('\n')
        .flat_map(|hard_line| {
            let wrapped = metrics.wrap(hard_line, style.size_pt, max_width_pt);
            if wrapped.is_empty() {
                vec![String::new()]
            } else {
                wrapped
            }
        })
        .collect()
}

/// Flows `blocks` top-to-bottom onto as many pages as they need. Always returns at
/// least one page.
pub fn layout_pages(blocks: &[Block], config: &PageConfig) -> Vec<PageLayout> {
    let mut flow = Flow::new(config);
    for block in blocks {
        flow.block(block);
    }
    flow.pages
}
