//! Serializes laid-out pages into a PDF document with `lopdf`.
//!
//! Text is drawn with the standard Helvetica faces in WinAnsiEncoding, so every string
//! has to be reduced to that single-byte character set first.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::report::font_metrics::{FontFace, PageConfig};
use crate::report::layout::PageLayout;
use crate::report::ReportError;

const PRODUCER: &str = concat!("tone-analyzer ", env!("CARGO_PKG_VERSION"));

/// Code points 0x80..=0x9F in WinAnsiEncoding. The rest of 0xA0..=0xFF matches Latin-1.
const WIN_ANSI_SPECIALS: &[(char, u8)] = &[
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8A),
    ('‹', 0x8B),
    ('Œ', 0x8C),
    ('Ž', 0x8E),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9A),
    ('›', 0x9B),
    ('œ', 0x9C),
    ('ž', 0x9E),
    ('Ÿ', 0x9F),
];

fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => WIN_ANSI_SPECIALS
            .iter()
            .find(|(special, _)| *special == c)
            .map(|(_, byte)| *byte),
    }
}

/// Rewrites `text` so every character is drawable in WinAnsiEncoding.
///
/// Arrows become `->`, tabs become spaces, carriage returns and other control
/// characters are dropped, and anything else outside the encoding becomes `?`.
/// Newlines pass through for the layout stage to split on.
pub fn to_win_ansi_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push(' '),
            '→' => out.push_str("->"),
            c if c.is_control() => {}
            c if win_ansi_byte(c).is_some() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// Encodes one line of text as WinAnsi bytes.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|c| !c.is_control())
        .map(|c| win_ansi_byte(c).unwrap_or(b'?'))
        .collect()
}

fn font_dictionary(face: FontFace) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_operations(page: &PageLayout) -> Vec<Operation> {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in page.lines.iter().filter(|l| !l.text.is_empty()) {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![line.face.resource_name().into(), line.size_pt.into()],
        ));
        operations.push(Operation::new("Td", vec![line.x_pt.into(), line.y_pt.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&line.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    operations
}

/// Writes `pages` as a complete PDF and returns its bytes.
pub fn write_pdf(pages: &[PageLayout], config: &PageConfig, title: &str) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(FontFace::Helvetica));
    let bold_id = doc.add_object(font_dictionary(FontFace::HelveticaBold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontFace::Helvetica.resource_name() => regular_id,
            FontFace::HelveticaBold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content
            .encode()
            .map_err(|e| ReportError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), config.width_pt.into(), config.height_pt.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| ReportError::Write(e.to_string()))?;
    Ok(out)
}
