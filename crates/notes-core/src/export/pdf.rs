//! HTML to PDF rendering.
//!
//! The renderer reduces exported HTML to a flat list of text blocks and lays
//! them out on A4 pages with the PDF base-14 fonts, so no font files or
//! browser engine are needed.
//!
//! The base-14 fonts only cover the WinAnsi character set (Latin-1 plus a
//! few typographic marks). Anything else, such as CJK text or emoji, is
//! written as `?`.

use std::sync::LazyLock;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use regex::Regex;

use crate::{Error, Result};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LIST_INDENT_MM: f32 = 5.0;
const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.35;
const BLOCK_SPACING: f32 = 0.6;
const LAYER_NAME: &str = "Layer 1";
const REPLACEMENT_CHAR: char = '?';

/// Characters in WinAnsi's 0x80-0x9F range
const WINANSI_EXTRAS: &[char] = &[
    '\u{20ac}', '\u{201a}', '\u{0192}', '\u{201e}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02c6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017d}', '\u{2018}',
    '\u{2019}', '\u{201c}', '\u{201d}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02dc}',
    '\u{2122}', '\u{0161}', '\u{203a}', '\u{0153}', '\u{017e}', '\u{0178}',
];

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").expect("valid tag regex")
});

/// Renders an HTML document to PDF bytes.
pub trait PdfRenderer {
    fn render(&self, html: &str) -> Result<Vec<u8>>;
}

/// Layout style of a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    Heading(u8),
    Paragraph,
    ListItem,
    Code,
}

impl BlockStyle {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(Self::Heading(1)),
            "h2" => Some(Self::Heading(2)),
            "h3" | "h4" | "h5" | "h6" => Some(Self::Heading(3)),
            "p" | "blockquote" | "tr" | "div" => Some(Self::Paragraph),
            "li" => Some(Self::ListItem),
            "pre" => Some(Self::Code),
            _ => None,
        }
    }

    const fn font_size(self) -> f32 {
        match self {
            Self::Heading(1) => 20.0,
            Self::Heading(2) => 16.0,
            Self::Heading(_) => 13.0,
            Self::Paragraph | Self::ListItem => 11.0,
            Self::Code => 9.5,
        }
    }

    /// Average glyph width as a fraction of the font size
    const fn glyph_width(self) -> f32 {
        match self {
            Self::Code => 0.6,
            Self::Heading(_) => 0.55,
            Self::Paragraph | Self::ListItem => 0.5,
        }
    }
}

/// A run of text laid out as one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub style: BlockStyle,
    pub text: String,
}

/// Default renderer using built-in PDF fonts
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPdfRenderer;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    mono: IndirectFontRef,
}

impl Fonts {
    const fn for_style(&self, style: BlockStyle) -> &IndirectFontRef {
        match style {
            BlockStyle::Heading(_) => &self.bold,
            BlockStyle::Code => &self.mono,
            BlockStyle::Paragraph | BlockStyle::ListItem => &self.regular,
        }
    }
}

impl PdfRenderer for BuiltinPdfRenderer {
    fn render(&self, html: &str) -> Result<Vec<u8>> {
        let blocks = html_to_blocks(html);
        let title = blocks
            .iter()
            .find(|block| matches!(block.style, BlockStyle::Heading(_)))
            .map_or("Note", |block| block.text.as_str());

        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            LAYER_NAME,
        );
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(render_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(render_error)?,
            mono: doc
                .add_builtin_font(BuiltinFont::Courier)
                .map_err(render_error)?,
        };

        let mut current_layer = doc.get_page(page).get_layer(layer);
        let mut cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;

        for block in &blocks {
            let size = block.style.font_size();
            let line_height = size * PT_TO_MM * LINE_SPACING;
            let indent = if block.style == BlockStyle::ListItem {
                LIST_INDENT_MM
            } else {
                0.0
            };

            for line in wrap_block(block, PAGE_WIDTH_MM - 2.0 * MARGIN_MM - indent) {
                if cursor_mm - line_height < MARGIN_MM {
                    let (page, layer) =
                        doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
                    current_layer = doc.get_page(page).get_layer(layer);
                    cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
                }
                cursor_mm -= line_height;
                current_layer.use_text(
                    to_winansi(&line),
                    size,
                    Mm(MARGIN_MM + indent),
                    Mm(cursor_mm),
                    fonts.for_style(block.style),
                );
            }
            cursor_mm -= size * PT_TO_MM * BLOCK_SPACING;
        }

        doc.save_to_bytes().map_err(render_error)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn render_error(error: printpdf::Error) -> Error {
    Error::Render(format!("{error:?}"))
}

/// Map text onto what the base-14 fonts can draw
fn to_winansi(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\t' => ' ',
            ' '..='~' | '\u{a0}'..='\u{ff}' => c,
            _ if WINANSI_EXTRAS.contains(&c) => c,
            _ => REPLACEMENT_CHAR,
        })
        .collect()
}

/// Reduce an HTML fragment to text blocks.
///
/// Block-level tags (headings, paragraphs, list items, `pre`) start a new
/// block; every other tag is dropped and its text kept. Comments are removed.
pub fn html_to_blocks(html: &str) -> Vec<TextBlock> {
    let html = COMMENT_RE.replace_all(html, "");
    let mut builder = BlockBuilder::default();
    let mut last = 0;

    for caps in TAG_RE.captures_iter(&html) {
        let Some(whole) = caps.get(0) else { continue };
        builder.push_text(&html[last..whole.start()]);
        last = whole.end();

        let closing = !caps[1].is_empty();
        let tag = caps[2].to_ascii_lowercase();
        if tag == "br" {
            builder.push_text("\n");
        } else if let Some(style) = BlockStyle::from_tag(&tag) {
            let pending = builder.flush();
            builder.style = if closing {
                None
            } else if pending == Some(BlockStyle::ListItem) && style == BlockStyle::Paragraph {
                // Loose list items wrap their text in <p>.
                pending
            } else {
                Some(style)
            };
        }
    }
    builder.push_text(&html[last..]);
    builder.flush();
    builder.blocks
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<TextBlock>,
    style: Option<BlockStyle>,
    text: String,
}

impl BlockBuilder {
    fn push_text(&mut self, raw: &str) {
        self.text.push_str(&decode_entities(raw));
    }

    /// Emit the pending text as a block. When there is nothing to emit the
    /// pending style is handed back instead.
    fn flush(&mut self) -> Option<BlockStyle> {
        let pending = self.style.take();
        let style = pending.unwrap_or(BlockStyle::Paragraph);
        let raw = std::mem::take(&mut self.text);
        let text = if style == BlockStyle::Code {
            raw.trim_matches('\n').to_string()
        } else {
            raw.split_whitespace().collect::<Vec<_>>().join(" ")
        };
        if text.trim().is_empty() {
            return pending;
        }
        self.blocks.push(TextBlock { style, text });
        None
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Split a block into lines that fit `width_mm`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn wrap_block(block: &TextBlock, width_mm: f32) -> Vec<String> {
    let glyph_mm = block.style.font_size() * PT_TO_MM * block.style.glyph_width();
    let max_chars = ((width_mm / glyph_mm).floor() as usize).max(8);

    if block.style == BlockStyle::Code {
        return block
            .text
            .lines()
            .flat_map(|line| hard_wrap(line, max_chars))
            .collect();
    }

    let (first_prefix, prefix) = if block.style == BlockStyle::ListItem {
        ("- ", "  ")
    } else {
        ("", "")
    };
    let budget = max_chars - prefix.len();

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in block
        .text
        .split_whitespace()
        .flat_map(|word| hard_wrap(word, budget))
    {
        let separator = usize::from(!current.is_empty());
        if !current.is_empty()
            && current.chars().count() + separator + word.chars().count() > budget
        {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let prefix = if index == 0 { first_prefix } else { prefix };
            format!("{prefix}{line}")
        })
        .collect()
}

fn hard_wrap(line: &str, max_chars: usize) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
