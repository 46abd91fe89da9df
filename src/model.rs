//! Rendering-agnostic outline of a composed itinerary document.
//!
//! The composer emits an [`ItineraryDocument`] made of [`Section`]s and
//! [`Block`]s; the builder maps every block onto `genpdf` elements.  Keeping
//! this layer free of rendering state means the composition rules can be
//! inspected and tested as plain text, without fonts or a PDF backend.

use crate::richtext::{plain_text, Span};

/// Left aligned rich text paragraph with an optional left indent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichParagraph {
    spans: Vec<Span>,
    indent_mm: f64,
}

impl RichParagraph {
    /// Creates an unindented paragraph from the provided spans.
    pub fn new(spans: impl Into<Vec<Span>>) -> Self {
        Self {
            spans: spans.into(),
            ..Self::default()
        }
    }

    /// Returns the spans that make up the paragraph.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Returns the left indent in millimetres.
    pub fn indent_mm(&self) -> f64 {
        self.indent_mm
    }

    /// Sets the left indent and returns the updated paragraph.
    pub fn with_indent_mm(mut self, indent_mm: f64) -> Self {
        self.indent_mm = indent_mm;
        self
    }

    /// Returns the unstyled text of the paragraph.
    pub fn plain_text(&self) -> String {
        plain_text(&self.spans)
    }
}

/// A cell in a [`Block::Row`]: relative width and content.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Relative column weight; the row's weights are proportional to widths.
    pub weight: usize,
    /// Cell content.
    pub spans: Vec<Span>,
}

impl Cell {
    /// Creates a cell with the given weight and content.
    pub fn new(weight: usize, spans: impl Into<Vec<Span>>) -> Self {
        Self {
            weight,
            spans: spans.into(),
        }
    }
}

/// Individual content blocks that make up sections.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Styled paragraph content.
    Paragraph(RichParagraph),
    /// A single line of side-by-side columns.
    Row {
        /// Left indent of the row in millimetres.
        indent_mm: f64,
        /// Columns from left to right.
        cells: Vec<Cell>,
    },
    /// Bulleted list of plain items.
    BulletList {
        /// Left indent of the list in millimetres.
        indent_mm: f64,
        /// List entries in display order.
        items: Vec<String>,
    },
    /// Thin horizontal rule spanning the content width.
    Divider,
    /// Fixed vertical gap, in millimetres.
    Spacer(f64),
}

impl Block {
    /// Convenience helper for building a paragraph block.
    pub fn paragraph(spans: impl Into<Vec<Span>>) -> Self {
        Self::Paragraph(RichParagraph::new(spans))
    }

    /// Convenience helper for an indented paragraph block.
    pub fn indented(indent_mm: f64, spans: impl Into<Vec<Span>>) -> Self {
        Self::Paragraph(RichParagraph::new(spans).with_indent_mm(indent_mm))
    }

    /// Convenience helper for a row block.
    pub fn row(indent_mm: f64, cells: impl Into<Vec<Cell>>) -> Self {
        Self::Row {
            indent_mm,
            cells: cells.into(),
        }
    }

    /// Convenience helper for a vertical gap.
    pub fn spacer(height_mm: f64) -> Self {
        Self::Spacer(height_mm)
    }

    /// Returns the text lines this block contributes to a plain-text outline.
    ///
    /// Row cells are joined with ` | `, list items are prefixed with `- `.
    /// Layout-only blocks contribute nothing.
    pub fn text_lines(&self) -> Vec<String> {
        match self {
            Block::Paragraph(paragraph) => vec![paragraph.plain_text()],
            Block::Row { cells, .. } => vec![cells
                .iter()
                .map(|cell| plain_text(&cell.spans))
                .collect::<Vec<_>>()
                .join(" | ")],
            Block::BulletList { items, .. } => {
                items.iter().map(|item| format!("- {}", item)).collect()
            }
            Block::Divider | Block::Spacer(_) => Vec::new(),
        }
    }
}

/// Identifies which part of the itinerary a section renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Header,
    TripInformation,
    Hotels,
    Flights,
    Transfers,
    Overview,
    DayByDay,
    PaymentPlan,
    InclusionsExclusions,
}

/// Logical representation of a document section.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    kind: SectionKind,
    title: Option<String>,
    blocks: Vec<Block>,
}

impl Section {
    /// Creates a new section with a heading.
    pub fn new(kind: SectionKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: Some(title.into()),
            blocks: Vec::new(),
        }
    }

    /// Creates a section rendered without a heading.
    pub fn untitled(kind: SectionKind) -> Self {
        Self {
            kind,
            title: None,
            blocks: Vec::new(),
        }
    }

    /// Returns which part of the itinerary this section renders.
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Returns the heading of the section, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the blocks contained in the section.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Appends a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Appends a block and returns the updated section.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Text lines of the section body, excluding the heading.
    pub fn text_lines(&self) -> Vec<String> {
        self.blocks.iter().flat_map(Block::text_lines).collect()
    }
}

/// A fully composed itinerary document, ready to be rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItineraryDocument {
    title: String,
    sections: Vec<Section>,
}

impl ItineraryDocument {
    /// Creates an empty document with the given metadata title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Returns the metadata title of the document.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the sections in render order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns the first section of the given kind.
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind() == kind)
    }

    /// Appends a section.
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Section kinds in render order.
    pub fn kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(Section::kind).collect()
    }

    /// Renders the whole outline as plain text, one line per text block.
    ///
    /// Section headings are included as their own lines.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for section in &self.sections {
            if let Some(title) = section.title() {
                lines.push(title.to_owned());
            }
            lines.extend(section.text_lines());
        }
        lines
    }
}
