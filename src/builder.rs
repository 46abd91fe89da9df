//! Rendering of a composed [`ItineraryDocument`] through `genpdf`.

use std::path::PathBuf;

use genpdf::elements::{LinearLayout, Paragraph, TableLayout, UnorderedList};
use genpdf::error::{Error, ErrorKind};
use genpdf::style::{self, Color, Style, StyledString};
use genpdf::{self, Element, Margins, Mm, PageDecorator, Position};

use crate::elements::{mm_from_f64, Divider, Spacer};
use crate::error::PdfBuildError;
use crate::fonts;
use crate::model::{Block, Cell, ItineraryDocument, Section};
use crate::richtext::Span;

const PAGE_MARGIN_MM: f64 = 15.0;
const FOOTER_HEIGHT_MM: f64 = 12.0;
const FOOTER_INK: Color = Color::Rgb(150, 150, 150);
const SECTION_TITLE_INK: Color = Color::Rgb(41, 128, 185);
const BODY_INK: Color = Color::Rgb(90, 90, 90);

/// Label used in the footer when none is configured.
pub const DEFAULT_GENERATOR_NAME: &str = "Itinerary Builder";

/// Footer text for a page.
pub fn footer_text(generator: &str, page: usize) -> String {
    format!("Generated by {} | Page {}", generator, page)
}

/// Builder for `genpdf::Document` instances pre-configured for itineraries.
#[derive(Default)]
pub struct DocumentBuilder {
    fonts_dir: Option<PathBuf>,
    margins: Option<Margins>,
    footer: Option<FooterSpec>,
}

type ElementFactory = dyn Fn(usize) -> Box<dyn Element>;

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory searched first for the font family.
    pub fn with_fonts_dir(mut self, fonts_dir: impl Into<Option<PathBuf>>) -> Self {
        self.fonts_dir = fonts_dir.into();
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Configures a footer callback with a fixed height that is invoked for every page.
    pub fn with_footer<F, E>(mut self, height: impl Into<Mm>, footer: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        self.footer = Some(FooterSpec::new(height, footer));
        self
    }

    /// Builds a fully configured `genpdf::Document` instance.
    pub fn build(self) -> Result<genpdf::Document, PdfBuildError> {
        let font_family =
            fonts::default_font_family(self.fonts_dir.as_deref()).map_err(PdfBuildError::FontLoad)?;
        let mut document = genpdf::Document::new(font_family);
        document.set_paper_size(genpdf::PaperSize::A4);
        document.set_line_spacing(1.25);

        let decorator = ConfiguredPageDecorator::new(self.margins, self.footer);
        document.set_page_decorator(decorator);

        Ok(document)
    }
}

/// Definition of a footer rendered through the page decorator.
pub struct FooterSpec {
    height: Mm,
    factory: Box<ElementFactory>,
}

impl FooterSpec {
    /// Creates a new footer specification.
    pub fn new<F, E>(height: impl Into<Mm>, factory: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        Self {
            height: height.into(),
            factory: Box::new(move |page| Box::new(factory(page)) as Box<dyn Element>),
        }
    }
}

struct ConfiguredPageDecorator {
    page: usize,
    margins: Option<Margins>,
    footer: Option<FooterSpec>,
}

impl ConfiguredPageDecorator {
    fn new(margins: Option<Margins>, footer: Option<FooterSpec>) -> Self {
        Self {
            page: 0,
            margins,
            footer,
        }
    }
}

impl PageDecorator for ConfiguredPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        self.page += 1;

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        if let Some(footer) = &self.footer {
            let available = area.size().height;
            if footer.height > available {
                return Err(Error::new(
                    "Footer height exceeds available space",
                    ErrorKind::InvalidData,
                ));
            }

            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - footer.height));
            let mut element = (footer.factory)(self.page);
            let result = element.render(context, footer_area, style)?;
            if result.has_more {
                return Err(Error::new(
                    "Footer element does not fit into the reserved space",
                    ErrorKind::PageSizeExceeded,
                ));
            }

            area.set_height(available - footer.height);
        }

        Ok(area)
    }
}

/// Rendered PDF bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPdf {
    /// Complete PDF file contents.
    pub bytes: Vec<u8>,
}

/// Renders an [`ItineraryDocument`] into PDF bytes.
pub struct PdfBuilder {
    outline: ItineraryDocument,
    fonts_dir: Option<PathBuf>,
    generator_name: String,
}

impl PdfBuilder {
    /// Creates a builder for the given outline.
    pub fn new(outline: ItineraryDocument) -> Self {
        Self {
            outline,
            fonts_dir: None,
            generator_name: DEFAULT_GENERATOR_NAME.to_owned(),
        }
    }

    /// Sets the directory searched first for the font family.
    pub fn with_fonts_dir(mut self, fonts_dir: impl Into<Option<PathBuf>>) -> Self {
        self.fonts_dir = fonts_dir.into();
        self
    }

    /// Sets the generator name printed in the footer.
    pub fn with_generator_name(mut self, generator_name: impl Into<String>) -> Self {
        self.generator_name = generator_name.into();
        self
    }

    /// Lays out every section and serialises the document.
    pub fn render(self) -> Result<RenderedPdf, PdfBuildError> {
        let generator = self.generator_name;
        let margin = mm_from_f64(PAGE_MARGIN_MM);
        let mut document = DocumentBuilder::new()
            .with_fonts_dir(self.fonts_dir)
            .with_margins(Margins::trbl(margin, margin, mm_from_f64(8.0), margin))
            .with_footer(mm_from_f64(FOOTER_HEIGHT_MM), move |page| {
                LinearLayout::vertical()
                    .element(Divider::new().with_color(Color::Rgb(220, 220, 220)))
                    .element(Paragraph::new(StyledString::new(
                        footer_text(&generator, page),
                        Style::new().with_font_size(9).with_color(FOOTER_INK),
                    )))
            })
            .build()?;

        document.set_title(self.outline.title());
        for section in self.outline.sections() {
            push_section(&mut document, section).map_err(PdfBuildError::Render)?;
        }

        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(PdfBuildError::Render)?;
        Ok(RenderedPdf { bytes })
    }
}

fn push_section(document: &mut genpdf::Document, section: &Section) -> Result<(), Error> {
    if let Some(title) = section.title() {
        document.push(Paragraph::new(
            Span::new(title)
                .bold()
                .sized(12)
                .colored(SECTION_TITLE_INK)
                .to_styled_string(),
        ));
        document.push(Divider::new());
        document.push(Spacer::new(6.0));
    }

    for block in section.blocks() {
        push_block(document, block)?;
    }
    Ok(())
}

fn push_block(document: &mut genpdf::Document, block: &Block) -> Result<(), Error> {
    match block {
        Block::Paragraph(paragraph) => {
            let indent = paragraph.indent_mm();
            document.push(indented(spans_paragraph(paragraph.spans()), indent));
        }
        Block::Row { indent_mm, cells } => {
            document.push(indented(row_table(cells)?, *indent_mm));
        }
        Block::BulletList { indent_mm, items } => {
            let mut list = UnorderedList::with_bullet("-");
            for item in items {
                list.push(Paragraph::new(item.as_str()));
            }
            let list = list.styled(Style::new().with_font_size(10).with_color(BODY_INK));
            document.push(indented(list, *indent_mm));
        }
        Block::Divider => document.push(Divider::new()),
        Block::Spacer(height_mm) => document.push(Spacer::new(*height_mm)),
    }
    Ok(())
}

fn indented<E: Element + 'static>(element: E, indent_mm: f64) -> impl Element {
    element.padded(Margins::trbl(0, 0, 0, mm_from_f64(indent_mm.max(0.0))))
}

fn spans_paragraph(spans: &[Span]) -> Paragraph {
    let mut paragraph = Paragraph::default();
    for span in spans {
        paragraph.push(span.to_styled_string());
    }
    paragraph
}

fn row_table(cells: &[Cell]) -> Result<TableLayout, Error> {
    let weights = cells.iter().map(|cell| cell.weight.max(1)).collect();
    let mut table = TableLayout::new(weights);
    let mut row = table.row();
    for cell in cells {
        row.push_element(spans_paragraph(&cell.spans));
    }
    row.push()?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_names_generator_and_page() {
        assert_eq!(
            footer_text("Itinerary Builder", 3),
            "Generated by Itinerary Builder | Page 3"
        );
    }

    #[test]
    fn row_table_builds_one_column_per_cell() {
        let cells = vec![
            Cell::new(2, vec![Span::new("Location:").bold()]),
            Cell::new(5, vec![Span::new("Ubud")]),
        ];
        assert!(row_table(&cells).is_ok());
    }

    #[test]
    fn row_table_accepts_zero_weights() {
        // Zero weights are clamped to one.
        let cells = vec![Cell::new(0, vec![Span::new("#1")]), Cell::new(0, Vec::new())];
        assert!(row_table(&cells).is_ok());
    }
}
