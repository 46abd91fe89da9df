//! Layout elements the itinerary documents need but `genpdf` does not ship.

use genpdf::error::Error;
use genpdf::style::{Color, Style};
use genpdf::{render, Element, Mm, Position, RenderResult, Size};

const DEFAULT_DIVIDER_HEIGHT_MM: f64 = 0.5;
const DEFAULT_DIVIDER_COLOR: Color = Color::Rgb(210, 210, 210);

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

/// A thin horizontal rule spanning the full width of the area.
pub struct Divider {
    color: Color,
    height: Mm,
}

impl Divider {
    /// Creates a light grey divider.
    pub fn new() -> Self {
        Self {
            color: DEFAULT_DIVIDER_COLOR,
            height: mm_from_f64(DEFAULT_DIVIDER_HEIGHT_MM),
        }
    }

    /// Sets the stroke color and returns the updated element.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for Divider {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for Divider {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        if self.height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let width = area.size().width;
        area.draw_line(
            vec![Position::new(0, 0), Position::new(width, 0)],
            Style::new().with_color(self.color),
        );
        result.size = Size::new(width, self.height);
        Ok(result)
    }
}

/// Fixed vertical gap.
///
/// A gap that does not fit at the bottom of a page is truncated rather than
/// carried over, so pages never start with leftover whitespace.
pub struct Spacer {
    height: Mm,
}

impl Spacer {
    /// Creates a gap of the given height in millimetres.
    pub fn new(height_mm: f64) -> Self {
        Self {
            height: mm_from_f64(height_mm.max(0.0)),
        }
    }
}

impl Element for Spacer {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };
        result.size = Size::new(0, height);
        Ok(result)
    }
}
