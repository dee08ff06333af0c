//! Sketch-to-document mapping.
//!
//! The layout produced here is a placeholder: whatever was drawn becomes a
//! single card element sized from the drawing's bounding box. Real component
//! detection would replace [`build_document`] without touching its callers.

use super::document::{Canvas, Element, ElementKind, FrameDocument, FramePage, Style};

/// Minimum canvas width (portrait width of the reference device).
pub const MIN_CANVAS_WIDTH: u32 = 1170;
/// Minimum canvas height (portrait height of the reference device).
pub const MIN_CANVAS_HEIGHT: u32 = 2532;

const CARD_X: f64 = 80.0;
const CARD_Y: f64 = 120.0;
const HORIZONTAL_INSET: u32 = 160;
const VERTICAL_INSET: u32 = 240;
const MIN_CARD_WIDTH: u32 = 320;
const MIN_CARD_HEIGHT: u32 = 400;

pub const PLACEHOLDER_TEXT: &str = "Sketch Placeholder";
pub const DEFAULT_PAGE_ID: &str = "p1";

/// Bounding box of the strokes on the drawing surface, in device units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawingBounds {
    pub width: f64,
    pub height: f64,
}

impl DrawingBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Bounds of an empty drawing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Smallest box enclosing every point. No points means an empty drawing.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let Some((x0, y0)) = iter.next() else {
            return Self::empty();
        };

        let (min_x, min_y, max_x, max_y) =
            iter.fold((x0, y0, x0, y0), |(min_x, min_y, max_x, max_y), (x, y)| {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            });

        Self::new(max_x - min_x, max_y - min_y)
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Canvas for a drawing, clamped up to the reference device resolution.
///
/// Fractional bounds are truncated; negative or NaN bounds count as zero.
pub fn canvas_for(bounds: DrawingBounds) -> Canvas {
    // `as u32` saturates: NaN and negatives become 0.
    let width = (bounds.width as u32).max(MIN_CANVAS_WIDTH);
    let height = (bounds.height as u32).max(MIN_CANVAS_HEIGHT);
    Canvas::new(width, height)
}

/// Build the single-page document for the current drawing.
pub fn build_document(project_id: &str, bounds: DrawingBounds) -> FrameDocument {
    let canvas = canvas_for(bounds);

    let w = canvas
        .width
        .saturating_sub(HORIZONTAL_INSET)
        .max(MIN_CARD_WIDTH);
    let h = canvas
        .height
        .saturating_sub(VERTICAL_INSET)
        .max(MIN_CARD_HEIGHT);

    let card = Element::new(ElementKind::Card, CARD_X, CARD_Y, f64::from(w), f64::from(h))
        .with_text(PLACEHOLDER_TEXT);

    let page = FramePage {
        page_id: DEFAULT_PAGE_ID.to_string(),
        canvas,
        elements: vec![card],
        style: Style::default(),
    };

    FrameDocument::new(project_id, vec![page])
}
