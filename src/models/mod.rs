//! Document model exchanged with the rendering service.

mod builder;
mod document;
mod export;

pub use builder::{
    build_document, canvas_for, DrawingBounds, DEFAULT_PAGE_ID, MIN_CANVAS_HEIGHT,
    MIN_CANVAS_WIDTH, PLACEHOLDER_TEXT,
};
pub use document::{Canvas, Element, ElementKind, FrameDocument, FramePage, Style, StyleMode, Theme};
pub use export::{ExportHandle, HealthResponse};
