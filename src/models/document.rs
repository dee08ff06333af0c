use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pixel dimensions of the target slide surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "canvas must be non-empty");
        Self { width, height }
    }
}

/// Element kinds understood by the rendering service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Button,
    Text,
    Image,
    Input,
    Card,
}

impl ElementKind {
    /// Wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Button => "button",
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Input => "input",
            ElementKind::Card => "card",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A positioned box on a page, in canvas coordinates.
///
/// `id` exists only for keying elements in client-side lists. It is never
/// serialized and does not take part in equality, so two elements decoded
/// from the same JSON compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub text: Option<String>,
}

impl Element {
    /// Create an element with a fresh client id and no text.
    ///
    /// `w` and `h` must be positive. Decoded elements are not checked; the
    /// server validates what it receives.
    pub fn new(kind: ElementKind, x: f64, y: f64, w: f64, h: f64) -> Self {
        debug_assert!(w > 0.0 && h > 0.0, "element size must be positive");
        Self {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            w,
            h,
            text: None,
        }
    }

    /// Attach a text label.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Right edge (`x + w`).
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge (`y + h`).
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Whether the element lies entirely inside `canvas`.
    ///
    /// Informational only; the server decides what to do with overflow.
    pub fn fits_within(&self, canvas: &Canvas) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= f64::from(canvas.width)
            && self.bottom() <= f64::from(canvas.height)
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.x == other.x
            && self.y == other.y
            && self.w == other.w
            && self.h == other.h
            && self.text == other.text
    }
}

/// Rendering fidelity requested for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    #[default]
    Lowfi,
    Hifi,
}

/// Colour theme requested for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Gray,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Style {
    pub mode: StyleMode,
    pub theme: Theme,
}

impl Style {
    pub fn new(mode: StyleMode, theme: Theme) -> Self {
        Self { mode, theme }
    }
}

/// One slide: a canvas, its elements in paint order, and a style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePage {
    pub page_id: String,
    pub canvas: Canvas,
    pub elements: Vec<Element>,
    #[serde(default)]
    pub style: Style,
}

/// The unit of exchange with the rendering service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDocument {
    pub project_id: String,
    pub pages: Vec<FramePage>,
}

impl FrameDocument {
    pub fn new(project_id: impl Into<String>, pages: Vec<FramePage>) -> Self {
        Self {
            project_id: project_id.into(),
            pages,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of elements across all pages.
    pub fn element_count(&self) -> usize {
        self.pages.iter().map(|page| page.elements.len()).sum()
    }

    /// Look up a page by its id.
    pub fn page(&self, page_id: &str) -> Option<&FramePage> {
        self.pages.iter().find(|page| page.page_id == page_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> FrameDocument {
        let page = FramePage {
            page_id: "p1".to_string(),
            canvas: Canvas::new(1170, 2532),
            elements: vec![
                Element::new(ElementKind::Text, 100.0, 120.0, 500.0, 80.0).with_text("Welcome"),
                Element::new(ElementKind::Button, 100.0, 300.0, 320.0, 90.0),
            ],
            style: Style::default(),
        };
        FrameDocument::new("demo", vec![page])
    }

    #[test]
    fn test_document_wire_shape() {
        let value = serde_json::to_value(sample_document()).unwrap();
        assert_eq!(
            value,
            json!({
                "projectId": "demo",
                "pages": [{
                    "pageId": "p1",
                    "canvas": {"width": 1170, "height": 2532},
                    "elements": [
                        {"type": "text", "x": 100.0, "y": 120.0, "w": 500.0, "h": 80.0, "text": "Welcome"},
                        {"type": "button", "x": 100.0, "y": 300.0, "w": 320.0, "h": 90.0, "text": null}
                    ],
                    "style": {"mode": "lowfi", "theme": "gray"}
                }]
            })
        );
    }

    #[test]
    fn test_element_id_never_serialized() {
        let element = Element::new(ElementKind::Card, 0.0, 0.0, 10.0, 10.0);
        let json = serde_json::to_string(&element).unwrap();
        assert!(!json.contains("id"));
        assert!(!json.contains(&element.id.to_string()));
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let original = sample_document();
        let json = serde_json::to_string(&original).unwrap();
        let decoded: FrameDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, original);
        // Client ids are regenerated on decode.
        assert_ne!(decoded.pages[0].elements[0].id, original.pages[0].elements[0].id);
    }

    #[test]
    fn test_element_equality_ignores_id() {
        let a = Element::new(ElementKind::Card, 1.0, 2.0, 3.0, 4.0);
        let b = Element::new(ElementKind::Card, 1.0, 2.0, 3.0, 4.0);
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
        assert_ne!(a, b.clone().with_text("x"));
    }

    #[test]
    fn test_missing_style_defaults() {
        let page: FramePage = serde_json::from_value(json!({
            "pageId": "p2",
            "canvas": {"width": 10, "height": 20},
            "elements": []
        }))
        .unwrap();
        assert_eq!(page.style, Style::new(StyleMode::Lowfi, Theme::Gray));
    }

    #[test]
    fn test_unknown_element_kind_rejected() {
        let result: Result<Element, _> = serde_json::from_value(json!({
            "type": "carousel", "x": 0, "y": 0, "w": 1, "h": 1, "text": null
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_element_fits_within() {
        let canvas = Canvas::new(100, 100);
        assert!(Element::new(ElementKind::Card, 10.0, 10.0, 90.0, 90.0).fits_within(&canvas));
        assert!(!Element::new(ElementKind::Card, 20.0, 10.0, 90.0, 90.0).fits_within(&canvas));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "element size must be positive")]
    fn test_element_rejects_zero_size() {
        let _ = Element::new(ElementKind::Button, 0.0, 0.0, 0.0, 44.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "canvas must be non-empty")]
    fn test_canvas_rejects_zero_width() {
        let _ = Canvas::new(0, 2532);
    }

    #[test]
    fn test_document_lookups() {
        let doc = sample_document();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.element_count(), 2);
        assert!(doc.page("p1").is_some());
        assert!(doc.page("p9").is_none());
    }

    #[test]
    fn test_element_kind_display() {
        assert_eq!(ElementKind::Card.to_string(), "card");
        assert_eq!(ElementKind::Input.as_str(), "input");
    }
}
