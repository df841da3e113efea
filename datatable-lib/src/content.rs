//! Renderable cell content: runs of styled text.

use unicode_width::UnicodeWidthStr;

/// Semantic color of a span, resolved to a concrete color by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    #[default]
    Default,
    Muted,
    Accent,
    Success,
    Warning,
    Danger,
}

/// A run of text with a single style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
    pub bold: bool,
    pub underline: bool,
    pub dim: bool,
}

impl Span {
    /// Create an unstyled span.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the tone.
    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// Shorthand for the muted tone.
    pub fn muted(self) -> Self {
        self.tone(Tone::Muted)
    }

    /// Render bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Render underlined.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Render dimmed.
    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Display width in terminal cells.
    pub fn width(&self) -> usize {
        self.text.width()
    }
}

/// Content of one table cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellContent {
    spans: Vec<Span>,
}

impl CellContent {
    /// Empty content.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Unstyled text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::from(Span::new(text))
    }

    /// Content made of several spans.
    pub fn from_spans(spans: impl IntoIterator<Item = Span>) -> Self {
        Self {
            spans: spans.into_iter().collect(),
        }
    }

    /// Append a span.
    pub fn push(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    /// The spans in display order.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Concatenated text without styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Display width in terminal cells.
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// Returns `true` if there is no visible text.
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }

    /// Dim every span, used for stale rows under the loading overlay.
    pub fn dimmed(mut self) -> Self {
        for span in &mut self.spans {
            span.dim = true;
        }
        self
    }
}

impl From<Span> for CellContent {
    fn from(span: Span) -> Self {
        Self { spans: vec![span] }
    }
}

impl From<&str> for CellContent {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for CellContent {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}
