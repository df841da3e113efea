//! Pagination control: row-count summary, page-size selector, page jump and
//! first/previous/next/last navigation.
//!
//! The control never mutates table state. Every interaction is validated
//! against the current cursor and turned into at most one
//! [`PaginationRequest`] for the orchestrator.

use serde::Deserialize;

use crate::model::PaginationState;

/// Page-size choices offered when none are configured.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// A change request emitted by the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationRequest {
    /// Go to this page (0-based, already clamped).
    Page(usize),
    /// Switch to this page size; the table restarts at the first page.
    PageSize(usize),
}

/// Which parts of the control are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationOptions {
    pub show_page_size_options: bool,
    pub show_page_jump: bool,
    pub show_first_last_buttons: bool,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            show_page_size_options: true,
            show_page_jump: true,
            show_first_last_buttons: true,
        }
    }
}

/// Navigation button kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavButton {
    First,
    Previous,
    Next,
    Last,
}

impl NavButton {
    /// Glyph shown on the button.
    pub fn glyph(self) -> &'static str {
        match self {
            NavButton::First => "«",
            NavButton::Previous => "‹",
            NavButton::Next => "›",
            NavButton::Last => "»",
        }
    }

    /// Accessible label.
    pub fn label(self) -> &'static str {
        match self {
            NavButton::First => "First page",
            NavButton::Previous => "Previous page",
            NavButton::Next => "Next page",
            NavButton::Last => "Last page",
        }
    }

    fn test_suffix(self) -> &'static str {
        match self {
            NavButton::First => "first-page",
            NavButton::Previous => "prev-page",
            NavButton::Next => "next-page",
            NavButton::Last => "last-page",
        }
    }
}

/// Render state of one navigation button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButtonView {
    pub button: NavButton,
    pub enabled: bool,
    pub test_id: String,
}

/// Everything a surface needs to draw the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    /// "Viewing 21-25 rows of 25 results".
    pub summary: String,
    /// Page-size choices with the selected one flagged, if shown.
    pub page_sizes: Option<Vec<(usize, bool)>>,
    /// Current 1-based page for the jump input, if shown.
    pub page_input: Option<String>,
    /// "of 3" next to the jump input, or "1 of 3" without it.
    pub page_label: String,
    /// Buttons in display order.
    pub buttons: Vec<NavButtonView>,
    pub summary_test_id: String,
    pub page_size_test_id: String,
    pub page_input_test_id: String,
}

/// Stateless pagination control over a snapshot of the cursor.
#[derive(Debug, Clone)]
pub struct PaginationControl<'a> {
    state: PaginationState,
    loading: bool,
    page_size_options: &'a [usize],
    options: PaginationOptions,
    test_id_prefix: &'a str,
}

impl<'a> PaginationControl<'a> {
    /// Create a control for a cursor.
    pub fn new(state: PaginationState, loading: bool) -> Self {
        Self {
            state,
            loading,
            page_size_options: &DEFAULT_PAGE_SIZE_OPTIONS,
            options: PaginationOptions::default(),
            test_id_prefix: "table-pagination",
        }
    }

    /// Set the page-size choices.
    pub fn page_size_options(mut self, options: &'a [usize]) -> Self {
        self.page_size_options = options;
        self
    }

    /// Set which parts are shown.
    pub fn options(mut self, options: PaginationOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the prefix of automation ids.
    pub fn test_id_prefix(mut self, prefix: &'a str) -> Self {
        self.test_id_prefix = prefix;
        self
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    // -------------------------------------------------------------------------
    // Display values
    // -------------------------------------------------------------------------

    /// First and last 1-based row numbers of the current page.
    ///
    /// A cursor past the last row shows the last page, so `from <= to`.
    pub fn row_range(&self) -> (usize, usize) {
        let PaginationState {
            page_index,
            page_size,
            total_rows,
            ..
        } = self.state;
        if total_rows == 0 || page_size == 0 {
            return (0, 0);
        }
        let page = page_index.min((total_rows - 1) / page_size);
        let from = page * page_size + 1;
        let to = from.saturating_add(page_size - 1).min(total_rows);
        (from, to)
    }

    /// "21-25", or "0" for an empty table.
    pub fn row_range_text(&self) -> String {
        if self.state.total_rows == 0 {
            return "0".to_string();
        }
        let (from, to) = self.row_range();
        format!("{}-{}", group_thousands(from), group_thousands(to))
    }

    /// Row-count summary line.
    pub fn summary(&self) -> String {
        let total = group_thousands(self.state.total_rows);
        if self.state.total_rows == 0 {
            format!("Viewing 0 of {} results", total)
        } else {
            format!("Viewing {} rows of {} results", self.row_range_text(), total)
        }
    }

    pub fn can_previous(&self) -> bool {
        self.state.has_previous()
    }

    pub fn can_next(&self) -> bool {
        self.state.has_next()
    }

    /// Whether a navigation button can be pressed.
    pub fn is_enabled(&self, button: NavButton) -> bool {
        if self.loading {
            return false;
        }
        match button {
            NavButton::First | NavButton::Previous => self.can_previous(),
            NavButton::Next | NavButton::Last => self.can_next(),
        }
    }

    // -------------------------------------------------------------------------
    // Requests
    // -------------------------------------------------------------------------

    /// Route a requested page through the clamp rule.
    ///
    /// Emits nothing when the clamped page is the current one.
    pub fn change_page(&self, requested: i64) -> Option<PaginationRequest> {
        let safe = self.state.safe_page(Some(requested));
        if safe == self.state.page_index {
            return None;
        }
        Some(PaginationRequest::Page(safe))
    }

    /// Press a navigation button.
    pub fn press(&self, button: NavButton) -> Option<PaginationRequest> {
        if !self.is_enabled(button) {
            return None;
        }
        let current = self.state.page_index as i64;
        let requested = match button {
            NavButton::First => 0,
            NavButton::Previous => current - 1,
            NavButton::Next => current + 1,
            NavButton::Last => self.state.total_pages as i64 - 1,
        };
        self.change_page(requested)
    }

    pub fn first(&self) -> Option<PaginationRequest> {
        self.press(NavButton::First)
    }

    pub fn previous(&self) -> Option<PaginationRequest> {
        self.press(NavButton::Previous)
    }

    pub fn next(&self) -> Option<PaginationRequest> {
        self.press(NavButton::Next)
    }

    pub fn last(&self) -> Option<PaginationRequest> {
        self.press(NavButton::Last)
    }

    /// Submit the page-jump input (1-based).
    ///
    /// Input that does not start with a number is ignored.
    pub fn jump(&self, input: &str) -> Option<PaginationRequest> {
        let page = parse_int_prefix(input)?;
        self.change_page(page.saturating_sub(1))
    }

    /// Pick a page size.
    pub fn select_page_size(&self, page_size: usize) -> Option<PaginationRequest> {
        (page_size > 0).then_some(PaginationRequest::PageSize(page_size))
    }

    /// Step to the next or previous configured page size, wrapping around.
    pub fn cycle_page_size(&self, forward: bool) -> Option<PaginationRequest> {
        let options = self.page_size_options;
        if options.is_empty() {
            return None;
        }
        let current = options.iter().position(|&s| s == self.state.page_size);
        let index = match (current, forward) {
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
            (None, _) => 0,
        };
        self.select_page_size(options[index])
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Build the render state of the control.
    pub fn view(&self) -> PaginationView {
        let prefix = self.test_id_prefix;
        let page_number = self.state.page_index.saturating_add(1);
        let pages = self.state.total_pages;

        let page_sizes = self.options.show_page_size_options.then(|| {
            self.page_size_options
                .iter()
                .map(|&size| (size, size == self.state.page_size))
                .collect()
        });

        let (page_input, page_label) = if self.options.show_page_jump {
            (Some(page_number.to_string()), format!("of {}", pages))
        } else {
            (None, format!("{} of {}", page_number, pages))
        };

        let mut order = Vec::with_capacity(4);
        if self.options.show_first_last_buttons {
            order.push(NavButton::First);
        }
        order.push(NavButton::Previous);
        order.push(NavButton::Next);
        if self.options.show_first_last_buttons {
            order.push(NavButton::Last);
        }
        let buttons = order
            .into_iter()
            .map(|button| NavButtonView {
                button,
                enabled: self.is_enabled(button),
                test_id: format!("{}-{}", prefix, button.test_suffix()),
            })
            .collect();

        PaginationView {
            summary: self.summary(),
            page_sizes,
            page_input,
            page_label,
            buttons,
            summary_test_id: format!("{}-total-records", prefix),
            page_size_test_id: format!("{}-page-size", prefix),
            page_input_test_id: format!("{}-page-input", prefix),
        }
    }
}

/// Parse the leading integer of user input the way a lenient number field
/// does: surrounding whitespace and trailing garbage are ignored.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Format a count with `,` thousands separators.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(page_index: usize, page_size: usize, total_rows: usize) -> PaginationState {
        PaginationState {
            page_index,
            page_size,
            total_pages: crate::model::total_pages_for(total_rows, page_size),
            total_rows,
        }
    }

    #[test]
    fn test_row_range_text() {
        assert_eq!(PaginationControl::new(state(0, 10, 0), false).row_range_text(), "0");
        assert_eq!(
            PaginationControl::new(state(2, 10, 25), false).row_range_text(),
            "21-25"
        );
        assert_eq!(
            PaginationControl::new(state(0, 10, 25), false).row_range_text(),
            "1-10"
        );
    }

    #[test]
    fn test_row_range_past_last_page() {
        let stale = PaginationState {
            page_index: 5,
            page_size: 10,
            total_pages: 3,
            total_rows: 25,
        };
        assert_eq!(PaginationControl::new(stale, false).row_range(), (21, 25));

        let huge = PaginationState {
            page_index: usize::MAX,
            ..stale
        };
        assert_eq!(PaginationControl::new(huge, false).row_range(), (21, 25));
        assert_eq!(PaginationControl::new(state(0, 0, 25), false).row_range(), (0, 0));
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            PaginationControl::new(state(0, 10, 0), false).summary(),
            "Viewing 0 of 0 results"
        );
        assert_eq!(
            PaginationControl::new(state(100, 10, 1234), false).summary(),
            "Viewing 1,001-1,010 rows of 1,234 results"
        );
    }

    #[test]
    fn test_same_page_emits_nothing() {
        for page in 0..5 {
            let control = PaginationControl::new(state(page, 10, 50), false);
            assert_eq!(control.change_page(page as i64), None);
        }
    }

    #[test]
    fn test_change_page_clamps() {
        let control = PaginationControl::new(state(1, 10, 50), false);
        assert_eq!(control.change_page(99), Some(PaginationRequest::Page(4)));
        assert_eq!(control.change_page(-3), Some(PaginationRequest::Page(0)));

        let last = PaginationControl::new(state(4, 10, 50), false);
        assert_eq!(last.change_page(99), None);
    }

    #[test]
    fn test_buttons_at_bounds() {
        let first = PaginationControl::new(state(0, 10, 30), false);
        assert_eq!(first.previous(), None);
        assert_eq!(first.first(), None);
        assert_eq!(first.next(), Some(PaginationRequest::Page(1)));
        assert_eq!(first.last(), Some(PaginationRequest::Page(2)));

        let last = PaginationControl::new(state(2, 10, 30), false);
        assert_eq!(last.next(), None);
        assert_eq!(last.last(), None);
        assert_eq!(last.previous(), Some(PaginationRequest::Page(1)));
        assert_eq!(last.first(), Some(PaginationRequest::Page(0)));
    }

    #[test]
    fn test_buttons_disabled_while_loading() {
        let control = PaginationControl::new(state(1, 10, 30), true);
        for button in [NavButton::First, NavButton::Previous, NavButton::Next, NavButton::Last] {
            assert!(!control.is_enabled(button));
            assert_eq!(control.press(button), None);
        }
        // the jump input stays usable
        assert_eq!(control.jump("3"), Some(PaginationRequest::Page(2)));
    }

    #[test]
    fn test_jump_input() {
        let control = PaginationControl::new(state(0, 10, 100), false);
        assert_eq!(control.jump("4"), Some(PaginationRequest::Page(3)));
        assert_eq!(control.jump(" 7abc"), Some(PaginationRequest::Page(6)));
        assert_eq!(control.jump("abc"), None);
        assert_eq!(control.jump(""), None);
        assert_eq!(control.jump("1"), None);
        assert_eq!(control.jump("500"), Some(PaginationRequest::Page(9)));
        assert_eq!(control.jump("-2"), None);
    }

    #[test]
    fn test_page_size_requests() {
        let control = PaginationControl::new(state(3, 10, 100), false);
        assert_eq!(
            control.select_page_size(25),
            Some(PaginationRequest::PageSize(25))
        );
        assert_eq!(control.select_page_size(0), None);
        assert_eq!(
            control.cycle_page_size(true),
            Some(PaginationRequest::PageSize(25))
        );
        assert_eq!(
            control.cycle_page_size(false),
            Some(PaginationRequest::PageSize(100))
        );
    }

    #[test]
    fn test_view() {
        let view = PaginationControl::new(state(1, 25, 60), false)
            .test_id_prefix("billing")
            .view();
        assert_eq!(view.summary, "Viewing 26-50 rows of 60 results");
        assert_eq!(view.page_input.as_deref(), Some("2"));
        assert_eq!(view.page_label, "of 3");
        assert_eq!(
            view.page_sizes,
            Some(vec![(10, false), (25, true), (50, false), (100, false)])
        );
        let ids: Vec<_> = view.buttons.iter().map(|b| b.test_id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "billing-first-page",
                "billing-prev-page",
                "billing-next-page",
                "billing-last-page"
            ]
        );
        assert!(view.buttons.iter().all(|b| b.enabled));
    }

    #[test]
    fn test_view_without_optional_parts() {
        let view = PaginationControl::new(state(0, 10, 5), false)
            .options(PaginationOptions {
                show_page_size_options: false,
                show_page_jump: false,
                show_first_last_buttons: false,
            })
            .view();
        assert_eq!(view.page_sizes, None);
        assert_eq!(view.page_input, None);
        assert_eq!(view.page_label, "1 of 1");
        assert_eq!(view.buttons.len(), 2);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
