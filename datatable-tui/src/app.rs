//! The billing groups page: key handling, screen composition and the event loop.

use std::sync::{Arc, Mutex};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use datatable_lib::content::{Span, Tone};
use datatable_lib::error::ConfigError;
use datatable_lib::layout::{Line, TextLayout};
use datatable_lib::prelude::{FetchOutcome, MemorySource, PendingFetch, ServerTable};
use datatable_lib::server::wakeup;
use datatable_lib::table::HeaderCell;
use futures::StreamExt;
use log::{debug, info};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::billing::{self, BillingGroup, CompanyFilter};
use crate::settings::Settings;
use crate::terminal::Screen;

const TITLE: &str = "Billing Groups";
const HELP: &str = "n/p page  g/G first/last  +/- page size  1-7 sort  j/k move  enter open  : jump  / filter  r reload  q quit";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid table setup: {0}")]
    Config(#[from] ConfigError),
}

/// Whether the loop keeps running after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Input mode of the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Browse,
    /// Typing a 1-based page number.
    Jump(String),
    /// Editing the company filter.
    Filter(String),
}

type BillingTable = ServerTable<BillingGroup, MemorySource<BillingGroup>>;

pub struct App {
    table: BillingTable,
    filter: CompanyFilter,
    mode: Mode,
    cursor: usize,
    /// Last opened row, set by the row-click handler.
    opened: Arc<Mutex<Option<String>>>,
    in_flight: Vec<JoinHandle<FetchOutcome>>,
}

impl App {
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let filter = CompanyFilter::default();
        let opened: Arc<Mutex<Option<String>>> = Arc::default();
        let source = billing::source(settings.latency(), Arc::clone(&filter));

        let handler_opened = Arc::clone(&opened);
        let table = ServerTable::new(billing::columns(), source, settings.table.clone())?
            .on_row_click(move |group: &BillingGroup, index| {
                info!("Row clicked: {:?}", group);
                if let Ok(mut opened) = handler_opened.lock() {
                    *opened = Some(format!(
                        "Opened billing group {} ({}) at row {}",
                        group.billing_group_id,
                        group.billing_group_name,
                        index + 1
                    ));
                }
            });
        // the empty filter is the baseline dependency
        let baseline = table.set_dependencies(&String::new());

        let mut app = Self {
            table,
            filter,
            mode: Mode::Browse,
            cursor: 0,
            opened,
            in_flight: Vec::new(),
        };
        app.run_fetch(baseline);
        Ok(app)
    }

    pub fn start(&mut self) {
        let pending = self.table.mount();
        self.run_fetch(pending);
    }

    fn run_fetch(&mut self, pending: Option<PendingFetch>) {
        self.in_flight.retain(|handle| !handle.is_finished());
        if let Some(pending) = pending {
            self.in_flight.push(pending.spawn());
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        match std::mem::replace(&mut self.mode, Mode::Browse) {
            Mode::Browse => return self.browse_key(key),
            Mode::Jump(input) => self.mode = self.edit_jump(input, key),
            Mode::Filter(input) => self.mode = self.edit_filter(input, key),
        }
        Control::Continue
    }

    fn browse_key(&mut self, key: KeyEvent) -> Control {
        let pending = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char('n') | KeyCode::Right => self.table.paginate(|c| c.next()),
            KeyCode::Char('p') | KeyCode::Left => self.table.paginate(|c| c.previous()),
            KeyCode::Char('g') | KeyCode::Home => self.table.paginate(|c| c.first()),
            KeyCode::Char('G') | KeyCode::End => self.table.paginate(|c| c.last()),
            KeyCode::Char('+') => self.table.paginate(|c| c.cycle_page_size(true)),
            KeyCode::Char('-') => self.table.paginate(|c| c.cycle_page_size(false)),
            KeyCode::Char('r') => Some(self.table.refetch()),
            KeyCode::Char(d @ '1'..='9') => {
                let index = d as usize - '1' as usize;
                self.table.click_header(index)
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_cursor(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_cursor(-1);
                None
            }
            KeyCode::Enter => {
                self.table.click_row(self.cursor);
                None
            }
            KeyCode::Char(':') => {
                self.mode = Mode::Jump(String::new());
                None
            }
            KeyCode::Char('/') => {
                let current = self.filter.read().map(|f| f.clone()).unwrap_or_default();
                self.mode = Mode::Filter(current);
                None
            }
            _ => None,
        };

        if pending.is_some() {
            self.cursor = 0;
        }
        self.run_fetch(pending);
        Control::Continue
    }

    fn edit_jump(&mut self, mut input: String, key: KeyEvent) -> Mode {
        match key.code {
            KeyCode::Esc => Mode::Browse,
            KeyCode::Enter => {
                debug!("Page jump to '{}'", input);
                let pending = self.table.paginate(|c| c.jump(&input));
                if pending.is_some() {
                    self.cursor = 0;
                }
                self.run_fetch(pending);
                Mode::Browse
            }
            KeyCode::Backspace => {
                input.pop();
                Mode::Jump(input)
            }
            KeyCode::Char(c) => {
                input.push(c);
                Mode::Jump(input)
            }
            _ => Mode::Jump(input),
        }
    }

    fn edit_filter(&mut self, mut input: String, key: KeyEvent) -> Mode {
        match key.code {
            KeyCode::Esc => Mode::Browse,
            KeyCode::Enter => {
                info!("Company filter set to '{}'", input);
                if let Ok(mut filter) = self.filter.write() {
                    *filter = input.clone();
                }
                let pending = self.table.set_dependencies(&input);
                if pending.is_some() {
                    self.cursor = 0;
                }
                self.run_fetch(pending);
                Mode::Browse
            }
            KeyCode::Backspace => {
                input.pop();
                Mode::Filter(input)
            }
            KeyCode::Char(c) => {
                input.push(c);
                Mode::Filter(input)
            }
            _ => Mode::Filter(input),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let rows = self.table.snapshot().rows.len();
        if rows == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(rows - 1);
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Compose the screen.
    pub fn lines(&self) -> Vec<Line> {
        let rendered = self.table.render();
        let cursor = (!rendered.table.overlay).then_some(self.cursor);

        let mut lines = vec![
            Line::new(vec![Span::new(TITLE).bold()]),
            Line::default(),
        ];
        lines.extend(
            TextLayout::new(&rendered.table)
                .pagination(rendered.top.as_ref(), rendered.bottom.as_ref())
                .cursor(cursor)
                .lines(),
        );
        lines.push(Line::default());
        lines.push(self.status_line(&rendered.table.header));
        lines.push(Line::new(vec![Span::new(HELP).muted()]));
        lines
    }

    fn status_line(&self, header: &[HeaderCell]) -> Line {
        match &self.mode {
            Mode::Jump(input) => Line::new(vec![
                Span::new("Go to page: ").tone(Tone::Accent),
                Span::new(format!("{}_", input)),
            ]),
            Mode::Filter(input) => Line::new(vec![
                Span::new("Company filter: ").tone(Tone::Accent),
                Span::new(format!("{}_", input)),
            ]),
            Mode::Browse => {
                if let Ok(opened) = self.opened.lock()
                    && let Some(message) = opened.as_ref()
                {
                    return Line::new(vec![Span::new(message.clone()).tone(Tone::Success)]);
                }
                let hints: Vec<Span> = header
                    .iter()
                    .filter_map(|h| {
                        h.tooltip
                            .as_ref()
                            .map(|t| Span::new(format!("{} ?: {}", h.label, t)).muted())
                    })
                    .collect();
                Line::new(hints)
            }
        }
    }
}

/// Run the page until the user quits.
pub async fn run(settings: Settings) -> Result<(), AppError> {
    let (wakeup_tx, mut wakeup_rx) = wakeup::channel();
    let mut app = App::new(&settings)?;
    app.table.install_wakeup(wakeup_tx);

    let mut screen = Screen::new()?;
    let mut events = EventStream::new();
    app.start();

    let mut redraw = true;
    loop {
        if redraw || app.table.is_dirty() {
            app.table.clear_dirty();
            screen.draw(&app.lines())?;
            redraw = false;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    debug!("Key: {:?}", key);
                    if app.handle_key(key) == Control::Quit {
                        break;
                    }
                    redraw = true;
                }
                Some(Ok(Event::Resize(width, height))) => {
                    debug!("Resized to {}x{}", width, height);
                    redraw = true;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            _ = wakeup_rx.recv() => {
                wakeup_rx.drain();
            }
        }
    }

    info!("Quitting");
    Ok(())
}
