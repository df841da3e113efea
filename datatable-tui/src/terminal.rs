//! Terminal setup, teardown and drawing of styled lines.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color, Print, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};
use datatable_lib::content::{Span, Tone};
use datatable_lib::layout::Line;

/// Raw-mode alternate screen, restored on drop.
pub struct Screen {
    stdout: Stdout,
}

impl Screen {
    pub fn new() -> io::Result<Self> {
        // Restore the terminal before the panic message is printed
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            previous_hook(panic_info);
        }));

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { stdout })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Redraw the whole screen, clipping lines to the terminal.
    pub fn draw(&mut self, lines: &[Line]) -> io::Result<()> {
        let (width, height) = self.size()?;
        queue!(self.stdout, terminal::Clear(ClearType::All))?;

        for (y, line) in lines.iter().take(height as usize).enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16))?;
            for span in &line.clone().truncate(width as usize).spans {
                self.write_span(span)?;
            }
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }

    fn write_span(&mut self, span: &Span) -> io::Result<()> {
        queue!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(tone_color(span.tone))
        )?;
        if span.bold {
            queue!(self.stdout, SetAttribute(Attribute::Bold))?;
        }
        if span.dim {
            queue!(self.stdout, SetAttribute(Attribute::Dim))?;
        }
        if span.underline {
            queue!(self.stdout, SetAttribute(Attribute::Underlined))?;
        }
        queue!(self.stdout, Print(&span.text))
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        SetAttribute(Attribute::Reset),
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()
}

/// Terminal color of a tone, matching the dark theme.
fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Default => Color::Reset,
        Tone::Muted => Color::DarkGrey,
        Tone::Accent => Color::Cyan,
        Tone::Success => Color::Green,
        Tone::Warning => Color::Yellow,
        Tone::Danger => Color::Red,
    }
}
