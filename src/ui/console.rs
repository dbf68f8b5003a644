// Console - Raw-mode terminal front end for the command bar
//
// Keys: Tab completes, Up/Down recall history, Enter submits, Esc clears the
// line, Ctrl-C leaves. The ghost text is drawn dimmed after the cursor.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveLeft;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use crossterm::{execute, queue};

use crate::messaging::notification::{Message, MessageLevel};
use crate::session::{CommandSession, Executor};
use crate::ui::command_bar::CommandBar;

/// Restores cooked mode when dropped, also on early return
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            log::warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

enum KeyOutcome {
    Continue,
    Quit,
}

pub struct Console {
    prompt: String,
    bar: CommandBar,
    stdout: Stdout,
}

impl Console {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            bar: CommandBar::new(),
            stdout: io::stdout(),
        }
    }

    /// Run until Ctrl-C or until the executor asks to quit
    pub fn run<E: Executor>(&mut self, session: &mut CommandSession<E>) -> io::Result<()> {
        let _raw = RawModeGuard::enable()?;
        self.print_line("Type a command, Tab to complete, Ctrl-C to quit.", None)?;
        self.redraw()?;

        loop {
            if !event::poll(Duration::from_millis(100))? {
                continue;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let KeyOutcome::Quit = self.handle_key(key, session)? {
                    break;
                }
                self.redraw()?;
            }
        }

        execute!(self.stdout, Print("\r\n"))?;
        Ok(())
    }

    fn handle_key<E: Executor>(
        &mut self,
        key: KeyEvent,
        session: &mut CommandSession<E>,
    ) -> io::Result<KeyOutcome> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(KeyOutcome::Quit);
            }
            KeyCode::Char(c) => self.bar.insert_char(c, session),
            KeyCode::Backspace => self.bar.backspace(session),
            KeyCode::Tab => self.bar.complete(session),
            KeyCode::Up => self.bar.history_previous(session),
            KeyCode::Down => self.bar.history_next(session),
            KeyCode::Esc => self.bar.clear(),
            KeyCode::Enter => {
                let echoed = format!("{}{}", self.prompt, self.bar.input());
                let message = self.bar.submit(session);
                self.print_line(&echoed, None)?;
                if let Some(message) = message {
                    self.print_message(&message)?;
                }
                if session.should_quit() {
                    return Ok(KeyOutcome::Quit);
                }
            }
            _ => {}
        }
        Ok(KeyOutcome::Continue)
    }

    fn print_message(&mut self, message: &Message) -> io::Result<()> {
        let color = match message.level {
            MessageLevel::Debug => Color::DarkGrey,
            MessageLevel::Info => Color::Reset,
            MessageLevel::Warning => Color::Yellow,
            MessageLevel::Error => Color::Red,
        };
        for line in message.text.lines() {
            self.print_line(line, Some(color))?;
        }
        Ok(())
    }

    // Raw mode needs explicit carriage returns
    fn print_line(&mut self, text: &str, color: Option<Color>) -> io::Result<()> {
        queue!(self.stdout, Print("\r"), Clear(ClearType::CurrentLine))?;
        if let Some(color) = color {
            queue!(self.stdout, SetForegroundColor(color))?;
        }
        queue!(self.stdout, Print(text), ResetColor, Print("\r\n"))?;
        self.stdout.flush()
    }

    fn redraw(&mut self) -> io::Result<()> {
        let ghost = self.bar.ghost_text();
        queue!(
            self.stdout,
            Print("\r"),
            Clear(ClearType::CurrentLine),
            Print(&self.prompt),
            Print(self.bar.input()),
        )?;

        if !ghost.is_empty() {
            let width = u16::try_from(ghost.chars().count()).unwrap_or(u16::MAX);
            queue!(
                self.stdout,
                SetAttribute(Attribute::Dim),
                Print(ghost),
                SetAttribute(Attribute::Reset),
                MoveLeft(width),
            )?;
        }

        self.stdout.flush()
    }
}
