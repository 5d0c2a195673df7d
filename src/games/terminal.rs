use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;

pub const TICK_MS: u64 = 33;

/// Raw mode plus alternate screen for the lifetime of a game.
pub struct TerminalGuard
{
    stdout: Stdout,
}

impl TerminalGuard
{
    pub fn enter() -> Result<Self, String>
    {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode().map_err(|err| err.to_string())?;
        execute!(stdout, EnterAlternateScreen, Hide).map_err(|err| err.to_string())?;
        Ok(Self { stdout })
    }

    pub fn stdout(&mut self) -> &mut Stdout
    {
        &mut self.stdout
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

pub fn draw_lines(stdout: &mut Stdout, lines: &[String]) -> Result<(), String>
{
    let output = format!("{}\r\n", lines.join("\r\n"));
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All)).map_err(|err| err.to_string())?;
    stdout.write_all(output.as_bytes()).map_err(|err| err.to_string())?;
    stdout.flush().map_err(|err| err.to_string())?;
    Ok(())
}

/// Key presses queued since the last call, without blocking.
pub fn drain_keys() -> Result<Vec<KeyEvent>, String>
{
    let mut keys = Vec::new();
    while event::poll(Duration::from_millis(0)).map_err(|err| err.to_string())? {
        if let Event::Key(key) = event::read().map_err(|err| err.to_string())? {
            if key.kind != KeyEventKind::Release {
                keys.push(key);
            }
        }
    }
    Ok(keys)
}

pub fn is_quit(key: &KeyEvent) -> bool
{
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

pub fn wait_for_space() -> Result<(), String>
{
    drain_keys()?;

    loop {
        if event::poll(Duration::from_millis(50)).map_err(|err| err.to_string())? {
            if let Event::Key(KeyEvent { code: KeyCode::Char(' '), .. }) =
                event::read().map_err(|err| err.to_string())?
            {
                break;
            }
        }
    }

    Ok(())
}

pub fn highlight(text: &str, selected: bool) -> String
{
    if selected {
        format!("\x1b[7m{}\x1b[0m", text)
    } else {
        text.to_string()
    }
}

/// Cursor over a fixed-size grid, moved with the arrow keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCursor
{
    pub row: usize,
    pub col: usize,
    rows: usize,
    cols: usize,
}

impl GridCursor
{
    pub fn new(rows: usize, cols: usize) -> Self
    {
        Self {
            row: 0,
            col: 0,
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// Returns true when the key was an arrow key.
    pub fn apply(&mut self, code: KeyCode) -> bool
    {
        match code {
            KeyCode::Up => self.row = self.row.saturating_sub(1),
            KeyCode::Down => self.row = (self.row + 1).min(self.rows - 1),
            KeyCode::Left => self.col = self.col.saturating_sub(1),
            KeyCode::Right => self.col = (self.col + 1).min(self.cols - 1),
            _ => return false,
        }
        true
    }

    pub fn index(&self) -> usize
    {
        self.row * self.cols + self.col
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn cursor_stays_inside_grid()
    {
        let mut cursor = GridCursor::new(2, 4);
        assert!(cursor.apply(KeyCode::Up));
        assert!(cursor.apply(KeyCode::Left));
        assert_eq!((cursor.row, cursor.col), (0, 0));

        for _ in 0..10 {
            cursor.apply(KeyCode::Down);
            cursor.apply(KeyCode::Right);
        }
        assert_eq!((cursor.row, cursor.col), (1, 3));
        assert_eq!(cursor.index(), 7);
    }

    #[test]
    fn cursor_ignores_other_keys()
    {
        let mut cursor = GridCursor::new(4, 4);
        assert!(!cursor.apply(KeyCode::Enter));
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn quit_keys()
    {
        assert!(is_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn highlight_wraps_selected_cells_only()
    {
        assert_eq!(highlight("x", false), "x");
        assert_eq!(highlight("x", true), "\x1b[7mx\x1b[0m");
    }
}
