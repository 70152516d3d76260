//! Terminal setup and keyboard input.

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::IsTerminal;
use std::time::Duration;

/// Alternate screen, hidden cursor and raw mode for as long as it lives.
///
/// When stdout is not a terminal (piped, systemd) the guard does nothing and
/// [`TerminalGuard::is_active`] reports false.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        if !std::io::stdout().is_terminal() {
            return Ok(Self { active: false });
        }

        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = std::io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e).context("failed to enter the alternate screen");
        }
        Ok(Self { active: true })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = execute!(std::io::stdout(), Show, LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// User intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    ToggleTheme,
    CycleZone,
    ToggleSound,
}

/// Map a key event to an action. Releases and repeats are ignored.
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(KeyAction::Quit),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(KeyAction::ToggleTheme),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(KeyAction::CycleZone),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(KeyAction::ToggleSound),
        _ => None,
    }
}

/// Wait up to `timeout` for a key press that means something.
pub fn poll_key(timeout: Duration) -> Result<Option<KeyAction>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_map_key_actions() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(KeyAction::Quit));
        assert_eq!(map_key(press(KeyCode::Char('d'))), Some(KeyAction::ToggleTheme));
        assert_eq!(map_key(press(KeyCode::Char('z'))), Some(KeyAction::CycleZone));
        assert_eq!(map_key(press(KeyCode::Char('s'))), Some(KeyAction::ToggleSound));
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(KeyAction::Quit));
        assert_eq!(map_key(press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_release_ignored() {
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }
}
