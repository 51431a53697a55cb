use crate::selection::PolicyKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Everything the UI can ask of the drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    /// Zero-based answer slot
    Answer(usize),
    SwapDirection,
    MarkForMemorization,
    MoreAnswers,
    FewerAnswers,
    UsePolicy(PolicyKind),
    ToggleStats,
    Quit,
}

impl Command {
    /// Maps a key press to a command. Digits pick answers: `1` is the first
    /// slot and `0` the tenth.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return (key.code == KeyCode::Char('c')).then_some(Command::Quit);
        }

        let command = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Command::Quit,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') => Command::Next,
            KeyCode::Char('0') => Command::Answer(9),
            KeyCode::Char(c @ '1'..='9') => Command::Answer(c as usize - '1' as usize),
            KeyCode::Char('s') => Command::SwapDirection,
            KeyCode::Char('m') => Command::MarkForMemorization,
            KeyCode::Char('+') | KeyCode::Char('=') => Command::MoreAnswers,
            KeyCode::Char('-') => Command::FewerAnswers,
            KeyCode::Char('r') => Command::UsePolicy(PolicyKind::Random),
            KeyCode::Char('w') => Command::UsePolicy(PolicyKind::Weakest),
            KeyCode::Char('t') => Command::ToggleStats,
            _ => return None,
        };
        Some(command)
    }
}
