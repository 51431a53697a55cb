use crate::deck::Direction;
use crate::selection::PolicyKind;

/// Read-only counters handed to the UI for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsPanel {
    /// Correct answers this session
    pub correct: u32,
    /// Incorrect answers this session
    pub incorrect: u32,
    /// Words never answered
    pub neutral: usize,
    /// Words currently answered wrong
    pub minus: usize,
    /// Words currently answered right
    pub plus: usize,
    pub direction: Direction,
    pub policy: PolicyKind,
}

impl StatsPanel {
    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Share of correct answers this session, in percent.
    pub fn accuracy(&self) -> Option<f64> {
        match self.answered() {
            0 => None,
            total => Some(self.correct as f64 * 100.0 / total as f64),
        }
    }

    pub fn lines(&self) -> Vec<(&'static str, String)> {
        let accuracy = self
            .accuracy()
            .map(|a| format!("{a:.0}%"))
            .unwrap_or_else(|| "-".to_string());
        vec![
            ("Correct answers", self.correct.to_string()),
            ("Incorrect answers", self.incorrect.to_string()),
            ("Accuracy", accuracy),
            ("Unexplored words", self.neutral.to_string()),
            ("Mistakes", self.minus.to_string()),
            ("Learned", self.plus.to_string()),
        ]
    }
}
