use crate::proficiency::{self, ProficiencyCounts};
use serde::{Deserialize, Serialize};
use std::mem;

/// Which language of the corpus is currently being asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Questions in the first column, answers in the second.
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// One corpus entry seen from the active direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPair {
    pub source: String,
    pub target: String,
}

impl WordPair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Both word tracks, both score tracks and the counts derived from the
/// active score track. Tracks are positionally coupled: index `i` is the
/// same word in all four.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    prompts: Vec<String>,
    answers: Vec<String>,
    scores: Vec<i32>,
    mirror_scores: Vec<i32>,
    direction: Direction,
    counts: ProficiencyCounts,
}

impl Deck {
    /// Builds a forward-facing deck, padding or truncating both score tracks
    /// to the corpus size.
    pub fn new(pairs: Vec<WordPair>, forward_scores: Vec<i32>, reverse_scores: Vec<i32>) -> Self {
        let len = pairs.len();
        let (prompts, answers): (Vec<_>, Vec<_>) =
            pairs.into_iter().map(|p| (p.source, p.target)).unzip();
        let scores = fit_to_len(forward_scores, len);
        let mirror_scores = fit_to_len(reverse_scores, len);
        let counts = ProficiencyCounts::tally(&scores);

        Self {
            prompts,
            answers,
            scores,
            mirror_scores,
            direction: Direction::Forward,
            counts,
        }
    }

    /// A deck with every score neutral.
    pub fn from_pairs(pairs: Vec<WordPair>) -> Self {
        Self::new(pairs, Vec::new(), Vec::new())
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn counts(&self) -> ProficiencyCounts {
        self.counts
    }

    pub fn prompt(&self, idx: usize) -> &str {
        &self.prompts[idx]
    }

    pub fn answer(&self, idx: usize) -> &str {
        &self.answers[idx]
    }

    pub fn pair(&self, idx: usize) -> WordPair {
        WordPair::new(self.prompt(idx), self.answer(idx))
    }

    /// Scores of the active direction.
    pub fn scores(&self) -> &[i32] {
        &self.scores
    }

    pub fn score(&self, idx: usize) -> i32 {
        self.scores[idx]
    }

    /// Applies one answer to the active track and returns the new score.
    pub fn record_answer(&mut self, idx: usize, correct: bool) -> i32 {
        self.set_score(idx, proficiency::after_answer(self.scores[idx], correct))
    }

    /// Flags a word for memorization and returns the resulting score.
    pub fn mark_for_memorization(&mut self, idx: usize) -> i32 {
        self.set_score(idx, proficiency::after_memorize(self.scores[idx]))
    }

    fn set_score(&mut self, idx: usize, new: i32) -> i32 {
        let old = mem::replace(&mut self.scores[idx], new);
        self.counts.shift(old, new);
        new
    }

    /// Exchanges question and answer languages. Words and scores always move
    /// together.
    pub fn swap_direction(&mut self) {
        mem::swap(&mut self.prompts, &mut self.answers);
        mem::swap(&mut self.scores, &mut self.mirror_scores);
        self.direction = self.direction.flipped();
        self.counts = ProficiencyCounts::tally(&self.scores);
    }

    /// Faces the deck in `direction`, swapping if needed.
    pub fn face(&mut self, direction: Direction) {
        if self.direction != direction {
            self.swap_direction();
        }
    }

    /// Forward and reverse score tracks, normalized to the forward
    /// orientation regardless of the current direction.
    pub fn into_forward_tracks(mut self) -> (Vec<i32>, Vec<i32>) {
        self.face(Direction::Forward);
        (self.scores, self.mirror_scores)
    }
}

fn fit_to_len(mut scores: Vec<i32>, len: usize) -> Vec<i32> {
    scores.resize(len, 0);
    scores
}
