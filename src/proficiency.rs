/// Score that flags a word for forced review.
pub const MEMORIZE_SCORE: i32 = -5;

/// Which bucket a proficiency score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Neutral,
    Struggling,
    Known,
}

impl Standing {
    pub fn of(score: i32) -> Self {
        match score {
            0 => Standing::Neutral,
            s if s < 0 => Standing::Struggling,
            _ => Standing::Known,
        }
    }
}

/// Score after one answer.
///
/// A hit while struggling resets the streak straight to `+1`; a miss while
/// known resets it to `-1`. Otherwise the streak grows away from zero.
pub fn after_answer(score: i32, correct: bool) -> i32 {
    match (correct, Standing::of(score)) {
        (true, Standing::Known) => score.saturating_add(1),
        (true, _) => 1,
        (false, Standing::Struggling) => score.saturating_sub(1),
        (false, _) => -1,
    }
}

/// Score after flagging the word for memorization. Never raises a score.
pub fn after_memorize(score: i32) -> i32 {
    score.min(MEMORIZE_SCORE)
}

/// Number of words in each standing over one score track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProficiencyCounts {
    pub neutral: usize,
    pub minus: usize,
    pub plus: usize,
}

impl ProficiencyCounts {
    pub fn tally(scores: &[i32]) -> Self {
        scores.iter().fold(Self::default(), |mut counts, &s| {
            *counts.bucket_mut(Standing::of(s)) += 1;
            counts
        })
    }

    /// Moves one word from the standing of `old` to the standing of `new`.
    pub fn shift(&mut self, old: i32, new: i32) {
        let (from, to) = (Standing::of(old), Standing::of(new));
        if from != to {
            *self.bucket_mut(from) -= 1;
            *self.bucket_mut(to) += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.neutral + self.minus + self.plus
    }

    fn bucket_mut(&mut self, standing: Standing) -> &mut usize {
        match standing {
            Standing::Neutral => &mut self.neutral,
            Standing::Struggling => &mut self.minus,
            Standing::Known => &mut self.plus,
        }
    }
}
