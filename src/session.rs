use crate::deck::{Deck, Direction};
use crate::error::{DrillError, DrillResult};
use crate::selection::{PolicyKind, WordPolicy};
use crate::stats::StatsPanel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, info};

/// Random draws per distractor slot before falling back to a full scan.
pub const MAX_DRAWS_PER_SLOT: usize = 256;

/// A question ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub word_index: usize,
    pub prompt: String,
    pub answers: Vec<String>,
    pub correct_slot: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub was_correct: bool,
    pub correct_slot: usize,
    pub new_score: i32,
}

#[derive(Debug, Clone, Copy)]
struct OpenQuestion {
    word_index: usize,
    correct_slot: usize,
    answers: usize,
    answered: bool,
}

/// One drill run: the deck, the active policy and the session counters.
#[derive(Debug)]
pub struct QuizSession<R: Rng = StdRng> {
    deck: Deck,
    policy: Box<dyn WordPolicy>,
    rng: R,
    current: Option<OpenQuestion>,
    correct: u32,
    incorrect: u32,
}

impl QuizSession<StdRng> {
    pub fn new(deck: Deck, policy: PolicyKind) -> Self {
        Self::with_rng(deck, policy.build(), StdRng::from_entropy())
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(deck: Deck, policy: Box<dyn WordPolicy>, rng: R) -> Self {
        Self {
            deck,
            policy,
            rng,
            current: None,
            correct: 0,
            incorrect: 0,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn into_deck(self) -> Deck {
        self.deck
    }

    pub fn policy(&self) -> PolicyKind {
        self.policy.kind()
    }

    pub fn set_policy(&mut self, kind: PolicyKind) {
        if self.policy.kind() != kind {
            info!(policy = %kind, "switching word policy");
            self.policy = kind.build();
        }
    }

    /// Picks the next word and builds `answers_num` distinct answers, one of
    /// them correct. The previous question is closed even if this fails.
    pub fn question(&mut self, answers_num: usize) -> DrillResult<Question> {
        self.current = None;
        if answers_num == 0 {
            return Err(DrillError::NoAnswerSlots);
        }
        let word_index = self
            .policy
            .next_index(&self.deck, &mut self.rng)
            .ok_or(DrillError::EmptyCorpus)?;
        let correct_slot = self.rng.gen_range(0..answers_num);

        let answers = match self.fill_answers(word_index, correct_slot, answers_num) {
            Ok(answers) => answers,
            Err(e) => {
                self.policy.give_back(word_index);
                return Err(e);
            }
        };
        self.current = Some(OpenQuestion {
            word_index,
            correct_slot,
            answers: answers_num,
            answered: false,
        });
        debug!(word_index, correct_slot, answers = answers_num, "question ready");

        Ok(Question {
            word_index,
            prompt: self.deck.prompt(word_index).to_string(),
            answers,
            correct_slot,
        })
    }

    fn fill_answers(
        &mut self,
        word_index: usize,
        correct_slot: usize,
        answers_num: usize,
    ) -> DrillResult<Vec<String>> {
        let deck = &self.deck;
        let prompt = deck.prompt(word_index);
        let mut shown: HashSet<&str> = HashSet::from([deck.answer(word_index)]);
        let other_word = |w: usize| w != word_index && deck.prompt(w) != prompt;

        let mut answers = Vec::with_capacity(answers_num);
        for slot in 0..answers_num {
            if slot == correct_slot {
                answers.push(deck.answer(word_index).to_string());
                continue;
            }

            let sampled = (0..MAX_DRAWS_PER_SLOT)
                .map(|_| self.rng.gen_range(0..deck.len()))
                .find(|&w| other_word(w) && !shown.contains(deck.answer(w)));

            let w = match sampled {
                Some(w) => w,
                None => {
                    let left: Vec<usize> = (0..deck.len())
                        .filter(|&w| other_word(w) && !shown.contains(deck.answer(w)))
                        .collect();
                    if left.is_empty() {
                        return Err(DrillError::DistractorStarvation {
                            requested: answers_num,
                            found: shown.len(),
                        });
                    }
                    left[self.rng.gen_range(0..left.len())]
                }
            };
            shown.insert(deck.answer(w));
            answers.push(deck.answer(w).to_string());
        }
        Ok(answers)
    }

    /// Checks the chosen slot against the open question and updates the
    /// word's score.
    pub fn submit_answer(&mut self, slot: usize) -> DrillResult<AnswerOutcome> {
        let open = self.current.as_mut().ok_or(DrillError::NoActiveQuestion)?;
        if open.answered {
            return Err(DrillError::AlreadyAnswered);
        }
        if slot >= open.answers {
            return Err(DrillError::InvalidSlot {
                slot,
                answers: open.answers,
            });
        }
        open.answered = true;

        let was_correct = slot == open.correct_slot;
        if was_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        let new_score = self.deck.record_answer(open.word_index, was_correct);
        debug!(word_index = open.word_index, was_correct, new_score, "answer recorded");

        Ok(AnswerOutcome {
            was_correct,
            correct_slot: open.correct_slot,
            new_score,
        })
    }

    /// Flags the current word for forced review.
    pub fn mark_for_memorization(&mut self) -> DrillResult<i32> {
        let open = self.current.ok_or(DrillError::NoActiveQuestion)?;
        let score = self.deck.mark_for_memorization(open.word_index);
        info!(word_index = open.word_index, score, "word marked for memorization");
        Ok(score)
    }

    /// Swaps question and answer languages. The open question is dropped;
    /// ask for a new one afterwards.
    pub fn swap_direction(&mut self) {
        self.deck.swap_direction();
        self.policy.on_direction_swap();
        self.current = None;
        info!(direction = %self.deck.direction(), "direction swapped");
    }

    pub fn face(&mut self, direction: Direction) {
        if self.deck.direction() != direction {
            self.swap_direction();
        }
    }

    /// Index of the word behind the open question.
    pub fn current_word(&self) -> Option<usize> {
        self.current.map(|open| open.word_index)
    }

    pub fn stats(&self) -> StatsPanel {
        let counts = self.deck.counts();
        StatsPanel {
            correct: self.correct,
            incorrect: self.incorrect,
            neutral: counts.neutral,
            minus: counts.minus,
            plus: counts.plus,
            direction: self.deck.direction(),
            policy: self.policy.kind(),
        }
    }
}
