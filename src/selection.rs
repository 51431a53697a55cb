use crate::deck::Deck;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Strategy for picking the next word to ask.
///
/// The deck is passed on every pull so the policy always sees the live
/// scores.
pub trait WordPolicy: std::fmt::Debug {
    /// Index of the next word to ask, or `None` for an empty deck.
    fn next_index(&mut self, deck: &Deck, rng: &mut dyn RngCore) -> Option<usize>;

    /// Returns a word whose question could not be built, so it is asked
    /// first once a question can be built again.
    fn give_back(&mut self, _index: usize) {}

    /// Drops any precomputed order after the question language changed.
    fn on_direction_swap(&mut self);

    fn kind(&self) -> PolicyKind;
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Any word, uniformly at random
    Random,
    /// Unexplored words first, then the lowest scores
    #[default]
    Weakest,
}

impl PolicyKind {
    pub fn build(self) -> Box<dyn WordPolicy> {
        match self {
            PolicyKind::Random => Box::new(UniformRandom),
            PolicyKind::Weakest => Box::new(WeakestFirst::default()),
        }
    }
}

/// Independent uniform picks over the whole deck.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandom;

impl WordPolicy for UniformRandom {
    fn next_index(&mut self, deck: &Deck, rng: &mut dyn RngCore) -> Option<usize> {
        (!deck.is_empty()).then(|| rng.gen_range(0..deck.len()))
    }

    fn on_direction_swap(&mut self) {}

    fn kind(&self) -> PolicyKind {
        PolicyKind::Random
    }
}

/// Works through the weakest words in shuffled batches.
///
/// A batch is every unexplored word if there is one, otherwise every word
/// sharing the lowest score. The next batch is computed from the scores as
/// they are when the current one runs out.
#[derive(Debug, Clone, Default)]
pub struct WeakestFirst {
    queue: Vec<usize>,
}

impl WeakestFirst {
    pub fn pending(&self) -> &[usize] {
        &self.queue
    }

    fn refill(&mut self, deck: &Deck, rng: &mut dyn RngCore) {
        let scores = deck.scores();
        let target = if scores.contains(&0) {
            0
        } else {
            match scores.iter().min() {
                Some(&min) => min,
                None => return,
            }
        };

        self.queue = scores.iter().positions(|&s| s == target).collect();
        self.queue.shuffle(rng);
        debug!(score = target, batch = self.queue.len(), "refilled word queue");
    }
}

impl WordPolicy for WeakestFirst {
    fn next_index(&mut self, deck: &Deck, rng: &mut dyn RngCore) -> Option<usize> {
        // Indices from before a corpus change may be stale.
        self.queue.retain(|&i| i < deck.len());
        if self.queue.is_empty() {
            self.refill(deck, rng);
        }
        self.queue.pop()
    }

    fn give_back(&mut self, index: usize) {
        self.queue.push(index);
    }

    fn on_direction_swap(&mut self) {
        self.queue.clear();
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Weakest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::WordPair;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn deck_with_scores(scores: Vec<i32>) -> Deck {
        let pairs = (0..scores.len())
            .map(|i| WordPair::new(format!("w{i}"), format!("t{i}")))
            .collect();
        Deck::new(pairs, scores, Vec::new())
    }

    #[test]
    fn uniform_random_stays_in_range() {
        let deck = deck_with_scores(vec![0; 7]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut policy = UniformRandom;

        let seen: HashSet<usize> = (0..500)
            .map(|_| policy.next_index(&deck, &mut rng).unwrap())
            .collect();
        assert!(seen.iter().all(|&i| i < 7));
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn empty_deck_yields_nothing() {
        let deck = deck_with_scores(vec![]);
        let mut rng = StdRng::seed_from_u64(2);
        for kind in [PolicyKind::Random, PolicyKind::Weakest] {
            assert_eq!(kind.build().next_index(&deck, &mut rng), None);
        }
    }

    #[test]
    fn weakest_first_exhausts_neutral_words_before_repeating() {
        let deck = deck_with_scores(vec![0; 20]);
        let mut rng = StdRng::seed_from_u64(3);
        let mut policy = WeakestFirst::default();

        let first_round: Vec<usize> = (0..20)
            .map(|_| policy.next_index(&deck, &mut rng).unwrap())
            .collect();
        let distinct: HashSet<_> = first_round.iter().collect();
        assert_eq!(distinct.len(), 20);
    }

    #[test]
    fn neutral_words_take_precedence_over_struggling_ones() {
        let deck = deck_with_scores(vec![-4, 0, 3, 0, -1]);
        let mut rng = StdRng::seed_from_u64(4);
        let mut policy = WeakestFirst::default();

        let batch: HashSet<usize> = (0..2)
            .map(|_| policy.next_index(&deck, &mut rng).unwrap())
            .collect();
        assert_eq!(batch, HashSet::from([1, 3]));
    }

    #[test]
    fn without_neutral_words_the_minimum_is_drilled() {
        let deck = deck_with_scores(vec![2, -3, 1, -3, -1]);
        let mut rng = StdRng::seed_from_u64(5);
        let mut policy = WeakestFirst::default();

        let first = policy.next_index(&deck, &mut rng).unwrap();
        assert!(first == 1 || first == 3);
        assert_eq!(policy.pending().len(), 1);
    }

    #[test]
    fn refill_sees_updated_scores() {
        let mut deck = deck_with_scores(vec![0, 0, 5]);
        let mut rng = StdRng::seed_from_u64(6);
        let mut policy = WeakestFirst::default();

        let a = policy.next_index(&deck, &mut rng).unwrap();
        deck.record_answer(a, true);
        let b = policy.next_index(&deck, &mut rng).unwrap();
        deck.record_answer(b, false);

        // Batch exhausted: the word just missed is now the weakest.
        assert_eq!(policy.next_index(&deck, &mut rng), Some(b));
    }

    #[test]
    fn swap_discards_the_queue() {
        let deck = deck_with_scores(vec![0; 5]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut policy = WeakestFirst::default();

        policy.next_index(&deck, &mut rng);
        assert_eq!(policy.pending().len(), 4);
        policy.on_direction_swap();
        assert!(policy.pending().is_empty());
    }

    #[test]
    fn given_back_word_is_asked_next() {
        let deck = deck_with_scores(vec![0; 6]);
        let mut rng = StdRng::seed_from_u64(8);
        let mut policy = WeakestFirst::default();

        let first = policy.next_index(&deck, &mut rng).unwrap();
        assert!(!policy.pending().contains(&first));
        policy.give_back(first);
        assert_eq!(policy.pending().len(), 6);
        assert_eq!(policy.next_index(&deck, &mut rng), Some(first));
    }

    #[test]
    fn kind_round_trips_through_build() {
        for kind in [PolicyKind::Random, PolicyKind::Weakest] {
            assert_eq!(kind.build().kind(), kind);
        }
        assert_eq!(PolicyKind::Weakest.to_string(), "Weakest");
    }
}
