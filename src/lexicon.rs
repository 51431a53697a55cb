//! Corpus and score-track files.
//!
//! The corpus is one `source<TAB>target` pair per line. Each score track is
//! a whitespace-separated list of integers in corpus order.

use crate::deck::{Deck, WordPair};
use crate::error::{LexiconError, LoadWarning};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Below this many words the distractor search may not find enough answers.
pub const MIN_CORPUS_SIZE: usize = 15;

pub const CORPUS_FILE: &str = "words.txt";
pub const FORWARD_SCORES_FILE: &str = "words_1.txt";
pub const REVERSE_SCORES_FILE: &str = "words_2.txt";

/// Everything read from disk at startup.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    pub pairs: Vec<WordPair>,
    pub forward_scores: Vec<i32>,
    pub reverse_scores: Vec<i32>,
    pub warnings: Vec<LoadWarning>,
}

impl Lexicon {
    pub fn into_deck(self) -> Deck {
        Deck::new(self.pairs, self.forward_scores, self.reverse_scores)
    }
}

#[derive(Debug, Clone)]
pub struct LexiconStore {
    corpus: PathBuf,
    forward: PathBuf,
    reverse: PathBuf,
}

impl LexiconStore {
    pub fn new(corpus: PathBuf, forward: PathBuf, reverse: PathBuf) -> Self {
        Self {
            corpus,
            forward,
            reverse,
        }
    }

    /// Store using the default file names inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(CORPUS_FILE),
            dir.join(FORWARD_SCORES_FILE),
            dir.join(REVERSE_SCORES_FILE),
        )
    }

    pub fn corpus_path(&self) -> &Path {
        &self.corpus
    }

    pub fn load(&self) -> Result<Lexicon, LexiconError> {
        let mut warnings = Vec::new();

        let pairs = match read_optional(&self.corpus)? {
            Some(text) => parse_corpus(text.as_bytes()).map_err(|source| LexiconError::Corpus {
                path: self.corpus.clone(),
                source,
            })?,
            None => {
                warnings.push(LoadWarning::MissingCorpus {
                    path: self.corpus.clone(),
                });
                Vec::new()
            }
        };

        if pairs.len() < MIN_CORPUS_SIZE {
            warnings.push(LoadWarning::InsufficientCorpus {
                found: pairs.len(),
                required: MIN_CORPUS_SIZE,
            });
        }

        let forward_scores = self.load_track(&self.forward, &mut warnings)?;
        let reverse_scores = self.load_track(&self.reverse, &mut warnings)?;

        for warning in &warnings {
            warn!("{warning}");
        }
        info!(
            words = pairs.len(),
            corpus = %self.corpus.display(),
            "lexicon loaded"
        );

        Ok(Lexicon {
            pairs,
            forward_scores,
            reverse_scores,
            warnings,
        })
    }

    fn load_track(
        &self,
        path: &Path,
        warnings: &mut Vec<LoadWarning>,
    ) -> Result<Vec<i32>, LexiconError> {
        let Some(text) = read_track(path)? else {
            return Ok(Vec::new());
        };
        let (scores, bad_token) = parse_scores(&text);
        if let Some(token) = bad_token {
            warnings.push(LoadWarning::ScoreFileCorrupt {
                path: path.to_path_buf(),
                token,
            });
        }
        Ok(scores)
    }

    /// Overwrites both score files. Tracks must already face forward.
    pub fn save(&self, forward: &[i32], reverse: &[i32]) -> Result<(), LexiconError> {
        write_track(&self.forward, forward)?;
        write_track(&self.reverse, reverse)?;
        info!(words = forward.len(), "scores saved");
        Ok(())
    }

    /// Normalizes the deck to the forward direction and saves its scores.
    pub fn save_deck(&self, deck: Deck) -> Result<(), LexiconError> {
        let (forward, reverse) = deck.into_forward_tracks();
        self.save(&forward, &reverse)
    }
}

/// Parses tab-separated pairs. A line without a tab has an empty target and
/// any further tabs stay part of the target.
pub fn parse_corpus<R: Read>(reader: R) -> Result<Vec<WordPair>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut pairs = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let source = record.get(0).unwrap_or_default();
        let target = record.iter().skip(1).collect::<Vec<_>>().join("\t");
        pairs.push(WordPair::new(source, target));
    }
    Ok(pairs)
}

/// Parses a score track. Reading stops at the first token that is not an
/// integer; that token is returned alongside the scores read so far.
pub fn parse_scores(text: &str) -> (Vec<i32>, Option<String>) {
    let mut scores = Vec::new();
    for token in text.split_whitespace() {
        match token.parse::<i32>() {
            Ok(score) => scores.push(score),
            Err(_) => return (scores, Some(token.to_string())),
        }
    }
    (scores, None)
}

fn format_scores(scores: &[i32]) -> String {
    scores.iter().map(|s| format!("{s} ")).collect()
}

fn write_track(path: &Path, scores: &[i32]) -> Result<(), LexiconError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LexiconError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, format_scores(scores)).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a score file. Invalid UTF-8 is replaced rather than rejected, so it
/// shows up as a bad token and the file is truncated there.
fn read_track(path: &Path) -> Result<Option<String>, LexiconError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(LexiconError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, LexiconError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(LexiconError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn corpus_of(n: usize) -> String {
        (0..n).map(|i| format!("word{i}\tслово{i}\n")).collect()
    }

    #[test]
    fn parse_tab_separated_pairs() {
        let pairs = parse_corpus("cat\tкот\ndog\tпёс\n".as_bytes()).unwrap();
        assert_eq!(
            pairs,
            vec![WordPair::new("cat", "кот"), WordPair::new("dog", "пёс")]
        );
    }

    #[test]
    fn line_without_tab_has_empty_target() {
        let pairs = parse_corpus("lonely\nbird\tптица".as_bytes()).unwrap();
        assert_eq!(pairs[0], WordPair::new("lonely", ""));
        assert_eq!(pairs[1], WordPair::new("bird", "птица"));
    }

    #[test]
    fn extra_tabs_stay_in_target() {
        let pairs = parse_corpus("run\tбежать\tбегать\n".as_bytes()).unwrap();
        assert_eq!(pairs[0].target, "бежать\tбегать");
    }

    #[test]
    fn quotes_are_literal_and_crlf_is_trimmed() {
        let pairs = parse_corpus("\"hi\"\t\"привет\"\r\nyes\tда\r\n".as_bytes()).unwrap();
        assert_eq!(pairs[0], WordPair::new("\"hi\"", "\"привет\""));
        assert_eq!(pairs[1], WordPair::new("yes", "да"));
    }

    #[test]
    fn parse_scores_stops_at_garbage() {
        assert_eq!(parse_scores("1 -2  0\n5 "), (vec![1, -2, 0, 5], None));
        assert_eq!(
            parse_scores("3 4 x 7"),
            (vec![3, 4], Some("x".to_string()))
        );
        assert_eq!(parse_scores(""), (vec![], None));
    }

    #[test]
    fn missing_corpus_is_a_warning() {
        let dir = tempdir().unwrap();
        let lexicon = LexiconStore::in_dir(dir.path()).load().unwrap();

        assert!(lexicon.pairs.is_empty());
        assert_matches!(lexicon.warnings[0], LoadWarning::MissingCorpus { .. });
        assert_matches!(
            lexicon.warnings[1],
            LoadWarning::InsufficientCorpus { found: 0, .. }
        );
    }

    #[test]
    fn small_corpus_still_loads() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CORPUS_FILE), corpus_of(4)).unwrap();

        let lexicon = LexiconStore::in_dir(dir.path()).load().unwrap();
        assert_eq!(lexicon.pairs.len(), 4);
        assert_eq!(
            lexicon.warnings,
            vec![LoadWarning::InsufficientCorpus {
                found: 4,
                required: MIN_CORPUS_SIZE
            }]
        );
    }

    #[test]
    fn stale_score_files_are_reconciled_by_the_deck() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CORPUS_FILE), corpus_of(15)).unwrap();
        fs::write(dir.path().join(FORWARD_SCORES_FILE), "1 2 3").unwrap();
        fs::write(dir.path().join(REVERSE_SCORES_FILE), "1 ".repeat(20)).unwrap();

        let lexicon = LexiconStore::in_dir(dir.path()).load().unwrap();
        assert!(lexicon.warnings.is_empty());

        let (forward, reverse) = lexicon.into_deck().into_forward_tracks();
        assert_eq!(forward.len(), 15);
        assert_eq!(&forward[..4], &[1, 2, 3, 0]);
        assert_eq!(reverse, vec![1; 15]);
    }

    #[test]
    fn corrupt_score_file_is_truncated() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CORPUS_FILE), corpus_of(15)).unwrap();
        fs::write(dir.path().join(FORWARD_SCORES_FILE), "2 -1 oops 4").unwrap();

        let lexicon = LexiconStore::in_dir(dir.path()).load().unwrap();
        assert_eq!(lexicon.forward_scores, vec![2, -1]);
        assert_matches!(
            &lexicon.warnings[..],
            [LoadWarning::ScoreFileCorrupt { token, .. }] if token == "oops"
        );
    }

    #[test]
    fn binary_garbage_in_score_file_is_not_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CORPUS_FILE), corpus_of(15)).unwrap();
        fs::write(dir.path().join(FORWARD_SCORES_FILE), b"1 2 \xff\xfe").unwrap();
        fs::write(dir.path().join(REVERSE_SCORES_FILE), "3 ").unwrap();

        let lexicon = LexiconStore::in_dir(dir.path()).load().unwrap();
        assert_eq!(lexicon.forward_scores, vec![1, 2]);
        assert_eq!(lexicon.reverse_scores, vec![3]);
        assert_matches!(
            &lexicon.warnings[..],
            [LoadWarning::ScoreFileCorrupt { path, .. }] if path.ends_with(FORWARD_SCORES_FILE)
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CORPUS_FILE), corpus_of(15)).unwrap();
        let store = LexiconStore::in_dir(dir.path());

        let forward: Vec<i32> = (0..15).map(|i| i - 7).collect();
        let reverse: Vec<i32> = (0..15).map(|i| i % 3).collect();
        store.save(&forward, &reverse).unwrap();

        let lexicon = store.load().unwrap();
        assert_eq!(lexicon.forward_scores, forward);
        assert_eq!(lexicon.reverse_scores, reverse);
    }

    #[test]
    fn scores_are_written_space_separated() {
        let dir = tempdir().unwrap();
        let store = LexiconStore::in_dir(dir.path());
        store.save(&[1, -5, 0], &[]).unwrap();

        let text = fs::read_to_string(dir.path().join(FORWARD_SCORES_FILE)).unwrap();
        assert_eq!(text, "1 -5 0 ");
    }

    #[test]
    fn save_deck_normalizes_direction() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CORPUS_FILE), corpus_of(15)).unwrap();
        let store = LexiconStore::in_dir(dir.path());

        let mut deck = store.load().unwrap().into_deck();
        deck.record_answer(0, true);
        deck.swap_direction();
        deck.record_answer(1, false);
        store.save_deck(deck).unwrap();

        let lexicon = store.load().unwrap();
        assert_eq!(lexicon.forward_scores[0], 1);
        assert_eq!(lexicon.reverse_scores[1], -1);
    }
}
