//! Moves entries from a large dictionary file into the drill corpus.

use crate::error::{ImportError, LexiconError};
use crate::lexicon::read_optional;
use rand::Rng;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub moved: usize,
    pub corpus_size: usize,
    pub dictionary_left: usize,
}

/// Moves up to `count` lines from `dictionary` to the end of `corpus` and
/// rewrites both files. Lines are taken from the top of the dictionary
/// unless `rng` is given, in which case they are picked at random.
pub fn add_words<R: Rng>(
    dictionary: &Path,
    corpus: &Path,
    count: usize,
    rng: Option<&mut R>,
) -> Result<ImportSummary, ImportError> {
    let dict_text = read_optional(dictionary)?
        .ok_or_else(|| ImportError::MissingDictionary(dictionary.to_path_buf()))?;
    let mut dict = non_blank_lines(&dict_text);
    let mut words = read_optional(corpus)?
        .map(|text| non_blank_lines(&text))
        .unwrap_or_default();

    let moved = count.min(dict.len());
    match rng {
        Some(rng) => {
            for _ in 0..moved {
                let pos = rng.gen_range(0..dict.len());
                words.push(dict.remove(pos));
            }
        }
        None => words.extend(dict.drain(..moved)),
    }

    write_lines(corpus, &words)?;
    write_lines(dictionary, &dict)?;
    info!(moved, corpus_size = words.len(), "words added to corpus");

    Ok(ImportSummary {
        moved,
        corpus_size: words.len(),
        dictionary_left: dict.len(),
    })
}

fn non_blank_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect()
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), LexiconError> {
    fs::write(path, lines.join("\n")).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })
}
