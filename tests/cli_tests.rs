//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn wordrace(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("wordrace").unwrap();
    cmd.arg("--log-file").arg(dir.path().join("test.log"));
    cmd
}

#[test]
fn help_lists_options() {
    let dir = TempDir::new().unwrap();
    wordrace(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--data-dir"))
        .stdout(predicate::str::contains("--policy"))
        .stdout(predicate::str::contains("add-words"));
}

#[test]
fn add_words_moves_lines_into_corpus() {
    let dir = TempDir::new().unwrap();
    let dictionary = dir.path().join("dictionary.txt");
    fs::write(&dictionary, "one\tодин\ntwo\tдва\nthree\tтри\n").unwrap();

    wordrace(&dir)
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("add-words")
        .arg("--dictionary")
        .arg(&dictionary)
        .arg("-n")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("moved 2 words"));

    let corpus = fs::read_to_string(dir.path().join("data").join("words.txt")).unwrap();
    assert_eq!(corpus, "one\tодин\ntwo\tдва");
    assert_eq!(fs::read_to_string(&dictionary).unwrap(), "three\tтри");
}

#[test]
fn add_words_without_dictionary_fails() {
    let dir = TempDir::new().unwrap();
    wordrace(&dir)
        .arg("--data-dir")
        .arg(dir.path())
        .arg("add-words")
        .arg("--dictionary")
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("MissingDictionary"));
}

#[test]
fn drill_requires_a_tty() {
    let dir = TempDir::new().unwrap();
    wordrace(&dir)
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("stdin must be a tty"));
}

#[test]
fn invalid_policy_is_rejected() {
    let dir = TempDir::new().unwrap();
    wordrace(&dir)
        .arg("--policy")
        .arg("alphabetical")
        .assert()
        .failure();
}
