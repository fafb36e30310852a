//! CLI tests — argument parsing and command output against a temp data dir.

mod common;

use std::path::Path;

use clap::Parser;

use common::assert_error_contains;
use home_library::interface::cli::{run, Cli};
use home_library::infra::json_store::JsonBookRepository;

fn exec(dir: &Path, args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["home-library", "--data-dir", dir.to_str().unwrap()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv)?;
    let mut out = Vec::new();
    run(cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn first_id(dir: &Path) -> String {
    let json = exec(dir, &["list", "--format", "json"]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    parsed[0]["id"].as_str().unwrap().to_string()
}

#[test]
fn add_then_list_text() {
    let dir = tempfile::tempdir().unwrap();

    let msg = exec(
        dir.path(),
        &["add", "--title", "Krakatit", "--author", "Karel Čapek", "--rating", "4", "--status", "done"],
    )
    .unwrap();
    assert!(msg.starts_with("Kniha přidána. (book_"));

    let out = exec(dir.path(), &["list"]).unwrap();
    assert!(out.starts_with("Počet knih: 1\n"));
    assert!(out.contains("Karel Čapek • — • 4/5"));
    assert!(out.contains("[Dočteno]"));
    assert!(JsonBookRepository::in_dir(dir.path()).path().exists());
}

#[test]
fn list_on_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let out = exec(dir.path(), &["list"]).unwrap();
    assert_eq!(out, "Zatím tu nejsou žádné knihy.\n");
}

#[test]
fn list_filters_and_sorts() {
    let dir = tempfile::tempdir().unwrap();
    exec(dir.path(), &["add", "--title", "Zápisník", "--author", "Nováková", "--rating", "4"]).unwrap();
    exec(dir.path(), &["add", "--title", "Amber", "--author", "Smith", "--rating", "5", "--genre", "fantasy"]).unwrap();

    let out = exec(dir.path(), &["list", "--sort", "rating_desc", "--format", "json"]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed[0]["title"], "Amber");
    assert_eq!(parsed[1]["title"], "Zápisník");

    let out = exec(dir.path(), &["list", "--genre", "fantasy", "--format", "json"]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);

    assert_eq!(exec(dir.path(), &["genres"]).unwrap(), "fantasy\n");
}

#[test]
fn invalid_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    assert_error_contains(
        exec(dir.path(), &["add", "--title", " ", "--author", "Anon"]),
        "title required",
    );
    assert_error_contains(
        exec(dir.path(), &["add", "--title", "T", "--author", "A", "--rating", "-1"]),
        "rating out of range",
    );
    assert_error_contains(
        exec(dir.path(), &["add", "--title", "T", "--author", "A", "--rating", "pět"]),
        "rating out of range",
    );
    assert!(!JsonBookRepository::in_dir(dir.path()).path().exists());
}

#[test]
fn unknown_sort_key_rejected_by_parser() {
    let dir = tempfile::tempdir().unwrap();
    assert!(exec(dir.path(), &["list", "--sort", "genre"]).is_err());
}

#[test]
fn update_show_and_remove() {
    let dir = tempfile::tempdir().unwrap();
    exec(dir.path(), &["add", "--title", "Babička", "--author", "Němcová"]).unwrap();
    let id = first_id(dir.path());

    let msg = exec(
        dir.path(),
        &["update", &id, "--title", "Babička", "--author", "Božena Němcová", "--status", "reading", "--rating", "5", "--note", "znovu"],
    )
    .unwrap();
    assert_eq!(msg, "Kniha upravena.\n");

    let shown = exec(dir.path(), &["show", &id]).unwrap();
    assert_eq!(
        shown,
        format!("Babička\n  Božena Němcová • — • 5/5\n  [Čtu]\n  „znovu“\n  id: {id}\n")
    );

    assert_eq!(exec(dir.path(), &["remove", &id]).unwrap(), "Kniha smazána.\n");
    assert_eq!(
        exec(dir.path(), &["show", &id]).unwrap(),
        format!("Kniha {id} nenalezena.\n")
    );
}

#[test]
fn unknown_ids_are_soft_not_found() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        exec(dir.path(), &["update", "book_x", "--title", "T", "--author", "A"]).unwrap(),
        "Kniha book_x nenalezena, nic se nezměnilo.\n"
    );
    assert_eq!(
        exec(dir.path(), &["remove", "book_x"]).unwrap(),
        "Kniha book_x nenalezena, nic se nezměnilo.\n"
    );
}

#[test]
fn export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    exec(dir.path(), &["add", "--title", "R.U.R.", "--author", "Karel Čapek"]).unwrap();
    let target = dir.path().join("out").join("books.txt");

    let msg = exec(
        dir.path(),
        &["export", "--format", "text", "--output", target.to_str().unwrap()],
    )
    .unwrap();
    assert!(msg.starts_with("Počet knih: 1 ("));

    let content = std::fs::read_to_string(&target).unwrap();
    assert!(content.contains("R.U.R.\n  Karel Čapek • — • 0/5\n  [Chci]\n"));
}

#[test]
fn schema_prints_json_schema() {
    let dir = tempfile::tempdir().unwrap();
    let out = exec(dir.path(), &["schema"]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(parsed.is_object());
    assert!(out.contains("\"rating\""));
    // schemaはカタログを開かない
    assert!(!JsonBookRepository::in_dir(dir.path()).path().exists());
}
