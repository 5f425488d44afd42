//! CLI integration tests
//!
//! Run the built `transback` binary against files in a temporary directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn transback(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_transback"))
        .current_dir(dir)
        .env_remove("OPENROUTER_API_KEY")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_diff_writes_page_with_both_directions() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("original.txt"), "the cat sat").unwrap();
    fs::write(temp_dir.path().join("back.txt"), "the dog sat").unwrap();

    let output = transback(
        temp_dir.path(),
        &["diff", "original.txt", "back.txt", "-o", "page.html"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let page = fs::read_to_string(temp_dir.path().join("page.html")).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains(
        r#"the <span class="diff-word"><span class="diff-word">cat</span></span> sat"#
    ));
    assert!(page.contains(
        r#"the <span class="diff-word"><span class="diff-word">dog</span></span> sat"#
    ));
    assert!(stdout(&output).contains("1/3 words marked"));
}

#[test]
fn test_diff_json_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "a b").unwrap();
    fs::write(temp_dir.path().join("b.txt"), "a b c").unwrap();

    let output = transback(temp_dir.path(), &["diff", "a.txt", "b.txt", "--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["original"]["markup"], "a b");
    assert_eq!(json["original"]["statistics"]["mismatched_words"], 0);
    assert_eq!(json["back_translated"]["statistics"]["mismatched_words"], 1);
}

#[test]
fn test_diff_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = transback(temp_dir.path(), &["diff", "nope.txt", "nope.txt"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read nope.txt"));
}

#[test]
fn test_replay_drives_view_to_completion() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("original.txt"), "Szia világ").unwrap();
    fs::write(
        temp_dir.path().join("stream.txt"),
        concat!(
            "event: translated\r\ndata: {\"translated\":\"Hello world\"}\r\n\r\n",
            "event: bogus\ndata: {}\n\n",
            "event: back_translated\ndata: {\"back_translated\":\"Szia világ\"}\n\n",
            "event: review\ndata: {\"review\":\"Same meaning.\"}\n\n",
            "event: complete\ndata: {}",
        ),
    )
    .unwrap();

    let output = transback(
        temp_dir.path(),
        &[
            "replay",
            "stream.txt",
            "--original",
            "original.txt",
            "--chunk-size",
            "3",
            "-o",
            "view.json",
        ],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let out = stdout(&output);
    assert!(out.contains("translate       done"));
    assert!(out.contains("back-translate  done"));
    assert!(out.contains("review          done"));
    assert!(out.contains("1 malformed block(s) skipped"));

    let view: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("view.json")).unwrap())
            .unwrap();
    assert_eq!(view["translated"], "Hello world");
    assert_eq!(view["highlight"]["original"]["markup"], "Szia világ");
    assert_eq!(view["review_text"], "Same meaning.");
}

#[test]
fn test_replay_error_fails_working_step() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("original.txt"), "x").unwrap();
    fs::write(
        temp_dir.path().join("stream.txt"),
        "event: translated\ndata: {\"translated\":\"y\"}\n\nevent: error\ndata: {\"error\":\"boom\"}\n\n",
    )
    .unwrap();

    let output = transback(
        temp_dir.path(),
        &["replay", "stream.txt", "--original", "original.txt"],
    );
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("translate       done"));
    assert!(out.contains("back-translate  failed"));
    assert!(out.contains("review          idle"));
    assert!(out.contains("error: boom"));
}

#[test]
fn test_replay_rejects_zero_chunk_size() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("original.txt"), "x").unwrap();
    fs::write(temp_dir.path().join("stream.txt"), "").unwrap();

    let output = transback(
        temp_dir.path(),
        &["replay", "stream.txt", "--original", "original.txt", "--chunk-size", "0"],
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_translate_without_api_key_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("input.txt"), "hello").unwrap();

    let output = transback(temp_dir.path(), &["translate", "input.txt", "out.txt"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("OPENROUTER_API_KEY"));
    assert!(!temp_dir.path().join("out.txt").exists());
}
