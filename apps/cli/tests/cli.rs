//! End-to-end tests for the `quizlet` commands, run against scratch files.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use pretty_assertions::assert_eq;
use quizlet_cli::config::Config;
use quizlet_cli::text::{TextError, DEMO_DOCUMENT, NEW_DOCUMENT};
use quizlet_cli::{execute, Cli, Status};
use tempfile::TempDir;

const HELLO: &str = "#group g1\n你好\nni3 hao3\nhello\n#endgroup\n#showgroup g1 reading\n";

fn run(args: &[&str]) -> (anyhow::Result<Status>, String) {
    let cli = Cli::try_parse_from(std::iter::once("quizlet").chain(args.iter().copied()))
        .expect("valid arguments");
    let mut out = Vec::new();
    let result = execute(cli, &Config::default(), &mut out);
    (result, String::from_utf8(out).expect("utf-8 output"))
}

fn write_doc(dir: &TempDir, name: &str, text: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn render_prints_listing() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "hello.txt", HELLO);

    let (result, out) = run(&["render", &file]);
    assert_eq!(result.unwrap(), Status::Clean);
    assert_eq!(out, "你好\tnǐ hǎo: hello\n");
}

#[test]
fn render_handles_windows_line_endings() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "hello.txt", &HELLO.replace('\n', "\r\n"));

    let (result, out) = run(&["render", &file]);
    assert_eq!(result.unwrap(), Status::Clean);
    assert_eq!(out, "你好\tnǐ hǎo: hello\n");
}

#[test]
fn render_reports_first_error() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "broken.txt", "#showgroup missing reading\n#bogus\n");

    let (result, out) = run(&["render", &file]);
    assert_eq!(result.unwrap(), Status::DocumentError);
    assert_eq!(
        out,
        "Error on line 1: group does not exist: missing\n\n#showgroup missing reading\n"
    );
}

#[test]
fn render_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.txt");

    let (result, out) = run(&["render", &missing.to_string_lossy()]);
    let error = result.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<TextError>(),
        Some(TextError::NotFound(path)) if path == &missing
    ));
    assert!(out.is_empty());
}

#[test]
fn render_to_output_file() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "hello.txt", HELLO);
    let listing = dir.path().join("listing.tsv");

    let (result, out) = run(&["render", &file, "--output", &listing.to_string_lossy()]);
    assert_eq!(result.unwrap(), Status::Clean);
    assert!(out.is_empty());
    assert_eq!(fs::read_to_string(&listing).unwrap(), "你好\tnǐ hǎo: hello\n");
}

#[test]
fn render_error_does_not_write_output_file() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "open.txt", "#group g1\n");
    let listing = dir.path().join("listing.tsv");

    let (result, out) = run(&["render", &file, "--output", &listing.to_string_lossy()]);
    assert_eq!(result.unwrap(), Status::DocumentError);
    assert_eq!(out, "Error on line 2: group not closed\n\n#endfile\n");
    assert!(!listing.exists());
}

#[test]
fn render_json_success() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "hello.txt", HELLO);

    let (result, out) = run(&["render", &file, "--json"]);
    assert_eq!(result.unwrap(), Status::Clean);

    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["ok"], true);
    assert_eq!(report["output"], "你好\tnǐ hǎo: hello\n");
    assert_eq!(report["groups"][0]["name"], "g1");
    assert_eq!(report["groups"][0]["terms"][0]["reading"], "nǐ hǎo");
    assert!(report.get("error").is_none());
}

#[test]
fn render_json_error() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "broken.txt", "#group g1\na\nb\n#endgroup\n");

    let (result, out) = run(&["render", &file, "--json"]);
    assert_eq!(result.unwrap(), Status::DocumentError);

    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["ok"], false);
    assert_eq!(report["error"]["line"], 4);
    assert_eq!(report["error"]["raw"], "#endgroup");
    assert!(report["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("group contains an incomplete term"));
    assert!(report.get("output").is_none());
}

#[test]
fn new_appends_extension_and_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("lesson1");
    let expected = dir.path().join("lesson1.txt");

    let (result, out) = run(&["new", &target.to_string_lossy()]);
    assert_eq!(result.unwrap(), Status::Clean);
    assert_eq!(out.trim_end(), expected.to_string_lossy());
    assert_eq!(fs::read_to_string(&expected).unwrap(), NEW_DOCUMENT);

    fs::write(&expected, "keep me").unwrap();
    let (result, _) = run(&["new", &target.to_string_lossy()]);
    assert!(matches!(
        result.unwrap_err().downcast_ref::<TextError>(),
        Some(TextError::AlreadyExists(_))
    ));
    assert_eq!(fs::read_to_string(&expected).unwrap(), "keep me");

    let (result, _) = run(&["new", &target.to_string_lossy(), "--force"]);
    assert_eq!(result.unwrap(), Status::Clean);
    assert_eq!(fs::read_to_string(Path::new(&expected)).unwrap(), NEW_DOCUMENT);
}

#[test]
fn demo_prints_document_and_listing() {
    let (result, out) = run(&["demo"]);
    assert_eq!(result.unwrap(), Status::Clean);
    assert!(out.starts_with(DEMO_DOCUMENT));
    assert!(out.contains("你好\tnǐ hǎo: hello\n"));
    assert!(out.contains("green\tlǜsè: 绿色\n"));
    assert!(!out.contains("Error on line"));
}

/// Writer whose reader has gone away, like stdout piped into `head -1`.
struct ClosedPipe {
    attempts: usize,
}

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        self.attempts += 1;
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

#[test]
fn watch_ends_when_output_is_closed() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "hello.txt", HELLO);
    let cli = Cli::try_parse_from(["quizlet", "watch", file.as_str()]).unwrap();

    let mut out = ClosedPipe { attempts: 0 };
    let error = execute(cli, &Config::default(), &mut out).unwrap_err();

    assert_eq!(
        error.downcast_ref::<io::Error>().map(io::Error::kind),
        Some(io::ErrorKind::BrokenPipe)
    );
    assert_eq!(out.attempts, 1);
}
