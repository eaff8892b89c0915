//! Unit tests for the CLI runtime with an injected configuration.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use rstest::{fixture, rstest};
use tempfile::TempDir;
use terrain_config::Config;

use super::*;


const FLUSH_RESOURCE: &str = "resource \"aws_instance\" \"web\" {\nami = \"abc\"\ntags = {\nName = \"web\"\n}\n}\n";

const REJECT_SECOND_LINE: &str = "cat >/dev/null\n\
printf 'Error: Invalid expression\\n\\n  on <stdin> line 2:\\n   2: b =\\n\\nExpected the start of an expression.\\n' >&2\n\
exit 1\n";

struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

pub(super) struct Outcome {
    pub(super) exit: ExitCode,
    pub(super) stdout: String,
    pub(super) stderr: String,
}

pub(super) fn run_cli(config: Config, args: &[&str]) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let loader = StaticConfigLoader { config };
    let arguments = std::iter::once("terrain")
        .chain(args.iter().copied())
        .map(OsString::from);
    let exit = {
        let mut io = IoStreams {
            stdout: &mut stdout,
            stderr: &mut stderr,
        };
        run_with_loader(arguments, &mut io, &loader)
    };
    Outcome {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}

/// Writes a shell checker script and returns a command line running it.
pub(super) fn checker_script(dir: &TempDir, body: &str) -> String {
    let script = dir.path().join("checker.sh");
    fs::write(&script, body).expect("write checker script");
    format!("sh {}", script.display())
}

pub(super) fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write source file");
    path
}

#[fixture]
fn workspace() -> TempDir {
    TempDir::new().expect("temp dir")
}

fn path_arg(path: &std::path::Path) -> String {
    path.display().to_string()
}

#[rstest]
fn indent_prints_the_reindented_file(workspace: TempDir) {
    let file = write_file(&workspace, "main.tf", FLUSH_RESOURCE);

    let outcome = run_cli(Config::default(), &["indent", path_arg(&file).as_str()]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(
        outcome.stdout,
        "resource \"aws_instance\" \"web\" {\n  ami = \"abc\"\n  tags = {\n    Name = \"web\"\n  }\n}\n"
    );
}

#[rstest]
fn indent_uses_the_configured_width(workspace: TempDir) {
    let file = write_file(&workspace, "main.tf", "locals {\nregion = \"eu\"\n}\n");
    let config = Config {
        indent_width: 4,
        ..Config::default()
    };

    let outcome = run_cli(config, &["indent", path_arg(&file).as_str()]);

    assert_eq!(outcome.stdout, "locals {\n    region = \"eu\"\n}\n");
}

#[rstest]
fn outline_lists_nested_definitions(workspace: TempDir) {
    let file = write_file(&workspace, "main.tf", FLUSH_RESOURCE);

    let outcome = run_cli(Config::default(), &["outline", path_arg(&file).as_str()]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(
        outcome.stdout,
        "block aws_instance web (line 1)\n  attribute ami (line 2)\n  attribute tags (line 3)\n"
    );
}

#[rstest]
fn outline_json_is_machine_readable(workspace: TempDir) {
    let file = write_file(&workspace, "main.tf", FLUSH_RESOURCE);

    let outcome = run_cli(Config::default(), &["outline", path_arg(&file).as_str(), "--json"]);

    let value: serde_json::Value = serde_json::from_str(&outcome.stdout).expect("json");
    let first = value.get(0).expect("first entry");
    assert_eq!(first.get("kind").and_then(|v| v.as_str()), Some("block"));
    assert_eq!(
        first.get("name").and_then(|v| v.as_str()),
        Some("aws_instance web")
    );
    let children = first
        .get("children")
        .and_then(|v| v.as_array())
        .expect("children");
    assert_eq!(children.len(), 2);
}

#[rstest]
fn check_prints_file_line_severity_message(workspace: TempDir) {
    let file = write_file(&workspace, "main.tf", "a = 1\nb =\n");
    let config = Config {
        checker_command: checker_script(&workspace, REJECT_SECOND_LINE),
        ..Config::default()
    };

    let outcome = run_cli(config, &["check", path_arg(&file).as_str()]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert_eq!(
        outcome.stdout,
        format!(
            "{}:2: error: Expected the start of an expression.\n",
            file.display()
        )
    );
}

#[rstest]
fn check_json_carries_ranges(workspace: TempDir) {
    let file = write_file(&workspace, "main.tf", "a = 1\nb =\n");
    let config = Config {
        checker_command: checker_script(&workspace, REJECT_SECOND_LINE),
        ..Config::default()
    };

    let outcome = run_cli(config, &["check", path_arg(&file).as_str(), "--json"]);

    let value: serde_json::Value = serde_json::from_str(&outcome.stdout).expect("json");
    let first = value.get(0).expect("diagnostic");
    assert_eq!(first.get("line").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(
        first
            .get("range")
            .and_then(|range| range.get("start"))
            .and_then(|v| v.as_u64()),
        Some(6)
    );
    assert_eq!(first.get("severity").and_then(|v| v.as_str()), Some("error"));
}

#[rstest]
fn clean_checks_succeed_silently(workspace: TempDir) {
    let file = write_file(&workspace, "main.tf", "a = 1\n");
    let config = Config {
        checker_command: checker_script(&workspace, "cat >/dev/null\n"),
        ..Config::default()
    };

    let outcome = run_cli(config, &["check", path_arg(&file).as_str()]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.is_empty());
}

#[rstest]
fn missing_checkers_are_reported_once(workspace: TempDir) {
    let file = write_file(&workspace, "main.tf", "a = 1\n");
    let config = Config {
        checker_command: "terrain-missing-checker -".into(),
        ..Config::default()
    };

    let outcome = run_cli(config, &["check", path_arg(&file).as_str()]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert_eq!(
        outcome.stderr,
        "checker executable 'terrain-missing-checker' not found\n"
    );
}

#[rstest]
fn unreadable_files_fail(workspace: TempDir) {
    let missing = workspace.path().join("absent.tf");

    let outcome = run_cli(Config::default(), &["outline", path_arg(&missing).as_str()]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.starts_with("failed to read"));
}

#[test]
fn help_goes_to_stdout() {
    let outcome = run_cli(Config::default(), &["--help"]);
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("indent"));
    assert!(outcome.stderr.is_empty());
}

#[test]
fn unknown_commands_are_usage_errors() {
    let outcome = run_cli(Config::default(), &["format", "main.tf"]);
    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("format"));
}
