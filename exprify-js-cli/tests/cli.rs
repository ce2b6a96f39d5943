use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn exprify_js_cli() -> Command {
  let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("exprify-js-cli");
  cmd.timeout(Duration::from_secs(5));
  cmd
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
  String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

fn stderr_of(assert: &assert_cmd::assert::Assert) -> String {
  String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

#[test]
fn rewrites_stdin_to_stdout() {
  let assert = exprify_js_cli()
    .write_stdin("let x = 1;\nif (x) { y = 2 }\n")
    .assert()
    .success()
    .code(0);
  assert_eq!(stdout_of(&assert), "x = 1;\ny = x ? 2 : y;\n");
  assert!(
    assert.get_output().stderr.is_empty(),
    "expected stderr to be empty, got: {}",
    stderr_of(&assert)
  );
}

#[test]
fn reports_syntax_errors_with_their_position() {
  let assert = exprify_js_cli()
    .write_stdin("let a = 1;\nif (a {\n")
    .assert()
    .failure()
    .code(1);
  assert!(assert.get_output().stdout.is_empty());
  let stderr = stderr_of(&assert);
  assert!(stderr.starts_with("error: <stdin>:2:"), "got: {stderr}");
  assert!(stderr.contains("syntax error"), "got: {stderr}");
}

#[test]
fn rewrites_the_example_program() {
  let assert = exprify_js_cli().arg("--example").assert().success();
  let stdout = stdout_of(&assert);
  assert!(
    stdout.contains("for (i = 0; i < str.length; len++, i++) {}"),
    "got: {stdout}"
  );
  assert!(
    stdout.contains("arr[mid] < target ? (l = mid + 1) : (r = mid - 1);"),
    "got: {stdout}"
  );
}

#[test]
fn reads_and_writes_files() {
  let dir = tempdir().unwrap();
  let input = dir.path().join("in.js");
  let output = dir.path().join("out.js");
  fs::write(&input, "do { a(); } while (b());").unwrap();

  let assert = exprify_js_cli()
    .arg("--input")
    .arg(&input)
    .arg("--output")
    .arg(&output)
    .arg("--format")
    .arg("minified")
    .assert()
    .success();
  assert!(assert.get_output().stdout.is_empty());
  assert_eq!(fs::read_to_string(&output).unwrap(), "while(a(),b());");
}

#[test]
fn store_holds_the_buffer_between_runs() {
  let dir = tempdir().unwrap();
  let store = dir.path().join("buffer.json");
  fs::write(&store, r#"{"code": "if (a) { x = 1 } else { x = 2 }"}"#).unwrap();

  let first = exprify_js_cli().arg("--store").arg(&store).assert().success();
  assert_eq!(stdout_of(&first), "a ? (x = 1) : (x = 2);");
  let saved: Value = serde_json::from_str(&fs::read_to_string(&store).unwrap()).unwrap();
  assert_eq!(saved["code"], "a ? (x = 1) : (x = 2);");

  let second = exprify_js_cli().arg("--store").arg(&store).assert().success();
  assert_eq!(stdout_of(&second), "x = a ? 1 : 2;");
}

#[test]
fn empty_store_starts_with_the_example_program() {
  let dir = tempdir().unwrap();
  let store = dir.path().join("buffer.json");

  let assert = exprify_js_cli().arg("--store").arg(&store).assert().success();
  let stdout = stdout_of(&assert);
  assert!(stdout.starts_with("function strlen(str) {\n  len = 0;\n"), "got: {stdout}");
  let saved: Value = serde_json::from_str(&fs::read_to_string(&store).unwrap()).unwrap();
  assert_eq!(saved["code"], stdout.as_str());
}

#[test]
fn invalid_store_is_an_error() {
  let dir = tempdir().unwrap();
  let store = dir.path().join("buffer.json");
  fs::write(&store, "[1, 2]").unwrap();

  let assert = exprify_js_cli().arg("--store").arg(&store).assert().failure().code(1);
  assert!(stderr_of(&assert).contains("is not a JSON object of strings"));
}

#[test]
fn rules_and_config_select_the_rewrites() {
  let assert = exprify_js_cli()
    .arg("--rules")
    .arg("var-decl")
    .write_stdin("let a = 1;\nif (a) { b = 2 }")
    .assert()
    .success();
  assert_eq!(stdout_of(&assert), "a = 1;\nif (a) { b = 2 }");

  let assert = exprify_js_cli()
    .arg("--rules")
    .arg("var-decl,unrolling")
    .write_stdin("let a = 1;")
    .assert()
    .failure()
    .code(1);
  assert!(stderr_of(&assert).contains("unknown rule `unrolling`"));

  let dir = tempdir().unwrap();
  let config = dir.path().join("exprify.json");
  fs::write(
    &config,
    r#"{"rules": ["while"], "while_form": "sequence", "emit": "minified"}"#,
  )
  .unwrap();
  let assert = exprify_js_cli()
    .arg("--config")
    .arg(&config)
    .arg("--format")
    .arg("preserve")
    .write_stdin("let i = 0;\nwhile (i < 3) { i++; }")
    .assert()
    .success();
  assert_eq!(stdout_of(&assert), "let i = 0;\nwhile (i++, i < 3) {}");

  fs::write(&config, r#"{"rulez": []}"#).unwrap();
  let assert = exprify_js_cli()
    .arg("--config")
    .arg(&config)
    .write_stdin("")
    .assert()
    .failure()
    .code(1);
  assert!(stderr_of(&assert).contains("invalid config"));
}

#[test]
fn prints_stats_and_logs_to_stderr() {
  let assert = exprify_js_cli()
    .arg("--stats")
    .write_stdin("let a = 1;")
    .assert()
    .success();
  let stats: Value = serde_json::from_str(stderr_of(&assert).trim()).unwrap();
  assert_eq!(stats["passes"], 1);
  assert_eq!(stats["rules"]["var-decl"]["applied"], 1);

  let assert = exprify_js_cli()
    .arg("--verbose")
    .write_stdin("if (a) { x = 1; y = 2; }")
    .assert()
    .success();
  let stderr = stderr_of(&assert);
  assert!(
    stderr.contains("cannot transform if assignment statement"),
    "got: {stderr}"
  );

  let assert = exprify_js_cli()
    .arg("--log-json")
    .write_stdin("if (a) { x = 1; y = 2; }")
    .assert()
    .success();
  let first_line = stderr_of(&assert).lines().next().unwrap_or_default().to_string();
  let event: Value = serde_json::from_str(&first_line).unwrap();
  assert_eq!(event["level"], "DEBUG");
}
