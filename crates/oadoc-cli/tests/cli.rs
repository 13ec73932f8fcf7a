use std::fs;
use std::process::Command;

use oadoc_core::PageContainer;
use oadoc_core::ir::PageKind;
use predicates::prelude::*;
use tempfile::TempDir;

const API: &str = r#"openapi: 3.0.3
info:
  title: Tiny API
  version: "1.0"
tags:
  - name: pets
paths:
  /pets:
    get:
      tags: [pets]
      summary: List pets
      parameters:
        - name: limit
          in: query
          schema:
            type: integer
      responses:
        "200":
          description: A list of pets
"#;

const BROKEN_REF: &str = r##"{
  "openapi": "3.0.3",
  "info": { "title": "Broken" },
  "tags": [{ "name": "t" }],
  "paths": {
    "/x": {
      "post": {
        "tags": ["t"],
        "requestBody": { "$ref": "#/components/requestBodies/Missing" }
      }
    }
  }
}"##;

fn cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_oadoc")));
    cmd.current_dir(dir.path());
    cmd
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("api.yaml"), API).unwrap();
    dir
}

#[test]
fn cli_build_to_stdout() {
    let dir = workspace();
    let output = cmd(&dir)
        .args(["build", "-i", "api.yaml"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let page: PageContainer = serde_json::from_slice(&output).unwrap();
    assert_eq!(page.page.kind, PageKind::Overview);
    assert_eq!(page.page.slug, "tiny-api");
}

#[test]
fn cli_build_from_stdin_as_yaml() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["build", "--format", "yaml"])
        .write_stdin(r#"{ "summary": "Ping", "method": "head" }"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("kind: operation"))
        .stdout(predicate::str::contains("method: HEAD"));
}

#[test]
fn cli_build_to_file() {
    let dir = workspace();
    cmd(&dir)
        .args(["build", "-i", "api.yaml", "-o", "out/page.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Wrote out/page.json"));

    let content = fs::read_to_string(dir.path().join("out/page.json")).unwrap();
    let page: PageContainer = serde_json::from_str(&content).unwrap();
    assert_eq!(page.page.title, "Tiny API");
}

#[test]
fn cli_render_from_stdin() {
    let dir = workspace();
    let page = cmd(&dir)
        .args(["build", "-i", "api.yaml"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    cmd(&dir)
        .args(["render", "--theme", "markdown"])
        .write_stdin(page)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Tiny API (1.0)\n"))
        .stdout(predicate::str::contains("### List pets"))
        .stdout(predicate::str::contains("| 200 | A list of pets |"));
}

#[test]
fn cli_generate_html_to_file() {
    let dir = workspace();
    cmd(&dir)
        .args(["generate", "-i", "api.yaml", "--theme", "html", "-o", "api.html"])
        .assert()
        .success();

    let html = fs::read_to_string(dir.path().join("api.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h2>pets</h2>"));
}

#[test]
fn cli_generate_with_template_dir() {
    let dir = workspace();
    let templates = dir.path().join("templates");
    fs::create_dir(&templates).unwrap();
    fs::write(templates.join("index.j2"), "{{ page.title|uppercase }}").unwrap();

    cmd(&dir)
        .args(["generate", "-i", "api.yaml", "-t", "templates"])
        .assert()
        .success()
        .stdout("TINY API");
}

#[test]
fn cli_generate_uses_config() {
    let dir = workspace();
    fs::write(
        dir.path().join(".oadoc.yaml"),
        "input: api.yaml\ntheme: html\n",
    )
    .unwrap();

    cmd(&dir)
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("<title>Tiny API</title>"));
}

#[test]
fn cli_strict_refs_from_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.json"), BROKEN_REF).unwrap();

    cmd(&dir)
        .args(["build", "-i", "broken.json"])
        .assert()
        .success();

    fs::write(
        dir.path().join(".oadoc.yaml"),
        "transform:\n  unresolved_refs: error\n",
    )
    .unwrap();

    cmd(&dir)
        .args(["build", "-i", "broken.json"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "reference target not found: #/components/requestBodies/Missing",
        ));
}

#[test]
fn cli_rejects_non_object_input() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("build")
        .write_stdin("- just\n- a list\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("expected an object at the top level"));
}

#[test]
fn cli_missing_input_file() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["build", "-i", "nope.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read nope.yaml"));
}

#[test]
fn cli_missing_template_dir() {
    let dir = workspace();
    cmd(&dir)
        .args(["generate", "-i", "api.yaml", "-t", "no-such-dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("template directory not found"));
}

#[test]
fn cli_init() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("Created .oadoc.yaml"));
    assert!(dir.path().join(".oadoc.yaml").exists());

    cmd(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cmd(&dir).args(["init", "--force"]).assert().success();
}

#[test]
fn cli_completions() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("oadoc"));
}
