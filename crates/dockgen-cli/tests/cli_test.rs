use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const TEMPLATE: &str = r#"FROM ruby:3.0
{% if maintainer %}
LABEL maintainer="{{ maintainer }}"
{% endif %}
WORKDIR /app
COPY . /app
RUN bundle install
CMD [{{ startup_command | to_cmd_list }}]
"#;

fn dockgen() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("dockgen");
    for var in [
        "DOCKGEN_CONFIG",
        "DOCKGEN_TEMPLATE_DIR",
        "DOCKGEN_TEMPLATE",
        "DOCKGEN_OUTPUT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Lay out `project.yaml` and `templates/Dockerfile.j2` the way the defaults expect.
fn project(dir: &Path, document: &str) {
    std::fs::write(dir.join("project.yaml"), document).unwrap();
    std::fs::create_dir_all(dir.join("templates")).unwrap();
    std::fs::write(dir.join("templates/Dockerfile.j2"), TEMPLATE).unwrap();
}

const SAMPLE: &str = "name: MyAwesomeService\nstartup_command: \"rails server\"\nmaintainer: John Doe\n";

// ── Help / Version ──

#[test]
fn shows_help() {
    dockgen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Render a Dockerfile"));
}

#[test]
fn shows_version() {
    dockgen()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dockgen"));
}

// ── Rendering with defaults ──

#[test]
fn renders_dockerfile_with_defaults() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), SAMPLE);

    dockgen()
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dockerfile created at: Dockerfile"));

    let dockerfile = std::fs::read_to_string(tmp.path().join("Dockerfile")).unwrap();
    assert_eq!(
        dockerfile,
        "FROM ruby:3.0\n\
         LABEL maintainer=\"John Doe\"\n\
         WORKDIR /app\n\
         COPY . /app\n\
         RUN bundle install\n\
         CMD [\"rails\", \"server\"]\n"
    );
}

#[test]
fn maintainer_defaults_to_teammate() {
    let tmp = TempDir::new().unwrap();
    project(
        tmp.path(),
        "name: api\nstartup_command: python app.py\n",
    );

    dockgen().current_dir(tmp.path()).assert().success();

    let dockerfile = std::fs::read_to_string(tmp.path().join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("LABEL maintainer=\"Your teammate\""));
    assert!(dockerfile.contains("CMD [\"python\", \"app.py\"]"));
}

#[test]
fn overwrites_existing_dockerfile() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), SAMPLE);
    std::fs::write(tmp.path().join("Dockerfile"), "FROM stale\n".repeat(20)).unwrap();

    dockgen().current_dir(tmp.path()).assert().success();

    let dockerfile = std::fs::read_to_string(tmp.path().join("Dockerfile")).unwrap();
    assert!(!dockerfile.contains("stale"));
    assert!(dockerfile.starts_with("FROM ruby:3.0\n"));
}

// ── Options ──

#[test]
fn custom_paths() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    std::fs::write(dir.join("service.toml"), "name = \"svc\"\nstartup_command = \"npm start\"\n")
        .unwrap();
    std::fs::create_dir(dir.join("tpl")).unwrap();
    std::fs::write(dir.join("tpl/node.j2"), "FROM node\nCMD [{{ startup_command | to_cmd_list }}]\n")
        .unwrap();
    std::fs::create_dir(dir.join("out")).unwrap();

    dockgen()
        .current_dir(dir)
        .args([
            "--config",
            "service.toml",
            "--template-dir",
            "tpl",
            "--template",
            "node.j2",
            "--output",
            "out/Dockerfile.node",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("out/Dockerfile.node"));

    let dockerfile = std::fs::read_to_string(dir.join("out/Dockerfile.node")).unwrap();
    assert_eq!(dockerfile, "FROM node\nCMD [\"npm\", \"start\"]\n");
}

#[test]
fn stdout_flag_prints_without_writing() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), SAMPLE);

    dockgen()
        .current_dir(tmp.path())
        .arg("--stdout")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("CMD [\"rails\", \"server\"]\n"));

    assert!(!tmp.path().join("Dockerfile").exists());
}

#[test]
fn stdout_flag_wins_over_output_from_environment() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), SAMPLE);

    dockgen()
        .current_dir(tmp.path())
        .env("DOCKGEN_OUTPUT", "Dockerfile.env")
        .arg("--stdout")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("FROM ruby:3.0\n"))
        .stdout(predicate::str::contains("Dockerfile created at").not());

    assert!(!tmp.path().join("Dockerfile.env").exists());
    assert!(!tmp.path().join("Dockerfile").exists());
}

#[test]
fn options_read_from_environment() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), SAMPLE);
    std::fs::rename(
        tmp.path().join("project.yaml"),
        tmp.path().join("other.yaml"),
    )
    .unwrap();

    dockgen()
        .current_dir(tmp.path())
        .env("DOCKGEN_CONFIG", "other.yaml")
        .env("DOCKGEN_OUTPUT", "Dockerfile.env")
        .assert()
        .success();

    assert!(tmp.path().join("Dockerfile.env").exists());
}

// ── Failures ──

#[test]
fn missing_project_document_fails() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), SAMPLE);
    std::fs::remove_file(tmp.path().join("project.yaml")).unwrap();

    dockgen()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load project document"))
        .stderr(predicate::str::contains("not found"));

    assert!(!tmp.path().join("Dockerfile").exists());
}

#[test]
fn malformed_project_document_fails() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "name: [unclosed\n");

    dockgen()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse YAML"));

    assert!(!tmp.path().join("Dockerfile").exists());
}

#[test]
fn missing_template_fails() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), SAMPLE);

    dockgen()
        .current_dir(tmp.path())
        .args(["--template", "Missing.j2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load template"))
        .stderr(predicate::str::contains("Missing.j2"));

    assert!(!tmp.path().join("Dockerfile").exists());
}

#[test]
fn unterminated_quote_fails_and_keeps_previous_output() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "name: svc\nstartup_command: 'rails \"server'\n");
    std::fs::write(tmp.path().join("Dockerfile"), "FROM previous\n").unwrap();

    dockgen()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to render template"))
        .stderr(predicate::str::contains("unterminated double quote"));

    let dockerfile = std::fs::read_to_string(tmp.path().join("Dockerfile")).unwrap();
    assert_eq!(dockerfile, "FROM previous\n");
}

#[test]
fn list_valued_command_fails() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "startup_command: [rails, server]\n");

    dockgen()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "failed to read template values from project.yaml",
        ))
        .stderr(predicate::str::contains("startup_command"));
}
