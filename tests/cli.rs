//! End-to-end tests: runs the compiled binary against the fixture schema.
//!
//! The expected registry in `fixtures/expected_registry.json` was produced by
//! the previous build script from the same schema; builds must keep matching
//! it byte for byte so already-uploaded identifiers stay valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Temp working directory holding a copy of `fixtures/schema.json`.
fn workdir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::copy(fixtures_dir().join("schema.json"), tmp.path().join("schema.json")).unwrap();
    tmp
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_drill-site"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run drill-site")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

#[test]
fn build_writes_pages_and_registry() {
    let tmp = workdir();
    let out = run(tmp.path(), &["build"]);
    assert_success(&out);

    let dist = tmp.path().join("dist");
    for page in ["Sounds.html", "Verbs.html", "Phrases.html", "App.html", "index.html"] {
        assert!(dist.join(page).is_file(), "{page} missing");
    }

    let registry = fs::read_to_string(tmp.path().join("drill_registry.json")).unwrap();
    let expected = fs::read_to_string(fixtures_dir().join("expected_registry.json")).unwrap();
    assert_eq!(registry, expected);

    assert!(stdout(&out).contains("30 identifiers generated (seed: fixture-seed)"));
}

#[test]
fn build_is_the_default_command() {
    let tmp = workdir();
    assert_success(&run(tmp.path(), &[]));
    assert!(tmp.path().join("drill_registry.json").is_file());
}

#[test]
fn rebuild_is_byte_identical() {
    let tmp = workdir();
    assert_success(&run(tmp.path(), &["build"]));
    let first = fs::read(tmp.path().join("drill_registry.json")).unwrap();
    let first_page = fs::read(tmp.path().join("dist/Sounds.html")).unwrap();

    assert_success(&run(tmp.path(), &["build"]));
    assert_eq!(fs::read(tmp.path().join("drill_registry.json")).unwrap(), first);
    assert_eq!(fs::read(tmp.path().join("dist/Sounds.html")).unwrap(), first_page);
}

#[test]
fn rebuild_replaces_previous_registry() {
    let tmp = workdir();
    fs::write(
        tmp.path().join("drill_registry.json"),
        r#"{"00000000-0000-0000-0000-000000000001": ["Old", "Old", "Old", 1]}"#,
    )
    .unwrap();

    assert_success(&run(tmp.path(), &["build"]));
    let registry = fs::read_to_string(tmp.path().join("drill_registry.json")).unwrap();
    assert!(!registry.contains("00000000-0000-0000-0000-000000000001"));
}

#[test]
fn list_page_links_levels_to_app() {
    let tmp = workdir();
    assert_success(&run(tmp.path(), &["build"]));
    let html = fs::read_to_string(tmp.path().join("dist/Sounds.html")).unwrap();
    assert!(html.contains(r#"href="App.html?uid=e16c5b1d-ab3d-5d5b-9350-05f4e58ec670""#));
}

#[test]
fn missing_schema_fails_without_output() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["build"]);

    assert!(!out.status.success());
    assert!(stderr(&out).contains("Schema file not found: schema.json"));
    assert!(!tmp.path().join("dist").exists());
    assert!(!tmp.path().join("drill_registry.json").exists());
}

#[test]
fn incomplete_schema_fails_without_output() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("schema.json"),
        r#"{"pages": [{"title": "Sounds", "sections": [{"heading": "Vowels"}]}]}"#,
    )
    .unwrap();
    let out = run(tmp.path(), &["build"]);

    assert!(!out.status.success());
    assert!(stderr(&out).contains("lessons"));
    assert!(!tmp.path().join("dist").exists());
    assert!(!tmp.path().join("drill_registry.json").exists());
}

#[test]
fn flags_override_paths() {
    let tmp = workdir();
    fs::rename(tmp.path().join("schema.json"), tmp.path().join("course.json")).unwrap();
    let out = run(
        tmp.path(),
        &[
            "build",
            "--schema",
            "course.json",
            "--output",
            "public",
            "--registry",
            "api/registry.json",
        ],
    );
    assert_success(&out);
    assert!(tmp.path().join("public/index.html").is_file());
    assert!(tmp.path().join("api/registry.json").is_file());
}

#[test]
fn drill_toml_is_picked_up() {
    let tmp = workdir();
    fs::write(
        tmp.path().join("drill.toml"),
        r#"
[output]
dir = "site"
curriculum_json = true
"#,
    )
    .unwrap();
    assert_success(&run(tmp.path(), &["build"]));
    assert!(tmp.path().join("site/Verbs.html").is_file());
    assert!(tmp.path().join("site/curriculum.json").is_file());
}

#[test]
fn invalid_drill_toml_is_rejected() {
    let tmp = workdir();
    fs::write(tmp.path().join("drill.toml"), "outptu = 1\n").unwrap();
    let out = run(tmp.path(), &["build"]);
    assert!(!out.status.success());
    assert!(!tmp.path().join("drill_registry.json").exists());
}

// ---------------------------------------------------------------------------
// check / lookup / diff / gen-config
// ---------------------------------------------------------------------------

#[test]
fn check_lists_identifiers_and_writes_nothing() {
    let tmp = workdir();
    let out = run(tmp.path(), &["check"]);
    assert_success(&out);

    let text = stdout(&out);
    assert!(text.contains("Level 1: e16c5b1d-ab3d-5d5b-9350-05f4e58ec670"));
    assert!(text.contains("Schema is valid: 10 lessons, 30 identifiers"));
    assert!(!tmp.path().join("dist").exists());
    assert!(!tmp.path().join("drill_registry.json").exists());
}

#[test]
fn lookup_resolves_identifier() {
    let tmp = workdir();
    assert_success(&run(tmp.path(), &["build"]));

    let out = run(tmp.path(), &["lookup", "dcc5d6f3-4625-5d9a-9637-8f31217e224c"]);
    assert_success(&out);
    assert!(stdout(&out).contains("Sounds \u{203a} Vowels \u{203a} Short A \u{203a} Level 2"));
}

#[test]
fn lookup_unknown_identifier_fails() {
    let tmp = workdir();
    assert_success(&run(tmp.path(), &["build"]));

    let out = run(tmp.path(), &["lookup", "00000000-0000-0000-0000-000000000000"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("is not in drill_registry.json"));
}

#[test]
fn diff_reports_renamed_lesson() {
    let tmp = workdir();
    assert_success(&run(tmp.path(), &["build"]));

    let schema_path = tmp.path().join("schema.json");
    let schema = fs::read_to_string(&schema_path).unwrap();
    fs::write(&schema_path, schema.replace("\"Rolled R\"", "\"Trilled R\"")).unwrap();

    let out = run(tmp.path(), &["diff"]);
    assert_success(&out);
    let text = stdout(&out);
    assert!(text.contains("Consonants \u{203a} Trilled R \u{203a} Level 1"));
    assert!(text.contains("3 added, 3 removed, 0 moved"));
}

#[test]
fn diff_after_build_is_clean() {
    let tmp = workdir();
    assert_success(&run(tmp.path(), &["build"]));
    let out = run(tmp.path(), &["diff"]);
    assert_success(&out);
    assert!(stdout(&out).contains("Registry is up to date"));
}

#[test]
fn gen_config_prints_parseable_defaults() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["gen-config"]);
    assert_success(&out);

    let config: drill_site::config::BuildConfig = toml::from_str(&stdout(&out)).unwrap();
    assert_eq!(config.schema, PathBuf::from("schema.json"));
}
