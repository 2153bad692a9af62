//! End-to-end tests running the `simple-folio` binary against a copy of the
//! fixture content.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn copy_dir_recursive(src: &Path, dst: &Path) {
    std::fs::create_dir_all(dst).unwrap();
    for entry in std::fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir_recursive(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// A temp workspace holding `content/`, with `dist/` and `tmp/` beside it.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
        copy_dir_recursive(&fixtures, &dir.path().join("content"));
        Self { dir }
    }

    fn content(&self) -> PathBuf {
        self.dir.path().join("content")
    }

    fn dist(&self) -> PathBuf {
        self.dir.path().join("dist")
    }

    fn temp(&self) -> PathBuf {
        self.dir.path().join("tmp")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_simple-folio"))
            .args(args)
            .arg("--source")
            .arg(self.content())
            .arg("--output")
            .arg(self.dist())
            .arg("--temp-dir")
            .arg(self.temp())
            .output()
            .expect("failed to run simple-folio")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn fingerprinted(dir: &Path, ext: &str) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("site-") && name.ends_with(ext))
        .collect()
}

#[test]
fn build_writes_complete_site() {
    let ws = Workspace::new();
    let output = ws.run(&["build"]);
    assert!(output.status.success(), "build failed: {output:?}");

    let out = stdout(&output);
    assert!(out.contains("==> Stage 1: Scanning"));
    assert!(out.contains("==> Stage 2: Generating HTML"));
    assert!(out.contains("==> Build complete"));

    let dist = ws.dist();
    let html = std::fs::read_to_string(dist.join("index.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Ada"));
    assert!(html.contains(r#"id="about_me""#));
    assert!(html.contains(r#"id="skills""#));
    assert!(html.contains(r#"id="projects""#));
    assert!(html.contains("Analytical Engine"));
    assert!(!html.contains("testimonials"));

    let css = fingerprinted(&dist, ".css");
    let js = fingerprinted(&dist, ".js");
    assert_eq!(css.len(), 1);
    assert_eq!(js.len(), 1);
    assert!(html.contains(&css[0]));
    assert!(html.contains(&js[0]));

    assert!(dist.join("avatar.svg").is_file());
    assert!(dist.join("projects/engine.svg").is_file());
    assert!(ws.temp().join("manifest.json").is_file());
}

#[test]
fn build_report_matches_page() {
    let ws = Workspace::new();
    assert!(ws.run(&["build"]).status.success());

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(ws.dist().join("build.json")).unwrap())
            .unwrap();
    assert_eq!(report["page"], "index.html");
    let kinds: Vec<&str> = report["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["hero", "biography", "tech_list", "projects"]);
    assert_eq!(report["sections"][3]["items"], 4);
}

#[test]
fn scan_then_generate_matches_build() {
    let ws = Workspace::new();
    let scan = ws.run(&["scan"]);
    assert!(scan.status.success(), "scan failed: {scan:?}");
    assert!(stdout(&scan).contains("004 Projects #projects (4 projects)"));

    let manifest: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(ws.temp().join("manifest.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(manifest["site"]["name"], "Ada Lovelace");
    assert_eq!(manifest["sections"][0]["kind"], "hero");

    let generate = ws.run(&["generate"]);
    assert!(generate.status.success(), "generate failed: {generate:?}");
    assert!(stdout(&generate).starts_with("Home \u{2192} index.html"));
    assert!(ws.dist().join("index.html").is_file());
}

#[test]
fn generate_without_manifest_fails() {
    let ws = Workspace::new();
    let output = ws.run(&["generate"]);
    assert!(!output.status.success());
}

#[test]
fn config_overrides_reach_the_page() {
    let ws = Workspace::new();
    let config = ws.content().join("config.toml");
    let mut text = std::fs::read_to_string(&config).unwrap();
    text.push_str("\n[carousel]\ntransition_ms = 450\n");
    std::fs::write(&config, text).unwrap();

    assert!(ws.run(&["build"]).status.success());
    let html = std::fs::read_to_string(ws.dist().join("index.html")).unwrap();
    assert!(html.contains(r#"data-transition-ms="450""#));
}

#[test]
fn check_passes_on_fixtures() {
    let ws = Workspace::new();
    let output = ws.run(&["check", "--strict"]);
    assert!(output.status.success(), "check failed: {output:?}");
    let out = stdout(&output);
    assert!(out.contains("==> Content is valid"));
    assert!(!ws.dist().exists());
}

#[test]
fn strict_check_fails_on_dangling_section_link() {
    let ws = Workspace::new();
    let settings_path = ws.content().join("settings.json");
    let mut settings: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&settings_path).unwrap()).unwrap();
    settings["nav_item"].as_array_mut().unwrap().push(serde_json::json!({
        "label": "Blog",
        "link": { "link_type": "Any", "text": "#blog" }
    }));
    std::fs::write(&settings_path, settings.to_string()).unwrap();

    let lenient = ws.run(&["check"]);
    assert!(lenient.status.success());
    assert!(stdout(&lenient).contains("Warnings"));

    let strict = ws.run(&["check", "--strict"]);
    assert!(!strict.status.success());
}

#[test]
fn missing_home_document_fails_scan() {
    let ws = Workspace::new();
    std::fs::remove_file(ws.content().join("home.json")).unwrap();
    let output = ws.run(&["build"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("home.json"));
}

#[test]
fn gen_config_prints_documented_stock_config() {
    let ws = Workspace::new();
    let output = ws.run(&["gen-config"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[carousel]"));
    assert!(text.contains("transition_ms = 700"));
    assert!(text.contains("[sphere]"));
    assert!(text.parse::<toml::Value>().is_ok());
}
