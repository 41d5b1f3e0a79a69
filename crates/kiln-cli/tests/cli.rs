//! Integration tests for the kiln binary.
//!
//! These tests run the compiled CLI against real project directories.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r#"
entry = "./src/index.js"
mode = "production"

[output]
path = "dist"
filename = "bundle.[hash].js"

[resolve]
modules = ["./src/components", "node_modules"]
extensions = ["web.js", ".js"]

[resolve.alias]
react-native = "@my/react-native-web"

[[plugins]]
plugin = "html"
template = "./public/index.html"

[variants.development]
mode = "development"

[variants.development.dev_server]
port = "3000"
hot = true

[variants.development.dev_server.proxy."/api"]
target = "http://localhost:4000"
path_rewrite = { "/api" = "" }

[variants.production]
"#;

fn kiln() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("kiln"));
    cmd.env_remove("NODE_ENV")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "kiln.toml", CONFIG);
    write(temp.path(), "src/index.js", "import App from './App';");
    write(temp.path(), "public/index.html", "<div id=\"root\"></div>");
    temp
}

fn resolved(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout is JSON")
}

#[test]
fn resolve_development_sets_hot_and_keeps_alias() {
    let temp = project();
    let output = kiln()
        .current_dir(temp.path())
        .args(["resolve", "--mode", "development"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let config = resolved(&output.stdout);
    assert_eq!(config["mode"], "development");
    assert_eq!(config["dev_server"]["hot"], true);
    assert_eq!(config["dev_server"]["port"], 3000);
    assert_eq!(config["resolve"]["alias"]["react-native"], "@my/react-native-web");
}

#[test]
fn resolve_reads_mode_from_node_env() {
    let temp = project();
    let output = kiln()
        .current_dir(temp.path())
        .env("NODE_ENV", "development")
        .arg("resolve")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(resolved(&output.stdout)["mode"], "development");
}

#[test]
fn resolve_defaults_to_production() {
    let temp = project();
    let output = kiln()
        .current_dir(temp.path())
        .arg("resolve")
        .output()
        .unwrap();

    assert!(output.status.success());
    let config = resolved(&output.stdout);
    assert_eq!(config["mode"], "production");
    assert!(config.get("dev_server").is_none());
}

#[test]
fn resolve_rejects_unknown_mode() {
    let temp = project();
    kiln()
        .current_dir(temp.path())
        .args(["resolve", "--mode", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn resolve_with_root_flag() {
    let temp = project();
    let output = kiln()
        .args(["resolve", "--mode", "production", "--absolute-paths", "--root"])
        .arg(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let config = resolved(&output.stdout);
    let out_path = config["output"]["path"].as_str().unwrap();
    assert!(Path::new(out_path).is_absolute());
    assert!(out_path.ends_with("dist"));
}

#[test]
fn resolve_reports_missing_entry() {
    let temp = project();
    fs::remove_file(temp.path().join("src/index.js")).unwrap();

    kiln()
        .current_dir(temp.path())
        .args(["resolve", "--mode", "production"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("entry module not found"));

    kiln()
        .current_dir(temp.path())
        .args(["resolve", "--mode", "production", "--schema-only"])
        .assert()
        .success();
}

#[test]
fn resolve_without_config_fails() {
    let temp = TempDir::new().unwrap();
    kiln()
        .current_dir(temp.path())
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config not found"));
}

#[test]
fn resolve_explicit_config_path() {
    let temp = project();
    write(
        temp.path(),
        "configs/web.json",
        r#"{ "entry": "./src/index.js", "variants": { "production": { "devtool": "source-map" } } }"#,
    );

    let output = kiln()
        .current_dir(temp.path())
        .args(["resolve", "--config", "configs/web.json", "--mode", "production"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(resolved(&output.stdout)["devtool"], "source-map");
}

#[test]
fn check_reports_every_variant() {
    let temp = project();
    kiln()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("development"))
        .stderr(predicate::str::contains("production"));
}

#[test]
fn check_fails_when_a_variant_is_invalid() {
    let temp = project();
    let broken = CONFIG.replace("[variants.production]", "[variants.production]\nentry = \"./src/prod.js\"");
    write(temp.path(), "kiln.toml", &broken);

    kiln()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("prod.js"))
        .stderr(predicate::str::contains("1 of 2 variants failed"));
}

#[test]
fn lookup_prefers_web_extension() {
    let temp = project();
    write(temp.path(), "src/App.web.js", "");
    write(temp.path(), "src/App.js", "");

    kiln()
        .current_dir(temp.path())
        .args(["lookup", "./src/App"])
        .assert()
        .success()
        .stdout(predicate::str::contains("App.web.js"));
}

#[test]
fn lookup_applies_alias() {
    let temp = project();
    write(temp.path(), "node_modules/@my/react-native-web/index.js", "");

    kiln()
        .current_dir(temp.path())
        .args(["lookup", "react-native", "--mode", "development"])
        .assert()
        .success()
        .stdout(predicate::str::contains("react-native-web"));
}

#[test]
fn lookup_reports_unresolvable_request() {
    let temp = project();
    kiln()
        .current_dir(temp.path())
        .args(["lookup", "left-pad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("module not found"));
}

#[test]
fn lookup_rejects_missing_importer_directory() {
    let temp = project();
    kiln()
        .current_dir(temp.path())
        .args(["lookup", "./App", "--from", "src/missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

#[test]
fn lookup_follows_package_main_through_alias() {
    let temp = project();
    write(
        temp.path(),
        "node_modules/@my/react-native-web/package.json",
        r#"{ "name": "@my/react-native-web", "main": "dist/index.js" }"#,
    );
    write(temp.path(), "node_modules/@my/react-native-web/dist/index.js", "");

    kiln()
        .current_dir(temp.path())
        .args(["lookup", "react-native"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dist/index.js"));
}
