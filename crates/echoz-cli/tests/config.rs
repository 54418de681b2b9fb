use std::fs;

use serde_json::json;

use echoz_cli::config::{ConfigDir, merge_split};
use echoz_cli::io;
use echoz_core::models::template::TemplateSet;

const PARAGRAPHS_YAML: &str = "\
version: 1
paragraphs:
  - id: lv
    label: LV
    text: \"LVEDD = {LVEDD:.2f} (z = {LVEDD_z:.2f})\"
  - id: bsa
    label: BSA
    text: \"BSA = {BSA_m2:.2f} m2\"
";

const REPORTS_YAML: &str = "\
reports:
  - id: short
    title: Short
    paragraph_ids: [bsa, lv, lv]
";

fn write(dir: &std::path::Path, rel: &str, contents: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn empty_config_dir_uses_builtins() {
    let tmp = tempfile::tempdir().unwrap();
    let config = ConfigDir::at(tmp.path());

    let registry = config.load_registry(None).unwrap();
    assert_eq!(registry.len(), 34);
    assert!(registry.get("LVEDD").is_some());

    assert_eq!(config.load_templates(None).unwrap(), TemplateSet::builtin());
    assert!(config.load_display(None).unwrap().params.is_empty());
}

#[test]
fn split_template_files_are_merged() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "reports/paragraphs.yaml", PARAGRAPHS_YAML);
    write(tmp.path(), "reports/reports.yaml", REPORTS_YAML);

    let templates = ConfigDir::at(tmp.path()).load_templates(None).unwrap();
    assert_eq!(templates.paragraphs.len(), 2);
    assert_eq!(
        templates.report("short").unwrap().paragraph_ids,
        ["bsa", "lv", "lv"]
    );
}

#[test]
fn split_files_keep_the_newest_version() {
    let merged = merge_split(
        &json!({ "version": 1, "paragraphs": [] }),
        &json!({ "version": 7, "reports": [] }),
    )
    .unwrap();
    assert_eq!(merged["version"], 7);
    assert_eq!(merged["paragraphs"], json!([]));

    let unversioned = merge_split(&json!({ "paragraphs": [] }), &serde_json::Value::Null).unwrap();
    assert!(unversioned.get("version").is_none());
    assert_eq!(unversioned["reports"], json!([]));

    assert!(merge_split(&json!([1, 2]), &json!({})).is_err());
}

#[test]
fn newer_split_file_is_rejected_on_load() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "reports/paragraphs.yaml", PARAGRAPHS_YAML);
    write(
        tmp.path(),
        "reports/reports.yaml",
        &format!("version: 2\n{REPORTS_YAML}"),
    );

    let err = ConfigDir::at(tmp.path()).load_templates(None).unwrap_err();
    assert!(err.to_string().contains("version"), "{err}");
}

#[test]
fn save_templates_writes_normalized_split_files() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "reports/paragraphs.yaml", PARAGRAPHS_YAML);
    write(tmp.path(), "reports/reports.yaml", REPORTS_YAML);
    let config = ConfigDir::at(tmp.path());

    let loaded = config.load_templates(None).unwrap();
    config.save_templates(&loaded).unwrap();

    let paragraphs = io::read_document(&config.paragraphs_path()).unwrap();
    let ids: Vec<_> = paragraphs["paragraphs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["bsa", "lv"]);
    assert_eq!(paragraphs["version"], 1);

    let reports = io::read_document(&config.reports_path()).unwrap();
    assert_eq!(reports["reports"][0]["paragraph_ids"], json!(["bsa", "lv"]));
    assert!(!tmp.path().join("reports/reports.yaml.tmp").exists());

    assert_eq!(config.load_templates(None).unwrap(), loaded.normalized());
}

#[test]
fn explicit_files_override_the_config_dir() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "custom.yaml",
        "parameters:\n  LVEDD: { alpha: 0.45, mean: 3.89, sd: 0.33 }\n",
    );
    write(
        tmp.path(),
        "display.yaml",
        "params:\n  - { name: LVEDD, enabled: false }\n",
    );
    let config = ConfigDir::at(tmp.path().join("unused"));

    let registry = config
        .load_registry(Some(&tmp.path().join("custom.yaml")))
        .unwrap();
    assert_eq!(registry.names(), ["LVEDD"]);

    let display = config
        .load_display(Some(&tmp.path().join("display.yaml")))
        .unwrap();
    assert_eq!(display.split_and_sort(&registry.names()).1, ["LVEDD"]);
}

#[test]
fn unreadable_registry_names_the_file() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "parameters/registry.yaml", "parameters: 3\n");

    let err = ConfigDir::at(tmp.path()).load_registry(None).unwrap_err();
    assert!(err.to_string().contains("registry.yaml"), "{err}");
}
