use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCENARIO: &str = "CITY LAB - Complete Metabolic Panel\n\
Hemoglobin: 10.5 g/dL\n\
Total Cholesterol 220 mg/dL\n\
Glucose 135 mg/dL\n";

/// Command with the user config directory pointed into `home`.
fn labscan(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("labscan").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path());
    cmd
}

fn write_report(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_extract_json() {
    let dir = TempDir::new().unwrap();
    let report = write_report(dir.path(), "labs.txt", SCENARIO);

    labscan(&dir)
        .args(["extract", report.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hemoglobin\": \"10.5\""))
        .stdout(predicate::str::contains("\"cholesterol\": \"220\""))
        .stdout(predicate::str::contains("\"glucose\": \"135\""));
}

#[test]
fn test_extract_text_with_matches() {
    let dir = TempDir::new().unwrap();
    let report = write_report(dir.path(), "labs.txt", SCENARIO);

    labscan(&dir)
        .args(["extract", report.to_str().unwrap(), "-f", "text", "--show-matches"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Markers found: 3"))
        .stdout(predicate::str::contains("Hemoglobin: 10.5 g/dL"))
        .stdout(predicate::str::contains("Matches:"));
}

#[test]
fn test_extract_without_markers_warns() {
    let dir = TempDir::new().unwrap();
    let report = write_report(dir.path(), "notes.txt", "Patient reports feeling well.");

    labscan(&dir)
        .args(["extract", report.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("{}"))
        .stderr(predicate::str::contains("No known markers detected"));
}

#[test]
fn test_analyze_markdown_to_file() {
    let dir = TempDir::new().unwrap();
    let report = write_report(dir.path(), "labs.txt", SCENARIO);
    let output = dir.path().join("report.md");

    labscan(&dir)
        .args(["analyze", report.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let markdown = fs::read_to_string(&output).unwrap();
    assert!(markdown.contains("# Blood Test Analysis Report"));
    assert!(markdown.contains("| Cholesterol | 220 | mg/dL | Elevated |"));
    assert!(markdown.contains("approximately 187-198 mg/dL"));
    assert!(markdown.contains("Low to moderate intensity"));
}

#[test]
fn test_analyze_csv() {
    let dir = TempDir::new().unwrap();
    let report = write_report(dir.path(), "labs.txt", SCENARIO);

    labscan(&dir)
        .args(["analyze", report.to_str().unwrap(), "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marker,value,unit,status"))
        .stdout(predicate::str::contains("hemoglobin,10.5,g/dL,Abnormal,12,16"));
}

#[test]
fn test_analyze_missing_file() {
    let dir = TempDir::new().unwrap();

    labscan(&dir)
        .args(["analyze", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_analyze_unsupported_format() {
    let dir = TempDir::new().unwrap();
    let report = write_report(dir.path(), "labs.docx", SCENARIO);

    labscan(&dir)
        .args(["analyze", report.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported report format"));
}

#[test]
fn test_advise_exercise() {
    let dir = TempDir::new().unwrap();
    let report = write_report(dir.path(), "labs.txt", "Total Cholesterol: 250 mg/dL\n");

    labscan(&dir)
        .args(["advise", report.to_str().unwrap(), "--kind", "exercise"])
        .assert()
        .success()
        .stdout(predicate::str::contains("High cholesterol (250 mg/dL)"))
        .stdout(predicate::str::contains("• Intensity: Moderate intensity"));
}

#[test]
fn test_advise_nutrition_default() {
    let dir = TempDir::new().unwrap();
    let report = write_report(dir.path(), "labs.txt", SCENARIO);

    labscan(&dir)
        .args(["advise", report.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("NUTRITION ANALYSIS BASED ON YOUR BLOOD TEST RESULTS"))
        .stdout(predicate::str::contains("This indicates diabetes range"));
}

#[test]
fn test_batch_with_summary() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    fs::create_dir_all(&input).unwrap();
    write_report(&input, "a.txt", SCENARIO);
    write_report(&input, "b.txt", "Glucose: 92 mg/dL");
    write_report(&input, "c.txt", "");
    let out = dir.path().join("out");

    let pattern = format!("{}/*.txt", input.display());
    labscan(&dir)
        .args([
            "batch",
            pattern.as_str(),
            "-o",
            out.to_str().unwrap(),
            "-f",
            "json",
            "--summary",
            "--continue-on-error",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files to analyze"))
        .stdout(predicate::str::contains("Failed files:"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
    assert!(!out.join("c.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("filename,status,markers,flagged,hemoglobin"));
    assert!(lines[1].starts_with("a.txt,success,3,3,10.5"));
    assert!(lines[3].starts_with("c.txt,error"));
}

#[test]
fn test_batch_stops_on_error() {
    let dir = TempDir::new().unwrap();
    write_report(dir.path(), "empty.txt", "");

    let pattern = format!("{}/*.txt", dir.path().display());
    labscan(&dir)
        .args(["batch", pattern.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Analysis failed"));
}

#[test]
fn test_markers_lists_table() {
    let dir = TempDir::new().unwrap();

    labscan(&dir)
        .args(["markers", "--patterns"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hemoglobin"))
        .stdout(predicate::str::contains("potassium"))
        .stdout(predicate::str::contains("12 markers"));
}

#[test]
fn test_config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("labscan.json");
    let config = config.to_str().unwrap();

    labscan(&dir)
        .args(["-c", config, "config", "init"])
        .assert()
        .success();

    labscan(&dir)
        .args(["-c", config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    labscan(&dir)
        .args(["-c", config, "config", "set", "report.preview_chars", "200"])
        .assert()
        .success();

    labscan(&dir)
        .args(["-c", config, "config", "get", "report.preview_chars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("200"));

    labscan(&dir)
        .args(["-c", config, "config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12 markers"));
}

#[test]
fn test_config_rejects_broken_table() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("labscan.json");
    let config = config.to_str().unwrap();

    labscan(&dir)
        .args(["-c", config, "config", "set", "extraction.patterns.glucose", "[\"glucose \\\\d+\"]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no capture group"));
}

#[test]
fn test_config_path_uses_user_dir() {
    let dir = TempDir::new().unwrap();

    labscan(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("labscan"))
        .stdout(predicate::str::contains("not created"));
}
