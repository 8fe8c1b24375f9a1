//! E2E tests for the compare, sweep and chart commands

use std::path::PathBuf;
use std::process::{Command, Output};

fn cltpj(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cltpj"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cltpj-e2e-{}-{}.csv", name, std::process::id()))
}

/// Test the default comparison at R$ 5000
#[test]
fn compare_default_gross() {
    let output = cltpj(&["compare"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("gross R$ 5000.00"));
    assert!(stdout.contains("INSS (rate: 14% | effective: 10.4%): R$ 518.82"));
    assert!(stdout.contains("IRRF (rate: 22.5% | effective: 7.7%): R$ 345.50"));
    assert!(stdout.contains("Net: R$ 3835.69"));
    assert!(stdout.contains("Net: R$ 4096.00"));
    assert!(stdout.contains("Absolute difference (PJ - CLT): R$ 260.31"));
    assert!(stdout.contains("NOTES"));
}

/// Test that edited rates change the PJ result
#[test]
fn compare_custom_rates() {
    let output = cltpj(&["compare", "5000", "--simples-nacional", "6", "--accountant", "150"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Simples Nacional (6.0%): R$ 300.00"));
    assert!(stdout.contains("Net: R$ 4396.00"));
}

/// Test zero gross does not divide by zero
#[test]
fn compare_zero_gross() {
    let output = cltpj(&["compare", "0"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Net share: -"));
    assert!(stdout.contains("Percentage difference: -"));
}

/// Test negative gross is rejected at the boundary
#[test]
fn compare_negative_gross_rejected() {
    let output = cltpj(&["compare", "--", "-100"]);
    assert!(!output.status.success());
}

/// Test compare JSON output
#[test]
fn compare_json_output() {
    let output = cltpj(&["compare", "5000", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["clt"]["net"], "3835.69");
    assert_eq!(json["pj"]["net"], "4096.00");
    assert_eq!(json["difference"], "260.31");
    assert!(json["rates"]["simples_nacional_rate"].is_string());
}

/// Test the sweep writes the full default table
#[test]
fn sweep_default_range() {
    let path = temp_path("sweep");
    let output = cltpj(&["sweep", "-o", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("(991 rows)"));

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("bruto,clt,pj"));
    assert_eq!(contents.lines().count(), 992);
    assert!(contents.contains("\n5000,3835.685275,4096"));
    std::fs::remove_file(&path).unwrap();
}

/// Test an invalid sweep range fails
#[test]
fn sweep_invalid_range() {
    let output = cltpj(&["sweep", "--start", "2000", "--stop", "1000", "-o", "-"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("below start"));
}

/// Test the chart panel over a generated table
#[test]
fn chart_filtered_range() {
    let path = temp_path("chart");
    let sweep = cltpj(&["sweep", "-o", path.to_str().unwrap()]);
    assert!(sweep.status.success(), "Command failed: {:?}", sweep);

    let output = cltpj(&[
        "chart",
        "--table",
        path.to_str().unwrap(),
        "--min",
        "5000",
        "--max",
        "6000",
        "--csv",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(stdout.lines().count(), 12);
    assert!(stdout.starts_with("bruto,clt,pj"));

    let table = cltpj(&["chart", "--table", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&table.stdout);
    assert!(table.status.success(), "Command failed: {:?}", table);
    assert!(stdout.contains("CLT net"));
    assert!(stdout.contains("Break-even"));
    std::fs::remove_file(&path).unwrap();
}

/// Test a missing table degrades to a notice
#[test]
fn chart_missing_table() {
    let path = temp_path("missing");
    let output = cltpj(&["chart", "--table", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Run `cltpj sweep` to generate it"));
}

/// Test the calculator still works when the chart panel has no table
#[test]
fn compare_with_missing_chart() {
    let path = temp_path("compare-missing");
    let output = cltpj(&["compare", "--chart", "--table", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Net: R$ 3835.69"));
    assert!(stdout.contains("Comparison table not found"));
}
