use std::{fs, path::PathBuf};

use tempfile::tempdir;

use cermet_cli::{Args, OutputFormat, run};

fn sample_input() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("compositions.txt")
        .to_string_lossy()
        .to_string()
}

fn args(input: Option<String>, format: OutputFormat, output: Option<String>) -> Args {
    Args {
        input,
        compositions: Vec::new(),
        format,
        output,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_text_report() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("report.txt");

    let outcome = run(&args(
        Some(sample_input()),
        OutputFormat::Text,
        Some(output_path.to_string_lossy().to_string()),
    ))
    .expect("Sample input should be processed");

    assert_eq!(outcome.rows().len(), 7);
    assert_eq!(outcome.report().succeeded(), 5);
    assert_eq!(outcome.report().incomplete(), 1);
    assert_eq!(outcome.report().failed(), 1);

    // Comments and the blank line are skipped but keep line numbering
    assert_eq!(outcome.rows()[0].line, 3);
    assert_eq!(outcome.rows()[5].binder_vol_pct, Some(20.0));

    let report = fs::read_to_string(&output_path).unwrap();
    assert!(report.starts_with("3: WC-10CoCrFeNi => "));
    assert!(report.ends_with("7 rows: 5 succeeded, 1 incomplete, 1 failed\n"));

    // Only the incomplete and the failed rows are diagnosed
    let diagnostics = outcome.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics[0].is_warning());
    assert!(!diagnostics[1].is_warning());
}

#[test]
fn e2e_smoke_test_toml_report() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("report.toml");

    run(&args(
        Some(sample_input()),
        OutputFormat::Toml,
        Some(output_path.to_string_lossy().to_string()),
    ))
    .expect("Sample input should be processed");

    let report: toml::Table = toml::from_str(&fs::read_to_string(&output_path).unwrap())
        .expect("Report should be valid TOML");
    assert_eq!(report["summary"]["rows"].as_integer(), Some(7));
    assert_eq!(report["rows"].as_array().unwrap().len(), 7);
}

#[test]
fn e2e_smoke_test_inline_compositions() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("report.txt");

    let mut args = args(
        None,
        OutputFormat::Text,
        Some(output_path.to_string_lossy().to_string()),
    );
    args.compositions = vec!["WC-10Co".to_string(), "b WC 25 Co".to_string()];

    let outcome = run(&args).expect("Inline compositions should be processed");

    assert_eq!(outcome.report().succeeded(), 2);
    let report = fs::read_to_string(&output_path).unwrap();
    let lines: Vec<_> = report.lines().collect();
    assert!(lines[0].starts_with("1: WC-10Co => "));
    assert!(lines[1].starts_with("2: b WC 25 Co => "));
}

#[test]
fn e2e_smoke_test_errors() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = Some(temp_dir.path().join("out.txt").to_string_lossy().to_string());

    let missing_input = args(
        Some(temp_dir.path().join("missing.txt").to_string_lossy().to_string()),
        OutputFormat::Text,
        output.clone(),
    );
    assert!(run(&missing_input).is_err());

    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[parser]\nsum_tolerance = -1.0\n").unwrap();
    let mut bad_config = args(Some(sample_input()), OutputFormat::Text, output);
    bad_config.config = Some(config_path.to_string_lossy().to_string());
    assert!(run(&bad_config).is_err());
}
