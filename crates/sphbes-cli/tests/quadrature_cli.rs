use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SI_TRUNCATED_REFERENCE: f64 = 1.570_706_320_399_449_7;

#[test]
fn integrate_reports_stop_index_and_value() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table = temp.path().join("unit.dat");
    write_file(&table, "# r f\n0 1\n1 1\n2 1\n3 1\n4 1\n");

    let output = run_sphbes(&[
        "integrate",
        "--input",
        path_str(&table),
        "--mode",
        "trapezoidal",
        "--k",
        "1.0",
        "--crossover",
        "2.5",
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut tokens = stdout.split_whitespace();
    let stop_index: usize = tokens
        .next()
        .expect("stop index")
        .parse()
        .expect("integer stop index");
    let value: f64 = tokens
        .next()
        .expect("value")
        .parse()
        .expect("floating point value");
    assert_eq!(stop_index, 3);
    assert!((value - 1.819_639_699_564_048_7).abs() < 1.0e-13, "value={value}");
}

#[test]
fn analytic_mode_tabulates_trig_from_two_column_tables() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table = temp.path().join("tail.dat");
    write_file(&table, "3 1\n4 1\n5 1\n");

    let output = run_sphbes(&[
        "integrate",
        "--input",
        path_str(&table),
        "--mode",
        "sin_integ",
        "--k",
        "1",
        "--iend",
        "2",
        "--json",
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(parsed["mode"], "sin_integ");
    assert_eq!(parsed["stopIndex"], 2);
    let value = parsed["value"].as_f64().expect("numeric value");
    assert!((value - (3.0_f64.cos() - 4.0_f64.cos())).abs() < 1.0e-14);
}

#[test]
fn four_column_tables_supply_their_own_trig_values() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table = temp.path().join("tables.dat");
    // sin/cos columns deliberately belong to other arguments
    write_file(&table, "1 1 0.5 0.25\n2 1 0.75 -0.5\n");

    let output = run_sphbes(&[
        "integrate",
        "--input",
        path_str(&table),
        "--mode",
        "sin_integ",
        "--k",
        "1",
        "--json",
    ]);

    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(parsed["value"].as_f64(), Some(0.75));
}

#[test]
fn config_file_supplies_defaults_and_flags_override_it() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table = temp.path().join("unit.dat");
    let config = temp.path().join("config.json");
    write_file(&table, "0 1\n1 1\n2 1\n3 1\n4 1\n");
    write_file(
        &config,
        r#"{ "mode": "trapezoidal", "waveNumber": 1.0, "crossover": 100.0 }"#,
    );

    let output = run_sphbes(&[
        "integrate",
        "--input",
        path_str(&table),
        "--config",
        path_str(&config),
        "--json",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(parsed["stopIndex"], 5);

    let output = run_sphbes(&[
        "integrate",
        "--input",
        path_str(&table),
        "--config",
        path_str(&config),
        "--crossover",
        "2.5",
        "--json",
    ]);
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(parsed["stopIndex"], 3);
}

#[test]
fn hybrid_command_recovers_the_dirichlet_integral() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table = temp.path().join("log.dat");
    let count = 4001;
    let (start, end) = (1.0e-4_f64, 1.0e5_f64);
    let step = (end.ln() - start.ln()) / ((count - 1) as f64);
    let mut rows = String::new();
    for index in 0..count {
        let radius = match index {
            0 => start,
            i if i == count - 1 => end,
            i => (start.ln() + step * (i as f64)).exp(),
        };
        rows.push_str(&format!("{radius} 1\n"));
    }
    write_file(&table, &rows);

    let output = run_sphbes(&[
        "hybrid",
        "--input",
        path_str(&table),
        "--k",
        "1",
        "--crossover",
        "10",
        "--json",
    ]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let total = parsed["total"].as_f64().expect("total");
    let near = parsed["nearField"].as_f64().expect("near field");
    let far = parsed["farField"].as_f64().expect("far field");
    assert!((total - SI_TRUNCATED_REFERENCE).abs() < 2.0e-5, "total={total}");
    assert_eq!(near + far, total);
    assert!(parsed["crossoverIndex"].as_u64().expect("index") > 0);
}

#[test]
fn transform_command_prints_one_line_per_wave_number() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table = temp.path().join("gaussian.dat");
    let mut rows = String::new();
    for index in 0..=2000 {
        let radius = if index == 2000 {
            10.0
        } else {
            (10.0 / 2000.0) * (index as f64)
        };
        rows.push_str(&format!("{radius} {}\n", (-0.5 * radius * radius).exp()));
    }
    write_file(&table, &rows);

    let output = run_sphbes(&[
        "transform",
        "--input",
        path_str(&table),
        "--k-min",
        "0.5",
        "--k-max",
        "2",
        "--count",
        "4",
        "--power",
        "2",
        "--crossover",
        "inf",
    ]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    for line in lines {
        let columns: Vec<f64> = line
            .split_whitespace()
            .map(|token| token.parse().expect("numeric column"))
            .collect();
        assert_eq!(columns.len(), 3);
        let (k, re, im) = (columns[0], columns[1], columns[2]);
        let expected = (2.0 * std::f64::consts::PI).powf(1.5) * (-0.5 * k * k).exp();
        assert!((re / expected - 1.0).abs() < 1.0e-9, "k={k} re={re}");
        assert_eq!(im, 0.0);
    }
}

#[test]
fn unknown_mode_exits_with_input_validation_code() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table = temp.path().join("unit.dat");
    write_file(&table, "0 1\n1 1\n");

    let output = run_sphbes(&[
        "integrate",
        "--input",
        path_str(&table),
        "--mode",
        "simpson",
        "--k",
        "1",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ERROR: [INPUT.UNKNOWN_MODE] unknown integration mode 'simpson'"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("FATAL EXIT CODE: 2"));
}

#[test]
fn quadrature_errors_surface_as_diagnostics() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table = temp.path().join("unit.dat");
    write_file(&table, "0 1\n1 1\n2 1\n");

    let output = run_sphbes(&[
        "integrate",
        "--input",
        path_str(&table),
        "--mode",
        "cos_integ",
        "--k",
        "1",
        "--power",
        "3",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("ERROR: [INPUT.UNSUPPORTED_CONFIGURATION]"));

    let unsorted = temp.path().join("unsorted.dat");
    write_file(&unsorted, "0 1\n2 1\n1 1\n");
    let output = run_sphbes(&[
        "integrate",
        "--input",
        path_str(&unsorted),
        "--k",
        "1",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR: [INPUT.DEGENERATE_GRID]"));

    let ragged = temp.path().join("ragged.dat");
    write_file(&ragged, "0 1\n1 1 1\n");
    let output = run_sphbes(&["integrate", "--input", path_str(&ragged), "--k", "1"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR: [INPUT.TABLE_SHAPE]"));
}

#[test]
fn overflowing_transform_exits_with_computation_code() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table = temp.path().join("huge.dat");
    write_file(
        &table,
        "0 1.7976931348623157e308\n10 1.7976931348623157e308\n20 1.7976931348623157e308\n",
    );

    let output = run_sphbes(&[
        "transform",
        "--input",
        path_str(&table),
        "--k-min",
        "1",
        "--k-max",
        "2",
        "--count",
        "2",
        "--crossover",
        "inf",
    ]);

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ERROR: [COMPUTE.NON_FINITE_RESULT] hybrid integral is not finite"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("FATAL EXIT CODE: 4"));
}

#[test]
fn missing_inputs_map_to_usage_and_io_exit_codes() {
    let temp = TempDir::new().expect("tempdir should be created");
    let missing = temp.path().join("missing.dat");

    let output = run_sphbes(&["integrate", "--input", path_str(&missing), "--k", "1"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: [IO.CLI] failed to read sample table"), "stderr: {stderr}");

    let table = temp.path().join("unit.dat");
    write_file(&table, "0 1\n1 1\n");
    let output = run_sphbes(&["integrate", "--input", path_str(&table)]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR: [INPUT.CLI_USAGE]"));

    let output = run_sphbes(&["integrate", "--bogus"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn verbose_flag_enables_debug_logging() {
    let temp = TempDir::new().expect("tempdir should be created");
    let table = temp.path().join("unit.dat");
    write_file(&table, "0 1\n1 1\n2 1\n");

    let output = run_sphbes(&[
        "--verbose",
        "integrate",
        "--input",
        path_str(&table),
        "--k",
        "1",
    ]);
    assert!(output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("dispatching quadrature pass"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let quiet = run_sphbes(&["integrate", "--input", path_str(&table), "--k", "1"]);
    assert!(quiet.status.success());
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("dispatching quadrature pass"));
}

#[test]
fn help_exits_successfully() {
    let output = run_sphbes(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("integrate"));
    assert!(stdout.contains("transform"));
}

fn run_sphbes(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sphbes"))
        .args(args)
        .env_remove("SPHBES_LOG")
        .output()
        .expect("sphbes command should run")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path should be valid UTF-8")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent directory should be created");
    }
    fs::write(path, content).expect("file should be written");
}
