use serde_json::Value;
use std::{env, fs, path::Path, path::PathBuf, process::Command};

fn write_rows(data_dir: &Path, metric: &str, file_name: &str, rows: &str) {
    let dir = data_dir.join("series").join(metric);
    fs::create_dir_all(&dir).expect("failed to create series directory");
    fs::write(dir.join(file_name), rows).expect("failed to write rows file");
}

fn run_bin(args: &[&str]) -> bool {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_meteostat"));

    let output = Command::new(bin)
        .args(args)
        .output()
        .expect("failed to execute command");

    let stdout_str =
        std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");
    println!("{args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n");

    output.status.success()
}

fn read_json(file: &Path) -> Value {
    let contents = fs::read_to_string(file).expect("failed to read report");
    serde_json::from_str(&contents).expect("failed to parse report")
}

fn assert_close(value: &Value, expected: f64) {
    let actual = value.as_f64().expect("expected a number");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn basic_workflow() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("basic_workflow");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    let config_contents = String::new()
        + "[comparison]\n"
        + "province = \"QC\"\n"
        + "year_before = 2022\n"
        + "year_after = 2023\n"
        + "metrics = [\"temperature\", \"precipitation\", \"pollution\"]\n"
        + "\n"
        + "[output]\n"
        + "charts = true\n";
    fs::write(test_dir.join("config.toml"), config_contents).expect("failed to write config file");

    write_rows(
        &test_dir,
        "temperature",
        "quebec-2022.json",
        r#"[{ "mois": "Janvier", "temperature": -10 }, { "mois": "Juillet", "temperature": 20 }]"#,
    );
    write_rows(
        &test_dir,
        "temperature",
        "quebec-2023.json",
        r#"[
            { "mois": "JANVIER", "temperature": -9 },
            { "mois": "juillet", "temperature": 21 },
            { "mois": "Août", "temperature": 24 },
            { "mois": "Thermidor", "temperature": 99 }
        ]"#,
    );
    write_rows(
        &test_dir,
        "precipitation",
        "quebec-2022.json",
        r#"[{ "mois": "Mars", "precipitation": 70 }, { "mois": "Avril", "precipitation": 90 }]"#,
    );
    write_rows(
        &test_dir,
        "precipitation",
        "quebec-2023.json",
        r#"[
            { "mois": "Mars", "precipitation": 50 },
            { "mois": "mars", "precipitation": 100 },
            { "mois": "Avril", "precipitation": 100 }
        ]"#,
    );
    write_rows(
        &test_dir,
        "pollution",
        "quebec-2022.json",
        r#"[{ "mois": "Mai", "pollution": 40 }, { "mois": "Juin", "pollution": 60 }]"#,
    );
    write_rows(
        &test_dir,
        "pollution",
        "quebec-2023.json",
        r#"[{ "mois": "mai", "pollution": 30 }, { "mois": "juin", "pollution": 45 }]"#,
    );

    let dir = test_dir
        .to_str()
        .expect("failed to convert test directory to string");

    assert!(run_bin(&["--data-dir", dir, "compare"]));

    let results_dir = test_dir.join("results");
    let report = read_json(&results_dir.join("comparison-quebec-2022-2023.json"));
    assert_eq!(report["province"], "Québec");

    let metrics = report["metrics"].as_array().expect("metrics must be a list");
    assert_eq!(metrics.len(), 3);

    let temp = &metrics[0];
    assert_eq!(temp["metric"], "temperature");
    assert_close(&temp["before"]["mean"], 5.0);
    assert_close(&temp["after"]["mean"], 12.0);
    assert_close(&temp["percent_change"], 140.0);
    assert_eq!(temp["verdict"], "increase");
    assert_eq!(temp["after"]["series"][7], 24.0);
    assert_eq!(temp["after"]["series"][1], Value::Null);
    assert_eq!(temp["after"]["trends"][7], "up");
    assert_eq!(temp["after"]["trends"][6], "unknown");

    let prec = &metrics[1];
    assert_close(&prec["after"]["mean"], 100.0);
    assert_close(&prec["percent_change"], 25.0);

    let pol = &metrics[2];
    assert_close(&pol["percent_change"], -25.0);
    assert_eq!(pol["verdict"], "improvement");
    assert_eq!(pol["before"]["max"]["month"], "juin");

    for metric in ["temperature", "precipitation", "pollution"] {
        let chart = results_dir.join(format!("{metric}-quebec-2022-2023.svg"));
        let svg = fs::read_to_string(&chart).expect("failed to read chart");
        assert_eq!(svg.matches("<path").count(), 2);
    }

    assert!(run_bin(&[
        "--data-dir",
        dir,
        "detail",
        "--metric",
        "pollution",
        "--year",
        "2023",
        "--province",
        "québec",
    ]));
    let detail = read_json(&results_dir.join("detail-pollution-quebec-2023.json"));
    assert_eq!(detail["year"], 2023);
    assert_close(&detail["mean"], 37.5);
    assert_eq!(detail["trends"][5], "up");

    assert!(!run_bin(&[
        "--data-dir",
        dir,
        "detail",
        "--metric",
        "pollution",
        "--year",
        "2024",
    ]));

    assert!(run_bin(&["--data-dir", dir, "clean"]));
    assert!(!results_dir.exists());

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn rejects_invalid_config() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("rejects_invalid_config");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    let config_contents = String::new()
        + "[comparison]\n"
        + "province = \"ON\"\n"
        + "year_before = 2022\n"
        + "year_after = 2023\n"
        + "metrics = []\n";
    fs::write(test_dir.join("config.toml"), config_contents).expect("failed to write config file");

    let dir = test_dir
        .to_str()
        .expect("failed to convert test directory to string");
    assert!(!run_bin(&["--data-dir", dir, "compare"]));
    assert!(!test_dir.join("results").exists());

    fs::remove_dir_all(&test_dir).ok();
}
