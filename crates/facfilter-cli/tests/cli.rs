use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const HEADER: &str = "Num_factura,Fecha,Bruto,Neto,IVA,IGIC,Concepto,CIF_cliente,NIF_cliente";
const GOOD: &str = "1,02/05/2019,1200,1000,20,,ACERLaptop,B76430134,";
const DUPLICATE: &str = "2,02/05/2019,1200,1000,20,,ACERLaptop,B76430134,";
const WRONG_IVA: &str = "3,02/05/2019,1100,1000,20,,ACERLaptop,B76430134,";

fn facfilter(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("facfilter").unwrap();
    // Keep any user config out of the tests.
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("RUST_LOG");
    cmd
}

fn write_export(dir: &TempDir, name: &str, rows: &[&str]) -> std::path::PathBuf {
    let mut content = HEADER.to_string();
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn filter_prints_surviving_rows() {
    let dir = TempDir::new().unwrap();
    let input = write_export(&dir, "march.csv", &[GOOD, DUPLICATE, DUPLICATE, WRONG_IVA]);

    facfilter(&dir)
        .arg("filter")
        .arg(&input)
        .assert()
        .success()
        .stdout(format!("{}\n{}\n", HEADER, GOOD));
}

#[test]
fn filter_writes_output_and_report() {
    let dir = TempDir::new().unwrap();
    let input = write_export(&dir, "march.csv", &[GOOD, WRONG_IVA]);
    let output = dir.path().join("out.csv");
    let report = dir.path().join("report.json");

    facfilter(&dir)
        .arg("filter")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--report")
        .arg(&report)
        .arg("--show-rejected")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "line 3: gross must equal net plus IVA (iva_calculation)",
        ));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        format!("{}\n{}", HEADER, GOOD)
    );

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(report["total_rows"], 2);
    assert_eq!(report["kept_rows"], 1);
    assert_eq!(report["rejected"][0]["violations"][0], "iva_calculation");
}

#[test]
fn filter_fails_on_invalid_header() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.csv");
    fs::write(&input, "hello, world").unwrap();

    facfilter(&dir)
        .arg("filter")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid header"));
}

#[test]
fn filter_fails_on_invalid_amount() {
    let dir = TempDir::new().unwrap();
    let input = write_export(
        &dir,
        "bad.csv",
        &["1,02/05/2019,1200,1000,20,-5,ACERLaptop,B76430134,"],
    );

    facfilter(&dir)
        .arg("filter")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid amount at line 2: IGIC = `-5`"));
}

#[test]
fn filter_trailing_newline_needs_flag() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trailing.csv");
    fs::write(&input, format!("{}\n{}\n", HEADER, GOOD)).unwrap();

    facfilter(&dir)
        .arg("filter")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed row at line 3"));

    facfilter(&dir)
        .arg("filter")
        .arg(&input)
        .arg("--trim-trailing-newline")
        .assert()
        .success()
        .stdout(format!("{}\n{}\n", HEADER, GOOD));
}

#[test]
fn filter_reads_config_file() {
    let dir = TempDir::new().unwrap();
    let input = write_export(
        &dir,
        "big.csv",
        &["1,02/05/2019,9007199254740992,9007199254740993,0,,Server,B76430134,"],
    );
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{ "filter": { "arithmetic": "decimal" } }"#).unwrap();

    facfilter(&dir)
        .arg("filter")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Server"));

    facfilter(&dir)
        .arg("--config")
        .arg(&config)
        .arg("filter")
        .arg(&input)
        .assert()
        .success()
        .stdout(format!("{}\n", HEADER));
}

#[test]
fn batch_filters_every_csv() {
    let dir = TempDir::new().unwrap();
    write_export(&dir, "a.csv", &[GOOD, WRONG_IVA]);
    write_export(&dir, "b.csv", &[DUPLICATE, DUPLICATE]);
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    let out = dir.path().join("out");

    facfilter(&dir)
        .arg("batch")
        .arg(format!("{}/*", dir.path().display()))
        .arg("-o")
        .arg(&out)
        .arg("--summary")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(out.join("a.csv")).unwrap(),
        format!("{}\n{}", HEADER, GOOD)
    );
    assert_eq!(fs::read_to_string(out.join("b.csv")).unwrap(), HEADER);
    assert!(!out.join("notes.txt").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.csv,success,2,1,1,"));
    assert!(summary.contains("b.csv,success,2,0,2,"));
}

#[test]
fn batch_continue_on_error() {
    let dir = TempDir::new().unwrap();
    write_export(&dir, "a.csv", &[GOOD]);
    fs::write(dir.path().join("b.csv"), "hello, world").unwrap();
    let out = dir.path().join("out");

    facfilter(&dir)
        .arg("batch")
        .arg(format!("{}/*.csv", dir.path().display()))
        .arg("-o")
        .arg(&out)
        .assert()
        .failure();

    facfilter(&dir)
        .arg("batch")
        .arg(format!("{}/*.csv", dir.path().display()))
        .arg("-o")
        .arg(&out)
        .arg("--continue-on-error")
        .assert()
        .success()
        .stderr(predicate::str::contains("1 failed"));

    assert!(out.join("a.csv").exists());
    assert!(!out.join("b.csv").exists());
}

#[test]
fn config_init_writes_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("facfilter.json");

    facfilter(&dir)
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .success();

    let config: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(config["filter"]["arithmetic"], "float");
    assert_eq!(config["validation"]["allow_extra_columns"], true);

    facfilter(&dir)
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn verbose_logs_repeated_invoice_numbers() {
    let dir = TempDir::new().unwrap();
    let input = write_export(&dir, "march.csv", &[GOOD, DUPLICATE, DUPLICATE]);

    facfilter(&dir)
        .arg("-vv")
        .arg("filter")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Repeated invoice numbers: 2"));

    facfilter(&dir)
        .env("RUST_LOG", "warn")
        .arg("-vv")
        .arg("filter")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Repeated invoice numbers").not());
}

#[test]
fn batch_write_failure_respects_continue_on_error() {
    let dir = TempDir::new().unwrap();
    write_export(&dir, "a.csv", &[GOOD]);
    write_export(&dir, "b.csv", &[GOOD]);
    let out = dir.path().join("out");
    // A directory where the output file should go makes the write fail.
    fs::create_dir_all(out.join("b.csv")).unwrap();

    facfilter(&dir)
        .arg("batch")
        .arg(format!("{}/*.csv", dir.path().display()))
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write"));

    facfilter(&dir)
        .arg("batch")
        .arg(format!("{}/*.csv", dir.path().display()))
        .arg("-o")
        .arg(&out)
        .arg("--continue-on-error")
        .arg("--summary")
        .assert()
        .success()
        .stderr(predicate::str::contains("1 successful, 1 failed"));

    assert_eq!(
        fs::read_to_string(out.join("a.csv")).unwrap(),
        format!("{}\n{}", HEADER, GOOD)
    );
    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("b.csv,error,,,,"));
}

#[test]
fn config_show_uses_config_flag() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{ "filter": { "arithmetic": "decimal" } }"#).unwrap();

    facfilter(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""arithmetic": "float""#));

    facfilter(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""arithmetic": "decimal""#))
        .stdout(predicate::str::contains("showing defaults").not());

    facfilter(&dir)
        .arg("--config")
        .arg(dir.path().join("missing.json"))
        .args(["config", "show"])
        .assert()
        .failure();
}

#[test]
fn config_path_and_init_follow_config_flag() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.json");

    facfilter(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.json"))
        .stdout(predicate::str::contains("missing"));

    facfilter(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    assert!(config.exists());
}
