use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;

fn prism() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_prism"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn parse_prints_canonical_payload() {
    let out = stdout_json(prism().args(["parse", "key, recipient::vendor(uei)", "--flat"]));

    assert_eq!(out["isFlat"], json!(true));
    assert_eq!(out["isFlatLists"], json!(false));
    assert_eq!(out["fields"][1]["alias"], json!("vendor"));
    assert_eq!(out["fields"][1]["nestedFields"][0]["name"], json!("uei"));
}

#[test]
fn parse_error_exits_non_zero() {
    prism()
        .args(["parse", "key,,piid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected field before comma at position 4"));
}

#[test]
fn project_reads_stdin_array() {
    let input = json!([
        { "key": "C-1", "recipient": { "display_name": "Acme", "uei": "U1" }, "obligated": 12.5 },
        { "key": "C-2", "recipient": null }
    ]);
    let out = stdout_json(
        prism()
            .args(["project", "--model", "Contract", "--shape", "key,recipient::vendor(display_name),obligated"])
            .write_stdin(input.to_string()),
    );

    assert_eq!(
        out,
        json!([
            { "key": "C-1", "vendor": { "display_name": "Acme" }, "obligated": "12.5" },
            { "key": "C-2", "vendor": null }
        ])
    );
}

#[test]
fn project_with_preset_and_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("entity.json");
    fs::write(&input, r#"{"uei": "U1", "legal_business_name": "Acme", "dba_name": "ignored"}"#).unwrap();

    let out = stdout_json(prism().args(["project", "--preset", "entities_minimal", "--input"]).arg(&input));
    assert_eq!(out, json!({ "uei": "U1", "legal_business_name": "Acme" }));
}

#[test]
fn project_flat_input() {
    let out = stdout_json(
        prism()
            .args(["project", "-m", "Contract", "-s", "recipient(uei)", "--flat", "--compact"])
            .write_stdin(r#"{"recipient.uei": "U1"}"#),
    );
    assert_eq!(out, json!({ "recipient": { "uei": "U1" } }));
}

#[test]
fn target_arguments_are_validated() {
    prism().args(["project", "--model", "Contract"]).assert().failure();
    prism()
        .args(["project", "--preset", "nope"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset: nope"));
}

#[test]
fn instantiation_error_reports_path() {
    prism()
        .args(["project", "-m", "Contract", "-s", "key"])
        .write_stdin("[{}, 3]")
        .assert()
        .failure()
        .stderr(predicate::str::contains(r#"Expected object for model "Contract" at index 1, got number"#));
}

#[test]
fn describe_resolves_nested_models() {
    let out = stdout_json(prism().args(["describe", "-m", "Contract", "-s", "recipient(location(city))"]));

    assert_eq!(out["modelName"], json!("Contract"));
    let recipient = &out["fields"][0]["nestedModel"];
    assert_eq!(recipient["modelName"], json!("RecipientProfile"));
    assert_eq!(recipient["fields"][0]["nestedModel"]["modelName"], json!("Location"));
}

#[test]
fn listings() {
    prism()
        .args(["fields", "Agency"])
        .assert()
        .success()
        .stdout("abbreviation\ncode\ndepartment\nname\n");

    prism().arg("types").assert().success().stdout(predicate::str::contains("IDV\n"));

    prism()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("CONTRACTS_MINIMAL").and(predicate::str::contains("Contract")));

    prism()
        .args(["fields", "Widget"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown model: Widget"));
}

#[test]
fn external_catalog_and_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.json");
    fs::write(
        &catalog,
        json!({
            "Order": {
                "id": { "type": "str", "isOptional": false, "isList": false },
                "customer": { "type": "dict", "isOptional": true, "isList": false, "nestedModel": "Customer" }
            },
            "Customer": {
                "name": { "type": "str", "isOptional": true, "isList": false }
            }
        })
        .to_string(),
    )
    .unwrap();
    let config = dir.path().join("prism.toml");
    fs::write(&config, "[flatten]\njoiner = \"__\"\n").unwrap();

    let out = stdout_json(
        prism()
            .args(["project", "-m", "Order", "-s", "id,customer(name)", "--flat", "--catalog"])
            .arg(&catalog)
            .arg("--config")
            .arg(&config)
            .write_stdin(r#"{"id": "O-1", "customer__name": "Ann"}"#),
    );
    assert_eq!(out, json!({ "id": "O-1", "customer": { "name": "Ann" } }));
}
