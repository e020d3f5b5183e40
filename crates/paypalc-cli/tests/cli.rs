use std::fs;
use std::path::{Path, PathBuf};

use paypalc_core::ExitCode;
use paypalc_test_support::{row, two_group_catalog, CatalogBuilder};
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn cargo_bin(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("paypalc").unwrap();
    // Keep config discovery away from the workspace.
    cmd.current_dir(dir);
    cmd
}

fn catalog_file(dir: &TempDir, html: &str) -> PathBuf {
    let path = dir.path().join("event-names.html");
    fs::write(&path, html).unwrap();
    path
}

#[test]
fn generates_enum_file_from_local_html() {
    let temp = tempdir().unwrap();
    let input = catalog_file(&temp, &two_group_catalog());
    let output = temp.path().join("webhook_gen.go");

    let mut cmd = cargo_bin(temp.path());
    cmd.arg("--paypal-html")
        .arg(&input)
        .arg("--webhook-enum")
        .arg(&output);

    cmd.assert().success().stdout(predicate::str::is_empty());

    let generated = fs::read_to_string(&output).unwrap();
    assert!(generated.starts_with("// Code generated by paypalc. DO NOT EDIT.\npackage paypal\n"));
    assert!(generated.contains("\tCheckoutOrderApproved EventType = \"CHECKOUT.ORDER.APPROVED\"\n"));
    assert!(generated.contains("\tPaymentCaptureCompleted EventType = \"PAYMENT.CAPTURE.COMPLETED\"\n"));
    assert!(generated.contains("https://developer.paypal.com/docs/api/orders/v2/#orders_get"));
}

#[test]
fn go_pkg_flag_overrides_package() {
    let temp = tempdir().unwrap();
    let input = catalog_file(&temp, &two_group_catalog());
    let output = temp.path().join("webhook_gen.go");

    let mut cmd = cargo_bin(temp.path());
    cmd.arg("--paypal-html")
        .arg(&input)
        .arg("--webhook-enum")
        .arg(&output)
        .arg("--go-pkg")
        .arg("webhooks");

    cmd.assert().success();

    let generated = fs::read_to_string(&output).unwrap();
    assert!(generated.contains("\npackage webhooks\n"));
}

#[test]
fn config_file_sets_package_and_base_url() {
    let temp = tempdir().unwrap();
    let input = catalog_file(&temp, &two_group_catalog());
    let output = temp.path().join("webhook_gen.go");
    fs::write(
        temp.path().join(".paypalc.toml"),
        "[source]\ndoc_base_url = \"https://docs.example.test\"\n\n[generator]\npackage = \"events\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin(temp.path());
    cmd.arg("--paypal-html")
        .arg(&input)
        .arg("--webhook-enum")
        .arg(&output);

    cmd.assert().success();

    let generated = fs::read_to_string(&output).unwrap();
    assert!(generated.contains("\npackage events\n"));
    assert!(generated.contains("https://docs.example.test/docs/api/orders/v2/#orders_get"));
}

#[test]
fn list_events_plain_reads_stdin() {
    let temp = tempdir().unwrap();

    let mut cmd = cargo_bin(temp.path());
    cmd.arg("--paypal-html")
        .arg("-")
        .arg("--list-events")
        .write_stdin(two_group_catalog());

    cmd.assert().success().stdout(
        "CHECKOUT.ORDER.APPROVED\tCheckoutOrderApproved\tCheckout\tV1\trepeated,reference\n\
         CHECKOUT.ORDER.APPROVED\tCheckoutOrderApproved\tCheckout\tV2\n\
         CHECKOUT.ORDER.COMPLETED\tCheckoutOrderCompleted\tCheckout\tV2\n\
         PAYMENT.CAPTURE.COMPLETED\tPaymentCaptureCompleted\tPayments V2\t-\n\
         CHECKOUT.ORDER.APPROVED\tCheckoutOrderApproved\tPayments V2\t-\trepeated\n",
    );
}

#[test]
fn list_events_json() {
    let temp = tempdir().unwrap();
    let input = catalog_file(&temp, &two_group_catalog());

    let mut cmd = cargo_bin(temp.path());
    cmd.arg("--paypal-html")
        .arg(&input)
        .arg("--list-events")
        .arg("--format")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("["))
        .stdout(predicate::str::contains("\"event\": \"PAYMENT.CAPTURE.COMPLETED\""));
}

#[test]
fn nothing_to_do_without_output() {
    let temp = tempdir().unwrap();
    let input = catalog_file(&temp, &two_group_catalog());

    let mut cmd = cargo_bin(temp.path());
    cmd.arg("--paypal-html").arg(&input);

    cmd.assert()
        .failure()
        .code(ExitCode::InvalidArguments as i32)
        .stderr(predicate::str::contains("ERR: nothing to do"));
}

#[test]
fn malformed_catalog_leaves_no_output() {
    let temp = tempdir().unwrap();
    let html = CatalogBuilder::new()
        .group("Broken")
        .version("V1")
        .table(&[row("BROKEN..EVENT", "Never valid.", "")])
        .build();
    let input = catalog_file(&temp, &html);
    let output = temp.path().join("webhook_gen.go");

    let mut cmd = cargo_bin(temp.path());
    cmd.arg("--paypal-html")
        .arg(&input)
        .arg("--webhook-enum")
        .arg(&output);

    cmd.assert()
        .failure()
        .code(ExitCode::InvalidContent as i32)
        .stderr(predicate::str::contains("ERR: failed to parse event catalog"))
        .stderr(predicate::str::contains("webhooks:"));
    assert!(!output.exists());
}

#[test]
fn missing_input_file_is_io_error() {
    let temp = tempdir().unwrap();
    let output = temp.path().join("webhook_gen.go");

    let mut cmd = cargo_bin(temp.path());
    cmd.arg("--paypal-html")
        .arg(temp.path().join("absent.html"))
        .arg("--webhook-enum")
        .arg(&output);

    cmd.assert()
        .failure()
        .code(ExitCode::Io as i32)
        .stderr(predicate::str::contains("absent.html"));
    assert!(!output.exists());
}

#[test]
fn invalid_config_is_reported() {
    let temp = tempdir().unwrap();
    let input = catalog_file(&temp, &two_group_catalog());
    let config = temp.path().join("bad.toml");
    fs::write(&config, "[generator]\ntab_width = 4\nmax_column = 5\n").unwrap();

    let mut cmd = cargo_bin(temp.path());
    cmd.arg("--paypal-html")
        .arg(&input)
        .arg("--list-events")
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .failure()
        .code(ExitCode::Config as i32)
        .stderr(predicate::str::contains("generator.max_column"));
}
