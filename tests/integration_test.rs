// Integration tests for the lvl command line surface

use assert_cmd::cargo::cargo_bin_cmd;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// `lvl` isolated from the user's config and environment.
fn lvl(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("lvl");
    cmd.current_dir(home.path())
        .env("LVL_CONFIG_DIR", home.path())
        .env_remove("LVL_API_KEY")
        .env_remove("LVL_API_URL")
        .env_remove("LVL_LOG");
    cmd
}

#[test]
fn help_lists_resources() {
    let home = TempDir::new().unwrap();
    lvl(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("organisation"))
        .stdout(predicate::str::contains("system"))
        .stdout(predicate::str::contains("--api-key"));
}

#[test]
fn system_help_lists_nested_commands() {
    let home = TempDir::new().unwrap();
    for sub in ["checks", "cookbooks", "sshkeys", "network", "volume", "access"] {
        lvl(&home)
            .args(["system", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains(sub));
    }
}

#[test]
fn missing_api_key_is_reported() {
    let home = TempDir::new().unwrap();
    lvl(&home)
        .args(["organisation", "get"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key is required"));
}

#[test]
fn configure_then_config_show_masks_key() {
    let home = TempDir::new().unwrap();
    lvl(&home)
        .args(["configure", "--key", "secret", "--org-id", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved API key"));

    lvl(&home)
        .arg("config-show")
        .assert()
        .success()
        .stdout(predicate::str::contains("*****"))
        .stdout(predicate::str::contains("\"org_id\": 3"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn organisation_get_prints_table() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/organisations")
            .header("authorization", "k");
        then.status(200).json_body(json!({
            "organisations": [
                {"id": 3, "name": "Acme", "city": "Gent", "country": {"name": "Belgium"}, "users": [{}, {}]}
            ]
        }));
    });

    lvl(&home)
        .args(["--api-key", "k", "--api-url", &server.base_url(), "organisation", "get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME"))
        .stdout(predicate::str::contains("Acme"))
        .stdout(predicate::str::contains("Belgium"));
    mock.assert();
}

#[test]
fn declined_delete_sends_nothing() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/systems/7");
        then.status(200)
            .json_body(json!({"system": {"id": 7, "name": "web01"}}));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/systems/7");
        then.status(204);
    });

    lvl(&home)
        .env("LVL_API_KEY", "k")
        .env("LVL_API_URL", server.base_url())
        .args(["system", "delete", "7"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."))
        .stderr(predicate::str::contains("Delete system web01 (7)?"));
    delete.assert_hits(0);
}

#[test]
fn completion_script_names_binary() {
    let home = TempDir::new().unwrap();
    lvl(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lvl"));
}
