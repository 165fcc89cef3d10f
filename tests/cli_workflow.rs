//! CLI Workflow Tests
//!
//! Runs the `clinic-site` binary against a temporary site root: login gate,
//! edits, rendering and export.

mod fixtures;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use clinic_site::auth::sha256_hex;
use clinic_site::site_content::lookup;
use serde_json::Value;

fn clinic_site(site: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clinic-site"))
        .arg("--site")
        .arg(site)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_editing_requires_login() {
    let site = fixtures::site_dir();

    let output = clinic_site(site.path(), &["set", "hero.title", "X"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Not logged in"));
    assert!(!site.path().join(".clinic-admin/derm_site_override_v1.json").exists());
}

#[test]
fn test_wrong_password() {
    let site = fixtures::site_dir();

    let output = clinic_site(site.path(), &["login", "--password", "nope"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Wrong password."));

    let status = clinic_site(site.path(), &["status"]);
    assert!(stdout(&status).contains("Logged out"));
}

#[test]
fn test_login_edit_render_export() {
    let site = fixtures::site_dir();

    let login = clinic_site(site.path(), &["login", "--password", fixtures::PASSWORD]);
    assert!(login.status.success(), "{}", stderr(&login));
    assert!(stdout(&clinic_site(site.path(), &["status"])).contains("Logged in until"));

    let set = clinic_site(site.path(), &["set", "hero.title", "Hello there", "--lang", "en"]);
    assert!(set.status.success(), "{}", stderr(&set));
    assert!(stdout(&set).contains("\"title\": \"Hello there\""));

    let add = clinic_site(site.path(), &["add", "results", "--lang", "en"]);
    assert!(add.status.success(), "{}", stderr(&add));
    assert!(stdout(&add).contains("Added results item #0"));

    let fields = stdout(&clinic_site(site.path(), &["fields", "--lang", "en"]));
    assert!(fields.contains("Fields (en):"));
    let hero_line = fields.lines().find(|l| l.contains("hero.title")).unwrap();
    assert!(hero_line.contains("[en]"));
    assert!(hero_line.contains("Hero title"));
    assert!(hero_line.contains("Hello there"));
    let phone_line = fields.lines().find(|l| l.contains("contact.phone")).unwrap();
    assert!(phone_line.contains("[all]"));

    let items = stdout(&clinic_site(site.path(), &["items", "services"]));
    assert!(items.contains("services (sq, 3 items):"));
    assert!(items.contains("Bullets (one per line)"));
    assert!(items.contains("Nishane | Ekzema"));

    let get = clinic_site(site.path(), &["get", "i18n.{lang}.hero.title", "--lang", "en"]);
    assert_eq!(stdout(&get).trim(), "Hello there");

    let render = clinic_site(site.path(), &["render"]);
    assert!(render.status.success(), "{}", stderr(&render));
    let en = fs::read_to_string(site.path().join("dist/index.en.html")).unwrap();
    let index = fs::read_to_string(site.path().join("dist/index.html")).unwrap();
    assert!(en.contains("Hello there"));
    assert!(en.contains("New result"));
    assert!(index.contains("<html lang=\"sq\">"));

    let export = clinic_site(site.path(), &["export"]);
    assert!(export.status.success(), "{}", stderr(&export));
    let exported: Value = serde_json::from_str(
        &fs::read_to_string(site.path().join("content.export.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(lookup(&exported, "i18n.en.hero.title").unwrap(), "Hello there");
    assert_eq!(
        lookup(&exported, "i18n.sq.clinicName").unwrap(),
        "Klinika Derma"
    );

    let logout = clinic_site(site.path(), &["logout"]);
    assert!(logout.status.success());
    let denied = clinic_site(site.path(), &["preview"]);
    assert_eq!(denied.status.code(), Some(2));
}

#[test]
fn test_site_toml_and_state_dir_flag() {
    let site = fixtures::site_dir();
    fs::write(
        site.path().join("site.toml"),
        "output = \"public\"\ndefault_lang = \"en\"\n",
    )
    .unwrap();
    let state = site.path().join("custom-state");
    let state_arg = state.to_string_lossy().to_string();

    let login = clinic_site(
        site.path(),
        &["--state-dir", &state_arg, "login", "--password", fixtures::PASSWORD],
    );
    assert!(login.status.success(), "{}", stderr(&login));
    assert!(state.join("derm_admin_session_v1.json").exists());

    let toml_text = fs::read_to_string(site.path().join("site.toml")).unwrap();
    let status = stdout(&clinic_site(site.path(), &["--state-dir", &state_arg, "status"]));
    assert!(status.contains("Logged in until"));
    assert!(status.contains("builtin"));
    assert!(status.contains(&format!("(sha256 {})", sha256_hex(&toml_text))));
    assert!(status.contains("cli"));

    let render = clinic_site(site.path(), &["render"]);
    assert!(render.status.success(), "{}", stderr(&render));
    let index = fs::read_to_string(site.path().join("public/index.html")).unwrap();
    assert!(index.contains("<html lang=\"en\">"));
}

#[test]
fn test_missing_content_fails() {
    let site = tempfile::TempDir::new().unwrap();

    let output = clinic_site(site.path(), &["render"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error loading content"));
}

#[test]
fn test_unknown_config_key_fails() {
    let site = fixtures::site_dir();
    fs::write(site.path().join("site.toml"), "outptu = \"x\"\n").unwrap();

    let output = clinic_site(site.path(), &["status"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error loading config"));
}

#[test]
fn test_hash_password_needs_no_site() {
    let output = Command::new(env!("CARGO_BIN_EXE_clinic-site"))
        .args(["hash-password", "secret"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with(
        "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
    ));
    assert!(text.contains("\"passwordSha256\""));
}

#[test]
fn test_mailto() {
    let site = fixtures::site_dir();

    let output = clinic_site(
        site.path(),
        &["mailto", "--name", "Jo", "--service", "Laser", "--lang", "en"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let url = stdout(&output);
    assert!(url.starts_with("mailto:info%40clinic.example?subject=Appointment%20request&body="));
    assert!(url.contains("Name%3A%20Jo"));
}
