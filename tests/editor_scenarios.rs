//! Editor Scenario Tests
//!
//! Editing sessions against a file-backed state directory: edits land in the
//! override document, survive a reopen, and never touch the base document.

mod fixtures;

use chrono::{Duration, Utc};
use clinic_site::auth::{SessionStore, SessionToken};
use clinic_site::site_content::{
    get, lookup, ContentPath, FileStore, KeyValueStore, MemoryStore, OverrideStore, OVERRIDE_KEY,
};
use clinic_site::{AdminGate, ContentField, EditorSession, GateState, Lang, ListSection};
use serde_json::{json, Value};
use tempfile::TempDir;

fn open(base: Value, store: &FileStore, lang: Lang) -> EditorSession<&FileStore> {
    EditorSession::open(base, OverrideStore::new(store), lang)
}

fn stored_overrides(store: &FileStore) -> Value {
    let raw = store.get_item(OVERRIDE_KEY).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

// =============================================================================
// List sections
// =============================================================================

#[test]
fn test_add_item_appends_template() {
    let state = TempDir::new().unwrap();
    let store = FileStore::new(state.path());
    let base = json!({"i18n": {"en": {"services": {"items": [{"title": "Skin Check"}]}}}});

    let mut editor = open(base, &store, Lang::En);
    let len = editor.add_item(ListSection::Services).unwrap();
    assert_eq!(len, 2);

    let saved = stored_overrides(&store);
    let items = lookup(&saved, "i18n.en.services.items").unwrap();
    assert_eq!(items.as_array().unwrap().len(), 2);
    assert_eq!(items[0], json!({"title": "Skin Check"}));
    assert_eq!(items[1], ListSection::Services.template_item());
}

#[test]
fn test_delete_first_of_three() {
    let state = TempDir::new().unwrap();
    let store = FileStore::new(state.path());
    let base = json!({"i18n": {"sq": {"doctors": {"items": [
        {"name": "A"}, {"name": "B"}, {"name": "C"}
    ]}}}});

    let mut editor = open(base, &store, Lang::Sq);
    let removed = editor.delete_item(ListSection::Doctors, 0).unwrap();
    assert_eq!(removed, json!({"name": "A"}));

    let saved = stored_overrides(&store);
    assert_eq!(
        lookup(&saved, "i18n.sq.doctors.items").unwrap(),
        &json!([{"name": "B"}, {"name": "C"}])
    );
}

#[test]
fn test_item_edit_keeps_array_shape() {
    let state = TempDir::new().unwrap();
    let store = FileStore::new(state.path());
    let mut editor = open(fixtures::base_document(), &store, Lang::Sq);

    editor
        .apply_item_edit(ListSection::Services, 1, "bullets", "Fytyrë\n\n Këmbë \n")
        .unwrap();

    let saved = stored_overrides(&store);
    let items = lookup(&saved, "i18n.sq.services.items").unwrap();
    assert!(items.is_array());
    assert_eq!(items.as_array().unwrap().len(), 3);
    assert_eq!(items[1]["bullets"], json!(["Fytyrë", "Këmbë"]));
    assert_eq!(items[0]["title"], "Kontroll i lëkurës");

    let effective = editor.effective();
    assert_eq!(
        lookup(&effective, "i18n.sq.services.items.1.title").unwrap(),
        "Lazer"
    );
}

#[test]
fn test_sections_are_per_language() {
    let state = TempDir::new().unwrap();
    let store = FileStore::new(state.path());
    let mut editor = open(fixtures::base_document(), &store, Lang::En);

    editor.add_item(ListSection::Results).unwrap();

    assert_eq!(editor.items(ListSection::Results).len(), 1);
    editor.set_language(Lang::Sq);
    assert_eq!(editor.items(ListSection::Results).len(), 1);
    assert_eq!(
        editor.item_field_value(ListSection::Results, 0, "title"),
        "Akne"
    );
}

// =============================================================================
// Fixed fields
// =============================================================================

#[test]
fn test_lines_input_is_split_and_trimmed() {
    let state = TempDir::new().unwrap();
    let store = FileStore::new(state.path());
    let mut editor = open(fixtures::base_document(), &store, Lang::En);

    editor.apply_edit(ContentField::HeroHighlights, "A\n\nB \n").unwrap();

    let saved = stored_overrides(&store);
    assert_eq!(
        lookup(&saved, "i18n.en.hero.highlights").unwrap(),
        &json!(["A", "B"])
    );
    assert_eq!(editor.field_value(ContentField::HeroHighlights), "A\nB");
}

#[test]
fn test_blank_edit_falls_back_to_base() {
    let state = TempDir::new().unwrap();
    let store = FileStore::new(state.path());
    let mut editor = open(fixtures::base_document(), &store, Lang::En);

    editor.apply_edit(ContentField::HeroTitle, "").unwrap();

    assert_eq!(
        stored_overrides(&store),
        json!({"i18n": {"en": {"hero": {"title": ""}}}})
    );
    assert_eq!(editor.field_value(ContentField::HeroTitle), "Healthy skin");
    assert_eq!(
        lookup(&editor.effective(), "i18n.en.hero.title").unwrap(),
        "Healthy skin"
    );
}

#[test]
fn test_edits_survive_reopen() {
    let state = TempDir::new().unwrap();
    let store = FileStore::new(state.path());

    {
        let mut editor = open(fixtures::base_document(), &store, Lang::Sq);
        editor.apply_edit(ContentField::HeroTitle, "Titull i ri").unwrap();
        editor.apply_edit(ContentField::Phone, "+355 68 000 0000").unwrap();
    }

    let editor = open(fixtures::base_document(), &store, Lang::Sq);
    assert_eq!(editor.field_value(ContentField::HeroTitle), "Titull i ri");
    assert_eq!(
        editor.field_value(ContentField::Phone),
        "+355 68 000 0000"
    );
    assert_eq!(
        editor.overrides(),
        &json!({
            "i18n": {"sq": {"hero": {"title": "Titull i ri"}}},
            "contact": {"phone": "+355 68 000 0000"}
        })
    );
}

#[test]
fn test_base_document_untouched() {
    let site = fixtures::site_dir();
    let before = std::fs::read_to_string(site.path().join("content.json")).unwrap();
    let store = FileStore::new(site.path().join(".clinic-admin"));

    let mut editor = open(fixtures::base_document(), &store, Lang::En);
    editor.apply_edit(ContentField::ClinicName, "Renamed").unwrap();
    editor.add_item(ListSection::Doctors).unwrap();

    assert_eq!(editor.base(), &fixtures::base_document());
    let after = std::fs::read_to_string(site.path().join("content.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_corrupt_overrides_start_empty() {
    let state = TempDir::new().unwrap();
    let store = FileStore::new(state.path());
    store.set_item(OVERRIDE_KEY, "{not json").unwrap();

    let mut editor = open(fixtures::base_document(), &store, Lang::Sq);
    assert_eq!(editor.overrides(), &json!({}));

    editor.apply_edit(ContentField::FooterLegal, "©").unwrap();
    assert_eq!(
        stored_overrides(&store),
        json!({"i18n": {"sq": {"footer": {"legal": "©"}}}})
    );
}

#[test]
fn test_clear_then_export() {
    let state = TempDir::new().unwrap();
    let store = FileStore::new(state.path());
    let mut editor = open(fixtures::base_document(), &store, Lang::En);

    editor.apply_edit(ContentField::HeroTitle, "Changed").unwrap();
    let export_path = state.path().join("out/content.json");
    editor.export(&export_path).unwrap();

    let exported: Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(lookup(&exported, "i18n.en.hero.title").unwrap(), "Changed");
    assert_eq!(lookup(&exported, "i18n.sq.hero.title").unwrap(), "Lëkurë e shëndetshme");

    editor.clear().unwrap();
    assert!(store.get_item(OVERRIDE_KEY).unwrap().is_none());
    assert_eq!(editor.effective(), fixtures::base_document());
}

#[test]
fn test_templated_path_reads() {
    let store = MemoryStore::new();
    let editor = EditorSession::open(fixtures::base_document(), OverrideStore::new(&store), Lang::En);

    let path: ContentPath = "i18n.{lang}.services.items.0.bullets".parse().unwrap();
    assert_eq!(editor.read_working_value(&path), Some(json!(["Moles"])));

    let missing: ContentPath = "i18n.{lang}.doctors.items.0".parse().unwrap();
    assert_eq!(editor.read_working_value(&missing), None);
    assert!(get(editor.base(), &missing.resolve("sq")).is_some());
}

// =============================================================================
// Admin gate
// =============================================================================

#[test]
fn test_expired_session_is_logged_out() {
    let state = TempDir::new().unwrap();
    let store = FileStore::new(state.path());
    let now = Utc::now();

    let past = SessionToken {
        expires_at: (now - Duration::hours(1)).timestamp_millis(),
    };
    SessionStore::new(&store).save(&past).unwrap();

    let gate = AdminGate::new(&store);
    assert_eq!(gate.state(now), GateState::LoggedOut);
    assert!(!gate.is_logged_in(now));
}

#[test]
fn test_login_uses_document_session_length() {
    let state = TempDir::new().unwrap();
    let store = FileStore::new(state.path());
    let now = Utc::now();
    let gate = AdminGate::new(&store);

    let token = gate
        .login(&fixtures::base_document(), fixtures::PASSWORD, now)
        .unwrap();
    assert_eq!(
        token.expires_at,
        (now + Duration::minutes(30)).timestamp_millis()
    );

    assert!(gate.is_logged_in(now + Duration::minutes(29)));
    assert!(!gate.is_logged_in(now + Duration::minutes(30)));

    gate.logout().unwrap();
    assert_eq!(gate.state(now), GateState::LoggedOut);
}

#[test]
fn test_wrong_password_keeps_session() {
    let state = TempDir::new().unwrap();
    let store = FileStore::new(state.path());
    let now = Utc::now();
    let gate = AdminGate::new(&store);
    let base = fixtures::base_document();

    gate.login(&base, fixtures::PASSWORD, now).unwrap();
    let err = gate.login(&base, "guess", now).unwrap_err();

    assert_eq!(err.to_string(), "Wrong password.");
    assert!(gate.is_logged_in(now));
}

#[test]
fn test_overridden_hash_is_ignored() {
    let state = TempDir::new().unwrap();
    let store = FileStore::new(state.path());
    let base = fixtures::base_document();

    // An override cannot change the password: login reads the base only
    let overrides = OverrideStore::new(&store);
    overrides
        .save(&json!({"meta": {"admin": {"passwordSha256": clinic_site::auth::sha256_hex("other")}}}))
        .unwrap();

    let gate = AdminGate::new(&store);
    assert!(gate.login(&base, "other", Utc::now()).is_err());
    assert!(gate.login(&base, fixtures::PASSWORD, Utc::now()).is_ok());
}
