//! Admin editor session
//!
//! Owns the base document, the override document and the edit language.
//! Reads go through the effective document (base merged with overrides);
//! writes go into the override document only, and every write is persisted
//! in full before it returns.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;
use site_content::{
    deep_merge, get, set, ContentPath, KeyValueStore, OverrideStore, PathError, StoreError,
};
use tracing::{debug, info};

use crate::lang::Lang;
use crate::schema::lenient::value_text;
use crate::schema::{ContentField, FieldKind, ListSection};

/// Errors for editor operations
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Unknown field '{field}' for {section}")]
    UnknownField { section: ListSection, field: String },

    #[error("Index {index} out of range for {section} ({len} items)")]
    IndexOutOfRange {
        section: ListSection,
        index: usize,
        len: usize,
    },

    #[error("Invalid path: {0}")]
    Path(#[from] PathError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Split multi-line input into trimmed, non-blank entries.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convert raw input to the value stored for a field of `kind`.
pub fn input_value(kind: FieldKind, raw: &str) -> Value {
    match kind {
        FieldKind::Text => Value::String(raw.to_string()),
        FieldKind::Lines => Value::Array(split_lines(raw).into_iter().map(Value::String).collect()),
    }
}

/// Display form of a stored value: sequences one entry per line.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => items.iter().map(value_text).collect::<Vec<_>>().join("\n"),
        Some(other) => value_text(other),
        None => String::new(),
    }
}

/// Editing context over a base document and an override store.
#[derive(Debug)]
pub struct EditorSession<S> {
    base: Value,
    overrides: Value,
    lang: Lang,
    store: OverrideStore<S>,
}

impl<S: KeyValueStore> EditorSession<S> {
    /// Start a session, loading overrides from the store.
    pub fn open(base: Value, store: OverrideStore<S>, lang: Lang) -> Self {
        let overrides = store.load();
        Self {
            base,
            overrides,
            lang,
            store,
        }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn set_language(&mut self, lang: Lang) {
        debug!(%lang, "edit language changed");
        self.lang = lang;
    }

    pub fn base(&self) -> &Value {
        &self.base
    }

    pub fn overrides(&self) -> &Value {
        &self.overrides
    }

    /// Base merged with overrides, recomputed on every call.
    pub fn effective(&self) -> Value {
        deep_merge(&self.base, &self.overrides)
    }

    fn resolve(&self, template: &ContentPath) -> ContentPath {
        template.resolve(self.lang.code())
    }

    /// Effective value at a template path in the edit language.
    pub fn read_working_value(&self, template: &ContentPath) -> Option<Value> {
        get(&self.effective(), &self.resolve(template)).cloned()
    }

    /// Effective value of a fixed field, as shown in an input.
    pub fn field_value(&self, field: ContentField) -> String {
        display_value(self.read_working_value(&field.path()).as_ref())
    }

    /// Write raw input for a fixed field.
    pub fn apply_edit(&mut self, field: ContentField, raw: &str) -> Result<(), EditorError> {
        self.apply_path_edit(&field.path(), input_value(field.kind(), raw))
    }

    /// Write a value at a template path in the override document.
    pub fn apply_path_edit(&mut self, template: &ContentPath, value: Value) -> Result<(), EditorError> {
        let path = self.resolve(template);
        set(&mut self.overrides, &path, value);
        debug!(%path, "override written");
        self.persist()
    }

    /// Effective items of a list section, empty if the section has none.
    pub fn items(&self, section: ListSection) -> Vec<Value> {
        match self.read_working_value(&section.items_path()) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        }
    }

    /// Display value of one item field.
    pub fn item_field_value(&self, section: ListSection, index: usize, key: &str) -> String {
        let items = self.items(section);
        display_value(items.get(index).and_then(|item| item.get(key)))
    }

    /// Write raw input for one field of one list item.
    ///
    /// The override keeps the whole array: if it does not hold one yet, the
    /// current effective array is copied in first.
    pub fn apply_item_edit(
        &mut self,
        section: ListSection,
        index: usize,
        key: &str,
        raw: &str,
    ) -> Result<(), EditorError> {
        let field = section.field(key).ok_or_else(|| EditorError::UnknownField {
            section,
            field: key.to_string(),
        })?;

        let items = self.items(section);
        if index >= items.len() {
            return Err(EditorError::IndexOutOfRange {
                section,
                index,
                len: items.len(),
            });
        }

        let array_path = self.resolve(&section.items_path());
        if !matches!(get(&self.overrides, &array_path), Some(Value::Array(_))) {
            set(&mut self.overrides, &array_path, Value::Array(items));
        }

        let item_path = array_path.index(index).child(key);
        set(&mut self.overrides, &item_path, input_value(field.kind, raw));
        debug!(path = %item_path, "override written");
        self.persist()
    }

    /// Append the section's template item. Returns the new item count.
    pub fn add_item(&mut self, section: ListSection) -> Result<usize, EditorError> {
        let mut items = self.items(section);
        items.push(section.template_item());
        let len = items.len();

        self.replace_items(section, items)?;
        info!(%section, len, "item added");
        Ok(len)
    }

    /// Remove the item at `index`. Returns the removed item.
    pub fn delete_item(&mut self, section: ListSection, index: usize) -> Result<Value, EditorError> {
        let mut items = self.items(section);
        if index >= items.len() {
            return Err(EditorError::IndexOutOfRange {
                section,
                index,
                len: items.len(),
            });
        }
        let removed = items.remove(index);

        self.replace_items(section, items)?;
        info!(%section, index, "item deleted");
        Ok(removed)
    }

    fn replace_items(&mut self, section: ListSection, items: Vec<Value>) -> Result<(), EditorError> {
        let path = self.resolve(&section.items_path());
        set(&mut self.overrides, &path, Value::Array(items));
        self.persist()
    }

    /// Drop all overrides, in memory and in the store.
    pub fn clear(&mut self) -> Result<(), EditorError> {
        self.store.clear()?;
        self.overrides = site_content::empty_document();
        info!("overrides cleared");
        Ok(())
    }

    /// Override document as pretty JSON
    pub fn preview(&self) -> String {
        serde_json::to_string_pretty(&self.overrides).unwrap_or_default()
    }

    /// Write the effective document as pretty JSON for copying back over the
    /// deployed base document.
    pub fn export(&self, path: &Path) -> Result<(), EditorError> {
        let json = serde_json::to_string_pretty(&self.effective())?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;
        info!(path = %path.display(), "exported effective document");
        Ok(())
    }

    fn persist(&self) -> Result<(), EditorError> {
        self.store.save(&self.overrides)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use site_content::MemoryStore;

    fn session(base: Value) -> EditorSession<MemoryStore> {
        EditorSession::open(base, OverrideStore::new(MemoryStore::new()), Lang::En)
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("A\n\nB \n"), vec!["A", "B"]);
        assert_eq!(split_lines("  \r\n x\r\n"), vec!["x"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(Some(&json!(["a", "b"]))), "a\nb");
        assert_eq!(display_value(Some(&json!(5))), "5");
        assert_eq!(display_value(None), "");
    }

    #[test]
    fn test_field_edit_goes_to_overrides() {
        let mut s = session(json!({"i18n": {"en": {"hero": {"title": "Old", "subtitle": "Keep"}}}}));

        s.apply_edit(ContentField::HeroTitle, "New").unwrap();

        assert_eq!(s.overrides(), &json!({"i18n": {"en": {"hero": {"title": "New"}}}}));
        assert_eq!(s.field_value(ContentField::HeroTitle), "New");
        assert_eq!(s.field_value(ContentField::HeroSubtitle), "Keep");
        assert_eq!(s.base()["i18n"]["en"]["hero"]["title"], "Old");
    }

    #[test]
    fn test_lines_field() {
        let mut s = session(json!({}));
        s.apply_edit(ContentField::HeroHighlights, "A\n\nB \n").unwrap();
        assert_eq!(s.overrides()["i18n"]["en"]["hero"]["highlights"], json!(["A", "B"]));
        assert_eq!(s.field_value(ContentField::HeroHighlights), "A\nB");
    }

    #[test]
    fn test_language_scopes_edits() {
        let mut s = session(json!({"i18n": {"en": {"clinicName": "EN"}, "sq": {"clinicName": "SQ"}}}));
        s.set_language(Lang::Sq);
        s.apply_edit(ContentField::ClinicName, "Klinika").unwrap();

        assert_eq!(s.field_value(ContentField::ClinicName), "Klinika");
        s.set_language(Lang::En);
        assert_eq!(s.field_value(ContentField::ClinicName), "EN");
    }

    #[test]
    fn test_shared_field_ignores_language() {
        let mut s = session(json!({"contact": {"phone": "1"}}));
        s.apply_edit(ContentField::Phone, "+355 4 222").unwrap();
        s.set_language(Lang::Sq);
        assert_eq!(s.field_value(ContentField::Phone), "+355 4 222");
    }

    #[test]
    fn test_item_edit_copies_array_first() {
        let mut s = session(json!({"i18n": {"en": {"results": {"items": [
            {"title": "A", "photoKey": "res1"},
            {"title": "B", "photoKey": "res2"}
        ]}}}}));

        s.apply_item_edit(ListSection::Results, 1, "title", "B2").unwrap();

        let items = &s.overrides()["i18n"]["en"]["results"]["items"];
        assert_eq!(items.as_array().unwrap().len(), 2);
        assert_eq!(items[0]["title"], "A");
        assert_eq!(items[1]["title"], "B2");
        assert_eq!(items[1]["photoKey"], "res2");
    }

    #[test]
    fn test_item_edit_rejects_bad_input() {
        let mut s = session(json!({"i18n": {"en": {"results": {"items": [{"title": "A"}]}}}}));

        assert!(matches!(
            s.apply_item_edit(ListSection::Results, 0, "bullets", "x"),
            Err(EditorError::UnknownField { .. })
        ));
        assert!(matches!(
            s.apply_item_edit(ListSection::Results, 3, "title", "x"),
            Err(EditorError::IndexOutOfRange { index: 3, len: 1, .. })
        ));
        assert_eq!(s.overrides(), &json!({}));
    }

    #[test]
    fn test_delete_out_of_range_writes_nothing() {
        let mut s = session(json!({}));
        assert!(s.delete_item(ListSection::Doctors, 0).is_err());
        assert_eq!(s.overrides(), &json!({}));
    }

    #[test]
    fn test_clear() {
        let mut s = session(json!({"contact": {"email": "a@b.c"}}));
        s.apply_edit(ContentField::Email, "x@y.z").unwrap();
        s.clear().unwrap();

        assert_eq!(s.overrides(), &json!({}));
        assert_eq!(s.field_value(ContentField::Email), "a@b.c");
        assert_eq!(s.effective(), *s.base());
    }

    #[test]
    fn test_preview_is_overrides() {
        let mut s = session(json!({"contact": {"email": "a@b.c", "phone": "1"}}));
        s.apply_edit(ContentField::Phone, "2").unwrap();

        let preview: Value = serde_json::from_str(&s.preview()).unwrap();
        assert_eq!(preview, json!({"contact": {"phone": "2"}}));
    }
}
