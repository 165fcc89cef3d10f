//! List sections edited item by item

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};
use site_content::ContentPath;

use super::fields::FieldKind;

/// One editable field of a list item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn text(key: &'static str, label: &'static str) -> ItemField {
    ItemField {
        key,
        label,
        kind: FieldKind::Text,
    }
}

const fn lines(key: &'static str, label: &'static str) -> ItemField {
    ItemField {
        key,
        label,
        kind: FieldKind::Lines,
    }
}

const SERVICE_FIELDS: &[ItemField] = &[
    text("title", "Title"),
    text("subtitle", "Subtitle"),
    text("iconKey", "Icon key (shield/laser/skin)"),
    lines("bullets", "Bullets (one per line)"),
];

const DOCTOR_FIELDS: &[ItemField] = &[
    text("name", "Name"),
    text("role", "Role"),
    text("photoKey", "Photo key (doc1/doc2…)"),
    text("bio", "Bio"),
    lines("badges", "Badges (one per line)"),
];

const TESTIMONIAL_FIELDS: &[ItemField] = &[
    text("name", "Name"),
    text("text", "Text"),
    text("stars", "Stars (1–5)"),
];

const RESULT_FIELDS: &[ItemField] = &[
    text("title", "Title"),
    text("subtitle", "Subtitle"),
    text("photoKey", "Photo key (res1/res2…)"),
];

/// Unknown section name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown section '{0}' (expected services, doctors, testimonials or results)")]
pub struct UnknownSection(pub String);

/// A list-of-records section of the per-language dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListSection {
    Services,
    Doctors,
    Testimonials,
    Results,
}

impl ListSection {
    pub const ALL: [ListSection; 4] = [
        ListSection::Services,
        ListSection::Doctors,
        ListSection::Testimonials,
        ListSection::Results,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ListSection::Services => "services",
            ListSection::Doctors => "doctors",
            ListSection::Testimonials => "testimonials",
            ListSection::Results => "results",
        }
    }

    /// Template path of the item array
    pub fn items_path(&self) -> ContentPath {
        ContentPath::parse(&format!("i18n.{{lang}}.{}.items", self.name()))
            .unwrap_or_else(|_| unreachable!())
    }

    pub fn fields(&self) -> &'static [ItemField] {
        match self {
            ListSection::Services => SERVICE_FIELDS,
            ListSection::Doctors => DOCTOR_FIELDS,
            ListSection::Testimonials => TESTIMONIAL_FIELDS,
            ListSection::Results => RESULT_FIELDS,
        }
    }

    pub fn field(&self, key: &str) -> Option<&'static ItemField> {
        self.fields().iter().find(|f| f.key == key)
    }

    /// Item appended by "add"
    pub fn template_item(&self) -> Value {
        match self {
            ListSection::Services => json!({
                "title": "New service",
                "subtitle": "",
                "iconKey": "shield",
                "bullets": []
            }),
            ListSection::Doctors => json!({
                "name": "New doctor",
                "role": "",
                "photoKey": "doc1",
                "bio": "",
                "badges": []
            }),
            ListSection::Testimonials => json!({
                "name": "Initials",
                "text": "",
                "stars": 5
            }),
            ListSection::Results => json!({
                "title": "New result",
                "subtitle": "",
                "photoKey": "res1"
            }),
        }
    }
}

impl fmt::Display for ListSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ListSection {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|section| section.name() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}
