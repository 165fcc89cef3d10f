//! Typed content schema
//!
//! The renderer reads the effective document through these types instead of
//! walking untyped paths. Every field deserializes leniently: missing or
//! malformed content becomes an empty value, never an error.
//!
//! The editor addresses the same fields through [`ContentField`] (fixed
//! fields) and [`ListSection`] (item lists), both generated from this layout.

pub mod fields;
pub mod lenient;
pub mod sections;

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::lang::Lang;

pub use fields::{ContentField, FieldKind, UnknownField};
pub use sections::{ItemField, ListSection, UnknownSection};

/// The whole content document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    #[serde(deserialize_with = "lenient::record")]
    pub meta: Meta,

    #[serde(deserialize_with = "lenient::record_table")]
    pub i18n: BTreeMap<String, LangDict>,

    #[serde(deserialize_with = "lenient::record")]
    pub contact: Contact,

    #[serde(deserialize_with = "lenient::record")]
    pub assets: Assets,
}

impl SiteContent {
    /// Project a document onto the schema. Never fails.
    pub fn from_document(doc: &Value) -> Self {
        Self::deserialize(doc).unwrap_or_default()
    }

    /// Dictionary for `lang`, empty when the document has none.
    pub fn dict(&self, lang: Lang) -> LangDict {
        self.i18n.get(lang.code()).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meta {
    #[serde(deserialize_with = "lenient::opt_text")]
    pub default_lang: Option<String>,

    #[serde(deserialize_with = "lenient::record")]
    pub admin: AdminMeta,
}

/// Admin gate settings carried by the base document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdminMeta {
    #[serde(deserialize_with = "lenient::opt_text")]
    pub password_sha256: Option<String>,

    #[serde(deserialize_with = "lenient::opt_number")]
    pub session_minutes: Option<f64>,
}

/// Per-language dictionary
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LangDict {
    #[serde(deserialize_with = "lenient::text")]
    pub clinic_name: String,

    #[serde(deserialize_with = "lenient::text")]
    pub clinic_tagline: String,

    #[serde(deserialize_with = "lenient::record")]
    pub hero: Hero,

    #[serde(deserialize_with = "lenient::record")]
    pub trust: Trust,

    #[serde(deserialize_with = "lenient::record")]
    pub services: Section<ServiceItem>,

    #[serde(deserialize_with = "lenient::record")]
    pub doctors: Section<DoctorItem>,

    #[serde(deserialize_with = "lenient::record")]
    pub results: Section<ResultItem>,

    #[serde(deserialize_with = "lenient::record")]
    pub testimonials: Section<TestimonialItem>,

    #[serde(deserialize_with = "lenient::record")]
    pub contact: ContactText,

    #[serde(deserialize_with = "lenient::record")]
    pub footer: Footer,

    #[serde(deserialize_with = "lenient::record")]
    pub form: FormText,

    #[serde(deserialize_with = "lenient::record")]
    pub cta: CtaText,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hero {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,

    #[serde(deserialize_with = "lenient::text")]
    pub subtitle: String,

    #[serde(deserialize_with = "lenient::text")]
    pub quick_text: String,

    #[serde(deserialize_with = "lenient::strings")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Trust {
    #[serde(deserialize_with = "lenient::record")]
    pub item1: TrustItem,

    #[serde(deserialize_with = "lenient::record")]
    pub item2: TrustItem,

    #[serde(deserialize_with = "lenient::record")]
    pub item3: TrustItem,
}

/// Label (`k`) and value (`v`) of a trust badge
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrustItem {
    #[serde(deserialize_with = "lenient::text")]
    pub k: String,

    #[serde(deserialize_with = "lenient::text")]
    pub v: String,
}

/// A list section: intro text and items
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, bound(deserialize = "T: DeserializeOwned + Default"))]
pub struct Section<T> {
    #[serde(deserialize_with = "lenient::text")]
    pub intro: String,

    #[serde(deserialize_with = "lenient::list")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceItem {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,

    #[serde(deserialize_with = "lenient::text")]
    pub subtitle: String,

    #[serde(deserialize_with = "lenient::text")]
    pub icon_key: String,

    #[serde(deserialize_with = "lenient::strings")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DoctorItem {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,

    #[serde(deserialize_with = "lenient::text")]
    pub role: String,

    #[serde(deserialize_with = "lenient::text")]
    pub photo_key: String,

    #[serde(deserialize_with = "lenient::text")]
    pub bio: String,

    #[serde(deserialize_with = "lenient::strings")]
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResultItem {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,

    #[serde(deserialize_with = "lenient::text")]
    pub subtitle: String,

    #[serde(deserialize_with = "lenient::text")]
    pub photo_key: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TestimonialItem {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,

    #[serde(deserialize_with = "lenient::text")]
    pub text: String,

    /// Raw rating as stored: a number from the base document, a string once
    /// edited. See [`TestimonialItem::star_count`].
    pub stars: Value,
}

impl TestimonialItem {
    /// Number of stars to show, 0 to 5.
    ///
    /// A missing, empty, `false` or numeric zero rating shows the full five
    /// stars. Any other value is read as a number (the string `"0"` is zero);
    /// text that is not a number shows none.
    pub fn star_count(&self) -> u8 {
        let n = match &self.stars {
            Value::Null | Value::Bool(false) => return 5,
            Value::Bool(true) => 1.0,
            Value::Number(n) => match n.as_f64() {
                Some(n) if n == 0.0 => return 5,
                Some(n) => n,
                None => return 0,
            },
            Value::String(s) if s.is_empty() => return 5,
            Value::String(s) => rating_number(s),
            _ => f64::NAN,
        };

        if n.is_nan() {
            0
        } else {
            n.clamp(0.0, 5.0).floor() as u8
        }
    }

    /// Rating as text, for the star row's label
    pub fn rating_text(&self) -> String {
        lenient::value_text(&self.stars)
    }
}

/// Numeric reading of an edited rating; blank text is zero, junk is NaN.
fn rating_number(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    match raw.trim_start_matches(['+', '-']) {
        "Infinity" => raw.parse::<f64>().unwrap_or(f64::NAN),
        t if t.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')) => {
            raw.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactText {
    #[serde(deserialize_with = "lenient::text")]
    pub intro: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Footer {
    /// May contain a `{year}` placeholder
    #[serde(deserialize_with = "lenient::text")]
    pub legal: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormText {
    #[serde(deserialize_with = "lenient::text")]
    pub note: String,

    #[serde(deserialize_with = "lenient::text")]
    pub name: String,

    #[serde(deserialize_with = "lenient::text")]
    pub phone: String,

    #[serde(deserialize_with = "lenient::text")]
    pub service: String,

    #[serde(deserialize_with = "lenient::text")]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaText {
    #[serde(deserialize_with = "lenient::text")]
    pub email_us: String,
}

/// Shared contact block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    #[serde(deserialize_with = "lenient::text")]
    pub address: String,

    #[serde(deserialize_with = "lenient::text")]
    pub hours: String,

    #[serde(deserialize_with = "lenient::text")]
    pub hours_short: String,

    #[serde(deserialize_with = "lenient::text")]
    pub location_short: String,

    #[serde(deserialize_with = "lenient::text")]
    pub phone: String,

    #[serde(deserialize_with = "lenient::text")]
    pub email: String,

    #[serde(deserialize_with = "lenient::text")]
    pub maps_url: String,

    #[serde(deserialize_with = "lenient::text")]
    pub map_embed_url: String,

    #[serde(deserialize_with = "lenient::text")]
    pub whatsapp_number: String,
}

/// Shared assets: images and key to image lookup tables
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Assets {
    #[serde(deserialize_with = "lenient::text")]
    pub logo: String,

    #[serde(deserialize_with = "lenient::text")]
    pub hero_image: String,

    #[serde(deserialize_with = "lenient::table")]
    pub icons: BTreeMap<String, String>,

    #[serde(deserialize_with = "lenient::table")]
    pub doctor_photos: BTreeMap<String, String>,

    #[serde(deserialize_with = "lenient::table")]
    pub result_photos: BTreeMap<String, String>,
}

impl Assets {
    pub fn icon(&self, key: &str) -> &str {
        Self::lookup(&self.icons, key)
    }

    pub fn doctor_photo(&self, key: &str) -> &str {
        Self::lookup(&self.doctor_photos, key)
    }

    pub fn result_photo(&self, key: &str) -> &str {
        Self::lookup(&self.result_photos, key)
    }

    fn lookup<'a>(table: &'a BTreeMap<String, String>, key: &str) -> &'a str {
        table.get(key).map(String::as_str).unwrap_or("")
    }
}
