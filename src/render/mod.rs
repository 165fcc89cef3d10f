//! Site renderer
//!
//! Builds the effective document once, then projects it per language into a
//! [`PageView`] of plain strings and renders that as a static HTML page.
//! Missing content renders as empty text; unknown asset keys render as an
//! empty image source.

mod html;
pub mod links;

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use serde_json::Value;
use site_content::{deep_merge, lookup};

use crate::lang::Lang;
use crate::schema::SiteContent;

pub use html::escape_html;
pub use links::AppointmentRequest;

/// Static label keys looked up in the language dictionary
pub const LABEL_KEYS: &[&str] = &[
    "nav.services",
    "nav.doctors",
    "nav.results",
    "nav.testimonials",
    "nav.contact",
    "nav.book",
    "hero.badge",
    "cta.book",
    "cta.call",
    "cta.whatsApp",
    "cta.emailUs",
    "cta.directions",
    "trust.item1.k",
    "trust.item2.k",
    "trust.item3.k",
    "services.title",
    "doctors.title",
    "results.title",
    "testimonials.title",
    "contact.title",
    "contact.addressLabel",
    "contact.hoursLabel",
    "contact.phoneLabel",
    "contact.emailLabel",
    "form.title",
    "form.name",
    "form.phone",
    "form.service",
    "form.message",
    "form.submit",
    "langToggle",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceCard {
    pub icon: String,
    pub title: String,
    pub subtitle: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorCard {
    pub photo: String,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultCard {
    pub photo: String,
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestimonialCard {
    pub name: String,
    pub text: String,
    pub stars: u8,
    /// Rating as entered, for the accessible label
    pub rating: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactView {
    pub address: String,
    pub hours: String,
    pub hours_short: String,
    pub location_short: String,
    pub phone: String,
    pub phone_href: String,
    pub email: String,
    pub email_href: String,
    pub email_cta_href: String,
    pub maps_href: String,
    pub whatsapp_href: String,
    pub map_embed: String,
}

/// Everything the page shows for one language
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
    pub lang: Lang,
    pub logo: String,
    pub hero_image: String,
    pub clinic_name: String,
    pub clinic_tagline: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_quick_text: String,
    pub highlights: [String; 3],
    pub trust: [String; 3],
    pub services_intro: String,
    pub doctors_intro: String,
    pub results_intro: String,
    pub testimonials_intro: String,
    pub contact_intro: String,
    pub footer_legal: String,
    pub form_note: String,
    pub labels: BTreeMap<&'static str, String>,
    pub contact: ContactView,
    pub services: Vec<ServiceCard>,
    pub doctors: Vec<DoctorCard>,
    pub results: Vec<ResultCard>,
    pub testimonials: Vec<TestimonialCard>,
    /// Options of the appointment form's service select
    pub service_options: Vec<String>,
}

impl PageView {
    /// Static label text, empty when the dictionary lacks it
    pub fn label(&self, key: &str) -> &str {
        self.labels.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Projects an effective document into pages.
#[derive(Debug, Clone)]
pub struct SiteRenderer {
    effective: Value,
    content: SiteContent,
    year: i32,
}

impl SiteRenderer {
    /// Merge overrides onto the base document and prepare to render.
    pub fn new(base: &Value, overrides: &Value) -> Self {
        Self::from_effective(deep_merge(base, overrides))
    }

    pub fn from_effective(effective: Value) -> Self {
        let content = SiteContent::from_document(&effective);
        Self {
            effective,
            content,
            year: Utc::now().year(),
        }
    }

    /// Year substituted for `{year}` in the footer
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn effective(&self) -> &Value {
        &self.effective
    }

    /// Language declared by the document, `sq` otherwise
    pub fn default_lang(&self) -> Lang {
        Lang::from_document(&self.effective)
    }

    pub fn view(&self, lang: Lang) -> PageView {
        let dict = self.content.dict(lang);
        let assets = &self.content.assets;
        let contact = &self.content.contact;
        let raw_dict = self.effective.get("i18n").and_then(|i| i.get(lang.code()));

        let nth = |items: &[String], i: usize| items.get(i).cloned().unwrap_or_default();

        let labels = LABEL_KEYS
            .iter()
            .filter_map(|key| {
                let value = raw_dict.and_then(|d| lookup(d, key))?.as_str()?;
                Some((*key, value.to_string()))
            })
            .collect();

        PageView {
            lang,
            logo: assets.logo.clone(),
            hero_image: assets.hero_image.clone(),
            clinic_name: dict.clinic_name.clone(),
            clinic_tagline: dict.clinic_tagline.clone(),
            hero_title: dict.hero.title.clone(),
            hero_subtitle: dict.hero.subtitle.clone(),
            hero_quick_text: dict.hero.quick_text.clone(),
            highlights: [
                nth(&dict.hero.highlights, 0),
                nth(&dict.hero.highlights, 1),
                nth(&dict.hero.highlights, 2),
            ],
            trust: [
                dict.trust.item1.v.clone(),
                dict.trust.item2.v.clone(),
                dict.trust.item3.v.clone(),
            ],
            services_intro: dict.services.intro.clone(),
            doctors_intro: dict.doctors.intro.clone(),
            results_intro: dict.results.intro.clone(),
            testimonials_intro: dict.testimonials.intro.clone(),
            contact_intro: dict.contact.intro.clone(),
            footer_legal: dict.footer.legal.replace("{year}", &self.year.to_string()),
            form_note: dict.form.note.clone(),
            labels,
            contact: ContactView {
                address: contact.address.clone(),
                hours: contact.hours.clone(),
                hours_short: contact.hours_short.clone(),
                location_short: contact.location_short.clone(),
                phone: contact.phone.clone(),
                phone_href: links::tel_href(&contact.phone),
                email: contact.email.clone(),
                email_href: links::mailto_href(&contact.email),
                email_cta_href: links::email_cta_href(&contact.email, &dict.cta.email_us),
                maps_href: links::href_or_hash(&contact.maps_url).to_string(),
                whatsapp_href: links::whatsapp_href(&contact.whatsapp_number),
                map_embed: contact.map_embed_url.clone(),
            },
            services: dict
                .services
                .items
                .iter()
                .map(|s| ServiceCard {
                    icon: assets.icon(&s.icon_key).to_string(),
                    title: s.title.clone(),
                    subtitle: s.subtitle.clone(),
                    bullets: s.bullets.clone(),
                })
                .collect(),
            doctors: dict
                .doctors
                .items
                .iter()
                .map(|d| DoctorCard {
                    photo: assets.doctor_photo(&d.photo_key).to_string(),
                    name: d.name.clone(),
                    role: d.role.clone(),
                    bio: d.bio.clone(),
                    badges: d.badges.clone(),
                })
                .collect(),
            results: dict
                .results
                .items
                .iter()
                .map(|r| ResultCard {
                    photo: assets.result_photo(&r.photo_key).to_string(),
                    title: r.title.clone(),
                    subtitle: r.subtitle.clone(),
                })
                .collect(),
            testimonials: dict
                .testimonials
                .items
                .iter()
                .map(|t| TestimonialCard {
                    name: t.name.clone(),
                    text: t.text.clone(),
                    stars: t.star_count(),
                    rating: t.rating_text(),
                })
                .collect(),
            service_options: dict.services.items.iter().map(|s| s.title.clone()).collect(),
        }
    }

    /// Full HTML page for `lang`
    pub fn render(&self, lang: Lang) -> String {
        html::page(&self.view(lang))
    }

    /// `mailto:` URL the appointment form opens
    pub fn appointment_mailto(&self, lang: Lang, request: &AppointmentRequest) -> String {
        let dict = self.content.dict(lang);
        request.mailto(&self.content.contact.email, lang, &dict.form)
    }
}
