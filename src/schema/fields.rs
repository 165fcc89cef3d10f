//! Fixed editable fields
//!
//! Every single-value field of the schema the admin editor exposes, with
//! the template path it lives at. Paths under `i18n.{lang}` are per
//! language; `contact.*` is shared.

use std::fmt;
use std::str::FromStr;

use site_content::ContentPath;

/// How raw editor input maps to a stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Stored as the raw string
    Text,
    /// One entry per non-blank line, stored as a sequence of strings
    Lines,
}

/// Unknown field id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field '{0}'")]
pub struct UnknownField(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentField {
    ClinicName,
    ClinicTagline,
    HeroTitle,
    HeroSubtitle,
    HeroQuickText,
    HeroHighlights,
    Trust1,
    Trust2,
    Trust3,
    ServicesIntro,
    DoctorsIntro,
    ResultsIntro,
    TestimonialsIntro,
    ContactIntro,
    FooterLegal,
    FormNote,
    CtaEmailUs,
    Address,
    Hours,
    HoursShort,
    LocationShort,
    Phone,
    Email,
    MapsUrl,
    MapEmbedUrl,
    WhatsappNumber,
}

impl ContentField {
    pub const ALL: [ContentField; 26] = [
        ContentField::ClinicName,
        ContentField::ClinicTagline,
        ContentField::HeroTitle,
        ContentField::HeroSubtitle,
        ContentField::HeroQuickText,
        ContentField::HeroHighlights,
        ContentField::Trust1,
        ContentField::Trust2,
        ContentField::Trust3,
        ContentField::ServicesIntro,
        ContentField::DoctorsIntro,
        ContentField::ResultsIntro,
        ContentField::TestimonialsIntro,
        ContentField::ContactIntro,
        ContentField::FooterLegal,
        ContentField::FormNote,
        ContentField::CtaEmailUs,
        ContentField::Address,
        ContentField::Hours,
        ContentField::HoursShort,
        ContentField::LocationShort,
        ContentField::Phone,
        ContentField::Email,
        ContentField::MapsUrl,
        ContentField::MapEmbedUrl,
        ContentField::WhatsappNumber,
    ];

    /// Template path, possibly containing `{lang}`
    pub fn template(&self) -> &'static str {
        match self {
            ContentField::ClinicName => "i18n.{lang}.clinicName",
            ContentField::ClinicTagline => "i18n.{lang}.clinicTagline",
            ContentField::HeroTitle => "i18n.{lang}.hero.title",
            ContentField::HeroSubtitle => "i18n.{lang}.hero.subtitle",
            ContentField::HeroQuickText => "i18n.{lang}.hero.quickText",
            ContentField::HeroHighlights => "i18n.{lang}.hero.highlights",
            ContentField::Trust1 => "i18n.{lang}.trust.item1.v",
            ContentField::Trust2 => "i18n.{lang}.trust.item2.v",
            ContentField::Trust3 => "i18n.{lang}.trust.item3.v",
            ContentField::ServicesIntro => "i18n.{lang}.services.intro",
            ContentField::DoctorsIntro => "i18n.{lang}.doctors.intro",
            ContentField::ResultsIntro => "i18n.{lang}.results.intro",
            ContentField::TestimonialsIntro => "i18n.{lang}.testimonials.intro",
            ContentField::ContactIntro => "i18n.{lang}.contact.intro",
            ContentField::FooterLegal => "i18n.{lang}.footer.legal",
            ContentField::FormNote => "i18n.{lang}.form.note",
            ContentField::CtaEmailUs => "i18n.{lang}.cta.emailUs",
            ContentField::Address => "contact.address",
            ContentField::Hours => "contact.hours",
            ContentField::HoursShort => "contact.hoursShort",
            ContentField::LocationShort => "contact.locationShort",
            ContentField::Phone => "contact.phone",
            ContentField::Email => "contact.email",
            ContentField::MapsUrl => "contact.mapsUrl",
            ContentField::MapEmbedUrl => "contact.mapEmbedUrl",
            ContentField::WhatsappNumber => "contact.whatsappNumber",
        }
    }

    /// Parsed template path
    pub fn path(&self) -> ContentPath {
        // Templates are non-empty literals with non-empty segments.
        ContentPath::parse(self.template()).unwrap_or_else(|_| unreachable!())
    }

    /// Identifier used on the command line, e.g. `hero.title`
    pub fn id(&self) -> &'static str {
        let template = self.template();
        template.strip_prefix("i18n.{lang}.").unwrap_or(template)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentField::ClinicName => "Clinic name",
            ContentField::ClinicTagline => "Tagline",
            ContentField::HeroTitle => "Hero title",
            ContentField::HeroSubtitle => "Hero subtitle",
            ContentField::HeroQuickText => "Hero quick text",
            ContentField::HeroHighlights => "Hero highlights (one per line)",
            ContentField::Trust1 => "Trust item 1",
            ContentField::Trust2 => "Trust item 2",
            ContentField::Trust3 => "Trust item 3",
            ContentField::ServicesIntro => "Services intro",
            ContentField::DoctorsIntro => "Doctors intro",
            ContentField::ResultsIntro => "Results intro",
            ContentField::TestimonialsIntro => "Testimonials intro",
            ContentField::ContactIntro => "Contact intro",
            ContentField::FooterLegal => "Footer legal ({year} is replaced)",
            ContentField::FormNote => "Form note",
            ContentField::CtaEmailUs => "Email button text",
            ContentField::Address => "Address",
            ContentField::Hours => "Opening hours",
            ContentField::HoursShort => "Opening hours (short)",
            ContentField::LocationShort => "Location (short)",
            ContentField::Phone => "Phone",
            ContentField::Email => "Email",
            ContentField::MapsUrl => "Maps link",
            ContentField::MapEmbedUrl => "Map embed URL",
            ContentField::WhatsappNumber => "WhatsApp number",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            ContentField::HeroHighlights => FieldKind::Lines,
            _ => FieldKind::Text,
        }
    }

    /// Whether the field lives in a per-language dictionary
    pub fn is_localized(&self) -> bool {
        self.template().contains(site_content::LANG_PLACEHOLDER)
    }
}

impl fmt::Display for ContentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ContentField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.id() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
