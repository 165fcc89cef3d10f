//! Contact links and the appointment request email

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::lang::Lang;
use crate::schema::FormText;

/// Characters left alone by JavaScript's `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a URI component.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// `tel:` link with whitespace removed
pub fn tel_href(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{}", digits)
}

pub fn mailto_href(email: &str) -> String {
    format!("mailto:{}", email)
}

/// "Email us" button: subject from the button text, a short greeting body
pub fn email_cta_href(email: &str, subject: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        email,
        encode_component(subject),
        encode_component("Hello!")
    )
}

pub fn whatsapp_href(number: &str) -> String {
    format!("https://wa.me/{}", number)
}

/// `href` value, `#` when empty
pub fn href_or_hash(href: &str) -> &str {
    if href.is_empty() {
        "#"
    } else {
        href
    }
}

/// Fields of the appointment form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentRequest {
    pub name: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl AppointmentRequest {
    pub fn subject(lang: Lang) -> &'static str {
        match lang {
            Lang::Sq => "Kërkesë për rezervim",
            Lang::En => "Appointment request",
        }
    }

    fn signature(lang: Lang) -> &'static str {
        match lang {
            Lang::Sq => "Dërguar nga faqja e klinikës",
            Lang::En => "Sent from clinic website",
        }
    }

    /// Email body with the form's localized labels
    pub fn body(&self, lang: Lang, labels: &FormText) -> String {
        [
            format!("{}: {}", labels.name, self.name),
            format!("{}: {}", labels.phone, self.phone),
            format!("{}: {}", labels.service, self.service),
            format!("{}:", labels.message),
            self.message.clone(),
            String::new(),
            "—".to_string(),
            Self::signature(lang).to_string(),
        ]
        .join("\n")
    }

    /// `mailto:` URL addressed to the clinic
    pub fn mailto(&self, to: &str, lang: Lang, labels: &FormText) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            encode_component(to),
            encode_component(Self::subject(lang)),
            encode_component(&self.body(lang, labels))
        )
    }
}
