//! HTML output for a [`PageView`]

use super::PageView;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

const FULL_STARS: &str = "★★★★★";

fn stars(count: u8) -> String {
    FULL_STARS.chars().take(count.min(5) as usize).collect()
}

fn list_items(tag: &str, class: &str, items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<{tag} class=\"{class}\">{}</{tag}>", escape_html(item)))
        .collect()
}

fn services(view: &PageView) -> String {
    view.services
        .iter()
        .map(|s| {
            format!(
                r#"<div class="card card-pad">
  <div class="service-icon"><img alt="" src="{icon}"></div>
  <div class="card-title">{title}</div>
  <div class="card-text">{subtitle}</div>
  <ul class="bullets">{bullets}</ul>
</div>
"#,
                icon = escape_html(&s.icon),
                title = escape_html(&s.title),
                subtitle = escape_html(&s.subtitle),
                bullets = list_items("li", "bullet", &s.bullets),
            )
        })
        .collect()
}

fn doctors(view: &PageView) -> String {
    view.doctors
        .iter()
        .map(|d| {
            format!(
                r#"<div class="card card-pad">
  <div class="doctor-top">
    <img class="avatar" alt="{name}" src="{photo}">
    <div>
      <div class="doctor-name">{name}</div>
      <div class="doctor-role">{role}</div>
    </div>
  </div>
  <div class="card-text">{bio}</div>
  <div class="badges">{badges}</div>
</div>
"#,
                name = escape_html(&d.name),
                photo = escape_html(&d.photo),
                role = escape_html(&d.role),
                bio = escape_html(&d.bio),
                badges = list_items("span", "badge", &d.badges),
            )
        })
        .collect()
}

fn results(view: &PageView) -> String {
    view.results
        .iter()
        .map(|r| {
            format!(
                r#"<div class="gallery-item">
  <img alt="{title}" src="{photo}">
  <div class="gallery-caption">
    <div class="t">{title}</div>
    <div class="s">{subtitle}</div>
  </div>
</div>
"#,
                title = escape_html(&r.title),
                photo = escape_html(&r.photo),
                subtitle = escape_html(&r.subtitle),
            )
        })
        .collect()
}

fn testimonials(view: &PageView) -> String {
    view.testimonials
        .iter()
        .map(|t| {
            format!(
                r#"<div class="card card-pad">
  <div class="card-title">{name}</div>
  <div class="quote">“{text}”</div>
  <div class="stars" aria-label="{rating} stars">{stars}</div>
</div>
"#,
                name = escape_html(&t.name),
                text = escape_html(&t.text),
                rating = escape_html(&t.rating),
                stars = stars(t.stars),
            )
        })
        .collect()
}

fn service_options(view: &PageView) -> String {
    view.service_options
        .iter()
        .map(|title| {
            let title = escape_html(title);
            format!("<option value=\"{title}\">{title}</option>")
        })
        .collect()
}

/// Render a complete page
pub fn page(view: &PageView) -> String {
    let e = escape_html;
    let label = |key: &str| e(view.label(key));
    let c = &view.contact;

    format!(
        r##"<!doctype html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{clinic_name}</title>
<link rel="stylesheet" href="styles.css">
</head>
<body>
<header class="topbar">
  <a class="brand" href="#top">
    <img id="brandLogo" alt="Clinic logo" src="{logo}">
    <span>
      <span id="clinicName">{clinic_name}</span>
      <span id="clinicTagline">{clinic_tagline}</span>
    </span>
  </a>
  <nav>
    <a href="#services">{nav_services}</a>
    <a href="#doctors">{nav_doctors}</a>
    <a href="#results">{nav_results}</a>
    <a href="#testimonials">{nav_testimonials}</a>
    <a href="#contact">{nav_contact}</a>
  </nav>
  <span class="meta"><span id="hoursShort">{hours_short}</span> · <span id="locationShort">{location_short}</span></span>
  <a id="langToggle" href="{toggle_href}">{lang_toggle}</a>
</header>

<section class="hero" id="top">
  <div>
    <h1 id="heroTitle">{hero_title}</h1>
    <p id="heroSubtitle">{hero_subtitle}</p>
    <ul class="highlights">
      <li id="highlight1">{highlight1}</li>
      <li id="highlight2">{highlight2}</li>
      <li id="highlight3">{highlight3}</li>
    </ul>
    <div class="cta-row">
      <a id="callCta" class="btn primary" href="{call_href}">{cta_call}</a>
      <a id="whatsAppCta" class="btn" href="{whatsapp_href}">{cta_whatsapp}</a>
      <a id="emailCta" class="btn ghost" href="{email_cta_href}">{cta_email}</a>
    </div>
    <p id="heroQuickText">{hero_quick_text}</p>
  </div>
  <img id="heroImage" alt="Clinic hero" src="{hero_image}">
</section>

<section class="trust">
  <div><span class="k">{trust1_k}</span> <span id="trust1">{trust1}</span></div>
  <div><span class="k">{trust2_k}</span> <span id="trust2">{trust2}</span></div>
  <div><span class="k">{trust3_k}</span> <span id="trust3">{trust3}</span></div>
</section>

<section id="services">
  <h2>{services_title}</h2>
  <p id="servicesIntro">{services_intro}</p>
  <div id="servicesGrid" class="grid">
{services}  </div>
</section>

<section id="doctors">
  <h2>{doctors_title}</h2>
  <p id="doctorsIntro">{doctors_intro}</p>
  <div id="doctorsGrid" class="grid">
{doctors}  </div>
</section>

<section id="results">
  <h2>{results_title}</h2>
  <p id="resultsIntro">{results_intro}</p>
  <div id="resultsGrid" class="gallery">
{results}  </div>
</section>

<section id="testimonials">
  <h2>{testimonials_title}</h2>
  <p id="testimonialsIntro">{testimonials_intro}</p>
  <div id="testimonialsGrid" class="grid">
{testimonials}  </div>
</section>

<section id="contact">
  <h2>{contact_title}</h2>
  <p id="contactIntro">{contact_intro}</p>
  <dl>
    <dt>{address_label}</dt><dd id="addressText">{address}</dd>
    <dt>{hours_label}</dt><dd id="hoursText">{hours}</dd>
    <dt>{phone_label}</dt><dd><a id="phoneLink" href="{call_href}">{phone}</a></dd>
    <dt>{email_label}</dt><dd><a id="emailLink" href="{email_href}">{email}</a></dd>
  </dl>
  <a id="mapsCta" class="btn" href="{maps_href}">{cta_directions}</a>
  <iframe id="mapFrame" title="map" loading="lazy" src="{map_embed}"></iframe>

  <form id="appointmentForm" method="get" action="{email_href}">
    <h3>{form_title}</h3>
    <label>{form_name} <input name="name" required></label>
    <label>{form_phone} <input name="phone" required></label>
    <label>{form_service} <select id="serviceSelect" name="service">{service_options}</select></label>
    <label>{form_message} <textarea name="message" rows="3"></textarea></label>
    <button class="btn primary" type="submit">{form_submit}</button>
    <p id="formNote">{form_note}</p>
  </form>
</section>

<footer>
  <img id="footerLogo" alt="Clinic logo" src="{logo}">
  <span id="footerName">{clinic_name}</span>
  <span id="footerLegal">{footer_legal}</span>
</footer>
</body>
</html>
"##,
        lang = view.lang.code(),
        toggle_href = format_args!("index.{}.html", view.lang.toggle().code()),
        lang_toggle = label("langToggle"),
        logo = e(&view.logo),
        hero_image = e(&view.hero_image),
        clinic_name = e(&view.clinic_name),
        clinic_tagline = e(&view.clinic_tagline),
        nav_services = label("nav.services"),
        nav_doctors = label("nav.doctors"),
        nav_results = label("nav.results"),
        nav_testimonials = label("nav.testimonials"),
        nav_contact = label("nav.contact"),
        hours_short = e(&c.hours_short),
        location_short = e(&c.location_short),
        hero_title = e(&view.hero_title),
        hero_subtitle = e(&view.hero_subtitle),
        hero_quick_text = e(&view.hero_quick_text),
        highlight1 = e(&view.highlights[0]),
        highlight2 = e(&view.highlights[1]),
        highlight3 = e(&view.highlights[2]),
        call_href = e(&c.phone_href),
        whatsapp_href = e(&c.whatsapp_href),
        email_cta_href = e(&c.email_cta_href),
        email_href = e(&c.email_href),
        maps_href = e(&c.maps_href),
        map_embed = e(&c.map_embed),
        cta_call = label("cta.call"),
        cta_whatsapp = label("cta.whatsApp"),
        cta_email = label("cta.emailUs"),
        cta_directions = label("cta.directions"),
        trust1_k = label("trust.item1.k"),
        trust2_k = label("trust.item2.k"),
        trust3_k = label("trust.item3.k"),
        trust1 = e(&view.trust[0]),
        trust2 = e(&view.trust[1]),
        trust3 = e(&view.trust[2]),
        services_title = label("services.title"),
        services_intro = e(&view.services_intro),
        services = services(view),
        doctors_title = label("doctors.title"),
        doctors_intro = e(&view.doctors_intro),
        doctors = doctors(view),
        results_title = label("results.title"),
        results_intro = e(&view.results_intro),
        results = results(view),
        testimonials_title = label("testimonials.title"),
        testimonials_intro = e(&view.testimonials_intro),
        testimonials = testimonials(view),
        contact_title = label("contact.title"),
        contact_intro = e(&view.contact_intro),
        address_label = label("contact.addressLabel"),
        hours_label = label("contact.hoursLabel"),
        phone_label = label("contact.phoneLabel"),
        email_label = label("contact.emailLabel"),
        address = e(&c.address),
        hours = e(&c.hours),
        phone = e(&c.phone),
        email = e(&c.email),
        form_title = label("form.title"),
        form_name = label("form.name"),
        form_phone = label("form.phone"),
        form_service = label("form.service"),
        form_message = label("form.message"),
        form_submit = label("form.submit"),
        service_options = service_options(view),
        form_note = e(&view.form_note),
        footer_legal = e(&view.footer_legal),
    )
}
