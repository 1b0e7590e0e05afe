//! Central placeholder substitution tables.
//!
//! Every template rewrite flows through one explicit placeholder→value map
//! per target file; substitution is literal string matching, never regex.
//! A key whose value is `None` is simply not substituted, leaving the
//! placeholder in place for the QA stage to flag.

use clinicforge_core::ClinicData;

/// Literal placeholder strings baked into the template sources.
pub const PLACEHOLDER_CLINIC_NAME: &str = "Your Clinic Name";
pub const PLACEHOLDER_DOMAIN: &str = "your-clinic-domain.com";
pub const PLACEHOLDER_PHONE: &str = "+447888864454";
pub const PLACEHOLDER_EMAIL: &str = "info@leadballoon.co.uk";
pub const PLACEHOLDER_STREET: &str = "[Your Street Address]";
pub const PLACEHOLDER_CITY: &str = "[Your City]";
pub const PLACEHOLDER_POSTCODE: &str = "[Your Postal Code]";
pub const PLACEHOLDER_COUNTRY_CODE: &str = "[Your Country Code]";
pub const PLACEHOLDER_LOCATION: &str = "[Your Location]";
pub const PLACEHOLDER_LATITUDE: &str = "0.0000";
pub const PLACEHOLDER_LONGITUDE: &str = "-0.0000";

/// Template strings in `TeamSection.tsx` for the first practitioner slot.
pub const PLACEHOLDER_TEAM_NAME: &str = "Your Expert Team";
pub const PLACEHOLDER_TEAM_TITLE: &str = "Expert in Anti-Ageing & Skin Health";
pub const PLACEHOLDER_TEAM_BIO: &str = "As experts in anti-ageing and skin health with over \
10 years of experience in advanced aesthetic treatments, our team leads the CO2 laser program \
with a focus on excellence and patient safety. Our commitment is to deliver transformative \
results while ensuring the highest standards of care throughout your treatment journey.";

/// Placeholders the post-customization scan looks for.
pub const RESIDUAL_PLACEHOLDERS: &[&str] = &[
    PLACEHOLDER_CLINIC_NAME,
    PLACEHOLDER_LOCATION,
    PLACEHOLDER_DOMAIN,
    PLACEHOLDER_EMAIL,
];

/// One literal substitution pair.
pub type Substitution = (&'static str, String);

/// Site metadata and schema markup in `app/layout.tsx`.
#[must_use]
pub fn layout_substitutions(data: &ClinicData) -> Vec<Substitution> {
    let mut subs = Vec::new();
    push_opt(&mut subs, PLACEHOLDER_CLINIC_NAME, data.business.name.clone());
    push_opt(
        &mut subs,
        PLACEHOLDER_DOMAIN,
        data.contact.website.as_deref().and_then(domain_of),
    );
    push_opt(&mut subs, PLACEHOLDER_PHONE, data.contact.phone.clone());
    push_opt(&mut subs, PLACEHOLDER_EMAIL, data.contact.email.clone());
    push_opt(&mut subs, PLACEHOLDER_STREET, data.contact.address.clone());
    push_opt(&mut subs, PLACEHOLDER_CITY, data.location.city.clone());
    push_opt(&mut subs, PLACEHOLDER_POSTCODE, data.contact.postcode.clone());
    subs.push((PLACEHOLDER_COUNTRY_CODE, "GB".to_owned()));
    if let Some(coords) = data.location.coordinates {
        // Longitude first: its placeholder contains the latitude placeholder
        // as a substring, so the other order would corrupt it.
        subs.push((PLACEHOLDER_LONGITUDE, coords.longitude.to_string()));
        subs.push((PLACEHOLDER_LATITUDE, coords.latitude.to_string()));
    }
    subs
}

/// Contact block in `components/Footer.tsx`.
#[must_use]
pub fn footer_substitutions(data: &ClinicData) -> Vec<Substitution> {
    let mut subs = Vec::new();
    push_opt(&mut subs, PLACEHOLDER_CLINIC_NAME, data.business.name.clone());
    push_opt(&mut subs, PLACEHOLDER_PHONE, data.contact.phone.clone());
    push_opt(&mut subs, PLACEHOLDER_EMAIL, data.contact.email.clone());
    push_opt(&mut subs, PLACEHOLDER_LOCATION, location_line(data));
    subs
}

/// Contact details in `components/CTASection.tsx`.
#[must_use]
pub fn cta_substitutions(data: &ClinicData) -> Vec<Substitution> {
    let mut subs = Vec::new();
    push_opt(&mut subs, PLACEHOLDER_PHONE, data.contact.phone.clone());
    push_opt(&mut subs, PLACEHOLDER_EMAIL, data.contact.email.clone());
    push_opt(&mut subs, PLACEHOLDER_LOCATION, location_line(data));
    subs
}

/// First practitioner slot in `components/TeamSection.tsx`. Empty when no
/// team member was extracted; the caller records a manual-review item
/// instead.
#[must_use]
pub fn team_substitutions(data: &ClinicData) -> Vec<Substitution> {
    let Some(member) = data.team.members.first() else {
        return Vec::new();
    };
    let mut subs = vec![
        (PLACEHOLDER_TEAM_NAME, member.name.clone()),
        (PLACEHOLDER_TEAM_TITLE, member.title.clone()),
    ];
    if let Some(bio) = member.bio.clone() {
        subs.push((PLACEHOLDER_TEAM_BIO, bio));
    }
    subs
}

/// Address or city for single-line location placeholders.
fn location_line(data: &ClinicData) -> Option<String> {
    data.contact
        .address
        .clone()
        .or_else(|| data.location.city.clone())
}

fn push_opt(subs: &mut Vec<Substitution>, key: &'static str, value: Option<String>) {
    if let Some(value) = value {
        subs.push((key, value));
    }
}

/// Hostname of a URL with any `www.` prefix stripped; `None` when the
/// value does not look like a URL.
#[must_use]
pub fn domain_of(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host = rest.split(['/', '?', '#']).next()?;
    if host.is_empty() {
        return None;
    }
    Some(host.strip_prefix("www.").unwrap_or(host).to_owned())
}

/// Applies literal substitutions, returning the rewritten text and the
/// number of keys that actually matched. Already-substituted text matches
/// nothing, which is what makes re-runs no-ops.
#[must_use]
pub fn apply(content: &str, substitutions: &[Substitution]) -> (String, usize) {
    let mut out = content.to_owned();
    let mut changed = 0;
    for (key, value) in substitutions {
        if out.contains(key) {
            out = out.replace(key, value);
            changed += 1;
        }
    }
    (out, changed)
}
