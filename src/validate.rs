use regex::Regex;
use std::sync::OnceLock;

/// Longest domain name the registrar accepts.
const MAX_DOMAIN_LEN: usize = 253;

fn domain_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| {
    Regex::new(
      r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9]$",
    )
    .unwrap()
  })
}

fn email_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap())
}

fn phone_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap())
}

/// Check that a string is a plausible registrable domain name, labels and
/// TLD included (e.g. `example.com`). Bare hostnames without a dot fail.
pub fn domain_name(domain: &str) -> bool {
  if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
    return false;
  }
  domain_re().is_match(domain)
}

/// Check an email address for the registrant contact form.
pub fn email(value: &str) -> bool {
  email_re().is_match(value)
}

/// Check a phone number: optional `+`, then 10 to 15 digits.
pub fn phone(value: &str) -> bool {
  phone_re().is_match(value)
}

/// Check a two-letter country code (US, IN, ...). Case does not matter.
pub fn country_code(value: &str) -> bool {
  value.len() == 2 && value.chars().all(|c| c.is_ascii_alphabetic())
}
