//! Email syntax validation.
//!
//! The check is purely syntactic: a local part drawn from the RFC 5322 atom
//! characters, a single `@`, and a dotted domain of at least two labels. No
//! DNS or mailbox verification happens here.

use std::sync::OnceLock;

use regex::Regex;

/// Longest address accepted (the SMTP forward-path limit).
pub const EMAIL_MAX_LEN: usize = 254;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Labels are 1-63 characters and may not start or end with a hyphen.
        let pattern = concat!(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+",
            r"@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
            r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        );
        Regex::new(pattern).expect("valid regex")
    })
}

/// Return `true` when `candidate` is a syntactically valid email address.
///
/// Never fails: anything that does not match simply yields `false`.
///
/// # Examples
/// ```
/// use user_registry::domain::is_email_valid;
///
/// assert!(is_email_valid("user@example.com"));
/// assert!(!is_email_valid("user@localhost"));
/// ```
pub fn is_email_valid(candidate: &str) -> bool {
    candidate.len() <= EMAIL_MAX_LEN && email_regex().is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("user@example.com")]
    #[case("a@b.com")]
    #[case("first.last+tag@mail.example.co.uk")]
    #[case("o'brien@example.ie")]
    #[case("x_y-z@sub-domain.example.org")]
    fn accepts_well_formed_addresses(#[case] candidate: &str) {
        assert!(is_email_valid(candidate), "{candidate} should be valid");
    }

    #[rstest]
    #[case("")]
    #[case("plainaddress")]
    #[case("user.example.com")]
    #[case("user@localhost")]
    #[case("@example.com")]
    #[case("user@")]
    #[case("user@@example.com")]
    #[case("user@exa mple.com")]
    #[case("us er@example.com")]
    #[case("user@-example.com")]
    #[case("user@example-.com")]
    #[case("user@example..com")]
    #[case("user@example.com.")]
    #[case("user<script>@example.com")]
    fn rejects_malformed_addresses(#[case] candidate: &str) {
        assert!(!is_email_valid(candidate), "{candidate} should be invalid");
    }

    #[rstest]
    fn rejects_addresses_over_length_limit() {
        let local = "a".repeat(100);
        let label = "b".repeat(60);
        let candidate = format!("{local}@{label}.{label}.{label}.com");
        assert!(candidate.len() > EMAIL_MAX_LEN);
        assert!(!is_email_valid(&candidate));
    }

    #[rstest]
    fn rejects_overlong_domain_label() {
        let candidate = format!("user@{}.com", "c".repeat(64));
        assert!(!is_email_valid(&candidate));
    }
}
