use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Email whose domain has at least one dot
    /// - Valid: "alice@company.com", "a.b@mail.example.org"
    /// - Invalid: "a@b", "a@b.", "a@.com", "a b@x.com"
    pub static ref DOTTED_EMAIL_REGEX: Regex =
        Regex::new(r"^[^@\s]+@[^@\s.]+(?:\.[^@\s.]+)+$").unwrap();
}
