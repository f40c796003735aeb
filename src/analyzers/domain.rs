//! Business-domain context markers
//!
//! Matching is a case-insensitive substring test against a fixed table, so
//! `region` also matches inside `subregionLabel`. Treat the result as a hint.

use once_cell::sync::Lazy;
use regex::Regex;

/// Keywords that mark regional tax-id, address or industry handling
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "cnpj",
    "cpf",
    "brazil",
    "brasil",
    "lgpd",
    "boleto",
    "inscricao",
    "taxid",
    "tax_id",
    "industry",
    "region",
];

/// Same table as [`DOMAIN_KEYWORDS`], for whole-source scans
pub static DOMAIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternation = DOMAIN_KEYWORDS.join("|");
    Regex::new(&format!("(?i)(?:{alternation})")).unwrap()
});

/// Whether `text` contains any domain keyword
pub fn contains_domain_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    DOMAIN_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
