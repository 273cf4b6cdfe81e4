//! Transient unit naming

use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};

/// Prefix of every generated unit name
pub const UNIT_PREFIX: &str = "selfdeploy";

/// Longest slug kept from a script name
pub const MAX_SLUG_LEN: usize = 40;

/// Hex digits of the stem digest kept in a unit name
pub const DIGEST_LEN: usize = 8;

/// Lowercase `stem`, collapsing every run of other characters into `-`.
pub fn slugify(stem: &str) -> String {
    let mut slug = String::with_capacity(stem.len());
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_matches('-');
    let slug = slug[..slug.len().min(MAX_SLUG_LEN)].trim_end_matches('-');

    if slug.is_empty() {
        "script".to_string()
    } else {
        slug.to_string()
    }
}

/// First [`DIGEST_LEN`] hex digits of the SHA-256 of the unmodified stem
pub fn stem_digest(stem: &str) -> String {
    let mut digest = format!("{:x}", Sha256::digest(stem.as_bytes()));
    digest.truncate(DIGEST_LEN);
    digest
}

/// `selfdeploy-{slug}-{digest}-{YYYYmmdd-HHMMSS}`
///
/// The slug is lossy (case, punctuation, length), so the digest of the full
/// stem keeps scripts launched in the same second apart.
pub fn unit_name(stem: &str, now: NaiveDateTime) -> String {
    format!(
        "{}-{}-{}-{}",
        UNIT_PREFIX,
        slugify(stem),
        stem_digest(stem),
        now.format("%Y%m%d-%H%M%S")
    )
}
