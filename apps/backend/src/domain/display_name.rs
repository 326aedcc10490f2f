//! Display-name normalisation and validation.

use lazy_regex::regex_is_match;
use unicode_normalization::UnicodeNormalization;

use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_LEN: usize = 2;
pub const MAX_LEN: usize = 20;

const BLOCKED_WORDS: [&str; 4] = ["admin", "moderator", "system", "shithead"];

/// Normalise (NFKC, trimmed) and validate a display name, returning the
/// normalised form.
pub fn validate_display_name(raw: &str) -> Result<String, DomainError> {
    let name: String = raw.nfkc().collect::<String>().trim().to_string();
    let len = name.chars().count();

    if len < MIN_LEN {
        return Err(invalid(format!(
            "Display name must be at least {MIN_LEN} characters"
        )));
    }
    if len > MAX_LEN {
        return Err(invalid(format!(
            "Display name must be at most {MAX_LEN} characters"
        )));
    }
    if !regex_is_match!(r"^[a-zA-Z0-9\s_\-]+$", &name) {
        return Err(invalid(
            "Display name may only contain letters, digits, spaces, '_' and '-'",
        ));
    }
    let lowered = name.to_lowercase();
    if BLOCKED_WORDS.iter().any(|w| lowered.contains(w)) {
        return Err(invalid("Display name contains a reserved word"));
    }
    Ok(name)
}

fn invalid(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::InvalidDisplayName, detail)
}
