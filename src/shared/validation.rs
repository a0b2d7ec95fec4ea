use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for validating category codes
    /// Must be lowercase alphanumeric with hyphens
    /// - Valid: "electronics", "gaming-laptops", "tv4k"
    /// - Invalid: "-tv", "tv-", "gaming--laptops", "Laptops", "gaming_laptops"
    pub static ref CODE_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Rejects values that are empty once surrounding whitespace is trimmed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Title must not be blank.".into()));
    }
    Ok(())
}
