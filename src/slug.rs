//! Task identifiers.
//!
//! Ids are derived from titles and double as record file names, so they are
//! restricted to lowercase ASCII alphanumerics joined by single hyphens.

use crate::error::{Error, Result};

/// Derive a filesystem-safe id from a free-text title.
///
/// Returns an empty string when the title has no ASCII alphanumeric content;
/// callers must reject that.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Check that `value` is an id `slugify` could have produced.
pub fn validate_id(value: &str) -> Result<()> {
    let well_formed = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--");
    if !well_formed {
        return Err(Error::invalid("id", value));
    }
    Ok(())
}

/// Id for a title, rejecting titles that produce nothing usable.
pub fn slug_for_title(title: &str) -> Result<String> {
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(Error::invalid("title (must produce a valid id)", title));
    }
    Ok(slug)
}
