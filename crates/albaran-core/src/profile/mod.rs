pub mod builtin;
pub mod schema;

use crate::error::AlbaranError;
use crate::parsing::grammar::MAX_CODE_LEN;
use schema::Profile;
use std::path::Path;

/// Load a profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<Profile, AlbaranError> {
    let content = std::fs::read_to_string(path).map_err(|e| AlbaranError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<Profile, AlbaranError> {
    let profile: Profile = serde_json::from_str(json).map_err(|e| AlbaranError::ProfileLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<Profile, AlbaranError> {
    let profile: Profile = serde_json::from_str(json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed.
pub fn validate_profile(profile: &Profile) -> Result<(), AlbaranError> {
    if profile.name.trim().is_empty() {
        return Err(AlbaranError::ProfileInvalid(
            "name must not be empty".into(),
        ));
    }

    if !(profile.tol_y.is_finite() && profile.tol_y > 0.0) {
        return Err(AlbaranError::ProfileInvalid(format!(
            "tol_y must be a positive number, got {}",
            profile.tol_y
        )));
    }

    let g = &profile.grammar;
    if g.min_code_len == 0 || g.min_code_len > g.max_code_len || g.max_code_len > MAX_CODE_LEN {
        return Err(AlbaranError::ProfileInvalid(format!(
            "code length bounds {}..={} must satisfy 1 <= min <= max <= {}",
            g.min_code_len, g.max_code_len, MAX_CODE_LEN
        )));
    }

    if profile.db_prefix.trim().is_empty() {
        return Err(AlbaranError::ProfileInvalid(
            "db_prefix must not be empty".into(),
        ));
    }

    if profile
        .db_prefix
        .contains(|c: char| c == '/' || c == '\\' || c.is_whitespace())
    {
        return Err(AlbaranError::ProfileInvalid(format!(
            "db_prefix '{}' must not contain path separators or whitespace",
            profile.db_prefix
        )));
    }

    if profile.signature_markers.iter().any(|m| m.trim().is_empty()) {
        return Err(AlbaranError::ProfileInvalid(
            "signature markers must not be empty strings".into(),
        ));
    }

    Ok(())
}
