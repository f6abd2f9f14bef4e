pub mod convert;
pub mod parse;
pub mod profiles;

use albaran_core::error::AlbaranError;
use albaran_core::profile::builtin::{load_preset, DEFAULT_PRESET};
use albaran_core::profile::load_profile;
use albaran_core::profile::schema::Profile;
use std::path::PathBuf;

/// Pick the profile from `--profile-file`, then `--profile`, then the default preset.
pub fn resolve_profile(
    preset: Option<String>,
    profile_file: Option<PathBuf>,
) -> Result<Profile, AlbaranError> {
    match (profile_file, preset) {
        (Some(path), _) => load_profile(&path),
        (None, Some(name)) => load_preset(&name),
        (None, None) => load_preset(DEFAULT_PRESET),
    }
}
