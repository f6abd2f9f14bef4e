use crate::error::AlbaranError;
use crate::profile::parse_profile_str;
use crate::profile::schema::Profile;

const PACKING_LIST_JSON: &str = include_str!("../../../../profiles/packing-list.json");
const BLUE_BOXES_JSON: &str = include_str!("../../../../profiles/blue-boxes.json");

/// Available predefined profiles.
pub const PRESETS: &[&str] = &["packing-list", "blue-boxes"];

/// Profile used when none is named.
pub const DEFAULT_PRESET: &str = "packing-list";

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<Profile, AlbaranError> {
    let json = match name {
        "packing-list" => PACKING_LIST_JSON,
        "blue-boxes" => BLUE_BOXES_JSON,
        _ => {
            return Err(AlbaranError::ProfileInvalid(format!(
                "unknown profile '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    parse_profile_str(json)
}
