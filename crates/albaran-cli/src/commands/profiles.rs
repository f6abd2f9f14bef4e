use albaran_core::error::AlbaranError;
use albaran_core::profile::builtin::{load_preset, DEFAULT_PRESET, PRESETS};
use albaran_core::profile::load_profile;
use albaran_core::profile::schema::Profile;
use std::path::Path;

pub fn list() -> Result<(), AlbaranError> {
    for name in PRESETS {
        let profile = load_preset(name)?;
        let default = if *name == DEFAULT_PRESET { " (default)" } else { "" };
        println!(
            "{:<14} v{}  {}{}",
            profile.name,
            profile.version,
            profile.description.as_deref().unwrap_or(""),
            default
        );
    }
    Ok(())
}

pub fn show(name: &str) -> Result<(), AlbaranError> {
    let profile = load_preset(name)?;
    let json = serde_json::to_string_pretty(&profile)?;
    println!("{json}");
    Ok(())
}

pub fn validate(path: &Path) -> Result<(), AlbaranError> {
    let profile = load_profile(path)?;
    tracing::debug!(file = %path.display(), name = %profile.name, "profile loaded");
    print!("{}", summary(&profile));
    Ok(())
}

fn summary(profile: &Profile) -> String {
    let g = &profile.grammar;
    let markers = if profile.signature_markers.is_empty() {
        "(any)".to_string()
    } else {
        profile.signature_markers.join(", ")
    };
    format!(
        "Profile '{}' v{} is valid.\n  label strategy:   {}\n  line tolerance:   {}\n  code length:      {}..={}\n  units multiplier: {}\n  signature:        {}\n  db prefix:        {}\n",
        profile.name,
        profile.version,
        profile.label_strategy,
        profile.tol_y,
        g.min_code_len,
        g.max_code_len,
        if g.require_units_multiplier { "required" } else { "no" },
        markers,
        profile.db_prefix,
    )
}
