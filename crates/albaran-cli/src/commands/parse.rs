use albaran_core::error::AlbaranError;
use albaran_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    preset: Option<String>,
    profile_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), AlbaranError> {
    let profile = super::resolve_profile(preset, profile_file)?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let extraction =
        albaran_core::extract_document(&pdf_bytes, &extractor, &profile, albaran_core::today())?;

    match output_format {
        "json" => output::json::print(&extraction)?,
        _ => print!("{}", output::table::format_extraction(&extraction)),
    }

    Ok(())
}
