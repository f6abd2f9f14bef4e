use albaran_core::batch::{convert_batch, DocumentOutcome};
use albaran_core::error::AlbaranError;
use albaran_core::extraction::pdftotext::PdftotextExtractor;
use albaran_core::extraction::PdfExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    inputs: Vec<PathBuf>,
    dest: PathBuf,
    preset: Option<String>,
    profile_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), AlbaranError> {
    let profile = super::resolve_profile(preset, profile_file)?;

    if !dest.is_dir() {
        return Err(AlbaranError::Destination {
            path: dest,
            reason: "destination root is not a directory".into(),
        });
    }

    if !PdftotextExtractor::is_available() {
        tracing::warn!("pdftotext not found on PATH, documents will be skipped");
    }

    let extractor = PdftotextExtractor::new();
    tracing::debug!(
        profile = %profile.name,
        backend = extractor.backend_name(),
        documents = inputs.len(),
        "starting batch"
    );
    let outcomes = convert_batch(&inputs, &dest, &extractor, &profile, albaran_core::today());

    match output_format {
        "json" => output::json::print(&outcomes)?,
        _ => {
            println!("Destination: {}  (profile {})\n", dest.display(), profile.name);
            print!("{}", output::table::format_outcomes(&outcomes));
        }
    }

    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, DocumentOutcome::Failed { .. }))
        .count();
    eprintln!(
        "Done. {} converted, {} skipped.",
        outcomes.len() - failed,
        failed
    );

    Ok(())
}
