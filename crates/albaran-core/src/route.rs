use crate::error::AlbaranError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Output folders for one store and day:
/// `<root>/Store_<store>/<YYYY-MM-DD>/{pdfs,db}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub day_dir: PathBuf,
    pub pdfs_dir: PathBuf,
    pub db_dir: PathBuf,
}

impl Destination {
    pub fn new(root: &Path, store_code: &str, date: NaiveDate) -> Self {
        let day_dir = root
            .join(format!("Store_{store_code}"))
            .join(date.format("%Y-%m-%d").to_string());
        Destination {
            pdfs_dir: day_dir.join("pdfs"),
            db_dir: day_dir.join("db"),
            day_dir,
        }
    }

    /// Create the `pdfs` and `db` folders if they do not exist.
    pub fn create(&self) -> Result<(), AlbaranError> {
        for dir in [&self.pdfs_dir, &self.db_dir] {
            fs::create_dir_all(dir).map_err(|e| AlbaranError::Destination {
                path: dir.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    pub fn db_path(&self, file_name: &str) -> PathBuf {
        self.db_dir.join(file_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Moved,
    /// Move failed; the source was copied and left where it was.
    Copied,
    AlreadyInPlace,
}

/// Move `source` into `dest_dir`, falling back to a copy when the move fails.
///
/// Only an error from both move and copy is returned.
pub fn move_or_copy(source: &Path, dest_dir: &Path) -> Result<(PathBuf, Placement), AlbaranError> {
    place_with(source, dest_dir, |from, to| fs::rename(from, to))
}

fn place_with<F>(
    source: &Path,
    dest_dir: &Path,
    rename: F,
) -> Result<(PathBuf, Placement), AlbaranError>
where
    F: Fn(&Path, &Path) -> io::Result<()>,
{
    let file_name = source.file_name().ok_or_else(|| AlbaranError::Destination {
        path: source.to_path_buf(),
        reason: "source has no file name".into(),
    })?;
    let dest = dest_dir.join(file_name);

    if same_file(source, &dest) {
        return Ok((dest, Placement::AlreadyInPlace));
    }

    match rename(source, &dest) {
        Ok(()) => Ok((dest, Placement::Moved)),
        Err(move_err) => {
            tracing::warn!(
                source = %source.display(),
                error = %move_err,
                "move failed, copying instead"
            );
            fs::copy(source, &dest).map_err(|copy_err| AlbaranError::Destination {
                path: dest.clone(),
                reason: format!("move failed ({move_err}), copy failed ({copy_err})"),
            })?;
            Ok((dest, Placement::Copied))
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
