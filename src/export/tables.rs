use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

/// Serialize `rows` into a CSV file at `path`, header first.
///
/// The header comes from the row type, so an empty iterator leaves an
/// empty file.
pub fn write_csv<T, I>(path: &Path, rows: I) -> Result<PathBuf>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create export file: {:?}", path))?;
    for (index, row) in rows.into_iter().enumerate() {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row {} to {:?}", index + 1, path))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write export file: {:?}", path))?;
    Ok(path.to_path_buf())
}
