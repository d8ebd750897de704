//! Filesystem helpers.

use crate::Result;
use std::path::Path;

/// Move a file. Plain rename first; if that fails (typically a move
/// across filesystem boundaries) fall back to copy+remove.
pub fn move_file(source: &Path, target: &Path) -> Result<()> {
    if std::fs::rename(source, target).is_ok() {
        return Ok(());
    }
    std::fs::copy(source, target)?;
    std::fs::remove_file(source)?;
    Ok(())
}
