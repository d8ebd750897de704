//! Directory scanner.
//!
//! Recursively lists video files under a library root, excluding "Extras"
//! style folders at scan time. Produces the read-only [`FileRecord`]s the
//! rest of the engine works from.

use crate::models::media::FileRecord;
use crate::Result;
use std::path::Path;
use walkdir::WalkDir;

/// Supported video file extensions.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "mov", "wmv", "m4v", "ts", "m2ts", "flv", "webm", "mpg", "mpeg", "ogm",
    "rm", "rmvb", "3gp",
];

/// Check if a file extension is a video format.
fn is_video_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    VIDEO_EXTENSIONS.contains(&ext_lower.as_str())
}

/// Check if a file is inside an extras-style directory.
///
/// These contain behind-the-scenes content, samples, and similar material
/// that must never enter episode matching. Patterns matched
/// (case-insensitive): "Extras", "Featurettes", "Behind the Scenes",
/// "Deleted Scenes", "Bonus", "Sample", and folder names carrying an
/// ".extras"/"-extras"/"_extras" marker.
fn is_in_extras_directory(path: &Path) -> bool {
    for component in path.components() {
        if let std::path::Component::Normal(name) = component {
            let name_str = name.to_string_lossy().to_lowercase();

            let extras_names = [
                "featurettes",
                "featurette",
                "behind the scenes",
                "behindthescenes",
                "deleted scenes",
                "deletedscenes",
                "making of",
                "makingof",
                "bonus",
                "bonuses",
                "sample",
                "samples",
            ];

            if extras_names.iter().any(|&n| name_str == n) {
                return true;
            }

            if name_str.contains(".extras")
                || name_str.contains("-extras")
                || name_str.contains("_extras")
            {
                return true;
            }
        }
    }

    false
}

/// Recursively scan a directory for video files.
///
/// Returns records sorted by path so downstream ordering is stable across
/// runs regardless of directory iteration order.
pub fn scan_videos(root: &Path) -> Result<Vec<FileRecord>> {
    if !root.exists() {
        return Err(crate::Error::PathNotFound(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(crate::Error::NotADirectory(root.display().to_string()));
    }

    let mut records = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let entry_path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }

        if is_in_extras_directory(entry_path) {
            tracing::debug!("extras content, skipping: {}", entry_path.display());
            continue;
        }

        let Some(ext) = entry_path.extension() else {
            continue;
        };
        if !is_video_extension(&ext.to_string_lossy()) {
            continue;
        }

        match std::fs::metadata(entry_path) {
            Ok(meta) => records.push(FileRecord::new(entry_path.to_path_buf(), meta.len())),
            Err(e) => {
                tracing::warn!("failed to read file {}: {}", entry_path.display(), e);
            }
        }
    }

    records.sort_by(|a, b| a.path.cmp(&b.path));

    tracing::info!("scanned {} video files under {}", records.len(), root.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_video_extension() {
        assert!(is_video_extension("mkv"));
        assert!(is_video_extension("MKV"));
        assert!(is_video_extension("mp4"));
        assert!(!is_video_extension("srt"));
        assert!(!is_video_extension("txt"));
    }

    #[test]
    fn test_is_in_extras_directory() {
        assert!(is_in_extras_directory(&PathBuf::from(
            "/lib/Show/Featurettes/clip.mkv"
        )));
        assert!(is_in_extras_directory(&PathBuf::from(
            "/lib/Show.Extras-Grym/clip.mkv"
        )));
        assert!(is_in_extras_directory(&PathBuf::from(
            "/lib/Show/Sample/sample.mkv"
        )));
        assert!(!is_in_extras_directory(&PathBuf::from(
            "/lib/Show/Season 01/ep.mkv"
        )));
    }

    // Filesystem-backed tests live in tests/executor_tests.rs
}
