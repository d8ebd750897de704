//! Media-related data models.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Key identifying one episode slot within a series: (season, episode).
pub type EpisodeKey = (u16, u16);

/// A discovered video file. Read-only view over the filesystem,
/// created once at scan time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name without path.
    pub filename: String,
    /// Extension in lowercase, without the dot.
    pub extension: String,
    /// File size in bytes.
    pub size: u64,
    /// Parent directory.
    pub parent_dir: PathBuf,
}

impl FileRecord {
    /// Build a record from a path without touching the filesystem.
    /// Size must be supplied by the caller (the scanner reads it once).
    pub fn new(path: PathBuf, size: u64) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let parent_dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            path,
            filename,
            extension,
            size,
            parent_dir,
        }
    }

    /// Filename without its extension.
    pub fn stem(&self) -> &str {
        match self.filename.rfind('.') {
            Some(idx) if idx > 0 => &self.filename[..idx],
            _ => &self.filename,
        }
    }
}

/// Series-level information from the metadata collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesInfo {
    /// Series display name.
    pub name: String,
}

/// Metadata for one episode, keyed by (season, episode) within a series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeMetadata {
    /// Season number (0 for specials).
    pub season_number: u16,
    /// Episode number, always >= 1.
    pub episode_number: u16,
    /// Episode title.
    pub title: String,
}

impl EpisodeMetadata {
    pub fn key(&self) -> EpisodeKey {
        (self.season_number, self.episode_number)
    }
}

/// Identifier of the parsing rule that matched a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternId {
    /// S01E02 and variants (s1e2, 1x02).
    SeasonEpisode,
    /// Verbose "Season 1 Episode 2".
    VerboseSeasonEpisode,
    /// Hash-prefixed episode number: "#12".
    HashEpisode,
    /// Dash-separated "Series - 12 - Title" or "12 - Title".
    DashNumber,
    /// Bare leading number: "12 Title".
    LeadingNumber,
    /// Keyword form: "Episode 12", "Ep 12", "E12".
    EpisodeKeyword,
    /// Bracket or parenthesis enclosed number: "[12]", "(12)".
    BracketedNumber,
    /// OVA/Special keyword form, mapped to season 0.
    SpecialKeyword,
}

/// Season/episode identity extracted from a single filename.
/// Produced fresh per filename; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Series name as written in the filename, sanitized.
    /// Falls back to [`crate::core::parser::UNKNOWN_SERIES`] when the
    /// filename carries no usable series text.
    pub series_name: String,
    /// Season number; 0 marks special content.
    pub season: u16,
    /// Episode number, always >= 1.
    pub episode: u16,
    /// The rule that matched.
    pub pattern: PatternId,
}

impl ParseResult {
    pub fn key(&self) -> EpisodeKey {
        (self.season, self.episode)
    }
}

/// A file after classification against the episode metadata.
/// Owned by one analysis pass; never shared across runs.
#[derive(Debug, Clone)]
pub struct ClassifiedFile {
    pub record: FileRecord,
    /// Parse outcome; `None` means the filename yielded no identity.
    pub parsed: Option<ParseResult>,
    /// The matched episode, if the parsed key exists in the metadata.
    pub episode: Option<EpisodeMetadata>,
    /// Canonical target filename rendered by the formatter.
    pub target_name: String,
    /// Whether the current filename already equals the target exactly.
    pub already_correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_record_fields() {
        let record = FileRecord::new(PathBuf::from("/videos/Show/ep01.MKV"), 42);
        assert_eq!(record.filename, "ep01.MKV");
        assert_eq!(record.extension, "mkv");
        assert_eq!(record.parent_dir, PathBuf::from("/videos/Show"));
        assert_eq!(record.size, 42);
    }

    #[test]
    fn test_file_record_stem() {
        let record = FileRecord::new(PathBuf::from("/v/Show S01E01.mkv"), 0);
        assert_eq!(record.stem(), "Show S01E01");

        let no_ext = FileRecord::new(PathBuf::from("/v/noext"), 0);
        assert_eq!(no_ext.stem(), "noext");
    }

    #[test]
    fn test_episode_key() {
        let ep = EpisodeMetadata {
            season_number: 1,
            episode_number: 7,
            title: "Pilot".to_string(),
        };
        assert_eq!(ep.key(), (1, 7));
    }
}
