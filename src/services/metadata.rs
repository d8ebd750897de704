//! Episode metadata loading.
//!
//! The engine never talks to the network. Episode titles come from a
//! local JSON document, typically exported ahead of time:
//!
//! ```json
//! {
//!   "series": { "name": "Show Name" },
//!   "episodes": [
//!     { "season_number": 1, "episode_number": 1, "title": "Pilot" }
//!   ]
//! }
//! ```

use crate::models::media::{EpisodeKey, EpisodeMetadata, SeriesInfo};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct MetadataDoc {
    series: SeriesInfo,
    episodes: Vec<EpisodeMetadata>,
}

/// Lookup table from (season, episode) to metadata.
#[derive(Debug, Default)]
pub struct EpisodeIndex {
    entries: HashMap<EpisodeKey, EpisodeMetadata>,
}

impl EpisodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. On a key collision the later entry wins, which
    /// matches how exports list corrections after the original row.
    pub fn insert(&mut self, episode: EpisodeMetadata) {
        self.entries.insert(episode.key(), episode);
    }

    pub fn get(&self, key: &EpisodeKey) -> Option<&EpisodeMetadata> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load series info and the episode index from a JSON metadata file.
pub fn load_metadata(path: &Path) -> Result<(SeriesInfo, EpisodeIndex)> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::InvalidMetadataFile(format!("{}: {}", path.display(), e)))?;

    let doc: MetadataDoc = serde_json::from_str(&content)
        .map_err(|e| Error::InvalidMetadataFile(format!("{}: {}", path.display(), e)))?;

    if doc.episodes.is_empty() {
        return Err(Error::EmptyEpisodeList(doc.series.name));
    }

    let mut index = EpisodeIndex::new();
    for episode in doc.episodes {
        index.insert(episode);
    }

    tracing::info!(
        "loaded {} episodes for series '{}'",
        index.len(),
        doc.series.name
    );
    Ok((doc.series, index))
}
