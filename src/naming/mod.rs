//! Canonical filename rendering.
//!
//! The formatter is the single source of target names: the analyzer compares
//! current filenames against its output byte-for-byte, so rendering must be
//! deterministic and free of any input-dependent normalization.

use serde::{Deserialize, Serialize};

/// Filename style for rendered episode names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingStyle {
    /// `Series - S01E02 - Title.mkv`
    Dashed,
    /// `Series.S01E02.Title.mkv`
    Compact,
}

/// Renders canonical episode filenames for one series.
#[derive(Debug, Clone)]
pub struct NameFormatter {
    series_name: String,
    style: NamingStyle,
}

impl NameFormatter {
    pub fn new(series_name: impl Into<String>, style: NamingStyle) -> Self {
        Self {
            series_name: sanitize_filename(&series_name.into()),
            style,
        }
    }

    pub fn series_name(&self) -> &str {
        &self.series_name
    }

    /// Render the canonical filename for a regular episode.
    ///
    /// `version` of `None` or `Some(1)` renders no suffix; explicit
    /// suffixes start at `v2`.
    pub fn render_episode_name(
        &self,
        season: u16,
        episode: u16,
        title: &str,
        extension: &str,
        version: Option<u32>,
    ) -> String {
        let title = sanitize_filename(title);
        let suffix = match version {
            Some(v) if v >= 2 => Some(v),
            _ => None,
        };

        match self.style {
            NamingStyle::Dashed => {
                let mut name = format!("{} - S{:02}E{:02}", self.series_name, season, episode);
                if !title.is_empty() {
                    name.push_str(&format!(" - {}", title));
                }
                if let Some(v) = suffix {
                    name.push_str(&format!(" v{}", v));
                }
                format!("{}.{}", name, extension)
            }
            NamingStyle::Compact => {
                let mut name = format!(
                    "{}.S{:02}E{:02}",
                    self.series_name.replace(' ', "."),
                    season,
                    episode
                );
                if !title.is_empty() {
                    name.push_str(&format!(".{}", title.replace(' ', ".")));
                }
                if let Some(v) = suffix {
                    name.push_str(&format!(".v{}", v));
                }
                format!("{}.{}", name, extension)
            }
        }
    }

    /// Render the canonical filename for season-0 (special) content.
    pub fn render_special_name(
        &self,
        number: u16,
        title: &str,
        extension: &str,
        version: Option<u32>,
    ) -> String {
        self.render_episode_name(0, number, title, extension, version)
    }
}

/// Replace characters that are illegal in filenames on common filesystems.
fn sanitize_filename(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
