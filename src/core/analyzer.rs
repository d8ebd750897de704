//! File classification.
//!
//! Takes the scanned [`FileRecord`]s plus the loaded episode metadata and
//! sorts every file into one of five buckets: already correct, needs a
//! rename, member of a duplicate group, special content, or unmatched.

use crate::core::parser;
use crate::models::media::{ClassifiedFile, EpisodeKey, FileRecord};
use crate::naming::NameFormatter;
use crate::services::metadata::EpisodeIndex;
use std::collections::BTreeMap;

/// Result of classifying a set of scanned files.
#[derive(Debug, Default)]
pub struct Analysis {
    /// Files whose current name is already byte-identical to the target.
    pub skip: Vec<ClassifiedFile>,
    /// Files that need a plain rename (sole owner of their episode).
    pub rename: Vec<ClassifiedFile>,
    /// Episode keys claimed by more than one file, in key order.
    pub duplicates: BTreeMap<EpisodeKey, Vec<ClassifiedFile>>,
    /// Files living in a configured special folder.
    pub specials: Vec<FileRecord>,
    /// Files the parser or metadata lookup could not place, with a reason.
    pub unmatched: Vec<(FileRecord, String)>,
}

impl Analysis {
    /// Total number of files that parsed and matched an episode.
    pub fn matched_count(&self) -> usize {
        self.skip.len()
            + self.rename.len()
            + self.duplicates.values().map(Vec::len).sum::<usize>()
    }
}

/// Check whether a file sits directly inside one of the configured
/// special folders. The check looks at the immediate parent only, so a
/// series named "Special Agent Oso" is not swept up by its own title.
fn is_special_content(record: &FileRecord, special_folders: &[String]) -> bool {
    let Some(parent_name) = record.parent_dir.file_name() else {
        return false;
    };
    let parent_name = parent_name.to_string_lossy();
    special_folders
        .iter()
        .any(|folder| parent_name.eq_ignore_ascii_case(folder))
}

/// Classify scanned files against the episode index.
///
/// Files parse independently, then land in a bucket:
/// - parse failure or no matching episode in the index -> unmatched
/// - special-folder residency -> specials, checked before parsing
/// - sole claimant of an episode, name already exact -> skip
/// - sole claimant, name differs -> rename
/// - multiple claimants of one episode -> duplicates, sorted by current
///   filename (ties broken by full path) so group order is deterministic
pub fn classify(
    records: Vec<FileRecord>,
    index: &EpisodeIndex,
    formatter: &NameFormatter,
    special_folders: &[String],
) -> Analysis {
    let mut analysis = Analysis::default();
    let mut by_key: BTreeMap<EpisodeKey, Vec<ClassifiedFile>> = BTreeMap::new();

    for record in records {
        if is_special_content(&record, special_folders) {
            tracing::debug!("special content: {}", record.filename);
            analysis.specials.push(record);
            continue;
        }

        let Some(parsed) = parser::parse(&record.filename) else {
            analysis
                .unmatched
                .push((record, "no recognizable episode pattern".into()));
            continue;
        };

        let Some(episode) = index.get(&parsed.key()) else {
            let reason = format!(
                "no metadata for S{:02}E{:02}",
                parsed.season, parsed.episode
            );
            analysis.unmatched.push((record, reason));
            continue;
        };

        let target_name = formatter.render_episode_name(
            episode.season_number,
            episode.episode_number,
            &episode.title,
            &record.extension,
            None,
        );
        let already_correct = record.filename == target_name;

        by_key.entry(parsed.key()).or_default().push(ClassifiedFile {
            record,
            parsed: Some(parsed),
            episode: Some(episode.clone()),
            target_name,
            already_correct,
        });
    }

    for (key, mut group) in by_key {
        if group.len() == 1 {
            let file = group.pop().expect("group of one");
            if file.already_correct {
                analysis.skip.push(file);
            } else {
                analysis.rename.push(file);
            }
        } else {
            group.sort_by(|a, b| {
                a.record
                    .filename
                    .cmp(&b.record.filename)
                    .then_with(|| a.record.path.cmp(&b.record.path))
            });
            analysis.duplicates.insert(key, group);
        }
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::EpisodeMetadata;
    use crate::naming::{NameFormatter, NamingStyle};
    use crate::services::metadata::EpisodeIndex;
    use std::path::PathBuf;

    fn record(name: &str) -> FileRecord {
        FileRecord::new(PathBuf::from(format!("/lib/Show/{name}")), 1024)
    }

    fn index_with(entries: &[(u16, u16, &str)]) -> EpisodeIndex {
        let mut index = EpisodeIndex::new();
        for &(season, episode, title) in entries {
            index.insert(EpisodeMetadata {
                season_number: season,
                episode_number: episode,
                title: title.to_string(),
            });
        }
        index
    }

    fn formatter() -> NameFormatter {
        NameFormatter::new("Show", NamingStyle::Dashed)
    }

    #[test]
    fn test_sole_claimant_goes_to_rename() {
        let index = index_with(&[(1, 2, "Pilot Part Two")]);
        let analysis = classify(
            vec![record("Show S01E02 720p.mkv")],
            &index,
            &formatter(),
            &[],
        );

        assert_eq!(analysis.rename.len(), 1);
        assert!(analysis.skip.is_empty());
        assert!(analysis.duplicates.is_empty());
        assert_eq!(
            analysis.rename[0].target_name,
            "Show - S01E02 - Pilot Part Two.mkv"
        );
    }

    #[test]
    fn test_exact_name_goes_to_skip() {
        let index = index_with(&[(1, 2, "Pilot Part Two")]);
        let analysis = classify(
            vec![record("Show - S01E02 - Pilot Part Two.mkv")],
            &index,
            &formatter(),
            &[],
        );

        assert!(analysis.rename.is_empty());
        assert_eq!(analysis.skip.len(), 1);
    }

    #[test]
    fn test_case_difference_is_not_already_correct() {
        let index = index_with(&[(1, 2, "Pilot Part Two")]);
        let analysis = classify(
            vec![record("show - s01e02 - pilot part two.mkv")],
            &index,
            &formatter(),
            &[],
        );

        // Comparison is byte equality, never case-folded.
        assert_eq!(analysis.rename.len(), 1);
        assert!(analysis.skip.is_empty());
    }

    #[test]
    fn test_duplicate_group_is_sorted_by_filename() {
        let index = index_with(&[(1, 1, "Pilot")]);
        let analysis = classify(
            vec![
                record("Show.S01E01.WEB.mkv"),
                record("Show S01E01 v2.mkv"),
                record("Show - 1x01.mkv"),
            ],
            &index,
            &formatter(),
            &[],
        );

        let group = analysis.duplicates.get(&(1, 1)).expect("duplicate group");
        assert_eq!(group.len(), 3);
        assert_eq!(group[0].record.filename, "Show - 1x01.mkv");
        assert_eq!(group[1].record.filename, "Show S01E01 v2.mkv");
        assert_eq!(group[2].record.filename, "Show.S01E01.WEB.mkv");
    }

    #[test]
    fn test_unparseable_file_is_unmatched() {
        let index = index_with(&[(1, 1, "Pilot")]);
        let analysis = classify(vec![record("behind the scenes.mkv")], &index, &formatter(), &[]);

        assert_eq!(analysis.unmatched.len(), 1);
        assert!(analysis.unmatched[0].1.contains("no recognizable"));
    }

    #[test]
    fn test_parsed_but_missing_metadata_is_unmatched() {
        let index = index_with(&[(1, 1, "Pilot")]);
        let analysis = classify(vec![record("Show S09E09.mkv")], &index, &formatter(), &[]);

        assert_eq!(analysis.unmatched.len(), 1);
        assert!(analysis.unmatched[0].1.contains("S09E09"));
    }

    #[test]
    fn test_special_folder_residency() {
        let index = index_with(&[(1, 1, "Pilot")]);
        let special = FileRecord::new(PathBuf::from("/lib/Show/Specials/OVA 01.mkv"), 1024);
        let analysis = classify(
            vec![special],
            &index,
            &formatter(),
            &["Specials".to_string()],
        );

        assert_eq!(analysis.specials.len(), 1);
        assert!(analysis.unmatched.is_empty());
    }
}
