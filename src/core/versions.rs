//! Duplicate version assignment.
//!
//! When several files claim the same episode, each gets a stable version
//! number. Version 1 renders without a suffix, version 2 and up render
//! with a " v2" style marker. Assignment is idempotent: a file already
//! carrying a version token keeps it on every subsequent run, so target
//! names never accumulate stacked suffixes.

use crate::models::media::ClassifiedFile;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Version token at the end of a filename stem, e.g. "Show S01E01 v2".
static VERSION_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s._-][vV](\d{1,3})$").unwrap());

/// A duplicate-group member with its assigned version.
#[derive(Debug)]
pub struct VersionedFile {
    pub file: ClassifiedFile,
    pub version: u32,
}

/// Extract an existing version token from a filename stem, if any.
pub fn existing_version(stem: &str) -> Option<u32> {
    VERSION_TOKEN_RE
        .captures(stem)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|&v| v >= 1)
}

/// Assign version numbers to a duplicate group.
///
/// The group must already be in its final deterministic order. Files that
/// carry a version token keep it unless an earlier member of the group
/// claimed the same number; everyone else fills the lowest unused number,
/// starting from 1.
pub fn assign_versions(group: Vec<ClassifiedFile>) -> Vec<VersionedFile> {
    let mut used: HashSet<u32> = HashSet::new();
    let mut claims: Vec<Option<u32>> = Vec::with_capacity(group.len());

    for file in &group {
        let claim = existing_version(file.record.stem());
        match claim {
            Some(v) if !used.contains(&v) => {
                used.insert(v);
                claims.push(Some(v));
            }
            _ => claims.push(None),
        }
    }

    let mut next_free = 1u32;
    let mut resolved = Vec::with_capacity(group.len());

    for (file, claim) in group.into_iter().zip(claims) {
        let version = match claim {
            Some(v) => v,
            None => {
                while used.contains(&next_free) {
                    next_free += 1;
                }
                used.insert(next_free);
                next_free
            }
        };
        resolved.push(VersionedFile { file, version });
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::{ClassifiedFile, FileRecord};
    use std::path::PathBuf;

    fn classified(name: &str) -> ClassifiedFile {
        ClassifiedFile {
            record: FileRecord::new(PathBuf::from(format!("/lib/Show/{name}")), 1024),
            parsed: None,
            episode: None,
            target_name: String::new(),
            already_correct: false,
        }
    }

    #[test]
    fn test_existing_version_token() {
        assert_eq!(existing_version("Show S01E01 v2"), Some(2));
        assert_eq!(existing_version("Show.S01E01.v3"), Some(3));
        assert_eq!(existing_version("Show S01E01"), None);
        // Token must terminate the stem.
        assert_eq!(existing_version("Show v2 S01E01"), None);
        // No separator before the token means no token.
        assert_eq!(existing_version("Showv2"), None);
    }

    #[test]
    fn test_unversioned_pair_fills_from_one() {
        let resolved = assign_versions(vec![
            classified("Show - 1x01.mkv"),
            classified("Show.S01E01.WEB.mkv"),
        ]);
        assert_eq!(resolved[0].version, 1);
        assert_eq!(resolved[1].version, 2);
    }

    #[test]
    fn test_existing_token_is_preserved() {
        let resolved = assign_versions(vec![
            classified("Show S01E01 v2.mkv"),
            classified("Show.S01E01.WEB.mkv"),
        ]);
        assert_eq!(resolved[0].version, 2);
        assert_eq!(resolved[1].version, 1);
    }

    #[test]
    fn test_rerun_is_stable() {
        // The output of a previous run must map back onto itself.
        let resolved = assign_versions(vec![
            classified("Show - S01E01 - Pilot v2.mkv"),
            classified("Show - S01E01 - Pilot.mkv"),
        ]);
        assert_eq!(resolved[0].version, 2);
        assert_eq!(resolved[1].version, 1);
    }

    #[test]
    fn test_colliding_claims_reassign_later_member() {
        let resolved = assign_versions(vec![
            classified("Show S01E01 v2.mkv"),
            classified("Show S01E01 WEB v2.mkv"),
            classified("Show S01E01 v3.mkv"),
        ]);
        assert_eq!(resolved[0].version, 2);
        // Second claim on v2 loses and fills the lowest free number.
        assert_eq!(resolved[1].version, 1);
        assert_eq!(resolved[2].version, 3);
    }

    #[test]
    fn test_n_way_group_gets_distinct_versions() {
        let resolved = assign_versions(vec![
            classified("a.mkv"),
            classified("b.mkv"),
            classified("c.mkv"),
            classified("d.mkv"),
        ]);
        let versions: Vec<u32> = resolved.iter().map(|v| v.version).collect();
        assert_eq!(versions, vec![1, 2, 3, 4]);
    }
}
