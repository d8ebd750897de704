//! Integration tests for the filename pattern parser.
//!
//! Tests cover:
//! - Canonical season/episode token forms
//! - Cascade precedence between overlapping rules
//! - Series-name sanitation and the Unknown Series sentinel
//! - Rejection of unparseable and episode-zero input

use episode_renamer::core::parser::{parse, UNKNOWN_SERIES};
use episode_renamer::models::media::PatternId;

fn parse_ok(name: &str) -> episode_renamer::models::media::ParseResult {
    parse(name).unwrap_or_else(|| panic!("expected a parse for {name}"))
}

// ========== CANONICAL FORMS ==========

#[test]
fn test_canonical_sxxexx_form() {
    let result = parse_ok("Series.S01E02.Title.mkv");
    assert_eq!(result.series_name, "Series");
    assert_eq!(result.season, 1);
    assert_eq!(result.episode, 2);
    assert_eq!(result.pattern, PatternId::SeasonEpisode);
}

#[test]
fn test_nxnn_form() {
    let result = parse_ok("Show Name 2x05 Title.mkv");
    assert_eq!((result.season, result.episode), (2, 5));
}

#[test]
fn test_verbose_form() {
    let result = parse_ok("My Show Season 3 Episode 12.mkv");
    assert_eq!((result.season, result.episode), (3, 12));
    assert_eq!(result.pattern, PatternId::VerboseSeasonEpisode);
}

#[test]
fn test_hash_and_keyword_forms() {
    assert_eq!(parse_ok("Great Show #12.mkv").episode, 12);
    assert_eq!(parse_ok("Show Name Episode 9.mkv").episode, 9);
    assert_eq!(parse_ok("Show Name Ep.13.mkv").episode, 13);
}

#[test]
fn test_dash_and_bracket_forms() {
    let dash = parse_ok("Original Name - 02 - Some Title.mkv");
    assert_eq!(dash.series_name, "Original Name");
    assert_eq!(dash.episode, 2);

    let bracket = parse_ok("[SubGroup] Neat Show [05].mkv");
    assert_eq!(bracket.series_name, "Neat Show");
    assert_eq!(bracket.episode, 5);
}

#[test]
fn test_special_keyword_maps_to_season_zero() {
    let result = parse_ok("Show OVA 2.mkv");
    assert_eq!(result.season, 0);
    assert_eq!(result.episode, 2);
}

// ========== PRECEDENCE AND SANITATION ==========

#[test]
fn test_explicit_token_beats_dash_form() {
    let result = parse_ok("Show S02E03 - 99.mkv");
    assert_eq!((result.season, result.episode), (2, 3));
}

#[test]
fn test_numeric_first_capture_is_episode_not_series() {
    let result = parse_ok("02 - Some Title.mkv");
    assert_eq!(result.series_name, UNKNOWN_SERIES);
    assert_eq!(result.episode, 2);
}

#[test]
fn test_series_name_sanitation() {
    let result = parse_ok("Some.Long_Show.Name.S02E04.mkv");
    assert_eq!(result.series_name, "Some Long Show Name");
}

// ========== REJECTION ==========

#[test]
fn test_unparseable_and_episode_zero_return_none() {
    assert!(parse("just a plain name.mkv").is_none());
    assert!(parse("Show S01E00.mkv").is_none());
    assert!(parse("").is_none());
}
