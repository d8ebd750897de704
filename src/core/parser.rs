//! Filename pattern parser.
//!
//! Extracts a (series, season, episode) identity from inconsistently
//! formatted filenames by running an ordered cascade of matching rules.
//! The first rule that matches wins: rule order encodes precedence, from
//! the most explicit forms (S01E02) down to keyword and bracket forms.
//!
//! Every match attempt returns its own captures; there is no shared
//! match state, so the parser is reentrant and unit-testable in isolation.

use crate::models::media::{ParseResult, PatternId};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Sentinel series name meaning "defer to externally supplied metadata".
pub const UNKNOWN_SERIES: &str = "Unknown Series";

/// Filenames are truncated to this many characters before matching so that
/// adversarial input length cannot blow up matching time.
const MAX_PARSE_CHARS: usize = 200;

// ============================================================================
// Lazy-initialized regex patterns (compiled once, reused across calls)
// ============================================================================

/// S01E02 and unpadded variants (S1E2, s01e2).
static SEASON_EPISODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.*?)[\s._-]*[Ss](\d{1,2})[Ee](\d{1,3})").unwrap());

/// 1x02 variant. Left boundary must be a separator so resolutions like
/// 720x480 never match.
static NXNN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?[\s._\[(-])?(\d{1,2})[xX](\d{1,3})(?:[\s._\])-]|$)").unwrap()
});

/// Verbose "Season 1 Episode 2" form.
static VERBOSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.*?)[\s._-]*Season[\s._-]*(\d{1,2})[\s._-]+Episode[\s._-]*(\d{1,3})")
        .unwrap()
});

/// Hash/pound-prefixed episode number: "Show #12".
static HASH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)[\s._-]*#(\d{1,3})(?:\D|$)").unwrap());

/// Dash-separated with a trailing title: "Series - 02 - Title" or
/// "02 - Title".
static DASH_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:(.+?)\s*-\s*)?(\d{1,3})\s*-\s*(\S.*?)\s*$").unwrap());

/// Dash-separated with the number last: "Series - 02".
static DASH_TRAILING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(.+?)\s*-\s*(\d{1,3})\s*$").unwrap());

/// Bare leading number: "02 Title" or just "02".
static LEADING_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,3})(?:[\s._-]+(.*))?$").unwrap());

/// Keyword forms: "Episode 12", "Ep 12", "Ep.12", "E12". The keyword must
/// sit at the start of the stem or right after a separator, so a word that
/// merely ends in 'e' never matches.
static EPISODE_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(.*?)[\s._-])?(?:Episode|Ep\.?|E)[\s._]*(\d{1,3})(?:\D|$)").unwrap()
});

/// Bracket or parenthesis enclosed episode number: "[12]" / "(12)".
static BRACKETED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)[\s._-]*[\[(](\d{1,3})[\])]").unwrap());

/// OVA/Special keyword forms, mapped to season 0. The trailing number is
/// optional; a bare "OVA" is episode 1. Anchored to the end of the stem so
/// the keyword never matches inside an ordinary word.
static SPECIAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(.*?)[\s._-]+)?(?:OVA|OAD|SP|Special)(?:[\s._-]*(\d{1,3}))?\s*$")
        .unwrap()
});

// Series-name sanitation patterns.
static ANNOTATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)|【[^】]*】|「[^」]*」").unwrap());
static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Parse a filename into a season/episode identity.
///
/// Returns `None` when no rule matches; callers must treat that as
/// "cannot classify", never as episode 0.
pub fn parse(file_name: &str) -> Option<ParseResult> {
    let stem = strip_extension(file_name);
    let stem: String = stem.chars().take(MAX_PARSE_CHARS).collect();
    if stem.trim().is_empty() {
        return None;
    }

    let result = run_cascade(&stem);
    match &result {
        Some(parsed) => debug!(
            file_name,
            series = %parsed.series_name,
            season = parsed.season,
            episode = parsed.episode,
            pattern = ?parsed.pattern,
            "parsed filename"
        ),
        None => debug!(file_name, "no pattern matched"),
    }
    result
}

fn run_cascade(stem: &str) -> Option<ParseResult> {
    // Rule 1: explicit season+episode tokens (S01E02, 1x02, verbose form).
    if let Some(caps) = SEASON_EPISODE_RE.captures(stem) {
        return build(
            caps.get(1).map(|m| m.as_str()),
            parse_num(caps.get(2)?.as_str())?,
            caps.get(3)?.as_str(),
            PatternId::SeasonEpisode,
        );
    }
    if let Some(caps) = NXNN_RE.captures(stem) {
        return build(
            caps.get(1).map(|m| m.as_str()),
            parse_num(caps.get(2)?.as_str())?,
            caps.get(3)?.as_str(),
            PatternId::SeasonEpisode,
        );
    }
    if let Some(caps) = VERBOSE_RE.captures(stem) {
        return build(
            caps.get(1).map(|m| m.as_str()),
            parse_num(caps.get(2)?.as_str())?,
            caps.get(3)?.as_str(),
            PatternId::VerboseSeasonEpisode,
        );
    }

    // Rule 2: hash-prefixed episode number.
    if let Some(caps) = HASH_RE.captures(stem) {
        return build(
            caps.get(1).map(|m| m.as_str()),
            1,
            caps.get(2)?.as_str(),
            PatternId::HashEpisode,
        );
    }

    // Rule 3: dash-separated forms. A purely numeric first capture is an
    // episode number with trailing title text, not a series name.
    if let Some(caps) = DASH_TITLE_RE.captures(stem) {
        let series = caps.get(1).map(|m| m.as_str());
        if let Some(s) = series {
            if is_numeric(s) {
                return finish(UNKNOWN_SERIES.to_string(), 1, s, PatternId::DashNumber);
            }
        }
        return build(series, 1, caps.get(2)?.as_str(), PatternId::DashNumber);
    }
    if let Some(caps) = DASH_TRAILING_RE.captures(stem) {
        let series = caps.get(1)?.as_str();
        if is_numeric(series) {
            return finish(UNKNOWN_SERIES.to_string(), 1, series, PatternId::DashNumber);
        }
        return build(Some(series), 1, caps.get(2)?.as_str(), PatternId::DashNumber);
    }

    // Rule 4: bare leading number, remainder is title text.
    if let Some(caps) = LEADING_NUMBER_RE.captures(stem) {
        return build(None, 1, caps.get(1)?.as_str(), PatternId::LeadingNumber);
    }

    // Rule 5: keyword forms.
    if let Some(caps) = EPISODE_KEYWORD_RE.captures(stem) {
        return build(
            caps.get(1).map(|m| m.as_str()),
            1,
            caps.get(2)?.as_str(),
            PatternId::EpisodeKeyword,
        );
    }

    // Rule 6: bracket/parenthesis enclosed number.
    if let Some(caps) = BRACKETED_RE.captures(stem) {
        return build(
            caps.get(1).map(|m| m.as_str()),
            1,
            caps.get(2)?.as_str(),
            PatternId::BracketedNumber,
        );
    }

    // Rule 7: OVA/Special keyword, season 0.
    if let Some(caps) = SPECIAL_RE.captures(stem) {
        let episode = caps.get(2).map(|m| m.as_str()).unwrap_or("1");
        return build(
            caps.get(1).map(|m| m.as_str()),
            0,
            episode,
            PatternId::SpecialKeyword,
        );
    }

    None
}

fn build(
    series: Option<&str>,
    season: u16,
    episode: &str,
    pattern: PatternId,
) -> Option<ParseResult> {
    let series_name = clean_series_name(series.unwrap_or(""));
    finish(series_name, season, episode, pattern)
}

fn finish(
    series_name: String,
    season: u16,
    episode: &str,
    pattern: PatternId,
) -> Option<ParseResult> {
    let episode = parse_num(episode)?;
    // Episode 0 never exists; a rule that captured 0 has matched noise.
    if episode == 0 {
        return None;
    }
    Some(ParseResult {
        series_name,
        season,
        episode,
        pattern,
    })
}

fn parse_num(s: &str) -> Option<u16> {
    s.parse().ok()
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}

/// Sanitize a captured series name: strip bracketed annotation groups,
/// normalize dot/underscore separators to single spaces.
fn clean_series_name(raw: &str) -> String {
    let without_annotations = ANNOTATION_RE.replace_all(raw, " ");
    let spaced = without_annotations.replace(['.', '_'], " ");
    let collapsed = MULTI_SPACE_RE.replace_all(&spaced, " ");
    let cleaned = collapsed.trim().trim_matches('-').trim();

    if cleaned.is_empty() {
        UNKNOWN_SERIES.to_string()
    } else {
        cleaned.to_string()
    }
}
