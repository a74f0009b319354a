//! Release-group extraction. Tries several shapes in order of
//! specificity and rejects blacklisted quality/codec/source tokens that
//! would otherwise look like a trailing group tag.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static ANIME_FANSUB_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([A-Za-z0-9_-]+)\]").unwrap());
static YTS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[?YTS(\.[A-Z]{2,3})?\]?").unwrap());
static HYPHEN_SUFFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-([A-Za-z0-9]+(?:-[A-Za-z0-9]+)?)\s*$").unwrap());
static BRACKET_SUFFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\[({]([A-Za-z0-9_.]+)[\])}]\s*$").unwrap());
static AT_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"@([A-Za-z0-9_]+)\s*$").unwrap());
static TILDE_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"~([A-Za-z0-9_]+)~\s*$").unwrap());

static BLACKLIST: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "1080p", "720p", "2160p", "480p", "4k", "bluray", "webdl", "web-dl", "webrip", "hdtv",
        "dvdrip", "x264", "x265", "h264", "h265", "hevc", "aac", "dts", "ac3", "proper", "repack",
        "internal", "remux",
    ]
    .into_iter()
    .collect()
});

fn is_blacklisted(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    if BLACKLIST.contains(lower.as_str()) {
        return true;
    }
    if lower.chars().all(|c| c.is_ascii_digit()) && lower.len() == 4 {
        return true; // bare year
    }
    false
}

fn valid_length(candidate: &str) -> bool {
    (2..=20).contains(&candidate.len())
}

pub fn extract_release_group(title: &str) -> Option<String> {
    if let Some(caps) = ANIME_FANSUB_REGEX.captures(title) {
        let candidate = &caps[1];
        if valid_length(candidate) && !is_blacklisted(candidate) {
            return Some(candidate.to_string());
        }
    }

    if YTS_REGEX.is_match(title) {
        return Some("YTS".to_string());
    }

    for re in [&*HYPHEN_SUFFIX_REGEX, &*BRACKET_SUFFIX_REGEX, &*AT_SUFFIX_REGEX, &*TILDE_SUFFIX_REGEX] {
        if let Some(caps) = re.captures(title) {
            let candidate = caps[1].to_string();
            if valid_length(&candidate) && !is_blacklisted(&candidate) {
                return Some(candidate);
            }
        }
    }

    // Fallback: last dash-separated token, only when a dash is actually present.
    if !title.contains('-') {
        return None;
    }
    title
        .rsplit('-')
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| valid_length(s) && !is_blacklisted(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_yts_family() {
        assert_eq!(
            extract_release_group("Oppenheimer (2023) [1080p] [WEBRip] [5.1] [YTS.MX]"),
            Some("YTS".to_string())
        );
    }

    #[test]
    fn hyphen_suffix_group() {
        assert_eq!(
            extract_release_group("Show S01E01 1080p BluRay x264-CTRLHD"),
            Some("CTRLHD".to_string())
        );
    }

    #[test]
    fn rejects_blacklisted_trailing_quality_token() {
        assert_eq!(extract_release_group("Movie 2020 1080p"), None);
    }
}
