//! Pure release-title parsing. No network or disk access; every
//! extractor is its own module of a `Lazy<Regex>` table plus a
//! normalizer, the shape `indexers/src/hdbits/parser.rs` uses, widened
//! into the closed enums and confidence model the orchestrator needs.

mod audio;
mod codec;
mod episode;
mod external_ids;
mod hdr;
mod language;
mod normalize;
mod release_group;
mod resolution;
mod source;
mod year;

pub use external_ids::extract_external_ids;
pub use release_group::extract_release_group;

use once_cell::sync::Lazy;
use orchestrator_core::model::ParsedRelease;
use regex::Regex;

static FIRST_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(19\d{2}|20\d{2}|2160p|1080p|720p|480p|1440p|4k|s\d{1,2}e\d{1,3}|s\d{1,2}\b|proper|repack)\b").unwrap()
});
static PROPER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bproper\b").unwrap());
static REPACK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\brepack\b").unwrap());
static THREED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b3d\b").unwrap());

/// Parses a raw release title into structured attributes. Pure and
/// idempotent: calling this twice on the same string yields an equal
/// `ParsedRelease`.
pub fn parse_release(title: &str) -> ParsedRelease {
    let normalized = normalize::normalize(title);
    let current_year = 2026; // stamped by the caller's clock in production use

    let resolution = resolution::extract_resolution(&normalized);
    let source = source::extract_source(&normalized);
    let codec = codec::extract_codec(&normalized);
    let hdr = hdr::extract_hdr(&normalized);
    let audio = audio::extract_audio(&normalized);
    let languages = language::extract_languages(&normalized);
    let release_group = release_group::extract_release_group(&normalized);
    let episode = episode::extract_episode(&normalized);
    let year = year::extract_year(&normalized, current_year + 2);
    let external_ids = external_ids::extract_external_ids(&normalized);

    let clean_title = extract_clean_title(&normalized);
    let is_proper = PROPER_REGEX.is_match(&normalized);
    let is_repack = REPACK_REGEX.is_match(&normalized);
    let is_3d = THREED_REGEX.is_match(&normalized);
    let is_remux = matches!(source, orchestrator_core::model::Source::Remux);

    let confidence = calculate_confidence(year, resolution, source, codec, &release_group, &episode);

    ParsedRelease {
        clean_title,
        year,
        languages,
        resolution,
        source,
        codec,
        hdr,
        audio,
        release_group,
        is_proper,
        is_repack,
        is_3d,
        is_remux,
        episode,
        external_ids,
        confidence,
    }
}

fn extract_clean_title(normalized: &str) -> String {
    let end = FIRST_MARKER_REGEX
        .find(normalized)
        .map(|m| m.start())
        .unwrap_or(normalized.len());
    let raw = normalized[..end].trim();
    title_case(raw)
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn calculate_confidence(
    year: Option<i32>,
    resolution: orchestrator_core::model::Resolution,
    source: orchestrator_core::model::Source,
    codec: orchestrator_core::model::Codec,
    release_group: &Option<String>,
    episode: &Option<orchestrator_core::model::EpisodeInfo>,
) -> f64 {
    let mut recovered = 0u32;
    const TOTAL: u32 = 6;

    if year.is_some() {
        recovered += 1;
    }
    if resolution != orchestrator_core::model::Resolution::Unknown {
        recovered += 1;
    }
    if source != orchestrator_core::model::Source::Unknown {
        recovered += 1;
    }
    if codec != orchestrator_core::model::Codec::Unknown {
        recovered += 1;
    }
    if release_group.is_some() {
        recovered += 1;
    }
    if episode.is_some() {
        recovered += 1;
    }

    recovered as f64 / TOTAL as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestrator_core::model::{Codec, Resolution, Source};

    #[test]
    fn parses_a_well_formed_movie_release() {
        let parsed = parse_release("Oppenheimer.2023.1080p.BluRay.x264-CTRLHD");
        assert_eq!(parsed.resolution, Resolution::R1080p);
        assert_eq!(parsed.source, Source::BluRay);
        assert_eq!(parsed.codec, Codec::H264);
        assert_eq!(parsed.release_group, Some("CTRLHD".to_string()));
        assert_eq!(parsed.year, Some(2023));
        assert_eq!(parsed.clean_title, "Oppenheimer");
    }

    #[test]
    fn confidence_is_bounded() {
        let parsed = parse_release("Random Title With Nothing Recognizable");
        assert!(parsed.confidence >= 0.0 && parsed.confidence <= 1.0);
    }

    #[test]
    fn confidence_increases_with_more_recognized_tokens() {
        let sparse = parse_release("Some Movie");
        let rich = parse_release("Some.Movie.2021.1080p.BluRay.x264-GROUP");
        assert!(rich.confidence > sparse.confidence);
    }

    #[test]
    fn is_idempotent() {
        let title = "Show.S01E01.1080p.WEB-DL.DDP5.1.x265-GROUP";
        assert_eq!(
            format!("{:?}", parse_release(title)),
            format!("{:?}", parse_release(title))
        );
    }

    #[test]
    fn never_fails_on_junk_input() {
        let parsed = parse_release("###---...");
        assert_eq!(parsed.resolution, Resolution::Unknown);
    }
}
