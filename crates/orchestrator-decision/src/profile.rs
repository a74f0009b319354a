//! Scoring profile: weighted attribute scoring generalized from the
//! teacher's single-dimension `Quality` enum (`decision/src/quality.rs`)
//! to the full `ParsedRelease` attribute surface, plus custom-format
//! rules layered on top.

use crate::custom_formats::CustomFormatEngine;
use orchestrator_core::model::{Codec, Hdr, ParsedRelease, Protocol, Resolution, Source};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub id: String,
    pub name: String,
    pub allowed_protocols: Vec<Protocol>,
    pub min_score: Option<i32>,
    pub use_enhanced_scoring: bool,
    pub cutoff_resolution: Resolution,
    pub preferred_resolution: Option<Resolution>,
    #[serde(skip)]
    pub custom_formats: CustomFormatEngine,
}

fn resolution_weight(r: Resolution) -> i32 {
    match r {
        Resolution::R2160p => 100,
        Resolution::R1440p => 80,
        Resolution::R1080p => 60,
        Resolution::R720p => 40,
        Resolution::R480p => 20,
        Resolution::Unknown => 0,
    }
}

fn source_weight(s: Source) -> i32 {
    match s {
        Source::Remux => 50,
        Source::BluRay => 45,
        Source::WebDl => 35,
        Source::WebRip => 25,
        Source::Hdtv => 15,
        Source::Dvd => 10,
        Source::Cam | Source::Telesync => -20,
        Source::Unknown => 0,
    }
}

fn codec_weight(c: Codec) -> i32 {
    match c {
        Codec::H265 | Codec::Av1 => 20,
        Codec::H264 => 10,
        Codec::Xvid => -5,
        Codec::Unknown => 0,
    }
}

fn hdr_weight(h: Hdr) -> i32 {
    match h {
        Hdr::DolbyVisionHdr10 => 15,
        Hdr::DolbyVision => 12,
        Hdr::Hdr10Plus => 10,
        Hdr::Hdr10 => 8,
        Hdr::Hdr | Hdr::Hlg => 5,
        Hdr::None => 0,
    }
}

impl ScoringProfile {
    pub fn allows_resolution(&self, resolution: Resolution) -> bool {
        resolution_weight(resolution) >= resolution_weight(self.cutoff_resolution)
            || self.cutoff_resolution == Resolution::Unknown
    }

    pub fn is_protocol_allowed(&self, protocol: Protocol) -> bool {
        self.allowed_protocols.is_empty() || self.allowed_protocols.contains(&protocol)
    }

    /// Sums attribute weights, a preferred-resolution bonus, and the
    /// custom-format score. Does not itself reject: that is the
    /// Enricher's job against `min_score`.
    pub fn score(&self, parsed: &ParsedRelease) -> i32 {
        let mut total = resolution_weight(parsed.resolution)
            + source_weight(parsed.source)
            + codec_weight(parsed.codec)
            + hdr_weight(parsed.hdr);

        if Some(parsed.resolution) == self.preferred_resolution {
            total += 25;
        }
        if parsed.is_proper || parsed.is_repack {
            total += 5;
        }

        total += self.custom_formats.score(parsed);
        total
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            name: "Default".to_string(),
            allowed_protocols: vec![],
            min_score: None,
            use_enhanced_scoring: true,
            cutoff_resolution: Resolution::Unknown,
            preferred_resolution: Some(Resolution::R1080p),
            custom_formats: CustomFormatEngine::default_formats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_resolution_scores_higher() {
        let profile = ScoringProfile::default();
        let sd = ParsedRelease {
            resolution: Resolution::R480p,
            ..ParsedRelease::empty("x")
        };
        let uhd = ParsedRelease {
            resolution: Resolution::R2160p,
            ..ParsedRelease::empty("x")
        };
        assert!(profile.score(&uhd) > profile.score(&sd));
    }

    #[test]
    fn preferred_resolution_gets_a_bonus() {
        let profile = ScoringProfile {
            preferred_resolution: Some(Resolution::R1080p),
            ..ScoringProfile::default()
        };
        let preferred = ParsedRelease {
            resolution: Resolution::R1080p,
            ..ParsedRelease::empty("x")
        };
        let non_preferred = ParsedRelease {
            resolution: Resolution::R1080p,
            source: Source::WebRip,
            ..ParsedRelease::empty("x")
        };
        assert!(profile.score(&preferred) >= profile.score(&non_preferred));
    }

    #[test]
    fn cutoff_rejects_below_threshold_resolutions() {
        let profile = ScoringProfile {
            cutoff_resolution: Resolution::R1080p,
            ..ScoringProfile::default()
        };
        assert!(!profile.allows_resolution(Resolution::R720p));
        assert!(profile.allows_resolution(Resolution::R1080p));
        assert!(profile.allows_resolution(Resolution::R2160p));
    }
}
