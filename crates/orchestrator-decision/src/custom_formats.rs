//! Custom-format scoring rules. Adapted from `decision/src/custom_formats.rs`'s
//! `FormatSpecification`/`CustomFormat`/`CustomFormatEngine` triplet, narrowed
//! to operate directly on a `ParsedRelease` instead of the teacher's
//! separate `ReleaseData` shadow struct.

use orchestrator_core::model::{Audio, Hdr, ParsedRelease};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FormatRule {
    ReleaseGroupIs(String),
    HasHdr,
    HasAtmos,
    CodecIsH265,
    IsRemux,
    IsProperOrRepack,
}

impl FormatRule {
    fn matches(&self, parsed: &ParsedRelease) -> bool {
        match self {
            FormatRule::ReleaseGroupIs(name) => parsed
                .release_group
                .as_deref()
                .map(|g| g.eq_ignore_ascii_case(name))
                .unwrap_or(false),
            FormatRule::HasHdr => parsed.hdr != Hdr::None,
            FormatRule::HasAtmos => parsed.audio == Audio::Atmos,
            FormatRule::CodecIsH265 => parsed.codec == orchestrator_core::model::Codec::H265,
            FormatRule::IsRemux => parsed.is_remux,
            FormatRule::IsProperOrRepack => parsed.is_proper || parsed.is_repack,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomFormat {
    pub name: String,
    pub rule: FormatRule,
    pub score: i32,
    pub enabled: bool,
}

impl CustomFormat {
    pub fn matches(&self, parsed: &ParsedRelease) -> bool {
        self.enabled && self.rule.matches(parsed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomFormatEngine {
    pub formats: Vec<CustomFormat>,
}

impl Default for CustomFormatEngine {
    fn default() -> Self {
        Self { formats: vec![] }
    }
}

impl CustomFormatEngine {
    pub fn default_formats() -> Self {
        Self {
            formats: vec![
                CustomFormat {
                    name: "HDR".to_string(),
                    rule: FormatRule::HasHdr,
                    score: 10,
                    enabled: true,
                },
                CustomFormat {
                    name: "Atmos".to_string(),
                    rule: FormatRule::HasAtmos,
                    score: 5,
                    enabled: true,
                },
                CustomFormat {
                    name: "x265/HEVC".to_string(),
                    rule: FormatRule::CodecIsH265,
                    score: 5,
                    enabled: true,
                },
                CustomFormat {
                    name: "Remux".to_string(),
                    rule: FormatRule::IsRemux,
                    score: 20,
                    enabled: true,
                },
                CustomFormat {
                    name: "Proper/Repack".to_string(),
                    rule: FormatRule::IsProperOrRepack,
                    score: 5,
                    enabled: true,
                },
            ],
        }
    }

    pub fn score(&self, parsed: &ParsedRelease) -> i32 {
        self.formats
            .iter()
            .filter(|f| f.matches(parsed))
            .map(|f| f.score)
            .sum()
    }

    pub fn matching_formats(&self, parsed: &ParsedRelease) -> Vec<&CustomFormat> {
        self.formats.iter().filter(|f| f.matches(parsed)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestrator_core::model::ParsedRelease;

    #[test]
    fn remux_and_hdr_stack_additively() {
        let engine = CustomFormatEngine::default_formats();
        let parsed = ParsedRelease {
            is_remux: true,
            hdr: Hdr::Hdr10,
            ..ParsedRelease::empty("x")
        };
        assert_eq!(engine.score(&parsed), 20 + 10);
    }

    #[test]
    fn disabled_format_does_not_contribute() {
        let mut engine = CustomFormatEngine::default_formats();
        engine.formats[0].enabled = false;
        let parsed = ParsedRelease {
            hdr: Hdr::Hdr10,
            ..ParsedRelease::empty("x")
        };
        assert_eq!(engine.score(&parsed), 0);
    }
}
