//! The structured output of the release parser. Generalized from the
//! teacher's ad hoc `HashMap<String, Value>` quality map in
//! `indexers/src/hdbits/parser.rs` into closed enums plus a confidence
//! score, per the spec's parser contract.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Resolution {
    R480p,
    R720p,
    R1080p,
    R1440p,
    R2160p,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Source {
    BluRay,
    Remux,
    WebDl,
    WebRip,
    Hdtv,
    Dvd,
    Cam,
    Telesync,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Codec {
    H264,
    H265,
    Av1,
    Xvid,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Hdr {
    #[default]
    None,
    Hdr,
    Hdr10,
    Hdr10Plus,
    DolbyVision,
    DolbyVisionHdr10,
    Hlg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Audio {
    Aac,
    Dd,
    DdPlus,
    Dts,
    DtsHd,
    DtsHdMa,
    DtsX,
    TrueHd,
    Atmos,
    Flac,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LangCode {
    En,
    De,
    Fr,
    Es,
    It,
    Ja,
    Ko,
    Zh,
    Ru,
    Multi,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpisodeInfo {
    pub season: Option<u32>,
    pub episodes: Vec<u32>,
    pub seasons: Vec<u32>,
    pub absolute_episode: Option<u32>,
    pub air_date: Option<String>,
    pub is_season_pack: bool,
    pub is_complete_series: bool,
    pub is_daily: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalIds {
    pub imdb_id: Option<String>,
    pub tmdb_id: Option<i64>,
    pub tvdb_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedRelease {
    pub clean_title: String,
    pub year: Option<i32>,
    pub languages: Vec<LangCode>,
    pub resolution: Resolution,
    pub source: Source,
    pub codec: Codec,
    pub hdr: Hdr,
    pub audio: Audio,
    pub release_group: Option<String>,
    pub is_proper: bool,
    pub is_repack: bool,
    pub is_3d: bool,
    pub is_remux: bool,
    pub episode: Option<EpisodeInfo>,
    pub external_ids: ExternalIds,
    pub confidence: f64,
}

impl ParsedRelease {
    pub fn empty(clean_title: impl Into<String>) -> Self {
        Self {
            clean_title: clean_title.into(),
            year: None,
            languages: vec![LangCode::En],
            resolution: Resolution::Unknown,
            source: Source::Unknown,
            codec: Codec::Unknown,
            hdr: Hdr::None,
            audio: Audio::Unknown,
            release_group: None,
            is_proper: false,
            is_repack: false,
            is_3d: false,
            is_remux: false,
            episode: None,
            external_ids: ExternalIds::default(),
            confidence: 0.0,
        }
    }
}
