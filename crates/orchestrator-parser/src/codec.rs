use once_cell::sync::Lazy;
use orchestrator_core::model::Codec;
use regex::Regex;

static CODEC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(x264|x265|h\.?264|h\.?265|hevc|avc|av1|xvid|divx)\b").unwrap());

pub fn extract_codec(title: &str) -> Codec {
    CODEC_REGEX
        .find(title)
        .map(|m| normalize_codec(m.as_str()))
        .unwrap_or(Codec::Unknown)
}

fn normalize_codec(raw: &str) -> Codec {
    match raw.to_lowercase().replace('.', "").as_str() {
        "x264" | "h264" | "avc" => Codec::H264,
        "x265" | "h265" | "hevc" => Codec::H265,
        "av1" => Codec::Av1,
        "xvid" | "divx" => Codec::Xvid,
        _ => Codec::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_hevc_aliases() {
        assert_eq!(extract_codec("Movie x265 HDR"), Codec::H265);
        assert_eq!(extract_codec("Movie HEVC HDR"), Codec::H265);
        assert_eq!(extract_codec("Movie H.265 HDR"), Codec::H265);
    }
}
