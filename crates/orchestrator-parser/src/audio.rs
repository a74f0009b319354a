use once_cell::sync::Lazy;
use orchestrator_core::model::Audio;
use regex::Regex;

static AUDIO_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(dts-hd\s?ma|dts-hdma|dts-hd|dts-x|dtsx|truehd|atmos|dd\+|ddp|dd|ac3|dts|aac|mp3|flac)\b").unwrap()
});

/// Precedence favors the most specific match per family:
/// `dts-hdma > dts-hd > dts`, `atmos > truehd`, `dd+ > dd`.
pub fn extract_audio(title: &str) -> Audio {
    let lower = title.to_lowercase();
    if lower.contains("atmos") {
        return Audio::Atmos;
    }
    if lower.contains("dts-hd ma") || lower.contains("dts-hdma") || lower.contains("dts hd ma") {
        return Audio::DtsHdMa;
    }
    if lower.contains("dts-x") || lower.contains("dtsx") {
        return Audio::DtsX;
    }
    if lower.contains("dts-hd") {
        return Audio::DtsHd;
    }
    if lower.contains("truehd") {
        return Audio::TrueHd;
    }
    if lower.contains("dd+") || lower.contains("ddp") {
        return Audio::DdPlus;
    }

    AUDIO_REGEX
        .find(title)
        .map(|m| normalize_audio(m.as_str()))
        .unwrap_or(Audio::Unknown)
}

fn normalize_audio(raw: &str) -> Audio {
    match raw.to_lowercase().as_str() {
        "dd" | "ac3" => Audio::Dd,
        "dts" => Audio::Dts,
        "aac" => Audio::Aac,
        "mp3" => Audio::Unknown,
        "flac" => Audio::Flac,
        _ => Audio::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atmos_outranks_truehd() {
        assert_eq!(extract_audio("Movie TrueHD Atmos 7.1"), Audio::Atmos);
    }

    #[test]
    fn dts_hd_ma_is_most_specific() {
        assert_eq!(extract_audio("Movie DTS-HD MA 5.1"), Audio::DtsHdMa);
        assert_eq!(extract_audio("Movie DTS-HD 5.1"), Audio::DtsHd);
        assert_eq!(extract_audio("Movie DTS 5.1"), Audio::Dts);
    }

    #[test]
    fn dd_plus_outranks_dd() {
        assert_eq!(extract_audio("Movie DD+ 5.1"), Audio::DdPlus);
        assert_eq!(extract_audio("Movie DD 5.1"), Audio::Dd);
    }
}
