use once_cell::sync::Lazy;
use orchestrator_core::model::Resolution;
use regex::Regex;

static RESOLUTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(2160p|4k|uhd|1440p|1080p|1080i|720p|480p|576p|sd)\b").unwrap()
});

pub fn extract_resolution(title: &str) -> Resolution {
    RESOLUTION_REGEX
        .find(title)
        .map(|m| normalize_resolution(m.as_str()))
        .unwrap_or(Resolution::Unknown)
}

fn normalize_resolution(raw: &str) -> Resolution {
    match raw.to_lowercase().as_str() {
        "2160p" | "4k" | "uhd" => Resolution::R2160p,
        "1440p" => Resolution::R1440p,
        "1080p" | "1080i" => Resolution::R1080p,
        "720p" => Resolution::R720p,
        "480p" | "576p" | "sd" => Resolution::R480p,
        _ => Resolution::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_4k_aliases() {
        assert_eq!(extract_resolution("Movie 2160p BluRay"), Resolution::R2160p);
        assert_eq!(extract_resolution("Movie 4K HDR"), Resolution::R2160p);
        assert_eq!(extract_resolution("Movie UHD BluRay"), Resolution::R2160p);
    }

    #[test]
    fn defaults_to_unknown() {
        assert_eq!(extract_resolution("Movie BluRay"), Resolution::Unknown);
    }
}
