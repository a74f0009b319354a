use once_cell::sync::Lazy;
use orchestrator_core::model::Hdr;
use regex::Regex;

static DV_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(dv|dolby\s?vision)\b").unwrap());
static HDR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(hdr10\+|hdr10plus|hdr10|hdr|hlg)\b").unwrap());

/// Precedence: `dolby-vision + hdr10|hdr -> dolby-vision-hdr10`;
/// `dolby-vision` alone stays `dolby-vision`; otherwise
/// `hdr10+ > hdr10 > hdr > hlg`.
pub fn extract_hdr(title: &str) -> Hdr {
    let has_dv = DV_REGEX.is_match(title);
    let hdr_token = HDR_REGEX.find(title).map(|m| m.as_str().to_lowercase());

    match (has_dv, hdr_token.as_deref()) {
        (true, Some(t)) if t.contains("hdr") => Hdr::DolbyVisionHdr10,
        (true, _) => Hdr::DolbyVision,
        (false, Some(t)) if t.contains("hdr10+") || t.contains("hdr10plus") => Hdr::Hdr10Plus,
        (false, Some(t)) if t.contains("hdr10") => Hdr::Hdr10,
        (false, Some(t)) if t == "hdr" => Hdr::Hdr,
        (false, Some(t)) if t == "hlg" => Hdr::Hlg,
        _ => Hdr::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dolby_vision_with_hdr10_combines() {
        assert_eq!(extract_hdr("Movie 2160p DV HDR10"), Hdr::DolbyVisionHdr10);
    }

    #[test]
    fn dolby_vision_alone() {
        assert_eq!(extract_hdr("Movie 2160p Dolby Vision"), Hdr::DolbyVision);
    }

    #[test]
    fn plain_hdr10_plus_outranks_hdr10() {
        assert_eq!(extract_hdr("Movie 2160p HDR10+"), Hdr::Hdr10Plus);
    }

    #[test]
    fn no_hdr_tokens() {
        assert_eq!(extract_hdr("Movie 1080p BluRay"), Hdr::None);
    }
}
