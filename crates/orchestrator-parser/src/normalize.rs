//! Title normalization run before attribute extraction: separators
//! collapsed to spaces, known indexer prefixes/suffixes stripped.

use once_cell::sync::Lazy;
use regex::Regex;

static SITE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(www\.)?[a-z0-9-]+\.(com|net|org|to|io|me)\s*-\s*").unwrap());
static SITE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*-\s*\[?(eztv|rarbg|tgx|ettv)\]?$").unwrap());
static VIDEO_EXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(mkv|mp4|avi|ts|m2ts)$").unwrap());

pub fn normalize(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| if c == '.' || c == '_' { ' ' } else { c })
        .collect();
    let no_ext = VIDEO_EXT.replace(&replaced, "").to_string();
    let no_prefix = SITE_PREFIX.replace(&no_ext, "").to_string();
    let no_suffix = SITE_SUFFIX.replace(&no_prefix, "").to_string();
    no_suffix.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_dot_separators() {
        assert_eq!(normalize("Oppenheimer.2023.1080p.BluRay"), "Oppenheimer 2023 1080p BluRay");
    }

    #[test]
    fn strips_known_site_suffix() {
        assert_eq!(normalize("Show.S01E01.720p-X - [EZTV]"), "Show S01E01 720p-X");
    }

    #[test]
    fn strips_video_extension() {
        assert_eq!(normalize("Movie.2020.1080p.mkv"), "Movie 2020 1080p");
    }
}
