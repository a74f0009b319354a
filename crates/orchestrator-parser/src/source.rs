use once_cell::sync::Lazy;
use orchestrator_core::model::Source;
use regex::Regex;

static SOURCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(remux|bluray|bdrip|bd25|bd50|webdl|web-dl|webrip|web-rip|web|hdtv|pdtv|dvdrip|dvd|hd-dvd|cam|telesync|ts)\b").unwrap()
});

pub fn extract_source(title: &str) -> Source {
    SOURCE_REGEX
        .find(title)
        .map(|m| normalize_source(m.as_str()))
        .unwrap_or(Source::Unknown)
}

fn normalize_source(raw: &str) -> Source {
    match raw.to_lowercase().replace('-', "").as_str() {
        "remux" => Source::Remux,
        "bluray" | "bdrip" | "bd25" | "bd50" | "hddvd" => Source::BluRay,
        "webdl" | "web" => Source::WebDl,
        "webrip" => Source::WebRip,
        "hdtv" | "pdtv" => Source::Hdtv,
        "dvdrip" | "dvd" => Source::Dvd,
        "cam" => Source::Cam,
        "telesync" | "ts" => Source::Telesync,
        _ => Source::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remux_outranks_bluray_token() {
        assert_eq!(extract_source("Movie 2160p Remux BluRay"), Source::Remux);
    }

    #[test]
    fn recognizes_webdl_variants() {
        assert_eq!(extract_source("Show S01E01 WEB-DL x264"), Source::WebDl);
        assert_eq!(extract_source("Show S01E01 WEBRip x264"), Source::WebRip);
    }
}
