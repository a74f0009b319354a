use once_cell::sync::Lazy;
use orchestrator_core::model::ExternalIds;
use regex::Regex;

static TMDB_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)tmdbid?[-_=](\d+)").unwrap());
static TVDB_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)tvdbid?[-_=](\d+)").unwrap());
static IMDB_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:imdbid?[-_=])?\b(tt\d{7,})\b").unwrap());

/// Pure: extracts whatever ids are present in a path/title; never fails,
/// simply returns an empty set when nothing matches.
pub fn extract_external_ids(text: &str) -> ExternalIds {
    ExternalIds {
        imdb_id: IMDB_REGEX.captures(text).map(|c| c[1].to_string()),
        tmdb_id: TMDB_REGEX.captures(text).and_then(|c| c[1].parse().ok()),
        tvdb_id: TVDB_REGEX.captures(text).and_then(|c| c[1].parse().ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_imdb_from_bracketed_path() {
        let ids = extract_external_ids(
            "/media/movies/The Godfather (1972) [imdbid-tt0068646]/movie.mkv",
        );
        assert_eq!(ids.imdb_id, Some("tt0068646".to_string()));
    }

    #[test]
    fn rejects_short_numeric_sequences() {
        let ids = extract_external_ids("Movie tt123456");
        assert_eq!(ids.imdb_id, None);
    }

    #[test]
    fn extracts_tmdb_and_tvdb() {
        let ids = extract_external_ids("Show {tvdb-12345} {tmdb=999}");
        assert_eq!(ids.tvdb_id, Some(12345));
        assert_eq!(ids.tmdb_id, Some(999));
    }
}
