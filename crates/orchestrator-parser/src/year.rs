use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").unwrap());

/// First isolated 4-digit year in [1900, now+2]. Titles whose very first
/// token is itself numeric (e.g. a movie literally named `2001`) prefer a
/// later occurrence when one follows a quality marker.
pub fn extract_year(title: &str, max_year: i32) -> Option<i32> {
    let candidates: Vec<i32> = YEAR_REGEX
        .find_iter(title)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .filter(|&y| y >= 1900 && y <= max_year)
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let starts_with_year = title
        .split_whitespace()
        .next()
        .map(|tok| tok.parse::<i32>().is_ok())
        .unwrap_or(false);

    if starts_with_year && candidates.len() > 1 {
        candidates.into_iter().nth(1)
    } else {
        candidates.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_isolated_year() {
        assert_eq!(extract_year("Oppenheimer 2023 1080p BluRay", 2026), Some(2023));
    }

    #[test]
    fn prefers_later_year_when_title_is_numeric() {
        assert_eq!(extract_year("2001 A Space Odyssey 1968 1080p", 2026), Some(1968));
    }

    #[test]
    fn rejects_years_past_cap() {
        assert_eq!(extract_year("Movie 2099 1080p", 2026), None);
    }
}
