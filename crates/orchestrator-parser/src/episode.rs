//! Episode-info extraction. Matchers run in order of specificity; the
//! first one that matches wins.

use once_cell::sync::Lazy;
use orchestrator_core::model::EpisodeInfo;
use regex::Regex;

static MULTI_EP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)S(\d{1,2})E(\d{1,3})(?:E(\d{1,3}))*").unwrap());
static EP_RANGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)S(\d{1,2})E(\d{1,3})-E?(\d{1,3})").unwrap());
static SEASON_PACK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bS(\d{1,2})\b").unwrap());
static SEASON_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bSeason\s?(\d{1,2})\b").unwrap());
static MULTI_SEASON_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)S(\d{1,2})-S(\d{1,2})\b").unwrap());
static SEASONS_WORD_RANGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bSeasons?\s?(\d{1,2})-(\d{1,2})\b").unwrap());
static COMPLETE_SERIES_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(complete\s?series|all\s?seasons)\b").unwrap());
static NXMM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,2})x(\d{1,3})\b").unwrap());
static DAILY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})[.\-](\d{2})[.\-](\d{2})\b").unwrap());
static ANIME_ABSOLUTE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"-\s*(\d{2,3})\s*-").unwrap());

pub fn extract_episode(title: &str) -> Option<EpisodeInfo> {
    if COMPLETE_SERIES_REGEX.is_match(title) {
        return Some(EpisodeInfo {
            season: Some(1),
            episodes: vec![],
            seasons: vec![1],
            absolute_episode: None,
            air_date: None,
            is_season_pack: true,
            is_complete_series: true,
            is_daily: false,
        });
    }

    if let Some(caps) = EP_RANGE_REGEX.captures(title) {
        let season: u32 = caps[1].parse().unwrap_or(0);
        let start: u32 = caps[2].parse().unwrap_or(0);
        let end: u32 = caps[3].parse().unwrap_or(start);
        let episodes: Vec<u32> = (start..=end).collect();
        return Some(EpisodeInfo {
            season: Some(season),
            episodes,
            seasons: vec![],
            absolute_episode: None,
            air_date: None,
            is_season_pack: false,
            is_complete_series: false,
            is_daily: false,
        });
    }

    if MULTI_EP_REGEX.is_match(title) {
        let season_cap = Regex::new(r"(?i)S(\d{1,2})").unwrap();
        let season: u32 = season_cap
            .captures(title)
            .and_then(|c| c[1].parse().ok())
            .unwrap_or(0);
        let ep_regex = Regex::new(r"(?i)E(\d{1,3})").unwrap();
        let episodes: Vec<u32> = ep_regex
            .captures_iter(title)
            .filter_map(|c| c[1].parse().ok())
            .collect();
        if !episodes.is_empty() {
            return Some(EpisodeInfo {
                season: Some(season),
                episodes,
                seasons: vec![],
                absolute_episode: None,
                air_date: None,
                is_season_pack: false,
                is_complete_series: false,
                is_daily: false,
            });
        }
    }

    if let Some(caps) = MULTI_SEASON_REGEX
        .captures(title)
        .or_else(|| SEASONS_WORD_RANGE_REGEX.captures(title))
    {
        let start: u32 = caps[1].parse().unwrap_or(0);
        let end: u32 = caps[2].parse().unwrap_or(start);
        return Some(EpisodeInfo {
            season: Some(start),
            episodes: vec![],
            seasons: (start..=end).collect(),
            absolute_episode: None,
            air_date: None,
            is_season_pack: true,
            is_complete_series: false,
            is_daily: false,
        });
    }

    if let Some(caps) = SEASON_PACK_REGEX
        .captures(title)
        .or_else(|| SEASON_WORD_REGEX.captures(title))
    {
        let season: u32 = caps[1].parse().unwrap_or(0);
        return Some(EpisodeInfo {
            season: Some(season),
            episodes: vec![],
            seasons: vec![],
            absolute_episode: None,
            air_date: None,
            is_season_pack: true,
            is_complete_series: false,
            is_daily: false,
        });
    }

    if let Some(caps) = NXMM_REGEX.captures(title) {
        let season: u32 = caps[1].parse().unwrap_or(0);
        let episode: u32 = caps[2].parse().unwrap_or(0);
        return Some(EpisodeInfo {
            season: Some(season),
            episodes: vec![episode],
            seasons: vec![],
            absolute_episode: None,
            air_date: None,
            is_season_pack: false,
            is_complete_series: false,
            is_daily: false,
        });
    }

    if let Some(caps) = DAILY_REGEX.captures(title) {
        let air_date = format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]);
        return Some(EpisodeInfo {
            season: None,
            episodes: vec![],
            seasons: vec![],
            absolute_episode: None,
            air_date: Some(air_date),
            is_season_pack: false,
            is_complete_series: false,
            is_daily: true,
        });
    }

    if let Some(caps) = ANIME_ABSOLUTE_REGEX.captures(title) {
        let absolute: u32 = caps[1].parse().unwrap_or(0);
        return Some(EpisodeInfo {
            season: None,
            episodes: vec![],
            seasons: vec![],
            absolute_episode: Some(absolute),
            air_date: None,
            is_season_pack: false,
            is_complete_series: false,
            is_daily: false,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_single_episode() {
        let ep = extract_episode("Show S01E01 1080p BluRay x264-CTRLHD").unwrap();
        assert_eq!(ep.season, Some(1));
        assert_eq!(ep.episodes, vec![1]);
        assert!(!ep.is_season_pack);
    }

    #[test]
    fn multi_episode_range() {
        let ep = extract_episode("Show S01E01-E03 1080p").unwrap();
        assert_eq!(ep.episodes, vec![1, 2, 3]);
    }

    #[test]
    fn single_season_pack() {
        let ep = extract_episode("Show S01 1080p BluRay-GRP").unwrap();
        assert_eq!(ep.season, Some(1));
        assert!(ep.episodes.is_empty());
        assert!(ep.is_season_pack);
    }

    #[test]
    fn multi_season_pack() {
        let ep = extract_episode("Show S01-S05 1080p-GRP").unwrap();
        assert_eq!(ep.seasons, vec![1, 2, 3, 4, 5]);
        assert!(ep.is_season_pack);
    }

    #[test]
    fn complete_series() {
        let ep = extract_episode("Show Complete Series 1080p").unwrap();
        assert!(ep.is_complete_series);
    }

    #[test]
    fn no_episode_markers() {
        assert!(extract_episode("Oppenheimer 2023 1080p BluRay x264").is_none());
    }
}
