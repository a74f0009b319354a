//! `SearchCriteria` as a closed tagged variant rather than a single struct
//! with a discriminator field — the compiler enforces exhaustive handling
//! of movie/tv/basic branches everywhere the orchestrator matches on it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchSource {
    Interactive,
    Automatic,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonCriteria {
    pub query: Option<String>,
    pub search_titles: Vec<String>,
    pub indexer_ids: Option<Vec<i32>>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieCriteria {
    pub common: CommonCriteria,
    pub year: Option<i32>,
    pub imdb_id: Option<String>,
    pub tmdb_id: Option<i64>,
    pub search_source: SearchSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvCriteria {
    pub common: CommonCriteria,
    pub imdb_id: Option<String>,
    pub tmdb_id: Option<i64>,
    pub tvdb_id: Option<i64>,
    pub tvmaze_id: Option<i64>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub preferred_episode_format: Option<String>,
    pub search_source: SearchSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicCriteria {
    pub common: CommonCriteria,
    pub search_source: SearchSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SearchCriteria {
    Movie(MovieCriteria),
    Tv(TvCriteria),
    Basic(BasicCriteria),
}

impl SearchCriteria {
    pub fn common(&self) -> &CommonCriteria {
        match self {
            SearchCriteria::Movie(c) => &c.common,
            SearchCriteria::Tv(c) => &c.common,
            SearchCriteria::Basic(c) => &c.common,
        }
    }

    pub fn search_source(&self) -> SearchSource {
        match self {
            SearchCriteria::Movie(c) => c.search_source,
            SearchCriteria::Tv(c) => c.search_source,
            SearchCriteria::Basic(c) => c.search_source,
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            SearchCriteria::Tv(c) => c.episode.is_none() || c.season.is_some(),
            _ => true,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SearchCriteria::Movie(_) => "movie",
            SearchCriteria::Tv(_) => "tv",
            SearchCriteria::Basic(_) => "basic",
        }
    }

    /// Titles to try in the text-search tier: `search_titles` if present,
    /// else the plain `query`, capped at 3 per the tiered-search policy.
    pub fn titles_to_try(&self) -> Vec<String> {
        let common = self.common();
        let titles: Vec<String> = if !common.search_titles.is_empty() {
            common.search_titles.clone()
        } else {
            common.query.clone().into_iter().collect()
        };
        titles.into_iter().take(3).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_without_season_is_invalid() {
        let c = SearchCriteria::Tv(TvCriteria {
            common: CommonCriteria::default(),
            imdb_id: None,
            tmdb_id: None,
            tvdb_id: None,
            tvmaze_id: None,
            season: None,
            episode: Some(3),
            preferred_episode_format: None,
            search_source: SearchSource::Automatic,
        });
        assert!(!c.is_valid());
    }

    #[test]
    fn titles_to_try_caps_at_three() {
        let c = SearchCriteria::Basic(BasicCriteria {
            common: CommonCriteria {
                search_titles: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                ..Default::default()
            },
            search_source: SearchSource::Automatic,
        });
        assert_eq!(c.titles_to_try().len(), 3);
    }
}
