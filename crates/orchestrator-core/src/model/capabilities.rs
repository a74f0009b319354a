//! Indexer capability declarations, generalized from the teacher's
//! `IndexerCapabilities`/`SearchLimits` pair in `indexers/src/models.rs`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub type CategoryId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Movie,
    Tv,
    Music,
    Book,
    Other,
}

/// Leaf categories inherit their parent's content type (Newznab-style
/// thousand-ranges): 2xxx movies, 5xxx tv, 3xxx audio, 7xxx books.
pub fn category_content_type(id: CategoryId) -> ContentType {
    match id / 1000 {
        2 => ContentType::Movie,
        5 => ContentType::Tv,
        3 => ContentType::Music,
        7 => ContentType::Book,
        _ => ContentType::Other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchParam {
    Query,
    ImdbId,
    TmdbId,
    TvdbId,
    TvMazeId,
    Season,
    Episode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovieFormat {
    Standard,
    NoYear,
    YearOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeFormat {
    Standard,
    European,
    Compact,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModeCapability {
    pub available: bool,
    pub supported_params: HashSet<SearchParam>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexerCapabilities {
    pub categories: HashSet<CategoryId>,
    pub movie_search: ModeCapability,
    pub tv_search: ModeCapability,
    pub movie_formats: Vec<MovieFormat>,
    pub episode_formats: Vec<EpisodeFormat>,
}

impl IndexerCapabilities {
    pub fn supports_param(&self, is_tv: bool, param: SearchParam) -> bool {
        let mode = if is_tv { &self.tv_search } else { &self.movie_search };
        mode.supported_params.contains(&param)
    }

    pub fn has_categories_for(&self, content_type: ContentType) -> bool {
        self.categories
            .iter()
            .any(|&id| category_content_type(id) == content_type)
    }

    pub fn effective_episode_formats(&self) -> Vec<EpisodeFormat> {
        if self.episode_formats.is_empty() {
            vec![EpisodeFormat::Standard, EpisodeFormat::European, EpisodeFormat::Compact]
        } else {
            self.episode_formats.clone()
        }
    }

    pub fn effective_movie_formats(&self) -> Vec<MovieFormat> {
        if self.movie_formats.is_empty() {
            vec![MovieFormat::Standard, MovieFormat::NoYear]
        } else {
            self.movie_formats.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_map_by_thousand_range() {
        assert_eq!(category_content_type(2000), ContentType::Movie);
        assert_eq!(category_content_type(2040), ContentType::Movie);
        assert_eq!(category_content_type(5030), ContentType::Tv);
        assert_eq!(category_content_type(3030), ContentType::Music);
        assert_eq!(category_content_type(7020), ContentType::Book);
        assert_eq!(category_content_type(9999), ContentType::Other);
    }

    #[test]
    fn defaults_apply_when_declared_formats_empty() {
        let caps = IndexerCapabilities {
            categories: HashSet::new(),
            movie_search: ModeCapability::default(),
            tv_search: ModeCapability::default(),
            movie_formats: vec![],
            episode_formats: vec![],
        };
        assert_eq!(caps.effective_movie_formats().len(), 2);
        assert_eq!(caps.effective_episode_formats().len(), 3);
    }
}
