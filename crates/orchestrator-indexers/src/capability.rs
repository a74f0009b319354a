//! Capability-driven eligibility checks, thin wrappers over
//! `IndexerCapabilities` that the orchestrator composes into its
//! indexer-filtering pipeline (spec step 3).

use orchestrator_core::model::{ContentType, IndexerCapabilities, IndexerInstance, SearchCriteria};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneligibilityReason {
    SearchType,
    SearchSource,
    Disabled,
    Backoff,
    IndexerFilter,
    Protocol,
}

impl IneligibilityReason {
    /// Machine-readable reason code, as recorded on `RejectedIndexer`.
    pub fn code(&self) -> &'static str {
        match self {
            IneligibilityReason::SearchType => "searchType",
            IneligibilityReason::SearchSource => "searchSource",
            IneligibilityReason::Disabled => "disabled",
            IneligibilityReason::Backoff => "backoff",
            IneligibilityReason::IndexerFilter => "indexerFilter",
            IneligibilityReason::Protocol => "protocol",
        }
    }
}

pub fn can_handle_search_type(caps: &IndexerCapabilities, criteria: &SearchCriteria) -> bool {
    match criteria {
        SearchCriteria::Movie(_) => caps.movie_search.available && caps.has_categories_for(ContentType::Movie),
        SearchCriteria::Tv(_) => caps.tv_search.available && caps.has_categories_for(ContentType::Tv),
        SearchCriteria::Basic(_) => true,
    }
}

pub fn supports_search_source(indexer: &IndexerInstance, criteria: &SearchCriteria) -> bool {
    use orchestrator_core::model::SearchSource;
    match criteria.search_source() {
        SearchSource::Interactive => indexer.interactive_enabled,
        SearchSource::Automatic => indexer.automatic_enabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestrator_core::model::{ModeCapability, MovieCriteria, CommonCriteria, SearchSource};
    use std::collections::HashSet;

    fn caps(movie_available: bool, categories: Vec<u32>) -> IndexerCapabilities {
        IndexerCapabilities {
            categories: categories.into_iter().collect(),
            movie_search: ModeCapability {
                available: movie_available,
                supported_params: HashSet::new(),
            },
            tv_search: ModeCapability::default(),
            movie_formats: vec![],
            episode_formats: vec![],
        }
    }

    #[test]
    fn movie_search_requires_movie_categories() {
        let criteria = SearchCriteria::Movie(MovieCriteria {
            common: CommonCriteria::default(),
            year: None,
            imdb_id: None,
            tmdb_id: None,
            search_source: SearchSource::Automatic,
        });
        assert!(can_handle_search_type(&caps(true, vec![2000]), &criteria));
        assert!(!can_handle_search_type(&caps(true, vec![5000]), &criteria));
        assert!(!can_handle_search_type(&caps(false, vec![2000]), &criteria));
    }
}
