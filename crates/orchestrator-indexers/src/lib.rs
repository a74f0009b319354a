pub mod capability;
pub mod health;
pub mod memory_adapter;
pub mod orchestrator;
pub mod rate_limit;

pub use capability::{can_handle_search_type, supports_search_source, IneligibilityReason};
pub use health::HealthTracker;
pub use memory_adapter::MemoryIndexerAdapter;
pub use orchestrator::{
    EnhancedSearchResult, IndexerOutcome, RejectedIndexer, SearchOptions, SearchOrchestrator,
    SearchResult,
};
pub use rate_limit::{RateLimitDecision, RateLimitGovernor};
