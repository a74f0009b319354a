pub mod custom_formats;
pub mod decision;
pub mod dedup;
pub mod enrich;
pub mod profile;

pub use custom_formats::{CustomFormat, CustomFormatEngine, FormatRule};
pub use decision::{evaluate, evaluate_for_episode, evaluate_for_movie, evaluate_for_season, evaluate_for_series, Decision, UpgradeStatus};
pub use dedup::{deduplicate, deduplicate_enhanced};
pub use enrich::{enrich, EnrichmentOptions, EnrichmentOutcome};
pub use profile::ScoringProfile;
