//! Release decision service (C9). Generalizes
//! `decision/src/engine.rs::DecisionEngine::evaluate_release` /
//! `select_best_release` from "pick one release from a list" into
//! "compare one candidate against the entity's existing file". The
//! branching logic lives exactly once in `evaluate`; the four entity
//! entry points (`evaluate_for_movie` etc.) are thin wrappers so library
//! persistence stays an external collaborator.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeStatus {
    New,
    Upgrade,
    Sidegrade,
    Downgrade,
    Duplicate,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub accepted: bool,
    pub is_upgrade: bool,
    pub upgrade_status: UpgradeStatus,
    pub reason: Option<String>,
    pub candidate_score: i32,
    pub existing_score: Option<i32>,
}

/// The single place upgrade/downgrade/sidegrade/duplicate arithmetic is
/// decided. `existing` is `None` when the target entity has no file yet.
pub fn evaluate(existing: Option<i32>, candidate_score: i32, force: bool) -> Decision {
    let (upgrade_status, is_upgrade) = match existing {
        None => (UpgradeStatus::New, false),
        Some(existing_score) if candidate_score > existing_score => (UpgradeStatus::Upgrade, true),
        Some(existing_score) if candidate_score == existing_score => (UpgradeStatus::Sidegrade, false),
        Some(_) => (UpgradeStatus::Downgrade, false),
    };

    let accepted = match upgrade_status {
        UpgradeStatus::New | UpgradeStatus::Upgrade => true,
        _ => force,
    };

    let reason = if force && !matches!(upgrade_status, UpgradeStatus::New | UpgradeStatus::Upgrade) {
        Some(format!("forced override of {:?}", upgrade_status))
    } else {
        None
    };

    Decision {
        accepted,
        is_upgrade,
        upgrade_status,
        reason,
        candidate_score,
        existing_score: existing,
    }
}

pub fn evaluate_for_movie(existing_score: Option<i32>, candidate_score: i32, force: bool) -> Decision {
    evaluate(existing_score, candidate_score, force)
}

pub fn evaluate_for_season(existing_score: Option<i32>, candidate_score: i32, force: bool) -> Decision {
    evaluate(existing_score, candidate_score, force)
}

pub fn evaluate_for_episode(existing_score: Option<i32>, candidate_score: i32, force: bool) -> Decision {
    evaluate(existing_score, candidate_score, force)
}

pub fn evaluate_for_series(existing_score: Option<i32>, candidate_score: i32, force: bool) -> Decision {
    evaluate(existing_score, candidate_score, force)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_existing_file_is_always_accepted_as_new() {
        let decision = evaluate(None, 50, false);
        assert!(decision.accepted);
        assert_eq!(decision.upgrade_status, UpgradeStatus::New);
    }

    #[test]
    fn higher_score_is_an_accepted_upgrade() {
        let decision = evaluate(Some(40), 50, false);
        assert!(decision.accepted);
        assert!(decision.is_upgrade);
    }

    #[test]
    fn equal_score_sidegrade_is_rejected_without_force() {
        let decision = evaluate(Some(50), 50, false);
        assert!(!decision.accepted);
        assert_eq!(decision.upgrade_status, UpgradeStatus::Sidegrade);
    }

    #[test]
    fn lower_score_downgrade_accepted_only_with_force() {
        let rejected = evaluate(Some(50), 30, false);
        assert!(!rejected.accepted);
        let forced = evaluate(Some(50), 30, true);
        assert!(forced.accepted);
        assert!(forced.reason.is_some());
    }
}
