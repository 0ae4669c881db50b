//! Pure decision logic for pagination normalization, canonical pair
//! ordering, and the mutual-match state transitions. None of this touches
//! the database, which is what makes it unit-testable on its own.

use uuid::Uuid;

use crate::models::domain::ActionStatus;

/// Normalize a requested `(limit, offset)` pair per the service contract:
/// `limit <= 0` becomes `default_limit`, `limit > max_limit` is capped,
/// `offset < 0` becomes zero.
pub fn normalize_pagination(limit: i64, offset: i64, default_limit: i64, max_limit: i64) -> (i64, i64) {
    let limit = if limit <= 0 { default_limit } else { limit.min(max_limit) };
    let offset = offset.max(0);
    (limit, offset)
}

/// Canonicalize an unordered user pair as `(min, max)` so a single row
/// represents the relationship regardless of which side acted first.
pub fn canonicalize_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Outcome of `RecordAction`: whether this write completed a mutual match.
pub fn record_action_outcome(new_status: ActionStatus, inverse_status: Option<ActionStatus>) -> bool {
    new_status == ActionStatus::Liked && inverse_status == Some(ActionStatus::Liked)
}

/// Outcome of `UpdateAction`: both the resulting mutuality and whether an
/// existing mutual match was just broken by this write.
pub struct UpdateOutcome {
    pub is_mutual_match: bool,
    pub was_mutual_match_broken: bool,
}

pub fn update_action_outcome(
    prior_status: ActionStatus,
    new_status: ActionStatus,
    inverse_status: Option<ActionStatus>,
) -> UpdateOutcome {
    let was_mutual_match_broken = prior_status == ActionStatus::Liked
        && new_status == ActionStatus::Passed
        && inverse_status == Some(ActionStatus::Liked);

    let is_mutual_match = new_status == ActionStatus::Liked && inverse_status == Some(ActionStatus::Liked);

    UpdateOutcome {
        is_mutual_match,
        was_mutual_match_broken,
    }
}
