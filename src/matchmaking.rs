//! The Matchmaking Service: the orchestrator binding the Candidate Filter,
//! Action Ledger, Mutual Match Registry, and the external Profile/Preference
//! readers into the five operations exposed over HTTP.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::core::matcher::CandidateFilter;
use crate::core::state_machine::{normalize_pagination, record_action_outcome, update_action_outcome};
use crate::errors::MatchmakingError;
use crate::models::domain::ActionStatus;
use crate::services::action_ledger::ActionLedger;
use crate::services::cache::{CacheKey, CacheManager};
use crate::services::mutual_match::MutualMatchRegistry;
use crate::services::profile_client::{PreferenceReader, ProfileReader};

/// Default/maximum page sizes. `GetMatchHistory` uses a larger default per
/// the operation's own contract; everything else shares the smaller one.
pub struct PaginationLimits {
    pub default_limit: i64,
    pub max_limit: i64,
    pub history_default_limit: i64,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 50,
            history_default_limit: 20,
        }
    }
}

pub struct MatchmakingService {
    profiles: Arc<dyn ProfileReader>,
    preferences: Arc<dyn PreferenceReader>,
    action_ledger: Arc<ActionLedger>,
    mutual_matches: Arc<MutualMatchRegistry>,
    candidate_filter: CandidateFilter,
    cache: Option<Arc<CacheManager>>,
    limits: PaginationLimits,
}

impl MatchmakingService {
    pub fn new(
        profiles: Arc<dyn ProfileReader>,
        preferences: Arc<dyn PreferenceReader>,
        action_ledger: Arc<ActionLedger>,
        mutual_matches: Arc<MutualMatchRegistry>,
        candidate_filter: CandidateFilter,
        cache: Option<Arc<CacheManager>>,
        limits: PaginationLimits,
    ) -> Self {
        Self {
            profiles,
            preferences,
            action_ledger,
            mutual_matches,
            candidate_filter,
            cache,
            limits,
        }
    }

    pub async fn get_recommendations(
        &self,
        seeker_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<crate::models::responses::GetRecommendationsResponse, MatchmakingError> {
        let (limit, offset) = normalize_pagination(limit, offset, self.limits.default_limit, self.limits.max_limit);

        let cache_key = CacheKey::recommendations(seeker_id, limit, offset);
        if let Some(cache) = &self.cache {
            if let Ok(cached) = cache.get(&cache_key).await {
                return Ok(cached);
            }
        }

        let seeker = self
            .profiles
            .get_by_user_id(seeker_id)
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?
            .ok_or_else(|| MatchmakingError::NotFound(format!("profile for {seeker_id} not found")))?;

        let excluded = self.action_ledger.exclude_targets(seeker_id).await?;

        let preference = self
            .preferences
            .get(seeker.id)
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;

        let fetch_limit = ((limit + offset) as usize).saturating_mul(3).max(100);
        let batch = self
            .profiles
            .query_candidates(&seeker, preference.as_ref(), &excluded, fetch_limit)
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;

        let today = Utc::now().date_naive();
        let result = self
            .candidate_filter
            .select(&seeker, preference.as_ref(), &excluded, batch, today, limit, offset);

        let profiles = result
            .candidates
            .into_iter()
            .map(|ranked| crate::models::responses::RecommendedProfile {
                profile: ranked.profile,
                reasons: ranked.reasons,
            })
            .collect();

        let response = crate::models::responses::GetRecommendationsResponse {
            profiles,
            pagination: crate::models::responses::Pagination::new(result.total, limit, offset),
        };

        if let Some(cache) = &self.cache {
            let _ = cache.set(&cache_key, &response).await;
        }

        Ok(response)
    }

    pub async fn record_action(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        action: ActionStatus,
    ) -> Result<bool, MatchmakingError> {
        self.validate_actors(actor_id, target_id)?;
        self.require_live_target(target_id).await?;

        let mut tx = self
            .action_ledger
            .pool()
            .begin()
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;

        MutualMatchRegistry::lock_pair_tx(&mut tx, actor_id, target_id)
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;

        ActionLedger::record_or_update_tx(&mut tx, actor_id, target_id, action)
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;

        let inverse_status = ActionLedger::get_status_tx(&mut tx, target_id, actor_id)
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;

        let is_mutual_match = record_action_outcome(action, inverse_status);
        if is_mutual_match {
            MutualMatchRegistry::create_tx(&mut tx, actor_id, target_id)
                .await
                .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;
        }

        tx.commit().await.map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;

        self.invalidate_recommendations(actor_id).await;

        Ok(is_mutual_match)
    }

    pub async fn update_action(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        new_action: ActionStatus,
    ) -> Result<(bool, bool), MatchmakingError> {
        self.validate_actors(actor_id, target_id)?;
        self.require_live_target(target_id).await?;

        let mut tx = self
            .action_ledger
            .pool()
            .begin()
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;

        MutualMatchRegistry::lock_pair_tx(&mut tx, actor_id, target_id)
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;

        let prior = ActionLedger::record_or_update_tx(&mut tx, actor_id, target_id, new_action)
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?
            .ok_or_else(|| MatchmakingError::NotFound("no prior action to update".to_string()))?;

        let inverse_status = ActionLedger::get_status_tx(&mut tx, target_id, actor_id)
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;

        let outcome = update_action_outcome(prior.status, new_action, inverse_status);

        if outcome.was_mutual_match_broken {
            MutualMatchRegistry::deactivate_tx(&mut tx, actor_id, target_id)
                .await
                .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;
        }
        if outcome.is_mutual_match {
            MutualMatchRegistry::create_tx(&mut tx, actor_id, target_id)
                .await
                .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;
        }

        tx.commit().await.map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;

        self.invalidate_recommendations(actor_id).await;

        Ok((outcome.is_mutual_match, outcome.was_mutual_match_broken))
    }

    pub async fn get_match_history(
        &self,
        actor_id: Uuid,
        status_filter: Option<ActionStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<crate::models::responses::GetMatchHistoryResponse, MatchmakingError> {
        let (limit, offset) =
            normalize_pagination(limit, offset, self.limits.history_default_limit, self.limits.max_limit);

        let (actions, total) = self.action_ledger.list_history(actor_id, status_filter, limit, offset).await?;

        let mut items = Vec::with_capacity(actions.len());
        for action in actions {
            if let Some(profile) = self.resolve_profile(action.target_id).await? {
                items.push(crate::models::responses::MatchHistoryItem {
                    profile,
                    status: action.status,
                    acted_at: action.created_at,
                });
            }
        }

        Ok(crate::models::responses::GetMatchHistoryResponse {
            items,
            pagination: crate::models::responses::Pagination::new(total, limit, offset),
        })
    }

    pub async fn get_mutual_matches(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<crate::models::responses::GetMutualMatchesResponse, MatchmakingError> {
        let (limit, offset) = normalize_pagination(limit, offset, self.limits.default_limit, self.limits.max_limit);

        let (matches, total) = self.mutual_matches.list(user_id, limit, offset).await?;

        let mut items = Vec::with_capacity(matches.len());
        for m in matches {
            let peer = m.peer_of(user_id);
            if let Some(profile) = self.resolve_profile(peer).await? {
                items.push(crate::models::responses::MutualMatchItem {
                    profile,
                    matched_at: m.matched_at,
                });
            }
        }

        Ok(crate::models::responses::GetMutualMatchesResponse {
            matches: items,
            pagination: crate::models::responses::Pagination::new(total, limit, offset),
        })
    }

    /// Resolve a public `target_profile_id` (as supplied by request bodies)
    /// to the internal `user_id` the Action Ledger and Mutual Match Registry
    /// key on.
    pub async fn resolve_target_user_id(&self, target_profile_id: i64) -> Result<Option<Uuid>, MatchmakingError> {
        self.profiles
            .resolve_internal_id(target_profile_id)
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))
    }

    fn validate_actors(&self, actor_id: Uuid, target_id: Uuid) -> Result<(), MatchmakingError> {
        if actor_id == target_id {
            return Err(MatchmakingError::InvalidArgument(
                "an actor cannot record an action against themselves".to_string(),
            ));
        }
        Ok(())
    }

    async fn require_live_target(&self, target_id: Uuid) -> Result<(), MatchmakingError> {
        let target = self
            .profiles
            .get_by_user_id(target_id)
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))?;

        match target {
            Some(profile) if !profile.is_deleted => Ok(()),
            _ => Err(MatchmakingError::NotFound(format!("target profile {target_id} not found"))),
        }
    }

    async fn resolve_profile(&self, user_id: Uuid) -> Result<Option<crate::models::domain::Profile>, MatchmakingError> {
        self.profiles
            .get_by_user_id(user_id)
            .await
            .map_err(|e| MatchmakingError::Unavailable(e.to_string()))
    }

    async fn invalidate_recommendations(&self, actor_id: Uuid) {
        if let Some(cache) = &self.cache {
            let _ = cache.invalidate_pattern(&CacheKey::recommendations_pattern(actor_id)).await;
        }
    }
}

