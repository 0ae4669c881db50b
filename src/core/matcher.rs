use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::filters::{passes_hard_filters, FilterConfig};
use crate::core::reasons::derive_match_reasons;
use crate::models::domain::{Preference, Profile, RankedCandidate};

/// Result of applying the Candidate Filter to a pre-fetched candidate batch.
#[derive(Debug)]
pub struct MatchResult {
    pub candidates: Vec<RankedCandidate>,
    /// Count of candidates that pass every guarantee, before pagination.
    pub total: i64,
}

/// The Candidate Filter: applies the seeker's invariants and hard filters to
/// a roughly pre-filtered batch fetched from the Profile store, then ranks
/// and paginates authoritatively in-process.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    config: FilterConfig,
}

impl CandidateFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Apply guarantees 1-6 and slice to `(limit, offset)`.
    ///
    /// `candidates` is assumed already scoped to the opposite gender by the
    /// caller's store query, but every invariant is re-checked here since
    /// this function is the sole source of truth for what is returned.
    pub fn select(
        &self,
        seeker: &Profile,
        preference: Option<&Preference>,
        excluded: &HashSet<Uuid>,
        candidates: Vec<Profile>,
        today: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> MatchResult {
        let mut eligible: Vec<Profile> = candidates
            .into_iter()
            .filter(|c| c.user_id != seeker.user_id)
            .filter(|c| c.is_bride != seeker.is_bride)
            .filter(|c| !excluded.contains(&c.user_id))
            .filter(|c| !c.is_deleted)
            .filter(|c| passes_hard_filters(c, preference, &self.config, today))
            .collect();

        eligible.sort_by(|a, b| b.last_login.cmp(&a.last_login).then_with(|| a.id.cmp(&b.id)));

        let total = eligible.len() as i64;

        let page: Vec<Profile> = eligible
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        let ranked = page
            .into_iter()
            .map(|profile| {
                let reasons = derive_match_reasons(&profile, preference, today);
                RankedCandidate { profile, reasons }
            })
            .collect();

        MatchResult { candidates: ranked, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vocabulary::{Community, EducationLevel, HomeDistrict, MaritalStatus, Profession, ProfessionType};
    use chrono::{Duration, Utc};

    fn profile(id: i64, is_bride: bool, minutes_ago: i64) -> Profile {
        profile_at(id, is_bride, Utc::now() - Duration::minutes(minutes_ago))
    }

    fn profile_at(id: i64, is_bride: bool, last_login: chrono::DateTime<Utc>) -> Profile {
        Profile {
            id,
            user_id: Uuid::new_v4(),
            is_bride,
            date_of_birth: None,
            height_cm: None,
            community: Community::NotMentioned,
            marital_status: MaritalStatus::NotMentioned,
            profession: Profession::NotMentioned,
            profession_type: ProfessionType::NotMentioned,
            education_level: EducationLevel::NotMentioned,
            home_district: HomeDistrict::NotMentioned,
            physically_challenged: false,
            last_login,
            is_deleted: false,
        }
    }

    #[test]
    fn never_returns_the_seeker() {
        let seeker = profile(1, false, 0);
        let filter = CandidateFilter::default();
        let result = filter.select(
            &seeker,
            None,
            &HashSet::new(),
            vec![seeker.clone()],
            Utc::now().date_naive(),
            10,
            0,
        );
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn excludes_same_gender_role() {
        let seeker = profile(1, false, 0);
        let same_role = profile(2, false, 5);
        let filter = CandidateFilter::default();
        let result = filter.select(
            &seeker,
            None,
            &HashSet::new(),
            vec![same_role],
            Utc::now().date_naive(),
            10,
            0,
        );
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn excludes_acted_upon_and_deleted() {
        let seeker = profile(1, false, 0);
        let acted_upon = profile(2, true, 5);
        let mut deleted = profile(3, true, 5);
        deleted.is_deleted = true;
        let fresh = profile(4, true, 5);

        let mut excluded = HashSet::new();
        excluded.insert(acted_upon.user_id);

        let filter = CandidateFilter::default();
        let result = filter.select(
            &seeker,
            None,
            &excluded,
            vec![acted_upon, deleted, fresh.clone()],
            Utc::now().date_naive(),
            10,
            0,
        );

        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].profile.user_id, fresh.user_id);
    }

    #[test]
    fn orders_by_last_login_desc_then_id_asc() {
        let seeker = profile(1, false, 0);
        let older = profile(2, true, 100);
        let shared_last_login = Utc::now() - Duration::minutes(1);
        let newer = profile_at(3, true, shared_last_login);
        let tie_a = profile_at(4, true, shared_last_login);

        let filter = CandidateFilter::default();
        let result = filter.select(
            &seeker,
            None,
            &HashSet::new(),
            vec![older.clone(), newer.clone(), tie_a.clone()],
            Utc::now().date_naive(),
            10,
            0,
        );

        let ids: Vec<i64> = result.candidates.iter().map(|c| c.profile.id).collect();
        assert_eq!(ids, vec![3, 4, 2]);
    }

    #[test]
    fn total_reflects_full_eligible_set_not_just_the_page() {
        let seeker = profile(1, false, 0);
        let candidates: Vec<Profile> = (2..27).map(|i| profile(i, true, i)).collect();

        let filter = CandidateFilter::default();
        let result = filter.select(
            &seeker,
            None,
            &HashSet::new(),
            candidates,
            Utc::now().date_naive(),
            10,
            0,
        );

        assert_eq!(result.total, 25);
        assert_eq!(result.candidates.len(), 10);
    }
}
