use crate::core::vocabulary::{Community, EducationLevel, HomeDistrict, MaritalStatus, Profession, ProfessionType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Profile Record: the read-only projection of a user the core matches on.
///
/// Owned by the external profile subsystem; this core only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Internal sequential id, used as the pagination tie-breaker.
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "isBride")]
    pub is_bride: bool,
    #[serde(rename = "dateOfBirth", default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(rename = "heightCm", default)]
    pub height_cm: Option<i16>,
    #[serde(default)]
    pub community: Community,
    #[serde(rename = "maritalStatus", default)]
    pub marital_status: MaritalStatus,
    #[serde(default)]
    pub profession: Profession,
    #[serde(rename = "professionType", default)]
    pub profession_type: ProfessionType,
    #[serde(rename = "educationLevel", default)]
    pub education_level: EducationLevel,
    #[serde(rename = "homeDistrict", default)]
    pub home_district: HomeDistrict,
    #[serde(rename = "physicallyChallenged", default)]
    pub physically_challenged: bool,
    #[serde(rename = "lastLogin")]
    pub last_login: DateTime<Utc>,
    #[serde(rename = "isDeleted", default)]
    pub is_deleted: bool,
}

impl Profile {
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let dob = self.date_of_birth?;
        today.years_since(dob)
    }
}

/// Preference Record: the partner-preference document attached to a profile.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Preference {
    #[serde(rename = "profileId")]
    pub profile_id: i64,
    #[serde(rename = "minAge", default)]
    pub min_age: Option<u8>,
    #[serde(rename = "maxAge", default)]
    pub max_age: Option<u8>,
    #[serde(rename = "minHeightCm", default)]
    pub min_height_cm: Option<i16>,
    #[serde(rename = "maxHeightCm", default)]
    pub max_height_cm: Option<i16>,
    #[serde(rename = "acceptPhysicallyChallenged", default = "default_true")]
    pub accept_physically_challenged: bool,
    #[serde(rename = "preferredCommunities", default)]
    pub preferred_communities: HashSet<Community>,
    #[serde(rename = "preferredMaritalStatuses", default)]
    pub preferred_marital_statuses: HashSet<MaritalStatus>,
    #[serde(rename = "preferredProfessions", default)]
    pub preferred_professions: HashSet<Profession>,
    #[serde(rename = "preferredProfessionTypes", default)]
    pub preferred_profession_types: HashSet<ProfessionType>,
    #[serde(rename = "preferredEducationLevels", default)]
    pub preferred_education_levels: HashSet<EducationLevel>,
    #[serde(rename = "preferredHomeDistricts", default)]
    pub preferred_home_districts: HashSet<HomeDistrict>,
}

fn default_true() -> bool {
    true
}

/// The directional decision one user records about another.
///
/// Stored as `TEXT` rather than a native Postgres enum type, so adding a
/// status never requires an `ALTER TYPE` migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum ActionStatus {
    Liked,
    Passed,
}

/// A row in the Action Ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub actor_id: Uuid,
    pub target_id: Uuid,
    pub status: ActionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A confirmed mutual-match row, keyed by the canonical (ordered) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutualMatch {
    pub user_id_1: Uuid,
    pub user_id_2: Uuid,
    pub matched_at: DateTime<Utc>,
    pub is_active: bool,
}

impl MutualMatch {
    /// The id of the other party, from `viewer`'s perspective.
    pub fn peer_of(&self, viewer: Uuid) -> Uuid {
        if self.user_id_1 == viewer {
            self.user_id_2
        } else {
            self.user_id_1
        }
    }
}

/// Advisory tag naming a preference dimension a candidate satisfies.
///
/// Reasons are derived on read from the same predicates the Candidate
/// Filter evaluates; they are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    AgeInRange,
    HeightInRange,
    CommunityMatched,
    MaritalStatusMatched,
    ProfessionMatched,
    ProfessionTypeMatched,
    EducationMatched,
    HomeDistrictMatched,
}

/// A candidate together with the reasons it was surfaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub profile: Profile,
    pub reasons: Vec<MatchReason>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn profile_with_dob(year: i32, month: u32, day: u32) -> Profile {
        Profile {
            id: 1,
            user_id: Uuid::new_v4(),
            is_bride: true,
            date_of_birth: NaiveDate::from_ymd_opt(year, month, day),
            height_cm: Some(165),
            community: Community::NotMentioned,
            marital_status: MaritalStatus::NeverMarried,
            profession: Profession::NotMentioned,
            profession_type: ProfessionType::NotMentioned,
            education_level: EducationLevel::NotMentioned,
            home_district: HomeDistrict::NotMentioned,
            physically_challenged: false,
            last_login: Utc::now(),
            is_deleted: false,
        }
    }

    #[test]
    fn age_on_computes_completed_years() {
        let profile = profile_with_dob(1995, 6, 15);
        let today = NaiveDate::from_ymd_opt(2026, 6, 14).unwrap();
        assert_eq!(profile.age_on(today), Some(30));
        let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        assert_eq!(profile.age_on(today), Some(31));
    }

    #[test]
    fn peer_of_returns_the_other_party() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let m = MutualMatch {
            user_id_1: a,
            user_id_2: b,
            matched_at: Utc::now(),
            is_active: true,
        };
        assert_eq!(m.peer_of(a), b);
        assert_eq!(m.peer_of(b), a);
    }
}
