//! Derivation of advisory match reasons.
//!
//! Reasons are an unordered tag set naming which preference dimensions a
//! candidate satisfies. They are advisory only — never gating, never
//! persisted — and are recomputed on every read from the same predicates
//! the filter evaluates.

use chrono::NaiveDate;

use crate::models::domain::{MatchReason, Preference, Profile};

pub fn derive_match_reasons(profile: &Profile, preference: Option<&Preference>, today: NaiveDate) -> Vec<MatchReason> {
    let Some(preference) = preference else {
        return Vec::new();
    };

    let mut reasons = Vec::new();

    if age_in_range(profile, preference, today) {
        reasons.push(MatchReason::AgeInRange);
    }
    if height_in_range(profile, preference) {
        reasons.push(MatchReason::HeightInRange);
    }
    if preference.preferred_communities.contains(&profile.community) {
        reasons.push(MatchReason::CommunityMatched);
    }
    if preference.preferred_marital_statuses.contains(&profile.marital_status) {
        reasons.push(MatchReason::MaritalStatusMatched);
    }
    if preference.preferred_professions.contains(&profile.profession) {
        reasons.push(MatchReason::ProfessionMatched);
    }
    if preference.preferred_profession_types.contains(&profile.profession_type) {
        reasons.push(MatchReason::ProfessionTypeMatched);
    }
    if preference.preferred_education_levels.contains(&profile.education_level) {
        reasons.push(MatchReason::EducationMatched);
    }
    if preference.preferred_home_districts.contains(&profile.home_district) {
        reasons.push(MatchReason::HomeDistrictMatched);
    }

    reasons
}

fn age_in_range(profile: &Profile, preference: &Preference, today: NaiveDate) -> bool {
    let Some(age) = profile.age_on(today) else {
        return false;
    };
    let min_ok = preference.min_age.map_or(true, |min| age >= u32::from(min));
    let max_ok = preference.max_age.map_or(true, |max| age <= u32::from(max));
    (preference.min_age.is_some() || preference.max_age.is_some()) && min_ok && max_ok
}

fn height_in_range(profile: &Profile, preference: &Preference) -> bool {
    let Some(height) = profile.height_cm else {
        return false;
    };
    let min_ok = preference.min_height_cm.map_or(true, |min| height >= min);
    let max_ok = preference.max_height_cm.map_or(true, |max| height <= max);
    (preference.min_height_cm.is_some() || preference.max_height_cm.is_some()) && min_ok && max_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vocabulary::{Community, EducationLevel, HomeDistrict, MaritalStatus, Profession, ProfessionType};
    use chrono::Utc;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn base_profile() -> Profile {
        Profile {
            id: 1,
            user_id: Uuid::new_v4(),
            is_bride: true,
            date_of_birth: NaiveDate::from_ymd_opt(1995, 6, 1),
            height_cm: Some(165),
            community: Community::Nair,
            marital_status: MaritalStatus::NeverMarried,
            profession: Profession::Doctor,
            profession_type: ProfessionType::Private,
            education_level: EducationLevel::Masters,
            home_district: HomeDistrict::Ernakulam,
            physically_challenged: false,
            last_login: Utc::now(),
            is_deleted: false,
        }
    }

    fn base_preference() -> Preference {
        Preference {
            profile_id: 1,
            min_age: Some(25),
            max_age: Some(35),
            min_height_cm: Some(155),
            max_height_cm: Some(175),
            accept_physically_challenged: true,
            preferred_communities: HashSet::from([Community::Nair]),
            preferred_marital_statuses: HashSet::from([MaritalStatus::NeverMarried]),
            preferred_professions: HashSet::new(),
            preferred_profession_types: HashSet::new(),
            preferred_education_levels: HashSet::new(),
            preferred_home_districts: HashSet::new(),
        }
    }

    #[test]
    fn reasons_are_empty_without_a_preference() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(derive_match_reasons(&base_profile(), None, today).is_empty());
    }

    #[test]
    fn reasons_include_every_satisfied_dimension() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let reasons = derive_match_reasons(&base_profile(), Some(&base_preference()), today);
        assert!(reasons.contains(&MatchReason::AgeInRange));
        assert!(reasons.contains(&MatchReason::HeightInRange));
        assert!(reasons.contains(&MatchReason::CommunityMatched));
        assert!(reasons.contains(&MatchReason::MaritalStatusMatched));
        assert!(!reasons.contains(&MatchReason::ProfessionMatched));
    }

    #[test]
    fn reasons_are_advisory_not_gating_for_unmentioned_attributes() {
        let mut profile = base_profile();
        profile.height_cm = None;
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let reasons = derive_match_reasons(&profile, Some(&base_preference()), today);
        assert!(!reasons.contains(&MatchReason::HeightInRange));
        // absence of the reason does not imply exclusion; filtering is a separate concern
    }
}
