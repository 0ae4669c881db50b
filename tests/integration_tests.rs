// Integration tests exercising the Candidate Filter pipeline end to end
// (hard filters -> ranking -> pagination -> reason derivation) the way
// `MatchmakingService::get_recommendations` composes them, without a live
// Postgres instance.

use kallyanam_matchmaking::core::filters::FilterConfig;
use kallyanam_matchmaking::core::matcher::CandidateFilter;
use kallyanam_matchmaking::core::vocabulary::{Community, EducationLevel, HomeDistrict, MaritalStatus, Profession, ProfessionType};
use kallyanam_matchmaking::{MatchReason, Preference, Profile};
use chrono::{Duration, NaiveDate, Utc};
use std::collections::HashSet;
use uuid::Uuid;

fn candidate(id: i64, is_bride: bool, birth_year: i32, height_cm: i16, minutes_since_login: i64) -> Profile {
    Profile {
        id,
        user_id: Uuid::new_v4(),
        is_bride,
        date_of_birth: NaiveDate::from_ymd_opt(birth_year, 3, 1),
        height_cm: Some(height_cm),
        community: Community::Nair,
        marital_status: MaritalStatus::NeverMarried,
        profession: Profession::SoftwareProfessional,
        profession_type: ProfessionType::Private,
        education_level: EducationLevel::Bachelors,
        home_district: HomeDistrict::Ernakulam,
        physically_challenged: false,
        last_login: Utc::now() - Duration::minutes(minutes_since_login),
        is_deleted: false,
    }
}

fn seeker() -> Profile {
    candidate(1, true, 1996, 165, 0)
}

fn preference_with_age_and_height() -> Preference {
    Preference {
        profile_id: 1,
        min_age: Some(25),
        max_age: Some(35),
        min_height_cm: Some(160),
        max_height_cm: Some(185),
        ..Preference::default()
    }
}

#[test]
fn recommendations_pipeline_returns_only_opposite_gender_within_preferences() {
    let candidates = vec![
        candidate(2, false, 1994, 172, 5),  // eligible
        candidate(3, true, 1994, 172, 5),   // same gender role, excluded
        candidate(4, false, 1960, 172, 10), // too old, excluded
        candidate(5, false, 1994, 140, 15), // too short, excluded
    ];

    let filter = CandidateFilter::new(FilterConfig::default());
    let today = NaiveDate::from_ymd_opt(2026, 7, 26).unwrap();
    let preference = preference_with_age_and_height();

    let result = filter.select(&seeker(), Some(&preference), &HashSet::new(), candidates, today, 10, 0);

    assert_eq!(result.total, 1);
    assert_eq!(result.candidates.len(), 1);
    let surfaced = &result.candidates[0];
    assert_ne!(surfaced.profile.is_bride, seeker().is_bride);
    assert!(surfaced.reasons.contains(&MatchReason::AgeInRange));
    assert!(surfaced.reasons.contains(&MatchReason::HeightInRange));
}

#[test]
fn excluded_targets_never_resurface_regardless_of_ranking() {
    let acted_upon = candidate(2, false, 1994, 172, 0);
    let fresh = candidate(3, false, 1994, 172, 100);

    let mut excluded = HashSet::new();
    excluded.insert(acted_upon.user_id);

    let filter = CandidateFilter::default();
    let today = Utc::now().date_naive();
    let result = filter.select(
        &seeker(),
        None,
        &excluded,
        vec![acted_upon, fresh.clone()],
        today,
        10,
        0,
    );

    assert_eq!(result.candidates.len(), 1);
    assert_eq!(result.candidates[0].profile.user_id, fresh.user_id);
}

#[test]
fn pagination_across_pages_covers_the_full_eligible_set_without_duplicates() {
    let candidates: Vec<Profile> = (2..22).map(|i| candidate(i, false, 1994, 172, i)).collect();
    let filter = CandidateFilter::default();
    let today = Utc::now().date_naive();

    let page_one = filter.select(&seeker(), None, &HashSet::new(), candidates.clone(), today, 10, 0);
    let page_two = filter.select(&seeker(), None, &HashSet::new(), candidates, today, 10, 10);

    assert_eq!(page_one.total, 20);
    assert_eq!(page_two.total, 20);

    let mut seen: HashSet<i64> = page_one.candidates.iter().map(|c| c.profile.id).collect();
    for c in &page_two.candidates {
        assert!(seen.insert(c.profile.id), "duplicate id {} across pages", c.profile.id);
    }
    assert_eq!(seen.len(), 20);
}

#[test]
fn disabling_a_hard_filter_surfaces_candidates_it_would_otherwise_exclude() {
    let out_of_range = candidate(2, false, 1960, 172, 0);

    let mut config = FilterConfig::default();
    config.apply_age_filter = false;

    let filter = CandidateFilter::new(config);
    let today = NaiveDate::from_ymd_opt(2026, 7, 26).unwrap();
    let preference = preference_with_age_and_height();

    let result = filter.select(
        &seeker(),
        Some(&preference),
        &HashSet::new(),
        vec![out_of_range],
        today,
        10,
        0,
    );

    assert_eq!(result.total, 1);
}
