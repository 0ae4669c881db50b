//! Hard filter predicates for the Candidate Filter.
//!
//! Every filter here is "permissive null": a candidate with a missing or
//! `not_mentioned` attribute passes the filter regardless of the seeker's
//! preference on that dimension. Filters only exclude when both sides have
//! stated, conflicting values.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::domain::{Preference, Profile};

/// Per-dimension on/off switches for the five hard filters. All default on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub apply_age_filter: bool,
    pub apply_height_filter: bool,
    pub apply_physically_challenged_filter: bool,
    pub apply_marital_status_filter: bool,
    pub apply_education_filter: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            apply_age_filter: true,
            apply_height_filter: true,
            apply_physically_challenged_filter: true,
            apply_marital_status_filter: true,
            apply_education_filter: true,
        }
    }
}

/// `date_of_birth <= today - min_age years`, i.e. "at least min_age years old".
fn passes_min_age(dob: NaiveDate, today: NaiveDate, min_age: u8) -> bool {
    match today.checked_sub_months(Months::new(u32::from(min_age) * 12)) {
        Some(threshold) => dob <= threshold,
        None => true,
    }
}

/// `date_of_birth > today - (max_age+1) years`, the asymmetric upper bound
/// expressing "at most max_age years old" inclusive of partial years.
fn passes_max_age(dob: NaiveDate, today: NaiveDate, max_age: u8) -> bool {
    match today.checked_sub_months(Months::new((u32::from(max_age) + 1) * 12)) {
        Some(threshold) => dob > threshold,
        None => true,
    }
}

fn passes_age_filter(profile: &Profile, preference: &Preference, today: NaiveDate) -> bool {
    let Some(dob) = profile.date_of_birth else {
        return true;
    };
    let min_ok = preference.min_age.map_or(true, |min| passes_min_age(dob, today, min));
    let max_ok = preference.max_age.map_or(true, |max| passes_max_age(dob, today, max));
    min_ok && max_ok
}

fn passes_height_filter(profile: &Profile, preference: &Preference) -> bool {
    let Some(height) = profile.height_cm else {
        return true;
    };
    let min_ok = preference.min_height_cm.map_or(true, |min| height >= min);
    let max_ok = preference.max_height_cm.map_or(true, |max| height <= max);
    min_ok && max_ok
}

fn passes_physically_challenged_filter(profile: &Profile, preference: &Preference) -> bool {
    preference.accept_physically_challenged || !profile.physically_challenged
}

fn passes_marital_status_filter(profile: &Profile, preference: &Preference) -> bool {
    preference.preferred_marital_statuses.is_empty()
        || !profile.marital_status.is_mentioned()
        || preference.preferred_marital_statuses.contains(&profile.marital_status)
}

fn passes_education_filter(profile: &Profile, preference: &Preference) -> bool {
    preference.preferred_education_levels.is_empty()
        || !profile.education_level.is_mentioned()
        || preference.preferred_education_levels.contains(&profile.education_level)
}

/// Apply every hard filter enabled in `config`. With no preference on file,
/// every candidate passes (the hard filters only bind when a preference
/// states a constraint).
pub fn passes_hard_filters(
    profile: &Profile,
    preference: Option<&Preference>,
    config: &FilterConfig,
    today: NaiveDate,
) -> bool {
    let Some(preference) = preference else {
        return true;
    };

    (!config.apply_age_filter || passes_age_filter(profile, preference, today))
        && (!config.apply_height_filter || passes_height_filter(profile, preference))
        && (!config.apply_physically_challenged_filter
            || passes_physically_challenged_filter(profile, preference))
        && (!config.apply_marital_status_filter || passes_marital_status_filter(profile, preference))
        && (!config.apply_education_filter || passes_education_filter(profile, preference))
}
