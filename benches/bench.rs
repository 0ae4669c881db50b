// Criterion benchmarks for the Candidate Filter pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kallyanam_matchmaking::core::filters::FilterConfig;
use kallyanam_matchmaking::core::matcher::CandidateFilter;
use kallyanam_matchmaking::core::state_machine::{canonicalize_pair, normalize_pagination};
use kallyanam_matchmaking::core::vocabulary::{Community, EducationLevel, HomeDistrict, MaritalStatus, Profession, ProfessionType};
use kallyanam_matchmaking::{Preference, Profile};
use chrono::{Duration, Utc};
use std::collections::HashSet;
use uuid::Uuid;

fn create_candidate(id: i64) -> Profile {
    Profile {
        id,
        user_id: Uuid::new_v4(),
        is_bride: id % 2 == 0,
        date_of_birth: chrono::NaiveDate::from_ymd_opt(1990 + (id % 15) as i32, 1, 1),
        height_cm: Some(150 + (id % 40) as i16),
        community: Community::Nair,
        marital_status: MaritalStatus::NeverMarried,
        profession: Profession::SoftwareProfessional,
        profession_type: ProfessionType::Private,
        education_level: EducationLevel::Bachelors,
        home_district: HomeDistrict::Ernakulam,
        physically_challenged: false,
        last_login: Utc::now() - Duration::minutes(id),
        is_deleted: false,
    }
}

fn create_seeker() -> Profile {
    let mut p = create_candidate(0);
    p.is_bride = true;
    p
}

fn create_preference() -> Preference {
    Preference {
        profile_id: 1,
        min_age: Some(21),
        max_age: Some(40),
        min_height_cm: Some(150),
        max_height_cm: Some(190),
        ..Preference::default()
    }
}

fn bench_normalize_pagination(c: &mut Criterion) {
    c.bench_function("normalize_pagination", |b| {
        b.iter(|| normalize_pagination(black_box(0), black_box(-5), black_box(10), black_box(50)));
    });
}

fn bench_canonicalize_pair(c: &mut Criterion) {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    c.bench_function("canonicalize_pair", |bch| {
        bch.iter(|| canonicalize_pair(black_box(a), black_box(b)));
    });
}

fn bench_candidate_filter_select(c: &mut Criterion) {
    let seeker = create_seeker();
    let preference = create_preference();
    let filter = CandidateFilter::new(FilterConfig::default());
    let today = Utc::now().date_naive();

    let mut group = c.benchmark_group("candidate_filter_select");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Profile> = (1..=*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("select", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    filter.select(
                        black_box(&seeker),
                        black_box(Some(&preference)),
                        black_box(&HashSet::new()),
                        black_box(candidates.clone()),
                        black_box(today),
                        black_box(20),
                        black_box(0),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize_pagination,
    bench_canonicalize_pair,
    bench_candidate_filter_select
);

criterion_main!(benches);
