use std::sync::Arc;

use sanad_core::db::DbPool;
use sanad_core::scoring::{
    NewCriteria, ScoringRepository, ScoringRepositoryTrait, ScoringService, ScoringServiceTrait,
};
use sanad_core::students::{StudentRepository, StudentRepositoryTrait};

mod common;

fn scoring_service(pool: &Arc<DbPool>) -> ScoringService<ScoringRepository> {
    ScoringService::new(Arc::new(ScoringRepository::new(pool.clone())))
}

fn criteria(key: &str, kind: &str, direction: &str, source_field: Option<&str>) -> NewCriteria {
    NewCriteria {
        id: None,
        key: key.to_string(),
        name: key.to_string(),
        kind: kind.to_string(),
        direction: direction.to_string(),
        min_value: None,
        max_value: None,
        weight: Some(1.0),
        source_field: source_field.map(|s| s.to_string()),
    }
}

#[test]
fn test_student_without_criteria_is_unassessed() {
    let (_dir, pool) = common::setup_db();
    let student = common::seed_student(&pool, "Unassessed Student");

    let service = scoring_service(&pool);
    let result = tokio_test::block_on(service.classify_student(&student.id)).unwrap();

    assert_eq!(result.total_score, 0);
    assert_eq!(result.label, "UNASSESSED");
    assert!(result.breakdown.is_empty());

    let classification = service.get_classification(&student.id).unwrap().unwrap();
    assert_eq!(classification.label, "UNASSESSED");
}

#[test]
fn test_profile_fields_feed_the_score() {
    let (_dir, pool) = common::setup_db();

    let new_student = sanad_core::students::NewStudent {
        full_name: "At-risk Student".to_string(),
        status: "ACTIVE".to_string(),
        has_disability: true,
        ..Default::default()
    };
    let at_risk = StudentRepository::new(pool.clone()).insert(new_student).unwrap();
    let stable = common::seed_student(&pool, "Stable Student");

    let service = scoring_service(&pool);
    tokio_test::block_on(service.create_criteria(criteria(
        "disability",
        "BOOLEAN",
        "HIGHER_BETTER",
        Some("has_disability"),
    )))
    .unwrap();

    let high = tokio_test::block_on(service.compute_student_score(&at_risk.id)).unwrap();
    assert_eq!(high.total_score, 100);
    assert_eq!(high.label, "CRITICAL");

    let low = tokio_test::block_on(service.compute_student_score(&stable.id)).unwrap();
    assert_eq!(low.total_score, 0);
    assert_eq!(low.label, "LOW");
}

#[test]
fn test_explicit_value_overrides_profile_derivation() {
    let (_dir, pool) = common::setup_db();
    let student = common::seed_student(&pool, "Override Student");

    let service = scoring_service(&pool);
    let created = tokio_test::block_on(service.create_criteria(criteria(
        "disability",
        "BOOLEAN",
        "HIGHER_BETTER",
        Some("has_disability"),
    )))
    .unwrap();

    // Case worker recorded a value by hand; the profile field says false.
    let repo = ScoringRepository::new(pool.clone());
    repo.upsert_student_value(&student.id, &created.id, 1.0).unwrap();

    let result = tokio_test::block_on(service.compute_student_score(&student.id)).unwrap();
    assert_eq!(result.total_score, 100);
    assert_eq!(result.breakdown[0].raw_value, 1.0);
}

#[test]
fn test_derived_values_are_cached_on_first_score() {
    let (_dir, pool) = common::setup_db();

    let new_student = sanad_core::students::NewStudent {
        full_name: "Cached Student".to_string(),
        status: "ACTIVE".to_string(),
        monthly_income: Some(250.0),
        ..Default::default()
    };
    let student_repo = StudentRepository::new(pool.clone());
    let student = student_repo.insert(new_student).unwrap();

    let service = scoring_service(&pool);
    let created = tokio_test::block_on(service.create_criteria(NewCriteria {
        min_value: Some(0.0),
        max_value: Some(1000.0),
        ..criteria("income", "NUMBER", "LOWER_BETTER", Some("monthly_income"))
    }))
    .unwrap();

    let first = tokio_test::block_on(service.compute_student_score(&student.id)).unwrap();
    assert_eq!(first.total_score, 75);
    assert_eq!(first.label, "HIGH");

    let repo = ScoringRepository::new(pool.clone());
    let cached = repo.values_for_student(&student.id).unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].criteria_id, created.id);
    assert_eq!(cached[0].value, 250.0);

    // Profile drift does not move the score until the stored value is updated.
    let mut updated = student.clone();
    updated.monthly_income = Some(1000.0);
    student_repo.update(updated).unwrap();

    let second = tokio_test::block_on(service.compute_student_score(&student.id)).unwrap();
    assert_eq!(second.total_score, 75);
}

#[test]
fn test_classification_upsert_keeps_one_row_per_student() {
    let (_dir, pool) = common::setup_db();
    let student = common::seed_student(&pool, "Reclassified Student");

    let service = scoring_service(&pool);
    let created = tokio_test::block_on(service.create_criteria(criteria(
        "attendance",
        "PERCENT",
        "HIGHER_BETTER",
        None,
    )))
    .unwrap();

    let repo = ScoringRepository::new(pool.clone());
    repo.upsert_student_value(&student.id, &created.id, 30.0).unwrap();
    let first = tokio_test::block_on(service.classify_student(&student.id)).unwrap();
    assert_eq!(first.total_score, 30);
    assert_eq!(first.label, "LOW");

    repo.upsert_student_value(&student.id, &created.id, 90.0).unwrap();
    let second = tokio_test::block_on(service.classify_student(&student.id)).unwrap();
    assert_eq!(second.total_score, 90);
    assert_eq!(second.label, "CRITICAL");

    let classification = service.get_classification(&student.id).unwrap().unwrap();
    assert_eq!(classification.total_score, 90);
    assert_eq!(classification.label, "CRITICAL");
}

#[test]
fn test_recalculate_all_scores_every_student() {
    let (_dir, pool) = common::setup_db();

    let new_student = sanad_core::students::NewStudent {
        full_name: "Student A".to_string(),
        status: "ACTIVE".to_string(),
        has_disability: true,
        ..Default::default()
    };
    let a = StudentRepository::new(pool.clone()).insert(new_student).unwrap();
    let b = common::seed_student(&pool, "Student B");

    let service = scoring_service(&pool);
    tokio_test::block_on(service.create_criteria(criteria(
        "disability",
        "BOOLEAN",
        "HIGHER_BETTER",
        Some("has_disability"),
    )))
    .unwrap();

    let summary = tokio_test::block_on(service.recalculate_all()).unwrap();
    assert_eq!(summary.total_students, 2);

    let score_of = |id: &str| {
        summary
            .updated
            .iter()
            .find(|s| s.student_id == id)
            .unwrap()
            .score
    };
    assert_eq!(score_of(&a.id), 100);
    assert_eq!(score_of(&b.id), 0);

    assert!(service.get_classification(&a.id).unwrap().is_some());
    assert!(service.get_classification(&b.id).unwrap().is_some());
}
