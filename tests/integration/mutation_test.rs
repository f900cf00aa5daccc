//! Write-path integration tests: insert, update, delete and constraint mapping
//!
//! Skipped by default; run with `cargo test -- --ignored` against a
//! PostgreSQL instance reachable through `TEST_DATABASE_URL`.

use chrono::{Duration, Utc};
use reportservice_common::RepositoryError;
use reportservice_query::{Patch, Value};
use reportservice_reports::{
    Bathroom, EntityKind, InfraType, Infrastructure, LivingRoom, QualityStateType, Report,
};
use rust_decimal::Decimal;

use crate::common::{id_of, TestApp};

mod common;

#[test_log::test(tokio::test)]
#[ignore = "requires PostgreSQL"]
async fn test_saved_bathroom_reads_back_equal() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let report_id = id_of(app.create_report("reportTitle1", None).await?.id);

    let mut bathroom = Bathroom::new(
        "bathroomName1",
        QualityStateType::High,
        QualityStateType::Low,
        QualityStateType::Middle,
    )?;
    bathroom.bathroom_size = Some(Decimal::new(425, 2));
    bathroom.shower_booth_presence = Some("Y".to_string());
    bathroom.remarks = Some("grout needs work".to_string());
    bathroom.report_id = Some(report_id);

    let saved = app.repos.bathrooms.save(&bathroom).await?;
    assert!(saved.id.is_some());
    assert!(saved.report.is_none());

    let mut found = app
        .repos
        .bathrooms
        .find_by_id(id_of(saved.id))
        .await?
        .expect("bathroom exists");
    assert_eq!(found.bathroom_size, Some(Decimal::new(4250, 3)));
    assert_eq!(found.report.as_ref().map(|r| r.report_title.as_str()), Some("reportTitle1"));

    found.report = None;
    assert_eq!(found, saved);

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_saved_report_keeps_timestamps_and_flags() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let author = app.create_author("inspector").await?;
    let mut report = app.create_report("reportTitle1", author.id).await?;

    report.summary = Some("Quiet unit facing the park".to_string());
    report.report_date = Some(report.created_at - Duration::days(3));
    report.updated_at = Some(Utc::now());
    report.cctv_yn = Some("Y".to_string());
    report.maintenance_fee = Some(180_000);
    report.noise_state = QualityStateType::High;

    let updated = app.repos.reports.save(&report).await?;
    assert_eq!(updated.id, report.id);

    let mut found = app
        .repos
        .reports
        .find_by_id(id_of(report.id))
        .await?
        .expect("report exists");
    assert_eq!(found.author.as_ref().map(|a| a.name.as_str()), Some("inspector"));

    found.author = None;
    assert_eq!(found, updated);

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_new_report_reads_back_equal() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let report = Report::new(
        "reportTitle1",
        1,
        "Riverside Complex",
        101,
        "Tower A 1203",
        QualityStateType::Middle,
    )?;

    let saved = app.repos.reports.save(&report).await?;
    let found = app
        .repos
        .reports
        .find_by_id(id_of(saved.id))
        .await?
        .expect("report exists");
    assert_eq!(found.created_at, report.created_at);

    let mut expected = report.clone();
    expected.id = saved.id;
    assert_eq!(found, expected);

    app.cleanup().await
}

#[test_log::test(tokio::test)]
#[ignore = "requires PostgreSQL"]
async fn test_partial_update_keeps_unpatched_fields() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let report_id = id_of(app.create_report("reportTitle1", None).await?.id);
    let mut bedroom = app.create_bedroom("spare", Some(report_id)).await?;
    bedroom.room_size = Some(Decimal::new(1150, 2));
    bedroom.remarks = Some("north facing".to_string());
    let bedroom = app.repos.bedrooms.save(&bedroom).await?;

    let patch = Patch::new()
        .set("bedroom_name", "guest")
        .set("condition_level", "HIGH")
        .set("remarks", Value::Text(None));
    let patched = app
        .repos
        .bedrooms
        .partial_update(id_of(bedroom.id), &patch)
        .await?
        .expect("bedroom exists");
    assert_eq!(patched.bedroom_name, "guest");
    assert_eq!(patched.condition_level, QualityStateType::High);
    assert_eq!(patched.remarks.as_deref(), Some("north facing"));
    assert_eq!(patched.room_size, bedroom.room_size);
    assert_eq!(patched.report_id, Some(report_id));

    let mut found = app
        .repos
        .bedrooms
        .find_by_id(id_of(bedroom.id))
        .await?
        .expect("bedroom exists");
    assert!(found.report.is_some());
    found.report = None;
    assert_eq!(found, patched);

    let missing = app
        .repos
        .bedrooms
        .partial_update(id_of(bedroom.id) + 1000, &patch)
        .await?;
    assert!(missing.is_none());

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_partial_update_rejects_bad_patch_and_keeps_row() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let report = app.create_report("reportTitle1", None).await?;
    let id = id_of(report.id);

    let unknown_tag = Patch::new().set("noise_state", "DEAFENING");
    let result = app.repos.reports.partial_update(id, &unknown_tag).await;
    assert!(matches!(result, Err(RepositoryError::InvalidData(_))));

    let blank_title = Patch::new().set("report_title", "");
    let result = app.repos.reports.partial_update(id, &blank_title).await;
    assert!(matches!(result, Err(RepositoryError::InvalidData(_))));

    let unknown_column = Patch::new().set("bedroom_name", "guest");
    let result = app.repos.reports.partial_update(id, &unknown_column).await;
    assert!(matches!(result, Err(RepositoryError::InvalidQuery(_))));

    let found = app.repos.reports.find_by_id(id).await?.expect("report exists");
    assert_eq!(found, report);

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_update_rewrites_row_and_missing_row_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let mut living_room = LivingRoom::new(
        "front room",
        QualityStateType::Middle,
        QualityStateType::Low,
    )?;
    living_room.room_size = Some(Decimal::new(1875, 2));
    let mut saved = app.repos.living_rooms.save(&living_room).await?;

    saved.living_room_name = "lounge".to_string();
    saved.wall_state = QualityStateType::High;
    app.repos.living_rooms.save(&saved).await?;

    let found = app
        .repos
        .living_rooms
        .find_by_id(id_of(saved.id))
        .await?
        .expect("living room exists");
    assert_eq!(found.living_room_name, "lounge");
    assert_eq!(found.wall_state, QualityStateType::High);
    assert_eq!(app.repos.living_rooms.count().await?, 1);

    let mut ghost = saved.clone();
    ghost.id = Some(id_of(saved.id) + 1000);
    let result = app.repos.living_rooms.save(&ghost).await;
    assert!(matches!(
        result,
        Err(RepositoryError::NotFound { entity: "LivingRoom", .. })
    ));

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_dangling_foreign_key_is_constraint_violation() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let result = app.create_bathroom("bathroomName1", Some(424_242)).await;
    let err = result.expect_err("insert must fail");
    let repo_err = err
        .downcast_ref::<RepositoryError>()
        .expect("repository error");
    assert!(matches!(
        repo_err,
        RepositoryError::ConstraintViolation { entity: "Bathroom", .. }
    ));
    assert_eq!(app.repos.count(EntityKind::Bathroom).await?, 0);

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_invalid_entity_is_rejected_before_writing() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let mut infrastructure = Infrastructure::new(
        InfraType::School,
        "Hanbit Elementary",
        QualityStateType::High,
    )?;
    infrastructure.infra_distance = Some(-5);

    let result = app.repos.infrastructures.save(&infrastructure).await;
    assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    assert_eq!(app.repos.infrastructures.count().await?, 0);

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_by_id_reports_whether_a_row_went_away() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let bedroom = app.create_bedroom("spare", None).await?;
    let id = id_of(bedroom.id);

    assert!(app.repos.bedrooms.delete_by_id(id).await?);
    assert!(app.repos.bedrooms.find_by_id(id).await?.is_none());
    assert!(!app.repos.bedrooms.delete_by_id(id).await?);

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_report_with_children_cannot_be_deleted() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let report_id = id_of(app.create_report("reportTitle1", None).await?.id);
    app.create_bedroom("master", Some(report_id)).await?;

    let result = app.repos.reports.delete_by_id(report_id).await;
    assert!(matches!(
        result,
        Err(RepositoryError::ConstraintViolation { entity: "Report", .. })
    ));

    app.cleanup().await
}
