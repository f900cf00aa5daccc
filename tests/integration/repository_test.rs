//! Read-path integration tests: joined projection, filters, paging, decoding
//!
//! These need a reachable PostgreSQL instance (`TEST_DATABASE_URL`) and are
//! skipped by default; run them with `cargo test -- --ignored`.

use reportservice_common::{DecodeError, PageRequest, RepositoryError, SortKey};
use reportservice_query::Filter;
use reportservice_reports::{EntityKind, Kitchen};
use std::time::Duration;

use tokio_stream::StreamExt;

use crate::common::{id_of, TestApp};

mod common;

#[test_log::test(tokio::test)]
#[ignore = "requires PostgreSQL"]
async fn test_child_rows_embed_their_report() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let author = app.create_author("inspector").await?;
    let report = app.create_report("reportTitle1", author.id).await?;
    let report_id = id_of(report.id);
    app.create_bathroom("bathroomName1", Some(report_id)).await?;

    let bathrooms: Vec<_> = app
        .repos
        .bathrooms
        .find_all()
        .collect::<Result<_, _>>()
        .await?;

    assert_eq!(bathrooms.len(), 1);
    let bathroom = &bathrooms[0];
    assert_eq!(bathroom.bathroom_name, "bathroomName1");
    assert_eq!(bathroom.report_id, Some(report_id));

    let embedded = bathroom.report.as_ref().expect("report is embedded");
    assert_eq!(embedded.id, Some(report_id));
    assert_eq!(embedded.report_title, "reportTitle1");
    assert_eq!(embedded.created_at, report.created_at);
    // Only one level of parent is joined
    assert!(embedded.author.is_none());

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_report_rows_embed_their_author() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let author = app.create_author("inspector").await?;
    let report = app.create_report("reportTitle1", author.id).await?;

    let found = app
        .repos
        .reports
        .find_by_id(id_of(report.id))
        .await?
        .expect("report exists");
    assert_eq!(found.author_id, author.id);
    assert_eq!(found.author, Some(author));

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_null_foreign_key_yields_empty_parent() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let report = app.create_report("reportTitle1", None).await?;
    let attached = app.create_bedroom("attached", report.id).await?;
    let orphan = app.create_bedroom("orphan", None).await?;

    let found = app
        .repos
        .bedrooms
        .find_by_id(id_of(orphan.id))
        .await?
        .expect("bedroom exists");
    assert_eq!(found.report_id, None);
    assert!(found.report.is_none());

    let orphans: Vec<_> = app
        .repos
        .bedrooms
        .find_all_where_parent_is_null()
        .collect::<Result<_, _>>()
        .await?;
    let ids: Vec<_> = orphans.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![orphan.id]);
    assert!(!ids.contains(&attached.id));

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_filter_on_unreferenced_report_is_empty() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    app.create_bedroom("orphan", None).await?;

    let bedrooms: Vec<_> = app
        .repos
        .bedrooms
        .find_all_by_filter(Some(Filter::eq("report_id", 1i64)), None)
        .collect::<Result<_, _>>()
        .await?;
    assert!(bedrooms.is_empty());

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_find_by_parent_returns_only_that_reports_children() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let first = id_of(app.create_report("first", None).await?.id);
    let second = id_of(app.create_report("second", None).await?.id);
    for name in ["a", "b"] {
        app.create_bathroom(name, Some(first)).await?;
    }
    app.create_bathroom("c", Some(second)).await?;

    let children: Vec<_> = app
        .repos
        .bathrooms
        .find_by_parent(first)
        .collect::<Result<_, _>>()
        .await?;
    assert_eq!(children.len(), 2);
    for child in &children {
        assert_eq!(child.report_id, Some(first));
        assert_eq!(child.report.as_ref().and_then(|r| r.id), Some(first));
    }

    app.cleanup().await
}

#[test_log::test(tokio::test)]
#[ignore = "requires PostgreSQL"]
async fn test_page_windows_follow_sort_order() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let total = 7;
    for i in 0..total {
        app.create_author(&format!("author-{i}")).await?;
    }

    for (offset, limit) in [(0, 3), (3, 3), (6, 3), (9, 3), (2, 10)] {
        let page = PageRequest::window(offset, limit).sorted_by(SortKey::desc("name"));
        let authors: Vec<_> = app
            .repos
            .authors
            .find_all_by(&page)
            .collect::<Result<_, _>>()
            .await?;

        let expected = limit.min((total - offset).max(0)) as usize;
        assert_eq!(authors.len(), expected, "offset {offset} limit {limit}");

        let names: Vec<_> = authors.iter().map(|a| a.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(names, sorted);
        if let Some(first) = names.first() {
            assert_eq!(first, &format!("author-{}", total - 1 - offset));
        }
    }

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_unsorted_page_orders_by_identity() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    for name in ["c", "a", "b"] {
        app.create_bedroom(name, None).await?;
    }

    let page = app.repos.bedrooms.find_page(&PageRequest::of(0, 2)).await?;
    assert_eq!(page.total, 3);
    assert!(page.has_next());
    assert_eq!(page.total_pages(), 2);

    let ids: Vec<_> = page.content.iter().map(|b| id_of(b.id)).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    let names: Vec<_> = page.content.iter().map(|b| b.bedroom_name.as_str()).collect();
    assert_eq!(names, vec!["c", "a"]);

    app.cleanup().await
}

#[test_log::test(tokio::test)]
#[ignore = "requires PostgreSQL"]
async fn test_dropped_stream_releases_its_connection() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    for i in 0..50 {
        app.create_bedroom(&format!("bedroom-{i}"), None).await?;
    }

    // More partial reads than the pool has connections
    let max = app.pool.options().get_max_connections() as usize;
    for _ in 0..max * 3 {
        let mut bedrooms = app.repos.bedrooms.find_all();
        let first = tokio::time::timeout(Duration::from_secs(5), bedrooms.next())
            .await
            .expect("a connection is available");
        assert!(matches!(first, Some(Ok(_))));
        drop(bedrooms);
    }

    tokio::time::timeout(Duration::from_secs(5), async {
        while app.pool.num_idle() < app.pool.size() as usize {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("every connection returns to the pool");
    assert_eq!(app.pool.num_idle(), app.pool.size() as usize);

    assert_eq!(app.repos.bedrooms.count().await?, 50);

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_unknown_enum_value_fails_the_row() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    sqlx::query(
        "INSERT INTO kitchen (kitchen_name, condition_level, sink_condition) VALUES ($1, $2, $3)",
    )
    .bind("galley")
    .bind("EXCELLENT")
    .bind("HIGH")
    .execute(&app.pool)
    .await?;

    let rows: Vec<Result<Kitchen, RepositoryError>> =
        app.repos.kitchens.find_all().collect().await;
    assert_eq!(rows.len(), 1);
    match &rows[0] {
        Err(RepositoryError::Decode(DecodeError::UnknownEnumValue { column, value, .. })) => {
            assert_eq!(column, "e_condition_level");
            assert_eq!(value, "EXCELLENT");
        }
        other => panic!("expected UnknownEnumValue, got {other:?}"),
    }

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_unknown_enum_in_parent_fails_the_child_row() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let report_id = id_of(app.create_report("reportTitle1", None).await?.id);
    app.create_bathroom("bathroomName1", Some(report_id)).await?;
    sqlx::query("UPDATE report SET noise_state = 'DEAFENING' WHERE id = $1")
        .bind(report_id)
        .execute(&app.pool)
        .await?;

    let result = app.repos.bathrooms.find_by_parent(report_id).next().await;
    match result {
        Some(Err(RepositoryError::Decode(err))) => {
            assert_eq!(err.column(), "report_noise_state");
        }
        other => panic!("expected a decode error, got {other:?}"),
    }

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_counts_and_json_dump() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let report_id = id_of(app.create_report("reportTitle1", None).await?.id);
    app.create_bathroom("bathroomName1", Some(report_id)).await?;
    app.create_bathroom("bathroomName2", None).await?;

    let counts = app.repos.count_all().await?;
    assert_eq!(counts.len(), EntityKind::ALL.len());
    for (kind, count) in counts {
        let expected = match kind {
            EntityKind::Report => 1,
            EntityKind::Bathroom => 2,
            _ => 0,
        };
        assert_eq!(count, expected, "{kind}");
    }

    let mut out = Vec::new();
    let page = PageRequest::of(0, 10).sorted_by(SortKey::asc("bathroom_name"));
    let written =
        reportservice_app::dump_page(&app.repos, EntityKind::Bathroom, &page, &mut out).await?;
    assert_eq!(written, 2);

    let lines: Vec<serde_json::Value> = String::from_utf8(out)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(lines[0]["bathroom_name"], "bathroomName1");
    assert_eq!(lines[0]["report"]["report_title"], "reportTitle1");
    assert!(lines[1]["report"].is_null());

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_statement_rejected_by_server_is_database_error() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    sqlx::query("DROP TABLE kitchen").execute(&app.pool).await?;

    let result = app.repos.kitchens.count().await;
    assert!(matches!(
        result,
        Err(RepositoryError::Database { entity: "Kitchen", .. })
    ));

    let rows: Vec<_> = app.repos.kitchens.find_all().collect().await;
    assert!(matches!(
        rows.as_slice(),
        [Err(RepositoryError::Database { entity: "Kitchen", .. })]
    ));

    app.cleanup().await
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_invalid_sort_column_never_reaches_database() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let page = PageRequest::of(0, 5).sorted_by(SortKey::asc("name; DROP TABLE author"));
    let rows: Vec<_> = app.repos.authors.find_all_by(&page).collect().await;
    assert!(matches!(
        rows.as_slice(),
        [Err(RepositoryError::InvalidQuery(_))]
    ));
    assert_eq!(app.repos.count(EntityKind::Author).await?, 0);

    app.cleanup().await
}
