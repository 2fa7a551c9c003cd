mod common;

use futures::future::join_all;
use offer_intake::IntakeError;
use offer_intake::db::{IntakeStats, MetricName};

#[tokio::test]
async fn fresh_application_is_created() {
    let (_dir, storage) = common::temp_storage().await;

    let outcome = storage
        .create_or_get_application(10, "user@example.com", "https://example.com/cv.pdf")
        .await
        .expect("create failed");
    assert!(outcome.created);

    let app = storage
        .find_application_by_id(outcome.id)
        .await
        .expect("lookup failed")
        .expect("application should exist");
    assert_eq!(app.offer_id, 10);
    assert_eq!(app.email, "user@example.com");
    assert_eq!(app.cv_url, "https://example.com/cv.pdf");
}

#[tokio::test]
async fn second_submission_returns_existing_id_and_keeps_first_cv() {
    let (_dir, storage) = common::temp_storage().await;

    let first = storage
        .create_or_get_application(10, "user@example.com", "https://example.com/first.pdf")
        .await
        .expect("first create failed");
    let second = storage
        .create_or_get_application(10, "user@example.com", "https://example.com/second.pdf")
        .await
        .expect("second create failed");

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.id, second.id);

    let app = storage
        .find_application_by_id(first.id)
        .await
        .expect("lookup failed")
        .expect("application should exist");
    assert_eq!(app.cv_url, "https://example.com/first.pdf");

    // Same email on another offer is a separate application.
    let other = storage
        .create_or_get_application(11, "user@example.com", "https://example.com/first.pdf")
        .await
        .expect("create on other offer failed");
    assert!(other.created);
    assert_ne!(other.id, first.id);
}

#[tokio::test]
async fn concurrent_submissions_create_exactly_one_row() {
    let (_dir, storage) = common::temp_storage().await;
    const N: usize = 16;

    let results = join_all((0..N).map(|i| {
        let storage = storage.clone();
        async move {
            storage
                .create_or_get_application(7, "race@example.com", &format!("https://cv.example/{i}"))
                .await
        }
    }))
    .await;

    let outcomes: Vec<_> = results
        .into_iter()
        .map(|r| r.expect("concurrent create failed"))
        .collect();
    assert_eq!(outcomes.iter().filter(|o| o.created).count(), 1);
    assert!(outcomes.iter().all(|o| o.id == outcomes[0].id));

    let rows: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM applications WHERE offer_id = 7 AND email = ?")
            .bind("race@example.com")
            .fetch_one(storage.pool())
            .await
            .expect("count failed");
    assert_eq!(rows.0, 1);
}

#[tokio::test]
async fn unique_violation_without_matching_key_is_a_persistence_error() {
    let (_dir, storage) = common::temp_storage().await;
    // A second uniqueness rule the natural-key lookup knows nothing about.
    sqlx::query("CREATE UNIQUE INDEX ux_test_cv_url ON applications(cv_url)")
        .execute(storage.pool())
        .await
        .expect("failed to add index");

    storage
        .create_or_get_application(1, "a@example.com", "https://example.com/shared.pdf")
        .await
        .expect("first create failed");
    let err = storage
        .create_or_get_application(2, "b@example.com", "https://example.com/shared.pdf")
        .await
        .expect_err("conflict on another constraint must not be reported as existing");

    match err {
        IntakeError::DatabaseError(sqlx::Error::Database(db_err)) => {
            assert!(db_err.is_unique_violation());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let stats = storage.fetch_stats().await.expect("stats failed");
    assert_eq!(stats.applications_total, 1);
}

#[tokio::test]
async fn missing_application_reads_as_none() {
    let (_dir, storage) = common::temp_storage().await;
    let found = storage
        .find_application_by_id(404)
        .await
        .expect("lookup failed");
    assert!(found.is_none());
}

#[tokio::test]
async fn concurrent_metric_increments_from_absent_row_are_not_lost() {
    let (_dir, storage) = common::temp_storage().await;
    const N: usize = 32;

    assert_eq!(storage.metric_count(MetricName::Success).await.unwrap(), 0);

    let results = join_all((0..N).map(|_| {
        let storage = storage.clone();
        async move { storage.record_metric(MetricName::Success).await }
    }))
    .await;
    for r in results {
        r.expect("record_metric failed");
    }

    assert_eq!(
        storage.metric_count(MetricName::Success).await.unwrap(),
        N as i64
    );
    assert_eq!(storage.metric_count(MetricName::Failed).await.unwrap(), 0);
}

#[tokio::test]
async fn stats_default_missing_counters_to_zero() {
    let (_dir, storage) = common::temp_storage().await;
    assert_eq!(
        storage.fetch_stats().await.unwrap(),
        IntakeStats::default()
    );

    storage
        .create_or_get_application(3, "x@example.com", "https://example.com/x.pdf")
        .await
        .unwrap();
    storage.record_metric(MetricName::Failed).await.unwrap();
    storage.record_metric(MetricName::Failed).await.unwrap();
    storage.record_metric("unrelated").await.unwrap();

    assert_eq!(
        storage.fetch_stats().await.unwrap(),
        IntakeStats {
            applications_total: 1,
            success: 0,
            failed: 2,
        }
    );
}

#[tokio::test]
async fn applications_are_listed_newest_first() {
    let (_dir, storage) = common::temp_storage().await;

    let mut ids = Vec::new();
    for (offer_id, email) in [(1, "a@example.com"), (2, "b@example.com"), (3, "c@example.com")] {
        let outcome = storage
            .create_or_get_application(offer_id, email, "https://example.com/cv.pdf")
            .await
            .unwrap();
        ids.push(outcome.id);
    }

    let listed: Vec<i64> = storage
        .fetch_all_applications()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn schema_bootstrap_is_idempotent() {
    let (_dir, storage) = common::temp_storage().await;
    storage
        .create_or_get_application(1, "a@example.com", "https://example.com/cv.pdf")
        .await
        .unwrap();

    storage.init_schema().await.expect("second bootstrap failed");
    assert_eq!(storage.fetch_stats().await.unwrap().applications_total, 1);
}
