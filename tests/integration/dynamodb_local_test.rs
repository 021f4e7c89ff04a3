//! Integration tests against DynamoDB Local.
//!
//! Run with `DYNAMOSTORE_ENDPOINT=http://localhost:8000`; skipped otherwise.

mod helpers;

use std::time::Duration;

use chrono::Utc;

use dynamostore_core::traits::SessionStore;

#[tokio::test]
async fn test_ensure_table_twice() {
    let Some(store) = helpers::local_store().await else {
        return;
    };

    // first time: created
    store.ensure_table().await.expect("first ensure_table");
    // second time: noop
    store.ensure_table().await.expect("second ensure_table");
}

#[tokio::test]
async fn test_store_lifecycle() {
    let Some(store) = helpers::local_store().await else {
        return;
    };
    store.ensure_table().await.expect("ensure_table");

    let token = helpers::random_token();
    let data = helpers::random_token().into_bytes();
    let expiry = Utc::now() + chrono::Duration::seconds(2);

    // Deleting a session that never existed is not an error.
    store.delete(&token).await.expect("delete missing");

    // Reading it reports absence.
    assert_eq!(store.find(&token).await.expect("find missing"), None);

    // A committed session can be read back.
    store.commit(&token, &data, expiry).await.expect("commit");
    assert_eq!(store.find(&token).await.expect("find live"), Some(data));

    // Once expired it is absent even though DynamoDB hasn't swept it.
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(store.find(&token).await.expect("find expired"), None);
}

#[tokio::test]
async fn test_second_commit_replaces_first() {
    let Some(store) = helpers::local_store().await else {
        return;
    };
    store.ensure_table().await.expect("ensure_table");

    let token = helpers::random_token();
    let expiry = Utc::now() + chrono::Duration::seconds(60);

    store.commit(&token, b"first", expiry).await.expect("commit 1");
    store.commit(&token, b"second", expiry).await.expect("commit 2");

    assert_eq!(
        store.find(&token).await.expect("find"),
        Some(b"second".to_vec())
    );

    store.delete(&token).await.expect("delete");
    assert_eq!(store.find(&token).await.expect("find deleted"), None);
}
