//! Scenarios against the public service
//!
//! Ignored by default because they need network access.
//! Run with: cargo test --package sitecheck-api --test live -- --ignored

use sitecheck_api::scenarios;
use sitecheck_api::{ApiConfig, ApiRunner, Outcome, UsersClient};
use sitecheck_common::{compare_person, RecordGenerator};

fn live_client() -> UsersClient {
    UsersClient::new(&ApiConfig::default()).expect("build client")
}

#[tokio::test]
#[ignore]
async fn live_list_sizes() {
    let client = live_client();
    assert_eq!(scenarios::get_all_users(&client).await.unwrap().len(), 10);
    assert_eq!(scenarios::get_user_posts(&client, 2).await.unwrap().len(), 10);
    assert_eq!(scenarios::get_user_todos(&client, 2).await.unwrap().len(), 20);
    assert_eq!(scenarios::get_user_albums(&client, 2).await.unwrap().len(), 10);
}

#[tokio::test]
#[ignore]
async fn live_create_round_trip() {
    let client = live_client();
    let submitted = RecordGenerator::from_os_rng().unwrap().person();
    let created = scenarios::post_valid_user(&client, submitted.clone()).await.unwrap();
    assert_eq!(created.id, Some(11));
    assert!(compare_person(&submitted, &created).is_ok());
}

#[tokio::test]
#[ignore]
async fn live_catalogue_matches_recorded_expectations() {
    let suite = ApiRunner::new(&ApiConfig::default()).unwrap().run_all().await.unwrap();
    let failed: Vec<_> = suite
        .results
        .iter()
        .filter(|r| r.outcome == Outcome::Failed)
        .collect();
    assert!(failed.is_empty(), "{:#?}", failed);
}
