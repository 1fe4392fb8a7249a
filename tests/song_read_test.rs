mod common;

use common::TestApp;
use reqwest::StatusCode;
use song_service::models::seed_dataset;

#[tokio::test]
async fn list_returns_all_seeded_songs() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let response = client
        .get(format!("{}/song", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let songs = body["songs"].as_array().expect("songs must be an array");
    let seed = seed_dataset().expect("seed dataset must parse");

    assert_eq!(songs.len(), seed.len());
    for song in songs {
        assert!(song["id"].is_i64() || song["id"].is_u64());
        // Documents come straight from the store, so the generated _id
        // rides along in extended JSON form.
        assert!(song["_id"]["$oid"].is_string());
    }

    app.cleanup().await;
}

#[tokio::test]
async fn get_song_by_id_returns_document() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let response = client
        .get(format!("{}/song/1", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "Midnight Parallel");
    assert_eq!(body["artist"], "The Hollow Coast");

    app.cleanup().await;
}

#[tokio::test]
async fn get_unknown_id_returns_not_found() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let response = client
        .get(format!("{}/song/424242", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["message"], "song with id not found");

    app.cleanup().await;
}
