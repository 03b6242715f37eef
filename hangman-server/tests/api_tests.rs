
use serde_json::json;
use test_helpers::*;
use warp::http::StatusCode;

#[tokio::test]
async fn test_health() {
    let setup = TestServerSetup::new();
    let response = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&setup.routes())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body(), "OK");
}

#[tokio::test]
async fn test_create_round_and_fetch_state() {
    let setup = TestServerSetup::new();

    let (status, body) = setup.start_round("lobby", "Pik achu!").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["revealed"], "___ ____!");
    assert_eq!(body["hint"], "test hint");
    assert_eq!(body["status"], "Active");
    assert!(body["solution"].is_null());

    let (status, body) = setup.send("GET", "/rooms/lobby/hangman", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["creator"], "host");
}

#[tokio::test]
async fn test_second_round_conflicts() {
    let setup = TestServerSetup::new();
    setup.start_round("lobby", "cat").await;

    let (status, body) = setup.start_round("lobby", "dog").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already a game"));
    assert!(body["failure"]["RoundInProgress"].is_object());
}

#[tokio::test]
async fn test_invalid_phrase_is_bad_request() {
    let setup = TestServerSetup::new();
    let (status, body) = setup.start_round("lobby", "1234").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["failure"], "PhraseWithoutLetters");
}

#[tokio::test]
async fn test_guessing_to_a_win() {
    let setup = TestServerSetup::new();
    setup.start_round("lobby", "cat").await;

    let (status, body) = setup.guess("lobby", "alice", "c").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hit"], true);
    assert_eq!(body["snapshot"]["revealed"], "c__");

    let (status, body) = setup.guess("lobby", "alice", "C").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["failure"]["AlreadyGuessed"].is_object());

    let (status, body) = setup.guess("lobby", "bob", "cat").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Won");
    assert_eq!(body["snapshot"]["mistakes"], "Solved");
    assert_eq!(body["snapshot"]["solution"], "cat");

    // The room is free again
    let (status, _) = setup.send("GET", "/rooms/lobby/hangman", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_creator_cannot_guess() {
    let setup = TestServerSetup::new();
    setup.start_round("lobby", "cat").await;

    let (status, body) = setup.guess("lobby", "host", "c").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["failure"], "OwnRound");
}

#[tokio::test]
async fn test_end_round() {
    let setup = TestServerSetup::new();
    setup.start_round("lobby", "cat").await;

    let (status, body) = setup
        .send(
            "POST",
            "/rooms/lobby/hangman/end",
            Some(json!({ "actor": "mod" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Ended");

    let (status, _) = setup.guess("lobby", "alice", "c").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_disable_blocks_new_rounds() {
    let setup = TestServerSetup::new();

    let (status, body) = setup
        .send("POST", "/rooms/lobby/hangman/disable", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], false);

    let (status, _) = setup.start_round("lobby", "cat").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = setup
        .send("POST", "/rooms/lobby/hangman/disable", None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = setup
        .send("POST", "/rooms/lobby/hangman/enable", None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = setup.start_round("lobby", "cat").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_terms_and_random_round() {
    let setup = TestServerSetup::new();

    let (status, _) = setup
        .send(
            "POST",
            "/rooms/lobby/hangman/random",
            Some(json!({ "creator": "host" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = setup
        .send(
            "POST",
            "/rooms/lobby/terms",
            Some(json!({ "phrase": "Pikachu", "hints": ["yellow"] })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["created"], true);

    let (status, body) = setup.send("GET", "/rooms/lobby/terms", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["terms"]["Pikachu"], json!(["yellow"]));

    let (status, body) = setup
        .send(
            "POST",
            "/rooms/lobby/hangman/random",
            Some(json!({ "creator": "host" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["revealed"], "_______");
    assert_eq!(body["hint"], "yellow");

    let (status, body) = setup
        .send(
            "DELETE",
            "/rooms/lobby/terms",
            Some(json!({ "phrase": "pikachu" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry_deleted"], true);
    assert!(setup.store.contents()["lobby"].is_empty());
}

#[tokio::test]
async fn test_remove_unknown_term() {
    let setup = TestServerSetup::new();
    let (status, body) = setup
        .send(
            "DELETE",
            "/rooms/lobby/terms",
            Some(json!({ "phrase": "Mew", "hints": ["pink"] })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["failure"]["NoSavedPhrases"].is_object());
}

#[tokio::test]
async fn test_bank_changes_are_saved_before_reply() {
    let setup = TestServerSetup::new();

    let (status, _) = setup
        .send(
            "POST",
            "/rooms/games/hangman/random",
            Some(json!({ "creator": "host" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(setup.store.contents().contains_key("games"));

    let (status, _) = setup
        .send(
            "POST",
            "/rooms/games/terms",
            Some(json!({ "phrase": "Eevee", "hints": ["brown", "fox"] })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(setup.store.contents()["games"]["Eevee"], vec!["brown", "fox"]);

    let (status, body) = setup
        .send(
            "DELETE",
            "/rooms/games/terms",
            Some(json!({ "phrase": "EEVEE", "hints": ["Fox"] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], 1);
    assert_eq!(setup.store.contents()["games"]["Eevee"], vec!["brown"]);
    assert_eq!(setup.store.save_count(), 3);

    // The lock is released once the save finishes
    let (status, _) = setup.start_round("games", "cat").await;
    assert_eq!(status, StatusCode::CREATED);
}
