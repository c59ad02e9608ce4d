use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wordclass::analysis::Analyzers;
use wordclass::game::{Action, Game, GameSettings, Phase};
use wordclass::language::{
    Difficulty, Language, Origin, RemoteClient, SentenceBanks, SentenceSource,
};

/// What a round started against the mock service ended up with
#[derive(Debug)]
struct RoundStart {
    playing: bool,
    origin: Option<Origin>,
    sentence: Option<String>,
    difficulty: Option<Difficulty>,
    notice: Option<String>,
}

/// Start one round with generated sentences enabled. The blocking client
/// cannot live on the async runtime, so the whole game runs on a blocking thread.
async fn start_round(server: &MockServer, language: Language, timeout_secs: u64) -> RoundStart {
    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        let client = RemoteClient::new(&uri, None, timeout_secs, 1).unwrap();
        let source = SentenceSource::new(SentenceBanks::embedded().unwrap())
            .with_remote(client)
            .with_seed(11);
        let settings = GameSettings {
            language,
            difficulty: Difficulty::Easy,
            use_remote: true,
        };
        let mut game = Game::new(settings, source, Analyzers::embedded().unwrap());

        game.apply(Action::Start);

        RoundStart {
            playing: game.phase() == &Phase::Playing,
            origin: game.origin(),
            sentence: game.session().map(|s| s.sentence.clone()),
            difficulty: game.session().map(|s| s.difficulty),
            notice: game.notice().map(str::to_string),
        }
    })
    .await
    .unwrap()
}

async fn mock_generate(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/generate_sentence"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn assert_fell_back(round: &RoundStart, reason: &str) {
    assert!(round.playing, "round should still start: {round:?}");
    assert_eq!(round.origin, Some(Origin::Local));
    assert_eq!(round.difficulty, Some(Difficulty::Easy));
    let notice = round.notice.as_deref().unwrap_or_default();
    assert!(notice.contains(reason), "{notice:?} should mention {reason:?}");
    assert!(notice.ends_with("Using built-in sentences."), "{notice:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn generated_sentence_is_played() {
    let server = MockServer::start().await;
    mock_generate(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "sentence": "Birds sing in the morning.",
            "difficulty": "easy"
        })),
    )
    .await;

    let round = start_round(&server, Language::English, 5).await;

    assert!(round.playing);
    assert_eq!(round.origin, Some(Origin::Remote));
    assert_eq!(round.sentence.as_deref(), Some("Birds sing in the morning."));
    assert_eq!(round.notice, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn generated_thai_sentence_is_played() {
    let server = MockServer::start().await;
    mock_generate(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "sentence": "แมวนอนบนโต๊ะ",
            "difficulty": "easy"
        })),
    )
    .await;

    let round = start_round(&server, Language::Thai, 5).await;

    assert_eq!(round.origin, Some(Origin::Remote));
    assert_eq!(round.sentence.as_deref(), Some("แมวนอนบนโต๊ะ"));
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_falls_back() {
    let server = MockServer::start().await;
    mock_generate(&server, ResponseTemplate::new(500)).await;

    let round = start_round(&server, Language::English, 5).await;

    assert_fell_back(&round, "status 500");
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_generation_falls_back() {
    let server = MockServer::start().await;
    mock_generate(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "model not loaded"
        })),
    )
    .await;

    let round = start_round(&server, Language::English, 5).await;

    assert_fell_back(&round, "model not loaded");
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_falls_back() {
    let server = MockServer::start().await;
    mock_generate(&server, ResponseTemplate::new(200).set_body_string("<html>")).await;

    let round = start_round(&server, Language::English, 5).await;

    assert_fell_back(&round, "malformed");
}

#[tokio::test(flavor = "multi_thread")]
async fn latin_text_for_thai_falls_back() {
    let server = MockServer::start().await;
    mock_generate(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "sentence": "The cat sleeps."
        })),
    )
    .await;

    let round = start_round(&server, Language::Thai, 5).await;

    assert_fell_back(&round, "not Thai");
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_service_times_out_and_falls_back() {
    let server = MockServer::start().await;
    mock_generate(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({"success": true, "sentence": "Birds sing in the morning."}))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let round = start_round(&server, Language::English, 1).await;

    assert_fell_back(&round, "timed out after 1s");
}

#[tokio::test(flavor = "multi_thread")]
async fn generated_sentence_without_quiz_words_falls_back() {
    let server = MockServer::start().await;
    mock_generate(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "sentence": "The the a an."
        })),
    )
    .await;

    let round = start_round(&server, Language::English, 5).await;

    assert!(round.playing);
    assert_eq!(round.origin, Some(Origin::Local));
    assert!(round.notice.unwrap().contains("no words to classify"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_service_falls_back() {
    let round = tokio::task::spawn_blocking(|| {
        let client = RemoteClient::new("http://127.0.0.1:9", None, 2, 1).unwrap();
        let source = SentenceSource::new(SentenceBanks::embedded().unwrap()).with_remote(client);
        let settings = GameSettings {
            use_remote: true,
            ..GameSettings::default()
        };
        let mut game = Game::new(settings, source, Analyzers::embedded().unwrap());
        game.apply(Action::Start);
        (game.origin(), game.notice().map(str::to_string))
    })
    .await
    .unwrap();

    assert_eq!(round.0, Some(Origin::Local));
    assert!(round.1.unwrap().ends_with("Using built-in sentences."));
}
