use serde_json::json;
use smartswipe_core::candidate::{CandidateItem, Domain, ItemSource, SourceError};
use smartswipe_core::questionnaire::QuestionnaireAnswers;
use smartswipe_core::selection::RankedSelection;
use smartswipe_core::session::DecisionRecorder;
use smartswipe_core::synthesis::SynthesisService;
use smartswipe_core::FunnelError;
use smartswipe_interaction::{ApiClient, HttpDecisionRecorder, HttpItemSource, HttpSynthesisService};
use std::time::Duration;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), None, Duration::from_secs(5))
}

fn idea(id: &str, title: &str, domain: &str, tags: &[&str]) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "domain": domain,
        "tags": tags,
        "created_at": "2024-05-01T10:00:00Z",
    })
}

fn ranked() -> RankedSelection {
    RankedSelection::try_from(vec![
        CandidateItem::new("a", Domain::FinTech, "Smart Budget Coach", "", vec!["AI".into()]),
        CandidateItem::new("b", Domain::SaaS, "Invoice Bot", "", vec!["B2B".into()]),
        CandidateItem::new("c", Domain::EdTech, "Study Buddy", "", vec![]),
    ])
    .unwrap()
}

#[tokio::test]
async fn test_fetch_pool_parses_game_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ideas/game-session"))
        .and(query_param("limit", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ideas": [
                idea("1", "Budget Coach", "FinTech", &["AI", "Finance"]),
                idea("2", "Pet Sitter Network", "", &[]),
            ],
            "session_id": "s-1",
            "total_available": 42,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = HttpItemSource::new(client(&server)).fetch_pool(15).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].domain, Domain::FinTech);
    assert_eq!(items[0].tags, vec!["AI", "Finance"]);
    assert_eq!(items[1].domain.label(), "General");
}

#[tokio::test]
async fn test_fetch_pool_distinguishes_empty_from_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ideas/game-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ideas": [],
            "session_id": "s-2",
            "total_available": 0,
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ideas/game-session"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let source = HttpItemSource::new(client(&server));

    assert_eq!(source.fetch_pool(15).await, Err(SourceError::Empty));
    assert!(matches!(source.fetch_pool(15).await, Err(SourceError::Network(_))));
}

#[tokio::test]
async fn test_request_generation_posts_and_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ideas/generate-pool"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"generated": 30})))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpItemSource::new(client(&server).with_bearer_token("secret-token"));

    source.request_generation().await.unwrap();
}

#[tokio::test]
async fn test_record_decision_sends_swipe_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/swipes/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "sw-1"})))
        .expect(1)
        .mount(&server)
        .await;

    HttpDecisionRecorder::new(client(&server))
        .record_decision(&"idea-7".into(), true)
        .await
        .unwrap();

    let request = &server.received_requests().await.unwrap()[0];
    let body = request.body_json::<serde_json::Value>().unwrap();
    assert_eq!(body, json!({"idea_id": "idea-7", "swipe": true}));
}

#[tokio::test]
async fn test_record_decision_failure_names_the_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/swipes/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = HttpDecisionRecorder::new(client(&server))
        .record_decision(&"idea-9".into(), false)
        .await
        .unwrap_err();

    assert!(matches!(err, FunnelError::DecisionPersistFailed { ref item_id, .. } if item_id == "idea-9"));
}

#[tokio::test]
async fn test_synthesize_parses_final_idea() {
    let server = MockServer::start().await;
    let issued = vec![
        idea("a", "Smart Budget Coach", "FinTech", &["AI"]),
        idea("b", "Invoice Bot", "SaaS", &["B2B"]),
        idea("c", "Study Buddy", "EdTech", &[]),
    ];
    let ranked = RankedSelection::try_from(
        issued
            .iter()
            .map(|value| serde_json::from_value::<CandidateItem>(value.clone()).unwrap())
            .collect::<Vec<_>>(),
    )
    .unwrap();
    Mock::given(method("POST"))
        .and(path("/api/ideas/generate-final"))
        .and(body_partial_json(json!({ "top_ideas": issued })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "final-123",
            "title": "Coach for Freelancer Taxes",
            "description": "Combines budgeting and invoicing.",
            "domain": "FinTech",
            "tags": ["AI", "B2B"],
            "personalizedFor": {"team": "Solo founder"},
            "confidence": 87,
            "aiReasoning": "Fits a solo founder.",
            "keyFeatures": ["Receipt scanning"],
            "marketPotential": "High",
        })))
        .mount(&server)
        .await;

    let artifact = HttpSynthesisService::new(client(&server))
        .synthesize(&ranked, &QuestionnaireAnswers::default())
        .await
        .unwrap();

    assert_eq!(artifact.id, "final-123");
    assert_eq!(artifact.confidence, 87);
    assert_eq!(artifact.personalized_for.get("team"), Some("Solo founder"));
    assert!(artifact.saved_at.is_none());
    assert!(!artifact.is_locally_generated());

    let request = &server.received_requests().await.unwrap()[0];
    let body = request.body_json::<serde_json::Value>().unwrap();
    assert_eq!(body["top_ideas"].as_array().unwrap().len(), 3);
    assert_eq!(body["top_ideas"][0]["id"], "a");
    assert_eq!(body["top_ideas"][0]["created_at"], "2024-05-01T10:00:00Z");
    assert_eq!(body["questionnaire"], json!({}));
}

#[tokio::test]
async fn test_synthesize_failure_is_synthesis_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ideas/generate-final"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = HttpSynthesisService::new(client(&server))
        .synthesize(&ranked(), &QuestionnaireAnswers::default())
        .await
        .unwrap_err();

    assert!(matches!(err, FunnelError::SynthesisFailed(_)));
    assert!(err.is_remote_failure());
}
