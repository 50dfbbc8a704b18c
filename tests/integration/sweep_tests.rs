//! Integration tests for the sweep
//!
//! These tests use wiremock to stand in for the question-bank API and run
//! the full fetch → extract → write cycle end-to-end.

use quiz_harvest::config::{
    ApiConfig, Config, Grouping, MultiPartEntry, OutputConfig, PacingConfig,
};
use quiz_harvest::sweep::Coordinator;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_PATH: &str = "/h5/api/exercise/list/mainSwatch";

/// Creates a test configuration pointed at a mock server
fn create_test_config(
    base_url: &str,
    output_dir: &str,
    grouping: Grouping,
    multi_part: Vec<MultiPartEntry>,
) -> Config {
    Config {
        api: ApiConfig {
            base_url: format!("{}{}", base_url, API_PATH),
            library_id: "lib-1".to_string(),
            auth_token: "token-1".to_string(),
            mode: "1".to_string(),
            user_agent: "TestAgent/1.0".to_string(),
            timeout_secs: 5,
        },
        pacing: PacingConfig {
            // Very short for testing
            min_delay_ms: 0,
            max_delay_ms: 1,
        },
        output: OutputConfig {
            directory: output_dir.to_string(),
            grouping,
        },
        multi_part,
    }
}

/// A well-formed single-question payload
fn single_question_payload() -> Value {
    json!({
        "code": "200",
        "body": {
            "s": 1,
            "questionContent": "<p>What is 2+2?</p>",
            "jsonData": {
                "single": {
                    "options": [
                        {"optionsContent": "3", "rightAnswers": false},
                        {"optionsContent": "4", "rightAnswers": true}
                    ]
                }
            }
        }
    })
}

/// A well-formed child payload for a multi-part question
fn child_question_payload(child: u32) -> Value {
    json!({
        "code": "200",
        "body": {
            "questionContent": "<p>Shared scenario for the group</p>",
            "child": {
                "questionContent": format!("<p>Part {} question</p>", child),
                "jsonData": {
                    "single": {
                        "options": [
                            {"optionsContent": "yes", "rightAnswers": true},
                            {"optionsContent": "no", "rightAnswers": false}
                        ]
                    }
                }
            }
        }
    })
}

#[tokio::test]
async fn test_single_question_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("mainIndex", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_question_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("out");
    let config = create_test_config(
        &mock_server.uri(),
        output_dir.to_str().unwrap(),
        Grouping::Combined,
        vec![],
    );

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run(200, 200).await.expect("Sweep failed");

    assert_eq!(report.items_attempted, 1);
    assert_eq!(report.items_saved, 1);
    assert_eq!(report.items_failed, 0);

    // Transcript carries the cleaned extraction
    let transcript = std::fs::read_to_string(output_dir.join("questions.txt")).unwrap();
    assert!(transcript.contains("Question Number: 200\n"));
    assert!(transcript.contains("Question Content: What is 2+2?"));
    assert!(transcript.contains("A. 3\n"));
    assert!(transcript.contains("B. 4\n"));
    assert!(transcript.contains("Correct Answer: B\n"));

    // Raw archive reproduces the response exactly
    let raw = std::fs::read_to_string(output_dir.join("all_questions_raw.json")).unwrap();
    let reloaded: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(reloaded["question_200"], single_question_payload());
}

#[tokio::test]
async fn test_request_shape() {
    let mock_server = MockServer::start().await;

    // The API contract: auth header plus the fixed query parameters
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(header("Authorization", "token-1"))
        .and(query_param("mode", "1"))
        .and(query_param("libraryId", "lib-1"))
        .and(query_param("mainIndex", "7"))
        .and(query_param("practiceId", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_question_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("out");
    let config = create_test_config(
        &mock_server.uri(),
        output_dir.to_str().unwrap(),
        Grouping::Combined,
        vec![],
    );

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run(7, 7).await.expect("Sweep failed");

    assert_eq!(report.items_saved, 1);
}

#[tokio::test]
async fn test_multi_part_expansion() {
    let mock_server = MockServer::start().await;

    // One mock per child so each part returns its own text
    for child in 1..=6u32 {
        Mock::given(method("GET"))
            .and(path(API_PATH))
            .and(query_param("mainIndex", "196"))
            .and(query_param("childIndex", child.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(child_question_payload(child)))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("out");
    let config = create_test_config(
        &mock_server.uri(),
        output_dir.to_str().unwrap(),
        Grouping::Combined,
        vec![MultiPartEntry {
            main_index: 196,
            children: 6,
        }],
    );

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run(196, 196).await.expect("Sweep failed");

    // Exactly 6 child fetches, all saved
    assert_eq!(report.items_attempted, 6);
    assert_eq!(report.items_saved, 6);

    let transcript = std::fs::read_to_string(output_dir.join("questions.txt")).unwrap();

    for child in 1..=6 {
        assert!(
            transcript.contains(&format!("Question Number: 196 (Part {})", child)),
            "missing part {}",
            child
        );
    }

    // The shared scenario is printed once, ahead of part 1 only
    assert_eq!(transcript.matches("Common Scenario:").count(), 1);
    assert!(transcript.contains("Common Scenario: Shared scenario for the group"));

    // Five sibling separators, one closing group separator
    assert_eq!(transcript.matches("------------------------------").count(), 5);
    assert_eq!(
        transcript
            .matches("==================================================")
            .count(),
        1
    );

    // Child payloads nest under the parent key in the raw archive
    let raw = std::fs::read_to_string(output_dir.join("all_questions_raw.json")).unwrap();
    let reloaded: Value = serde_json::from_str(&raw).unwrap();
    for child in 1..=6u32 {
        assert_eq!(
            reloaded["question_196"][format!("child_{}", child)],
            child_question_payload(child)
        );
    }
}

#[tokio::test]
async fn test_http_error_writes_nothing_for_index() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("out");
    let config = create_test_config(
        &mock_server.uri(),
        output_dir.to_str().unwrap(),
        Grouping::Combined,
        vec![],
    );

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run(5, 5).await.expect("Sweep failed");

    assert_eq!(report.items_saved, 0);
    assert_eq!(report.items_failed, 1);

    // No transcript block was written
    assert!(!output_dir.join("questions.txt").exists());

    // The raw archive holds no entry for the failed index
    let raw = std::fs::read_to_string(output_dir.join("all_questions_raw.json")).unwrap();
    let reloaded: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(reloaded, json!({}));
}

#[tokio::test]
async fn test_api_reported_failure_skips_extraction() {
    let mock_server = MockServer::start().await;

    // HTTP 200 but the payload itself reports failure
    let payload = json!({"code": "500", "body": {"questionContent": "ignored"}});
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("out");
    let config = create_test_config(
        &mock_server.uri(),
        output_dir.to_str().unwrap(),
        Grouping::Combined,
        vec![],
    );

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run(9, 9).await.expect("Sweep failed");

    assert_eq!(report.items_saved, 0);
    assert_eq!(report.items_failed, 1);
    assert!(!output_dir.join("questions.txt").exists());

    // The raw body is still archived for the HTTP success
    let raw = std::fs::read_to_string(output_dir.join("all_questions_raw.json")).unwrap();
    let reloaded: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(reloaded["question_9"], payload);
}

#[tokio::test]
async fn test_failure_does_not_block_later_indices() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("mainIndex", "1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("mainIndex", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_question_payload()))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("out");
    let config = create_test_config(
        &mock_server.uri(),
        output_dir.to_str().unwrap(),
        Grouping::Combined,
        vec![],
    );

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run(1, 2).await.expect("Sweep failed");

    assert_eq!(report.items_attempted, 2);
    assert_eq!(report.items_failed, 1);
    assert_eq!(report.items_saved, 1);

    let transcript = std::fs::read_to_string(output_dir.join("questions.txt")).unwrap();
    assert!(!transcript.contains("Question Number: 1\n"));
    assert!(transcript.contains("Question Number: 2\n"));
}

#[tokio::test]
async fn test_split_grouping_routes_files() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("mainIndex", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_question_payload()))
        .mount(&mock_server)
        .await;

    for child in 1..=2u32 {
        Mock::given(method("GET"))
            .and(path(API_PATH))
            .and(query_param("mainIndex", "11"))
            .and(query_param("childIndex", child.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(child_question_payload(child)))
            .mount(&mock_server)
            .await;
    }

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("out");
    let config = create_test_config(
        &mock_server.uri(),
        output_dir.to_str().unwrap(),
        Grouping::Split,
        vec![MultiPartEntry {
            main_index: 11,
            children: 2,
        }],
    );

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run(10, 11).await.expect("Sweep failed");

    assert_eq!(report.items_saved, 3);

    let single = std::fs::read_to_string(output_dir.join("single_questions.txt")).unwrap();
    let multi = std::fs::read_to_string(output_dir.join("multi_part_questions.txt")).unwrap();

    assert!(single.contains("Question Number: 10\n"));
    assert!(!single.contains("(Part"));
    assert!(multi.contains("Question Number: 11 (Part 1)"));
    assert!(multi.contains("Question Number: 11 (Part 2)"));
}

#[tokio::test]
async fn test_per_question_grouping_routes_files() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_question_payload()))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("out");
    let config = create_test_config(
        &mock_server.uri(),
        output_dir.to_str().unwrap(),
        Grouping::PerQuestion,
        vec![],
    );

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run(20, 21).await.expect("Sweep failed");

    assert_eq!(report.items_saved, 2);
    assert!(output_dir.join("question_20.txt").exists());
    assert!(output_dir.join("question_21.txt").exists());
    assert!(output_dir.join("question_20_raw.json").exists());
    assert!(output_dir.join("question_21_raw.json").exists());
}
