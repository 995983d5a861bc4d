//! Backend client tests against a mocked HTTP server.
//!
//! | Call                 | Endpoint                      | Checked                         |
//! |----------------------|-------------------------------|---------------------------------|
//! | health               | GET  /api/health              | ok payload, unreachable backend |
//! | ask                  | POST /api/questions/ask       | request body, decoded sources   |
//! | generate_quiz        | POST /api/quizzes/generate    | defaults on the wire, scoring   |
//! | generate_flashcards  | POST /api/flashcards/generate | decoded cards                   |
//! | upload_document      | POST /api/documents/upload    | multipart upload                |
//! | sign_in / sign_up    | POST /api/auth/*              | backend detail, local checks    |

use mockito::Matcher;
use serde_json::json;
use studyhall_core::api::{FlashcardRequest, QuizRequest, SignIn, SignUp, StudyClient};
use studyhall_core::storage::BackendConfig;
use studyhall_core::{ApiError, CoreError, ValidationError};

fn client_for(server: &mockito::ServerGuard) -> StudyClient {
    StudyClient::new(&BackendConfig {
        base_url: server.url(),
        ..BackendConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/health")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "healthy"}"#)
        .create_async()
        .await;

    let status = client_for(&server).health().await;
    assert!(status.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn health_reports_unreachable_backend() {
    // Nothing listens on port 9 (discard) on test machines.
    let client = StudyClient::new(&BackendConfig {
        base_url: "http://127.0.0.1:9".into(),
        timeout_secs: 2,
        ..BackendConfig::default()
    })
    .unwrap();
    let status = client.health().await;
    assert!(!status.is_ok());
}

#[tokio::test]
async fn ask_sends_question_and_decodes_answer() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/questions/ask")
        .match_body(Matcher::Json(json!({
            "question": "What is osmosis?",
            "document_ids": ["doc-1"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "answer": "Diffusion of water across a membrane.",
                "sources": [
                    {"text": "Osmosis is...", "score": 0.93},
                    {"text": "Membranes...", "score": 0.71}
                ],
                "confidence": 0.88
            })
            .to_string(),
        )
        .create_async()
        .await;

    let answer = client_for(&server)
        .ask("What is osmosis?", Some(vec!["doc-1".into()]))
        .await
        .unwrap();

    assert_eq!(answer.answer, "Diffusion of water across a membrane.");
    assert_eq!(answer.sources.len(), 2);
    assert!((answer.confidence - 0.88).abs() < 1e-9);
    mock.assert_async().await;
}

#[tokio::test]
async fn quiz_request_uses_defaults_on_the_wire() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/quizzes/generate")
        .match_body(Matcher::Json(json!({
            "topic": null,
            "num_questions": 5,
            "question_type": "multiple_choice",
            "document_ids": null
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "topic": "General",
                "questions": [{
                    "question": "2 + 2?",
                    "options": ["3", "4", "5"],
                    "correct_answer": 1,
                    "explanation": "Arithmetic."
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let quiz = client_for(&server)
        .generate_quiz(&QuizRequest::default())
        .await
        .unwrap();

    assert_eq!(quiz.topic, "General");
    assert_eq!(quiz.score(&[Some(1)]), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn flashcards_are_decoded() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/flashcards/generate")
        .match_body(Matcher::PartialJson(json!({"num_cards": 2})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "cards": [
                    {"front": "ATP", "back": "Energy currency", "difficulty": "easy", "importance": 0.9},
                    {"front": "DNA", "back": "Genetic material", "difficulty": "medium", "importance": 0.8}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let set = client_for(&server)
        .generate_flashcards(&FlashcardRequest {
            num_cards: 2,
            ..FlashcardRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(set.cards.len(), 2);
    assert_eq!(set.cards[0].front, "ATP");
}

#[tokio::test]
async fn upload_sends_multipart_file() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/documents/upload")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".into()),
        )
        .match_body(Matcher::Regex("filename=\"notes.txt\"".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "d1", "filename": "notes.txt", "chunks_count": 3, "status": "processed"}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "Photosynthesis converts light to chemical energy.").unwrap();

    let doc = client_for(&server).upload_document(&path).await.unwrap();
    assert_eq!(doc.filename, "notes.txt");
    assert_eq!(doc.chunks_count, 3);
    mock.assert_async().await;
}

#[tokio::test]
async fn upload_of_missing_file_fails_locally() {
    let server = mockito::Server::new_async().await;
    let err = client_for(&server)
        .upload_document(std::path::Path::new("/definitely/not/here.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::File { .. }));
}

#[tokio::test]
async fn sign_in_surfaces_backend_detail() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth/signin")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Invalid username or password"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .sign_in(&SignIn {
            username: "seahawk".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();

    match err {
        CoreError::Api(ApiError::Status { status, detail }) => {
            assert_eq!(status, 401);
            assert_eq!(detail, "Invalid username or password");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn sign_up_validates_before_calling_backend() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/signup")
        .expect(0)
        .create_async()
        .await;

    let err = client_for(&server)
        .sign_up(&SignUp {
            username: "seahawk".into(),
            password: "pw".into(),
            year: String::new(),
            major: "Biology".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::MissingField("Please select your year"))
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/questions/ask")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let err = client_for(&server).ask("anything", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn decode_error_names_the_requested_path() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/auth/user/seahawk")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;
    server
        .mock("DELETE", "/api/documents/doc-42")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = client_for(&server);
    match client.get_user("seahawk").await.unwrap_err() {
        ApiError::Decode { path, .. } => assert_eq!(path, "api/auth/user/seahawk"),
        other => panic!("expected decode error, got {other:?}"),
    }
    match client.delete_document("doc-42").await.unwrap_err() {
        ApiError::Decode { path, .. } => assert_eq!(path, "api/documents/doc-42"),
        other => panic!("expected decode error, got {other:?}"),
    }
}
