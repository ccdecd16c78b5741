use crate::e2e::helpers;

use helpers::{api_client::MultipartForm, FakeTtsRepository, TestContext, MP3_BYTES, WAV_BYTES};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use tabletalk_backend::infrastructure::repositories::TtsRepositoryError;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_speak_a_csv_column(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/csv",
            MultipartForm::new()
                .file("greeting.csv", b"text\nHello\nNaN\nworld\n")
                .text("column", "text"),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/wav")
        .assert_header(
            "content-disposition",
            "inline; filename=\"text_to_speech_output.wav\"",
        )
        .assert_header("x-audio-format", "wav")
        .assert_header("x-character-count", "11");
    assert_eq!(response.body_bytes, WAV_BYTES);

    assert_eq!(ctx.tts.calls(), vec!["Hello world".to_string()]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_speak_only_the_selected_column(ctx: &TestContext) {
    let csv = b"id,text,author\n1,Good morning,ann\n2,,bob\n3,everyone,cy\n";

    let response = ctx
        .client
        .post_multipart(
            "/api/tts/csv",
            MultipartForm::new()
                .file("articles.csv", csv)
                .text("column", "text"),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(ctx.tts.calls(), vec!["Good morning everyone".to_string()]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_warn_when_the_column_is_empty(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/csv",
            MultipartForm::new()
                .file("articles.csv", b"id,text\n1,\n2,NA\n")
                .text("column", "text"),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .assert_level("warning")
        .assert_error_message("Column 'text' has no text to convert");
    assert!(ctx.tts.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_an_unknown_column(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/csv",
            MultipartForm::new()
                .file("articles.csv", b"text\nHello\n")
                .text("column", "body"),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Column 'body' not found");
    assert!(ctx.tts.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_a_column(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/csv",
            MultipartForm::new().file("articles.csv", b"text\nHello\n"),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Missing field 'column'");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_speak_an_uploaded_text_file(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/text-file",
            MultipartForm::new().file("notes.txt", "\u{feff}Line one\nLine two\n".as_bytes()),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(ctx.tts.calls(), vec!["Line one\nLine two\n".to_string()]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_text_file_that_is_not_utf8(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/text-file",
            MultipartForm::new().file("latin1.txt", &[0x63, 0x61, 0x66, 0xE9]),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_level("error")
        .assert_error_message("not valid UTF-8");
    assert!(ctx.tts.calls().is_empty());

    // The failure is local to that request
    let response = ctx
        .client
        .post("/api/tts/text", &json!({ "text": "Still here" }))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_speak_pasted_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/text", &json!({ "text": "Good morning" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-character-count", "12");
    assert_eq!(ctx.tts.calls(), vec!["Good morning".to_string()]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_warn_on_blank_pasted_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/text", &json!({ "text": "   \n\t" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .assert_level("warning")
        .assert_error_message("Please enter some text before converting.");
    assert!(ctx.tts.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_malformed_json_body(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/api/tts/text", "application/json", b"{\"text\":")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_level("error");
    assert!(ctx.tts.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_offer_a_download_when_asked(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/text?download=true", &json!({ "text": "Hello" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK).assert_header(
        "content-disposition",
        "attachment; filename=\"text_to_speech_output.wav\"",
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_tag_conversions_with_the_request_id(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/text", &json!({ "text": "Hello" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let request_id = response.header("x-request-id").unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn it_should_present_mp3_from_a_cloud_backend() {
    let ctx = TestContext::with_repository(FakeTtsRepository::mp3())
        .await
        .unwrap();

    let response = ctx
        .client
        .post("/api/tts/text", &json!({ "text": "Hello world" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mp3")
        .assert_header(
            "content-disposition",
            "inline; filename=\"text_to_speech_output.mp3\"",
        )
        .assert_header("x-audio-format", "mp3");
    assert_eq!(response.body_bytes, MP3_BYTES);
}

#[tokio::test]
async fn it_should_report_a_cloud_failure_as_bad_gateway() {
    let ctx = TestContext::with_repository(
        FakeTtsRepository::mp3()
            .failing(TtsRepositoryError::Service("AWS Polly error: throttled".to_string())),
    )
    .await
    .unwrap();

    let response = ctx
        .client
        .post("/api/tts/text", &json!({ "text": "Hello" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_level("error")
        .assert_error_message("throttled");
    assert_eq!(ctx.tts.calls().len(), 1);
}

#[tokio::test]
async fn it_should_report_a_missing_engine_as_unavailable() {
    let ctx = TestContext::with_repository(
        FakeTtsRepository::wav().failing(TtsRepositoryError::Engine(
            "espeak-ng could not be started".to_string(),
        )),
    )
    .await
    .unwrap();

    let response = ctx
        .client
        .post("/api/tts/text", &json!({ "text": "Hello" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::SERVICE_UNAVAILABLE)
        .assert_error_message("espeak-ng could not be started");
}

#[tokio::test]
async fn it_should_refuse_audio_in_the_wrong_format() {
    let ctx = TestContext::with_repository(FakeTtsRepository::wav().with_audio(MP3_BYTES))
        .await
        .unwrap();

    let response = ctx
        .client
        .post("/api/tts/text", &json!({ "text": "Hello" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::SERVICE_UNAVAILABLE)
        .assert_error_message("does not look like wav");
}
