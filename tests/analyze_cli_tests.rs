mod common;

use common::TestEnv;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRANSCRIPT: &str = "Rep: Thanks for joining.\nDr. Smith: We need Epic integration by Q3 and our budget is $50k.";

const INSIGHTS: &str = r#"```json
{
  "technical_requirements": ["Epic integration"],
  "pain_points": {"clinical": ["Charting takes too long"], "priority_level": {"Charting takes too long": "High"}},
  "timeline_info": {"start_date": "Q3"},
  "pricing_discussion": {"budget_constraints": "$50k"},
  "next_steps": [{"action": "Send Epic integration guide", "owner": "Rep", "deadline": "Friday", "priority": "High"}]
}
```"#;

fn message(text: &str) -> serde_json::Value {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn"
    })
}

async fn mock_anthropic() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("x-api-key", "test-key"))
        .and(body_partial_json(json!({"max_tokens": 4096})))
        .respond_with(ResponseTemplate::new(200).set_body_json(message(INSIGHTS)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(body_partial_json(json!({"max_tokens": 1024})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(message("Hi Dr. Smith,\n\nThanks for your time.")),
        )
        .mount(&server)
        .await;
    server
}

#[test]
fn analyze_requires_api_key() {
    let env = TestEnv::new();
    let file = env.write_file("demo.txt", TRANSCRIPT);
    let output = env.run(&["analyze", file.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("ANTHROPIC_API_KEY"),
        "expected missing credential error, got:\n{}",
        stderr
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn analyze_prints_insights_and_email() {
    let server = mock_anthropic().await;
    let env = TestEnv::new()
        .with_env("ANTHROPIC_API_KEY", "test-key")
        .with_env("DEMO_INSIGHTS_ENDPOINT", &server.uri());
    let file = env.write_file("demo.txt", TRANSCRIPT);

    let output = env.run(&[
        "analyze",
        file.to_str().unwrap(),
        "--contact",
        "Dr. Smith",
        "--template",
        "technical",
        "--export",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "analyze should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Epic integration"));
    assert!(stdout.contains("🔴 Send Epic integration guide (Owner: Rep, Due: Friday)"));
    assert!(stdout.contains("== Follow-up Email Draft (technical) =="));
    assert!(stdout.contains("Hi Dr. Smith,"));
    assert!(stderr.contains("Exported analysis to:"));
    assert!(stderr.contains("Analyzing transcript"), "{}", stderr);

    let exports: Vec<_> = std::fs::read_dir(env.workdir())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("demo_analysis_") && name.ends_with(".json"))
        .collect();
    assert_eq!(exports.len(), 1, "{exports:?}");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let email_request: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    let prompt = email_request["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("Focus on technical details and integration pathway"));
}

#[tokio::test(flavor = "multi_thread")]
async fn analyze_json_skips_email() {
    let server = mock_anthropic().await;
    let env = TestEnv::new()
        .with_env("ANTHROPIC_API_KEY", "test-key")
        .with_env("DEMO_INSIGHTS_ENDPOINT", &server.uri());
    let file = env.write_file("demo.txt", TRANSCRIPT);

    let output = env.run(&["analyze", file.to_str().unwrap(), "--json", "-c", "Dr. Smith"]);
    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["technical_requirements"], json!(["Epic integration"]));
    assert_eq!(record["pricing_discussion"]["budget_constraints"], "$50k");
    assert_eq!(record["timeline_info"]["start_date"], "Q3");
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn analyze_reports_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(message("Sorry, I cannot help with that.")),
        )
        .mount(&server)
        .await;
    let env = TestEnv::new()
        .with_env("ANTHROPIC_API_KEY", "test-key")
        .with_env("DEMO_INSIGHTS_ENDPOINT", &server.uri());
    let file = env.write_file("demo.txt", TRANSCRIPT);

    let output = env.run(&["analyze", file.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("JSON parsing error"), "{}", stderr);
    assert!(stderr.contains("Sorry, I cannot help with that."), "{}", stderr);
}

#[test]
fn analyze_rejects_blank_transcript() {
    let env = TestEnv::new().with_env("ANTHROPIC_API_KEY", "test-key");
    let file = env.write_file("blank.txt", "   \n\n  ");

    let output = env.run(&["analyze", file.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Please paste a demo transcript"), "{}", stderr);
}

#[tokio::test(flavor = "multi_thread")]
async fn email_drafts_from_exported_analysis() {
    let server = mock_anthropic().await;
    let env = TestEnv::new()
        .with_env("ANTHROPIC_API_KEY", "test-key")
        .with_env("DEMO_INSIGHTS_ENDPOINT", &server.uri());
    let analysis = env.write_file(
        "demo_analysis_20240315_1430.json",
        r#"{"technical_requirements": ["Epic integration"]}"#,
    );

    let output = env.run(&[
        "email",
        analysis.to_str().unwrap(),
        "--contact",
        "Dr. Smith",
        "--template",
        "boardroom",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "email should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.starts_with("Hi Dr. Smith,"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("Balanced overview of all aspects"));
    assert!(prompt.contains("Dr. Smith"));
}

#[tokio::test(flavor = "multi_thread")]
async fn configured_log_level_filters_output() {
    let server = mock_anthropic().await;
    let env = TestEnv::new()
        .with_env("ANTHROPIC_API_KEY", "test-key")
        .with_env("DEMO_INSIGHTS_ENDPOINT", &server.uri());
    env.write_config(
        r#"
[general]
log_level = "warn"
"#,
    );
    let file = env.write_file("demo.txt", TRANSCRIPT);

    let output = env.run(&["analyze", file.to_str().unwrap(), "--no-email"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stderr:\n{}", stderr);
    assert!(!stderr.contains("Analyzing transcript"), "{}", stderr);

    let verbose = env.run(&["analyze", file.to_str().unwrap(), "--no-email", "--verbose"]);
    let stderr = String::from_utf8_lossy(&verbose.stderr);
    assert!(stderr.contains("Sending Anthropic messages request"), "{}", stderr);
}
