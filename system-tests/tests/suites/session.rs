// system-tests/tests/suites/session.rs
// ============================================================================
// Module: Session Tests
// Description: Authentication, bearer propagation, and transcript coverage.
// Purpose: Validate the one-shot setup and what leaves the client.
// Dependencies: system-tests helpers, foody-client, foody-suite, reqwest
// ============================================================================

//! Session system-tests for the Foody suite.

use std::time::Duration;

use foody_client::AccessToken;
use foody_client::ClientError;
use foody_client::ClientSettings;
use foody_client::FoodyClient;
use foody_client::StatusCode;
use foody_suite::Pipeline;
use foody_suite::SuiteContext;
use foody_suite::SuiteError;
use foody_suite::run_suite;
use helpers::artifacts::TestReporter;
use helpers::foody_stub::STUB_PASSWORD;
use helpers::foody_stub::spawn_foody_stub;
use helpers::harness::NAME_SEED;
use helpers::harness::stub_config;
use helpers::harness::stub_config_bad_password;

use crate::helpers;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::test(flavor = "multi_thread")]
async fn rejected_credentials_abort_before_any_step() -> TestResult {
    let mut reporter = TestReporter::new("rejected_credentials_abort_before_any_step")?;
    let stub = spawn_foody_stub().await?;
    let config = stub_config_bad_password(&stub)?;

    match run_suite(&config, &Pipeline::standard()).await {
        Err(SuiteError::Setup(ClientError::Authentication {
            status: 401,
            body,
        })) => {
            if !body.contains("Invalid username or password") {
                return Err(format!("authentication error lost the reply body: {body}").into());
            }
        }
        Err(other) => return Err(format!("expected an authentication failure, got {other}").into()),
        Ok(_) => return Err("suite must not run with rejected credentials".into()),
    }
    if !stub.requests().is_empty() {
        return Err("no food request may be sent after authentication fails".into());
    }

    reporter.finish(
        "pass",
        vec!["authentication failure is fatal".to_string()],
        vec!["summary.json".to_string(), "summary.md".to_string()],
    )?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn every_food_request_carries_the_bearer_token() -> TestResult {
    let mut reporter = TestReporter::new("every_food_request_carries_the_bearer_token")?;
    let stub = spawn_foody_stub().await?;

    let anonymous = reqwest::Client::new()
        .get(format!("{}/api/Food/All", stub.base_url()))
        .send()
        .await?;
    if anonymous.status() != StatusCode::UNAUTHORIZED {
        return Err(format!("stub must require a token, got {}", anonymous.status()).into());
    }

    let config = stub_config(&stub)?;
    let run = run_suite(&config, &Pipeline::standard()).await?;
    let requests = stub.requests();
    reporter.artifacts().write_json("stub_requests.json", &requests)?;

    // The anonymous probe is the first recorded request.
    let suite_requests = requests.get(1..).unwrap_or_default();
    if suite_requests.len() != 7 {
        return Err(format!("expected 7 suite requests, got {}", suite_requests.len()).into());
    }
    if let Some(request) = suite_requests.iter().find(|request| request.bearer.is_none()) {
        return Err(format!("{} {} sent without a token", request.method, request.path).into());
    }
    if !run.report.passed() {
        return Err(run.report.render_text().into());
    }

    reporter.finish(
        "pass",
        vec!["bearer token attached to all seven requests".to_string()],
        vec![
            "summary.json".to_string(),
            "summary.md".to_string(),
            "stub_requests.json".to_string(),
        ],
    )?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn transcript_records_steps_without_credentials() -> TestResult {
    let mut reporter = TestReporter::new("transcript_records_steps_without_credentials")?;
    let stub = spawn_foody_stub().await?;
    let config = stub_config(&stub)?;

    let run = run_suite(&config, &Pipeline::standard()).await?;
    reporter.artifacts().write_json("transcript.json", &run.transcript)?;

    let methods: Vec<&str> = run.transcript.iter().map(|entry| entry.method.as_str()).collect();
    let expected = ["POST", "PATCH", "GET", "DELETE", "POST", "PATCH", "DELETE"];
    if methods != expected {
        return Err(format!("unexpected transcript methods: {methods:?}").into());
    }
    let sequences: Vec<u64> = run.transcript.iter().map(|entry| entry.sequence).collect();
    if sequences != [1, 2, 3, 4, 5, 6, 7] {
        return Err(format!("unexpected transcript sequence: {sequences:?}").into());
    }
    if run.transcript.iter().any(|entry| entry.path.contains("Authentication")) {
        return Err("transcript must not include the authentication exchange".into());
    }
    let serialized = serde_json::to_string(&run.transcript)?;
    if serialized.contains(STUB_PASSWORD) {
        return Err("transcript leaked the password".into());
    }

    reporter.finish(
        "pass",
        vec!["transcript covers the seven steps only".to_string()],
        vec![
            "summary.json".to_string(),
            "summary.md".to_string(),
            "transcript.json".to_string(),
        ],
    )?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn forged_token_is_refused_on_every_step() -> TestResult {
    let mut reporter = TestReporter::new("forged_token_is_refused_on_every_step")?;
    let stub = spawn_foody_stub().await?;
    let settings = ClientSettings::new(stub.base_url()).with_timeout(Duration::from_secs(5));
    let client = FoodyClient::with_token(&settings, AccessToken::new("forged-token"))?;
    let mut ctx = SuiteContext::with_seed(client, NAME_SEED);

    let report = Pipeline::standard().run(&mut ctx).await;
    let transcript = ctx.client().transcript();
    reporter.artifacts().write_json("transcript.json", &transcript)?;

    if report.failed_count() != 7 {
        return Err(format!("every step should fail:\n{}", report.render_text()).into());
    }
    if transcript.len() != 7 || transcript.iter().any(|entry| entry.status != 401) {
        return Err("each step should send one request and receive 401".into());
    }
    let requests = stub.requests();
    if requests.iter().any(|request| request.bearer.as_deref() != Some("forged-token")) {
        return Err("client must send the token it was given".into());
    }
    if !stub.foods().is_empty() {
        return Err("unauthorized create must not store a food".into());
    }

    reporter.finish(
        "pass",
        vec!["api refuses a token it did not issue".to_string()],
        vec![
            "summary.json".to_string(),
            "summary.md".to_string(),
            "transcript.json".to_string(),
        ],
    )?;
    drop(reporter);
    Ok(())
}
