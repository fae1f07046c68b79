// system-tests/tests/suites/crud_pipeline.rs
// ============================================================================
// Module: CRUD Pipeline Tests
// Description: The seven ordered cases run against the Food API stub.
// Purpose: Validate step ordering, shared state, and failure isolation.
// Dependencies: system-tests helpers, foody-suite
// ============================================================================

//! CRUD pipeline system-tests for the Foody suite.

use axum::http::StatusCode;
use foody_suite::Pipeline;
use foody_suite::PipelineError;
use foody_suite::StateKey;
use foody_suite::StepStatus;
use foody_suite::SuiteReport;
use foody_suite::SuiteStep;
use foody_suite::run_suite;
use foody_suite::run_with_context;
use foody_suite::steps::MISSING_FOOD_ID_NOTE;
use helpers::artifacts::TestReporter;
use helpers::foody_stub::StubOptions;
use helpers::foody_stub::spawn_foody_stub;
use helpers::foody_stub::spawn_foody_stub_with;
use helpers::harness::stub_config;
use helpers::harness::stub_context;

use crate::helpers;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn step_status(report: &SuiteReport, name: &str) -> Result<StepStatus, String> {
    report.step(name).map(|step| step.status).ok_or_else(|| format!("missing step {name}"))
}

fn step_notes<'a>(report: &'a SuiteReport, name: &str) -> Result<&'a [String], String> {
    report.step(name).map(|step| step.notes.as_slice()).ok_or_else(|| format!("missing step {name}"))
}

#[tokio::test(flavor = "multi_thread")]
async fn standard_suite_passes_against_conforming_api() -> TestResult {
    let mut reporter = TestReporter::new("standard_suite_passes_against_conforming_api")?;
    let stub = spawn_foody_stub().await?;
    let config = stub_config(&stub)?;

    let run = run_suite(&config, &Pipeline::standard()).await?;
    reporter.artifacts().write_json("report.json", &run.report)?;
    reporter.artifacts().write_json("transcript.json", &run.transcript)?;

    if !run.report.passed() {
        return Err(format!("expected every step to pass:\n{}", run.report.render_text()).into());
    }
    let names: Vec<&str> = run.report.steps.iter().map(|step| step.name.as_str()).collect();
    let expected: Vec<&str> = SuiteStep::STANDARD.iter().map(|step| step.name()).collect();
    if names != expected {
        return Err(format!("unexpected step order: {names:?}").into());
    }
    if !stub.foods().is_empty() {
        return Err("created food should be deleted by the delete step".into());
    }

    let created = run.transcript.first().ok_or("empty transcript")?;
    let edited = run.transcript.get(1).ok_or("missing edit exchange")?;
    let food_id = serde_json::from_str::<serde_json::Value>(&created.response)?
        .get("foodId")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or("create reply lacks foodId")?;
    if edited.path != format!("/api/Food/Edit/{food_id}") {
        return Err(format!("edit targeted {}, expected food {food_id}", edited.path).into());
    }
    let new_name = edited.request[0]["value"].as_str().unwrap_or_default();
    if !new_name.starts_with("Updated_food_") {
        return Err(format!("unexpected edited name {new_name}").into());
    }

    reporter.finish(
        "pass",
        vec!["seven steps passed against the stub".to_string()],
        vec![
            "summary.json".to_string(),
            "summary.md".to_string(),
            "report.json".to_string(),
            "transcript.json".to_string(),
        ],
    )?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_create_surfaces_in_dependent_steps_only() -> TestResult {
    let mut reporter = TestReporter::new("failed_create_surfaces_in_dependent_steps_only")?;
    let stub = spawn_foody_stub_with(StubOptions {
        seed_foods: vec![("Seeded".to_string(), "Already listed".to_string())],
        reject_creates: true,
        ..StubOptions::default()
    })
    .await?;
    let config = stub_config(&stub)?;

    let run = run_suite(&config, &Pipeline::standard()).await?;
    reporter.artifacts().write_json("report.json", &run.report)?;

    for name in ["create_food", "edit_food_title", "delete_food"] {
        if step_status(&run.report, name)? != StepStatus::Fail {
            return Err(format!("{name} should fail when create is rejected").into());
        }
    }
    for name in
        ["list_foods", "create_food_missing_fields", "edit_non_existing_food", "delete_non_existing_food"]
    {
        if step_status(&run.report, name)? != StepStatus::Pass {
            return Err(format!("{name} should not depend on the create step").into());
        }
    }
    for name in ["edit_food_title", "delete_food"] {
        if !step_notes(&run.report, name)?.iter().any(|note| note == MISSING_FOOD_ID_NOTE) {
            return Err(format!("{name} should note the missing food id").into());
        }
    }
    if run.report.failed_count() != 3 {
        return Err(format!("expected 3 failures, got {}", run.report.failed_count()).into());
    }
    if run.transcript.len() != 7 {
        return Err(format!("every step should still send one request, got {}", run.transcript.len()).into());
    }

    reporter.finish(
        "pass",
        vec!["create failure isolated to dependent steps".to_string()],
        vec!["summary.json".to_string(), "summary.md".to_string(), "report.json".to_string()],
    )?;
    drop(reporter);
    Ok(())
}

/// Runs the standard suite against a stub whose create reply is `status` with
/// `food_id`, and checks that no id was carried into steps 2 and 4.
async fn assert_create_reply_not_stored(
    test_name: &str,
    status: StatusCode,
    food_id: &str,
) -> TestResult {
    let mut reporter = TestReporter::new(test_name)?;
    let stub = spawn_foody_stub_with(StubOptions {
        seed_foods: vec![("Seeded".to_string(), "Already listed".to_string())],
        create_reply: Some((status, food_id.to_string())),
        ..StubOptions::default()
    })
    .await?;
    let config = stub_config(&stub)?;

    let run = run_suite(&config, &Pipeline::standard()).await?;
    reporter.artifacts().write_json("report.json", &run.report)?;
    reporter.artifacts().write_json("stub_requests.json", &stub.requests())?;

    for name in ["create_food", "edit_food_title", "delete_food"] {
        if step_status(&run.report, name)? != StepStatus::Fail {
            return Err(format!("{name} should fail when create replies {status}").into());
        }
    }
    for name in ["edit_food_title", "delete_food"] {
        if !step_notes(&run.report, name)?.iter().any(|note| note == MISSING_FOOD_ID_NOTE) {
            return Err(format!("{name} should note the missing food id").into());
        }
    }
    let paths: Vec<String> = stub.requests().into_iter().map(|request| request.path).collect();
    let edit_path = paths.get(1).map(String::as_str);
    let delete_path = paths.get(3).map(String::as_str);
    if edit_path != Some("/api/Food/Edit/") || delete_path != Some("/api/Food/Delete/") {
        return Err(format!("dependent steps used a stored id: {paths:?}").into());
    }

    reporter.finish(
        "pass",
        vec![format!("create reply {status} with foodId {food_id:?} was not stored")],
        vec![
            "summary.json".to_string(),
            "summary.md".to_string(),
            "report.json".to_string(),
            "stub_requests.json".to_string(),
        ],
    )?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn food_id_from_non_created_reply_is_not_stored() -> TestResult {
    assert_create_reply_not_stored(
        "food_id_from_non_created_reply_is_not_stored",
        StatusCode::OK,
        "food-42",
    )
    .await
}

#[tokio::test(flavor = "multi_thread")]
async fn sentinel_food_id_from_create_is_not_stored() -> TestResult {
    assert_create_reply_not_stored(
        "sentinel_food_id_from_create_is_not_stored",
        StatusCode::CREATED,
        "-1",
    )
    .await
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_food_id_from_create_is_not_stored() -> TestResult {
    assert_create_reply_not_stored(
        "blank_food_id_from_create_is_not_stored",
        StatusCode::CREATED,
        "  ",
    )
    .await
}

#[tokio::test(flavor = "multi_thread")]
async fn negative_steps_pass_without_prior_state() -> TestResult {
    let mut reporter = TestReporter::new("negative_steps_pass_without_prior_state")?;
    let stub = spawn_foody_stub().await?;
    let pipeline = Pipeline::new(vec![
        SuiteStep::DeleteNonExistingFood,
        SuiteStep::EditNonExistingFood,
        SuiteStep::CreateFoodMissingFields,
    ])?;

    let run = run_with_context(stub_context(&stub).await?, &pipeline).await;
    if !run.report.passed() {
        return Err(format!("negative steps should pass:\n{}", run.report.render_text()).into());
    }
    let paths: Vec<String> = stub.requests().into_iter().map(|request| request.path).collect();
    let expected = ["/api/Food/Delete/-1", "/api/Food/Edit/-1", "/api/Food/Create"];
    if paths != expected {
        return Err(format!("unexpected request paths: {paths:?}").into());
    }
    if !stub.foods().is_empty() {
        return Err("invalid create must not store a food".into());
    }

    reporter.finish(
        "pass",
        vec!["sentinel and validation steps are order independent".to_string()],
        vec!["summary.json".to_string(), "summary.md".to_string()],
    )?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn misordered_pipeline_is_rejected_before_any_request() -> TestResult {
    let mut reporter = TestReporter::new("misordered_pipeline_is_rejected_before_any_request")?;
    let stub = spawn_foody_stub().await?;

    let result = Pipeline::new(vec![SuiteStep::EditFoodTitle, SuiteStep::CreateFood]);
    let expected = PipelineError::UnsatisfiedDependency {
        position: 1,
        step: "edit_food_title",
        key: StateKey::LastCreatedFoodId,
    };
    if result != Err(expected) {
        return Err(format!("expected unsatisfied dependency, got {result:?}").into());
    }
    if !stub.requests().is_empty() {
        return Err("no request may be sent for a rejected pipeline".into());
    }

    reporter.finish(
        "pass",
        vec!["misordered pipeline rejected up front".to_string()],
        vec!["summary.json".to_string(), "summary.md".to_string()],
    )?;
    drop(reporter);
    Ok(())
}
