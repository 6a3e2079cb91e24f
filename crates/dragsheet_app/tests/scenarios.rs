//! Integration tests for headless scenario runs against the demo host
//!
//! These tests verify that:
//! - The bundled scenarios pass with the default configuration
//! - Failing assertions produce a report pointing at the failing step
//! - Configuration changes flow through to the host

use dragsheet_app::{run_scenario, AppConfig, ReportStatus};

fn run_bundled(input: &str) {
    let outcome = run_scenario(input, &AppConfig::default()).unwrap();
    let report = outcome.report();
    assert!(
        !outcome.is_failed(),
        "scenario {:?} failed at step {:?}: {:?}",
        report.scenario,
        report.failed_step_index,
        report.message
    );
    assert_eq!(report.status, ReportStatus::Passed);
}

#[test]
fn test_show_and_drag_dismiss() {
    run_bundled(include_str!("../scenarios/show_and_drag_dismiss.json"));
}

#[test]
fn test_backdrop_tap() {
    run_bundled(include_str!("../scenarios/backdrop_tap.json"));
}

#[test]
fn test_short_drag_returns() {
    run_bundled(include_str!("../scenarios/short_drag_returns.json"));
}

#[test]
fn test_failed_assertion_reports_step() {
    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "toggle" },
                { "type": "tick", "frames": 1 },
                { "type": "assert_settled" }
            ]
        }"#,
        &AppConfig::default(),
    )
    .unwrap();

    assert!(outcome.is_failed());
    let report = outcome.report();
    assert_eq!(report.failed_step_index, Some(2));
    assert_eq!(report.assertion.as_deref(), Some("assert_settled"));
    assert_eq!(report.code.as_deref(), Some("not_settled"));
    assert_eq!(report.elapsed_frames, 1);
}

#[test]
fn test_hidden_modal_passes_taps_to_button() {
    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "tap", "x": 195, "y": 422 },
                { "type": "assert_visible", "expected": true },
                { "type": "wait", "ms": 2000 },
                { "type": "tap", "x": 195, "y": 20 },
                { "type": "assert_visible", "expected": false },
                { "type": "wait", "ms": 2000 },
                { "type": "tap", "x": 195, "y": 422 },
                { "type": "assert_visible", "expected": true }
            ]
        }"#,
        &AppConfig::default(),
    )
    .unwrap();
    assert!(!outcome.is_failed(), "{:?}", outcome.report().message);
}

#[test]
fn test_config_sizes_the_sheet() {
    let config = AppConfig::from_toml_str(
        r#"
        [modal]
        size = "regular"
        "#,
    )
    .unwrap();

    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "wait", "ms": 100 },
                { "type": "assert_sheet_offset", "expected": 422 },
                { "type": "toggle" },
                { "type": "wait", "ms": 2000 },
                { "type": "drag", "x": 195, "y": 500, "dy": 100, "duration_ms": 1000 },
                { "type": "assert_visible", "expected": true },
                { "type": "resize", "width": 844, "height": 390 },
                { "type": "toggle" },
                { "type": "wait", "ms": 2000 },
                { "type": "assert_sheet_offset", "expected": 195 }
            ]
        }"#,
        &config,
    )
    .unwrap();
    assert!(!outcome.is_failed(), "{:?}", outcome.report().message);
}
