//! Assertion helpers for headless scenarios.

use crate::host::HostSnapshot;

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_visible(expected: bool, snapshot: &HostSnapshot) -> AssertionResult {
    if snapshot.visible == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "visibility_mismatch",
            format!("expected visible={expected}, got {}", snapshot.visible),
        )
    }
}

fn evaluate_close(
    code: &str,
    name: &str,
    expected: f32,
    actual: f32,
    tolerance: f32,
) -> AssertionResult {
    if (actual - expected).abs() <= tolerance {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            code,
            format!("{name}: expected {expected} ± {tolerance}, got {actual}"),
        )
    }
}

pub fn evaluate_sheet_offset(
    expected: f32,
    tolerance: f32,
    snapshot: &HostSnapshot,
) -> AssertionResult {
    evaluate_close(
        "offset_mismatch",
        "sheet offset",
        expected,
        snapshot.sheet_offset,
        tolerance,
    )
}

pub fn evaluate_backdrop_opacity(
    expected: f32,
    tolerance: f32,
    snapshot: &HostSnapshot,
) -> AssertionResult {
    evaluate_close(
        "opacity_mismatch",
        "backdrop opacity",
        expected,
        snapshot.backdrop_opacity,
        tolerance,
    )
}

pub fn evaluate_settled(snapshot: &HostSnapshot) -> AssertionResult {
    if snapshot.settled {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "not_settled",
            format!(
                "animations still running (offset {}, opacity {})",
                snapshot.sheet_offset, snapshot.backdrop_opacity
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> HostSnapshot {
        HostSnapshot {
            visible: true,
            dragging: false,
            sheet_offset: 0.2,
            backdrop_opacity: 0.5,
            sheet_height: 800.0,
            settled: false,
        }
    }

    #[test]
    fn test_close_values_pass() {
        assert_eq!(evaluate_sheet_offset(0.0, 0.5, &snapshot()), AssertionResult::Passed);
        assert_eq!(evaluate_backdrop_opacity(0.5, 0.01, &snapshot()), AssertionResult::Passed);
        assert_eq!(evaluate_visible(true, &snapshot()), AssertionResult::Passed);
    }

    #[test]
    fn test_failures_carry_codes() {
        let AssertionResult::Failed { code, message } = evaluate_sheet_offset(800.0, 0.5, &snapshot())
        else {
            panic!("expected failure");
        };
        assert_eq!(code, "offset_mismatch");
        assert!(message.contains("800"));

        assert!(matches!(
            evaluate_settled(&snapshot()),
            AssertionResult::Failed { ref code, .. } if code == "not_settled"
        ));
    }
}
