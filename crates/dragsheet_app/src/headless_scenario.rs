//! Scenario definition for headless runs of the demo host.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Sequence of steps executed against a fresh host.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("Failed to parse scenario")
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid scenario {}", path.display()))
    }
}

fn default_drag_duration_ms() -> u64 {
    300
}

fn default_offset_tolerance() -> f32 {
    0.5
}

fn default_opacity_tolerance() -> f32 {
    0.01
}

/// One scenario step.
///
/// Pointer steps take an optional `at_ms`: the run clock advances frame by
/// frame until it reaches that time before the event is delivered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Flip `is_shown`, as the host button does
    Toggle,
    Resize {
        width: f32,
        height: f32,
    },
    PointerDown {
        x: f32,
        y: f32,
        #[serde(default)]
        at_ms: Option<u64>,
    },
    PointerMove {
        x: f32,
        y: f32,
        #[serde(default)]
        at_ms: Option<u64>,
    },
    PointerUp {
        x: f32,
        y: f32,
        #[serde(default)]
        at_ms: Option<u64>,
    },
    PointerCancel {
        x: f32,
        y: f32,
        #[serde(default)]
        at_ms: Option<u64>,
    },
    /// Press and release at one point
    Tap {
        x: f32,
        y: f32,
    },
    /// Press at (x, y), move by `dy` at constant speed over `duration_ms`, release
    Drag {
        x: f32,
        y: f32,
        dy: f32,
        #[serde(default = "default_drag_duration_ms")]
        duration_ms: u64,
    },
    Tick {
        frames: u32,
    },
    Wait {
        ms: u64,
    },
    AssertVisible {
        expected: bool,
    },
    AssertSheetOffset {
        expected: f32,
        #[serde(default = "default_offset_tolerance")]
        tolerance: f32,
    },
    AssertBackdropOpacity {
        expected: f32,
        #[serde(default = "default_opacity_tolerance")]
        tolerance: f32,
    },
    AssertSettled,
}

impl ScenarioStep {
    /// Name used in failure reports
    pub fn kind(&self) -> &'static str {
        match self {
            ScenarioStep::Toggle => "toggle",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::PointerDown { .. } => "pointer_down",
            ScenarioStep::PointerMove { .. } => "pointer_move",
            ScenarioStep::PointerUp { .. } => "pointer_up",
            ScenarioStep::PointerCancel { .. } => "pointer_cancel",
            ScenarioStep::Tap { .. } => "tap",
            ScenarioStep::Drag { .. } => "drag",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::AssertVisible { .. } => "assert_visible",
            ScenarioStep::AssertSheetOffset { .. } => "assert_sheet_offset",
            ScenarioStep::AssertBackdropOpacity { .. } => "assert_backdrop_opacity",
            ScenarioStep::AssertSettled => "assert_settled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps_with_defaults() {
        let scenario = HeadlessScenario::from_json(
            r#"{
                "name": "drag to dismiss",
                "steps": [
                    { "type": "toggle" },
                    { "type": "drag", "x": 195, "y": 300, "dy": 600 },
                    { "type": "pointer_down", "x": 1, "y": 2, "at_ms": 40 },
                    { "type": "assert_sheet_offset", "expected": 800 },
                    { "type": "assert_settled" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.name.as_deref(), Some("drag to dismiss"));
        assert_eq!(scenario.steps[0], ScenarioStep::Toggle);
        assert_eq!(
            scenario.steps[1],
            ScenarioStep::Drag {
                x: 195.0,
                y: 300.0,
                dy: 600.0,
                duration_ms: 300
            }
        );
        assert_eq!(
            scenario.steps[2],
            ScenarioStep::PointerDown {
                x: 1.0,
                y: 2.0,
                at_ms: Some(40)
            }
        );
        assert_eq!(
            scenario.steps[3],
            ScenarioStep::AssertSheetOffset {
                expected: 800.0,
                tolerance: 0.5
            }
        );
        assert_eq!(scenario.steps[4].kind(), "assert_settled");
    }

    #[test]
    fn test_unknown_step_is_rejected() {
        let result = HeadlessScenario::from_json(r#"{ "steps": [{ "type": "fly" }] }"#);
        assert!(result.is_err());
    }
}
