//! Scenario runner that drives the demo host on a deterministic clock.

use crate::config::AppConfig;
use crate::headless_assert::{
    evaluate_backdrop_opacity, evaluate_settled, evaluate_sheet_offset, evaluate_visible,
    AssertionResult,
};
use crate::headless_report::ScenarioReport;
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use crate::host::ContentView;
use anyhow::{bail, Result};
use dragsheet_core::{PointerEvent, PointerPhase};

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: ScenarioReport },
    Failed { report: ScenarioReport },
}

impl RunOutcome {
    pub fn report(&self) -> &ScenarioReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn into_report(self) -> ScenarioReport {
        match self {
            RunOutcome::Passed { report } | RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON against a fresh host built from `config`.
pub fn run_scenario(input: &str, config: &AppConfig) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    let mut runner = ScenarioRunner::new(config)?;
    Ok(runner.run(&scenario))
}

/// Host plus a logical clock advanced in fixed frames
pub struct ScenarioRunner {
    host: ContentView,
    tick_ms: u64,
    elapsed_frames: u64,
    elapsed_ms: u64,
}

impl ScenarioRunner {
    pub fn new(config: &AppConfig) -> Result<Self> {
        if config.headless.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }
        Ok(Self {
            host: ContentView::new(config),
            tick_ms: config.headless.tick_ms,
            elapsed_frames: 0,
            elapsed_ms: 0,
        })
    }

    pub fn host(&self) -> &ContentView {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut ContentView {
        &mut self.host
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn elapsed_frames(&self) -> u64 {
        self.elapsed_frames
    }

    fn frame(&mut self) {
        self.host.tick(self.tick_ms as f32 / 1000.0);
        self.elapsed_frames = self.elapsed_frames.saturating_add(1);
        self.elapsed_ms = self.elapsed_ms.saturating_add(self.tick_ms);
    }

    fn run_frames(&mut self, frames: u32) {
        for _ in 0..frames {
            self.frame();
        }
    }

    fn advance_to(&mut self, at_ms: u64) {
        while self.elapsed_ms < at_ms {
            self.frame();
        }
    }

    fn pointer(&mut self, phase: PointerPhase, x: f32, y: f32, at_ms: Option<u64>) {
        if let Some(at_ms) = at_ms {
            self.advance_to(at_ms);
        }
        let timestamp = at_ms.unwrap_or(self.elapsed_ms);
        let response = self
            .host
            .dispatch(&PointerEvent::new(phase, x, y, timestamp));
        tracing::trace!(?phase, x, y, timestamp, ?response, "pointer dispatched");
    }

    fn drag(&mut self, x: f32, y: f32, dy: f32, duration_ms: u64) {
        self.pointer(PointerPhase::Down, x, y, None);
        let frames = wait_frames(duration_ms, self.tick_ms).max(1);
        for frame in 1..=frames {
            self.frame();
            let progress = frame as f32 / frames as f32;
            self.pointer(PointerPhase::Move, x, y + dy * progress, None);
        }
        self.pointer(PointerPhase::Up, x, y + dy, None);
    }

    fn check(&self, step: &ScenarioStep) -> AssertionResult {
        let snapshot = self.host.snapshot();
        match step {
            ScenarioStep::AssertVisible { expected } => evaluate_visible(*expected, &snapshot),
            ScenarioStep::AssertSheetOffset {
                expected,
                tolerance,
            } => evaluate_sheet_offset(*expected, *tolerance, &snapshot),
            ScenarioStep::AssertBackdropOpacity {
                expected,
                tolerance,
            } => evaluate_backdrop_opacity(*expected, *tolerance, &snapshot),
            ScenarioStep::AssertSettled => evaluate_settled(&snapshot),
            _ => AssertionResult::Passed,
        }
    }

    /// Run every step, stopping at the first failed assertion
    pub fn run(&mut self, scenario: &HeadlessScenario) -> RunOutcome {
        for (step_index, step) in scenario.steps.iter().enumerate() {
            tracing::debug!(step_index, kind = step.kind(), "scenario step");
            match step {
                ScenarioStep::Toggle => self.host.toggle(),
                ScenarioStep::Resize { width, height } => self.host.resize(*width, *height),
                ScenarioStep::PointerDown { x, y, at_ms } => {
                    self.pointer(PointerPhase::Down, *x, *y, *at_ms)
                }
                ScenarioStep::PointerMove { x, y, at_ms } => {
                    self.pointer(PointerPhase::Move, *x, *y, *at_ms)
                }
                ScenarioStep::PointerUp { x, y, at_ms } => {
                    self.pointer(PointerPhase::Up, *x, *y, *at_ms)
                }
                ScenarioStep::PointerCancel { x, y, at_ms } => {
                    self.pointer(PointerPhase::Cancel, *x, *y, *at_ms)
                }
                ScenarioStep::Tap { x, y } => {
                    self.pointer(PointerPhase::Down, *x, *y, None);
                    self.pointer(PointerPhase::Up, *x, *y, None);
                }
                ScenarioStep::Drag {
                    x,
                    y,
                    dy,
                    duration_ms,
                } => self.drag(*x, *y, *dy, *duration_ms),
                ScenarioStep::Tick { frames } => self.run_frames(*frames),
                ScenarioStep::Wait { ms } => self.run_frames(wait_frames(*ms, self.tick_ms)),
                ScenarioStep::AssertVisible { .. }
                | ScenarioStep::AssertSheetOffset { .. }
                | ScenarioStep::AssertBackdropOpacity { .. }
                | ScenarioStep::AssertSettled => {
                    if let AssertionResult::Failed { code, message } = self.check(step) {
                        tracing::info!(step_index, %code, %message, "scenario assertion failed");
                        let report = ScenarioReport::failed(
                            step.kind(),
                            step_index,
                            code,
                            message,
                            self.elapsed_frames,
                            self.elapsed_ms,
                        )
                        .named(scenario.name.clone());
                        return RunOutcome::Failed { report };
                    }
                }
            }
        }

        RunOutcome::Passed {
            report: ScenarioReport::passed(
                scenario.steps.len(),
                self.elapsed_frames,
                self.elapsed_ms,
            )
            .named(scenario.name.clone()),
        }
    }
}

fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_rounds_up_to_whole_frames() {
        assert_eq!(wait_frames(0, 16), 0);
        assert_eq!(wait_frames(1, 16), 1);
        assert_eq!(wait_frames(16, 16), 1);
        assert_eq!(wait_frames(300, 16), 19);
    }

    #[test]
    fn test_pointer_at_ms_advances_clock() {
        let mut runner = ScenarioRunner::new(&AppConfig::default()).unwrap();
        runner.pointer(PointerPhase::Down, 10.0, 10.0, Some(100));
        assert!(runner.elapsed_ms() >= 100);
        assert_eq!(runner.elapsed_frames(), 7);
    }

    #[test]
    fn test_zero_tick_is_rejected() {
        let mut config = AppConfig::default();
        config.headless.tick_ms = 0;
        assert!(ScenarioRunner::new(&config).is_err());
    }
}
