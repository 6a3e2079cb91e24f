//! dragsheet Application
//!
//! The demo host around the modal sheet and the tooling that drives it
//! without a window:
//!
//! - [`config`]: `dragsheet.toml` loading with per-section defaults
//! - [`host`]: the screen that owns `is_shown`, a "Show Modal" button and a
//!   fullscreen modal
//! - headless scenarios: JSON step lists run on a fixed frame clock, producing
//!   a machine-readable report

pub mod config;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_scenario;
pub mod host;

pub use config::AppConfig;
pub use headless_report::{ReportStatus, ScenarioReport};
pub use headless_runner::{run_scenario, RunOutcome, ScenarioRunner};
pub use headless_scenario::{HeadlessScenario, ScenarioStep};
pub use host::{ContentView, HostFrame, HostSnapshot, TextContent};
