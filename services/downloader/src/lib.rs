//! GOES archive fetcher.
//!
//! Library half of the `get-goes`, `domain-reduce` and `fix-wavelengths`
//! binaries:
//! - [`cli`]: argument definitions and logging setup
//! - [`config`]: lookup tables and the validated fetch plan
//! - [`orchestrator`]: concurrent download and correction units
//! - [`gridsat`]: legacy GOES-N downloads
//! - [`prompt`]: pre-download confirmation

pub mod cli;
pub mod config;
pub mod gridsat;
pub mod orchestrator;
pub mod prompt;

pub use config::{Archive, FetchPlan, Tables};
pub use orchestrator::{BatchReport, Orchestrator, UnitReport, WorkerPool};
