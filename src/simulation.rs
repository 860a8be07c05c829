//! Driving a titration experiment over time.
//!
//! [`SimulationController`] is the synchronous state machine behind the
//! manual-step and auto-titration controls. [`AutoTitrator`] runs it on a
//! Tokio timer and publishes [`TitrationEvent`]s to subscribers.

mod auto_run;
mod controller;
mod event;

pub use auto_run::{AutoRunConfig, AutoTitrator, COARSE_STEP_ML, FINE_STEP_ML};
pub use controller::{AutoRunState, RunState, SimulationController, Tick};
pub use event::TitrationEvent;
