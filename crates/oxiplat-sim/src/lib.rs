//! Simulation-facing contract for the evolutionary input-sequence search.
//!
//! This crate defines everything the search core needs to talk to a platformer
//! simulator without depending on any concrete simulator implementation:
//!
//! - [`ControlVector`] / [`ControlChannel`]: the per-tick boolean input model
//! - [`Course`]: the opaque level descriptor handed to the simulator
//! - [`RunSummary`] / [`TerminalStatus`]: the structured outcome of one run
//! - [`SimulationOracle`]: the injected capability that executes a sequence
//! - [`ActionPlayer`]: the playback interface backed by an evolved sequence
//! - [`SyntheticOracle`]: a deterministic stand-in simulator for tests and
//!   offline runs
//!
//! The real game engine is an external collaborator; implementations of
//! [`SimulationOracle`] adapt it to this contract. The synthetic oracle in
//! this crate is a purely arithmetic course-walk model, not a physics engine.

pub use self::{control::*, course::*, oracle::*, playback::*, summary::*, synthetic::*};

pub mod control;
pub mod course;
pub mod oracle;
pub mod playback;
pub mod summary;
pub mod synthetic;
