//! Statistics for the evolutionary search.
//!
//! This crate is deliberately dependency-free. It provides:
//!
//! - [`descriptive`]: summary statistics (min, max, mean, median, variance)
//!   over `f32` datasets, used for per-generation fitness and completion
//!   aggregates
//! - [`generation`]: the append-only per-generation record emitted by the
//!   search loop
//! - [`recorder`]: the stats sink interface plus a CSV implementation and an
//!   in-memory implementation for tests
//!
//! # Examples
//!
//! ```
//! use oxiplat_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub use self::{descriptive::*, generation::*, recorder::*};

pub mod descriptive;
pub mod generation;
pub mod recorder;
