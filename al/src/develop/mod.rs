//! Function developer
//!
//! A fixed three-step prompt chain (implement, document, test) over a single
//! conversation. The documented function and its tests are written to one file.

mod developer;
mod filename;

pub use developer::{DevelopEvent, DevelopOutcome, DevelopStep, FunctionDeveloper};
pub use filename::{MAX_STEM_CHARS, build_filename};
