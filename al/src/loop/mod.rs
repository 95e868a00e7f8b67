//! Agent loop
//!
//! The engine runs prompt → LLM → action → tool → repeat until the model
//! calls `terminate` or the iteration cap is hit. Unlike a fresh-context
//! loop, the whole conversation is kept in memory and replayed each call.

mod config;
mod engine;
mod memory;

pub use config::LoopConfig;
pub use engine::{LoopEngine, LoopEvent, LoopOutcome, LoopStatus};
pub use memory::Memory;
