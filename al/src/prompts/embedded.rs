//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Agent loop system prompt
pub const AGENT: &str = include_str!("../../prompts/agent.pmt");

/// Function developer system prompt
pub const DEVELOP_SYSTEM: &str = include_str!("../../prompts/develop-system.pmt");

/// Function developer step 1
pub const DEVELOP_IMPLEMENT: &str = include_str!("../../prompts/develop-implement.pmt");

/// Function developer step 2
pub const DEVELOP_DOCUMENT: &str = include_str!("../../prompts/develop-document.pmt");

/// Function developer step 3
pub const DEVELOP_TEST: &str = include_str!("../../prompts/develop-test.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "agent" => Some(AGENT),
        "develop-system" => Some(DEVELOP_SYSTEM),
        "develop-implement" => Some(DEVELOP_IMPLEMENT),
        "develop-document" => Some(DEVELOP_DOCUMENT),
        "develop-test" => Some(DEVELOP_TEST),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
