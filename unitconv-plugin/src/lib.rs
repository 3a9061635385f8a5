//! unitconv Plugin System
//!
//! Conversion functions are exposed as pure function plugins, collected in a
//! registry that callers (the MCP server, tests) look functions up in by name.

mod traits;
mod registry;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::PluginRegistry;

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{FunctionPlugin, FunctionMeta, ArgMeta, PluginRegistry};
    pub use unitconv_core::prelude::*;
}
