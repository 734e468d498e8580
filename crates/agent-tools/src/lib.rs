//! Tool management and execution framework for agent-rs
//!
//! This crate provides a framework for defining tools (functions) that
//! agents offer to a model. A [`ToolRegistry`] supplies both the tool
//! catalogue for a completion request and the executor for the tool-use
//! loop.

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::Tool;
