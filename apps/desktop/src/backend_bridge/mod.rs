//! Bridge between the session's command queue and the async backend worker.

pub mod commands;
pub mod runtime;
