//! Command handlers, one per phase of an invocation.

pub mod create;
pub mod self_update;
