//! Request handlers.

pub mod relay;
