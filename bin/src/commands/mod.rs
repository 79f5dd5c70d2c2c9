//! CLI command implementations.

pub(crate) mod config;
pub(crate) mod convert;
pub(crate) mod run;
