//! CLI module graph.

pub mod cleanup;
pub mod command;
pub mod diagnostic;
pub mod output;
pub mod paths;
pub mod serve;
pub mod startup;
