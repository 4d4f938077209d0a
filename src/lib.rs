//! depscope - installed npm dependency graph explorer
//!
//! This crate walks a project's `node_modules` tree, matches every declared
//! dependency to the installed package that satisfies it, and reports the
//! resulting graph with duplicate-version and circular-edge markers.

pub mod analyze;
pub mod app;
pub mod export;
pub mod graph;
pub mod logger;
pub mod parser;
pub mod resolver;
pub mod server;
