#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! Compiles Endless Sky mission and event data into a Graphviz digraph of
//! the dependencies between missions, events, conditions, and variables.

pub const GRAPHER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod classify;
pub mod condition;
pub mod config;
pub mod driver;
pub mod effect;
pub mod error;
pub mod fingerprint;
pub mod graph;
pub mod resolve;
pub mod session;
pub mod source;

pub use config::{GrapherConfig, Palette, load_config};
pub use driver::{compile_files, compile_str};
pub use error::GraphError;
pub use session::GraphSession;
pub use source::{load_input, write_output};
