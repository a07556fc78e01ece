//! Token-tree model and reader for indented game data files.

pub mod node;
pub mod parser;

pub use node::{DataNode, escape_token, render_tokens, unescape_token};
pub use parser::{DataFile, ParseError};
