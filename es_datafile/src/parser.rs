//! Reader for indented data files.
//!
//! The pest grammar only splits lines into tokens; the tree is rebuilt here
//! from indentation widths. Each whitespace character of indentation counts as
//! one level, and a line becomes a child of the closest earlier line with a
//! smaller indent.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser as PestParser;

use crate::node::{DataNode, unescape_token};

#[derive(PestParser)]
#[grammar = "src/datafile.pest"]
struct DataFileParser;

/// Errors that can happen while reading a data file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unable to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Pest(String),
    #[error("unexpected grammar shape: {0}")]
    Shape(&'static str),
}

/// A parsed data file: its top-level nodes in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFile {
    nodes: Vec<DataNode>,
}

impl DataFile {
    /// Parse data file text.
    ///
    /// # Errors
    /// Returns an error if a line cannot be split into tokens.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let mut pairs = DataFileParser::parse(Rule::file, source).map_err(|e| ParseError::Pest(e.to_string()))?;
        let file = pairs.next().ok_or(ParseError::Shape("expected file"))?;

        let mut builder = TreeBuilder::default();
        for line in file.into_inner() {
            if line.as_rule() != Rule::line {
                continue;
            }
            if let Some((indent, node)) = read_line(line) {
                builder.push(indent, node);
            }
        }
        Ok(Self { nodes: builder.finish() })
    }

    /// Read and parse the file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Read everything from `reader` (typically standard input) and parse it.
    ///
    /// # Errors
    /// Returns an error if the reader fails or the text cannot be parsed.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, ParseError> {
        let mut source = String::new();
        reader.read_to_string(&mut source).map_err(|source| ParseError::Io {
            path: PathBuf::from("<stdin>"),
            source,
        })?;
        Self::parse(&source)
    }

    pub fn from_nodes(nodes: Vec<DataNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[DataNode] {
        &self.nodes
    }

    /// Top-level nodes whose first token equals `first`.
    pub fn nodes_by_first<'a>(&'a self, first: &'a str) -> impl Iterator<Item = &'a DataNode> + 'a {
        self.nodes.iter().filter(move |n| n.token(0) == Some(first))
    }
}

impl<'a> IntoIterator for &'a DataFile {
    type Item = &'a DataNode;
    type IntoIter = std::slice::Iter<'a, DataNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Turn one `line` pair into its indent width and node; blank and comment-only lines yield `None`.
fn read_line(line: Pair<'_, Rule>) -> Option<(usize, DataNode)> {
    let line_no = line.as_span().start_pos().line_col().0;
    let mut indent = 0usize;
    let mut tokens = Vec::new();
    for part in line.into_inner() {
        match part.as_rule() {
            Rule::indent => indent = part.as_str().chars().count(),
            Rule::bare => tokens.push(part.as_str().to_string()),
            Rule::quoted | Rule::backticked => {
                let delim = if part.as_rule() == Rule::quoted { '"' } else { '`' };
                let inner = part.into_inner().next().map_or("", |p| p.as_str());
                tokens.push(unescape_token(&format!("{delim}{inner}{delim}")));
            },
            _ => {},
        }
    }
    if tokens.is_empty() {
        None
    } else {
        Some((indent, DataNode::new(tokens).at_line(line_no)))
    }
}

/// Stack of open nodes, each paired with its indent width.
#[derive(Default)]
struct TreeBuilder {
    roots: Vec<DataNode>,
    open: Vec<(usize, DataNode)>,
}

impl TreeBuilder {
    fn push(&mut self, indent: usize, node: DataNode) {
        while self.open.last().is_some_and(|(open_indent, _)| *open_indent >= indent) {
            self.close_top();
        }
        self.open.push((indent, node));
    }

    fn close_top(&mut self) {
        if let Some((_, done)) = self.open.pop() {
            match self.open.last_mut() {
                Some((_, parent)) => parent.push_child(done),
                None => self.roots.push(done),
            }
        }
    }

    fn finish(mut self) -> Vec<DataNode> {
        while !self.open.is_empty() {
            self.close_top();
        }
        self.roots
    }
}
