//! node.rs -- `DataNode` Module
//!
//! A data file is a forest of nodes. Each node is one line of tokens plus the
//! lines indented beneath it. What a node means is decided by its first token
//! (sometimes the second); children only mean something in context of the parent.

use std::borrow::Cow;
use std::fmt;

/// One line of a data file along with everything indented beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataNode {
    tokens: Vec<String>,
    children: Vec<DataNode>,
    line: usize,
}

impl DataNode {
    /// Build a detached node from its tokens.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            children: Vec::new(),
            line: 0,
        }
    }

    /// Builder-style helper to append a child node.
    #[must_use]
    pub fn with_child(mut self, child: DataNode) -> Self {
        self.children.push(child);
        self
    }

    /// Record the 1-based source line this node was read from.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub(crate) fn push_child(&mut self, child: DataNode) {
        self.children.push(child);
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The token at `index`, if the line is long enough.
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Number of tokens on this line.
    pub fn size(&self) -> usize {
        self.tokens.len()
    }

    pub fn children(&self) -> &[DataNode] {
        &self.children
    }

    /// 1-based source line, or 0 for nodes built in memory.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Children whose first token equals `first`.
    pub fn children_by_first<'a>(&'a self, first: &'a str) -> impl Iterator<Item = &'a DataNode> + 'a {
        self.children.iter().filter(move |c| c.token(0) == Some(first))
    }

    /// Children whose entire token list equals `tokens`.
    pub fn children_matching<'a>(&'a self, tokens: &'a [&'a str]) -> impl Iterator<Item = &'a DataNode> + 'a {
        self.children.iter().filter(move |c| c.tokens.iter().map(String::as_str).eq(tokens.iter().copied()))
    }

    pub fn has_child(&self, tokens: &[&str]) -> bool {
        self.children_matching(tokens).next().is_some()
    }

    /// Tokens rendered with [`escape_token`] and joined by single spaces.
    pub fn render_tokens(&self) -> String {
        render_tokens(&self.tokens)
    }

    /// Canonical text of this node and its subtree, one tab per depth level.
    ///
    /// Reading the result back produces an equal tree.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out, 0);
        out
    }

    fn write_text(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push('\t');
        }
        out.push_str(&self.render_tokens());
        out.push('\n');
        for child in &self.children {
            child.write_text(out, depth + 1);
        }
    }
}

impl fmt::Display for DataNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Escape tokens with spaces, tabs, or newlines in them so they survive a re-read.
pub fn render_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|t| escape_token(t.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote a token for output if it would not otherwise read back as one token.
///
/// Tokens with no whitespace are returned as-is. Otherwise the token is wrapped in
/// double quotes, or in backticks when it already contains a double quote (any
/// backticks inside are then written as `` \` ``).
///
/// ```
/// use es_datafile::escape_token;
///
/// assert_eq!(escape_token("offer"), "offer");
/// assert_eq!(escape_token("cargo space"), "\"cargo space\"");
/// assert_eq!(escape_token("say \"hi\""), "`say \"hi\"`");
/// ```
pub fn escape_token(token: &str) -> Cow<'_, str> {
    let needs_quotes = token.is_empty() || token.chars().any(|c| matches!(c, ' ' | '\t' | '\n'));
    if !needs_quotes {
        return Cow::Borrowed(token);
    }
    if token.contains('"') {
        Cow::Owned(format!("`{}`", token.replace('`', "\\`")))
    } else {
        Cow::Owned(format!("\"{token}\""))
    }
}

/// Inverse of [`escape_token`].
///
/// Strips one pair of matching delimiters and unescapes the delimiter inside.
/// Text without delimiters is returned unchanged.
pub fn unescape_token(text: &str) -> String {
    for delim in ['"', '`'] {
        if text.len() >= 2 && text.starts_with(delim) && text.ends_with(delim) {
            let inner = &text[1..text.len() - 1];
            return inner.replace(&format!("\\{delim}"), &delim.to_string());
        }
    }
    text.to_string()
}
