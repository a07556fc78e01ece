//! Graphviz emitter.
//!
//! Statements accumulate in one buffer; [`GraphWriter::finish`] wraps them in
//! the fixed `digraph` template. Keys and labels are escaped here and nowhere
//! else, so callers always pass raw text.

use std::fmt::Write;

/// Accumulates node and edge statements for one graph.
#[derive(Debug, Default)]
pub struct GraphWriter {
    body: String,
    nodes: usize,
    edges: usize,
}

impl GraphWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `"key" [attrs];`.
    pub fn node(&mut self, key: &str, attrs: &Attrs) {
        self.nodes += 1;
        let _ = writeln!(self.body, "\t{} {};", quote(key), attrs.render());
    }

    /// Emit `"src" -> "dst" [attrs];`, dropping the brackets when there are no attributes.
    pub fn edge(&mut self, src: &str, dst: &str, attrs: &Attrs) {
        self.edges += 1;
        if attrs.is_empty() {
            let _ = writeln!(self.body, "\t{} -> {};", quote(src), quote(dst));
        } else {
            let _ = writeln!(self.body, "\t{} -> {} {};", quote(src), quote(dst), attrs.render());
        }
    }

    /// Statements emitted so far, without the surrounding template.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn node_count(&self) -> usize {
        self.nodes
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Wrap the accumulated statements in the graph template.
    pub fn finish(self) -> String {
        format!("digraph endlesssky {{\n\tnode [shape=box,style=filled];\n{}}}\n", self.body)
    }
}

/// Ordered attribute list for a node or edge statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    items: Vec<(&'static str, String)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quoted text label. Empty labels are left out.
    #[must_use]
    pub fn label(self, text: &str) -> Self {
        if text.is_empty() { self } else { self.with("label", quote(text)) }
    }

    /// HTML-like label; `html` must already be escaped.
    #[must_use]
    pub fn html_label(self, html: &str) -> Self {
        self.with("label", format!("<{html}>"))
    }

    #[must_use]
    pub fn fill(self, color: &str) -> Self {
        self.with("fillcolor", quote(color))
    }

    #[must_use]
    pub fn color(self, color: &str) -> Self {
        self.with("color", quote(color))
    }

    #[must_use]
    pub fn dashed(self) -> Self {
        self.with("style", "dashed".to_string())
    }

    /// Apply `dashed` only when `yes` holds.
    #[must_use]
    pub fn dashed_if(self, yes: bool) -> Self {
        if yes { self.dashed() } else { self }
    }

    #[must_use]
    pub fn no_arrowhead(self) -> Self {
        self.with("arrowhead", "none".to_string())
    }

    /// Let the box shrink to fit its label.
    #[must_use]
    pub fn auto_size(self) -> Self {
        self.with("fixedsize", quote("false"))
            .with("width", "0".to_string())
            .with("height", "0".to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn with(mut self, name: &'static str, value: String) -> Self {
        self.items.push((name, value));
        self
    }

    fn render(&self) -> String {
        let inner = self
            .items
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(",");
        format!("[{inner}]")
    }
}

/// Double-quote `text` for the graph language, escaping backslashes and quotes.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Escape text for use inside an HTML-like label.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
