//! session.rs -- `GraphSession` Module
//!
//! All state of one compilation: the graph buffer plus the accumulators the
//! condition and effect compilers write into. The walk over declarations
//! fills the accumulators; [`GraphSession::finish`] resolves external
//! references from them and renders the graph.

use std::collections::HashSet;

use log::info;

use crate::config::GrapherConfig;
use crate::graph::{Attrs, GraphWriter};
use crate::resolve::{Mention, PlaceholderKind, resolve_externals};

/// One compilation run. Not shared between runs.
#[derive(Debug)]
pub struct GraphSession<'c> {
    pub(crate) config: &'c GrapherConfig,
    /// Statements written so far.
    pub(crate) graph: GraphWriter,
    /// Names referenced by conditions and effects, in order of appearance.
    mentioned: Vec<Mention>,
    /// Declared mission names and `event: ` keys.
    defined: HashSet<String>,
    /// Keys of synthesized nodes (groups, expressions, placeholders).
    emitted: HashSet<String>,
    /// Missions walked.
    pub(crate) missions: usize,
    /// Events walked.
    pub(crate) events: usize,
}

impl<'c> GraphSession<'c> {
    pub fn new(config: &'c GrapherConfig) -> Self {
        Self {
            config,
            graph: GraphWriter::new(),
            mentioned: Vec::new(),
            defined: HashSet::new(),
            emitted: HashSet::new(),
            missions: 0,
            events: 0,
        }
    }

    pub(crate) fn mention(&mut self, mention: Mention) {
        self.mentioned.push(mention);
    }

    /// Register a declared key. Returns false if it was already declared.
    pub(crate) fn define(&mut self, key: &str) -> bool {
        self.defined.insert(key.to_string())
    }

    /// Mark a synthesized key as having a node. Returns true the first time only.
    pub(crate) fn mark_emitted(&mut self, key: &str) -> bool {
        self.emitted.insert(key.to_string())
    }

    /// Everything mentioned so far, in order, duplicates included.
    pub fn mentioned(&self) -> &[Mention] {
        &self.mentioned
    }

    pub fn is_defined(&self, key: &str) -> bool {
        self.defined.contains(key)
    }

    /// Statements emitted so far.
    pub fn body(&self) -> &str {
        self.graph.body()
    }

    /// Add placeholders for undeclared mentions and render the finished graph.
    pub fn finish(mut self) -> String {
        let colors = &self.config.colors;
        let placeholders = resolve_externals(&self.mentioned, &self.defined, &self.emitted);
        for placeholder in &placeholders {
            let fill = match placeholder.kind {
                PlaceholderKind::Event => &colors.event,
                PlaceholderKind::Mission => &colors.mission,
                PlaceholderKind::Variable => &colors.variable,
            };
            self.graph.node(&placeholder.key, &Attrs::new().label(&placeholder.label).fill(fill));
            self.emitted.insert(placeholder.key.clone());
        }
        info!(
            "graph compiled: {} missions, {} events, {} external placeholders, {} nodes, {} edges",
            self.missions,
            self.events,
            placeholders.len(),
            self.graph.node_count(),
            self.graph.edge_count()
        );
        self.graph.finish()
    }
}
