//! Document driver.
//!
//! Walks every `mission` and `event` declaration of the loaded files, feeds
//! their blocks to the condition and effect compilers, and finishes the graph.

use es_datafile::{DataFile, DataNode};
use log::{info, warn};

use crate::config::GrapherConfig;
use crate::error::GraphError;
use crate::graph::{Attrs, escape_html};
use crate::resolve::event_key;
use crate::session::GraphSession;

/// Compile the missions and then the events of all `files` into graph text.
///
/// # Errors
/// Fails on a malformed effect block; nothing is rendered in that case.
pub fn compile_files(files: &[DataFile], config: &GrapherConfig) -> Result<String, GraphError> {
    let mut session = GraphSession::new(config);
    for mission in files.iter().flat_map(|f| f.nodes_by_first("mission")) {
        session.add_mission(mission)?;
    }
    for event in files.iter().flat_map(|f| f.nodes_by_first("event")) {
        session.add_event(event);
    }
    info!("{} missions and {} events walked", session.missions, session.events);
    Ok(session.finish())
}

/// Parse `source` as one data file and compile it.
///
/// # Errors
/// Fails if the text cannot be parsed or contains a malformed effect block.
pub fn compile_str(source: &str, config: &GrapherConfig) -> Result<String, GraphError> {
    let file = DataFile::parse(source)?;
    compile_files(std::slice::from_ref(&file), config)
}

impl GraphSession<'_> {
    /// Declare a mission node and compile its `to offer` and `on` blocks.
    ///
    /// # Errors
    /// Propagates [`GraphError::MalformedEffect`] from the effect compiler.
    pub fn add_mission(&mut self, mission: &DataNode) -> Result<(), GraphError> {
        let config = self.config;
        let Some(name) = mission.token(1) else {
            warn!("line {}: mission without a name skipped", mission.line());
            return Ok(());
        };
        if self.define(name) {
            let fill = if mission.has_child(&["job"]) {
                &config.colors.job
            } else {
                &config.colors.mission
            };
            self.graph.node(name, &Attrs::new().label(name).fill(fill));
        } else {
            warn!("line {}: mission '{name}' declared more than once", mission.line());
        }
        for offer in mission.children_matching(&["to", "offer"]) {
            self.compile_condition(offer, name);
        }
        for block in mission.children_by_first("on") {
            self.compile_effect(block, name)?;
        }
        self.missions += 1;
        Ok(())
    }

    /// Declare an event node, labeled with its body when `show_event_code` is on.
    pub fn add_event(&mut self, event: &DataNode) {
        let config = self.config;
        let Some(name) = event.token(1) else {
            warn!("line {}: event without a name skipped", event.line());
            return;
        };
        let key = event_key(name);
        if !self.define(&key) {
            warn!("line {}: event '{name}' declared more than once", event.line());
            return;
        }
        let attrs = if config.show_event_code {
            Attrs::new().html_label(&event_code_label(name, event))
        } else {
            Attrs::new().label(name)
        };
        self.graph.node(&key, &attrs.fill(&config.colors.event));
        self.events += 1;
    }
}

/// The event name followed by its body in a small monospace font, one
/// left-aligned line per source line.
fn event_code_label(name: &str, event: &DataNode) -> String {
    const BREAK: &str = "<BR ALIGN=\"LEFT\"/>";
    let mut html = escape_html(name);
    html.push_str(BREAK);
    html.push_str("<FONT FACE=\"Courier New\" POINT-SIZE=\"7\">");
    for child in event.children() {
        for line in child.to_text().lines() {
            html.push_str(&escape_html(line));
            html.push_str(BREAK);
        }
    }
    html.push_str("</FONT>");
    html
}
