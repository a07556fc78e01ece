//! Effect compiler.
//!
//! Renders an `on <trigger>` block into edges leaving the mission that owns
//! it. Edges for any trigger other than `complete` are dashed and labeled with
//! the trigger name.

use es_datafile::DataNode;
use log::{debug, warn};

use crate::classify::is_terminal_value;
use crate::error::GraphError;
use crate::graph::Attrs;
use crate::resolve::{Mention, event_key};
use crate::session::GraphSession;

/// How edges from one `on` block are decorated.
struct Trigger {
    label: String,
    dashed: bool,
}

impl Trigger {
    fn of(block: &DataNode) -> Self {
        match block.token(1) {
            None | Some("complete") => Self {
                label: String::new(),
                dashed: false,
            },
            Some(name) => Self {
                label: format!("on {name} "),
                dashed: true,
            },
        }
    }

    fn attrs(&self, detail: &str) -> Attrs {
        Attrs::new().dashed_if(self.dashed).label(&format!("{}{detail}", self.label))
    }
}

impl GraphSession<'_> {
    /// Emit the effects of one `on` block, starting from `source`.
    ///
    /// # Errors
    /// Returns [`GraphError::MalformedEffect`] if `block` does not start with `on`.
    pub fn compile_effect(&mut self, block: &DataNode, source: &str) -> Result<(), GraphError> {
        if block.token(0) != Some("on") {
            return Err(GraphError::MalformedEffect {
                line: block.line(),
                tokens: block.render_tokens(),
            });
        }
        let trigger = Trigger::of(block);
        for effect in effect_children(block) {
            self.effect(effect, source, &trigger);
        }
        Ok(())
    }

    fn effect(&mut self, effect: &DataNode, source: &str, trigger: &Trigger) {
        let effect_variables = self.config.effect_variables;
        match (effect.token(0), effect.token(1)) {
            (Some("event"), Some(name)) => {
                let mut detail = effect.token(2).unwrap_or_default().to_string();
                if let Some(decay) = effect.token(3) {
                    detail.push('~');
                    detail.push_str(decay);
                }
                self.graph.edge(source, &event_key(name), &trigger.attrs(&detail));
                self.mention(Mention::Event(name.to_string()));
            },
            (Some("event"), None) => {
                warn!("line {}: 'event' effect without an event name ignored", effect.line());
            },
            (Some("set"), Some(flag)) => {
                self.graph.edge(source, flag, &trigger.attrs(""));
                self.mention(Mention::from_token(flag));
            },
            (Some(target), Some(op @ ("++" | "--"))) if effect_variables && effect.size() == 2 => {
                self.graph.edge(source, target, &trigger.attrs(op));
                self.mention(Mention::from_token(target));
            },
            (Some(target), Some("=" | "+=" | "-=")) if effect_variables && effect.size() > 2 => {
                self.assignment(effect, target, source, trigger);
            },
            _ => debug!("line {}: effect '{}' not graphed", effect.line(), effect.render_tokens()),
        }
    }

    /// `target = expr` gets its own node: source -- node -> target, operands -> node.
    ///
    /// The node and its edge into `target` are emitted once; the edges from
    /// `source` and from the operands are emitted on every visit.
    fn assignment(&mut self, effect: &DataNode, target: &str, source: &str, trigger: &Trigger) {
        let config = self.config;
        let key = effect.render_tokens();
        self.graph.edge(source, &key, &Attrs::new().no_arrowhead());
        if self.mark_emitted(&key) {
            self.graph.node(
                &key,
                &Attrs::new()
                    .label(&format!("{}{key}", trigger.label))
                    .auto_size()
                    .color(&config.colors.exec_expression),
            );
            self.graph.edge(&key, target, &Attrs::new());
            if !is_terminal_value(target) {
                self.mention(Mention::from_token(target));
            }
        }
        self.expression_operands(effect, &key, false);
    }
}

/// Direct children of `block`, followed by the contents of every `apply`
/// found inside its `conversation` blocks.
fn effect_children(block: &DataNode) -> Vec<&DataNode> {
    let mut out: Vec<&DataNode> = block.children().iter().collect();
    for conversation in block.children_by_first("conversation") {
        collect_applies(conversation, &mut out);
    }
    out
}

fn collect_applies<'a>(node: &'a DataNode, out: &mut Vec<&'a DataNode>) {
    for child in node.children() {
        if child.token(0) == Some("apply") {
            out.extend(child.children());
        } else {
            collect_applies(child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GrapherConfig;

    fn on(trigger: &str, effects: Vec<DataNode>) -> DataNode {
        effects.into_iter().fold(DataNode::new(["on", trigger]), DataNode::with_child)
    }

    fn lines(session: &GraphSession<'_>) -> Vec<String> {
        session.body().lines().map(|l| l.trim().to_string()).collect()
    }

    #[test]
    fn complete_event_edge_has_plain_weight_label() {
        let config = GrapherConfig::default();
        let mut session = GraphSession::new(&config);
        session
            .compile_effect(&on("complete", vec![DataNode::new(["event", "E", "10"])]), "M")
            .unwrap();
        assert_eq!(lines(&session), ["\"M\" -> \"event: E\" [label=\"10\"];"]);
        assert_eq!(session.mentioned(), [Mention::Event("E".into())]);
    }

    #[test]
    fn other_triggers_are_dashed_and_prefixed() {
        let config = GrapherConfig::default();
        let mut session = GraphSession::new(&config);
        session
            .compile_effect(
                &on(
                    "fail",
                    vec![
                        DataNode::new(["event", "Revenge", "30", "5"]),
                        DataNode::new(["set", "betrayed"]),
                        DataNode::new(["event"]),
                    ],
                ),
                "M",
            )
            .unwrap();
        assert_eq!(
            lines(&session),
            [
                "\"M\" -> \"event: Revenge\" [style=dashed,label=\"on fail 30~5\"];",
                "\"M\" -> \"betrayed\" [style=dashed,label=\"on fail \"];",
            ]
        );
    }

    #[test]
    fn bare_on_behaves_like_complete() {
        let config = GrapherConfig::default();
        let mut session = GraphSession::new(&config);
        let block = DataNode::new(["on"])
            .with_child(DataNode::new(["event", "E", "3"]))
            .with_child(DataNode::new(["set", "flag"]));
        session.compile_effect(&block, "M").unwrap();
        assert_eq!(
            lines(&session),
            ["\"M\" -> \"event: E\" [label=\"3\"];", "\"M\" -> \"flag\";"]
        );
    }

    #[test]
    fn set_under_complete_has_no_attributes() {
        let config = GrapherConfig::default();
        let mut session = GraphSession::new(&config);
        session
            .compile_effect(&on("complete", vec![DataNode::new(["set", "flag"])]), "M")
            .unwrap();
        assert_eq!(lines(&session), ["\"M\" -> \"flag\";"]);
    }

    #[test]
    fn increment_labels_the_operator() {
        let config = GrapherConfig::default();
        let mut session = GraphSession::new(&config);
        session
            .compile_effect(
                &on(
                    "visit",
                    vec![DataNode::new(["visits", "++"]), DataNode::new(["visits", "++", "extra"])],
                ),
                "M",
            )
            .unwrap();
        assert_eq!(lines(&session), ["\"M\" -> \"visits\" [style=dashed,label=\"on visit ++\"];"]);
    }

    #[test]
    fn assignment_builds_an_expression_node_once() {
        let config = GrapherConfig::default();
        let mut session = GraphSession::new(&config);
        let assign = || DataNode::new(["score", "+=", "kills", "*", "2"]);
        session
            .compile_effect(&on("complete", vec![assign(), assign()]), "M")
            .unwrap();
        assert_eq!(
            lines(&session),
            [
                "\"M\" -> \"score += kills * 2\" [arrowhead=none];",
                "\"score += kills * 2\" [label=\"score += kills * 2\",fixedsize=\"false\",width=0,height=0,color=\"#b5b5b5\"];",
                "\"score += kills * 2\" -> \"score\";",
                "\"kills\" -> \"score += kills * 2\";",
                "\"M\" -> \"score += kills * 2\" [arrowhead=none];",
                "\"kills\" -> \"score += kills * 2\";",
            ]
        );
        assert_eq!(
            session.mentioned(),
            [
                Mention::Variable("score".into()),
                Mention::Variable("kills".into()),
                Mention::Variable("kills".into())
            ]
        );
    }

    #[test]
    fn effect_variables_can_be_switched_off() {
        let config = GrapherConfig {
            effect_variables: false,
            ..GrapherConfig::default()
        };
        let mut session = GraphSession::new(&config);
        session
            .compile_effect(
                &on("complete", vec![DataNode::new(["x", "++"]), DataNode::new(["x", "=", "3"])]),
                "M",
            )
            .unwrap();
        assert!(session.body().is_empty());
    }

    #[test]
    fn conversation_applies_count_as_direct_effects() {
        let config = GrapherConfig::default();
        let mut session = GraphSession::new(&config);
        let conversation = DataNode::new(["conversation"])
            .with_child(DataNode::new(["apply"]).with_child(DataNode::new(["set", "spoke"])))
            .with_child(
                DataNode::new(["choice"]).with_child(
                    DataNode::new(["`Yes.`"])
                        .with_child(DataNode::new(["apply"]).with_child(DataNode::new(["event", "Yes"]))),
                ),
            );
        session
            .compile_effect(&on("offer", vec![conversation]), "M")
            .unwrap();
        assert_eq!(
            lines(&session),
            [
                "\"M\" -> \"spoke\" [style=dashed,label=\"on offer \"];",
                "\"M\" -> \"event: Yes\" [style=dashed,label=\"on offer \"];",
            ]
        );
    }

    #[test]
    fn non_on_block_is_rejected() {
        let config = GrapherConfig::default();
        let mut session = GraphSession::new(&config);
        let err = session
            .compile_effect(&DataNode::new(["to", "offer"]).at_line(7), "M")
            .unwrap_err();
        assert!(matches!(err, GraphError::MalformedEffect { line: 7, .. }));
        assert!(session.body().is_empty());
    }
}
