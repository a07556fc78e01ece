//! Condition compiler.
//!
//! Renders a `to offer` block into edges pointing at the mission it gates.
//! `and`/`or` groups become shared nodes keyed by the fingerprint of the block
//! that contains them; `has`/`not` become colored edges; anything else is a
//! comparison and gets an expression node of its own.

use es_datafile::DataNode;
use lazy_static::lazy_static;
use regex::Regex;

use crate::classify::is_terminal_value;
use crate::fingerprint::fingerprint;
use crate::graph::Attrs;
use crate::resolve::Mention;
use crate::session::GraphSession;

lazy_static! {
    static ref MISSION_STATE: Regex =
        Regex::new(r"^(.+): (active|offered|declined|failed)").expect("mission state pattern");
    static ref MISSION_DONE: Regex = Regex::new(r"^(.+): done").expect("mission done pattern");
}

impl GraphSession<'_> {
    /// Emit everything `node`'s children require of `destination`.
    pub fn compile_condition(&mut self, node: &DataNode, destination: &str) {
        for child in node.children() {
            match (child.token(0), child.token(1)) {
                (Some(op @ ("or" | "and")), _) => self.boolean_group(node, op, child, destination),
                (Some(op @ ("has" | "not")), Some(condition)) => self.state_check(op == "has", condition, destination),
                _ => self.comparison(child, destination),
            }
        }
    }

    /// `parent` rather than `group` is fingerprinted, so sibling groups share one node.
    fn boolean_group(&mut self, parent: &DataNode, op: &str, group: &DataNode, destination: &str) {
        let config = self.config;
        let key = fingerprint(parent);
        if self.mark_emitted(&key) {
            let fill = if op == "or" { &config.colors.or } else { &config.colors.and };
            self.graph.node(&key, &Attrs::new().label(op).fill(fill));
            self.compile_condition(group, &key);
        }
        self.graph.edge(&key, destination, &Attrs::new());
    }

    fn state_check(&mut self, has: bool, condition: &str, destination: &str) {
        let config = self.config;
        let color = if has { &config.colors.line_has } else { &config.colors.line_not };
        if let Some(caps) = MISSION_STATE.captures(condition) {
            let (mission, state) = (&caps[1], &caps[2]);
            self.mention(Mention::Mission(mission.to_string()));
            self.graph
                .edge(mission, destination, &Attrs::new().label(state).dashed().color(color));
        } else if let Some(caps) = MISSION_DONE.captures(condition) {
            let mission = &caps[1];
            self.mention(Mention::Mission(mission.to_string()));
            self.graph.edge(mission, destination, &Attrs::new().color(color));
        } else {
            self.mention(Mention::from_token(condition));
            self.graph.edge(condition, destination, &Attrs::new().color(color));
        }
    }

    /// A bare comparison such as `"combat rating" > 100`.
    ///
    /// The node is declared once per destination; its edges are emitted on
    /// every visit.
    fn comparison(&mut self, expression: &DataNode, destination: &str) {
        let config = self.config;
        // one instance per destination
        let key = format!("{}_{destination}", expression.render_tokens());
        if self.mark_emitted(&key) {
            let label = expression.tokens().join(" ");
            self.graph
                .node(&key, &Attrs::new().label(&label).color(&config.colors.eval_expression));
        }
        self.graph.edge(&key, destination, &Attrs::new());
        self.expression_operands(expression, &key, true);
    }

    /// Link every variable an expression reads to the node `name`.
    ///
    /// Token 0 is the left operand and token 1 the operator. The left operand
    /// is only a dependency when `include_left` is set; for assignments it is
    /// the target instead.
    pub(crate) fn expression_operands(&mut self, expression: &DataNode, name: &str, include_left: bool) {
        let tokens = expression.tokens();
        if include_left
            && let Some(left) = tokens.first()
            && !is_terminal_value(left)
        {
            self.operand(left, name);
        }
        for token in tokens.iter().skip(2) {
            if !is_terminal_value(token) {
                self.operand(token, name);
            }
        }
    }

    fn operand(&mut self, token: &str, name: &str) {
        self.graph.edge(token, name, &Attrs::new());
        self.mention(Mention::from_token(token));
    }
}
