//! Structural fingerprints for condition subtrees.
//!
//! Identical subtrees map to the same key wherever they occur, which lets a
//! repeated boolean clause collapse into one shared graph node.

use es_datafile::DataNode;
use uuid::Uuid;

/// Namespace for fingerprints of condition subtrees.
pub const NAMESPACE_CONDITION: Uuid = uuid::uuid!("5b0c6d1e-8f3a-4c27-9e41-2d7a0b96c3f8");

/// A v5 UUID of the node's canonical text (tokens and all descendants).
pub fn fingerprint(node: &DataNode) -> String {
    Uuid::new_v5(&NAMESPACE_CONDITION, node.to_text().as_bytes())
        .hyphenated()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer_block() -> DataNode {
        DataNode::new(["to", "offer"]).with_child(
            DataNode::new(["and"])
                .with_child(DataNode::new(["has", "x"]))
                .with_child(DataNode::new(["has", "y"])),
        )
    }

    #[test]
    fn identical_subtrees_share_a_fingerprint() {
        let a = offer_block();
        let b = offer_block().at_line(120);
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn child_order_and_tokens_matter() {
        let swapped = DataNode::new(["to", "offer"]).with_child(
            DataNode::new(["and"])
                .with_child(DataNode::new(["has", "y"]))
                .with_child(DataNode::new(["has", "x"])),
        );
        assert_ne!(fingerprint(&offer_block()), fingerprint(&swapped));
        assert_ne!(
            fingerprint(&DataNode::new(["has", "a b"])),
            fingerprint(&DataNode::new(["has", "a", "b"]))
        );
    }

    #[test]
    fn fingerprint_is_stable() {
        let fp = fingerprint(&offer_block());
        assert_eq!(fp.len(), 36);
        assert_eq!(fp, fingerprint(&offer_block()));
    }
}
