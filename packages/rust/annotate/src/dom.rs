//! Minimal DOM-capability layer over `scraper`'s parse tree.
//!
//! `scraper` exposes its document as an `ego_tree::Tree<Node>`, which
//! supports in-place mutation. These helpers cover the handful of operations
//! the builder and patcher need (create, append, prepend, insert-after,
//! detach, find), so swapping the HTML engine means touching only this file.
//!
//! Newly created nodes start out as orphans of the document's own tree and
//! only become visible once linked under a reachable parent. Orphans that
//! are never attached simply do not serialize.

use ego_tree::{NodeId, Tree};
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, QualName, namespace_url, ns};
use scraper::node::{Element, Node, Text};
use scraper::{Html, Selector};

/// Create an orphan element in the html namespace with the given attributes.
pub fn create_element(tree: &mut Tree<Node>, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attrs: Vec<Attribute> = attrs
        .iter()
        .map(|(key, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(*key)),
            value: StrTendril::from(*value),
        })
        .collect();

    tree.orphan(Node::Element(Element::new(name, attrs))).id()
}

/// Create an orphan text node. Escaping happens at serialization time.
pub fn create_text(tree: &mut Tree<Node>, text: &str) -> NodeId {
    tree.orphan(Node::Text(Text {
        text: StrTendril::from(text),
    }))
    .id()
}

/// Append `child` as the last child of `parent`.
pub fn append(tree: &mut Tree<Node>, parent: NodeId, child: NodeId) {
    tree.get_mut(parent)
        .expect("parent id belongs to this tree")
        .append_id(child);
}

/// Insert `node` as the first child of `parent`.
pub fn prepend(tree: &mut Tree<Node>, parent: NodeId, node: NodeId) {
    tree.get_mut(parent)
        .expect("parent id belongs to this tree")
        .prepend_id(node);
}

/// Insert `node` as the next sibling of `anchor`.
pub fn insert_after(tree: &mut Tree<Node>, anchor: NodeId, node: NodeId) {
    tree.get_mut(anchor)
        .expect("anchor id belongs to this tree")
        .insert_id_after(node);
}

/// Detach `node` (and its subtree) from its parent. Detached subtrees are
/// unreachable from the root and never serialize.
pub fn detach(tree: &mut Tree<Node>, node: NodeId) {
    tree.get_mut(node)
        .expect("node id belongs to this tree")
        .detach();
}

/// Find the first element matching `selector`, as a node id usable for
/// mutation once the immutable borrow of the document ends.
pub fn find_first(doc: &Html, selector: &Selector) -> Option<NodeId> {
    doc.select(selector).next().map(|el| el.id())
}
