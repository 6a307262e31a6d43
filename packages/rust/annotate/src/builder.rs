//! Builds the annotation block for one module.
//!
//! The block is a `<div class="sequencelib">` containing a lead-in paragraph
//! and a two-level listing: one outer `<li>` per OEIS tag (linking to the
//! catalogue), each followed by a *sibling* `<ul>` of the declarations
//! formalizing that tag. The sibling placement (rather than nesting the
//! inner list inside the `<li>`) matches the layout the doc-gen stylesheet
//! expects and must be preserved.

use ego_tree::{NodeId, Tree};
use scraper::node::Node;

use seqdoc_shared::ModuleAnnotation;

use crate::dom;

/// Class value marking the annotation block for idempotent rediscovery.
pub const MARKER_CLASS: &str = "sequencelib";

/// Fixed lead-in paragraph text.
pub const LEAD_IN_TEXT: &str = "OEIS sequences formalized in this file:";

/// Build the annotation block as an orphan subtree of `tree`.
///
/// Pure tree construction, no I/O. The returned node id is the block's
/// container `<div>`; the caller attaches it via
/// [`patch_document`](crate::patch_document). Tags and declaration names are
/// set as text content and href values verbatim; the serializer handles HTML
/// escaping. An empty annotation still produces the paragraph plus an empty
/// list.
pub fn build_annotation(
    tree: &mut Tree<Node>,
    catalogue_base: &str,
    annotation: &ModuleAnnotation,
) -> NodeId {
    let container = dom::create_element(tree, "div", &[("class", MARKER_CLASS)]);

    let lead_in = dom::create_element(tree, "p", &[]);
    let lead_in_text = dom::create_text(tree, LEAD_IN_TEXT);
    dom::append(tree, lead_in, lead_in_text);
    dom::append(tree, container, lead_in);

    let outer_list = dom::create_element(tree, "ul", &[]);

    for (tag, decls) in &annotation.tags {
        let tag_link =
            dom::create_element(tree, "a", &[("href", &format!("{catalogue_base}/{tag}"))]);
        let tag_text = dom::create_text(tree, tag);
        dom::append(tree, tag_link, tag_text);

        let tag_item = dom::create_element(tree, "li", &[]);
        dom::append(tree, tag_item, tag_link);

        let decl_list = dom::create_element(tree, "ul", &[]);

        for (decl, theorems) in decls {
            let decl_link = dom::create_element(tree, "a", &[("href", &format!("#{decl}"))]);
            let decl_text = dom::create_text(tree, decl);
            dom::append(tree, decl_link, decl_text);

            let decl_item = dom::create_element(tree, "li", &[]);
            dom::append(tree, decl_item, decl_link);

            if !theorems.is_empty() {
                let colon = dom::create_text(tree, ": ");
                dom::append(tree, decl_item, colon);

                for (i, (theorem, theorem_ref)) in theorems.iter().enumerate() {
                    if i > 0 {
                        let comma = dom::create_text(tree, ", ");
                        dom::append(tree, decl_item, comma);
                    }

                    let theorem_link =
                        dom::create_element(tree, "a", &[("href", &format!("#{theorem}"))]);
                    let label = dom::create_text(tree, &theorem_ref.label());
                    dom::append(tree, theorem_link, label);
                    dom::append(tree, decl_item, theorem_link);
                }
            }

            dom::append(tree, decl_list, decl_item);
        }

        // Sibling, not nested: the declaration list follows the tag's <li>.
        dom::append(tree, outer_list, tag_item);
        dom::append(tree, outer_list, decl_list);
    }

    dom::append(tree, container, outer_list);
    container
}
