//! Splices an annotation block into a module's documentation page.

use std::sync::LazyLock;

use ego_tree::NodeId;
use scraper::{Html, Selector};
use tracing::debug;

use seqdoc_shared::{Result, SeqDocError};

use crate::builder::MARKER_CLASS;
use crate::dom;

static BLOCK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(&format!("div.{MARKER_CLASS}")).expect("valid selector"));

/// The title heading emitted by the upstream doc generator.
static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1.markdown-heading").expect("valid selector"));

static MAIN_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("main").expect("valid selector"));

/// Insert `block` immediately after the page's title heading, replacing any
/// block from a previous run.
///
/// Mutates `doc` in place. Idempotent: running this repeatedly with freshly
/// built blocks leaves exactly one annotation block in the document.
///
/// Pages missing the title heading get one synthesized from the module name,
/// prepended to `<main>`. A page with neither heading nor `<main>` does not
/// conform to the generator's output and fails with
/// [`SeqDocError::Structural`]; the document content reachable from the root
/// is left untouched in that case.
pub fn patch_document(doc: &mut Html, module: &str, block: NodeId) -> Result<()> {
    if let Some(stale) = dom::find_first(doc, &BLOCK_SELECTOR) {
        debug!(module, "removing annotation block from a previous run");
        dom::detach(&mut doc.tree, stale);
    }

    let anchor = match dom::find_first(doc, &HEADING_SELECTOR) {
        Some(heading) => heading,
        None => {
            let main = dom::find_first(doc, &MAIN_SELECTOR).ok_or_else(|| {
                SeqDocError::structural(module, "neither a title heading nor <main> is present")
            })?;

            debug!(module, "no title heading, synthesizing one");
            let heading =
                dom::create_element(&mut doc.tree, "h1", &[("class", "markdown-heading")]);
            let title = dom::create_text(&mut doc.tree, module);
            dom::append(&mut doc.tree, heading, title);
            dom::prepend(&mut doc.tree, main, heading);
            heading
        }
    };

    dom::insert_after(&mut doc.tree, anchor, block);
    Ok(())
}

#[cfg(test)]
mod tests {
    use scraper::{ElementRef, Html, Selector};

    use seqdoc_shared::ModuleAnnotation;

    use super::*;
    use crate::builder::{LEAD_IN_TEXT, build_annotation};

    const CATALOGUE: &str = "https://oeis.org";

    fn annotation(json: &str) -> ModuleAnnotation {
        serde_json::from_str(json).expect("valid annotation json")
    }

    fn apply(doc: &mut Html, module: &str, json: &str) {
        let ann = annotation(json);
        let block = build_annotation(&mut doc.tree, CATALOGUE, &ann);
        patch_document(doc, module, block).expect("patch succeeds");
    }

    fn sel(s: &str) -> Selector {
        Selector::parse(s).expect("valid selector")
    }

    fn text_of(el: ElementRef<'_>) -> String {
        el.text().collect()
    }

    #[test]
    fn end_to_end_scenario() {
        let mut doc = Html::parse_document(
            r#"<html><body><main><h1 class="markdown-heading">Mod.A</h1></main></body></html>"#,
        );
        apply(&mut doc, "Mod.A", r#"{"A000045": {"decl1": {}}}"#);

        let out = Html::parse_document(&doc.html());

        // Original heading retained, block is its immediate sibling.
        let h1 = out.select(&sel("h1.markdown-heading")).next().expect("h1");
        assert_eq!(text_of(h1), "Mod.A");
        let next = h1.next_sibling().and_then(ElementRef::wrap).expect("sibling");
        assert_eq!(next.value().name(), "div");
        assert!(next.value().has_class(
            "sequencelib",
            scraper::CaseSensitivity::CaseSensitive
        ));

        let p = out.select(&sel("div.sequencelib > p")).next().expect("lead-in");
        assert_eq!(text_of(p), LEAD_IN_TEXT);

        let tag_link = out
            .select(&sel("div.sequencelib > ul > li > a"))
            .next()
            .expect("tag link");
        assert_eq!(tag_link.value().attr("href"), Some("https://oeis.org/A000045"));
        assert_eq!(text_of(tag_link), "A000045");

        let decl_link = out
            .select(&sel("div.sequencelib > ul > ul > li > a"))
            .next()
            .expect("decl link");
        assert_eq!(decl_link.value().attr("href"), Some("#decl1"));
        assert_eq!(text_of(decl_link), "decl1");
    }

    #[test]
    fn patch_is_idempotent() {
        let json = r#"{"A000045": {"fib": {"fib_thm": {"value": "T"}}}}"#;
        let mut doc = Html::parse_document(
            r#"<html><body><main><h1 class="markdown-heading">M</h1><p>body</p></main></body></html>"#,
        );

        apply(&mut doc, "M", json);
        let once = doc.html();

        apply(&mut doc, "M", json);
        let twice = doc.html();

        assert_eq!(once, twice);
        let out = Html::parse_document(&twice);
        assert_eq!(out.select(&sel("div.sequencelib")).count(), 1);
    }

    #[test]
    fn stale_block_is_replaced_not_duplicated() {
        let mut doc = Html::parse_document(
            r#"<html><body><main>
                <h1 class="markdown-heading">M</h1>
                <div class="sequencelib"><p>stale content</p></div>
            </main></body></html>"#,
        );
        apply(&mut doc, "M", r#"{"A000001": {"groups": {}}}"#);

        let html = doc.html();
        assert!(!html.contains("stale content"));
        let out = Html::parse_document(&html);
        assert_eq!(out.select(&sel("div.sequencelib")).count(), 1);
    }

    #[test]
    fn order_follows_metadata() {
        let mut doc = Html::parse_document(
            r#"<html><body><main><h1 class="markdown-heading">M</h1></main></body></html>"#,
        );
        apply(
            &mut doc,
            "M",
            r#"{
                "A000045": {"fib_def": {}},
                "A000040": {"prime_decl": {"thm1": {"value": "T1"}}}
            }"#,
        );

        let out = Html::parse_document(&doc.html());
        let tags: Vec<String> = out
            .select(&sel("div.sequencelib > ul > li > a"))
            .map(text_of)
            .collect();
        assert_eq!(tags, ["A000045", "A000040"]);

        let thm = out
            .select(&sel(r##"a[href="#thm1"]"##))
            .next()
            .expect("theorem link");
        assert_eq!(text_of(thm), "T1");
    }

    #[test]
    fn empty_theorem_set_renders_no_separator() {
        let mut doc = Html::parse_document(
            r#"<html><body><main><h1 class="markdown-heading">M</h1></main></body></html>"#,
        );
        apply(&mut doc, "M", r#"{"A000045": {"fib_def": {}}}"#);

        let out = Html::parse_document(&doc.html());
        let item = out
            .select(&sel("div.sequencelib > ul > ul > li"))
            .next()
            .expect("decl item");
        assert_eq!(text_of(item), "fib_def");
    }

    #[test]
    fn theorem_links_are_comma_separated() {
        let mut doc = Html::parse_document(
            r#"<html><body><main><h1 class="markdown-heading">M</h1></main></body></html>"#,
        );
        apply(
            &mut doc,
            "M",
            r#"{"A000045": {"fib": {"t1": {"value": "A"}, "t2": {"value": "B"}}}}"#,
        );

        let out = Html::parse_document(&doc.html());
        let item = out
            .select(&sel("div.sequencelib > ul > ul > li"))
            .next()
            .expect("decl item");
        assert_eq!(text_of(item), "fib: A, B");
    }

    #[test]
    fn inner_list_is_sibling_of_tag_item() {
        let mut doc = Html::parse_document(
            r#"<html><body><main><h1 class="markdown-heading">M</h1></main></body></html>"#,
        );
        apply(
            &mut doc,
            "M",
            r#"{"A000045": {"fib": {}}, "A000040": {"prime": {}}}"#,
        );

        let out = Html::parse_document(&doc.html());
        let outer = out.select(&sel("div.sequencelib > ul")).next().expect("outer list");
        let children: Vec<&str> = outer
            .children()
            .filter_map(ElementRef::wrap)
            .map(|el| el.value().name())
            .collect();
        assert_eq!(children, ["li", "ul", "li", "ul"]);
    }

    #[test]
    fn heading_synthesized_when_missing() {
        let mut doc = Html::parse_document(
            r#"<html><body><main><p>legacy page</p></main></body></html>"#,
        );
        apply(&mut doc, "Legacy.Mod", r#"{"A000012": {"one": {}}}"#);

        let out = Html::parse_document(&doc.html());
        let headings: Vec<_> = out.select(&sel("h1.markdown-heading")).collect();
        assert_eq!(headings.len(), 1);
        assert_eq!(text_of(headings[0]), "Legacy.Mod");

        // First child of <main>, immediately followed by the block.
        let main = out.select(&sel("main")).next().expect("main");
        let first = main.first_child().and_then(ElementRef::wrap).expect("first child");
        assert_eq!(first.value().name(), "h1");
        let next = headings[0]
            .next_sibling()
            .and_then(ElementRef::wrap)
            .expect("sibling");
        assert!(next.value().has_class(
            "sequencelib",
            scraper::CaseSensitivity::CaseSensitive
        ));
    }

    #[test]
    fn missing_main_is_fatal_and_leaves_document_untouched() {
        let mut doc =
            Html::parse_document(r#"<html><body><p>not a doc page</p></body></html>"#);
        let before = doc.html();

        let ann = annotation(r#"{"A000045": {"fib": {}}}"#);
        let block = build_annotation(&mut doc.tree, CATALOGUE, &ann);
        let err = patch_document(&mut doc, "Mod.B", block).expect_err("must fail");

        assert!(matches!(err, SeqDocError::Structural { ref module, .. } if module == "Mod.B"));
        assert_eq!(doc.html(), before);
    }

    #[test]
    fn names_are_escaped_in_output() {
        let mut doc = Html::parse_document(
            r#"<html><body><main><h1 class="markdown-heading">M</h1></main></body></html>"#,
        );
        apply(&mut doc, "M", r#"{"A000045": {"a<b&c": {}}}"#);

        let html = doc.html();
        assert!(html.contains("&lt;"));
        assert!(html.contains("&amp;"));

        // The document still parses and the link text round-trips.
        let out = Html::parse_document(&html);
        let decl = out
            .select(&sel("div.sequencelib > ul > ul > li > a"))
            .next()
            .expect("decl link");
        assert_eq!(text_of(decl), "a<b&c");
    }

    #[test]
    fn empty_annotation_still_inserts_block() {
        let mut doc = Html::parse_document(
            r#"<html><body><main><h1 class="markdown-heading">M</h1></main></body></html>"#,
        );
        apply(&mut doc, "M", "{}");

        let out = Html::parse_document(&doc.html());
        let block = out.select(&sel("div.sequencelib")).next().expect("block");
        assert_eq!(
            text_of(out.select(&sel("div.sequencelib > p")).next().expect("lead-in")),
            LEAD_IN_TEXT
        );
        let lists: Vec<_> = block
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "ul")
            .collect();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].children().filter_map(ElementRef::wrap).count(), 0);
    }

    #[test]
    fn fixture_page_round_trip() {
        let html = std::fs::read_to_string("../../../fixtures/html/fibonacci.html")
            .expect("read fixture");
        let mut doc = Html::parse_document(&html);
        apply(
            &mut doc,
            "Sequencelib.Fibonacci",
            r#"{"A000045": {
                "Sequencelib.Fibonacci.fib": {
                    "Sequencelib.Fibonacci.fib_succ_succ": {"value": "F(n+2) = F(n+1) + F(n)"}
                }
            }}"#,
        );

        let out = Html::parse_document(&doc.html());
        assert_eq!(out.select(&sel("div.sequencelib")).count(), 1);
        // Pre-existing page content survives the patch.
        assert!(doc.html().contains("Fibonacci and Lucas numbers."));
        let thm = out
            .select(&sel(r##"a[href="#Sequencelib.Fibonacci.fib_succ_succ"]"##))
            .next()
            .expect("theorem link");
        assert_eq!(text_of(thm), "F(n+2) = F(n+1) + F(n)");
    }
}
