//! Tag queries over a parsed document
//!
//! Everything here is a pure function of the tree: no allocation beyond
//! the returned value, no state across calls, safe to call from any
//! thread that can borrow the arena.
//!
//! Search order is pre-order depth-first, children left-to-right,
//! starting with the node passed in. The first match wins and nothing
//! below it is visited, so for nested same-named elements the outer one
//! is returned.

use crate::arena::NodeRef;

/// Case-insensitive tag comparison
///
/// ASCII fast path first; anything else falls back to full Unicode
/// lowercasing so `DESCRIPTION`, `Description` and `description` agree.
pub fn tag_name_eq(a: &str, b: &str) -> bool {
    if a.eq_ignore_ascii_case(b) {
        return true;
    }
    if a.is_ascii() && b.is_ascii() {
        return false;
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn is_element_named(node: &NodeRef<'_>, tag: &str) -> bool {
    node.tag_name().is_some_and(|name| tag_name_eq(name, tag))
}

/// First element in document order whose tag matches, `root` included
pub fn first_element_by_tag<'a>(root: NodeRef<'a>, tag: &str) -> Option<NodeRef<'a>> {
    root.descendants().find(|node| is_element_named(node, tag))
}

/// Text content of the first matching element
///
/// `None` means no element with that tag exists under `root`. A matching
/// element with no text yields `Some("")`, never `None`.
pub fn find_first_tag_content(root: NodeRef<'_>, tag: &str) -> Option<String> {
    first_element_by_tag(root, tag).map(|element| element.text_content())
}

/// Every matching element in document order, nested matches included
pub fn elements_by_tag<'a>(root: NodeRef<'a>, tag: &str) -> Vec<NodeRef<'a>> {
    root.descendants()
        .filter(|node| is_element_named(node, tag))
        .collect()
}

/// Search for `tag` inside the first `scope_tag` element
///
/// When no `scope_tag` element exists the whole tree under `root` is
/// searched instead.
pub fn find_scoped_tag_content(root: NodeRef<'_>, scope_tag: &str, tag: &str) -> Option<String> {
    let scope = first_element_by_tag(root, scope_tag).unwrap_or(root);
    find_first_tag_content(scope, tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::DomArena;
    use crate::parser::DomParser;
    use crate::types::{DomNode, NodeKind};

    fn parse(xml: &str) -> DomArena {
        DomParser::new().parse_str(xml).unwrap()
    }

    const FEED: &str = "<rss><channel><item><title>A</title><description>First</description></item>\
                        <item><description>Second</description></item></channel></rss>";

    #[test]
    fn test_end_to_end_first_item_description() {
        let arena = parse(FEED);
        let root = arena.root().unwrap();

        let item = first_element_by_tag(root, "item").unwrap();
        assert_eq!(
            find_first_tag_content(item, "description").as_deref(),
            Some("First")
        );
    }

    #[test]
    fn test_case_insensitive() {
        let arena = parse("<rss><Item><DESCRIPTION>x</DESCRIPTION></Item></rss>");
        let root = arena.root().unwrap();

        let lower = find_first_tag_content(root, "description");
        let mixed = find_first_tag_content(root, "Description");
        assert_eq!(lower.as_deref(), Some("x"));
        assert_eq!(lower, mixed);
        assert!(first_element_by_tag(root, "ITEM").is_some());
    }

    #[test]
    fn test_first_sibling_wins() {
        let arena = parse("<r><d>one</d><d>two</d></r>");
        let root = arena.root().unwrap();
        assert_eq!(find_first_tag_content(root, "d").as_deref(), Some("one"));
    }

    #[test]
    fn test_earlier_subtree_wins_over_later_shallower_match() {
        // Pre-order: the deep match in the first branch comes before the
        // shallow one in the second branch.
        let arena = parse("<r><a><b><d>deep</d></b></a><d>shallow</d></r>");
        let root = arena.root().unwrap();
        assert_eq!(find_first_tag_content(root, "d").as_deref(), Some("deep"));
    }

    #[test]
    fn test_outer_match_wins_over_nested() {
        let arena = parse("<r><d>outer <d>inner</d> tail</d></r>");
        let root = arena.root().unwrap();

        assert_eq!(
            find_first_tag_content(root, "d").as_deref(),
            Some("outer inner tail")
        );
        let outer = first_element_by_tag(root, "d").unwrap();
        assert_eq!(outer.parent().unwrap().tag_name(), Some("r"));
    }

    #[test]
    fn test_absent_is_not_empty() {
        let arena = parse("<r><d/><e></e></r>");
        let root = arena.root().unwrap();

        assert_eq!(find_first_tag_content(root, "d").as_deref(), Some(""));
        assert_eq!(find_first_tag_content(root, "e").as_deref(), Some(""));
        assert_eq!(find_first_tag_content(root, "missing"), None);
    }

    #[test]
    fn test_root_itself_is_checked() {
        let arena = parse("<description>self</description>");
        let element = arena.document_element().unwrap();
        assert_eq!(
            find_first_tag_content(element, "description").as_deref(),
            Some("self")
        );
    }

    #[test]
    fn test_childless_non_matching_root() {
        let mut arena = DomArena::new();
        let id = arena.add_node(DomNode::new(NodeKind::Document));
        let root = arena.node(id).unwrap();

        assert!(first_element_by_tag(root, "item").is_none());
        assert_eq!(find_first_tag_content(root, "description"), None);
    }

    #[test]
    fn test_text_nodes_never_match() {
        let arena = parse("<r>description</r>");
        let root = arena.root().unwrap();
        assert_eq!(find_first_tag_content(root, "description"), None);
        assert_eq!(find_first_tag_content(root, ""), None);
    }

    #[test]
    fn test_scoped_search_falls_back_to_root() {
        let arena = parse("<rss><channel><description>Channel</description></channel></rss>");
        let root = arena.root().unwrap();
        assert_eq!(
            find_scoped_tag_content(root, "item", "description").as_deref(),
            Some("Channel")
        );

        let arena = parse("<rss><channel><title>t</title></channel></rss>");
        let root = arena.root().unwrap();
        assert_eq!(find_scoped_tag_content(root, "item", "description"), None);
    }

    #[test]
    fn test_scoped_search_prefers_item_over_channel() {
        let arena = parse(
            "<rss><channel><description>Channel</description>\
             <item><description>Entry</description></item></channel></rss>",
        );
        let root = arena.root().unwrap();
        assert_eq!(
            find_scoped_tag_content(root, "item", "description").as_deref(),
            Some("Entry")
        );
    }

    #[test]
    fn test_elements_by_tag_in_document_order() {
        let arena = parse(FEED);
        let root = arena.root().unwrap();

        let items: Vec<String> = elements_by_tag(root, "description")
            .into_iter()
            .map(|n| n.text_content())
            .collect();
        assert_eq!(items, vec!["First", "Second"]);
    }

    #[test]
    fn test_match_is_at_or_before_every_other_match() {
        let arena = parse(FEED);
        let root = arena.root().unwrap();

        let first = first_element_by_tag(root, "description").unwrap();
        let order: Vec<_> = root.descendants().map(|n| n.id()).collect();
        let first_pos = order.iter().position(|&id| id == first.id()).unwrap();
        for other in elements_by_tag(root, "description") {
            let pos = order.iter().position(|&id| id == other.id()).unwrap();
            assert!(first_pos <= pos);
        }
    }

    #[test]
    fn test_tag_name_eq() {
        assert!(tag_name_eq("description", "DESCRIPTION"));
        assert!(tag_name_eq("dc:Creator", "DC:CREATOR"));
        assert!(tag_name_eq("ÉTÉ", "été"));
        assert!(!tag_name_eq("item", "items"));
        assert!(!tag_name_eq("ÉTÉ", "ete"));
    }
}
