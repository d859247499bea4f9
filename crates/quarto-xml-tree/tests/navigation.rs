//! Navigation and mutation scenarios on parsed and constructed trees.

use quarto_xml_tree::{Node, parse};

fn tags(node: &Node) -> Vec<String> {
    node.children().iter().map(Node::tag).collect()
}

#[test]
fn test_sample_document_scenario() {
    let root = parse(r#"<a x="1"><b>hello</b><b>world</b></a>"#).unwrap();

    assert_eq!(root.tag(), "a");
    assert_eq!(root.get_attribute("x"), "1");
    assert_eq!(tags(&root), ["b", "b"]);
    assert_eq!(root.find_child("b").unwrap().inner_text(), "hello");

    assert!(root.check_path(&["b"]));
    assert!(!root.check_path(&["c"]));
    assert!(!root.check_path(&["b", "c"]));

    root.remove_children_with_tag("b");
    assert_eq!(root.child_count(), 0);
    assert_eq!(root.to_xml(), r#"<a x="1"/>"#);
}

#[test]
fn test_parent_links_after_parse() {
    let root = parse("<a><b><c/></b></a>").unwrap();
    let c = root.find_child("c").unwrap();

    let b = c.parent().unwrap();
    assert_eq!(b.tag(), "b");
    assert!(Node::ptr_eq(&b.parent().unwrap(), &root));
}

#[test]
fn test_create_unique_path_twice_leaves_one_child() {
    let root = parse("<config><x><old/></x><y/><x/></config>").unwrap();

    root.create_unique_path(&["x", "first"]);
    root.create_unique_path(&["x", "second"]);

    assert_eq!(tags(&root), ["y", "x"]);
    assert!(root.check_path(&["x", "second"]));
    assert!(!root.check_path(&["x", "first"]));
    assert!(root.find_child("old").is_none());
}

#[test]
fn test_ensure_path_twice_returns_same_node() {
    let root = parse("<config><a/></config>").unwrap();

    let first = root.ensure_path(&["a", "b", "c"]);
    let second = root.ensure_path(&["a", "b", "c"]);

    assert!(Node::ptr_eq(&first, &second));
    assert_eq!(root.to_xml(), "<config><a><b><c/></b></a></config>");
}

#[test]
fn test_ensure_path_uses_first_matching_child() {
    let root = parse("<r><a id=\"1\"/><a id=\"2\"><b/></a></r>").unwrap();

    // The first <a> has no <b>, so a new one is created under it rather
    // than reusing the one under the second <a>.
    let b = root.ensure_path(&["a", "b"]);
    assert_eq!(b.parent().unwrap().get_attribute("id"), "1");
}

#[test]
fn test_fluent_construction() {
    let root = Node::new("menu");
    root.chain_append_children([
        Node::new("item").with_attribute("id", "open"),
        Node::new("item").with_attribute("id", "save"),
    ])
    .append_child(Node::new("separator"));

    assert_eq!(
        root.to_xml(),
        r#"<menu><item id="open"/><item id="save"/><separator/></menu>"#
    );
}

#[test]
fn test_mutate_subtree_through_handle() {
    let root = parse("<doc><meta/></doc>").unwrap();
    let meta = root.find_child("meta").unwrap();

    meta.set_attribute("charset", "utf-8");
    meta.set_tag("head");

    assert_eq!(root.to_xml(), r#"<doc><head charset="utf-8"/></doc>"#);
}
