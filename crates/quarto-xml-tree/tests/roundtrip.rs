//! Round-trip tests: trees built through the API survive writing and
//! re-reading, in both output modes.

use quarto_xml_tree::{Node, WriteOptions, parse, to_string_with, write_to};

/// A tree touching every feature the round trip has to preserve.
fn build_document() -> Node {
    let root = Node::new("style")
        .with_attribute("version", "1.0")
        .with_attribute("class", "in-text");

    let info = root.append_child(Node::new("info"));
    info.chain_append_child(Node::new("title").with_text("Tom & Jerry's <Guide>"))
        .chain_append_child(Node::new("author").with_attribute("name", "A \"B\" C"));

    root.create_path(&["citation", "layout", "text"])
        .set_attribute("variable", "title");

    root.append_child(Node::new("empty"));
    root.append_child(Node::new("ns:prefixed").with_attribute("xml:lang", "en"));
    root
}

#[test]
fn test_compact_round_trip() {
    let original = build_document();
    let xml = original.to_xml();
    let reparsed = parse(&xml).unwrap();

    assert_eq!(reparsed, original);
    // Writing the reparsed tree is stable.
    assert_eq!(reparsed.to_xml(), xml);
}

#[test]
fn test_indented_round_trip() {
    let original = build_document();
    let xml = original.to_string();
    assert!(xml.contains("\n  <info>"));

    assert_eq!(parse(&xml).unwrap(), original);
}

#[test]
fn test_expanded_empty_elements_round_trip() {
    let original = build_document();
    let options = WriteOptions::indented(4).with_expand_empty_elements(true);
    let xml = to_string_with(&original, &options).unwrap();

    assert!(xml.contains("<empty></empty>"));
    assert_eq!(parse(&xml).unwrap(), original);
}

#[test]
fn test_write_to_vec_matches_string() {
    let original = build_document();
    let mut buffer = Vec::new();
    write_to(&original, &mut buffer, &WriteOptions::compact()).unwrap();

    assert_eq!(String::from_utf8(buffer).unwrap(), original.to_xml());
}

#[test]
fn test_parsed_document_round_trip() {
    let input = r#"<?xml version="1.0" encoding="utf-8"?>
<style version="1.0">
  <!-- formatting for citations -->
  <macro name="author">
    <names variable="author"/>
  </macro>
  <citation>
    <layout prefix="(" suffix=")">
      <text macro="author"/>
    </layout>
  </citation>
</style>"#;

    let first = parse(input).unwrap();
    let second = parse(&first.to_string()).unwrap();

    assert_eq!(first, second);
    assert!(second.check_path(&["citation", "layout", "text"]));
    assert_eq!(
        second.find_child("layout").unwrap().get_attribute("suffix"),
        ")"
    );
}

#[test]
fn test_mixed_content_is_lossy() {
    // Only the last text segment of <p> survives, so a second round trip
    // does not change anything further.
    let parsed = parse("<p>one <b>bold</b> two</p>").unwrap();
    assert_eq!(parsed.inner_text(), "two");

    let again = parse(&parsed.to_xml()).unwrap();
    assert_eq!(again, parsed);
}

#[test]
fn test_text_with_children_round_trips_indented() {
    let p = Node::new("p").with_text("lead");
    p.append_child(Node::new("br"));
    assert_eq!(p.to_string(), "<p>lead<br/></p>");
    assert_eq!(parse(&p.to_string()).unwrap(), p);

    let doc = Node::new("doc");
    doc.append_child(p.deep_clone());
    doc.append_child(Node::new("tail").with_text("end"));
    let xml = to_string_with(&doc, &WriteOptions::indented(4)).unwrap();
    assert_eq!(xml, "<doc>\n    <p>lead<br/></p>\n    <tail>end</tail>\n</doc>");
    assert_eq!(parse(&xml).unwrap(), doc);
}
