//! Mutable XML element trees for Quarto.
//!
//! This crate reads XML into a tree of [`Node`]s, lets callers query and
//! reshape that tree with tag paths, and writes it back out. It wraps
//! [`quick-xml`] for tokenizing and escaping.
//!
//! # Overview
//!
//! The main types are:
//! - [`Node`]: a shared handle to one element, with tag, attributes, text and
//!   ordered children
//! - [`WriteOptions`]: compact or indented output
//! - [`ParseContext`]: collects [`ParseNote`]s about input that did not fit the
//!   tree model exactly
//!
//! Each element has a single text slot. When text and child elements are
//! interleaved, only the last text segment is kept.
//!
//! # Example
//!
//! ```rust
//! use quarto_xml_tree::parse;
//!
//! let root = parse(r#"<a x="1"><b>hello</b><b>world</b></a>"#).unwrap();
//!
//! assert_eq!(root.find_child("b").unwrap().inner_text(), "hello");
//! assert!(root.check_path(&["b"]));
//! assert!(!root.check_path(&["b", "c"]));
//!
//! let title = root.ensure_path(&["info", "title"]);
//! title.set_inner_text("Notes");
//!
//! assert_eq!(
//!     root.to_xml(),
//!     r#"<a x="1"><b>hello</b><b>world</b><info><title>Notes</title></info></a>"#
//! );
//! ```
//!
//! # Building trees
//!
//! [`Node::append_child`] returns the attached child, so calls nest;
//! [`Node::chain_append_child`] returns the parent, so calls add siblings:
//!
//! ```rust
//! use quarto_xml_tree::Node;
//!
//! let list = Node::new("list");
//! list.chain_append_child(Node::new("item").with_text("one"))
//!     .chain_append_child(Node::new("item").with_text("two"));
//! list.append_child(Node::new("nested"))
//!     .append_child(Node::new("item"));
//!
//! assert_eq!(list.child_count(), 3);
//! assert!(list.check_path(&["nested", "item"]));
//! ```

pub mod context;
pub mod error;
pub mod node;
pub mod parser;
pub mod path;
pub mod writer;

// Re-export main types
pub use context::{ParseContext, ParseNote};
pub use error::{Error, ErrorKind, Result};
pub use node::{Attributes, Node};
pub use parser::{parse, parse_bytes, parse_reader, parse_with_context};
pub use writer::{WriteOptions, to_string_with, write_to};
