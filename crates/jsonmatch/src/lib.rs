//! jsonmatch addresses and searches values inside encoded JSON documents
//! without fully decoding them.
//!
//! A document is held as raw text and materializes one level of children
//! only when navigation steps into it, so looking up a deep path decodes
//! just the nodes along that path. Paths are JSON-Pointer style:
//! `/`-separated segments where a literal `~` is written `~0` and a
//! literal `/` is written `~1`.
//!
//! ```rust
//! let doc = br#"{"a":{"b":1},"c":[{"b":1},{"b":2}]}"#;
//!
//! let value = jsonmatch::get_value_by_path(doc, "/c/1/b").unwrap();
//! assert_eq!(value.get(), "2");
//! ```
//!
//! [`Node::find_children`] searches a whole subtree for containers whose
//! values satisfy several `path = value` predicates at once:
//!
//! ```rust
//! use jsonmatch::{Node, PathValue};
//!
//! let doc: Node = r#"{"a":{"b":1},"c":[{"b":1},{"b":2}]}"#.parse().unwrap();
//! let hits = doc
//!     .find_children(&[PathValue::from_json("/b", &serde_json::json!(1)).unwrap()])
//!     .unwrap();
//!
//! assert_eq!(hits.len(), 2);
//! assert_eq!(hits[0].path, "/a");
//! assert_eq!(hits[1].path, "/c/0");
//! ```
mod error;
mod node;
mod options;
pub mod pointer;
mod query;

pub use error::Error;
pub use node::{Kind, Node};
pub use options::Options;
pub use pointer::{decode_segment, encode_segment};
pub use query::{PathValue, PathValues, get_value_by_path, get_value_by_path_with_options};
pub use serde_json::value::RawValue;
