use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::{
    error::Error,
    node::{Container, Node},
    options::Options,
    pointer,
};

/// A value paired with the absolute path that addresses it.
///
/// Serializes as `{"path": ..., "value": ...}`, so predicate lists and
/// search results can travel over the wire unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathValue {
    pub path: String,
    pub value: Box<RawValue>,
}

/// A list of path/value pairs, as consumed and produced by
/// [`Node::find_children`].
pub type PathValues = Vec<PathValue>;

impl PathValue {
    pub fn new(path: impl Into<String>, value: Box<RawValue>) -> Self {
        PathValue {
            path: path.into(),
            value,
        }
    }

    /// Builds a pair from a decoded value by re-encoding it.
    pub fn from_json(path: impl Into<String>, value: &serde_json::Value) -> Result<Self, Error> {
        Ok(PathValue::new(path, serde_json::value::to_raw_value(value)?))
    }
}

impl PartialEq for PathValue {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.value.get() == other.value.get()
    }
}

/// Looks up `path` in an encoded document and returns the raw text found
/// there. Fails with [`Error::Decode`] when the document is malformed.
pub fn get_value_by_path(doc: &[u8], path: &str) -> Result<Box<RawValue>, Error> {
    get_value_by_path_with_options(doc, path, &Options::default())
}

pub fn get_value_by_path_with_options(
    doc: &[u8],
    path: &str,
    options: &Options,
) -> Result<Box<RawValue>, Error> {
    Node::from_slice(doc)?.get_value_with_options(path, options)
}

struct Candidate<'a> {
    path: String,
    node: &'a Node,
}

impl Node {
    /// Returns the node addressed by `path`, relative to this node.
    ///
    /// Fails with [`Error::InvalidPath`] before walking when the path is
    /// malformed, [`Error::Missing`] when an entry named by any segment is
    /// absent, and [`Error::NotAContainer`] when a non-terminal segment
    /// resolves to a scalar.
    pub fn get_child(&self, path: &str) -> Result<&Node, Error> {
        self.get_child_with_options(path, &Options::default())
    }

    pub fn get_child_with_options(&self, path: &str, options: &Options) -> Result<&Node, Error> {
        let mut current = self;
        for segment in pointer::split(path)? {
            let key = pointer::decode_segment(segment);
            match current.get(&key, options)? {
                Some(child) => current = child,
                None => return Err(Error::Missing(path.to_string())),
            }
        }
        Ok(current)
    }

    /// Returns the raw text of the value addressed by `path`.
    pub fn get_value(&self, path: &str) -> Result<Box<RawValue>, Error> {
        self.get_value_with_options(path, &Options::default())
    }

    pub fn get_value_with_options(
        &self,
        path: &str,
        options: &Options,
    ) -> Result<Box<RawValue>, Error> {
        self.get_child_with_options(path, options)?.to_raw()
    }

    /// Finds every container in this subtree, this node included, whose
    /// value satisfies all `predicates` at once.
    ///
    /// A predicate `path = value` is satisfied when walking `path` from the
    /// candidate reaches an entry semantically equal to `value`. An entry
    /// absent at the final segment satisfies the predicate only when the
    /// expected value is `null`; an entry absent earlier never does.
    ///
    /// Results arrive in pre-order: a node before its children, array
    /// elements by ascending index, object members in document order. An
    /// empty predicate list matches nothing. Malformed predicate paths fail
    /// with [`Error::InvalidPath`]; nothing else a predicate does can fail.
    pub fn find_children(&self, predicates: &[PathValue]) -> Result<PathValues, Error> {
        self.find_children_with_options(predicates, &Options::default())
    }

    pub fn find_children_with_options(
        &self,
        predicates: &[PathValue],
        options: &Options,
    ) -> Result<PathValues, Error> {
        let Some((first, rest)) = predicates.split_first() else {
            return Ok(Vec::new());
        };

        let segments = decode_path(&first.path)?;
        let expected = Node::new(first.value.clone());
        let mut survivors = Vec::new();
        collect_matches(self, &segments, &expected, String::new(), options, &mut survivors);

        for predicate in rest {
            let segments = decode_path(&predicate.path)?;
            let expected = Node::new(predicate.value.clone());
            survivors.retain(|candidate| satisfies(candidate.node, &segments, &expected, options));
            if survivors.is_empty() {
                break;
            }
        }

        Ok(survivors
            .into_iter()
            .map(|candidate| PathValue::new(candidate.path, candidate.node.raw().to_owned()))
            .collect())
    }
}

fn decode_path(path: &str) -> Result<Vec<String>, Error> {
    Ok(pointer::split(path)?
        .into_iter()
        .map(|segment| pointer::decode_segment(segment).into_owned())
        .collect())
}

/// Walks the subtree in pre-order, pushing every container that satisfies
/// the predicate. Scalars are neither tested nor descended into.
fn collect_matches<'a>(
    node: &'a Node,
    segments: &[String],
    expected: &Node,
    path: String,
    options: &Options,
    out: &mut Vec<Candidate<'a>>,
) {
    let Some(container) = node.container() else {
        return;
    };
    if satisfies(node, segments, expected, options) {
        out.push(Candidate {
            path: path.clone(),
            node,
        });
    }
    match container {
        Container::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let child_path = format!("{path}/{index}");
                collect_matches(child, segments, expected, child_path, options, out);
            }
        }
        Container::Object(members) => {
            for (key, child) in members {
                let child_path = format!("{path}/{}", pointer::encode_segment(key));
                collect_matches(child, segments, expected, child_path, options, out);
            }
        }
    }
}

fn satisfies(candidate: &Node, segments: &[String], expected: &Node, options: &Options) -> bool {
    let Some(last) = segments.len().checked_sub(1) else {
        return false;
    };
    let mut current = candidate;
    for (depth, segment) in segments.iter().enumerate() {
        let child = match current.get(segment, options) {
            Ok(child) => child,
            Err(_) => return false,
        };
        if depth == last {
            return match child {
                Some(child) => child == expected,
                None => expected.is_null(),
            };
        }
        match child {
            Some(child) => current = child,
            None => return false,
        }
    }
    false
}
