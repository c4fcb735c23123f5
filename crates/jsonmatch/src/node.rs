use std::{cell::OnceCell, fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Value, value::RawValue};

use crate::{error::Error, options::Options};

/// The container shape of a JSON value as seen by navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Array,
    Object,
    /// Strings, numbers, booleans and null. Never has children.
    Other,
}

/// A JSON value held as its raw encoded text.
///
/// A node keeps the exact text it was built from and decodes one level of
/// children the first time navigation steps into it. The decoded children
/// are cached, so a subtree is materialized at most once no matter how many
/// lookups or searches touch it.
#[derive(Debug)]
pub struct Node {
    raw: Box<RawValue>,
    container: OnceCell<Option<Container>>,
}

#[derive(Debug)]
pub(crate) enum Container {
    Array(Vec<Node>),
    Object(IndexMap<String, Node>),
}

impl Node {
    /// Wraps raw JSON that has already been validated.
    pub fn new(raw: Box<RawValue>) -> Self {
        Node {
            raw,
            container: OnceCell::new(),
        }
    }

    /// Parses `bytes` as a single JSON document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Node::new(serde_json::from_slice(bytes)?))
    }

    /// The raw text this node was built from.
    pub fn raw(&self) -> &RawValue {
        &self.raw
    }

    /// The container shape of this value.
    pub fn kind(&self) -> Kind {
        if let Some(container) = self.container.get() {
            return match container {
                Some(Container::Array(_)) => Kind::Array,
                Some(Container::Object(_)) => Kind::Object,
                None => Kind::Other,
            };
        }
        match self.raw.get().trim_start().as_bytes().first() {
            Some(b'[') => Kind::Array,
            Some(b'{') => Kind::Object,
            _ => Kind::Other,
        }
    }

    /// Whether this node is the JSON literal `null`.
    pub fn is_null(&self) -> bool {
        self.raw.get().trim() == "null"
    }

    /// Re-encodes this node as owned raw text.
    ///
    /// Emits the original text verbatim unless children were materialized,
    /// in which case the value is re-encoded from them.
    pub fn to_raw(&self) -> Result<Box<RawValue>, Error> {
        match self.container.get() {
            Some(Some(_)) => Ok(serde_json::value::to_raw_value(self)?),
            _ => Ok(self.raw.to_owned()),
        }
    }

    /// Materializes direct children on first use and returns them.
    /// Scalars have no container and yield `None`.
    pub(crate) fn container(&self) -> Option<&Container> {
        self.container
            .get_or_init(|| Container::parse(&self.raw))
            .as_ref()
    }

    /// Looks up the child named by a single decoded key.
    ///
    /// `Ok(None)` means the key or index is absent, distinguished from the
    /// structural errors of addressing a scalar or using a key that is not
    /// an index on an array.
    pub(crate) fn get(&self, key: &str, options: &Options) -> Result<Option<&Node>, Error> {
        let Some(container) = self.container() else {
            return Err(Error::NotAContainer(self.to_string()));
        };
        match container {
            Container::Object(members) => {
                if options.case_insensitive_keys {
                    Ok(members
                        .iter()
                        .find(|(name, _)| name.eq_ignore_ascii_case(key))
                        .map(|(_, child)| child))
                } else {
                    Ok(members.get(key))
                }
            }
            Container::Array(items) => array_entry(items, key, options),
        }
    }

    fn decode(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(self.raw.get())
    }
}

impl Container {
    fn parse(raw: &RawValue) -> Option<Self> {
        let text = raw.get();
        match text.trim_start().as_bytes().first() {
            Some(b'[') => serde_json::from_str::<Vec<Box<RawValue>>>(text)
                .ok()
                .map(|items| Container::Array(items.into_iter().map(Node::new).collect())),
            Some(b'{') => serde_json::from_str::<IndexMap<String, Box<RawValue>>>(text)
                .ok()
                .map(|members| {
                    Container::Object(
                        members
                            .into_iter()
                            .map(|(key, value)| (key, Node::new(value)))
                            .collect(),
                    )
                }),
            _ => None,
        }
    }
}

fn array_entry<'a>(
    items: &'a [Node],
    key: &str,
    options: &Options,
) -> Result<Option<&'a Node>, Error> {
    let Ok(index) = key.parse::<i64>() else {
        return Err(Error::InvalidIndex(key.to_string()));
    };
    let index = if index < 0 {
        if !options.support_negative_indices {
            return Err(Error::InvalidIndex(key.to_string()));
        }
        let wrapped = items.len() as i64 + index;
        if wrapped < 0 {
            return Err(Error::InvalidIndex(key.to_string()));
        }
        wrapped
    } else {
        index
    };
    Ok(usize::try_from(index).ok().and_then(|index| items.get(index)))
}

fn value_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| value_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| value_equal(x, y)))
        }
        _ => a == b,
    }
}

impl FromStr for Node {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Node::new(serde_json::from_str(s)?))
    }
}

/// Semantic JSON equality: both sides fully decode and compare as values,
/// with numbers compared as f64 (`1` equals `1.0`) and object member order
/// ignored. Array order is significant.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self.decode(), other.decode()) {
            (Ok(this), Ok(that)) => value_equal(&this, &that),
            _ => false,
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.container.get() {
            Some(Some(Container::Array(items))) => items.serialize(serializer),
            Some(Some(Container::Object(members))) => members.serialize(serializer),
            _ => self.raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Box::<RawValue>::deserialize(deserializer).map(Node::new)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_raw() {
            Ok(raw) => f.write_str(raw.get()),
            Err(_) => f.write_str("unknown"),
        }
    }
}
