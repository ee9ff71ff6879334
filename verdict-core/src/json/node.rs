//! Recursive error node codec
//!
//! Fixed properties bind to [`ErrorInfo`] fields. Every other property is
//! captured verbatim into the extension map, so metadata added by newer
//! writers survives a round trip through older readers.
//!
//! A value that is not an object decodes to no node. The caller drops it and
//! keeps reading its array, so one malformed child cannot take down the
//! document.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

use super::fields::{Bindings, Context, NodeField};
use super::lenient::{fallback_visits, LenientText};
use super::options::{CategoryFormat, ExtensionLayout};
use crate::category::ErrorCategory;
use crate::error_info::ErrorInfo;

// Each node level runs on a segment with at least this much stack left,
// growing onto the heap when it runs short.
const RED_ZONE: usize = 64 * 1024;
const STACK_SEGMENT: usize = 1024 * 1024;

/// Writes one error node and, recursively, its children
pub(crate) struct NodeRepr<'a> {
    pub node: &'a ErrorInfo,
    pub ctx: &'a Context,
}

impl Serialize for NodeRepr<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || self.write_node(serializer))
    }
}

impl NodeRepr<'_> {
    fn write_node<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names = &self.ctx.names;
        let node = self.node;
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry(
            &names.category,
            &CategoryRepr {
                category: node.category(),
                format: self.ctx.options.category_format,
            },
        )?;
        map.serialize_entry(&names.code, node.code())?;
        map.serialize_entry(&names.message, node.message())?;
        if let Some(detail) = node.detail() {
            map.serialize_entry(&names.detail, detail)?;
        }
        if let Some(data) = node.data() {
            map.serialize_entry(&names.data, data)?;
        }

        let extensions = node.extensions();
        match self.ctx.options.extension_layout {
            ExtensionLayout::Nested => {
                if !extensions.is_empty() {
                    map.serialize_entry(&names.extensions, extensions)?;
                }
            }
            ExtensionLayout::Flattened => {
                let mut reserved: BTreeMap<&str, &Value> = BTreeMap::new();
                for (key, value) in extensions {
                    if names.node_field(key).is_some() {
                        reserved.insert(key, value);
                    } else {
                        map.serialize_entry(key, value)?;
                    }
                }
                if !reserved.is_empty() {
                    map.serialize_entry(&names.extensions, &reserved)?;
                }
            }
        }

        if !node.inner_errors().is_empty() {
            map.serialize_entry(
                &names.inner_errors,
                &NodeListRepr {
                    nodes: node.inner_errors(),
                    ctx: self.ctx,
                },
            )?;
        }
        map.end()
    }
}

/// Writes an array of error nodes
pub(crate) struct NodeListRepr<'a> {
    pub nodes: &'a [ErrorInfo],
    pub ctx: &'a Context,
}

impl Serialize for NodeListRepr<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.nodes.len()))?;
        for node in self.nodes {
            seq.serialize_element(&NodeRepr { node, ctx: self.ctx })?;
        }
        seq.end()
    }
}

pub(crate) struct CategoryRepr {
    pub category: ErrorCategory,
    pub format: CategoryFormat,
}

impl Serialize for CategoryRepr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.format {
            CategoryFormat::Name => serializer.serialize_str(self.category.as_str()),
            CategoryFormat::Ordinal => serializer.serialize_u8(self.category.ordinal()),
        }
    }
}

/// Reads a category from an ordinal or a name; anything unrecognised reads
/// as the default category.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CategorySeed;

impl<'de> DeserializeSeed<'de> for CategorySeed {
    type Value = ErrorCategory;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for CategorySeed {
    type Value = ErrorCategory;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an error category name or ordinal")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ErrorCategory::from_ordinal(v).unwrap_or_default())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(u64::try_from(v)
            .ok()
            .and_then(ErrorCategory::from_ordinal)
            .unwrap_or_default())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.fract() == 0.0 && v >= 0.0 {
            Ok(ErrorCategory::from_ordinal(v as u64).unwrap_or_default())
        } else {
            Ok(ErrorCategory::default())
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ErrorCategory::from_name(v).unwrap_or_default())
    }

    fallback_visits!('de => ErrorCategory::default(); unit bool seq map);
}

/// Reads one error node; `None` when the value is not an object
#[derive(Clone, Copy)]
pub(crate) struct NodeSeed<'a> {
    pub ctx: &'a Context,
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_> {
    type Value = Option<ErrorInfo>;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for NodeSeed<'_> {
    type Value = Option<ErrorInfo>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an error object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || self.read_node(map))
    }

    fallback_visits!('de => None; unit bool i64 u64 f64 str seq);
}

impl NodeSeed<'_> {
    fn read_node<'de, A: MapAccess<'de>>(self, mut map: A) -> Result<Option<ErrorInfo>, A::Error> {
        let mut category = ErrorCategory::default();
        let mut code = None;
        let mut message = None;
        let mut detail = None;
        let mut data = None;
        let mut extensions = BTreeMap::new();
        let mut inner_errors = Vec::new();
        let mut bindings = Bindings::new();

        while let Some(key) = map.next_key::<String>()? {
            let binding = self.ctx.names.node_binding(&key);
            if bindings.is_shadowed(binding) {
                log::debug!("skipping property {key:?}: shadowed by its exact spelling");
                map.next_value::<IgnoredAny>()?;
                continue;
            }
            match bindings.admit(binding) {
                Some(NodeField::Category) => category = map.next_value_seed(CategorySeed)?,
                Some(NodeField::Code) => code = map.next_value_seed(LenientText)?,
                Some(NodeField::Message) => message = map.next_value_seed(LenientText)?,
                Some(NodeField::Detail) => detail = map.next_value_seed(LenientText)?,
                Some(NodeField::Data) => {
                    data = Some(map.next_value::<Value>()?).filter(|value| !value.is_null());
                }
                Some(NodeField::Extensions) => match map.next_value::<Value>()? {
                    Value::Object(entries) => extensions.extend(entries),
                    Value::Null => {}
                    other => {
                        extensions.insert(key, other);
                    }
                },
                Some(NodeField::InnerErrors) => {
                    inner_errors = map.next_value_seed(NodeListSeed { ctx: self.ctx })?;
                }
                None => {
                    let value = map.next_value::<Value>()?;
                    extensions.insert(key, value);
                }
            }
        }

        Ok(Some(ErrorInfo::from_parts(
            category,
            code.unwrap_or_default(),
            message.unwrap_or_default(),
            detail,
            data,
            extensions,
            inner_errors,
        )))
    }
}

/// Reads an array of error nodes, dropping entries that are not objects.
/// Anything other than an array reads as an empty list.
#[derive(Clone, Copy)]
pub(crate) struct NodeListSeed<'a> {
    pub ctx: &'a Context,
}

impl<'de> DeserializeSeed<'de> for NodeListSeed<'_> {
    type Value = Vec<ErrorInfo>;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for NodeListSeed<'_> {
    type Value = Vec<ErrorInfo>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of error objects")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut nodes = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(64));
        let mut index = 0usize;
        while let Some(node) = seq.next_element_seed(NodeSeed { ctx: self.ctx })? {
            match node {
                Some(node) => nodes.push(node),
                None => log::debug!("dropping error entry {index}: not an object"),
            }
            index += 1;
        }
        Ok(nodes)
    }

    fallback_visits!('de => Vec::new(); unit bool i64 u64 f64 str map);
}
