//! Wire property names
//!
//! Names are computed once per codec from the naming policy. Readers accept
//! the policy spelling and any other spelling that folds to the same letters
//! (case, `_` and `-` ignored), so documents written under another policy
//! still decode. Within one object the policy spelling takes precedence: a
//! folded spelling of a field that is also present under its policy spelling
//! is skipped, whichever comes first.

use std::sync::LazyLock;

use super::naming::NamingPolicy;
use super::options::CodecOptions;

/// Properties the container reader binds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerField {
    Value,
    Status,
    Messages,
    Errors,
}

/// Properties of a status object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusField {
    Code,
    Description,
}

/// Fixed properties of an error node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeField {
    Category,
    Code,
    Message,
    Detail,
    Data,
    Extensions,
    InnerErrors,
}

const CONTAINER_FIELDS: [(ContainerField, &str); 4] = [
    (ContainerField::Value, "value"),
    (ContainerField::Status, "status"),
    (ContainerField::Messages, "messages"),
    (ContainerField::Errors, "errors"),
];

const STATUS_FIELDS: [(StatusField, &str); 2] = [
    (StatusField::Code, "code"),
    (StatusField::Description, "description"),
];

const NODE_FIELDS: [(NodeField, &str); 7] = [
    (NodeField::Category, "category"),
    (NodeField::Code, "code"),
    (NodeField::Message, "message"),
    (NodeField::Detail, "detail"),
    (NodeField::Data, "data"),
    (NodeField::Extensions, "extensions"),
    (NodeField::InnerErrors, "innerErrors"),
];

/// Property names after the naming policy
#[derive(Debug, Clone)]
pub(crate) struct FieldNames {
    pub is_success: String,
    pub is_failure: String,
    pub status: String,
    pub messages: String,
    pub errors: String,
    pub error_message: String,
    pub value: String,
    pub code: String,
    pub description: String,
    pub category: String,
    pub message: String,
    pub detail: String,
    pub data: String,
    pub extensions: String,
    pub inner_errors: String,
}

impl FieldNames {
    pub fn new(policy: NamingPolicy) -> Self {
        Self {
            is_success: policy.apply("isSuccess"),
            is_failure: policy.apply("isFailure"),
            status: policy.apply("status"),
            messages: policy.apply("messages"),
            errors: policy.apply("errors"),
            error_message: policy.apply("errorMessage"),
            value: policy.apply("value"),
            code: policy.apply("code"),
            description: policy.apply("description"),
            category: policy.apply("category"),
            message: policy.apply("message"),
            detail: policy.apply("detail"),
            data: policy.apply("data"),
            extensions: policy.apply("extensions"),
            inner_errors: policy.apply("innerErrors"),
        }
    }

    pub fn node_field(&self, key: &str) -> Option<NodeField> {
        self.node_binding(key).map(|(field, _)| field)
    }

    /// Field for `key`, and whether `key` is the policy spelling
    pub fn container_binding(&self, key: &str) -> Option<(ContainerField, bool)> {
        lookup(key, &CONTAINER_FIELDS, |field| match field {
            ContainerField::Value => &self.value,
            ContainerField::Status => &self.status,
            ContainerField::Messages => &self.messages,
            ContainerField::Errors => &self.errors,
        })
    }

    pub fn status_binding(&self, key: &str) -> Option<(StatusField, bool)> {
        lookup(key, &STATUS_FIELDS, |field| match field {
            StatusField::Code => &self.code,
            StatusField::Description => &self.description,
        })
    }

    pub fn node_binding(&self, key: &str) -> Option<(NodeField, bool)> {
        lookup(key, &NODE_FIELDS, |field| match field {
            NodeField::Category => &self.category,
            NodeField::Code => &self.code,
            NodeField::Message => &self.message,
            NodeField::Detail => &self.detail,
            NodeField::Data => &self.data,
            NodeField::Extensions => &self.extensions,
            NodeField::InnerErrors => &self.inner_errors,
        })
    }
}

fn lookup<'a, F: Copy>(
    key: &str,
    table: &[(F, &str)],
    written: impl Fn(F) -> &'a String,
) -> Option<(F, bool)> {
    table
        .iter()
        .find(|(field, _)| key == written(*field).as_str())
        .map(|(field, _)| (*field, true))
        .or_else(|| {
            table
                .iter()
                .find(|(_, canonical)| folds_to(key, canonical))
                .map(|(field, _)| (*field, false))
        })
}

/// Fields one object has bound under their policy spelling
#[derive(Debug)]
pub(crate) struct Bindings<F> {
    exact: Vec<F>,
}

impl<F: Copy + PartialEq> Bindings<F> {
    pub fn new() -> Self {
        Self { exact: Vec::new() }
    }

    /// Field to bind for a looked-up key. `None` for unknown keys and for a
    /// folded spelling of a field already bound exactly.
    pub fn admit(&mut self, binding: Option<(F, bool)>) -> Option<F> {
        let (field, exact) = binding?;
        if exact {
            if !self.exact.contains(&field) {
                self.exact.push(field);
            }
            Some(field)
        } else if self.exact.contains(&field) {
            None
        } else {
            Some(field)
        }
    }

    /// Whether `binding` names a field already bound exactly
    pub fn is_shadowed(&self, binding: Option<(F, bool)>) -> bool {
        matches!(binding, Some((field, false)) if self.exact.contains(&field))
    }
}

/// `key` equals `canonical` ignoring ASCII case, `_` and `-`
fn folds_to(key: &str, canonical: &str) -> bool {
    key.chars()
        .filter(|c| !matches!(c, '_' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .eq(canonical.chars().map(|c| c.to_ascii_lowercase()))
}

/// Names and options shared by every reader and writer of one codec
#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub names: FieldNames,
    pub options: CodecOptions,
}

impl Context {
    pub fn new(options: CodecOptions) -> Self {
        Self {
            names: FieldNames::new(options.naming_policy),
            options,
        }
    }

    /// Context for the plain `Serialize`/`Deserialize` impls
    pub fn default_ref() -> &'static Context {
        static DEFAULT: LazyLock<Context> = LazyLock::new(|| Context::new(CodecOptions::default()));
        &DEFAULT
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(CodecOptions::default())
    }
}
