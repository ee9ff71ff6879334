//! Structured error nodes
//!
//! An [`ErrorInfo`] describes one failure. Nodes nest through
//! [`ErrorInfo::inner_errors`] to form a tree of arbitrary depth, and carry an
//! open extension map for metadata that has no fixed field.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::category::ErrorCategory;

/// One structured error, possibly with nested children
///
/// Trees may be arbitrarily deep. Cloning, comparing and dropping never
/// recurse, so depth is bounded only by memory.
#[derive(Debug, Default)]
pub struct ErrorInfo {
    category: ErrorCategory,
    code: String,
    message: String,
    detail: Option<String>,
    data: Option<Value>,
    extensions: BTreeMap<String, Value>,
    inner_errors: Vec<ErrorInfo>,
}

impl ErrorInfo {
    /// Create an error node with the required fields
    pub fn new(
        category: ErrorCategory,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code: code.into(),
            message: message.into(),
            detail: None,
            data: None,
            extensions: BTreeMap::new(),
            inner_errors: Vec::new(),
        }
    }

    /// [`ErrorCategory::Failure`] node
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Failure, code, message)
    }

    /// [`ErrorCategory::Unexpected`] node
    pub fn unexpected(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Unexpected, code, message)
    }

    /// [`ErrorCategory::Validation`] node
    pub fn validation(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Validation, code, message)
    }

    /// [`ErrorCategory::NotFound`] node
    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::NotFound, code, message)
    }

    /// [`ErrorCategory::Conflict`] node
    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Conflict, code, message)
    }

    /// Attach a detail string
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach an opaque payload. `null` clears it.
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        let data = data.into();
        self.data = (!data.is_null()).then_some(data);
        self
    }

    /// Add or replace an extension entry
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    /// Append an already built child
    pub fn with_inner(mut self, inner: ErrorInfo) -> Self {
        self.inner_errors.push(inner);
        self
    }

    /// Append several already built children
    pub fn with_inner_errors(mut self, inner: impl IntoIterator<Item = ErrorInfo>) -> Self {
        self.inner_errors.extend(inner);
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        category: ErrorCategory,
        code: String,
        message: String,
        detail: Option<String>,
        data: Option<Value>,
        extensions: BTreeMap<String, Value>,
        inner_errors: Vec<ErrorInfo>,
    ) -> Self {
        Self {
            category,
            code,
            message,
            detail,
            data,
            extensions,
            inner_errors,
        }
    }

    /// Category
    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    /// Machine readable code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Optional detail
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Optional opaque payload
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Extension entries
    pub fn extensions(&self) -> &BTreeMap<String, Value> {
        &self.extensions
    }

    /// Single extension entry
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// Nested errors in insertion order
    pub fn inner_errors(&self) -> &[ErrorInfo] {
        &self.inner_errors
    }

    /// Depth of the tree rooted at this node; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        // Trees may be arbitrarily deep, so no recursion here.
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.inner_errors.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// Depth-first, pre-order traversal yielding each node with its depth
    /// (this node is depth 0).
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(self, 0)],
        }
    }
}

impl ErrorInfo {
    /// Copy of this node's own fields around the given children
    fn with_children(&self, inner_errors: Vec<ErrorInfo>) -> Self {
        Self {
            category: self.category,
            code: self.code.clone(),
            message: self.message.clone(),
            detail: self.detail.clone(),
            data: self.data.clone(),
            extensions: self.extensions.clone(),
            inner_errors,
        }
    }

    /// Equality of this node's own fields and child count
    fn shallow_eq(&self, other: &Self) -> bool {
        self.category == other.category
            && self.code == other.code
            && self.message == other.message
            && self.detail == other.detail
            && self.data == other.data
            && self.extensions == other.extensions
            && self.inner_errors.len() == other.inner_errors.len()
    }
}

impl Clone for ErrorInfo {
    fn clone(&self) -> Self {
        enum Step<'a> {
            Enter(&'a ErrorInfo),
            Exit(&'a ErrorInfo),
        }

        // Post-order rebuild: a node's children are the last entries of
        // `built` when it exits.
        let mut steps = vec![Step::Enter(self)];
        let mut built: Vec<ErrorInfo> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(node) => {
                    steps.push(Step::Exit(node));
                    steps.extend(node.inner_errors.iter().rev().map(Step::Enter));
                }
                Step::Exit(node) => {
                    let children = built.split_off(built.len() - node.inner_errors.len());
                    built.push(node.with_children(children));
                }
            }
        }
        built.pop().unwrap_or_default()
    }
}

impl PartialEq for ErrorInfo {
    fn eq(&self, other: &Self) -> bool {
        // Pre-order sequences with child counts determine the tree.
        let mut left = self.walk();
        let mut right = other.walk();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some((a, _)), Some((b, _))) if a.shallow_eq(b) => {}
                _ => return false,
            }
        }
    }
}

impl Drop for ErrorInfo {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.inner_errors);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.inner_errors);
        }
    }
}

/// Iterator returned by [`ErrorInfo::walk`]
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<(&'a ErrorInfo, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (&'a ErrorInfo, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack
            .extend(node.inner_errors.iter().rev().map(|child| (child, depth + 1)));
        Some((node, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> ErrorInfo {
        ErrorInfo::validation("Order.Invalid", "Order is invalid")
            .with_inner(
                ErrorInfo::validation("Order.Lines", "Lines are invalid")
                    .with_inner(ErrorInfo::validation("Line.Qty", "Quantity must be positive")),
            )
            .with_inner(ErrorInfo::not_found("Customer", "Customer missing"))
    }

    #[test]
    fn test_builder_sets_fields() {
        let error = ErrorInfo::conflict("Dup", "Already exists")
            .with_detail("key 42")
            .with_data(json!({"id": 42}))
            .with_extension("traceId", "abc");

        assert_eq!(error.category(), ErrorCategory::Conflict);
        assert_eq!(error.code(), "Dup");
        assert_eq!(error.message(), "Already exists");
        assert_eq!(error.detail(), Some("key 42"));
        assert_eq!(error.data(), Some(&json!({"id": 42})));
        assert_eq!(error.extension("traceId"), Some(&json!("abc")));
        assert!(error.inner_errors().is_empty());
    }

    #[test]
    fn test_extension_keys_are_unique() {
        let error = ErrorInfo::failure("E", "m")
            .with_extension("k", 1)
            .with_extension("k", 2);
        assert_eq!(error.extensions().len(), 1);
        assert_eq!(error.extension("k"), Some(&json!(2)));
    }

    #[test]
    fn test_depth() {
        assert_eq!(ErrorInfo::failure("E", "m").depth(), 1);
        assert_eq!(tree().depth(), 3);
    }

    #[test]
    fn test_walk_is_pre_order() {
        let error = tree();
        let visited: Vec<(&str, usize)> = error
            .walk()
            .map(|(node, depth)| (node.code(), depth))
            .collect();
        assert_eq!(
            visited,
            vec![
                ("Order.Invalid", 0),
                ("Order.Lines", 1),
                ("Line.Qty", 2),
                ("Customer", 1),
            ]
        );
    }

    fn chain(depth: usize) -> ErrorInfo {
        let mut node = ErrorInfo::failure("Leaf", "leaf");
        for level in 1..depth {
            node = ErrorInfo::failure(format!("L{level}"), "wrap").with_inner(node);
        }
        node
    }

    #[test]
    fn test_clone_and_eq_compare_whole_tree() {
        let original = tree();
        let copy = original.clone();
        assert_eq!(copy, original);
        assert_eq!(copy.walk().count(), 4);

        let reshaped = ErrorInfo::validation("Order.Invalid", "Order is invalid")
            .with_inner(ErrorInfo::validation("Order.Lines", "Lines are invalid"))
            .with_inner(ErrorInfo::validation("Line.Qty", "Quantity must be positive"))
            .with_inner(ErrorInfo::not_found("Customer", "Customer missing"));
        assert_ne!(reshaped, original);
        assert_ne!(tree().with_extension("k", 1), original);
    }

    #[test]
    fn test_very_deep_tree_clones_compares_and_drops() {
        let deep = chain(200_000);
        assert_eq!(deep.depth(), 200_000);

        let copy = deep.clone();
        assert!(copy == deep);
        assert!(copy != chain(199_999));
        drop(copy);
        drop(deep);
    }
}
