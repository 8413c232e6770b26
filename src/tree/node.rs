//! Tree node owned by its parent

use std::collections::HashMap;

/// One level of a `MultiLevelMap`.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: Option<T>,
    pub(crate) children: HashMap<String, Node<T>>,
}

impl<T> Node<T> {
    pub(crate) fn new() -> Self {
        Self {
            value: None,
            children: HashMap::new(),
        }
    }

    /// Valueless and childless; such nodes are pruned on delete
    pub(crate) fn is_vacant(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// Follow an exact label path
    pub(crate) fn descend<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node<T>> {
        let mut node = self;
        for label in path {
            node = node.children.get(label.as_ref())?;
        }
        Some(node)
    }

    /// Push every value at or below this node onto `out`
    pub(crate) fn collect_values<'a>(&'a self, out: &mut Vec<&'a T>) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Some(value) = &node.value {
                out.push(value);
            }
            stack.extend(node.children.values());
        }
    }
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self::new()
    }
}
