// src/trie.rs
use std::collections::HashMap;

use crate::http::Method;

/// Fixed-size method-to-value map, indexed by the `Method` discriminant.
#[derive(Clone)]
pub(crate) struct MethodMap<T> {
    slots: [Option<T>; Method::COUNT],
}

impl<T> MethodMap<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: [const { None }; Method::COUNT],
        }
    }

    pub(crate) fn get(&self, method: Method) -> Option<&T> {
        self.slots[method.index()].as_ref()
    }

    pub(crate) fn insert(&mut self, method: Method, value: T) {
        self.slots[method.index()] = Some(value);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Method, &T)> {
        Method::ALL
            .iter()
            .filter_map(|&m| self.slots[m.index()].as_ref().map(|v| (m, v)))
    }
}

impl<T> Default for MethodMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// How a single pattern segment participates in matching.
pub(crate) enum SegmentKind<'a> {
    Literal(&'a str),
    Param(&'a str),
    Wildcard,
}

impl<'a> SegmentKind<'a> {
    pub(crate) fn of(segment: &'a str) -> Self {
        if let Some(name) = segment.strip_prefix(':') {
            SegmentKind::Param(name)
        } else if segment.starts_with('*') {
            // `*` and `**` both swallow the remaining path
            SegmentKind::Wildcard
        } else {
            SegmentKind::Literal(segment)
        }
    }
}

/// One node per distinct path segment position.
///
/// A node is reachable through exactly one edge of its parent: a literal
/// child, the param child, or the wildcard child. Handlers are bound only at
/// terminal nodes; middleware hangs off any node a pattern walks through.
#[derive(Clone)]
pub struct RouteNode<H> {
    pub(crate) children: HashMap<String, RouteNode<H>>,
    pub(crate) param: Option<Box<RouteNode<H>>>,
    pub(crate) wildcard: Option<Box<RouteNode<H>>>,
    pub(crate) terminal: bool,
    pub(crate) handlers: MethodMap<H>,
    pub(crate) middleware: Vec<H>,
    pub(crate) param_name: Option<String>,
    /// Per-method chains precomputed by `Router::compile`.
    pub(crate) compiled: MethodMap<Vec<H>>,
    /// Global + path-descent middleware up to and including this node,
    /// precomputed by `Router::compile`. Serves misses and method mismatches.
    pub(crate) prefix_chain: Vec<H>,
}

impl<H> RouteNode<H> {
    pub(crate) fn new() -> Self {
        Self {
            children: HashMap::new(),
            param: None,
            wildcard: None,
            terminal: false,
            handlers: MethodMap::new(),
            middleware: Vec::new(),
            param_name: None,
            compiled: MethodMap::new(),
            prefix_chain: Vec::new(),
        }
    }

    /// Walk or create the child for one pattern segment.
    pub(crate) fn descend(&mut self, kind: SegmentKind<'_>) -> &mut RouteNode<H> {
        match kind {
            SegmentKind::Literal(segment) => self
                .children
                .entry(segment.to_string())
                .or_insert_with(RouteNode::new),
            SegmentKind::Param(name) => {
                let child = self.param.get_or_insert_with(|| Box::new(RouteNode::new()));
                if !name.is_empty() {
                    // last registration wins, same as duplicate handlers
                    child.param_name = Some(name.to_string());
                }
                child
            }
            SegmentKind::Wildcard => self
                .wildcard
                .get_or_insert_with(|| Box::new(RouteNode::new())),
        }
    }
}
