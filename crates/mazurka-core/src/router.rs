// src/router.rs
use tracing::{debug, trace};

use crate::error::{RouterError, RouterResult};
use crate::http::Method;
use crate::params::Params;
use crate::trie::{MethodMap, RouteNode, SegmentKind};

/// Result of a direct-mode lookup: a chain composed for this request.
///
/// The chain is always global middleware first, then per-node middleware in
/// path-descent order, then the method handler if one matched. `routed` is
/// false when the chain carries middleware only; the embedding server should
/// treat that as its not-found case.
pub struct RouteMatch<H> {
    pub params: Option<Params>,
    pub chain: Vec<H>,
    pub routed: bool,
}

/// Result of a compiled-mode lookup: a borrowed, precomputed chain.
pub struct CompiledMatch<'r, H> {
    pub params: Option<Params>,
    pub chain: &'r [H],
    pub routed: bool,
}

/// Trie-backed dispatch table for one service.
///
/// Lifecycle: register routes and middleware during startup, then serve
/// lookups. `match_route` composes the handler chain per request against the
/// live trie; `find` compiles every chain once on first use and afterwards
/// resolves lookups with a plain tree walk. Compiling seals the router:
/// later registration returns [`RouterError::Sealed`] instead of silently
/// leaving stale chains behind.
#[derive(Clone)]
pub struct Router<H> {
    root: RouteNode<H>,
    global_middleware: Vec<H>,
    compiled: bool,
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    // leading, trailing and doubled slashes all normalize away
    path.split('/').filter(|s| !s.is_empty())
}

impl<H: Clone> Router<H> {
    pub fn new() -> Self {
        Self {
            root: RouteNode::new(),
            global_middleware: Vec::new(),
            compiled: false,
        }
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Bind `handler` for `method` at `pattern`.
    ///
    /// Pattern segments are literals, `:name` captures, or a `*`/`**` suffix
    /// wildcard. Registering the same (method, pattern) twice overwrites the
    /// earlier handler.
    pub fn add_route(&mut self, method: Method, pattern: &str, handler: H) -> RouterResult<()> {
        if self.compiled {
            return Err(RouterError::Sealed);
        }
        let mut node = &mut self.root;
        for segment in segments(pattern) {
            node = node.descend(SegmentKind::of(segment));
        }
        node.handlers.insert(method, handler);
        node.terminal = true;
        trace!(method = method.as_str(), pattern, "route registered");
        Ok(())
    }

    /// Append middleware at `pattern`, in registration order.
    ///
    /// Pattern `/` targets the global list, which runs ahead of every chain
    /// this router produces. Any other pattern scopes the middleware to the
    /// requests that traverse it; no route needs to exist there. A wildcard
    /// segment additionally appends at the node it hangs off, matching the
    /// early exit wildcards take during lookup.
    pub fn add_middleware<I>(&mut self, pattern: &str, handlers: I) -> RouterResult<()>
    where
        I: IntoIterator<Item = H>,
    {
        if self.compiled {
            return Err(RouterError::Sealed);
        }
        let handlers: Vec<H> = handlers.into_iter().collect();
        let mut walk = segments(pattern).peekable();
        if walk.peek().is_none() {
            self.global_middleware.extend(handlers);
            return Ok(());
        }
        let mut node = &mut self.root;
        for segment in walk {
            let kind = SegmentKind::of(segment);
            if matches!(kind, SegmentKind::Wildcard) {
                node.middleware.extend(handlers.iter().cloned());
            }
            node = node.descend(kind);
        }
        node.middleware.extend(handlers);
        node.terminal = true;
        trace!(pattern, "middleware registered");
        Ok(())
    }

    /// Resolve (method, path) against the live trie, composing the chain on
    /// the fly.
    ///
    /// Never fails: a miss returns the middleware accumulated down to the
    /// deepest resolvable node (global middleware included) with `routed`
    /// false. Precedence at every level is literal, then param, then
    /// wildcard, and the first choice is final — there is no backtracking,
    /// which keeps the walk linear in the segment count.
    pub fn match_route(&self, method: Method, path: &str) -> RouteMatch<H> {
        let mut node = &self.root;
        let mut chain: Vec<H> = self.global_middleware.clone();
        // the root is an entered node too: wildcard-first patterns like `/*`
        // hang their pre-descent middleware off it
        chain.extend(self.root.middleware.iter().cloned());
        let mut params: Option<Params> = None;

        for segment in segments(path) {
            if let Some(child) = node.children.get(segment) {
                node = child;
            } else if let Some(child) = node.param.as_deref() {
                node = child;
                if let Some(name) = &node.param_name {
                    params
                        .get_or_insert_with(Params::new)
                        .insert(name.clone(), segment.to_string());
                }
            } else if let Some(child) = node.wildcard.as_deref() {
                // wildcard swallows the remaining segments
                node = child;
                chain.extend(node.middleware.iter().cloned());
                break;
            } else {
                return RouteMatch {
                    params,
                    chain,
                    routed: false,
                };
            }
            chain.extend(node.middleware.iter().cloned());
        }

        match node.handlers.get(method) {
            Some(handler) => {
                chain.push(handler.clone());
                RouteMatch {
                    params,
                    chain,
                    routed: true,
                }
            }
            None => RouteMatch {
                params,
                chain,
                routed: false,
            },
        }
    }

    /// Precompute every handler chain and seal the router.
    ///
    /// One depth-first pass carrying the inherited middleware list: each
    /// terminal node gets its full per-method chain, and every node records
    /// its prefix chain so that misses and method mismatches resolve to the
    /// same chains direct mode would compose. Safe to call again; the pass
    /// rebuilds from scratch.
    pub fn compile(&mut self) {
        let routes = Self::compile_node(&mut self.root, &self.global_middleware);
        self.compiled = true;
        debug!(routes, "handler chains compiled");
    }

    fn compile_node(node: &mut RouteNode<H>, inherited: &[H]) -> usize {
        let mut current = inherited.to_vec();
        current.extend(node.middleware.iter().cloned());

        let mut fresh = MethodMap::new();
        let mut routes = 0;
        if node.terminal {
            for (method, handler) in node.handlers.iter() {
                let mut chain = current.clone();
                chain.push(handler.clone());
                fresh.insert(method, chain);
                routes += 1;
            }
        }
        node.compiled = fresh;
        node.prefix_chain = current.clone();

        for child in node.children.values_mut() {
            routes += Self::compile_node(child, &current);
        }
        if let Some(child) = node.param.as_deref_mut() {
            routes += Self::compile_node(child, &current);
        }
        if let Some(child) = node.wildcard.as_deref_mut() {
            routes += Self::compile_node(child, &current);
        }
        routes
    }

    /// Resolve (method, path) against the compiled chains.
    ///
    /// Same walk and same precedence as [`match_route`](Self::match_route),
    /// but the returned chain is a borrowed slice — nothing is composed per
    /// request. Only meaningful after [`compile`](Self::compile); use
    /// [`find`](Self::find) to get compilation handled transparently.
    pub fn compiled_match(&self, method: Method, path: &str) -> CompiledMatch<'_, H> {
        let mut node = &self.root;
        let mut params: Option<Params> = None;

        for segment in segments(path) {
            if let Some(child) = node.children.get(segment) {
                node = child;
            } else if let Some(child) = node.param.as_deref() {
                node = child;
                if let Some(name) = &node.param_name {
                    params
                        .get_or_insert_with(Params::new)
                        .insert(name.clone(), segment.to_string());
                }
            } else if let Some(child) = node.wildcard.as_deref() {
                node = child;
                break;
            } else {
                return CompiledMatch {
                    params,
                    chain: &node.prefix_chain,
                    routed: false,
                };
            }
        }

        match node.compiled.get(method) {
            Some(chain) => CompiledMatch {
                params,
                chain,
                routed: true,
            },
            None => CompiledMatch {
                params,
                chain: &node.prefix_chain,
                routed: false,
            },
        }
    }

    /// Dispatch entry point: compiles once on first use, then always
    /// delegates to [`compiled_match`](Self::compiled_match).
    pub fn find(&mut self, method: Method, path: &str) -> CompiledMatch<'_, H> {
        if !self.compiled {
            self.compile();
        }
        self.compiled_match(method, path)
    }

    // Convenience methods
    pub fn get(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.add_route(Method::Get, pattern, handler)
    }
    pub fn post(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.add_route(Method::Post, pattern, handler)
    }
    pub fn put(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.add_route(Method::Put, pattern, handler)
    }
    pub fn delete(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.add_route(Method::Delete, pattern, handler)
    }
    pub fn patch(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.add_route(Method::Patch, pattern, handler)
    }
    pub fn head(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.add_route(Method::Head, pattern, handler)
    }
    pub fn options(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.add_route(Method::Options, pattern, handler)
    }
    pub fn trace(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.add_route(Method::Trace, pattern, handler)
    }
    pub fn connect(&mut self, pattern: &str, handler: H) -> RouterResult<()> {
        self.add_route(Method::Connect, pattern, handler)
    }
}

impl<H: Clone> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}
