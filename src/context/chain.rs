//! Immutable context chain.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A key under which a value is stored in a [`Context`].
///
/// Each key is its own type. Lookups compare the key's `TypeId`, so two keys
/// declared in different places with the same `NAME` are distinct.
pub trait ContextKey: 'static {
    /// Type of the value stored under this key.
    type Value: Send + Sync + 'static;

    /// Human-readable name, used only in `Debug` output.
    const NAME: &'static str;
}

struct Node {
    key: TypeId,
    name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Node>>,
}

// Unlink iteratively so dropping a long chain does not recurse once per node.
impl Drop for Node {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(node) = next {
            next = Arc::into_inner(node).and_then(|mut node| node.parent.take());
        }
    }
}

/// An immutable, chainable key-value carrier for one request.
///
/// Cloning is an `Arc` bump. Every derivation returns a new context that
/// shares its ancestors, so a context can be fanned out to several children
/// and read from many threads without locking.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// An empty root context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a child context that carries `value` under `K`.
    #[must_use]
    pub fn with_value<K: ContextKey>(&self, value: K::Value) -> Self {
        Self {
            head: Some(Arc::new(Node {
                key: TypeId::of::<K>(),
                name: K::NAME,
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Look up the newest value stored under `K`.
    ///
    /// A value that does not downcast to `K::Value` reads as `None`.
    pub fn value<K: ContextKey>(&self) -> Option<&K::Value> {
        let wanted = TypeId::of::<K>();
        self.nodes()
            .find(|node| node.key == wanted)
            .and_then(|node| node.value.downcast_ref::<K::Value>())
    }

    /// True when nothing has been stored on this chain.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of derivations between this context and the root.
    pub fn depth(&self) -> usize {
        self.nodes().count()
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.nodes().map(|node| node.name))
            .finish()
    }
}
