//! # Observable scalar values
//!
//! [`ObservableValue`] is a shared `f32` cell with synchronous subscribers.
//! Components own one to hold state that the rendering layer reads every
//! frame and that animation drivers advance between frames.
//!
//! ## Writers
//!
//! Every direct write through [`ObservableValue::set`] starts a new *write
//! generation*. Animation drivers call [`ObservableValue::claim`] when they
//! start and then advance the value with [`ObservableValue::drive`], which
//! only succeeds while their generation is still current. A later `set` or
//! `claim` therefore supersedes an in-flight animation without an explicit
//! cancel handle.
//!
//! ```
//! use slidekit_ui::ObservableValue;
//!
//! let value = ObservableValue::new(0.0);
//! let token = value.claim();
//! assert!(value.drive(token, 0.5));
//!
//! value.set(1.0);
//! assert!(!value.drive(token, 0.75));
//! assert_eq!(value.get(), 1.0);
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use smallvec::SmallVec;

use crate::prop::CallbackWith;

/// Identifies a subscription so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Identifies the writer generation an animation driver was started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WriteToken(u64);

struct Inner {
    value: f32,
    generation: u64,
    next_subscription: u64,
    subscribers: SmallVec<[(SubscriptionId, CallbackWith<f32>); 2]>,
}

/// A shared, observable `f32`.
///
/// Cloning the handle shares the underlying cell.
#[derive(Clone)]
pub struct ObservableValue {
    inner: Arc<RwLock<Inner>>,
}

impl ObservableValue {
    /// Creates a new cell holding `value`.
    pub fn new(value: f32) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                value,
                generation: 0,
                next_subscription: 0,
                subscribers: SmallVec::new(),
            })),
        }
    }

    /// Returns the present value.
    pub fn get(&self) -> f32 {
        self.inner.read().value
    }

    /// Writes `value` verbatim and supersedes any running animation.
    pub fn set(&self, value: f32) {
        let mut inner = self.inner.write();
        inner.generation += 1;
        self.store(inner, value);
    }

    /// Starts a new write generation and returns its token.
    ///
    /// The value itself is left untouched.
    pub fn claim(&self) -> WriteToken {
        let mut inner = self.inner.write();
        inner.generation += 1;
        WriteToken(inner.generation)
    }

    /// Writes `value` if `token` is still the current generation.
    ///
    /// Returns `false` when another writer has taken over.
    pub fn drive(&self, token: WriteToken, value: f32) -> bool {
        let inner = self.inner.write();
        if inner.generation != token.0 {
            return false;
        }
        self.store(inner, value);
        true
    }

    /// Whether `token` is still the current generation.
    pub fn is_current(&self, token: WriteToken) -> bool {
        self.inner.read().generation == token.0
    }

    /// Registers a handler that runs after every change of the value.
    pub fn subscribe(&self, handler: impl Into<CallbackWith<f32>>) -> SubscriptionId {
        let mut inner = self.inner.write();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.subscribers.push((id, handler.into()));
        id
    }

    /// Removes a subscription. Returns whether it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.write();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sub, _)| *sub != id);
        inner.subscribers.len() != before
    }

    // Handlers run after the guard is dropped so they may read the cell.
    fn store(&self, mut inner: parking_lot::RwLockWriteGuard<'_, Inner>, value: f32) {
        if inner.value.to_bits() == value.to_bits() {
            return;
        }
        inner.value = value;
        let handlers: SmallVec<[CallbackWith<f32>; 2]> = inner
            .subscribers
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        drop(inner);
        for handler in handlers {
            handler.call(value);
        }
    }
}

impl std::fmt::Debug for ObservableValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ObservableValue").field(&self.get()).finish()
    }
}
