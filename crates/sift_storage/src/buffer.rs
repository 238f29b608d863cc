//! Scoped transient buffers and allocation tracking.
//!
//! Queries and the buffers they materialize hold a [`Lease`] on their
//! world's [`AllocationTracker`]. Dropping the owner releases the lease, so
//! outstanding counts return to zero on every exit path, unwinding included.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::trace;

/// What a [`Lease`] accounts for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LeaseKind {
    /// A materialized [`NativeBuffer`].
    Buffer,
    /// A live [`EntityQuery`](crate::EntityQuery).
    Query,
}

/// Counts outstanding query handles and buffers for one world.
#[derive(Debug, Default)]
pub struct AllocationTracker {
    buffers: AtomicUsize,
    queries: AtomicUsize,
}

impl AllocationTracker {
    /// Creates a tracker with nothing outstanding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffers not yet released.
    #[must_use]
    pub fn live_buffers(&self) -> usize {
        self.buffers.load(Ordering::Acquire)
    }

    /// Number of query handles not yet released.
    #[must_use]
    pub fn live_queries(&self) -> usize {
        self.queries.load(Ordering::Acquire)
    }

    /// Acquires a lease of the given kind.
    #[must_use]
    pub fn lease(self: &Arc<Self>, kind: LeaseKind) -> Lease {
        let live = self.counter(kind).fetch_add(1, Ordering::AcqRel) + 1;
        trace!(?kind, live, "acquired");
        Lease {
            tracker: Arc::clone(self),
            kind,
        }
    }

    fn counter(&self, kind: LeaseKind) -> &AtomicUsize {
        match kind {
            LeaseKind::Buffer => &self.buffers,
            LeaseKind::Query => &self.queries,
        }
    }
}

/// An outstanding allocation, released on drop.
pub struct Lease {
    tracker: Arc<AllocationTracker>,
    kind: LeaseKind,
}

impl Lease {
    /// What this lease accounts for.
    #[must_use]
    pub fn kind(&self) -> LeaseKind {
        self.kind
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        let live = self.tracker.counter(self.kind).fetch_sub(1, Ordering::AcqRel) - 1;
        trace!(kind = ?self.kind, live, "released");
    }
}

impl fmt::Debug for Lease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lease").field(&self.kind).finish()
    }
}

/// A transient buffer owned by one call.
///
/// Dereferences to a slice. Dropping the buffer (or converting it with
/// [`NativeBuffer::into_vec`]) releases its lease.
pub struct NativeBuffer<T> {
    data: Vec<T>,
    _lease: Lease,
}

/// Buffer of entity handles.
pub type EntityBuffer = NativeBuffer<sift_foundation::EntityId>;

impl<T> NativeBuffer<T> {
    pub(crate) fn new(capacity: usize, lease: Lease) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            _lease: lease,
        }
    }

    /// Appends a value.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    /// Copies the contents into an owned vector; the buffer stays leased.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }

    /// Releases the buffer and returns its contents.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<T> {
        std::mem::take(&mut self.data)
    }

    /// Releases the buffer now.
    pub fn dispose(self) {}
}

impl<T> Deref for NativeBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T> Extend<T> for NativeBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

impl<T: fmt::Debug> fmt::Debug for NativeBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.data).finish()
    }
}
