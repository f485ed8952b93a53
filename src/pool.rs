use crate::{PoolLifecycle, Poolable};
use alloc::{
    collections::{BTreeMap, VecDeque},
    rc::Rc,
};
use core::{
    cell::{Ref, RefCell, RefMut},
    fmt, mem,
};
use log::{debug, trace};

/// Number of instances created eagerly by [`Pool::new`].
pub const DEFAULT_INITIAL_COUNT: usize = 10;

/// An instance shared between the pool and an outstanding checkout guard.
type Shared<T> = Rc<RefCell<T>>;

/// Bookkeeping for the instances a pool tracks.
///
/// Every tracked instance is in exactly one of the two collections. The
/// available queue is FIFO: the instance parked longest is handed out first.
/// Membership is keyed by a monotonically assigned id, so moving a specific
/// instance between the collections never relies on value equality.
struct PoolState<T> {
    available: VecDeque<(u64, Shared<T>)>,
    in_use: BTreeMap<u64, Shared<T>>,
    next_id: u64,
}

/// A struct representing an object pool that recycles instances instead of
/// discarding them, it cannot be moved between threads.
///
/// The pool creates instances lazily through its [`PoolLifecycle`] when a
/// checkout finds nothing available, and optionally pre-creates a batch at
/// construction. Instances live through repeated checkout/return cycles
/// until [`Pool::clear`] destroys them all at once; there is no per-instance
/// destruction or capacity-based eviction.
pub struct Pool<P: PoolLifecycle<T>, T: Poolable> {
    lifecycle: P,
    state: RefCell<PoolState<T>>,
}

impl<P: PoolLifecycle<T>, T: Poolable> Pool<P, T> {
    /// Creates a new Pool with a given lifecycle.
    ///
    /// This method immediately creates [`DEFAULT_INITIAL_COUNT`] instances,
    /// each triggering the lifecycle's `on_create` hook.
    pub fn new(lifecycle: P) -> Self {
        Self::new_prefilled(DEFAULT_INITIAL_COUNT, lifecycle)
    }

    /// Creates a new Pool, eagerly creating `initial_count` instances.
    ///
    /// Each pre-created instance triggers the lifecycle's `on_create` hook.
    /// An `initial_count` of zero performs no eager creation and the pool
    /// fills lazily on demand.
    pub fn new_prefilled(initial_count: usize, lifecycle: P) -> Self {
        let pool = Pool {
            lifecycle,
            state: RefCell::new(PoolState {
                available: VecDeque::with_capacity(initial_count),
                in_use: BTreeMap::new(),
                next_id: 0,
            }),
        };
        debug!("prefilling pool with {} instances", initial_count);
        for _ in 0..initial_count {
            let entry = pool.create_instance();
            pool.state.borrow_mut().available.push_back(entry);
        }
        pool
    }

    /// Checks an instance out of the pool.
    ///
    /// If no instance is available, a new one is created using the lifecycle
    /// factory. Among available instances the one parked longest is handed
    /// out first. The returned guard gives access to the instance and hands
    /// it back to the pool when released or dropped.
    pub fn acquire(&self) -> PoolGuard<'_, P, T> {
        let reused = self.state.borrow_mut().available.pop_front();
        let (id, obj) = match reused {
            Some(entry) => entry,
            None => self.create_instance(),
        };
        self.state.borrow_mut().in_use.insert(id, Rc::clone(&obj));
        trace!("checked out instance {}", id);
        PoolGuard {
            id,
            obj,
            pool: self,
        }
    }

    /// Attempts to check an instance out of the pool.
    ///
    /// Unlike [`Self::acquire`], this method never invokes the factory: if
    /// no instance is available, None is returned.
    pub fn try_acquire(&self) -> Option<PoolGuard<'_, P, T>> {
        let (id, obj) = self.state.borrow_mut().available.pop_front()?;
        self.state.borrow_mut().in_use.insert(id, Rc::clone(&obj));
        trace!("checked out instance {}", id);
        Some(PoolGuard {
            id,
            obj,
            pool: self,
        })
    }

    /// Destroys every instance the pool tracks, checked out or not.
    ///
    /// Each tracked instance triggers the lifecycle's `on_destroy` hook
    /// exactly once, after which the pool is empty but fully usable: a
    /// subsequent [`Self::acquire`] recreates instances from the factory.
    ///
    /// Instances currently checked out stay alive until their guard goes
    /// away; returning them after a clear is a no-op.
    pub fn clear(&self) {
        let (available, in_use) = {
            let mut state = self.state.borrow_mut();
            (
                mem::take(&mut state.available),
                mem::take(&mut state.in_use),
            )
        };
        debug!(
            "clearing pool, destroying {} instances",
            available.len() + in_use.len()
        );
        for (_, obj) in available.into_iter().chain(in_use) {
            self.lifecycle.on_destroy(&mut obj.borrow_mut());
        }
    }

    /// Gets the number of instances currently parked in the pool, ready to
    /// be checked out without invoking the factory.
    pub fn available_count(&self) -> usize {
        self.state.borrow().available.len()
    }

    /// Gets the number of instances currently checked out of the pool.
    pub fn in_use_count(&self) -> usize {
        self.state.borrow().in_use.len()
    }

    /// Gets the total number of instances the pool tracks, parked and
    /// checked out combined.
    pub fn total_count(&self) -> usize {
        let state = self.state.borrow();
        state.available.len() + state.in_use.len()
    }

    /// Creates a fresh instance and assigns it a tracking id.
    ///
    /// The `on_create` hook runs here, before the instance is wrapped for
    /// sharing, so it fires exactly once per instance and never at reuse.
    fn create_instance(&self) -> (u64, Shared<T>) {
        let mut obj = self.lifecycle.create();
        self.lifecycle.on_create(&mut obj);
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            id
        };
        debug!("created instance {}", id);
        (id, Rc::new(RefCell::new(obj)))
    }

    /// Moves a checked-out instance back into the available queue.
    ///
    /// Returning an instance the pool no longer tracks (the pool was cleared
    /// while it was checked out) is a no-op: nothing is appended and no hook
    /// fires, so an instance can never end up in the queue twice.
    fn return_instance(&self, id: u64, obj: &Shared<T>) {
        let mut state = self.state.borrow_mut();
        if state.in_use.remove(&id).is_none() {
            trace!("ignoring return of untracked instance {}", id);
            return;
        }
        state.available.push_back((id, Rc::clone(obj)));
        drop(state);
        self.lifecycle.on_release(&mut obj.borrow_mut());
        trace!("returned instance {} to the pool", id);
    }
}

impl<P: PoolLifecycle<T>, T: Poolable> fmt::Debug for Pool<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Pool")
            .field("available", &state.available.len())
            .field("in_use", &state.in_use.len())
            .finish()
    }
}

/// A struct representing a guard over a checked-out instance.
///
/// This struct ensures that the instance is returned to the pool when it is
/// dropped; [`Self::release`] does the same explicitly.
pub struct PoolGuard<'a, P: PoolLifecycle<T>, T: Poolable> {
    id: u64,
    obj: Shared<T>,
    pool: &'a Pool<P, T>,
}

impl<'a, P: PoolLifecycle<T>, T: Poolable> PoolGuard<'a, P, T> {
    /// Borrows the checked-out instance.
    pub fn get(&self) -> Ref<'_, T> {
        self.obj.borrow()
    }

    /// Mutably borrows the checked-out instance.
    pub fn get_mut(&self) -> RefMut<'_, T> {
        self.obj.borrow_mut()
    }

    /// Returns the instance to the pool immediately.
    ///
    /// Dropping the guard has the same effect; this method only makes the
    /// hand-back explicit at the call site.
    pub fn release(self) {
        drop(self);
    }
}

/// Implementation of the Drop trait for PoolGuard.
///
/// This ensures that the instance is returned to the pool when the guard is
/// dropped, unless the pool was cleared in the meantime.
impl<'a, P: PoolLifecycle<T>, T: Poolable> Drop for PoolGuard<'a, P, T> {
    fn drop(&mut self) {
        self.pool.return_instance(self.id, &self.obj);
    }
}

impl<'a, P: PoolLifecycle<T>, T: Poolable> fmt::Debug for PoolGuard<'a, P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolGuard").field("id", &self.id).finish()
    }
}
