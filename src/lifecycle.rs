use alloc::boxed::Box;
use core::fmt;

/// A trait defining the interface for managing pooled instance lifecycles.
///
/// This trait provides the factory producing new instances, as well as
/// optional hooks observing creation, return to the pool, and destruction.
pub trait PoolLifecycle<T> {
    /// Creates a new instance of type T.
    fn create(&self) -> T;

    /// Called once per instance, immediately after [`Self::create`] produces
    /// it, before it is ever handed out.
    ///
    /// By default, this method does nothing. Override this method to observe
    /// or finish initializing freshly created instances.
    #[inline(always)]
    fn on_create(&self, _obj: &mut T) {}

    /// Called every time an instance transitions from checked-out back into
    /// the pool.
    ///
    /// By default, this method does nothing. Override this method to reset
    /// instance state between uses.
    #[inline(always)]
    fn on_release(&self, _obj: &mut T) {}

    /// Called exactly once per tracked instance when the pool is cleared.
    ///
    /// By default, this method does nothing. Override this method to tear
    /// down resources the instance holds.
    #[inline(always)]
    fn on_destroy(&self, _obj: &mut T) {}
}

/// A [`PoolLifecycle`] assembled from plain functions.
///
/// The factory is required; each hook is optional and installed with a
/// chained setter. Useful when a dedicated lifecycle type is overkill:
///
/// ```
/// use repool::FnLifecycle;
///
/// let lifecycle = FnLifecycle::new(|| Vec::<u8>::with_capacity(512))
///     .on_release(|buf| buf.clear());
/// ```
pub struct FnLifecycle<T> {
    factory: Box<dyn Fn() -> T>,
    on_create: Option<Box<dyn Fn(&mut T)>>,
    on_release: Option<Box<dyn Fn(&mut T)>>,
    on_destroy: Option<Box<dyn Fn(&mut T)>>,
}

impl<T> FnLifecycle<T> {
    /// Creates a lifecycle from a factory function, with no hooks installed.
    pub fn new<F: Fn() -> T + 'static>(factory: F) -> Self {
        FnLifecycle {
            factory: Box::new(factory),
            on_create: None,
            on_release: None,
            on_destroy: None,
        }
    }

    /// Installs a hook called once per instance right after creation.
    pub fn on_create<F: Fn(&mut T) + 'static>(mut self, hook: F) -> Self {
        self.on_create = Some(Box::new(hook));
        self
    }

    /// Installs a hook called every time an instance returns to the pool.
    pub fn on_release<F: Fn(&mut T) + 'static>(mut self, hook: F) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }

    /// Installs a hook called once per instance when the pool is cleared.
    pub fn on_destroy<F: Fn(&mut T) + 'static>(mut self, hook: F) -> Self {
        self.on_destroy = Some(Box::new(hook));
        self
    }
}

impl<T> PoolLifecycle<T> for FnLifecycle<T> {
    fn create(&self) -> T {
        (self.factory)()
    }

    fn on_create(&self, obj: &mut T) {
        if let Some(hook) = &self.on_create {
            hook(obj);
        }
    }

    fn on_release(&self, obj: &mut T) {
        if let Some(hook) = &self.on_release {
            hook(obj);
        }
    }

    fn on_destroy(&self, obj: &mut T) {
        if let Some(hook) = &self.on_destroy {
            hook(obj);
        }
    }
}

impl<T> fmt::Debug for FnLifecycle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnLifecycle")
            .field("on_create", &self.on_create.is_some())
            .field("on_release", &self.on_release.is_some())
            .field("on_destroy", &self.on_destroy.is_some())
            .finish()
    }
}
