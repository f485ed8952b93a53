/// A trait defining the contract for instances managed by a pool.
///
/// Pooled objects usually have a notion of being switched on while checked
/// out and switched off while parked in the pool. This trait names those two
/// transitions so the code owning the pool can drive them uniformly.
pub trait Poolable {
    /// Puts the instance into its visible or active state.
    ///
    /// The pool never calls this method. It is reserved for the owning
    /// application code, typically right after acquiring the instance.
    fn enable(&mut self);

    /// Puts the instance into its hidden or inactive state.
    ///
    /// The pool never calls this method. It is reserved for the owning
    /// application code, typically right before returning the instance.
    fn disable(&mut self);
}
