#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs, missing_debug_implementations)]
extern crate alloc;
mod lifecycle;
mod pool;
mod poolable;

pub use lifecycle::*;
pub use pool::*;
pub use poolable::*;
