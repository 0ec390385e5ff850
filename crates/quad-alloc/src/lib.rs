#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;

pub mod array;
pub mod pool;
pub mod worklist;

pub use array::DynArray;
pub use pool::{Pool, PoolHandle};
pub use worklist::Worklist;
