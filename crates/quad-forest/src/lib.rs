#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;

mod complete;
mod context;
mod forest;
mod tree;

pub use complete::{region_complete, Endpoints};
pub use context::{ForestContext, UserDataHandle};
pub use forest::Forest;
pub use tree::{Sink, StoredQuadrant, Tree};
