#![doc = include_str!("../README.md")]

mod connectivity;
mod error;
mod reader;
mod writer;

pub use connectivity::{Connectivity, FACES_PER_TREE};
pub use error::MeshError;
pub use reader::read_connectivity;
pub use writer::write_connectivity;
