#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]

#[macro_use]
extern crate alloc;

mod utils;

mod node;
pub use node::{Color, Direction, NodeId, NodeRef};

mod error;
pub use error::Violation;

mod tree;
pub use tree::RbTree;

mod validate;

mod float;
pub use float::FloatTree;
