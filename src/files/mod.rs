//! Filesystem side of request handling.
//!
//! - **`normalize`**: collapses `.`/`..` segments without escaping the root
//! - **`resolver`**: maps a request target to a file, directory or nothing
//! - **`listing`**: renders directory contents as HTML

pub mod listing;
pub mod normalize;
pub mod resolver;

pub use resolver::{Resolver, Target};
