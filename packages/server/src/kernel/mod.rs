//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{SendGridAdapter, ServerDeps};
pub use test_dependencies::{MockMailer, SentEmail};
pub use traits::*;
