//! Application services for hierarchical visibility.

mod visibility;

pub use visibility::{VisibilityResolver, VisibilityResult};
