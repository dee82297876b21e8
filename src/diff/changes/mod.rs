//! Change computer implementations.
//!
//! One implementation of the `ChangeComputer` trait per element category:
//! nodes, edges and root elements.

mod edges;
mod nodes;
mod roots;

pub use edges::EdgeChangeComputer;
pub use nodes::NodeChangeComputer;
pub use roots::RootChangeComputer;
