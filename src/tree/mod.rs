//! Tree state, ordering and rendering.

pub mod filter;
pub mod render;
pub mod sort;
pub mod state;

pub use filter::apply_search;
pub use render::{NodeHandle, TreeView, ViewKind, ViewNode};
pub use sort::{compare_names, compare_nodes, sort_children};
pub use state::{RangeAnchor, StateChange, TreeState};
