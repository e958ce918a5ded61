//! Pixel transforms. Each reads one buffer and fills a caller-allocated
//! output of the right shape; inputs are never modified.

mod edge;
mod rotate;

pub use edge::{EdgeMode, KERNEL, edge_detect};
pub use rotate::{rotate_left, rotate_right};
