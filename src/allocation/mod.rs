pub mod allocator;
pub mod labels;

pub use allocator::{allocate, block_sizes, rank_order, Allocation};
pub use labels::{section_label, section_labels};
