/*!
 * Memory Module
 * Fixed-partition memory and first-fit allocation
 */

pub mod partitions;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use partitions::{validate_layout, PartitionTable, DEFAULT_PARTITIONS};
pub use traits::*;
pub use types::*;
