/*!
 * Process Module
 * Process records, state tags, and the pid-indexed arena
 */

pub mod table;
pub mod types;

// Re-export for convenience
pub use table::ProcessTable;
pub use types::{Process, ProcessSpec, ProcessState, StateKind};
