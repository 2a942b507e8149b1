/*!
 * Memory Traits
 * Memory reporting abstractions
 */

use super::types::*;
use crate::core::types::{Pid, Size};

/// Read-only view over partition usage
pub trait MemoryInfo {
    /// Aggregate usage across every partition
    fn stats(&self) -> MemoryStats;

    /// `(total, used, available)` in memory units
    fn info(&self) -> (Size, Size, Size);

    /// Units occupied on behalf of `pid`; 0 when it holds no partition
    fn process_memory(&self, pid: Pid) -> Size;

    /// Usage bucket derived from [`MemoryInfo::stats`]
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
