/*!
 * Partition Table
 * Fixed-partition memory with first-fit placement
 */

use super::traits::MemoryInfo;
use super::types::{MemorySnapshot, MemoryStats, Partition};
use crate::core::errors::{ConfigError, SimResult};
use crate::core::types::{Pid, Size};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Partition layout used when the caller does not supply one
pub const DEFAULT_PARTITIONS: [Size; 9] = [2, 2, 4, 6, 6, 8, 8, 12, 16];

/// Check a partition layout: non-empty, every size positive
pub fn validate_layout(sizes: &[Size]) -> SimResult<()> {
    if sizes.is_empty() {
        return Err(ConfigError::EmptyPartitions);
    }
    if let Some(index) = sizes.iter().position(|&size| size == 0) {
        return Err(ConfigError::ZeroSizedPartition { index });
    }
    Ok(())
}

/// Ordered sequence of partitions; order decides first-fit placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionTable {
    partitions: Vec<Partition>,
}

impl PartitionTable {
    pub fn new(sizes: &[Size]) -> SimResult<Self> {
        validate_layout(sizes)?;
        info!(partitions = sizes.len(), total = sizes.iter().sum::<Size>(), "Partition table created");
        Ok(Self {
            partitions: sizes.iter().copied().map(Partition::new).collect(),
        })
    }

    /// Index of the first free partition of at least `required` units
    pub fn first_fit(&self, required: Size) -> Option<usize> {
        self.partitions
            .iter()
            .position(|p| p.is_free() && p.size() >= required)
    }

    /// Hand partition `index` to `pid`
    ///
    /// Occupancy is capped at the partition size. Panics if the partition
    /// is already owned.
    pub fn allocate(&mut self, index: usize, pid: Pid, required: Size) {
        self.partitions[index].assign(pid, required);
        debug!(index, pid, required, "Partition allocated");
    }

    pub fn free(&mut self, index: usize) {
        self.partitions[index].release();
        debug!(index, "Partition freed");
    }

    /// Replace the whole layout, discarding every owner
    pub fn reset(&mut self, sizes: &[Size]) -> SimResult<()> {
        *self = Self::new(sizes)?;
        Ok(())
    }

    #[inline]
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Partition> {
        self.partitions.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn total_size(&self) -> Size {
        self.partitions.iter().map(Partition::size).sum()
    }

    pub fn used_size(&self) -> Size {
        self.partitions.iter().map(Partition::occupied).sum()
    }

    pub fn free_size(&self) -> Size {
        self.total_size() - self.used_size()
    }

    /// Largest partition, i.e. the biggest request that can ever be admitted
    pub fn largest(&self) -> Size {
        self.partitions.iter().map(Partition::size).max().unwrap_or(0)
    }

    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            partitions: self.partitions.clone(),
            stats: self.stats(),
        }
    }
}

impl MemoryInfo for PartitionTable {
    fn stats(&self) -> MemoryStats {
        let total = self.total_size();
        let used = self.used_size();
        MemoryStats {
            total_memory: total,
            used_memory: used,
            available_memory: total - used,
            usage_percentage: if total > 0 {
                (used as f64 / total as f64) * 100.0
            } else {
                0.0
            },
            partition_count: self.partitions.len(),
            allocated_partitions: self.partitions.iter().filter(|p| !p.is_free()).count(),
            internal_fragmentation: self
                .partitions
                .iter()
                .map(Partition::internal_fragmentation)
                .sum(),
        }
    }

    fn info(&self) -> (Size, Size, Size) {
        let total = self.total_size();
        let used = self.used_size();
        (total, used, total - used)
    }

    fn process_memory(&self, pid: Pid) -> Size {
        self.partitions
            .iter()
            .filter(|p| p.owner() == Some(pid))
            .map(Partition::occupied)
            .sum()
    }
}
