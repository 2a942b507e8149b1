/*!
 * Memory Types
 * Partition records and memory statistics
 */

use crate::core::types::{Pid, Size};
use serde::{Deserialize, Serialize};

/// One fixed-size memory region
///
/// A partition is either completely free or assigned to exactly one
/// process: `owner.is_none()` holds exactly when `occupied == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    size: Size,
    owner: Option<Pid>,
    occupied: Size,
}

impl Partition {
    pub(crate) fn new(size: Size) -> Self {
        Self {
            size,
            owner: None,
            occupied: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn owner(&self) -> Option<Pid> {
        self.owner
    }

    #[inline]
    pub fn occupied(&self) -> Size {
        self.occupied
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    /// Space inside the partition the owner does not use
    #[inline]
    pub fn internal_fragmentation(&self) -> Size {
        if self.is_free() {
            0
        } else {
            self.size - self.occupied
        }
    }

    pub(crate) fn assign(&mut self, pid: Pid, required: Size) {
        assert!(
            self.is_free(),
            "partition already owned by pid {:?}",
            self.owner
        );
        self.owner = Some(pid);
        self.occupied = required.min(self.size);
    }

    pub(crate) fn release(&mut self) {
        self.owner = None;
        self.occupied = 0;
    }
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub available_memory: Size,
    pub usage_percentage: f64,
    pub partition_count: usize,
    pub allocated_partitions: usize,
    /// Unused space locked inside allocated partitions
    pub internal_fragmentation: Size,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        if self.usage_percentage >= 95.0 {
            MemoryPressure::Critical
        } else if self.usage_percentage >= 80.0 {
            MemoryPressure::High
        } else if self.usage_percentage >= 60.0 {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Point-in-time copy of the partition table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub partitions: Vec<Partition>,
    pub stats: MemoryStats,
}
