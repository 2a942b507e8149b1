/*!
 * Error Types
 * Configuration errors with thiserror, miette, and serde support
 */

use super::types::{Size, Ticks};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for operations that validate caller input
pub type SimResult<T> = Result<T, ConfigError>;

/// Rejected configuration input
///
/// The engine itself never fails mid-tick; these errors only come from
/// values supplied by the caller, and a rejected change leaves the
/// simulator untouched.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Quantum must be at least 1 tick, got {0}")]
    #[diagnostic(
        code(config::invalid_quantum),
        help("A process needs at least one tick on the CPU before it can be preempted.")
    )]
    InvalidQuantum(Ticks),

    #[error("Invalid CPU time range {min}-{max}: requires 1 <= min < max")]
    #[diagnostic(
        code(config::invalid_cpu_range),
        help("Use a strictly increasing pair of positive tick counts, e.g. 20-60.")
    )]
    InvalidCpuRange { min: Ticks, max: Ticks },

    #[error("Invalid I/O time range {min}-{max}: requires 1 <= min <= max")]
    #[diagnostic(
        code(config::invalid_io_range),
        help("I/O bursts last at least one tick.")
    )]
    InvalidIoRange { min: Ticks, max: Ticks },

    #[error("Invalid memory requirement range {min}-{max}: requires 1 <= min <= max")]
    #[diagnostic(code(config::invalid_memory_range))]
    InvalidMemoryRange { min: Size, max: Size },

    #[error("Block probability must be within 0-100, got {0}")]
    #[diagnostic(
        code(config::invalid_block_probability),
        help("The value is a percentage checked once per executed tick.")
    )]
    InvalidBlockProbability(u32),

    #[error("Partition layout cannot be empty")]
    #[diagnostic(
        code(config::empty_partitions),
        help("Provide at least one partition size, e.g. 4,4,8,16.")
    )]
    EmptyPartitions,

    #[error("Partition {index} has size 0")]
    #[diagnostic(code(config::zero_sized_partition))]
    ZeroSizedPartition { index: usize },

    #[error("Invalid process spec: memory {memory_required}, cpu time {cpu_time} (both must be positive)")]
    #[diagnostic(code(config::invalid_process_spec))]
    InvalidProcessSpec { memory_required: Size, cpu_time: Ticks },

    #[error("Tick interval must be at least {min_ms} ms, got {got_ms} ms")]
    #[diagnostic(
        code(config::invalid_tick_interval),
        help("Faster intervals flood the log without making the simulation more useful.")
    )]
    InvalidTickInterval { got_ms: u64, min_ms: u64 },

    #[error("Cannot parse {key}={value:?}: {reason}")]
    #[diagnostic(code(config::parse))]
    Parse {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn parse(key: &str, value: &str, reason: impl ToString) -> Self {
        ConfigError::Parse {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
