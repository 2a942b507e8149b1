/*!
 * Runtime Settings
 *
 * Binary-level settings loaded from the environment:
 * - SIM_PARTITIONS: comma-separated partition sizes (default: 2,2,4,6,6,8,8,12,16)
 * - SIM_QUANTUM: round-robin quantum in ticks (default: 5)
 * - SIM_CPU_RANGE: CPU time for new processes, `min-max` (default: 20-60)
 * - SIM_IO_RANGE: I/O burst length, `min-max` (default: 3-8)
 * - SIM_MEMORY_RANGE: memory for new processes, `min-max` (default: 1-12)
 * - SIM_BLOCK_PROBABILITY: percent chance to block per tick (default: 20)
 * - SIM_SEED: RNG seed for reproducible runs (default: entropy)
 * - SIM_TICK_MS: delay between ticks (default: 300, minimum 10)
 * - SIM_TICKS: ticks to run before exiting, 0 = until interrupted (default: 100)
 * - SIM_INITIAL_PROCESSES: processes created at startup (default: 5)
 */

use super::config::{SimConfig, TickInterval};
use crate::core::errors::{ConfigError, SimResult};
use crate::core::types::{InclusiveRange, Size};
use crate::memory::{validate_layout, DEFAULT_PARTITIONS};
use std::str::FromStr;

/// Everything the binary needs to start a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub partitions: Vec<Size>,
    pub config: SimConfig,
    pub seed: Option<u64>,
    pub tick_interval: TickInterval,
    /// Ticks to run; `None` runs until interrupted
    pub ticks: Option<u64>,
    pub initial_processes: usize,
}

impl Settings {
    /// Load settings from process environment variables
    pub fn from_env() -> SimResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from any key/value source
    pub fn from_lookup<F>(lookup: F) -> SimResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let defaults = settings.config;

        if let Some(raw) = lookup("SIM_PARTITIONS") {
            settings.partitions = parse_list("SIM_PARTITIONS", &raw)?;
            validate_layout(&settings.partitions)?;
        }

        settings.config = SimConfig {
            quantum: parse_or("SIM_QUANTUM", &lookup, defaults.quantum)?,
            cpu_time_range: parse_range_or("SIM_CPU_RANGE", &lookup, defaults.cpu_time_range)?,
            block_probability: parse_or(
                "SIM_BLOCK_PROBABILITY",
                &lookup,
                defaults.block_probability,
            )?,
            io_time_range: parse_range_or("SIM_IO_RANGE", &lookup, defaults.io_time_range)?,
            memory_range: parse_range_or("SIM_MEMORY_RANGE", &lookup, defaults.memory_range)?,
        };
        settings.config.validate()?;

        if let Some(raw) = lookup("SIM_SEED") {
            settings.seed = Some(parse_value("SIM_SEED", &raw)?);
        }

        if let Some(raw) = lookup("SIM_TICK_MS") {
            settings.tick_interval = TickInterval::from_millis(parse_value("SIM_TICK_MS", &raw)?)?;
        }

        if let Some(raw) = lookup("SIM_TICKS") {
            let ticks: u64 = parse_value("SIM_TICKS", &raw)?;
            settings.ticks = (ticks > 0).then_some(ticks);
        }

        settings.initial_processes =
            parse_or("SIM_INITIAL_PROCESSES", &lookup, settings.initial_processes)?;

        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            partitions: DEFAULT_PARTITIONS.to_vec(),
            config: SimConfig::default(),
            seed: None,
            tick_interval: TickInterval::default(),
            ticks: Some(100),
            initial_processes: 5,
        }
    }
}

fn parse_value<T>(key: &str, raw: &str) -> SimResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::parse(key, raw, e))
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> SimResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_range_or<T, F>(
    key: &str,
    lookup: &F,
    default: InclusiveRange<T>,
) -> SimResult<InclusiveRange<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let (min, max) = raw
        .split_once('-')
        .ok_or_else(|| ConfigError::parse(key, &raw, "expected `min-max`"))?;
    Ok(InclusiveRange::new(
        parse_value(key, min)?,
        parse_value(key, max)?,
    ))
}

fn parse_list(key: &str, raw: &str) -> SimResult<Vec<Size>> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| parse_value(key, part))
        .collect()
}
