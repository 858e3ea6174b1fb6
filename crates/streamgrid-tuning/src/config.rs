//! Static configuration for the memory tuning engine.

use serde::{Deserialize, Serialize};
use streamgrid_state::MemSize;

use crate::error::TuningError;

/// Tuning options, read once per scaling-evaluation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningConfig {
    /// Whether computed recommendations are applied or only reported.
    #[serde(default)]
    pub tuning_enabled: bool,

    /// Assign all spare capacity to managed memory instead of shrinking the
    /// worker footprint. Favors working memory for internal operators
    /// (sorting, joining, state backends) over releasing capacity.
    #[serde(default)]
    pub maximize_managed_memory: bool,

    /// Task slots per worker.
    #[serde(default = "default_task_slots")]
    pub task_slots: u32,

    /// Total process memory per worker, as provisioned.
    pub total_process_memory: MemSize,
}

fn default_task_slots() -> u32 {
    1
}

impl TuningConfig {
    /// Check static preconditions before any sizing math runs.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.task_slots == 0 {
            return Err(TuningError::Configuration(
                "task_slots must be positive".to_string(),
            ));
        }
        if self.total_process_memory.is_zero() {
            return Err(TuningError::Configuration(
                "total_process_memory must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_are_absent() {
        let config: TuningConfig =
            serde_json::from_str(r#"{"total_process_memory": "30 gb"}"#).unwrap();
        assert!(!config.tuning_enabled);
        assert!(!config.maximize_managed_memory);
        assert_eq!(config.task_slots, 1);
        assert_eq!(config.total_process_memory, "30 gb".parse().unwrap());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_task_slots_is_rejected() {
        let config = TuningConfig {
            tuning_enabled: true,
            maximize_managed_memory: false,
            task_slots: 0,
            total_process_memory: MemSize::of_mebi_bytes(1024),
        };
        assert!(matches!(
            config.validate(),
            Err(TuningError::Configuration(_))
        ));
    }

    #[test]
    fn zero_total_memory_is_rejected() {
        let config = TuningConfig {
            tuning_enabled: true,
            maximize_managed_memory: false,
            task_slots: 4,
            total_process_memory: MemSize::ZERO,
        };
        assert!(matches!(
            config.validate(),
            Err(TuningError::Configuration(_))
        ));
    }
}
