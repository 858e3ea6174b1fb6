//! Memory tuning engine.
//!
//! Turns one snapshot of evaluated metrics plus the static tuning
//! configuration into a worker memory change-set and one explanatory event.
//!
//! # Sizing algorithm
//!
//! ```text
//! spec      = layout a worker derives from the configured total
//! heap      = min(heap_used * margin, spec jvm heap)         margin = 1.2
//! metaspace = min(metaspace_used * margin, spec metaspace)
//!
//! shrink mode (default):
//!     managed  = min(managed_used * margin, spec managed)
//!     total    = heap + framework off-heap + network + metaspace + overhead
//!     managed and network fractions are taken over job memory sized with
//!     the managed target; the emitted total releases the managed block,
//!     which the worker re-derives from its fraction.
//!
//! maximize managed mode:
//!     total    = configured total (unchanged)
//!     managed  = job memory - heap - framework off-heap - network
//!     fractions are taken over job memory
//! ```
//!
//! Framework heap is forced to zero and the task-heap option is removed:
//! the worker derives task heap as the remainder of its layout, so heap
//! capacity is never booked under two keys at once. Network and JVM
//! overhead keep their spec-derived sizes, already clamped by their
//! absolute bounds. When observed managed usage is zero the managed
//! fraction is driven to 0.0 and the network share picks up the slack.

use tracing::{debug, info};

use streamgrid_state::{MemSize, MetricKind, MetricSnapshot};

use crate::changes::ConfigChanges;
use crate::config::TuningConfig;
use crate::error::{TuningError, TuningResult};
use crate::event::{EventReporter, TuningEvent};
use crate::layout::{self, MemoryLayout};
use crate::options;

/// Safety margin applied to observed usage so the recommended layout does
/// not immediately re-trigger the pressure it is meant to relieve.
const DEFAULT_SAFETY_MARGIN: f64 = 1.2;

/// Event prefix when automatic tuning is enabled. Part of the external
/// contract; downstream consumers match against it.
pub const EVENT_PREFIX_ENABLED: &str =
    "Memory tuning recommends the following configuration (automatic tuning is enabled):";

/// Event prefix when automatic tuning is disabled.
pub const EVENT_PREFIX_DISABLED: &str =
    "Memory tuning recommends the following configuration (automatic tuning is disabled):";

/// The memory tuning engine.
///
/// Stateless across calls; distinct calls on distinct inputs may run
/// concurrently without coordination.
#[derive(Debug, Clone)]
pub struct MemoryTuner {
    safety_margin: f64,
}

impl Default for MemoryTuner {
    fn default() -> Self {
        Self {
            safety_margin: DEFAULT_SAFETY_MARGIN,
        }
    }
}

impl MemoryTuner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the usage safety margin.
    pub fn with_safety_margin(mut self, margin: f64) -> Self {
        self.safety_margin = margin;
        self
    }

    /// Compute a memory configuration change-set for one evaluation cycle.
    ///
    /// Emits exactly one event through `reporter`. When tuning is disabled
    /// the candidate layout is still computed and reported, but the
    /// returned change-set is empty and the caller's configuration stays
    /// untouched.
    pub fn tune(
        &self,
        config: &TuningConfig,
        snapshot: &MetricSnapshot,
        reporter: &mut dyn EventReporter,
    ) -> TuningResult<ConfigChanges> {
        config.validate()?;

        let heap_used = usage(snapshot, MetricKind::HeapMemoryUsed)?;
        let managed_used = usage(snapshot, MetricKind::ManagedMemoryUsed)?;
        let metaspace_used = usage(snapshot, MetricKind::MetaspaceMemoryUsed)?;
        debug!(
            heap = %heap_used,
            managed = %managed_used,
            metaspace = %metaspace_used,
            "observed worker memory usage"
        );

        let spec = MemoryLayout::derive(config.total_process_memory);

        // Usage targets. Tuning only ever shrinks a component below its
        // spec size, which also keeps the shrink-mode total from exceeding
        // the configured total.
        let heap = heap_used.scale(self.safety_margin).min(spec.jvm_heap());
        let metaspace = metaspace_used
            .scale(self.safety_margin)
            .min(spec.metaspace);
        let fixed = heap + layout::DEFAULT_FRAMEWORK_OFF_HEAP;

        let (new_total, fraction_base, managed, network) = if config.maximize_managed_memory {
            let new_total = config.total_process_memory;
            let job = new_total.saturating_sub(metaspace + spec.jvm_overhead);
            if managed_used.is_zero() {
                // Nothing claims managed memory; its share goes to network.
                (new_total, job, MemSize::ZERO, job.saturating_sub(fixed))
            } else {
                let managed = job.saturating_sub(fixed + spec.network);
                (new_total, job, managed, spec.network)
            }
        } else {
            let managed = managed_used.scale(self.safety_margin).min(spec.managed);
            // The shrunken total leaves the managed block out entirely:
            // managed memory is configured by fraction and scales with
            // whatever total the worker is handed.
            let new_total = fixed + spec.network + metaspace + spec.jvm_overhead;
            let job = fixed + spec.network + managed;
            (new_total, job, managed, spec.network)
        };

        let mut candidate = ConfigChanges::new();
        candidate.put(options::FRAMEWORK_HEAP_MEMORY, MemSize::ZERO.to_string());
        // Task heap stays unset so the worker derives it as the remainder.
        candidate.remove(options::TASK_HEAP_MEMORY)?;
        candidate.put(
            options::MANAGED_MEMORY_FRACTION,
            fraction_literal(managed, fraction_base),
        );
        candidate.remove(options::MANAGED_MEMORY_SIZE)?;
        candidate.remove(options::MANAGED_MEMORY_SIZE_LEGACY)?;
        candidate.put(
            options::NETWORK_MEMORY_FRACTION,
            fraction_literal(network, fraction_base),
        );
        candidate.put(options::JVM_METASPACE, metaspace.to_string());
        candidate.put(
            options::JVM_OVERHEAD_FRACTION,
            fraction_literal(spec.jvm_overhead, new_total),
        );
        candidate.put(options::TOTAL_PROCESS_MEMORY, new_total.to_string());

        let message = render_event(
            config.tuning_enabled,
            &candidate,
            config.total_process_memory,
            new_total,
        );
        reporter.report(TuningEvent::new(message));

        if !config.tuning_enabled {
            return Ok(ConfigChanges::new());
        }

        info!(
            total = %new_total,
            maximize_managed = config.maximize_managed_memory,
            "memory tuning recommendation ready"
        );
        Ok(candidate)
    }
}

/// Read a required cluster-wide usage average as a size.
fn usage(snapshot: &MetricSnapshot, kind: MetricKind) -> TuningResult<MemSize> {
    let value = snapshot
        .global
        .get(&kind)
        .ok_or(TuningError::MissingMetric(kind))?;
    Ok(MemSize::new(value.average as u64))
}

/// Ratio of part to base as an option literal: rounded half-up to three
/// decimals, rendered with minimal digits and at least one decimal place.
fn fraction_literal(part: MemSize, base: MemSize) -> String {
    let fraction = if base.is_zero() {
        0.0
    } else {
        let raw = part.bytes() as f64 / base.bytes() as f64;
        (raw * 1000.0).round() / 1000.0
    };
    let mut rendered = fraction.to_string();
    if !rendered.contains('.') {
        rendered.push_str(".0");
    }
    rendered
}

/// One multi-line message: prefix, then `key: value` per override in sorted
/// order, then (when enabled) the previous and new total process memory.
fn render_event(
    enabled: bool,
    candidate: &ConfigChanges,
    old_total: MemSize,
    new_total: MemSize,
) -> String {
    let prefix = if enabled {
        EVENT_PREFIX_ENABLED
    } else {
        EVENT_PREFIX_DISABLED
    };
    let mut message = String::from(prefix);
    for (key, value) in candidate.overrides() {
        message.push('\n');
        message.push_str(key);
        message.push_str(": ");
        message.push_str(value);
    }
    if enabled {
        message.push_str(&format!(
            "\nTotal process memory changes from {old_total} to {new_total}"
        ));
    }
    message
}
