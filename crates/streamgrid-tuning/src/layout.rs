//! The worker process memory model.
//!
//! A worker derives its memory layout from the `worker.memory.*` options:
//! JVM overhead and metaspace are carved off the total first, network and
//! managed memory are fractions of the remaining job memory, and task heap
//! absorbs whatever is left. [`MemoryLayout::derive`] mirrors that
//! derivation for default options, so the tuning engine can reason about
//! the layout a worker would actually compute for a given total.

use streamgrid_state::MemSize;

/// Fixed heap reserved for the framework.
pub const DEFAULT_FRAMEWORK_HEAP: MemSize = MemSize::of_mebi_bytes(128);

/// Fixed off-heap region reserved for the framework.
pub const DEFAULT_FRAMEWORK_OFF_HEAP: MemSize = MemSize::of_mebi_bytes(128);

/// Default metaspace size.
pub const DEFAULT_METASPACE: MemSize = MemSize::of_mebi_bytes(256);

/// Network share of job memory.
///
/// The worker option schema types fraction options as single-precision
/// values; the defaults stay `f32` and are widened at the point of use so
/// derived sizes match the worker byte for byte.
pub const DEFAULT_NETWORK_FRACTION: f32 = 0.1;

/// Lower bound for the network share.
pub const NETWORK_MIN: MemSize = MemSize::of_mebi_bytes(64);

/// Managed share of job memory.
pub const DEFAULT_MANAGED_FRACTION: f32 = 0.4;

/// JVM overhead share of total process memory.
pub const DEFAULT_JVM_OVERHEAD_FRACTION: f32 = 0.1;

/// Lower bound for JVM overhead.
pub const JVM_OVERHEAD_MIN: MemSize = MemSize::of_mebi_bytes(192);

/// Upper bound for JVM overhead.
pub const JVM_OVERHEAD_MAX: MemSize = MemSize::of_mebi_bytes(1024);

/// One worker's memory layout.
///
/// Invariant: the components sum exactly to the total process memory the
/// layout was derived from. (For totals too small to host the fixed
/// components the remainders saturate at zero and the sum falls short;
/// such configurations cannot start a worker in the first place.)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLayout {
    pub framework_heap: MemSize,
    pub task_heap: MemSize,
    pub framework_off_heap: MemSize,
    pub managed: MemSize,
    pub network: MemSize,
    pub metaspace: MemSize,
    pub jvm_overhead: MemSize,
}

impl MemoryLayout {
    /// Derive the layout a worker computes from `total` and default options.
    pub fn derive(total: MemSize) -> Self {
        let jvm_overhead =
            share(DEFAULT_JVM_OVERHEAD_FRACTION, total).clamp(JVM_OVERHEAD_MIN, JVM_OVERHEAD_MAX);
        let metaspace = DEFAULT_METASPACE;
        let job = total.saturating_sub(jvm_overhead + metaspace);

        let network = share(DEFAULT_NETWORK_FRACTION, job).max(NETWORK_MIN);
        let managed = share(DEFAULT_MANAGED_FRACTION, job);
        let task_heap = job
            .saturating_sub(DEFAULT_FRAMEWORK_HEAP + DEFAULT_FRAMEWORK_OFF_HEAP)
            .saturating_sub(network + managed);

        Self {
            framework_heap: DEFAULT_FRAMEWORK_HEAP,
            task_heap,
            framework_off_heap: DEFAULT_FRAMEWORK_OFF_HEAP,
            managed,
            network,
            metaspace,
            jvm_overhead,
        }
    }

    /// Framework plus task heap: everything that ends up on the JVM heap.
    pub fn jvm_heap(&self) -> MemSize {
        self.framework_heap + self.task_heap
    }

    /// Everything below metaspace and JVM overhead.
    pub fn job_memory(&self) -> MemSize {
        self.framework_heap + self.task_heap + self.framework_off_heap + self.managed + self.network
    }

    /// Sum of all components.
    pub fn total(&self) -> MemSize {
        self.job_memory() + self.metaspace + self.jvm_overhead
    }
}

/// Fraction of a base size, truncated to whole bytes.
///
/// Fractions are single-precision by schema and widened here; see
/// [`DEFAULT_NETWORK_FRACTION`].
pub(crate) fn share(fraction: f32, base: MemSize) -> MemSize {
    MemSize::new((f64::from(fraction) * base.bytes() as f64) as u64)
}
