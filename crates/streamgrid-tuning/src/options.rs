//! Canonical worker memory option keys.
//!
//! These are the identifiers the worker configuration system understands.
//! Values paired with them in change-sets use that system's own literal
//! forms: fractions like `"0.562"`, sizes like `"120 mb"` or `"0 bytes"`.

/// Total process memory of one worker.
pub const TOTAL_PROCESS_MEMORY: &str = "worker.memory.process.size";

/// Heap reserved for the framework itself.
pub const FRAMEWORK_HEAP_MEMORY: &str = "worker.memory.framework.heap.size";

/// Heap available to user tasks. Left unset by tuning so the worker derives
/// it as the remainder of its layout.
pub const TASK_HEAP_MEMORY: &str = "worker.memory.task.heap.size";

/// Absolute managed memory size.
pub const MANAGED_MEMORY_SIZE: &str = "worker.memory.managed.size";

/// Deprecated alias of [`MANAGED_MEMORY_SIZE`], still honored by workers.
pub const MANAGED_MEMORY_SIZE_LEGACY: &str = "worker.memory.size";

/// Managed memory as a fraction of job memory.
pub const MANAGED_MEMORY_FRACTION: &str = "worker.memory.managed.fraction";

/// Network buffer memory as a fraction of job memory.
pub const NETWORK_MEMORY_FRACTION: &str = "worker.memory.network.fraction";

/// JVM metaspace size.
pub const JVM_METASPACE: &str = "worker.memory.jvm-metaspace.size";

/// JVM overhead as a fraction of total process memory.
pub const JVM_OVERHEAD_FRACTION: &str = "worker.memory.jvm-overhead.fraction";
