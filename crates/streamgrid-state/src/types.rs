//! Evaluated metrics consumed by the scaling and tuning engines.
//!
//! The metrics evaluation pipeline produces one [`MetricSnapshot`] per
//! scaling cycle. Decision engines read it and never mutate it; the next
//! cycle gets a fresh snapshot.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a vertex (one stage of the job's execution graph).
pub type VertexId = String;

/// Metric kinds produced by the evaluation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    HeapMemoryUsed,
    ManagedMemoryUsed,
    MetaspaceMemoryUsed,
    ProcessingRate,
    ExpectedProcessingRate,
    Parallelism,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricKind::HeapMemoryUsed => "heap.memory.used",
            MetricKind::ManagedMemoryUsed => "managed.memory.used",
            MetricKind::MetaspaceMemoryUsed => "metaspace.memory.used",
            MetricKind::ProcessingRate => "processing.rate",
            MetricKind::ExpectedProcessingRate => "expected.processing.rate",
            MetricKind::Parallelism => "parallelism",
        };
        f.write_str(name)
    }
}

/// One observed statistic for a metric kind, produced once per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedValue {
    /// Most recent point value.
    pub current: f64,
    /// Average over the evaluation window.
    pub average: f64,
}

impl EvaluatedValue {
    pub fn new(current: f64, average: f64) -> Self {
        Self { current, average }
    }

    /// A value known only as a window average.
    pub fn avg(average: f64) -> Self {
        Self {
            current: average,
            average,
        }
    }
}

/// Per-cycle evaluated metrics for one job: per-vertex and cluster-wide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricSnapshot {
    /// Metrics per execution-graph vertex.
    pub per_vertex: HashMap<VertexId, HashMap<MetricKind, EvaluatedValue>>,
    /// Cluster-wide metrics.
    pub global: HashMap<MetricKind, EvaluatedValue>,
}

impl MetricSnapshot {
    pub fn new(
        per_vertex: HashMap<VertexId, HashMap<MetricKind, EvaluatedValue>>,
        global: HashMap<MetricKind, EvaluatedValue>,
    ) -> Self {
        Self { per_vertex, global }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avg_carries_value_in_both_fields() {
        let value = EvaluatedValue::avg(42.0);
        assert_eq!(value.current, 42.0);
        assert_eq!(value.average, 42.0);
    }

    #[test]
    fn metric_kind_names_are_stable() {
        assert_eq!(MetricKind::HeapMemoryUsed.to_string(), "heap.memory.used");
        assert_eq!(
            MetricKind::MetaspaceMemoryUsed.to_string(),
            "metaspace.memory.used"
        );
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut global = HashMap::new();
        global.insert(MetricKind::HeapMemoryUsed, EvaluatedValue::avg(1024.0));
        let mut vertex = HashMap::new();
        vertex.insert(MetricKind::Parallelism, EvaluatedValue::new(4.0, 4.0));
        let mut per_vertex = HashMap::new();
        per_vertex.insert("source-1".to_string(), vertex);

        let snapshot = MetricSnapshot::new(per_vertex, global);
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: MetricSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(
            decoded.global.get(&MetricKind::HeapMemoryUsed),
            snapshot.global.get(&MetricKind::HeapMemoryUsed)
        );
        assert_eq!(
            decoded.per_vertex["source-1"][&MetricKind::Parallelism].average,
            4.0
        );
    }
}
