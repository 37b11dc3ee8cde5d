use crate::prelude::{LoadError, LoadResult};
use crate::record::SarRecord;
use std::collections::HashSet;
use std::sync::Arc;

/// Immutable set of records produced by one load. Replaced wholesale on reload.
#[derive(Debug, Clone)]
pub struct RecordBatch {
    records: Arc<[SarRecord]>,
}

impl RecordBatch {
    pub fn new(records: Vec<SarRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Builds a batch from untrusted data, rejecting anything the globe cannot render.
    pub fn validated(records: Vec<SarRecord>) -> LoadResult<Self> {
        if records.is_empty() {
            return Err(LoadError::Format("response contained no records".into()));
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(LoadError::Format(format!("duplicate record id '{}'", record.id)));
            }
            if !(-90.0..=90.0).contains(&record.lat) || !(-180.0..=180.0).contains(&record.lng) {
                return Err(LoadError::Format(format!(
                    "record '{}' has coordinates out of range ({}, {})",
                    record.id, record.lat, record.lng
                )));
            }
            if !(0.0..=1.0).contains(&record.intensity) {
                return Err(LoadError::Format(format!(
                    "record '{}' has intensity {} outside [0, 1]",
                    record.id, record.intensity
                )));
            }
        }

        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[SarRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SarRecord> {
        self.records.iter()
    }

    pub fn same_batch(&self, other: &RecordBatch) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl Default for RecordBatch {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Read-only view of the records that pass the current facet selection.
///
/// Holds the batch handle and the positions of the visible records; no record
/// is copied or mutated.
#[derive(Debug, Clone, Default)]
pub struct VisibleSet {
    batch: RecordBatch,
    indices: Vec<usize>,
}

impl VisibleSet {
    pub fn all(batch: &RecordBatch) -> Self {
        Self {
            batch: batch.clone(),
            indices: (0..batch.len()).collect(),
        }
    }

    pub(crate) fn from_indices(batch: &RecordBatch, indices: Vec<usize>) -> Self {
        Self {
            batch: batch.clone(),
            indices,
        }
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SarRecord> + '_ {
        let records = self.batch.records();
        self.indices.iter().map(move |&idx| &records[idx])
    }
}
