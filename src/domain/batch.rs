use crate::domain::ProductRecord;

/// Records waiting to be flushed, bounded by `capacity`.
#[derive(Debug, Clone)]
pub struct Batch {
    records: Vec<ProductRecord>,
    capacity: usize,
}

impl Batch {
    /// A zero capacity is treated as one so every record still gets flushed.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record. Returns true once the batch is full.
    pub fn push(&mut self, record: ProductRecord) -> bool {
        debug_assert!(!self.is_full(), "push into a full batch");
        self.records.push(record);
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// Hand out the current records and start over with an empty batch.
    pub fn take(&mut self) -> Batch {
        let records = std::mem::replace(&mut self.records, Vec::with_capacity(self.capacity));
        Batch {
            records,
            capacity: self.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_reports_full() {
        let mut batch = Batch::with_capacity(2);
        assert!(!batch.push(ProductRecord::new()));
        assert!(batch.push(ProductRecord::new()));
        assert!(batch.is_full());
    }

    #[test]
    fn test_take_leaves_empty_batch() {
        let mut batch = Batch::with_capacity(3);
        batch.push(ProductRecord::new());
        let retired = batch.take();
        assert_eq!(retired.len(), 1);
        assert!(batch.is_empty());
        assert_eq!(batch.capacity(), 3);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut batch = Batch::with_capacity(0);
        assert_eq!(batch.capacity(), 1);
        assert!(batch.push(ProductRecord::new()));
    }
}
