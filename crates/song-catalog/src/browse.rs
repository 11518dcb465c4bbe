use std::collections::BTreeMap;

use models::{Bucket, Catalog};
use tracing::debug;

use crate::normalize::bucket_of;

/// Artists of a catalog grouped by the first character of their normalized name.
///
/// Every catalog entry is filed under exactly one bucket; within a bucket the
/// catalog order is kept.
#[derive(Debug, Clone, Default)]
pub struct BrowseIndex {
    buckets: BTreeMap<Bucket, Vec<usize>>,
}

impl BrowseIndex {
    pub fn new(catalog: &Catalog) -> Self {
        let mut buckets: BTreeMap<Bucket, Vec<usize>> = BTreeMap::new();
        for (idx, entry) in catalog.entries().iter().enumerate() {
            buckets.entry(bucket_of(&entry.name)).or_default().push(idx);
        }
        debug!(
            artists = catalog.len(),
            buckets = buckets.len(),
            "built browse index"
        );
        Self { buckets }
    }

    /// Catalog indices of the artists filed under `bucket`; empty when there are none.
    pub fn artists_for(&self, bucket: Bucket) -> &[usize] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Navigation buckets with their artist counts, including empty ones.
    pub fn bucket_counts(&self) -> Vec<(Bucket, usize)> {
        Bucket::all()
            .into_iter()
            .map(|b| (b, self.artists_for(b).len()))
            .collect()
    }
}
