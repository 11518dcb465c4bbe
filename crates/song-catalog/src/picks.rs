use rand::seq::index;
use rand::Rng;

use crate::search::SearchRecord;

pub const DEFAULT_PICK_COUNT: usize = 3;

/// Uniform sample of `count` distinct positions below `len`, in random order.
pub fn pick_indices<R: Rng + ?Sized>(len: usize, count: usize, rng: &mut R) -> Vec<usize> {
    index::sample(rng, len, count.min(len)).into_vec()
}

/// Uniform sample of `count` distinct records; the whole list when it is shorter.
pub fn random_picks<'a, R: Rng + ?Sized>(
    records: &'a [SearchRecord],
    count: usize,
    rng: &mut R,
) -> Vec<&'a SearchRecord> {
    pick_indices(records.len(), count, rng)
        .into_iter()
        .map(|idx| &records[idx])
        .collect()
}
