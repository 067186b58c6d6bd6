//! Seller partitioning

use rustc_hash::FxHashMap;

use crate::domain::catalog::records::SellerUuid;

/// Lines owned by one seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerBucket<T> {
    pub seller: SellerUuid,
    pub lines: Vec<T>,
}

/// Group lines into disjoint per-seller buckets.
///
/// Buckets come out in the order their seller first appears, and lines keep their
/// relative order inside a bucket.
pub fn partition_by_seller<T, I>(lines: I) -> Vec<SellerBucket<T>>
where
    I: IntoIterator<Item = (SellerUuid, T)>,
{
    let mut buckets: Vec<SellerBucket<T>> = Vec::new();
    let mut positions: FxHashMap<SellerUuid, usize> = FxHashMap::default();

    for (seller, line) in lines {
        let position = *positions.entry(seller).or_insert_with(|| {
            buckets.push(SellerBucket {
                seller,
                lines: Vec::new(),
            });

            buckets.len() - 1
        });

        if let Some(bucket) = buckets.get_mut(position) {
            bucket.lines.push(line);
        }
    }

    buckets
}
