use serde::Serialize;

use crate::{Result, SizeKb, measure};

/// Direction for [`sort_by_size`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest records first.
    #[default]
    Ascending,
    /// Largest records first.
    Descending,
}

/// Pair every record with its measured size and order the pairs by size.
///
/// Ties keep their input order in both directions. Grouping similarly sized
/// records before partitioning tends to produce fuller batches, but the
/// partitioner does not require sorted input.
pub fn sort_by_size<T: Serialize>(records: &[T], order: SortOrder) -> Result<Vec<(&T, SizeKb)>> {
    Ok(rank_by_size(records, order)?
        .into_iter()
        .map(|(index, size)| (&records[index], size))
        .collect())
}

/// Like [`sort_by_size`], but yields input positions instead of references.
pub fn rank_by_size<T: Serialize>(records: &[T], order: SortOrder) -> Result<Vec<(usize, SizeKb)>> {
    let mut ranked = records
        .iter()
        .enumerate()
        .map(|(i, r)| measure(r).map(|size| (i, size)))
        .collect::<Result<Vec<_>>>()?;

    match order {
        SortOrder::Ascending => ranked.sort_by_key(|&(_, size)| size),
        SortOrder::Descending => ranked.sort_by(|a, b| b.1.cmp(&a.1)),
    }

    Ok(ranked)
}

#[cfg(test)]
#[path = "sort_tests.rs"]
mod tests;
