//! Batch partitioning for the two scoring passes.

/// Split a sequence into ordered, contiguous, non-overlapping batches of at
/// most `size` items. The concatenation of the batches is exactly the input:
/// an empty input yields zero batches, an input shorter than `size` yields
/// one short batch.
///
/// The per-ticket and overall passes call this independently with their own
/// sizes; a ticket's batch membership in one pass says nothing about the
/// other.
pub fn partition<T>(items: &[T], size: usize) -> Vec<&[T]> {
    debug_assert!(size > 0, "batch size must be positive");
    items.chunks(size.max(1)).collect()
}
