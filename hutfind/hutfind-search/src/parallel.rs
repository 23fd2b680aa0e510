use crate::metrics::duration_us;
use crate::params::SearchParams;
use crate::scan::{Partition, ScanOutcome, Scanner};
use crate::ScanError;
use hutfind_biome::BiomeOracle;
use rayon::prelude::{IntoParallelIterator, ParallelIterator};
use rayon::ThreadPoolBuilder;
use std::sync::atomic::AtomicBool;
use std::time::Instant;
use tracing::{info, warn};

/// Partitions handed to each worker, so that progress is reported often and slow partitions
/// can be balanced.
const PARTITIONS_PER_THREAD: usize = 64;

/// One partition per region column, up to `PARTITIONS_PER_THREAD` per worker.
pub fn partition_count(region_range: i32, threads: usize) -> usize {
	let columns = 2 * region_range.max(0) as u64;
	let limit = threads.max(1).saturating_mul(PARTITIONS_PER_THREAD) as u64;

	columns.min(limit) as usize
}

/// Splits the region x range `[-region_range, region_range)` into at most `count` contiguous,
/// non-empty spans, numbered in scan order. An empty range yields a single empty partition.
pub fn partitions(region_range: i32, count: usize) -> Vec<Partition> {
	let width = 2 * region_range.max(0) as i64;
	let count = (count.max(1) as i64).min(width.max(1));
	let base = -(region_range.max(0) as i64);

	(0..count)
		.map(|index| Partition {
			index: index as usize,
			regions_x: (base + width * index / count) as i32..(base + width * (index + 1) / count) as i32,
		})
		.collect()
}

/// Scans every partition of the search on a pool of `threads` workers, one oracle per worker.
///
/// `on_partition` is called from the worker as soon as a partition finishes, in completion
/// order. The returned outcome is merged in partition order, so it is identical to a sequential
/// scan regardless of scheduling. The first oracle failure aborts the scan.
pub fn scan_parallel<F, O, C>(
	params: &SearchParams, make_oracle: F, threads: usize, cancel: &AtomicBool, on_partition: C,
) -> Result<ScanOutcome, ScanError>
where
	F: Fn() -> O + Sync,
	O: BiomeOracle + Send,
	C: Fn(&Partition, &ScanOutcome) + Sync,
{
	let start = Instant::now();
	let threads = threads.max(1);
	let parts = partitions(params.region_range(), partition_count(params.region_range(), threads));

	info!(
		"scanning {} region tuples in {} partitions on {} threads (seed {}, minimum size {})",
		params.tuple_count(),
		parts.len(),
		threads,
		params.world_seed(),
		params.min_size()
	);

	let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;

	let results = pool.install(|| {
		parts
			.into_par_iter()
			.map_init(
				|| None,
				|slot: &mut Option<Scanner<O>>, partition| -> Result<(usize, ScanOutcome), ScanError> {
					let mut scanner = match slot.take() {
						Some(scanner) => scanner,
						None => Scanner::new(make_oracle(), params.clone())?,
					};

					let outcome = scanner.scan_partition(&partition, cancel);
					*slot = Some(scanner);

					let outcome = outcome?;
					on_partition(&partition, &outcome);

					Ok((partition.index, outcome))
				},
			)
			.collect::<Result<Vec<_>, ScanError>>()
	})?;

	let outcome = ScanOutcome::merge(results);

	if outcome.complete {
		info!("scan finished in {:.3}s: {}", duration_us(&start) as f64 / 1_000_000.0, outcome.metrics);
	} else {
		warn!("scan cancelled after {:.3}s: {}", duration_us(&start) as f64 / 1_000_000.0, outcome.metrics);
	}

	Ok(outcome)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn spans(parts: &[Partition]) -> Vec<(i32, i32)> {
		parts.iter().map(|part| (part.regions_x.start, part.regions_x.end)).collect()
	}

	#[test]
	fn partitions_cover_range_in_order() {
		assert_eq!(spans(&partitions(3, 2)), [(-3, 0), (0, 3)]);
		assert_eq!(spans(&partitions(3, 4)), [(-3, -2), (-2, 0), (0, 1), (1, 3)]);
		assert_eq!(spans(&partitions(2, 100)), [(-2, -1), (-1, 0), (0, 1), (1, 2)]);
		assert_eq!(spans(&partitions(2, 0)), [(-2, 2)]);
		assert_eq!(spans(&partitions(0, 8)), [(0, 0)]);

		for (expected, part) in partitions(300, 7).iter().enumerate() {
			assert_eq!(part.index, expected);
			assert!(!part.regions_x.is_empty());
		}
	}

	#[test]
	fn partition_count_is_bounded_by_threads() {
		assert_eq!(partition_count(4, 3), 8);
		assert_eq!(partition_count(300, 4), 256);
		assert_eq!(partition_count(0, 4), 0);
		assert_eq!(partition_count(i32::MAX, 0), PARTITIONS_PER_THREAD);
		assert_eq!(partition_count(i32::MAX, 16), 16 * PARTITIONS_PER_THREAD);

		let parts = partitions(i32::MAX, partition_count(i32::MAX, 2));
		assert_eq!(parts.len(), 2 * PARTITIONS_PER_THREAD);
		assert_eq!(parts.first().map(|part| part.regions_x.start), Some(-i32::MAX));
		assert_eq!(parts.last().map(|part| part.regions_x.end), Some(i32::MAX));
	}
}
