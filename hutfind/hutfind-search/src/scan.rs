use crate::cluster::{trim, ClusterResult, Tally};
use crate::metrics::{duration_us, ScanMetrics};
use crate::neighborhood::Neighborhood;
use crate::params::SearchParams;
use crate::ScanError;
use hutfind_biome::BiomeOracle;
use hutfind_structure::RegionPosition;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

/// A contiguous span of region x coordinates, scanned over the full z range. Partitions are
/// numbered in scan order, so concatenating their results by index reproduces a sequential scan.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Partition {
	pub index: usize,
	pub regions_x: Range<i32>,
}

/// Clusters and counters of a scan, or of one part of it.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ScanOutcome {
	/// In scan order.
	pub clusters: Vec<ClusterResult>,
	pub tally: Tally,
	pub metrics: ScanMetrics,
	/// False if the scan was cancelled before covering its whole range. Everything reported
	/// is still exactly what a full scan reports for the tuples that were visited.
	pub complete: bool,
}

impl ScanOutcome {
	/// Appends a later part of the scan.
	pub fn append(&mut self, mut later: ScanOutcome) {
		self.clusters.append(&mut later.clusters);
		self.tally += later.tally;
		self.metrics += later.metrics;
		self.complete &= later.complete;
	}

	/// Merges partition outcomes in partition order, whatever order they finished in.
	pub fn merge<I>(parts: I) -> ScanOutcome
	where
		I: IntoIterator<Item = (usize, ScanOutcome)>,
	{
		let mut parts: Vec<_> = parts.into_iter().collect();
		parts.sort_by_key(|&(index, _)| index);

		let mut merged = ScanOutcome { complete: true, ..ScanOutcome::default() };

		for (_, part) in parts {
			merged.append(part);
		}

		merged
	}
}

/// Scans region tuples with a single oracle.
pub struct Scanner<O> {
	oracle: O,
	params: SearchParams,
}

impl<O> Scanner<O>
where
	O: BiomeOracle,
{
	/// Applies the world seed to `oracle`; it is not applied again for the lifetime of the scanner.
	pub fn new(mut oracle: O, params: SearchParams) -> Result<Self, ScanError> {
		oracle.apply_seed(params.world_seed()).map_err(ScanError::Seed)?;

		Ok(Scanner { oracle, params })
	}

	/// Checks the tuple whose lowest corner is `region`, appending every cluster it reports.
	pub fn scan_tuple(&mut self, region: RegionPosition, outcome: &mut ScanOutcome) -> Result<(), ScanError> {
		let params = &self.params;
		let tuple = Neighborhood::place(params.config(), params.world_seed(), region);

		outcome.metrics.tuples += 1;

		let candidates = tuple
			.candidates(&mut self.oracle, params.viable(), params.min_size(), params.pruning(), &mut outcome.metrics)
			.map_err(|source| ScanError::Oracle { region, source })?;

		let candidates = match candidates {
			Some(candidates) if candidates.valid_count() >= params.min_size() as usize => candidates,
			_ => return Ok(()),
		};

		let first = outcome.clusters.len();
		trim(&candidates.correct_positions(), params.min_size(), &mut outcome.clusters);

		for cluster in &outcome.clusters[first..] {
			outcome.tally.record(cluster.size);
		}

		Ok(())
	}

	/// Scans one partition. `cancel` is polled before every tuple.
	pub fn scan_partition(&mut self, partition: &Partition, cancel: &AtomicBool) -> Result<ScanOutcome, ScanError> {
		let start = Instant::now();
		let range = self.params.region_range();
		let mut outcome = ScanOutcome { complete: true, ..ScanOutcome::default() };

		'scan: for x in partition.regions_x.clone() {
			for z in -range..range {
				if cancel.load(Ordering::Relaxed) {
					outcome.complete = false;
					break 'scan;
				}

				self.scan_tuple(RegionPosition::new(x, z), &mut outcome)?;
			}
		}

		outcome.metrics.duration_us = duration_us(&start);

		if outcome.complete {
			debug!("partition {} ({:?}) done: {}", partition.index, partition.regions_x, outcome.metrics);
		} else {
			warn!("partition {} ({:?}) cancelled after {} tuples", partition.index, partition.regions_x, outcome.metrics.tuples);
		}

		Ok(outcome)
	}

	/// Scans the whole range on the current thread.
	pub fn scan(&mut self, cancel: &AtomicBool) -> Result<ScanOutcome, ScanError> {
		let range = self.params.region_range();

		self.scan_partition(&Partition { index: 0, regions_x: -range..range }, cancel)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::params::Pruning;
	use hutfind_biome::{viable_biomes, Biome, FnOracle, OracleError};
	use hutfind_structure::config::SWAMP_HUT;
	use hutfind_structure::{Position, StructureKind};

	fn everywhere(_: i64, _: Position) -> Biome {
		Biome::SWAMPLAND
	}

	fn params(range: i32, min_size: u32) -> SearchParams {
		SearchParams::new(SWAMP_HUT, viable_biomes(StructureKind::SwampHut), 0, range, min_size).unwrap()
	}

	#[test]
	fn all_swamp_regression() {
		let mut scanner = Scanner::new(FnOracle::new(everywhere), params(16, 2)).unwrap();
		let outcome = scanner.scan(&AtomicBool::new(false)).unwrap();

		assert!(outcome.complete);
		assert_eq!(outcome.tally.counts(), &[38, 0, 0]);
		assert_eq!(outcome.clusters.len(), 38);
		assert_eq!(outcome.metrics.tuples, 32 * 32);

		let centroids: Vec<Position> = outcome.clusters.iter().take(3).map(|cluster| cluster.centroid).collect();
		assert_eq!(centroids, [Position::new(-7944, 6064), Position::new(-7400, 4040), Position::new(-6896, 5048)]);

		for cluster in &outcome.clusters {
			assert_eq!(cluster.size as usize, cluster.members.len());
			assert!(cluster.members.iter().all(|member| member.distance_squared(cluster.centroid) <= 16384));
		}
	}

	#[test]
	fn nothing_passes_stricter_filters() {
		for &min_size in &[3, 4] {
			let mut scanner = Scanner::new(FnOracle::new(everywhere), params(16, min_size)).unwrap();
			let outcome = scanner.scan(&AtomicBool::new(false)).unwrap();

			assert_eq!(outcome.tally.total(), 0);
			assert!(outcome.clusters.is_empty());
		}
	}

	#[test]
	fn no_swamps_no_queries_wasted() {
		let nowhere = |_: i64, _: Position| Biome::PLAINS;
		let mut scanner = Scanner::new(FnOracle::new(nowhere), params(4, 4)).unwrap();
		let outcome = scanner.scan(&AtomicBool::new(false)).unwrap();

		assert!(outcome.clusters.is_empty());
		assert_eq!(outcome.metrics.tuples, 64);
		assert_eq!(outcome.metrics.queries, 64);
		assert_eq!(outcome.metrics.pruned, 64);

		let mut scanner = Scanner::new(FnOracle::new(nowhere), params(4, 4).with_pruning(Pruning::Exhaustive)).unwrap();
		assert_eq!(scanner.scan(&AtomicBool::new(false)).unwrap().metrics.queries, 256);
	}

	#[test]
	fn empty_range() {
		let mut scanner = Scanner::new(FnOracle::new(everywhere), params(0, 2)).unwrap();
		let outcome = scanner.scan(&AtomicBool::new(false)).unwrap();

		assert!(outcome.complete);
		assert_eq!(outcome.metrics.tuples, 0);
	}

	#[test]
	fn cancellation_keeps_a_consistent_prefix() {
		let mut scanner = Scanner::new(FnOracle::new(everywhere), params(16, 2)).unwrap();
		let outcome = scanner.scan(&AtomicBool::new(true)).unwrap();

		assert!(!outcome.complete);
		assert_eq!(outcome.metrics.tuples, 0);
		assert!(outcome.clusters.is_empty());
	}

	#[test]
	fn seed_errors() {
		struct Refusing;

		impl BiomeOracle for Refusing {
			fn apply_seed(&mut self, seed: i64) -> Result<(), OracleError> {
				Err(OracleError::SeedMismatch { expected: seed + 1, applied: seed })
			}

			fn query(&mut self, _: Position) -> Result<Biome, OracleError> {
				Err(OracleError::SeedNotApplied)
			}
		}

		assert!(matches!(Scanner::new(Refusing, params(1, 2)), Err(ScanError::Seed(OracleError::SeedMismatch { .. }))));
	}

	/// Answers a fixed number of queries, then reports everything as out of bounds.
	struct Failing<O> {
		inner: O,
		remaining: usize,
	}

	impl<O: BiomeOracle> BiomeOracle for Failing<O> {
		fn apply_seed(&mut self, seed: i64) -> Result<(), OracleError> {
			self.inner.apply_seed(seed)
		}

		fn query(&mut self, position: Position) -> Result<Biome, OracleError> {
			if self.remaining == 0 {
				return Err(OracleError::OutOfBounds(Position::default()));
			}

			self.remaining -= 1;
			self.inner.query(position)
		}
	}

	#[test]
	fn oracle_errors_abort_with_region() {
		// The first tuple takes four queries, so the second one fails.
		let broken = Failing { inner: FnOracle::new(everywhere), remaining: 4 };
		let mut scanner = Scanner::new(broken, params(2, 2)).unwrap();

		match scanner.scan(&AtomicBool::new(false)) {
			Err(ScanError::Oracle { region, source }) => {
				assert_eq!(source, OracleError::OutOfBounds(Position::default()));
				assert_eq!(region, RegionPosition::new(-2, -1));
			}
			other => panic!("expected an oracle error, got {:?}", other),
		}
	}
}
