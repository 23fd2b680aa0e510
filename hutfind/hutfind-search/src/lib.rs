//! Scans a square of placement regions for groups of structures that all lie within 128 blocks
//! of their common centroid.

extern crate hutfind_biome;
extern crate hutfind_structure;
extern crate rayon;
extern crate thiserror;
extern crate tracing;

pub mod cluster;
pub mod metrics;
pub mod neighborhood;
pub mod parallel;
pub mod params;
pub mod scan;

pub use cluster::{ClusterResult, Tally};
pub use metrics::ScanMetrics;
pub use parallel::{partition_count, partitions, scan_parallel};
pub use params::{Pruning, SearchParams};
pub use scan::{Partition, ScanOutcome, Scanner};

use hutfind_biome::OracleError;
use hutfind_structure::RegionPosition;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
	#[error("biome oracle rejected seed: {0}")]
	Seed(#[source] OracleError),
	#[error("biome oracle failed in region {region}: {source}")]
	Oracle { region: RegionPosition, source: OracleError },
	#[error("could not start worker threads: {0}")]
	ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
