extern crate clap;
extern crate num_cpus;
extern crate thiserror;
extern crate tracing;

extern crate hutfind_biome;
extern crate hutfind_search;
extern crate hutfind_structure;

pub mod options;
pub mod report;

use hutfind_biome::{viable_biomes, BiomeMap};
use hutfind_search::{scan_parallel, ScanError, ScanOutcome, SearchParams};
use options::{ConfigError, Options};
use report::{ReportSink, Tee};
use std::fs::File;
use std::io::{self, BufWriter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RunError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error("scan failed: {0}")]
	Scan(#[from] ScanError),
	#[error("could not write report: {0}")]
	Io(#[from] io::Error),
}

struct Progress<W> {
	sink: ReportSink<W>,
	tuples: u64,
	failure: Option<io::Error>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<T> {
	match mutex.lock() {
		Ok(guard) => guard,
		Err(poisoned) => poisoned.into_inner(),
	}
}

/// Loads the biome map and checks it against the search before anything is scanned.
pub fn prepare(options: &Options) -> Result<(SearchParams, BiomeMap), ConfigError> {
	let map = BiomeMap::open(&options.biome_map)?;

	if map.grid().seed() != options.seed {
		return Err(ConfigError::MapSeed { map: map.grid().seed(), seed: options.seed });
	}

	let params = SearchParams::new(
		options.config,
		viable_biomes(options.structure),
		options.seed,
		options.region_range(),
		options.min_size,
	)?;

	let (min, max) = params.block_bounds();

	if params.region_range() > 0 && !map.grid().covers(min, max) {
		return Err(ConfigError::Coverage { min, max });
	}

	Ok((params, map))
}

/// Runs a whole search, writing the report to stdout and the report file.
pub fn run(options: &Options) -> Result<ScanOutcome, RunError> {
	let start = Instant::now();
	let (params, map) = prepare(options)?;

	info!(
		"searching for {} in {} (region range {}, {} threads)",
		options.structure.plural(),
		options.version,
		params.region_range(),
		options.threads
	);

	let report = BufWriter::new(File::create(&options.output)?);
	let mut sink = ReportSink::new(Tee(io::stdout(), report), options.structure.plural());
	sink.header(options.seed, options.version)?;

	let total = params.tuple_count();
	let cancel = AtomicBool::new(false);
	let progress = Mutex::new(Progress { sink, tuples: 0, failure: None });

	let outcome = scan_parallel(&params, || map.clone(), options.threads, &cancel, |partition, outcome| {
		let mut progress = lock(&progress);

		if progress.failure.is_some() {
			return;
		}

		if let Err(error) = progress.sink.submit(partition.index, outcome.clusters.clone()) {
			progress.failure = Some(error);
			cancel.store(true, Ordering::Relaxed);
			return;
		}

		progress.tuples += outcome.metrics.tuples;

		if !options.quiet {
			let percentage = if total == 0 { 100.0 } else { (progress.tuples as f64 / total as f64) * 100.0 };
			eprintln!("[{:6.2}%] Partition {:4} | {}", percentage, partition.index, outcome.metrics);
		}
	})?;

	let progress = match progress.into_inner() {
		Ok(progress) => progress,
		Err(poisoned) => poisoned.into_inner(),
	};

	if let Some(error) = progress.failure {
		return Err(RunError::Io(error));
	}

	progress.sink.finish(&outcome.tally, start.elapsed(), options.search_blocks, options.seed, options.version)?;

	Ok(outcome)
}
