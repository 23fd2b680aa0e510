use hutfind_biome::{Biome, BiomeGrid, BiomeMap};
use hutfind_frontend::options::{ConfigError, Options};
use hutfind_frontend::{run, RunError};
use hutfind_structure::{McVersion, Position, StructureKind};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn checkerboard(position: Position) -> Biome {
	if ((position.x() >> 6) ^ (position.z() >> 6)) & 1 == 0 {
		Biome::SWAMPLAND
	} else {
		Biome::PLAINS
	}
}

/// 64 block cells from -8320 to 8959 on both axes.
fn write_map(path: &Path, seed: i64, biome: fn(Position) -> Biome) {
	let grid = BiomeGrid::from_fn(seed, 6, (-130, -130), 270, 270, biome).unwrap();

	BiomeMap::new(grid).save(path).unwrap();
}

fn options(dir: &TempDir, seed: i64, search_blocks: i64, min_size: u32) -> Options {
	let version = McVersion::V1_13;
	let structure = StructureKind::SwampHut;

	Options {
		version,
		seed,
		search_blocks,
		min_size,
		structure,
		config: structure.config(version).unwrap(),
		biome_map: dir.path().join("seed.hbmp"),
		threads: 3,
		output: dir.path().join("out.txt"),
		quiet: true,
	}
}

#[test]
fn report_lists_checkerboard_clusters() {
	let dir = TempDir::new().unwrap();
	write_map(&dir.path().join("seed.hbmp"), 0, checkerboard);

	let outcome = run(&options(&dir, 0, 8192, 2)).unwrap();
	assert!(outcome.complete);
	assert_eq!(outcome.tally.counts(), &[16, 0, 0]);

	let report = fs::read_to_string(dir.path().join("out.txt")).unwrap();
	let lines: Vec<&str> = report.lines().collect();

	assert_eq!(lines.len(), 1 + 16 + 2);
	assert_eq!(lines[0], "Using seed 0 and version 1.13");
	assert_eq!(lines[1], "CENTER for 2 witch huts: -7944,6064");
	assert_eq!(lines[2], "CENTER for 2 witch huts: -6688,1680");
	assert_eq!(lines[3], "CENTER for 2 witch huts: -6704,7360");
	assert_eq!(lines[17], "Found 16 double witch huts, 0 triple witch huts, 0 quad witch huts");
	assert!(lines[18].starts_with("Took "));
	assert!(lines[18].ends_with(" for search range 8192 on seed 0 with generator 1.13"));
}

#[test]
fn stricter_filter_reports_nothing() {
	let dir = TempDir::new().unwrap();
	write_map(&dir.path().join("seed.hbmp"), 0, |_| Biome::SWAMPLAND);

	let outcome = run(&options(&dir, 0, 8192, 3)).unwrap();
	assert_eq!(outcome.tally.total(), 0);

	let report = fs::read_to_string(dir.path().join("out.txt")).unwrap();
	assert!(report.contains("Found 0 double witch huts, 0 triple witch huts, 0 quad witch huts\n"));
}

#[test]
fn map_must_match_seed() {
	let dir = TempDir::new().unwrap();
	write_map(&dir.path().join("seed.hbmp"), 7, checkerboard);

	match run(&options(&dir, 0, 8192, 2)) {
		Err(RunError::Config(ConfigError::MapSeed { map: 7, seed: 0 })) => (),
		other => panic!("expected a seed mismatch, got {:?}", other),
	}

	assert!(!dir.path().join("out.txt").exists());
}

#[test]
fn map_must_cover_search() {
	let dir = TempDir::new().unwrap();
	write_map(&dir.path().join("seed.hbmp"), 0, checkerboard);

	match run(&options(&dir, 0, 153600, 2)) {
		Err(RunError::Config(ConfigError::Coverage { min, max })) => {
			assert_eq!(min, Position::new(-153600, -153600));
			assert_eq!(max, Position::new(154111, 154111));
		}
		other => panic!("expected a coverage error, got {:?}", other),
	}
}

#[test]
fn missing_map() {
	let dir = TempDir::new().unwrap();

	assert!(matches!(run(&options(&dir, 0, 8192, 2)), Err(RunError::Config(ConfigError::Map(_)))));
}
