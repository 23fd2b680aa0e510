use crate::cluster::{MAX_CLUSTER_SIZE, MIN_CLUSTER_SIZE};
use hutfind_biome::BiomeMatcher;
use hutfind_structure::{Position, StructureConfig};
use thiserror::Error;

/// Whether a region tuple is abandoned as soon as it can no longer reach the minimum size.
/// Both modes report identical clusters; `Exhaustive` only exists to check exactly that.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Pruning {
	Enabled,
	Exhaustive,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParamsError {
	#[error("minimum cluster size must be between {} and {}, got {0}", MIN_CLUSTER_SIZE, MAX_CLUSTER_SIZE)]
	ClusterSize(u32),
	#[error("search range must not be negative, got {0}")]
	NegativeRange(i32),
	#[error("structures that check a biome area cannot be validated by a point query")]
	AreaCheck,
}

#[derive(Debug, Clone)]
pub struct SearchParams {
	config: StructureConfig,
	viable: BiomeMatcher,
	world_seed: i64,
	region_range: i32,
	min_size: u32,
	pruning: Pruning,
}

impl SearchParams {
	/// Scans region tuples with `x, z` in `[-region_range, region_range)`, reporting clusters of at
	/// least `min_size` structures whose biome matches `viable`.
	pub fn new(config: StructureConfig, viable: BiomeMatcher, world_seed: i64, region_range: i32, min_size: u32) -> Result<Self, ParamsError> {
		if min_size < MIN_CLUSTER_SIZE || min_size > MAX_CLUSTER_SIZE {
			return Err(ParamsError::ClusterSize(min_size));
		}

		if region_range < 0 {
			return Err(ParamsError::NegativeRange(region_range));
		}

		if config.is_large_structure {
			return Err(ParamsError::AreaCheck);
		}

		Ok(SearchParams { config, viable, world_seed, region_range, min_size, pruning: Pruning::Enabled })
	}

	pub fn with_pruning(mut self, pruning: Pruning) -> Self {
		self.pruning = pruning;
		self
	}

	/// Converts a half range in blocks into a count of regions on each side of the origin.
	pub fn regions_for_blocks(config: &StructureConfig, blocks: i64) -> i32 {
		(blocks / config.region_blocks() as i64).min(i32::MAX as i64) as i32
	}

	pub fn config(&self) -> &StructureConfig {
		&self.config
	}

	pub fn viable(&self) -> &BiomeMatcher {
		&self.viable
	}

	pub fn world_seed(&self) -> i64 {
		self.world_seed
	}

	pub fn region_range(&self) -> i32 {
		self.region_range
	}

	pub fn min_size(&self) -> u32 {
		self.min_size
	}

	pub fn pruning(&self) -> Pruning {
		self.pruning
	}

	/// Region tuples in the whole scan.
	pub fn tuple_count(&self) -> u64 {
		let side = 2 * self.region_range as u64;

		side * side
	}

	/// The block rectangle that every candidate position falls into. Tuples reach one region
	/// past the scanned range on the positive side.
	pub fn block_bounds(&self) -> (Position, Position) {
		let width = self.config.region_blocks();
		let min = self.region_range.saturating_neg().saturating_mul(width);
		let max = (self.region_range.saturating_add(1)).saturating_mul(width).saturating_sub(1);

		(Position::new(min, min), Position::new(max, max))
	}
}
