use crate::metrics::ScanMetrics;
use crate::params::Pruning;
use hutfind_biome::{BiomeMatcher, BiomeOracle, OracleError};
use hutfind_structure::{place, Position, RegionPosition, StructureConfig};

/// Region offsets of a tuple, in the order their positions are tested.
pub const OFFSETS: [(i32, i32); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];

/// The four structure attempts of a 2x2 block of regions.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Neighborhood {
	positions: [Position; 4],
}

impl Neighborhood {
	pub fn place(config: &StructureConfig, world_seed: i64, region: RegionPosition) -> Self {
		let mut positions = [Position::default(); 4];

		for (position, &(dx, dz)) in positions.iter_mut().zip(OFFSETS.iter()) {
			*position = place(config, world_seed, region.offset(dx, dz));
		}

		Neighborhood { positions }
	}

	pub fn positions(&self) -> &[Position; 4] {
		&self.positions
	}

	/// Queries the biome of each position in order.
	///
	/// With pruning, the tuple is abandoned once `valid_count <= i + (min_size - 4)` after testing
	/// position `i`: even if every remaining position were valid the minimum could not be met.
	/// Returns `None` for an abandoned tuple.
	pub fn candidates<O>(
		&self, oracle: &mut O, viable: &BiomeMatcher, min_size: u32, pruning: Pruning, metrics: &mut ScanMetrics,
	) -> Result<Option<CandidateSet>, OracleError>
	where
		O: BiomeOracle,
	{
		let bias = min_size as i32 - self.positions.len() as i32;
		let mut candidates = CandidateSet { positions: self.positions, valid: [false; 4], valid_count: 0 };

		for (index, &position) in self.positions.iter().enumerate() {
			metrics.queries += 1;

			if viable.matches(oracle.query(position)?) {
				candidates.valid[index] = true;
				candidates.valid_count += 1;
			}

			if pruning == Pruning::Enabled && (candidates.valid_count as i32) <= index as i32 + bias {
				metrics.pruned += 1;
				return Ok(None);
			}
		}

		Ok(Some(candidates))
	}
}

/// The positions of a tuple tagged with the outcome of their biome check.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CandidateSet {
	positions: [Position; 4],
	valid: [bool; 4],
	valid_count: usize,
}

impl CandidateSet {
	pub fn valid_count(&self) -> usize {
		self.valid_count
	}

	/// Valid positions in discovery order.
	pub fn correct_positions(&self) -> Vec<Position> {
		self.positions.iter().zip(self.valid.iter()).filter(|&(_, &valid)| valid).map(|(&position, _)| position).collect()
	}
}
