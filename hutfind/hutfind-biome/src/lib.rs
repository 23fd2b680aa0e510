extern crate bit_vec;
extern crate hutfind_structure;
extern crate thiserror;
extern crate tracing;

pub mod func;
pub mod map;
pub mod matcher;
pub mod viability;

pub use func::FnOracle;
pub use map::{BiomeGrid, BiomeMap, MapError};
pub use matcher::BiomeMatcher;
pub use viability::viable_biomes;

use hutfind_structure::Position;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Numeric biome id, as stored by the generator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Biome(pub u8);

impl Biome {
	pub const OCEAN: Biome = Biome(0);
	pub const PLAINS: Biome = Biome(1);
	pub const DESERT: Biome = Biome(2);
	pub const FOREST: Biome = Biome(4);
	pub const TAIGA: Biome = Biome(5);
	pub const SWAMPLAND: Biome = Biome(6);
	pub const RIVER: Biome = Biome(7);
	pub const FROZEN_OCEAN: Biome = Biome(10);
	pub const FROZEN_RIVER: Biome = Biome(11);
	pub const ICE_PLAINS: Biome = Biome(12);
	pub const DESERT_HILLS: Biome = Biome(17);
	pub const JUNGLE: Biome = Biome(21);
	pub const JUNGLE_HILLS: Biome = Biome(22);
	pub const DEEP_OCEAN: Biome = Biome(24);
	pub const ROOFED_FOREST: Biome = Biome(29);
	pub const COLD_TAIGA: Biome = Biome(30);
	pub const SAVANNA: Biome = Biome(35);
	pub const WARM_OCEAN: Biome = Biome(44);
	pub const LUKEWARM_OCEAN: Biome = Biome(45);
	pub const COLD_OCEAN: Biome = Biome(46);
	pub const WARM_DEEP_OCEAN: Biome = Biome(47);
	pub const LUKEWARM_DEEP_OCEAN: Biome = Biome(48);
	pub const COLD_DEEP_OCEAN: Biome = Biome(49);
	pub const FROZEN_DEEP_OCEAN: Biome = Biome(50);
	/// Mutated variants are offset by 128 from their base biome.
	pub const ROOFED_FOREST_M: Biome = Biome(29 + 128);

	pub fn id(self) -> u8 {
		self.0
	}

	pub fn name(self) -> Option<&'static str> {
		NAMES.iter().find(|&&(biome, _)| biome == self).map(|&(_, name)| name)
	}
}

const NAMES: [(Biome, &str); 25] = [
	(Biome::OCEAN, "ocean"),
	(Biome::PLAINS, "plains"),
	(Biome::DESERT, "desert"),
	(Biome::FOREST, "forest"),
	(Biome::TAIGA, "taiga"),
	(Biome::SWAMPLAND, "swampland"),
	(Biome::RIVER, "river"),
	(Biome::FROZEN_OCEAN, "frozen_ocean"),
	(Biome::FROZEN_RIVER, "frozen_river"),
	(Biome::ICE_PLAINS, "ice_plains"),
	(Biome::DESERT_HILLS, "desert_hills"),
	(Biome::JUNGLE, "jungle"),
	(Biome::JUNGLE_HILLS, "jungle_hills"),
	(Biome::DEEP_OCEAN, "deep_ocean"),
	(Biome::ROOFED_FOREST, "roofed_forest"),
	(Biome::COLD_TAIGA, "cold_taiga"),
	(Biome::SAVANNA, "savanna"),
	(Biome::WARM_OCEAN, "warm_ocean"),
	(Biome::LUKEWARM_OCEAN, "lukewarm_ocean"),
	(Biome::COLD_OCEAN, "cold_ocean"),
	(Biome::WARM_DEEP_OCEAN, "warm_deep_ocean"),
	(Biome::LUKEWARM_DEEP_OCEAN, "lukewarm_deep_ocean"),
	(Biome::COLD_DEEP_OCEAN, "cold_deep_ocean"),
	(Biome::FROZEN_DEEP_OCEAN, "frozen_deep_ocean"),
	(Biome::ROOFED_FOREST_M, "roofed_forest_m"),
];

impl Display for Biome {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self.name() {
			Some(name) => f.write_str(name),
			None => write!(f, "biome#{}", self.0),
		}
	}
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum OracleError {
	#[error("biome queried before a seed was applied")]
	SeedNotApplied,
	#[error("biome source was generated for seed {expected}, not {applied}")]
	SeedMismatch { expected: i64, applied: i64 },
	#[error("position {0} is outside of the biome source")]
	OutOfBounds(Position),
}

/// Answers "which biome is at this block" for one world seed at a time.
///
/// `apply_seed` has to be called before the first `query`, and queries only make sense for the
/// seed that was applied last. Implementations may keep scratch buffers between queries; they
/// own them and release them on drop. One instance must not be shared between scans of
/// different seeds, so parallel scans create one oracle per worker.
pub trait BiomeOracle {
	fn apply_seed(&mut self, seed: i64) -> Result<(), OracleError>;

	fn query(&mut self, position: Position) -> Result<Biome, OracleError>;
}

impl<'a, O: BiomeOracle + ?Sized> BiomeOracle for &'a mut O {
	fn apply_seed(&mut self, seed: i64) -> Result<(), OracleError> {
		(**self).apply_seed(seed)
	}

	fn query(&mut self, position: Position) -> Result<Biome, OracleError> {
		(**self).query(position)
	}
}

impl<O: BiomeOracle + ?Sized> BiomeOracle for Box<O> {
	fn apply_seed(&mut self, seed: i64) -> Result<(), OracleError> {
		(**self).apply_seed(seed)
	}

	fn query(&mut self, position: Position) -> Result<Biome, OracleError> {
		(**self).query(position)
	}
}
