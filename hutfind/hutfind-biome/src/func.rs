use crate::{Biome, BiomeOracle, OracleError};
use hutfind_structure::Position;

/// Adapts a plain function of `(seed, position)` into an oracle.
#[derive(Debug, Clone)]
pub struct FnOracle<F> {
	biome: F,
	seed: Option<i64>,
}

impl<F> FnOracle<F>
where
	F: Fn(i64, Position) -> Biome,
{
	pub fn new(biome: F) -> Self {
		FnOracle { biome, seed: None }
	}
}

impl<F> BiomeOracle for FnOracle<F>
where
	F: Fn(i64, Position) -> Biome,
{
	fn apply_seed(&mut self, seed: i64) -> Result<(), OracleError> {
		self.seed = Some(seed);

		Ok(())
	}

	fn query(&mut self, position: Position) -> Result<Biome, OracleError> {
		match self.seed {
			Some(seed) => Ok((self.biome)(seed, position)),
			None => Err(OracleError::SeedNotApplied),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn passes_the_applied_seed() {
		let mut oracle = FnOracle::new(|seed: i64, _: Position| Biome(seed as u8));

		assert_eq!(oracle.query(Position::new(0, 0)), Err(OracleError::SeedNotApplied));

		oracle.apply_seed(6).unwrap();
		assert_eq!(oracle.query(Position::new(0, 0)), Ok(Biome::SWAMPLAND));

		oracle.apply_seed(1).unwrap();
		assert_eq!(oracle.query(Position::new(0, 0)), Ok(Biome::PLAINS));
	}
}
