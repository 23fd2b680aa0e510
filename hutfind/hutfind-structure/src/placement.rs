use crate::config::StructureConfig;
use crate::position::{Position, RegionPosition};
use hutfind_rng::JavaRng;

const REGION_X_MULTIPLIER: i64 = 341873128712;
const REGION_Z_MULTIPLIER: i64 = 132897987541;

/// The seed for the single placement attempt in `region`, before scrambling.
pub fn region_seed(config: &StructureConfig, world_seed: i64, region: RegionPosition) -> i64 {
	(region.x() as i64)
		.wrapping_mul(REGION_X_MULTIPLIER)
		.wrapping_add((region.z() as i64).wrapping_mul(REGION_Z_MULTIPLIER))
		.wrapping_add(world_seed)
		.wrapping_add(config.seed_offset)
}

/// Chunk offset of the attempt inside its region, each axis in `[0, chunk_range)`.
///
/// Takes the raw 31 bit draw modulo the range (or the multiply-shift for pow2 structures),
/// without the rejection loop of `next_i32_bound`.
pub fn chunk_offset(config: &StructureConfig, world_seed: i64, region: RegionPosition) -> (i32, i32) {
	let mut rng = JavaRng::new(region_seed(config, world_seed, region));

	let x = offset(config, rng.next(31));
	let z = offset(config, rng.next(31));

	(x, z)
}

#[inline]
fn offset(config: &StructureConfig, bits: i32) -> i32 {
	if config.uses_pow2_rng {
		((config.chunk_range as i64 * bits as i64) >> 31) as i32
	} else {
		bits % config.chunk_range
	}
}

/// Block position of the structure attempt in `region`. The `+ 8` centers the position
/// inside its chunk.
pub fn place(config: &StructureConfig, world_seed: i64, region: RegionPosition) -> Position {
	let (x, z) = chunk_offset(config, world_seed, region);

	Position::new(to_block(region.x(), x, config.region_size), to_block(region.z(), z, config.region_size))
}

#[inline]
fn to_block(region: i32, offset: i32, region_size: i32) -> i32 {
	(region.wrapping_mul(region_size).wrapping_add(offset) << 4).wrapping_add(8)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{FEATURE, OCEAN_RUIN, SHIPWRECK, SWAMP_HUT};

	#[test]
	fn known_positions() {
		let r = RegionPosition::new;

		assert_eq!(place(&FEATURE, 0, r(0, 0)), Position::new(312, 40));
		assert_eq!(place(&FEATURE, 0, r(1, -1)), Position::new(744, -472));
		assert_eq!(place(&SWAMP_HUT, 123456789, r(-7, 42)), Position::new(-3560, 21656));
		assert_eq!(place(&OCEAN_RUIN, 0, r(3, -5)), Position::new(856, -1192));
		assert_eq!(place(&SHIPWRECK, -4872398127, r(10, 10)), Position::new(2408, 2424));
	}

	#[test]
	fn wraps_at_the_edges() {
		let region = RegionPosition::new(i32::MAX / 32, -3);

		assert_eq!(place(&SWAMP_HUT, i64::MIN, region), Position::new(-504, -1336));
	}

	#[test]
	fn region_seed_combines_linearly() {
		let origin = region_seed(&SWAMP_HUT, 0, RegionPosition::new(0, 0));
		assert_eq!(origin, 14357620);

		let shifted = region_seed(&SWAMP_HUT, 0, RegionPosition::new(1, 1));
		assert_eq!(shifted - origin, REGION_X_MULTIPLIER + REGION_Z_MULTIPLIER);
	}

	#[test]
	fn pow2_offsets_use_multiply_shift() {
		let region = RegionPosition::new(3, -5);
		let mut rng = JavaRng::new(region_seed(&OCEAN_RUIN, 0, region));
		let expected_x = ((8i64 * rng.next(31) as i64) >> 31) as i32;

		assert_eq!(chunk_offset(&OCEAN_RUIN, 0, region).0, expected_x);
	}
}
