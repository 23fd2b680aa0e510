//! Biomes a structure needs at its position. Scattered features only check the single block at
//! the structure origin. Villages, monuments and mansions really check an area at a 1:4 scale;
//! the lists here are the biomes that area has to consist of.

use crate::{Biome, BiomeMatcher};
use hutfind_structure::StructureKind;

const DESERT_PYRAMID: [Biome; 2] = [Biome::DESERT, Biome::DESERT_HILLS];
const IGLOO: [Biome; 2] = [Biome::ICE_PLAINS, Biome::COLD_TAIGA];
const JUNGLE_PYRAMID: [Biome; 2] = [Biome::JUNGLE, Biome::JUNGLE_HILLS];
const VILLAGE: [Biome; 4] = [Biome::PLAINS, Biome::DESERT, Biome::SAVANNA, Biome::TAIGA];
const MANSION: [Biome; 2] = [Biome::ROOFED_FOREST, Biome::ROOFED_FOREST_M];

const OCEANS: [Biome; 10] = [
	Biome::OCEAN,
	Biome::DEEP_OCEAN,
	Biome::FROZEN_OCEAN,
	Biome::FROZEN_DEEP_OCEAN,
	Biome::COLD_OCEAN,
	Biome::COLD_DEEP_OCEAN,
	Biome::LUKEWARM_OCEAN,
	Biome::LUKEWARM_DEEP_OCEAN,
	Biome::WARM_OCEAN,
	Biome::WARM_DEEP_OCEAN,
];

const DEEP_OCEANS: [Biome; 5] = [
	Biome::FROZEN_DEEP_OCEAN,
	Biome::COLD_DEEP_OCEAN,
	Biome::DEEP_OCEAN,
	Biome::LUKEWARM_DEEP_OCEAN,
	Biome::WARM_DEEP_OCEAN,
];

pub fn viable_biomes(kind: StructureKind) -> BiomeMatcher {
	match kind {
		StructureKind::DesertPyramid => BiomeMatcher::include(&DESERT_PYRAMID),
		StructureKind::Igloo => BiomeMatcher::include(&IGLOO),
		StructureKind::JunglePyramid => BiomeMatcher::include(&JUNGLE_PYRAMID),
		StructureKind::SwampHut => BiomeMatcher::is(Biome::SWAMPLAND),
		StructureKind::Village => BiomeMatcher::include(&VILLAGE),
		StructureKind::OceanRuin | StructureKind::Shipwreck => BiomeMatcher::include(&OCEANS),
		StructureKind::Monument => BiomeMatcher::include(&DEEP_OCEANS),
		StructureKind::Mansion => BiomeMatcher::include(&MANSION),
	}
}
