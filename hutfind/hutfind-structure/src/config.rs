use crate::version::McVersion;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Placement parameters of one structure type.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct StructureConfig {
	/// Salt added to the region seed, unique per structure type since 1.13.
	pub seed_offset: i64,
	/// Side length of a placement region, in chunks.
	pub region_size: i32,
	/// Exclusive upper bound of the chunk offset inside a region.
	pub chunk_range: i32,
	/// Draw offsets with the power-of-two multiply-shift even though `chunk_range` is used
	/// as the bound directly.
	pub uses_pow2_rng: bool,
	/// Placement needs an area biome check rather than a single position.
	pub is_large_structure: bool,
}

impl StructureConfig {
	const fn new(seed_offset: i64, region_size: i32, chunk_range: i32) -> Self {
		StructureConfig { seed_offset, region_size, chunk_range, uses_pow2_rng: false, is_large_structure: false }
	}

	const fn pow2(self) -> Self {
		StructureConfig { uses_pow2_rng: true, ..self }
	}

	const fn large(self) -> Self {
		StructureConfig { is_large_structure: true, ..self }
	}

	/// Width of one region in blocks.
	pub fn region_blocks(&self) -> i32 {
		self.region_size * 16
	}
}

/// Desert pyramids, igloos, jungle pyramids and swamp huts before 1.13. The biome at the
/// position decides which of them is attempted.
pub const FEATURE: StructureConfig = StructureConfig::new(14357617, 32, 24);

pub const DESERT_PYRAMID: StructureConfig = StructureConfig::new(14357617, 32, 24);
pub const IGLOO: StructureConfig = StructureConfig::new(14357618, 32, 24);
pub const JUNGLE_PYRAMID: StructureConfig = StructureConfig::new(14357619, 32, 24);
pub const SWAMP_HUT: StructureConfig = StructureConfig::new(14357620, 32, 24);

pub const VILLAGE: StructureConfig = StructureConfig::new(10387312, 32, 24);
pub const OCEAN_RUIN: StructureConfig = StructureConfig::new(14357621, 16, 8).pow2();
pub const SHIPWRECK: StructureConfig = StructureConfig::new(165745295, 15, 7);
pub const MONUMENT: StructureConfig = StructureConfig::new(10387313, 32, 27).large();
pub const MANSION: StructureConfig = StructureConfig::new(10387319, 80, 60).large();

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StructureKind {
	DesertPyramid,
	Igloo,
	JunglePyramid,
	SwampHut,
	Village,
	OceanRuin,
	Shipwreck,
	Monument,
	Mansion,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown structure `{0}`")]
pub struct UnknownStructure(pub String);

impl StructureKind {
	pub const ALL: [StructureKind; 9] = [
		StructureKind::DesertPyramid,
		StructureKind::Igloo,
		StructureKind::JunglePyramid,
		StructureKind::SwampHut,
		StructureKind::Village,
		StructureKind::OceanRuin,
		StructureKind::Shipwreck,
		StructureKind::Monument,
		StructureKind::Mansion,
	];

	/// Returns the placement config used by `version`, or `None` if the structure does not
	/// generate in that version at all.
	pub fn config(self, version: McVersion) -> Option<StructureConfig> {
		use self::StructureKind::*;

		if version == McVersion::Unrecognized {
			return None;
		}

		let split = version.at_least(McVersion::V1_13);

		match self {
			DesertPyramid | JunglePyramid | SwampHut if !split => Some(FEATURE),
			Igloo if !split => if version.at_least(McVersion::V1_9) { Some(FEATURE) } else { None },
			DesertPyramid => Some(DESERT_PYRAMID),
			Igloo => Some(IGLOO),
			JunglePyramid => Some(JUNGLE_PYRAMID),
			SwampHut => Some(SWAMP_HUT),
			Village => Some(VILLAGE),
			OceanRuin | Shipwreck if !split => None,
			OceanRuin => Some(OCEAN_RUIN),
			Shipwreck => Some(SHIPWRECK),
			Monument => if version.at_least(McVersion::V1_8) { Some(MONUMENT) } else { None },
			Mansion => if version.at_least(McVersion::V1_11) { Some(MANSION) } else { None },
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			StructureKind::DesertPyramid => "desert_pyramid",
			StructureKind::Igloo => "igloo",
			StructureKind::JunglePyramid => "jungle_pyramid",
			StructureKind::SwampHut => "swamp_hut",
			StructureKind::Village => "village",
			StructureKind::OceanRuin => "ocean_ruin",
			StructureKind::Shipwreck => "shipwreck",
			StructureKind::Monument => "monument",
			StructureKind::Mansion => "mansion",
		}
	}

	pub fn plural(self) -> &'static str {
		match self {
			StructureKind::DesertPyramid => "desert pyramids",
			StructureKind::Igloo => "igloos",
			StructureKind::JunglePyramid => "jungle pyramids",
			StructureKind::SwampHut => "witch huts",
			StructureKind::Village => "villages",
			StructureKind::OceanRuin => "ocean ruins",
			StructureKind::Shipwreck => "shipwrecks",
			StructureKind::Monument => "monuments",
			StructureKind::Mansion => "mansions",
		}
	}
}

impl FromStr for StructureKind {
	type Err = UnknownStructure;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		StructureKind::ALL
			.iter()
			.cloned()
			.find(|kind| kind.name() == s)
			.ok_or_else(|| UnknownStructure(s.to_owned()))
	}
}

impl Display for StructureKind {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scattered_features_share_a_config_before_1_13() {
		for &kind in &[StructureKind::DesertPyramid, StructureKind::JunglePyramid, StructureKind::SwampHut] {
			assert_eq!(kind.config(McVersion::V1_7), Some(FEATURE));
			assert_eq!(kind.config(McVersion::V1_12), Some(FEATURE));
		}

		assert_eq!(StructureKind::SwampHut.config(McVersion::V1_13), Some(SWAMP_HUT));
		assert_eq!(StructureKind::SwampHut.config(McVersion::V1_15), Some(SWAMP_HUT));
		assert_eq!(StructureKind::Igloo.config(McVersion::V1_13_2), Some(IGLOO));
	}

	#[test]
	fn availability() {
		assert_eq!(StructureKind::Igloo.config(McVersion::V1_8), None);
		assert_eq!(StructureKind::Igloo.config(McVersion::V1_9), Some(FEATURE));
		assert_eq!(StructureKind::OceanRuin.config(McVersion::V1_12), None);
		assert_eq!(StructureKind::OceanRuin.config(McVersion::V1_13), Some(OCEAN_RUIN));
		assert_eq!(StructureKind::Monument.config(McVersion::V1_7), None);
		assert_eq!(StructureKind::Mansion.config(McVersion::V1_10), None);
		assert_eq!(StructureKind::Mansion.config(McVersion::V1_11), Some(MANSION));

		for &kind in StructureKind::ALL.iter() {
			assert_eq!(kind.config(McVersion::Unrecognized), None);
		}
	}

	#[test]
	fn flags() {
		assert!(OCEAN_RUIN.uses_pow2_rng);
		assert!(!OCEAN_RUIN.is_large_structure);
		assert!(MONUMENT.is_large_structure && MANSION.is_large_structure);
		assert!(!SWAMP_HUT.uses_pow2_rng && !SWAMP_HUT.is_large_structure);
		assert_eq!(SWAMP_HUT.region_blocks(), 512);
	}

	#[test]
	fn names_parse_back() {
		for &kind in StructureKind::ALL.iter() {
			assert_eq!(kind.name().parse::<StructureKind>(), Ok(kind));
		}

		assert!("witch_hut".parse::<StructureKind>().is_err());
	}
}
