//! Types for matching against specific biomes.
use crate::Biome;
use bit_vec::BitVec;
use std::iter::IntoIterator;

const BIOME_COUNT: usize = 256;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BiomeMatcher {
	biomes: BitVec,
	blacklist: bool,
}

impl BiomeMatcher {
	pub fn all() -> Self {
		BiomeMatcher { biomes: BitVec::from_elem(BIOME_COUNT, false), blacklist: true }
	}

	pub fn none() -> Self {
		BiomeMatcher { biomes: BitVec::from_elem(BIOME_COUNT, false), blacklist: false }
	}

	pub fn is(biome: Biome) -> Self {
		Self::include(&[biome])
	}

	pub fn include<'a, I>(biomes: I) -> Self
	where
		I: IntoIterator<Item = &'a Biome>,
	{
		let mut matcher = BiomeMatcher::none();
		matcher.extend(biomes);

		matcher
	}

	pub fn exclude<'a, I>(biomes: I) -> Self
	where
		I: IntoIterator<Item = &'a Biome>,
	{
		let mut matcher = BiomeMatcher::all();
		matcher.extend(biomes);

		matcher
	}

	fn extend<'a, I>(&mut self, biomes: I)
	where
		I: IntoIterator<Item = &'a Biome>,
	{
		for biome in biomes {
			self.biomes.set(biome.id() as usize, true);
		}
	}

	#[inline]
	pub fn matches(&self, biome: Biome) -> bool {
		// NotPresent, Whitelist => 0 ^ 0 => 0
		// NotPresent, Blacklist => 0 ^ 1 => 1
		// Contains, Whitelist => 1 ^ 0 => 1
		// Contains, Blacklist => 1 ^ 1 => 0
		self.biomes[biome.id() as usize] ^ self.blacklist
	}
}
