//! Generator versions. Placement itself never changed between these versions, only the
//! structure configs (and the biome generator, which lives outside this workspace) did.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum McVersion {
	V1_7,
	V1_8,
	V1_9,
	V1_10,
	V1_11,
	V1_12,
	V1_13,
	V1_13_2,
	V1_14,
	V1_15,
	/// Any token that is not in the table. Callers must stop before using it.
	Unrecognized,
}

const TOKENS: [(&str, McVersion); 10] = [
	("1.7", McVersion::V1_7),
	("1.8", McVersion::V1_8),
	("1.9", McVersion::V1_9),
	("1.10", McVersion::V1_10),
	("1.11", McVersion::V1_11),
	("1.12", McVersion::V1_12),
	("1.13", McVersion::V1_13),
	("1.13.2", McVersion::V1_13_2),
	("1.14", McVersion::V1_14),
	("1.15", McVersion::V1_15),
];

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unrecognized version `{0}`")]
pub struct VersionError(pub String);

impl McVersion {
	pub fn from_token(token: &str) -> Self {
		TOKENS
			.iter()
			.find(|(name, _)| *name == token)
			.map(|&(_, version)| version)
			.unwrap_or(McVersion::Unrecognized)
	}

	pub fn recognized() -> impl Iterator<Item = McVersion> {
		TOKENS.iter().map(|&(_, version)| version)
	}

	pub fn token(self) -> &'static str {
		TOKENS
			.iter()
			.find(|&&(_, version)| version == self)
			.map(|&(name, _)| name)
			.unwrap_or("UNKNOWN")
	}

	fn ordinal(self) -> Option<usize> {
		TOKENS.iter().position(|&(_, version)| version == self)
	}

	/// `Unrecognized` is never at least any version, not even itself.
	pub fn at_least(self, other: McVersion) -> bool {
		match (self.ordinal(), other.ordinal()) {
			(Some(this), Some(other)) => this >= other,
			_ => false,
		}
	}
}

impl FromStr for McVersion {
	type Err = VersionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match McVersion::from_token(s) {
			McVersion::Unrecognized => Err(VersionError(s.to_owned())),
			version => Ok(version),
		}
	}
}

impl Display for McVersion {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str(self.token())
	}
}
