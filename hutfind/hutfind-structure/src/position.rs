use std::fmt::{Display, Formatter, Result};

/// Block coordinates on the horizontal plane.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Default)]
pub struct Position {
	x: i32,
	z: i32,
}

impl Position {
	pub fn new(x: i32, z: i32) -> Self {
		Position { x, z }
	}

	pub fn x(&self) -> i32 {
		self.x
	}

	pub fn z(&self) -> i32 {
		self.z
	}

	/// Squared euclidean distance, computed in 64 bits so that it cannot overflow.
	pub fn distance_squared(&self, other: Position) -> i64 {
		let dx = self.x as i64 - other.x as i64;
		let dz = self.z as i64 - other.z as i64;

		dx * dx + dz * dz
	}
}

impl Display for Position {
	fn fmt(&self, f: &mut Formatter) -> Result {
		write!(f, "{},{}", self.x, self.z)
	}
}

/// Index of one placement region. A region is `region_size` chunks on each side, the exact
/// size depends on the structure being placed.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Default)]
pub struct RegionPosition {
	x: i32,
	z: i32,
}

impl RegionPosition {
	pub fn new(x: i32, z: i32) -> Self {
		RegionPosition { x, z }
	}

	pub fn x(&self) -> i32 {
		self.x
	}

	pub fn z(&self) -> i32 {
		self.z
	}

	pub fn offset(&self, dx: i32, dz: i32) -> Self {
		RegionPosition::new(self.x.wrapping_add(dx), self.z.wrapping_add(dz))
	}
}

impl Display for RegionPosition {
	fn fmt(&self, f: &mut Formatter) -> Result {
		write!(f, "r({}, {})", self.x, self.z)
	}
}
