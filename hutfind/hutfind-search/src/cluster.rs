use hutfind_structure::Position;
use std::ops::AddAssign;

pub const MIN_CLUSTER_SIZE: u32 = 2;
pub const MAX_CLUSTER_SIZE: u32 = 4;

/// Members have to be within 128 blocks of the centroid.
pub const CLUSTER_RADIUS_SQUARED: i64 = 128 * 128;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ClusterResult {
	pub size: u32,
	pub centroid: Position,
	pub members: Vec<Position>,
}

/// Per-axis mean, truncated toward zero.
pub fn centroid(members: &[Position]) -> Position {
	let count = members.len() as i64;
	let (x, z) = members.iter().fold((0i64, 0i64), |(x, z), member| (x + member.x() as i64, z + member.z() as i64));

	Position::new((x / count) as i32, (z / count) as i32)
}

fn max_distance_squared(members: &[Position], centroid: Position) -> i64 {
	members.iter().map(|member| member.distance_squared(centroid)).max().unwrap_or(0)
}

/// Centroid trimming over the valid positions of one region tuple, in discovery order.
///
/// Every prefix from the full list down to two members is tested, always dropping the last
/// member. Each compact prefix of at least `min_size` members is reported, so a compact quad
/// also reports its leading triple and pair. The policy is greedy: a larger compact subset that
/// would need a member other than the last one dropped is not found.
pub fn trim(valid: &[Position], min_size: u32, out: &mut Vec<ClusterResult>) -> usize {
	let before = out.len();

	for len in (MIN_CLUSTER_SIZE as usize..=valid.len()).rev() {
		let members = &valid[..len];
		let center = centroid(members);

		if len as u32 >= min_size && max_distance_squared(members, center) <= CLUSTER_RADIUS_SQUARED {
			out.push(ClusterResult { size: len as u32, centroid: center, members: members.to_vec() });
		}
	}

	out.len() - before
}

/// Number of clusters found, per size.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Tally {
	counts: [u64; (MAX_CLUSTER_SIZE - MIN_CLUSTER_SIZE + 1) as usize],
}

impl Tally {
	pub fn record(&mut self, size: u32) {
		self.counts[(size - MIN_CLUSTER_SIZE) as usize] += 1;
	}

	pub fn get(&self, size: u32) -> u64 {
		if size < MIN_CLUSTER_SIZE || size > MAX_CLUSTER_SIZE {
			return 0;
		}

		self.counts[(size - MIN_CLUSTER_SIZE) as usize]
	}

	pub fn total(&self) -> u64 {
		self.counts.iter().sum()
	}

	pub fn counts(&self) -> &[u64] {
		&self.counts
	}
}

impl AddAssign for Tally {
	fn add_assign(&mut self, other: Tally) {
		for (count, other) in self.counts.iter_mut().zip(other.counts.iter()) {
			*count += other;
		}
	}
}
