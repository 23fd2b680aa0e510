use std::fmt::{self, Display, Formatter};
use std::ops::AddAssign;
use std::time::Instant;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ScanMetrics {
	/// Region tuples visited.
	pub tuples: u64,
	/// Biome queries issued.
	pub queries: u64,
	/// Tuples abandoned before all four positions were checked.
	pub pruned: u64,
	/// Time spent scanning, summed over workers.
	pub duration_us: u64,
}

impl AddAssign for ScanMetrics {
	fn add_assign(&mut self, other: ScanMetrics) {
		self.tuples += other.tuples;
		self.queries += other.queries;
		self.pruned += other.pruned;
		self.duration_us += other.duration_us;
	}
}

impl Display for ScanMetrics {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		let per_tuple = if self.tuples == 0 { 0.0 } else { self.queries as f64 / self.tuples as f64 };

		write!(
			f,
			"{} tuples, {} queries ({:.3}/tuple), {} pruned, {:.3}ms",
			self.tuples,
			self.queries,
			per_tuple,
			self.pruned,
			(self.duration_us as f64) / 1000.0
		)
	}
}

/// Microseconds since `start`, saturating instead of wrapping.
pub fn duration_us(start: &Instant) -> u64 {
	let elapsed = start.elapsed();

	elapsed.as_secs().saturating_mul(1_000_000).saturating_add(u64::from(elapsed.subsec_micros()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;

	#[test]
	fn accumulates() {
		let mut total = ScanMetrics::default();
		total += ScanMetrics { tuples: 4, queries: 10, pruned: 2, duration_us: 1500 };
		total += ScanMetrics { tuples: 4, queries: 6, pruned: 3, duration_us: 500 };

		assert_eq!(total, ScanMetrics { tuples: 8, queries: 16, pruned: 5, duration_us: 2000 });
		assert_eq!(total.to_string(), "8 tuples, 16 queries (2.000/tuple), 5 pruned, 2.000ms");
		assert_eq!(ScanMetrics::default().to_string(), "0 tuples, 0 queries (0.000/tuple), 0 pruned, 0.000ms");
	}

	#[test]
	fn duration_counts_whole_seconds() {
		let start = Instant::now().checked_sub(Duration::from_millis(2_250)).unwrap();
		let elapsed = duration_us(&start);

		assert!(elapsed >= 2_250_000, "{}", elapsed);
		assert!(elapsed < 60_000_000, "{}", elapsed);
	}
}
