use hutfind_search::{ClusterResult, Tally};
use hutfind_structure::McVersion;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::time::Duration;

/// Writes everything to both outputs.
pub struct Tee<A, B>(pub A, pub B);

impl<A: Write, B: Write> Write for Tee<A, B> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.write_all(buf)?;
		self.1.write_all(buf)?;

		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		self.0.flush()?;
		self.1.flush()
	}
}

/// Report of a scan, written as partitions finish.
///
/// Partitions finish in any order, but their clusters are held back until every earlier
/// partition has been written, so the report always lists clusters in scan order.
pub struct ReportSink<W> {
	out: W,
	plural: &'static str,
	pending: BTreeMap<usize, Vec<ClusterResult>>,
	next: usize,
}

impl<W: Write> ReportSink<W> {
	pub fn new(out: W, plural: &'static str) -> Self {
		ReportSink { out, plural, pending: BTreeMap::new(), next: 0 }
	}

	pub fn header(&mut self, seed: i64, version: McVersion) -> io::Result<()> {
		writeln!(self.out, "Using seed {} and version {}", seed, version)
	}

	/// Accepts the clusters of partition `index`, writing every partition that is now in order.
	pub fn submit(&mut self, index: usize, clusters: Vec<ClusterResult>) -> io::Result<()> {
		self.pending.insert(index, clusters);

		while let Some(clusters) = self.pending.remove(&self.next) {
			for cluster in &clusters {
				self.write_cluster(cluster)?;
			}

			self.next += 1;
		}

		self.out.flush()
	}

	fn write_cluster(&mut self, cluster: &ClusterResult) -> io::Result<()> {
		writeln!(
			self.out,
			"CENTER for {} {}: {},{}",
			cluster.size,
			self.plural,
			cluster.centroid.x(),
			cluster.centroid.z()
		)
	}

	/// Writes whatever is still held back, in order, followed by the summary. Partitions that
	/// never arrived (after a cancelled scan) are skipped.
	pub fn finish(mut self, tally: &Tally, elapsed: Duration, search_blocks: i64, seed: i64, version: McVersion) -> io::Result<W> {
		let pending = std::mem::replace(&mut self.pending, BTreeMap::new());

		for clusters in pending.values() {
			for cluster in clusters {
				self.write_cluster(cluster)?;
			}
		}

		writeln!(
			self.out,
			"Found {} double {plural}, {} triple {plural}, {} quad {plural}",
			tally.get(2),
			tally.get(3),
			tally.get(4),
			plural = self.plural
		)?;

		writeln!(
			self.out,
			"Took {} seconds {} milliseconds for search range {} on seed {} with generator {}",
			elapsed.as_secs(),
			elapsed.subsec_millis(),
			search_blocks,
			seed,
			version
		)?;

		self.out.flush()?;

		Ok(self.out)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use hutfind_structure::Position;

	fn cluster(size: u32, x: i32, z: i32) -> ClusterResult {
		ClusterResult { size, centroid: Position::new(x, z), members: vec![Position::new(x, z); size as usize] }
	}

	fn text(bytes: Vec<u8>) -> String {
		String::from_utf8(bytes).unwrap()
	}

	#[test]
	fn releases_partitions_in_order() {
		let mut sink = ReportSink::new(Vec::new(), "witch huts");
		sink.header(-5, McVersion::V1_13_2).unwrap();

		sink.submit(2, vec![cluster(2, 30, 30)]).unwrap();
		sink.submit(1, vec![cluster(3, -20, 10), cluster(2, -21, 11)]).unwrap();
		assert_eq!(sink.pending.len(), 2);

		sink.submit(0, vec![]).unwrap();
		assert!(sink.pending.is_empty());
		assert_eq!(sink.next, 3);

		sink.submit(3, vec![cluster(4, 7, -7)]).unwrap();

		let mut tally = Tally::default();
		for &size in &[2, 3, 2, 4] {
			tally.record(size);
		}

		let out = sink.finish(&tally, Duration::from_millis(61_042), 153600, -5, McVersion::V1_13_2).unwrap();

		assert_eq!(
			text(out),
			"Using seed -5 and version 1.13.2\n\
			 CENTER for 3 witch huts: -20,10\n\
			 CENTER for 2 witch huts: -21,11\n\
			 CENTER for 2 witch huts: 30,30\n\
			 CENTER for 4 witch huts: 7,-7\n\
			 Found 2 double witch huts, 1 triple witch huts, 1 quad witch huts\n\
			 Took 61 seconds 42 milliseconds for search range 153600 on seed -5 with generator 1.13.2\n"
		);
	}

	#[test]
	fn finish_skips_missing_partitions() {
		let mut sink = ReportSink::new(Vec::new(), "igloos");

		sink.submit(3, vec![cluster(2, 1, 1)]).unwrap();
		sink.submit(1, vec![cluster(2, 0, 0)]).unwrap();

		let out = text(sink.finish(&Tally::default(), Duration::from_secs(0), 0, 0, McVersion::V1_12).unwrap());
		let lines: Vec<&str> = out.lines().collect();

		assert_eq!(lines[0], "CENTER for 2 igloos: 0,0");
		assert_eq!(lines[1], "CENTER for 2 igloos: 1,1");
		assert_eq!(lines[2], "Found 0 double igloos, 0 triple igloos, 0 quad igloos");
	}

	#[test]
	fn tee_writes_both() {
		let mut tee = Tee(Vec::new(), Vec::new());
		writeln!(tee, "CENTER for 2 witch huts: 8,8").unwrap();

		let Tee(a, b) = tee;
		assert_eq!(a, b);
		assert_eq!(text(a), "CENTER for 2 witch huts: 8,8\n");
	}
}
