//! Pre-rendered biome maps.
//!
//! The biome generator itself is not part of this workspace. A map is a grid of biome ids for
//! one seed, exported once by whatever generator is at hand, and then queried by the search.
//!
//! File layout, all integers little endian:
//!
//! | field        | type     |                                          |
//! |--------------|----------|------------------------------------------|
//! | magic        | `[u8;4]` | `HBMP`                                   |
//! | format       | `u8`     | currently 1                              |
//! | scale shift  | `u8`     | cell width is `1 << shift` blocks        |
//! | seed         | `i64`    | world seed the map was generated for     |
//! | origin x, z  | `i32`    | coordinates of the first cell, in cells  |
//! | width, depth | `u32`    | cells along x and z                      |
//! | cells        | `[u8]`   | `width * depth` biome ids, rows along x  |

use crate::{Biome, BiomeOracle, OracleError};
use hutfind_structure::Position;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

const MAGIC: [u8; 4] = *b"HBMP";
const FORMAT: u8 = 1;
const MAX_SCALE_SHIFT: u8 = 8;

#[derive(Debug, Error)]
pub enum MapError {
	#[error("failed to read biome map: {0}")]
	Io(#[from] io::Error),
	#[error("not a biome map (bad magic {0:?})")]
	BadMagic([u8; 4]),
	#[error("unsupported biome map format {0}")]
	UnsupportedFormat(u8),
	#[error("scale shift {0} is larger than {}", MAX_SCALE_SHIFT)]
	BadScale(u8),
	#[error("biome map of {width}x{depth} cells does not fit in memory")]
	TooLarge { width: u32, depth: u32 },
	#[error("expected {expected} cells, got {actual}")]
	CellCount { expected: usize, actual: usize },
}

/// The immutable contents of a biome map.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BiomeGrid {
	seed: i64,
	scale_shift: u8,
	origin: (i32, i32),
	width: u32,
	depth: u32,
	cells: Box<[u8]>,
}

impl BiomeGrid {
	pub fn new(seed: i64, scale_shift: u8, origin: (i32, i32), width: u32, depth: u32, cells: Vec<u8>) -> Result<Self, MapError> {
		if scale_shift > MAX_SCALE_SHIFT {
			return Err(MapError::BadScale(scale_shift));
		}

		let expected = cell_count(width, depth)?;

		if cells.len() != expected {
			return Err(MapError::CellCount { expected, actual: cells.len() });
		}

		Ok(BiomeGrid { seed, scale_shift, origin, width, depth, cells: cells.into_boxed_slice() })
	}

	/// Fills a grid by sampling `biome` once per cell, with the cell's minimum block corner.
	pub fn from_fn<F>(seed: i64, scale_shift: u8, origin: (i32, i32), width: u32, depth: u32, mut biome: F) -> Result<Self, MapError>
	where
		F: FnMut(Position) -> Biome,
	{
		let mut cells = Vec::with_capacity(cell_count(width, depth)?);

		for z in 0..depth {
			for x in 0..width {
				let cell_x = origin.0.wrapping_add(x as i32);
				let cell_z = origin.1.wrapping_add(z as i32);

				cells.push(biome(Position::new(cell_x << scale_shift, cell_z << scale_shift)).id());
			}
		}

		BiomeGrid::new(seed, scale_shift, origin, width, depth, cells)
	}

	pub fn read_from<R: Read>(mut input: R) -> Result<Self, MapError> {
		let mut magic = [0; 4];
		input.read_exact(&mut magic)?;

		if magic != MAGIC {
			return Err(MapError::BadMagic(magic));
		}

		let mut header = [0; 2];
		input.read_exact(&mut header)?;

		let [format, scale_shift] = header;

		if format != FORMAT {
			return Err(MapError::UnsupportedFormat(format));
		}

		let seed = i64::from_le_bytes(read_array(&mut input)?);
		let origin_x = i32::from_le_bytes(read_array(&mut input)?);
		let origin_z = i32::from_le_bytes(read_array(&mut input)?);
		let width = u32::from_le_bytes(read_array(&mut input)?);
		let depth = u32::from_le_bytes(read_array(&mut input)?);

		// Grown from what is actually read, never sized from the header alone.
		let expected = cell_count(width, depth)?;
		let mut cells = Vec::new();
		input.take(expected as u64).read_to_end(&mut cells)?;

		if cells.len() != expected {
			return Err(MapError::CellCount { expected, actual: cells.len() });
		}

		BiomeGrid::new(seed, scale_shift, (origin_x, origin_z), width, depth, cells)
	}

	pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
		out.write_all(&MAGIC)?;
		out.write_all(&[FORMAT, self.scale_shift])?;
		out.write_all(&self.seed.to_le_bytes())?;
		out.write_all(&self.origin.0.to_le_bytes())?;
		out.write_all(&self.origin.1.to_le_bytes())?;
		out.write_all(&self.width.to_le_bytes())?;
		out.write_all(&self.depth.to_le_bytes())?;
		out.write_all(&self.cells)?;

		out.flush()
	}

	pub fn seed(&self) -> i64 {
		self.seed
	}

	/// Whether every block in the rectangle `min..=max` falls on a cell of this grid.
	pub fn covers(&self, min: Position, max: Position) -> bool {
		self.cell_index(min).is_some() && self.cell_index(max).is_some()
	}

	pub fn get(&self, position: Position) -> Option<Biome> {
		self.cell_index(position).map(|index| Biome(self.cells[index]))
	}

	fn cell_index(&self, position: Position) -> Option<usize> {
		let x = (position.x() >> self.scale_shift) as i64 - self.origin.0 as i64;
		let z = (position.z() >> self.scale_shift) as i64 - self.origin.1 as i64;

		if x < 0 || z < 0 || x >= self.width as i64 || z >= self.depth as i64 {
			return None;
		}

		Some(z as usize * self.width as usize + x as usize)
	}
}

fn cell_count(width: u32, depth: u32) -> Result<usize, MapError> {
	(width as usize)
		.checked_mul(depth as usize)
		.ok_or(MapError::TooLarge { width, depth })
}

fn read_array<R: Read, const N: usize>(input: &mut R) -> io::Result<[u8; N]> {
	let mut bytes = [0; N];
	input.read_exact(&mut bytes)?;

	Ok(bytes)
}

/// A handle onto a shared [`BiomeGrid`]. Cloning is cheap, every worker of a parallel scan
/// gets its own handle and applies the seed on it.
#[derive(Debug, Clone)]
pub struct BiomeMap {
	grid: Arc<BiomeGrid>,
	applied: Option<i64>,
}

impl BiomeMap {
	pub fn new(grid: BiomeGrid) -> Self {
		BiomeMap { grid: Arc::new(grid), applied: None }
	}

	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
		let path = path.as_ref();
		let grid = BiomeGrid::read_from(BufReader::new(File::open(path)?))?;

		debug!(
			"loaded biome map {}: seed {}, {}x{} cells at 1:{}",
			path.display(),
			grid.seed,
			grid.width,
			grid.depth,
			1u32 << grid.scale_shift
		);

		Ok(BiomeMap::new(grid))
	}

	pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
		self.grid.write_to(BufWriter::new(File::create(path)?))
	}

	pub fn grid(&self) -> &BiomeGrid {
		&self.grid
	}
}

impl BiomeOracle for BiomeMap {
	fn apply_seed(&mut self, seed: i64) -> Result<(), OracleError> {
		if seed != self.grid.seed {
			return Err(OracleError::SeedMismatch { expected: self.grid.seed, applied: seed });
		}

		self.applied = Some(seed);

		Ok(())
	}

	fn query(&mut self, position: Position) -> Result<Biome, OracleError> {
		if self.applied.is_none() {
			return Err(OracleError::SeedNotApplied);
		}

		self.grid.get(position).ok_or(OracleError::OutOfBounds(position))
	}
}
