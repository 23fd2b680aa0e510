use clap::{App, AppSettings, Arg, ArgMatches};
use hutfind_biome::MapError;
use hutfind_search::params::ParamsError;
use hutfind_structure::config::UnknownStructure;
use hutfind_structure::version::VersionError;
use hutfind_structure::{McVersion, Position, StructureConfig, StructureKind};
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Half range in blocks searched when none is given.
pub const DEFAULT_SEARCH_BLOCKS: i64 = 153600;

pub const DEFAULT_OUTPUT: &str = "out.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("{0}")]
	Arguments(#[from] clap::Error),
	#[error(transparent)]
	Version(#[from] VersionError),
	#[error("seed `{0}` is not a 64-bit integer")]
	Seed(String),
	#[error("search range `{0}` is not a non-negative number of blocks")]
	Range(String),
	#[error("filter `{0}` is not 2, 3 or 4")]
	Filter(String),
	#[error("thread count `{0}` is not a positive number")]
	Threads(String),
	#[error(transparent)]
	Structure(#[from] UnknownStructure),
	#[error("{kind} does not generate in version {version}")]
	Unavailable { kind: StructureKind, version: McVersion },
	#[error("{kind} placement also checks a biome area, which a biome map cannot answer")]
	AreaCheck { kind: StructureKind },
	#[error("invalid search: {0}")]
	Params(#[from] ParamsError),
	#[error("could not load biome map: {0}")]
	Map(#[from] MapError),
	#[error("biome map was rendered for seed {map}, not {seed}")]
	MapSeed { map: i64, seed: i64 },
	#[error("biome map does not cover the search area (blocks {min} to {max})")]
	Coverage { min: Position, max: Position },
}

#[derive(Debug, Clone)]
pub struct Options {
	pub version: McVersion,
	pub seed: i64,
	/// Half range in blocks, as given.
	pub search_blocks: i64,
	pub min_size: u32,
	pub structure: StructureKind,
	pub config: StructureConfig,
	pub biome_map: PathBuf,
	pub threads: usize,
	pub output: PathBuf,
	pub quiet: bool,
}

/// Accepts any signed 64-bit seed, and unsigned 64-bit seeds reinterpreted as signed.
pub fn parse_seed(seed: &str) -> Result<i64, ConfigError> {
	let parsed = if seed.starts_with('-') {
		i64::from_str(seed)
	} else {
		u64::from_str(seed).map(|seed| seed as i64)
	};

	parsed.map_err(|_| ConfigError::Seed(seed.to_owned()))
}

fn validate_threads(count: String) -> Result<(), String> {
	match count.parse::<u32>() {
		Ok(0) => Err("at least one worker thread is needed".to_owned()),
		Ok(_) => Ok(()),
		Err(_) => Err(format!("`{}` is not a thread count", count)),
	}
}

/// Valid values of the positional arguments, printed after configuration errors.
pub fn usage() -> String {
	let versions: Vec<&str> = McVersion::recognized().map(McVersion::token).collect();

	format!(
		"Usage: hutfind <mcversion> <seed> [searchRange] [filter] --biome-map <FILE>\n\
		 Valid <mcversion> are {}.\n\
		 Valid [searchRange] is in blocks, default is {} which covers -{} to {} on both X and Z.\n\
		 Valid [filter] is 2, 3 or 4 for only reporting double, triple or quad clusters at minimum.",
		versions.join(", "),
		DEFAULT_SEARCH_BLOCKS,
		DEFAULT_SEARCH_BLOCKS,
		DEFAULT_SEARCH_BLOCKS
	)
}

pub fn app() -> App<'static, 'static> {
	App::new("hutfind")
		.version("0.1.0")
		.about("Multithreaded finder for groups of structures that fit within one 128 block radius")
		.setting(AppSettings::AllowNegativeNumbers)
		.arg(Arg::with_name("mcversion")
			.help("Generator version whose structure layout is searched")
			.required(true)
			.index(1)
		)
		.arg(Arg::with_name("seed")
			.help("World seed, as a signed or unsigned 64-bit integer")
			.required(true)
			.index(2)
		)
		.arg(Arg::with_name("range")
			.value_name("searchRange")
			.help("Half range in blocks searched on both axes")
			.default_value("153600")
			.index(3)
		)
		.arg(Arg::with_name("filter")
			.help("Minimum number of structures in a reported group (2, 3 or 4)")
			.default_value("2")
			.index(4)
		)
		.arg(Arg::with_name("biome-map")
			.short("b")
			.long("biome-map")
			.value_name("FILE")
			.help("Pre-rendered biome map of the seed, used to check where structures can spawn")
			.takes_value(true)
			.required(true)
		)
		.arg(Arg::with_name("structure")
			.short("s")
			.long("structure")
			.value_name("KIND")
			.help("Structure to search for: swamp_hut, desert_pyramid, igloo, jungle_pyramid, ocean_ruin or shipwreck")
			.default_value("swamp_hut")
		)
		.arg(Arg::with_name("threads")
			.short("j")
			.long("threads")
			.value_name("COUNT")
			.long_help("Configures the number of threads to use \n\
			               Default: CPU count")
			.takes_value(true)
			.validator(validate_threads)
		)
		.arg(Arg::with_name("output")
			.short("o")
			.long("output")
			.value_name("FILE")
			.help("Report file, overwritten on every run")
			.default_value(DEFAULT_OUTPUT)
		)
		.arg(Arg::with_name("quiet")
			.short("q")
			.long("quiet")
			.help("Hides the per-partition progress indicators")
		)
}

impl Options {
	pub fn parse<I, T>(args: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = T>,
		T: Into<OsString> + Clone,
	{
		let matches = app().get_matches_from_safe(args)?;

		Options::from_matches(&matches)
	}

	pub fn from_matches(matches: &ArgMatches) -> Result<Self, ConfigError> {
		let version = McVersion::from_str(matches.value_of("mcversion").unwrap_or_default())?;
		let seed = parse_seed(matches.value_of("seed").unwrap_or_default())?;

		let range = matches.value_of("range").unwrap_or_default();
		let search_blocks = match i64::from_str(range) {
			Ok(blocks) if blocks >= 0 => blocks,
			_ => return Err(ConfigError::Range(range.to_owned())),
		};

		let filter = matches.value_of("filter").unwrap_or_default();
		let min_size = match u32::from_str(filter) {
			Ok(size) if size >= 2 && size <= 4 => size,
			_ => return Err(ConfigError::Filter(filter.to_owned())),
		};

		let structure = StructureKind::from_str(matches.value_of("structure").unwrap_or_default())?;
		let config = structure.config(version).ok_or(ConfigError::Unavailable { kind: structure, version })?;

		if config.is_large_structure {
			return Err(ConfigError::AreaCheck { kind: structure });
		}

		let threads = match matches.value_of("threads") {
			Some(threads) => usize::from_str(threads).map_err(|_| ConfigError::Threads(threads.to_owned()))?,
			None => num_cpus::get(),
		};

		Ok(Options {
			version,
			seed,
			search_blocks,
			min_size,
			structure,
			config,
			biome_map: matches.value_of_os("biome-map").map(PathBuf::from).unwrap_or_default(),
			threads,
			output: matches.value_of_os("output").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
			quiet: matches.is_present("quiet"),
		})
	}

	/// Region range on each side of the origin.
	pub fn region_range(&self) -> i32 {
		hutfind_search::SearchParams::regions_for_blocks(&self.config, self.search_blocks)
	}
}
