//! Bit-exact emulation of `java.util.Random`, the 48-bit linear congruential generator that
//! decides structure placement.


const MULTIPLIER: i64 = 0x5DEECE66D;
const ADDEND: i64 = 0xB;
const MASK: i64 = (1 << 48) - 1;

const FLOAT_UNIT: f32 = 1.0 / (1u32 << 24) as f32;
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct JavaRng {
	state: i64,
}

impl JavaRng {
	/// Creates a generator from a seed, scrambling it exactly like `new Random(seed)`.
	pub fn new(seed: i64) -> Self {
		JavaRng { state: scramble(seed) }
	}

	pub fn set_seed(&mut self, seed: i64) {
		self.state = scramble(seed);
	}

	/// Advances the generator once and returns the top `bits` bits of the new state,
	/// reinterpreted as a signed 32-bit value. `bits` must be in `1..=32`.
	#[inline]
	pub fn next(&mut self, bits: u8) -> i32 {
		debug_assert!(bits >= 1 && bits <= 32, "bits out of range: {}", bits);

		self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;

		(self.state >> (48 - bits)) as i32
	}

	pub fn next_i32(&mut self) -> i32 {
		self.next(32)
	}

	/// Returns a value in `[0, bound)`.
	///
	/// Powers of two take a single draw and a multiply-shift. Every other bound rejects the
	/// draws that fall into the incomplete final bucket, which is detected by the intermediate
	/// result overflowing into the sign bit.
	///
	/// # Panics
	/// If `bound` is not positive.
	pub fn next_i32_bound(&mut self, bound: i32) -> i32 {
		assert!(bound > 0, "bound must be positive, got {}", bound);

		if is_power_of_two(bound) {
			return ((bound as i64 * self.next(31) as i64) >> 31) as i32;
		}

		loop {
			let bits = self.next(31);
			let value = bits % bound;

			if bits.wrapping_sub(value).wrapping_add(bound - 1) >= 0 {
				return value;
			}
		}
	}

	pub fn next_i64(&mut self) -> i64 {
		let high = self.next(32) as i64;
		let low = self.next(32) as i64;

		(high << 32).wrapping_add(low)
	}

	pub fn next_bool(&mut self) -> bool {
		self.next(1) != 0
	}

	pub fn next_f32(&mut self) -> f32 {
		self.next(24) as f32 * FLOAT_UNIT
	}

	pub fn next_f64(&mut self) -> f64 {
		let high = self.next(26) as i64;
		let low = self.next(27) as i64;

		((high << 27) + low) as f64 * DOUBLE_UNIT
	}
}

#[inline]
fn scramble(seed: i64) -> i64 {
	(seed ^ MULTIPLIER) & MASK
}

#[inline]
fn is_power_of_two(bound: i32) -> bool {
	(bound & bound.wrapping_neg()) == bound
}
