use rand::Rng;

/// Source of uniformly distributed integers.
///
/// The generator only draws from it; seeding and ownership stay with the
/// caller. Every `rand::Rng` is a `RandomSource`, including `&mut R`, so a
/// caller can lend its generator instead of moving it.
pub trait RandomSource {
	/// Returns an integer in `[0, upper_bound_exclusive)`, or 0 for an empty range.
	fn next_below(&mut self, upper_bound_exclusive: usize) -> usize;

	/// Returns an integer in `[lower, upper_inclusive]`, or `lower` for an empty range.
	fn next_in(&mut self, lower: usize, upper_inclusive: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
	fn next_below(&mut self, upper_bound_exclusive: usize) -> usize {
		if upper_bound_exclusive <= 1 {
			return 0;
		}
		self.random_range(0..upper_bound_exclusive)
	}

	fn next_in(&mut self, lower: usize, upper_inclusive: usize) -> usize {
		if upper_inclusive <= lower {
			return lower;
		}
		self.random_range(lower..=upper_inclusive)
	}
}
