//! Abstractions for picking die faces using various means.

use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

/// Picks faces for dice - what else is there to say?
pub trait Roller {
	/// Picks a single face out of a die's faces. Faces that appear more than once are proportionally more likely to
	/// be picked.
	#[must_use]
	fn roll_face(&mut self, faces: &[u8]) -> u8;
}

/// Picks faces uniformly at random using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use recipe_odds::dice::{roller::FastRand as FastRandRoller, Die};
///
/// let mut roller = FastRandRoller::default();
///
/// let mut die = Die::fair(6)?;
/// let val = die.roll(&mut roller);
/// assert!((1..=6).contains(&val));
/// # Ok::<(), recipe_odds::dice::Error>(())
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use recipe_odds::dice::{roller::FastRand as FastRandRoller, Die};
///
/// let mut first = FastRandRoller::with_seed(0x750c38d574400);
/// let mut second = FastRandRoller::with_seed(0x750c38d574400);
///
/// let mut die = Die::fair(20)?;
/// assert_eq!(die.roll(&mut first), die.roll(&mut second));
/// # Ok::<(), recipe_odds::dice::Error>(())
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(Default))]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to pick faces.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to pick faces.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Picks a face using the [`fastrand::Rng`] the roller was created with.
	/// An empty set of faces always yields 0.
	#[inline]
	fn roll_face(&mut self, faces: &[u8]) -> u8 {
		self.0.choice(faces).copied().unwrap_or_default()
	}
}

/// Produces rolls that always have a specific value, regardless of the die's faces.
///
/// # Examples
/// ```
/// use recipe_odds::dice::{roller::{Roller, Val as ValRoller}, DiceSet, Die};
///
/// let mut roller = ValRoller(4);
///
/// let mut set = DiceSet::builder("Three Fair").dice(3, &Die::fair(6)?).build();
/// assert_eq!(set.roll(&mut roller), vec![4, 4, 4]);
/// # Ok::<(), recipe_odds::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u8);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_face(&mut self, _faces: &[u8]) -> u8 {
		self.0
	}
}

/// Produces rolls from an iterator of values. Mainly useful for testing purposes, since the values don't have to be
/// faces of the dice being rolled.
///
/// # Examples
/// ```
/// use recipe_odds::dice::{roller::{Iter as IterRoller, Roller}, DiceSet, Die};
///
/// let mut roller = IterRoller::new(vec![5, 1, 3]);
/// let mut set = DiceSet::builder("Three Fair").dice(3, &Die::fair(6)?).build();
/// assert_eq!(set.roll(&mut roller), vec![1, 3, 5]);
/// assert!(!roller.can_roll());
/// # Ok::<(), recipe_odds::dice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u8>>(Peekable<I>);

impl<I: Iterator<Item = u8>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u8>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_face(&mut self, _faces: &[u8]) -> u8 {
		self.0.next().expect("iterator is finished")
	}
}
