//! All functionality for directly creating dice, rolling them, and working with their current values.
//!
//! This is the home of the dice "primitives". For checking rolls against a required pattern, see [`Recipe`].
//!
//! [`Recipe`]: crate::recipe::Recipe

pub mod roller;

use alloc::{
	string::{String, ToString},
	vec::Vec,
};
use core::{fmt, iter};

pub use self::roller::Roller;

/// A single die with an arbitrary multiset of faces, which remembers the value it last rolled.
///
/// Faces may repeat: a weighted die such as `[1, 1, 1, 1, 6, 6]` rolls a 1 twice as often as a 6.
/// Cloning a die produces an independent die with its own current value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Die {
	/// Faces the die can land on
	faces: Vec<u8>,

	/// Whether this is a specialty die, preferred when choosing which of several matching dice to hold
	special: bool,

	/// Value of the most recent roll, if the die has been rolled at all
	current: Option<u8>,
}

impl Die {
	/// Creates a new regular die with the given faces.
	///
	/// # Errors
	/// If `faces` is empty, [`Error::NoFaces`] is returned.
	pub fn new(faces: impl Into<Vec<u8>>) -> Result<Self, Error> {
		Self::with_special(faces, false)
	}

	/// Creates a new specialty die with the given faces.
	///
	/// # Errors
	/// If `faces` is empty, [`Error::NoFaces`] is returned.
	pub fn special(faces: impl Into<Vec<u8>>) -> Result<Self, Error> {
		Self::with_special(faces, true)
	}

	/// Creates a new regular die with faces numbered from 1 to `sides`.
	///
	/// # Errors
	/// If `sides` is 0, [`Error::NoFaces`] is returned.
	///
	/// # Examples
	/// ```
	/// use recipe_odds::dice::Die;
	///
	/// let d6 = Die::fair(6)?;
	/// assert_eq!(d6.faces(), &[1, 2, 3, 4, 5, 6]);
	/// assert!(!d6.is_special());
	/// # Ok::<(), recipe_odds::dice::Error>(())
	/// ```
	pub fn fair(sides: u8) -> Result<Self, Error> {
		Self::new((1..=sides).collect::<Vec<_>>())
	}

	/// Creates a new die with the given faces and specialty flag.
	///
	/// # Errors
	/// If `faces` is empty, [`Error::NoFaces`] is returned.
	pub fn with_special(faces: impl Into<Vec<u8>>, special: bool) -> Result<Self, Error> {
		let faces = faces.into();
		if faces.is_empty() {
			return Err(Error::NoFaces);
		}

		Ok(Self {
			faces,
			special,
			current: None,
		})
	}

	/// Rolls the die, remembering and returning the face it landed on.
	pub fn roll(&mut self, roller: &mut impl Roller) -> u8 {
		let val = roller.roll_face(&self.faces);
		self.current = Some(val);
		val
	}

	/// Faces the die can land on.
	#[must_use]
	#[inline]
	pub fn faces(&self) -> &[u8] {
		&self.faces
	}

	/// Indicates whether this is a specialty die.
	#[must_use]
	#[inline]
	pub const fn is_special(&self) -> bool {
		self.special
	}

	/// Value of the most recent roll, or `None` if the die hasn't been rolled yet.
	#[must_use]
	#[inline]
	pub const fn current(&self) -> Option<u8> {
		self.current
	}
}

impl fmt::Display for Die {
	/// Formats the die as its list of faces, prefixed with `special` for specialty dice and followed by the current
	/// value (if any).
	///
	/// # Examples
	/// ```
	/// use recipe_odds::dice::{roller::Val as ValRoller, Die};
	///
	/// let mut die = Die::special([2, 2, 2, 2, 6, 6])?;
	/// assert_eq!(die.to_string(), "special [2, 2, 2, 2, 6, 6]");
	///
	/// die.roll(&mut ValRoller(6));
	/// assert_eq!(die.to_string(), "special [2, 2, 2, 2, 6, 6] = 6");
	/// # Ok::<(), recipe_odds::dice::Error>(())
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.special {
			write!(f, "special ")?;
		}

		write!(
			f,
			"[{}]",
			self.faces.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
		)?;

		match self.current {
			Some(val) => write!(f, " = {val}"),
			None => Ok(()),
		}
	}
}

/// Handle to a single die within a [`DiceSet`], identifying it by its position in the set's declared order.
///
/// Dice are told apart by handle rather than by value, since two dice with identical faces are still distinct dice
/// when deciding which of them to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DieId(usize);

impl DieId {
	/// Position of the die within its set.
	#[must_use]
	#[inline]
	pub const fn index(self) -> usize {
		self.0
	}
}

/// A named, ordered collection of dice that are rolled together.
///
/// The set owns its dice, so dice are never shared between sets even when built from the same template die.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiceSet {
	/// Name of the set, used to label result columns
	name: String,

	/// Dice in declared order
	dice: Vec<Die>,
}

impl DiceSet {
	/// Creates a new dice set from a name and the dice it contains.
	#[must_use]
	pub fn new(name: impl Into<String>, dice: Vec<Die>) -> Self {
		Self {
			name: name.into(),
			dice,
		}
	}

	/// Creates a new dice set builder.
	#[must_use]
	#[inline]
	pub fn builder(name: impl Into<String>) -> Builder {
		Builder(Self::new(name, Vec::new()))
	}

	/// Rolls every die in the set and returns the resulting values sorted in ascending order.
	pub fn roll(&mut self, roller: &mut impl Roller) -> Vec<u8> {
		self.roll_holding(&[], roller)
	}

	/// Rolls every die in the set except those in `held`, which keep their current value, and returns the full set of
	/// values sorted in ascending order.
	///
	/// A held die that has never been rolled has no value to keep, so it is rolled regardless.
	///
	/// # Examples
	/// ```
	/// use recipe_odds::dice::{roller::Val as ValRoller, DiceSet, Die};
	///
	/// let mut set = DiceSet::builder("Two Fair").dice(2, &Die::fair(6)?).build();
	/// set.roll(&mut ValRoller(3));
	///
	/// let held = set.ids().take(1).collect::<Vec<_>>();
	/// assert_eq!(set.roll_holding(&held, &mut ValRoller(5)), vec![3, 5]);
	/// # Ok::<(), recipe_odds::dice::Error>(())
	/// ```
	pub fn roll_holding(&mut self, held: &[DieId], roller: &mut impl Roller) -> Vec<u8> {
		let mut vals = self
			.dice
			.iter_mut()
			.enumerate()
			.map(|(idx, die)| match die.current() {
				Some(val) if held.contains(&DieId(idx)) => val,
				_ => die.roll(roller),
			})
			.collect::<Vec<_>>();
		vals.sort_unstable();
		vals
	}

	/// Current values of all dice, sorted in ascending order, without rolling anything.
	/// Returns `None` if any die in the set hasn't been rolled yet.
	#[must_use]
	pub fn current_roll(&self) -> Option<Vec<u8>> {
		let mut vals = self.dice.iter().map(Die::current).collect::<Option<Vec<_>>>()?;
		vals.sort_unstable();
		Some(vals)
	}

	/// Name of the set.
	#[must_use]
	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Dice in the set, in declared order.
	#[must_use]
	#[inline]
	pub fn dice(&self) -> &[Die] {
		&self.dice
	}

	/// Looks up a die by its handle.
	#[must_use]
	#[inline]
	pub fn die(&self, id: DieId) -> Option<&Die> {
		self.dice.get(id.0)
	}

	/// Handles for every die in the set, in declared order.
	pub fn ids(&self) -> impl Iterator<Item = DieId> + '_ {
		(0..self.dice.len()).map(DieId)
	}

	/// Handles and dice for every die in the set, in declared order.
	pub fn iter(&self) -> impl Iterator<Item = (DieId, &Die)> + '_ {
		self.dice.iter().enumerate().map(|(idx, die)| (DieId(idx), die))
	}

	/// Number of dice in the set.
	#[must_use]
	#[inline]
	pub fn len(&self) -> usize {
		self.dice.len()
	}

	/// Indicates whether the set has no dice at all.
	#[must_use]
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.dice.is_empty()
	}
}

impl fmt::Display for DiceSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} ({} dice, {} special)",
			self.name,
			self.dice.len(),
			self.dice.iter().filter(|die| die.is_special()).count()
		)
	}
}

/// An error resulting from a dice operation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// A die was defined without any faces to land on.
	///
	/// # Examples
	/// ```
	/// use recipe_odds::dice::{Die, Error};
	///
	/// assert!(matches!(Die::new(Vec::<u8>::new()), Err(Error::NoFaces)));
	/// assert!(matches!(Die::fair(0), Err(Error::NoFaces)));
	/// ```
	#[error("a die must have at least one face")]
	NoFaces,
}

/// Builds a [`DiceSet`] with a fluent interface.
///
/// Every die added is its own independent instance, so adding the same template die several times never links the
/// resulting dice together.
///
/// # Examples
/// ```
/// use recipe_odds::dice::{DiceSet, Die};
///
/// let fair = Die::fair(6)?;
/// let set = DiceSet::builder("One Specialty Die")
/// 	.dice(4, &fair)
/// 	.die(Die::special([1, 1, 1, 1, 6, 6])?)
/// 	.build();
///
/// assert_eq!(set.len(), 5);
/// assert_eq!(set.dice().iter().filter(|die| die.is_special()).count(), 1);
/// # Ok::<(), recipe_odds::dice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Builder(DiceSet);

impl Builder {
	/// Adds a single die to the set.
	#[must_use]
	pub fn die(mut self, die: Die) -> Self {
		self.0.dice.push(die);
		self
	}

	/// Adds `count` independent copies of a template die to the set.
	#[must_use]
	pub fn dice(mut self, count: u8, template: &Die) -> Self {
		self.0.dice.extend(iter::repeat(template).take(usize::from(count)).map(|die| Die {
			current: None,
			..die.clone()
		}));
		self
	}

	/// Finalizes the dice set.
	#[must_use]
	pub fn build(self) -> DiceSet {
		self.0
	}
}
