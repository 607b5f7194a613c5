//! Recipes: required face patterns, checking rolls against them, and deciding which dice to hold for a reroll.

use alloc::{
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

use tracing::trace;

use crate::dice::{roller::Roller, DiceSet, DieId};

/// A named multiset of face values that a roll must satisfy.
///
/// A required value is satisfied either by a die showing exactly that value (a direct match) or, failing that, by any
/// two dice showing the same value as each other (a pair substitution). The order of the pattern matters only for the
/// greedy order in which requirements claim dice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Recipe {
	/// Name of the recipe, used to label result rows
	name: String,

	/// Required face values
	pattern: Vec<u8>,
}

impl Recipe {
	/// Creates a new recipe from a name and the face values it requires.
	#[must_use]
	pub fn new(name: impl Into<String>, pattern: impl Into<Vec<u8>>) -> Self {
		Self {
			name: name.into(),
			pattern: pattern.into(),
		}
	}

	/// Name of the recipe.
	#[must_use]
	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Required face values, in declared order.
	#[must_use]
	#[inline]
	pub fn pattern(&self) -> &[u8] {
		&self.pattern
	}

	/// Checks whether a roll satisfies the recipe. The roll is consumed in the process.
	///
	/// # Examples
	/// ```
	/// use recipe_odds::Recipe;
	///
	/// let recipe = Recipe::new("Two Unique", [1, 2]);
	/// assert!(recipe.check_roll(vec![1, 2, 5]));
	///
	/// // The pair of 4s stands in for the missing 2
	/// assert!(recipe.check_roll(vec![1, 4, 4]));
	/// assert!(!recipe.check_roll(vec![1, 4, 5]));
	/// ```
	#[must_use]
	pub fn check_roll(&self, roll: Vec<u8>) -> bool {
		self.match_roll(roll).is_satisfied()
	}

	/// Matches a roll against the recipe, reporting exactly how each requirement was (or wasn't) satisfied.
	///
	/// Direct matches are claimed first, one die per required value, in pattern order. Every requirement left over then
	/// claims the lowest pair of equal values remaining in the roll, again in pattern order, with no backtracking.
	///
	/// # Examples
	/// ```
	/// use recipe_odds::{recipe::Substitution, Recipe};
	///
	/// let recipe = Recipe::new("Two Matching One Unique", [1, 1, 2]);
	/// let matched = recipe.match_roll(vec![1, 3, 3, 5, 5]);
	///
	/// assert_eq!(matched.direct, vec![1]);
	/// assert_eq!(
	/// 	matched.substitutions,
	/// 	vec![Substitution { symbol: 1, pair: 3 }, Substitution { symbol: 2, pair: 5 }]
	/// );
	/// assert!(matched.unmatched.is_empty());
	/// assert!(matched.leftover.is_empty());
	/// ```
	#[must_use]
	pub fn match_roll(&self, mut roll: Vec<u8>) -> Match {
		roll.sort_unstable();

		let mut unmatched = self.pattern.clone();
		let mut direct = Vec::new();

		// Claim dice showing exactly a required value
		for &symbol in &self.pattern {
			if let Some(pos) = roll.iter().position(|&val| val == symbol) {
				roll.remove(pos);
				remove_one(&mut unmatched, symbol);
				direct.push(symbol);
			}
		}

		// Let each remaining requirement claim the lowest available pair
		let mut substitutions = Vec::new();
		for symbol in unmatched.clone() {
			if let Some(idx) = first_pair(&roll) {
				let pair = roll.remove(idx);
				roll.remove(idx);
				remove_one(&mut unmatched, symbol);
				substitutions.push(Substitution { symbol, pair });
			}
		}

		Match {
			direct,
			substitutions,
			unmatched,
			leftover: roll,
		}
	}

	/// Picks which dice of a rolled set to hold for a reroll.
	///
	/// For each required value in pattern order, the dice not yet held that currently show that value are candidates:
	/// a lone candidate is held, several candidates resolve to the first specialty die among them or else the first in
	/// the set's declared order, and no candidates hold nothing. A die is never held for two requirements.
	///
	/// # Examples
	/// ```
	/// use recipe_odds::{dice::{roller::Iter as IterRoller, DiceSet, Die}, Recipe};
	///
	/// let mut set = DiceSet::builder("One Specialty Die")
	/// 	.dice(2, &Die::fair(6)?)
	/// 	.die(Die::special([1, 1, 1, 1, 6, 6])?)
	/// 	.build();
	/// set.roll(&mut IterRoller::new([1, 4, 1]));
	///
	/// let holds = Recipe::new("One Unique", [1]).holds(&set);
	/// assert_eq!(holds.iter().map(|id| id.index()).collect::<Vec<_>>(), vec![2]);
	/// # Ok::<(), recipe_odds::dice::Error>(())
	/// ```
	#[must_use]
	pub fn holds(&self, set: &DiceSet) -> Vec<DieId> {
		let mut held: Vec<DieId> = Vec::with_capacity(self.pattern.len());

		for &symbol in &self.pattern {
			let mut candidates = set
				.iter()
				.filter(|&(id, die)| die.current() == Some(symbol) && !held.contains(&id))
				.peekable();

			let Some(&(first, _)) = candidates.peek() else {
				continue;
			};
			let chosen = candidates
				.find(|(_, die)| die.is_special())
				.map_or(first, |(id, _)| id);

			trace!(recipe = %self.name, symbol, die = chosen.index(), "holding die");
			held.push(chosen);
		}

		held
	}

	/// Rerolls every die of a rolled set that isn't worth holding (see [`Self::holds()`]), then checks whether the
	/// new roll satisfies the recipe.
	///
	/// # Examples
	/// ```
	/// use recipe_odds::{dice::{roller::Iter as IterRoller, DiceSet, Die}, Recipe};
	///
	/// let recipe = Recipe::new("Two Unique", [1, 2]);
	/// let mut set = DiceSet::builder("Two Fair").dice(2, &Die::fair(6)?).build();
	///
	/// // First roll shows 1 and 5, so the 1 is held and only the 5 is rerolled (into a 2)
	/// let mut roller = IterRoller::new([1, 5, 2]);
	/// assert!(!recipe.check_roll(set.roll(&mut roller)));
	/// assert!(recipe.reroll(&mut set, &mut roller));
	/// assert_eq!(set.current_roll(), Some(vec![1, 2]));
	/// # Ok::<(), recipe_odds::dice::Error>(())
	/// ```
	#[must_use]
	pub fn reroll(&self, set: &mut DiceSet, roller: &mut impl Roller) -> bool {
		let held = self.holds(set);
		self.check_roll(set.roll_holding(&held, roller))
	}
}

impl fmt::Display for Recipe {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} [{}]",
			self.name,
			self.pattern.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
		)
	}
}

/// Details of how a roll was matched against a [`Recipe`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct Match {
	/// Required values that were satisfied by a die showing that exact value, in the order they were claimed
	pub direct: Vec<u8>,

	/// Required values that were satisfied by a pair instead, in the order they were claimed
	pub substitutions: Vec<Substitution>,

	/// Required values that couldn't be satisfied at all
	pub unmatched: Vec<u8>,

	/// Rolled values that weren't claimed by any requirement
	pub leftover: Vec<u8>,
}

impl Match {
	/// Indicates whether every requirement was satisfied.
	#[must_use]
	#[inline]
	pub fn is_satisfied(&self) -> bool {
		self.unmatched.is_empty()
	}
}

/// A pair of equal rolled values standing in for one required value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "A substitution is fully described by these two values")]
pub struct Substitution {
	/// Required value the pair stood in for
	pub symbol: u8,

	/// Value shown by both dice of the pair
	pub pair: u8,
}

/// Finds the index of the first of two adjacent equal values in a sorted roll, i.e. the lowest pair.
fn first_pair(sorted: &[u8]) -> Option<usize> {
	sorted.windows(2).position(|pair| pair[0] == pair[1])
}

/// Removes a single occurrence of a value, if present.
fn remove_one(vals: &mut Vec<u8>, val: u8) {
	if let Some(pos) = vals.iter().position(|&v| v == val) {
		vals.remove(pos);
	}
}
