//! Monte Carlo estimation of recipe success rates across dice sets.
//!
//! Every trial rolls a whole dice set and checks it against a recipe. If that first roll fails, the dice worth keeping
//! are held and the rest are rerolled once (see [`Recipe::reroll()`]). Counting how often each attempt succeeds over
//! many trials gives the first-roll, second-roll, and total odds reported in a [`ResultTable`].

pub mod table;

use alloc::{string::String, vec::Vec};
use core::num::NonZeroU32;

use tracing::{debug, info};

pub use self::table::{Odds, ResultRow, ResultTable};
use crate::{
	dice::{roller::Roller, DiceSet},
	recipe::Recipe,
};

/// Runs simulations for every registered recipe against every registered dice set.
///
/// # Examples
/// ```
/// use recipe_odds::{dice::{roller::FastRand as FastRandRoller, DiceSet, Die}, Recipe, Simulator};
///
/// let mut sim = Simulator::new();
/// sim.add_recipe(Recipe::new("One Unique", [1]))?;
/// sim.add_dice_set(DiceSet::builder("One Fair Die").die(Die::fair(6)?).build())?;
///
/// let table = sim.simulate(10_000, &mut FastRandRoller::with_seed(42))?;
/// let odds = table.get("One Unique", "One Fair Die").unwrap();
/// assert!((odds.first - 1.0 / 6.0).abs() < 0.03);
/// assert!(odds.total() > odds.first);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
	/// Recipes in registration order (one result row each)
	recipes: Vec<Recipe>,

	/// Dice sets in registration order (three result columns each)
	dice_sets: Vec<DiceSet>,

	/// Results of the most recent simulation
	results: ResultTable,
}

impl Simulator {
	/// Creates a new simulator with no recipes or dice sets.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a recipe to be simulated.
	///
	/// # Errors
	/// If a recipe with the same name is already registered, [`Error::DuplicateRecipe`] is returned.
	pub fn add_recipe(&mut self, recipe: Recipe) -> Result<(), Error> {
		if self.recipes.iter().any(|existing| existing.name() == recipe.name()) {
			return Err(Error::DuplicateRecipe(recipe.name().into()));
		}

		self.recipes.push(recipe);
		Ok(())
	}

	/// Registers a dice set to simulate every recipe against.
	///
	/// # Errors
	/// If a dice set with the same name is already registered, [`Error::DuplicateDiceSet`] is returned.
	pub fn add_dice_set(&mut self, dice_set: DiceSet) -> Result<(), Error> {
		if self.dice_sets.iter().any(|existing| existing.name() == dice_set.name()) {
			return Err(Error::DuplicateDiceSet(dice_set.name().into()));
		}

		self.dice_sets.push(dice_set);
		Ok(())
	}

	/// Registered recipes, in registration order.
	#[must_use]
	#[inline]
	pub fn recipes(&self) -> &[Recipe] {
		&self.recipes
	}

	/// Registered dice sets, in registration order.
	#[must_use]
	#[inline]
	pub fn dice_sets(&self) -> &[DiceSet] {
		&self.dice_sets
	}

	/// Results of the most recent simulation (empty if nothing has been simulated yet).
	#[must_use]
	#[inline]
	pub const fn results(&self) -> &ResultTable {
		&self.results
	}

	/// Runs `cycles` trials of every recipe against every dice set and builds a fresh result table from them,
	/// replacing the results of any previous simulation.
	///
	/// # Errors
	/// If `cycles` is 0, [`Error::ZeroCycles`] is returned and the previous results are left untouched.
	pub fn simulate(&mut self, cycles: u32, roller: &mut impl Roller) -> Result<&ResultTable, Error> {
		let cycles = NonZeroU32::new(cycles).ok_or(Error::ZeroCycles)?;
		info!(
			recipes = self.recipes.len(),
			dice_sets = self.dice_sets.len(),
			cycles = cycles.get(),
			"starting simulation"
		);

		let mut table = ResultTable::new(self.dice_sets.iter().map(|set| String::from(set.name())).collect());
		for recipe in &self.recipes {
			let mut odds = Vec::with_capacity(self.dice_sets.len());

			for dice_set in &mut self.dice_sets {
				let tally = Tally::run(recipe, dice_set, cycles, roller);
				let recipe_odds = tally.odds();
				debug!(
					recipe = recipe.name(),
					dice_set = dice_set.name(),
					first = recipe_odds.first,
					second = recipe_odds.second,
					total = recipe_odds.total(),
					"simulated recipe"
				);
				odds.push(recipe_odds);
			}

			table.push(ResultRow::new(recipe.name(), odds));
		}

		info!(rows = table.rows().len(), "simulation complete");
		self.results = table;
		Ok(&self.results)
	}
}

/// Result of a single trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Outcome {
	/// The first roll satisfied the recipe.
	First,

	/// The first roll failed, but the roll after holding and rerolling satisfied the recipe.
	Second,

	/// Neither roll satisfied the recipe.
	Failed,
}

impl Outcome {
	/// Runs one trial: rolls the whole set, and only if that fails, rerolls it once.
	///
	/// # Examples
	/// ```
	/// use recipe_odds::{dice::{roller::Iter as IterRoller, DiceSet, Die}, sim::Outcome, Recipe};
	///
	/// let recipe = Recipe::new("Two Matching", [1, 1]);
	/// let mut set = DiceSet::builder("Two Fair").dice(2, &Die::fair(6)?).build();
	///
	/// assert_eq!(Outcome::trial(&recipe, &mut set, &mut IterRoller::new([1, 1])), Outcome::First);
	/// assert_eq!(Outcome::trial(&recipe, &mut set, &mut IterRoller::new([1, 3, 1])), Outcome::Second);
	/// assert_eq!(Outcome::trial(&recipe, &mut set, &mut IterRoller::new([4, 2, 5, 6])), Outcome::Failed);
	/// # Ok::<(), recipe_odds::dice::Error>(())
	/// ```
	pub fn trial(recipe: &Recipe, dice_set: &mut DiceSet, roller: &mut impl Roller) -> Self {
		if recipe.check_roll(dice_set.roll(roller)) {
			Self::First
		} else if recipe.reroll(dice_set, roller) {
			Self::Second
		} else {
			Self::Failed
		}
	}
}

/// Success counts accumulated over a number of trials of one recipe against one dice set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct Tally {
	/// Number of trials the odds are computed over
	pub cycles: NonZeroU32,

	/// Trials that succeeded on the first roll
	pub first: u32,

	/// Trials that failed the first roll but succeeded after the reroll
	pub second: u32,
}

impl Tally {
	/// Creates an empty tally for the given number of trials.
	#[must_use]
	pub const fn new(cycles: NonZeroU32) -> Self {
		Self {
			cycles,
			first: 0,
			second: 0,
		}
	}

	/// Runs `cycles` trials of a recipe against a dice set and tallies their outcomes.
	pub fn run(recipe: &Recipe, dice_set: &mut DiceSet, cycles: NonZeroU32, roller: &mut impl Roller) -> Self {
		let mut tally = Self::new(cycles);
		for _ in 0..cycles.get() {
			tally.record(Outcome::trial(recipe, dice_set, roller));
		}
		tally
	}

	/// Counts the outcome of one trial.
	pub fn record(&mut self, outcome: Outcome) {
		match outcome {
			Outcome::First => self.first = self.first.saturating_add(1),
			Outcome::Second => self.second = self.second.saturating_add(1),
			Outcome::Failed => {}
		}
	}

	/// Converts the counts into probabilities over the tally's cycle count.
	///
	/// # Examples
	/// ```
	/// use std::num::NonZeroU32;
	///
	/// use recipe_odds::sim::{Outcome, Tally};
	///
	/// let mut tally = Tally::new(NonZeroU32::new(4).unwrap());
	/// tally.record(Outcome::First);
	/// tally.record(Outcome::Second);
	/// tally.record(Outcome::Second);
	/// tally.record(Outcome::Failed);
	///
	/// let odds = tally.odds();
	/// assert_eq!(odds.first, 0.25);
	/// assert_eq!(odds.second, 0.5);
	/// assert_eq!(odds.total(), 0.75);
	/// ```
	#[must_use]
	pub fn odds(&self) -> Odds {
		let cycles = f64::from(self.cycles.get());
		Odds::new(f64::from(self.first) / cycles, f64::from(self.second) / cycles)
	}
}

/// An error resulting from setting up or running a simulation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The simulation was asked to run zero trials, which would leave every probability undefined.
	///
	/// # Examples
	/// ```
	/// use recipe_odds::{dice::roller::Val as ValRoller, sim::Error, Simulator};
	///
	/// let mut sim = Simulator::new();
	/// assert!(matches!(sim.simulate(0, &mut ValRoller(1)), Err(Error::ZeroCycles)));
	/// ```
	#[error("the number of simulation cycles must be greater than zero")]
	ZeroCycles,

	/// A recipe with the same name was already registered.
	#[error("duplicate recipe name: {0}")]
	DuplicateRecipe(String),

	/// A dice set with the same name was already registered.
	#[error("duplicate dice set name: {0}")]
	DuplicateDiceSet(String),
}
