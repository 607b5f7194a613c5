//! Tabular simulation results and their text renderings.

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::{
	fmt::{self, Write},
	iter,
};

/// Name of the first field of every row, holding the recipe name.
pub const PATTERN_NAME_FIELD: &str = "Pattern Name";

/// Success probabilities of one recipe against one dice set
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[expect(clippy::exhaustive_structs, reason = "Both fields are the whole point of the type")]
pub struct Odds {
	/// Probability of satisfying the recipe with the first roll
	pub first: f64,

	/// Probability of failing the first roll and then satisfying the recipe after the reroll
	pub second: f64,
}

impl Odds {
	/// Creates a new set of odds from the first and second roll probabilities.
	#[must_use]
	pub const fn new(first: f64, second: f64) -> Self {
		Self { first, second }
	}

	/// Overall probability of satisfying the recipe with either roll.
	#[must_use]
	#[inline]
	pub fn total(&self) -> f64 {
		self.first + self.second
	}
}

/// Results for a single recipe: its odds against each dice set, in the table's dice set order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultRow {
	/// Name of the recipe
	recipe: String,

	/// Odds per dice set
	odds: Vec<Odds>,
}

impl ResultRow {
	/// Creates a new row for a recipe.
	#[must_use]
	pub fn new(recipe: impl Into<String>, odds: Vec<Odds>) -> Self {
		Self {
			recipe: recipe.into(),
			odds,
		}
	}

	/// Name of the recipe the row is for.
	#[must_use]
	#[inline]
	pub fn recipe(&self) -> &str {
		&self.recipe
	}

	/// Odds against each dice set, in the table's dice set order.
	#[must_use]
	#[inline]
	pub fn odds(&self) -> &[Odds] {
		&self.odds
	}
}

/// Results of a simulation: one row per recipe and three columns (first, second, total) per dice set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultTable {
	/// Dice set names in registration order
	dice_sets: Vec<String>,

	/// Rows in recipe registration order
	rows: Vec<ResultRow>,
}

impl ResultTable {
	/// Creates a new table with no rows for the given dice set names.
	#[must_use]
	pub const fn new(dice_sets: Vec<String>) -> Self {
		Self {
			dice_sets,
			rows: Vec::new(),
		}
	}

	/// Appends a row to the table.
	pub fn push(&mut self, row: ResultRow) {
		self.rows.push(row);
	}

	/// Dice set names, in column order.
	#[must_use]
	#[inline]
	pub fn dice_sets(&self) -> &[String] {
		&self.dice_sets
	}

	/// Rows, in recipe registration order.
	#[must_use]
	#[inline]
	pub fn rows(&self) -> &[ResultRow] {
		&self.rows
	}

	/// Looks up the row for a recipe by name.
	#[must_use]
	pub fn row(&self, recipe: &str) -> Option<&ResultRow> {
		self.rows.iter().find(|row| row.recipe == recipe)
	}

	/// Looks up the odds of a recipe against a dice set by their names.
	#[must_use]
	pub fn get(&self, recipe: &str, dice_set: &str) -> Option<Odds> {
		let col = self.dice_sets.iter().position(|name| name == dice_set)?;
		self.row(recipe)?.odds.get(col).copied()
	}

	/// Names of every field of a row, in column order: the pattern name field, then `"{name}: 1st"`,
	/// `"{name}: 2nd"`, and `"{name}: Total"` for each dice set.
	///
	/// # Examples
	/// ```
	/// use recipe_odds::sim::ResultTable;
	///
	/// let table = ResultTable::new(vec!["Fair".into(), "Loaded".into()]);
	/// assert_eq!(
	/// 	table.field_names(),
	/// 	vec![
	/// 		"Pattern Name",
	/// 		"Fair: 1st",
	/// 		"Fair: 2nd",
	/// 		"Fair: Total",
	/// 		"Loaded: 1st",
	/// 		"Loaded: 2nd",
	/// 		"Loaded: Total",
	/// 	]
	/// );
	/// ```
	#[must_use]
	pub fn field_names(&self) -> Vec<String> {
		let mut names = Vec::with_capacity(self.dice_sets.len().saturating_mul(3).saturating_add(1));
		names.push(PATTERN_NAME_FIELD.into());
		for name in &self.dice_sets {
			names.push(format!("{name}: 1st"));
			names.push(format!("{name}: 2nd"));
			names.push(format!("{name}: Total"));
		}
		names
	}

	/// Writes the table as comma-separated values: a header row of [`Self::field_names()`] followed by one record per
	/// row. Fields containing commas, quotes, or line breaks are quoted, and records end with CRLF.
	///
	/// # Errors
	/// Any error from the underlying writer is passed along.
	pub fn write_csv(&self, out: &mut impl Write) -> fmt::Result {
		write_record(out, self.field_names().iter().map(String::as_str))?;

		for row in &self.rows {
			let vals = row
				.odds
				.iter()
				.flat_map(|odds| [odds.first, odds.second, odds.total()])
				.map(|val| val.to_string());
			let fields = iter::once(row.recipe.clone()).chain(vals).collect::<Vec<_>>();
			write_record(out, fields.iter().map(String::as_str))?;
		}

		Ok(())
	}

	/// Renders the table as comma-separated values (see [`Self::write_csv()`]).
	///
	/// # Examples
	/// ```
	/// use recipe_odds::sim::{Odds, ResultRow, ResultTable};
	///
	/// let mut table = ResultTable::new(vec!["Fair, Four".into()]);
	/// table.push(ResultRow::new("One Unique", vec![Odds::new(0.5, 0.25)]));
	///
	/// assert_eq!(
	/// 	table.to_csv(),
	/// 	"Pattern Name,\"Fair, Four: 1st\",\"Fair, Four: 2nd\",\"Fair, Four: Total\"\r\nOne Unique,0.5,0.25,0.75\r\n"
	/// );
	/// ```
	#[must_use]
	pub fn to_csv(&self) -> String {
		self.csv().to_string()
	}

	/// Creates a displayable CSV rendering of the table (see [`Self::write_csv()`]).
	#[must_use]
	#[inline]
	pub const fn csv(&self) -> Csv<'_> {
		Csv(self)
	}

	/// Creates a console-friendly listing of the first-roll probability of each recipe against each dice set.
	///
	/// # Examples
	/// ```
	/// use recipe_odds::sim::{Odds, ResultRow, ResultTable};
	///
	/// let mut table = ResultTable::new(vec!["No Specialty Dice".into()]);
	/// table.push(ResultRow::new("One Unique", vec![Odds::new(0.5, 0.25)]));
	///
	/// assert_eq!(table.listing().to_string(), "One Unique:\n  No Specialty Dice: 0.5\n");
	/// ```
	#[must_use]
	#[inline]
	pub const fn listing(&self) -> Listing<'_> {
		Listing(self)
	}
}

/// Per-recipe, per-dice-set listing of first-roll probabilities, created by [`ResultTable::listing()`]
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a>(&'a ResultTable);

impl fmt::Display for Listing<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for row in &self.0.rows {
			writeln!(f, "{}:", row.recipe)?;
			for (name, odds) in self.0.dice_sets.iter().zip(&row.odds) {
				writeln!(f, "  {name}: {}", odds.first)?;
			}
		}
		Ok(())
	}
}

/// CSV rendering of a [`ResultTable`], created by [`ResultTable::csv()`]
#[derive(Debug, Clone, Copy)]
pub struct Csv<'a>(&'a ResultTable);

impl fmt::Display for Csv<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.write_csv(f)
	}
}

/// Writes a single CSV record, quoting fields as needed.
fn write_record<'f>(out: &mut impl Write, fields: impl Iterator<Item = &'f str>) -> fmt::Result {
	for (idx, field) in fields.enumerate() {
		if idx > 0 {
			out.write_char(',')?;
		}

		if field.contains([',', '"', '\r', '\n']) {
			write!(out, "\"{}\"", field.replace('"', "\"\""))?;
		} else {
			out.write_str(field)?;
		}
	}
	out.write_str("\r\n")
}
