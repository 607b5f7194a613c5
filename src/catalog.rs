//! Declarative catalogs of recipes and dice sets, loaded from the text format described in [`parse`].
//!
//! [`parse`]: crate::parse

use alloc::{
	format,
	string::{String, ToString},
	vec,
	vec::Vec,
};
use core::{fmt, ops::Range, str::FromStr};

use chumsky::{error::Rich, span::Span as _, Parser};
use tracing::debug;

use crate::{
	dice::{DiceSet, Die, Error as DiceError},
	parse::{self, Spanned, Statement},
	recipe::Recipe,
	sim::{Error as SimError, Simulator},
};

/// Recipes and dice sets declared by a catalog, in declaration order
///
/// # Examples
/// ```
/// use recipe_odds::Catalog;
///
/// let catalog: Catalog = r#"
/// 	die fair = [1, 2, 3, 4, 5, 6]
/// 	die one = special [1, 1, 1, 1, 6, 6]
///
/// 	recipe "Two Matching" = [1, 1]
/// 	set "No Specialty Dice" = 4 fair
/// 	set "One Specialty Die" = 4 fair, one
/// "#
/// .parse()?;
///
/// assert_eq!(catalog.recipes.len(), 1);
/// assert_eq!(catalog.dice_sets[1].len(), 5);
/// assert!(catalog.dice_sets[1].dice()[4].is_special());
/// # Ok::<(), recipe_odds::catalog::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Catalog {
	/// Declared recipes
	pub recipes: Vec<Recipe>,

	/// Declared dice sets, each holding its own independent dice
	pub dice_sets: Vec<DiceSet>,
}

impl Catalog {
	/// Parses a catalog from its text form.
	///
	/// # Errors
	/// If the text isn't valid catalog syntax, a dice set refers to an undeclared die, a name is declared twice, or a
	/// die has no faces, an error variant pointing at the offending source is returned.
	pub fn parse(src: &str) -> Result<Self, Error> {
		let statements = parse::catalog()
			.parse(src)
			.into_result()
			.map_err(|errs| Error::Syntax(errs.iter().map(SyntaxError::from_rich).collect()))?;
		Self::from_statements(statements)
	}

	/// Builds a catalog from already-parsed statements, resolving dice set members to the die templates declared
	/// before them.
	///
	/// # Errors
	/// See [`Self::parse()`].
	pub fn from_statements(statements: impl IntoIterator<Item = Statement>) -> Result<Self, Error> {
		let mut catalog = Self::default();
		let mut templates: Vec<(String, Die)> = Vec::new();

		for statement in statements {
			match statement {
				Statement::Die { name, faces, special } => {
					if templates.iter().any(|(existing, _)| *existing == name.val) {
						return Err(Error::duplicate("die", name));
					}
					let die = Die::with_special(faces, special).map_err(|source| Error::Die {
						source,
						span: name.span.clone(),
					})?;
					templates.push((name.val, die));
				}

				Statement::Set { name, members } => {
					if catalog.dice_sets.iter().any(|set| set.name() == name.val) {
						return Err(Error::duplicate("dice set", name));
					}
					let mut builder = DiceSet::builder(name.val);
					for member in members {
						let Some((_, template)) = templates.iter().find(|(ident, _)| *ident == member.die.val) else {
							return Err(Error::UnknownDie {
								name: member.die.val,
								span: member.die.span,
							});
						};
						builder = builder.dice(member.count, template);
					}
					catalog.dice_sets.push(builder.build());
				}

				Statement::Recipe { name, pattern } => {
					if catalog.recipes.iter().any(|recipe| recipe.name() == name.val) {
						return Err(Error::duplicate("recipe", name));
					}
					catalog.recipes.push(Recipe::new(name.val, pattern));
				}
			}
		}

		debug!(
			dice = templates.len(),
			dice_sets = catalog.dice_sets.len(),
			recipes = catalog.recipes.len(),
			"loaded catalog"
		);
		Ok(catalog)
	}

	/// Registers every recipe and dice set of the catalog with a new simulator.
	///
	/// # Errors
	/// If the simulator rejects a recipe or dice set, its error is passed along.
	pub fn into_simulator(self) -> Result<Simulator, SimError> {
		let mut sim = Simulator::new();
		for recipe in self.recipes {
			sim.add_recipe(recipe)?;
		}
		for dice_set in self.dice_sets {
			sim.add_dice_set(dice_set)?;
		}
		Ok(sim)
	}
}

impl FromStr for Catalog {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

/// A single syntax error found while parsing a catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct SyntaxError {
	/// Description of what went wrong
	pub message: String,

	/// Byte range of the offending source
	pub span: Range<usize>,
}

impl SyntaxError {
	/// Converts a parser error into an owned syntax error.
	fn from_rich(err: &Rich<'_, char>) -> Self {
		Self {
			message: err.to_string(),
			span: err.span().start()..err.span().end(),
		}
	}
}

impl fmt::Display for SyntaxError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.message)
	}
}

/// An error resulting from loading a catalog
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The catalog text isn't valid syntax.
	///
	/// # Examples
	/// ```
	/// use recipe_odds::catalog::{Catalog, Error};
	///
	/// let result = Catalog::parse("recipe \"Too Big\" = [256]");
	/// assert!(matches!(result, Err(Error::Syntax(..))));
	/// ```
	#[error("invalid catalog syntax ({} error(s))", .0.len())]
	Syntax(Vec<SyntaxError>),

	/// A dice set refers to a die that hasn't been declared (yet).
	///
	/// # Examples
	/// ```
	/// use recipe_odds::catalog::{Catalog, Error};
	///
	/// let result = Catalog::parse("set \"Loaded\" = 4 loaded");
	/// assert!(matches!(result, Err(Error::UnknownDie { name, .. }) if name == "loaded"));
	/// ```
	#[error("unknown die: {name}")]
	UnknownDie {
		/// Identifier that couldn't be resolved
		name: String,

		/// Byte range of the identifier
		span: Range<usize>,
	},

	/// Two declarations of the same kind share a name.
	#[error("duplicate {kind} name: {name}")]
	DuplicateName {
		/// Kind of declaration (die, dice set, or recipe)
		kind: &'static str,

		/// Name that was declared twice
		name: String,

		/// Byte range of the second declaration's name
		span: Range<usize>,
	},

	/// A die declaration is invalid.
	///
	/// # Examples
	/// ```
	/// use recipe_odds::{catalog::{Catalog, Error}, dice::Error as DiceError};
	///
	/// let result = Catalog::parse("die blank = []");
	/// assert!(matches!(result, Err(Error::Die { source: DiceError::NoFaces, .. })));
	/// ```
	#[error("invalid die: {source}")]
	Die {
		/// What was wrong with the die
		#[source]
		source: DiceError,

		/// Byte range of the die's name
		span: Range<usize>,
	},
}

impl Error {
	/// Creates a duplicate name error for a declaration.
	fn duplicate(kind: &'static str, name: Spanned<String>) -> Self {
		Self::DuplicateName {
			kind,
			name: name.val,
			span: name.span,
		}
	}

	/// Every byte range in the source this error refers to, each with a message describing it.
	#[must_use]
	pub fn labels(&self) -> Vec<(Range<usize>, String)> {
		match self {
			Self::Syntax(errs) => errs
				.iter()
				.map(|err| (err.span.clone(), err.message.clone()))
				.collect(),
			Self::UnknownDie { span, .. } => vec![(span.clone(), "no die with this name is declared above".into())],
			Self::DuplicateName { kind, span, .. } => {
				vec![(span.clone(), format!("this {kind} name is already declared"))]
			}
			Self::Die { source, span } => vec![(span.clone(), source.to_string())],
		}
	}
}
