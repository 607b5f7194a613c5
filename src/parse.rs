//! Parsers for the catalog text format, which declares dice, dice sets, and recipes.
//!
//! ```text
//! # Everything after a hash is a comment
//! die fair = [1, 2, 3, 4, 5, 6]
//! die one = special [1, 1, 1, 1, 6, 6]
//!
//! recipe "Two Matching" = [1, 1]
//! set "One Specialty Die" = 4 fair, one
//! ```

use alloc::{borrow::ToOwned, format, string::String, vec::Vec};
use core::ops::Range;

use chumsky::{prelude::*, span::Span as _};

/// Extra parser state used by every parser in this module
pub type Extra<'src> = extra::Err<Rich<'src, char>>;

/// A value along with the byte range of the source it was parsed from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Spanned<T> {
	/// Parsed value
	pub val: T,

	/// Byte range in the source
	pub span: Range<usize>,
}

/// A single top-level catalog statement
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Statement {
	/// Named die template (`die <ident> = [special] [faces]`)
	Die {
		/// Identifier that dice sets refer to the die by
		name: Spanned<String>,

		/// Faces of the die
		faces: Vec<u8>,

		/// Whether the die is a specialty die
		special: bool,
	},

	/// Named dice set built from die templates (`set "<name>" = [count] <ident>, ...`)
	Set {
		/// Name of the set
		name: Spanned<String>,

		/// Templates to instantiate, in order
		members: Vec<Member>,
	},

	/// Named recipe (`recipe "<name>" = [values]`)
	Recipe {
		/// Name of the recipe
		name: Spanned<String>,

		/// Required face values
		pattern: Vec<u8>,
	},
}

/// A reference to a die template within a dice set statement, along with how many of it to add
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Mirrors the statement syntax exactly")]
pub struct Member {
	/// How many independent dice to create from the template
	pub count: u8,

	/// Identifier of the die template
	pub die: Spanned<String>,
}

/// Generates a parser that skips any amount of whitespace and comments.
pub fn gap<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
	trivia().repeated().ignored()
}

/// Generates a parser for a statement keyword, which must be followed by at least some whitespace or a comment.
pub fn keyword<'src>(kw: &'static str) -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
	just(kw)
		.then_ignore(trivia().repeated().at_least(1))
		.ignored()
		.labelled(kw)
}

/// Generates a parser for a single `u8` number, such as a face value or a die count.
pub fn number<'src>(what: &'static str) -> impl Parser<'src, &'src str, u8, Extra<'src>> + Clone {
	text::int(10)
		.try_map(move |s: &str, span| {
			s.parse()
				.map_err(|err| Rich::custom(span, format!("{what}: {err}")))
		})
		.labelled(what)
}

/// Generates a parser for a bracketed, comma-separated list of face values, like `[1, 1, 6]`.
pub fn values<'src>() -> impl Parser<'src, &'src str, Vec<u8>, Extra<'src>> + Clone {
	number("face value")
		.padded_by(gap())
		.separated_by(just(','))
		.allow_trailing()
		.collect::<Vec<_>>()
		.padded_by(gap())
		.delimited_by(just('['), just(']'))
}

/// Generates a parser for a double-quoted name, like `"Two Matching"`.
pub fn name<'src>() -> impl Parser<'src, &'src str, Spanned<String>, Extra<'src>> + Clone {
	none_of("\"\r\n")
		.repeated()
		.collect::<String>()
		.delimited_by(just('"'), just('"'))
		.try_map(|val, span| Ok(spanned(val, span)))
		.labelled("quoted name")
}

/// Generates a parser for a die template identifier, like `fair`.
pub fn ident<'src>() -> impl Parser<'src, &'src str, Spanned<String>, Extra<'src>> + Clone {
	text::ident()
		.try_map(|val: &str, span| Ok(spanned(val.to_owned(), span)))
		.labelled("die identifier")
}

/// Generates a parser for a single catalog statement, without any surrounding whitespace.
pub fn statement<'src>() -> impl Parser<'src, &'src str, Statement, Extra<'src>> + Clone {
	let assign = just('=').padded_by(gap());

	// Die templates (e.g. die fair = [1, 2, 3, 4, 5, 6], die one = special [1, 1, 1, 1, 6, 6])
	let die = keyword("die")
		.ignore_then(ident().then_ignore(gap()))
		.then_ignore(assign.clone())
		.then(just("special").then_ignore(gap()).or_not().map(|s| s.is_some()))
		.then(values())
		.map(|((name, special), faces)| Statement::Die { name, faces, special });

	// Dice sets (e.g. set "One Specialty Die" = 4 fair, one)
	let member = number("die count")
		.then_ignore(gap())
		.or_not()
		.then(ident())
		.padded_by(gap())
		.map(|(count, die)| Member {
			count: count.unwrap_or(1),
			die,
		});
	let set = keyword("set")
		.ignore_then(name().then_ignore(gap()))
		.then_ignore(assign.clone())
		.then(member.separated_by(just(',')).at_least(1).collect::<Vec<_>>())
		.map(|(name, members)| Statement::Set { name, members });

	// Recipes (e.g. recipe "Two Matching" = [1, 1])
	let recipe = keyword("recipe")
		.ignore_then(name().then_ignore(gap()))
		.then_ignore(assign)
		.then(values())
		.map(|(name, pattern)| Statement::Recipe { name, pattern });

	choice((die, set, recipe))
}

/// Generates a parser for a whole catalog: any number of statements separated by whitespace and comments, and
/// expects end of input.
///
/// # Examples
/// ```
/// use chumsky::Parser;
/// use recipe_odds::parse::{catalog, Statement};
///
/// let statements = catalog()
/// 	.parse("die d4 = [1, 2, 3, 4] # tetrahedron\nrecipe \"Low\" = [1]")
/// 	.into_result()
/// 	.unwrap();
/// assert_eq!(statements.len(), 2);
/// assert!(matches!(&statements[0], Statement::Die { faces, special: false, .. } if faces == &[1, 2, 3, 4]));
/// assert!(matches!(&statements[1], Statement::Recipe { pattern, .. } if pattern == &[1]));
/// ```
pub fn catalog<'src>() -> impl Parser<'src, &'src str, Vec<Statement>, Extra<'src>> + Clone {
	gap()
		.ignore_then(statement().then_ignore(gap()).repeated().collect::<Vec<_>>())
		.then_ignore(end())
}

/// Pairs a value with the byte range of a parser span.
fn spanned<T>(val: T, span: SimpleSpan) -> Spanned<T> {
	Spanned {
		val,
		span: span.start()..span.end(),
	}
}

/// Generates a parser for a single run of whitespace or a single comment.
fn trivia<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
	let comment = just('#').then(none_of("\r\n").repeated()).ignored();
	choice((text::whitespace().at_least(1), comment))
}
