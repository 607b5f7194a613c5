#![feature(test)]

extern crate test;

use chumsky::Parser;
use recipe_odds::{dice::roller::FastRand, Catalog};
use test::Bencher;

const UNICORN_CLINIC: &str = include_str!("../catalogs/unicorn-clinic.dice");

#[bench]
fn parse_statement(b: &mut Bencher) {
	let parser = recipe_odds::parse::statement();
	b.iter(|| parser.parse("set \"One Two Specialty Dice\" = 4 fair, one, two").unwrap());
}

#[bench]
fn parse_builtin(b: &mut Bencher) {
	let parser = recipe_odds::parse::catalog();
	b.iter(|| parser.parse(UNICORN_CLINIC).unwrap());
}

#[bench]
fn load_builtin(b: &mut Bencher) {
	b.iter(|| Catalog::parse(UNICORN_CLINIC).unwrap());
}

#[bench]
fn parser_creation(b: &mut Bencher) {
	b.iter(recipe_odds::parse::catalog);
}

#[bench]
fn simulate_builtin_100_cycles(b: &mut Bencher) {
	let mut sim = Catalog::parse(UNICORN_CLINIC).unwrap().into_simulator().unwrap();
	let mut rng = FastRand::default();
	b.iter(|| sim.simulate(100, &mut rng).unwrap().to_csv());
}
