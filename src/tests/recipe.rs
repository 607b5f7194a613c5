use crate::{
	dice::{roller::Iter as IterRoller, DiceSet, Die, DieId},
	recipe::{Recipe, Substitution},
};

/// Builds a set of fair dice followed by specialty dice, rolled to the given values in declared order.
fn rolled_set(fair: u8, special: &[[u8; 6]], vals: &[u8]) -> DiceSet {
	let mut builder = DiceSet::builder("Test Set").dice(fair, &Die::fair(6).unwrap());
	for faces in special {
		builder = builder.die(Die::special(*faces).unwrap());
	}

	let mut set = builder.build();
	set.roll(&mut IterRoller::new(vals.iter().copied()));
	set
}

fn indices(ids: &[DieId]) -> Vec<usize> {
	ids.iter().map(|id| id.index()).collect()
}

#[test]
fn direct_match_consumes_value() {
	let recipe = Recipe::new("One Unique", [3]);
	let matched = recipe.match_roll(vec![1, 3, 3]);
	assert!(matched.is_satisfied());
	assert_eq!(matched.direct, vec![3]);
	assert!(matched.substitutions.is_empty());
	assert_eq!(matched.leftover, vec![1, 3]);
}

#[test]
fn every_present_value_matches() {
	for val in 1..=6 {
		let recipe = Recipe::new("One Unique", [val]);
		for other in 1..=6 {
			assert!(recipe.check_roll(vec![val, other]));
			assert!(recipe.check_roll(vec![other, val]));
		}
	}
}

#[test]
fn pair_substitutes_for_missing_value() {
	let recipe = Recipe::new("One Unique", [2]);
	let matched = recipe.match_roll(vec![1, 1]);
	assert!(matched.is_satisfied());
	assert_eq!(matched.substitutions, vec![Substitution { symbol: 2, pair: 1 }]);
	assert!(matched.leftover.is_empty());
}

#[test]
fn no_pair_and_no_value_fails() {
	let recipe = Recipe::new("One Unique", [2]);
	for roll in [vec![1], vec![1, 3], vec![1, 3, 4], vec![3, 4, 5, 6, 1]] {
		let matched = recipe.match_roll(roll.clone());
		assert!(!matched.is_satisfied(), "{roll:?} should not satisfy [2]");
		assert_eq!(matched.unmatched, vec![2]);
	}
}

#[test]
fn direct_matches_are_claimed_before_pairs() {
	let recipe = Recipe::new("Two Unique", [1, 2]);
	let matched = recipe.match_roll(vec![1, 1, 2]);
	assert_eq!(matched.direct, vec![1, 2]);
	assert!(matched.substitutions.is_empty());
	assert_eq!(matched.leftover, vec![1]);
}

#[test]
fn pairs_are_claimed_lowest_first_in_pattern_order() {
	let recipe = Recipe::new("Two Unique", [5, 6]);
	let matched = recipe.match_roll(vec![4, 4, 2, 2, 3, 3]);
	assert!(matched.is_satisfied());
	assert_eq!(
		matched.substitutions,
		vec![Substitution { symbol: 5, pair: 2 }, Substitution { symbol: 6, pair: 3 }]
	);
	assert_eq!(matched.leftover, vec![4, 4]);
}

#[test]
fn duplicate_requirements_each_claim_a_pair() {
	let recipe = Recipe::new("Two Matching", [5, 5]);
	let matched = recipe.match_roll(vec![1, 1, 2, 2]);
	assert!(matched.is_satisfied());
	assert_eq!(
		matched.substitutions,
		vec![Substitution { symbol: 5, pair: 1 }, Substitution { symbol: 5, pair: 2 }]
	);

	// Only one pair available for two missing values
	let matched = recipe.match_roll(vec![1, 1, 2, 3]);
	assert!(!matched.is_satisfied());
	assert_eq!(matched.unmatched, vec![5]);
	assert_eq!(matched.leftover, vec![2, 3]);
}

#[test]
fn pair_substitution_mixed_with_direct_matches() {
	let recipe = Recipe::new("Two Matching One Unique", [1, 1, 2]);
	let matched = recipe.match_roll(vec![1, 2, 4, 4, 6]);
	assert!(matched.is_satisfied());
	assert_eq!(matched.direct, vec![1, 2]);
	assert_eq!(matched.substitutions, vec![Substitution { symbol: 1, pair: 4 }]);
	assert_eq!(matched.leftover, vec![6]);
}

#[test]
fn four_of_a_kind_needs_four_dice_or_eight() {
	let recipe = Recipe::new("Four Matching", [1, 1, 1, 1]);
	assert!(recipe.check_roll(vec![1, 1, 1, 1]));
	assert!(!recipe.check_roll(vec![1, 1, 3, 3]));
	assert!(!recipe.check_roll(vec![2, 2, 3, 3]));
	assert!(!recipe.check_roll(vec![1, 1, 3, 3, 5]));
	assert!(recipe.check_roll(vec![1, 1, 3, 3, 5, 5]));
	assert!(recipe.check_roll(vec![2, 2, 3, 3, 4, 4, 5, 5]));
}

#[test]
fn unsorted_rolls_are_sorted_first() {
	let recipe = Recipe::new("One Unique", [9]);
	let matched = recipe.match_roll(vec![3, 1, 3, 1]);
	assert_eq!(matched.substitutions, vec![Substitution { symbol: 9, pair: 1 }]);
	assert_eq!(matched.leftover, vec![3, 3]);
}

#[test]
fn empty_pattern_always_matches() {
	let recipe = Recipe::new("Nothing", Vec::<u8>::new());
	assert!(recipe.check_roll(Vec::new()));
	assert!(recipe.check_roll(vec![1, 2, 3]));
}

#[test]
fn empty_roll_never_matches() {
	let recipe = Recipe::new("One Unique", [1]);
	assert!(!recipe.check_roll(Vec::new()));
}

#[test]
fn holds_lone_match() {
	let set = rolled_set(4, &[], &[3, 1, 5, 6]);
	let recipe = Recipe::new("One Unique", [1]);
	assert_eq!(indices(&recipe.holds(&set)), vec![1]);
}

#[test]
fn holds_nothing_without_matches() {
	let set = rolled_set(4, &[], &[3, 2, 5, 6]);
	let recipe = Recipe::new("One Unique", [1]);
	assert!(recipe.holds(&set).is_empty());
}

#[test]
fn holds_first_of_tied_regular_dice() {
	let set = rolled_set(4, &[], &[5, 2, 2, 2]);
	let recipe = Recipe::new("One Unique", [2]);

	for _ in 0..10 {
		assert_eq!(indices(&recipe.holds(&set)), vec![1]);
	}
}

#[test]
fn holds_special_die_over_regular_dice() {
	let set = rolled_set(4, &[[1, 1, 1, 1, 6, 6]], &[1, 4, 1, 3, 1]);
	let recipe = Recipe::new("One Unique", [1]);
	assert_eq!(indices(&recipe.holds(&set)), vec![4]);
}

#[test]
fn holds_first_special_die_among_several() {
	let set = rolled_set(2, &[[6, 6, 6, 6, 1, 1], [6, 6, 6, 6, 2, 2]], &[6, 2, 6, 6]);
	let recipe = Recipe::new("One Unique", [6]);
	assert_eq!(indices(&recipe.holds(&set)), vec![2]);
}

#[test]
fn never_holds_a_die_twice() {
	let set = rolled_set(3, &[], &[1, 4, 1]);
	let recipe = Recipe::new("Three Matching", [1, 1, 1]);
	assert_eq!(indices(&recipe.holds(&set)), vec![0, 2]);
}

#[test]
fn holds_follow_pattern_order() {
	let set = rolled_set(3, &[[1, 1, 1, 1, 6, 6]], &[2, 1, 5, 1]);
	let recipe = Recipe::new("Two Matching One Unique", [2, 1, 1]);
	assert_eq!(indices(&recipe.holds(&set)), vec![0, 3, 1]);
}

#[test]
fn reroll_keeps_held_dice_and_rerolls_the_rest() {
	let mut set = rolled_set(2, &[[1, 1, 1, 1, 6, 6]], &[1, 3, 1]);
	let recipe = Recipe::new("Two Unique", [1, 2]);
	assert!(!recipe.check_roll(set.current_roll().unwrap()));

	let mut roller = IterRoller::new([2, 5]);
	assert!(recipe.reroll(&mut set, &mut roller));
	assert!(!roller.can_roll());

	// The specialty die kept its 1, both fair dice were rerolled
	assert_eq!(set.dice()[2].current(), Some(1));
	assert_eq!(set.dice()[0].current(), Some(2));
	assert_eq!(set.dice()[1].current(), Some(5));
}

#[test]
fn reroll_can_fail() {
	let mut set = rolled_set(3, &[], &[1, 4, 5]);
	let recipe = Recipe::new("Two Matching", [1, 1]);
	assert!(!recipe.reroll(&mut set, &mut IterRoller::new([3, 6])));
	assert_eq!(set.current_roll(), Some(vec![1, 3, 6]));
}

#[test]
fn reroll_can_succeed_with_a_pair() {
	let mut set = rolled_set(3, &[], &[1, 4, 5]);
	let recipe = Recipe::new("Two Unique", [1, 2]);
	assert!(recipe.reroll(&mut set, &mut IterRoller::new([3, 3])));
}

#[test]
fn display() {
	let recipe = Recipe::new("Two Matching One Unique", [1, 1, 2]);
	assert_eq!(recipe.to_string(), "Two Matching One Unique [1, 1, 2]");
	assert_eq!(recipe.name(), "Two Matching One Unique");
	assert_eq!(recipe.pattern(), &[1, 1, 2]);
}
