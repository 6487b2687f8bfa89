//! Allergen Assessment

use crate::utils::text::lines;
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{BTreeMap, BTreeSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 21, tags = ["search"])]
pub struct Solver;

pub struct Food<'a> {
    ingredients: BTreeSet<&'a str>,
    allergens: Vec<&'a str>,
}

/// `mxmxvkd kfcds sqjhc nhms (contains dairy, fish)`
fn food(line: &str) -> Result<Food<'_>, ParseError> {
    let (ingredients, allergens) = match line.split_once(" (contains ") {
        Some((ingredients, rest)) => {
            let list = rest
                .strip_suffix(')')
                .ok_or_else(|| ParseError::invalid(format!("unclosed allergen list in {line:?}")))?;
            (ingredients, list.split(", ").collect())
        }
        None => (line, Vec::new()),
    };
    Ok(Food {
        ingredients: ingredients.split_whitespace().collect(),
        allergens,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Food<'a>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(food).collect()
    }
}

/// For each allergen, the ingredients present in every food listing it
fn suspects<'a>(foods: &[Food<'a>]) -> BTreeMap<&'a str, BTreeSet<&'a str>> {
    let mut candidates: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for food in foods {
        for &allergen in &food.allergens {
            candidates
                .entry(allergen)
                .and_modify(|set| set.retain(|i| food.ingredients.contains(i)))
                .or_insert_with(|| food.ingredients.clone());
        }
    }
    candidates
}

impl PartSolver<1> for Solver {
    fn solve(foods: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let risky: BTreeSet<&str> = suspects(foods).into_values().flatten().collect();
        let safe = foods
            .iter()
            .flat_map(|f| &f.ingredients)
            .filter(|i| !risky.contains(*i))
            .count();
        Ok(safe.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Canonical dangerous list: ingredients ordered by their allergen
    fn solve(foods: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut open = suspects(foods);
        let mut known: BTreeMap<&str, &str> = BTreeMap::new();
        while !open.is_empty() {
            let (&allergen, ingredient) = open
                .iter()
                .find_map(|(a, set)| match set.iter().collect::<Vec<_>>().as_slice() {
                    [only] => Some((a, **only)),
                    _ => None,
                })
                .ok_or_else(|| SolveError::failed("allergens cannot be pinned to ingredients"))?;
            open.remove(allergen);
            for set in open.values_mut() {
                set.remove(ingredient);
            }
            known.insert(allergen, ingredient);
        }
        Ok(known.into_values().collect::<Vec<_>>().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "\
mxmxvkd kfcds sqjhc nhms (contains dairy, fish)
trh fvjkl sbzzf mxmxvkd (contains dairy)
sqjhc fvjkl (contains soy)
sqjhc mxmxvkd sbzzf (contains fish)
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "5");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "mxmxvkd,sqjhc,fvjkl");
    }

    #[test]
    fn unclosed_list() {
        assert!(Solver::parse("a b (contains dairy\n").is_err());
    }
}
