//! Behaviour of the `AocSolver` derive through the public traits

use aoc_core::{
    AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver, SolverRegistryBuilder,
};
use proptest::prelude::*;

fn numbers(input: &str) -> Result<Vec<i64>, ParseError> {
    input
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| l.parse().map_err(|_| ParseError::invalid(format!("bad int {l:?}"))))
        .collect()
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct SumProduct;

impl AocParser for SumProduct {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        numbers(input)
    }
}

impl PartSolver<1> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

/// Part 2 reuses what part 1 stored, but can also run on its own
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Memoizing;

struct MemoData {
    numbers: Vec<i64>,
    sorted: Option<Vec<i64>>,
}

impl MemoData {
    fn sorted(&mut self) -> &[i64] {
        self.sorted.get_or_insert_with(|| {
            let mut sorted = self.numbers.clone();
            sorted.sort_unstable();
            sorted
        })
    }
}

impl AocParser for Memoizing {
    type SharedData<'a> = MemoData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(MemoData {
            numbers: numbers(input)?,
            sorted: None,
        })
    }
}

impl PartSolver<1> for Memoizing {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .sorted()
            .first()
            .map(i64::to_string)
            .ok_or_else(|| SolveError::failed("empty input"))
    }
}

impl PartSolver<2> for Memoizing {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .sorted()
            .last()
            .map(i64::to_string)
            .ok_or_else(|| SolveError::failed("empty input"))
    }
}

/// Borrows lines straight from the input
#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
struct Longest;

impl AocParser for Longest {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input.lines().collect())
    }
}

impl PartSolver<1> for Longest {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .max_by_key(|l| l.len())
            .map(|l| l.to_string())
            .unwrap_or_default())
    }
}

fn to_input(numbers: &[i64]) -> String {
    numbers.iter().map(i64::to_string).collect::<Vec<_>>().join("\n")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn solve_part_dispatches_to_part_solver(
        numbers in prop::collection::vec(1i64..10, 1..6),
        part in 1u8..=2
    ) {
        let input = to_input(&numbers);
        let mut via_solver = SumProduct::parse(&input).unwrap();
        let mut direct = SumProduct::parse(&input).unwrap();

        let dispatched = SumProduct::solve_part(&mut via_solver, part).unwrap();
        let expected = match part {
            1 => <SumProduct as PartSolver<1>>::solve(&mut direct),
            _ => <SumProduct as PartSolver<2>>::solve(&mut direct),
        }
        .unwrap();

        prop_assert_eq!(dispatched, expected);
    }

    #[test]
    fn unknown_parts_are_not_implemented(part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = SumProduct::parse("1\n2").unwrap();
        match SumProduct::solve_part(&mut shared, part) {
            Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "Expected PartNotImplemented, got {:?}", other),
        }
    }

    #[test]
    fn parts_agree_with_or_without_memo(numbers in prop::collection::vec(-50i64..50, 1..10)) {
        let input = to_input(&numbers);
        let expected_max = numbers.iter().max().unwrap().to_string();

        let mut shared = Memoizing::parse(&input).unwrap();
        Memoizing::solve_part(&mut shared, 1).unwrap();
        prop_assert!(shared.sorted.is_some());
        let after_part_one = Memoizing::solve_part(&mut shared, 2).unwrap();

        let mut fresh = Memoizing::parse(&input).unwrap();
        let alone = Memoizing::solve_part(&mut fresh, 2).unwrap();

        prop_assert_eq!(&after_part_one, &expected_max);
        prop_assert_eq!(alone, expected_max);
    }
}

#[test]
fn parts_constant_follows_attribute() {
    assert_eq!(<SumProduct as Solver>::PARTS, 2);
    assert_eq!(<Longest as Solver>::PARTS, 1);
}

#[test]
fn borrowed_shared_data_works_through_registry() {
    let registry = SolverRegistryBuilder::new()
        .register::<Longest>(2020, 3)
        .unwrap()
        .build();

    let input = String::from("ab\nabcd\nabc");
    let mut solver = registry.create_solver(2020, 3, &input).unwrap();
    assert_eq!(solver.parts(), 1);
    assert_eq!(solver.solve(1).unwrap().answer, "abcd");
    assert!(solver.parse_duration() >= chrono::TimeDelta::zero());
}

#[test]
fn solve_failures_surface_through_dyn_solver() {
    let registry = SolverRegistryBuilder::new()
        .register::<Memoizing>(2020, 4)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2020, 4, "").unwrap();
    assert!(matches!(solver.solve(1), Err(SolveError::SolveFailed(_))));
}
