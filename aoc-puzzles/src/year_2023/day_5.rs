//! If You Give A Seed A Fertilizer

use crate::utils::text::{numbers, paragraphs};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::ops::Range;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 5, tags = ["ranges"])]
pub struct Solver;

/// Shifts `source` by `offset`
#[derive(Debug, Clone)]
pub struct Shift {
    source: Range<i64>,
    offset: i64,
}

/// One `x-to-y map:` block, sorted by source start
pub type Map = Vec<Shift>;

pub struct Almanac {
    seeds: Vec<i64>,
    maps: Vec<Map>,
}

/// `dest src len`
fn shift(line: &str) -> Result<Shift, ParseError> {
    match numbers::<i64>(line)?[..] {
        [dest, src, len] if len >= 0 => Ok(Shift {
            source: src..src + len,
            offset: dest - src,
        }),
        _ => Err(ParseError::invalid(format!("bad map line {line:?}"))),
    }
}

fn map(block: &[&str]) -> Result<Map, ParseError> {
    let mut shifts = block
        .get(1..)
        .unwrap_or_default()
        .iter()
        .map(|line| shift(line))
        .collect::<Result<Vec<_>, _>>()?;
    shifts.sort_by_key(|s| s.source.start);
    Ok(shifts)
}

impl AocParser for Solver {
    type SharedData<'a> = Almanac;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let blocks = paragraphs(input);
        let (first, rest) = blocks
            .split_first()
            .ok_or_else(|| ParseError::missing("seed list"))?;
        let seeds = first
            .first()
            .and_then(|line| line.strip_prefix("seeds:"))
            .ok_or_else(|| ParseError::invalid("expected \"seeds:\" first"))?;
        Ok(Almanac {
            seeds: numbers(seeds)?,
            maps: rest.iter().map(|b| map(b)).collect::<Result<_, _>>()?,
        })
    }
}

/// Images of `ranges` under `map`; values outside every shift map to
/// themselves
fn apply(map: &Map, ranges: Vec<Range<i64>>) -> Vec<Range<i64>> {
    let mut out = Vec::new();
    for range in ranges {
        let mut cursor = range.start;
        for shift in map {
            if cursor >= range.end {
                break;
            }
            let lo = cursor.max(shift.source.start);
            let hi = range.end.min(shift.source.end);
            if lo >= hi {
                continue;
            }
            if cursor < lo {
                out.push(cursor..lo);
            }
            out.push(lo + shift.offset..hi + shift.offset);
            cursor = hi;
        }
        if cursor < range.end {
            out.push(cursor..range.end);
        }
    }
    out
}

fn lowest_location(almanac: &Almanac, seeds: Vec<Range<i64>>) -> Result<String, SolveError> {
    almanac
        .maps
        .iter()
        .fold(seeds, |ranges, map| apply(map, ranges))
        .iter()
        .map(|r| r.start)
        .min()
        .map(|n| n.to_string())
        .ok_or_else(|| SolveError::failed("no seeds"))
}

impl PartSolver<1> for Solver {
    fn solve(almanac: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let seeds = almanac.seeds.iter().map(|&s| s..s + 1).collect();
        lowest_location(almanac, seeds)
    }
}

impl PartSolver<2> for Solver {
    /// Seeds come in `start length` pairs
    fn solve(almanac: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if almanac.seeds.len() % 2 != 0 {
            return Err(SolveError::failed("seed ranges need an even count"));
        }
        let seeds = almanac
            .seeds
            .chunks_exact(2)
            .map(|pair| pair[0]..pair[0] + pair[1])
            .filter(|r| !r.is_empty())
            .collect();
        lowest_location(almanac, seeds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{solve, try_solve};

    const SAMPLE: &str = "\
seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "35");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "46");
    }

    #[test]
    fn range_split_across_shifts() {
        let map = vec![
            Shift { source: 5..10, offset: 100 },
            Shift { source: 12..15, offset: -12 },
        ];
        let mut out = apply(&map, vec![0..20]);
        out.sort_by_key(|r| r.start);
        assert_eq!(out, vec![0..5, 0..3, 10..12, 15..20, 105..110]);
    }

    #[test]
    fn odd_seed_count() {
        assert!(try_solve::<Solver>("seeds: 1 2 3\n", 2).is_err());
        assert_eq!(solve::<Solver>("seeds: 1 2 3\n", 1), "1");
    }
}
