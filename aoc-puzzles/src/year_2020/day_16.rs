//! Ticket Translation

use crate::utils::text::{numbers, paragraphs, parse_num, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 16, tags = ["parsing", "search"])]
pub struct Solver;

pub struct Field<'a> {
    name: &'a str,
    ranges: [RangeInclusive<u64>; 2],
}

impl<'a> Field<'a> {
    /// `departure location: 49-258 or 268-960`
    fn parse(line: &'a str) -> Result<Self, ParseError> {
        let (name, ranges) = split_once_or(line, ": ")?;
        let (first, second) = split_once_or(ranges, " or ")?;
        let range = |text: &str| -> Result<RangeInclusive<u64>, ParseError> {
            let (lo, hi) = split_once_or(text, "-")?;
            Ok(parse_num(lo)?..=parse_num(hi)?)
        };
        Ok(Self {
            name,
            ranges: [range(first)?, range(second)?],
        })
    }

    fn accepts(&self, value: u64) -> bool {
        self.ranges.iter().any(|r| r.contains(&value))
    }
}

pub struct Notes<'a> {
    fields: Vec<Field<'a>>,
    mine: Vec<u64>,
    nearby: Vec<Vec<u64>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Notes<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let sections = paragraphs(input);
        let [rules, mine, nearby] = sections.as_slice() else {
            return Err(ParseError::invalid(format!(
                "expected 3 sections, found {}",
                sections.len()
            )));
        };
        if mine.first() != Some(&"your ticket:") || nearby.first() != Some(&"nearby tickets:") {
            return Err(ParseError::invalid("missing ticket headers"));
        }

        let fields = rules.iter().map(|&line| Field::parse(line)).collect::<Result<Vec<_>, _>>()?;
        let ticket = |line: &&str| -> Result<Vec<u64>, ParseError> {
            let values = numbers(line)?;
            if values.len() != fields.len() {
                return Err(ParseError::invalid(format!(
                    "ticket {line:?} has {} values for {} fields",
                    values.len(),
                    fields.len()
                )));
            }
            Ok(values)
        };

        let mine = ticket(mine.get(1).ok_or_else(|| ParseError::missing("your ticket"))?)?;
        let nearby = nearby[1..].iter().map(ticket).collect::<Result<_, _>>()?;
        Ok(Notes {
            fields,
            mine,
            nearby,
        })
    }
}

impl Notes<'_> {
    fn fits_some_field(&self, value: u64) -> bool {
        self.fields.iter().any(|f| f.accepts(value))
    }

    /// Field index for each ticket position, by elimination
    fn resolve(&self) -> Result<Vec<usize>, SolveError> {
        let valid: Vec<&Vec<u64>> = self
            .nearby
            .iter()
            .filter(|t| t.iter().all(|&v| self.fits_some_field(v)))
            .collect();

        // candidates[pos] has bit f set while field f could sit at pos
        let mut candidates: Vec<u64> = (0..self.fields.len())
            .map(|pos| {
                self.fields
                    .iter()
                    .enumerate()
                    .filter(|(_, field)| valid.iter().all(|t| field.accepts(t[pos])))
                    .fold(0, |set, (f, _)| set | 1 << f)
            })
            .collect();

        let mut assigned = vec![usize::MAX; self.fields.len()];
        for _ in 0..self.fields.len() {
            let (pos, field) = candidates
                .iter()
                .enumerate()
                .find(|&(pos, set)| set.count_ones() == 1 && assigned[pos] == usize::MAX)
                .map(|(pos, set)| (pos, set.trailing_zeros() as usize))
                .ok_or_else(|| SolveError::failed("field positions are ambiguous"))?;
            assigned[pos] = field;
            for set in &mut candidates {
                *set &= !(1 << field);
            }
        }
        Ok(assigned)
    }
}

impl PartSolver<1> for Solver {
    fn solve(notes: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let error_rate: u64 = notes
            .nearby
            .iter()
            .flatten()
            .filter(|&&v| !notes.fits_some_field(v))
            .sum();
        Ok(error_rate.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(notes: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if notes.fields.len() > 64 {
            return Err(SolveError::failed("more than 64 fields"));
        }
        let assigned = notes.resolve()?;
        let departures: Vec<u64> = assigned
            .iter()
            .zip(&notes.mine)
            .filter(|&(&f, _)| notes.fields[f].name.starts_with("departure"))
            .map(|(_, &v)| v)
            .collect();
        if departures.is_empty() {
            return Err(SolveError::failed("no departure fields"));
        }
        Ok(departures.iter().product::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{solve, try_solve};

    #[test]
    fn sample() {
        let input = "\
class: 1-3 or 5-7
row: 6-11 or 33-44
seat: 13-40 or 45-50

your ticket:
7,1,14

nearby tickets:
7,3,47
40,4,50
55,2,20
38,6,12
";
        assert_eq!(solve::<Solver>(input, 1), "71");
        assert!(try_solve::<Solver>(input, 2).is_err());
    }

    #[test]
    fn fields_are_resolved_by_elimination() {
        let input = "\
class: 0-1 or 4-19
departure row: 0-5 or 8-19
departure seat: 0-13 or 16-19

your ticket:
11,12,13

nearby tickets:
3,9,18
15,1,5
5,14,9
";
        let notes = Solver::parse(input).unwrap();
        let names: Vec<&str> = notes
            .resolve()
            .unwrap()
            .into_iter()
            .map(|f| notes.fields[f].name)
            .collect();
        assert_eq!(names, vec!["departure row", "class", "departure seat"]);
        assert_eq!(solve::<Solver>(input, 2), (11 * 13).to_string());
    }

    #[test]
    fn short_ticket_is_rejected() {
        let input = "a: 1-2 or 3-4\nb: 1-2 or 3-4\n\nyour ticket:\n1\n\nnearby tickets:\n1,2\n";
        assert!(Solver::parse(input).is_err());
    }
}
