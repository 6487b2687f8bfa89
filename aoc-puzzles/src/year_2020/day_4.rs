//! Passport Processing

use crate::utils::text::{paragraphs, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 4, tags = ["parsing"])]
pub struct Solver;

/// `cid` is optional
const REQUIRED: [&str; 7] = ["byr", "iyr", "eyr", "hgt", "hcl", "ecl", "pid"];

type Passport<'a> = HashMap<&'a str, &'a str>;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Passport<'a>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        paragraphs(input)
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .flat_map(str::split_whitespace)
                    .map(|field| split_once_or(field, ":"))
                    .collect::<Result<Passport, _>>()
            })
            .collect()
    }
}

fn has_required(passport: &Passport) -> bool {
    REQUIRED.iter().all(|key| passport.contains_key(key))
}

fn year_in(value: &str, low: u32, high: u32) -> bool {
    value.len() == 4 && value.parse().is_ok_and(|y: u32| (low..=high).contains(&y))
}

fn field_is_valid(key: &str, value: &str) -> bool {
    match key {
        "byr" => year_in(value, 1920, 2002),
        "iyr" => year_in(value, 2010, 2020),
        "eyr" => year_in(value, 2020, 2030),
        "hgt" => {
            let (number, range) = if let Some(cm) = value.strip_suffix("cm") {
                (cm, 150..=193)
            } else if let Some(inches) = value.strip_suffix("in") {
                (inches, 59..=76)
            } else {
                return false;
            };
            number.parse().is_ok_and(|h: u32| range.contains(&h))
        }
        "hcl" => value.strip_prefix('#').is_some_and(|hex| {
            hex.len() == 6 && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        }),
        "ecl" => matches!(value, "amb" | "blu" | "brn" | "gry" | "grn" | "hzl" | "oth"),
        "pid" => value.len() == 9 && value.bytes().all(|b| b.is_ascii_digit()),
        _ => true,
    }
}

impl PartSolver<1> for Solver {
    fn solve(passports: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(passports.iter().filter(|p| has_required(p)).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(passports: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let valid = passports
            .iter()
            .filter(|p| has_required(p) && p.iter().all(|(k, v)| field_is_valid(k, v)))
            .count();
        Ok(valid.to_string())
    }
}
