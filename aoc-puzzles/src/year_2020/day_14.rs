//! Docking Data

use crate::utils::text::{lines, parse_num, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 14, tags = ["simulation"])]
pub struct Solver;

/// Version 2 decoders refuse masks that would write more addresses than this
const MAX_FLOATING_BITS: u32 = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mask {
    ones: u64,
    floating: u64,
}

impl Mask {
    /// 36 characters of `0`, `1` and `X`, most significant first
    fn parse(text: &str) -> Result<Self, ParseError> {
        if text.len() != 36 {
            return Err(ParseError::invalid(format!("mask {text:?} is not 36 bits")));
        }
        text.bytes().try_fold(Mask::default(), |mask, b| {
            let (ones, floating) = (mask.ones << 1, mask.floating << 1);
            match b {
                b'0' => Ok(Mask { ones, floating }),
                b'1' => Ok(Mask { ones: ones | 1, floating }),
                b'X' => Ok(Mask { ones, floating: floating | 1 }),
                _ => Err(ParseError::invalid(format!("unexpected {:?} in mask", b as char))),
            }
        })
    }

    fn apply_to_value(self, value: u64) -> u64 {
        value & self.floating | self.ones
    }

    /// Every address produced by letting the floating bits take all values
    fn addresses(self, address: u64) -> impl Iterator<Item = u64> {
        let base = (address | self.ones) & !self.floating;
        let floating = self.floating;
        // walks the subsets of `floating` downwards from the full set
        let mut next = Some(floating);
        std::iter::from_fn(move || {
            let subset = next?;
            next = (subset != 0).then(|| (subset - 1) & floating);
            Some(base | subset)
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Instruction {
    SetMask(Mask),
    Write { address: u64, value: u64 },
}

impl Instruction {
    fn parse(line: &str) -> Result<Self, ParseError> {
        let (target, value) = split_once_or(line, " = ")?;
        if target == "mask" {
            return Ok(Instruction::SetMask(Mask::parse(value)?));
        }
        let address = target
            .strip_prefix("mem[")
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| ParseError::invalid(format!("unknown target in {line:?}")))?;
        Ok(Instruction::Write {
            address: parse_num(address)?,
            value: parse_num(value)?,
        })
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(Instruction::parse).collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(program: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut memory = HashMap::new();
        let mut mask = Mask::default();
        for &instruction in program.iter() {
            match instruction {
                Instruction::SetMask(m) => mask = m,
                Instruction::Write { address, value } => {
                    memory.insert(address, mask.apply_to_value(value));
                }
            }
        }
        Ok(memory.values().sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(program: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut memory = HashMap::new();
        let mut mask = Mask::default();
        for &instruction in program.iter() {
            match instruction {
                Instruction::SetMask(m) => mask = m,
                Instruction::Write { address, value } => {
                    if mask.floating.count_ones() > MAX_FLOATING_BITS {
                        return Err(SolveError::failed(format!(
                            "mask with {} floating bits",
                            mask.floating.count_ones()
                        )));
                    }
                    for target in mask.addresses(address) {
                        memory.insert(target, value);
                    }
                }
            }
        }
        Ok(memory.values().sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{solve, try_solve};

    #[test]
    fn sample() {
        let v1 = "\
mask = XXXXXXXXXXXXXXXXXXXXXXXXXXXXX1XXXX0X
mem[8] = 11
mem[7] = 101
mem[8] = 0
";
        let v2 = "\
mask = 000000000000000000000000000000X1001X
mem[42] = 100
mask = 00000000000000000000000000000000X0XX
mem[26] = 1
";
        assert_eq!(solve::<Solver>(v1, 1), "165");
        assert_eq!(solve::<Solver>(v2, 2), "208");
        assert!(try_solve::<Solver>(v1, 2).is_err());
    }

    #[test]
    fn floating_addresses() {
        let mask = Mask::parse("000000000000000000000000000000X1001X").unwrap();
        let mut found: Vec<u64> = mask.addresses(42).collect();
        found.sort_unstable();
        assert_eq!(found, vec![26, 27, 58, 59]);
    }
}
