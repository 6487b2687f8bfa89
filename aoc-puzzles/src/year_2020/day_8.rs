//! Handheld Halting

use crate::utils::text::{lines, parse_num, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 8, tags = ["simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Acc(i64),
    Jmp(i64),
    Nop(i64),
}

impl Op {
    fn parse(line: &str) -> Result<Self, ParseError> {
        let (name, arg) = split_once_or(line, " ")?;
        let arg = parse_num(arg)?;
        match name {
            "acc" => Ok(Op::Acc(arg)),
            "jmp" => Ok(Op::Jmp(arg)),
            "nop" => Ok(Op::Nop(arg)),
            _ => Err(ParseError::invalid(format!("unknown instruction {line:?}"))),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Exit {
    /// Ran off the end of the program
    Terminated(i64),
    /// About to execute an instruction a second time
    Looped(i64),
}

fn run(program: &[Op]) -> Exit {
    let mut visited = vec![false; program.len()];
    let mut acc = 0;
    let mut pc: i64 = 0;
    loop {
        let Some(i) = usize::try_from(pc).ok().filter(|&i| i < program.len()) else {
            return Exit::Terminated(acc);
        };
        if std::mem::replace(&mut visited[i], true) {
            return Exit::Looped(acc);
        }
        match program[i] {
            Op::Acc(n) => {
                acc += n;
                pc += 1;
            }
            Op::Jmp(n) => pc += n,
            Op::Nop(_) => pc += 1,
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Op>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(Op::parse).collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(program: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        match run(program) {
            Exit::Looped(acc) => Ok(acc.to_string()),
            Exit::Terminated(_) => Err(SolveError::failed("program terminates without looping")),
        }
    }
}

impl PartSolver<2> for Solver {
    /// Swap one `jmp`/`nop` at a time until the program runs off the end
    fn solve(program: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        for i in 0..program.len() {
            let original = program[i];
            program[i] = match original {
                Op::Jmp(n) => Op::Nop(n),
                Op::Nop(n) => Op::Jmp(n),
                Op::Acc(_) => continue,
            };
            let exit = run(program);
            program[i] = original;

            if let Exit::Terminated(acc) = exit {
                return Ok(acc.to_string());
            }
        }
        Err(SolveError::failed("no single swap makes the program terminate"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "\
nop +0
acc +1
jmp +4
acc +3
jmp -3
acc -99
acc +1
jmp -4
acc +6
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "5");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "8");
    }

    #[test]
    fn jump_below_zero_terminates() {
        assert_eq!(run(&[Op::Acc(3), Op::Jmp(-5)]), Exit::Terminated(3));
    }

    #[test]
    fn unknown_op() {
        assert!(Solver::parse("mul +2\n").is_err());
    }
}
