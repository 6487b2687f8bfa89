//! Operation Order

use crate::utils::text::lines;
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::iter::Peekable;
use std::str::Bytes;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 18, tags = ["parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Mul,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Number(u64),
    Group(Box<Chain>),
}

/// `first (op operand)*`, with no precedence applied yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    first: Operand,
    rest: Vec<(Op, Operand)>,
}

struct ChainParser<'a> {
    line: &'a str,
    bytes: Peekable<Bytes<'a>>,
}

impl<'a> ChainParser<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            line,
            bytes: line.bytes().peekable(),
        }
    }

    fn error(&self, what: &str) -> ParseError {
        ParseError::invalid(format!("{what} in {:?}", self.line))
    }

    fn skip_spaces(&mut self) {
        while self.bytes.next_if_eq(&b' ').is_some() {}
    }

    fn chain(&mut self) -> Result<Chain, ParseError> {
        let first = self.operand()?;
        let mut rest = Vec::new();
        loop {
            self.skip_spaces();
            let op = match self.bytes.peek() {
                Some(b'+') => Op::Add,
                Some(b'*') => Op::Mul,
                _ => break,
            };
            self.bytes.next();
            rest.push((op, self.operand()?));
        }
        Ok(Chain { first, rest })
    }

    fn operand(&mut self) -> Result<Operand, ParseError> {
        self.skip_spaces();
        match self.bytes.next() {
            Some(b'(') => {
                let inner = self.chain()?;
                self.skip_spaces();
                match self.bytes.next() {
                    Some(b')') => Ok(Operand::Group(Box::new(inner))),
                    _ => Err(self.error("unclosed parenthesis")),
                }
            }
            Some(b @ b'0'..=b'9') => {
                let mut value = u64::from(b - b'0');
                while let Some(d) = self.bytes.next_if(u8::is_ascii_digit) {
                    value = value * 10 + u64::from(d - b'0');
                }
                Ok(Operand::Number(value))
            }
            Some(other) => Err(self.error(&format!("unexpected {:?}", other as char))),
            None => Err(self.error("missing operand")),
        }
    }

    fn finish(mut self) -> Result<Chain, ParseError> {
        let chain = self.chain()?;
        match self.bytes.next() {
            None => Ok(chain),
            Some(_) => Err(self.error("trailing text")),
        }
    }
}

/// Evaluation order
#[derive(Clone, Copy)]
enum Precedence {
    LeftToRight,
    AdditionFirst,
}

impl Operand {
    fn eval(&self, precedence: Precedence) -> u64 {
        match self {
            Operand::Number(n) => *n,
            Operand::Group(chain) => chain.eval(precedence),
        }
    }
}

impl Chain {
    fn eval(&self, precedence: Precedence) -> u64 {
        let first = self.first.eval(precedence);
        match precedence {
            Precedence::LeftToRight => self.rest.iter().fold(first, |acc, (op, x)| match op {
                Op::Add => acc + x.eval(precedence),
                Op::Mul => acc * x.eval(precedence),
            }),
            Precedence::AdditionFirst => {
                // sums of the runs between multiplications
                let mut product = 1;
                let mut sum = first;
                for (op, x) in &self.rest {
                    match op {
                        Op::Add => sum += x.eval(precedence),
                        Op::Mul => {
                            product *= sum;
                            sum = x.eval(precedence);
                        }
                    }
                }
                product * sum
            }
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Chain>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(|line| ChainParser::new(line).finish()).collect()
    }
}

fn total(homework: &[Chain], precedence: Precedence) -> String {
    homework
        .iter()
        .map(|c| c.eval(precedence))
        .sum::<u64>()
        .to_string()
}

impl PartSolver<1> for Solver {
    fn solve(homework: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total(homework, Precedence::LeftToRight))
    }
}

impl PartSolver<2> for Solver {
    fn solve(homework: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total(homework, Precedence::AdditionFirst))
    }
}
