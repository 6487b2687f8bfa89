//! Monster Messages

use crate::utils::text::{paragraphs, parse_num, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 19, tags = ["parsing", "search"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Literal(u8),
    /// Alternatives, each a sequence of rule ids
    Any(Vec<Vec<usize>>),
}

impl Rule {
    fn parse(text: &str) -> Result<Self, ParseError> {
        if let Some(quoted) = text.strip_prefix('"') {
            return match quoted.strip_suffix('"').map(str::as_bytes) {
                Some(&[c]) => Ok(Rule::Literal(c)),
                _ => Err(ParseError::invalid(format!("bad literal rule {text:?}"))),
            };
        }
        text.split('|')
            .map(|alt| alt.split_whitespace().map(parse_num).collect::<Result<Vec<usize>, _>>())
            .collect::<Result<Vec<_>, _>>()
            .map(Rule::Any)
    }
}

/// `1: 2 3 | 3 2`
fn numbered_rule(line: &str) -> Result<(usize, Rule), ParseError> {
    let (id, rule) = split_once_or(line, ": ")?;
    Ok((parse_num(id)?, Rule::parse(rule)?))
}

pub struct Puzzle<'a> {
    rules: HashMap<usize, Rule>,
    messages: Vec<&'a str>,
}

impl AocParser for Solver {
    type SharedData<'a> = Puzzle<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let sections = paragraphs(input);
        let [rules, messages] = sections.as_slice() else {
            return Err(ParseError::invalid("expected rules and messages separated by a blank line"));
        };
        let rules = rules
            .iter()
            .map(|line| numbered_rule(line))
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Puzzle {
            rules,
            messages: messages.clone(),
        })
    }
}

/// Matches one message against the rules
struct Matcher<'r> {
    rules: &'r HashMap<usize, Rule>,
    message: &'r [u8],
    /// `(rule, position)` pairs currently being expanded
    active: HashSet<(usize, usize)>,
}

impl Matcher<'_> {
    /// Positions where a match of `id` starting at `from` can end
    fn ends(&mut self, id: usize, from: usize) -> Result<Vec<usize>, SolveError> {
        let rules = self.rules;
        let rule = rules
            .get(&id)
            .ok_or_else(|| SolveError::failed(format!("rule {id} is referenced but not defined")))?;
        if !self.active.insert((id, from)) {
            return Err(SolveError::failed(format!(
                "rule {id} reaches itself without consuming input"
            )));
        }
        let found = match rule {
            Rule::Literal(c) if self.message.get(from) == Some(c) => vec![from + 1],
            Rule::Literal(_) => vec![],
            Rule::Any(alternatives) => {
                let mut found = Vec::new();
                for sequence in alternatives {
                    let mut positions = vec![from];
                    for &part in sequence {
                        let mut next = Vec::new();
                        for pos in positions {
                            if pos < self.message.len() {
                                next.extend(self.ends(part, pos)?);
                            }
                        }
                        positions = next;
                        if positions.is_empty() {
                            break;
                        }
                    }
                    found.extend(positions);
                }
                found
            }
        };
        self.active.remove(&(id, from));
        Ok(found)
    }
}

fn count_matching(rules: &HashMap<usize, Rule>, messages: &[&str]) -> Result<usize, SolveError> {
    let mut count = 0;
    for message in messages {
        let mut matcher = Matcher {
            rules,
            message: message.as_bytes(),
            active: HashSet::new(),
        };
        if matcher.ends(0, 0)?.contains(&message.len()) {
            count += 1;
        }
    }
    Ok(count)
}

impl PartSolver<1> for Solver {
    fn solve(puzzle: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        count_matching(&puzzle.rules, &puzzle.messages).map(|n| n.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// `8: 42 | 42 8` and `11: 42 31 | 42 11 31`
    fn solve(puzzle: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut rules = puzzle.rules.clone();
        rules.insert(8, Rule::Any(vec![vec![42], vec![42, 8]]));
        rules.insert(11, Rule::Any(vec![vec![42, 31], vec![42, 11, 31]]));
        count_matching(&rules, &puzzle.messages).map(|n| n.to_string())
    }
}
