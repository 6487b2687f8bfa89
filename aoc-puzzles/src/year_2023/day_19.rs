//! Aplenty

use crate::utils::text::{numbers, paragraphs, parse_num, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;
use std::ops::Range;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 19, tags = ["ranges"])]
pub struct Solver;

/// `x`, `m`, `a`, `s` ratings
type Part = [u64; 4];

pub struct Rule<'a> {
    /// Rating index, whether it must be less than `value`, and `value`
    test: Option<(usize, bool, u64)>,
    target: &'a str,
}

pub struct System<'a> {
    workflows: HashMap<&'a str, Vec<Rule<'a>>>,
    parts: Vec<Part>,
}

fn category(c: char) -> Result<usize, ParseError> {
    "xmas"
        .find(c)
        .ok_or_else(|| ParseError::invalid(format!("unknown category {c:?}")))
}

/// `a<2006:qkq` or a bare fallback target
fn rule(text: &str) -> Result<Rule<'_>, ParseError> {
    let Some((test, target)) = text.split_once(':') else {
        return Ok(Rule { test: None, target: text });
    };
    let mut chars = test.chars();
    let (Some(cat), Some(op)) = (chars.next(), chars.next()) else {
        return Err(ParseError::invalid(format!("bad rule {text:?}")));
    };
    let less = match op {
        '<' => true,
        '>' => false,
        _ => return Err(ParseError::invalid(format!("bad comparison in {text:?}"))),
    };
    Ok(Rule {
        test: Some((category(cat)?, less, parse_num(chars.as_str())?)),
        target,
    })
}

/// `px{a<2006:qkq,m>2090:A,rfg}`
fn workflow(line: &str) -> Result<(&str, Vec<Rule<'_>>), ParseError> {
    let (name, body) = split_once_or(line, "{")?;
    let body = body
        .strip_suffix('}')
        .ok_or_else(|| ParseError::invalid(format!("unclosed workflow {line:?}")))?;
    let rules = body.split(',').map(rule).collect::<Result<Vec<_>, _>>()?;
    if rules.last().is_none_or(|r| r.test.is_some()) {
        return Err(ParseError::invalid(format!("{name} has no fallback rule")));
    }
    Ok((name, rules))
}

fn part(line: &str) -> Result<Part, ParseError> {
    numbers::<u64>(line)?
        .try_into()
        .map_err(|_| ParseError::invalid(format!("expected four ratings in {line:?}")))
}

impl AocParser for Solver {
    type SharedData<'a> = System<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let blocks = paragraphs(input);
        let [flows, parts] = blocks.as_slice() else {
            return Err(ParseError::invalid("expected workflows then parts"));
        };
        Ok(System {
            workflows: flows.iter().map(|l| workflow(l)).collect::<Result<_, _>>()?,
            parts: parts.iter().map(|l| part(l)).collect::<Result<_, _>>()?,
        })
    }
}

impl System<'_> {
    fn rules(&self, name: &str) -> Result<&[Rule<'_>], SolveError> {
        self.workflows
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SolveError::failed(format!("unknown workflow {name:?}")))
    }

    fn accepts(&self, part: &Part) -> Result<bool, SolveError> {
        let mut name = "in";
        // a longer chain than there are workflows has looped
        for _ in 0..=self.workflows.len() {
            match name {
                "A" => return Ok(true),
                "R" => return Ok(false),
                _ => {}
            }
            let passes = |r: &&Rule<'_>| match r.test {
                None => true,
                Some((cat, true, value)) => part[cat] < value,
                Some((cat, false, value)) => part[cat] > value,
            };
            name = self
                .rules(name)?
                .iter()
                .find(passes)
                .map(|r| r.target)
                .ok_or_else(|| SolveError::failed(format!("no rule matched in {name:?}")))?;
        }
        Err(SolveError::failed("workflows loop"))
    }

    /// Combinations within `ranges` that `name` accepts
    fn combinations(&self, name: &str, mut ranges: [Range<u64>; 4], depth: usize) -> Result<u64, SolveError> {
        match name {
            "A" => return Ok(ranges.iter().map(|r| r.end - r.start).product()),
            "R" => return Ok(0),
            _ if depth > self.workflows.len() => return Err(SolveError::failed("workflows loop")),
            _ => {}
        }
        let mut total = 0;
        for rule in self.rules(name)? {
            let Some((cat, less, value)) = rule.test else {
                return Ok(total + self.combinations(rule.target, ranges, depth + 1)?);
            };
            let r = &ranges[cat];
            // part of the range that passes, and what falls through
            let (pass, fail) = if less {
                (r.start..value.clamp(r.start, r.end), value.clamp(r.start, r.end)..r.end)
            } else {
                let cut = (value + 1).clamp(r.start, r.end);
                (cut..r.end, r.start..cut)
            };
            if !pass.is_empty() {
                let mut sub = ranges.clone();
                sub[cat] = pass;
                total += self.combinations(rule.target, sub, depth + 1)?;
            }
            if fail.is_empty() {
                return Ok(total);
            }
            ranges[cat] = fail;
        }
        Ok(total)
    }
}

impl PartSolver<1> for Solver {
    fn solve(system: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut sum = 0;
        for part in &system.parts {
            if system.accepts(part)? {
                sum += part.iter().sum::<u64>();
            }
        }
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Every rating runs 1 to 4000
    fn solve(system: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let all = std::array::from_fn(|_| 1..4001);
        Ok(system.combinations("in", all, 0)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{solve, try_solve};

    const SAMPLE: &str = "\
px{a<2006:qkq,m>2090:A,rfg}
pv{a>1716:R,A}
lnx{m>1548:A,A}
rfg{s<537:gd,x>2440:R,A}
qs{s>3448:A,lnx}
qkq{x<1416:A,crn}
crn{x>2662:A,R}
in{s<1351:px,qqz}
qqz{s>2770:qs,m<1801:hdj,R}
gd{a>3333:R,R}
hdj{m>838:A,pv}

{x=787,m=2655,a=1222,s=2876}
{x=1679,m=44,a=2067,s=496}
{x=2036,m=264,a=79,s=2244}
{x=2461,m=1339,a=466,s=291}
{x=2127,m=1623,a=2188,s=1013}
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "19114");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "167409079868000");
    }

    #[test]
    fn split_at_threshold() {
        let input = "in{x>2000:A,R}\n\n{x=1,m=2,a=3,s=4}\n";
        assert_eq!(solve::<Solver>(input, 2), (2000u64 * 4000 * 4000 * 4000).to_string());
        assert_eq!(solve::<Solver>(input, 1), "0");
    }

    #[test]
    fn looping_workflows() {
        let input = "in{x>0:b,R}\nb{a\n\n{x=1,m=1,a=1,s=1}\n";
        assert!(Solver::parse(input).is_err());
        let input = "in{x>0:b,R}\nb{m>0:in,A}\n\n{x=1,m=1,a=1,s=1}\n";
        assert!(try_solve::<Solver>(input, 1).is_err());
        assert!(try_solve::<Solver>(input, 2).is_err());
    }
}
