//! Pulse Propagation

use crate::utils::math::lcm;
use crate::utils::text::{lines, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{HashMap, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 20, tags = ["simulation", "math"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Broadcast,
    FlipFlop,
    Conjunction,
    /// Named only as a destination, like `rx`
    Sink,
}

pub struct Network<'a> {
    names: Vec<&'a str>,
    kinds: Vec<Kind>,
    /// Destination and its input slot, per module
    targets: Vec<Vec<(usize, usize)>>,
    inputs: Vec<Vec<usize>>,
    broadcaster: usize,
}

/// Flip-flop states and conjunction memories
struct State {
    on: Vec<bool>,
    memory: Vec<Vec<bool>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut declared = Vec::new();
        for line in lines(input) {
            let (module, dests) = split_once_or(line, " -> ")?;
            let (kind, name) = match module.as_bytes().first() {
                Some(b'%') => (Kind::FlipFlop, &module[1..]),
                Some(b'&') => (Kind::Conjunction, &module[1..]),
                _ if module == "broadcaster" => (Kind::Broadcast, module),
                _ => return Err(ParseError::invalid(format!("unknown module {module:?}"))),
            };
            declared.push((name, kind, dests.split(", ").collect::<Vec<_>>()));
        }

        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut names = Vec::new();
        let mut kinds = Vec::new();
        for &(name, kind, _) in &declared {
            if index.insert(name, names.len()).is_some() {
                return Err(ParseError::invalid(format!("module {name:?} declared twice")));
            }
            names.push(name);
            kinds.push(kind);
        }

        let mut targets = vec![Vec::new(); names.len()];
        let mut inputs: Vec<Vec<usize>> = vec![Vec::new(); names.len()];
        for (from, (_, _, dests)) in declared.iter().enumerate() {
            for &dest in dests {
                let to = *index.entry(dest).or_insert_with(|| {
                    names.push(dest);
                    kinds.push(Kind::Sink);
                    inputs.push(Vec::new());
                    targets.push(Vec::new());
                    names.len() - 1
                });
                targets[from].push((to, inputs[to].len()));
                inputs[to].push(from);
            }
        }

        let broadcaster = kinds
            .iter()
            .position(|&k| k == Kind::Broadcast)
            .ok_or_else(|| ParseError::missing("broadcaster"))?;
        Ok(Network {
            names,
            kinds,
            targets,
            inputs,
            broadcaster,
        })
    }
}

impl Network<'_> {
    fn fresh_state(&self) -> State {
        State {
            on: vec![false; self.names.len()],
            memory: self.inputs.iter().map(|i| vec![false; i.len()]).collect(),
        }
    }

    /// Push the button once, reporting every pulse as `(from, to, high)`.
    /// The button's own pulse comes from the broadcaster to itself.
    fn press(&self, state: &mut State, mut observe: impl FnMut(usize, usize, bool)) {
        let mut queue = VecDeque::from([(self.broadcaster, self.broadcaster, 0, false)]);
        while let Some((from, to, slot, high)) = queue.pop_front() {
            observe(from, to, high);
            let send = match self.kinds[to] {
                Kind::Broadcast => high,
                Kind::FlipFlop if high => continue,
                Kind::FlipFlop => {
                    state.on[to] = !state.on[to];
                    state.on[to]
                }
                Kind::Conjunction => {
                    let memory = &mut state.memory[to];
                    memory[slot] = high;
                    !memory.iter().all(|&m| m)
                }
                Kind::Sink => continue,
            };
            queue.extend(self.targets[to].iter().map(|&(next, s)| (to, next, s, send)));
        }
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|&n| n == name)
    }
}

impl PartSolver<1> for Solver {
    fn solve(network: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut state = network.fresh_state();
        let mut counts = [0u64; 2];
        for _ in 0..1000 {
            network.press(&mut state, |_, _, high| counts[usize::from(high)] += 1);
        }
        Ok((counts[0] * counts[1]).to_string())
    }
}

/// Presses tried before giving up on a cycle
const PRESS_LIMIT: u64 = 1 << 20;

impl PartSolver<2> for Solver {
    /// Fewest presses that deliver a low pulse to `rx`. Assumes `rx` is fed
    /// by one conjunction whose inputs each send a high pulse on a fixed
    /// period starting from the first press.
    fn solve(network: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let rx = network
            .find("rx")
            .ok_or_else(|| SolveError::failed("no module rx"))?;
        let hub = match network.inputs[rx][..] {
            [hub] if network.kinds[hub] == Kind::Conjunction => hub,
            _ => return Err(SolveError::failed("rx is not fed by a single conjunction")),
        };

        let feeders = &network.inputs[hub];
        let mut periods: Vec<Option<u64>> = vec![None; feeders.len()];
        let mut state = network.fresh_state();
        for presses in 1..=PRESS_LIMIT {
            network.press(&mut state, |from, to, high| {
                if high
                    && to == hub
                    && let Some(i) = feeders.iter().position(|&f| f == from)
                {
                    periods[i].get_or_insert(presses);
                }
            });
            if periods.iter().all(Option::is_some) {
                tracing::debug!(?periods, "every feeder of rx has fired");
                let total = periods.iter().flatten().fold(1, |acc, &p| lcm(acc, p));
                return Ok(total.to_string());
            }
        }
        Err(SolveError::failed(format!(
            "feeders of {} never all fired",
            network.names[hub]
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{solve, try_solve};

    #[test]
    fn samples() {
        let simple = "\
broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a
";
        let with_output = "\
broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output
";
        assert_eq!(solve::<Solver>(simple, 1), "32000000");
        assert_eq!(solve::<Solver>(with_output, 1), "11687500");
    }

    #[test]
    fn counter_into_rx() {
        let input = "\
broadcaster -> a
%a -> na, b
%b -> nb
&na -> hub
&nb -> hub
&hub -> rx
";
        assert_eq!(solve::<Solver>(input, 2), "4");
    }

    #[test]
    fn rx_shape_is_checked() {
        assert!(try_solve::<Solver>("broadcaster -> a\n%a -> b\n", 2).is_err());
        assert!(try_solve::<Solver>("broadcaster -> a\n%a -> rx\n", 2).is_err());
        assert!(Solver::parse("%a -> b\n").is_err());
        assert!(Solver::parse("broadcaster -> a\n%a -> b\n%a -> c\n").is_err());
    }
}
