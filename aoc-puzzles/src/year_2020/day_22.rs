//! Crab Combat

use crate::utils::text::{paragraphs, parse_num};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{HashSet, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 22, tags = ["simulation"])]
pub struct Solver;

type Deck = VecDeque<u8>;

impl AocParser for Solver {
    type SharedData<'a> = [Deck; 2];

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let sections = paragraphs(input);
        let [one, two] = sections.as_slice() else {
            return Err(ParseError::invalid("expected exactly two decks"));
        };
        Ok([deck(one)?, deck(two)?])
    }
}

/// `Player N:` followed by cards from the top down
fn deck(section: &[&str]) -> Result<Deck, ParseError> {
    section
        .get(1..)
        .unwrap_or_default()
        .iter()
        .map(|line| parse_num(line))
        .collect()
}

fn score(deck: &Deck) -> u64 {
    deck.iter()
        .rev()
        .zip(1..)
        .map(|(&card, position)| u64::from(card) * position)
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Player {
    One,
    Two,
}

/// Plays a game to the end, leaving the winner's cards in `decks`
fn play(decks: &mut [Deck; 2], recursive: bool) -> Player {
    let mut seen: HashSet<[Deck; 2]> = HashSet::new();
    loop {
        let (a, b) = match (decks[0].front(), decks[1].front()) {
            (Some(&a), Some(&b)) => (a, b),
            (_, None) => return Player::One,
            (None, _) => return Player::Two,
        };
        if recursive && !seen.insert(decks.clone()) {
            return Player::One;
        }
        decks[0].pop_front();
        decks[1].pop_front();

        let round = if recursive && decks[0].len() >= a as usize && decks[1].len() >= b as usize {
            let mut sub = [
                decks[0].iter().take(a as usize).copied().collect(),
                decks[1].iter().take(b as usize).copied().collect(),
            ];
            play(&mut sub, true)
        } else if a > b {
            Player::One
        } else {
            Player::Two
        };

        match round {
            Player::One => decks[0].extend([a, b]),
            Player::Two => decks[1].extend([b, a]),
        }
    }
}

fn winning_score(decks: &[Deck; 2], recursive: bool) -> String {
    let mut decks = decks.clone();
    let winner = play(&mut decks, recursive);
    let index = match winner {
        Player::One => 0,
        Player::Two => 1,
    };
    score(&decks[index]).to_string()
}

impl PartSolver<1> for Solver {
    fn solve(decks: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(winning_score(decks, false))
    }
}

impl PartSolver<2> for Solver {
    fn solve(decks: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(winning_score(decks, true))
    }
}
