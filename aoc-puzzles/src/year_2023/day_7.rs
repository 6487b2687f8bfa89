//! Camel Cards

use crate::utils::text::{lines, parse_num, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 7, tags = ["sorting"])]
pub struct Solver;

const JACK: u8 = 11;
const JOKER: u8 = 1;

pub struct Hand {
    cards: [u8; 5],
    bid: u64,
}

fn card(c: char) -> Result<u8, ParseError> {
    Ok(match c {
        '2'..='9' => c as u8 - b'0',
        'T' => 10,
        'J' => JACK,
        'Q' => 12,
        'K' => 13,
        'A' => 14,
        _ => return Err(ParseError::invalid(format!("unknown card {c:?}"))),
    })
}

fn hand(line: &str) -> Result<Hand, ParseError> {
    let (cards, bid) = split_once_or(line, " ")?;
    let cards: Vec<u8> = cards.chars().map(card).collect::<Result<_, _>>()?;
    Ok(Hand {
        cards: cards
            .try_into()
            .map_err(|_| ParseError::invalid(format!("hand {line:?} needs five cards")))?,
        bid: parse_num(bid)?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hand>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(hand).collect()
    }
}

/// High card 0 up to five of a kind 6. Jokers join the largest group.
fn strength(cards: &[u8; 5]) -> u8 {
    let mut counts = [0u8; 15];
    for &c in cards {
        counts[c as usize] += 1;
    }
    let jokers = std::mem::take(&mut counts[JOKER as usize]);
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts[0] += jokers;
    match counts[..2] {
        [5, _] => 6,
        [4, _] => 5,
        [3, 2] => 4,
        [3, _] => 3,
        [2, 2] => 2,
        [2, _] => 1,
        _ => 0,
    }
}

fn winnings(hands: &[Hand], jokers: bool) -> String {
    let mut ranked: Vec<([u8; 5], u64)> = hands
        .iter()
        .map(|h| {
            let cards = if jokers {
                h.cards.map(|c| if c == JACK { JOKER } else { c })
            } else {
                h.cards
            };
            (cards, h.bid)
        })
        .collect();
    ranked.sort_by_cached_key(|(cards, _)| (strength(cards), *cards));
    ranked
        .iter()
        .zip(1..)
        .map(|(&(_, bid), rank)| bid * rank)
        .sum::<u64>()
        .to_string()
}

impl PartSolver<1> for Solver {
    fn solve(hands: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(winnings(hands, false))
    }
}

impl PartSolver<2> for Solver {
    fn solve(hands: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(winnings(hands, true))
    }
}
