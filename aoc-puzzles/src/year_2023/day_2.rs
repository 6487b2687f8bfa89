//! Cube Conundrum

use crate::utils::text::{lines, parse_num, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 2, tags = ["parsing"])]
pub struct Solver;

/// Red, green and blue cube counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cubes([u32; 3]);

impl Cubes {
    fn max(self, other: Cubes) -> Cubes {
        Cubes(std::array::from_fn(|i| self.0[i].max(other.0[i])))
    }

    fn fits_in(self, bag: Cubes) -> bool {
        self.0.iter().zip(bag.0).all(|(&n, limit)| n <= limit)
    }
}

pub struct Game {
    id: u32,
    draws: Vec<Cubes>,
}

/// `3 blue, 4 red`
fn draw(text: &str) -> Result<Cubes, ParseError> {
    let mut cubes = Cubes::default();
    for item in text.split(',') {
        let (count, colour) = split_once_or(item.trim(), " ")?;
        let slot = match colour {
            "red" => 0,
            "green" => 1,
            "blue" => 2,
            _ => return Err(ParseError::invalid(format!("unknown colour {colour:?}"))),
        };
        cubes.0[slot] += parse_num::<u32>(count)?;
    }
    Ok(cubes)
}

fn game(line: &str) -> Result<Game, ParseError> {
    let (head, draws) = split_once_or(line, ": ")?;
    let id = head
        .strip_prefix("Game ")
        .ok_or_else(|| ParseError::invalid(format!("expected \"Game N\" in {line:?}")))?;
    Ok(Game {
        id: parse_num(id)?,
        draws: draws.split(';').map(draw).collect::<Result<_, _>>()?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Game>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(game).collect()
    }
}

/// Fewest cubes of each colour that make the game possible
fn minimum(game: &Game) -> Cubes {
    game.draws.iter().fold(Cubes::default(), |acc, &d| acc.max(d))
}

impl PartSolver<1> for Solver {
    fn solve(games: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let bag = Cubes([12, 13, 14]);
        let sum: u32 = games
            .iter()
            .filter(|g| minimum(g).fits_in(bag))
            .map(|g| g.id)
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(games: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let power: u64 = games
            .iter()
            .map(|g| minimum(g).0.iter().map(|&n| u64::from(n)).product::<u64>())
            .sum();
        Ok(power.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "\
Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "8");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "2286");
    }

    #[test]
    fn minimum_of_first_game() {
        let games = Solver::parse(SAMPLE).unwrap();
        assert_eq!(minimum(&games[0]), Cubes([4, 2, 6]));
    }

    #[test]
    fn unknown_colour() {
        assert!(Solver::parse("Game 1: 3 purple\n").is_err());
    }
}
