use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, Error};
use crate::monkey::Monkey;
use crate::parse::parse_monkeys;
use crate::simulation::KeepAway;
use crate::worry::{BoundedEquivalence, Dampened, WorryReducer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    One,
    Two,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    pub part: Part,
    pub result: u64,
}

/// How worry is kept in check after each inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReliefMode {
    Dampened,
    Bounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub rounds: usize,
    pub relief: ReliefMode,
}

impl Part {
    pub fn number(&self) -> u8 {
        match self {
            Part::One => 1,
            Part::Two => 2,
        }
    }
}

impl FromStr for Part {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Part::One),
            "2" => Ok(Part::Two),
            _ => Err(ConfigError::UnknownPart(s.to_string())),
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Part {}", self.number())
    }
}

impl FromStr for ReliefMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dampened" => Ok(ReliefMode::Dampened),
            "bounded" => Ok(ReliefMode::Bounded),
            _ => Err(ConfigError::UnknownRelief(s.to_string())),
        }
    }
}

impl RunConfig {
    /// 20 rounds, worry divided by three after every inspection.
    pub fn part_one() -> RunConfig {
        RunConfig {
            rounds: 20,
            relief: ReliefMode::Dampened,
        }
    }

    /// 10000 rounds, worry kept modulo the product of all divisors.
    pub fn part_two() -> RunConfig {
        RunConfig {
            rounds: 10000,
            relief: ReliefMode::Bounded,
        }
    }

    pub fn for_part(part: Part) -> RunConfig {
        match part {
            Part::One => RunConfig::part_one(),
            Part::Two => RunConfig::part_two(),
        }
    }
}

fn play<R: WorryReducer>(monkeys: Vec<Monkey>, reducer: R, rounds: usize) -> Result<u64, Error> {
    let mut game = KeepAway::new(monkeys, reducer)?;
    game.run(rounds)?;
    tracing::debug!(ranking = ?game.ranking(), "final ranking");
    Ok(game.monkey_business()?)
}

/// Plays a fresh game on a copy of `monkeys` and returns its monkey business.
pub fn run(monkeys: &[Monkey], config: &RunConfig) -> Result<u64, Error> {
    let monkeys = monkeys.to_vec();
    match config.relief {
        ReliefMode::Dampened => play(monkeys, Dampened, config.rounds),
        ReliefMode::Bounded => {
            let reducer = BoundedEquivalence::for_monkeys(&monkeys)?;
            tracing::debug!(modulus = reducer.modulus(), "bounded relief");
            play(monkeys, reducer, config.rounds)
        }
    }
}

/// Solves both parts of the puzzle from one parse of `input`.
pub fn solve(input: &str) -> Result<[Solution; 2], Error> {
    let monkeys = parse_monkeys(input)?;

    let solve_part = |part: Part| -> Result<Solution, Error> {
        let result = run(&monkeys, &RunConfig::for_part(part))?;
        tracing::info!(part = part.number(), result, "solved");
        Ok(Solution { part, result })
    };

    Ok([solve_part(Part::One)?, solve_part(Part::Two)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_the_two_parts() {
        assert_eq!(RunConfig::for_part(Part::One).rounds, 20);
        assert_eq!(RunConfig::for_part(Part::One).relief, ReliefMode::Dampened);
        assert_eq!(RunConfig::for_part(Part::Two).rounds, 10000);
        assert_eq!(RunConfig::for_part(Part::Two).relief, ReliefMode::Bounded);
    }

    #[test]
    fn parses_relief_and_part_names() {
        assert_eq!("Bounded".parse::<ReliefMode>(), Ok(ReliefMode::Bounded));
        assert_eq!("dampened".parse::<ReliefMode>(), Ok(ReliefMode::Dampened));
        assert!("modulo".parse::<ReliefMode>().is_err());
        assert_eq!("2".parse::<Part>(), Ok(Part::Two));
        assert!("3".parse::<Part>().is_err());
        assert_eq!(Part::One.to_string(), "Part 1");
    }
}
