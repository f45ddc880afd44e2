//! Round driver for the keep-away game.
//!
//! Monkeys take turns in id order. On its turn a monkey inspects the items it
//! held when the turn began and throws each one as soon as it is inspected.
//! An item thrown to a monkey that has not yet had its turn will be inspected
//! again in the same round; an item thrown to itself or to an earlier monkey
//! waits for the next round.

use std::cmp::Reverse;

use itertools::Itertools;

use crate::error::{ParseError, SimulationError};
use crate::monkey::{check_targets, Monkey, MonkeyId};
use crate::worry::WorryReducer;

/// Rounds after which the activity of every monkey is logged, besides every
/// thousandth.
const CHECKPOINTS: [usize; 2] = [1, 20];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle { rounds_completed: usize },
    Completed { rounds: usize },
}

#[derive(Debug)]
pub struct KeepAway<R: WorryReducer> {
    monkeys: Vec<Monkey<R::Worry>>,
    reducer: R,
    phase: Phase,
}

impl<R: WorryReducer> KeepAway<R> {
    pub fn new(monkeys: Vec<Monkey>, reducer: R) -> Result<Self, ParseError> {
        check_targets(&monkeys)?;
        Ok(KeepAway {
            monkeys: monkeys.into_iter().map(Monkey::lift).collect(),
            reducer,
            phase: Phase::Idle {
                rounds_completed: 0,
            },
        })
    }

    pub fn monkeys(&self) -> &[Monkey<R::Worry>] {
        &self.monkeys
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rounds_completed(&self) -> usize {
        match self.phase {
            Phase::Idle { rounds_completed } => rounds_completed,
            Phase::Completed { rounds } => rounds,
        }
    }

    /// Plays one full round.
    pub fn run_round(&mut self) -> Result<(), SimulationError> {
        let round = self.rounds_completed() + 1;

        for index in 0..self.monkeys.len() {
            let held = self.monkeys[index].items().len();
            tracing::trace!(round, monkey = index, held, "turn");

            for _ in 0..held {
                let Some(throw) = self.monkeys[index].inspect_next(&self.reducer)? else {
                    break;
                };
                self.monkeys[throw.target].catch(throw.worry);
            }
        }

        self.phase = Phase::Idle {
            rounds_completed: round,
        };

        if CHECKPOINTS.contains(&round) || round % 1000 == 0 {
            tracing::debug!(
                round,
                counts = %self.monkeys.iter().map(Monkey::inspect_count).join(", "),
                "round complete"
            );
        }

        Ok(())
    }

    /// Plays `rounds` more rounds and marks the game as completed.
    pub fn run(&mut self, rounds: usize) -> Result<(), SimulationError> {
        for _ in 0..rounds {
            self.run_round()?;
        }
        self.phase = Phase::Completed {
            rounds: self.rounds_completed(),
        };
        Ok(())
    }

    /// Monkeys ordered by inspection count, busiest first. Ties keep id order.
    pub fn ranking(&self) -> Vec<(MonkeyId, u64)> {
        self.monkeys
            .iter()
            .map(|monkey| (monkey.id(), monkey.inspect_count()))
            .sorted_by_key(|&(_, count)| Reverse(count))
            .collect()
    }

    /// Product of the two highest inspection counts.
    pub fn monkey_business(&self) -> Result<u64, SimulationError> {
        let ranking = self.ranking();
        let [(_, first), (_, second), ..] = ranking[..] else {
            return Err(SimulationError::NotEnoughMonkeys {
                count: ranking.len(),
            });
        };
        first
            .checked_mul(second)
            .ok_or(SimulationError::BusinessOverflow { first, second })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Operand, Operation};
    use crate::worry::{BoundedEquivalence, Dampened};
    use num_bigint::BigUint;

    fn items<W: Clone>(monkey: &Monkey<W>) -> Vec<W> {
        monkey.items().iter().cloned().collect()
    }

    fn increment() -> Operation {
        Operation::Add(Operand::Literal(1))
    }

    #[test]
    fn forward_throws_are_inspected_in_the_same_round() {
        let monkeys = vec![
            Monkey::new(0, vec![3], increment(), 7, 1, 1).unwrap(),
            Monkey::new(1, vec![5], Operation::Mul(Operand::Literal(2)), 11, 0, 0).unwrap(),
        ];
        let reducer = BoundedEquivalence::new(77).unwrap();
        let mut game = KeepAway::new(monkeys, reducer).unwrap();

        game.run_round().unwrap();

        // 3 -> 4 at monkey 0, then 4 -> 8 at monkey 1. 5 -> 10 at monkey 1
        // lands on monkey 0 after its turn is over.
        assert_eq!(game.monkeys()[0].inspect_count(), 1);
        assert_eq!(game.monkeys()[1].inspect_count(), 2);
        assert_eq!(items(&game.monkeys()[0]), vec![10, 8]);
        assert!(game.monkeys()[1].items().is_empty());

        game.run_round().unwrap();
        assert_eq!(game.monkeys()[0].inspect_count(), 3);
        assert_eq!(game.monkeys()[1].inspect_count(), 4);
        assert_eq!(items(&game.monkeys()[0]), vec![22, 18]);
    }

    #[test]
    fn self_throws_wait_for_the_next_round() {
        let monkeys = vec![Monkey::new(0, vec![1, 2], increment(), 5, 0, 0).unwrap()];
        let mut game = KeepAway::new(monkeys, BoundedEquivalence::new(5).unwrap()).unwrap();

        game.run_round().unwrap();
        assert_eq!(game.monkeys()[0].inspect_count(), 2);
        assert_eq!(items(&game.monkeys()[0]), vec![2, 3]);

        game.run(3).unwrap();
        assert_eq!(game.monkeys()[0].inspect_count(), 8);
        assert_eq!(items(&game.monkeys()[0]), vec![0, 1]);
    }

    #[test]
    fn phase_tracks_rounds() {
        let square = Operation::Mul(Operand::Old);
        let monkeys = vec![Monkey::new(0, vec![9], square, 3, 0, 0).unwrap()];
        let mut game = KeepAway::new(monkeys, Dampened).unwrap();
        assert_eq!(game.phase(), Phase::Idle { rounds_completed: 0 });

        game.run_round().unwrap();
        assert_eq!(game.phase(), Phase::Idle { rounds_completed: 1 });

        game.run(4).unwrap();
        assert_eq!(game.phase(), Phase::Completed { rounds: 5 });
        assert_eq!(game.rounds_completed(), 5);
    }

    #[test]
    fn self_squaring_with_relief_outgrows_u128() {
        let monkeys = vec![
            Monkey::new(0, vec![79], Operation::Mul(Operand::Old), 2, 0, 0).unwrap(),
            Monkey::new(1, vec![], increment(), 3, 0, 0).unwrap(),
        ];
        let mut game = KeepAway::new(monkeys, Dampened).unwrap();

        let mut expected: u128 = 79;
        for _ in 0..4 {
            expected = expected * expected / 3;
        }
        game.run(4).unwrap();
        assert_eq!(items(&game.monkeys()[0]), vec![BigUint::from(expected)]);

        game.run(8).unwrap();
        let worry = &game.monkeys()[0].items()[0];
        assert!(worry.bits() > 128);
        assert_eq!(game.ranking(), vec![(0, 12), (1, 0)]);
        assert_eq!(game.monkey_business(), Ok(0));
    }

    #[test]
    fn ties_rank_by_id() {
        let monkeys = vec![
            Monkey::new(0, vec![1], increment(), 2, 1, 1).unwrap(),
            Monkey::new(1, vec![], increment(), 2, 3, 3).unwrap(),
            Monkey::new(2, vec![1, 1], increment(), 2, 2, 2).unwrap(),
            Monkey::new(3, vec![], increment(), 2, 3, 3).unwrap(),
        ];

        for _ in 0..3 {
            let mut game = KeepAway::new(monkeys.clone(), Dampened).unwrap();
            game.run(1).unwrap();
            // Monkeys 0, 1 and 3 each see the one item; monkey 2 sees two.
            assert_eq!(game.ranking(), vec![(2, 2), (0, 1), (1, 1), (3, 1)]);
            assert_eq!(game.monkey_business(), Ok(2));
        }
    }

    #[test]
    fn monkey_business_needs_two_monkeys() {
        let monkeys = vec![Monkey::new(0, vec![1], increment(), 2, 0, 0).unwrap()];
        let mut game = KeepAway::new(monkeys, Dampened).unwrap();
        game.run(2).unwrap();
        assert_eq!(
            game.monkey_business(),
            Err(SimulationError::NotEnoughMonkeys { count: 1 })
        );
    }

    #[test]
    fn rejects_throws_to_missing_monkeys() {
        let monkeys = vec![Monkey::new(0, vec![], increment(), 2, 0, 4).unwrap()];
        assert!(KeepAway::new(monkeys, Dampened).is_err());
    }
}
