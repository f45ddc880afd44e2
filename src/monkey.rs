use std::collections::VecDeque;

use crate::error::{ParseError, SimulationError};
use crate::expr::Operation;
use crate::worry::{WorryLevel, WorryReducer};

/// Position of a monkey in the troop; items are thrown by id.
pub type MonkeyId = usize;

/// An item leaving a monkey's hands, bound for `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Throw<W> {
    pub target: MonkeyId,
    pub worry: W,
}

/// A monkey holding items with worry levels of type `W`.
///
/// Parsed notes use `u64`; a game lifts them into its reducer's worry type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monkey<W = u64> {
    id: MonkeyId,
    items: VecDeque<W>,
    operation: Operation,
    divisor: u64,
    target_if_divisible: MonkeyId,
    target_if_not_divisible: MonkeyId,
    inspect_count: u64,
}

impl Monkey {
    pub fn new(
        id: MonkeyId,
        items: Vec<u64>,
        operation: Operation,
        divisor: u64,
        target_if_divisible: MonkeyId,
        target_if_not_divisible: MonkeyId,
    ) -> Result<Monkey, ParseError> {
        if divisor == 0 {
            return Err(ParseError::ZeroDivisor { monkey: id });
        }
        Ok(Monkey {
            id,
            items: VecDeque::from(items),
            operation,
            divisor,
            target_if_divisible,
            target_if_not_divisible,
            inspect_count: 0,
        })
    }

    pub fn lift<W: From<u64>>(self) -> Monkey<W> {
        Monkey {
            id: self.id,
            items: self.items.into_iter().map(W::from).collect(),
            operation: self.operation,
            divisor: self.divisor,
            target_if_divisible: self.target_if_divisible,
            target_if_not_divisible: self.target_if_not_divisible,
            inspect_count: self.inspect_count,
        }
    }
}

impl<W> Monkey<W> {
    pub fn id(&self) -> MonkeyId {
        self.id
    }

    pub fn items(&self) -> &VecDeque<W> {
        &self.items
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn divisor(&self) -> u64 {
        self.divisor
    }

    pub fn targets(&self) -> (MonkeyId, MonkeyId) {
        (self.target_if_divisible, self.target_if_not_divisible)
    }

    /// Number of items this monkey has inspected over its lifetime.
    pub fn inspect_count(&self) -> u64 {
        self.inspect_count
    }

    pub fn catch(&mut self, worry: W) {
        self.items.push_back(worry);
    }
}

impl<W: WorryLevel> Monkey<W> {
    /// Inspects the front item and decides where it goes.
    ///
    /// The item is removed from this monkey's queue; delivering it is up to
    /// the caller. Returns `Ok(None)` once the queue is empty.
    pub fn inspect_next<R: WorryReducer<Worry = W>>(
        &mut self,
        reducer: &R,
    ) -> Result<Option<Throw<W>>, SimulationError> {
        let Some(old) = self.items.pop_front() else {
            return Ok(None);
        };
        self.inspect_count += 1;

        let raised = self
            .operation
            .apply(&old)
            .ok_or_else(|| SimulationError::WorryOverflow {
                monkey: self.id,
                worry: old.to_string(),
            })?;
        let worry = reducer.reduce(&raised);
        let divisible = worry.divisible_by(self.divisor);

        if reducer.preserves_divisibility() {
            debug_assert_eq!(
                divisible,
                raised.divisible_by(self.divisor),
                "monkey {}: reducing {} to {} changed the test by {}",
                self.id,
                raised,
                worry,
                self.divisor
            );
        }

        let target = if divisible {
            self.target_if_divisible
        } else {
            self.target_if_not_divisible
        };

        tracing::trace!(
            monkey = self.id,
            %old,
            %raised,
            %worry,
            divisible,
            to = target,
            "inspected item"
        );

        Ok(Some(Throw { target, worry }))
    }
}

/// Checks that every throw target names a monkey in `monkeys`.
pub fn check_targets<W>(monkeys: &[Monkey<W>]) -> Result<(), ParseError> {
    let count = monkeys.len();
    for monkey in monkeys {
        let (yes, no) = monkey.targets();
        for target in [yes, no] {
            if target >= count {
                return Err(ParseError::UnknownTarget {
                    monkey: monkey.id,
                    target,
                    count,
                });
            }
        }
    }
    Ok(())
}
