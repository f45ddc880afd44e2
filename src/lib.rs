//! Monkey keep-away: monkeys pass items around, each inspection changes the
//! item's worry level, and a divisibility test decides who catches it next.

pub mod error;
pub mod expr;
pub mod monkey;
pub mod parse;
pub mod simulation;
pub mod solution;
pub mod worry;

pub use error::{ConfigError, Error, OperationError, ParseError, SimulationError};
pub use expr::{Operand, Operation};
pub use monkey::{Monkey, MonkeyId, Throw};
pub use parse::parse_monkeys;
pub use simulation::{KeepAway, Phase};
pub use solution::{run, solve, Part, ReliefMode, RunConfig, Solution};
pub use worry::{BoundedEquivalence, Dampened, WorryLevel, WorryReducer};
