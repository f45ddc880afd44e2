use thiserror::Error;

use crate::monkey::MonkeyId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("input contains no monkeys")]
    Empty,
    #[error("block {block}: expected header `Monkey {block}:`, found {found:?}")]
    Header { block: usize, found: String },
    #[error("monkey {monkey}: missing `{field}` line")]
    MissingField { monkey: MonkeyId, field: &'static str },
    #[error("monkey {monkey}: malformed `{field}` line: {line:?}")]
    Malformed {
        monkey: MonkeyId,
        field: &'static str,
        line: String,
    },
    #[error("monkey {monkey}: bad operation: {source}")]
    Operation {
        monkey: MonkeyId,
        #[source]
        source: OperationError,
    },
    #[error("monkey {monkey}: divisor must be positive")]
    ZeroDivisor { monkey: MonkeyId },
    #[error("monkey {monkey}: throws to monkey {target}, but only {count} monkeys exist")]
    UnknownTarget {
        monkey: MonkeyId,
        target: MonkeyId,
        count: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error("expected `old <op> <operand>`, got {0:?}")]
    Shape(String),
    #[error("left operand must be `old`, got {0:?}")]
    LeftOperand(String),
    #[error("bad operator: {0}")]
    Operator(String),
    #[error("bad operand: {0}")]
    Operand(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("monkey {monkey}: worry level overflowed while inspecting {worry}")]
    WorryOverflow { monkey: MonkeyId, worry: String },
    #[error("monkey business needs at least two monkeys, have {count}")]
    NotEnoughMonkeys { count: usize },
    #[error("monkey business overflowed: {first} * {second}")]
    BusinessOverflow { first: u64, second: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("product of all divisors overflows u64")]
    ModulusOverflow,
    #[error("modulus must be positive")]
    ZeroModulus,
    #[error("unknown relief mode {0:?}, expected `dampened` or `bounded`")]
    UnknownRelief(String),
    #[error("unknown part {0:?}, expected 1 or 2")]
    UnknownPart(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
