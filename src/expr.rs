use std::fmt;
use std::str::FromStr;

use crate::error::OperationError;
use crate::worry::WorryLevel;

/// Right-hand side of an operation. The left-hand side is always `old`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Old,
    Literal(u64),
}

/// `new = old <op> <operand>`, with `op` one of `+` or `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add(Operand),
    Mul(Operand),
}

impl Operand {
    fn eval<W: WorryLevel>(&self, old: &W) -> W {
        match *self {
            Operand::Old => old.clone(),
            Operand::Literal(x) => W::from(x),
        }
    }
}

impl Operation {
    /// Returns `None` if the result does not fit in `W`.
    pub fn apply<W: WorryLevel>(&self, old: &W) -> Option<W> {
        match self {
            Operation::Add(rhs) => old.try_add(&rhs.eval(old)),
            Operation::Mul(rhs) => old.try_mul(&rhs.eval(old)),
        }
    }
}

impl FromStr for Operand {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "old" => Ok(Operand::Old),
            _ => s
                .parse()
                .map(Operand::Literal)
                .map_err(|_| OperationError::Operand(s.to_string())),
        }
    }
}

impl FromStr for Operation {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [left, op, right] = tokens[..] else {
            return Err(OperationError::Shape(s.trim().to_string()));
        };

        if left != "old" {
            return Err(OperationError::LeftOperand(left.to_string()));
        }
        let right: Operand = right.parse()?;

        match op {
            "+" => Ok(Operation::Add(right)),
            "*" => Ok(Operation::Mul(right)),
            _ => Err(OperationError::Operator(op.to_string())),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Old => write!(f, "old"),
            Operand::Literal(x) => write!(f, "{}", x),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add(rhs) => write!(f, "old + {}", rhs),
            Operation::Mul(rhs) => write!(f, "old * {}", rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn multiplies_by_literal() {
        let op: Operation = "old * 19".parse().unwrap();
        assert_eq!(op, Operation::Mul(Operand::Literal(19)));
        assert_eq!(op.apply(&79u128), Some(1501));
    }

    #[test]
    fn adds_literal() {
        let op: Operation = "old + 6".parse().unwrap();
        assert_eq!(op.apply(&54u128), Some(60));
    }

    #[test]
    fn squares_old() {
        let op: Operation = "  old   *  old ".parse().unwrap();
        assert_eq!(op, Operation::Mul(Operand::Old));
        assert_eq!(op.apply(&79u128), Some(6241));
    }

    #[test]
    fn doubles_with_old_plus_old() {
        let op: Operation = "old + old".parse().unwrap();
        assert_eq!(op.apply(&21u128), Some(42));
    }

    #[test]
    fn squares_any_u64_in_u128() {
        let op: Operation = "old * old".parse().unwrap();
        let old = u128::from(u64::MAX);
        assert_eq!(op.apply(&old), Some(old * old));
        assert_eq!(op.apply(&u128::MAX), None);
    }

    #[test]
    fn big_worry_never_overflows() {
        let op: Operation = "old * old".parse().unwrap();
        let old = BigUint::from(u128::MAX);
        assert_eq!(op.apply(&old), Some(&old * &old));
    }

    #[test]
    fn rejects_unsupported_rules() {
        assert_eq!(
            "old - 3".parse::<Operation>(),
            Err(OperationError::Operator("-".to_string()))
        );
        assert_eq!(
            "new * 3".parse::<Operation>(),
            Err(OperationError::LeftOperand("new".to_string()))
        );
        assert_eq!(
            "old * x".parse::<Operation>(),
            Err(OperationError::Operand("x".to_string()))
        );
        assert_eq!(
            "old * -3".parse::<Operation>(),
            Err(OperationError::Operand("-3".to_string()))
        );
        assert!(matches!(
            "old * (old + 1)".parse::<Operation>(),
            Err(OperationError::Shape(_))
        ));
        assert!(matches!("".parse::<Operation>(), Err(OperationError::Shape(_))));
    }

    #[test]
    fn displays_in_input_syntax() {
        let op: Operation = "old * old".parse().unwrap();
        assert_eq!(op.to_string(), "old * old");
        let op: Operation = "old + 3".parse().unwrap();
        assert_eq!(op.to_string(), "old + 3");
    }
}
