use std::sync::OnceLock;

use itertools::Itertools;
use regex::Regex;

use crate::error::ParseError;
use crate::expr::Operation;
use crate::monkey::{check_targets, Monkey, MonkeyId};

const ITEMS: &str = "Starting items";
const OPERATION: &str = "Operation";
const TEST: &str = "Test";
const IF_TRUE: &str = "If true";
const IF_FALSE: &str = "If false";

struct Patterns {
    header: Regex,
    operation: Regex,
    test: Regex,
    throw: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        header: Regex::new(r"^Monkey (?P<index>[0-9]+):$").unwrap(),
        operation: Regex::new(r"^new\s*=\s*(?P<expr>.+)$").unwrap(),
        test: Regex::new(r"^divisible by (?P<divisor>[0-9]+)$").unwrap(),
        throw: Regex::new(r"^throw to monkey (?P<target>[0-9]+)$").unwrap(),
    })
}

/// Parses the monkey notes, one block per monkey, in id order.
pub fn parse_monkeys(input: &str) -> Result<Vec<Monkey>, ParseError> {
    let blocks = input.lines().map(str::trim).group_by(|line| line.is_empty());

    let monkeys: Vec<Monkey> = blocks
        .into_iter()
        .filter(|(blank, _)| !blank)
        .enumerate()
        .map(|(index, (_, lines))| parse_block(index, &lines.collect::<Vec<&str>>()))
        .collect::<Result<_, _>>()?;

    if monkeys.is_empty() {
        return Err(ParseError::Empty);
    }
    check_targets(&monkeys)?;

    Ok(monkeys)
}

fn parse_block(index: MonkeyId, lines: &[&str]) -> Result<Monkey, ParseError> {
    let header = lines.first().copied().unwrap_or_default();
    let header_index = patterns()
        .header
        .captures(header)
        .and_then(|captures| captures["index"].parse::<MonkeyId>().ok());
    if header_index != Some(index) {
        return Err(ParseError::Header {
            block: index,
            found: header.to_string(),
        });
    }

    let items = parse_items(index, field(index, lines, ITEMS)?)?;

    let text = field(index, lines, OPERATION)?;
    let expr = capture(index, OPERATION, &patterns().operation, text, "expr")?;
    let operation: Operation = expr
        .parse()
        .map_err(|source| ParseError::Operation {
            monkey: index,
            source,
        })?;

    let text = field(index, lines, TEST)?;
    let divisor: u64 = capture(index, TEST, &patterns().test, text, "divisor")?
        .parse()
        .map_err(|_| malformed(index, TEST, text))?;

    let if_true = parse_target(index, IF_TRUE, field(index, lines, IF_TRUE)?)?;
    let if_false = parse_target(index, IF_FALSE, field(index, lines, IF_FALSE)?)?;

    Monkey::new(index, items, operation, divisor, if_true, if_false)
}

/// Finds the line labelled `name` and returns the text after the colon.
fn field<'a>(
    monkey: MonkeyId,
    lines: &[&'a str],
    name: &'static str,
) -> Result<&'a str, ParseError> {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(name)?.strip_prefix(':'))
        .map(str::trim)
        .ok_or(ParseError::MissingField { monkey, field: name })
}

fn capture<'a>(
    monkey: MonkeyId,
    name: &'static str,
    pattern: &Regex,
    text: &'a str,
    group: &str,
) -> Result<&'a str, ParseError> {
    pattern
        .captures(text)
        .and_then(|captures| captures.name(group))
        .map(|m| m.as_str())
        .ok_or_else(|| malformed(monkey, name, text))
}

fn malformed(monkey: MonkeyId, name: &'static str, text: &str) -> ParseError {
    ParseError::Malformed {
        monkey,
        field: name,
        line: text.to_string(),
    }
}

fn parse_items(monkey: MonkeyId, text: &str) -> Result<Vec<u64>, ParseError> {
    if text.is_empty() {
        return Ok(vec![]);
    }
    text.split(',')
        .map(|x| x.trim().parse::<u64>())
        .collect::<Result<_, _>>()
        .map_err(|_| malformed(monkey, ITEMS, text))
}

fn parse_target(
    monkey: MonkeyId,
    name: &'static str,
    text: &str,
) -> Result<MonkeyId, ParseError> {
    capture(monkey, name, &patterns().throw, text, "target")?
        .parse()
        .map_err(|_| malformed(monkey, name, text))
}
