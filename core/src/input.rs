use std::collections::HashMap;
use anyhow::{anyhow, Result};

use crate::error::WorkError;
use crate::model::day_record::EntryInput;

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub words: Vec<String>,
    pub metadata: HashMap<String, String>,
}

/// Splits `key:value` tokens from plain words.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut words = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        words.push(arg.clone());
    }

    ParsedInput { words, metadata }
}

/// Parses `positionId:quantity` tokens (`=` also accepted), keeping order.
///
/// Malformed tokens are errors. Zero quantities are valid input here; the
/// ledger decides what to keep.
pub fn parse_entries(args: &[String]) -> Result<Vec<EntryInput>> {
    args.iter()
        .map(|arg| {
            let (id, qty) = arg
                .split_once(':')
                .or_else(|| arg.split_once('='))
                .ok_or_else(|| anyhow!("Expected positionId:quantity, got '{}'", arg))?;
            let position_id: u32 = id
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid position ID '{}'", id))?;
            let quantity: f64 = qty
                .trim()
                .replace(',', ".")
                .parse()
                .map_err(|_| anyhow!("Invalid quantity '{}'", qty))?;
            if !quantity.is_finite() || quantity < 0.0 {
                return Err(WorkError::InvalidQuantity(quantity).into());
            }
            Ok(EntryInput::new(position_id, quantity))
        })
        .collect()
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Parses a decimal, accepting a comma as the separator.
pub fn parse_decimal(input: &str) -> Result<f64> {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| anyhow!("Not a number: '{}'", input))
}
