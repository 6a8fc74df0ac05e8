use serde::{Deserialize, Serialize};

use crate::error::WorkError;

/// A billable piece of work with its current unit price.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: u32,
    pub name: String,
    #[serde(alias = "price")]
    pub unit_price: f64,
}

impl Position {
    /// Builds a position after checking the name and price.
    pub fn new(id: u32, name: &str, unit_price: f64) -> Result<Self, WorkError> {
        let name = validate_name(name)?;
        let unit_price = validate_price(unit_price)?;
        Ok(Self { id, name, unit_price })
    }
}

pub fn validate_name(name: &str) -> Result<String, WorkError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WorkError::EmptyName);
    }
    Ok(name.to_string())
}

pub fn validate_price(unit_price: f64) -> Result<f64, WorkError> {
    if unit_price.is_finite() && unit_price > 0.0 {
        Ok(unit_price)
    } else {
        Err(WorkError::InvalidPrice(unit_price))
    }
}

/// `max(existing ids) + 1`, or `1` for an empty catalog.
///
/// Ids freed by deleting the highest position are handed out again.
pub fn next_position_id(positions: &[Position]) -> u32 {
    positions.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_validates() {
        let p = Position::new(1, "  Painting ", 500.0).unwrap();
        assert_eq!(p.name, "Painting");

        assert_eq!(Position::new(1, "   ", 500.0), Err(WorkError::EmptyName));
        assert_eq!(Position::new(1, "Painting", 0.0), Err(WorkError::InvalidPrice(0.0)));
        assert!(Position::new(1, "Painting", f64::NAN).is_err());
    }

    #[test]
    fn test_next_id_from_max() {
        assert_eq!(next_position_id(&[]), 1);

        let positions = vec![
            Position::new(2, "A", 1.0).unwrap(),
            Position::new(7, "B", 1.0).unwrap(),
        ];
        assert_eq!(next_position_id(&positions), 8);
    }

    #[test]
    fn test_reads_legacy_price_field() {
        let p: Position = serde_json::from_str(r#"{"id":3,"name":"Painting","price":500}"#).unwrap();
        assert_eq!(p.unit_price, 500.0);

        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"unitPrice\":500"));
    }
}
