//! Unit categories
//!
//! Units never convert across categories. Each category owns a fixed unit set
//! and the rule used to convert between its members.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::{ConversionError, Unit};
use crate::unit::{LengthUnit, TemperatureUnit, UnitKind, WeightUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Length,
    Weight,
    Temperature,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Length, Category::Weight, Category::Temperature];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Temperature => "Temperature",
        }
    }

    /// Units of this category, in display order
    pub fn units(&self) -> Vec<Unit> {
        match self {
            Category::Length => LengthUnit::ALL.iter().map(|&u| Unit::Length(u)).collect(),
            Category::Weight => WeightUnit::ALL.iter().map(|&u| Unit::Weight(u)).collect(),
            Category::Temperature => TemperatureUnit::ALL.iter().map(|&u| Unit::Temperature(u)).collect(),
        }
    }

    pub fn unit_names(&self) -> Vec<&'static str> {
        self.units().iter().map(|u| u.name()).collect()
    }

    /// Parse a category name, case-insensitively.
    ///
    /// One leading decoration token without letters or digits is allowed,
    /// so "📏 Length" resolves to Length but "Volume Length" does not.
    pub fn parse(s: &str) -> Result<Category, ConversionError> {
        let unknown = || ConversionError::UnknownCategory(s.trim().to_string());

        let mut words = s.split_whitespace();
        let word = match (words.next(), words.next(), words.next()) {
            (Some(name), None, None) => name,
            (Some(decoration), Some(name), None)
                if !decoration.chars().any(|c| c.is_ascii_alphanumeric()) => name,
            _ => return Err(unknown()),
        };

        match word.to_ascii_lowercase().as_str() {
            "length" | "distance" => Ok(Category::Length),
            "weight" | "mass" => Ok(Category::Weight),
            "temperature" | "temp" => Ok(Category::Temperature),
            _ => Err(unknown()),
        }
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::parse(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(Category::parse("Length").unwrap(), Category::Length);
        assert_eq!(Category::parse("weight").unwrap(), Category::Weight);
        assert_eq!(Category::parse(" TEMPERATURE ").unwrap(), Category::Temperature);
        assert_eq!("mass".parse::<Category>().unwrap(), Category::Weight);
    }

    #[test]
    fn test_parse_decorated_label() {
        assert_eq!(Category::parse("📏 Length").unwrap(), Category::Length);
        assert_eq!(Category::parse("⚖️ Weight").unwrap(), Category::Weight);
        assert_eq!(Category::parse("🌡️ Temperature").unwrap(), Category::Temperature);
    }

    #[test]
    fn test_parse_rejects_word_prefix() {
        for input in ["Volume Length", "Temperature Length", "Length Volume", "📏 Length Weight", "1 Length"] {
            assert_eq!(
                Category::parse(input),
                Err(ConversionError::UnknownCategory(input.to_string())),
                "'{}' should not parse",
                input
            );
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            Category::parse("Volume"),
            Err(ConversionError::UnknownCategory("Volume".to_string()))
        );
        assert!(Category::parse("").is_err());
    }

    #[test]
    fn test_unit_sets() {
        assert_eq!(Category::Length.units().len(), 8);
        assert_eq!(Category::Weight.units().len(), 5);
        assert_eq!(Category::Temperature.units().len(), 3);

        for category in Category::ALL {
            assert!(category.units().iter().all(|u| u.category() == category));
        }
    }

    #[test]
    fn test_display_order_matches_form() {
        assert_eq!(
            Category::Length.unit_names(),
            vec!["Meters", "Kilometers", "Centimeters", "Millimeters", "Miles", "Yards", "Feet", "Inches"]
        );
        assert_eq!(
            Category::Weight.unit_names(),
            vec!["Kilograms", "Grams", "Pounds", "Ounces", "Milligrams"]
        );
    }
}
