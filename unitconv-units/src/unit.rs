//! Unit enumerations
//!
//! Every category has a closed enum of its units. [`Unit`] tags a unit with
//! its category so mixed-category input can be represented and rejected.

use std::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Category, ConversionError};

/// Behaviour shared by the per-category unit enums
pub trait UnitKind: Copy + Eq + fmt::Debug + 'static {
    const CATEGORY: Category;
    const ALL: &'static [Self];

    /// Canonical display label, e.g. "Meters"
    fn name(self) -> &'static str;

    /// Short symbol, e.g. "m"
    fn symbol(self) -> &'static str;

    /// Other accepted spellings, lowercase
    fn aliases(self) -> &'static [&'static str];

    /// True if `input` names this unit (case-insensitive)
    fn matches(self, input: &str) -> bool {
        let input = input.trim();
        input.eq_ignore_ascii_case(self.name())
            || input.eq_ignore_ascii_case(self.symbol())
            || self.aliases().iter().any(|a| input.eq_ignore_ascii_case(a))
    }

    /// Resolve a unit name within this category
    fn parse(input: &str) -> Result<Self, ConversionError> {
        Self::ALL
            .iter()
            .copied()
            .find(|u| u.matches(input))
            .ok_or_else(|| ConversionError::invalid_unit(input, Some(Self::CATEGORY)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Meters,
    Kilometers,
    Centimeters,
    Millimeters,
    Miles,
    Yards,
    Feet,
    Inches,
}

impl UnitKind for LengthUnit {
    const CATEGORY: Category = Category::Length;
    const ALL: &'static [Self] = &[
        LengthUnit::Meters,
        LengthUnit::Kilometers,
        LengthUnit::Centimeters,
        LengthUnit::Millimeters,
        LengthUnit::Miles,
        LengthUnit::Yards,
        LengthUnit::Feet,
        LengthUnit::Inches,
    ];

    fn name(self) -> &'static str {
        match self {
            LengthUnit::Meters => "Meters",
            LengthUnit::Kilometers => "Kilometers",
            LengthUnit::Centimeters => "Centimeters",
            LengthUnit::Millimeters => "Millimeters",
            LengthUnit::Miles => "Miles",
            LengthUnit::Yards => "Yards",
            LengthUnit::Feet => "Feet",
            LengthUnit::Inches => "Inches",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Meters => "m",
            LengthUnit::Kilometers => "km",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Millimeters => "mm",
            LengthUnit::Miles => "mi",
            LengthUnit::Yards => "yd",
            LengthUnit::Feet => "ft",
            LengthUnit::Inches => "in",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            LengthUnit::Meters => &["meter", "metre", "metres"],
            LengthUnit::Kilometers => &["kilometer", "kilometre", "kilometres"],
            LengthUnit::Centimeters => &["centimeter", "centimetre", "centimetres"],
            LengthUnit::Millimeters => &["millimeter", "millimetre", "millimetres"],
            LengthUnit::Miles => &["mile"],
            LengthUnit::Yards => &["yard", "yds"],
            LengthUnit::Feet => &["foot"],
            LengthUnit::Inches => &["inch"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightUnit {
    Kilograms,
    Grams,
    Pounds,
    Ounces,
    Milligrams,
}

impl UnitKind for WeightUnit {
    const CATEGORY: Category = Category::Weight;
    const ALL: &'static [Self] = &[
        WeightUnit::Kilograms,
        WeightUnit::Grams,
        WeightUnit::Pounds,
        WeightUnit::Ounces,
        WeightUnit::Milligrams,
    ];

    fn name(self) -> &'static str {
        match self {
            WeightUnit::Kilograms => "Kilograms",
            WeightUnit::Grams => "Grams",
            WeightUnit::Pounds => "Pounds",
            WeightUnit::Ounces => "Ounces",
            WeightUnit::Milligrams => "Milligrams",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            WeightUnit::Kilograms => "kg",
            WeightUnit::Grams => "g",
            WeightUnit::Pounds => "lb",
            WeightUnit::Ounces => "oz",
            WeightUnit::Milligrams => "mg",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            WeightUnit::Kilograms => &["kilogram", "kilo", "kilos"],
            WeightUnit::Grams => &["gram"],
            WeightUnit::Pounds => &["pound", "lbs"],
            WeightUnit::Ounces => &["ounce"],
            WeightUnit::Milligrams => &["milligram"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl UnitKind for TemperatureUnit {
    const CATEGORY: Category = Category::Temperature;
    const ALL: &'static [Self] = &[
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    fn name(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius",
            TemperatureUnit::Fahrenheit => "Fahrenheit",
            TemperatureUnit::Kelvin => "Kelvin",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            TemperatureUnit::Celsius => &["c", "degc", "centigrade"],
            TemperatureUnit::Fahrenheit => &["f", "degf"],
            TemperatureUnit::Kelvin => &["kelvins"],
        }
    }
}

/// A unit tagged with its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Length(LengthUnit),
    Weight(WeightUnit),
    Temperature(TemperatureUnit),
}

impl Unit {
    pub fn category(&self) -> Category {
        match self {
            Unit::Length(_) => Category::Length,
            Unit::Weight(_) => Category::Weight,
            Unit::Temperature(_) => Category::Temperature,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Unit::Length(u) => u.name(),
            Unit::Weight(u) => u.name(),
            Unit::Temperature(u) => u.name(),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match *self {
            Unit::Length(u) => u.symbol(),
            Unit::Weight(u) => u.symbol(),
            Unit::Temperature(u) => u.symbol(),
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match *self {
            Unit::Length(u) => u.aliases(),
            Unit::Weight(u) => u.aliases(),
            Unit::Temperature(u) => u.aliases(),
        }
    }

    pub fn matches(&self, input: &str) -> bool {
        match *self {
            Unit::Length(u) => u.matches(input),
            Unit::Weight(u) => u.matches(input),
            Unit::Temperature(u) => u.matches(input),
        }
    }

    /// Resolve a unit name within one category
    pub fn parse_in(category: Category, input: &str) -> Result<Unit, ConversionError> {
        match category {
            Category::Length => LengthUnit::parse(input).map(Unit::Length),
            Category::Weight => WeightUnit::parse(input).map(Unit::Weight),
            Category::Temperature => TemperatureUnit::parse(input).map(Unit::Temperature),
        }
    }

    /// Resolve a unit name in whichever category knows it
    pub fn parse_any(input: &str) -> Result<Unit, ConversionError> {
        Category::ALL
            .iter()
            .find_map(|&c| Unit::parse_in(c, input).ok())
            .ok_or_else(|| ConversionError::invalid_unit(input, None))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<LengthUnit> for Unit {
    fn from(u: LengthUnit) -> Self {
        Unit::Length(u)
    }
}

impl From<WeightUnit> for Unit {
    fn from(u: WeightUnit) -> Self {
        Unit::Weight(u)
    }
}

impl From<TemperatureUnit> for Unit {
    fn from(u: TemperatureUnit) -> Self {
        Unit::Temperature(u)
    }
}

// Serialized as the canonical label; names are unique across categories.
impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Unit::parse_any(&name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!(LengthUnit::parse("Meters").unwrap(), LengthUnit::Meters);
        assert_eq!(WeightUnit::parse("Ounces").unwrap(), WeightUnit::Ounces);
        assert_eq!(TemperatureUnit::parse("Kelvin").unwrap(), TemperatureUnit::Kelvin);
    }

    #[test]
    fn test_parse_symbols_and_aliases() {
        assert_eq!(LengthUnit::parse("ft").unwrap(), LengthUnit::Feet);
        assert_eq!(LengthUnit::parse("foot").unwrap(), LengthUnit::Feet);
        assert_eq!(LengthUnit::parse("metre").unwrap(), LengthUnit::Meters);
        assert_eq!(WeightUnit::parse("LBS").unwrap(), WeightUnit::Pounds);
        assert_eq!(TemperatureUnit::parse("°C").unwrap(), TemperatureUnit::Celsius);
        assert_eq!(TemperatureUnit::parse("degF").unwrap(), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::parse(" k ").unwrap(), TemperatureUnit::Kelvin);
    }

    #[test]
    fn test_parse_outside_category() {
        let err = LengthUnit::parse("Parsecs").unwrap_err();
        assert_eq!(
            err,
            ConversionError::InvalidUnit {
                unit: "Parsecs".to_string(),
                category: Some(Category::Length),
            }
        );

        // A weight unit is not a length unit
        assert!(LengthUnit::parse("Grams").is_err());
    }

    #[test]
    fn test_parse_in_category() {
        assert_eq!(
            Unit::parse_in(Category::Weight, "grams").unwrap(),
            Unit::Weight(WeightUnit::Grams)
        );
        assert!(Unit::parse_in(Category::Temperature, "Meters").is_err());
    }

    #[test]
    fn test_parse_any() {
        assert_eq!(Unit::parse_any("mi").unwrap(), Unit::Length(LengthUnit::Miles));
        assert_eq!(Unit::parse_any("mg").unwrap(), Unit::Weight(WeightUnit::Milligrams));
        assert_eq!(Unit::parse_any("F").unwrap(), Unit::Temperature(TemperatureUnit::Fahrenheit));

        let err = Unit::parse_any("furlong").unwrap_err();
        assert_eq!(err, ConversionError::InvalidUnit { unit: "furlong".to_string(), category: None });
    }

    #[test]
    fn test_spellings_are_unambiguous() {
        let all: Vec<Unit> = Category::ALL.iter().flat_map(|c| c.units()).collect();
        for unit in &all {
            let spellings = [unit.name(), unit.symbol()].into_iter().chain(unit.aliases().iter().copied());
            for spelling in spellings {
                let matching = all.iter().filter(|u| u.matches(spelling)).count();
                assert_eq!(matching, 1, "'{}' is ambiguous", spelling);
                assert_eq!(Unit::parse_any(spelling).unwrap(), *unit);
            }
        }
    }

    #[test]
    fn test_serde_as_name() {
        let json = serde_json::to_string(&Unit::Length(LengthUnit::Feet)).unwrap();
        assert_eq!(json, "\"Feet\"");

        let unit: Unit = serde_json::from_str("\"kg\"").unwrap();
        assert_eq!(unit, Unit::Weight(WeightUnit::Kilograms));

        assert!(serde_json::from_str::<Unit>("\"Parsecs\"").is_err());
    }
}
