//! Domain data structures for skips and the locations they are offered in.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Postcode the front-end queries when nothing else is configured.
pub const DEFAULT_POSTCODE: &str = "NR32";
/// Area the front-end queries when nothing else is configured.
pub const DEFAULT_AREA: &str = "Lowestoft";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
/// Identifier of a skip offer. The remote service may use numbers or strings.
pub enum SkipId {
    /// Numeric identifier.
    Number(i64),
    /// Textual identifier.
    Text(String),
}

impl fmt::Display for SkipId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipId::Number(number) => write!(formatter, "{number}"),
            SkipId::Text(text) => write!(formatter, "{text}"),
        }
    }
}

impl From<i64> for SkipId {
    fn from(number: i64) -> Self {
        SkipId::Number(number)
    }
}

impl From<&str> for SkipId {
    fn from(text: &str) -> Self {
        SkipId::Text(text.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A skip offer as returned by the remote service.
///
/// Records are read-only once fetched; unknown fields in the payload are ignored.
pub struct Skip {
    /// Unique identifier, used as list and selection key.
    pub id: SkipId,
    /// Capacity in cubic yards.
    pub size: u32,
    /// Area the offer applies to.
    pub area: String,
    /// Postcode the offer applies to.
    pub postcode: String,
    /// Base price in whole currency units.
    pub price_before_vat: f64,
    /// VAT percentage applied on top of the base price.
    pub vat: f64,
    /// Number of days included in the hire.
    pub hire_period_days: u32,
    /// Whether the skip may be placed on a public road.
    pub allowed_on_road: bool,
    /// Whether heavy waste (soil, rubble, ...) is accepted.
    pub allows_heavy_waste: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Postcode/area pair used to query skip offers.
pub struct Location {
    /// Postcode, e.g. `NR32`.
    pub postcode: String,
    /// Area or town name, e.g. `Lowestoft`.
    pub area: String,
}

impl Location {
    /// Construct a new location.
    #[must_use]
    pub fn new<P: Into<String>, A: Into<String>>(postcode: P, area: A) -> Self {
        Self {
            postcode: postcode.into(),
            area: area.into(),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(DEFAULT_POSTCODE, DEFAULT_AREA)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}, {}", self.postcode, self.area)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A record that breaks one of the expectations the front-end has about skips.
pub enum InvariantViolation {
    /// Capacity of zero cubic yards.
    ZeroSize(SkipId),
    /// Base price below zero.
    NegativePrice(SkipId),
    /// VAT percentage below zero.
    NegativeVat(SkipId),
    /// Hire period of zero days.
    ZeroHirePeriod(SkipId),
    /// The same id appears more than once in a list.
    DuplicateId(SkipId),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::ZeroSize(id) => write!(formatter, "skip {id} has size 0"),
            InvariantViolation::NegativePrice(id) => {
                write!(formatter, "skip {id} has a negative price")
            }
            InvariantViolation::NegativeVat(id) => write!(formatter, "skip {id} has negative VAT"),
            InvariantViolation::ZeroHirePeriod(id) => {
                write!(formatter, "skip {id} has a hire period of 0 days")
            }
            InvariantViolation::DuplicateId(id) => write!(formatter, "skip id {id} is duplicated"),
        }
    }
}

/// Report every invariant the given list breaks, in list order.
///
/// The list itself is never touched; callers decide what to do with the report.
#[must_use]
pub fn check_skips(skips: &[Skip]) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut seen = HashSet::new();

    for skip in skips {
        if skip.size == 0 {
            violations.push(InvariantViolation::ZeroSize(skip.id.clone()));
        }
        if skip.price_before_vat < 0.0 {
            violations.push(InvariantViolation::NegativePrice(skip.id.clone()));
        }
        if skip.vat < 0.0 {
            violations.push(InvariantViolation::NegativeVat(skip.id.clone()));
        }
        if skip.hire_period_days == 0 {
            violations.push(InvariantViolation::ZeroHirePeriod(skip.id.clone()));
        }
        if !seen.insert(&skip.id) {
            violations.push(InvariantViolation::DuplicateId(skip.id.clone()));
        }
    }

    violations
}
