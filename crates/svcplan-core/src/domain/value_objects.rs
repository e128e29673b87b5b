//! Domain value objects: ServiceId, Phase, Price, ProcessCategory.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Their
//! constructors enforce the catalog schema so that a `Service` holding them
//! is valid by construction. Engines can therefore read them without any
//! further checks.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

// ── ServiceId ────────────────────────────────────────────────────────────────

/// Unique identifier of a catalog service.
///
/// Invariant: non-empty, no whitespace. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceId(String);

impl ServiceId {
    /// Fallible constructor; trims surrounding whitespace first.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = raw.as_ref();
        let id = raw.trim();

        if id.is_empty() {
            return Err(DomainError::InvalidServiceId {
                id: raw.to_string(),
                reason: "id is empty".into(),
            });
        }
        if id.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidServiceId {
                id: raw.to_string(),
                reason: "id contains whitespace".into(),
            });
        }

        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ServiceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ServiceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServiceId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ServiceId> for String {
    fn from(id: ServiceId) -> Self {
        id.0
    }
}

impl FromStr for ServiceId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Phase ────────────────────────────────────────────────────────────────────

/// Coarse-grained project stage a service belongs to. Always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Phase(u32);

impl Phase {
    pub const ANALYSIS: Phase = Phase(1);
    pub const DESIGN: Phase = Phase(2);
    pub const IMPLEMENTATION: Phase = Phase(3);
    pub const TESTING: Phase = Phase(4);
    pub const GO_LIVE: Phase = Phase(5);

    /// Returns `None` for phase 0.
    pub const fn new(value: u32) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Human-readable stage name.
    pub fn label(self) -> String {
        match self.0 {
            1 => "Analysis".into(),
            2 => "Design".into(),
            3 => "Implementation".into(),
            4 => "Testing".into(),
            5 => "Go-Live".into(),
            n => format!("Phase {n}"),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Price ────────────────────────────────────────────────────────────────────

/// Non-negative, finite monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub const ZERO: Price = Price(0.0);

    /// Returns `None` for negative, NaN or infinite amounts.
    pub fn new(amount: f64) -> Option<Self> {
        (amount.is_finite() && amount >= 0.0).then_some(Self(amount))
    }

    pub const fn amount(self) -> f64 {
        self.0
    }

    /// Total order over prices. Every constructed price is finite, so this
    /// agrees with the numeric order.
    pub fn cmp_amount(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Self) -> Self::Output {
        Price(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// ── ProcessCategory ──────────────────────────────────────────────────────────

/// Role of a service in a transformation journey.
///
/// Variant order is the display order used by the category grouping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProcessCategory {
    Ideate,
    Innovate,
    Operate,
}

impl ProcessCategory {
    pub const DISPLAY_ORDER: [ProcessCategory; 3] = [Self::Ideate, Self::Innovate, Self::Operate];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ideate => "ideate",
            Self::Innovate => "innovate",
            Self::Operate => "operate",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ideate => "Ideate",
            Self::Innovate => "Innovate",
            Self::Operate => "Operate",
        }
    }
}

impl fmt::Display for ProcessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ideate" => Ok(Self::Ideate),
            "innovate" => Ok(Self::Innovate),
            "operate" => Ok(Self::Operate),
            other => Err(DomainError::UnknownProcessCategory(other.to_string())),
        }
    }
}
