//! Scalar - tagged numeric declarations.
//!
//! Every size, offset, padding and gap of a [`Space`](crate::engine::Space) is a
//! [`Scalar`]: a number plus a [`ScalarKind`] saying what the number is
//! relative to. Resolution is pure and total:
//!
//! | Kind               | `compute(parent, opposite)`        |
//! |--------------------|------------------------------------|
//! | `Absolute`         | `value`                            |
//! | `Relative`         | `value * parent`                   |
//! | `OppositeRelative` | `value * opposite`                 |
//! | `SmallerRelative`  | `value * min(parent, opposite)`    |
//! | `LargerRelative`   | `value * max(parent, opposite)`    |
//! | `Auto`, `Fraction` | `parent`                           |
//!
//! On a sizing axis the solver never asks an `Auto` scalar (the size comes
//! from children) and resolves main-axis `Fraction` scalars by weight.
//!
//! # Grammar
//!
//! ```
//! use spark_spaces::scalar::{Scalar, ScalarKind};
//!
//! let half: Scalar = "50%".parse().unwrap();
//! assert_eq!(half, Scalar::relative(0.5));
//!
//! let share: Scalar = "2fr".parse().unwrap();
//! assert_eq!(share.kind, ScalarKind::Fraction);
//! assert_eq!(share.to_string(), "2fr");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::types::Sides;

// =============================================================================
// ScalarKind
// =============================================================================

/// What a scalar's value is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalarKind {
    /// Computed from children (sizes) or placed by alignment (detached offsets).
    Auto,
    /// Plain units.
    #[default]
    Absolute,
    /// Fraction of the parent size on the same axis.
    Relative,
    /// Fraction of the parent size on the other axis.
    OppositeRelative,
    /// Fraction of the smaller parent axis.
    SmallerRelative,
    /// Fraction of the larger parent axis.
    LargerRelative,
    /// Weighted share of the space left over on the main axis.
    Fraction,
}

impl ScalarKind {
    /// Canonical unit suffix used by `Display`.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Absolute => "",
            Self::Relative => "rel",
            Self::OppositeRelative => "opp",
            Self::SmallerRelative => "sm",
            Self::LargerRelative => "lg",
            Self::Fraction => "fr",
        }
    }

    /// Look up a unit suffix (lowercase). `%` is handled by the parser.
    fn from_unit(unit: &str) -> Option<Self> {
        match unit {
            "" | "px" => Some(Self::Absolute),
            "rel" => Some(Self::Relative),
            "opp" => Some(Self::OppositeRelative),
            "sm" => Some(Self::SmallerRelative),
            "lg" => Some(Self::LargerRelative),
            "fr" | "part" | "sh" => Some(Self::Fraction),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Absolute => "absolute",
            Self::Relative => "relative",
            Self::OppositeRelative => "opposite-relative",
            Self::SmallerRelative => "smaller-relative",
            Self::LargerRelative => "larger-relative",
            Self::Fraction => "fraction",
        })
    }
}

// =============================================================================
// Scalar
// =============================================================================

/// A tagged number. Value object: cheap to copy, no tree relationships.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scalar {
    pub value: f32,
    pub kind: ScalarKind,
}

impl Scalar {
    /// Absolute zero.
    pub const ZERO: Self = Self::absolute(0.0);

    /// Size from children.
    pub const AUTO: Self = Self::new(0.0, ScalarKind::Auto);

    /// A single share of the remaining space.
    pub const FILL: Self = Self::fraction(1.0);

    pub const fn new(value: f32, kind: ScalarKind) -> Self {
        Self { value, kind }
    }

    pub const fn absolute(value: f32) -> Self {
        Self::new(value, ScalarKind::Absolute)
    }

    pub const fn relative(value: f32) -> Self {
        Self::new(value, ScalarKind::Relative)
    }

    pub const fn opposite_relative(value: f32) -> Self {
        Self::new(value, ScalarKind::OppositeRelative)
    }

    pub const fn smaller_relative(value: f32) -> Self {
        Self::new(value, ScalarKind::SmallerRelative)
    }

    pub const fn larger_relative(value: f32) -> Self {
        Self::new(value, ScalarKind::LargerRelative)
    }

    pub const fn fraction(weight: f32) -> Self {
        Self::new(weight, ScalarKind::Fraction)
    }

    #[inline]
    pub const fn is_auto(&self) -> bool {
        matches!(self.kind, ScalarKind::Auto)
    }

    #[inline]
    pub const fn is_fraction(&self) -> bool {
        matches!(self.kind, ScalarKind::Fraction)
    }

    #[inline]
    pub const fn is_absolute(&self) -> bool {
        matches!(self.kind, ScalarKind::Absolute)
    }

    /// Resolve against the parent's size on this axis and on the other axis.
    #[inline]
    pub fn compute(&self, parent: f32, opposite: f32) -> f32 {
        match self.kind {
            ScalarKind::Absolute => self.value,
            ScalarKind::Relative => self.value * parent,
            ScalarKind::OppositeRelative => self.value * opposite,
            ScalarKind::SmallerRelative => self.value * parent.min(opposite),
            ScalarKind::LargerRelative => self.value * parent.max(opposite),
            ScalarKind::Auto | ScalarKind::Fraction => parent,
        }
    }

    /// Resolve as a length that has no meaning for `Auto` or `Fraction`.
    ///
    /// Used for padding, gaps, extra sizes and flow nudges: those two kinds
    /// contribute nothing.
    #[inline]
    pub fn compute_or_zero(&self, parent: f32, opposite: f32) -> f32 {
        match self.kind {
            ScalarKind::Auto | ScalarKind::Fraction => 0.0,
            _ => self.compute(parent, opposite),
        }
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Self::absolute(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::absolute(value as f32)
    }
}

impl FromStr for Scalar {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower == "auto" {
            return Ok(Self::AUTO);
        }

        // Plain number (also catches "nan" / "inf" spellings)
        if let Ok(value) = lower.parse::<f32>() {
            return finite(value, trimmed).map(Self::absolute);
        }

        // Split numeric prefix from unit suffix. No unit starts with 'e',
        // so exponents stay with the number.
        let split = lower
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e')))
            .unwrap_or(lower.len());
        let (number, unit) = lower.split_at(split);
        let number = number.trim();
        let unit = unit.trim();

        let value = number
            .parse::<f32>()
            .map_err(|_| ParseError::InvalidNumber(trimmed.to_string()))?;
        let value = finite(value, trimmed)?;

        if unit == "%" {
            return Ok(Self::relative(value / 100.0));
        }

        ScalarKind::from_unit(unit)
            .map(|kind| Self::new(value, kind))
            .ok_or_else(|| ParseError::UnknownUnit {
                input: trimmed.to_string(),
                unit: unit.to_string(),
            })
    }
}

impl TryFrom<&str> for Scalar {
    type Error = ParseError;

    fn try_from(input: &str) -> Result<Self, Self::Error> {
        input.parse()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ScalarKind::Auto => f.write_str("auto"),
            kind => write!(f, "{}{}", self.value, kind.suffix()),
        }
    }
}

fn finite(value: f32, input: &str) -> Result<f32, ParseError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::NonFinite(input.to_string()))
    }
}

// =============================================================================
// Sides<Scalar> shorthand
// =============================================================================

impl From<Scalar> for Sides<Scalar> {
    fn from(value: Scalar) -> Self {
        Self::all(value)
    }
}

impl From<f32> for Sides<Scalar> {
    fn from(value: f32) -> Self {
        Self::all(Scalar::absolute(value))
    }
}

impl From<i32> for Sides<Scalar> {
    fn from(value: i32) -> Self {
        Self::all(Scalar::from(value))
    }
}

/// CSS-style shorthand: `"a"`, `"v h"`, `"t h b"`, `"t r b l"`.
impl FromStr for Sides<Scalar> {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let values = input
            .split_whitespace()
            .map(str::parse::<Scalar>)
            .collect::<Result<Vec<_>, _>>()?;

        match values.as_slice() {
            [all] => Ok(Self::all(*all)),
            [vertical, horizontal] => Ok(Self::symmetric(*horizontal, *vertical)),
            [top, horizontal, bottom] => Ok(Self::new(*top, *horizontal, *bottom, *horizontal)),
            [top, right, bottom, left] => Ok(Self::new(*top, *right, *bottom, *left)),
            _ => Err(ParseError::InvalidSides {
                input: input.trim().to_string(),
                count: values.len(),
            }),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
