//! Distribution-shape classification from skewness and excess kurtosis.
//!
//! Zero is matched with strict equality, so `Symmetrical` and `Mesokurtic`
//! only appear for exactly-zero moments. NaN moments map to `Undefined`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of asymmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkewType {
    RightSkewed,
    LeftSkewed,
    Symmetrical,
    Undefined,
}

impl SkewType {
    pub fn classify(skewness: f64) -> Self {
        if skewness.is_nan() {
            Self::Undefined
        } else if skewness > 0.0 {
            Self::RightSkewed
        } else if skewness < 0.0 {
            Self::LeftSkewed
        } else {
            Self::Symmetrical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::RightSkewed => "right-skewed",
            Self::LeftSkewed => "left-skewed",
            Self::Symmetrical => "symmetrical",
            Self::Undefined => "of undetermined skewness",
        }
    }
}

impl fmt::Display for SkewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tail weight relative to a normal distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KurtosisType {
    Leptokurtic,
    Platykurtic,
    Mesokurtic,
    Undefined,
}

impl KurtosisType {
    pub fn classify(excess_kurtosis: f64) -> Self {
        if excess_kurtosis.is_nan() {
            Self::Undefined
        } else if excess_kurtosis > 0.0 {
            Self::Leptokurtic
        } else if excess_kurtosis < 0.0 {
            Self::Platykurtic
        } else {
            Self::Mesokurtic
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Leptokurtic => "leptokurtic",
            Self::Platykurtic => "platykurtic",
            Self::Mesokurtic => "mesokurtic",
            Self::Undefined => "of undetermined kurtosis",
        }
    }
}

impl fmt::Display for KurtosisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
