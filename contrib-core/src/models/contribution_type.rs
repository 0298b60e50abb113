use std::fmt;

use serde::{Deserialize, Serialize};

/// How a contribution is expressed on the wire and in the settings model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionType {
    /// Percentage of annual salary, spread across pay periods.
    Percent,
    /// Fixed amount withheld from every paycheck.
    Dollar,
}

impl ContributionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percent => "percent",
            Self::Dollar => "dollar",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percent" | "%" => Some(Self::Percent),
            "dollar" | "$" => Some(Self::Dollar),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Percent => "Percentage of salary",
            Self::Dollar => "Fixed amount per paycheck",
        }
    }
}

impl fmt::Display for ContributionType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
