use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a donation recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    #[default]
    OneTime,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Wire name, also used in thank-you messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::OneTime => "one-time",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Suffix appended to the submit label.
    pub fn label_suffix(&self) -> &'static str {
        match self {
            Frequency::OneTime => "",
            Frequency::Monthly => "/month",
            Frequency::Yearly => "/year",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "one-time" | "onetime" | "once" => Ok(Frequency::OneTime),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" | "annual" => Ok(Frequency::Yearly),
            other => Err(format!("unknown donation frequency '{other}'")),
        }
    }
}

/// Formats an amount the way the donation form shows it: `$50`, `$12.5`, `$0`.
pub fn format_dollars(amount: Decimal) -> String {
    format!("${}", amount.normalize())
}
