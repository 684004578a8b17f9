use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Time;

use crate::error::ValidationError;

/// Platform-neutral exchange/segment codes.
///
/// `NSE_INDEX`/`BSE_INDEX` are pseudo-exchanges for index instruments; they
/// resolve to the corresponding cash segment on the vendor side but skip the
/// instrument-token lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Exchange {
    #[serde(rename = "NSE")]
    Nse,
    #[serde(rename = "BSE")]
    Bse,
    #[serde(rename = "NFO")]
    Nfo,
    #[serde(rename = "BFO")]
    Bfo,
    #[serde(rename = "CDS")]
    Cds,
    #[serde(rename = "MCX")]
    Mcx,
    #[serde(rename = "NSE_INDEX")]
    NseIndex,
    #[serde(rename = "BSE_INDEX")]
    BseIndex,
}

impl Exchange {
    pub const ALL: [Self; 8] = [
        Self::Nse,
        Self::Bse,
        Self::Nfo,
        Self::Bfo,
        Self::Cds,
        Self::Mcx,
        Self::NseIndex,
        Self::BseIndex,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nse => "NSE",
            Self::Bse => "BSE",
            Self::Nfo => "NFO",
            Self::Bfo => "BFO",
            Self::Cds => "CDS",
            Self::Mcx => "MCX",
            Self::NseIndex => "NSE_INDEX",
            Self::BseIndex => "BSE_INDEX",
        }
    }

    pub const fn is_index(self) -> bool {
        matches!(self, Self::NseIndex | Self::BseIndex)
    }

    /// Vendor exchange-segment code used in quote queries.
    pub const fn vendor_segment(self) -> &'static str {
        match self {
            Self::Nse | Self::NseIndex => "nse_cm",
            Self::Bse | Self::BseIndex => "bse_cm",
            Self::Nfo => "nse_fo",
            Self::Bfo => "bse_fo",
            Self::Cds => "cde_fo",
            Self::Mcx => "mcx_fo",
        }
    }

    /// Contract expiry wall-clock time when no override is supplied.
    ///
    /// Commodities settle at 23:30, currency derivatives at 12:30, everything
    /// else at the 15:30 equity close.
    pub fn default_expiry_time(self) -> Time {
        let (hour, minute) = match self {
            Self::Mcx => (23, 30),
            Self::Cds => (12, 30),
            _ => (15, 30),
        };
        Time::from_hms(hour, minute, 0).expect("default expiry times are valid")
    }
}

impl Display for Exchange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "NSE" => Ok(Self::Nse),
            "BSE" => Ok(Self::Bse),
            "NFO" => Ok(Self::Nfo),
            "BFO" => Ok(Self::Bfo),
            "CDS" => Ok(Self::Cds),
            "MCX" => Ok(Self::Mcx),
            "NSE_INDEX" => Ok(Self::NseIndex),
            "BSE_INDEX" => Ok(Self::BseIndex),
            other => Err(ValidationError::UnknownExchange {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exchange_codes_case_insensitively() {
        assert_eq!(Exchange::from_str("nfo").expect("parses"), Exchange::Nfo);
        assert_eq!(
            Exchange::from_str(" NSE_INDEX ").expect("parses"),
            Exchange::NseIndex
        );
    }

    #[test]
    fn rejects_unknown_exchange() {
        let err = Exchange::from_str("NYSE").expect_err("must fail");
        assert!(matches!(err, ValidationError::UnknownExchange { .. }));
    }

    #[test]
    fn index_exchanges_share_cash_segments() {
        assert_eq!(Exchange::NseIndex.vendor_segment(), "nse_cm");
        assert_eq!(Exchange::BseIndex.vendor_segment(), "bse_cm");
        assert!(Exchange::NseIndex.is_index());
        assert!(!Exchange::Nfo.is_index());
    }

    #[test]
    fn default_expiry_times_follow_segment() {
        assert_eq!(
            Exchange::Mcx.default_expiry_time(),
            Time::from_hms(23, 30, 0).expect("valid")
        );
        assert_eq!(
            Exchange::Cds.default_expiry_time(),
            Time::from_hms(12, 30, 0).expect("valid")
        );
        assert_eq!(
            Exchange::Nfo.default_expiry_time(),
            Time::from_hms(15, 30, 0).expect("valid")
        );
    }
}
