use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use time::{Date, Month, PrimitiveDateTime, Time};

use crate::error::ValidationError;
use crate::Exchange;

/// Ticker layout: underlying letters, 2-digit day, 3-letter month, 2-digit
/// year, numeric strike (decimal point allowed), CE/PE suffix.
static OPTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]+)(\d{2})([A-Z]{3})(\d{2})([\d.]+)(CE|PE)").expect("pattern compiles")
});

/// Option side: call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionSide {
    CE,
    PE,
}

impl OptionSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CE => "CE",
            Self::PE => "PE",
        }
    }

    pub const fn is_call(self) -> bool {
        matches!(self, Self::CE)
    }
}

impl Display for OptionSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded option ticker.
///
/// The expiry is an exchange wall-clock timestamp (IST); the 2-digit year is
/// always read as 2000+YY.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSymbol {
    pub underlying: String,
    pub expiry: PrimitiveDateTime,
    pub strike: f64,
    pub side: OptionSide,
}

impl OptionSymbol {
    /// Parse a composite option ticker such as `NIFTY28NOV2424000CE` or
    /// `USDINR28NOV2483.50CE`.
    ///
    /// The expiry time is taken from `expiry_time` ("HH:MM", validated)
    /// when supplied, otherwise from the exchange's segment default.
    /// Pure function of its inputs.
    pub fn parse(
        ticker: &str,
        exchange: Exchange,
        expiry_time: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let normalized = ticker.trim().to_ascii_uppercase();
        let captures =
            OPTION_PATTERN
                .captures(&normalized)
                .ok_or_else(|| ValidationError::InvalidOptionSymbol {
                    value: ticker.to_owned(),
                })?;

        let underlying = captures[1].to_owned();
        let day = captures[2]
            .parse::<u8>()
            .map_err(|_| ValidationError::InvalidOptionSymbol {
                value: ticker.to_owned(),
            })?;
        let month = month_from_code(&captures[3]).ok_or_else(|| ValidationError::InvalidMonth {
            value: captures[3].to_owned(),
        })?;
        let year = 2000
            + captures[4]
                .parse::<i32>()
                .map_err(|_| ValidationError::InvalidOptionSymbol {
                    value: ticker.to_owned(),
                })?;
        let strike = captures[5]
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidStrike {
                value: captures[5].to_owned(),
            })?;
        let side = if &captures[6] == "CE" {
            OptionSide::CE
        } else {
            OptionSide::PE
        };

        let expiry_clock = match expiry_time {
            Some(raw) => parse_expiry_override(raw)?,
            None => exchange.default_expiry_time(),
        };

        let expiry_date = Date::from_calendar_date(year, month, day).map_err(|_| {
            ValidationError::InvalidExpiryDate {
                value: normalized.clone(),
            }
        })?;

        Ok(Self {
            underlying,
            expiry: PrimitiveDateTime::new(expiry_date, expiry_clock),
            strike,
            side,
        })
    }
}

/// Validate a caller-supplied "HH:MM" expiry-time override.
fn parse_expiry_override(raw: &str) -> Result<Time, ValidationError> {
    let mut parts = raw.split(':');
    let (Some(hour_part), Some(minute_part), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ValidationError::InvalidExpiryTimeFormat {
            value: raw.to_owned(),
        });
    };

    let hour = hour_part
        .trim()
        .parse::<u8>()
        .map_err(|_| ValidationError::InvalidExpiryTimeFormat {
            value: raw.to_owned(),
        })?;
    let minute =
        minute_part
            .trim()
            .parse::<u8>()
            .map_err(|_| ValidationError::InvalidExpiryTimeFormat {
                value: raw.to_owned(),
            })?;

    if hour > 23 || minute > 59 {
        return Err(ValidationError::ExpiryTimeOutOfRange {
            value: raw.to_owned(),
        });
    }

    Ok(Time::from_hms(hour, minute, 0).expect("range checked above"))
}

fn month_from_code(code: &str) -> Option<Month> {
    match code {
        "JAN" => Some(Month::January),
        "FEB" => Some(Month::February),
        "MAR" => Some(Month::March),
        "APR" => Some(Month::April),
        "MAY" => Some(Month::May),
        "JUN" => Some(Month::June),
        "JUL" => Some(Month::July),
        "AUG" => Some(Month::August),
        "SEP" => Some(Month::September),
        "OCT" => Some(Month::October),
        "NOV" => Some(Month::November),
        "DEC" => Some(Month::December),
        _ => None,
    }
}
