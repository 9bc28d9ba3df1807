//! Fixed-point token amounts.
//!
//! An [`Asset`] is an integer number of the smallest units of a [`Symbol`].
//! The text form always carries exactly `precision` fractional digits:
//! `"1.000 VIZ"`, `"0.500000 SHARES"`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, WireError};
use crate::wire::{WireDecode, WireDecoder, WireEncode, WireEncoder};

/// Width of the zero-padded symbol name in the binary form.
pub const SYMBOL_NAME_LEN: usize = 7;

/// Largest precision whose scale factor fits in an i64.
const MAX_PARSE_PRECISION: u8 = 18;

/// The unit an [`Asset`] is denominated in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// The liquid token, 3 decimal places.
    Viz,
    /// Vesting shares, 6 decimal places. The chain ticker is `SHARES`.
    Vests,
    /// Any other ticker with an explicit precision.
    Custom { name: String, precision: u8 },
}

impl Symbol {
    pub const VIZ_NAME: &'static str = "VIZ";
    pub const VESTS_NAME: &'static str = "SHARES";

    /// Resolve a ticker and precision, preferring the well-known symbols.
    pub fn from_parts(name: &str, precision: u8) -> Self {
        match (name, precision) {
            (Self::VIZ_NAME, 3) => Symbol::Viz,
            (Self::VESTS_NAME, 6) => Symbol::Vests,
            _ => Symbol::Custom {
                name: name.to_string(),
                precision,
            },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Viz => Self::VIZ_NAME,
            Symbol::Vests => Self::VESTS_NAME,
            Symbol::Custom { name, .. } => name,
        }
    }

    pub fn precision(&self) -> u8 {
        match self {
            Symbol::Viz => 3,
            Symbol::Vests => 6,
            Symbol::Custom { precision, .. } => *precision,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed-point amount of some [`Symbol`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    /// Build from a raw amount of smallest units.
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    pub fn viz(amount: i64) -> Self {
        Self::new(amount, Symbol::Viz)
    }

    pub fn vests(amount: i64) -> Self {
        Self::new(amount, Symbol::Vests)
    }

    /// Build from a decimal value, rounding to the nearest unit.
    pub fn from_f64(value: f64, symbol: Symbol) -> Result<Self, CoreError> {
        let scaled = (value * 10f64.powi(i32::from(symbol.precision()))).round();
        if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled > i64::MAX as f64 {
            return Err(CoreError::InvalidAsset(format!(
                "{value} is out of range for {symbol}"
            )));
        }
        Ok(Self::new(scaled as i64, symbol))
    }

    /// Raw amount in smallest units.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn precision(&self) -> u8 {
        self.symbol.precision()
    }

    /// Approximate decimal value (amount / 10^precision).
    pub fn to_f64(&self) -> f64 {
        self.amount as f64 / 10f64.powi(i32::from(self.precision()))
    }

    /// Add two amounts of the same symbol.
    pub fn checked_add(&self, other: &Asset) -> Option<Asset> {
        if self.symbol != other.symbol {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Asset::new(amount, self.symbol.clone()))
    }

    /// Canonical text form, e.g. `"50.000 VIZ"`.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = usize::from(self.precision());
        let digits = self.amount.unsigned_abs().to_string();
        // Left-pad so there is always at least one integer digit.
        let padded = format!("{digits:0>width$}", width = precision + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - precision);
        let sign = if self.amount < 0 { "-" } else { "" };
        if precision == 0 {
            write!(f, "{sign}{int_part} {}", self.symbol)
        } else {
            write!(f, "{sign}{int_part}.{frac_part} {}", self.symbol)
        }
    }
}

impl FromStr for Asset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |why: &str| CoreError::InvalidAsset(format!("{s:?}: {why}"));

        let mut parts = s.split_whitespace();
        let (number, ticker) = match (parts.next(), parts.next(), parts.next()) {
            (Some(n), Some(t), None) => (n, t),
            _ => return Err(invalid("expected \"<amount> <SYMBOL>\"")),
        };

        let ticker_ok = ticker
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if ticker.is_empty() || !ticker_ok {
            return Err(invalid("symbol must be uppercase ascii"));
        }

        let (negative, unsigned) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (int_digits, frac_digits) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };
        if int_digits.is_empty()
            || !int_digits.bytes().all(|b| b.is_ascii_digit())
            || !frac_digits.bytes().all(|b| b.is_ascii_digit())
            || (unsigned.contains('.') && frac_digits.is_empty())
        {
            return Err(invalid("malformed amount"));
        }

        let precision =
            u8::try_from(frac_digits.len()).map_err(|_| invalid("too many decimal places"))?;
        if precision > MAX_PARSE_PRECISION {
            return Err(invalid("too many decimal places"));
        }

        let symbol = Symbol::from_parts(ticker, precision);
        let expected = match ticker {
            Symbol::VIZ_NAME => Some(3),
            Symbol::VESTS_NAME => Some(6),
            _ => None,
        };
        if let Some(expected) = expected {
            if expected != precision {
                return Err(invalid(&format!("{ticker} requires {expected} decimal places")));
            }
        }

        let overflow = || invalid("amount out of range");
        let scale = 10i64.checked_pow(u32::from(precision)).ok_or_else(overflow)?;
        let int_value: i64 = int_digits.parse().map_err(|_| overflow())?;
        let frac_value: i64 = if frac_digits.is_empty() {
            0
        } else {
            frac_digits.parse().map_err(|_| overflow())?
        };
        let magnitude = int_value
            .checked_mul(scale)
            .and_then(|v| v.checked_add(frac_value))
            .ok_or_else(overflow)?;

        Ok(Asset::new(if negative { -magnitude } else { magnitude }, symbol))
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl WireEncode for Asset {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        let name = self.symbol.name().as_bytes();
        if name.len() > SYMBOL_NAME_LEN {
            return Err(WireError::SymbolTooLong(self.symbol.name().to_string()));
        }
        enc.put_i64(self.amount);
        enc.put_u8(self.precision());
        let mut field = [0u8; SYMBOL_NAME_LEN];
        field[..name.len()].copy_from_slice(name);
        enc.put_raw(&field);
        Ok(())
    }
}

impl WireDecode for Asset {
    fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
        let amount = dec.get_i64()?;
        let precision = dec.get_u8()?;
        let field: [u8; SYMBOL_NAME_LEN] = dec.get_array()?;
        let end = field.iter().position(|&b| b == 0).unwrap_or(SYMBOL_NAME_LEN);
        if field[end..].iter().any(|&b| b != 0) {
            return Err(WireError::InvalidValue("symbol padding is not zero".into()));
        }
        let name = std::str::from_utf8(&field[..end])
            .map_err(|_| WireError::InvalidValue("symbol is not ascii".into()))?;
        if name.is_empty() {
            return Err(WireError::InvalidValue("empty asset symbol".into()));
        }
        Ok(Asset::new(amount, Symbol::from_parts(name, precision)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{from_wire_bytes, to_wire_bytes};

    #[test]
    fn test_parse_viz() {
        let asset: Asset = "50.000 VIZ".parse().unwrap();
        assert_eq!(asset.amount(), 50_000);
        assert_eq!(asset.precision(), 3);
        assert_eq!(asset.symbol(), &Symbol::Viz);
        assert_eq!(asset.description(), "50.000 VIZ");
    }

    #[test]
    fn test_parse_custom_symbol() {
        let asset: Asset = "1.5 CUSTOM".parse().unwrap();
        assert_eq!(asset.amount(), 15);
        assert_eq!(asset.precision(), 1);
        assert_eq!(asset.symbol().name(), "CUSTOM");
        assert_eq!(asset.to_string(), "1.5 CUSTOM");
    }

    #[test]
    fn test_description_keeps_trailing_zeros() {
        for text in [
            "0.000 VIZ",
            "0.001 VIZ",
            "1.100 VIZ",
            "123456.000000 SHARES",
            "-0.500 VIZ",
            "42 TOKEN",
            "0.00 ABC",
        ] {
            let asset: Asset = text.parse().unwrap();
            assert_eq!(asset.description(), text);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "1.000", "VIZ", "1.0.0 VIZ", "1. VIZ", ".5 VIZ", "1.00 VIZ", "1.000 viz", "x.000 VIZ"] {
            assert!(text.parse::<Asset>().is_err(), "{text:?} should fail");
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!("9223372036854775.808 VIZ".parse::<Asset>().is_err());
        assert!("9223372036854775.807 VIZ".parse::<Asset>().is_ok());
    }

    #[test]
    fn test_from_f64_rounds() {
        let asset = Asset::from_f64(1.0625, Symbol::Viz).unwrap();
        assert_eq!(asset.amount(), 1063);
        let asset = Asset::from_f64(2.5, Symbol::Vests).unwrap();
        assert_eq!(asset.to_string(), "2.500000 SHARES");
        assert!(Asset::from_f64(f64::INFINITY, Symbol::Viz).is_err());
    }

    #[test]
    fn test_binary_layout() {
        let bytes = to_wire_bytes(&Asset::viz(1000)).unwrap();
        assert_eq!(
            bytes,
            vec![0xe8, 0x03, 0, 0, 0, 0, 0, 0, 3, b'V', b'I', b'Z', 0, 0, 0, 0]
        );
        assert_eq!(from_wire_bytes::<Asset>(&bytes).unwrap(), Asset::viz(1000));
    }

    #[test]
    fn test_long_symbol_is_rejected_by_encoder() {
        let asset = Asset::new(1, Symbol::Custom { name: "TOOLONGX".into(), precision: 0 });
        assert_eq!(
            to_wire_bytes(&asset),
            Err(WireError::SymbolTooLong("TOOLONGX".into()))
        );
    }

    #[test]
    fn test_json_is_string() {
        let json = serde_json::to_string(&Asset::vests(1)).unwrap();
        assert_eq!(json, "\"0.000001 SHARES\"");
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Asset::vests(1));
    }

    #[test]
    fn test_checked_add_requires_same_symbol() {
        assert_eq!(Asset::viz(1).checked_add(&Asset::viz(2)), Some(Asset::viz(3)));
        assert_eq!(Asset::viz(1).checked_add(&Asset::vests(2)), None);
    }
}
