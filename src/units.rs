//! Conversions between bytes, bases, and reads

use std::str::FromStr;

use crate::{error::ParameterError, Error, Result};

/// Size suffixes in increasing order of magnitude
const BYTE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Converts a byte size to a human-readable string with a two-decimal value
/// and a unit suffix
///
/// Divides by 1024 until the value drops below 1024, stopping at PB even if
/// the value still exceeds 1024. Negative input fails.
pub fn bytes_to_human(byte_size: f64) -> Result<String> {
    if !byte_size.is_finite() {
        return Err(ParameterError::NonFiniteValue {
            name: "byte_size",
            value: byte_size,
        }
        .into());
    }
    if byte_size < 0.0 {
        return Err(ParameterError::NegativeByteSize(byte_size).into());
    }

    let mut size = byte_size;
    let mut index = 0;
    while size >= 1024.0 && index < BYTE_UNITS.len() - 1 {
        size /= 1024.0;
        index += 1;
    }
    Ok(format!("{size:.2} {}", BYTE_UNITS[index]))
}

/// Total bases covered by `read_count` reads of length `read_length`
pub fn reads_to_bases(read_count: u64, read_length: u32) -> Result<u64> {
    if read_length == 0 {
        return Err(ParameterError::NonPositiveReadLength.into());
    }
    Ok(read_count * u64::from(read_length))
}

/// Number of whole reads of length `read_length` covering `base_count` bases
pub fn bases_to_reads(base_count: u64, read_length: u32) -> Result<u64> {
    if read_length == 0 {
        return Err(ParameterError::NonPositiveReadLength.into());
    }
    Ok(base_count / u64::from(read_length))
}

/// Display units for base counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUnit {
    /// Base pairs
    Bp,
    /// Kilobases (1e3)
    Kb,
    /// Megabases (1e6)
    Mb,
    /// Gigabases (1e9)
    Gb,
}

impl BaseUnit {
    /// Bases per unit
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Bp => 1.0,
            Self::Kb => 1e3,
            Self::Mb => 1e6,
            Self::Gb => 1e9,
        }
    }
}

impl FromStr for BaseUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bp" => Ok(Self::Bp),
            "kb" => Ok(Self::Kb),
            "mb" => Ok(Self::Mb),
            "gb" => Ok(Self::Gb),
            _ => Err(ParameterError::UnknownBaseUnit(s.to_string()).into()),
        }
    }
}

/// Expresses a base count in the requested display unit
pub fn bases_in_unit(base_count: u64, unit: BaseUnit) -> f64 {
    base_count as f64 / unit.multiplier()
}

#[cfg(test)]
mod testing {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_bytes_to_human() -> Result<()> {
        assert_eq!(bytes_to_human(0.0)?, "0.00 B");
        assert_eq!(bytes_to_human(1023.0)?, "1023.00 B");
        assert_eq!(bytes_to_human(1536.0)?, "1.50 KB");
        assert_eq!(bytes_to_human(1024.0 * 1024.0)?, "1.00 MB");
        Ok(())
    }

    #[test]
    fn test_bytes_to_human_stops_at_pb() -> Result<()> {
        let two_k_pb = 2048.0 * 1024f64.powi(5);
        assert_eq!(bytes_to_human(two_k_pb)?, "2048.00 PB");
        Ok(())
    }

    #[test]
    fn test_bytes_to_human_rejects_negative() {
        assert!(bytes_to_human(-1.0).is_err());
        assert!(bytes_to_human(f64::NAN).is_err());
    }

    #[test]
    fn test_reads_bases_round_trip() -> Result<()> {
        let bases = 6_000_000_000u64;
        for read_length in [1u32, 36, 100, 150, 151, 300] {
            let reads = bases_to_reads(bases, read_length)?;
            let recovered = reads_to_bases(reads, read_length)?;
            assert!(bases - recovered < u64::from(read_length));
        }
        Ok(())
    }

    #[test]
    fn test_zero_read_length_fails() {
        assert!(reads_to_bases(100, 0).is_err());
        assert!(bases_to_reads(100, 0).is_err());
    }

    #[test]
    fn test_base_unit_parsing() -> Result<()> {
        assert_eq!(BaseUnit::from_str("bp")?, BaseUnit::Bp);
        assert_eq!(BaseUnit::from_str("Gb")?, BaseUnit::Gb);
        assert!(BaseUnit::from_str("Tb").is_err());
        Ok(())
    }

    #[test]
    fn test_bases_in_unit() {
        let value = bases_in_unit(6_000_000_000, BaseUnit::Gb);
        assert!((value - 6.0).abs() < 1e-9);
    }
}
