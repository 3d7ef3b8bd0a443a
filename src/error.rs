/// Custom Result type for seqstore operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the seqstore library, encompassing all possible error cases
/// that can occur during size and cost estimation.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// Errors raised when a caller-supplied parameter cannot be used
    ParameterError(#[from] ParameterError),
    /// Generic errors that can occur in any part of the system
    AnyhowError(#[from] anyhow::Error),
}

/// Errors raised when a caller-supplied parameter is out of range or unrecognized.
///
/// All estimation functions are pure; these are reported synchronously to the
/// immediate caller and never logged or swallowed by the core.
#[derive(thiserror::Error, Debug)]
pub enum ParameterError {
    /// A byte size was negative where only non-negative sizes make sense
    ///
    /// # Arguments
    /// * `f64` - The offending byte size
    #[error("Byte size cannot be negative: {0}")]
    NegativeByteSize(f64),

    /// A read length of zero was supplied where a division by read length occurs
    #[error("Read length must be a positive integer")]
    NonPositiveReadLength,

    /// A fraction-typed parameter fell outside the unit interval
    #[error("Parameter `{name}` must be within [0, 1], got: {value}")]
    FractionOutOfRange { name: &'static str, value: f64 },

    /// A floating-point parameter was NaN or infinite
    #[error("Parameter `{name}` must be finite, got: {value}")]
    NonFiniteValue { name: &'static str, value: f64 },

    /// The output format string was neither "BAM" nor "CRAM"
    ///
    /// # Arguments
    /// * `String` - The unrecognized format string
    #[error("Unrecognized output format: {0} (expected BAM or CRAM)")]
    UnknownFormat(String),

    /// The base-count unit string was not one of bp/Kb/Mb/Gb
    #[error("Unrecognized base unit: {0} (expected bp, Kb, Mb, or Gb)")]
    UnknownBaseUnit(String),

    /// A cost projection was requested over zero months
    #[error("Projection horizon must cover at least one month")]
    EmptyHorizon,

    /// A negative storage rate or monthly cost was supplied
    ///
    /// # Arguments
    /// * `f64` - The offending rate
    #[error("Storage cost rate cannot be negative: {0}")]
    NegativeCostRate(f64),
}
