//! # seqstore
//!
//! Storage size and cost estimation for genomic sequencing data.
//!
//! This crate estimates the disk usage of BAM/CRAM alignment files and gzipped
//! FASTQ from a handful of run parameters (read count, read length, compression
//! ratios, mapping rate) and projects the resulting cloud storage cost over a
//! multi-month horizon. Everything is a pure in-memory computation: there is no
//! file I/O, no parsing of real sequencing data, and no state retained between
//! calls.
//!
//! The flow mirrors the modules: a per-record byte model ([`RecordSizeModel`])
//! feeds the format estimators ([`estimate_alignment_size`],
//! [`estimate_fastq_gz_size`]), whose byte totals feed the cost projector
//! ([`monthly_storage_cost`], [`CostProjection`]). Unit conversions and the
//! empirical calibration tables are independent utilities on the side.

mod calibration;
mod cost;
mod error;
mod estimate;
mod model;
mod units;

pub use calibration::{
    fitted_bam_ratio, fitted_bytes_per_record, mean_absolute_percent_error, validate_dragen,
    validate_general, DragenRun, GeneralRun, IncrementalRun, ValidationRow, BAM_GENERAL,
    DRAGEN_RUNS, INCREMENTAL_RUNS,
};
pub use cost::{monthly_storage_cost, CostPoint, CostProjection};
pub use error::{Error, ParameterError, Result};
pub use estimate::{
    estimate_alignment_size, estimate_alignment_size_with, estimate_fastq_gz_size,
    EstimationParameters, FastqParameters, SequenceFormat,
};
pub use model::{
    estimate_bytes_per_record, AuxTagGroup, CigarOpClass, FieldSpec, RecordSizeModel,
    BAM_FIXED_FIELDS, DEFAULT_AUX_TAGS, DEFAULT_CIGAR_MIX, INTEGER_TAG_BYTES, READ_NAME_BYTES,
    SA_TAG_BYTES, STRING_TAG_BYTES,
};
pub use units::{bases_in_unit, bases_to_reads, bytes_to_human, reads_to_bases, BaseUnit};

#[cfg(test)]
mod testing {
    use super::*;
    use anyhow::Result;
    use std::str::FromStr;

    #[test]
    fn test_parameters_to_projection() -> Result<()> {
        // a 30x human genome worth of 150 bp reads, stored as CRAM
        let params = EstimationParameters {
            read_count: 600_000_000,
            ..EstimationParameters::default()
        };
        let bytes = estimate_alignment_size(&params)?;
        assert!(bytes > 0.0);

        let monthly = monthly_storage_cost(bytes, 0.023)?;
        let projection = CostProjection::project_years(monthly, 5)?;
        assert_eq!(projection.points.len(), 60);
        assert!((projection.total() - monthly * 60.0).abs() < 1e-6);

        // display values the front end derives from the same inputs
        let human = bytes_to_human(bytes)?;
        assert!(human.ends_with("GB"));
        let bases = reads_to_bases(params.read_count, params.read_length)?;
        assert_eq!(bases, 90_000_000_000);
        Ok(())
    }

    #[test]
    fn test_format_string_round_trip() -> Result<()> {
        let params = EstimationParameters {
            read_count: 1_000_000,
            output_format: SequenceFormat::from_str("BAM")?,
            ..EstimationParameters::default()
        };
        let bam = estimate_alignment_size(&params)?;
        let cram = estimate_alignment_size(&EstimationParameters {
            output_format: SequenceFormat::from_str("CRAM")?,
            ..params.clone()
        })?;
        assert!((cram - bam * 0.30).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_fastq_cost_can_join_alignment_cost() -> Result<()> {
        let alignment = estimate_alignment_size(&EstimationParameters {
            read_count: 1_000_000,
            ..EstimationParameters::default()
        })?;
        let fastq = estimate_fastq_gz_size(&FastqParameters {
            read_count: 1_000_000,
            ..FastqParameters::default()
        })?;
        let combined = monthly_storage_cost(alignment + fastq, 0.023)?;
        let separate =
            monthly_storage_cost(alignment, 0.023)? + monthly_storage_cost(fastq, 0.023)?;
        assert!((combined - separate).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_calibration_summary_is_reportable() -> Result<()> {
        let rows = validate_general(&BAM_GENERAL)?;
        let mape = mean_absolute_percent_error(rows.iter().map(|r| r.bam_percent_error))
            .expect("table has non-zero observations");
        assert!(mape.is_finite());
        Ok(())
    }
}
