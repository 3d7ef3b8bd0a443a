//! Empirical validation of the size model against recorded production files
//!
//! The tables in this module are literal measurements transcribed from real
//! sequencing runs. They are read-only calibration references: validation
//! augments them with model estimates and percent errors but never mutates
//! them, and there is no runtime path that loads or extends them.

use crate::{
    estimate::{estimate_alignment_size, EstimationParameters, SequenceFormat},
    Result,
};

/// One whole-file BAM measurement from a production run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneralRun {
    pub read_count: u64,
    pub observed_bam_bytes: u64,
}

/// Whole-file BAM sizes observed across a mix of aligners and coverage depths
pub static BAM_GENERAL: [GeneralRun; 14] = [
    GeneralRun { read_count: 3_304_516, observed_bam_bytes: 239_632_788 },
    GeneralRun { read_count: 10_284_134, observed_bam_bytes: 438_080_161 },
    GeneralRun { read_count: 50_551_116, observed_bam_bytes: 4_139_626_530 },
    GeneralRun { read_count: 60_292_328, observed_bam_bytes: 2_586_823_327 },
    GeneralRun { read_count: 21_788_775, observed_bam_bytes: 1_372_362_482 },
    GeneralRun { read_count: 30_045_748, observed_bam_bytes: 1_439_041_065 },
    GeneralRun { read_count: 41_548_108, observed_bam_bytes: 2_063_002_832 },
    GeneralRun { read_count: 81_733_568, observed_bam_bytes: 6_104_473_583 },
    GeneralRun { read_count: 90_138_072, observed_bam_bytes: 4_901_347_290 },
    GeneralRun { read_count: 101_986_098, observed_bam_bytes: 5_172_584_762 },
    GeneralRun { read_count: 416_933_762, observed_bam_bytes: 19_409_991_666 },
    GeneralRun { read_count: 203_123_083, observed_bam_bytes: 9_739_363_867 },
    GeneralRun { read_count: 534_581_555, observed_bam_bytes: 24_229_748_449 },
    GeneralRun { read_count: 759_919_233, observed_bam_bytes: 33_961_314_345 },
];

/// One DRAGEN run with both BAM and CRAM outputs recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragenRun {
    pub read_count: u64,
    pub observed_bam_bytes: u64,
    pub observed_cram_bytes: u64,
}

/// Paired BAM/CRAM sizes from DRAGEN runs of the same samples
pub static DRAGEN_RUNS: [DragenRun; 2] = [
    DragenRun {
        read_count: 47_180_752,
        observed_bam_bytes: 3_070_230_528,
        observed_cram_bytes: 850_032_308,
    },
    DragenRun {
        read_count: 68_253_170,
        observed_bam_bytes: 5_098_183_639,
        observed_cram_bytes: 1_587_728_161,
    },
];

/// One controlled measurement from a BAM truncated to a known read count
///
/// The `body_*` fields exclude the file header so the per-record figures are
/// clean; the observed ratio and per-record size columns were derived at
/// recording time and are kept for reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncrementalRun {
    pub read_count: u64,
    pub compressed_bytes_with_header: u64,
    pub uncompressed_bytes_with_header: u64,
    pub body_bytes_uncompressed: u64,
    pub body_bytes_compressed: u64,
    pub observed_bam_ratio: f64,
    pub bytes_per_record_uncompressed: f64,
}

/// Size measurements of one BAM truncated to increasing read counts
pub static INCREMENTAL_RUNS: [IncrementalRun; 15] = [
    IncrementalRun { read_count: 1, compressed_bytes_with_header: 8980, uncompressed_bytes_with_header: 30730, body_bytes_uncompressed: 472, body_bytes_compressed: 294, observed_bam_ratio: 0.622_881_356, bytes_per_record_uncompressed: 472.0 },
    IncrementalRun { read_count: 2, compressed_bytes_with_header: 9078, uncompressed_bytes_with_header: 31167, body_bytes_uncompressed: 909, body_bytes_compressed: 392, observed_bam_ratio: 0.431_243_124, bytes_per_record_uncompressed: 454.5 },
    IncrementalRun { read_count: 3, compressed_bytes_with_header: 9238, uncompressed_bytes_with_header: 31610, body_bytes_uncompressed: 1352, body_bytes_compressed: 552, observed_bam_ratio: 0.408_284_024, bytes_per_record_uncompressed: 450.666_666_7 },
    IncrementalRun { read_count: 4, compressed_bytes_with_header: 9344, uncompressed_bytes_with_header: 32014, body_bytes_uncompressed: 1756, body_bytes_compressed: 658, observed_bam_ratio: 0.374_715_262, bytes_per_record_uncompressed: 439.0 },
    IncrementalRun { read_count: 5, compressed_bytes_with_header: 9459, uncompressed_bytes_with_header: 32454, body_bytes_uncompressed: 2196, body_bytes_compressed: 773, observed_bam_ratio: 0.352_003_643, bytes_per_record_uncompressed: 439.2 },
    IncrementalRun { read_count: 6, compressed_bytes_with_header: 9549, uncompressed_bytes_with_header: 32894, body_bytes_uncompressed: 2636, body_bytes_compressed: 863, observed_bam_ratio: 0.327_389_985, bytes_per_record_uncompressed: 439.333_333_3 },
    IncrementalRun { read_count: 7, compressed_bytes_with_header: 9639, uncompressed_bytes_with_header: 33240, body_bytes_uncompressed: 2982, body_bytes_compressed: 953, observed_bam_ratio: 0.319_584_172, bytes_per_record_uncompressed: 426.0 },
    IncrementalRun { read_count: 8, compressed_bytes_with_header: 9709, uncompressed_bytes_with_header: 33503, body_bytes_uncompressed: 3245, body_bytes_compressed: 1023, observed_bam_ratio: 0.315_254_237, bytes_per_record_uncompressed: 405.625 },
    IncrementalRun { read_count: 9, compressed_bytes_with_header: 9783, uncompressed_bytes_with_header: 33794, body_bytes_uncompressed: 3536, body_bytes_compressed: 1097, observed_bam_ratio: 0.310_237_557, bytes_per_record_uncompressed: 392.888_888_9 },
    IncrementalRun { read_count: 10, compressed_bytes_with_header: 9854, uncompressed_bytes_with_header: 34172, body_bytes_uncompressed: 3914, body_bytes_compressed: 1168, observed_bam_ratio: 0.298_415_943, bytes_per_record_uncompressed: 391.4 },
    IncrementalRun { read_count: 1000, compressed_bytes_with_header: 76291, uncompressed_bytes_with_header: 422_976, body_bytes_uncompressed: 392_718, body_bytes_compressed: 67605, observed_bam_ratio: 0.180_367_208, bytes_per_record_uncompressed: 392.718 },
    IncrementalRun { read_count: 10000, compressed_bytes_with_header: 523_786, uncompressed_bytes_with_header: 4_027_023, body_bytes_uncompressed: 3_996_765, body_bytes_compressed: 515_100, observed_bam_ratio: 0.130_067_794, bytes_per_record_uncompressed: 399.676_5 },
    IncrementalRun { read_count: 100_000, compressed_bytes_with_header: 5_820_096, uncompressed_bytes_with_header: 39_467_020, body_bytes_uncompressed: 39_436_762, body_bytes_compressed: 5_811_410, observed_bam_ratio: 0.147_467_328, bytes_per_record_uncompressed: 394.367_62 },
    IncrementalRun { read_count: 1_000_000, compressed_bytes_with_header: 58_970_360, uncompressed_bytes_with_header: 396_008_673, body_bytes_uncompressed: 395_978_415, body_bytes_compressed: 58_961_674, observed_bam_ratio: 0.148_911_789, bytes_per_record_uncompressed: 395.978_415 },
    IncrementalRun { read_count: 10_000_000, compressed_bytes_with_header: 593_287_407, uncompressed_bytes_with_header: 3_962_777_317, body_bytes_uncompressed: 3_962_747_059, body_bytes_compressed: 593_278_721, observed_bam_ratio: 0.149_715_051, bytes_per_record_uncompressed: 396.274_705_9 },
];

/// Model estimates and percent errors for one recorded measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRow {
    pub read_count: u64,
    pub estimated_bam_bytes: f64,
    pub estimated_cram_bytes: f64,
    /// `None` when no BAM size was observed or the observation is zero
    pub bam_percent_error: Option<f64>,
    /// `None` when no CRAM size was observed or the observation is zero
    pub cram_percent_error: Option<f64>,
}

/// Percent difference of an estimate from an observation, undefined at zero
fn percent_error(estimated: f64, observed: u64) -> Option<f64> {
    if observed == 0 {
        return None;
    }
    let observed = observed as f64;
    Some(100.0 * (estimated - observed) / observed)
}

/// BAM and CRAM estimates for a read count, holding all other parameters at
/// the reference defaults
fn estimates_at_reference(read_count: u64) -> Result<(f64, f64)> {
    let bam = estimate_alignment_size(&EstimationParameters {
        read_count,
        output_format: SequenceFormat::Bam,
        ..EstimationParameters::default()
    })?;
    let cram = estimate_alignment_size(&EstimationParameters {
        read_count,
        output_format: SequenceFormat::Cram,
        ..EstimationParameters::default()
    })?;
    Ok((bam, cram))
}

/// Validates the model against whole-file BAM observations
pub fn validate_general(runs: &[GeneralRun]) -> Result<Vec<ValidationRow>> {
    runs.iter()
        .map(|run| {
            let (bam, cram) = estimates_at_reference(run.read_count)?;
            Ok(ValidationRow {
                read_count: run.read_count,
                estimated_bam_bytes: bam,
                estimated_cram_bytes: cram,
                bam_percent_error: percent_error(bam, run.observed_bam_bytes),
                cram_percent_error: None,
            })
        })
        .collect()
}

/// Validates the model against paired BAM/CRAM observations
pub fn validate_dragen(runs: &[DragenRun]) -> Result<Vec<ValidationRow>> {
    runs.iter()
        .map(|run| {
            let (bam, cram) = estimates_at_reference(run.read_count)?;
            Ok(ValidationRow {
                read_count: run.read_count,
                estimated_bam_bytes: bam,
                estimated_cram_bytes: cram,
                bam_percent_error: percent_error(bam, run.observed_bam_bytes),
                cram_percent_error: percent_error(cram, run.observed_cram_bytes),
            })
        })
        .collect()
}

/// Mean absolute percent error over a set of validation results, skipping
/// rows where the error is undefined
pub fn mean_absolute_percent_error<I>(errors: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let defined: Vec<f64> = errors.into_iter().flatten().collect();
    if defined.is_empty() {
        return None;
    }
    Some(defined.iter().map(|e| e.abs()).sum::<f64>() / defined.len() as f64)
}

/// Least-squares (through the origin) uncompressed bytes per record implied by
/// the incremental measurements
pub fn fitted_bytes_per_record(runs: &[IncrementalRun]) -> Option<f64> {
    fit_through_origin(
        runs.iter()
            .map(|r| (r.read_count as f64, r.body_bytes_uncompressed as f64)),
    )
}

/// Least-squares (through the origin) BAM compression ratio implied by the
/// incremental measurements
pub fn fitted_bam_ratio(runs: &[IncrementalRun]) -> Option<f64> {
    fit_through_origin(runs.iter().map(|r| {
        (
            r.body_bytes_uncompressed as f64,
            r.body_bytes_compressed as f64,
        )
    }))
}

/// Slope of the least-squares line through the origin: sum(xy) / sum(x^2)
fn fit_through_origin<I>(points: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (mut xy, mut xx) = (0.0, 0.0);
    for (x, y) in points {
        xy += x * y;
        xx += x * x;
    }
    if xx == 0.0 {
        return None;
    }
    Some(xy / xx)
}

#[cfg(test)]
mod testing {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_tables_are_populated_and_ordered() {
        assert!(!BAM_GENERAL.is_empty());
        assert!(!DRAGEN_RUNS.is_empty());
        assert!(INCREMENTAL_RUNS
            .windows(2)
            .all(|w| w[0].read_count < w[1].read_count));
    }

    #[test]
    fn test_general_validation_has_finite_errors() -> Result<()> {
        let rows = validate_general(&BAM_GENERAL)?;
        assert_eq!(rows.len(), BAM_GENERAL.len());
        for row in &rows {
            let error = row.bam_percent_error.expect("observed sizes are non-zero");
            assert!(error.is_finite());
            assert!(row.cram_percent_error.is_none());
        }
        Ok(())
    }

    #[test]
    fn test_dragen_validation_covers_both_formats() -> Result<()> {
        let rows = validate_dragen(&DRAGEN_RUNS)?;
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert!(row.bam_percent_error.is_some());
            assert!(row.cram_percent_error.is_some());
            assert!(row.estimated_cram_bytes <= row.estimated_bam_bytes);
        }
        Ok(())
    }

    #[test]
    fn test_percent_error_undefined_at_zero() {
        assert!(percent_error(100.0, 0).is_none());
        let error = percent_error(110.0, 100).expect("non-zero observation");
        assert!((error - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_absolute_percent_error() {
        let mape = mean_absolute_percent_error([Some(10.0), Some(-20.0), None])
            .expect("two defined errors");
        assert!((mape - 15.0).abs() < 1e-9);
        assert!(mean_absolute_percent_error([None, None]).is_none());
    }

    #[test]
    fn test_fitted_bytes_per_record_matches_observations() {
        // the large runs settle around 396 uncompressed bytes per record
        let fitted = fitted_bytes_per_record(&INCREMENTAL_RUNS).expect("non-empty table");
        assert!(fitted > 390.0 && fitted < 400.0);
    }

    #[test]
    fn test_fitted_bam_ratio_matches_observations() {
        let fitted = fitted_bam_ratio(&INCREMENTAL_RUNS).expect("non-empty table");
        assert!(fitted > 0.14 && fitted < 0.16);
    }

    #[test]
    fn test_validation_does_not_mutate_tables() -> Result<()> {
        let before = BAM_GENERAL;
        validate_general(&BAM_GENERAL)?;
        assert_eq!(before, BAM_GENERAL);
        Ok(())
    }
}
