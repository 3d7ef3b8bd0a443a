//! Format size estimation for BAM/CRAM and gzipped FASTQ
//!
//! Scales the per-record byte model by read count and applies compression
//! ratio scaling. Note that the CRAM estimate deliberately reuses the BAM byte
//! model as its baseline: the CRAM ratio compounds on top of the BAM-compressed
//! total rather than replacing it, so the two ratios are not orthogonal.

use std::str::FromStr;

use crate::{error::ParameterError, model::RecordSizeModel, Error, Result};

/// Output alignment format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceFormat {
    Bam,
    #[default]
    Cram,
}

impl FromStr for SequenceFormat {
    type Err = Error;

    /// Parses "BAM"/"CRAM" case-insensitively, failing fast on anything else
    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("bam") {
            Ok(Self::Bam)
        } else if s.eq_ignore_ascii_case("cram") {
            Ok(Self::Cram)
        } else {
            Err(ParameterError::UnknownFormat(s.to_string()).into())
        }
    }
}

/// Parameters fully determining an alignment file size estimate
///
/// No hidden state; a fresh value is constructed per call. The unsigned count
/// and length fields make negative inputs unrepresentable, and [`Self::validate`]
/// rejects non-finite or out-of-range fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationParameters {
    /// Number of sequencing reads
    pub read_count: u64,
    /// Read length in bases
    pub read_length: u32,
    /// Fraction of the uncompressed size retained by BAM block compression
    pub bam_compression_ratio: f64,
    /// Additional fraction retained when re-encoding the BAM baseline as CRAM
    pub cram_compression_ratio: f64,
    /// Proportion of reads with supplementary alignments
    pub supplementary_alignment_fraction: f64,
    /// Proportion of reads that are mapped
    pub mapped_fraction: f64,
    pub output_format: SequenceFormat,
}

impl Default for EstimationParameters {
    /// Reference defaults: 150 bp reads, 0.15 BAM ratio, 0.30 CRAM ratio,
    /// 10% supplementary alignments, 90% mapped, CRAM output
    fn default() -> Self {
        Self {
            read_count: 0,
            read_length: 150,
            bam_compression_ratio: 0.15,
            cram_compression_ratio: 0.30,
            supplementary_alignment_fraction: 0.1,
            mapped_fraction: 0.9,
            output_format: SequenceFormat::Cram,
        }
    }
}

impl EstimationParameters {
    /// Rejects non-finite values and fractions outside [0, 1]
    pub fn validate(&self) -> Result<()> {
        check_fraction("bam_compression_ratio", self.bam_compression_ratio)?;
        check_fraction("cram_compression_ratio", self.cram_compression_ratio)?;
        check_fraction(
            "supplementary_alignment_fraction",
            self.supplementary_alignment_fraction,
        )?;
        check_fraction("mapped_fraction", self.mapped_fraction)?;
        Ok(())
    }
}

pub(crate) fn check_fraction(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ParameterError::NonFiniteValue { name, value }.into());
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ParameterError::FractionOutOfRange { name, value }.into());
    }
    Ok(())
}

/// Estimates the disk usage in bytes of a BAM or CRAM file under the reference
/// record model
pub fn estimate_alignment_size(params: &EstimationParameters) -> Result<f64> {
    estimate_alignment_size_with(&RecordSizeModel::default(), params)
}

/// Estimates the disk usage in bytes of a BAM or CRAM file under a caller-supplied
/// record model
///
/// # Arguments
/// * `model` - The per-record byte model to scale
/// * `params` - Validated estimation parameters
pub fn estimate_alignment_size_with(
    model: &RecordSizeModel,
    params: &EstimationParameters,
) -> Result<f64> {
    params.validate()?;
    let bytes_per_record = model.bytes_per_record(
        params.read_length,
        params.supplementary_alignment_fraction,
        params.mapped_fraction,
    );
    let uncompressed = params.read_count as f64 * bytes_per_record;
    log::debug!("total bytes before compression: {uncompressed}");

    let mut total = uncompressed * params.bam_compression_ratio;
    if params.output_format == SequenceFormat::Cram {
        // CRAM compounds on the BAM-compressed total, see module docs
        total *= params.cram_compression_ratio;
    }
    Ok(total)
}

/// Parameters for a gzipped FASTQ size estimate
#[derive(Debug, Clone, PartialEq)]
pub struct FastqParameters {
    /// Number of sequencing fragments (read pairs when `paired_end`)
    pub read_count: u64,
    /// Read length in bases
    pub read_length: u32,
    /// Fraction of the raw text retained by gzip (~0.22-0.28 for Illumina data)
    pub gzip_compression_ratio: f64,
    /// When true both R1 and R2 reads are counted
    pub paired_end: bool,
    /// Length of the read name without the '@' marker or newline
    pub read_name_length: u32,
}

impl Default for FastqParameters {
    fn default() -> Self {
        Self {
            read_count: 0,
            read_length: 150,
            gzip_compression_ratio: 0.25,
            paired_end: true,
            read_name_length: 20,
        }
    }
}

/// Estimates the size in bytes of a .fastq.gz file
///
/// Each record is four newline-terminated lines: `@name`, sequence, `+`
/// separator, and quality string. Paired-end fragments double the per-record
/// cost before the gzip ratio is applied.
pub fn estimate_fastq_gz_size(params: &FastqParameters) -> Result<f64> {
    check_fraction("gzip_compression_ratio", params.gzip_compression_ratio)?;

    let read_name = f64::from(params.read_name_length + 2);
    let sequence = f64::from(params.read_length + 1);
    let separator = 2.0;
    let qualities = f64::from(params.read_length + 1);

    let mut bytes_per_read = read_name + sequence + separator + qualities;
    if params.paired_end {
        bytes_per_read *= 2.0;
    }
    Ok(params.read_count as f64 * bytes_per_read * params.gzip_compression_ratio)
}
