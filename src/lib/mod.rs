#![deny(unsafe_code)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value,
    clippy::items_after_statements,
    clippy::module_name_repetitions
)]

//! # fixbam - mate information repair for name-grouped BAM files
//!
//! Some upstream tools leave paired-end BAM records whose mate position and template length no
//! longer describe their actual mate. This library re-pairs read 1 and read 2 records within
//! each read-name group by position and rewrites the read 2 mate fields from its read 1.
//!
//! ## Overview
//!
//! ### Core Functionality
//!
//! - **[`record`]** - The [`record::MateRecord`] view of an alignment record
//! - **[`grouper`]** - Lazy grouping of a record stream into fragments
//! - **[`matcher`]** - Position-based mate matching within a fragment
//! - **[`fixer`]** - Stream driver writing repaired pairs to a sink
//!
//! ### Utilities
//!
//! - **[`bam_io`]** - BAM reader/writer construction
//! - **[`header`]** - @PG record chaining
//! - **[`sam`]** - Header inspection and a record builder for tests
//! - **[`validation`]** - Parameter and file checks
//! - **[`progress`]**, **[`logging`]** - Progress reports and formatted summaries
//! - **[`metrics`]** - Run metrics and TSV output
//! - **[`errors`]** - The library error type
//!
//! ## Quick Start
//!
//! ```no_run
//! use fixbam_lib::bam_io::{create_bam_reader, create_bam_writer};
//! use fixbam_lib::fixer::{BamRecordSink, MateFixer};
//! use fixbam_lib::grouper::FragmentGroupIterator;
//! use fixbam_lib::matcher::MateMatcher;
//!
//! # fn main() -> anyhow::Result<()> {
//! let (mut reader, header) = create_bam_reader("input.bam", 1)?;
//! let mut writer = create_bam_writer("output.bam", &header, 1, 1)?;
//!
//! let records = reader.record_bufs(&header).map(|r| r.map_err(Into::into));
//! let mut fixer = MateFixer::new(MateMatcher::default());
//! fixer.run(FragmentGroupIterator::new(records), &mut BamRecordSink::new(&mut writer, &header))?;
//!
//! writer.into_inner().finish()?;
//! # Ok(())
//! # }
//! ```

pub mod bam_io;
pub mod errors;
pub mod fixer;
pub mod grouper;
pub mod header;
pub mod logging;
pub mod matcher;
pub mod metrics;
pub mod progress;
pub mod record;
pub mod sam;
pub mod validation;
