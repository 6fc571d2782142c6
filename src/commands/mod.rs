//! CLI command implementations for fixbam.
//!
//! - [`fix_mates`] - Repair mate information of paired reads in a name-grouped BAM

pub mod command;
pub mod common;
pub mod fix_mates;
