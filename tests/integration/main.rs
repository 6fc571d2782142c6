//! Integration tests for fixbam.
//!
//! These run the `fixbam` binary end to end on BAM files generated by the helpers.

mod helpers;
mod test_fix_mates_command;
