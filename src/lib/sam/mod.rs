//! SAM/BAM header checks and record-building helpers.
//!
//! - [`is_query_grouped`] / [`check_query_grouping`] - inspect the `@HD` line to see whether
//!   the input claims to keep reads of one fragment together
//! - [`builder`] - fluent construction of [`RecordBuf`](noodles::sam::alignment::RecordBuf)s
//!   for tests and fixtures

pub mod builder;

pub use builder::RecordBuilder;

use log::warn;
use noodles::sam::Header;
use noodles::sam::header::record::value::map::header::sort_order::QUERY_NAME;
use std::path::Path;

/// Returns `true` if the header declares that records sharing a read name are adjacent.
///
/// That is the case for `SO:queryname` and for any sort order combined with `GO:query`.
///
/// # Examples
///
/// ```
/// use fixbam_lib::sam::is_query_grouped;
/// use noodles::sam::Header;
///
/// let header: Header = "@HD\tVN:1.6\tSO:queryname\n".parse().unwrap();
/// assert!(is_query_grouped(&header));
///
/// let header: Header = "@HD\tVN:1.6\tSO:coordinate\n".parse().unwrap();
/// assert!(!is_query_grouped(&header));
/// ```
#[must_use]
pub fn is_query_grouped(header: &Header) -> bool {
    let Some(hdr_map) = header.header() else {
        return false;
    };
    let other_fields = hdr_map.other_fields();

    let queryname_sorted =
        other_fields.get(b"SO").is_some_and(|so| <_ as AsRef<[u8]>>::as_ref(so) == QUERY_NAME);
    let query_grouped =
        other_fields.get(b"GO").is_some_and(|go| <_ as AsRef<[u8]>>::as_ref(go) == b"query");

    queryname_sorted || query_grouped
}

/// Logs a warning if the header does not declare read-name grouping.
///
/// Processing continues either way; fragments split across the file simply fail to pair.
pub fn check_query_grouping(header: &Header, path: &Path) {
    if !is_query_grouped(header) {
        warn!(
            "Input file {} does not appear to be queryname sorted or grouped per the SAM header.",
            path.display()
        );
        warn!("Continuing, but fragments whose records are not adjacent will not be re-paired.");
    }
}
