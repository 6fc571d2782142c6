//! Grouping of name-grouped alignment records into fragments.
//!
//! A [`FragmentGroup`] holds every record of one maximal run of consecutive records sharing a
//! read name. Within the group, read 1 and read 2 records are bucketed separately by the
//! reference they are aligned to, so that mate matching only scans candidates on the same
//! contig.
//!
//! [`FragmentGroupIterator`] turns a record stream into a lazy stream of groups. The input must
//! be queryname sorted or grouped; records of one fragment that are not adjacent end up in
//! separate groups unless contiguity checking is enabled, in which case it is an error.

use ahash::{AHashMap, AHashSet};
use anyhow::Result;

use crate::errors::FixBamError;
use crate::record::{EndDesignator, MateRecord};

/// Records bucketed by reference sequence id, iterated in first-seen order.
#[derive(Debug, Clone)]
pub struct ReferenceBuckets<R> {
    index: AHashMap<Option<usize>, usize>,
    buckets: Vec<(Option<usize>, Vec<R>)>,
}

impl<R> Default for ReferenceBuckets<R> {
    fn default() -> Self {
        Self { index: AHashMap::new(), buckets: Vec::new() }
    }
}

impl<R> ReferenceBuckets<R> {
    /// Creates an empty set of buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to the bucket for `reference_id`, creating the bucket if needed.
    pub fn push(&mut self, reference_id: Option<usize>, record: R) {
        let slot = *self.index.entry(reference_id).or_insert_with(|| {
            self.buckets.push((reference_id, Vec::new()));
            self.buckets.len() - 1
        });
        self.buckets[slot].1.push(record);
    }

    /// Returns the records aligned to `reference_id` in encounter order.
    #[must_use]
    pub fn get(&self, reference_id: Option<usize>) -> &[R] {
        self.index.get(&reference_id).map_or(&[][..], |&slot| self.buckets[slot].1.as_slice())
    }

    /// Removes and returns the records aligned to `reference_id`.
    ///
    /// The (now empty) bucket keeps its place in the iteration order.
    pub fn take(&mut self, reference_id: Option<usize>) -> Vec<R> {
        match self.index.get(&reference_id) {
            Some(&slot) => std::mem::take(&mut self.buckets[slot].1),
            None => Vec::new(),
        }
    }

    /// Iterates over `(reference_id, records)` in the order references were first seen.
    pub fn iter(&self) -> impl Iterator<Item = (Option<usize>, &[R])> {
        self.buckets.iter().map(|(id, records)| (*id, records.as_slice()))
    }

    /// Number of distinct references with at least one record pushed.
    #[must_use]
    pub fn reference_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of records across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, records)| records.len()).sum()
    }

    /// Returns `true` if no bucket holds a record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|(_, records)| records.is_empty())
    }
}

impl<R> IntoIterator for ReferenceBuckets<R> {
    type Item = (Option<usize>, Vec<R>);
    type IntoIter = std::vec::IntoIter<(Option<usize>, Vec<R>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

/// All records of one fragment, split by end and bucketed by reference.
#[derive(Debug, Clone)]
pub struct FragmentGroup<R> {
    /// The read name shared by every record in the group
    pub name: Vec<u8>,
    /// Read 1 records keyed by reference id
    pub firsts: ReferenceBuckets<R>,
    /// Read 2 records keyed by reference id
    pub seconds: ReferenceBuckets<R>,
}

impl<R: MateRecord> FragmentGroup<R> {
    /// Creates an empty group for the fragment `name`.
    #[must_use]
    pub fn new(name: Vec<u8>) -> Self {
        Self { name, firsts: ReferenceBuckets::new(), seconds: ReferenceBuckets::new() }
    }

    /// Adds a record to the read 1 or read 2 buckets according to its flags.
    ///
    /// The record's name is not checked against the group's name.
    ///
    /// # Errors
    ///
    /// Returns [`FixBamError::InvalidRecord`] if the record is neither read 1 nor read 2.
    pub fn push(&mut self, record: R) -> crate::errors::Result<()> {
        let reference_id = record.reference_id();
        match record.end_designator()? {
            EndDesignator::First => self.firsts.push(reference_id, record),
            EndDesignator::Second => self.seconds.push(reference_id, record),
        }
        Ok(())
    }

    /// Builds a group from records already known to share one name.
    ///
    /// # Errors
    ///
    /// Returns an error if any record is neither read 1 nor read 2.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
    {
        let mut records = records.into_iter().peekable();
        let name = records.peek().map(|r| r.fragment_id().to_vec()).unwrap_or_default();
        let mut group = Self::new(name);
        for record in records {
            group.push(record)?;
        }
        Ok(group)
    }

    /// Number of read 1 records in the group.
    #[must_use]
    pub fn first_count(&self) -> usize {
        self.firsts.len()
    }

    /// Number of read 2 records in the group.
    #[must_use]
    pub fn second_count(&self) -> usize {
        self.seconds.len()
    }
}

/// Lazily groups a stream of records into [`FragmentGroup`]s.
///
/// A group is closed as soon as a record with a different name arrives, and the final group is
/// produced at end of input. The iterator stops after the first error: an invalid record, a
/// non-contiguous fragment (when checking is enabled) or an error from the record source. When
/// the record that opens a new fragment is invalid, the group it closed is still produced
/// before the error.
///
/// # Examples
///
/// ```rust,ignore
/// let records = reader.record_bufs(&header).map(|r| r.map_err(Into::into));
/// for group in FragmentGroupIterator::new(records) {
///     let group = group?;
///     // match mates within the group
/// }
/// ```
pub struct FragmentGroupIterator<I, R>
where
    I: Iterator<Item = Result<R>>,
{
    records: I,
    current: Option<FragmentGroup<R>>,
    pending_error: Option<anyhow::Error>,
    closed_names: Option<AHashSet<Vec<u8>>>,
    done: bool,
}

impl<I, R> FragmentGroupIterator<I, R>
where
    I: Iterator<Item = Result<R>>,
    R: MateRecord,
{
    /// Creates a new iterator over the groups in `records`.
    pub fn new(records: I) -> Self {
        Self { records, current: None, pending_error: None, closed_names: None, done: false }
    }

    /// Fail when a fragment name reappears after its group was closed.
    ///
    /// Remembers every closed name, so memory grows with the number of fragments.
    #[must_use]
    pub fn with_contiguity_check(mut self, enabled: bool) -> Self {
        self.closed_names = enabled.then(AHashSet::new);
        self
    }

    /// Adds a record to the current group, opening a new group if there is none.
    fn accept(&mut self, record: R) -> Result<()> {
        if let Some(group) = self.current.as_mut() {
            group.push(record)?;
            return Ok(());
        }

        let name = record.fragment_id().to_vec();
        if let Some(closed) = &self.closed_names
            && closed.contains(&name)
        {
            return Err(FixBamError::FragmentNotContiguous {
                name: String::from_utf8_lossy(&name).into_owned(),
            }
            .into());
        }

        let mut group = FragmentGroup::new(name);
        group.push(record)?;
        self.current = Some(group);
        Ok(())
    }

    /// Takes the current group, remembering its name when contiguity is checked.
    fn close_current(&mut self) -> Option<FragmentGroup<R>> {
        let group = self.current.take()?;
        if let Some(closed) = self.closed_names.as_mut() {
            closed.insert(group.name.clone());
        }
        Some(group)
    }
}

impl<I, R> Iterator for FragmentGroupIterator<I, R>
where
    I: Iterator<Item = Result<R>>,
    R: MateRecord,
{
    type Item = Result<FragmentGroup<R>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(e) = self.pending_error.take() {
            self.done = true;
            return Some(Err(e));
        }

        loop {
            match self.records.next() {
                None => {
                    self.done = true;
                    return self.close_current().map(Ok);
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(record)) => {
                    let boundary = self
                        .current
                        .as_ref()
                        .is_some_and(|group| group.name.as_slice() != record.fragment_id());
                    let completed = if boundary { self.close_current() } else { None };

                    if let Err(e) = self.accept(record) {
                        return match completed {
                            Some(group) => {
                                self.pending_error = Some(e);
                                Some(Ok(group))
                            }
                            None => {
                                self.done = true;
                                Some(Err(e))
                            }
                        };
                    }

                    if let Some(group) = completed {
                        return Some(Ok(group));
                    }
                }
            }
        }
    }
}
