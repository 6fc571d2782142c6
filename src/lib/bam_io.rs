//! BAM file I/O utilities.
//!
//! Readers and writers wrap either a single-threaded or a multi-threaded BGZF stream behind one
//! type so callers only choose a thread count.
//!
//! - **Single-threaded**: `threads=1` (lower overhead, good for small files)
//! - **Multi-threaded**: `threads>1` (higher throughput when (de)compression is the bottleneck)

use anyhow::{Context, Result};
use noodles::sam::Header;
use noodles_bgzf::io::{
    MultithreadedReader, MultithreadedWriter, Reader as BgzfReader, Writer as BgzfWriter,
    multithreaded_writer, writer,
};
use std::fs::File;
use std::io::{self, BufRead, Read, Write};
use std::num::NonZero;
use std::path::Path;

/// Enum wrapping single-threaded and multi-threaded BGZF readers.
pub enum BgzfReaderEnum {
    /// Single-threaded BGZF reader
    SingleThreaded(BgzfReader<File>),
    /// Multi-threaded BGZF reader
    MultiThreaded(MultithreadedReader<File>),
}

impl Read for BgzfReaderEnum {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            BgzfReaderEnum::SingleThreaded(r) => r.read(buf),
            BgzfReaderEnum::MultiThreaded(r) => r.read(buf),
        }
    }
}

impl BufRead for BgzfReaderEnum {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            BgzfReaderEnum::SingleThreaded(r) => r.fill_buf(),
            BgzfReaderEnum::MultiThreaded(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            BgzfReaderEnum::SingleThreaded(r) => r.consume(amt),
            BgzfReaderEnum::MultiThreaded(r) => r.consume(amt),
        }
    }
}

/// BAM reader over either BGZF reader flavour.
pub type BamReaderAuto = noodles::bam::io::Reader<BgzfReaderEnum>;

/// Enum wrapping single-threaded and multi-threaded BGZF writers
pub enum BgzfWriterEnum {
    /// Single-threaded BGZF writer
    SingleThreaded(BgzfWriter<File>),
    /// Multi-threaded BGZF writer
    MultiThreaded(MultithreadedWriter<File>),
}

impl Write for BgzfWriterEnum {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            BgzfWriterEnum::SingleThreaded(w) => w.write(buf),
            BgzfWriterEnum::MultiThreaded(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            BgzfWriterEnum::SingleThreaded(w) => w.flush(),
            BgzfWriterEnum::MultiThreaded(w) => w.flush(),
        }
    }
}

impl BgzfWriterEnum {
    /// Flushes all pending blocks and writes the BGZF EOF marker.
    ///
    /// # Errors
    /// Returns an error if flushing or finalizing the writer fails.
    pub fn finish(self) -> io::Result<()> {
        match self {
            BgzfWriterEnum::SingleThreaded(w) => {
                w.finish()?;
                Ok(())
            }
            BgzfWriterEnum::MultiThreaded(mut w) => {
                w.finish()?;
                Ok(())
            }
        }
    }
}

/// BAM writer over either BGZF writer flavour.
pub type BamWriter = noodles::bam::io::Writer<BgzfWriterEnum>;

/// Opens a BAM file and reads its header.
///
/// # Errors
/// Returns an error if the file cannot be opened or the header cannot be read.
///
/// # Example
/// ```no_run
/// use fixbam_lib::bam_io::create_bam_reader;
///
/// let (mut reader, header) = create_bam_reader("input.bam", 1).unwrap();
/// for result in reader.record_bufs(&header) {
///     let record = result.unwrap();
/// }
/// ```
pub fn create_bam_reader<P: AsRef<Path>>(
    path: P,
    threads: usize,
) -> Result<(BamReaderAuto, Header)> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .with_context(|| format!("Failed to open input BAM: {}", path_ref.display()))?;

    let bgzf_reader = match NonZero::new(threads) {
        Some(worker_count) if threads > 1 => {
            BgzfReaderEnum::MultiThreaded(MultithreadedReader::with_worker_count(worker_count, file))
        }
        _ => BgzfReaderEnum::SingleThreaded(BgzfReader::new(file)),
    };

    let mut reader = noodles::bam::io::Reader::from(bgzf_reader);
    let header = reader
        .read_header()
        .with_context(|| format!("Failed to read header from: {}", path_ref.display()))?;

    Ok((reader, header))
}

/// Creates a BAM file and writes `header` to it.
///
/// `compression_level` is a BGZF level (1-12); values outside that range fall back to the
/// library default.
///
/// # Errors
/// Returns an error if the file cannot be created or the header cannot be written.
///
/// # Example
/// ```no_run
/// use fixbam_lib::bam_io::create_bam_writer;
/// use noodles::sam::Header;
///
/// let header = Header::default();
/// let writer = create_bam_writer("output.bam", &header, 4, 1).unwrap();
/// writer.into_inner().finish().unwrap();
/// ```
pub fn create_bam_writer<P: AsRef<Path>>(
    path: P,
    header: &Header,
    threads: usize,
    compression_level: u32,
) -> Result<BamWriter> {
    let path_ref = path.as_ref();
    let output_file = File::create(path_ref)
        .with_context(|| format!("Failed to create output BAM: {}", path_ref.display()))?;

    #[allow(clippy::cast_possible_truncation)]
    let level = u8::try_from(compression_level).ok().and_then(writer::CompressionLevel::new);

    let bgzf_writer = match NonZero::new(threads) {
        Some(worker_count) if threads > 1 => {
            let mut builder =
                multithreaded_writer::Builder::default().set_worker_count(worker_count);
            if let Some(level) = level {
                builder = builder.set_compression_level(level);
            }
            BgzfWriterEnum::MultiThreaded(builder.build_from_writer(output_file))
        }
        _ => {
            let mut builder = writer::Builder::default();
            if let Some(level) = level {
                builder = builder.set_compression_level(level);
            }
            BgzfWriterEnum::SingleThreaded(builder.build_from_writer(output_file))
        }
    };

    let mut writer = noodles::bam::io::Writer::from(bgzf_writer);
    writer
        .write_header(header)
        .with_context(|| format!("Failed to write header to: {}", path_ref.display()))?;
    Ok(writer)
}
