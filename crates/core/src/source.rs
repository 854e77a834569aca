//! Re-openable input sources.
//!
//! The pipeline reads its input twice: once to count frequencies and once to
//! encode. Nothing is cached in memory between the passes, so a source must be
//! able to hand out a fresh reader positioned at the start every time.

use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Size of the buffer each pass reads into.
const READ_BUFFER_SIZE: usize = 4096;

/// A provider of identical byte content for each pass over the input.
pub trait ByteSource {
    /// Reader positioned at the first byte of the input.
    type Reader: Read;

    /// Open a new independent reader over the input.
    fn open(&self) -> io::Result<Self::Reader>;
}

/// Input backed by a file on disk, reopened for every pass.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileSource {
    type Reader = BufReader<File>;

    fn open(&self) -> io::Result<Self::Reader> {
        Ok(BufReader::new(File::open(&self.path)?))
    }
}

impl<'a> ByteSource for &'a [u8] {
    type Reader = &'a [u8];

    fn open(&self) -> io::Result<Self::Reader> {
        Ok(*self)
    }
}

/// Feed `reader` to `f` in buffer-sized chunks until end of stream.
/// Returns the number of bytes read.
pub(crate) fn read_chunks<R: Read>(
    mut reader: R,
    mut f: impl FnMut(&[u8]) -> Result<()>,
) -> Result<u64> {
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        f(&buffer[..n])?;
        total += n as u64;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_slice_source_reopens_from_start() {
        let data: &[u8] = b"abc";
        let mut first = Vec::new();
        data.open().unwrap().read_to_end(&mut first).unwrap();
        let mut second = Vec::new();
        data.open().unwrap().read_to_end(&mut second).unwrap();

        assert_eq!(first, b"abc");
        assert_eq!(first, second);
    }

    #[test]
    fn test_file_source_reopens_from_start() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();
        file.flush().unwrap();

        let source = FileSource::new(file.path());
        for _ in 0..2 {
            let mut buf = String::new();
            source.open().unwrap().read_to_string(&mut buf).unwrap();
            assert_eq!(buf, "hello");
        }
    }

    #[test]
    fn test_read_chunks_covers_whole_stream() {
        let data = vec![7u8; READ_BUFFER_SIZE * 2 + 10];
        let mut chunks = 0;
        let mut seen = 0usize;
        let total = read_chunks(&data[..], |chunk| {
            chunks += 1;
            seen += chunk.len();
            Ok(())
        })
        .unwrap();

        assert_eq!(total, data.len() as u64);
        assert_eq!(seen, data.len());
        assert!(chunks >= 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("does-not-exist"));
        let err = source.open().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
