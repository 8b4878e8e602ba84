//! Input stream handling: plain-text or gzip-compressed sources.
//!
//! Compression is detected by peeking at the gzip magic bytes rather than
//! trusting the file extension, so renamed or piped compressed streams
//! still decode. Format readers receive a `BufRead` and stay agnostic.

use flate2::bufread::GzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const BUFFER_SIZE: usize = 64 * 1024;

/// Open a file, transparently decoding gzip content.
pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    decompress(file)
}

/// Wrap any reader, decoding gzip when the stream starts with the magic
/// bytes and passing plain text through unchanged.
pub fn decompress<R: Read + 'static>(input: R) -> io::Result<Box<dyn BufRead>> {
    let mut buffered = BufReader::with_capacity(BUFFER_SIZE, input);

    let gzipped = {
        let peek = buffered.fill_buf()?;
        peek.len() >= 2 && peek[..2] == GZIP_MAGIC
    };

    if gzipped {
        let decoder = GzDecoder::new(buffered);
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, decoder)))
    } else {
        Ok(Box::new(buffered))
    }
}
