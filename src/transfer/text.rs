//! Module `text`
//!
//! Chunked copying of UTF-8 text between a reader and a writer. Each chunk
//! is validated before it is written and the writer is flushed after every
//! chunk. A multi-byte character split across two reads is held back until
//! its remaining bytes arrive.

use std::io::{ErrorKind, Read, Write};

use crate::error::DataTransferError;

/// Room for the longest incomplete UTF-8 sequence plus one new byte.
const MIN_BUFFER_SIZE: usize = 4;

/// Copies `reader` to `writer` until end of stream, returning the number of
/// bytes written.
///
/// Fails with `InvalidText` on malformed UTF-8 or a sequence truncated by
/// end of stream, and with `Io` on any read or write failure.
pub fn copy_text<R, W>(
    reader: &mut R,
    writer: &mut W,
    buffer_size: usize,
) -> Result<u64, DataTransferError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buffer = vec![0u8; buffer_size.max(MIN_BUFFER_SIZE)];
    let mut pending = 0;
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buffer[pending..]) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        if n == 0 {
            if pending > 0 {
                return Err(DataTransferError::InvalidText { offset: total });
            }
            return Ok(total);
        }

        let filled = pending + n;
        let valid = match std::str::from_utf8(&buffer[..filled]) {
            Ok(_) => filled,
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => {
                return Err(DataTransferError::InvalidText {
                    offset: total + e.valid_up_to() as u64,
                });
            }
        };

        if valid > 0 {
            writer.write_all(&buffer[..valid])?;
            writer.flush()?;
            total += valid as u64;
        }

        buffer.copy_within(valid..filled, 0);
        pending = filled - valid;
    }
}
