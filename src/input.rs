//! Turning raw input bytes into text chunks.

use std::io::{self, Read};

/// Size of each read from the input.
pub const READ_BUFFER_SIZE: usize = 8192;

/// Incremental UTF-8 decoder.
///
/// A multibyte sequence split across reads is held until the rest of it
/// arrives. Invalid bytes become U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode as much of `bytes` (after anything held back) as possible.
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::with_capacity(self.pending.len());
        let mut start = 0;

        loop {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(text) => {
                    out.push_str(text);
                    start = self.pending.len();
                    break;
                }
                Err(e) => {
                    let valid = start + e.valid_up_to();
                    out.push_str(std::str::from_utf8(&self.pending[start..valid]).unwrap_or_default());
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            start = valid + len;
                        }
                        // Incomplete sequence at the end: wait for more bytes.
                        None => {
                            start = valid;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..start);
        out
    }

    /// Decode whatever is still held back at end of input.
    pub fn finish(&mut self) -> String {
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        rest
    }
}

/// Split `text` into pieces of at most `size` characters.
///
/// A `size` of 0 yields `text` whole.
pub fn split_chars(text: &str, size: usize) -> Vec<&str> {
    if size == 0 || text.is_empty() {
        return if text.is_empty() { Vec::new() } else { vec![text] };
    }

    let mut pieces = Vec::with_capacity(text.len() / size + 1);
    let mut start = 0;
    let mut count = 0;
    for (i, _) in text.char_indices() {
        if count == size {
            pieces.push(&text[start..i]);
            start = i;
            count = 0;
        }
        count += 1;
    }
    pieces.push(&text[start..]);
    pieces
}

/// Read `reader` to the end, handing each decoded piece to `on_text`.
pub fn read_text<R, F>(mut reader: R, mut on_text: F) -> io::Result<()>
where
    R: Read,
    F: FnMut(&str) -> io::Result<()>,
{
    let mut decoder = Utf8Decoder::new();
    let mut buf = [0u8; READ_BUFFER_SIZE];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let text = decoder.push(&buf[..n]);
        if !text.is_empty() {
            on_text(&text)?;
        }
    }

    let rest = decoder.finish();
    if !rest.is_empty() {
        on_text(&rest)?;
    }
    Ok(())
}
