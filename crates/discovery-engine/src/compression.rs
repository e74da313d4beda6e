//! Transparent gzip/brotli decompression (C5).
//!
//! Grounded in `compression_utils.maybe_decompress`: inspect the raw magic
//! bytes rather than trusting `Content-Encoding`, since sitemaps are
//! routinely served as raw `.xml.gz` with no such header.

use std::io::Read;

use crate::error::DiscoveryError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decompress `body` if it looks gzip- or brotli-encoded; otherwise return it
/// unchanged.
///
/// Gzip failures are raised (the caller is expected to count the attempt
/// against a retry budget); brotli failures fall back to the original bytes
/// untouched, matching the original's `except brotli.error: pass`.
pub fn maybe_decompress(url: &str, body: &[u8]) -> Result<Vec<u8>, DiscoveryError> {
    if body.len() >= 2 && body[..2] == GZIP_MAGIC {
        let mut decoder = flate2::read::GzDecoder::new(body);
        let mut out = Vec::new();
        return decoder
            .read_to_end(&mut out)
            .map(|_| out)
            .map_err(|e| DiscoveryError::Decompress {
                url: url.to_string(),
                reason: e.to_string(),
            });
    }

    if let Ok(out) = brotli_decompress(body) {
        return Ok(out);
    }

    Ok(body.to_vec())
}

fn brotli_decompress(body: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut reader = brotli::Decompressor::new(body, body.len().max(4096));
    reader.read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
#[path = "compression_test.rs"]
mod tests;
