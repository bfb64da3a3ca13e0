//! Uncompressed PNG encoding for RGBA pixel grids.
//!
//! Builds a minimal, spec-valid PNG by hand: signature, `IHDR`, `pHYs`,
//! an `IDAT` whose zlib stream is assembled from stored (uncompressed)
//! deflate blocks, and `IEND`. No compression library is involved; chunk
//! CRCs use `crc32fast` and the Adler-32 of the zlib payload is computed
//! inline. Byte order is a compatibility constraint, not a style choice:
//! chunk lengths and CRCs are big-endian, stored-block lengths are
//! little-endian.

use chart_common::{ChartError, ChartResult, Color};
use tracing::debug;

/// Largest payload of a single stored deflate block.
const MAX_DEFLATE: usize = 0xFFFF;

/// Encode an RGBA pixel grid as an uncompressed 8-bit PNG.
///
/// # Arguments
/// - `pixels`: row-major pixel grid; row 0 is the *bottom-most* scanline
/// - `width`, `height`: grid dimensions, both at least 1
/// - `dpi`: resolution written to the `pHYs` chunk
///
/// The returned buffer is a complete, self-contained PNG stream; any
/// conformant decoder reproduces the input pixels exactly.
///
/// # Errors
/// `InvalidArgument` when a dimension is zero or `pixels.len()` does not
/// equal `width * height`; never fails otherwise.
pub fn encode(pixels: &[Color], width: usize, height: usize, dpi: u32) -> ChartResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(ChartError::invalid(
            "dimensions",
            format!("image must be at least 1x1, got {width}x{height}"),
        ));
    }
    if pixels.len() != width * height {
        return Err(ChartError::invalid(
            "pixels",
            format!(
                "expected {} pixels for {width}x{height}, got {}",
                width * height,
                pixels.len()
            ),
        ));
    }

    debug!(width, height, dpi, "encoding png");

    // Raw scanline stream: top row of the image first (the highest row
    // index, since row 0 is the bottom), each prefixed by filter type 0.
    let mut raw = Vec::with_capacity(height * (1 + width * 4));
    for row in (0..height).rev() {
        raw.push(0); // filter: none
        for color in &pixels[row * width..(row + 1) * width] {
            raw.push(color.r);
            raw.push(color.g);
            raw.push(color.b);
            raw.push(color.a);
        }
    }

    let mut png = Vec::with_capacity(raw.len() + raw.len() / MAX_DEFLATE * 5 + 96);
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);
    write_chunk(&mut png, b"IHDR", &header_data(width, height));
    write_chunk(&mut png, b"pHYs", &physical_dimensions_data(dpi, dpi));
    write_chunk(&mut png, b"IDAT", &stored_zlib_stream(&raw));
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// `IHDR` payload: 8-bit RGBA, no compression/filter/interlace variants.
fn header_data(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&(width as u32).to_be_bytes());
    data.extend_from_slice(&(height as u32).to_be_bytes());
    data.push(8); // bit depth
    data.push(6); // color type RGBA
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

/// `pHYs` payload: pixels per metre on both axes, unit flag 1 (metre).
fn physical_dimensions_data(dpi_x: u32, dpi_y: u32) -> Vec<u8> {
    let ppm_x = (dpi_x as f64 / 0.0254) as u32;
    let ppm_y = (dpi_y as f64 / 0.0254) as u32;
    let mut data = Vec::with_capacity(9);
    data.extend_from_slice(&ppm_x.to_be_bytes());
    data.extend_from_slice(&ppm_y.to_be_bytes());
    data.push(1); // unit: metre
    data
}

/// Wrap `bytes` in a zlib stream of stored deflate blocks.
///
/// Header, then blocks of at most 65535 bytes (BFINAL set on the last;
/// length and ones-complement length little-endian), then the big-endian
/// Adler-32 of the uncompressed payload.
fn stored_zlib_stream(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + bytes.len() / MAX_DEFLATE * 5 + 16);

    const COMPRESSION_METHOD: u32 = 8;
    const CHECK: u32 = (31 - ((COMPRESSION_METHOD << 8) % 31)) % 31;
    out.push(COMPRESSION_METHOD as u8);
    out.push(CHECK as u8);

    for start in (0..bytes.len()).step_by(MAX_DEFLATE) {
        let n = (bytes.len() - start).min(MAX_DEFLATE) as u16;
        let last = start + n as usize == bytes.len();
        out.push(last as u8);
        out.extend_from_slice(&n.to_le_bytes());
        out.extend_from_slice(&(!n).to_le_bytes());
        out.extend_from_slice(&bytes[start..start + n as usize]);
    }

    out.extend_from_slice(&adler32(bytes).to_be_bytes());
    out
}

/// Adler-32 checksum as required by the zlib stream format.
fn adler32(data: &[u8]) -> u32 {
    const MOD_ADLER: u32 = 65521;
    let mut a: u32 = 1;
    let mut b: u32 = 0;
    for &x in data {
        a = (a + x as u32) % MOD_ADLER;
        b = (b + a) % MOD_ADLER;
    }
    (b << 16) | a
}

/// Write one chunk: big-endian length, type, data, big-endian CRC-32
/// over type and data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inconsistent_input() {
        assert!(encode(&[], 0, 0, 96).is_err());
        assert!(encode(&[Color::RED], 2, 2, 96).is_err());
    }

    #[test]
    fn test_signature_and_ihdr() {
        let pixels = vec![Color::RED; 6];
        let png = encode(&pixels, 3, 2, 96).unwrap();

        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        // IHDR directly follows the signature
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(&png[16..20], &3u32.to_be_bytes()); // width
        assert_eq!(&png[20..24], &2u32.to_be_bytes()); // height
        assert_eq!(png[24], 8); // bit depth
        assert_eq!(png[25], 6); // color type RGBA
    }

    #[test]
    fn test_zlib_header_and_adler() {
        // CMF 8, FLG 29: (8 * 256 + 29) divisible by 31
        let stream = stored_zlib_stream(&[1, 2, 3]);
        assert_eq!(stream[0], 8);
        assert_eq!(stream[1], 29);
        assert_eq!((stream[0] as u32 * 256 + stream[1] as u32) % 31, 0);

        // single final stored block: 1, len 3, ~len, payload
        assert_eq!(stream[2], 1);
        assert_eq!(&stream[3..5], &3u16.to_le_bytes());
        assert_eq!(&stream[5..7], &(!3u16).to_le_bytes());
        assert_eq!(&stream[7..10], &[1, 2, 3]);

        // adler32 of [1,2,3]: a = 7, b = 13
        assert_eq!(&stream[10..14], &0x000D_0007u32.to_be_bytes());
    }

    #[test]
    fn test_adler32_known_value() {
        // "Wikipedia" from the Adler-32 article
        assert_eq!(adler32(b"Wikipedia"), 0x11E6_0398);
    }

    #[test]
    fn test_block_splitting() {
        let payload = vec![0xAB; MAX_DEFLATE + 10];
        let stream = stored_zlib_stream(&payload);

        // first block: not final, full length
        assert_eq!(stream[2], 0);
        assert_eq!(&stream[3..5], &(MAX_DEFLATE as u16).to_le_bytes());

        // second block starts right after the first payload
        let second = 2 + 5 + MAX_DEFLATE;
        assert_eq!(stream[second], 1);
        assert_eq!(&stream[second + 1..second + 3], &10u16.to_le_bytes());
    }
}
