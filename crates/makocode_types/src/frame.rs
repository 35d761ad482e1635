//! Frame assembly: length header, compressed payload bits, diffusion.
//!
//! A frame is the bit sequence actually painted onto pages: a 64-bit
//! little-endian count of the payload bits, followed by the compressed
//! payload bytes verbatim (LSB-first), zero-padded to a byte boundary. An
//! empty payload compresses to nothing and produces the legal empty frame
//! with no header at all.

use crate::bits::{BitReader, BitWriter};
use crate::error::MakoError;

/// Width of the embedded payload-bit-count header.
pub const HEADER_BITS: u32 = 64;

/// An assembled frame: owned bit buffer plus its bit counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	bytes: Vec<u8>,
	bit_count: u64,
	payload_bit_count: u64,
}

impl Frame {
	/// Returns the frame bits packed into bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Consumes the frame, returning its byte buffer.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}

	/// Returns the number of meaningful bits in the frame, header included.
	pub fn bit_count(&self) -> u64 {
		self.bit_count
	}

	/// Returns the number of compressed payload bits carried by the frame.
	pub fn payload_bit_count(&self) -> u64 {
		self.payload_bit_count
	}
}

/// Builds a frame around a compressed payload.
pub fn wrap(compressed: &[u8]) -> Frame {
	if compressed.is_empty() {
		return Frame {
			bytes: Vec::new(),
			bit_count: 0,
			payload_bit_count: 0,
		};
	}

	let payload_bit_count = compressed.len() as u64 * 8;
	let mut writer = BitWriter::with_capacity(compressed.len() + HEADER_BITS as usize / 8);
	writer.write_bits(payload_bit_count, HEADER_BITS);
	for &byte in compressed {
		writer.write_bits(u64::from(byte), 8);
	}
	writer.align_to_byte();

	let bit_count = writer.bit_count();
	Frame {
		bytes: writer.into_bytes(),
		bit_count,
		payload_bit_count,
	}
}

/// Extracts the compressed payload from reassembled frame bits.
///
/// `bit_count` is the number of candidate bits available in `bytes` (page
/// capacity on decode, so usually larger than the frame itself), and
/// `expected_payload_bits` is the externally supplied payload bit count.
/// The embedded header must agree with it and must fit in the bits that
/// follow the header.
pub fn unwrap(bytes: &[u8], bit_count: u64, expected_payload_bits: u64) -> Result<Vec<u8>, MakoError> {
	let mut reader = BitReader::with_bit_count(bytes, bit_count.min(bytes.len() as u64 * 8));

	// A sticky overrun reads as zero, which is exactly right for the empty
	// frame: pages hold nothing but padding and the counts agree at 0.
	let embedded = reader.read_bits(HEADER_BITS);
	if embedded != expected_payload_bits {
		return Err(MakoError::FrameIntegrity(format!(
			"embedded payload bit count {embedded} disagrees with declared count {expected_payload_bits}"
		)));
	}
	if embedded > bit_count.saturating_sub(u64::from(HEADER_BITS)) {
		return Err(MakoError::FrameIntegrity(format!(
			"payload bit count {embedded} exceeds the {bit_count} available frame bits"
		)));
	}

	let mut writer = BitWriter::with_capacity((embedded / 8 + 1) as usize);
	let mut left = embedded;
	while left >= 8 {
		writer.write_bits(reader.read_bits(8), 8);
		left -= 8;
	}
	if left > 0 {
		writer.write_bits(reader.read_bits(left as u32), left as u32);
		writer.align_to_byte();
	}
	Ok(writer.into_bytes())
}

/// Spreads palette-correlated error bursts for the 8-color palette: byte `i`
/// rotates left by `(i % 3) + 1` bits. [`undiffuse`] is the exact inverse;
/// neither pass changes the byte count.
pub fn diffuse(bytes: &mut [u8]) {
	for (i, byte) in bytes.iter_mut().enumerate() {
		*byte = byte.rotate_left((i % 3) as u32 + 1);
	}
}

/// Reverses [`diffuse`]: byte `i` rotates right by `(i % 3) + 1` bits.
pub fn undiffuse(bytes: &mut [u8]) {
	for (i, byte) in bytes.iter_mut().enumerate() {
		*byte = byte.rotate_right((i % 3) as u32 + 1);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_wrap_empty() {
		let frame = wrap(&[]);
		assert_eq!(frame.bit_count(), 0);
		assert_eq!(frame.payload_bit_count(), 0);
		assert!(frame.bytes().is_empty());
	}

	#[test]
	fn test_wrap_layout() {
		let frame = wrap(&[0xAA, 0x55]);
		assert_eq!(frame.payload_bit_count(), 16);
		assert_eq!(frame.bit_count(), 64 + 16);
		// Little-endian 16 in the first 8 bytes, then the payload verbatim.
		assert_eq!(frame.bytes(), &[16, 0, 0, 0, 0, 0, 0, 0, 0xAA, 0x55]);
	}

	#[test]
	fn test_unwrap_roundtrip() {
		let payload = b"framed payload bytes";
		let frame = wrap(payload);
		let out = unwrap(frame.bytes(), frame.bit_count(), frame.payload_bit_count()).unwrap();
		assert_eq!(out, payload);
	}

	#[test]
	fn test_unwrap_with_trailing_padding() {
		let payload = [0x5A; 7];
		let frame = wrap(&payload);
		let mut padded = frame.bytes().to_vec();
		padded.extend_from_slice(&[0; 25]);
		let out = unwrap(&padded, padded.len() as u64 * 8, frame.payload_bit_count()).unwrap();
		assert_eq!(out, payload);
	}

	#[test]
	fn test_unwrap_empty_frame() {
		// All-padding pages: counts agree at zero.
		let zeros = [0u8; 32];
		let out = unwrap(&zeros, 256, 0).unwrap();
		assert!(out.is_empty());

		// Even shorter than the header itself.
		let out = unwrap(&zeros[..4], 32, 0).unwrap();
		assert!(out.is_empty());
	}

	#[test]
	fn test_unwrap_count_disagreement() {
		let frame = wrap(&[1, 2, 3]);
		let result = unwrap(frame.bytes(), frame.bit_count(), 8);
		assert!(matches!(result, Err(MakoError::FrameIntegrity(_))));
	}

	#[test]
	fn test_unwrap_count_exceeds_frame() {
		let mut writer = BitWriter::new();
		writer.write_bits(4096, 64);
		writer.write_bits(0xFF, 8);
		let bytes = writer.into_bytes();
		let result = unwrap(&bytes, bytes.len() as u64 * 8, 4096);
		assert!(matches!(result, Err(MakoError::FrameIntegrity(_))));
	}

	#[test]
	fn test_diffusion_rotations() {
		let mut bytes = [0b0000_0001; 6];
		diffuse(&mut bytes);
		assert_eq!(
			bytes,
			[
				0b0000_0010, // rotl 1
				0b0000_0100, // rotl 2
				0b0000_1000, // rotl 3
				0b0000_0010,
				0b0000_0100,
				0b0000_1000,
			]
		);
	}

	#[test]
	fn test_diffusion_is_involutive() {
		let mut bytes: Vec<u8> = (0..=255).collect();
		let original = bytes.clone();
		diffuse(&mut bytes);
		assert_ne!(bytes, original);
		assert_eq!(bytes.len(), original.len());
		undiffuse(&mut bytes);
		assert_eq!(bytes, original);
	}
}
