//! Benchmark helper utilities for makocode-rs.
//!
//! Provides deterministic synthetic payloads for the codec benchmarks. The
//! three generators span the interesting compression regimes: highly
//! repetitive data (deep LZW dictionary hits), incompressible data (every
//! code is fresh), and a text-like mixture in between.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// Generates a repetitive payload: a short phrase tiled to `len` bytes.
pub fn repetitive_payload(len: usize) -> Vec<u8> {
	b"ARCHIVAL GRADE PIGMENT INK ON ACID-FREE PAPER. "
		.iter()
		.copied()
		.cycle()
		.take(len)
		.collect()
}

/// Generates `len` pseudorandom bytes from a fixed seed.
pub fn random_payload(len: usize, seed: u64) -> Vec<u8> {
	let mut rng = SmallRng::seed_from_u64(seed);
	let mut payload = vec![0u8; len];
	rng.fill_bytes(&mut payload);
	payload
}

/// Generates a text-like payload: pseudorandom words over a small alphabet.
pub fn text_payload(len: usize, seed: u64) -> Vec<u8> {
	let mut rng = SmallRng::seed_from_u64(seed);
	let mut payload = Vec::with_capacity(len);
	while payload.len() < len {
		let word_len = 2 + (rng.next_u32() % 9) as usize;
		for _ in 0..word_len.min(len - payload.len()) {
			payload.push(b'a' + (rng.next_u32() % 26) as u8);
		}
		if payload.len() < len {
			payload.push(b' ');
		}
	}
	payload
}

/// Common payload sizes for the codec benchmarks
pub mod sizes {
	/// Small payload: 4 KiB
	pub const SMALL: usize = 4 * 1024;
	/// Medium payload: 64 KiB
	pub const MEDIUM: usize = 64 * 1024;
	/// Large payload: 512 KiB
	pub const LARGE: usize = 512 * 1024;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_payload_lengths() {
		assert_eq!(repetitive_payload(1000).len(), 1000);
		assert_eq!(random_payload(1000, 0).len(), 1000);
		assert_eq!(text_payload(1000, 0).len(), 1000);
	}

	#[test]
	fn test_payloads_are_deterministic() {
		assert_eq!(random_payload(64, 7), random_payload(64, 7));
		assert_ne!(random_payload(64, 7), random_payload(64, 8));
		assert_eq!(text_payload(64, 7), text_payload(64, 7));
	}
}
