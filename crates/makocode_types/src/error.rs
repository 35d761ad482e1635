//! Error types for MakoCode encoding and decoding.

use thiserror::Error;

/// Unified error type for every encode and decode operation in this crate.
#[derive(Debug, Error)]
pub enum MakoError {
	/// The payload or a structure computed from it exceeds representable bounds
	#[error("Input too large: {what} is {value}, limit is {limit}")]
	InputTooLarge {
		/// Which quantity overflowed
		what: &'static str,
		/// Observed value
		value: u64,
		/// Largest supported value
		limit: u64,
	},

	/// A buffer could not grow to the required size
	#[error("Failed to allocate {requested} bytes for {what}")]
	AllocationFailure {
		/// What the buffer was for
		what: &'static str,
		/// Requested size in bytes
		requested: usize,
	},

	/// Invalid encode or decode configuration
	#[error("Unsupported configuration: {0}")]
	UnsupportedConfig(String),

	/// Malformed raster container
	#[error("Malformed container: {0}")]
	Container(String),

	/// Missing, inconsistent, or out-of-order page metadata
	#[error("Metadata conflict: {0}")]
	MetadataConflict(String),

	/// A pixel's RGB value is not an exact entry of the declared palette
	#[error("Pixel ({r}, {g}, {b}) is not an entry of the {channels}-channel palette")]
	PaletteMismatch {
		/// Red component of the offending pixel
		r: u8,
		/// Green component of the offending pixel
		g: u8,
		/// Blue component of the offending pixel
		b: u8,
		/// Declared palette id
		channels: u8,
	},

	/// Page metadata disagrees with the embedded frame header
	#[error("Frame integrity violation: {0}")]
	FrameIntegrity(String),

	/// The compressed code stream is invalid
	#[error("Compression failure: {0}")]
	CompressionFailure(String),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
