//! Plain-ASCII raster container for pages.
//!
//! ## Layout
//!
//! | Part | Content |
//! |---|---|
//! | magic | the token `P3` |
//! | header comments | `# KEY VALUE` lines, `KEY` from the fixed set below |
//! | dimensions | `width height` tokens |
//! | maxval | the token `255` (no other depth is supported) |
//! | samples | `width * height * 3` decimal values in `0..=255`, row-major |
//!
//! Tokens are whitespace-separated. Comments begin with `#` and run to the
//! end of the line; the parser absorbs them wherever they appear, folding
//! recognized keys into a sticky [`PageHeader`]. A key may repeat within one
//! page only with an identical value. Unknown keys are ignored, which is
//! also how the legacy `MAKOCODE_BYTES` hint is handled.

use std::fmt;

use crate::error::MakoError;
use crate::palette::Color;

/// Magic token opening every page file.
pub const MAGIC: &str = "P3";

/// The only supported sample depth.
pub const MAXVAL: u64 = 255;

/// Header comment keys.
pub mod keys {
	/// Palette id (1, 2, or 3).
	pub const COLOR_CHANNELS: &str = "MAKOCODE_COLOR_CHANNELS";
	/// Bits in the compressed payload portion of the frame.
	pub const PAYLOAD_BITS: &str = "MAKOCODE_BITS";
	/// Total pages in the set.
	pub const PAGE_COUNT: &str = "MAKOCODE_PAGE_COUNT";
	/// 1-based index of this page.
	pub const PAGE_INDEX: &str = "MAKOCODE_PAGE_INDEX";
	/// Per-page bit capacity used for slicing.
	pub const PAGE_BITS: &str = "MAKOCODE_PAGE_BITS";
	/// Page width in pixels.
	pub const PAGE_WIDTH: &str = "MAKOCODE_PAGE_WIDTH_PX";
	/// Page height in pixels.
	pub const PAGE_HEIGHT: &str = "MAKOCODE_PAGE_HEIGHT_PX";
	/// Rows reserved for the footer stripe.
	pub const FOOTER_ROWS: &str = "MAKOCODE_FOOTER_ROWS";
	/// Footer title font scale.
	pub const TITLE_FONT: &str = "MAKOCODE_TITLE_FONT";
}

/// Self-describing page metadata carried as header comments.
///
/// Every field is optional at the container level; the decoder decides which
/// ones a page must carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageHeader {
	/// Palette id, `MAKOCODE_COLOR_CHANNELS`.
	pub color_channels: Option<u64>,
	/// Compressed payload bit count, `MAKOCODE_BITS`.
	pub payload_bits: Option<u64>,
	/// Pages in the set, `MAKOCODE_PAGE_COUNT`.
	pub page_count: Option<u64>,
	/// 1-based page index, `MAKOCODE_PAGE_INDEX`.
	pub page_index: Option<u64>,
	/// Per-page bit capacity, `MAKOCODE_PAGE_BITS`.
	pub page_bits: Option<u64>,
	/// Page width, `MAKOCODE_PAGE_WIDTH_PX`.
	pub page_width_px: Option<u64>,
	/// Page height, `MAKOCODE_PAGE_HEIGHT_PX`.
	pub page_height_px: Option<u64>,
	/// Footer stripe rows, `MAKOCODE_FOOTER_ROWS`.
	pub footer_rows: Option<u64>,
	/// Footer font scale, `MAKOCODE_TITLE_FONT`.
	pub title_font: Option<u64>,
}

impl PageHeader {
	/// All fields with their wire keys, in emission order.
	fn slots(&mut self) -> [(&'static str, &mut Option<u64>); 9] {
		[
			(keys::COLOR_CHANNELS, &mut self.color_channels),
			(keys::PAYLOAD_BITS, &mut self.payload_bits),
			(keys::PAGE_COUNT, &mut self.page_count),
			(keys::PAGE_INDEX, &mut self.page_index),
			(keys::PAGE_BITS, &mut self.page_bits),
			(keys::PAGE_WIDTH, &mut self.page_width_px),
			(keys::PAGE_HEIGHT, &mut self.page_height_px),
			(keys::FOOTER_ROWS, &mut self.footer_rows),
			(keys::TITLE_FONT, &mut self.title_font),
		]
	}

	/// Present fields with their wire keys, in emission order.
	pub fn entries(&self) -> Vec<(&'static str, u64)> {
		let mut this = *self;
		this.slots()
			.into_iter()
			.filter_map(|(key, slot)| slot.take().map(|value| (key, value)))
			.collect()
	}

	/// Records `value` under `key`. Unknown keys are ignored; a repeated key
	/// is accepted only with an identical value.
	pub fn set(&mut self, key: &str, value: u64) -> Result<(), MakoError> {
		for (name, slot) in self.slots() {
			if name != key {
				continue;
			}
			match *slot {
				Some(existing) if existing != value => {
					return Err(MakoError::MetadataConflict(format!(
						"{key} appears twice with values {existing} and {value}"
					)));
				}
				_ => *slot = Some(value),
			}
			break;
		}
		Ok(())
	}

	/// Folds another page's metadata into this one; any disagreement on a
	/// field both sides carry is a conflict.
	pub fn merge(&mut self, other: &PageHeader) -> Result<(), MakoError> {
		let mut other = *other;
		for (key, slot) in other.slots() {
			if let Some(value) = *slot {
				self.set(key, value)?;
			}
		}
		Ok(())
	}
}

impl fmt::Display for PageHeader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let entries = self.entries();
		if entries.is_empty() {
			return write!(f, "(no metadata)");
		}
		for (i, (key, value)) in entries.iter().enumerate() {
			if i > 0 {
				writeln!(f)?;
			}
			write!(f, "{key} = {value}")?;
		}
		Ok(())
	}
}

/// A parsed raster: dimensions plus row-major pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
	/// Width in pixels.
	pub width: u32,
	/// Height in pixels.
	pub height: u32,
	/// `width * height` colors, top-to-bottom.
	pub pixels: Vec<Color>,
}

struct Tokenizer<'a> {
	data: &'a [u8],
	pos: usize,
}

impl<'a> Tokenizer<'a> {
	fn new(data: &'a [u8]) -> Self {
		Self {
			data,
			pos: 0,
		}
	}

	/// Returns the next token, absorbing any comments along the way into
	/// `header`.
	fn next_token(&mut self, header: &mut PageHeader) -> Result<Option<&'a [u8]>, MakoError> {
		loop {
			while self.pos < self.data.len() && self.data[self.pos].is_ascii_whitespace() {
				self.pos += 1;
			}
			if self.pos >= self.data.len() {
				return Ok(None);
			}
			if self.data[self.pos] == b'#' {
				let start = self.pos + 1;
				while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
					self.pos += 1;
				}
				absorb_comment(&self.data[start..self.pos], header)?;
				continue;
			}
			let start = self.pos;
			while self.pos < self.data.len()
				&& !self.data[self.pos].is_ascii_whitespace()
				&& self.data[self.pos] != b'#'
			{
				self.pos += 1;
			}
			return Ok(Some(&self.data[start..self.pos]));
		}
	}

	/// Returns the next token parsed as a non-negative decimal integer.
	fn next_number(&mut self, header: &mut PageHeader, what: &str) -> Result<u64, MakoError> {
		let token = self
			.next_token(header)?
			.ok_or_else(|| MakoError::Container(format!("unexpected end of file reading {what}")))?;
		parse_decimal(token)
			.ok_or_else(|| MakoError::Container(format!(
				"non-numeric {what} token {:?}",
				String::from_utf8_lossy(token)
			)))
	}
}

fn parse_decimal(token: &[u8]) -> Option<u64> {
	if token.is_empty() || !token.iter().all(u8::is_ascii_digit) {
		return None;
	}
	std::str::from_utf8(token).ok()?.parse().ok()
}

/// Folds one comment body into the header state. Comments that are not a
/// recognized `KEY VALUE` pair are plain commentary and are skipped; a
/// recognized key with a malformed value is an error.
fn absorb_comment(body: &[u8], header: &mut PageHeader) -> Result<(), MakoError> {
	let Ok(text) = std::str::from_utf8(body) else {
		return Ok(());
	};
	let mut parts = text.split_whitespace();
	let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
		return Ok(());
	};
	let known = PageHeader::default().slots().iter().any(|(name, _)| *name == key);
	if !known {
		return Ok(());
	}
	let Some(parsed) = parse_decimal(value.as_bytes()) else {
		return Err(MakoError::Container(format!(
			"header key {key} carries a non-numeric value {value:?}"
		)));
	};
	if parts.next().is_some() {
		return Err(MakoError::Container(format!(
			"header key {key} is followed by trailing tokens"
		)));
	}
	header.set(key, parsed)
}

/// Parses one page file into its metadata and raster.
pub fn parse(data: &[u8]) -> Result<(PageHeader, Raster), MakoError> {
	let mut header = PageHeader::default();
	let mut tokenizer = Tokenizer::new(data);

	let magic = tokenizer
		.next_token(&mut header)?
		.ok_or_else(|| MakoError::Container("empty file".to_string()))?;
	if magic != MAGIC.as_bytes() {
		return Err(MakoError::Container(format!(
			"bad magic {:?}, expected {MAGIC:?}",
			String::from_utf8_lossy(magic)
		)));
	}

	let width = tokenizer.next_number(&mut header, "width")?;
	let height = tokenizer.next_number(&mut header, "height")?;
	if width == 0 || height == 0 {
		return Err(MakoError::Container(format!(
			"zero page dimension {width}x{height}"
		)));
	}
	if width > u64::from(u32::MAX) || height > u64::from(u32::MAX) {
		return Err(MakoError::Container(format!(
			"page dimension {width}x{height} out of range"
		)));
	}

	let maxval = tokenizer.next_number(&mut header, "maxval")?;
	if maxval != MAXVAL {
		return Err(MakoError::Container(format!(
			"unsupported maxval {maxval}, expected {MAXVAL}"
		)));
	}

	let count = (width * height) as usize;
	let mut pixels = Vec::new();
	pixels
		.try_reserve_exact(count)
		.map_err(|_| MakoError::AllocationFailure {
			what: "page pixel buffer",
			requested: count * std::mem::size_of::<Color>(),
		})?;

	for _ in 0..count {
		let mut sample = [0u8; 3];
		for component in &mut sample {
			let value = tokenizer.next_number(&mut header, "sample")?;
			if value > MAXVAL {
				return Err(MakoError::Container(format!(
					"sample value {value} exceeds maxval {MAXVAL}"
				)));
			}
			*component = value as u8;
		}
		pixels.push(Color::new(sample[0], sample[1], sample[2]));
	}

	Ok((
		header,
		Raster {
			width: width as u32,
			height: height as u32,
			pixels,
		},
	))
}

/// Serializes a page raster and its metadata into container bytes.
pub fn serialize(header: &PageHeader, raster: &Raster) -> Vec<u8> {
	// Worst case each sample is "255 " = 4 bytes.
	let mut out = String::with_capacity(raster.pixels.len() * 12 + 256);
	out.push_str(MAGIC);
	out.push('\n');
	for (key, value) in header.entries() {
		out.push_str(&format!("# {key} {value}\n"));
	}
	out.push_str(&format!("{} {}\n{MAXVAL}\n", raster.width, raster.height));
	for row in raster.pixels.chunks(raster.width as usize) {
		for (i, color) in row.iter().enumerate() {
			if i > 0 {
				out.push(' ');
			}
			out.push_str(&format!("{} {} {}", color.r, color.g, color.b));
		}
		out.push('\n');
	}
	out.into_bytes()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn checker_raster() -> Raster {
		let pixels = (0..6)
			.map(|i| if i % 2 == 0 { Color::BLACK } else { Color::WHITE })
			.collect();
		Raster {
			width: 3,
			height: 2,
			pixels,
		}
	}

	#[test]
	fn test_serialize_parse_roundtrip() {
		let mut header = PageHeader::default();
		header.set(keys::COLOR_CHANNELS, 1).unwrap();
		header.set(keys::PAYLOAD_BITS, 4242).unwrap();
		header.set(keys::PAGE_INDEX, 1).unwrap();

		let raster = checker_raster();
		let bytes = serialize(&header, &raster);
		let (parsed_header, parsed_raster) = parse(&bytes).unwrap();
		assert_eq!(parsed_header, header);
		assert_eq!(parsed_raster, raster);
	}

	#[test]
	fn test_parse_minimal() {
		let (header, raster) = parse(b"P3\n1 1\n255\n12 34 56\n").unwrap();
		assert_eq!(header, PageHeader::default());
		assert_eq!(raster.pixels, vec![Color::new(12, 34, 56)]);
	}

	#[test]
	fn test_comment_between_samples() {
		let text = b"P3\n1 2\n255\n0 0 0\n# MAKOCODE_PAGE_COUNT 7\n255 255 255\n";
		let (header, raster) = parse(text).unwrap();
		assert_eq!(header.page_count, Some(7));
		assert_eq!(raster.pixels.len(), 2);
	}

	#[test]
	fn test_bad_magic() {
		assert!(matches!(
			parse(b"P6\n1 1\n255\n0 0 0\n"),
			Err(MakoError::Container(_))
		));
	}

	#[test]
	fn test_bad_maxval() {
		assert!(matches!(
			parse(b"P3\n1 1\n65535\n0 0 0\n"),
			Err(MakoError::Container(_))
		));
	}

	#[test]
	fn test_non_numeric_token() {
		assert!(matches!(
			parse(b"P3\n1 one\n255\n0 0 0\n"),
			Err(MakoError::Container(_))
		));
		// Negative samples are not non-negative decimals.
		assert!(matches!(
			parse(b"P3\n1 1\n255\n-1 0 0\n"),
			Err(MakoError::Container(_))
		));
	}

	#[test]
	fn test_sample_out_of_range() {
		assert!(matches!(
			parse(b"P3\n1 1\n255\n0 0 256\n"),
			Err(MakoError::Container(_))
		));
	}

	#[test]
	fn test_short_pixel_data() {
		assert!(matches!(
			parse(b"P3\n2 2\n255\n0 0 0 255 255 255\n"),
			Err(MakoError::Container(_))
		));
	}

	#[test]
	fn test_unknown_keys_are_ignored() {
		let text = b"P3\n# MAKOCODE_BYTES 1234\n# scanner model X9\n1 1\n255\n0 0 0\n";
		let (header, _) = parse(text).unwrap();
		assert_eq!(header, PageHeader::default());
	}

	#[test]
	fn test_duplicate_key_identical_value() {
		let text = b"P3\n# MAKOCODE_BITS 96\n# MAKOCODE_BITS 96\n1 1\n255\n0 0 0\n";
		let (header, _) = parse(text).unwrap();
		assert_eq!(header.payload_bits, Some(96));
	}

	#[test]
	fn test_duplicate_key_conflicting_value() {
		let text = b"P3\n# MAKOCODE_BITS 96\n# MAKOCODE_BITS 97\n1 1\n255\n0 0 0\n";
		assert!(matches!(parse(text), Err(MakoError::MetadataConflict(_))));
	}

	#[test]
	fn test_known_key_with_bad_value() {
		let text = b"P3\n# MAKOCODE_BITS lots\n1 1\n255\n0 0 0\n";
		assert!(matches!(parse(text), Err(MakoError::Container(_))));
	}

	#[test]
	fn test_header_merge() {
		let mut first = PageHeader::default();
		first.set(keys::PAGE_COUNT, 2).unwrap();
		first.set(keys::PAGE_INDEX, 1).unwrap();

		let mut second = PageHeader::default();
		second.set(keys::PAGE_COUNT, 2).unwrap();
		second.set(keys::TITLE_FONT, 3).unwrap();
		first.merge(&second).unwrap();
		assert_eq!(first.title_font, Some(3));

		let mut conflicting = PageHeader::default();
		conflicting.set(keys::PAGE_COUNT, 5).unwrap();
		assert!(matches!(
			first.merge(&conflicting),
			Err(MakoError::MetadataConflict(_))
		));
	}
}
