//! Palettes for the three enumerated color modes.
//!
//! Every pixel carries exactly one palette index; the palette is a dense,
//! duplicate-free constant table selected by the channel count. Decoders
//! demand exact RGB matches — tolerating smudged colors is a scan
//! pre-processing concern, not a palette concern.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MakoError;

/// RGB color with 8 bits per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
}

impl Color {
	/// Creates a new RGB color.
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self {
			r,
			g,
			b,
		}
	}

	/// Pure white.
	pub const WHITE: Color = Color::new(255, 255, 255);

	/// Pure black.
	pub const BLACK: Color = Color::new(0, 0, 0);
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
	}
}

const GRAY_PALETTE: [Color; 2] = [Color::BLACK, Color::WHITE];

const CMYW_PALETTE: [Color; 4] = [
	Color::WHITE,
	Color::new(0, 255, 255),
	Color::new(255, 0, 255),
	Color::new(255, 255, 0),
];

const EIGHT_COLOR_PALETTE: [Color; 8] = [
	Color::WHITE,
	Color::BLACK,
	Color::new(255, 0, 0),
	Color::new(0, 255, 0),
	Color::new(0, 0, 255),
	Color::new(0, 255, 255),
	Color::new(255, 0, 255),
	Color::new(255, 255, 0),
];

/// Number of bit-channels carried by each pixel, which selects the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ColorChannels {
	/// 1 bit per pixel over black and white
	Gray = 1,

	/// 2 bits per pixel over white, cyan, magenta, yellow
	Cmyw = 2,

	/// 3 bits per pixel over the full 8-color palette
	EightColor = 3,
}

impl ColorChannels {
	/// Returns the number of frame bits consumed per pixel.
	pub fn bits_per_pixel(self) -> u32 {
		self as u32
	}

	/// Returns the number of colors in the palette.
	pub fn palette_size(self) -> usize {
		1 << self.bits_per_pixel()
	}

	/// Returns the palette table for this mode.
	pub fn palette(self) -> &'static [Color] {
		match self {
			ColorChannels::Gray => &GRAY_PALETTE,
			ColorChannels::Cmyw => &CMYW_PALETTE,
			ColorChannels::EightColor => &EIGHT_COLOR_PALETTE,
		}
	}

	/// Maps a palette index to its RGB value. The index must be below
	/// [`palette_size`](Self::palette_size); bit unpacking guarantees that.
	pub fn color_of(self, index: u8) -> Color {
		self.palette()[index as usize]
	}

	/// Maps an RGB value back to its palette index by scanning the table.
	pub fn index_of(self, color: Color) -> Result<u8, MakoError> {
		match self.palette().iter().position(|&entry| entry == color) {
			Some(index) => Ok(index as u8),
			None => Err(MakoError::PaletteMismatch {
				r: color.r,
				g: color.g,
				b: color.b,
				channels: self as u8,
			}),
		}
	}

	/// Background color of the footer stripe.
	pub fn footer_background(self) -> Color {
		Color::WHITE
	}

	/// Text color of the footer title.
	pub fn footer_text(self) -> Color {
		match self {
			ColorChannels::Gray => Color::BLACK,
			ColorChannels::Cmyw => CMYW_PALETTE[1],
			ColorChannels::EightColor => EIGHT_COLOR_PALETTE[1],
		}
	}
}

impl TryFrom<u32> for ColorChannels {
	type Error = MakoError;

	fn try_from(value: u32) -> Result<Self, Self::Error> {
		match value {
			1 => Ok(ColorChannels::Gray),
			2 => Ok(ColorChannels::Cmyw),
			3 => Ok(ColorChannels::EightColor),
			other => Err(MakoError::UnsupportedConfig(format!(
				"color channels must be 1, 2, or 3, got {other}"
			))),
		}
	}
}

impl fmt::Display for ColorChannels {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ColorChannels::Gray => write!(f, "grayscale"),
			ColorChannels::Cmyw => write!(f, "CMYW"),
			ColorChannels::EightColor => write!(f, "8-color"),
		}
	}
}
