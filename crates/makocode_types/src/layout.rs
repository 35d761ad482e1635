//! Page geometry: data region, footer stripe, per-page bit capacity.

use crate::error::MakoError;
use crate::font::{GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::palette::ColorChannels;

/// Largest accepted footer font scale.
pub const MAX_FONT_SCALE: u32 = 2048;

/// Immutable geometry of one page, computed once per encode or decode run.
///
/// The data region is the top `data_height_px` rows; the footer stripe, when
/// a title is configured, is the remaining `footer_rows` rows and holds the
/// title at `font_scale`, horizontally centered with a one-scale-unit margin
/// above and below the glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
	page_width_px: u32,
	page_height_px: u32,
	data_height_px: u32,
	footer_rows: u32,
	font_scale: u32,
	title_px_width: u32,
	text_left_col: u32,
	text_top_row: u32,
	bits_per_page: u64,
}

impl PageLayout {
	/// Computes the layout for the given page dimensions and footer
	/// configuration. `title` must already be normalized to the footer
	/// alphabet; pass `None` for a page without a footer stripe.
	pub fn compute(
		channels: ColorChannels,
		page_width_px: u32,
		page_height_px: u32,
		title: Option<&str>,
		font_scale: u32,
	) -> Result<Self, MakoError> {
		if page_width_px == 0 || page_height_px == 0 {
			return Err(MakoError::UnsupportedConfig(format!(
				"page dimensions must be positive, got {page_width_px}x{page_height_px}"
			)));
		}
		if font_scale == 0 || font_scale > MAX_FONT_SCALE {
			return Err(MakoError::UnsupportedConfig(format!(
				"title font scale must be in 1..={MAX_FONT_SCALE}, got {font_scale}"
			)));
		}

		let mut layout = Self {
			page_width_px,
			page_height_px,
			data_height_px: page_height_px,
			footer_rows: 0,
			font_scale,
			title_px_width: 0,
			text_left_col: 0,
			text_top_row: 0,
			bits_per_page: 0,
		};

		if let Some(title) = title.filter(|t| !t.is_empty()) {
			let len = title.chars().count() as u64;
			let glyph_w = u64::from(GLYPH_WIDTH * font_scale);
			let spacing = u64::from(font_scale);
			let title_px_width = len * glyph_w + (len - 1) * spacing;
			if title_px_width > u64::from(page_width_px) {
				return Err(MakoError::UnsupportedConfig(format!(
					"title needs {title_px_width} pixels but the page is {page_width_px} wide"
				)));
			}

			let footer_height = (GLYPH_HEIGHT + 2) * font_scale;
			if footer_height >= page_height_px {
				return Err(MakoError::UnsupportedConfig(format!(
					"footer of {footer_height} rows does not fit a {page_height_px}-row page"
				)));
			}

			layout.footer_rows = footer_height;
			layout.data_height_px = page_height_px - footer_height;
			layout.title_px_width = title_px_width as u32;
			layout.text_left_col = (page_width_px - title_px_width as u32) / 2;
			layout.text_top_row = layout.data_height_px + font_scale;
		}

		layout.bits_per_page = u64::from(page_width_px)
			* u64::from(layout.data_height_px)
			* u64::from(channels.bits_per_pixel());
		debug_assert!(layout.bits_per_page > 0);

		Ok(layout)
	}

	/// Page width in pixels.
	pub fn page_width_px(&self) -> u32 {
		self.page_width_px
	}

	/// Page height in pixels.
	pub fn page_height_px(&self) -> u32 {
		self.page_height_px
	}

	/// Rows of the data region.
	pub fn data_height_px(&self) -> u32 {
		self.data_height_px
	}

	/// Rows of the footer stripe; 0 without a title.
	pub fn footer_rows(&self) -> u32 {
		self.footer_rows
	}

	/// Configured font scale.
	pub fn font_scale(&self) -> u32 {
		self.font_scale
	}

	/// Width of the rendered title in pixels; 0 without a title.
	pub fn title_px_width(&self) -> u32 {
		self.title_px_width
	}

	/// Leftmost column of the title bounding box.
	pub fn text_left_col(&self) -> u32 {
		self.text_left_col
	}

	/// Topmost row of the title bounding box.
	pub fn text_top_row(&self) -> u32 {
		self.text_top_row
	}

	/// Frame bits carried by the data region of one page.
	pub fn bits_per_page(&self) -> u64 {
		self.bits_per_page
	}
}
