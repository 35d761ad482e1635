//! Footer stripe rendering.

use crate::error::MakoError;
use crate::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::layout::PageLayout;
use crate::palette::{Color, ColorChannels};

/// Appends the footer stripe to a page raster holding exactly the data
/// region, then paints the title into it.
///
/// `pixels` must contain `page_width * data_height` colors; on return it
/// contains the full page. `title` must already be normalized. Does nothing
/// when the layout has no footer.
pub fn render_footer(
	pixels: &mut Vec<Color>,
	layout: &PageLayout,
	title: &str,
	channels: ColorChannels,
) -> Result<(), MakoError> {
	debug_assert_eq!(
		pixels.len(),
		layout.page_width_px() as usize * layout.data_height_px() as usize
	);
	if layout.footer_rows() == 0 {
		return Ok(());
	}

	let width = layout.page_width_px() as usize;
	let background = channels.footer_background();
	let text = channels.footer_text();
	pixels.resize(width * layout.page_height_px() as usize, background);

	let scale = layout.font_scale();
	let advance = (GLYPH_WIDTH + 1) * scale;
	for (i, ch) in title.chars().enumerate() {
		let Some(glyph) = font::glyph(ch) else {
			return Err(MakoError::UnsupportedConfig(format!(
				"unsupported title character {ch:?}"
			)));
		};
		let glyph_left = layout.text_left_col() + i as u32 * advance;
		for gy in 0..GLYPH_HEIGHT {
			for gx in 0..GLYPH_WIDTH {
				if !glyph.get_pixel(gx, gy) {
					continue;
				}
				// Paint one scale×scale block per set font pixel.
				let left = (glyph_left + gx * scale) as usize;
				let top = (layout.text_top_row() + gy * scale) as usize;
				for row in top..top + scale as usize {
					let start = row * width + left;
					pixels[start..start + scale as usize].fill(text);
				}
			}
		}
	}

	Ok(())
}
