//! Payload-to-pages encoding.
//!
//! The pipeline is straight-line: compress the payload, frame it, diffuse
//! the frame bytes for the 8-color palette, then slice the frame bit stream
//! into per-page rasters at the layout's bit capacity. The final page is
//! padded with zero bits, so its tail renders as palette index 0.

use log::debug;

use super::{Page, Settings};
use crate::bits::BitReader;
use crate::error::MakoError;
use crate::footer;
use crate::frame;
use crate::lzw;
use crate::palette::ColorChannels;
use crate::ppm::{PageHeader, Raster};

/// Payloads must stay below 2^32 bytes.
const MAX_PAYLOAD_BYTES: u64 = 1 << 32;

pub(super) fn encode(payload: &[u8], settings: &Settings) -> Result<Vec<Page>, MakoError> {
	if payload.len() as u64 >= MAX_PAYLOAD_BYTES {
		return Err(MakoError::InputTooLarge {
			what: "payload byte count",
			value: payload.len() as u64,
			limit: MAX_PAYLOAD_BYTES - 1,
		});
	}
	let (title, layout) = settings.resolve()?;
	let channels = settings.color_channels();

	let compressed = lzw::compress(payload);
	let framed = frame::wrap(&compressed);
	let frame_bit_count = framed.bit_count();
	let payload_bit_count = framed.payload_bit_count();
	let mut frame_bytes = framed.into_bytes();
	if channels == ColorChannels::EightColor {
		frame::diffuse(&mut frame_bytes);
	}

	let bits_per_page = layout.bits_per_page();
	let page_count = frame_bit_count.div_ceil(bits_per_page).max(1);
	if page_count > u64::from(u32::MAX) {
		return Err(MakoError::InputTooLarge {
			what: "page count",
			value: page_count,
			limit: u64::from(u32::MAX),
		});
	}
	debug!(
		"encoding {} payload bytes as {} frame bits on {} page(s) of {} bits",
		payload.len(),
		frame_bit_count,
		page_count,
		bits_per_page
	);

	let width = layout.page_width_px();
	let height = layout.page_height_px();
	let data_pixels = width as usize * layout.data_height_px() as usize;
	let page_pixels = width as usize * height as usize;
	let bits_per_pixel = channels.bits_per_pixel();
	let palette = channels.palette();

	let mut header = PageHeader {
		color_channels: Some(u64::from(bits_per_pixel)),
		payload_bits: Some(payload_bit_count),
		page_count: Some(page_count),
		page_index: None,
		page_bits: Some(bits_per_page),
		page_width_px: Some(u64::from(width)),
		page_height_px: Some(u64::from(height)),
		footer_rows: None,
		title_font: None,
	};
	if layout.footer_rows() > 0 {
		header.footer_rows = Some(u64::from(layout.footer_rows()));
		header.title_font = Some(u64::from(layout.font_scale()));
	}

	// Reading past the end of the frame yields zero bits, which is exactly
	// the padding the final page needs.
	let mut reader = BitReader::with_bit_count(&frame_bytes, frame_bit_count);
	let mut pages = Vec::with_capacity(page_count as usize);
	for index in 1..=page_count {
		let mut pixels = Vec::new();
		pixels
			.try_reserve_exact(page_pixels)
			.map_err(|_| MakoError::AllocationFailure {
				what: "page pixel buffer",
				requested: page_pixels * std::mem::size_of::<crate::palette::Color>(),
			})?;
		for _ in 0..data_pixels {
			let palette_index = reader.read_bits(bits_per_pixel) as usize;
			pixels.push(palette[palette_index]);
		}
		if let Some(title) = &title {
			footer::render_footer(&mut pixels, &layout, title, channels)?;
		}

		header.page_index = Some(index);
		pages.push(Page {
			header,
			raster: Raster {
				width,
				height,
				pixels,
			},
		});
	}

	Ok(pages)
}
