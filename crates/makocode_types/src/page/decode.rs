//! Pages-to-payload decoding.
//!
//! Decoding walks the supplied pages once: the first page must fully
//! describe the set, every later page may only repeat or fill in metadata,
//! and page indices must count up from 1 unless some page omits its index,
//! which suspends order enforcement from that point on. Data pixels are
//! mapped back to palette indices (exact matches only), the per-page bit
//! buffers are concatenated, un-diffused for the 8-color palette, and the
//! frame is unwrapped and decompressed.

use log::debug;

use super::Page;
use crate::bits::BitWriter;
use crate::error::MakoError;
use crate::frame;
use crate::lzw;
use crate::palette::ColorChannels;
use crate::ppm::{PageHeader, keys};

fn require(value: Option<u64>, key: &str) -> Result<u64, MakoError> {
	value.ok_or_else(|| MakoError::MetadataConflict(format!("first page is missing {key}")))
}

pub(super) fn decode(pages: &[Page]) -> Result<Vec<u8>, MakoError> {
	let Some(first) = pages.first() else {
		return Err(MakoError::MetadataConflict("no pages supplied".to_string()));
	};

	let fh = first.header();
	let channels_id = require(fh.color_channels, keys::COLOR_CHANNELS)?;
	let payload_bits = require(fh.payload_bits, keys::PAYLOAD_BITS)?;
	let page_count = require(fh.page_count, keys::PAGE_COUNT)?;
	require(fh.page_index, keys::PAGE_INDEX)?;
	let page_bits = require(fh.page_bits, keys::PAGE_BITS)?;
	require(fh.page_width_px, keys::PAGE_WIDTH)?;
	require(fh.page_height_px, keys::PAGE_HEIGHT)?;

	let channels_id = u32::try_from(channels_id).map_err(|_| {
		MakoError::UnsupportedConfig(format!("color channels value {channels_id} out of range"))
	})?;
	let channels = ColorChannels::try_from(channels_id)?;

	// Merge metadata across pages; the per-page index is validated
	// separately since it is the one key meant to differ.
	let mut merged = PageHeader::default();
	let mut enforce_order = true;
	for (i, page) in pages.iter().enumerate() {
		let mut header = *page.header();
		match header.page_index.take() {
			None => enforce_order = false,
			Some(index) => {
				let expected = i as u64 + 1;
				if enforce_order && index != expected {
					return Err(MakoError::MetadataConflict(format!(
						"page {index} arrived where page {expected} was expected"
					)));
				}
			}
		}
		merged.merge(&header)?;
		merged.set(keys::PAGE_WIDTH, u64::from(page.width()))?;
		merged.set(keys::PAGE_HEIGHT, u64::from(page.height()))?;
	}

	if pages.len() as u64 != page_count {
		return Err(MakoError::MetadataConflict(format!(
			"set declares {page_count} page(s) but {} were supplied",
			pages.len()
		)));
	}

	let width = first.width();
	let height = first.height();
	let footer_rows = merged.footer_rows.unwrap_or(0);
	if footer_rows >= u64::from(height) {
		return Err(MakoError::MetadataConflict(format!(
			"footer of {footer_rows} rows swallows the whole {height}-row page"
		)));
	}
	let data_height = height - footer_rows as u32;
	let expected_bits =
		u64::from(width) * u64::from(data_height) * u64::from(channels.bits_per_pixel());
	if expected_bits != page_bits {
		return Err(MakoError::MetadataConflict(format!(
			"declared page capacity {page_bits} disagrees with the {expected_bits}-bit data region"
		)));
	}

	debug!(
		"decoding {} page(s) of {} bits, {} payload bits expected",
		pages.len(),
		page_bits,
		payload_bits
	);

	let data_pixels = width as usize * data_height as usize;
	let mut writer = BitWriter::with_capacity((page_bits / 8 + 1) as usize * pages.len());
	for page in pages {
		for &color in &page.pixels()[..data_pixels] {
			let palette_index = channels.index_of(color)?;
			writer.write_bits(u64::from(palette_index), channels.bits_per_pixel());
		}
	}

	let total_bits = writer.bit_count();
	let mut frame_bytes = writer.into_bytes();
	if channels == ColorChannels::EightColor {
		frame::undiffuse(&mut frame_bytes);
	}

	let compressed = frame::unwrap(&frame_bytes, total_bits, payload_bits)?;
	lzw::decompress(&compressed)
}
