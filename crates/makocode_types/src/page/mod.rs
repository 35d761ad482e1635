//! Page assembly and the public encode/decode surface.
//!
//! ## Overview
//!
//! A payload is compressed, framed, and painted across one or more raster
//! pages; each page is self-describing through its header comments, so a
//! scanned set can be decoded with nothing but the page files themselves.
//!
//! ```no_run
//! use makocode_types::page::{PageSet, Settings};
//! use makocode_types::palette::ColorChannels;
//!
//! # fn main() -> Result<(), makocode_types::error::MakoError> {
//! let settings = Settings::new(ColorChannels::Gray, 500, 500);
//! let pages = PageSet::encode(b"payload bytes", &settings)?;
//! let paths = pages.write_to_dir("out")?;
//!
//! let reloaded = PageSet::open(&paths)?;
//! assert_eq!(reloaded.decode()?, b"payload bytes");
//! # Ok(())
//! # }
//! ```

mod decode;
mod encode;

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::MakoError;
use crate::font;
use crate::layout::PageLayout;
use crate::palette::{Color, ColorChannels};
use crate::ppm::{self, PageHeader, Raster};

/// Parameters of one encode run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
	color_channels: ColorChannels,
	page_width_px: u32,
	page_height_px: u32,
	title: Option<String>,
	title_font: u32,
}

impl Settings {
	/// Creates settings for the given palette and page dimensions, without a
	/// footer title.
	pub fn new(color_channels: ColorChannels, page_width_px: u32, page_height_px: u32) -> Self {
		Self {
			color_channels,
			page_width_px,
			page_height_px,
			title: None,
			title_font: 1,
		}
	}

	/// Adds a footer title at the given font scale. Lowercase letters are
	/// normalized to uppercase at encode time.
	pub fn with_title(mut self, title: impl Into<String>, title_font: u32) -> Self {
		self.title = Some(title.into());
		self.title_font = title_font;
		self
	}

	/// Selected palette.
	pub fn color_channels(&self) -> ColorChannels {
		self.color_channels
	}

	/// Page width in pixels.
	pub fn page_width_px(&self) -> u32 {
		self.page_width_px
	}

	/// Page height in pixels.
	pub fn page_height_px(&self) -> u32 {
		self.page_height_px
	}

	/// Configured footer title, if any.
	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	/// Configured footer font scale.
	pub fn title_font(&self) -> u32 {
		self.title_font
	}

	/// Validates the settings, returning the normalized title and the page
	/// layout they imply.
	pub(crate) fn resolve(&self) -> Result<(Option<String>, PageLayout), MakoError> {
		let title = match &self.title {
			Some(title) if !title.is_empty() => Some(font::normalize_title(title)?),
			_ => None,
		};
		let layout = PageLayout::compute(
			self.color_channels,
			self.page_width_px,
			self.page_height_px,
			title.as_deref(),
			self.title_font,
		)?;
		Ok((title, layout))
	}
}

impl fmt::Display for Settings {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} {}x{} pages",
			self.color_channels, self.page_width_px, self.page_height_px
		)?;
		if let Some(title) = &self.title {
			write!(f, ", title {:?} at scale {}", title, self.title_font)?;
		}
		Ok(())
	}
}

/// One raster page: self-describing metadata plus pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
	header: PageHeader,
	raster: Raster,
}

impl Page {
	/// Returns the page metadata.
	pub fn header(&self) -> &PageHeader {
		&self.header
	}

	/// Page width in pixels.
	pub fn width(&self) -> u32 {
		self.raster.width
	}

	/// Page height in pixels.
	pub fn height(&self) -> u32 {
		self.raster.height
	}

	/// Row-major page pixels, data region first, then the footer stripe.
	pub fn pixels(&self) -> &[Color] {
		&self.raster.pixels
	}

	/// Serializes the page into container bytes.
	pub fn to_bytes(&self) -> Vec<u8> {
		ppm::serialize(&self.header, &self.raster)
	}

	/// Parses a page from container bytes.
	pub fn from_bytes(data: &[u8]) -> Result<Self, MakoError> {
		let (header, raster) = ppm::parse(data)?;
		for (declared, actual, what) in [
			(header.page_width_px, raster.width, "width"),
			(header.page_height_px, raster.height, "height"),
		] {
			if let Some(declared) = declared {
				if declared != u64::from(actual) {
					return Err(MakoError::MetadataConflict(format!(
						"declared page {what} {declared} disagrees with the {actual}-pixel raster"
					)));
				}
			}
		}
		Ok(Self {
			header,
			raster,
		})
	}

	/// Opens and parses a page file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, MakoError> {
		Self::from_bytes(&std::fs::read(path)?)
	}

	/// Writes the page to a file, replacing any existing file.
	pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), MakoError> {
		std::fs::write(path, self.to_bytes())?;
		Ok(())
	}
}

impl TryFrom<&[u8]> for Page {
	type Error = MakoError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

impl From<&Page> for Vec<u8> {
	fn from(page: &Page) -> Self {
		page.to_bytes()
	}
}

/// An ordered set of pages jointly carrying one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSet {
	pages: Vec<Page>,
}

impl PageSet {
	/// Encodes a payload into pages.
	pub fn encode(payload: &[u8], settings: &Settings) -> Result<Self, MakoError> {
		Ok(Self {
			pages: encode::encode(payload, settings)?,
		})
	}

	/// Decodes the payload carried by the pages, which must be supplied in
	/// page-index order.
	pub fn decode(&self) -> Result<Vec<u8>, MakoError> {
		decode::decode(&self.pages)
	}

	/// Wraps already-parsed pages without validating them; validation
	/// happens on decode.
	pub fn from_pages(pages: Vec<Page>) -> Self {
		Self {
			pages,
		}
	}

	/// The pages, in the order they will be decoded.
	pub fn pages(&self) -> &[Page] {
		&self.pages
	}

	/// Number of pages in the set.
	pub fn len(&self) -> usize {
		self.pages.len()
	}

	/// Returns true when the set holds no pages.
	pub fn is_empty(&self) -> bool {
		self.pages.is_empty()
	}

	/// Consumes the set, returning its pages.
	pub fn into_pages(self) -> Vec<Page> {
		self.pages
	}

	/// Opens page files in the given order.
	pub fn open<P: AsRef<Path>>(paths: &[P]) -> Result<Self, MakoError> {
		let mut pages = Vec::with_capacity(paths.len());
		for path in paths {
			pages.push(Page::open(path)?);
		}
		Ok(Self {
			pages,
		})
	}

	/// Writes every page into `dir` under timestamped names, creating the
	/// directory if needed. Returns the written paths in page order.
	pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, MakoError> {
		let dir = dir.as_ref();
		std::fs::create_dir_all(dir)?;
		let names = self.file_names_at(Utc::now());
		let mut paths = Vec::with_capacity(names.len());
		for (page, name) in self.pages.iter().zip(names) {
			let path = dir.join(name);
			page.write_to(&path)?;
			info!("wrote {}", path.display());
			paths.push(path);
		}
		Ok(paths)
	}

	/// File names the set would be written under at the given instant:
	/// `<UTC>.ppm` for a single page, `<UTC>_page_NNNN.ppm` otherwise.
	pub fn file_names_at(&self, stamp: DateTime<Utc>) -> Vec<String> {
		let stamp = stamp.format("%Y%m%dT%H%M%SZ");
		if self.pages.len() == 1 {
			return vec![format!("{stamp}.ppm")];
		}
		(1..=self.pages.len())
			.map(|index| format!("{stamp}_page_{index:04}.ppm"))
			.collect()
	}
}
