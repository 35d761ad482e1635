//! Core types and codecs for the MakoCode archival barcode format.
//!
//! MakoCode turns an arbitrary binary payload into one or more printable
//! raster pages, and turns scanned pages back into the payload. The pipeline
//! is:
//!
//! | Stage | Module | Role |
//! |---|---|---|
//! | compression | [`lzw`] | 12-bit LZW over the payload bytes |
//! | framing | [`frame`] | 64-bit length header, diffusion for 8-color |
//! | pixel mapping | [`palette`] | palette index ↔ RGB, 1-3 bits per pixel |
//! | layout | [`layout`], [`footer`], [`font`] | data region and title band |
//! | container | [`ppm`] | plain-ASCII raster with `# KEY VALUE` metadata |
//! | pagination | [`page`] | slicing, per-page headers, reassembly |
//!
//! # Examples
//!
//! ```rust
//! use makocode_types::page::{PageSet, Settings};
//! use makocode_types::palette::ColorChannels;
//!
//! # fn main() -> Result<(), makocode_types::error::MakoError> {
//! let settings = Settings::new(ColorChannels::Cmyw, 120, 120);
//! let pages = PageSet::encode(b"archive me", &settings)?;
//! assert_eq!(pages.decode()?, b"archive me");
//! # Ok(())
//! # }
//! ```

pub mod bits;
pub mod error;
pub mod font;
pub mod footer;
pub mod frame;
pub mod layout;
pub mod lzw;
pub mod page;
pub mod palette;
pub mod ppm;
pub mod prelude;

// Re-export the everyday types at the crate root for convenience
pub use error::MakoError;
pub use layout::PageLayout;
pub use page::{Page, PageSet, Settings};
pub use palette::{Color, ColorChannels};
pub use ppm::PageHeader;
