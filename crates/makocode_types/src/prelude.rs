//! Prelude module for `makocode_types`.
//!
//! This module provides a convenient way to import the commonly used types.
//!
//! # Examples
//!
//! ```no_run
//! use makocode_types::prelude::*;
//!
//! let settings = Settings::new(ColorChannels::Gray, 500, 500);
//! let pages = PageSet::encode(b"payload", &settings).unwrap();
//! ```

#[doc(inline)]
pub use crate::error::MakoError;

#[doc(inline)]
pub use crate::page::{Page, PageSet, Settings};

#[doc(inline)]
pub use crate::palette::{Color, ColorChannels};

#[doc(inline)]
pub use crate::layout::PageLayout;

#[doc(inline)]
pub use crate::ppm::{PageHeader, keys};

// Re-export the module tree for advanced usage
#[doc(inline)]
pub use crate::{bits, font, footer, frame, layout, lzw, page, palette, ppm};
