//! `makocode-rs` packs arbitrary binary payloads into high-density color
//! barcode pages meant for long-term archival on paper or film, and recovers
//! the payload from the scanned pages.
//!
//! All functionality lives in [`makocode_types`]; this crate re-exports it.
//!
//! ```rust
//! use makocode_rs::prelude::*;
//!
//! # fn main() -> Result<(), MakoError> {
//! let settings = Settings::new(ColorChannels::Gray, 500, 500);
//! let pages = PageSet::encode(b"hello, future", &settings)?;
//! assert_eq!(pages.decode()?, b"hello, future");
//! # Ok(())
//! # }
//! ```

pub use makocode_types::*;
