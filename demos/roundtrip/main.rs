//! Encode a payload to page files and decode them back.
//!
//! Writes an 8-color page set with a footer title into a temporary
//! directory, reopens the files, and verifies the decoded payload.
//!
//! ```bash
//! cargo run --example roundtrip
//! ```

use log::info;
use makocode_rs::prelude::*;

fn main() -> anyhow::Result<()> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let payload: Vec<u8> = b"MakoCode keeps bits legible on paper for decades. "
		.iter()
		.copied()
		.cycle()
		.take(16 * 1024)
		.collect();

	let settings =
		Settings::new(ColorChannels::EightColor, 640, 640).with_title("MAKOCODE DEMO", 2);
	info!("encoding {} bytes as {settings}", payload.len());

	let pages = PageSet::encode(&payload, &settings)?;
	info!("payload fits on {} page(s)", pages.len());

	let dir = tempfile::tempdir()?;
	let paths = pages.write_to_dir(dir.path())?;

	let reloaded = PageSet::open(&paths)?;
	let decoded = reloaded.decode()?;
	anyhow::ensure!(decoded == payload, "decoded payload differs from the original");
	info!("roundtrip OK: {} bytes recovered from {} file(s)", decoded.len(), paths.len());

	Ok(())
}
