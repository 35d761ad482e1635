//! Print the self-describing metadata of page files.
//!
//! ```bash
//! cargo run --example page_info -- page1.ppm page2.ppm
//! ```

use makocode_rs::prelude::*;

fn main() -> anyhow::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let paths: Vec<String> = std::env::args().skip(1).collect();
	anyhow::ensure!(!paths.is_empty(), "usage: page_info <PAGE.ppm>...");

	for path in &paths {
		let page = Page::open(path)?;
		println!("{path}: {}x{} pixels", page.width(), page.height());
		println!("{}", page.header());
		println!();
	}

	Ok(())
}
