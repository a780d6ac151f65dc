//! Build step: assemble the output artifact set.
//!
//! Loads `bundle.toml` when present (compiled-in defaults otherwise),
//! stages the shell document and static assets, and drives the external
//! bundler. A failed build exits non-zero and leaves no artifacts.

use std::path::Path;

use vitrine::BundleConfig;

fn main() -> vitrine::Result<()> {
    tracing_subscriber::fmt().init();

    let config = BundleConfig::load(Path::new("bundle.toml"))?;
    config.run()
}
