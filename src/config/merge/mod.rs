//! Config composition: defaults plus layered sources.

pub mod service;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Builder pre-seeded with the built-in defaults (lowest precedence).
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default(
            "export.min_root_children",
            super::default_min_root_children() as u64,
        )?
        .set_default("export.require_single_root", false)?
        .set_default("export.compression", "deflated")?
        .set_default("export.output_dir", ".")
}
