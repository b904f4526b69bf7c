//! Configuration for stepwise.
//!
//! Settings come from a `.stepwise.toml` file, either discovered from the
//! working directory upwards or named explicitly on the command line.

mod core;
mod loader;

pub use self::core::{DomainConfig, OutputConfig, StepwiseConfig, SymbolsConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

/// The file `stepwise init` writes.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# stepwise configuration

[symbols]
# Names the parser accepts as unknowns.
unknowns = ["x", "y", "z"]

[limits]
# Largest integer exponent the engine will expand.
max_exponent = 64
# Most terms an expanded polynomial may have.
max_terms = 1024

[domain.keywords]
# Label = keywords that select it (case-insensitive).
# algebra = ["equation", "solve"]
# geometry = ["triangle", "circle", "angle"]

[output]
# terminal, json or markdown
default_format = "terminal"
"#;
