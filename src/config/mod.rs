/// Plan file loading from TOML
pub mod plan;

/// Environment-driven runtime settings
pub mod settings;

pub use plan::{Plan, load_plan, parse_plan};
pub use settings::Settings;
