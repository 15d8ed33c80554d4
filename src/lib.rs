pub mod cli;
pub mod ssh_config;
pub mod utils;

pub use cli::Cli;
pub use ssh_config::{
    load_client_config, load_client_config_async, load_server_config, load_server_config_async,
    Config, ConfigLoader, ConfigParseError, ConfigPaths, ConfigValue,
};
