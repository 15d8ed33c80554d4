// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::{Context, Result};
use clap::Parser;

use sshconf::{
    cli::{config_paths, Cli, Commands},
    load_client_config_async, load_server_config_async,
    utils::init_logging,
    Config,
};

/// Compression preference when no configuration enables it
const DEFAULT_COMPRESSION: &str = "none,zlib@openssh.com,zlib";

/// Print resolved options as lowercase 'keyword value' lines, like ssh -G
fn print_config(config: &Config) {
    for (keyword, value) in config.iter() {
        println!("{} {}", keyword.to_lowercase(), value);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Client {
            host,
            local_user,
            user,
            port,
            files,
            no_config,
        } => {
            let local_user = local_user.unwrap_or_else(whoami::username);
            tracing::debug!("Resolving client configuration for {} as {}", host, local_user);

            let config = load_client_config_async(
                local_user,
                user,
                host.clone(),
                port,
                config_paths(files, no_config),
            )
            .await
            .with_context(|| format!("Failed to load SSH client configuration for {host}"))?;

            print_config(&config);
            if let Some(algorithms) = config.get_compression_algorithms(Some(DEFAULT_COMPRESSION)) {
                println!("compression-algorithms {algorithms}");
            }
        }
        Commands::Server { files, no_config } => {
            let config = load_server_config_async(config_paths(files, no_config))
                .await
                .context("Failed to load SSH server configuration")?;

            print_config(&config);
            if let Some(algorithms) = config.get_compression_algorithms(Some(DEFAULT_COMPRESSION)) {
                println!("compression-algorithms {algorithms}");
            }
        }
    }

    Ok(())
}
