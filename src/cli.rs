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

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::ssh_config::ConfigPaths;

#[derive(Parser, Debug)]
#[command(
    name = "sshconf",
    version,
    about = "Resolve OpenSSH client and server configuration files",
    long_about = "sshconf evaluates OpenSSH-style configuration files the way ssh and sshd do.\nHost and Match blocks, Include directives and percent tokens are resolved and the\nresulting options are printed one per line as 'keyword value'.",
    after_help = "EXAMPLES:\n  Resolve options for a host:       sshconf client example.com\n  Use a specific config file:       sshconf client -F ./ssh_config -u admin -p 2222 web1\n  Resolve a server configuration:   sshconf server -f /etc/ssh/sshd_config\n  Show block evaluation details:    sshconf -vv client example.com"
)]
pub struct Cli {
    #[arg(
        short = 'v',
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Resolve the client configuration for a destination host",
        long_about = "Resolves ssh_config options for the given host.\nWithout -F, ~/.ssh/config and /etc/ssh/ssh_config are read if they exist.\nA user or port given here overrides any User or Port directive in the files."
    )]
    Client {
        #[arg(help = "Destination host name as it would be given to ssh")]
        host: String,

        #[arg(
            short = 'l',
            long,
            help = "Local user name used for %u and Match localuser [default: current user]"
        )]
        local_user: Option<String>,

        #[arg(short = 'u', long, help = "Remote user, overriding User directives")]
        user: Option<String>,

        #[arg(short = 'p', long, help = "Remote port, overriding Port directives")]
        port: Option<u16>,

        #[arg(
            short = 'F',
            long = "file",
            value_name = "SSH_CONFIG",
            help = "Configuration file to read (may be repeated, read in order)"
        )]
        files: Vec<PathBuf>,

        #[arg(long, conflicts_with = "files", help = "Do not read any configuration file")]
        no_config: bool,
    },

    #[command(about = "Resolve a server configuration")]
    Server {
        #[arg(
            short = 'f',
            long = "file",
            value_name = "SSHD_CONFIG",
            help = "Configuration file to read (may be repeated, read in order)\nDefaults to /etc/ssh/sshd_config if it exists"
        )]
        files: Vec<PathBuf>,

        #[arg(long, conflicts_with = "files", help = "Do not read any configuration file")]
        no_config: bool,
    },
}

/// Map the file arguments of a subcommand to the files to load
pub fn config_paths(files: Vec<PathBuf>, no_config: bool) -> ConfigPaths {
    if no_config {
        ConfigPaths::Disabled
    } else if files.is_empty() {
        ConfigPaths::Discover
    } else {
        ConfigPaths::Files(files)
    }
}
