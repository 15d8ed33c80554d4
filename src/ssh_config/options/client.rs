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

//! Client (`ssh_config`) option table

use super::{OptionSpec, ValueKind, ALL_TOKENS, HOSTNAME_TOKENS, PROXY_TOKENS};

const fn opt(name: &'static str, kind: ValueKind) -> OptionSpec {
    OptionSpec::new(name, kind)
}

pub static CLIENT_OPTIONS: &[OptionSpec] = &[
    // Connection
    opt("AddressFamily", ValueKind::AddressFamily),
    opt("BindAddress", ValueKind::String),
    opt("Compression", ValueKind::Bool),
    opt("ConnectTimeout", ValueKind::Int),
    opt("Hostname", ValueKind::String).expand(HOSTNAME_TOKENS),
    opt("Port", ValueKind::Int),
    opt("RekeyLimit", ValueKind::RekeyLimit),
    opt("ServerAliveCountMax", ValueKind::Int),
    opt("ServerAliveInterval", ValueKind::Int),
    opt("TCPKeepAlive", ValueKind::Bool),
    opt("User", ValueKind::String),
    // Proxy and control
    opt("ControlPath", ValueKind::String).expand(ALL_TOKENS),
    opt("ProxyCommand", ValueKind::Command).expand(PROXY_TOKENS),
    opt("ProxyJump", ValueKind::String),
    // Authentication
    opt("CertificateFile", ValueKind::AppendStringList).expand(ALL_TOKENS),
    opt("ChallengeResponseAuthentication", ValueKind::Bool),
    opt("EnableSSHKeySign", ValueKind::Bool),
    opt("GSSAPIAuthentication", ValueKind::Bool),
    opt("GSSAPIDelegateCredentials", ValueKind::Bool),
    opt("HostbasedAuthentication", ValueKind::Bool),
    opt("IdentitiesOnly", ValueKind::Bool),
    opt("IdentityAgent", ValueKind::String).expand(ALL_TOKENS),
    opt("IdentityFile", ValueKind::AppendStringList).expand(ALL_TOKENS),
    opt("KbdInteractiveAuthentication", ValueKind::Bool),
    opt("PasswordAuthentication", ValueKind::Bool),
    opt("PKCS11Provider", ValueKind::String),
    opt("PreferredAuthentications", ValueKind::String),
    opt("PubkeyAuthentication", ValueKind::Bool),
    // Algorithms and host keys
    opt("CASignatureAlgorithms", ValueKind::String),
    opt("Ciphers", ValueKind::String),
    opt("GlobalKnownHostsFile", ValueKind::StringList),
    opt("GSSAPIKexAlgorithms", ValueKind::String),
    opt("HostKeyAlgorithms", ValueKind::String),
    opt("HostKeyAlias", ValueKind::String),
    opt("KexAlgorithms", ValueKind::String),
    opt("MACs", ValueKind::String),
    opt("StrictHostKeyChecking", ValueKind::String),
    opt("UserKnownHostsFile", ValueKind::StringList).expand(ALL_TOKENS),
    // Session
    opt("ForwardAgent", ValueKind::Bool),
    opt("ForwardX11Trusted", ValueKind::Bool),
    opt("LocalCommand", ValueKind::Command).expand(ALL_TOKENS),
    opt("RemoteCommand", ValueKind::Command).expand(ALL_TOKENS),
    opt("RequestTTY", ValueKind::String),
    opt("SendEnv", ValueKind::AppendStringList),
];
