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

//! Server (`sshd_config`) option table

use super::{OptionSpec, ValueKind};

const fn opt(name: &'static str, kind: ValueKind) -> OptionSpec {
    OptionSpec::new(name, kind)
}

pub static SERVER_OPTIONS: &[OptionSpec] = &[
    opt("AddressFamily", ValueKind::AddressFamily),
    opt("AllowAgentForwarding", ValueKind::Bool),
    opt("AuthorizedKeysFile", ValueKind::StringList),
    opt("BindAddress", ValueKind::String),
    opt("CASignatureAlgorithms", ValueKind::String),
    opt("ChallengeResponseAuthentication", ValueKind::Bool),
    opt("Ciphers", ValueKind::String),
    opt("ClientAliveCountMax", ValueKind::Int),
    opt("ClientAliveInterval", ValueKind::Int),
    opt("Compression", ValueKind::Bool),
    opt("GSSAPIAuthentication", ValueKind::Bool),
    opt("GSSAPIKexAlgorithms", ValueKind::String),
    opt("HostbasedAuthentication", ValueKind::Bool),
    opt("HostCertificate", ValueKind::AppendStringList),
    opt("HostKey", ValueKind::AppendStringList),
    opt("KbdInteractiveAuthentication", ValueKind::Bool),
    opt("KexAlgorithms", ValueKind::String),
    opt("LoginGraceTime", ValueKind::Int),
    opt("MACs", ValueKind::String),
    opt("PasswordAuthentication", ValueKind::Bool),
    opt("PermitTTY", ValueKind::Bool),
    opt("Port", ValueKind::Int),
    opt("PubkeyAuthentication", ValueKind::Bool),
    opt("RekeyLimit", ValueKind::RekeyLimit),
    opt("TCPKeepAlive", ValueKind::Bool),
    opt("UseDNS", ValueKind::Bool),
];
