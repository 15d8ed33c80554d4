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

//! Client configuration loading tests
//!
//! Configurations are written to a temporary directory and loaded with a
//! fixed local identity so that percent-token expansion is deterministic.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sshconf::ssh_config::{
    AddressFamily, Config, ConfigFileReader, ConfigLoader, ConfigParseError, ConfigPaths,
    ConfigValue, LimitValue, LocalIdentity, ParseErrorKind, RekeyLimit, SystemFileReader,
};
use tempfile::TempDir;

struct StaticIdentity {
    home: PathBuf,
}

impl LocalIdentity for StaticIdentity {
    fn hostname(&self) -> String {
        "thishost.local".to_string()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        Some(self.home.clone())
    }

    fn uid(&self) -> Option<u32> {
        Some(123)
    }
}

fn identity() -> StaticIdentity {
    StaticIdentity {
        home: PathBuf::from("/home/user"),
    }
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn parse_config_with(
    content: &str,
    user: Option<&str>,
    port: Option<u16>,
) -> Result<Config, ConfigParseError> {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "config", content);
    let identity = identity();

    ConfigLoader::new(&SystemFileReader, &identity).load_client("user", user, "host", port, path)
}

fn parse_config(content: &str) -> Result<Config, ConfigParseError> {
    parse_config_with(content, None, None)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn test_blank_and_comment_lines() {
    let config = parse_config("\n#Port 22").unwrap();
    assert_eq!(config.get("Port"), None);
    assert!(config.is_empty());
}

#[test]
fn test_set_bool() {
    for (value, expected) in [("yes", true), ("true", true), ("no", false), ("false", false)] {
        let config = parse_config(&format!("Compression {value}")).unwrap();
        assert_eq!(config.get_bool("Compression"), Some(expected), "value {value}");
    }

    let config = parse_config("Compression yes\nCompression no").unwrap();
    assert_eq!(config.get_bool("Compression"), Some(true));
}

#[test]
fn test_set_int() {
    let config = parse_config("Port 1").unwrap();
    assert_eq!(config.get_int("Port"), Some(1));

    let config = parse_config("Port 1\nPort 2").unwrap();
    assert_eq!(config.get_int("Port"), Some(1));
}

#[test]
fn test_set_string() {
    let config = parse_config("BindAddress addr").unwrap();
    assert_eq!(config.get_str("BindAddress"), Some("addr"));

    let config = parse_config("BindAddress addr1\nBindAddress addr2").unwrap();
    assert_eq!(config.get_str("BindAddress"), Some("addr1"));

    // An explicit none is kept and takes precedence over the caller's default
    let config = parse_config("BindAddress none").unwrap();
    let default = ConfigValue::String("default".to_string());
    assert_eq!(config.get_or("BindAddress", &default), &ConfigValue::None);
}

#[test]
fn test_set_address_family() {
    for (value, expected) in [
        ("any", AddressFamily::Unspecified),
        ("inet", AddressFamily::Inet),
        ("inet6", AddressFamily::Inet6),
    ] {
        let config = parse_config(&format!("AddressFamily {value}")).unwrap();
        assert_eq!(
            config.get("AddressFamily"),
            Some(&ConfigValue::AddressFamily(expected))
        );
    }

    let config = parse_config("AddressFamily inet\nAddressFamily inet6").unwrap();
    assert_eq!(
        config.get("AddressFamily"),
        Some(&ConfigValue::AddressFamily(AddressFamily::Inet))
    );
}

#[test]
fn test_set_rekey_limit() {
    let value = |text: &str| LimitValue::Value(text.to_string());

    let cases = [
        ("1", value("1"), LimitValue::Default),
        ("1 2", value("1"), value("2")),
        ("1 none", value("1"), LimitValue::None),
        ("default", LimitValue::Default, LimitValue::Default),
        ("default 2", LimitValue::Default, value("2")),
        ("default none", LimitValue::Default, LimitValue::None),
    ];

    for (text, size, time) in cases {
        let config = parse_config(&format!("RekeyLimit {text}")).unwrap();
        assert_eq!(
            config.get("RekeyLimit"),
            Some(&ConfigValue::RekeyLimit(RekeyLimit { size, time })),
            "RekeyLimit {text}"
        );
    }

    let config = parse_config("RekeyLimit 1 2\nRekeyLimit 3 4").unwrap();
    assert_eq!(
        config.get("RekeyLimit"),
        Some(&ConfigValue::RekeyLimit(RekeyLimit {
            size: value("1"),
            time: value("2"),
        }))
    );
}

#[test]
fn test_get_compression_algorithms() {
    let config = parse_config("Compression yes").unwrap();
    assert_eq!(
        config.get_compression_algorithms(None).as_deref(),
        Some("zlib@openssh.com,zlib,none")
    );

    let config = parse_config("Compression no").unwrap();
    assert_eq!(
        config.get_compression_algorithms(None).as_deref(),
        Some("none,zlib@openssh.com,zlib")
    );

    let config = parse_config("").unwrap();
    assert_eq!(
        config.get_compression_algorithms(Some("default")).as_deref(),
        Some("default")
    );
}

#[test]
fn test_include_relative_and_absolute() {
    let temp_dir = TempDir::new().unwrap();
    let include = write_file(&temp_dir, "include", "Port 2222");
    let identity = identity();
    let loader = ConfigLoader::new(&SystemFileReader, &identity);

    for target in ["include".to_string(), include.display().to_string()] {
        let path = write_file(&temp_dir, "config", &format!("Include {target}"));
        let config = loader
            .load_client("user", None, "host", None, path)
            .unwrap();
        assert_eq!(config.get_int("Port"), Some(2222), "Include {target}");
    }
}

#[test]
fn test_include_glob_in_lexical_order() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("config.d")).unwrap();
    write_file(&temp_dir, "config.d/20-b.conf", "Port 2\nIdentityFile b");
    write_file(&temp_dir, "config.d/10-a.conf", "Port 1\nIdentityFile a");
    let path = write_file(
        &temp_dir,
        "config",
        "Include config.d/*.conf config.d/*.missing\nIdentityFile c",
    );

    let identity = identity();
    let config = ConfigLoader::new(&SystemFileReader, &identity)
        .load_client("user", None, "host", None, path)
        .unwrap();

    assert_eq!(config.get_int("Port"), Some(1));
    assert_eq!(config.get_list("IdentityFile"), Some(&strings(&["a", "b", "c"])[..]));
}

#[test]
fn test_include_cycle_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir, "other", "Include config");
    let path = write_file(&temp_dir, "config", "Port 1\nInclude other");

    let identity = identity();
    let err = ConfigLoader::new(&SystemFileReader, &identity)
        .load_client("user", None, "host", None, path)
        .unwrap_err();

    assert!(matches!(err.kind(), ParseErrorKind::IncludeCycle(_)));
    assert_eq!(err.path, temp_dir.path().join("other"));
    assert_eq!(err.line, 1);
}

#[test]
fn test_missing_include_is_an_error() {
    let err = parse_config("Include /nonexistent/sshconf/include").unwrap_err();
    assert!(matches!(err.kind(), ParseErrorKind::ReadFailed { .. }));
    assert_eq!(err.line, 1);
}

#[test]
fn test_match_all() {
    let config = parse_config("Match all\nPort 2222").unwrap();
    assert_eq!(config.get_int("Port"), Some(2222));
}

#[test]
fn test_config_disabled() {
    let identity = identity();
    let config = ConfigLoader::new(&SystemFileReader, &identity)
        .load_client("user", None, "host", None, ConfigPaths::Disabled)
        .unwrap();
    assert!(config.is_empty());

    let config = ConfigLoader::new(&SystemFileReader, &identity)
        .load_client("user", None, "host", None, None::<PathBuf>)
        .unwrap();
    assert!(config.is_empty());
}

#[test]
fn test_config_list() {
    let temp_dir = TempDir::new().unwrap();
    let config1 = write_file(&temp_dir, "config1", "BindAddress addr");
    let config2 = write_file(&temp_dir, "config2", "Port 2222");

    let identity = identity();
    let config = ConfigLoader::new(&SystemFileReader, &identity)
        .load_client("user", None, "host", None, vec![config1, config2])
        .unwrap();

    assert_eq!(config.get_str("BindAddress"), Some("addr"));
    assert_eq!(config.get_int("Port"), Some(2222));
}

#[test]
fn test_missing_top_level_file() {
    let identity = identity();
    let err = ConfigLoader::new(&SystemFileReader, &identity)
        .load_client("user", None, "host", None, "/nonexistent/sshconf/config")
        .unwrap_err();

    assert!(matches!(err.kind(), ParseErrorKind::ReadFailed { .. }));
    assert_eq!(err.line, 0);
}

#[test]
fn test_unknown_option_is_ignored() {
    let config = parse_config("XXX\nYYY some value\nPort 22").unwrap();
    assert_eq!(config.get("XXX"), None);
    assert_eq!(config.get_int("Port"), Some(22));
}

#[test]
fn test_errors() {
    let cases: [(&str, fn(&ParseErrorKind) -> bool); 9] = [
        ("AddressFamily", |k| matches!(k, ParseErrorKind::MissingValue { .. })),
        ("BindAddress \"foo", |k| matches!(k, ParseErrorKind::UnbalancedQuotes)),
        ("RemoteCommand echo \"foo", |k| matches!(k, ParseErrorKind::UnbalancedQuotes)),
        ("ProxyCommand nc 'host %p", |k| matches!(k, ParseErrorKind::UnbalancedQuotes)),
        ("BindAddress foo bar", |k| matches!(k, ParseErrorKind::ExtraData { .. })),
        ("AddressFamily xxx", |k| {
            matches!(k, ParseErrorKind::InvalidAddressFamily { .. })
        }),
        ("Compression xxx", |k| matches!(k, ParseErrorKind::InvalidBoolean { .. })),
        ("Port xxx", |k| matches!(k, ParseErrorKind::InvalidInteger { .. })),
        ("Match xxx", |k| matches!(k, ParseErrorKind::InvalidMatchCondition(_))),
    ];

    for (content, expected) in cases {
        let err = parse_config(content).unwrap_err();
        assert!(expected(err.kind()), "{content}: unexpected error {err}");
        assert_eq!(err.line, 1);
    }
}

#[test]
fn test_error_reports_location() {
    let err = parse_config("Port 22\n\n# comment\nCompression maybe").unwrap_err();
    assert_eq!(err.line, 4);
    assert!(err.path.ends_with("config"));
    assert!(err.to_string().ends_with(":4: Invalid Compression boolean value: maybe"));
}

#[test]
fn test_append_string() {
    let config = parse_config("IdentityFile foo\nIdentityFile bar").unwrap();
    assert_eq!(config.get_list("IdentityFile"), Some(&strings(&["foo", "bar"])[..]));

    let config = parse_config("IdentityFile foo\nIdentityFile none").unwrap();
    assert_eq!(config.get_list("IdentityFile"), Some(&strings(&["foo"])[..]));

    let config = parse_config("IdentityFile none").unwrap();
    assert_eq!(config.get_list("IdentityFile"), Some(&[][..]));

    let config = parse_config("IdentityFile foo\nIdentityFile none\nIdentityFile bar").unwrap();
    assert_eq!(config.get_list("IdentityFile"), Some(&strings(&["foo"])[..]));
}

#[test]
fn test_set_string_list() {
    let config = parse_config("UserKnownHostsFile file1 file2").unwrap();
    assert_eq!(
        config.get_list("UserKnownHostsFile"),
        Some(&strings(&["file1", "file2"])[..])
    );

    let config = parse_config("UserKnownHostsFile file1\nUserKnownHostsFile file2").unwrap();
    assert_eq!(config.get_list("UserKnownHostsFile"), Some(&strings(&["file1"])[..]));
}

#[test]
fn test_append_string_list() {
    let config = parse_config("SendEnv foo\nSendEnv  bar baz").unwrap();
    assert_eq!(
        config.get_list("SendEnv"),
        Some(&strings(&["foo", "bar", "baz"])[..])
    );
}

#[test]
fn test_set_remote_command() {
    let config = parse_config("    RemoteCommand     foo  bar  baz").unwrap();
    assert_eq!(config.get_str("RemoteCommand"), Some("foo  bar  baz"));
}

#[test]
fn test_set_and_match_hostname() {
    let config = parse_config(
        "Host host\n         \x20 Hostname new%h\n         Match originalhost host\n         \x20 BindAddress addr\n         Match host host\n         \x20 Port 1111\n         Match host newhost\n         \x20 Hostname newhost2\n         \x20 Port 2222",
    )
    .unwrap();

    assert_eq!(config.get_str("Hostname"), Some("newhost"));
    assert_eq!(config.get_str("BindAddress"), Some("addr"));
    assert_eq!(config.get_int("Port"), Some(2222));
}

#[test]
fn test_set_and_match_user() {
    let config = parse_config(
        "User newuser\n         Match localuser user\n         \x20 BindAddress addr\n         Match user user\n         \x20 Port 1111\n         Match user new*\n         \x20 User newuser2\n         \x20 Port 2222",
    )
    .unwrap();

    assert_eq!(config.get_str("User"), Some("newuser"));
    assert_eq!(config.get_str("BindAddress"), Some("addr"));
    assert_eq!(config.get_int("Port"), Some(2222));
}

#[test]
fn test_user_none_keeps_previous_effective_user() {
    let config = parse_config(
        "User none
         Hostname none
         Match user user host host
         \x20 Port 2222",
    )
    .unwrap();

    assert_eq!(config.get("User"), Some(&ConfigValue::None));
    assert_eq!(config.get("Hostname"), Some(&ConfigValue::None));
    assert_eq!(config.get_str("User"), None);
    assert_eq!(config.get_int("Port"), Some(2222));
}

#[test]
fn test_host_negation_and_wildcards() {
    let config = parse_config(
        "Host *.example.com !host\n         \x20 Port 1\n         Host h?st\n         \x20 Port 2",
    )
    .unwrap();
    assert_eq!(config.get_int("Port"), Some(2));
}

#[test]
fn test_port_already_set() {
    let config = parse_config_with("Port 2222", None, Some(22)).unwrap();
    assert_eq!(config.get("Port"), None);
}

#[test]
fn test_user_already_set() {
    let config = parse_config_with("User newuser", Some("user"), None).unwrap();
    assert_eq!(config.get("User"), None);
}

#[test]
fn test_external_user_drives_match() {
    let config = parse_config_with("Match user admin\n  Port 2222", Some("admin"), None).unwrap();
    assert_eq!(config.get_int("Port"), Some(2222));
}

#[test]
fn test_percent_expansion() {
    let config = parse_config(
        "Hostname newhost\n         User newuser\n         Port 2222\n         RemoteCommand %% %C %d %h %L %l %n %p %r %u",
    )
    .unwrap();

    assert_eq!(
        config.get_str("RemoteCommand"),
        Some(
            "% 98625d1ca14854f2cdc34268f2afcad5237e2d9d              /home/user newhost thishost thishost.local              host 2222 newuser user"
        )
    );
}

#[test]
fn test_uid_percent_expansion() {
    let config = parse_config("RemoteCommand %i").unwrap();
    assert_eq!(config.get_str("RemoteCommand"), Some("123"));
}

#[test]
fn test_path_options_are_expanded() {
    let config = parse_config(
        "IdentityFile %d/.ssh/id_%r\n         ControlPath /tmp/ssh-%C\n         ProxyCommand nc %h %p",
    )
    .unwrap();

    assert_eq!(
        config.get_list("IdentityFile"),
        Some(&strings(&["/home/user/.ssh/id_user"])[..])
    );
    assert_eq!(config.get_str("ProxyCommand"), Some("nc host 22"));
    assert!(config
        .get_str("ControlPath")
        .is_some_and(|path| path.len() == "/tmp/ssh-".len() + 40));
}

#[test]
fn test_missing_match_pattern() {
    let err = parse_config("Match host").unwrap_err();
    assert!(matches!(err.kind(), ParseErrorKind::MissingPattern(_)));
}

#[test]
fn test_invalid_percent_expansion() {
    for content in ["Hostname %p", "IdentityFile %x", "IdentityFile %"] {
        let err = parse_config(content).unwrap_err();
        assert!(
            matches!(
                err.kind(),
                ParseErrorKind::InvalidToken { .. } | ParseErrorKind::TrailingPercent { .. }
            ),
            "{content}: unexpected error {err}"
        );
    }
}

/// Reader that only sees files under a sandbox directory
struct SandboxReader {
    root: PathBuf,
}

impl ConfigFileReader for SandboxReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        if path.starts_with(&self.root) {
            fs::read_to_string(path)
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "outside sandbox"))
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.starts_with(&self.root) && path.is_file()
    }
}

#[test]
fn test_default_paths_use_home_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join(".ssh")).unwrap();
    write_file(&temp_dir, ".ssh/config", "Host host\n  Port 2200");

    let reader = SandboxReader {
        root: temp_dir.path().to_path_buf(),
    };
    let identity = StaticIdentity {
        home: temp_dir.path().to_path_buf(),
    };

    let config = ConfigLoader::new(&reader, &identity)
        .load_client("user", None, "host", None, ConfigPaths::Discover)
        .unwrap();
    assert_eq!(config.get_int("Port"), Some(2200));

    let config = ConfigLoader::new(&reader, &identity)
        .load_client("user", None, "other", None, ConfigPaths::Discover)
        .unwrap();
    assert!(config.is_empty());
}

#[tokio::test]
async fn test_async_client_loader() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(&temp_dir, "config", "Host web*\n  User deploy\n  Port 2022");

    let config = sshconf::load_client_config_async(
        "user".to_string(),
        None,
        "web1".to_string(),
        None,
        ConfigPaths::from(path.clone()),
    )
    .await
    .unwrap();
    assert_eq!(config.get_str("User"), Some("deploy"));
    assert_eq!(config.get_int("Port"), Some(2022));

    let bad = write_file(&temp_dir, "bad", "Port xxx");
    let err = sshconf::load_client_config_async(
        "user".to_string(),
        None,
        "web1".to_string(),
        None,
        ConfigPaths::from(bad),
    )
    .await
    .unwrap_err();
    let parse_error = err.downcast_ref::<ConfigParseError>().unwrap();
    assert_eq!(parse_error.line, 1);
}
