use super::{load_settings_from, normalize_base_url, ClientSettings, DEFAULT_API_BASE_URL};

use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(label: &str, contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("crud_client_config_test_{label}_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("crud_client.toml");
    fs::write(&path, contents).expect("write settings");
    path
}

fn cleanup(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::remove_dir_all(parent).expect("cleanup");
    }
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(Path::new("does/not/exist.toml"), env_from(&[]));

    assert_eq!(settings, ClientSettings::default());
    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(settings.users_page, 2);
    assert_eq!(settings.api_key, None);
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        "file_values",
        r#"
api_base_url = "http://127.0.0.1:9000/api"
users_page = 1
api_key = "file-key"
request_timeout_secs = 3
"#,
    );

    let settings = load_settings_from(&path, env_from(&[]));

    assert_eq!(
        settings,
        ClientSettings {
            api_base_url: "http://127.0.0.1:9000/api".to_string(),
            users_page: 1,
            api_key: Some("file-key".to_string()),
            request_timeout_secs: 3,
        }
    );
    cleanup(&path);
}

#[test]
fn env_overrides_file_and_bad_numbers_are_ignored() {
    let path = temp_settings_file("env_overrides", "users_page = 1\n");

    let settings = load_settings_from(
        &path,
        env_from(&[
            ("APP__API_BASE_URL", "https://staging.example/api"),
            ("APP__USERS_PAGE", "not-a-number"),
            ("APP__REQUEST_TIMEOUT_SECS", "30"),
        ]),
    );

    assert_eq!(settings.api_base_url, "https://staging.example/api");
    assert_eq!(settings.users_page, 1);
    assert_eq!(settings.request_timeout_secs, 30);
    cleanup(&path);
}

#[test]
fn zero_request_timeout_keeps_default() {
    let path = temp_settings_file("zero_timeout", "request_timeout_secs = 0\n");

    let from_file = load_settings_from(&path, env_from(&[]));
    let from_env = load_settings_from(
        Path::new("does/not/exist.toml"),
        env_from(&[("APP__REQUEST_TIMEOUT_SECS", "0")]),
    );

    assert_eq!(from_file.request_timeout_secs, 10);
    assert_eq!(from_env.request_timeout_secs, 10);
    cleanup(&path);
}

#[test]
fn app_api_key_wins_over_reqres_key_and_blank_key_is_dropped() {
    let settings = load_settings_from(
        Path::new("does/not/exist.toml"),
        env_from(&[("REQRES_API_KEY", "reqres"), ("APP__API_KEY", "app")]),
    );
    assert_eq!(settings.api_key.as_deref(), Some("app"));

    let settings = load_settings_from(
        Path::new("does/not/exist.toml"),
        env_from(&[("APP__API_KEY", "  ")]),
    );
    assert_eq!(settings.api_key, None);
}

#[test]
fn unreadable_file_keeps_defaults() {
    let path = temp_settings_file("unreadable", "users_page = \"two\"\n");

    let settings = load_settings_from(&path, env_from(&[]));

    assert_eq!(settings, ClientSettings::default());
    cleanup(&path);
}

#[test]
fn normalizes_base_url() {
    assert_eq!(
        normalize_base_url(" https://reqres.in/api/ ").expect("valid"),
        "https://reqres.in/api"
    );
    assert!(normalize_base_url("reqres.in/api").is_err());
    assert!(normalize_base_url("ftp://reqres.in/api").is_err());
    assert!(normalize_base_url("https://reqres.in/api?page=2").is_err());
}
