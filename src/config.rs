use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use cross_xdg::BaseDirs;

use crate::engine::EofPolicy;

/// File name looked up under the XDG config home.
pub const CONFIG_FILE: &str = "bfvm.toml";

/// Overrides the config file location (mainly for tests).
pub const ENV_CONFIG: &str = "BFVM_CONFIG";
pub const ENV_EOF: &str = "BFVM_EOF";
pub const ENV_VERBOSE: &str = "BFVM_VERBOSE";

/// Resolved engine and front-end settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub eof: EofPolicy,
    pub verbose: bool,
}

/// Values taken from command-line flags. `None`/`false` defers to env and file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub eof: Option<EofPolicy>,
    pub verbose: bool,
}

/// Values found in the `[engine]` section of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileSettings {
    pub eof: Option<EofPolicy>,
    pub verbose: Option<bool>,
}

impl Settings {
    /// Resolve settings: flags -> environment -> config file -> defaults.
    pub fn resolve(flags: Overrides) -> Self {
        let file = config_path()
            .and_then(|path| load_file(&path))
            .unwrap_or_default();
        Self::resolve_from(flags, |key| env::var(key).ok(), file)
    }

    /// Same as [`Settings::resolve`] with the environment and file supplied by the caller.
    pub fn resolve_from<F>(flags: Overrides, env_lookup: F, file: FileSettings) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let eof = flags
            .eof
            .or_else(|| env_lookup(ENV_EOF).and_then(|s| s.parse().ok()))
            .or(file.eof)
            .unwrap_or_default();

        let verbose = flags.verbose
            || env_lookup(ENV_VERBOSE)
                .and_then(|s| parse_bool(&s))
                .or(file.verbose)
                .unwrap_or(false);

        Self { eof, verbose }
    }
}

/// `$BFVM_CONFIG`, or `bfvm.toml` in the XDG config home.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(ENV_CONFIG) {
        return Some(PathBuf::from(path));
    }

    // Linux: ~/.config, Windows: C:\Users\<user>\.config, macOS: ~/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push(CONFIG_FILE);
    Some(path)
}

/// Read and parse a config file. A missing or unreadable file yields `None`.
pub fn load_file(path: &Path) -> Option<FileSettings> {
    let content = fs::read_to_string(path).ok()?;
    Some(parse_config(&content))
}

/// Minimal reader for the `[engine]` section: `key = value` lines, values
/// quoted or bare, `#` comments. Unknown keys and bad values are ignored.
pub fn parse_config(content: &str) -> FileSettings {
    let mut in_engine = false;
    let mut map: HashMap<String, String> = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_engine = line[1..line.len() - 1].trim() == "engine";
            continue;
        }
        if !in_engine {
            continue;
        }
        if let Some((key, raw)) = line.split_once('=') {
            let raw = raw.trim();
            let value = raw
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(raw);
            map.insert(key.trim().to_string(), value.to_string());
        }
    }

    FileSettings {
        eof: map.get("eof").and_then(|v| v.parse().ok()),
        verbose: map.get("verbose").and_then(|v| parse_bool(v)),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = Settings::resolve_from(Overrides::default(), no_env, FileSettings::default());
        assert_eq!(settings, Settings { eof: EofPolicy::Zero, verbose: false });
    }

    #[test]
    fn reads_engine_section_only() {
        let file = parse_config(
            r#"
# global options
eof = "halt"

[engine]
eof = "unchanged"
verbose = yes

[other]
verbose = no
"#,
        );
        assert_eq!(file.eof, Some(EofPolicy::Unchanged));
        assert_eq!(file.verbose, Some(true));
    }

    #[test]
    fn bad_values_are_ignored() {
        let file = parse_config("[engine]\neof = minus-one\nverbose = perhaps\n");
        assert_eq!(file, FileSettings::default());
    }

    #[test]
    fn env_overrides_file() {
        let file = FileSettings { eof: Some(EofPolicy::Unchanged), verbose: Some(true) };
        let env = |key: &str| match key {
            ENV_EOF => Some("halt".to_string()),
            ENV_VERBOSE => Some("0".to_string()),
            _ => None,
        };
        let settings = Settings::resolve_from(Overrides::default(), env, file);
        assert_eq!(settings, Settings { eof: EofPolicy::Halt, verbose: false });
    }

    #[test]
    fn flags_override_env() {
        let env = |key: &str| (key == ENV_EOF).then(|| "halt".to_string());
        let flags = Overrides { eof: Some(EofPolicy::Zero), verbose: true };
        let settings = Settings::resolve_from(flags, env, FileSettings::default());
        assert_eq!(settings, Settings { eof: EofPolicy::Zero, verbose: true });
    }

    #[test]
    fn invalid_env_falls_back_to_file() {
        let file = FileSettings { eof: Some(EofPolicy::Unchanged), verbose: None };
        let env = |key: &str| (key == ENV_EOF).then(|| "bogus".to_string());
        let settings = Settings::resolve_from(Overrides::default(), env, file);
        assert_eq!(settings.eof, EofPolicy::Unchanged);
    }

    #[test]
    fn missing_file_loads_nothing() {
        let dir = std::env::temp_dir().join("bfvm-config-test-does-not-exist");
        assert!(load_file(&dir.join(CONFIG_FILE)).is_none());
    }
}
