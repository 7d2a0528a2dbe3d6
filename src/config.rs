//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--server`, `--theme`, `--no-mouse`, etc.)
//! 2. `--config FILE`
//! 3. `$FSX_CONFIG` environment variable (path to config file)
//! 4. Project-local `.fsx.toml` in the current working directory
//! 5. Global `~/.config/fsx/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable mouse support.
    pub mouse: Option<bool>,
}

/// Simulator server settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL; requests go to `{url}/execute`.
    pub url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Tree panel settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TreeConfig {
    /// Use nerd font icons (false = ASCII fallback).
    pub use_icons: Option<bool>,
}

/// Command terminal settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TerminalConfig {
    /// Share of the screen height given to the terminal panel.
    pub height_percent: Option<u16>,
    /// Output lines kept before the oldest are dropped.
    pub max_lines: Option<usize>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub tree_fg: Option<String>,
    pub tree_selected_bg: Option<String>,
    pub tree_selected_fg: Option<String>,
    pub tree_cursor_bg: Option<String>,
    pub disk_fg: Option<String>,
    pub partition_fg: Option<String>,
    pub dir_fg: Option<String>,
    pub file_fg: Option<String>,
    pub info_fg: Option<String>,
    pub detail_fg: Option<String>,
    pub detail_label_fg: Option<String>,
    pub terminal_fg: Option<String>,
    pub terminal_prompt_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
    pub border_focused_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `$FSX_LOG` is unset (e.g. "info", "fsx=debug").
    pub level: Option<String>,
    /// Log file path.
    pub file: Option<PathBuf>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub server: ServerConfig,
    pub tree: TreeConfig,
    pub terminal: TerminalConfig,
    pub theme: ThemeConfig,
    pub logging: LoggingConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TERMINAL_HEIGHT_PERCENT: u16 = 35;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path; that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("FSX_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".fsx.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fsx").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                mouse: other.general.mouse.or(self.general.mouse),
            },
            server: ServerConfig {
                url: other.server.url.clone().or(self.server.url),
                timeout_secs: other.server.timeout_secs.or(self.server.timeout_secs),
            },
            tree: TreeConfig {
                use_icons: other.tree.use_icons.or(self.tree.use_icons),
            },
            terminal: TerminalConfig {
                height_percent: other
                    .terminal
                    .height_percent
                    .or(self.terminal.height_percent),
                max_lines: other.terminal.max_lines.or(self.terminal.max_lines),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: other.theme.custom.clone().or(self.theme.custom),
            },
            logging: LoggingConfig {
                level: other.logging.level.clone().or(self.logging.level),
                file: other.logging.file.clone().or(self.logging.file),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    pub fn mouse_enabled(&self) -> bool {
        self.general.mouse.unwrap_or(true)
    }

    pub fn server_url(&self) -> &str {
        self.server.url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn use_icons(&self) -> bool {
        self.tree.use_icons.unwrap_or(true)
    }

    /// Terminal panel height as a percentage, clamped to 10..=90.
    pub fn terminal_height_percent(&self) -> u16 {
        self.terminal
            .height_percent
            .unwrap_or(DEFAULT_TERMINAL_HEIGHT_PERCENT)
            .clamp(10, 90)
    }

    pub fn terminal_max_lines(&self) -> usize {
        self.terminal
            .max_lines
            .unwrap_or(crate::terminal::DEFAULT_MAX_LINES)
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let cfg = AppConfig::default();
        assert!(cfg.mouse_enabled());
        assert_eq!(cfg.server_url(), "http://localhost:8000");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
        assert!(cfg.use_icons());
        assert_eq!(cfg.terminal_height_percent(), 35);
        assert_eq!(cfg.terminal_max_lines(), 1000);
        assert_eq!(cfg.theme_scheme(), "dark");
        assert_eq!(cfg.log_level(), "info");
        assert!(cfg.logging.file.is_none());
    }

    #[test]
    fn test_toml_parsing_full() {
        let toml = r##"
[general]
mouse = false

[server]
url = "http://10.0.0.5:9000"
timeout_secs = 3

[tree]
use_icons = false

[terminal]
height_percent = 50
max_lines = 200

[theme]
scheme = "custom"

[theme.custom]
disk_fg = "#ff0000"

[logging]
level = "debug"
file = "/tmp/fsx.log"
"##;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert!(!cfg.mouse_enabled());
        assert_eq!(cfg.server_url(), "http://10.0.0.5:9000");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(3));
        assert!(!cfg.use_icons());
        assert_eq!(cfg.terminal_height_percent(), 50);
        assert_eq!(cfg.terminal_max_lines(), 200);
        assert_eq!(cfg.theme_scheme(), "custom");
        assert_eq!(
            cfg.theme.custom.as_ref().and_then(|c| c.disk_fg.as_deref()),
            Some("#ff0000")
        );
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.logging.file, Some(PathBuf::from("/tmp/fsx.log")));
    }

    #[test]
    fn test_toml_parsing_partial() {
        let toml = r#"
[server]
url = "http://sim:8000"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.server_url(), "http://sim:8000");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
        assert!(cfg.mouse_enabled());
    }

    #[test]
    fn test_toml_parsing_empty() {
        let cfg: AppConfig = toml::from_str("").expect("parse failed");
        assert_eq!(cfg.server_url(), DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_height_percent_is_clamped() {
        let mut cfg = AppConfig::default();
        cfg.terminal.height_percent = Some(99);
        assert_eq!(cfg.terminal_height_percent(), 90);
        cfg.terminal.height_percent = Some(0);
        assert_eq!(cfg.terminal_height_percent(), 10);
    }

    #[test]
    fn test_merge_overrides() {
        let base = AppConfig {
            server: ServerConfig {
                url: Some("http://a:1".into()),
                timeout_secs: Some(5),
            },
            ..Default::default()
        };
        let over = AppConfig {
            server: ServerConfig {
                url: Some("http://b:2".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(&over);
        assert_eq!(merged.server_url(), "http://b:2");
        assert_eq!(merged.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_merge_none_does_not_clear_some() {
        let base = AppConfig {
            terminal: TerminalConfig {
                height_percent: Some(60),
                max_lines: Some(10),
            },
            ..Default::default()
        };
        let merged = base.merge(&AppConfig::default());
        assert_eq!(merged.terminal_height_percent(), 60);
        assert_eq!(merged.terminal_max_lines(), 10);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("test-config.toml");
        let mut f = std::fs::File::create(&cfg_path).expect("create");
        writeln!(
            f,
            r#"
[general]
mouse = false

[terminal]
max_lines = 50
"#
        )
        .expect("write");

        let cfg = load_file(&cfg_path).expect("load");
        assert!(!cfg.mouse_enabled());
        assert_eq!(cfg.terminal_max_lines(), 50);
        assert_eq!(cfg.terminal_height_percent(), 35);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_file(Path::new("/nonexistent/config.toml")).is_none());
    }

    #[test]
    fn test_load_invalid_toml_returns_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("bad.toml");
        std::fs::write(&cfg_path, "this is { not valid toml").expect("write");
        assert!(load_file(&cfg_path).is_none());
    }

    #[test]
    fn test_load_with_cli_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("config.toml");
        std::fs::write(
            &cfg_path,
            r#"
[server]
url = "http://from-file:8000"
timeout_secs = 7
"#,
        )
        .expect("write");

        let cli_overrides = AppConfig {
            server: ServerConfig {
                url: Some("http://from-cli:8000".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let cfg = AppConfig::load(Some(&cfg_path), Some(&cli_overrides));
        assert_eq!(cfg.server_url(), "http://from-cli:8000");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(7));
    }
}
