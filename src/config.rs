use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Flags that can be saved as defaults and merged with the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub border: bool,
    pub scroll: bool,
    pub prompt: Option<String>,
    pub banner: Option<String>,
    pub complete: Vec<String>,
    pub history_limit: Option<usize>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: switches and completion words accumulate,
    /// single values from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        let mut complete = self.complete.clone();
        for word in &other.complete {
            if !complete.contains(word) {
                complete.push(word.clone());
            }
        }
        Self {
            border: self.border || other.border,
            scroll: self.scroll || other.scroll,
            prompt: other.prompt.clone().or_else(|| self.prompt.clone()),
            banner: other.banner.clone().or_else(|| self.banner.clone()),
            complete,
            history_limit: other.history_limit.or(self.history_limit),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("cursorline").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("cursorline")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("cursorline").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("cursorline")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".cursorlinerc")
}

/// Read flags from an rc file. A missing file yields the defaults.
///
/// Lines of the form `--prompt=VALUE` or `--banner=VALUE` keep their value
/// verbatim, trailing spaces included; every other line is split into
/// whitespace-separated tokens.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let mut tokens = Vec::new();
    for line in content.lines() {
        let line = line.trim_start();
        if line.trim_end().is_empty() || line.starts_with('#') {
            continue;
        }
        if is_verbatim(line) {
            tokens.push(line.to_string());
        } else {
            tokens.extend(line.split_whitespace().map(ToOwned::to_owned));
        }
    }
    Ok(parse_flag_tokens(&tokens))
}

fn is_verbatim(line: &str) -> bool {
    line.starts_with("--prompt=") || line.starts_with("--banner=")
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# cursorline defaults (saved with --save)".to_string());
    if flags.border {
        lines.push("--border".to_string());
    }
    if flags.scroll {
        lines.push("--scroll".to_string());
    }
    if let Some(prompt) = &flags.prompt {
        lines.push(format!("--prompt={prompt}"));
    }
    if let Some(banner) = &flags.banner {
        lines.push(format!("--banner={banner}"));
    }
    for word in &flags.complete {
        lines.push(format!("--complete {word}"));
    }
    if let Some(limit) = flags.history_limit {
        lines.push(format!("--history-limit {limit}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list, ignoring everything else.
/// Accepts both `--flag value` and `--flag=value`.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        let takes_value = matches!(
            name,
            "--prompt" | "--banner" | "--complete" | "--history-limit" | "--log-file"
        );
        let value = if !takes_value {
            None
        } else if let Some(value) = inline {
            Some(value.to_string())
        } else if let Some(next) = tokens.get(i + 1) {
            i += 1;
            Some(next.clone())
        } else {
            None
        };
        match (name, value) {
            ("--border", _) => flags.border = true,
            ("--scroll", _) => flags.scroll = true,
            ("--prompt", Some(value)) => flags.prompt = Some(value),
            ("--banner", Some(value)) => flags.banner = Some(value),
            ("--complete", Some(value)) => {
                if !value.is_empty() && !flags.complete.contains(&value) {
                    flags.complete.push(value);
                }
            }
            ("--history-limit", Some(value)) => {
                if let Ok(limit) = value.trim().parse() {
                    flags.history_limit = Some(limit);
                }
            }
            ("--log-file", Some(value)) => flags.log_file = Some(PathBuf::from(value)),
            _ => {}
        }
        i += 1;
    }
    flags
}
