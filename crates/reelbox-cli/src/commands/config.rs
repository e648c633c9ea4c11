use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use reelbox_config::{Config, CredentialStore, PathManager, BASE_URL_ENV};
use serde_json::json;
use std::path::Path;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::SetUrl { url } => set_url(url, output),
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let credentials_file = path_manager.credentials_file();

    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {:#}", config_file.display(), e))?;

    let mut credentials = CredentialStore::new(credentials_file.clone());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to read stored session: {}", e))?;

    let token = credentials
        .get_token()
        .map(|t| if full { t.clone() } else { mask_string(t) });
    let user_id = credentials.get_user_id().cloned();
    let env_override = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty());

    if !output.is_human() {
        output.data(&json!({
            "configFile": config_file.display().to_string(),
            "credentialsFile": credentials_file.display().to_string(),
            "api": config.api,
            "movies": config.movies,
            "baseUrlOverride": env_override,
            "session": { "userId": user_id, "token": token },
        }));
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);

    let file_note = if config_file.exists() { "" } else { " (not created yet)" };
    table.add_row(vec![Cell::new("Config File"), Cell::new(format!("{}{}", config_file.display(), file_note))]);
    table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.api.base_url)]);
    if env_override.is_some() {
        table.add_row(vec![Cell::new("Base URL Source"), Cell::new(format!("${}", BASE_URL_ENV))]);
    }
    table.add_row(vec![Cell::new("Content Type"), Cell::new(&config.api.content_type)]);
    table.add_row(vec![Cell::new("Page Size"), Cell::new(config.movies.page_size)]);
    table.add_row(vec![
        Cell::new("Sort"),
        Cell::new(format!("{} {}", config.movies.sort, config.movies.direction)),
    ]);

    let session_state = match &user_id {
        Some(id) => format!("{} as user {}", "signed in".green(), id),
        None => "signed out".bright_black().to_string(),
    };
    table.add_row(vec![Cell::new("Session"), Cell::new(session_state)]);
    table.add_row(vec![
        Cell::new("Token"),
        Cell::new(token.unwrap_or_else(|| "<not set>".to_string())),
    ]);

    output.human(table.to_string());
    Ok(())
}

fn set_url(url: String, output: &Output) -> Result<()> {
    let config_file = PathManager::default().config_file();
    let config = write_base_url(&config_file, &url)?;

    output.success(format!("Backend set to {}", config.api.base_url));
    if std::env::var(BASE_URL_ENV).is_ok() {
        output.warn(format!("${} is set and takes precedence over the config file", BASE_URL_ENV));
    }
    Ok(())
}

/// Update only the base URL, keeping every other setting already in the file.
fn write_base_url(config_file: &Path, url: &str) -> Result<Config> {
    let mut config = if config_file.exists() {
        Config::load_from_file(config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {:#}", config_file.display(), e))?
    } else {
        Config::default()
    };

    config.api.base_url = url.trim().trim_end_matches('/').to_string();
    config.validate().map_err(|e| eyre!("{}", e))?;
    config
        .save_to_file(config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {:#}", config_file.display(), e))?;
    Ok(config)
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_base_url_keeps_other_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut existing = Config::default();
        existing.movies.page_size = 50;
        existing.save_to_file(&path).unwrap();

        let written = write_base_url(&path, " https://movies.example.com/api/ ").unwrap();
        assert_eq!(written.api.base_url, "https://movies.example.com/api");

        let reloaded = Config::load_from_file(&path).unwrap();
        assert_eq!(reloaded.api.base_url, "https://movies.example.com/api");
        assert_eq!(reloaded.movies.page_size, 50);
    }

    #[test]
    fn test_write_base_url_rejects_invalid_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        assert!(write_base_url(&path, "ftp://movies.example.com").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("eyJhbGciOiJIUzI1NiJ9"), "eyJh***NiJ9");
    }
}
