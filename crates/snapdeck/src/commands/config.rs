use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
        ConfigCommands::Path => {
            println!("{}", Config::path()?.display());
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    println!("{}", "defaults".bold());
    print_value("theme", config.theme().unwrap_or("dark"), config.theme().is_none());
    print_value(
        "windowed",
        &config.windowed().unwrap_or(false).to_string(),
        config.windowed().is_none(),
    );
    print_value(
        "start_slide",
        &config.start_slide().unwrap_or(1).to_string(),
        config.start_slide().is_none(),
    );
    match config.logo() {
        Some(logo) => print_value("logo", &logo.display().to_string(), false),
        None => print_value("logo", "(none)", true),
    }
    Ok(())
}

fn print_value(key: &str, value: &str, is_default: bool) {
    if is_default {
        println!("  {key}: {} {}", value, "(default)".dimmed());
    } else {
        println!("  {key}: {}", value.green());
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let path = Config::path()?;
    update(&path, key, value)?;
    println!(
        "{} {key} = {value} ({})",
        "Saved".green().bold(),
        path.display()
    );
    Ok(())
}

/// Change one key in the config file at `path`, keeping every other setting.
fn update(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_existing_or_default(path)?;
    config.set(key, value)?;
    config.save_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_keeps_other_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "defaults:\n  theme: light\n  logo: /home/me/logo.png\n").expect("write");

        update(&path, "defaults.start_slide", "3").expect("update");
        let config = Config::load_from(&path).expect("load");
        assert_eq!(config.theme(), Some("light"));
        assert_eq!(config.logo(), Some(Path::new("/home/me/logo.png")));
        assert_eq!(config.start_slide(), Some(3));
    }

    #[test]
    fn update_creates_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("snapdeck").join("config.yaml");
        update(&path, "defaults.theme", "light").expect("update");
        assert_eq!(Config::load_from(&path).expect("load").theme(), Some("light"));
    }

    #[test]
    fn update_refuses_to_overwrite_unreadable_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        let original = "defaults:\n  theme: light\n  logo: /home/me/logo.png\n  windowed: yes-please\n";
        std::fs::write(&path, original).expect("write");

        assert!(update(&path, "defaults.start_slide", "3").is_err());
        assert_eq!(std::fs::read_to_string(&path).expect("read"), original);
    }
}
