//! CLI command implementations

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::api::{self, AppState};
use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::llm::build_provider;
use crate::themes::{self, ThemeDefinition};

/// Run the HTTP API
pub async fn serve(settings: &Settings, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    let addr = settings.bind_addr()?;
    let analyzer = build_analyzer(&settings)?;

    tracing::info!(
        "Starting {} v{} (model: {}, json extraction: {:?})",
        crate::APP_NAME,
        crate::VERSION,
        settings.llm.model,
        settings.llm.json_extraction
    );

    api::serve(addr, AppState::new(analyzer)).await
}

/// List the theme catalog
pub fn list_themes(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(themes::all())?);
        return Ok(());
    }

    for theme in themes::all() {
        print!("{}", format_theme(theme));
    }

    Ok(())
}

/// Score a single transcript and print the raw model reply
pub async fn analyze_transcript(settings: &Settings, file: &Path, theme: &str) -> Result<()> {
    let transcript = read_transcript(file)?;
    if transcript.trim().is_empty() {
        anyhow::bail!("Transcript is empty: {}", file.display());
    }

    let analyzer = build_analyzer(settings)?;
    let result = analyzer.analyze(transcript.trim(), theme).await?;

    println!("Theme: {} ({})", result.theme.display_name, result.theme.id);
    println!();
    println!("{}", result.analysis.trim());

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = settings.clone();
            if !shown.llm.api_key.is_empty() {
                shown.llm.api_key = "********".to_string();
            }
            let toml = toml::to_string_pretty(&shown)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

// Helper functions

fn build_analyzer(settings: &Settings) -> Result<Analyzer> {
    let provider = build_provider(settings)?;
    Ok(Analyzer::new(Arc::from(provider), settings.llm.json_extraction))
}

fn read_transcript(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut transcript = String::new();
        std::io::stdin()
            .read_to_string(&mut transcript)
            .context("Failed to read transcript from stdin")?;
        return Ok(transcript);
    }

    std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read transcript: {}", file.display()))
}

fn format_theme(theme: &ThemeDefinition) -> String {
    let mut output = format!(
        "{:<22} {} - {}\n",
        theme.id, theme.display_name, theme.description
    );
    for dimension in theme.dimensions {
        output.push_str(&format!(
            "  {:<24} {} ({:?})\n",
            dimension.key, dimension.label, dimension.format
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_theme_lists_every_dimension() {
        let theme = themes::lookup("equipment_investment");
        let text = format_theme(theme);

        assert!(text.starts_with("equipment_investment"));
        assert_eq!(text.lines().count(), 1 + theme.dimensions.len());
        assert!(text.contains("time_horizon"));
        assert!(text.contains("(Horizon)"));
    }

    #[test]
    fn read_transcript_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_transcript(&dir.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read transcript"));
    }
}
