use anyhow::Result;
use clap::Parser;
use gg_core::config::ConversionSettings;

pub mod cli;
pub mod output;
pub mod pipeline;
pub mod session;
pub mod watch;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider la source
    let source = cli.validate_source()?;

    // 4. Charger la config, puis appliquer les overrides CLI
    let mut settings = resolve_config(&cli)?;
    cli.apply_overrides(&mut settings);
    log::debug!("Réglages effectifs : {settings:?}");

    // 5. Destination
    let dest = cli.output.as_deref().map(|path| {
        output::resolve_output(
            path,
            &output::default_file_name(cli.to, settings.sheet_format),
        )
    });

    // 6. Conversion unique ou surveillance
    if cli.watch
        && let Some(ref dest) = dest
    {
        return watch::run_watch(&source, &settings, cli.to, dest);
    }
    let text = pipeline::convert(&source, &settings, cli.to)?;
    let written = output::write_output(dest.as_deref(), &text)?;
    if dest.is_some() {
        log::info!("Écrit {}", written.display());
    }
    Ok(())
}

/// Load `--config`, or the defaults when the file does not exist.
fn resolve_config(cli: &cli::Cli) -> Result<ConversionSettings> {
    if cli.config.exists() {
        gg_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(ConversionSettings::default())
    }
}
