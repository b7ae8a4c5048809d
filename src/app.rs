use anyhow::Result;

use crate::{
    channel,
    cli::{Cli, Command},
    domain, infra,
    infra::config::AppConfig,
    ui,
    usecases::{self, bootstrap},
};

pub fn run(cli: Cli) -> Result<()> {
    let overrides = cli.overrides();

    match cli.command_or_default() {
        Command::Run => {
            let context = bootstrap::bootstrap(cli.config.as_deref(), &overrides)?;
            tracing::debug!(
                ui = ui::module_name(),
                domain = domain::module_name(),
                channel = channel::module_name(),
                usecases = usecases::module_name(),
                infra = infra::module_name(),
                "module boundaries loaded"
            );

            let mut shell =
                bootstrap::compose_shell(&context, overrides.display_name.as_deref())?;
            ui::shell::start(
                &context,
                shell.event_source.as_mut(),
                shell.orchestrator.as_mut(),
            )?;
        }
        Command::ShowConfig => {
            let config = bootstrap::load_config(cli.config.as_deref(), &overrides)?;
            print!("{}", render_config(&config)?);
        }
    }

    Ok(())
}

fn render_config(config: &AppConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
