use clap::Parser;
use schema_form::cli::commands::{cmd_add_group, cmd_check, cmd_render, cmd_run};
use schema_form::cli::config::{Cli, Commands, load_config, resolve_format, resolve_settings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Store/trace: CLI > config > defaults
    let settings = resolve_settings(&cli, &config);

    match cli.command {
        Commands::Check { ref schema } => {
            cmd_check(schema, cli.verbose)?;
        }
        Commands::Render {
            ref schema,
            ref group,
            ref format,
        } => {
            let format = resolve_format(format.as_deref(), &config);
            cmd_render(schema, group.as_deref(), &format, &settings, cli.verbose)?;
        }
        Commands::Run {
            ref schema,
            ref script,
            ref output,
        } => {
            let all_passed = cmd_run(schema, script, output.as_deref(), &settings, cli.verbose)?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::AddGroup {
            ref schema,
            ref group,
            ref output,
        } => {
            cmd_add_group(schema, group, output.as_deref(), cli.verbose)?;
        }
    }

    Ok(())
}
