use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use planloom::presentation::cli::commands::{AnalyticsCommand, ReportCommand, ScheduleCommand};
use planloom::presentation::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("planloom=debug,info")
    } else {
        EnvFilter::new("planloom=info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match &cli.command {
        Commands::Schedule { input, output, format } => {
            ScheduleCommand::execute(input, output, format.should_generate_json(), format.should_generate_csv(), format.should_generate_html(), format.should_generate_markdown())?;
        }
        Commands::Analytics { input, output, format } => {
            AnalyticsCommand::execute(input, output, format.should_generate_json(), format.should_generate_csv(), format.should_generate_html(), format.should_generate_markdown())?;
        }
        Commands::Report {
            schedule_input,
            analytics_input,
            output,
            format,
        } => {
            ReportCommand::execute(
                schedule_input,
                analytics_input.as_ref(),
                output,
                format.should_generate_json(),
                format.should_generate_csv(),
                format.should_generate_html(),
                format.should_generate_markdown(),
            )?;
        }
    }

    Ok(())
}
