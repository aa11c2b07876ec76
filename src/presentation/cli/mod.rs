pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "planloom")]
#[command(author = "PlanLoom Team")]
#[command(version = "0.1.0")]
#[command(about = "Manufacturing production scheduler and shop-floor analytics engine", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Run the scheduler over a work order / machine / calendar input file")]
    Schedule {
        #[arg(short, long, value_name = "FILE", help = "Scheduling input JSON file")]
        input: PathBuf,

        #[arg(short, long, value_name = "DIR", default_value = "output", help = "Output directory for reports")]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "all", help = "Output format")]
        format: OutputFormat,
    },

    #[command(about = "Compute OEE, adherence, utilization, and quality KPIs over a reporting period")]
    Analytics {
        #[arg(short, long, value_name = "FILE", help = "Analytics input JSON file")]
        input: PathBuf,

        #[arg(short, long, value_name = "DIR", default_value = "output", help = "Output directory for reports")]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "all", help = "Output format")]
        format: OutputFormat,
    },

    #[command(about = "Run scheduling and analytics together and emit a combined HTML/Markdown report")]
    Report {
        #[arg(long, value_name = "FILE", help = "Scheduling input JSON file")]
        schedule_input: PathBuf,

        #[arg(long, value_name = "FILE", help = "Analytics input JSON file (optional)")]
        analytics_input: Option<PathBuf>,

        #[arg(short, long, value_name = "DIR", default_value = "output", help = "Output directory for reports")]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "all", help = "Output format")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    Html,
    Markdown,
    All,
}

impl OutputFormat {
    pub fn should_generate_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::All)
    }

    pub fn should_generate_csv(&self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::All)
    }

    pub fn should_generate_html(&self) -> bool {
        matches!(self, OutputFormat::Html | OutputFormat::All)
    }

    pub fn should_generate_markdown(&self) -> bool {
        matches!(self, OutputFormat::Markdown | OutputFormat::All)
    }
}
