//! instrumentation-reporter options parser.

use instrumentation_reporter::config;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(about = "Production instrumentation reports aggregator")]
pub struct Application {
    #[structopt(short, long, help = "Log progress of the pipeline stages")]
    pub verbose: bool,

    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(StructOpt)]
pub enum Command {
    #[structopt(about = "Generates profiling summary from execution reports")]
    Generate {
        #[structopt(parse(from_os_str), help = "Path to the instrumentation mapping file")]
        mapping: PathBuf,

        #[structopt(
            parse(from_os_str),
            help = "Path to the directory of execution reports"
        )]
        reports: PathBuf,

        #[structopt(
            parse(from_os_str),
            short,
            long,
            help = "Optional path to generated file (STDOUT otherwise)"
        )]
        output: Option<PathBuf>,

        #[structopt(
            short,
            long,
            possible_values(config::FORMATS),
            default_value = config::DEFAULT_FORMAT,
            help = "Layout of the generated JSON"
        )]
        format: String,
    },

    #[structopt(about = "Prints decoded instrumentation points of the mapping")]
    Points {
        #[structopt(parse(from_os_str), help = "Path to the instrumentation mapping file")]
        mapping: PathBuf,
    },
}

/// Constructs an instance of the Application.
pub fn application() -> Application {
    Application::from_args()
}
