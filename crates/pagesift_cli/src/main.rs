mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pagesift_engine::{FetchSettings, Pipeline};

/// Extract the readable content of a web page as markdown.
#[derive(Debug, Parser)]
#[command(name = "pagesift", version, about)]
struct Cli {
    /// URL of the web page to extract content from
    url: String,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include SEO metadata as a front-matter block
    #[arg(short, long)]
    seo: bool,

    /// Output the full extraction result as JSON
    #[arg(short, long)]
    json: bool,
}

fn init_logging() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    // Ignore the error if a logger was already set.
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let pipeline = Pipeline::with_settings(FetchSettings::default());
    let result = match pipeline.extract(&cli.url, cli.seo).await {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let rendered = if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => json,
            Err(err) => {
                eprintln!("Error: failed to serialize result: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else if cli.seo {
        output::with_front_matter(&result)
    } else {
        result.content
    };

    match output::write_output(&rendered, cli.output.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
