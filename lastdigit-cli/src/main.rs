use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use lastdigit_cli::input::{load_canvas, load_config};
use lastdigit_cli::server::{run_server, ServerConfig};
use lastdigit_core::{
    digit::Digits, error::GradeError, path, sequence, BoardConfig, BoardSvg, Factor, GradeSvg,
    LoopPolicy, Session,
};

#[derive(Parser)]
#[command(name = "lastdigit")]
#[command(about = "Draw the last digits of a multiplication table around a circle", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LASTDIGIT_BUILD_SHA"), ")"))]
struct Cli {
    /// Board config (JSON, optionally gzipped)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a factor's last-digit sequence and expected segments
    Sequence {
        /// Multiplication factor (1-9)
        #[arg(short, long, default_value = "6")]
        factor: Factor,

        /// Override the config's loop policy (open | closed)
        #[arg(short, long)]
        policy: Option<LoopPolicy>,
    },

    /// Render the digit board as SVG
    Board {
        /// Multiplication factor (1-9)
        #[arg(short, long, default_value = "6")]
        factor: Factor,

        /// Overlay the expected path
        #[arg(long)]
        show_path: bool,

        /// Output SVG file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Grade a drawing exported from the canvas
    Grade {
        /// Multiplication factor (1-9)
        #[arg(short, long, default_value = "6")]
        factor: Factor,

        /// Canvas JSON (`*.gz` is decompressed)
        canvas: PathBuf,

        /// Canvas file is an RGBA raster `{width, height, data}`
        #[arg(long)]
        raster: bool,

        /// Output SVG file for the colour-coded result
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full report as JSON instead of the summary line
        #[arg(long)]
        json: bool,
    },

    /// Start WebSocket server for browser front-ends
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

fn write_output(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => print!("{}", contents),
    }
    Ok(())
}

fn print_sequence(config: &BoardConfig, factor: Factor) {
    let seq = sequence::generate(factor);
    let expected = path::expected_segments(&seq, config.policy);
    println!("factor:   {}", factor);
    println!("sequence: {}", Digits(&seq));
    println!("cycle:    {}", sequence::describe_cycle(factor));
    let segments: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    println!("segments ({}): {}", expected.len(), segments.join(" "));
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Sequence { factor, policy } => {
            let config = BoardConfig { policy: policy.unwrap_or(config.policy), ..config };
            print_sequence(&config, factor);
        }
        Commands::Board { factor, show_path, output } => {
            let session = Session::new(config).with_factor(factor);
            let layout = session.layout();
            let expected = session.expected();
            let board = BoardSvg::new(session.config(), &layout);
            let board = if show_path { board.with_expected(&expected) } else { board };
            write_output(output.as_deref(), &board.to_string())?;
        }
        Commands::Grade { factor, canvas, raster, output, json } => {
            let session = Session::new(config).with_factor(factor);
            let input = load_canvas(&canvas, raster)?;
            let grade = match session.grade(&input) {
                Ok(grade) => grade,
                Err(e @ GradeError::NothingDrawn) => {
                    eprintln!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&grade.report())?);
            } else {
                println!("{}", grade.summary());
            }
            if let Some(output) = output {
                let layout = session.layout();
                let expected = session.expected();
                let svg = GradeSvg::new(session.config(), &layout, &expected, &grade).to_string();
                write_output(Some(&output), &svg)?;
            }
        }
        Commands::Serve { port } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_server(port, ServerConfig { board: config }))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
