use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wallgen::imaging::{ExportSettings, OutputFormat, Quality};
use wallgen::{batch, config, output, resolution, server};

#[derive(Parser)]
#[command(name = "wallgen")]
#[command(about = "Generate wallpapers for every screen size from one image")]
#[command(long_about = "\
Generate wallpapers for every screen size from one image

Each wallpaper is scaled to cover its target size and center-cropped, so the
aspect ratio is never distorted and there are no bars. Files are written as
wallpaper_{W}x{H}.{jpg|png}.

Examples:

  wallgen generate --input mountain.jpg
  wallgen generate --input mountain.jpg --res 1920x1080,1080x2400 --format png
  wallgen serve --port 3000

Settings are read from wallgen.toml when present; flags override it.
Run 'wallgen gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Source image
    #[arg(long)]
    input: PathBuf,

    /// Output directory [default: output]
    #[arg(long)]
    out: Option<PathBuf>,

    /// Comma-separated resolutions, e.g. 1920x1080,1080x2400
    #[arg(long)]
    res: Option<String>,

    /// Output format: jpg or png [default: jpg]
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Quality 0-100; for PNG this picks the compression level [default: 95]
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    quality: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Write one wallpaper per resolution into a directory
    Generate(GenerateArgs),
    /// Run the upload web service
    Serve {
        /// Listen port [default: 8080]
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },
    /// Print a stock wallgen.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => {
            init_tracing("warn");
            let config = config::load_config(&cli.config)?;
            let job = build_job(args, &config)?;

            output::print_lines(&output::format_banner(
                &job.input,
                &job.output_dir,
                &job.settings,
            ));
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                use std::io::Write;
                let mut stdout = std::io::stdout();
                for event in rx {
                    for fragment in output::format_batch_event(&event) {
                        print!("{}", fragment);
                    }
                    stdout.flush().ok();
                }
            });
            let result = batch::run(&job, Some(tx));
            printer.join().ok();
            let report = result?;
            output::print_lines(&output::format_footer(&report));
        }
        Command::Serve { port } => {
            init_tracing("info");
            let mut config = config::load_config(&cli.config)?;
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = server::AppState::from_config(&config)?;
            tokio::runtime::Runtime::new()?.block_on(server::serve(state))?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the fmt subscriber. `RUST_LOG` wins over `default_level`.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Merge command-line flags over the loaded config.
fn build_job(
    args: GenerateArgs,
    config: &config::WallgenConfig,
) -> Result<batch::BatchJob, resolution::ResolutionError> {
    let resolutions = match &args.res {
        Some(list) => resolution::parse_resolutions(list)?,
        None => config.resolution_list()?,
    };
    let defaults = config.export_settings();
    Ok(batch::BatchJob {
        input: args.input,
        output_dir: args.out.unwrap_or_else(|| config.output.dir.clone()),
        resolutions,
        settings: ExportSettings {
            format: args.format.unwrap_or(defaults.format),
            quality: args.quality.map(Quality::new).unwrap_or(defaults.quality),
        },
    })
}
