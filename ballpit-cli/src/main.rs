use ballpit_core::{SimConfig, Viewport};
use clap::{Parser, Subcommand, ValueEnum};

mod headless;
mod viewer;

#[derive(Parser)]
#[command(name = "ballpit")]
#[command(about = "ballpit - bouncing balls and N-body attraction in 2D", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantArg {
    /// Click to drop particles that attract each other
    Gravity,
    /// A pool of bouncing balls that follow the pointer
    Balls,
}

#[derive(clap::Args, Debug)]
struct Common {
    #[arg(value_enum, default_value_t = VariantArg::Balls)]
    variant: VariantArg,
    /// Seed for particle sizes, placement and colours
    #[arg(long, default_value_t = ballpit_core::config::DEFAULT_SEED)]
    seed: u64,
}

impl Common {
    fn config(&self, viewport: Viewport) -> SimConfig {
        let base = match self.variant {
            VariantArg::Gravity => SimConfig::gravity(),
            VariantArg::Balls => SimConfig::collisions(),
        };
        base.with_seed(self.seed).with_viewport(viewport)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive viewer
    View {
        #[command(flatten)]
        common: Common,
    },
    /// Run without a window and print a summary
    Run {
        #[command(flatten)]
        common: Common,
        /// Number of ticks to simulate
        #[arg(long, default_value_t = 600)]
        ticks: u64,
        /// Bodies dropped before the run starts (gravity only)
        #[arg(long, default_value_t = 8)]
        bodies: usize,
        #[arg(long, default_value_t = 1280.0)]
        width: f32,
        #[arg(long, default_value_t = 720.0)]
        height: f32,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::View { common } => {
            viewer::run(common.config(ballpit_core::config::DEFAULT_VIEWPORT))
        }
        Commands::Run {
            common,
            ticks,
            bodies,
            width,
            height,
        } => Viewport::new(width, height)
            .map_err(Into::into)
            .and_then(|viewport| headless::run(common.config(viewport), ticks, bodies)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
