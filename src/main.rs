use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "u-batchsim",
    about = "Batch job scheduling simulator",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a workload and write the node utilization report.
    ///
    /// Input is read in prompt order: job count, then arrival, cores,
    /// memory (GB) and duration for each job, then the queue and placement
    /// policy choices. Prompts are shown when stdin is a terminal.
    Run {
        /// Input script (default: stdin, also "-")
        #[arg(short, long)]
        input: Option<String>,
        /// TOML run configuration
        #[arg(short, long)]
        config: Option<String>,
        /// Report path (overrides [report].path)
        #[arg(short, long)]
        output: Option<String>,
        /// Queue policy: 1-3, fcfs, sjf or sdf (overrides the input choice)
        #[arg(long)]
        queue: Option<String>,
        /// Placement policy: 1-3, first-fit, best-fit or worst-fit
        /// (overrides the input choice)
        #[arg(long)]
        placement: Option<String>,
        /// Number of worker nodes (overrides [cluster].nodes)
        #[arg(long)]
        nodes: Option<u32>,
        /// Print run KPIs after the report is saved
        #[arg(long)]
        kpi: bool,
    },
    /// Print a synthetic input script for `run`.
    Generate {
        /// Ticks over which jobs may arrive
        #[arg(long, default_value_t = 100)]
        ticks: u64,
        /// Per-tick arrival probability
        #[arg(long, default_value_t = 0.3)]
        p_arrival: f64,
        /// Probability that a job is short
        #[arg(long, default_value_t = 0.3)]
        p_short: f64,
        /// Largest core demand per job
        #[arg(long, default_value_t = 16)]
        max_cores: u32,
        /// Largest memory demand per job (GB)
        #[arg(long, default_value_t = 32)]
        max_memory: u32,
        /// RNG seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Queue policy choice written into the script
        #[arg(long, default_value_t = 1)]
        queue: i64,
        /// Placement policy choice written into the script
        #[arg(long, default_value_t = 1)]
        placement: i64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("u_batchsim=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            config,
            output,
            queue,
            placement,
            nodes,
            kpi,
        } => commands::run::run(&commands::run::RunArgs {
            input,
            config,
            output,
            queue,
            placement,
            nodes,
            kpi,
        }),
        Commands::Generate {
            ticks,
            p_arrival,
            p_short,
            max_cores,
            max_memory,
            seed,
            queue,
            placement,
        } => commands::generate::generate(&commands::generate::GenerateArgs {
            ticks,
            p_arrival,
            p_short,
            max_cores,
            max_memory,
            seed,
            queue,
            placement,
        }),
    }
}
