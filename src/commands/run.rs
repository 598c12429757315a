use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::info;

use u_batchsim::input::{read_input, ScriptInput};
use u_batchsim::{
    build_jobs, simulate, CsvReportSink, PlacementPolicyKind, QueuePolicyKind, ReportSink,
    SimConfig, SimulationKpi,
};

pub struct RunArgs {
    pub input: Option<String>,
    pub config: Option<String>,
    pub output: Option<String>,
    pub queue: Option<String>,
    pub placement: Option<String>,
    pub nodes: Option<u32>,
    pub kpi: bool,
}

pub fn run(args: &RunArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(Path::new(path))
            .with_context(|| format!("loading config {path}"))?,
        None => SimConfig::default(),
    };
    if let Some(nodes) = args.nodes {
        config.cluster.nodes = nodes;
    }
    if let Some(output) = &args.output {
        config.report.path = PathBuf::from(output);
    }
    config.validate()?;

    let script = read_script(args.input.as_deref())?;

    let queue = match &args.queue {
        Some(selector) => QueuePolicyKind::from_selector(selector),
        None => script
            .queue_choice
            .map(QueuePolicyKind::from_choice)
            .unwrap_or_else(|| config.queue_policy()),
    };
    let placement = match &args.placement {
        Some(selector) => PlacementPolicyKind::from_selector(selector),
        None => script
            .placement_choice
            .map(PlacementPolicyKind::from_choice)
            .unwrap_or_else(|| config.placement_policy()),
    };

    let jobs = match build_jobs(&script.jobs) {
        Ok(jobs) => jobs,
        Err(errors) => {
            for e in &errors {
                eprintln!("  {e}");
            }
            bail!("input rejected: {} invalid job parameter(s)", errors.len());
        }
    };

    info!(
        jobs = jobs.len(),
        nodes = config.cluster.nodes,
        queue = %queue,
        placement = %placement,
        "starting run"
    );
    let outcome = simulate(
        jobs.clone(),
        config.node_pool(),
        queue,
        placement,
        &config.limits(),
    )?;

    for event in outcome.assignments() {
        println!("{event}");
    }

    let path = &config.report.path;
    let mut sink = CsvReportSink::create(path)?;
    sink.write_nodes(&outcome.nodes)?;
    println!(
        "Worker node utilization data has been saved to '{}'.",
        path.display()
    );

    if args.kpi {
        print_kpi(&SimulationKpi::calculate(&outcome, &jobs));
    }
    Ok(())
}

fn read_script(input: Option<&str>) -> anyhow::Result<ScriptInput> {
    match input {
        None | Some("-") => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            read_from(stdin.lock(), interactive).context("reading input from stdin")
        }
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening input {path}"))?;
            read_from(BufReader::new(file), false).with_context(|| format!("reading input {path}"))
        }
    }
}

fn read_from<R: BufRead>(reader: R, interactive: bool) -> anyhow::Result<ScriptInput> {
    let prompts: Box<dyn Write> = if interactive {
        Box::new(io::stderr())
    } else {
        Box::new(io::sink())
    };
    Ok(read_input(reader, prompts)?)
}

fn print_kpi(kpi: &SimulationKpi) {
    println!();
    println!("Makespan:            {}", kpi.makespan);
    println!("Jobs placed:         {}", kpi.jobs_placed);
    println!("Average wait:        {:.2}", kpi.avg_wait);
    println!("Longest wait:        {}", kpi.max_wait);
    println!("Nodes used:          {}", kpi.nodes_used);
    println!(
        "Core utilization:    {:.1}%",
        kpi.avg_core_utilization * 100.0
    );
}
