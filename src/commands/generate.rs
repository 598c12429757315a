use u_batchsim::input::{render_script, ScriptInput};
use u_batchsim::workload::{bernoulli_jobs, WorkloadParams};

pub struct GenerateArgs {
    pub ticks: u64,
    pub p_arrival: f64,
    pub p_short: f64,
    pub max_cores: u32,
    pub max_memory: u32,
    pub seed: u64,
    pub queue: i64,
    pub placement: i64,
}

pub fn generate(args: &GenerateArgs) -> anyhow::Result<()> {
    if args.max_cores == 0 || args.max_memory == 0 {
        anyhow::bail!("--max-cores and --max-memory must be at least 1");
    }
    let params = WorkloadParams {
        ticks: args.ticks,
        p_arrival: args.p_arrival,
        p_short: args.p_short,
        cores: (1, args.max_cores),
        memory_gb: (1, args.max_memory),
        ..Default::default()
    };
    let script = ScriptInput {
        jobs: bernoulli_jobs(&params, args.seed),
        queue_choice: Some(args.queue),
        placement_choice: Some(args.placement),
    };
    print!("{}", render_script(&script));
    Ok(())
}
