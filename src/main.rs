use clap::Parser;
use digit_bench::{BenchPipeline, Config};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "digit-bench")]
#[command(about = "Single-image inference latency benchmark for an MNIST digit classifier")]
struct Args {
    /// Number of inference threads (defaults to all available cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // 初始化日志系统，日志输出到stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = Config::new(args.threads).and_then(|config| {
        tracing::info!("Model: {}", config.model_path.display());
        tracing::info!("Image: {}", config.image_path.display());
        BenchPipeline::run(&config)
    });

    match result {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.diagnostic());
            ExitCode::from(e.exit_status())
        }
    }
}
