#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!(
        "The sortviz CLI requires the \"cli\" feature. Rebuild with `--features cli` to enable it."
    );
}

#[cfg(feature = "cli")]
mod cli {
    use std::io::{self, Write};
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;
    use sortviz::{
        create_bar_chart, create_info_line, create_status_line, Algorithm, PlaybackController,
        PlaybackEvent, RunReport, VisualizerConfig,
    };
    use tokio::sync::mpsc::UnboundedReceiver;

    const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
    const CHART_HEIGHT: usize = 20;

    #[derive(Parser, Debug)]
    #[command(name = "sortviz")]
    #[command(about = "Animate comparison sorts in the terminal")]
    struct Args {
        /// Algorithm to run (bubble, quick, merge)
        #[arg(short, long, default_value = "bubble")]
        algorithm: Algorithm,

        /// Run every algorithm in turn on the same starting sequence
        #[arg(long)]
        all: bool,

        /// Speed 1-100 (higher is faster)
        #[arg(short, long)]
        speed: Option<i64>,

        /// Number of values to sort
        #[arg(short = 'n', long)]
        size: Option<usize>,

        /// Seed for a reproducible sequence
        #[arg(long)]
        seed: Option<u64>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print algorithm metadata as JSON and exit
        #[arg(long)]
        info: bool,

        /// Skip frame rendering, print only the run summaries
        #[arg(short, long)]
        quiet: bool,
    }

    fn load_config(args: &Args) -> anyhow::Result<VisualizerConfig> {
        let mut config = match &args.config {
            Some(path) => VisualizerConfig::load(path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
            None => VisualizerConfig::default(),
        };
        if let Some(size) = args.size {
            config = config.with_array_size(size);
        }
        if let Some(seed) = args.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }

    fn render_frame(controller: &PlaybackController) -> io::Result<()> {
        let chart = create_bar_chart(
            &controller.sequence(),
            &controller.markers(),
            CHART_HEIGHT,
            controller.config().max_value,
        );
        let status = create_status_line(
            controller.selected_algorithm(),
            controller.run_state(),
            controller.speed(),
        );
        let mut out = io::stdout().lock();
        write!(out, "{CLEAR_SCREEN}{chart}\n\n{status}\n")?;
        out.flush()
    }

    fn print_report(report: &RunReport) {
        println!("{}", create_info_line(report.algorithm.info()));
        println!(
            "  {} values: {} compares, {} swaps, {} writes, {} finalized",
            report.len, report.compares, report.swaps, report.writes, report.finalized
        );
    }

    async fn play(
        controller: &PlaybackController,
        events: &mut UnboundedReceiver<PlaybackEvent>,
        algorithm: Algorithm,
        quiet: bool,
    ) -> anyhow::Result<RunReport> {
        let runner = controller.clone();
        let task = tokio::spawn(async move { runner.run(algorithm).await });

        while let Some(event) = events.recv().await {
            match event {
                PlaybackEvent::Finished(_) => break,
                PlaybackEvent::Step(_) | PlaybackEvent::Snapshot(_) if !quiet => {
                    if let Err(err) = render_frame(controller) {
                        task.abort();
                        return Err(err).context("Failed to render frame");
                    }
                }
                _ => {}
            }
        }

        let report = task.await.context("Sort task panicked")??;
        if !quiet {
            render_frame(controller)?;
            println!();
        }
        Ok(report)
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::init();
        let args = Args::parse();

        if args.info {
            let infos: Vec<_> = Algorithm::ALL.iter().map(|a| a.info()).collect();
            println!("{}", serde_json::to_string_pretty(&infos)?);
            return Ok(());
        }

        let config = load_config(&args)?;
        let controller = PlaybackController::new(config)?;
        if let Some(speed) = args.speed {
            controller.set_speed(speed);
        }

        let algorithms: Vec<Algorithm> = if args.all {
            Algorithm::ALL.to_vec()
        } else {
            vec![args.algorithm]
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("Failed to start runtime")?;

        let initial = controller.sequence();
        let mut events = controller.subscribe();
        let mut reports = Vec::with_capacity(algorithms.len());
        runtime.block_on(async {
            for algorithm in algorithms {
                controller.load_sequence(initial.clone())?;
                reports.push(play(&controller, &mut events, algorithm, args.quiet).await?);
            }
            anyhow::Ok(())
        })?;

        for report in &reports {
            print_report(report);
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
