//! ppe-monitor: load PPE compliance records and print the view.
//!
//! ```text
//! ppe-monitor [--config FILE] [--range RANGE] [--once] [--json] [--sample] [--info]
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};

use ppe_compliance_core::{
    init_logger, DashboardView, DateRange, HttpSource, LoadOutcome, Monitor, MonitorConfig,
    RecordSource, RefreshScheduler, SampleSource,
};

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    range: Option<DateRange>,
    once: bool,
    json: bool,
    sample: bool,
    info: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--range" => {
                let range = iter.next().context("--range needs a value")?;
                args.range = Some(range.parse()?);
            }
            "--once" => args.once = true,
            "--json" => args.json = true,
            "--sample" => args.sample = true,
            "--info" => args.info = true,
            "-h" | "--help" => {
                println!(
                    "usage: ppe-monitor [--config FILE] [--range all|today|yesterday|week|month] \
                     [--once] [--json] [--sample] [--info]"
                );
                std::process::exit(0);
            }
            other => bail!("unknown argument '{}'", other),
        }
    }

    Ok(args)
}

fn print_view(view: &DashboardView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    let s = &view.summary;
    println!(
        "[{}] {} | range={} | records {} | full PPE {}",
        view.origin.as_str(),
        view.last_update_text(),
        view.range,
        view.records_counter(),
        view.compliance_text()
    );
    println!(
        "violations={} helmet_violations={} glove_violations={} full_ppe={} helmet_ok={} glove_ok={} indeterminate={}",
        s.total_violations,
        s.helmet_violations,
        s.glove_violations,
        s.full_ppe,
        s.helmet_ok,
        s.glove_ok,
        s.indeterminate
    );

    if view.is_empty() {
        println!("  (no matching records)");
    }
    for row in &view.rows {
        println!(
            "  {:>3}  {:<26} id={:<8} {:<14} {:<14} {}",
            row.row_number, row.datetime, row.id, row.helmet.label, row.glove.label, row.image_url
        );
    }
    Ok(())
}

fn report(outcome: &LoadOutcome, json: bool) {
    let result = match outcome {
        LoadOutcome::Loaded(view) => print_view(view, json),
        LoadOutcome::Sample { view, error } => {
            eprintln!("load failed ({}), showing SAMPLE data", error);
            print_view(view, json)
        }
        LoadOutcome::Failed { error } => {
            eprintln!("no data available: {}", error);
            Ok(())
        }
    };
    if let Err(e) = result {
        log::error!("PRINT_FAILED error={}", e);
    }
}

fn run<S: RecordSource>(monitor: Monitor<S>, args: &Args) {
    let outcome = monitor.start();
    report(&outcome, args.json);

    if args.info {
        println!("{}", monitor.system_info());
    }

    if args.once || !monitor.config().auto_refresh {
        return;
    }

    let mut scheduler = RefreshScheduler::new(monitor.config().refresh_interval());
    // The initial load already ran; wait one interval before the first tick.
    std::thread::sleep(scheduler.interval());
    scheduler.run(&monitor, None, |outcome| report(outcome, args.json));
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let args = parse_args()?;

    let mut config = MonitorConfig::load(args.config.as_deref()).or_else(|e| {
        if args.sample {
            Ok(MonitorConfig {
                use_sample_data: true,
                ..Default::default()
            })
        } else {
            Err(e)
        }
    })?;
    if let Some(range) = args.range {
        config.default_range = range;
    }

    log::info!(
        "MONITOR_CONFIG api_url={} auto_refresh={} interval_secs={} sample_fallback={} range={}",
        config.api_url,
        config.auto_refresh,
        config.refresh_interval_secs,
        config.use_sample_data,
        config.default_range
    );

    if args.sample || config.api_url.is_empty() {
        run(Monitor::new(SampleSource, config), &args);
    } else {
        let source = HttpSource::new(&config.api_url, config.request_timeout())
            .context("building HTTP source")?;
        run(Monitor::new(source, config), &args);
    }

    Ok(())
}
