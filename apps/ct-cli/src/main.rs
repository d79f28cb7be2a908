use clap::{Parser, Subcommand};
use ct_app::{
    AppResult, RunSummary, ScenarioFormat, load_scenario, run_scenario_with_progress,
    scenario_template, size_heater, switch_log_csv, trajectory_csv,
};
use ct_sim::{SimProgress, Window};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ct-cli")]
#[command(about = "CubeTherm CLI - two-node CubeSat thermal simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario file
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Print the reference scenario as a starting point
    Template {
        /// Emit JSON instead of YAML
        #[arg(long)]
        json: bool,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a scenario
    Run {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Trajectory CSV output path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the run summary as JSON
        #[arg(long)]
        summary_json: Option<PathBuf>,
        /// Heater switching history CSV output path
        #[arg(long)]
        switch_log: Option<PathBuf>,
    },
    /// Minimum heater power to hold the battery at one or more temperatures
    SizeHeater {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Target hold temperature in °C (repeatable)
        #[arg(long = "target", required = true, num_args = 1..)]
        targets: Vec<f64>,
        /// Ignore samples before this time (s)
        #[arg(long, default_value_t = 0.0)]
        from: f64,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing on stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Template { json, output } => cmd_template(json, output.as_deref()),
        Commands::Run {
            scenario_path,
            output,
            summary_json,
            switch_log,
        } => cmd_run(
            &scenario_path,
            output.as_deref(),
            summary_json.as_deref(),
            switch_log.as_deref(),
        ),
        Commands::SizeHeater {
            scenario_path,
            targets,
            from,
        } => cmd_size_heater(&scenario_path, &targets, from),
    }
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = load_scenario(scenario_path)?;
    println!("✓ Scenario '{}' is valid", scenario.name);
    println!(
        "  {} s in {} samples, heater {}",
        scenario.simulation.duration_s,
        scenario.simulation.samples,
        if scenario.heater.enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    Ok(())
}

fn cmd_template(json: bool, output: Option<&Path>) -> AppResult<()> {
    let format = if json {
        ScenarioFormat::Json
    } else {
        ScenarioFormat::Yaml
    };
    let text = scenario_template(format)?;
    if let Some(path) = output {
        std::fs::write(path, text)?;
        eprintln!("✓ Wrote template to {}", path.display());
    } else {
        print!("{}", text);
    }
    Ok(())
}

fn cmd_run(
    scenario_path: &Path,
    output: Option<&Path>,
    summary_json: Option<&Path>,
    switch_log: Option<&Path>,
) -> AppResult<()> {
    let scenario = load_scenario(scenario_path)?;
    eprintln!("Running scenario: {}", scenario.name);

    let started = Instant::now();
    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let result = run_scenario_with_progress(
        &scenario,
        Some(&mut |p: SimProgress| {
            let emit_now = (p.fraction - last_fraction).abs() >= 0.005
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&p, started.elapsed().as_secs_f64());
                last_fraction = p.fraction;
                last_emit = Instant::now();
            }
        }),
    );
    clear_progress_line();
    let output_data = result?;

    if let Some(path) = output {
        std::fs::write(path, trajectory_csv(&output_data))?;
        eprintln!(
            "✓ Exported {} samples to {}",
            output_data.record.len(),
            path.display()
        );
    }

    if let Some(path) = summary_json {
        let json = serde_json::to_string_pretty(&output_data.summary)?;
        std::fs::write(path, json)?;
        eprintln!("✓ Wrote summary to {}", path.display());
    }

    if let Some(path) = switch_log {
        std::fs::write(path, switch_log_csv(&output_data))?;
        eprintln!(
            "✓ Exported {} heater transitions to {}",
            output_data.model.switch_log().events.len(),
            path.display()
        );
    }

    print_summary(&output_data.summary, started.elapsed().as_secs_f64());
    Ok(())
}

fn cmd_size_heater(scenario_path: &Path, targets: &[f64], from: f64) -> AppResult<()> {
    let scenario = load_scenario(scenario_path)?;
    println!("Heater sizing for scenario: {}", scenario.name);
    println!("  Unheated run, samples from t = {} s", from);

    let sizes = size_heater(&scenario, targets, Window::starting_at(from))?;
    println!("\n  target_c    peak_w    mean_w  peak_time_s");
    for s in &sizes {
        println!(
            "  {:>8.2}  {:>8.4}  {:>8.4}  {:>11.1}",
            s.target_c, s.peak_w, s.mean_w, s.peak_time_s
        );
    }
    Ok(())
}

fn print_summary(summary: &RunSummary, wall_s: f64) {
    println!("✓ Simulation completed: {}", summary.scenario);
    println!("  Samples: {}", summary.samples);
    println!("  Duration: {:.1} s", summary.duration_s);
    println!(
        "  Internal: {:.2} .. {:.2} °C (final {:.2} °C)",
        summary.internal_min_c, summary.internal_max_c, summary.final_internal_c
    );
    println!(
        "  External: {:.2} .. {:.2} °C (final {:.2} °C)",
        summary.external_min_c, summary.external_max_c, summary.final_external_c
    );
    println!(
        "  Mean net power from t = {:.1} s: internal {:.4} W, external {:.4} W",
        summary.balance_window_start_s, summary.mean_net_internal_w, summary.mean_net_external_w
    );
    println!(
        "  Orbit-average absorbed solar + albedo: {:.4} W",
        summary.orbit_average_absorbed_w
    );
    if let Some(duty) = summary.heater_duty_cycle {
        println!(
            "  Heater: duty cycle {:.1}%, {} switch-ons",
            duty * 100.0,
            summary.heater_switch_ons
        );
    }
    if let Some(s) = &summary.sizing {
        println!(
            "  Heater sizing at {:.1} °C: peak {:.4} W at t = {:.1} s, mean {:.4} W",
            s.target_c, s.peak_w, s.peak_time_s, s.mean_w
        );
    }
    println!("  Wall time: {:.3} s", wall_s);
}

fn clear_progress_line() {
    eprint!("\r{}\r", " ".repeat(100));
    let _ = io::stderr().flush();
}

fn render_cli_progress(p: &SimProgress, elapsed_s: f64) {
    let width = 28usize;
    let filled = ((p.fraction * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    eprint!(
        "\r[{}] {:>6.2}%  t={:.1}s  step={}  elapsed={:.1}s",
        bar,
        p.fraction * 100.0,
        p.time_s,
        p.steps,
        elapsed_s
    );
    let _ = io::stderr().flush();
}
