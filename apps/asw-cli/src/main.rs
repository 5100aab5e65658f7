use asw_app::{
    AppResult, SweepOptions, SweepProgressEvent, SweepRequest, SweepTimingSummary, plan_cases,
    run_sweep_with_progress, write_reference_case,
};
use asw_core::{Geometry, case_file_path, load_config};
use asw_results::TableStore;
use asw_solver::{ProcessSolver, modes_file_path, polars_file_path};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "asw-cli")]
#[command(about = "AeroSweep CLI - angle-of-attack sweeps with an external AVL-style solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full sweep: write cases, run the solver, extract tables
    Run {
        /// Path to the sweep configuration file
        config_path: PathBuf,
        /// Geometry file handed to the solver (relative paths resolve against --workdir)
        #[arg(long)]
        geometry: PathBuf,
        /// Geometry name used in result file names (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
        /// Solver executable
        #[arg(long, default_value = "avl")]
        solver: PathBuf,
        /// Working directory holding cases/ and results/
        #[arg(long, default_value = ".")]
        workdir: PathBuf,
        /// Do not write the JSON tables under results/
        #[arg(long)]
        no_save: bool,
    },
    /// List the cases a configuration would produce, without running anything
    Cases {
        /// Path to the sweep configuration file
        config_path: PathBuf,
        /// Geometry name used in result file names
        #[arg(long, default_value = "plane")]
        name: String,
    },
    /// Write the stability reference case (cases/tail.case)
    TailCase {
        /// Path to the sweep configuration file
        config_path: PathBuf,
        /// Working directory holding cases/
        #[arg(long, default_value = ".")]
        workdir: PathBuf,
    },
    /// Print the tables saved by a previous run
    Show {
        /// Working directory holding results/
        #[arg(long, default_value = ".")]
        workdir: PathBuf,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config_path,
            geometry,
            name,
            solver,
            workdir,
            no_save,
        } => cmd_run(&config_path, &geometry, name, &solver, &workdir, !no_save),
        Commands::Cases { config_path, name } => cmd_cases(&config_path, &name),
        Commands::TailCase {
            config_path,
            workdir,
        } => cmd_tail_case(&config_path, &workdir),
        Commands::Show { workdir } => cmd_show(&workdir),
    }
}

fn geometry_name(file: &Path, name: Option<String>) -> String {
    name.unwrap_or_else(|| {
        file.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "plane".to_string())
    })
}

fn cmd_run(
    config_path: &Path,
    geometry_file: &Path,
    name: Option<String>,
    solver_path: &Path,
    workdir: &Path,
    save_tables: bool,
) -> AppResult<()> {
    let config = load_config(config_path)?;
    let geometry = Geometry::new(geometry_name(geometry_file, name), geometry_file);
    let solver = ProcessSolver::new(solver_path, workdir);
    tracing::debug!(
        solver = %solver.executable().display(),
        workdir = %solver.workdir().display(),
        "configured solver process"
    );

    println!(
        "Running sweep for {}: alpha {} to {} by {} ({} workers)",
        geometry.name, config.alpha.start, config.alpha.end, config.alpha.increment, config.workers
    );

    let request = SweepRequest {
        config: &config,
        geometry: &geometry,
        workdir,
        options: SweepOptions {
            prepare_workspace: true,
            save_tables,
        },
    };

    let response = run_sweep_with_progress(
        &request,
        &solver,
        Some(&mut |event: SweepProgressEvent| render_cli_progress(&event)),
    )?;
    clear_progress_line();

    println!("✓ Sweep completed: {} cases", response.timing.case_count);
    if let Some(polars) = &response.result.polars {
        println!("\nPolars:\n{}", polars);
    }
    if let Some(modes) = &response.result.modes {
        println!("\nModes:\n{}", modes);
    }
    print_timing_summary(&response.timing);

    Ok(())
}

fn cmd_cases(config_path: &Path, name: &str) -> AppResult<()> {
    let config = load_config(config_path)?;
    let cases = plan_cases(&config)?;
    let geometry = Geometry::new(name, PathBuf::new());

    println!("{} cases:", cases.len());
    for case in &cases {
        let mut outputs = Vec::new();
        if case.analyses.modes {
            outputs.push(modes_file_path(&geometry, case.alpha).display().to_string());
        }
        if case.analyses.polars {
            outputs.push(polars_file_path(&geometry, case.alpha).display().to_string());
        }
        println!(
            "  alpha = {:>8}  {}  -> {}",
            case.label(),
            case_file_path(case.alpha).display(),
            outputs.join(", ")
        );
    }
    Ok(())
}

fn cmd_tail_case(config_path: &Path, workdir: &Path) -> AppResult<()> {
    let config = load_config(config_path)?;
    let path = write_reference_case(workdir, &config)?;
    println!("✓ Wrote {}", workdir.join(path).display());
    Ok(())
}

fn cmd_show(workdir: &Path) -> AppResult<()> {
    let store = TableStore::new(workdir.join(asw_core::RESULTS_DIR))?;
    let (manifest, result) = store.load()?;

    println!(
        "Sweep of {} ({}) at {}: {} cases",
        manifest.geometry, manifest.geometry_file, manifest.timestamp, manifest.case_count
    );
    match &result.polars {
        Some(polars) => println!("\nPolars:\n{}", polars),
        None => println!("\nNo polars table"),
    }
    match &result.modes {
        Some(modes) => println!("\nModes:\n{}", modes),
        None => println!("\nNo modes table"),
    }
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(80));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &SweepProgressEvent) {
    let spinner = ['|', '/', '-', '\\'];
    let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
    let mut line = format!(
        "\r{} {}  cases={}  elapsed={:.2}s",
        spinner[spin_idx],
        event.stage.label(),
        event.case_count,
        event.elapsed_wall_s
    );
    if let Some(msg) = &event.message {
        line.push_str(&format!("  {}", msg));
    }
    print!("{}", line);
    let _ = io::stdout().flush();
}

fn print_timing_summary(timing: &SweepTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    let write_pct = 100.0 * timing.write_time_s / total;
    let solve_pct = 100.0 * timing.solve_time_s / total;
    let extract_pct = 100.0 * timing.extract_time_s / total;

    println!("\nTiming summary:");
    println!("  Write:   {:.3}s ({:.1}%)", timing.write_time_s, write_pct);
    println!("  Solve:   {:.3}s ({:.1}%)", timing.solve_time_s, solve_pct);
    println!(
        "  Extract: {:.3}s ({:.1}%)",
        timing.extract_time_s, extract_pct
    );
    if timing.save_time_s > 0.0 {
        println!("  Save:    {:.3}s", timing.save_time_s);
    }
    println!("  Total:   {:.3}s", timing.total_time_s);
    println!("  Workers: {}", timing.workers);
    if timing.nonzero_exits > 0 {
        println!("  Non-zero solver exits: {}", timing.nonzero_exits);
    }
}
