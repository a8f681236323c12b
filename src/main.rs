//! Command line front end: sweep the whole catalogue, probe one function
//! over a range, or table a function's behavior at its edge inputs.

use std::error::Error;
use std::process;

use clap::{Parser, Subcommand};

use ulp_probe::classify::classify;
use ulp_probe::registry::{self, FnSpec, CATALOG};
use ulp_probe::ulp::ulp_distance;
use ulp_probe::{
    compare_sweep, compare_sweep_parallel, help_sign, linspace, sample_sweep, ProbeError,
    SweepSummary,
};

const DEFAULT_POINTS: usize = 2001;

#[derive(Parser)]
#[command(
    name = "ulp-probe",
    version,
    about = "Accuracy probes for elementary math functions, reported in ulps"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep every catalogued function over its default domain
    All(AllArgs),
    /// Sweep one function against the platform implementation
    #[command(name = "fn")]
    Probe(ProbeArgs),
    /// Table one function's behavior at special and edge inputs
    Edges(EdgesArgs),
    /// List the catalogued functions
    List,
}

#[derive(Parser)]
struct AllArgs {
    /// Points per sweep
    #[arg(long, default_value_t = DEFAULT_POINTS)]
    points: usize,
    /// Split each sweep across threads
    #[arg(long)]
    parallel: bool,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ProbeArgs {
    /// Catalogued function name, as shown by `list`
    name: String,
    /// Sweep start, defaulting to the catalogued domain
    #[arg(long, allow_negative_numbers = true)]
    start: Option<f64>,
    /// Sweep stop, defaulting to the catalogued domain
    #[arg(long, allow_negative_numbers = true)]
    stop: Option<f64>,
    /// Points in the sweep
    #[arg(long, default_value_t = DEFAULT_POINTS)]
    points: usize,
    /// Probe the textbook rendition instead of the library one
    #[arg(long)]
    textbook: bool,
    /// Split the sweep across threads
    #[arg(long)]
    parallel: bool,
    /// Emit per-input samples as CSV instead of a summary
    #[arg(long)]
    samples: bool,
    /// Emit the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct EdgesArgs {
    /// Catalogued function name, as shown by `list`
    name: String,
}

// A missing bound falls back to the catalogued domain. A one-point sweep
// samples only start, so its stop needs no ordering; anything longer needs
// an ordered range.
fn resolve_range(
    spec: &FnSpec,
    start: Option<f64>,
    stop: Option<f64>,
    points: usize,
) -> Result<(f64, f64), ProbeError> {
    let start = start.unwrap_or(spec.domain.0);
    let stop = stop.unwrap_or(spec.domain.1);
    let ordered = points <= 1 || start < stop;
    if !start.is_finite() || !stop.is_finite() || !ordered {
        return Err(ProbeError::InvalidRange { start, stop });
    }
    Ok((start, stop))
}

fn run_sweep(
    candidate: fn(f64) -> f64,
    reference: fn(f64) -> f64,
    inputs: &[f64],
    parallel: bool,
) -> Result<SweepSummary, ProbeError> {
    if parallel {
        compare_sweep_parallel(candidate, reference, inputs)
    } else {
        compare_sweep(candidate, reference, inputs)
    }
}

fn cmd_all(args: AllArgs) -> Result<(), Box<dyn Error>> {
    eprintln!(
        "[all] sweeping {} functions, {} points each",
        CATALOG.len(),
        args.points
    );
    let mut rows = Vec::new();
    for spec in CATALOG {
        let inputs = spec.default_inputs(args.points);
        let library = run_sweep(spec.library, spec.platform, &inputs, args.parallel)?;
        let textbook = run_sweep(spec.textbook, spec.platform, &inputs, args.parallel)?;
        if args.json {
            rows.push(serde_json::json!({
                "name": spec.name,
                "domain": { "start": spec.domain.0, "stop": spec.domain.1 },
                "library": library,
                "textbook": textbook,
            }));
        } else {
            println!("{} over [{}, {}]", spec.name, spec.domain.0, spec.domain.1);
            println!("  library:  {}", library);
            println!("  textbook: {}", textbook);
        }
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    }
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> Result<(), Box<dyn Error>> {
    let spec = registry::lookup(&args.name)?;
    let (start, stop) = resolve_range(spec, args.start, args.stop, args.points)?;
    let inputs = linspace(start, stop, args.points);
    if inputs.is_empty() {
        return Err(ProbeError::EmptySweep.into());
    }
    let (candidate, label) = if args.textbook {
        (spec.textbook, "textbook")
    } else {
        (spec.library, "library")
    };
    eprintln!(
        "[fn] {} {} vs platform over [{}, {}], {} points",
        spec.name, label, start, stop, args.points
    );
    if args.samples {
        println!("x,candidate,reference,ulp");
        for sample in sample_sweep(candidate, spec.platform, &inputs) {
            println!(
                "{:e},{:e},{:e},{:e}",
                sample.x,
                sample.candidate,
                sample.reference,
                sample.divergence()
            );
        }
        return Ok(());
    }
    let summary = run_sweep(candidate, spec.platform, &inputs, args.parallel)?;
    if args.json {
        let row = serde_json::json!({
            "name": spec.name,
            "candidate": label,
            "range": { "start": start, "stop": stop },
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&row)?);
    } else {
        println!("{} ({}): {}", spec.name, label, summary);
    }
    Ok(())
}

fn cmd_edges(args: EdgesArgs) -> Result<(), Box<dyn Error>> {
    let spec = registry::lookup(&args.name)?;
    let inputs = spec.edge_inputs();
    eprintln!("[edges] {}: {} probe inputs", spec.name, inputs.len());
    println!(
        "{:>24}  {:>24}  {:>24}  {:>12}  {}",
        "x", "library", "platform", "ulp", "flags"
    );
    for x in inputs {
        let lib = classify(x, spec.library);
        let plat = classify(x, spec.platform);
        let d = ulp_distance(lib.result, plat.result);
        let flags = match (lib.special, plat.special) {
            (true, true) => "special",
            (true, false) => "special(library)",
            (false, true) => "special(platform)",
            (false, false) => "",
        };
        println!(
            "{:>24}  {:>24}  {:>24}  {:>12}  {}",
            fmt_value(x),
            fmt_value(lib.result),
            fmt_value(plat.result),
            fmt_ulp(d),
            flags
        );
    }
    Ok(())
}

fn cmd_list() -> Result<(), Box<dyn Error>> {
    for spec in CATALOG {
        println!(
            "{:<8} [{}, {}]  {}",
            spec.name, spec.domain.0, spec.domain.1, spec.description
        );
    }
    Ok(())
}

// {:e} drops the sign of -NaN; restore it the way the summaries do.
fn fmt_value(x: f64) -> String {
    format!("{}{:e}", help_sign(x), x)
}

fn fmt_ulp(d: f64) -> String {
    if d == 0.0 {
        "0".to_string()
    } else {
        format!("{:e}", d)
    }
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::All(args) => cmd_all(args),
        Commands::Probe(args) => cmd_probe(args),
        Commands::Edges(args) => cmd_edges(args),
        Commands::List => cmd_list(),
    };
    if let Err(e) = result {
        eprintln!("[error] {}", e);
        process::exit(1);
    }
}
