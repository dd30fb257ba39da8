use std::fs;
use std::process;

use clap::Parser;

use extent_of_market::export::export_scenario;
use extent_of_market::figures;
use extent_of_market::market::MarketReport;
use extent_of_market::piecewise::PiecewiseCurve;
use extent_of_market::returns::ReturnCurve;
use extent_of_market::series::{linear_baseline, sample};

#[derive(Parser, Debug)]
#[command(name = "extent_of_market")]
#[command(about = "Returns to the division of labour and the extent of the market")]
struct Args {
    /// Output of one worker working alone (curve scale a)
    #[arg(short, long, default_value = "10.0")]
    scale: f64,

    /// Returns-to-specialization exponent (gamma)
    #[arg(short = 'g', long, default_value = "1.59")]
    exponent: f64,

    /// Market demand levels to clear, repeatable
    #[arg(short, long = "demand", default_values = ["100.0", "200.0"])]
    demands: Vec<f64>,

    /// Largest task count sampled for the single-regime figures
    #[arg(long, default_value = "10")]
    max_tasks: u32,

    /// Task count where returns switch from the low to the high regime
    #[arg(long, default_value = "8")]
    threshold: u32,

    /// Exponent up to and including the threshold
    #[arg(long, default_value = "1.2")]
    exponent_low: f64,

    /// Exponent beyond the threshold
    #[arg(long, default_value = "0.8")]
    exponent_high: f64,

    /// Largest task count sampled for the two-regime figure
    #[arg(long, default_value = "20")]
    two_regime_max_tasks: u32,

    /// Directory the PNG figures are written to
    #[arg(short, long, default_value = "figures")]
    out_dir: String,

    /// Skip figure rendering (console report only)
    #[arg(long)]
    no_figures: bool,

    /// Export the computed series and reports to a JSON file
    #[arg(long)]
    export_json: Option<String>,
}

fn main() {
    let args = Args::parse();

    let curve = ReturnCurve::new(args.scale, args.exponent);
    println!(
        "Returns curve: scale = {}, exponent = {} ({} returns)",
        curve.scale,
        curve.exponent,
        curve.regime()
    );

    // Clear each demand level and report
    let mut reports = Vec::with_capacity(args.demands.len());
    for &demand in &args.demands {
        match MarketReport::clear(&curve, demand) {
            Ok(report) => {
                println!();
                report.print();
                reports.push(report);
            }
            Err(e) => {
                eprintln!("Cannot clear demand {}: {}", demand, e);
                process::exit(1);
            }
        }
    }

    let two_regime = PiecewiseCurve::new(
        args.scale,
        args.threshold,
        args.exponent_low,
        args.exponent_high,
    );

    if !args.no_figures {
        if let Err(e) = fs::create_dir_all(&args.out_dir) {
            eprintln!("Cannot create output directory {}: {}", args.out_dir, e);
            process::exit(1);
        }

        println!();
        println!("Rendering figures to {}/", args.out_dir);

        let path = format!("{}/returns_comparison.png", args.out_dir);
        match figures::render_returns_comparison(args.scale, args.max_tasks, &path) {
            Ok(()) => println!("  {}", path),
            Err(e) => eprintln!("  Failed to render regime comparison: {}", e),
        }

        for report in &reports {
            let path = format!("{}/market_clearing_{:.0}.png", args.out_dir, report.demand);
            match figures::render_market_clearing(&curve, report.demand, args.max_tasks, &path) {
                Ok(()) => println!("  {}", path),
                Err(e) => eprintln!("  Failed to render market clearing figure: {}", e),
            }
        }

        let path = format!("{}/two_regime.png", args.out_dir);
        let task_guides = [args.threshold, 16, 17];
        let output_guides = [100.0, 150.0, 200.0];
        match figures::render_two_regime(
            &two_regime,
            args.two_regime_max_tasks,
            &task_guides,
            &output_guides,
            &path,
        ) {
            Ok(()) => println!("  {}", path),
            Err(e) => eprintln!("  Failed to render two-regime figure: {}", e),
        }
    }

    if let Some(ref json_path) = args.export_json {
        let returns_series = match sample(&curve, 1..=args.max_tasks) {
            Ok(series) => series,
            Err(e) => {
                eprintln!("Cannot sample returns curve: {}", e);
                process::exit(1);
            }
        };
        let baseline = linear_baseline(args.scale, 1..=args.max_tasks);
        let two_regime_series = match sample(&two_regime, 1..=args.two_regime_max_tasks) {
            Ok(series) => series,
            Err(e) => {
                eprintln!("Cannot sample two-regime curve: {}", e);
                process::exit(1);
            }
        };

        let series = [
            ("returns", &returns_series),
            ("undivided_baseline", &baseline),
            ("two_regime", &two_regime_series),
        ];
        match export_scenario(&curve, &reports, &series, json_path) {
            Ok(()) => println!("Series exported to: {}", json_path),
            Err(e) => eprintln!("Failed to export series: {}", e),
        }
    }
}
