use std::{fs, path::PathBuf, process::ExitCode};

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use recipe_odds::{catalog, dice::roller::FastRand as FastRandRoller, Catalog};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Catalog used when no catalog file is given
const BUILTIN_CATALOG: &str = include_str!("../catalogs/unicorn-clinic.dice");

/// Estimates how often dice sets satisfy recipes, on the first roll and after one reroll
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
	/// Catalog file declaring dice, dice sets, and recipes (uses the built-in catalog if omitted)
	catalog: Option<PathBuf>,

	/// Number of trials per recipe and dice set
	#[arg(short, long, default_value_t = 10_000)]
	cycles: u32,

	/// File to write the CSV results to
	#[arg(short, long, default_value = "results.csv")]
	output: PathBuf,

	/// Don't write a CSV file
	#[arg(long)]
	no_csv: bool,

	/// Seed for the random number generator, for reproducible runs
	#[arg(short, long)]
	seed: Option<u64>,

	/// Don't print the first-roll listing
	#[arg(short, long)]
	quiet: bool,

	/// Enable debug logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> ExitCode {
	let args = Args::parse();

	let level = if args.verbose { Level::DEBUG } else { Level::INFO };
	let subscriber = FmtSubscriber::builder()
		.with_max_level(level)
		.with_writer(std::io::stderr)
		.finish();
	if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
		eprintln!("Failed to set tracing subscriber: {}", err);
	}

	// Load the catalog
	let (source_name, src) = match &args.catalog {
		Some(path) => match fs::read_to_string(path) {
			Ok(src) => (path.display().to_string(), src),
			Err(err) => {
				error!("Unable to read catalog {}: {}", path.display(), err);
				return ExitCode::FAILURE;
			}
		},
		None => ("<built-in>".to_owned(), BUILTIN_CATALOG.to_owned()),
	};

	let catalog = match Catalog::parse(&src) {
		Ok(catalog) => catalog,
		Err(err) => {
			report_catalog_error(&source_name, &src, &err);
			return ExitCode::FAILURE;
		}
	};
	info!(
		catalog = %source_name,
		recipes = catalog.recipes.len(),
		dice_sets = catalog.dice_sets.len(),
		"loaded catalog"
	);

	let mut sim = match catalog.into_simulator() {
		Ok(sim) => sim,
		Err(err) => {
			error!("Invalid catalog: {}", err);
			return ExitCode::FAILURE;
		}
	};

	// Run the simulation
	let mut roller = args.seed.map_or_else(FastRandRoller::default, FastRandRoller::with_seed);
	let table = match sim.simulate(args.cycles, &mut roller) {
		Ok(table) => table,
		Err(err) => {
			error!("Simulation failed: {}", err);
			return ExitCode::FAILURE;
		}
	};

	if !args.quiet {
		print!("{}", table.listing());
	}

	if !args.no_csv {
		if let Err(err) = fs::write(&args.output, table.to_csv()) {
			error!("Unable to write results to {}: {}", args.output.display(), err);
			return ExitCode::FAILURE;
		}
		info!(path = %args.output.display(), "wrote results");
	}

	ExitCode::SUCCESS
}

/// Prints a pretty report of a catalog error, pointing at the offending source.
fn report_catalog_error(source_name: &str, src: &str, err: &catalog::Error) {
	let labels = err.labels();
	let start = labels.first().map_or(0, |(span, _)| span.start);

	let report = Report::build(ReportKind::Error, (source_name, start..start))
		.with_message(err.to_string())
		.with_labels(labels.into_iter().map(|(span, message)| {
			Label::new((source_name, span))
				.with_message(message)
				.with_color(Color::Red)
		}))
		.finish();

	if let Err(print_err) = report.eprint((source_name, Source::from(src))) {
		eprintln!("{}", err);
		eprintln!("Unable to print error report: {}", print_err);
	}
}
