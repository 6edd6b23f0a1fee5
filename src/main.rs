use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use xqtype::report::{describe_schema, shape, to_json};
use xqtype::{Diagnostic, LoadedSchema, Type, load_schema, parse_type, relate};

#[derive(Debug, Parser)]
#[command(name = "xqtype")]
#[command(about = "Structural XQuery type checker: subtyping, equality, promotion, disjointness")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a schema document and check every definition for regularity.
    Check {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Decide every judgment between two types.
    Relate {
        lhs: String,
        rhs: String,
        #[arg(long)]
        schema: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the simplified form of a type and its derived judgments.
    Simplify {
        ty: String,
        #[arg(long)]
        schema: Option<PathBuf>,
        #[arg(long)]
        unfold: bool,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("XQTYPE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let exit_code = match cli.command {
        Command::Check { file, format } => run_check(&file, format),
        Command::Relate {
            lhs,
            rhs,
            schema,
            format,
        } => run_relate(&lhs, &rhs, schema.as_deref(), format),
        Command::Simplify {
            ty,
            schema,
            unfold,
            format,
        } => run_simplify(&ty, schema.as_deref(), unfold, format),
    };
    std::process::exit(exit_code);
}

fn report_diagnostics(diags: Vec<Diagnostic>) -> i32 {
    for d in diags {
        eprintln!("{d}");
    }
    1
}

fn load(schema: Option<&Path>) -> Result<LoadedSchema, Vec<Diagnostic>> {
    match schema {
        Some(path) => load_schema(path),
        None => Ok(LoadedSchema::predefined()),
    }
}

fn parse_arg(src: &str, loaded: &LoadedSchema) -> Result<Type, Vec<Diagnostic>> {
    parse_type(src, &loaded.namespaces)
        .map_err(|diags| diags.into_iter().map(|d| d.with_source(src)).collect())
}

fn print_json<T: serde::Serialize>(report: &T) -> i32 {
    match to_json(report) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(d) => report_diagnostics(vec![d]),
    }
}

fn run_check(file: &Path, format: OutputFormat) -> i32 {
    let loaded = match load_schema(file) {
        Ok(loaded) => loaded,
        Err(diags) => return report_diagnostics(diags),
    };
    match format {
        OutputFormat::Json => print_json(&describe_schema(&loaded.registry)),
        OutputFormat::Text => {
            println!("ok");
            0
        }
    }
}

fn run_relate(lhs: &str, rhs: &str, schema: Option<&Path>, format: OutputFormat) -> i32 {
    let loaded = match load(schema) {
        Ok(loaded) => loaded,
        Err(diags) => return report_diagnostics(diags),
    };
    let (lhs, rhs) = match (parse_arg(lhs, &loaded), parse_arg(rhs, &loaded)) {
        (Ok(lhs), Ok(rhs)) => (lhs, rhs),
        (l, r) => {
            let diags = l.err().into_iter().chain(r.err()).flatten().collect();
            return report_diagnostics(diags);
        }
    };
    let report = match relate(&loaded.registry, &lhs, &rhs) {
        Ok(report) => report,
        Err(err) => return report_diagnostics(vec![err.into()]),
    };
    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            println!("subtype: {}", report.subtype);
            println!("supertype: {}", report.supertype);
            println!("equal: {}", report.equal);
            println!("promotable: {}", report.promotable);
            println!("disjoint: {}", report.disjoint);
            0
        }
    }
}

fn run_simplify(ty: &str, schema: Option<&Path>, unfold: bool, format: OutputFormat) -> i32 {
    let loaded = match load(schema) {
        Ok(loaded) => loaded,
        Err(diags) => return report_diagnostics(diags),
    };
    let t = match parse_arg(ty, &loaded) {
        Ok(t) => t,
        Err(diags) => return report_diagnostics(diags),
    };
    let report = match shape(&loaded.registry, &t, unfold) {
        Ok(report) => report,
        Err(err) => return report_diagnostics(vec![err.into()]),
    };
    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            println!("{}", report.simplified);
            if let Some(unfolded) = &report.unfolded {
                println!("unfolded: {unfolded}");
            }
            println!("quantifier: {}", report.quantifier);
            println!("prime: {}", report.prime);
            println!("data-on: {}", report.data_on);
            println!("is2ns: {}", report.is2ns);
            0
        }
    }
}
