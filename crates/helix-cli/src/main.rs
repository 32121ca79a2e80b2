mod config;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::{Config, OutputFormat, override_variable};
use rhizome_helix_core::{Program, parse_number};
use rhizome_helix_eval::{Curves, Domain, Sample, Variable, VariableRegistry, evaluate, evaluate_batch};

#[derive(Parser)]
#[command(
    name = "helix",
    version,
    about = "Evaluate complex-valued functions of a real variable"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parsed tokens of a function
    Tokens {
        /// Function source (reads stdin if omitted or "-")
        file: Option<PathBuf>,
    },

    /// Evaluate a function across the domain
    Eval {
        /// Function source (reads stdin if omitted or "-")
        file: Option<PathBuf>,

        /// Lower domain bound
        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,

        /// Upper domain bound
        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,

        /// Sample spacing
        #[arg(long, allow_negative_numbers = true)]
        step: Option<f64>,

        /// Set a variable, e.g. --var a=1+2i (repeatable)
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Digits after the decimal point
        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// Evaluate a function given as argument lines at a single x
    Value {
        /// Function lines, one per argument (use -- before lines starting with '-')
        #[arg(required = true)]
        lines: Vec<String>,

        /// Sample value
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        x: f64,

        /// Set a variable, e.g. --var a=1+2i (repeatable)
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,

        /// Digits after the decimal point
        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// Show the active configuration
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Tokens { file } => cmd_tokens(file.as_deref()),
        Commands::Eval {
            file,
            min,
            max,
            step,
            vars,
            format,
            precision,
        } => {
            let cfg = config::load_config(config_path)?;
            let domain = Domain::new(
                min.unwrap_or(cfg.domain.min),
                max.unwrap_or(cfg.domain.max),
                step.unwrap_or(cfg.domain.step),
            )
            .context("invalid domain")?;
            let registry = build_registry(&cfg, &vars)?;
            cmd_eval(
                file.as_deref(),
                &registry,
                &domain,
                format.unwrap_or(cfg.output.format),
                precision.unwrap_or(cfg.output.precision),
            )
        }
        Commands::Value {
            lines,
            x,
            vars,
            precision,
        } => {
            let cfg = config::load_config(config_path)?;
            let registry = build_registry(&cfg, &vars)?;
            cmd_value(&lines, x, &registry, precision.unwrap_or(cfg.output.precision))
        }
        Commands::Config => cmd_config(config_path),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_tokens(file: Option<&Path>) -> Result<()> {
    let source = read_source(file)?;
    let program = Program::parse(&source)?;
    for instruction in program.instructions() {
        println!("{}: {}", instruction.line, instruction.token);
    }
    Ok(())
}

fn cmd_eval(
    file: Option<&Path>,
    registry: &VariableRegistry,
    domain: &Domain,
    format: OutputFormat,
    precision: usize,
) -> Result<()> {
    let source = read_source(file)?;
    let program = Program::parse(&source)?;
    let samples = evaluate_batch(&program, registry, domain)?;

    match format {
        OutputFormat::Csv => print!("{}", format_csv(&samples, precision)),
        OutputFormat::Json => {
            let curves = Curves::from_samples(&samples)?;
            println!("{}", serde_json::to_string_pretty(&curves)?);
        }
    }
    Ok(())
}

fn cmd_value(lines: &[String], x: f64, registry: &VariableRegistry, precision: usize) -> Result<()> {
    let program = Program::from_lines(lines)?;
    for value in evaluate(&program, registry, x)? {
        println!("{}", value.print(precision));
    }
    Ok(())
}

fn cmd_config(explicit: Option<&Path>) -> Result<()> {
    let cfg = config::load_config(explicit)?;
    println!("Config: {}", config::show_config_path(explicit));
    println!();
    println!("[domain]");
    println!("  min = {}", cfg.domain.min);
    println!("  max = {}", cfg.domain.max);
    println!("  step = {}", cfg.domain.step);
    println!();
    println!("[output]");
    println!("  precision = {}", cfg.output.precision);
    println!("  format = {}", cfg.output.format);
    println!();
    println!("[variables]");
    for var in cfg.registry()?.iter() {
        println!("  {} = {}", var.name, var.value.print(cfg.output.precision));
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Config variables first, then `--var` overrides.
fn build_registry(cfg: &Config, vars: &[String]) -> Result<VariableRegistry> {
    let mut registry = cfg.registry()?;
    for arg in vars {
        override_variable(&mut registry, parse_var(arg)?);
    }
    Ok(registry)
}

fn parse_var(arg: &str) -> Result<Variable> {
    let (name, value) = arg
        .split_once('=')
        .with_context(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    let name = name.trim();
    let value = parse_number(value.trim())
        .with_context(|| format!("variable '{name}': invalid value '{}'", value.trim()))?;
    Ok(Variable::constant(name, value))
}

/// One row per sample: `x,re0,im0,re1,im1,...`, with a header.
fn format_csv(samples: &[Sample], precision: usize) -> String {
    let mut out = String::new();
    let outputs = samples.first().map_or(0, |s| s.values.len());

    out.push('x');
    for i in 0..outputs {
        out.push_str(&format!(",re{i},im{i}"));
    }
    out.push('\n');

    for sample in samples {
        out.push_str(&format!("{:.*}", precision, sample.x));
        for value in &sample.values {
            out.push_str(&format!(",{:.*},{:.*}", precision, value.re, precision, value.im));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhizome_helix_complex::Complex;

    #[test]
    fn test_parse_var() {
        let var = parse_var("a=1+2i").unwrap();
        assert_eq!(var.name, "a");
        assert_eq!(var.value, Complex::new(1.0, 2.0));

        let var = parse_var(" k = -i ").unwrap();
        assert_eq!(var.name, "k");
        assert_eq!(var.value, Complex::new(0.0, -1.0));
    }

    #[test]
    fn test_parse_var_errors() {
        assert!(parse_var("a").is_err());
        assert!(parse_var("a=foo").is_err());
    }

    #[test]
    fn test_var_overrides_config() {
        let registry = build_registry(&Config::default(), &["pi=3".into(), "a=2".into()]).unwrap();
        assert_eq!(registry.resolve("pi"), Some(Complex::real(3.0)));
        assert_eq!(registry.resolve("a"), Some(Complex::real(2.0)));
    }

    #[test]
    fn test_format_csv() {
        let samples = vec![
            Sample {
                x: 0.0,
                values: vec![Complex::new(1.0, -0.5)],
            },
            Sample {
                x: 0.5,
                values: vec![Complex::new(2.25, 0.0)],
            },
        ];
        assert_eq!(
            format_csv(&samples, 2),
            "x,re0,im0\n0.00,1.00,-0.50\n0.50,2.25,0.00\n"
        );
    }

    #[test]
    fn test_format_csv_empty() {
        assert_eq!(format_csv(&[], 4), "x\n");
    }

    #[test]
    fn test_cli_parses_negative_bounds() {
        let cli = Cli::try_parse_from(["helix", "eval", "f.txt", "--min", "-3", "--max", "3"]).unwrap();
        match cli.command {
            Commands::Eval { min, max, .. } => {
                assert_eq!(min, Some(-3.0));
                assert_eq!(max, Some(3.0));
            }
            _ => panic!("expected eval"),
        }
    }
}
