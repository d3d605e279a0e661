//! tabdax CLI - Tableau calculation to DAX conversion tool

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tabdax::prelude::*;
use tabdax::{convert_dir, convert_file, ConversionStats};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tabdax")]
#[command(
    author,
    version,
    about = "Translate Tableau calculated fields to DAX"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate one expression, or each line of stdin
    Translate {
        /// Expression to translate (default: read lines from stdin)
        expression: Option<String>,

        /// Table name generated references are qualified against
        #[arg(short, long, default_value = tabdax::DEFAULT_TABLE_NAME)]
        table: String,

        /// CASE subject handling: discard or compare
        #[arg(long, default_value = "discard")]
        case_subject: CaseSubject,

        /// Report the route and the rules that fired
        #[arg(short, long)]
        explain: bool,

        /// Print each result as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// Convert a CSV sheet, or every CSV sheet in a directory
    Convert {
        /// Input file or directory
        input: PathBuf,

        /// Output file or directory
        output: PathBuf,

        /// Header of the formula column
        #[arg(short, long, default_value = tabdax::DEFAULT_FORMULA_COLUMN)]
        column: String,

        /// Table name generated references are qualified against
        #[arg(short, long, default_value = tabdax::DEFAULT_TABLE_NAME)]
        table: String,

        /// CASE subject handling: discard or compare
        #[arg(long, default_value = "discard")]
        case_subject: CaseSubject,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// List the translation rules in the order they are applied
    Rules {
        /// Print the catalogue as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Translate {
            expression,
            table,
            case_subject,
            explain,
            json,
        } => {
            let translator = Translator::new(TranslateOptions {
                table_name: TableName::new(table),
                case_subject,
                ..TranslateOptions::default()
            });
            translate(&translator, expression.as_deref(), explain, json)
        }
        Commands::Convert {
            input,
            output,
            column,
            table,
            case_subject,
            delimiter,
        } => {
            let options = ConversionOptions {
                formula_column: column,
                table_name: TableName::new(table),
                case_subject,
                delimiter: delimiter_byte(delimiter)?,
                ..ConversionOptions::default()
            };
            tracing::debug!(?options, "converting");
            convert(&input, &output, &options)
        }
        Commands::Rules { json } => list_rules(json),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    Ok(delimiter as u8)
}

fn translate(
    translator: &Translator<'_>,
    expression: Option<&str>,
    explain: bool,
    json: bool,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match expression {
        Some(expression) => print_translation(&mut out, translator, expression, explain, json)?,
        None => {
            for line in io::stdin().lock().lines() {
                let line = line.context("Failed to read from stdin")?;
                print_translation(&mut out, translator, &line, explain, json)?;
            }
        }
    }

    Ok(())
}

fn print_translation(
    out: &mut impl Write,
    translator: &Translator<'_>,
    expression: &str,
    explain: bool,
    json: bool,
) -> Result<()> {
    if json {
        let explanation = translator.explain(expression);
        let line = serde_json::to_string(&explanation).context("Failed to encode result")?;
        writeln!(out, "{}", line)?;
        return Ok(());
    }

    if explain {
        let explanation = translator.explain(expression);
        eprintln!("route: {}", explanation.route);
        if explanation.fired.is_empty() {
            eprintln!("rules: (none)");
        } else {
            eprintln!("rules: {}", explanation.fired.join(", "));
        }
        writeln!(out, "{}", explanation.output)?;
    } else {
        writeln!(out, "{}", translator.translate_str(expression))?;
    }
    Ok(())
}

fn convert(input: &Path, output: &Path, options: &ConversionOptions) -> Result<()> {
    let stats = if input.is_dir() {
        convert_dir(input, output, options).with_context(|| {
            format!(
                "Failed to convert '{}' into '{}'",
                input.display(),
                output.display()
            )
        })?
    } else {
        let output = if output.is_dir() {
            let name = input
                .file_name()
                .with_context(|| format!("'{}' has no file name", input.display()))?;
            output.join(name)
        } else {
            output.to_path_buf()
        };
        convert_file(input, &output, options)
            .with_context(|| format!("Failed to convert '{}'", input.display()))?
    };

    report(&stats, output);
    Ok(())
}

fn report(stats: &ConversionStats, output: &Path) {
    eprintln!(
        "Converted {} formulas ({} changed) in {} file(s) to '{}'",
        stats.formulas,
        stats.changed,
        stats.files,
        output.display()
    );
    if stats.missing_column > 0 {
        eprintln!(
            "Warning: {} sheet(s) had no formula column and were written with headers only",
            stats.missing_column
        );
    }
}

fn list_rules(json: bool) -> Result<()> {
    let catalogue = RuleTable::builtin().catalogue();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        let text = serde_json::to_string_pretty(&catalogue).context("Failed to encode rules")?;
        writeln!(out, "{}", text)?;
        return Ok(());
    }

    writeln!(out, "{:>4}  {:<10}  Rule", "#", "Family")?;
    for rule in &catalogue {
        write!(out, "{:>4}  {:<10}  {}", rule.position, rule.family.to_string(), rule.name)?;
        if let Some(generic) = &rule.precedes {
            write!(out, "  (before {})", generic)?;
        }
        if let Some(shadow) = &rule.shadowed_by {
            write!(out, "  (unreachable, shadowed by {})", shadow)?;
        }
        writeln!(out)?;
    }
    eprintln!("{} rules", catalogue.len());

    Ok(())
}
