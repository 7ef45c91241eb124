use clap::{Parser, Subcommand};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::process;
use tabwriter::TabWriter;

use carousel_io::canonical_json::to_canonical_json_string;
use carousel_io::data_json::{self, parse_data_json_str};
use carousel_io::edit::{apply_script_with_options, ApplyOptions, EditScriptV1};
use carousel_io::messages::IdentityTranslator;
use carousel_io::upload::{CarouselConfig, UploadRequest, UploadSource};
use carousel_io::version::DATA_SCHEMA;

const PREVIEW_CHARS: usize = 40;

static DATA_VALIDATOR: Lazy<Result<jsonschema::Validator, String>> = Lazy::new(|| {
    let schema: Value = serde_json::from_str(DATA_SCHEMA).map_err(|e| e.to_string())?;
    jsonschema::validator_for(&schema).map_err(|e| e.to_string())
});

#[derive(Debug, Parser)]
#[command(name = "carousel", version, about = "Carousel block data tool")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the entries of saved carousel data.
    Inspect {
        /// Carousel data JSON path
        input: String,
    },
    /// Load carousel data and write it back the way the block saves it.
    Save {
        /// Carousel data JSON path
        input: String,
        /// Output minified JSON
        #[arg(long)]
        min: bool,
        /// Output sorted-key minified JSON
        #[arg(long, conflicts_with = "min")]
        canonical: bool,
    },
    /// Check carousel data against the bundled JSON Schema.
    Validate {
        /// Carousel data JSON path
        input: String,
    },
    /// Replay an edit script against carousel data and print the result.
    Apply {
        /// Carousel data JSON path
        input: String,
        /// Edit script JSON path
        script: String,
        /// Print the replay report instead of the saved data
        #[arg(long)]
        report: bool,
        /// Reject the script if an op targets an entry removed earlier
        #[arg(long)]
        fail_on_stale: bool,
        /// Output minified JSON
        #[arg(long)]
        min: bool,
    },
    /// Describe the upload request the host should send for a file or link.
    Request {
        /// Tool config JSON path
        #[arg(long)]
        config: Option<String>,
        /// Local file name
        #[arg(long, requires = "mime", conflicts_with = "url")]
        file: Option<String>,
        /// MIME type of `--file`
        #[arg(long)]
        mime: Option<String>,
        /// Pasted image link
        #[arg(long)]
        url: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Inspect { input } => {
            let model = or_exit(parse_data_json_str(&read_or_exit(&input)), 1);

            let mut tw = TabWriter::new(std::io::stdout());
            writeln!(tw, "index\tstate\turl\tcaption\textra")?;
            for (i, (_, entry)) in model.iter().enumerate() {
                let mut extra: Vec<&str> = entry.extra.keys().map(String::as_str).collect();
                extra.sort_unstable();
                writeln!(
                    tw,
                    "{i}\t{}\t{}\t{}\t{}",
                    entry.state(),
                    or_dash(&one_line(&entry.url)),
                    or_dash(&preview(&entry.caption)),
                    or_dash(&extra.join(",")),
                )?;
            }
            tw.flush()?;
        }

        Command::Save { input, min, canonical } => {
            let model = or_exit(parse_data_json_str(&read_or_exit(&input)), 1);

            let out = if canonical {
                to_canonical_json_string(&model.serialize())?
            } else if min {
                data_json::to_minified_json(&model)?
            } else {
                data_json::to_pretty_json(&model)?
            };
            println!("{out}");
        }

        Command::Validate { input } => {
            let data: Value = or_exit(serde_json::from_str(&read_or_exit(&input)), 1);
            let validator = match DATA_VALIDATOR.as_ref() {
                Ok(v) => v,
                Err(e) => anyhow::bail!("bundled schema is invalid: {e}"),
            };

            if let Some(err) = validator.iter_errors(&data).next() {
                // Exact error string, stable for CI / integrations.
                eprintln!("{err}");
                process::exit(2);
            }
            println!("OK");
        }

        Command::Apply {
            input,
            script,
            report,
            fail_on_stale,
            min,
        } => {
            let model = or_exit(parse_data_json_str(&read_or_exit(&input)), 1);
            let script: EditScriptV1 = or_exit(serde_json::from_str(&read_or_exit(&script)), 1);

            let applied = match apply_script_with_options(
                &model,
                &script,
                ApplyOptions { fail_on_stale },
            ) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("{e}");
                    process::exit(2);
                }
            };

            for msg in applied.report.messages(&IdentityTranslator) {
                tracing::warn!("notification: {msg}");
            }

            let out = match (report, min) {
                (true, true) => serde_json::to_string(&applied.report)?,
                (true, false) => serde_json::to_string_pretty(&applied.report)?,
                (false, true) => data_json::to_minified_json(&applied.model)?,
                (false, false) => data_json::to_pretty_json(&applied.model)?,
            };
            println!("{out}");
        }

        Command::Request {
            config,
            file,
            mime,
            url,
        } => {
            let config = match config {
                Some(path) => or_exit(CarouselConfig::from_json_str(&read_or_exit(&path)), 1),
                None => CarouselConfig::default(),
            };
            let source = match (file, mime, url) {
                (Some(name), Some(mime), None) => UploadSource::File { name, mime },
                (None, None, Some(url)) => UploadSource::Url { url },
                _ => {
                    eprintln!("pass either --file with --mime, or --url");
                    process::exit(1);
                }
            };

            let request = or_exit(UploadRequest::for_source(&config, source), 2);
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
    }

    Ok(())
}

fn read_or_exit(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{path}: {e}");
            process::exit(1);
        }
    }
}

fn or_exit<T, E: std::fmt::Display>(res: Result<T, E>, code: i32) -> T {
    match res {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            process::exit(code);
        }
    }
}

fn one_line(s: &str) -> String {
    s.replace(['\n', '\r', '\t'], " ")
}

fn preview(s: &str) -> String {
    let flat = one_line(s);
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let mut out: String = flat.chars().take(PREVIEW_CHARS - 1).collect();
    out.push('…');
    out
}

fn or_dash(s: &str) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}
