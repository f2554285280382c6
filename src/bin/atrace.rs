//! atrace - Command-line interface for Attention Trace
//!
//! Commands:
//! - analyze: Classify a captured pointer trace
//! - validate: Check a pointer trace for malformed samples
//! - schema: Print the input/output schema

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

use attention_trace::adapter::SampleAdapter;
use attention_trace::types::PointerSample;
use attention_trace::{report, AnalysisConfig, AnalysisError, TraceAnalyzer, VERSION};

/// atrace - Pointer-movement feature extraction and attention screening
#[derive(Parser)]
#[command(name = "atrace")]
#[command(version = VERSION)]
#[command(about = "Classify pointer traces into attention patterns", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a pointer trace
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,

        /// Analysis configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// User the trace belongs to (required for record output)
        #[arg(long)]
        user_id: Option<String>,

        /// Capture session the trace belongs to
        #[arg(long)]
        session_id: Option<String>,
    },

    /// Validate a pointer trace
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// JSON array of samples
    Json,
    /// Newline-delimited JSON (one sample per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact response JSON
    Json,
    /// Pretty-printed response JSON
    JsonPretty,
    /// Plain-text report
    Report,
    /// Persistence record JSON (requires --user-id)
    Record,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (pointer sample array)
    Input,
    /// Output schema (analysis response)
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("attention_trace={level},atrace={level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), AtraceCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            input_format,
            output_format,
            config,
            user_id,
            session_id,
        } => cmd_analyze(
            &input,
            &output,
            input_format,
            output_format,
            config.as_deref(),
            user_id.as_deref(),
            session_id.as_deref(),
        ),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn cmd_analyze(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    config: Option<&Path>,
    user_id: Option<&str>,
    session_id: Option<&str>,
) -> Result<(), AtraceCliError> {
    let analyzer = match config {
        Some(path) => {
            info!(path = %path.display(), "loading analysis config");
            TraceAnalyzer::with_config(AnalysisConfig::from_file(path)?)?
        }
        None => TraceAnalyzer::new(),
    };

    let samples = read_samples(input, &input_format)?;
    debug!(samples = samples.len(), "read pointer trace");

    let output_data = match output_format {
        OutputFormat::Json => serde_json::to_string(&analyzer.respond(&samples)?)? + "\n",
        OutputFormat::JsonPretty => {
            serde_json::to_string_pretty(&analyzer.respond(&samples)?)? + "\n"
        }
        OutputFormat::Report => report::render(&analyzer.analyze(&samples)?),
        OutputFormat::Record => {
            let user_id = require_user_id(user_id)?;
            let record = analyzer.record(user_id, session_id, &samples)?;
            serde_json::to_string(&record)? + "\n"
        }
    };

    write_output(output, &output_data)
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), AtraceCliError> {
    let samples = read_samples(input, &input_format)?;
    let issues = SampleAdapter::validate_samples(&samples);

    let report = ValidationReport {
        total_samples: samples.len(),
        invalid_samples: issues.len(),
        errors: issues
            .iter()
            .map(|issue| ValidationErrorDetail {
                index: issue.index,
                error: issue.reason.clone(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total samples:   {}", report.total_samples);
        println!("Invalid samples: {}", report.invalid_samples);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Sample {}: {}", err.index, err.error);
            }
        }
    }

    if report.invalid_samples > 0 {
        Err(AtraceCliError::ValidationFailed(report.invalid_samples))
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), AtraceCliError> {
    let schema = match schema_type {
        SchemaType::Input => input_json_schema(),
        SchemaType::Output => output_json_schema(),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

// Helper functions

fn require_user_id(user_id: Option<&str>) -> Result<&str, AtraceCliError> {
    user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(AtraceCliError::MissingUserId)
}

fn read_input(input: &Path) -> Result<String, AtraceCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn read_samples(input: &Path, format: &InputFormat) -> Result<Vec<PointerSample>, AtraceCliError> {
    let data = read_input(input)?;
    let samples = match format {
        InputFormat::Json => SampleAdapter::parse_array(&data)?,
        InputFormat::Ndjson => SampleAdapter::parse_ndjson(&data)?,
    };
    Ok(samples)
}

fn write_output(output: &Path, data: &str) -> Result<(), AtraceCliError> {
    if output.to_string_lossy() == "-" {
        print!("{}", data);
    } else {
        fs::write(output, data)?;
    }
    Ok(())
}

fn input_json_schema() -> serde_json::Value {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "pointer_trace",
        "description": "Captured pointer samples, ordered by non-decreasing time",
        "type": "array",
        "items": {
            "type": "object",
            "required": ["time", "x", "y"],
            "properties": {
                "time": { "type": "number" },
                "x": { "type": "number" },
                "y": { "type": "number" }
            }
        }
    })
}

fn output_json_schema() -> serde_json::Value {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "analysis_response",
        "type": "object",
        "required": ["adhd_type", "confidence", "classifications"],
        "properties": {
            "adhd_type": {
                "type": "string",
                "enum": [
                    "Hyperactive ADHD",
                    "Inattentive ADHD",
                    "Combined ADHD",
                    "No ADHD",
                    "Insufficient Data"
                ]
            },
            "confidence": { "type": "number", "minimum": 0, "maximum": 100 },
            "classifications": {
                "type": "object",
                "properties": {
                    "Avg Velocity": { "type": "string" },
                    "Velocity Std Dev": { "type": "string" },
                    "Avg Acceleration": { "type": "string" },
                    "Direction Changes": { "type": "integer" }
                }
            }
        }
    })
}

// Error types

#[derive(Debug)]
enum AtraceCliError {
    Io(io::Error),
    Analysis(AnalysisError),
    Json(serde_json::Error),
    MissingUserId,
    ValidationFailed(usize),
}

impl From<io::Error> for AtraceCliError {
    fn from(e: io::Error) -> Self {
        AtraceCliError::Io(e)
    }
}

impl From<AnalysisError> for AtraceCliError {
    fn from(e: AnalysisError) -> Self {
        AtraceCliError::Analysis(e)
    }
}

impl From<serde_json::Error> for AtraceCliError {
    fn from(e: serde_json::Error) -> Self {
        AtraceCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<AtraceCliError> for CliError {
    fn from(e: AtraceCliError) -> Self {
        match e {
            AtraceCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            AtraceCliError::Analysis(AnalysisError::InvalidInput { index, reason }) => CliError {
                code: "INVALID_INPUT".to_string(),
                message: format!("Invalid sample at index {}: {}", index, reason),
                hint: Some("Run 'atrace validate' for details".to_string()),
            },
            AtraceCliError::Analysis(AnalysisError::InvalidConfig(msg)) => CliError {
                code: "INVALID_CONFIG".to_string(),
                message: msg,
                hint: Some("Check the configuration file".to_string()),
            },
            AtraceCliError::Analysis(AnalysisError::EncodingError(msg)) => CliError {
                code: "ENCODING_ERROR".to_string(),
                message: msg,
                hint: None,
            },
            AtraceCliError::Analysis(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Ensure input is a JSON array of {time, x, y} objects".to_string()),
            },
            AtraceCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            AtraceCliError::MissingUserId => CliError {
                code: "MISSING_USER_ID".to_string(),
                message: "Record output requires a non-blank user id".to_string(),
                hint: Some("Pass --user-id".to_string()),
            },
            AtraceCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} samples failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_samples: usize,
    invalid_samples: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    error: String,
}
