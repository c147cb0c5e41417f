//! Transformix CLI - terminal client for the Transformix conversion API
//!
//! Discovers the server's capabilities, renders them as cards, and drives the
//! upload/download flow for a selected capability.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use transformix_lib::client::{icon_for, RegistryClient, TransferHandler, UploadForm};
use transformix_lib::config;
use transformix_lib::models::{Capability, FieldKind, FileFilter, InputShape};

// Help text constants
const MAIN_HELP: &str = r##"
Transformix CLI - terminal client for the Transformix conversion API

Transformix converts and manipulates documents by delegating to mature
external tools on the server side. This CLI discovers what the server can do,
uploads your files with the right parameters, and downloads the result.

CORE CONCEPTS:
  Capability - One supported transformation (e.g. "Merge PDF"), with a typed
               form schema describing its inputs
  Form       - The draft assembled for one submission: files plus parameters
  Transfer   - The multipart upload and the resulting download

QUICK START:
  1. See what the server offers:   transformix list
  2. Inspect a capability's form:  transformix show /pdf/split
  3. Convert something:            transformix convert /convert/word-to-pdf report.docx
"##;

const EXAMPLES_HELP: &str = r##"
EXAMPLES:
  transformix list
  transformix show /pdf/watermark
  transformix convert /convert/word-to-pdf report.docx
  transformix convert /pdf/merge a.pdf b.pdf c.pdf
  transformix convert /pdf/split big.pdf --set from_page=3 --set to_page=7
  transformix convert /pdf/protect secret.pdf --set password=hunter2
  transformix convert /convert/html-to-pdf --url https://example.org
  transformix convert /pdf/watermark in.pdf --set text=DRAFT --image logo.png
  transformix --server http://converter.local:9000 list
  transformix theme plain
"##;

const CONVERT_HELP: &str = r##"
EXAMPLES:
  transformix convert /compress/pdf big.pdf --set quality=60
  transformix convert /pdf/delete-pages in.pdf --set pages=1,3,5-7
  transformix convert /pdf/reorder in.pdf --set order=3,1,2
  transformix convert /pdf/page-numbers in.pdf --set format="Page {n}" --set position=top-right

FIELDS:
  Every capability advertises its fields in the listing; `transformix show
  <capability>` prints them. Fields left unset fall back to their declared
  defaults before the upload is sent.
"##;

/// Transformix CLI - terminal client for the Transformix conversion API
#[derive(Parser)]
#[command(name = "transformix")]
#[command(author, version)]
#[command(about = "Convert and manipulate documents via a Transformix server")]
#[command(long_about = MAIN_HELP)]
#[command(after_help = EXAMPLES_HELP)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the Transformix server (overrides the configured one)
    #[arg(short, long, global = true)]
    server: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the server's capabilities as cards
    List {
        /// Print the raw listing as JSON instead of cards
        #[arg(long)]
        json: bool,
    },

    /// Show the upload form schema of one capability
    Show {
        /// Capability endpoint (e.g. /pdf/split) or name (e.g. "Split PDF")
        capability: String,
    },

    /// Upload file(s) to a capability and download the result
    #[command(after_help = CONVERT_HELP)]
    Convert {
        /// Capability endpoint (e.g. /pdf/merge) or name (e.g. "Merge PDF")
        capability: String,

        /// Input file(s)
        files: Vec<PathBuf>,

        /// Set a form field, e.g. --set quality=70 (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// URL to render (HTML to PDF)
        #[arg(long)]
        url: Option<String>,

        /// Raw HTML to render (HTML to PDF)
        #[arg(long)]
        html: Option<String>,

        /// Secondary image file (watermark)
        #[arg(long)]
        image: Option<PathBuf>,

        /// Directory the downloaded result is written into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Get or set the card theme (color | plain)
    Theme {
        /// New theme; omit to show the current one
        value: Option<String>,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = config::load_config().unwrap_or_else(|e| {
        log::warn!("using default configuration: {}", e);
        config::GlobalConfig::default()
    });
    colored::control::set_override(config.colored_output());

    let server = cli.server.clone().unwrap_or_else(|| config.server_url.clone());

    let result = match cli.command {
        Commands::List { json } => handle_list(&server, json).await,
        Commands::Show { capability } => handle_show(&server, &capability).await,
        Commands::Convert {
            capability,
            files,
            set,
            url,
            html,
            image,
            output_dir,
        } => handle_convert(&server, &capability, files, set, url, html, image, output_dir).await,
        Commands::Theme { value } => handle_theme(value),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

// ============================================================================
// Handler Implementations
// ============================================================================

async fn handle_list(server: &str, json: bool) -> Result<()> {
    let registry = RegistryClient::fetch(server).await;

    if json {
        println!("{}", serde_json::to_string_pretty(registry.capabilities())?);
        return Ok(());
    }

    if registry.is_empty() {
        println!("No capabilities available (is the server at {} reachable?)", server);
        return Ok(());
    }

    for capability in registry.capabilities() {
        print_card(capability);
    }
    Ok(())
}

fn print_card(capability: &Capability) {
    let icon = icon_for(&capability.name);
    let types = format!("{} → {}", capability.from_type, capability.to_type);
    println!(
        "{:2} {:<22} {:<18} {}",
        icon.glyph(),
        capability.name.bold(),
        types.dimmed(),
        capability.endpoint.cyan()
    );
}

async fn handle_show(server: &str, key: &str) -> Result<()> {
    let registry = RegistryClient::fetch(server).await;
    let capability = registry
        .find(key)
        .with_context(|| format!("unknown capability '{}' (try `transformix list`)", key))?;

    print_card(capability);
    println!();

    match &capability.form.input {
        InputShape::SingleFile => println!("  input: one file (required)"),
        InputShape::FileList { accept } => {
            println!("  input: one or more files (required, {})", accept_label(*accept))
        }
        InputShape::TextOnly => println!("  input: none (provide --url or --html)"),
    }

    for field in &capability.form.fields {
        let requirement = if field.required { "required" } else { "optional" };
        let description = match &field.kind {
            FieldKind::Number {
                default, min, max, ..
            } => {
                let mut text = "number".to_string();
                if let (Some(min), Some(max)) = (min, max) {
                    text.push_str(&format!(" {}..{}", min, max));
                }
                if let Some(default) = default {
                    text.push_str(&format!(", default {}", default));
                }
                text
            }
            FieldKind::Text { default } => match default {
                Some(default) => format!("text, default '{}'", default),
                None => "text".to_string(),
            },
            FieldKind::Choice { options, default } => {
                format!("one of {} (default {})", options.join("|"), default)
            }
            FieldKind::File { accept } => format!("file ({})", accept_label(*accept)),
        };
        println!("  {:<12} {} ({})", field.name.bold(), description, requirement);
    }

    Ok(())
}

fn accept_label(accept: FileFilter) -> &'static str {
    match accept {
        FileFilter::Pdf => "PDF only",
        FileFilter::Image => "images only",
    }
}

#[allow(clippy::too_many_arguments)]
async fn handle_convert(
    server: &str,
    key: &str,
    files: Vec<PathBuf>,
    set: Vec<String>,
    url: Option<String>,
    html: Option<String>,
    image: Option<PathBuf>,
    output_dir: PathBuf,
) -> Result<()> {
    let registry = RegistryClient::fetch(server).await;
    let capability = registry
        .find(key)
        .with_context(|| format!("unknown capability '{}' (try `transformix list`)", key))?;

    // Assemble the draft
    let mut form = UploadForm::open(capability);
    for file in files {
        if !file.exists() {
            bail!("input file not found: {}", file.display());
        }
        form.add_file(file);
    }
    if let Some(url) = url {
        form.set_value("url", url).map_err(|e| anyhow::anyhow!("{}", e))?;
    }
    if let Some(html) = html {
        form.set_value("html", html).map_err(|e| anyhow::anyhow!("{}", e))?;
    }
    if let Some(image) = image {
        if !image.exists() {
            bail!("image file not found: {}", image.display());
        }
        form.set_extra_file("image", image)
            .map_err(|e| anyhow::anyhow!("{}", e))?;
    }
    for assignment in set {
        let (field, value) = assignment
            .split_once('=')
            .with_context(|| format!("expected FIELD=VALUE, got '{}'", assignment))?;
        form.set_value(field, value)
            .map_err(|e| anyhow::anyhow!("{}", e))?;
    }

    // Local validation happens here; nothing has touched the network yet.
    let plan = form.begin_submit().map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{} {} ...", "Uploading to".dimmed(), capability.endpoint);
    let transfer = TransferHandler::new(registry.api_root()).map_err(|e| anyhow::anyhow!("{}", e))?;
    let outcome = transfer.send(plan).await;
    form.finish_submit();

    match outcome {
        Ok(download) => {
            let target = output_dir.join(&download.filename);
            std::fs::write(&target, &download.data)
                .with_context(|| format!("failed to write {}", target.display()))?;
            println!(
                "{} {} ({} bytes)",
                "Saved".green().bold(),
                target.display(),
                download.data.len()
            );
            Ok(())
        }
        Err(message) => bail!("{}", message),
    }
}

fn handle_theme(value: Option<String>) -> Result<()> {
    match value {
        None => {
            let config = config::load_config().map_err(|e| anyhow::anyhow!("{}", e))?;
            println!("{}", config.theme);
        }
        Some(value) => {
            let config = config::set_theme(&value).map_err(|e| anyhow::anyhow!("{}", e))?;
            colored::control::set_override(config.colored_output());
            println!("theme set to {}", config.theme);
        }
    }
    Ok(())
}
