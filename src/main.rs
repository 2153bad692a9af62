use clap::{ArgAction, Parser, Subcommand};
use simple_folio::{config, generate, output, scan, types::Manifest};
use std::path::{Path, PathBuf};
use tracing::Level;

/// Flags for the check command.
#[derive(clap::Args, Clone)]
struct CheckArgs {
    /// Fail when a link points at a section that is not on the page
    #[arg(long)]
    strict: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "simple-folio")]
#[command(about = "Static site generator for single-page developer portfolios")]
#[command(long_about = "\
Static site generator for single-page developer portfolios

Content comes from a headless CMS export: one settings document and one
home document made of slices. Each known slice becomes a page section;
unknown slices are skipped with a warning.

Content structure:

  content/
  ├── config.toml        # Site config (optional, overrides stock defaults)
  ├── settings.json      # Name, navigation links, resume link, page metadata
  ├── home.json          # Ordered slices: hero, biography, tech_list, projects
  └── assets/            # Static assets (avatar, project images, favicon)
                         #   → copied to the output root

Slices:
  hero        First/last name and tag line, animated on load
  biography   About section with avatar and a call-to-action button
  tech_list   Skills shown as a rotating word sphere
  projects    3D carousel of project cards with a detail dialog

Section ids come from each slice's section_id (leading '#' stripped) and
default to about_me, skills, and projects.

Run 'simple-folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".simple-folio-temp", global = true)]
    temp_dir: PathBuf,

    /// Log verbosity: -v for progress, -vv for per-slice detail
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the CMS documents into a manifest
    Scan,
    /// Produce the final HTML page from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate the content directory without building
    Check(CheckArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let report = generate::generate(&manifest_path, &cli.output, &cli.source)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&manifest_path, &cli.output, &cli.source)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check(check_args) => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            let dangling = scan::dangling_section_links(&manifest);
            if check_args.strict && !dangling.is_empty() {
                return Err(format!(
                    "{} link(s) point at sections that are not on the page",
                    dangling.len()
                )
                .into());
            }
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. Warnings always show.
fn init_logging(verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Write the scan manifest into the temp dir and return its path.
fn write_manifest(manifest: &Manifest, temp_dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}
