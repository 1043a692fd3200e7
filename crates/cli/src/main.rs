//! tunnelviz CLI - tunnel alignment and borehole map generation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tunnelviz_core::{crs, ProjectInput, Transformer};
use tunnelviz_map::{generate_map, render_html};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "tunnelviz")]
#[command(author, version, about = "Tunnel alignment and borehole map generation", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the map page from a project file
    Render {
        /// Input project file (TOML)
        project: PathBuf,
        /// Output HTML file
        #[arg(short, long, default_value = "map.html")]
        output: PathBuf,
    },
    /// Print the geographic coordinates of every point in a project
    Convert {
        /// Input project file (TOML)
        project: PathBuf,
    },
    /// List the supported coordinate systems
    Crs,
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn read_project(path: &PathBuf) -> Result<ProjectInput> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read project file: {}", path.display()))?;
    let input: ProjectInput =
        toml::from_str(&raw).context("Failed to parse project file")?;
    info!(
        "Project: {} tunnel points, {} boreholes",
        input.tunnel.len(),
        input.boreholes.len()
    );
    Ok(input)
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Render ───────────────────────────────────────────────────
        Commands::Render { project, output } => {
            let input = read_project(&project)?;
            let doc = generate_map(&input).context("Failed to build map")?;
            info!(
                "Built map: {} base layers, {} borehole markers, alignment: {}",
                doc.base_layers.len(),
                doc.boreholes.len(),
                if doc.alignment.is_some() { "yes" } else { "no" }
            );
            let html = render_html(&doc);
            std::fs::write(&output, html)
                .with_context(|| format!("Failed to write output: {}", output.display()))?;
            println!("Map saved to: {}", output.display());
        }

        // ── Convert ──────────────────────────────────────────────────
        Commands::Convert { project } => {
            let input = read_project(&project)?;
            let entry = crs::lookup(&input.coordinate_system)?;
            let transformer = Transformer::to_wgs84(entry)?;

            println!("Coordinate system: {entry}");
            if !input.tunnel.is_empty() {
                println!("\nTunnel alignment:");
                for (i, p) in input.tunnel.points().iter().enumerate() {
                    let g = transformer.transform(*p)?;
                    println!(
                        "  {:>2}: ({:.2}, {:.2}) -> lat {:.6}, lon {:.6}",
                        i + 1,
                        p.x,
                        p.y,
                        g.lat,
                        g.lon
                    );
                }
            }
            if !input.boreholes.is_empty() {
                println!("\nBoreholes:");
                for bh in &input.boreholes {
                    let g = transformer.transform(bh.location)?;
                    println!(
                        "  {}: ({:.2}, {:.2}) -> lat {:.6}, lon {:.6}",
                        bh.name, bh.location.x, bh.location.y, g.lat, g.lon
                    );
                }
            }
        }

        // ── Crs ──────────────────────────────────────────────────────
        Commands::Crs => {
            println!("{:<24} {:<12} PROJ definition", "Label", "EPSG");
            for entry in crs::SUPPORTED {
                println!(
                    "{:<24} {:<12} {}",
                    entry.label(),
                    format!("EPSG:{}", entry.epsg()),
                    entry.proj4()
                );
            }
        }
    }

    Ok(())
}
