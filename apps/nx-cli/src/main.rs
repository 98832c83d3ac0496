use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use nx_app::{AppError, AppResult, ExtractOptions, extract_service, project_service};

#[derive(Parser)]
#[command(name = "netex")]
#[command(about = "netex - extract conductor topology from layout meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate document syntax and structure
    Validate {
        /// Path to the input document (YAML or JSON)
        project_path: PathBuf,
    },
    /// Extract the branch topology
    Extract {
        /// Path to the input document (YAML or JSON)
        project_path: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Summary)]
        format: Format,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override settings.max_passes
        #[arg(long)]
        max_passes: Option<u32>,
        /// Override settings.cell_kind (line or triangle)
        #[arg(long)]
        cell_kind: Option<String>,
        /// Cap simple paths enumerated per endpoint pair
        #[arg(long)]
        max_simple_paths: Option<usize>,
        /// Keep non-topology mesh nodes
        #[arg(long)]
        no_prune: bool,
    },
    /// Print the sha256 digest of the extracted topology
    Digest {
        /// Path to the input document (YAML or JSON)
        project_path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Summary,
    Json,
    Dot,
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Extract {
            project_path,
            format,
            output,
            max_passes,
            cell_kind,
            max_simple_paths,
            no_prune,
        } => {
            let options = ExtractOptions {
                max_passes,
                cell_kind,
                max_simple_paths,
                no_prune,
            };
            cmd_extract(&project_path, format, output.as_deref(), &options)
        }
        Commands::Digest { project_path } => cmd_digest(&project_path),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    let summary = project_service::summarize_project(&project);
    println!("✓ Project is valid");
    println!(
        "  {}: {} points, {} elements, groups [{}]",
        summary.name,
        summary.points,
        summary.elements,
        summary.groups.join(", ")
    );
    for (kind, count) in &summary.cells {
        println!("  {count} {kind} cells");
    }
    Ok(())
}

fn cmd_extract(
    project_path: &Path,
    format: Format,
    output: Option<&Path>,
    options: &ExtractOptions,
) -> AppResult<()> {
    let response = extract_service::extract_file(project_path, options)?;

    let content = match format {
        Format::Json => serde_json::to_string_pretty(&response.view)?,
        Format::Dot => response.view.to_dot(),
        Format::Summary => render_summary(&response.summary()),
    };

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, &content).map_err(|e| AppError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        println!(
            "✓ Extracted {} branches to {}",
            response.report.accepted.len(),
            path.display()
        );
    } else {
        print!("{}", content);
    }

    Ok(())
}

fn render_summary(summary: &extract_service::ExtractSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Passes: {} (final P{}, {})\n",
        summary.passes,
        summary.final_pass,
        if summary.converged {
            "converged"
        } else {
            "pass limit reached"
        }
    ));
    out.push_str(&format!(
        "Nodes: {}  Edges: {}  Annotated: {}  Terminals: {}  Junctions: {}  Pruned: {}\n",
        summary.nodes,
        summary.edges,
        summary.annotated,
        summary.terminals,
        summary.dummies,
        summary.removed
    ));
    out.push_str("Branches:\n");
    for branch in &summary.branches {
        out.push_str(&format!("  {branch}\n"));
    }
    if !summary.warnings.is_empty() {
        out.push_str("Warnings:\n");
        for warning in &summary.warnings {
            out.push_str(&format!("  {warning}\n"));
        }
    }
    out.push_str(&format!("Digest: {}\n", summary.digest));
    out
}

fn cmd_digest(project_path: &Path) -> AppResult<()> {
    let response = extract_service::extract_file(project_path, &ExtractOptions::default())?;
    println!("{}", response.digest);
    Ok(())
}
