use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use quad_mesher::{mesh_model_with_stats, MesherConfig, UpAxis, VoxelModel};
use web_time::Instant;

mod output;

use output::Format;

#[derive(Parser)]
#[command(name = "quad-mesher")]
#[command(about = "Greedy-mesh a voxel model into colored triangles", long_about = None)]
struct Cli {
    /// Model file with one `x y z color` record per line (`-` reads stdin)
    input: PathBuf,

    /// TOML file with mesher settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Swap y and z for Y-up renderers
    #[arg(long)]
    y_up: bool,

    /// Size of each voxel in output units
    #[arg(long)]
    voxel_size: Option<f32>,

    /// Include merge statistics in JSON output
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let text = read_input(&cli.input)?;
    let start = Instant::now();

    let (model, report) = VoxelModel::parse(&text, &config)?;
    if !report.skipped.is_empty() {
        warn!("{} malformed line(s) skipped", report.skipped.len());
    }
    let (mesh, stats) = mesh_model_with_stats(&model, &config)?;

    info!(
        "meshed {} in {} ms: {} voxels, {} quads, {} triangles",
        cli.input.display(),
        start.elapsed().as_millis(),
        model.filled_count(),
        stats.quad_count,
        stats.triangle_count
    );

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match cli.format {
        Format::Json => {
            let stats = cli.stats.then_some(&stats);
            output::write_json(&mut out, &mesh, stats, report.skipped.len())?
        }
        Format::Obj => output::write_obj(&mut out, &mesh)?,
    }
    out.flush()?;

    Ok(())
}

/// Config file first, then command-line overrides.
fn load_config(cli: &Cli) -> Result<MesherConfig> {
    let mut config = match &cli.config {
        Some(path) => parse_config(
            &fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        )
        .with_context(|| format!("parsing {}", path.display()))?,
        None => MesherConfig::default(),
    };

    if cli.y_up {
        config.up_axis = UpAxis::Y;
    }
    if let Some(size) = cli.voxel_size {
        config.voxel_size = size;
    }

    config.validate()?;
    Ok(config)
}

fn parse_config(text: &str) -> Result<MesherConfig> {
    Ok(toml::from_str(text)?)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("reading stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
