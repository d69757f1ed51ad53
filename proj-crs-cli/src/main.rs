use anyhow::Context;
use clap::Parser;
use proj_crs::{CrsBuilder, CrsOptions};
use std::path::PathBuf;

/// Inspect the zoom/scale table of a custom CRS
#[derive(Parser)]
#[command(name = "proj-crs-cli")]
#[command(about = "Print the scale table of a custom CRS and answer scale/zoom lookups")]
struct Cli {
    /// Projection code, e.g. EPSG:3857 or urn:ogc:def:crs:EPSG::3857
    code: String,

    /// JSON file with CRS options (origin, scales, scaleDenominators, resolutions, bounds)
    config: Option<PathBuf>,

    /// PROJ definition to register for the code
    #[arg(long)]
    definition: Option<String>,

    /// Zoom levels to convert into scales
    #[arg(long = "zoom")]
    zooms: Vec<f64>,

    /// Scales to convert into zoom levels
    #[arg(long = "scale")]
    scales: Vec<f64>,

    /// Print the scale table as JSON instead of one level per line
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            CrsOptions::from_json(&json)?
        }
        None => CrsOptions::default(),
    };

    let mut builder = CrsBuilder::new(cli.code.clone()).options(options);
    if let Some(definition) = &cli.definition {
        builder = builder.definition(definition.clone());
    }
    let crs = builder.build()?;
    log::debug!("loaded CRS {:?}", crs);

    println!("code: {}", crs.code());
    println!("infinite: {}", crs.infinite());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(crs.scales())?);
    } else {
        for (level, scale) in crs.scales().iter().enumerate() {
            match scale {
                Some(scale) => println!("{} {}", level, scale),
                None => println!("{} -", level),
            }
        }
    }

    for zoom in &cli.zooms {
        println!("scale({}) = {}", zoom, crs.scale(*zoom));
    }
    for scale in &cli.scales {
        println!("zoom({}) = {}", scale, crs.zoom(*scale));
    }

    Ok(())
}
