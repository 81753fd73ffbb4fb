use anyhow::Context;
use clap::{Parser, Subcommand};
use miplab_assets::{AssetCatalog, write_default_assets};
use miplab_kernel::{
    Camera, FilterMode, Light, NORM_SIZE, ObjectKind, Selection, TextureFamily,
    VARIANTS_PER_FAMILY, variant_at,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "miplab-cli", about = "CLI tool for the mipmapping lab")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and scene defaults
    Info,
    /// List every texture variant with its sampler settings
    Filters,
    /// Load an asset directory and summarize its meshes and textures
    Inspect {
        /// Asset directory
        dir: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write procedural stand-in meshes and textures
    Generate {
        /// Output directory
        dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let camera = Camera::default();
            let light = Light::default();
            let selection = Selection::default();
            println!("miplab-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "objects: {}",
                ObjectKind::ALL.map(|k| k.file_name()).join(", ")
            );
            println!(
                "textures: {}",
                TextureFamily::ALL.map(|f| f.file_name()).join(", ")
            );
            println!(
                "variants: {} ({} per texture)",
                TextureFamily::ALL.len() * VARIANTS_PER_FAMILY,
                VARIANTS_PER_FAMILY
            );
            println!("normalized size: {NORM_SIZE}");
            println!(
                "camera: pos={:?} fov={} near={} far={}",
                camera.position.to_array(),
                camera.fov_degrees,
                camera.near,
                camera.far
            );
            println!("light: pos={:?}", light.position.to_array());
            println!(
                "default selection: {} / {} / {}",
                selection.object.label(),
                selection.texture.label(),
                selection.filter_mode()
            );
        }
        Commands::Filters => {
            println!(
                "{:>5}  {:<8} {:<24} {:<8} {:<8} {:<8} {:>6}",
                "index", "texture", "mode", "min", "mag", "mipmap", "lod"
            );
            for index in 0..TextureFamily::ALL.len() * VARIANTS_PER_FAMILY {
                let Some((family, mode)) = variant_at(index) else {
                    continue;
                };
                print_variant(index, family, mode);
            }
        }
        Commands::Inspect { dir, json } => {
            let catalog = AssetCatalog::load(&dir)
                .with_context(|| format!("failed to load assets from {}", dir.display()))?;
            let report = catalog.report();
            if json {
                println!("{}", report.to_json()?);
                return Ok(());
            }

            println!("assets: {}", report.root);
            for mesh in &report.meshes {
                println!(
                    "  {:<7} {:<11} verts={:<6} tris={:<6} min={:?} max={:?} scale={:.4}",
                    mesh.object,
                    mesh.file,
                    mesh.vertices,
                    mesh.triangles,
                    mesh.min,
                    mesh.max,
                    mesh.normalization_scale
                );
            }
            for tex in &report.textures {
                println!(
                    "  {:<7} {:<11} {}x{} mips={}",
                    tex.family, tex.file, tex.width, tex.height, tex.mip_levels
                );
            }
        }
        Commands::Generate { dir } => {
            let written = write_default_assets(&dir)
                .with_context(|| format!("failed to write assets to {}", dir.display()))?;
            for path in &written {
                println!("wrote {}", path.display());
            }
        }
    }

    Ok(())
}

fn print_variant(index: usize, family: TextureFamily, mode: FilterMode) {
    let spec = mode.sampler_spec();
    println!(
        "{:>5}  {:<8} {:<24} {:<8} {:<8} {:<8} {:>6.1}",
        index,
        family.label(),
        mode.gl_name(),
        format!("{:?}", spec.min),
        format!("{:?}", spec.mag),
        format!("{:?}", spec.mipmap),
        spec.lod_max_clamp
    );
}
