//! Landscape CLI - Fractal terrain renderer.
//!
//! Renders a top-down height preview next to a ray-marched view of
//! the same fractal landscape and writes the result as a PNG.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use landscape::export::{
    export_canvas_png, export_height_grid_png, value_range, PngExportOptions,
};
use landscape::pipeline::{top_down_heights, Pipeline, RenderConfig, RenderContext};
use landscape::raymarch::ProbeNormalization;

/// Fractal landscape renderer.
#[derive(Parser)]
#[command(name = "landscape")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the landscape image.
    Render {
        /// Width of each of the two panels, in pixels.
        #[arg(long, default_value = "500")]
        width: u32,

        /// Height of the image, in pixels.
        #[arg(long, default_value = "500")]
        height: u32,

        /// Random seed for the noise table.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output PNG path.
        #[arg(short, long, default_value = "landscape.png")]
        output: PathBuf,

        /// Number of noise octaves (1-16).
        #[arg(long, default_value = "7")]
        octaves: u8,

        /// Ray march step budget per ray.
        #[arg(long, default_value = "1000")]
        max_steps: u32,

        /// Field value below which a ray counts as hitting the terrain.
        #[arg(long, default_value = "0.1")]
        hit_epsilon: f64,

        /// Fraction of the field value taken per march step.
        #[arg(long, default_value = "0.2")]
        step_factor: f64,

        /// Direction offset of the normal probe rays.
        #[arg(long, default_value = "0.001")]
        normal_delta: f64,

        /// Leave the vertical normal probe un-normalized, as older renders did.
        #[arg(long)]
        legacy_normals: bool,

        /// Do not draw the survey grid over the terrain.
        #[arg(long)]
        no_grid: bool,

        /// Also export the top-down height field as a 16-bit PNG.
        #[arg(long)]
        heightmap: Option<PathBuf>,
    },

    /// Display information about a render configuration.
    Info {
        /// Width of each of the two panels, in pixels.
        #[arg(long, default_value = "500")]
        width: u32,

        /// Height of the image, in pixels.
        #[arg(long, default_value = "500")]
        height: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            width,
            height,
            seed,
            output,
            octaves,
            max_steps,
            hit_epsilon,
            step_factor,
            normal_delta,
            legacy_normals,
            no_grid,
            heightmap,
        } => {
            // Generate seed if not provided
            let seed = seed.unwrap_or_else(|| {
                use std::time::{SystemTime, UNIX_EPOCH};
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(0)
            });

            let mut config = RenderConfig::with_seed(seed);
            config.scene.panel_width = width;
            config.scene.panel_height = height;
            config.noise.octaves = octaves;
            config.march.max_steps = max_steps;
            config.march.hit_epsilon = hit_epsilon;
            config.march.step_factor = step_factor;
            config.march.normal_delta = normal_delta;
            if legacy_normals {
                config.march.probe_normalization = ProbeNormalization::Legacy;
            }
            if no_grid {
                config.scene.lighting.grid_spacing = None;
            }

            run_render(config, output, heightmap);
        }
        Commands::Info { width, height } => {
            run_info(width, height);
        }
    }
}

fn run_render(config: RenderConfig, output: PathBuf, heightmap: Option<PathBuf>) {
    let context = RenderContext::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let config = context.config().clone();
    let scene = &config.scene;

    println!("Landscape - Fractal Terrain Renderer");
    println!("====================================");
    println!(
        "Image: {}x{} ({} per panel)",
        scene.panel_width * 2,
        scene.panel_height,
        scene.panel_width
    );
    println!("Seed: {}", config.noise.seed);
    println!("Octaves: {}", config.noise.octaves);
    println!(
        "March: max_steps={}, hit_epsilon={}, step_factor={}",
        config.march.max_steps, config.march.hit_epsilon, config.march.step_factor
    );
    if config.march.probe_normalization == ProbeNormalization::Legacy {
        println!("Normals: legacy probe normalization");
    }
    println!("Output: {}", output.display());

    let start = Instant::now();

    println!("\nRendering...");
    let pipeline = Pipeline::standard(context);
    let mut canvas = pipeline.context().new_canvas();
    pipeline
        .run_with_callbacks(
            &mut canvas,
            |name, i, total| {
                println!("  [{}/{}] Starting: {}", i + 1, total, name);
            },
            |name, i, total| {
                println!("  [{}/{}] Completed: {}", i + 1, total, name);
            },
        )
        .unwrap_or_else(|e| {
            eprintln!("Error during rendering: {}", e);
            std::process::exit(1);
        });

    let render_time = start.elapsed();
    println!("Rendering completed in {:.2?}", render_time);

    println!("\nExporting...");
    let export_start = Instant::now();
    let options = PngExportOptions::default();

    export_canvas_png(canvas.image(), &output, &options).unwrap_or_else(|e| {
        eprintln!("Error exporting PNG: {}", e);
        std::process::exit(1);
    });
    println!("  Exported image: {}", output.display());

    if let Some(path) = heightmap {
        let heights = top_down_heights(
            pipeline.context().fractal(),
            scene.panel_width,
            scene.panel_height,
            scene.top_down_extent,
        );
        let (min_h, max_h) = match value_range(&heights) {
            Some((lo, hi)) if lo < hi => (lo, hi),
            Some((lo, _)) => (lo, lo + 1e-6),
            None => (0.0, 1.0),
        };
        println!("  Height range: [{:.4}, {:.4}]", min_h, max_h);

        export_height_grid_png(
            scene.panel_width,
            scene.panel_height,
            &heights,
            &path,
            min_h,
            max_h,
            &options,
        )
        .unwrap_or_else(|e| {
            eprintln!("Error exporting heightmap: {}", e);
            std::process::exit(1);
        });
        println!("  Exported heightmap (16-bit): {}", path.display());
    }

    let export_time = export_start.elapsed();
    let total_time = start.elapsed();

    println!("Export completed in {:.2?}", export_time);
    println!("\nTotal time: {:.2?}", total_time);
    println!("Done!");
}

fn run_info(width: u32, height: u32) {
    let mut config = RenderConfig::default();
    config.scene.panel_width = width;
    config.scene.panel_height = height;
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let pixels_per_panel = (width as u64) * (height as u64);
    let total_pixels = pixels_per_panel * 2;
    let marches = pixels_per_panel * 3;
    let worst_case_samples = marches * config.march.max_steps as u64;

    let bytes_canvas = total_pixels * 3; // RGB8
    let bytes_heightmap = pixels_per_panel * 2; // 16-bit
    let bytes_table = (landscape::noise::SLOT_COUNT as u64) * (8 + 8 + 16 + 24);

    println!("Landscape - Render Configuration Info");
    println!("=====================================");
    println!();
    println!("Image: {}x{} ({} per panel)", width * 2, height, width);
    println!();
    println!("Pixel counts:");
    println!("  Per panel: {:>12} pixels", pixels_per_panel);
    println!("  Total:     {:>12} pixels", total_pixels);
    println!();
    println!("Ray marching:");
    println!("  Marches (3 per pixel):   {:>14}", marches);
    println!("  Worst-case field evals:  {:>14}", worst_case_samples);
    println!("  Octaves per field eval:  {:>14}", config.noise.octaves);
    println!();
    println!("Memory usage:");
    println!("  Canvas (RGB8):   {:>12} bytes ({:.2} MB)", bytes_canvas, bytes_canvas as f64 / 1024.0 / 1024.0);
    println!("  Noise table:     {:>12} bytes ({:.2} KB)", bytes_table, bytes_table as f64 / 1024.0);
    println!("  Heightmap (16b): {:>12} bytes ({:.2} MB)", bytes_heightmap, bytes_heightmap as f64 / 1024.0 / 1024.0);
}
