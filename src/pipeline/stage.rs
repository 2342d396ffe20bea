//! Render stage trait and pipeline orchestration.

use image::Rgb;
use thiserror::Error;

use crate::geometry::Camera;
use crate::noise::FractalNoise;
use crate::raymarch::{Raymarcher, TerrainField};
use crate::shading::{shade_landscape, terrain_palette, ColorGradient};

use super::canvas::{Canvas, Panel};
use super::config::{ConfigError, RenderConfig};

/// Unique identifier for render stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Grayscale top-down view of the fractal height field.
    TopDown,
    /// Ray-marched perspective view of the terrain.
    Landscape,
    /// Palette swatch along the bottom of the landscape view.
    GradientStrip,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::TopDown => "top-down",
            StageId::Landscape => "landscape",
            StageId::GradientStrip => "gradient-strip",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Shared, read-only inputs of every stage.
#[derive(Debug, Clone)]
pub struct RenderContext {
    config: RenderConfig,
    fractal: FractalNoise,
    terrain: TerrainField,
    palette: ColorGradient,
}

impl RenderContext {
    /// Validates `config` and builds the noise table it describes.
    pub fn new(config: RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let fractal = FractalNoise::new(config.noise.clone());
        let terrain = TerrainField::new(fractal.clone(), config.scene.terrain);
        Ok(Self {
            config,
            fractal,
            terrain,
            palette: terrain_palette(),
        })
    }

    /// Replaces the terrain palette.
    pub fn with_palette(mut self, palette: ColorGradient) -> Self {
        self.palette = palette;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn fractal(&self) -> &FractalNoise {
        &self.fractal
    }

    pub fn terrain(&self) -> &TerrainField {
        &self.terrain
    }

    pub fn palette(&self) -> &ColorGradient {
        &self.palette
    }

    /// Canvas sized for this context's scene.
    pub fn new_canvas(&self) -> Canvas {
        Canvas::new(self.config.scene.panel_width, self.config.scene.panel_height)
    }
}

/// Trait for implementing render stages.
///
/// Each stage paints part of the canvas. Stages that draw over another
/// stage's output declare it as a dependency.
pub trait RenderStage {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Paints this stage's pixels into `canvas`.
    fn execute(&self, canvas: &mut Canvas, context: &RenderContext) -> Result<(), PipelineError>;
}

/// Runs render stages in order against one canvas.
pub struct Pipeline {
    stages: Vec<Box<dyn RenderStage>>,
    context: RenderContext,
}

impl Pipeline {
    /// Creates a new empty pipeline over the given context.
    pub fn new(context: RenderContext) -> Self {
        Self {
            stages: Vec::new(),
            context,
        }
    }

    /// Pipeline with the top-down, landscape and gradient strip stages.
    pub fn standard(context: RenderContext) -> Self {
        let mut pipeline = Self::new(context);
        pipeline
            .add_stage(TopDownStage)
            .add_stage(LandscapeStage)
            .add_stage(GradientStripStage);
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: RenderStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Executes all stages in order.
    pub fn run(&self, canvas: &mut Canvas) -> Result<(), PipelineError> {
        self.run_with_callbacks(canvas, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `canvas` - The canvas to paint
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        canvas: &mut Canvas,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            on_stage_start(stage.name(), i, total);
            stage.execute(canvas, &self.context)?;
            completed.push(stage.id());
            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }

    /// Renders a fresh canvas with every stage.
    pub fn render(&self) -> Result<Canvas, PipelineError> {
        let mut canvas = self.context.new_canvas();
        self.run(&mut canvas)?;
        Ok(canvas)
    }
}

/// Fails a stage whose panel does not fit the canvas.
fn check_panel(stage: &str, canvas: &Canvas, panel: Panel) -> Result<(), PipelineError> {
    if panel.width == 0 || panel.x_offset + panel.width > canvas.width() {
        return Err(PipelineError::StageFailed(
            stage.to_string(),
            format!(
                "panel at x={} width {} does not fit a {}px canvas",
                panel.x_offset,
                panel.width,
                canvas.width()
            ),
        ));
    }
    Ok(())
}

/// Samples the plain fractal height over a `width × height` grid covering
/// `extent` world units, row-major.
pub fn top_down_heights(fractal: &FractalNoise, width: u32, height: u32, extent: f64) -> Vec<f64> {
    let mut heights = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let ix = extent * x as f64 / width as f64;
            let iy = extent * y as f64 / height as f64;
            heights.push(fractal.fractal_height(ix, iy));
        }
    }
    heights
}

/// Grayscale level for a fractal height centered on mid-gray.
fn height_to_gray(height: f64) -> u8 {
    (128 + height as i32).clamp(0, 255) as u8
}

/// Top-down grayscale view of the height field, in the left panel.
pub struct TopDownStage;

impl RenderStage for TopDownStage {
    fn id(&self) -> StageId {
        StageId::TopDown
    }

    fn name(&self) -> &str {
        "Top-down Height Preview"
    }

    fn execute(&self, canvas: &mut Canvas, context: &RenderContext) -> Result<(), PipelineError> {
        let panel = canvas.left_panel();
        check_panel(self.name(), canvas, panel)?;

        let extent = context.config().scene.top_down_extent;
        let heights = top_down_heights(context.fractal(), panel.width, panel.height, extent);

        for (i, &h) in heights.iter().enumerate() {
            let x = i as u32 % panel.width;
            let y = i as u32 / panel.width;
            let p = height_to_gray(h);
            canvas.put(panel.x_offset + x, y, Rgb([p, p, p]));
        }
        Ok(())
    }
}

/// Ray-marched perspective view of the terrain, in the right panel.
pub struct LandscapeStage;

impl RenderStage for LandscapeStage {
    fn id(&self) -> StageId {
        StageId::Landscape
    }

    fn name(&self) -> &str {
        "Landscape Ray March"
    }

    fn execute(&self, canvas: &mut Canvas, context: &RenderContext) -> Result<(), PipelineError> {
        let panel = canvas.right_panel();
        check_panel(self.name(), canvas, panel)?;

        let scene = &context.config().scene;
        let camera = Camera::new(scene.eye, scene.look);
        let marcher = Raymarcher::new(context.terrain(), context.config().march.clone());
        let sky = Rgb(scene.sky);

        for y in 0..panel.height {
            for x in 0..panel.width {
                let ray = camera.ray_for_pixel(x, y, panel.width, panel.height);
                let color = match marcher.find_intersection(ray.origin, ray.direction()) {
                    Some(hit) => shade_landscape(
                        &hit,
                        context.palette(),
                        &scene.lighting,
                        scene.terrain.vertical,
                    ),
                    None => sky,
                };
                canvas.put(panel.x_offset + x, y, color);
            }
        }
        Ok(())
    }
}

/// Palette swatch along the bottom rows of the landscape panel.
pub struct GradientStripStage;

impl RenderStage for GradientStripStage {
    fn id(&self) -> StageId {
        StageId::GradientStrip
    }

    fn name(&self) -> &str {
        "Gradient Strip"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Landscape]
    }

    fn execute(&self, canvas: &mut Canvas, context: &RenderContext) -> Result<(), PipelineError> {
        let panel = canvas.right_panel();
        check_panel(self.name(), canvas, panel)?;

        let rows = context.config().scene.strip_height.min(panel.height);
        let top = panel.height - rows;

        for x in 0..panel.width {
            let color = context.palette().color_at(x as f64 / panel.width as f64);
            for y in top..panel.height {
                canvas.put(panel.x_offset + x, y, color);
            }
        }
        Ok(())
    }
}
