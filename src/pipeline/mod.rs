//! Pipeline module for composing the rendered image.
//!
//! Provides a trait-based architecture for render stages that paint into a
//! shared canvas, plus the configuration they read.

mod canvas;
mod config;
mod stage;

pub use canvas::{Canvas, Panel};
pub use config::{ConfigError, RenderConfig, SceneConfig, MAX_PANEL_SIZE};
pub use stage::{
    top_down_heights, GradientStripStage, LandscapeStage, Pipeline, PipelineError,
    RenderContext, RenderStage, StageId, TopDownStage,
};
