//! GPU plumbing shared by the renderer.

/// Core wgpu context: device, queue, surface, configuration.
pub mod render_context;

pub use render_context::{RenderContext, RenderContextError};
