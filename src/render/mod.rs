//! Rendering: the surface boundary, node level-of-detail, and a retained scene.
//!
//! - `surface` - the minimal drawing capability the engine depends on
//! - `node_renderer` - node visuals, LOD modes and selection outline
//! - `scene` - in-memory `RenderSurface` with R-tree hit-testing

pub mod node_renderer;
pub mod scene;
pub mod surface;

pub use node_renderer::{NodeRenderer, NodeStyle, RenderMode, render_mode};
pub use scene::{RetainedScene, SceneGroup};
pub use surface::{GroupSpec, RenderSurface, VisualHandle, VisualPart};
