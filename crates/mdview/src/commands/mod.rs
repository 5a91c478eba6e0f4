//! CLI command implementations.

pub(crate) mod detect;
pub(crate) mod render;

pub(crate) use detect::DetectArgs;
pub(crate) use render::RenderArgs;
