pub mod error;
pub mod html;
pub mod ply;

pub use error::RenderError;
pub use html::HtmlRenderer;
pub use ply::PlyRenderer;

use pcv_core::pointcloud::point::{Color, PointCloud};

/// Writes one visualization artifact for an external viewer.
///
/// `colors` must be index-aligned with the cloud's points.
pub trait Renderer {
    fn render(&self, cloud: &PointCloud, colors: &[Color]) -> Result<(), RenderError>;
}

pub(crate) fn check_alignment(cloud: &PointCloud, colors: &[Color]) -> Result<(), RenderError> {
    if cloud.points.len() != colors.len() {
        return Err(RenderError::LengthMismatch {
            points: cloud.points.len(),
            colors: colors.len(),
        });
    }
    Ok(())
}
