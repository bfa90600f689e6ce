use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("point/color length mismatch: {points} points, {colors} colors")]
    LengthMismatch { points: usize, colors: usize },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode plot data: {0}")]
    Json(#[from] serde_json::Error),
}
