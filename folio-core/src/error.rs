/// Errors that can occur during color extraction.
#[derive(Debug, thiserror::Error)]
pub enum SwatchError {
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("No sampleable pixels: {0}")]
    EmptySample(String),
}

impl SwatchError {
    pub fn empty_sample(msg: impl Into<String>) -> Self {
        Self::EmptySample(msg.into())
    }
}
