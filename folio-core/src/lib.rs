pub mod color;
pub mod error;
pub mod model;
pub mod swatch;

pub use color::{Oklab, oklab_to_srgb, srgb_to_oklab};
pub use error::SwatchError;
pub use model::{
    Band, BuildData, Color, Concert, GithubData, GithubRepo, GithubUser, SawthatData,
    YoutubeChannel, YoutubeData, YoutubeVideo,
};
pub use swatch::{WeightedColor, aggregate, extract_color, sample};
