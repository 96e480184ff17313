use serde::{Deserialize, Serialize};

use super::FilterCollection;

/// Number of example photos published for every collection.
pub const PREVIEW_IMAGE_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewImage {
    pub url: String,
    pub label: String,
}

/// Example photos for a collection's info page.
///
/// Images are keyed by the first word of the collection name:
/// `{base}/{word}/{word}.ex{n}.jpg` for `n` in `1..=5`.
pub fn preview_images(base_url: &str, collection: &FilterCollection) -> Vec<PreviewImage> {
    let word = collection.name.split(' ').next().unwrap_or_default();
    let base = base_url.trim_end_matches('/');

    (1..=PREVIEW_IMAGE_COUNT)
        .map(|n| PreviewImage {
            url: format!("{base}/{word}/{word}.ex{n}.jpg"),
            label: format!("{word}{n}"),
        })
        .collect()
}
