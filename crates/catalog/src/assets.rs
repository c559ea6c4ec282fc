//! Item images on disk.
//!
//! Images are keyed by a file name derived from the item name. Rendering asks
//! [`AssetLibrary::resolve`] and gets either a file or an explicit placeholder;
//! a missing or unusable asset is never an error.

use std::path::{Path, PathBuf};

use thiserror::Error;

const IMAGE_EXTENSION: &str = "jpg";

/// Where a card image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    Placeholder,
}

impl ImageSource {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageSource::Placeholder)
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image not found: {0}")]
    SourceMissing(PathBuf),

    #[error("item name {0:?} does not yield a usable image file name")]
    UnusableName(String),

    #[error("failed to copy image into {dest}: {source}")]
    Io {
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Normalized asset file name: lowercase, without spaces, apostrophes, commas or
/// periods, with a `.jpg` extension.
///
/// `"The Lord of the Rings"` becomes `"thelordoftherings.jpg"`.
pub fn asset_file_name(name: &str) -> String {
    let stem: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\'' | ',' | '.'))
        .collect();
    format!("{stem}.{IMAGE_EXTENSION}")
}

fn has_stem(name: &str) -> bool {
    asset_file_name(name).len() > IMAGE_EXTENSION.len() + 1
}

/// Directory of item images.
#[derive(Debug, Clone)]
pub struct AssetLibrary {
    dir: PathBuf,
}

impl AssetLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(asset_file_name(name))
    }

    /// Image for `name`, falling back to the placeholder when absent.
    pub fn resolve(&self, name: &str) -> ImageSource {
        if !has_stem(name) {
            return ImageSource::Placeholder;
        }
        let path = self.path_for(name);
        if path.is_file() {
            ImageSource::File(path)
        } else {
            ImageSource::Placeholder
        }
    }

    /// Copy `source` into the library under the name derived from `name`.
    ///
    /// Creates the directory on first use and replaces an existing image.
    pub fn import(&self, source: &Path, name: &str) -> Result<PathBuf, AssetError> {
        if !has_stem(name) {
            return Err(AssetError::UnusableName(name.to_string()));
        }
        if !source.is_file() {
            return Err(AssetError::SourceMissing(source.to_path_buf()));
        }

        std::fs::create_dir_all(&self.dir).map_err(|err| AssetError::Io {
            dest: self.dir.clone(),
            source: err,
        })?;

        let dest = self.path_for(name);
        std::fs::copy(source, &dest).map_err(|err| AssetError::Io {
            dest: dest.clone(),
            source: err,
        })?;
        Ok(dest)
    }
}
