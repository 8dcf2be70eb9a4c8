use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use log::warn;

use crate::error::{Error, Result};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Rotation needed to display an image upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    Rotate180,
    Rotate90Cw,
    Rotate90Ccw,
}

impl Orientation {
    // 1 = top-left, 3 = bottom-right, 6 = top-right, 8 = bottom-left.
    // Mirrored variants are displayed as-is.
    pub fn from_exif(value: u16) -> Self {
        match value {
            3 => Orientation::Rotate180,
            6 => Orientation::Rotate90Cw,
            8 => Orientation::Rotate90Ccw,
            _ => Orientation::Normal,
        }
    }
}

/// Raw bytes of a slide picture plus what is needed to decode it.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub path: PathBuf,
    pub extension: String,
    pub bytes: Vec<u8>,
    pub orientation: Orientation,
}

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();
        if path.is_file() && is_image_path(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        Err(Error::Io(format!("no image files found in directory {}", dir_path.display())))
    } else {
        Ok(paths)
    }
}

/// Reads the EXIF orientation tag. Anything unreadable counts as upright.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(_) => return Orientation::Normal,
    };
    match exif.get_field(Tag::Orientation, In::PRIMARY).map(|field| &field.value) {
        Some(Value::Short(values)) => values.first().copied().map_or(Orientation::Normal, Orientation::from_exif),
        _ => Orientation::Normal,
    }
}

pub fn load_image_file(path: &Path) -> Result<ImageFile> {
    let bytes = fs::read(path).map_err(|e| Error::Io(format!("failed to read {}: {}", path.display(), e)))?;
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();

    if bytes.is_empty() {
        warn!("empty image file {}", path.display());
    }

    // EXIF is only reliable for JPEG
    let orientation = if extension == "jpg" || extension == "jpeg" {
        read_orientation(&bytes)
    } else {
        Orientation::Normal
    };

    Ok(ImageFile { path: path.to_path_buf(), extension, bytes, orientation })
}
