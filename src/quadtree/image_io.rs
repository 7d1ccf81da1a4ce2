//! Dataset image discovery, grayscale preparation and saving.

use image::imageops::FilterType;
use image::{GrayImage, ImageResult, Luma, RgbaImage};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 2] = ["png", "jpg"];

/// `.png` and `.jpg` files directly inside `dir`, sorted by file name.
pub fn list_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e))
            .unwrap_or(false);
        if path.is_file() && is_image {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// File name without its extension, used as the `Image` label.
pub fn image_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Decode, resize to `size` x `size` and average R, G and B into gray.
/// Transparent pixels are composited over black first.
pub fn load_grayscale(path: &Path, size: u32) -> ImageResult<GrayImage> {
    let rgba = image::open(path)?
        .resize_exact(size, size, FilterType::Triangle)
        .to_rgba8();
    Ok(to_gray(&rgba))
}

fn to_gray(rgba: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let over_black = |c: u8| (c as u32 * a as u32 + 127) / 255;
        Luma([((over_black(r) + over_black(g) + over_black(b)) / 3) as u8])
    })
}

pub fn save_grayscale(image: &GrayImage, path: &Path) -> ImageResult<()> {
    image.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};

    #[test]
    fn gray_is_channel_mean() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 31, 255]));
        assert_eq!(to_gray(&rgba).get_pixel(1, 1)[0], 20);
    }

    #[test]
    fn transparency_darkens_toward_black() {
        let mut rgba = RgbaImage::from_pixel(2, 1, Rgba([200, 200, 200, 0]));
        rgba.put_pixel(1, 0, Rgba([200, 100, 0, 128]));
        let gray = to_gray(&rgba);
        assert_eq!(gray.get_pixel(0, 0)[0], 0);
        assert_eq!(gray.get_pixel(1, 0)[0], 50);
    }

    #[test]
    fn lists_only_png_and_jpg_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.jpg", "notes.txt", "c.jpeg"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        let names: Vec<String> = list_images(dir.path())
            .unwrap()
            .iter()
            .map(|p| image_label(p))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn loads_and_resizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");
        RgbImage::from_pixel(30, 20, Rgb([90, 90, 90])).save(&path).unwrap();

        let gray = load_grayscale(&path, 16).unwrap();
        assert_eq!(gray.dimensions(), (16, 16));
        assert!(gray.pixels().all(|p| p[0] == 90));
    }

    #[test]
    fn missing_dataset_dir_is_an_error() {
        assert!(list_images(Path::new("/nonexistent/dataset_images")).is_err());
    }
}
