// src/file.rs

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgb};

use crate::aspects::AspectCatalog;
use crate::chart::Figure;
use crate::config::options::ExportOptions;
use crate::error::{Result, VizError};
use crate::query::Query;

/// Save `figure` as a PNG under `export.out_dir`, named after the query.
/// Creates the directory if needed and overwrites an existing file.
/// Returns the path written to.
pub fn export(
    figure: &Figure,
    query: &Query,
    catalog: &AspectCatalog,
    export: &ExportOptions,
) -> Result<PathBuf> {
    ensure_directory(&export.out_dir)?;
    let path = export.out_path(catalog, query);

    let img: ImageBuffer<Rgb<u8>, &[u8]> =
        ImageBuffer::from_raw(figure.width, figure.height, figure.pixels.as_slice()).ok_or_else(|| {
            VizError::Render(format!(
                "pixel buffer of {} bytes does not fit {}x{}",
                figure.pixels.len(),
                figure.width,
                figure.height
            ))
        })?;
    img.save_with_format(&path, image::ImageFormat::Png)?;

    logf!("Wrote {}", path.display());
    Ok(path)
}

/// Message shown once the file is on disk.
pub fn location_message(path: &Path) -> String {
    let dir = path.parent().map(|p| p.display().to_string()).unwrap_or_default();
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    format!("The plot can be found under {dir} as {name}")
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(VizError::Io(std::io::Error::other(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        ))));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_message_splits_dir_and_name() {
        let p = Path::new("visualizations").join("plot-points-MIA-2021_2022.png");
        assert_eq!(
            location_message(&p),
            "The plot can be found under visualizations as plot-points-MIA-2021_2022.png"
        );
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let dir = std::env::temp_dir().join(format!("nba_viz_file_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("not_a_dir");
        fs::write(&file, b"x").unwrap();

        assert!(ensure_directory(&file).is_err());
        assert!(ensure_directory(&dir.join("nested").join("deeper")).is_ok());
        assert!(dir.join("nested").join("deeper").is_dir());

        fs::remove_dir_all(&dir).unwrap();
    }
}
