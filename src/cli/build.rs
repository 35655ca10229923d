//! Poster pipeline: scan, sanitize, plan, colour, render, encode.
//!
//! Each stage consumes the previous stage's output. Everything is encoded in
//! memory before the PNG is written, so any earlier failure leaves no output
//! file.

use std::path::Path;

use image::RgbImage;

use crate::discovery::{aggregate, load_config, PosterConfig};
use crate::error::Result;
use crate::layout::GridDimensions;
use crate::mosaic::{compose, ColorSource};
use crate::output::{display_path, plural, Printer};
use crate::render::{
    canvas_size, cell_pitch, meta_json, meta_path, render_mosaic, write_meta, write_png,
    BitmapFont, GlyphBackend, RenderMeta,
};
use crate::sanitize::sanitize;

use super::{Cli, Targets};

/// Run the pipeline for parsed arguments, loading configuration from the
/// working directory.
pub fn run(cli: &Cli, targets: &Targets, printer: &Printer) -> Result<RenderMeta> {
    let cwd = std::env::current_dir()?;
    let (mut config, config_path) = load_config(cli.config.as_deref(), &cwd)?;
    if let Some(path) = &config_path {
        printer.info("Config", &display_path(path));
    }
    apply_overrides(&mut config, cli);
    config.validate()?;

    let (canvas, meta) = prepare_poster(targets, &config, printer)?;
    let sidecar = if cli.meta {
        Some((meta_path(&targets.output_image), meta_json(&meta)?))
    } else {
        None
    };

    write_poster(&canvas, targets, printer)?;

    // A failed sidecar write leaves the PNG in place.
    if let Some((path, json)) = sidecar {
        write_meta(&json, &path)?;
        printer.status("Wrote", &display_path(&path));
    }

    Ok(meta)
}

/// Command-line flags take precedence over the configuration file.
pub fn apply_overrides(config: &mut PosterConfig, cli: &Cli) {
    if let Some(font_size) = cli.font_size {
        config.font_size = font_size;
    }
    if cli.invert {
        config.invert = true;
        config.background = None;
    }
    if let Some(layout) = cli.layout {
        config.layout = layout;
    }
    if let Some(filter) = cli.filter {
        config.filter = filter;
    }
}

/// Render one poster and write it to `targets.output_image`.
pub fn build_poster(targets: &Targets, config: &PosterConfig, printer: &Printer) -> Result<RenderMeta> {
    let (canvas, meta) = prepare_poster(targets, config, printer)?;
    write_poster(&canvas, targets, printer)?;
    Ok(meta)
}

/// Run every stage up to the finished canvas without touching the output.
pub fn prepare_poster(
    targets: &Targets,
    config: &PosterConfig,
    printer: &Printer,
) -> Result<(RgbImage, RenderMeta)> {
    printer.status(
        "Scanning",
        &format!("{} ({})", display_path(&targets.source_root), targets.pattern),
    );
    let corpus = aggregate(&targets.source_root, &targets.pattern, config)?;
    if corpus.is_empty() {
        printer.warning("Warning", &format!("no files matched {}", targets.pattern));
    }
    let files = corpus.files.len();

    let text = sanitize(&corpus.text);
    drop(corpus);
    printer.status(
        "Sanitized",
        &format!(
            "{} from {}",
            plural(text.len(), "char", "chars"),
            plural(files, "file", "files")
        ),
    );

    let dims = GridDimensions::plan(text.len(), config.layout);
    printer.status("Planned", &format!("{} grid ({})", dims, config.layout));

    let source = ColorSource::open(&targets.input_image, dims, config.filter)?;
    let mosaic = compose(&text, dims, &source)?;
    drop(source);

    let font = BitmapFont::new(config.font_size);
    let pitch = cell_pitch(font.glyph_height());
    let (width, height) = canvas_size(dims.width, dims.height, pitch);
    printer.status("Rendering", &format!("{}x{} px", width, height));
    let canvas = render_mosaic(&mosaic, &font, config.background_colour());

    let meta = RenderMeta {
        grid: dims,
        characters: text.len(),
        files,
        layout: config.layout,
        font_size: config.font_size,
        cell_pitch: pitch,
        canvas: (width, height).into(),
    };
    Ok((canvas, meta))
}

fn write_poster(canvas: &RgbImage, targets: &Targets, printer: &Printer) -> Result<()> {
    write_png(canvas, &targets.output_image)?;
    printer.status("Finished", &display_path(&targets.output_image));
    Ok(())
}

/// Convenience wrapper for library callers with default configuration.
pub fn render_poster(
    source_root: &Path,
    pattern: &str,
    input_image: &Path,
    output_image: &Path,
) -> Result<RenderMeta> {
    let targets = Targets {
        source_root: source_root.to_path_buf(),
        pattern: pattern.to_string(),
        input_image: input_image.to_path_buf(),
        output_image: output_image.to_path_buf(),
    };
    build_poster(&targets, &PosterConfig::default(), &Printer::new(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosterError;
    use crate::layout::LayoutPolicy;
    use image::{Rgb, RgbImage};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn project(dir: &Path) -> Targets {
        let src = dir.join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.cs"), "int x = 1; // one\n").unwrap();
        fs::write(src.join("b.cs"), "int y = 2;\n").unwrap();

        let input = dir.join("ref.png");
        RgbImage::from_pixel(4, 4, Rgb([0, 200, 0])).save(&input).unwrap();

        Targets {
            source_root: src,
            pattern: "*.cs".to_string(),
            input_image: input,
            output_image: dir.join("poster.png"),
        }
    }

    #[test]
    fn test_build_poster_writes_png() {
        let dir = tempdir().unwrap();
        let targets = project(dir.path());

        let meta = build_poster(&targets, &PosterConfig::default(), &Printer::new(true)).unwrap();

        assert_eq!(meta.characters, "int x=1;int y=2;".len());
        assert_eq!(meta.files, 2);
        assert_eq!(meta.grid, GridDimensions::plan(meta.characters, LayoutPolicy::Stretch));

        let img = image::open(&targets.output_image).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (meta.canvas.width, meta.canvas.height));
    }

    #[test]
    fn test_overrides_beat_config() {
        let mut config = PosterConfig::parse("font_size: 10\nlayout: square\nbackground: '#123456'").unwrap();
        let cli = Cli {
            font_size: Some(30),
            invert: true,
            layout: Some(LayoutPolicy::Stretch),
            ..Default::default()
        };

        apply_overrides(&mut config, &cli);

        assert_eq!(config.font_size, 30);
        assert_eq!(config.layout, LayoutPolicy::Stretch);
        assert_eq!(config.background_colour(), crate::types::Colour::BLACK);
    }

    #[test]
    fn test_missing_image_leaves_no_output() {
        let dir = tempdir().unwrap();
        let mut targets = project(dir.path());
        targets.input_image = dir.path().join("missing.png");

        let result = build_poster(&targets, &PosterConfig::default(), &Printer::new(true));

        assert!(matches!(result, Err(PosterError::Io { .. })));
        assert!(!targets.output_image.exists());
    }

    #[test]
    fn test_missing_source_root_leaves_no_output() {
        let dir = tempdir().unwrap();
        let mut targets = project(dir.path());
        targets.source_root = PathBuf::from("/nonexistent/source/root");

        let result = build_poster(&targets, &PosterConfig::default(), &Printer::new(true));

        assert!(matches!(result, Err(PosterError::Io { .. })));
        assert!(!targets.output_image.exists());
    }

    #[test]
    fn test_run_writes_meta_sidecar() {
        let dir = tempdir().unwrap();
        let targets = project(dir.path());
        let config_path = dir.path().join("poster.yaml");
        fs::write(&config_path, "font_size: 10\n").unwrap();
        let cli = Cli {
            config: Some(config_path),
            meta: true,
            quiet: true,
            ..Default::default()
        };

        let meta = run(&cli, &targets, &Printer::new(true)).unwrap();

        assert_eq!(meta.font_size, 10);
        let json = fs::read_to_string(meta_path(&targets.output_image)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["font_size"], 10);
        assert_eq!(parsed["characters"], meta.characters);
    }

    fn meta_cli() -> Cli {
        Cli {
            meta: true,
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_failed_png_write_leaves_no_sidecar() {
        let dir = tempdir().unwrap();
        let mut targets = project(dir.path());
        targets.output_image = dir.path().join("out.png");
        fs::create_dir(&targets.output_image).unwrap();

        let result = run(&meta_cli(), &targets, &Printer::new(true));

        assert!(matches!(result, Err(PosterError::Io { .. })));
        assert!(!meta_path(&targets.output_image).exists());
    }

    #[test]
    fn test_failed_sidecar_write_keeps_png() {
        let dir = tempdir().unwrap();
        let targets = project(dir.path());
        let sidecar = meta_path(&targets.output_image);
        fs::create_dir(&sidecar).unwrap();

        let result = run(&meta_cli(), &targets, &Printer::new(true));

        assert!(matches!(result, Err(PosterError::Io { path, .. }) if path == sidecar));
        assert!(image::open(&targets.output_image).is_ok());
    }
}
