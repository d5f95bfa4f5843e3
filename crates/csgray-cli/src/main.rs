//! csgray CLI - render the built-in CSG scenes to PNG

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

mod config;
mod scenes;

use config::SettingsOverride;

#[derive(Parser)]
#[command(name = "csgray")]
#[command(about = "Constructive solid geometry ray tracer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a built-in scene to a PNG file
    Render {
        /// Scene name (see `csgray scenes`)
        #[arg(short, long)]
        scene: String,
        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,
        /// Image width in pixels
        #[arg(long)]
        width: Option<usize>,
        /// Image height in pixels
        #[arg(long)]
        height: Option<usize>,
        /// Camera zoom
        #[arg(long)]
        zoom: Option<f64>,
        /// Samples per pixel along each axis
        #[arg(short, long)]
        anti_alias: Option<usize>,
        /// TOML file with render settings; flags take precedence
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print a shading trace for a sample, as `i,j` (needs the debug-trace feature)
        #[arg(long, value_parser = parse_point)]
        debug_point: Vec<(usize, usize)>,
    },
    /// List the built-in scenes
    Scenes,
    /// Print a scene's default render settings as TOML
    Settings {
        /// Scene name
        scene: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            scene,
            output,
            width,
            height,
            zoom,
            anti_alias,
            config,
            debug_point,
        } => {
            let flags = SettingsOverride {
                pixels_wide: width,
                pixels_high: height,
                zoom,
                anti_alias,
                ..Default::default()
            };
            render(&scene, &output, config.as_deref(), flags, &debug_point)?;
        }
        Commands::Scenes => {
            for entry in scenes::SCENES {
                println!("  {:<8} {}", entry.name, entry.description);
            }
        }
        Commands::Settings { scene } => {
            let entry = find_scene(&scene)?;
            print!("{}", toml::to_string(&entry.default_settings())?);
        }
    }

    Ok(())
}

fn find_scene(name: &str) -> Result<&'static scenes::SceneEntry> {
    match scenes::find(name) {
        Some(entry) => Ok(entry),
        None => anyhow::bail!("Unknown scene: {} (try `csgray scenes`)", name),
    }
}

fn render(
    name: &str,
    output: &Path,
    config: Option<&Path>,
    flags: SettingsOverride,
    debug_points: &[(usize, usize)],
) -> Result<()> {
    let entry = find_scene(name)?;
    let settings = config::resolve(entry.default_settings(), config, flags)?;

    let mut scene = entry.build()?;
    for &(i, j) in debug_points {
        scene.add_debug_point(i, j);
    }

    println!(
        "Rendering {} at {}x{} (zoom {}, {}x anti-aliasing)",
        entry.name, settings.pixels_wide, settings.pixels_high, settings.zoom, settings.anti_alias
    );
    let start = Instant::now();
    let buffer = scene.render_with(&settings)?;
    let ambiguous = buffer.samples().iter().filter(|s| s.is_ambiguous).count();
    if ambiguous > 0 {
        eprintln!("  {} ambiguous samples filled from neighbors", ambiguous);
    }

    let rgba = buffer.to_rgba8()?;
    let image = image::RgbaImage::from_raw(
        settings.pixels_wide as u32,
        settings.pixels_high as u32,
        rgba,
    )
    .ok_or_else(|| anyhow::anyhow!("Pixel buffer does not match image size"))?;
    image.save(output)?;

    println!(
        "Wrote {} in {:.2}s",
        output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn parse_point(text: &str) -> std::result::Result<(usize, usize), String> {
    let (i, j) = text
        .split_once(',')
        .ok_or_else(|| format!("expected i,j but got {:?}", text))?;
    let i = i.trim().parse().map_err(|e| format!("bad column: {}", e))?;
    let j = j.trim().parse().map_err(|e| format!("bad row: {}", e))?;
    Ok((i, j))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("12,7"), Ok((12, 7)));
        assert_eq!(parse_point(" 3 , 4"), Ok((3, 4)));
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "csgray", "render", "--scene", "cube1", "--output", "out.png", "--width", "64",
            "--debug-point", "10,20",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                scene,
                width,
                height,
                debug_point,
                ..
            } => {
                assert_eq!(scene, "cube1");
                assert_eq!(width, Some(64));
                assert_eq!(height, None);
                assert_eq!(debug_point, vec![(10, 20)]);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_unknown_scene() {
        assert!(find_scene("nope").is_err());
    }

    #[test]
    fn test_render_writes_png() {
        let output = std::env::temp_dir().join("csgray-cli-test-cube5.png");
        let flags = SettingsOverride {
            pixels_wide: Some(16),
            pixels_high: Some(12),
            anti_alias: Some(1),
            ..Default::default()
        };
        render("cube5", &output, None, flags, &[]).unwrap();
        let image = image::open(&output).unwrap();
        assert_eq!(image.width(), 16);
        assert_eq!(image.height(), 12);
        std::fs::remove_file(&output).unwrap();
    }
}
