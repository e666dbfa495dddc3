use ascii_backdrop::config::Config;
use ascii_backdrop::converter;
use ascii_backdrop::font;
use ascii_backdrop::palette::{self, Palette};
use ascii_backdrop::pipeline::{self, RenderOptions};
use ascii_backdrop::resolution::{self, Dimensions, Preset};
use clap::Parser;
use image::Rgb;
use std::path::PathBuf;

/// Parse and validate a custom resolution (WIDTHxHEIGHT format)
fn parse_resolution(s: &str) -> Result<Dimensions, String> {
    resolution::parse_custom(s).map_err(|e| e.to_string())
}

/// Parse and validate a color (3 or 6 hex digits)
fn parse_color(s: &str) -> Result<Rgb<u8>, String> {
    palette::parse_hex(s).map_err(|e| e.to_string())
}

/// Parse and validate a font size (1-500 points)
fn parse_font_size(s: &str) -> Result<u32, String> {
    let size: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid font size", s))?;
    check_font_size(size)
}

/// Validate a font size from any source (CLI or config file)
fn check_font_size(size: u32) -> Result<u32, String> {
    if size == 0 {
        return Err("Font size must be greater than 0".to_string());
    }
    if size > 500 {
        return Err(format!("Font size must be at most 500 points, got {}", size));
    }
    Ok(size)
}

/// ascii-backdrop: Render an image as an ASCII art PNG
#[derive(Parser)]
#[command(name = "ascii-backdrop")]
#[command(version, about = "Render an image as an ASCII art PNG at a fixed resolution")]
#[command(long_about = "Convert a raster image to ASCII art and render it back to a PNG at an \
    exact resolution. The image-to-text conversion is delegated to the \
    ascii-image-converter binary; this tool sizes the character grid, rasterizes \
    the glyphs with a monospace font, and writes the final image.")]
#[command(after_help = "EXAMPLES:
    # 1080p wallpaper with defaults (white on black, 12pt)
    ascii-backdrop -i photo.jpg -p 1080p -o wall.png

    # Custom resolution with green text on dark gray
    ascii-backdrop -i photo.jpg -r 2560x1440 -c 00ff00 -B 111111 -o wall.png

    # Braille characters with a specific font at 10pt
    ascii-backdrop -i photo.jpg -p 720p -b -f DejaVuSansMono.ttf -s 10 -o wall.png

REQUIRES:
    ascii-image-converter on PATH
    https://github.com/TheZoraiz/ascii-image-converter#installation")]
struct Args {
    /// Input image to convert (PNG, JPEG, GIF, ...)
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Target resolution preset
    #[arg(
        long,
        short = 'p',
        value_enum,
        conflicts_with = "resolution",
        required_unless_present = "resolution"
    )]
    preset: Option<Preset>,

    /// Custom target resolution (WIDTHxHEIGHT, e.g., 1920x1080)
    #[arg(long, short = 'r', value_parser = parse_resolution)]
    resolution: Option<Dimensions>,

    /// Font file (.ttf/.otf) to render glyphs with
    /// Default: first system monospace font found (or from config file)
    #[arg(long, short = 'f')]
    font: Option<PathBuf>,

    /// Font size in points
    /// Default: 12 (or from config file)
    #[arg(long, short = 's', value_parser = parse_font_size)]
    size: Option<u32>,

    /// Foreground color as 3 or 6 hex digits (e.g., ff0000)
    /// Default: ffffff (or from config file)
    #[arg(long, short = 'c', value_parser = parse_color)]
    color: Option<Rgb<u8>>,

    /// Background color as 3 or 6 hex digits (e.g., 000000)
    /// Default: 000000 (or from config file)
    #[arg(long, short = 'B', value_parser = parse_color)]
    bg: Option<Rgb<u8>>,

    /// Use the Braille character set with dithering
    #[arg(long, short = 'b')]
    braille: bool,

    /// Output PNG path
    #[arg(long, short = 'o')]
    output: PathBuf,

    /// Custom config file path (default: ~/.config/ascii-backdrop/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logger(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Warn)
            .init();
    }
}

/// Merge settings into render options: CLI args > config file > built-in defaults
fn build_options(args: Args, cfg: Config) -> Result<RenderOptions, String> {
    let canvas = resolution::resolve(args.preset, args.resolution).map_err(|e| e.to_string())?;

    // Font: CLI > config > first system monospace font
    let font = font::resolve_font_path(args.font.or(cfg.render.font).as_deref())
        .map_err(|e| e.to_string())?;

    // Size: CLI > config > default (12). The CLI value is already
    // validated by its parser; the config value is not.
    let size = match (args.size, cfg.render.size) {
        (Some(size), _) => size,
        (None, Some(size)) => check_font_size(size)?,
        (None, None) => font::DEFAULT_SIZE_PT,
    };

    let defaults = Palette::default();

    // Foreground: CLI > config > default (white)
    let foreground = match (args.color, cfg.render.color) {
        (Some(color), _) => color,
        (None, Some(hex)) => {
            palette::parse_hex(&hex).map_err(|e| format!("In config file: {}", e))?
        }
        (None, None) => defaults.foreground,
    };

    // Background: CLI > config > default (black)
    let background = match (args.bg, cfg.render.bg) {
        (Some(color), _) => color,
        (None, Some(hex)) => {
            palette::parse_hex(&hex).map_err(|e| format!("In config file: {}", e))?
        }
        (None, None) => defaults.background,
    };

    // Converter command: config > default
    let converter_command = cfg
        .converter
        .command
        .unwrap_or_else(|| converter::DEFAULT_COMMAND.to_string());

    Ok(RenderOptions {
        input: args.input,
        output: args.output,
        canvas,
        font,
        size,
        palette: Palette {
            foreground,
            background,
        },
        braille: args.braille,
        converter_command,
    })
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    // Load config file
    // If --config is specified, require the file to exist
    // Otherwise, fall back to defaults if default config not found
    let cfg = if let Some(ref path) = args.config {
        match Config::load_from_explicit(path.clone()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        match Config::load() {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                eprintln!("Using default settings.\n");
                Config::default()
            }
        }
    };

    let options = match build_options(args, cfg) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match pipeline::run(&options) {
        Ok(summary) => {
            println!(
                "Saved {} ({}px, {} cells)",
                summary.output.display(),
                summary.image_size,
                summary.grid
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascii_backdrop::config::{ConverterConfig, RenderConfig};

    fn parse_args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    // Resolution parsing tests

    #[test]
    fn test_parse_resolution_valid() {
        let dims = parse_resolution("1920x1080").unwrap();
        assert_eq!(dims.width, 1920);
        assert_eq!(dims.height, 1080);
    }

    #[test]
    fn test_parse_resolution_invalid_format() {
        assert!(parse_resolution("1920").is_err());
        assert!(parse_resolution("1920:1080").is_err());
        assert!(parse_resolution("widthxheight").is_err());
    }

    #[test]
    fn test_parse_resolution_zero_values() {
        assert!(parse_resolution("0x1080").is_err());
        assert!(parse_resolution("1920x0").is_err());
    }

    // Color parsing tests

    #[test]
    fn test_parse_color_valid() {
        assert_eq!(parse_color("ff0000").unwrap(), Rgb([255, 0, 0]));
        assert_eq!(parse_color("f00").unwrap(), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_parse_color_invalid() {
        assert!(parse_color("zzzzzz").is_err());
        assert!(parse_color("12").is_err());
        assert!(parse_color("1234").is_err());
    }

    // Font size parsing tests

    #[test]
    fn test_parse_font_size_valid() {
        assert_eq!(parse_font_size("12").unwrap(), 12);
        assert_eq!(parse_font_size("500").unwrap(), 500);
    }

    #[test]
    fn test_parse_font_size_invalid() {
        assert!(parse_font_size("0").is_err());
        assert!(parse_font_size("501").is_err());
        assert!(parse_font_size("abc").is_err());
        assert!(parse_font_size("-3").is_err());
    }

    // Argument surface tests

    #[test]
    fn test_args_minimal_with_preset() {
        let args = parse_args(&["ascii-backdrop", "-i", "in.png", "-p", "1080p", "-o", "out.png"]);
        assert_eq!(args.input, PathBuf::from("in.png"));
        assert!(matches!(args.preset, Some(Preset::P1080)));
        assert!(args.resolution.is_none());
        assert!(!args.braille);
    }

    #[test]
    fn test_args_custom_resolution() {
        let args = parse_args(&["ascii-backdrop", "-i", "in.png", "-r", "800x600", "-o", "out.png"]);
        let dims = args.resolution.unwrap();
        assert_eq!(dims.width, 800);
        assert_eq!(dims.height, 600);
    }

    #[test]
    fn test_args_preset_and_resolution_conflict() {
        let result = Args::try_parse_from([
            "ascii-backdrop",
            "-i",
            "in.png",
            "-p",
            "720p",
            "-r",
            "800x600",
            "-o",
            "out.png",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_require_preset_or_resolution() {
        let result = Args::try_parse_from(["ascii-backdrop", "-i", "in.png", "-o", "out.png"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_require_input_and_output() {
        assert!(Args::try_parse_from(["ascii-backdrop", "-p", "720p", "-o", "out.png"]).is_err());
        assert!(Args::try_parse_from(["ascii-backdrop", "-p", "720p", "-i", "in.png"]).is_err());
    }

    #[test]
    fn test_args_invalid_color_rejected_at_parse_time() {
        let result = Args::try_parse_from([
            "ascii-backdrop",
            "-i",
            "in.png",
            "-p",
            "720p",
            "-c",
            "nothex",
            "-o",
            "out.png",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_full_surface() {
        let args = parse_args(&[
            "ascii-backdrop",
            "--input",
            "in.jpg",
            "--preset",
            "4k",
            "--font",
            "/tmp/mono.ttf",
            "--size",
            "10",
            "--color",
            "0f0",
            "--bg",
            "222222",
            "--braille",
            "--verbose",
            "--output",
            "out.png",
        ]);
        assert!(matches!(args.preset, Some(Preset::K4)));
        assert_eq!(args.font, Some(PathBuf::from("/tmp/mono.ttf")));
        assert_eq!(args.size, Some(10));
        assert_eq!(args.color, Some(Rgb([0, 255, 0])));
        assert_eq!(args.bg, Some(Rgb([34, 34, 34])));
        assert!(args.braille);
        assert!(args.verbose);
    }

    // Merge logic tests. All pass an explicit font so no system font
    // probing happens.

    fn base_argv(extra: &[&str]) -> Vec<String> {
        let mut argv: Vec<String> = [
            "ascii-backdrop",
            "-i",
            "in.png",
            "-p",
            "720p",
            "-f",
            "/tmp/mono.ttf",
            "-o",
            "out.png",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        argv.extend(extra.iter().map(|s| s.to_string()));
        argv
    }

    fn config_with_render(render: RenderConfig) -> Config {
        Config {
            render,
            converter: ConverterConfig::default(),
        }
    }

    #[test]
    fn test_build_options_uses_built_in_defaults() {
        let args = Args::try_parse_from(base_argv(&[])).unwrap();
        let options = build_options(args, Config::default()).unwrap();
        assert_eq!(options.canvas.width, 1280);
        assert_eq!(options.canvas.height, 720);
        assert_eq!(options.size, font::DEFAULT_SIZE_PT);
        assert_eq!(options.palette, Palette::default());
        assert_eq!(options.converter_command, converter::DEFAULT_COMMAND);
        assert!(!options.braille);
    }

    #[test]
    fn test_build_options_cli_beats_config() {
        let args = Args::try_parse_from(base_argv(&["-s", "20", "-c", "ff0000"])).unwrap();
        let cfg = config_with_render(RenderConfig {
            size: Some(14),
            color: Some("00ff00".to_string()),
            ..RenderConfig::default()
        });
        let options = build_options(args, cfg).unwrap();
        assert_eq!(options.size, 20);
        assert_eq!(options.palette.foreground, Rgb([255, 0, 0]));
    }

    #[test]
    fn test_build_options_config_beats_default() {
        let args = Args::try_parse_from(base_argv(&[])).unwrap();
        let cfg = Config {
            render: RenderConfig {
                size: Some(14),
                bg: Some("123456".to_string()),
                ..RenderConfig::default()
            },
            converter: ConverterConfig {
                command: Some("my-converter".to_string()),
            },
        };
        let options = build_options(args, cfg).unwrap();
        assert_eq!(options.size, 14);
        assert_eq!(options.palette.background, Rgb([0x12, 0x34, 0x56]));
        assert_eq!(options.converter_command, "my-converter");
    }

    #[test]
    fn test_build_options_cli_font_beats_config_font() {
        let args = Args::try_parse_from(base_argv(&[])).unwrap();
        let cfg = config_with_render(RenderConfig {
            font: Some(PathBuf::from("/etc/other.ttf")),
            ..RenderConfig::default()
        });
        let options = build_options(args, cfg).unwrap();
        assert_eq!(options.font, PathBuf::from("/tmp/mono.ttf"));
    }

    #[test]
    fn test_build_options_rejects_bad_config_values() {
        let args = Args::try_parse_from(base_argv(&[])).unwrap();
        let cfg = config_with_render(RenderConfig {
            color: Some("nothex".to_string()),
            ..RenderConfig::default()
        });
        let err = build_options(args, cfg).unwrap_err();
        assert!(err.contains("In config file"));

        let args = Args::try_parse_from(base_argv(&[])).unwrap();
        let cfg = config_with_render(RenderConfig {
            size: Some(0),
            ..RenderConfig::default()
        });
        let err = build_options(args, cfg).unwrap_err();
        assert!(err.contains("Font size"));
    }
}
