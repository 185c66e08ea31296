use std::path::PathBuf;

use clap::Parser;
use renderer::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(
    name = "boltwall",
    author,
    version,
    about = "Animated lightning background window",
    arg_required_else_help = false
)]
pub struct Cli {
    /// Base hue of the lightning in degrees (0-360, default 230).
    #[arg(long, value_name = "DEGREES")]
    pub hue: Option<f32>,

    /// Horizontal offset of the bolt center in normalized units (default 0).
    #[arg(long, value_name = "OFFSET")]
    pub x_offset: Option<f32>,

    /// Animation speed multiplier (default 1).
    #[arg(long, value_name = "MULTIPLIER")]
    pub speed: Option<f32>,

    /// Brightness intensity multiplier (default 1).
    #[arg(long, value_name = "MULTIPLIER")]
    pub intensity: Option<f32>,

    /// Pattern scale multiplier (default 1).
    #[arg(long, value_name = "MULTIPLIER")]
    pub size: Option<f32>,

    /// TOML file with the same tuning keys; flags take precedence over it.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Initial window size (e.g. `1280x720`).
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        value_parser = parse_window_size,
        default_value = "1280x720"
    )]
    pub window_size: (u32, u32),
}

impl Cli {
    /// Tuning flags reshaped into the shallow-merge overlay.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            hue: self.hue,
            x_offset: self.x_offset,
            speed: self.speed,
            intensity: self.intensity,
            size: self.size,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_window_size(value: &str) -> Result<(u32, u32), String> {
    let trimmed = value.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("invalid size '{trimmed}'; expected WIDTHxHEIGHT"))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width in '{trimmed}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height in '{trimmed}'"))?;

    if width == 0 || height == 0 {
        return Err(format!("size '{trimmed}' must be non-zero on both axes"));
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_size_accepts_both_separators() {
        assert_eq!(parse_window_size("1280x720"), Ok((1280, 720)));
        assert_eq!(parse_window_size("1920X1080"), Ok((1920, 1080)));
        assert_eq!(parse_window_size(" 640 x 480 "), Ok((640, 480)));
    }

    #[test]
    fn window_size_rejects_garbage() {
        assert!(parse_window_size("1280").is_err());
        assert!(parse_window_size("axb").is_err());
        assert!(parse_window_size("0x720").is_err());
        assert!(parse_window_size("1280x0").is_err());
    }

    #[test]
    fn tuning_flags_map_to_overrides() {
        let cli = Cli::parse_from(["boltwall", "--hue", "90", "--speed", "2"]);
        let overrides = cli.overrides();
        assert_eq!(overrides.hue, Some(90.0));
        assert_eq!(overrides.speed, Some(2.0));
        assert_eq!(overrides.x_offset, None);
        assert_eq!(overrides.intensity, None);
        assert_eq!(overrides.size, None);
    }
}
