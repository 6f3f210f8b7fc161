use clap::Parser;

pub const WIDTH: u32 = 1280;
pub const HEIGHT: u32 = 720;
pub const TITLE: &str = "Jam";

const DEFAULT_VOLUME: f32 = 0.3;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct RawConfig {
    /// Target frame rate, 0 runs at the display's native rate
    #[arg(long, default_value_t = 0)]
    fps: u32,

    /// Output volume between 0.0 and 1.0
    #[arg(long, default_value_t = DEFAULT_VOLUME)]
    volume: f32,

    /// Start with audio muted
    #[arg(long, default_value_t = false)]
    mute: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: &'static str,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            title: TITLE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CleanConfig {
    // display surface, fixed at build time
    pub window: WindowConfig,
    // run loop target rate, 0 means host native
    pub fps: u32,
    // sink volume, already clamped
    pub volume: f32,
    // never hand control back once the run loop is registered
    pub simulate_infinite_loop: bool,
}

impl RawConfig {
    pub fn clean(self) -> CleanConfig {
        let volume = if self.mute || self.volume.is_nan() {
            0.0
        } else {
            self.volume.clamp(0.0, 1.0)
        };

        CleanConfig {
            window: WindowConfig::default(),
            fps: self.fps,
            volume,
            simulate_infinite_loop: true,
        }
    }
}

impl Default for CleanConfig {
    /// Defaults as if no arguments were given on the command line
    fn default() -> Self {
        RawConfig::parse_from(std::iter::once("jam")).clean()
    }
}
