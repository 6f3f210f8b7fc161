use crate::config::CleanConfig;
use crate::error::{BootstrapError, HostResult, Stage};
use crate::pacing::Tick;

/// Run loop registration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLoop {
    /// Target frames per second, 0 follows the host's native rate.
    pub fps: u32,
    /// Treat control as permanently handed to the run loop.
    pub simulate_infinite_loop: bool,
}

/// Host services the bootstrap needs: one display, one audio device and a
/// run loop that drives the frame callback.
#[allow(async_fn_in_trait)]
pub trait Platform: Sized {
    type Display;
    type Audio;

    async fn init_window(&mut self, width: u32, height: u32, title: &str)
    -> HostResult<Self::Display>;

    async fn init_audio_device(&mut self) -> HostResult<Self::Audio>;

    /// Hands `game` to the run loop. Only returns once the loop itself ends,
    /// or immediately on hosts that own the loop (the browser).
    fn set_main_loop<G>(self, ctx: Context<Self>, game: G, main_loop: MainLoop) -> HostResult<()>
    where
        G: Game<Self> + 'static;
}

/// Resources created during bootstrap, owned by the run loop afterwards.
pub struct Context<P: Platform> {
    pub display: P::Display,
    pub audio: P::Audio,
}

/// Application state initializer and per-frame step.
pub trait Game<P: Platform> {
    fn init(&mut self, ctx: &mut Context<P>) -> HostResult<()>;

    /// Called once per frame by the run loop. Must not block.
    fn frame(&mut self, ctx: &mut Context<P>, tick: Tick);
}

/// Brings the process from uninitialized to running: display, audio, game
/// init, then run loop registration. The first failure stops the sequence.
pub async fn bootstrap<P, G>(
    mut platform: P,
    config: &CleanConfig,
    mut game: G,
) -> Result<(), BootstrapError>
where
    P: Platform,
    G: Game<P> + 'static,
{
    let window = &config.window;
    let display = platform
        .init_window(window.width, window.height, window.title)
        .await
        .map_err(|e| BootstrapError::new(Stage::DisplayInit, e))?;

    let audio = platform
        .init_audio_device()
        .await
        .map_err(|e| BootstrapError::new(Stage::AudioInit, e))?;

    let mut ctx = Context { display, audio };
    game.init(&mut ctx)
        .map_err(|e| BootstrapError::new(Stage::AppInit, e))?;

    let main_loop = MainLoop {
        fps: config.fps,
        simulate_infinite_loop: config.simulate_infinite_loop,
    };
    log::info!(
        "entering run loop (fps: {}, infinite: {})",
        main_loop.fps,
        main_loop.simulate_infinite_loop
    );

    platform
        .set_main_loop(ctx, game, main_loop)
        .map_err(|e| BootstrapError::new(Stage::SchedulerRegister, e))
}
