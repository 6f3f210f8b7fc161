use std::error::Error;

use web_time::Instant;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget};
use winit::keyboard::KeyCode;
use winit_input_helper::WinitInputHelper;

use crate::audio::AudioDevice;
use crate::bootstrap::{Context, Game, MainLoop, Platform};
use crate::config::CleanConfig;
use crate::display::Display;
use crate::error::HostResult;
use crate::pacing::{FramePacer, Wait};

/// Desktop and browser host built on winit, pixels and rodio.
pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    volume: f32,
}

impl WinitPlatform {
    pub fn new(config: &CleanConfig) -> HostResult<Self> {
        let event_loop = EventLoop::new()?;
        Ok(WinitPlatform {
            event_loop,
            volume: config.volume,
        })
    }
}

impl Platform for WinitPlatform {
    type Display = Display;
    type Audio = AudioDevice;

    async fn init_window(&mut self, width: u32, height: u32, title: &str) -> HostResult<Display> {
        Display::open(&self.event_loop, width, height, title).await
    }

    async fn init_audio_device(&mut self) -> HostResult<AudioDevice> {
        AudioDevice::open(self.volume)
    }

    fn set_main_loop<G>(self, ctx: Context<Self>, game: G, main_loop: MainLoop) -> HostResult<()>
    where
        G: Game<Self> + 'static,
    {
        let mut runner = Runner {
            ctx,
            game,
            input: WinitInputHelper::new(),
            pacer: FramePacer::new(main_loop.fps, Instant::now()),
            failure: None,
        };

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;

            // The browser owns the loop from here on, so this returns right away
            log::debug!("handing run loop to the browser");
            self.event_loop
                .spawn(move |event, elwt| runner.handle(event, elwt));
            return Ok(());
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            self.event_loop
                .run(|event, elwt| runner.handle(event, elwt))?;
            log::info!("run loop finished after {} frames", runner.pacer.frames());

            if main_loop.simulate_infinite_loop {
                std::process::exit(exit_code(runner.failure.as_deref()));
            }
            match runner.failure {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }
}

struct Runner<G> {
    ctx: Context<WinitPlatform>,
    game: G,
    input: WinitInputHelper,
    pacer: FramePacer,
    // First fatal error hit by the loop, if any
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    failure: Option<Box<dyn Error>>,
}

/// Status the process ends with once the run loop is over.
#[cfg(not(target_arch = "wasm32"))]
fn exit_code(failure: Option<&dyn Error>) -> i32 {
    match failure {
        Some(_) => 1,
        None => 0,
    }
}

impl<G: Game<WinitPlatform>> Runner<G> {
    fn handle(&mut self, event: Event<()>, elwt: &EventLoopWindowTarget<()>) {
        // End of an event batch
        if self.input.update(&event) {
            if self.input.key_pressed(KeyCode::Escape) || self.input.close_requested() {
                elwt.exit();
                return;
            }

            if let Some(size) = self.input.window_resized()
                && let Err(err) = self.ctx.display.resize(size.width, size.height)
            {
                self.fail(elwt, format!("failed to resize surface: {}", err).into());
                return;
            }

            if self.pacer.poll(Instant::now()) {
                self.ctx.display.window().request_redraw();
            }
            elwt.set_control_flow(match self.pacer.wait() {
                Wait::Poll => ControlFlow::Poll,
                Wait::Until(deadline) => ControlFlow::WaitUntil(deadline),
            });
        }

        if let Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } = event
        {
            // Redraws the host asks for on its own only re-present the last frame
            if self.pacer.take_due() {
                let tick = self.pacer.tick(Instant::now());
                self.game.frame(&mut self.ctx, tick);
            }

            if let Err(err) = self.ctx.display.present() {
                self.fail(elwt, format!("failed to present frame: {}", err).into());
            }
        }
    }

    fn fail(&mut self, elwt: &EventLoopWindowTarget<()>, err: Box<dyn Error>) {
        log::error!("{}", err);
        self.failure.get_or_insert(err);
        elwt.exit();
    }
}
