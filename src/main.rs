#![warn(clippy::all)]
#![forbid(unsafe_code)]

use jam_lib::{Context, Game, HostResult, Tick, WinitPlatform};

const BACKGROUND: [u8; 4] = [0x10, 0x10, 0x18, 0xFF];

#[derive(Default)]
struct Jam {
    elapsed: f32,
    // frames and time since the title was last updated
    fps_frames: u32,
    fps_elapsed: f32,
}

impl Game<WinitPlatform> for Jam {
    fn init(&mut self, ctx: &mut Context<WinitPlatform>) -> HostResult<()> {
        ctx.display.clear(BACKGROUND);
        ctx.audio.push_samples(&chime(ctx.audio.sample_rate()));
        log::info!(
            "jam ready ({}x{}, {} Hz audio)",
            ctx.display.width(),
            ctx.display.height(),
            ctx.audio.sample_rate()
        );
        Ok(())
    }

    fn frame(&mut self, ctx: &mut Context<WinitPlatform>, tick: Tick) {
        self.elapsed += tick.delta;

        let width = ctx.display.width() as usize;
        paint(ctx.display.frame_mut(), width, self.elapsed);

        self.fps_frames += 1;
        self.fps_elapsed += tick.delta;
        if self.fps_elapsed >= 1.0 {
            let fps = self.fps_frames as f32 / self.fps_elapsed;
            ctx.display.set_title(&format!("Jam - {:.2}", fps));
            self.fps_frames = 0;
            self.fps_elapsed = 0.0;
        }
    }
}

/// Fills an RGBA buffer with a horizontal gradient that pulses over time.
fn paint(frame: &mut [u8], width: usize, elapsed: f32) {
    let pulse = ((elapsed * 2.0).sin() * 0.5 + 0.5) * 64.0;
    for (i, pixel) in frame.chunks_exact_mut(4).enumerate() {
        let x = (i % width) as f32 / width.max(1) as f32;
        let shade = (pulse * x).clamp(0.0, 255.0) as u8;
        pixel.copy_from_slice(&[BACKGROUND[0], BACKGROUND[1] + shade, BACKGROUND[2] + shade / 2, 0xFF]);
    }
}

/// Quarter second 440 Hz tone fading out, played once at startup.
fn chime(sample_rate: u32) -> Vec<(f32, f32)> {
    let len = sample_rate as usize / 4;
    (0..len)
        .map(|n| {
            let t = n as f32 / sample_rate as f32;
            let fade = 1.0 - n as f32 / len as f32;
            let s = (t * 440.0 * std::f32::consts::TAU).sin() * 0.2 * fade;
            (s, s)
        })
        .collect()
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async {
            if let Err(e) = jam_lib::run(Jam::default()).await {
                log::error!("{}", e);
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = pollster::block_on(jam_lib::run(Jam::default())) {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
