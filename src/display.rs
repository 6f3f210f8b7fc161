use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use crate::error::HostResult;

/// The process's single display surface: a window and the RGBA frame buffer
/// presented into it.
pub struct Display {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    width: u32,
    height: u32,
}

impl Display {
    pub async fn open(
        event_loop: &EventLoop<()>,
        width: u32,
        height: u32,
        title: &str,
    ) -> HostResult<Self> {
        let size = LogicalSize::new(width as f64, height as f64);
        let builder = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(size)
            .with_resizable(false);

        #[cfg(target_arch = "wasm32")]
        let builder = {
            use winit::platform::web::WindowBuilderExtWebSys;
            builder.with_append(true)
        };

        let window = Arc::new(builder.build(event_loop)?);

        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, Arc::clone(&window));
        let pixels = Pixels::new_async(width, height, surface_texture).await?;

        log::info!(
            "display opened: {}x{} \"{}\" (surface {}x{})",
            width,
            height,
            title,
            window_size.width,
            window_size.height
        );

        Ok(Display {
            window,
            pixels,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 frame buffer, `width * height * 4` bytes.
    pub fn frame_mut(&mut self) -> &mut [u8] {
        self.pixels.frame_mut()
    }

    pub fn clear(&mut self, rgba: [u8; 4]) {
        for pixel in self.pixels.frame_mut().chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    pub(crate) fn window(&self) -> &Window {
        &self.window
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) -> HostResult<()> {
        self.pixels.resize_surface(width, height)?;
        Ok(())
    }

    pub(crate) fn present(&self) -> HostResult<()> {
        self.pixels.render()?;
        Ok(())
    }
}
