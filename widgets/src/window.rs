use crate::font::{Font, load_font};
use anyhow::anyhow;
use sdl2::{
    EventPump,
    event::Event,
    pixels::Color,
    rect::Rect,
    render::{BlendMode, Canvas, TextureCreator},
    video::{Window as SdlWindow, WindowContext},
};
use std::{
    path::Path,
    thread,
    time::{Duration, Instant},
};

const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / 60);

/// The window shared by the widgets: canvas, event pump, frame pacing and
/// centred text rendering. Widgets reach into the public fields directly.
pub struct Window {
    pub canvas: Canvas<SdlWindow>,
    pub event_pump: EventPump,
    pub font: Font<'static, 'static>,
    pub texture_creator: TextureCreator<WindowContext>,
    pub prev_tick_complete: Instant,
}

impl Window {
    pub fn new(
        title: &str,
        width_px: u32,
        height_px: u32,
        font_path: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
        let window = video_subsystem
            .window(title, width_px, height_px)
            .resizable()
            .build()?;
        let mut canvas = window
            .into_canvas()
            .target_texture()
            .present_vsync()
            .build()?;
        canvas.set_blend_mode(BlendMode::Blend);
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;
        Ok(Self {
            canvas,
            event_pump,
            font: load_font(font_path, 16)?,
            texture_creator,
            prev_tick_complete: Instant::now(),
        })
    }

    pub fn wait_until_next_frame(&self) {
        if let Some(period_to_sleep) = (self.prev_tick_complete
            + FRAME_DURATION)
            .checked_duration_since(Instant::now())
        {
            thread::sleep(period_to_sleep);
        }
    }

    /// Current drawable size; tracks live resizes.
    pub fn size_px(&self) -> anyhow::Result<(u32, u32)> {
        self.canvas.output_size().map_err(|e| anyhow!("{e}"))
    }

    pub fn handle_event_common(event: &Event) {
        if let Event::Quit { .. } = event {
            std::process::exit(0)
        }
    }

    /// Draws `text` centred on a point using the window's own font.
    pub fn draw_text(
        &mut self,
        text: &str,
        color: Color,
        center_x_px: i32,
        center_y_px: i32,
    ) -> anyhow::Result<()> {
        let text_surface = self
            .font
            .render(text)
            .blended(color)
            .map_err(|e| anyhow!("{e}"))?;
        let text_texture = text_surface.as_texture(&self.texture_creator)?;
        let text_texture_query = text_texture.query();
        let text_rect = Rect::new(
            center_x_px - text_texture_query.width as i32 / 2,
            center_y_px - text_texture_query.height as i32 / 2,
            text_texture_query.width,
            text_texture_query.height,
        );
        self.canvas
            .copy(&text_texture, None, Some(text_rect))
            .map_err(|e| anyhow!("{e}"))?;
        Ok(())
    }

    /// Like `draw_text` but draws only the part of the text that falls
    /// inside `clip`. Text wider than the clip loses its ends instead of
    /// spilling past it.
    pub fn draw_text_clipped(
        &mut self,
        text: &str,
        color: Color,
        center_x_px: i32,
        center_y_px: i32,
        clip: Rect,
    ) -> anyhow::Result<()> {
        let text_surface = self
            .font
            .render(text)
            .blended(color)
            .map_err(|e| anyhow!("{e}"))?;
        let text_texture = text_surface.as_texture(&self.texture_creator)?;
        let text_texture_query = text_texture.query();
        let text_rect = Rect::new(
            center_x_px - text_texture_query.width as i32 / 2,
            center_y_px - text_texture_query.height as i32 / 2,
            text_texture_query.width,
            text_texture_query.height,
        );
        if let Some((src, dst)) = clip_copy_rects(text_rect, clip) {
            self.canvas
                .copy(&text_texture, Some(src), Some(dst))
                .map_err(|e| anyhow!("{e}"))?;
        }
        Ok(())
    }

    /// Like `draw_text` but with a caller-supplied font, rotating the text
    /// about its own centre.
    pub fn draw_text_rotated(
        &mut self,
        font: &Font<'static, 'static>,
        text: &str,
        color: Color,
        center_x_px: i32,
        center_y_px: i32,
        angle_degrees: f64,
    ) -> anyhow::Result<()> {
        let text_surface =
            font.render(text).blended(color).map_err(|e| anyhow!("{e}"))?;
        let text_texture = text_surface.as_texture(&self.texture_creator)?;
        let text_texture_query = text_texture.query();
        let text_rect = Rect::new(
            center_x_px - text_texture_query.width as i32 / 2,
            center_y_px - text_texture_query.height as i32 / 2,
            text_texture_query.width,
            text_texture_query.height,
        );
        self.canvas
            .copy_ex(
                &text_texture,
                None,
                Some(text_rect),
                angle_degrees,
                None,
                false,
                false,
            )
            .map_err(|e| anyhow!("{e}"))?;
        Ok(())
    }
}

/// Source and destination rectangles copying only the part of a texture
/// placed at `text_rect` that falls inside `clip`, or `None` when nothing
/// does.
fn clip_copy_rects(text_rect: Rect, clip: Rect) -> Option<(Rect, Rect)> {
    let dst = clip.intersection(text_rect)?;
    let src = Rect::new(
        dst.x() - text_rect.x(),
        dst.y() - text_rect.y(),
        dst.width(),
        dst.height(),
    );
    Some((src, dst))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clipping_a_wide_rect_keeps_the_overlap() {
        let text_rect = Rect::new(-20, 10, 100, 20);
        let clip = Rect::new(0, 0, 60, 40);
        let (src, dst) = clip_copy_rects(text_rect, clip).unwrap();
        assert_eq!(dst, Rect::new(0, 10, 60, 20));
        // the source window starts 20px into the texture
        assert_eq!(src, Rect::new(20, 0, 60, 20));
    }

    #[test]
    fn text_inside_the_clip_is_copied_whole() {
        let text_rect = Rect::new(10, 10, 30, 12);
        let clip = Rect::new(0, 0, 100, 50);
        let (src, dst) = clip_copy_rects(text_rect, clip).unwrap();
        assert_eq!(dst, text_rect);
        assert_eq!(src, Rect::new(0, 0, 30, 12));
    }

    #[test]
    fn text_outside_the_clip_copies_nothing() {
        let text_rect = Rect::new(200, 0, 30, 12);
        let clip = Rect::new(0, 0, 100, 50);
        assert!(clip_copy_rects(text_rect, clip).is_none());
    }
}
