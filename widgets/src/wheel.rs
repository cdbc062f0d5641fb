use crate::{
    font::{Font, load_font},
    geometry::{SECTOR_RADS, WheelGeometry},
    gesture::Gesture,
    window::Window,
};
use anyhow::anyhow;
use sdl2::{
    event::Event, gfx::primitives::DrawRenderer, mouse::MouseButton,
    pixels::Color, ttf::FontStyle,
};
use std::{path::Path, time::Instant};
use tonewheel_theory::circle::{KeyLabel, NUM_SECTORS, Ring, key};

const BACKGROUND: Color = Color::RGB(11, 16, 32);
const LABEL_COLOR: Color = Color::RGB(229, 231, 235);
const WEDGE_OUTLINE: Color = Color::RGBA(255, 255, 255, 38);
const HOLE_OUTLINE: Color = Color::RGBA(255, 255, 255, 51);

/// Angular steps per wedge when approximating arcs with polygons.
const WEDGE_SEGMENTS: usize = 8;
/// Radial bands per wedge; more bands track the gradient more closely where a
/// wedge spans a large vertical range.
const WEDGE_BANDS: usize = 3;

/// A ring's vertical gradient, light at the top, dark at the bottom. The
/// outer ring's gradient tilts with it as it rotates.
#[derive(Clone, Copy)]
struct RingColors {
    top: Color,
    bottom: Color,
}

const MAJOR_RING_COLORS: RingColors = RingColors {
    top: Color::RGB(38, 58, 120),
    bottom: Color::RGB(26, 36, 70),
};

const MINOR_RING_COLORS: RingColors = RingColors {
    top: Color::RGB(34, 50, 99),
    bottom: Color::RGB(23, 32, 63),
};

/// The circle-of-fifths window: a rotating outer ring of major keys around a
/// fixed inner ring of minor keys. Dragging spins the outer ring; tapping a
/// wedge reports the key under the pointer.
pub struct Wheel {
    window: Window,
    outer_font: Font<'static, 'static>,
    gesture: Gesture,
    pressed: bool,
    tapped: Option<KeyLabel>,
}

impl Wheel {
    pub fn new(
        size_px: u32,
        font_path: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let window = Window::new("tonewheel", size_px, size_px, font_path)?;
        let mut outer_font = load_font(font_path, 18)?;
        outer_font.set_style(FontStyle::BOLD);
        Ok(Self {
            window,
            outer_font,
            gesture: Gesture::new(),
            pressed: false,
            tapped: None,
        })
    }

    fn handle_events(&mut self, geometry: WheelGeometry) {
        for event in self.window.event_pump.poll_iter() {
            Window::handle_event_common(&event);
            match event {
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => {
                    self.pressed = true;
                    self.gesture.press(geometry, x as f32, y as f32);
                }
                Event::MouseMotion { x, y, .. } => {
                    self.gesture.motion(geometry, x as f32, y as f32);
                }
                Event::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => {
                    if let Some((ring, sector)) =
                        self.gesture.release(geometry, x as f32, y as f32)
                    {
                        let label = key(ring, sector);
                        log::debug!("tap: {}", label.text);
                        self.tapped = Some(label);
                    }
                }
                _ => (),
            }
        }
    }

    fn render(&mut self, geometry: WheelGeometry) -> anyhow::Result<()> {
        self.window.canvas.set_draw_color(BACKGROUND);
        self.window.canvas.clear();
        self.render_ring(geometry, Ring::Major)?;
        self.render_ring(geometry, Ring::Minor)?;
        self.render_hole(geometry)?;
        self.render_labels(geometry)?;
        self.window.canvas.present();
        Ok(())
    }

    fn render_ring(
        &mut self,
        geometry: WheelGeometry,
        ring: Ring,
    ) -> anyhow::Result<()> {
        let rotation_rads = match ring {
            Ring::Major => self.gesture.rotation_rads(),
            Ring::Minor => 0.0,
        };
        let colors = match ring {
            Ring::Major => MAJOR_RING_COLORS,
            Ring::Minor => MINOR_RING_COLORS,
        };
        let (inner_px, outer_px) = geometry.ring_bounds_px(ring);
        for sector in 0..NUM_SECTORS {
            self.render_wedge(
                geometry,
                sector,
                rotation_rads,
                inner_px,
                outer_px,
                colors,
            )?;
        }
        Ok(())
    }

    fn render_wedge(
        &mut self,
        geometry: WheelGeometry,
        sector: usize,
        rotation_rads: f32,
        inner_px: f32,
        outer_px: f32,
        colors: RingColors,
    ) -> anyhow::Result<()> {
        let start_rads = sector as f32 * SECTOR_RADS;
        let step_rads = SECTOR_RADS / WEDGE_SEGMENTS as f32;
        let band_px = (outer_px - inner_px) / WEDGE_BANDS as f32;
        for segment in 0..WEDGE_SEGMENTS {
            let a0_rads = start_rads + segment as f32 * step_rads;
            let a1_rads = a0_rads + step_rads;
            let mid_rads = (a0_rads + a1_rads) / 2.0;
            for band in 0..WEDGE_BANDS {
                let r0_px = inner_px + band as f32 * band_px;
                let r1_px = r0_px + band_px;
                // sample the gradient at the cell's centroid, in the frame
                // the ring is drawn in
                let color = gradient_color(
                    colors,
                    outer_px,
                    mid_rads.sin() * (r0_px + r1_px) / 2.0,
                );
                let corners = [
                    (a0_rads, r0_px),
                    (a0_rads, r1_px),
                    (a1_rads, r1_px),
                    (a1_rads, r0_px),
                ];
                let mut xs = [0i16; 4];
                let mut ys = [0i16; 4];
                for (i, &(angle_rads, radius_px)) in
                    corners.iter().enumerate()
                {
                    let (sin, cos) = (angle_rads + rotation_rads).sin_cos();
                    xs[i] = (geometry.center_x_px + cos * radius_px) as i16;
                    ys[i] = (geometry.center_y_px + sin * radius_px) as i16;
                }
                self.window
                    .canvas
                    .filled_polygon(&xs, &ys, color)
                    .map_err(|e| anyhow!("{e}"))?;
            }
        }
        // outline the whole wedge, radial edges included
        let mut xs = [0i16; (WEDGE_SEGMENTS + 1) * 2];
        let mut ys = [0i16; (WEDGE_SEGMENTS + 1) * 2];
        for i in 0..=WEDGE_SEGMENTS {
            let arc_rads = start_rads + i as f32 * step_rads + rotation_rads;
            let (sin, cos) = arc_rads.sin_cos();
            xs[i] = (geometry.center_x_px + cos * outer_px) as i16;
            ys[i] = (geometry.center_y_px + sin * outer_px) as i16;
            let j = xs.len() - 1 - i;
            xs[j] = (geometry.center_x_px + cos * inner_px) as i16;
            ys[j] = (geometry.center_y_px + sin * inner_px) as i16;
        }
        self.window
            .canvas
            .polygon(&xs, &ys, WEDGE_OUTLINE)
            .map_err(|e| anyhow!("{e}"))?;
        Ok(())
    }

    fn render_hole(&mut self, geometry: WheelGeometry) -> anyhow::Result<()> {
        let x = geometry.center_x_px as i16;
        let y = geometry.center_y_px as i16;
        let radius = geometry.hole_radius_px as i16;
        self.window
            .canvas
            .filled_circle(x, y, radius, BACKGROUND)
            .map_err(|e| anyhow!("{e}"))?;
        self.window
            .canvas
            .circle(x, y, radius, HOLE_OUTLINE)
            .map_err(|e| anyhow!("{e}"))?;
        Ok(())
    }

    fn render_labels(
        &mut self,
        geometry: WheelGeometry,
    ) -> anyhow::Result<()> {
        let rotation_rads = self.gesture.rotation_rads();
        let rotation_degrees = rotation_rads.to_degrees() as f64;
        let outer_label_px = geometry.label_radius_px(Ring::Major);
        let inner_label_px = geometry.label_radius_px(Ring::Minor);
        for sector in 0..NUM_SECTORS {
            let mid_rads = (sector as f32 + 0.5) * SECTOR_RADS;
            let (sin, cos) = (mid_rads + rotation_rads).sin_cos();
            self.window.draw_text_rotated(
                &self.outer_font,
                key(Ring::Major, sector).text,
                LABEL_COLOR,
                (geometry.center_x_px + cos * outer_label_px) as i32,
                (geometry.center_y_px + sin * outer_label_px) as i32,
                rotation_degrees,
            )?;
            let (sin, cos) = mid_rads.sin_cos();
            self.window.draw_text(
                key(Ring::Minor, sector).text,
                LABEL_COLOR,
                (geometry.center_x_px + cos * inner_label_px) as i32,
                (geometry.center_y_px + sin * inner_label_px) as i32,
            )?;
        }
        Ok(())
    }

    fn update(&mut self) -> anyhow::Result<()> {
        let (width_px, height_px) = self.window.size_px()?;
        let geometry = WheelGeometry::new(width_px, height_px);
        self.handle_events(geometry);
        self.render(geometry)?;
        Ok(())
    }

    /// Waits until the next frame, then handles input and redraws the wheel
    pub fn tick(&mut self) -> anyhow::Result<()> {
        self.window.wait_until_next_frame();
        self.update()?;
        self.window.prev_tick_complete = Instant::now();
        Ok(())
    }

    /// True if the wheel was pressed since the last call. Presses precede
    /// taps and are what unlocks audio.
    pub fn take_pressed(&mut self) -> bool {
        std::mem::take(&mut self.pressed)
    }

    /// The key tapped since the last call, if any. Drags don't tap.
    pub fn take_tapped(&mut self) -> Option<KeyLabel> {
        self.tapped.take()
    }

    pub fn rotation_rads(&self) -> f32 {
        self.gesture.rotation_rads()
    }
}

fn gradient_color(colors: RingColors, span_px: f32, y_px: f32) -> Color {
    let t = ((y_px + span_px) / (2.0 * span_px)).clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
    Color::RGB(
        lerp(colors.top.r, colors.bottom.r),
        lerp(colors.top.g, colors.bottom.g),
        lerp(colors.top.b, colors.bottom.b),
    )
}
