use crate::{tiles::TileStrip, window::Window};
use anyhow::anyhow;
use sdl2::{
    event::Event,
    keyboard::Keycode,
    mouse::MouseButton,
    pixels::Color,
    rect::{Point, Rect},
};
use std::{path::Path, time::Instant};

const DEFAULT_WIDTH_PX: u32 = 480;
const DEFAULT_HEIGHT_PX: u32 = 360;

const BACKGROUND: Color = Color::RGB(11, 16, 32);
const TEXT_COLOR: Color = Color::RGB(229, 231, 235);
const ENTRY_FILL: Color = Color::RGB(23, 32, 63);
const TILE_FILL: Color = Color::RGB(26, 36, 70);
const OUTLINE: Color = Color::RGBA(255, 255, 255, 38);

const PADDING_PX: i32 = 10;
const GAP_PX: i32 = 8;
const ENTRY_HEIGHT_PX: u32 = 36;
const BUTTON_WIDTH_PX: u32 = 72;
const TILE_WIDTH_PX: u32 = 72;
const TILE_HEIGHT_PX: u32 = 44;

struct Layout {
    entry: Rect,
    add_button: Rect,
    clear_button: Rect,
    tiles: Vec<Rect>,
}

/// Where everything sits for a window width and tile count: the entry row
/// along the top with its two buttons on the right, then tiles flowing left
/// to right, wrapping at the window edge.
fn layout(num_tiles: usize, width_px: u32) -> Layout {
    let width_px = width_px as i32;
    let clear_x = width_px - PADDING_PX - BUTTON_WIDTH_PX as i32;
    let add_x = clear_x - GAP_PX - BUTTON_WIDTH_PX as i32;
    let entry_width = (add_x - GAP_PX - PADDING_PX).max(1) as u32;
    let entry =
        Rect::new(PADDING_PX, PADDING_PX, entry_width, ENTRY_HEIGHT_PX);
    let add_button =
        Rect::new(add_x, PADDING_PX, BUTTON_WIDTH_PX, ENTRY_HEIGHT_PX);
    let clear_button =
        Rect::new(clear_x, PADDING_PX, BUTTON_WIDTH_PX, ENTRY_HEIGHT_PX);
    let mut tiles = Vec::with_capacity(num_tiles);
    let mut x = PADDING_PX;
    let mut y = PADDING_PX + ENTRY_HEIGHT_PX as i32 + GAP_PX;
    for _ in 0..num_tiles {
        if x + TILE_WIDTH_PX as i32 > width_px - PADDING_PX && x > PADDING_PX
        {
            x = PADDING_PX;
            y += TILE_HEIGHT_PX as i32 + GAP_PX;
        }
        tiles.push(Rect::new(x, y, TILE_WIDTH_PX, TILE_HEIGHT_PX));
        x += TILE_WIDTH_PX as i32 + GAP_PX;
    }
    Layout {
        entry,
        add_button,
        clear_button,
        tiles,
    }
}

/// The chord pad window: a text entry with Add and Clear buttons over a strip
/// of chord tiles. Tapping a tile reports its symbol; Add and Clear only
/// touch the strip.
pub struct ChordPad {
    window: Window,
    tiles: TileStrip,
    entry: String,
    pressed: bool,
    tapped: Option<String>,
}

impl ChordPad {
    pub fn new(
        tiles: TileStrip,
        font_path: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let window = Window::new(
            "tonewheel pad",
            DEFAULT_WIDTH_PX,
            DEFAULT_HEIGHT_PX,
            font_path,
        )?;
        window.canvas.window().subsystem().text_input().start();
        Ok(Self {
            window,
            tiles,
            entry: String::new(),
            pressed: false,
            tapped: None,
        })
    }

    fn handle_events(&mut self, layout: &Layout) {
        // collected up front so the handlers below can borrow the widget
        let events: Vec<Event> =
            self.window.event_pump.poll_iter().collect();
        for event in events {
            Window::handle_event_common(&event);
            match event {
                Event::TextInput { text, .. } => {
                    self.entry.push_str(&text);
                }
                Event::KeyDown {
                    keycode: Some(Keycode::Backspace),
                    ..
                } => {
                    self.entry.pop();
                }
                Event::KeyDown {
                    keycode: Some(Keycode::Return),
                    ..
                } => {
                    self.add_entry();
                }
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => {
                    self.handle_click(layout, Point::new(x, y));
                }
                _ => (),
            }
        }
    }

    fn handle_click(&mut self, layout: &Layout, point: Point) {
        if layout.add_button.contains_point(point) {
            self.add_entry();
        } else if layout.clear_button.contains_point(point) {
            log::debug!("clear {} tiles", self.tiles.len());
            self.tiles.clear();
        } else if let Some(index) = layout
            .tiles
            .iter()
            .position(|tile| tile.contains_point(point))
        {
            if let Some(symbol) = self.tiles.get(index) {
                log::debug!("tile tap: {}", symbol);
                self.pressed = true;
                self.tapped = Some(symbol.to_string());
            }
        }
    }

    fn add_entry(&mut self) {
        if self.tiles.add(self.entry.as_str()) {
            self.entry.clear();
        }
    }

    fn render(&mut self, layout: &Layout) -> anyhow::Result<()> {
        self.window.canvas.set_draw_color(BACKGROUND);
        self.window.canvas.clear();
        self.render_entry(layout)?;
        self.render_button(layout.add_button, "Add")?;
        self.render_button(layout.clear_button, "Clear")?;
        self.render_tiles(layout)?;
        self.window.canvas.present();
        Ok(())
    }

    fn render_entry(&mut self, layout: &Layout) -> anyhow::Result<()> {
        self.window.canvas.set_draw_color(ENTRY_FILL);
        self.window
            .canvas
            .fill_rect(layout.entry)
            .map_err(|e| anyhow!("{e}"))?;
        self.window.canvas.set_draw_color(OUTLINE);
        self.window
            .canvas
            .draw_rect(layout.entry)
            .map_err(|e| anyhow!("{e}"))?;
        if !self.entry.is_empty() {
            let center = layout.entry.center();
            // input longer than the box must not spill over the buttons
            self.window.draw_text_clipped(
                self.entry.as_str(),
                TEXT_COLOR,
                center.x(),
                center.y(),
                layout.entry,
            )?;
        }
        Ok(())
    }

    /// Tiles and the two action buttons share a look: a filled box with an
    /// outline and a centred label.
    fn render_button(
        &mut self,
        rect: Rect,
        label: &str,
    ) -> anyhow::Result<()> {
        self.window.canvas.set_draw_color(TILE_FILL);
        self.window
            .canvas
            .fill_rect(rect)
            .map_err(|e| anyhow!("{e}"))?;
        self.window.canvas.set_draw_color(OUTLINE);
        self.window
            .canvas
            .draw_rect(rect)
            .map_err(|e| anyhow!("{e}"))?;
        let center = rect.center();
        self.window.draw_text(label, TEXT_COLOR, center.x(), center.y())?;
        Ok(())
    }

    fn render_tiles(&mut self, layout: &Layout) -> anyhow::Result<()> {
        for (index, rect) in layout.tiles.iter().enumerate() {
            let Some(symbol) = self.tiles.get(index) else {
                break;
            };
            let symbol = symbol.to_string();
            self.render_button(*rect, symbol.as_str())?;
        }
        Ok(())
    }

    fn update(&mut self) -> anyhow::Result<()> {
        let (width_px, _height_px) = self.window.size_px()?;
        self.handle_events(&layout(self.tiles.len(), width_px));
        // adds and clears change the tile count; lay out again before drawing
        let layout = layout(self.tiles.len(), width_px);
        self.render(&layout)?;
        Ok(())
    }

    /// Waits until the next frame, then handles input and redraws the pad
    pub fn tick(&mut self) -> anyhow::Result<()> {
        self.window.wait_until_next_frame();
        self.update()?;
        self.window.prev_tick_complete = Instant::now();
        Ok(())
    }

    /// True if a tile was pressed since the last call; pressing a tile is
    /// what unlocks audio. Add and Clear don't count.
    pub fn take_pressed(&mut self) -> bool {
        std::mem::take(&mut self.pressed)
    }

    /// The symbol of the tile tapped since the last call, if any.
    pub fn take_tapped(&mut self) -> Option<String> {
        self.tapped.take()
    }
}
