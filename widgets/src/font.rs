use anyhow::anyhow;
use lazy_static::lazy_static;
pub use sdl2::ttf::Font;
use sdl2::ttf::Sdl2TtfContext;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref TTF_CONTEXT: Result<Sdl2TtfContext, String> =
        sdl2::ttf::init().map_err(|e| e.to_string());
}

// DejaVu first: the outer ring's flat labels need the U+266D flat sign.
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

fn find_font_file() -> anyhow::Result<PathBuf> {
    FONT_SEARCH_PATHS
        .iter()
        .map(Path::new)
        .find(|path| path.exists())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            anyhow!("no font found in any well-known location (pass a path)")
        })
}

fn load_font_from_file(
    path: &Path,
    pt_size: u16,
) -> anyhow::Result<Font<'static, 'static>> {
    let ttf_context = TTF_CONTEXT.as_ref().map_err(|e| anyhow!("{e}"))?;
    log::debug!("font: {} at {}pt", path.display(), pt_size);
    ttf_context.load_font(path, pt_size).map_err(|e| anyhow!(e))
}

pub fn load_font(
    path: Option<&Path>,
    pt_size: u16,
) -> anyhow::Result<Font<'static, 'static>> {
    match path {
        Some(path) => load_font_from_file(path, pt_size),
        None => load_font_from_file(find_font_file()?.as_path(), pt_size),
    }
}
