//! SDL2 widgets for the tonewheel toy, one window per widget: the
//! circle-of-fifths wheel and the chord tile pad. A widget owns its window and
//! event pump; each `tick` waits for the next frame, handles input and redraws
//! everything, and the caller drains whatever the widget collected with the
//! `take_` accessors.

mod font;
mod geometry;
mod gesture;
mod pad;
mod tiles;
mod wheel;
mod window;

pub use geometry::*;
pub use gesture::*;
pub use pad::*;
pub use tiles::*;
pub use wheel::*;
