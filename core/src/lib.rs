pub mod collision;
pub mod constants;
pub mod init;
pub mod input;
pub mod particles;
pub mod physics;
pub mod prng;
pub mod projectiles;
pub mod render;
pub mod session;
pub mod sprites;
pub mod types;

pub use constants::*;
pub use init::*;
pub use input::{InputEvent, Key};
pub use render::{NullSurface, Surface, TextAlign, TextStyle, Viewport};
pub use session::Session;
pub use sprites::{verify_assets, AssetError, AssetKey, Rect};
pub use types::*;
