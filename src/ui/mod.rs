pub mod messages;
pub mod render;

pub use render::render_grid;
