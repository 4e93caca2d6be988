// Engine module - the lathe viewer's core, independent of the window shell

pub mod bounds;
pub mod camera;
pub mod input;
pub mod lathe;
pub mod light;
pub mod mesh;
pub mod overlay;
pub mod profile;
pub mod texture;
pub mod viewport;

// Re-export the state type the shell drives every frame
pub use viewport::ViewportState;
