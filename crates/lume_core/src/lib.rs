//! Lume Core - Scene model and scene file support.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Object`, `SphereObject`, `Light`, `Material`
//! - **Scene reading**: OBJ scene files with MTL material libraries, extended
//!   with `P` (point light) and `S` (sphere) statements
//!
//! # Example
//!
//! ```ignore
//! use lume_core::load_obj;
//!
//! let scene = load_obj("box/cube.obj")?;
//! println!("Loaded {} triangles, {} spheres, {} lights",
//!     scene.objects().len(),
//!     scene.sphere_objects().len(),
//!     scene.lights().len());
//! ```

pub mod reader;
pub mod scene;

// Re-export commonly used types
pub use reader::{
    load_mtl, load_obj, load_obj_from_string, parse_mtl, LoadError, LoadResult, ParseError,
    ParseResult,
};
pub use scene::{Light, Material, MaterialId, Object, Scene, SphereObject};
