//! Scene file support for Lume.
//!
//! Scenes are Wavefront OBJ files with two extra statements:
//!
//! - `P x y z r g b`: a point light at `(x, y, z)` with RGB intensity
//! - `S x y z r`: a sphere with the current material
//!
//! Materials come from MTL libraries referenced with `mtllib`, with one
//! extra statement:
//!
//! - `al d r t`: albedo weights for diffuse, reflection and refraction
//!
//! ## Supported OBJ statements
//!
//! - `v`, `vn` (normalized on read), `f` in `i`, `i/t`, `i/t/n` and `i//n` form
//! - `mtllib`, `usemtl`
//!
//! Texture coordinates, groups and smoothing groups are read past and ignored.

mod mtl;
mod obj;
mod parser;

pub use mtl::*;
pub use obj::*;
pub use parser::{ParseError, ParseResult};
