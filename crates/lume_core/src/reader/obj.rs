//! OBJ scene loading.
//!
//! Builds a [`Scene`] from an OBJ file plus the MTL libraries it references.
//! Besides the usual geometry statements the reader understands two scene
//! extensions: `P x y z r g b` adds a point light and `S x y z radius` adds a
//! sphere with the current material.

use std::path::{Path, PathBuf};

use lume_math::{Sphere, Triangle, Vec3};
use thiserror::Error;

use super::mtl::load_mtl;
use super::parser::{parse_number, statements, ParseError, Statement};
use crate::scene::{Light, MaterialId, Object, Scene, SphereObject};

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("line {line}: unknown material '{name}'")]
    UnknownMaterial { line: usize, name: String },

    #[error("line {line}: '{keyword}' used before any usemtl")]
    MissingMaterial { line: usize, keyword: String },

    #[error("line {line}: index {index} out of range ({count} defined)")]
    IndexOutOfRange {
        line: usize,
        index: i64,
        count: usize,
    },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load an OBJ scene from disk.
///
/// The scene is named after the file stem and `mtllib` paths are resolved
/// relative to the file's directory.
pub fn load_obj<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    let base_dir = path.parent().map(Path::to_path_buf);

    load_obj_from_string(&content, name, base_dir)
}

/// Load an OBJ scene from a string.
///
/// `base_dir` is the directory `mtllib` paths are relative to. Without one
/// they are relative to the working directory.
pub fn load_obj_from_string(
    content: &str,
    name: &str,
    base_dir: Option<PathBuf>,
) -> LoadResult<Scene> {
    let mut builder = SceneBuilder::new(name, base_dir);

    for statement in statements(content) {
        builder.apply(&statement)?;
    }

    builder.finish()
}

/// One corner of an `f` statement, resolved to 0-based indices.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FaceVertex {
    position: usize,
    normal: Option<usize>,
}

/// Accumulates reader state while statements are applied in file order.
struct SceneBuilder {
    scene: Scene,
    base_dir: Option<PathBuf>,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    current_material: Option<MaterialId>,
}

impl SceneBuilder {
    fn new(name: &str, base_dir: Option<PathBuf>) -> Self {
        Self {
            scene: Scene::new(name),
            base_dir,
            positions: Vec::new(),
            normals: Vec::new(),
            current_material: None,
        }
    }

    fn apply(&mut self, statement: &Statement<'_>) -> LoadResult<()> {
        match statement.keyword {
            "v" => self.positions.push(statement.vec3()?),
            "vn" => self.normals.push(statement.vec3()?.normalize()),
            "mtllib" => self.load_library(statement)?,
            "usemtl" => {
                let name = statement.name()?;
                let id = self
                    .scene
                    .material_id(&name)
                    .ok_or(LoadError::UnknownMaterial {
                        line: statement.line,
                        name,
                    })?;
                self.current_material = Some(id);
            }
            "f" => self.add_face(statement)?,
            "P" => {
                let [x, y, z, r, g, b] = statement.floats::<6>()?;
                self.scene
                    .add_light(Light::new(Vec3::new(x, y, z), Vec3::new(r, g, b)));
            }
            "S" => {
                let material = self.require_material(statement)?;
                let [x, y, z, radius] = statement.floats::<4>()?;
                if radius <= 0.0 {
                    return Err(ParseError::Parse {
                        line: statement.line,
                        message: format!("sphere radius must be positive, got {}", radius),
                    }
                    .into());
                }
                self.scene.add_sphere(SphereObject::new(
                    Sphere::new(Vec3::new(x, y, z), radius),
                    material,
                ));
            }
            "vt" | "o" | "g" | "s" => {}
            other => log::debug!("line {}: ignoring '{}'", statement.line, other),
        }
        Ok(())
    }

    fn load_library(&mut self, statement: &Statement<'_>) -> LoadResult<()> {
        let file = statement.name()?;
        let path = match &self.base_dir {
            Some(dir) => dir.join(&file),
            None => PathBuf::from(&file),
        };

        for material in load_mtl(&path)? {
            self.scene.add_material(material);
        }
        Ok(())
    }

    fn require_material(&self, statement: &Statement<'_>) -> LoadResult<MaterialId> {
        self.current_material.ok_or_else(|| LoadError::MissingMaterial {
            line: statement.line,
            keyword: statement.keyword.to_string(),
        })
    }

    /// Fan-triangulate a polygon around its first corner.
    fn add_face(&mut self, statement: &Statement<'_>) -> LoadResult<()> {
        let material = self.require_material(statement)?;

        if statement.args.len() < 3 {
            return Err(ParseError::MissingValues {
                line: statement.line,
                keyword: statement.keyword.to_string(),
                expected: 3,
            }
            .into());
        }

        let corners = statement
            .args
            .iter()
            .map(|token| self.face_vertex(token, statement.line))
            .collect::<LoadResult<Vec<_>>>()?;

        let first = corners[0];
        let mut previous = corners[1];
        for &next in &corners[2..] {
            if next.position != previous.position {
                let object = self.make_object([first, previous, next], material);
                self.scene.add_object(object);
            }
            previous = next;
        }
        Ok(())
    }

    fn make_object(&self, corners: [FaceVertex; 3], material: MaterialId) -> Object {
        let [a, b, c] = corners.map(|corner| self.positions[corner.position]);
        let object = Object::new(Triangle::new(a, b, c), material);

        match corners.map(|corner| corner.normal) {
            [Some(na), Some(nb), Some(nc)] => {
                object.with_normals([self.normals[na], self.normals[nb], self.normals[nc]])
            }
            _ => object,
        }
    }

    /// Parse `i`, `i/t`, `i/t/n` or `i//n`. Texture indices are ignored.
    fn face_vertex(&self, token: &str, line: usize) -> LoadResult<FaceVertex> {
        let mut parts = token.split('/');
        let position = parts.next().unwrap_or_default();
        let position = resolve_index(parse_number(position, line)?, self.positions.len(), line)?;

        let normal = match parts.nth(1) {
            Some(raw) if !raw.is_empty() => {
                Some(resolve_index(parse_number(raw, line)?, self.normals.len(), line)?)
            }
            _ => None,
        };

        Ok(FaceVertex { position, normal })
    }

    fn finish(self) -> LoadResult<Scene> {
        let scene = self.scene;
        log::info!(
            "Loaded scene '{}': {} triangles, {} spheres, {} lights, {} materials",
            scene.name,
            scene.objects().len(),
            scene.sphere_objects().len(),
            scene.lights().len(),
            scene.materials().len()
        );
        Ok(scene)
    }
}

/// Map a 1-based (or negative, relative to the end) OBJ index to 0-based.
fn resolve_index(index: i64, count: usize, line: usize) -> LoadResult<usize> {
    let resolved = if index > 0 {
        usize::try_from(index - 1).ok()
    } else if index < 0 {
        usize::try_from(index.unsigned_abs())
            .ok()
            .and_then(|back| count.checked_sub(back))
    } else {
        None
    };

    resolved
        .filter(|&i| i < count)
        .ok_or(LoadError::IndexOutOfRange { line, index, count })
}
