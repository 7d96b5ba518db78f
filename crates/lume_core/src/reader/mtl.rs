//! MTL material library reader.

use std::path::Path;

use super::obj::{LoadError, LoadResult};
use super::parser::{statements, ParseResult};
use crate::scene::Material;

/// Parse the contents of an MTL file into materials, in file order.
///
/// Recognized statements are `newmtl`, `Ka`, `Kd`, `Ks`, `Ke`, `Ns`, `Ni` and
/// `al`. Anything else (`illum`, `d`, texture maps, ...) is ignored. Values
/// not given by a block keep the [`Material::default`] values.
pub fn parse_mtl(content: &str) -> ParseResult<Vec<Material>> {
    let mut materials = Vec::new();
    let mut current: Option<Material> = None;

    for statement in statements(content) {
        if statement.keyword == "newmtl" {
            materials.extend(current.take());
            current = Some(Material::new(statement.name()?));
            continue;
        }

        let Some(material) = current.as_mut() else {
            log::debug!(
                "line {}: '{}' outside of a newmtl block, ignoring",
                statement.line,
                statement.keyword
            );
            continue;
        };

        match statement.keyword {
            "Ka" => material.ambient_color = statement.vec3()?,
            "Kd" => material.diffuse_color = statement.vec3()?,
            "Ks" => material.specular_color = statement.vec3()?,
            "Ke" => material.emissive_color = statement.vec3()?,
            "Ns" => material.specular_exponent = statement.scalar()?,
            "Ni" => material.refraction_index = statement.scalar()?,
            "al" => material.albedo = statement.floats::<3>()?,
            _ => {}
        }
    }

    materials.extend(current);
    Ok(materials)
}

/// Read and parse an MTL file.
pub fn load_mtl<P: AsRef<Path>>(path: P) -> LoadResult<Vec<Material>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let materials = parse_mtl(&content)?;
    log::debug!("Read {} materials from {}", materials.len(), path.display());
    Ok(materials)
}
