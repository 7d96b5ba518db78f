//! Scene types for Lume.
//!
//! A scene is built once (usually by the OBJ reader) and then only read by
//! the renderer. Objects refer to materials through [`MaterialId`] handles
//! into the scene's material table, so no borrow ties them to the table.

use std::collections::HashMap;

use lume_math::{Sphere, Triangle, Vec3};

/// A Phong-style material, as described by an MTL `newmtl` block.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name (MTL `newmtl`)
    pub name: String,

    /// Ambient color (Ka)
    pub ambient_color: Vec3,

    /// Diffuse color (Kd)
    pub diffuse_color: Vec3,

    /// Specular color (Ks)
    pub specular_color: Vec3,

    /// Emitted color (Ke)
    pub emissive_color: Vec3,

    /// Phong specular exponent (Ns)
    pub specular_exponent: f64,

    /// Index of refraction (Ni), 1.0 is vacuum
    pub refraction_index: f64,

    /// Weights for the diffuse+specular, reflection and refraction terms (al).
    ///
    /// They do not have to sum to one. A weight of zero switches its term off.
    pub albedo: [f64; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient_color: Vec3::ZERO,
            diffuse_color: Vec3::ZERO,
            specular_color: Vec3::ZERO,
            emissive_color: Vec3::ZERO,
            specular_exponent: 0.0,
            refraction_index: 1.0,
            albedo: [1.0, 0.0, 0.0],
        }
    }
}

impl Material {
    /// Create a new material with just a name, everything else default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emissive_color.length_squared() > 0.0
    }
}

/// Stable handle of a material inside its [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

impl MaterialId {
    /// Position of the material in [`Scene::materials`].
    pub fn index(self) -> usize {
        self.0
    }
}

/// A point light.
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,

    /// RGB intensity
    pub intensity: Vec3,
}

impl Light {
    pub fn new(position: Vec3, intensity: Vec3) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// A triangle with a material and optional per-vertex shading normals.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub polygon: Triangle,

    pub material: MaterialId,

    /// Unit normals for vertices 0, 1, 2, when the source file supplied them
    pub normals: Option<[Vec3; 3]>,
}

impl Object {
    pub fn new(polygon: Triangle, material: MaterialId) -> Self {
        Self {
            polygon,
            material,
            normals: None,
        }
    }

    /// Attach per-vertex normals for smooth shading.
    pub fn with_normals(mut self, normals: [Vec3; 3]) -> Self {
        self.normals = Some(normals);
        self
    }
}

/// A sphere with a material.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereObject {
    pub sphere: Sphere,

    pub material: MaterialId,
}

impl SphereObject {
    pub fn new(sphere: Sphere, material: MaterialId) -> Self {
        Self { sphere, material }
    }
}

/// A complete scene: triangles, spheres, lights and the materials they use.
///
/// The scene is the sole owner of material storage. Every [`MaterialId`]
/// stored in an object was handed out by [`Scene::add_material`] of the same
/// scene, which keeps [`Scene::material`] infallible.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    objects: Vec<Object>,
    sphere_objects: Vec<SphereObject>,
    lights: Vec<Light>,
    materials: Vec<Material>,
    material_ids: HashMap<String, MaterialId>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a material and return its handle.
    ///
    /// A material with an already known name replaces the old definition in
    /// place and keeps its handle.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        if let Some(&id) = self.material_ids.get(&material.name) {
            log::warn!("Material '{}' redefined, keeping the last definition", material.name);
            self.materials[id.0] = material;
            return id;
        }

        let id = MaterialId(self.materials.len());
        self.material_ids.insert(material.name.clone(), id);
        self.materials.push(material);
        id
    }

    /// Add a triangle object.
    pub fn add_object(&mut self, object: Object) {
        debug_assert!(object.material.0 < self.materials.len());
        self.objects.push(object);
    }

    /// Add a sphere object.
    pub fn add_sphere(&mut self, sphere: SphereObject) {
        debug_assert!(sphere.material.0 < self.materials.len());
        self.sphere_objects.push(sphere);
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Get a material by handle.
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    /// Look up a material handle by name.
    pub fn material_id(&self, name: &str) -> Option<MaterialId> {
        self.material_ids.get(name).copied()
    }

    /// Look up a material by name.
    pub fn material_by_name(&self, name: &str) -> Option<&Material> {
        self.material_id(name).map(|id| self.material(id))
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn sphere_objects(&self) -> &[SphereObject] {
        &self.sphere_objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Total number of renderable primitives (triangles and spheres).
    pub fn primitive_count(&self) -> usize {
        self.objects.len() + self.sphere_objects.len()
    }
}
