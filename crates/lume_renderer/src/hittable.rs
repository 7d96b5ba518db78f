//! Hittable trait, scene primitives and the nearest-hit search.

use lume_core::{Light, MaterialId, Object, Scene, SphereObject};
use lume_math::{Ray, Vec3};

use crate::triangle::barycentric_coords;

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Point of intersection
    pub position: Vec3,
    /// Unit surface normal as reported by the primitive (not flipped toward the ray)
    pub normal: Vec3,
    /// Distance from the ray origin
    pub distance: f64,
}

/// Geometry that can be intersected by a ray.
pub trait Hittable {
    /// Nearest intersection in front of the ray origin, if any.
    fn hit(&self, ray: &Ray) -> Option<Intersection>;
}

/// Which kind of primitive a [`Primitive`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Triangle,
    Sphere,
}

/// A borrowed scene primitive.
#[derive(Debug, Clone, Copy)]
pub enum Primitive<'a> {
    Triangle(&'a Object),
    Sphere(&'a SphereObject),
}

impl<'a> Primitive<'a> {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Triangle(_) => PrimitiveKind::Triangle,
            Primitive::Sphere(_) => PrimitiveKind::Sphere,
        }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Primitive::Triangle(object) => object.polygon.hit(ray),
            Primitive::Sphere(object) => object.sphere.hit(ray),
        }
    }

    pub fn material(&self) -> MaterialId {
        match self {
            Primitive::Triangle(object) => object.material,
            Primitive::Sphere(object) => object.material,
        }
    }

    /// Normal used for lighting at `intersection`.
    ///
    /// Triangles with vertex normals blend them barycentrically. The blend is
    /// not renormalized. Everything else uses the geometric normal.
    pub fn shading_normal(&self, intersection: &Intersection) -> Vec3 {
        match self {
            Primitive::Triangle(Object {
                polygon,
                normals: Some([n0, n1, n2]),
                ..
            }) => {
                let weights = barycentric_coords(polygon, intersection.position);
                weights.x * *n0 + weights.y * *n1 + weights.z * *n2
            }
            _ => intersection.normal,
        }
    }
}

/// The nearest primitive along a ray.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub primitive: Primitive<'a>,
    /// Index into [`Scene::objects`] or [`Scene::sphere_objects`], per kind
    pub index: usize,
    pub intersection: Intersection,
}

impl<'a> Hit<'a> {
    pub fn kind(&self) -> PrimitiveKind {
        self.primitive.kind()
    }
}

/// Every primitive of the scene, triangles first, then spheres.
fn primitives(scene: &Scene) -> impl Iterator<Item = (usize, Primitive<'_>)> {
    let triangles = scene
        .objects()
        .iter()
        .enumerate()
        .map(|(i, object)| (i, Primitive::Triangle(object)));
    let spheres = scene
        .sphere_objects()
        .iter()
        .enumerate()
        .map(|(i, object)| (i, Primitive::Sphere(object)));
    triangles.chain(spheres)
}

/// Find the nearest primitive hit by `ray`.
///
/// Only a strictly smaller distance replaces the current best, so on exact
/// ties the primitive that comes first (triangles before spheres, then scene
/// order) wins.
pub fn find_closest_hit<'a>(scene: &'a Scene, ray: &Ray) -> Option<Hit<'a>> {
    let mut closest: Option<Hit<'a>> = None;

    for (index, primitive) in primitives(scene) {
        let Some(intersection) = primitive.intersect(ray) else {
            continue;
        };
        if closest.map_or(true, |best| intersection.distance < best.intersection.distance) {
            closest = Some(Hit {
                primitive,
                index,
                intersection,
            });
        }
    }

    closest
}

/// Check whether `light` is visible from `point`.
///
/// Any primitive hit strictly closer than the light occludes it. Callers
/// offset `point` off the surface beforehand.
pub fn is_light_visible(scene: &Scene, point: Vec3, light: &Light) -> bool {
    let to_light = light.position - point;
    let light_distance = to_light.length();
    let ray = Ray::new(point, to_light);

    !primitives(scene).any(|(_, primitive)| {
        primitive
            .intersect(&ray)
            .is_some_and(|intersection| intersection.distance < light_distance)
    })
}

/// Distance to the surface seen along `ray` without anything in front of it.
///
/// A hit counts only when no primitive intersects the ray strictly closer,
/// which singles out the nearest hit.
pub fn unoccluded_depth(scene: &Scene, ray: &Ray) -> Option<f64> {
    find_closest_hit(scene, ray).map(|hit| hit.intersection.distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lume_core::Material;
    use lume_math::{Sphere, Triangle};

    fn two_sphere_scene() -> Scene {
        let mut scene = Scene::new("spheres");
        let id = scene.add_material(Material::new("m"));
        scene.add_sphere(SphereObject::new(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0), id));
        scene.add_sphere(SphereObject::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0), id));
        scene
    }

    #[test]
    fn test_closest_hit_picks_nearest() {
        let scene = two_sphere_scene();
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);

        let hit = find_closest_hit(&scene, &ray).unwrap();
        assert_eq!(hit.kind(), PrimitiveKind::Sphere);
        assert_eq!(hit.index, 1);
        assert!((hit.intersection.distance - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_closest_hit_miss() {
        let scene = two_sphere_scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(find_closest_hit(&scene, &ray).is_none());
        assert!(unoccluded_depth(&scene, &ray).is_none());
    }

    #[test]
    fn test_tie_prefers_triangle() {
        let mut scene = Scene::new("tie");
        let id = scene.add_material(Material::new("m"));
        // Sphere touching the triangle plane at the same point
        scene.add_sphere(SphereObject::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0), id));
        scene.add_object(Object::new(
            Triangle::new(
                Vec3::new(-1.0, -1.0, -2.0),
                Vec3::new(1.0, -1.0, -2.0),
                Vec3::new(0.0, 1.0, -2.0),
            ),
            id,
        ));

        let hit = find_closest_hit(&scene, &Ray::new(Vec3::ZERO, -Vec3::Z)).unwrap();
        assert_eq!(hit.kind(), PrimitiveKind::Triangle);
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn test_light_visibility() {
        let scene = two_sphere_scene();
        let behind = Light::new(Vec3::new(0.0, 0.0, -20.0), Vec3::ONE);
        let beside = Light::new(Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
        let between = Light::new(Vec3::new(0.0, 0.0, -7.5), Vec3::ONE);

        assert!(!is_light_visible(&scene, Vec3::ZERO, &behind));
        assert!(is_light_visible(&scene, Vec3::ZERO, &beside));
        assert!(!is_light_visible(&scene, Vec3::ZERO, &between));
        // Blockers beyond the light do not count
        let close = Light::new(Vec3::new(0.0, 0.0, -2.0), Vec3::ONE);
        assert!(is_light_visible(&scene, Vec3::ZERO, &close));
    }

    #[test]
    fn test_unoccluded_depth_is_nearest() {
        let scene = two_sphere_scene();
        let depth = unoccluded_depth(&scene, &Ray::new(Vec3::ZERO, -Vec3::Z)).unwrap();
        assert!((depth - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_shading_normal_interpolation() {
        let mut scene = Scene::new("smooth");
        let id = scene.add_material(Material::new("m"));
        let triangle = Triangle::new(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 4.0, 0.0));
        scene.add_object(Object::new(triangle, id).with_normals([Vec3::Z, Vec3::X, Vec3::Y]));
        scene.add_object(Object::new(triangle, id));

        let intersection = Intersection {
            position: Vec3::new(4.0, 0.0, 0.0),
            normal: Vec3::Z,
            distance: 1.0,
        };

        let smooth = Primitive::Triangle(&scene.objects()[0]);
        assert!((smooth.shading_normal(&intersection) - Vec3::X).length() < 1e-9);

        let flat = Primitive::Triangle(&scene.objects()[1]);
        assert_eq!(flat.shading_normal(&intersection), Vec3::Z);
    }
}
