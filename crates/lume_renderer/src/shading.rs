//! Recursive Whitted illumination.

use lume_core::Scene;
use lume_math::{Ray, Vec3};

use crate::hittable::{find_closest_hit, is_light_visible, Hit};
use crate::material::{diffuse_factor, reflect, refract, specular_factor, Color};

/// Offset along the normal used to start secondary rays off the surface.
pub(crate) const SURFACE_BIAS: f64 = 1e-9;

/// Albedo weights at or below this magnitude switch their term off.
const WEIGHT_EPSILON: f64 = 1e-9;

/// Flip `normal` so it faces against `direction`.
#[inline]
pub(crate) fn facing(normal: Vec3, direction: Vec3) -> Vec3 {
    if normal.dot(direction) > 0.0 {
        -normal
    } else {
        normal
    }
}

/// Radiance leaving `hit` back along `ray`.
///
/// `depth` is the number of reflection/refraction bounces still allowed and
/// `inside` tells whether `ray` travels through the interior of a dielectric.
/// Reflection is skipped while inside. Refraction toggles `inside` for the
/// continuation ray.
pub fn shade(scene: &Scene, ray: &Ray, hit: &Hit<'_>, depth: u32, inside: bool) -> Color {
    let material = scene.material(hit.primitive.material());
    let position = hit.intersection.position;
    let normal = facing(hit.primitive.shading_normal(&hit.intersection), ray.direction());
    let outside_point = position + SURFACE_BIAS * normal;

    let mut radiance = material.ambient_color + material.emissive_color;

    for light in scene.lights() {
        if !is_light_visible(scene, outside_point, light) {
            continue;
        }

        let to_light = (light.position - position).normalize();
        let diffuse = diffuse_factor(normal, to_light);
        let specular = specular_factor(ray.direction(), normal, to_light, material.specular_exponent);

        radiance += material.diffuse_color * light.intensity * diffuse * material.albedo[0];
        radiance += material.specular_color * light.intensity * specular * material.albedo[0];
    }

    if depth == 0 {
        return radiance;
    }

    if material.albedo[1].abs() > WEIGHT_EPSILON && !inside {
        let reflected = Ray::new(outside_point, reflect(ray.direction(), normal));
        if let Some(child) = find_closest_hit(scene, &reflected) {
            radiance += material.albedo[1] * shade(scene, &reflected, &child, depth - 1, inside);
        }
    }

    if material.albedo[2].abs() > WEIGHT_EPSILON {
        let eta = if inside {
            material.refraction_index
        } else {
            1.0 / material.refraction_index
        };

        if let Some(direction) = refract(ray.direction(), normal, eta) {
            let refracted = Ray::new(position - SURFACE_BIAS * normal, direction);
            if let Some(child) = find_closest_hit(scene, &refracted) {
                let weight = if inside { 1.0 } else { material.albedo[2] };
                radiance += weight * shade(scene, &refracted, &child, depth - 1, !inside);
            }
        }
    }

    radiance
}

#[cfg(test)]
mod tests {
    use super::*;
    use lume_core::{Light, Material, Object, SphereObject};
    use lume_math::{Sphere, Triangle};

    const EPS: f64 = 1e-9;

    /// A large floor quad at y = 0 facing up.
    fn add_floor(scene: &mut Scene, material: Material) {
        let id = scene.add_material(material);
        let a = Vec3::new(-10.0, 0.0, -10.0);
        let b = Vec3::new(10.0, 0.0, -10.0);
        let c = Vec3::new(10.0, 0.0, 10.0);
        let d = Vec3::new(-10.0, 0.0, 10.0);
        scene.add_object(Object::new(Triangle::new(a, d, c), id));
        scene.add_object(Object::new(Triangle::new(a, c, b), id));
    }

    fn primary(scene: &Scene, ray: &Ray, depth: u32) -> Color {
        let hit = find_closest_hit(scene, ray).unwrap();
        shade(scene, ray, &hit, depth, false)
    }

    #[test]
    fn test_facing() {
        assert_eq!(facing(Vec3::Y, -Vec3::Y), Vec3::Y);
        assert_eq!(facing(Vec3::Y, Vec3::Y), -Vec3::Y);
    }

    #[test]
    fn test_ambient_and_emissive() {
        let mut scene = Scene::new("glow");
        add_floor(
            &mut scene,
            Material {
                ambient_color: Vec3::new(0.1, 0.2, 0.3),
                emissive_color: Vec3::new(1.0, 0.0, 0.0),
                ..Material::new("glow")
            },
        );

        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let color = primary(&scene, &ray, 0);
        assert!((color - Vec3::new(1.1, 0.2, 0.3)).length() < EPS);
    }

    #[test]
    fn test_direct_diffuse() {
        let mut scene = Scene::new("lit");
        add_floor(
            &mut scene,
            Material {
                diffuse_color: Vec3::new(0.5, 0.5, 0.5),
                albedo: [0.8, 0.0, 0.0],
                ..Material::new("floor")
            },
        );
        scene.add_light(Light::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 0.5, 0.0)));

        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let color = primary(&scene, &ray, 0);

        // Kd * I * cos(0) * albedo[0]; Ks is zero
        assert!((color - Vec3::new(0.4, 0.2, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_shadowed_light_contributes_nothing() {
        let mut scene = Scene::new("shadow");
        add_floor(
            &mut scene,
            Material {
                diffuse_color: Vec3::ONE,
                ..Material::new("floor")
            },
        );
        let blocker = scene.add_material(Material::new("blocker"));
        scene.add_sphere(SphereObject::new(Sphere::new(Vec3::new(0.0, 3.0, 0.0), 0.5), blocker));
        scene.add_light(Light::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ONE));

        let ray = Ray::new(Vec3::new(1.0, 1.0, 0.0), Vec3::new(-1.0, -1.0, 0.0));
        let color = primary(&scene, &ray, 0);
        assert!(color.length() < EPS);
    }

    #[test]
    fn test_mirror_reflection() {
        let mut scene = Scene::new("mirror");
        add_floor(
            &mut scene,
            Material {
                albedo: [0.0, 0.5, 0.0],
                ..Material::new("mirror")
            },
        );
        let glow = scene.add_material(Material {
            emissive_color: Vec3::new(0.0, 1.0, 0.0),
            ..Material::new("glow")
        });
        scene.add_sphere(SphereObject::new(Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0), glow));

        let ray = Ray::new(Vec3::new(1.0, 1.0, 0.0), Vec3::new(-1.0, -1.0, 0.0));

        // Reflected ray goes up and to the left, missing the sphere on the y axis
        assert!(primary(&scene, &ray, 3).length() < EPS);

        let down = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let reflected = primary(&scene, &down, 3);
        assert!((reflected - Vec3::new(0.0, 0.5, 0.0)).length() < EPS);

        // No bounces left
        assert!(primary(&scene, &down, 0).length() < EPS);
    }

    #[test]
    fn test_no_reflection_inside_dielectric() {
        let mut scene = Scene::new("mirror");
        add_floor(
            &mut scene,
            Material {
                albedo: [0.0, 1.0, 0.0],
                ..Material::new("mirror")
            },
        );
        let glow = scene.add_material(Material {
            emissive_color: Vec3::ONE,
            ..Material::new("glow")
        });
        scene.add_sphere(SphereObject::new(Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0), glow));

        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let hit = find_closest_hit(&scene, &ray).unwrap();

        assert!((shade(&scene, &ray, &hit, 2, false) - Vec3::ONE).length() < EPS);
        assert!(shade(&scene, &ray, &hit, 2, true).length() < EPS);
    }

    #[test]
    fn test_reflected_hits_are_shaded_outside() {
        let mut scene = Scene::new("facing mirrors");
        add_floor(
            &mut scene,
            Material {
                ambient_color: Vec3::splat(0.2),
                albedo: [0.0, 1.0, 0.0],
                ..Material::new("floor")
            },
        );
        let ball = scene.add_material(Material {
            albedo: [0.0, 1.0, 0.0],
            ..Material::new("ball")
        });
        scene.add_sphere(SphereObject::new(Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0), ball));

        // floor -> ball -> floor again, so the floor's ambient is counted twice
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y);
        assert!((primary(&scene, &ray, 3) - Vec3::splat(0.4)).length() < EPS);
    }

    #[test]
    fn test_specular_weighted_by_direct_albedo() {
        let specular_color = Vec3::new(1.0, 0.5, 0.25);
        let intensity = Vec3::new(0.5, 1.0, 1.0);

        let shade_with = |weight: f64| {
            let mut scene = Scene::new("highlight");
            add_floor(
                &mut scene,
                Material {
                    specular_color,
                    specular_exponent: 8.0,
                    albedo: [weight, 0.0, 0.0],
                    ..Material::new("glossy")
                },
            );
            // Light sits on the mirror direction of the view ray
            scene.add_light(Light::new(Vec3::new(2.0, 2.0, 0.5), intensity));

            let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.5), Vec3::new(1.0, -1.0, 0.0));
            primary(&scene, &ray, 0)
        };

        for weight in [0.8, 0.3] {
            let expected = specular_color * intensity * weight;
            assert!((shade_with(weight) - expected).length() < 1e-6, "albedo[0] = {weight}");
        }
        assert!(shade_with(0.0).length() < EPS);
    }

    #[test]
    fn test_refraction_through_glass_sphere() {
        let mut scene = Scene::new("glass");
        let glass = scene.add_material(Material {
            refraction_index: 1.5,
            albedo: [0.0, 0.0, 0.5],
            ..Material::new("glass")
        });
        scene.add_sphere(SphereObject::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0), glass));
        let backdrop = scene.add_material(Material {
            ambient_color: Vec3::ONE,
            ..Material::new("backdrop")
        });
        scene.add_object(Object::new(
            Triangle::new(
                Vec3::new(-10.0, -10.0, -20.0),
                Vec3::new(10.0, -10.0, -20.0),
                Vec3::new(0.0, 10.0, -20.0),
            ),
            backdrop,
        ));

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);

        // Enter (weight 0.5), exit (weight 1), reach the backdrop
        let color = primary(&scene, &ray, 2);
        assert!((color - Vec3::splat(0.5)).length() < 1e-6);

        // One bounce only reaches the inner wall of the sphere
        assert!(primary(&scene, &ray, 1).length() < EPS);
    }

    #[test]
    fn test_total_internal_reflection_drops_refraction() {
        let mut scene = Scene::new("tir");
        add_floor(
            &mut scene,
            Material {
                refraction_index: 1.5,
                albedo: [0.0, 0.0, 1.0],
                ..Material::new("glass")
            },
        );
        let backdrop = scene.add_material(Material {
            ambient_color: Vec3::ONE,
            ..Material::new("backdrop")
        });
        scene.add_object(Object::new(
            Triangle::new(
                Vec3::new(-100.0, -5.0, -100.0),
                Vec3::new(0.0, -5.0, 100.0),
                Vec3::new(100.0, -5.0, -100.0),
            ),
            backdrop,
        ));

        // Travelling inside the glass toward the floor surface
        let shade_at = |degrees: f64| {
            let angle = degrees.to_radians();
            let ray = Ray::new(
                Vec3::new(-angle.tan(), 1.0, 0.0),
                Vec3::new(angle.sin(), -angle.cos(), 0.0),
            );
            let hit = find_closest_hit(&scene, &ray).unwrap();
            assert_eq!(scene.material(hit.primitive.material()).name, "glass");
            shade(&scene, &ray, &hit, 3, true)
        };

        // Past the ~41.8 degree critical angle nothing gets out
        assert!(shade_at(60.0).length() < EPS);

        // Below it the ray leaves with full weight and sees the backdrop
        assert!((shade_at(30.0) - Vec3::ONE).length() < 1e-6);
    }
}
