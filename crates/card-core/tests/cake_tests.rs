// Host-side tests for the cake model, its animation and the camera.

use card_core::cake::descriptors::{DECOR_COUNT, LETTERING};
use card_core::cake::mesh::{unit_cube, unit_cylinder, unit_sphere};
use card_core::cake::*;
use card_core::{Camera, Lighting, CAKE_EYE, CAKE_WGSL};
use glam::{Vec3, Vec4};

fn count(parts: &[CakePart], role: Role) -> usize {
    parts.iter().filter(|p| p.role == role).count()
}

#[test]
fn unit_meshes_are_triangle_lists_with_unit_normals() {
    let meshes = [
        (unit_cylinder(32), 32 * 12),
        (unit_sphere(10, 16), 10 * 16 * 6),
        (unit_cube(), 36),
    ];
    for (verts, expected) in meshes {
        assert_eq!(verts.len(), expected);
        assert_eq!(verts.len() % 3, 0);
        for v in &verts {
            let n = Vec3::from(v.normal).length();
            assert!((n - 1.0).abs() < 1e-4, "normal length {n}");
        }
    }
}

#[test]
fn unit_meshes_fit_their_nominal_bounds() {
    for v in unit_cylinder(24) {
        let [x, y, z] = v.position;
        assert!((x * x + z * z).sqrt() <= 1.0 + 1e-5);
        assert!(y.abs() <= 0.5 + 1e-6);
    }
    for v in unit_sphere(8, 12) {
        assert!((Vec3::from(v.position).length() - 1.0).abs() < 1e-4);
    }
    for v in unit_cube() {
        assert!(v.position.iter().all(|c| c.abs() <= 0.5 + 1e-6));
    }
}

#[test]
fn mesh_kinds_build_their_default_resolution() {
    assert_eq!(MeshKind::Cylinder.build().len(), unit_cylinder(32).len());
    assert_eq!(MeshKind::Sphere.build().len(), unit_sphere(10, 16).len());
    assert_eq!(MeshKind::Cube.build().len(), 36);
}

#[test]
fn cake_is_assembled_from_every_descriptor() {
    let parts = build_cake();
    assert_eq!(parts.len(), 1 + 3 + 3 + LETTERING.len() + 1 + 1 + DECOR_COUNT);
    assert_eq!(count(&parts, Role::Plate), 1);
    assert_eq!(count(&parts, Role::Layer), 3);
    assert_eq!(count(&parts, Role::Cream), 3);
    assert_eq!(count(&parts, Role::Lettering), 24);
    assert_eq!(count(&parts, Role::Candle), 1);
    assert_eq!(count(&parts, Role::Flame), 1);
    assert_eq!(count(&parts, Role::Decoration), 16);
}

#[test]
fn lettering_sits_on_the_front_of_the_cake() {
    let parts = build_cake();
    for p in parts.iter().filter(|p| p.role == Role::Lettering) {
        assert!(p.local.w_axis.z > 3.0);
        assert_eq!(p.kind, MeshKind::Cube);
    }
}

#[test]
fn layers_shrink_toward_the_top() {
    let parts = build_cake();
    let layers: Vec<_> = parts.iter().filter(|p| p.role == Role::Layer).collect();
    for pair in layers.windows(2) {
        assert!(pair[0].local.x_axis.x > pair[1].local.x_axis.x);
        assert!(pair[0].local.w_axis.y < pair[1].local.w_axis.y);
    }
}

#[test]
fn flame_is_hidden_until_shown() {
    let mut scene = CakeScene::new(1);
    scene.tick(0.0);
    assert!(!scene.flame_visible());
    // every part except the flame
    let parts = build_cake().len();
    assert_eq!(parts, 49);
    let hidden = scene.instances();
    assert_eq!(hidden.len(), parts - 1);
    assert!(hidden.iter().all(|i| !i.unlit));

    scene.show_flame();
    let lit = scene.instances();
    assert_eq!(lit.len(), parts);
    let flame = lit.last().expect("flame instance");
    assert!(flame.unlit);
    assert!((flame.color[3] - 0.9).abs() < 1e-6);

    scene.hide_flame();
    assert_eq!(scene.instances().len(), parts - 1);
}

#[test]
fn translucent_instances_come_after_opaque_ones() {
    let mut scene = CakeScene::new(2);
    scene.show_flame();
    scene.tick(0.0);
    scene.create_smoke();
    scene.tick(300.0);
    let list = scene.instances();
    let first_translucent = list
        .iter()
        .position(|i| i.is_translucent())
        .expect("flame and smoke are translucent");
    assert!(list[first_translucent..].iter().all(|i| i.is_translucent()));
    let opaque = &list[..first_translucent];
    assert!(opaque.windows(2).all(|w| w[0].mesh <= w[1].mesh));
}

#[test]
fn translucent_instances_are_drawn_back_to_front() {
    let mut scene = CakeScene::new(6);
    scene.show_flame();
    scene.tick(0.0);
    scene.create_smoke();
    scene.tick(900.0);

    let list = scene.instances();
    let depths: Vec<f32> = list
        .iter()
        .filter(|i| i.is_translucent())
        .map(|i| i.distance_to(CAKE_EYE))
        .collect();
    assert!(depths.len() > 1);
    assert!(depths.windows(2).all(|w| w[0] >= w[1]));

    // a viewer on the far side gets the reverse order
    let behind = Vec3::new(-1.5, 3.0, -9.0);
    let list = scene.instances_seen_from(behind);
    let depths: Vec<f32> = list
        .iter()
        .filter(|i| i.is_translucent())
        .map(|i| i.distance_to(behind))
        .collect();
    assert!(depths.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn smoke_rises_and_expires() {
    let mut scene = CakeScene::new(3);
    scene.tick(1000.0);
    scene.create_smoke();
    assert_eq!(scene.smoke().len(), 8);

    // every puff is born within 250ms of the blow
    scene.tick(1300.0);
    let puffs = scene.instances().iter().filter(|i| i.unlit).count();
    assert_eq!(puffs, 8);

    scene.tick(3100.0);
    assert!(scene.smoke().is_empty());
    assert!(scene.instances().iter().all(|i| !i.unlit));
}

#[test]
fn rotation_is_time_based() {
    let mut scene = CakeScene::new(4);
    for i in 0..=60 {
        scene.tick(i as f64 * 1000.0 / 60.0);
    }
    assert!((scene.rotation_y() - 0.3).abs() < 1e-3);

    // a long stall (hidden tab) only advances one clamped step
    let mut stalled = CakeScene::new(4);
    stalled.tick(0.0);
    stalled.tick(10_000.0);
    assert!((stalled.rotation_y() - 0.03).abs() < 1e-6);
}

#[test]
fn camera_looks_at_the_cake_center() {
    let cam = Camera::cake(1.0);
    let clip = cam.view_projection() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-5);
    assert!(ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);

    let light = Lighting::default();
    assert_eq!(light.ambient, 0.6);
    assert_eq!(light.directional, 0.8);
}

#[test]
fn shader_exposes_both_entry_points() {
    assert!(CAKE_WGSL.contains("fn vs_main"));
    assert!(CAKE_WGSL.contains("fn fs_main"));
}
