use super::SceneCore;

pub(super) fn positions_ptr(scene: &SceneCore) -> *const f32 {
    scene.cloth.surface().positions_ptr()
}

pub(super) fn positions_len(scene: &SceneCore) -> usize {
    scene.cloth.surface().positions().len()
}

pub(super) fn normals_ptr(scene: &SceneCore) -> *const f32 {
    scene.cloth.surface().normals_ptr()
}

pub(super) fn normals_len(scene: &SceneCore) -> usize {
    scene.cloth.surface().normals().len()
}

pub(super) fn indices_ptr(scene: &SceneCore) -> *const u32 {
    scene.cloth.surface().indices_ptr()
}

pub(super) fn indices_len(scene: &SceneCore) -> usize {
    scene.cloth.surface().indices().len()
}

pub(super) fn take_surface_dirty(scene: &mut SceneCore) -> bool {
    scene.cloth.surface_mut().take_needs_update()
}

pub(super) fn sphere_transform(scene: &SceneCore) -> Option<[f32; 4]> {
    let sphere = scene.sphere.as_ref()?;
    let p = sphere.position(&scene.physics)?;
    Some([p.x, p.y, p.z, sphere.radius()])
}

pub(super) fn ground_transform(scene: &SceneCore) -> Option<[f32; 5]> {
    let ground = scene.ground.as_ref()?;
    let p = ground.position();
    Some([p.x, p.y, p.z, ground.rotation_x(), ground.size()])
}
