//! Scene container: camera rig, ordered objects, clear color.

use wgpu::Device;

use crate::gfx::camera::CameraRig;

use super::object::Object;

/// Stable handle to an object in a [`Scene`].
///
/// Objects are never removed, so an index is a valid lifetime-long handle.
/// Animated entities store these and look their object up every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub(crate) usize);

/// Main scene containing the camera rig and all drawable objects.
///
/// Constructed once at startup and passed explicitly to the driver and the
/// renderer; there is no global scene state.
pub struct Scene {
    pub camera: CameraRig,
    pub clear_color: wgpu::Color,
    objects: Vec<Object>,
}

impl Scene {
    pub fn new(camera: CameraRig) -> Self {
        Self {
            camera,
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.2,
                b: 0.3,
                a: 1.0,
            },
            objects: Vec::new(),
        }
    }

    /// Background clear color from 8-bit sRGB components.
    pub fn set_clear_color_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.clear_color = wgpu::Color {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        };
    }

    /// Adds an object, de-duplicating its name, and returns its handle.
    pub fn add_object(&mut self, mut object: Object) -> ObjectHandle {
        object.name = self.ensure_unique_name(&object.name);
        let handle = ObjectHandle(self.objects.len());
        self.objects.push(object);
        handle
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&Object> {
        self.objects.get(handle.0)
    }

    pub fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut Object> {
        self.objects.get_mut(handle.0)
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Per-frame camera refresh (view-projection matrix recompute).
    pub fn update(&mut self) {
        self.camera.update_view_proj();
    }

    /// Uploads buffers for any object that does not have them yet.
    ///
    /// Safe to call every frame: already-initialized objects are skipped.
    /// Needed because objects keep arriving as asset loads complete.
    pub fn init_gpu_resources(&mut self, device: &Device, layout: &wgpu::BindGroupLayout) {
        for object in self.objects.iter_mut() {
            if object.bind_group().is_none() {
                object.init_gpu_resources(device, layout);
            }
        }
    }

    /// Syncs every visible object's transform to the GPU.
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.visible {
                object.update_transform(queue);
            }
        }
    }

    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::FlythroughCamera;
    use crate::gfx::scene::object::ObjectGeometry;

    fn empty_scene() -> Scene {
        Scene::new(CameraRig::Flythrough(FlythroughCamera::new(
            cgmath::Vector3::new(0.0, 0.0, 4.0),
            cgmath::Vector3::new(0.0, 0.0, 0.0),
            1.0,
        )))
    }

    #[test]
    fn test_handles_resolve_in_insertion_order() {
        let mut scene = empty_scene();
        let a = scene.add_object(Object::new("a", ObjectGeometry::Meshes(Vec::new())));
        let b = scene.add_object(Object::new("b", ObjectGeometry::Meshes(Vec::new())));
        assert_eq!(scene.object(a).unwrap().name, "a");
        assert_eq!(scene.object(b).unwrap().name, "b");
        assert_eq!(scene.object_count(), 2);
    }

    #[test]
    fn test_duplicate_names_are_suffixed() {
        let mut scene = empty_scene();
        scene.add_object(Object::new("fox", ObjectGeometry::Meshes(Vec::new())));
        let second = scene.add_object(Object::new("fox", ObjectGeometry::Meshes(Vec::new())));
        assert_eq!(scene.object(second).unwrap().name, "fox (1)");
    }
}
