use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::KeyCode,
    window::{Window, WindowAttributes},
};

use crate::{
    assets::{LoadCompletion, ModelLoader, ModelRequest},
    choreo::{
        driver::{AnimationDriver, DriverHandle},
        entity::AnimatedEntity,
        timeline::ScriptedTimeline,
        toggle::{AudioToggle, AudioTransport, NullAudio},
    },
    gfx::{
        camera::{CameraController, CameraRig, OrbitCamera},
        rendering::RenderEngine,
        scene::{Object, ObjectGeometry, Scene},
    },
};

/// The application shell: owns the scene, the animation driver, the
/// timeline and the audio toggle, and runs them from winit's event loop.
pub struct CaperApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    driver: AnimationDriver,
    driver_handle: DriverHandle,
    timeline: Option<ScriptedTimeline>,
    audio: AudioToggle,
    audio_key: Option<KeyCode>,
    loader: ModelLoader,
    title: String,
}

impl CaperApp {
    /// Creates an application with a default orbit camera; reconfigure
    /// the scene, driver and timeline before calling [`run`](Self::run).
    pub async fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let camera = OrbitCamera::new(8.0, 0.4, 0.2, cgmath::Vector3::new(0.0, 0.0, 0.0), 1.0);
        let controller = CameraController::new(0.005, 0.1);
        let scene = Scene::new(CameraRig::orbit(camera, controller));

        let driver = AnimationDriver::new();
        let driver_handle = driver.handle();

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                scene,
                driver,
                driver_handle,
                timeline: None,
                audio: AudioToggle::new(Box::new(NullAudio)),
                audio_key: None,
                loader: ModelLoader::new(),
                title: "caper".to_string(),
            },
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.app_state.title = title.into();
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app_state.scene
    }

    /// Replaces the camera rig (the default is an orbit rig).
    pub fn set_camera(&mut self, rig: CameraRig) {
        self.app_state.scene.camera = rig;
    }

    pub fn driver_mut(&mut self) -> &mut AnimationDriver {
        &mut self.app_state.driver
    }

    /// Handle for stopping the frame loop from outside the event loop.
    pub fn driver_handle(&self) -> DriverHandle {
        self.app_state.driver_handle.clone()
    }

    /// Installs the one-shot camera timeline. It is triggered once the
    /// window exists; the trigger latch makes repeat signals harmless.
    pub fn set_timeline(&mut self, timeline: ScriptedTimeline) {
        self.app_state.timeline = Some(timeline);
    }

    /// Wires an audio transport to a keyboard toggle.
    pub fn set_audio(&mut self, transport: Box<dyn AudioTransport>, key: KeyCode) {
        self.app_state.audio = AudioToggle::new(transport);
        self.app_state.audio_key = Some(key);
    }

    /// Queues an asynchronous model load. Completions are instantiated
    /// into the scene (and their entities registered) between frames.
    pub fn load_model(&mut self, request: ModelRequest) {
        self.app_state.loader.begin_load(request);
    }

    /// Runs the application (consumes self and starts the event loop).
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl AppState {
    /// Instantiates finished loads: one scene object per placement, with
    /// its entity (if any) registered into the requested group. Errors
    /// are logged and skipped; the scene runs on without that model.
    fn drain_load_completions(&mut self) {
        for LoadCompletion { request, result } in self.loader.poll() {
            let model = match result {
                Ok(model) => model,
                Err(error) => {
                    log::warn!("{}", error);
                    continue;
                }
            };

            let ModelRequest { path, placements } = request;
            log::info!(
                "model '{}' loaded; placing {} instance(s)",
                path.display(),
                placements.len()
            );

            for placement in placements {
                let meshes = model
                    .meshes
                    .iter()
                    .map(|mesh| mesh.clone_geometry())
                    .collect();

                let mut object = Object::new(placement.name.clone(), ObjectGeometry::Meshes(meshes))
                    .with_color(placement.color);
                object.transform.position = placement.position;
                object.transform.rotation = placement.rotation;
                object.transform.scale =
                    cgmath::Vector3::new(placement.scale, placement.scale, placement.scale);
                let handle = self.scene.add_object(object);

                if let Some(recipe) = placement.recipe {
                    self.driver.group(&recipe.group).register(
                        AnimatedEntity::new(placement.name, handle, recipe.kind),
                        recipe.time_scale,
                    );
                }
            }
        }
    }

    fn redraw(&mut self) {
        if self.render_engine.is_none() {
            return;
        }

        // New entities join their groups at a tick boundary, never mid-frame
        self.drain_load_completions();

        // Transport events (end of stream, position updates) land before
        // the tick so entities read this frame's state, not last frame's
        self.audio.poll_transport();

        let tick = self.driver.tick(&mut self.scene, self.audio.state());

        if let Some(timeline) = self.timeline.as_mut() {
            if let Some(camera) = self.scene.camera.flythrough_mut() {
                timeline.advance(tick.delta, camera);
            }
        }

        self.scene.update();

        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        render_engine.update(self.scene.camera.uniform());

        self.scene
            .init_gpu_resources(render_engine.device(), render_engine.object_layout());
        self.scene.update_all_transforms(render_engine.queue());

        render_engine.render_frame(&self.scene);
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title(self.title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();
            self.scene.camera.resize_projection(width, height);

            let window_clone = window_handle.clone();
            let renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height).await
            });

            self.scene
                .init_gpu_resources(renderer.device(), renderer.object_layout());
            self.render_engine = Some(renderer);

            // The window-ready signal is the page-load analog; the latch
            // makes any later re-trigger a no-op.
            if let Some(timeline) = self.timeline.as_mut() {
                timeline.trigger();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.scene.camera.process_keyboard_event(&event);

                if let winit::keyboard::PhysicalKey::Code(key_code) = event.physical_key {
                    if matches!(key_code, KeyCode::Escape) {
                        self.driver_handle.cancel();
                        event_loop.exit();
                    } else if self.audio_key == Some(key_code)
                        && event.state == ElementState::Pressed
                        && !event.repeat
                    {
                        self.audio.toggle();
                    }
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                // Projection first, then the surface, before the next frame
                self.scene.camera.resize_projection(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                self.driver_handle.cancel();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        self.scene.camera.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // A cancelled driver stops the frame loop: no further redraws are
        // scheduled once the handle is cancelled.
        if self.driver_handle.is_cancelled() {
            return;
        }
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
