//! Application shell: window, event loop and the per-frame tick
//!
//! [`MaquetteApp`] owns everything and drives the frame sequence: poll the
//! asset loader, advance the motion animator, update the camera, sync GPU
//! state and render with the UI overlay.

use cgmath::Vector3;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::animation::{MotionAnimator, MotionProfile};
use crate::assets::AssetLoader;
use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager, orbit_camera::OrbitCamera,
    },
    rendering::render_engine::RenderEngine,
    scene::{ObjectBuilder, ObjectHandle, Scene},
};
use crate::ui::{panel, UiManager};

/// Custom UI callback; replaces the default panels when set
pub type UiCallback =
    Box<dyn FnMut(&imgui::Ui, &mut Scene, &mut MotionAnimator, &mut Option<usize>)>;

pub struct MaquetteApp {
    event_loop: Option<EventLoop<()>>,
    pub app_state: AppState,
    ui_callback: Option<UiCallback>,
}

pub struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    pub scene: Scene,
    pub animator: MotionAnimator,
    pub loader: AssetLoader,
    ui_callback: Option<UiCallback>,
    selected_object: Option<usize>,
    last_frame: Option<Instant>,
    animation_clock: f32,
}

impl MaquetteApp {
    /// Create a new application with default settings
    pub fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let camera = OrbitCamera::new(12.0, 0.5, 0.6, Vector3::new(0.0, 0.0, 0.0), 1.5);
        let controller = CameraController::new(0.005, 0.5);

        let camera_manager = CameraManager::new(camera, controller);
        let scene = Scene::new(camera_manager);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                animator: MotionAnimator::new(),
                loader: AssetLoader::new(),
                ui_callback: None,
                selected_object: None,
                last_frame: None,
                animation_clock: 0.0,
            },
            ui_callback: None,
        }
    }

    /// Replace the default panels with a custom UI callback
    pub fn set_ui<F>(&mut self, ui_fn: F)
    where
        F: FnMut(&imgui::Ui, &mut Scene, &mut MotionAnimator, &mut Option<usize>) + 'static,
    {
        self.ui_callback = Some(Box::new(ui_fn));
    }

    /// Place the camera at an absolute eye position looking at a target
    pub fn look_from(&mut self, eye: [f32; 3], target: [f32; 3]) {
        let aspect = self.app_state.scene.camera_manager.camera.aspect;
        self.app_state.scene.camera_manager.camera =
            OrbitCamera::looking_from(Vector3::from(eye), Vector3::from(target), aspect);
    }

    // Scene building delegates, mirroring the Scene builder API

    pub fn add_box(&mut self, width: f32, height: f32, depth: f32) -> ObjectBuilder<'_> {
        self.app_state.scene.add_box(width, height, depth)
    }

    pub fn add_cube(&mut self) -> ObjectBuilder<'_> {
        self.app_state.scene.add_cube()
    }

    pub fn add_plane(
        &mut self,
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    ) -> ObjectBuilder<'_> {
        self.app_state
            .scene
            .add_plane(width, height, width_segments, height_segments)
    }

    pub fn add_sphere(
        &mut self,
        radius: f32,
        longitude_segments: u32,
        latitude_segments: u32,
    ) -> ObjectBuilder<'_> {
        self.app_state
            .scene
            .add_sphere(radius, longitude_segments, latitude_segments)
    }

    pub fn add_cylinder(&mut self, radius: f32, height: f32, segments: u32) -> ObjectBuilder<'_> {
        self.app_state.scene.add_cylinder(radius, height, segments)
    }

    /// Registers an object with the motion animator
    pub fn track(&mut self, target: ObjectHandle, profile: MotionProfile) {
        self.app_state.animator.track(target, profile);
    }

    /// Requests a model file; see [`AssetLoader::request_model`]
    pub fn load_model<F>(&mut self, path: &str, callback: F)
    where
        F: FnOnce(&mut Scene, &mut MotionAnimator, &crate::assets::ModelData) + 'static,
    {
        self.app_state.loader.request_model(path, callback);
    }

    /// Requests an image file and registers it as a named texture
    pub fn load_texture(&mut self, path: &str, texture_name: &str) {
        self.app_state.loader.request_texture(path, texture_name);
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) {
        self.app_state.ui_callback = self.ui_callback.take();

        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl Default for MaquetteApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("maquette")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();
            self.scene
                .camera_manager
                .camera
                .resize_projection(width, height);

            let window_clone = window_handle.clone();
            let renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height).await
            });

            let ui_manager = UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            );

            self.ui_manager = Some(ui_manager);
            self.render_engine = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // UI gets first refusal on input events
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        ..
                    },
                ..
            } => {
                if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                    event_loop.exit();
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.scene
                    .camera_manager
                    .controller
                    .set_shift_held(modifiers.state().shift_key());
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.tick(&window);
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

        // Don't move the camera while the UI owns the pointer
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_input() {
                return;
            }
        }

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

impl AppState {
    /// One frame: poll assets, advance motion, build UI, sync GPU, draw
    fn tick(&mut self, window: &Arc<Window>) {
        if self.render_engine.is_none() {
            return;
        }

        let now = Instant::now();
        let delta = self
            .last_frame
            .map(|last| (now - last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);

        // Finished loads instantiate objects and register animator entries
        // here, between ticks
        self.loader.poll(&mut self.scene, &mut self.animator);

        if self.animator.is_running() {
            self.animation_clock += delta;
            self.animator.advance(self.animation_clock, &mut self.scene);
        }

        // Build this frame's UI (it may edit scene and animator state)
        let mut ui_drawn = false;
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let scene = &mut self.scene;
            let animator = &mut self.animator;
            let selected = &mut self.selected_object;
            let clock = self.animation_clock;

            if let Some(callback) = self.ui_callback.as_mut() {
                ui_manager.update_logic(window, |ui| {
                    callback(ui, scene, animator, selected);
                });
            } else {
                ui_manager.update_logic(window, |ui| {
                    panel::default_scene_panel(ui, scene, selected);
                    panel::animation_panel(ui, animator, clock);
                });
            }
            ui_drawn = true;
        }

        self.scene.update();

        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        render_engine.update(self.scene.camera_manager.camera.uniform, &self.scene.lighting);
        self.scene
            .flush_gpu(render_engine.device(), render_engine.queue());

        if ui_drawn {
            let ui_manager = self.ui_manager.as_mut().unwrap();
            render_engine.render_frame(
                &self.scene,
                Some(|device: &wgpu::Device,
                      queue: &wgpu::Queue,
                      encoder: &mut wgpu::CommandEncoder,
                      view: &wgpu::TextureView| {
                    ui_manager.render_display_only(device, queue, encoder, view);
                }),
            );
        } else {
            render_engine.render_frame_simple(&self.scene);
        }
    }
}
