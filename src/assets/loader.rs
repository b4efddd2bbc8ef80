//! Background asset loading with main-thread completion callbacks
//!
//! Each request spawns a worker thread that decodes the file and sends the
//! result over a channel. [`AssetLoader::poll`] drains the channel from the
//! render loop, so callbacks always run on the main thread between animation
//! ticks, which is the only place the animator registry grows.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::animation::MotionAnimator;
use crate::gfx::scene::Scene;

use super::model::{self, ModelData, TextureData};
use super::AssetError;

/// Runs when a model finished decoding; instantiate it from here
pub type ModelCallback = Box<dyn FnOnce(&mut Scene, &mut MotionAnimator, &ModelData)>;

/// Runs after a texture was registered with the scene
pub type TextureCallback = Box<dyn FnOnce(&mut Scene, &mut MotionAnimator)>;

enum Payload {
    Model(ModelData),
    Texture(TextureData),
}

struct Completed {
    id: u64,
    path: PathBuf,
    payload: Result<Payload, AssetError>,
}

enum Pending {
    Model(ModelCallback),
    Texture {
        name: String,
        callback: Option<TextureCallback>,
    },
}

fn decode(path: &Path) -> Result<Payload, AssetError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "obj" => model::load_obj(path).map(Payload::Model),
        "gltf" | "glb" => model::load_gltf(path).map(Payload::Model),
        "png" | "jpg" | "jpeg" => model::load_texture(path).map(Payload::Texture),
        _ => Err(AssetError::UnsupportedExtension {
            path: path.to_path_buf(),
        }),
    }
}

/// Dispatches load requests to worker threads and delivers completions
pub struct AssetLoader {
    sender: Sender<Completed>,
    receiver: Receiver<Completed>,
    pending: HashMap<u64, Pending>,
    next_id: u64,
}

impl AssetLoader {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            pending: HashMap::new(),
            next_id: 0,
        }
    }

    fn submit(&mut self, path: PathBuf, pending: Pending) {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert(id, pending);

        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let payload = decode(&path);
            // The receiver is gone when the app already shut down; nothing
            // left to do with the result then
            let _ = sender.send(Completed { id, path, payload });
        });
    }

    /// Requests a model file (OBJ or glTF)
    ///
    /// The callback runs on the main thread once decoding finished and may
    /// instantiate the model any number of times and register animator
    /// entries for the resulting handles.
    pub fn request_model<F>(&mut self, path: impl Into<PathBuf>, callback: F)
    where
        F: FnOnce(&mut Scene, &mut MotionAnimator, &ModelData) + 'static,
    {
        let path = path.into();
        log::info!("loading model {}", path.display());
        self.submit(path, Pending::Model(Box::new(callback)));
    }

    /// Requests an image file and registers it as a named texture
    pub fn request_texture(&mut self, path: impl Into<PathBuf>, texture_name: &str) {
        let path = path.into();
        log::info!("loading texture {}", path.display());
        self.submit(
            path,
            Pending::Texture {
                name: texture_name.to_string(),
                callback: None,
            },
        );
    }

    /// Like [`AssetLoader::request_texture`], with a completion callback
    pub fn request_texture_with<F>(
        &mut self,
        path: impl Into<PathBuf>,
        texture_name: &str,
        callback: F,
    ) where
        F: FnOnce(&mut Scene, &mut MotionAnimator) + 'static,
    {
        let path = path.into();
        log::info!("loading texture {}", path.display());
        self.submit(
            path,
            Pending::Texture {
                name: texture_name.to_string(),
                callback: Some(Box::new(callback)),
            },
        );
    }

    /// Delivers finished loads; called once per frame from the render loop
    ///
    /// Failed loads are logged and dropped without touching the scene or the
    /// animator. Returns the number of completions handled.
    pub fn poll(&mut self, scene: &mut Scene, animator: &mut MotionAnimator) -> usize {
        let completed: Vec<Completed> = self.receiver.try_iter().collect();
        let count = completed.len();

        for done in completed {
            let Some(pending) = self.pending.remove(&done.id) else {
                continue;
            };

            match (pending, done.payload) {
                (Pending::Model(callback), Ok(Payload::Model(model))) => {
                    log::info!(
                        "loaded {} ({} meshes, {} materials)",
                        done.path.display(),
                        model.meshes.len(),
                        model.materials.len()
                    );
                    callback(scene, animator, &model);
                }
                (Pending::Texture { name, callback }, Ok(Payload::Texture(texture))) => {
                    log::info!(
                        "loaded {} ({}x{})",
                        done.path.display(),
                        texture.width,
                        texture.height
                    );
                    scene.add_texture_data(&name, texture.rgba, texture.width, texture.height);
                    if let Some(callback) = callback {
                        callback(scene, animator);
                    }
                }
                (_, Err(err)) => {
                    log::error!("{}", err);
                }
                // decode() keys the payload kind off the extension, the same
                // place the pending kind came from
                (_, Ok(_)) => {
                    log::error!("mismatched payload for {}", done.path.display());
                }
            }
        }

        count
    }

    /// Number of requests still being decoded
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::MotionAnimator;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use cgmath::Vector3;
    use std::time::{Duration, Instant};

    fn test_scene() -> Scene {
        let camera = OrbitCamera::new(5.0, 0.4, 0.2, Vector3::new(0.0, 0.0, 0.0), 1.0);
        let controller = CameraController::new(0.005, 0.1);
        Scene::new(CameraManager::new(camera, controller))
    }

    fn poll_until_idle(loader: &mut AssetLoader, scene: &mut Scene, animator: &mut MotionAnimator) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while loader.in_flight() > 0 {
            loader.poll(scene, animator);
            assert!(Instant::now() < deadline, "loader never drained");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn failed_load_registers_nothing() {
        let mut scene = test_scene();
        let mut animator = MotionAnimator::new();
        let mut loader = AssetLoader::new();

        loader.request_model("/definitely/not/here.obj", |scene, animator, model| {
            let handle = scene.instantiate(model).handle();
            animator.track(handle, crate::animation::MotionProfile::circular(1.0, 0.1));
        });
        poll_until_idle(&mut loader, &mut scene, &mut animator);

        assert_eq!(scene.get_object_count(), 0);
        assert!(animator.is_empty());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let mut scene = test_scene();
        let mut animator = MotionAnimator::new();
        let mut loader = AssetLoader::new();

        loader.request_model("notes.txt", |_, _, _| {
            panic!("callback must not run for rejected files");
        });
        poll_until_idle(&mut loader, &mut scene, &mut animator);
        assert_eq!(scene.get_object_count(), 0);
    }

    #[test]
    fn successful_load_reaches_the_callback() {
        use std::io::Write;

        let path = std::env::temp_dir().join("maquette_loader_quad.obj");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"o quad\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n")
            .unwrap();

        let mut scene = test_scene();
        let mut animator = MotionAnimator::new();
        let mut loader = AssetLoader::new();

        loader.request_model(path.clone(), |scene, animator, model| {
            let handle = scene.instantiate(model).with_name("quad").handle();
            animator.track(handle, crate::animation::MotionProfile::ascending(0.1, 5.0, 0.0));
        });
        poll_until_idle(&mut loader, &mut scene, &mut animator);
        std::fs::remove_file(&path).ok();

        assert_eq!(scene.get_object_count(), 1);
        assert_eq!(animator.len(), 1);
        // Quad was triangulated by the loader
        assert_eq!(scene.get_statistics().total_triangles, 2);
    }
}
