//! # Asset Pipeline
//!
//! Background loading of models (OBJ/MTL, glTF) and image textures. Files
//! are decoded on short-lived worker threads and delivered back to the main
//! thread as plain data; completion callbacks then instantiate scene objects
//! and may register motion animator entries.
//!
//! A failed load is logged and dropped; it never produces a scene object or
//! an animator entry.

pub mod loader;
pub mod model;

use std::path::PathBuf;

pub use loader::AssetLoader;
pub use model::{MaterialDef, MeshData, ModelData, TextureData};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("i/o error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse OBJ {path}: {source}")]
    Obj {
        path: PathBuf,
        source: tobj::LoadError,
    },

    #[error("failed to parse glTF {path}: {source}")]
    Gltf {
        path: PathBuf,
        source: Box<gltf::Error>,
    },

    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("unsupported asset extension: {path}")]
    UnsupportedExtension { path: PathBuf },
}
