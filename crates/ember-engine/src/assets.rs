//! The asset store.
//!
//! Rendering itself is a collaborator outside this crate, so the store does
//! not decode images. It maps string asset ids to [`TextureInfo`] metadata
//! (path and pixel dimensions) that the render target needs to resolve a
//! [`DrawOp`](crate::systems::DrawOp). Lookups are O(1) and side-effect
//! free.
//!
//! Stores can be filled programmatically with [`AssetStore::add_texture`]
//! or from a JSON manifest listing every texture.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by asset lookups and manifest loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// A lookup for an id the store has never seen.
    #[error("no texture registered under id '{id}'")]
    UnknownTexture { id: String },

    /// Two manifest entries claimed the same id.
    #[error("duplicate texture id '{id}' in asset manifest")]
    DuplicateTexture { id: String },

    /// The manifest file could not be read.
    #[error("failed to read asset manifest {path}")]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest file is not valid manifest JSON.
    #[error("asset manifest is not valid JSON: {source}")]
    ManifestJson {
        #[from]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// TextureInfo
// ---------------------------------------------------------------------------

/// Metadata for one texture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureInfo {
    /// The id sprites reference.
    pub id: String,
    /// Where the image lives on disk.
    pub path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// On-disk manifest shape: `{"textures": [...]}`.
#[derive(Debug, Deserialize)]
struct Manifest {
    textures: Vec<TextureInfo>,
}

// ---------------------------------------------------------------------------
// AssetStore
// ---------------------------------------------------------------------------

/// String-keyed texture metadata store.
#[derive(Debug, Default)]
pub struct AssetStore {
    textures: HashMap<String, TextureInfo>,
}

impl AssetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON manifest file.
    pub fn load_manifest(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| AssetError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_manifest_json(&json)?;
        tracing::info!(
            manifest = %path.display(),
            textures = store.len(),
            "asset manifest loaded"
        );
        Ok(store)
    }

    /// Build a store from manifest JSON already in memory.
    pub fn from_manifest_json(json: &str) -> Result<Self, AssetError> {
        let manifest: Manifest = serde_json::from_str(json)?;
        let mut store = Self::new();
        for info in manifest.textures {
            if store.textures.contains_key(&info.id) {
                return Err(AssetError::DuplicateTexture { id: info.id });
            }
            store.add_texture(info);
        }
        Ok(store)
    }

    /// Register a texture, replacing any previous entry with the same id.
    pub fn add_texture(&mut self, info: TextureInfo) {
        tracing::info!(id = %info.id, path = %info.path.display(), "texture registered");
        self.textures.insert(info.id.clone(), info);
    }

    /// Look up a texture by id.
    pub fn texture(&self, id: &str) -> Result<&TextureInfo, AssetError> {
        self.textures.get(id).ok_or_else(|| AssetError::UnknownTexture {
            id: id.to_owned(),
        })
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.textures.contains_key(id)
    }

    /// Number of registered textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Drop every registered texture.
    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
