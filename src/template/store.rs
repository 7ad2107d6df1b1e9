use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::foundation::error::{FramefitError, FramefitResult};
use crate::template::descriptor::TemplateDescriptor;
use crate::template::manifest::TemplateManifest;

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Filesystem-backed template library.
///
/// The layout is one directory per room and one subdirectory per template,
/// each holding `manifest.json` plus its background image. The root is
/// explicit construction-time state, never ambient configuration.
#[derive(Clone, Debug)]
pub struct TemplateStore {
    root: PathBuf,
}

/// Discovery record for one template directory, listed without decoding
/// anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Template directory name.
    pub id: String,
    /// Whether `manifest.json` exists in the directory.
    pub manifest_present: bool,
    /// Whether any image file exists in the directory.
    pub background_present: bool,
}

impl TemplateStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory templates are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load and validate one template descriptor.
    pub fn load(&self, room: &str, id: &str) -> FramefitResult<TemplateDescriptor> {
        let dir = self.root.join(room).join(id);
        if !dir.is_dir() {
            return Err(FramefitError::manifest_invalid(format!(
                "template directory not found: {}",
                dir.display()
            )));
        }

        let manifest_path = dir.join("manifest.json");
        let manifest_bytes = std::fs::read(&manifest_path).map_err(|e| {
            FramefitError::manifest_invalid(format!("read {}: {e}", manifest_path.display()))
        })?;
        let manifest = TemplateManifest::from_json(&manifest_bytes)?;

        // Background filenames are template-local; reject traversal.
        if manifest.background.contains("..")
            || manifest.background.starts_with('/')
            || manifest.background.contains('\\')
        {
            return Err(FramefitError::manifest_invalid(format!(
                "background filename must be template-local: '{}'",
                manifest.background
            )));
        }
        let bg_path = dir.join(&manifest.background);
        let background_bytes = std::fs::read(&bg_path).map_err(|e| {
            FramefitError::manifest_invalid(format!(
                "read background {}: {e}",
                bg_path.display()
            ))
        })?;

        TemplateDescriptor::from_manifest(room, id, &manifest, &background_bytes)
    }

    /// Load every template under `room`, in directory-name order.
    pub fn load_room(&self, room: &str) -> FramefitResult<Vec<TemplateDescriptor>> {
        let room_dir = self.root.join(room);
        if !room_dir.is_dir() {
            return Err(FramefitError::manifest_invalid(format!(
                "room folder not found: {}",
                room_dir.display()
            )));
        }
        let mut out = Vec::new();
        for id in sorted_subdirs(&room_dir)? {
            out.push(self.load(room, &id)?);
        }
        Ok(out)
    }

    /// Enumerate rooms and template directories.
    pub fn list(&self) -> FramefitResult<BTreeMap<String, Vec<TemplateEntry>>> {
        let mut rooms = BTreeMap::new();
        if !self.root.is_dir() {
            return Ok(rooms);
        }
        for room in sorted_subdirs(&self.root)? {
            let room_dir = self.root.join(&room);
            let mut entries = Vec::new();
            for id in sorted_subdirs(&room_dir)? {
                let dir = room_dir.join(&id);
                entries.push(TemplateEntry {
                    id,
                    manifest_present: dir.join("manifest.json").is_file(),
                    background_present: has_image_file(&dir),
                });
            }
            rooms.insert(room, entries);
        }
        Ok(rooms)
    }
}

fn sorted_subdirs(dir: &Path) -> FramefitResult<Vec<String>> {
    let rd = std::fs::read_dir(dir)
        .map_err(|e| anyhow::anyhow!("read dir {}: {e}", dir.display()))?;
    let mut names = Vec::new();
    for entry in rd.flatten() {
        if entry.path().is_dir()
            && let Some(name) = entry.file_name().to_str()
        {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn has_image_file(dir: &Path) -> bool {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return false;
    };
    rd.flatten().any(|entry| {
        let path = entry.path();
        path.is_file()
            && path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| {
                    IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
                })
    })
}
