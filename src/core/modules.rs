//! # Module Layout
//!
//! Which calculator cards the dashboard shows, and in what order.
//!
//! The layout is saved to `~/.bitbench/modules.json` after every change.
//! Loading is forgiving: entries naming unknown modules are dropped, a module
//! listed twice keeps its first position, and modules the file doesn't
//! mention are appended (visible) in their default order. A file that isn't
//! a JSON array yields the default layout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every calculator card, in default display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKey {
    Inverter,
    Pow2,
    Base,
    TimeFreq,
    Pad,
    Size,
    Throughput,
    Ascii,
    TruthTable,
    Kmap,
    Xor,
}

impl ModuleKey {
    pub const ALL: [ModuleKey; 11] = [
        ModuleKey::Inverter,
        ModuleKey::Pow2,
        ModuleKey::Base,
        ModuleKey::TimeFreq,
        ModuleKey::Pad,
        ModuleKey::Size,
        ModuleKey::Throughput,
        ModuleKey::Ascii,
        ModuleKey::TruthTable,
        ModuleKey::Kmap,
        ModuleKey::Xor,
    ];

    /// Stable identifier used in the saved layout and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            ModuleKey::Inverter => "inverter",
            ModuleKey::Pow2 => "pow2",
            ModuleKey::Base => "base",
            ModuleKey::TimeFreq => "timefreq",
            ModuleKey::Pad => "pad",
            ModuleKey::Size => "size",
            ModuleKey::Throughput => "throughput",
            ModuleKey::Ascii => "ascii",
            ModuleKey::TruthTable => "truthtable",
            ModuleKey::Kmap => "kmap",
            ModuleKey::Xor => "xor",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ModuleKey::Inverter => "Bit Inverter",
            ModuleKey::Pow2 => "2^n Calculator",
            ModuleKey::Base => "Base Converter",
            ModuleKey::TimeFreq => "Time ↔ Frequency",
            ModuleKey::Pad => "Pad Binary",
            ModuleKey::Size => "Size Converter",
            ModuleKey::Throughput => "Throughput",
            ModuleKey::Ascii => "ASCII ↔ Hex",
            ModuleKey::TruthTable => "Truth Table",
            ModuleKey::Kmap => "K-Map Solver",
            ModuleKey::Xor => "XOR Calculator",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub key: ModuleKey,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleLayout {
    entries: Vec<ModuleEntry>,
}

impl Default for ModuleLayout {
    fn default() -> Self {
        Self {
            entries: ModuleKey::ALL
                .into_iter()
                .map(|key| ModuleEntry { key, visible: true })
                .collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("layout encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModuleLayout {
    /// Rebuild a layout from arbitrary saved JSON.
    pub fn reconcile(saved: &serde_json::Value) -> Self {
        let Some(items) = saved.as_array() else {
            return Self::default();
        };

        let mut entries: Vec<ModuleEntry> = Vec::with_capacity(ModuleKey::ALL.len());
        for item in items {
            let Some(key) = item
                .get("key")
                .and_then(serde_json::Value::as_str)
                .and_then(ModuleKey::from_id)
            else {
                continue;
            };
            if entries.iter().any(|e| e.key == key) {
                continue;
            }
            let visible = item
                .get("visible")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
            entries.push(ModuleEntry { key, visible });
        }

        for key in ModuleKey::ALL {
            if !entries.iter().any(|e| e.key == key) {
                entries.push(ModuleEntry { key, visible: true });
            }
        }
        Self { entries }
    }

    /// Parse saved text, falling back to the default layout when it isn't
    /// valid JSON.
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => Self::reconcile(&value),
            Err(e) => {
                warn!("Ignoring malformed module layout: {}", e);
                Self::default()
            }
        }
    }

    pub fn entries(&self) -> &[ModuleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visible modules, in display order.
    pub fn visible(&self) -> Vec<ModuleKey> {
        self.entries
            .iter()
            .filter(|e| e.visible)
            .map(|e| e.key)
            .collect()
    }

    pub fn is_visible(&self, key: ModuleKey) -> bool {
        self.entries.iter().any(|e| e.key == key && e.visible)
    }

    pub fn toggle(&mut self, key: ModuleKey) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.visible = !entry.visible;
        }
    }

    pub fn set_visible(&mut self, key: ModuleKey, visible: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.visible = visible;
        }
    }

    /// Move the entry at `from` so it ends up at index `to`. Out-of-range
    /// indices and no-op moves leave the layout unchanged.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.entries.len() || to >= self.entries.len() {
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        true
    }

    /// Indices of entries whose id or title contains `query`, ignoring case.
    /// An empty query matches everything.
    pub fn matching(&self, query: &str) -> Vec<usize> {
        let query = query.trim().to_lowercase();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                query.is_empty()
                    || e.key.id().contains(&query)
                    || e.key.title().to_lowercase().contains(&query)
            })
            .map(|(i, _)| i)
            .collect()
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!("Failed to read module layout {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Atomically write the layout as JSON (via `.tmp` + rename).
    pub fn save_to(&self, path: &Path) -> Result<(), LayoutError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("tmp");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        debug!("Module layout saved to {}", path.display());
        Ok(())
    }
}

/// Returns `~/.bitbench/modules.json`.
pub fn layout_path() -> Option<PathBuf> {
    super::config::data_dir().map(|d| d.join("modules.json"))
}

/// Load the saved layout, or the default when nothing usable is saved.
pub fn load_layout() -> ModuleLayout {
    layout_path()
        .map(|p| ModuleLayout::load_from(&p))
        .unwrap_or_default()
}

pub fn save_layout(layout: &ModuleLayout) -> Result<(), LayoutError> {
    let path = layout_path().ok_or_else(|| {
        LayoutError::Io(io::Error::new(io::ErrorKind::NotFound, "no home directory"))
    })?;
    layout.save_to(&path)
}
