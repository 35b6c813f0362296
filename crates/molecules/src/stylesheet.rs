//! Stylesheet documents: style overrides authored as YAML or JSON.
//!
//! This module provides [`StylesheetSet`], which collects style definitions
//! from stylesheet files (or inline sources) and installs them into a
//! [`Registry`] as style overrides.
//!
//! # Format
//!
//! A stylesheet maps component names to slots. Within a slot, the
//! `variants` key holds the variant table and every other key is a base
//! property:
//!
//! ```yaml
//! Card_Header:
//!   root:
//!     padding: 16
//!     color: "{{ colors.onSurface }}"
//!     variants:
//!       state:
//!         disabled: { opacity: 0.38 }
//! ```
//!
//! # Theme templates
//!
//! Text values containing `{{` are rendered with MiniJinja against the active
//! theme (`mode`, `colors`, `spacing`, `breakpoints`) every time the
//! definition is evaluated. A definition with at least one template becomes a
//! themed definition. When the whole value renders to a number (e.g.
//! `"{{ spacing.lg }}"`), the property becomes a number; `inf` and `NaN` stay
//! text. A template that fails to render, including one naming an unknown
//! token, keeps its raw text and logs a warning.
//!
//! # Discovery
//!
//! [`walk_stylesheet_dir`] finds stylesheet files by extension, in priority
//! order:
//!
//! | Priority | Extension |
//! |----------|-----------|
//! | 1 (highest) | `.yaml` |
//! | 2 | `.yml` |
//! | 3 (lowest) | `.json` |
//!
//! If several files share a base name in the same directory, only the
//! highest-priority one is read. A component defined by two different files
//! is a collision and is reported as an error rather than letting an
//! arbitrary file win.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use minijinja::{Environment, UndefinedBehavior};

use crate::name::ComponentName;
use crate::registry::{Registry, RegistryError};
use crate::style::{PropertyValue, Slots, StyleDefinition};
use crate::theme::Theme;

/// Recognized stylesheet file extensions in priority order.
pub const STYLESHEET_EXTENSIONS: &[&str] = &[".yaml", ".yml", ".json"];

/// Stylesheet document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylesheetFormat {
    Yaml,
    Json,
}

impl StylesheetFormat {
    /// Infers the format from a file name's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(StylesheetFormat::Yaml),
            "json" => Some(StylesheetFormat::Json),
            _ => None,
        }
    }
}

/// A stylesheet file discovered during directory walking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetFile {
    /// Path relative to the root, without extension (e.g. `"cards/outlined"`)
    pub name: String,
    /// Path relative to the root, with extension (e.g. `"cards/outlined.yaml"`)
    pub name_with_ext: String,
    /// Absolute path to the file
    pub absolute_path: PathBuf,
    /// The stylesheet directory root this file belongs to
    pub source_dir: PathBuf,
}

impl StylesheetFile {
    /// Creates a new stylesheet file descriptor.
    pub fn new(
        name: impl Into<String>,
        name_with_ext: impl Into<String>,
        absolute_path: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            name_with_ext: name_with_ext.into(),
            absolute_path: absolute_path.into(),
            source_dir: source_dir.into(),
        }
    }

    /// Returns the extension priority (lower is higher priority).
    ///
    /// Returns `usize::MAX` if the extension is not recognized.
    pub fn extension_priority(&self) -> usize {
        STYLESHEET_EXTENSIONS
            .iter()
            .position(|ext| self.name_with_ext.ends_with(ext))
            .unwrap_or(usize::MAX)
    }
}

/// Error type for stylesheet loading.
#[derive(Debug, thiserror::Error)]
pub enum StylesheetError {
    /// Two stylesheet files define the same component.
    #[error(
        "stylesheet collision for \"{name}\":\n  - {}\n  - {}",
        .existing.display(),
        .conflicting.display()
    )]
    Collision {
        name: String,
        existing: PathBuf,
        conflicting: PathBuf,
    },

    /// Failed to read a stylesheet file from disk.
    #[error("failed to read stylesheet \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid stylesheet.
    #[error("invalid stylesheet {origin}: {message}")]
    Parse { origin: String, message: String },

    /// The file extension is not a stylesheet extension.
    #[error("unsupported stylesheet extension: \"{}\"", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Parses one stylesheet document into definitions keyed by component name.
///
/// `origin` names the source in error messages (usually a file path).
///
/// # Errors
///
/// Returns [`StylesheetError::Parse`] if the document is malformed.
pub fn parse_stylesheet(
    source: &str,
    format: StylesheetFormat,
    origin: &str,
) -> Result<BTreeMap<ComponentName, StyleDefinition>, StylesheetError> {
    let parse_error = |message: String| StylesheetError::Parse {
        origin: origin.to_string(),
        message,
    };
    let document: BTreeMap<ComponentName, Slots> = match format {
        StylesheetFormat::Yaml => {
            serde_yaml::from_str(source).map_err(|e| parse_error(e.to_string()))?
        }
        StylesheetFormat::Json => {
            serde_json::from_str(source).map_err(|e| parse_error(e.to_string()))?
        }
    };

    Ok(document
        .into_iter()
        .map(|(name, slots)| (name, into_definition(slots)))
        .collect())
}

fn is_template(value: &PropertyValue) -> bool {
    value.as_text().is_some_and(|s| s.contains("{{"))
}

/// Turns parsed slots into a definition, themed if any value is a template.
fn into_definition(slots: Slots) -> StyleDefinition {
    let templated = slots
        .values()
        .any(|slot| slot.values().any(is_template));
    if !templated {
        return StyleDefinition::Static(slots);
    }

    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    let env = Arc::new(env);
    StyleDefinition::themed(move |theme| {
        slots
            .iter()
            .map(|(name, slot)| {
                let slot = slot.map_values(|value| render_value(&env, value, theme));
                (name.clone(), slot)
            })
            .collect()
    })
}

fn render_value(env: &Environment<'static>, value: &PropertyValue, theme: &Theme) -> PropertyValue {
    let Some(source) = value.as_text().filter(|s| s.contains("{{")) else {
        return value.clone();
    };
    match env.render_str(source, theme) {
        Ok(rendered) => match rendered.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => PropertyValue::Number(number),
            _ => PropertyValue::Text(rendered),
        },
        Err(err) => {
            tracing::warn!(template = source, error = %err, "stylesheet template failed to render");
            value.clone()
        }
    }
}

/// Style definitions collected from stylesheet sources.
///
/// # Resolution Order
///
/// 1. Inline definitions (added via [`StylesheetSet::add_inline`]) shadow
///    file definitions of the same component
/// 2. File definitions, one file per component; a second file defining the
///    same component is a collision
///
/// # Example
///
/// ```rust
/// use molecules::stylesheet::{StylesheetFormat, StylesheetSet};
/// use molecules::Registry;
///
/// let mut set = StylesheetSet::new();
/// set.add_inline_source(
///     "Switch:\n  track:\n    width: 52\n",
///     StylesheetFormat::Yaml,
/// )
/// .unwrap();
///
/// let mut registry = Registry::new();
/// set.register_into(&mut registry).unwrap();
/// assert!(registry.styles().contains("Switch"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StylesheetSet {
    definitions: BTreeMap<ComponentName, Arc<StyleDefinition>>,
    /// Which file each component came from; inline components are absent.
    sources: HashMap<ComponentName, PathBuf>,
}

impl StylesheetSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an inline definition, shadowing any file definition.
    pub fn add_inline(&mut self, name: ComponentName, definition: StyleDefinition) {
        self.sources.remove(&name);
        self.definitions.insert(name, Arc::new(definition));
    }

    /// Parses an inline document and adds every definition in it.
    pub fn add_inline_source(
        &mut self,
        source: &str,
        format: StylesheetFormat,
    ) -> Result<(), StylesheetError> {
        for (name, definition) in parse_stylesheet(source, format, "<inline>")? {
            self.add_inline(name, definition);
        }
        Ok(())
    }

    /// Reads and adds stylesheet files, typically from [`walk_stylesheet_dir`].
    ///
    /// Files are processed by extension priority; a lower-priority file with
    /// the same base name in the same directory as an already processed one
    /// is skipped. Nothing is added unless every file loads.
    ///
    /// # Errors
    ///
    /// - [`StylesheetError::Collision`] if two files define the same component
    /// - [`StylesheetError::Read`] / [`StylesheetError::Parse`] for bad files
    pub fn add_from_files(&mut self, files: Vec<StylesheetFile>) -> Result<(), StylesheetError> {
        let mut sorted_files = files;
        sorted_files.sort_by(|a, b| {
            a.extension_priority()
                .cmp(&b.extension_priority())
                .then_with(|| a.absolute_path.cmp(&b.absolute_path))
        });

        let mut staged = self.clone();
        let mut seen: HashMap<(PathBuf, String), PathBuf> = HashMap::new();
        for file in sorted_files {
            let key = (file.source_dir.clone(), file.name.clone());
            if let Some(winner) = seen.get(&key) {
                tracing::debug!(
                    skipped = %file.absolute_path.display(),
                    winner = %winner.display(),
                    "stylesheet shadowed by higher-priority extension"
                );
                continue;
            }
            seen.insert(key, file.absolute_path.clone());
            staged.add_file(&file.absolute_path)?;
        }
        *self = staged;
        Ok(())
    }

    /// Reads and adds a single stylesheet file.
    pub fn add_file(&mut self, path: &Path) -> Result<(), StylesheetError> {
        let format = StylesheetFormat::from_path(path).ok_or_else(|| {
            StylesheetError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
        })?;
        let source = std::fs::read_to_string(path).map_err(|source| StylesheetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = parse_stylesheet(&source, format, &path.display().to_string())?;

        for name in parsed.keys() {
            if let Some(existing) = self.sources.get(name) {
                return Err(StylesheetError::Collision {
                    name: name.to_string(),
                    existing: existing.clone(),
                    conflicting: path.to_path_buf(),
                });
            }
        }
        for (name, definition) in parsed {
            if self.definitions.contains_key(&name) {
                // inline definitions win
                continue;
            }
            self.sources.insert(name.clone(), path.to_path_buf());
            self.definitions.insert(name, Arc::new(definition));
        }
        Ok(())
    }

    /// Returns the definition collected for `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<StyleDefinition>> {
        self.definitions.get(name)
    }

    /// Returns the file a component was loaded from (`None` for inline ones).
    pub fn source_of(&self, name: &str) -> Option<&Path> {
        self.sources.get(name).map(PathBuf::as_path)
    }

    /// Returns component names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(ComponentName::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Installs every definition as a style override.
    ///
    /// Follows the registry's policy; under
    /// [`RegistrationPolicy::RejectDuplicates`](crate::RegistrationPolicy::RejectDuplicates)
    /// nothing is installed if any name is already taken.
    pub fn register_into(&self, registry: &mut Registry) -> Result<(), RegistryError> {
        registry.register_styles_batch(
            self.definitions
                .iter()
                .map(|(name, def)| (name.as_str(), Arc::clone(def))),
        )
    }
}

/// Walks a stylesheet directory and collects stylesheet files.
///
/// Traverses the directory recursively, finding all files with recognized
/// extensions ([`STYLESHEET_EXTENSIONS`]). The result is not sorted.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or traversed.
pub fn walk_stylesheet_dir(root: impl AsRef<Path>) -> Result<Vec<StylesheetFile>, std::io::Error> {
    let root_canonical = root.as_ref().canonicalize()?;
    let mut files = Vec::new();
    walk_dir_recursive(&root_canonical, &root_canonical, &mut files)?;
    Ok(files)
}

fn walk_dir_recursive(
    current: &Path,
    root: &Path,
    files: &mut Vec<StylesheetFile>,
) -> Result<(), std::io::Error> {
    for entry in std::fs::read_dir(current)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_dir_recursive(&path, root, files)?;
        } else if let Some(file) = try_parse_stylesheet_file(&path, root) {
            files.push(file);
        }
    }
    Ok(())
}

fn try_parse_stylesheet_file(path: &Path, root: &Path) -> Option<StylesheetFile> {
    let path_str = path.to_string_lossy();
    let extension = STYLESHEET_EXTENSIONS
        .iter()
        .find(|ext| path_str.ends_with(*ext))?;

    let relative = path.strip_prefix(root).ok()?;
    let name_with_ext = relative
        .to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/");
    let name = name_with_ext.strip_suffix(extension)?.to_string();

    Some(StylesheetFile::new(name, name_with_ext, path, root))
}
