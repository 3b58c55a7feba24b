//! Modules and dependency edges.
//!
//! A [`Module`] is identified by its name alone: two modules with the same
//! name compare equal and hash identically regardless of `path` or `kind`.
//! A [`Dependency`] `from → to` means "`from` depends on `to`", so `to` must
//! be refactored no later than `from`.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

// ---------------------------------------------------------------------------
// Module
// ---------------------------------------------------------------------------

/// What kind of code unit a [`Module`] stands for. Metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    /// A source package or namespace.
    #[default]
    Package,
    /// A single class or type.
    Class,
    /// A Maven reactor submodule.
    MavenModule,
    /// A Gradle subproject.
    GradleModule,
}

/// A named unit of code whose refactoring position is being computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    name: String,
    #[serde(default)]
    path: PathBuf,
    #[serde(default)]
    kind: ModuleKind,
}

impl Module {
    /// Create a [`ModuleKind::Package`] module with an empty path.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: PathBuf::new(),
            kind: ModuleKind::default(),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ModuleKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn kind(&self) -> ModuleKind {
        self.kind
    }
}

impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Module {}

impl Hash for Module {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Module {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Module {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

// Hash and Eq both delegate to `name`, so borrowing as `str` is consistent.
impl Borrow<str> for Module {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl AsRef<str> for Module {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Module {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Module {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

// ---------------------------------------------------------------------------
// Dependency
// ---------------------------------------------------------------------------

/// How a dependency was discovered. Informational; no algorithm reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    #[default]
    Direct,
    Transitive,
    Circular,
}

/// A directed, weighted edge: `from` depends on `to`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dependency {
    from: Module,
    to: Module,
    weight: f64,
    kind: DependencyKind,
}

impl Dependency {
    /// Create a direct dependency with weight `1.0`.
    #[must_use]
    pub fn new(from: impl Into<Module>, to: impl Into<Module>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight: 1.0,
            kind: DependencyKind::Direct,
        }
    }

    /// Replace the weight.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidWeight`] unless `weight` is finite and
    /// strictly positive.
    pub fn with_weight(mut self, weight: f64) -> Result<Self, GraphError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(GraphError::InvalidWeight {
                from: self.from.name,
                to: self.to.name,
                weight,
            });
        }
        self.weight = weight;
        Ok(self)
    }

    #[must_use]
    pub fn with_kind(mut self, kind: DependencyKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn from(&self) -> &Module {
        &self.from
    }

    #[must_use]
    pub const fn to(&self) -> &Module {
        &self.to
    }

    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub const fn kind(&self) -> DependencyKind {
        self.kind
    }

    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Rebuild an edge whose weight was validated on insertion.
    pub(crate) const fn from_parts(
        from: Module,
        to: Module,
        weight: f64,
        kind: DependencyKind,
    ) -> Self {
        Self {
            from,
            to,
            weight,
            kind,
        }
    }

    pub(crate) fn into_parts(self) -> (Module, Module, f64, DependencyKind) {
        (self.from, self.to, self.weight, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identity_is_name_only() {
        let a = Module::new("core").with_path("src/core").with_kind(ModuleKind::Class);
        let b = Module::new("core").with_kind(ModuleKind::GradleModule);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b), "same name must hash to the same entry");
        assert!(set.contains("core"));
    }

    #[test]
    fn modules_order_by_name() {
        let mut mods = vec![Module::new("b"), Module::new("c"), Module::new("a")];
        mods.sort();
        let names: Vec<&str> = mods.iter().map(Module::name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn dependency_defaults() {
        let dep = Dependency::new("app", "db");
        assert_eq!(dep.from().name(), "app");
        assert_eq!(dep.to().name(), "db");
        assert!((dep.weight() - 1.0).abs() < f64::EPSILON);
        assert_eq!(dep.kind(), DependencyKind::Direct);
        assert!(!dep.is_self_loop());
    }

    #[test]
    fn rejects_non_positive_weights() {
        for bad in [0.0, -2.5, f64::NAN, f64::INFINITY] {
            assert!(Dependency::new("a", "b").with_weight(bad).is_err(), "{bad}");
        }
        let dep = Dependency::new("a", "b").with_weight(2.5).expect("valid weight");
        assert!((dep.weight() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn self_loop_detected() {
        assert!(Dependency::new("a", "a").is_self_loop());
    }

    #[test]
    fn module_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ModuleKind::MavenModule).expect("serialize");
        assert_eq!(json, "\"maven_module\"");
    }
}
