//! Lookup table from discriminator names to node constructors.
//!
//! A registry is filled once and then only read. [`Registry::global`] holds
//! the built-in variants for callers that don't need a custom table; tests
//! and embedders can build their own with extra names.

use crate::{
    Circle, ConvexPolygon, CubicHermitePath, Decoder, Group, LinePath, MicropolygonMesh, Node,
    NodeVariant, Scene,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use weft_core::{DecodeError, Mapping};

/// Builds a node from a discriminated mapping.
pub type Constructor = fn(&Mapping, &Decoder<'_>) -> Result<Node, DecodeError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("node variant `{0}` is already registered")]
    DuplicateVariant(String),
}

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::builtin);

#[derive(Clone, Default)]
pub struct Registry {
    constructors: HashMap<String, Constructor>,
}

fn construct<T: NodeVariant>(map: &Mapping, decoder: &Decoder<'_>) -> Result<Node, DecodeError> {
    T::decode(map, decoder).map(Into::into)
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in node variant.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        if let Err(err) = registry.register_builtins() {
            log::error!("built-in node variants collided in a fresh registry: {err}");
        }
        registry
    }

    /// Register every built-in node variant under its own name. Fails on the
    /// first name that is already taken.
    pub fn register_builtins(&mut self) -> Result<(), RegistryError> {
        self.register_variant::<Scene>()?;
        self.register_variant::<Group>()?;
        self.register_variant::<Circle>()?;
        self.register_variant::<ConvexPolygon>()?;
        self.register_variant::<LinePath>()?;
        self.register_variant::<CubicHermitePath>()?;
        self.register_variant::<MicropolygonMesh>()
    }

    /// The process-wide built-in registry, created on first use.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Register `constructor` under `name`. Registering a name twice fails.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        constructor: Constructor,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.constructors.contains_key(&name) {
            return Err(RegistryError::DuplicateVariant(name));
        }
        log::debug!("registered node variant `{name}`");
        self.constructors.insert(name, constructor);
        Ok(())
    }

    /// Register `T` under its own discriminator.
    pub fn register_variant<T: NodeVariant>(&mut self) -> Result<(), RegistryError> {
        self.register(T::CLASS, construct::<T>)
    }

    pub fn resolve(&self, name: &str) -> Option<Constructor> {
        self.constructors.get(name).copied()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("variants", &self.names())
            .finish()
    }
}
