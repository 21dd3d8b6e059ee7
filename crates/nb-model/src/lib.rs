//! Model document loading and validation for nbayes.
//!
//! This crate provides:
//! - Typed structs for the exported model JSON document
//! - The loader with its error taxonomy and content hashing
//! - Model path resolution (CLI → env → XDG config dir)
//! - Advisory semantic validation for `check`-style tooling

pub mod document;
pub mod load;
pub mod resolve;
pub mod validate;

pub use document::{AttributeDescriptor, Model};
pub use load::{load_model, LoadError, LoadedModel};
pub use resolve::{resolve_model_path, ModelSource};
pub use validate::{validate_model, ModelWarning};
