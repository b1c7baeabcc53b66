//! URL handling module for Site-Harvest
//!
//! This module provides seed validation, the same-site filter and the path
//! normalizer that turns any discovered link into either a filesystem-safe
//! relative identifier or a comparable absolute URL.

mod normalize;
mod site;

// Re-export main functions
pub use normalize::{canonicalize, clean_component, resolve};
pub use site::SiteBase;
