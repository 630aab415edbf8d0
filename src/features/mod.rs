//! # Features layer

pub mod persona;
pub mod truth_or_dare;

pub use persona::Persona;
pub use truth_or_dare::SessionMap;
