//! The three check scenarios built on the pipeline stages.

pub mod code_systems;
pub mod concept_maps;
pub mod value_sets;
