//! Core type definitions used across the Docstore workspace.

pub mod lineage;

pub use lineage::LineageKey;
