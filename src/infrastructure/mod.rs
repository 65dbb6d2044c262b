//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports.

pub mod kube;

pub use kube::KubeClusterApi;
