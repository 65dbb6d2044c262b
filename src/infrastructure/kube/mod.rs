//! Kubernetes infrastructure adapter

mod client;
pub(crate) mod convert;

pub use client::KubeClusterApi;
