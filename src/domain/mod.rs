//! Domain layer - entities, value objects, ports, and services
//!
//! Everything here is cluster-agnostic: the only way out is through the
//! ports, which the infrastructure layer implements against a live
//! cluster and the tests implement with mocks.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
