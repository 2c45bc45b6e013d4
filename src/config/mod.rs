//! Declarative configuration for the router.
//!
//! [`RouterConfig`] is validated on construction; a router built from it
//! never needs to re-check its identities.

mod router_config;

pub use router_config::RouterConfig;
