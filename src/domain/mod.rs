// Domain layer: build targets, bundler options and the ports the orchestrator talks to.

pub mod model;
pub mod ports;
