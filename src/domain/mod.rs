// Domain layer: entities and the service port the menu depends on.

pub mod model;
pub mod ports;
