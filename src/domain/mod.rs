// Domain layer: wizard data model and ports (interfaces) to the geocoding and prediction collaborators.

pub mod model;
pub mod ports;
