// Domain layer: models, ports and the row-level rules. No external systems here.

pub mod geometry;
pub mod model;
pub mod ports;
pub mod services;
