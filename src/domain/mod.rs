// Domain layer: models and ports. Concrete AWS and local implementations live in `adapters`.

pub mod model;
pub mod ports;
