// Domain layer: value model and ports. Everything the mapper moves between records is a `Value`
// tagged with a `TypeTag`.

pub mod model;
pub mod ports;
pub mod scalars;
