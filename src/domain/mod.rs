// Domain layer: feed value types and the ports the aggregator is written against.

pub mod model;
pub mod ports;
