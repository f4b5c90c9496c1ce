pub mod compare;

pub use compare::constant_time_eq;
