pub mod defaults;
pub mod properties;
