pub mod rest;
pub mod traits;
pub mod wire;
