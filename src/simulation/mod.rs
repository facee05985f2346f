pub mod constants;
pub mod states;
pub mod params;
pub mod kepler;
pub mod elements;
pub mod forces;
pub mod relativity;
pub mod integrator;
pub mod diagnostics;
pub mod scenario;
pub mod engine;
