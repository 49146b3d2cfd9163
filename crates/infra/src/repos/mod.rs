pub mod complexes;
pub mod terrains;

pub use complexes::{ComplexFilter, ComplexRepo, ComplexUpdate, NewComplex};
pub use terrains::TerrainRepo;
