mod species;

pub use species::Species;

/// Physical constants of an atom kind
pub trait AtomType {
    /// Atomic mass (kg)
    fn mass(&self) -> f64;
    /// Cubic lattice constant (nm)
    fn lattice_constant(&self) -> f64;
    /// Pair-potential well depth D (eV)
    fn well_depth(&self) -> f64;
    /// Pair-potential zero crossing sigma (nm)
    fn sigma(&self) -> f64;
}
