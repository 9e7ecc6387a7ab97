/// 1 eV expressed in kg nm^2 / s^2
pub const EV: f64 = 0.1602176634;

/// Boltzmann constant (eV/K)
pub const KB: f64 = 8.617333262e-5;

/// Atomic mass unit (kg)
pub const AMU: f64 = 1.66054e-27;

/// 1 eV/nm^3 expressed in bar
pub const EV_PER_NM3_IN_BAR: f64 = 1602.176634;
