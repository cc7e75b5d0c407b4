/// Defines the directory where the simulation result files are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/plastsim/results";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/plastsim/test";

/// Defines the smallest allowed tolerance
pub const CONFIG_MIN_TOL: f64 = 1e-15;

/// Defines √(2/3)
pub const SQRT_2_BY_3: f64 = 0.816496580927726;

/// Defines the tolerance to accept the final pseudo-time after accumulating increments
pub const T_FIN_TOL: f64 = 1e-10;
