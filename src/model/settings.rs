pub const DEFAULT_DRAWS: usize = 500;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_EPSILON: f64 = 0.5;
pub const DEFAULT_MIN_SIZE: usize = 2;
pub const DEFAULT_STEP: usize = 1;
pub const DEFAULT_K_MIN: usize = 2;
pub const DEFAULT_K_MAX: usize = 8;
pub const DEFAULT_MIN_PAIRS: usize = 3;
