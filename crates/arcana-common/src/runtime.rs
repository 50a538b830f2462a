/// Stable code for the one runtime error family the compiler knows about.
///
/// Runtime errors are never raised by the compiler itself; this constant
/// is embedded into the emitted program's runtime-helper prologue so the
/// emitted code can raise it at execution time (quota exhaustion).
pub const R_VERITATEM_NON_ATTIGI: &str = "R0100_VERITATEM_NON_ATTIGI";

/// The message paired with [`R_VERITATEM_NON_ATTIGI`] when a loop's
/// iteration counter reaches its quota.
pub const MSG_VERITATEM_NON_ATTIGI: &str = "Veritatem non attigi.";

/// The message `assert_positive` raises when a loop step is non-positive
/// at runtime (step was a non-literal expression the analyzer couldn't
/// validate at compile time).
pub const MSG_STATIONARIUS_ACCELERATIONIS: &str = "stationarius accelerationis";
