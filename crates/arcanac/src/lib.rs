//! Library surface behind the `arcanac` binary, split out so the
//! pipeline driver and diagnostic rendering can be exercised directly
//! from integration tests without shelling out to the binary.

pub mod diagnostics;
pub mod pipeline;
