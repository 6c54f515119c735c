//! The `Assembly` table (0x20): the manifest of this assembly, at most one row.

mod raw;
mod reader;

pub use raw::*;

/// Flags shared by `Assembly` and `AssemblyRef` rows (ECMA-335 II.23.1.2)
#[allow(non_snake_case)]
pub mod AssemblyFlags {
    /// The full public key is stored, not its token
    pub const PUBLIC_KEY: u32 = 0x0001;
    /// The assembly can be retargeted
    pub const RETARGETABLE: u32 = 0x0100;
    /// JIT tracking is disabled
    pub const DISABLE_JIT_COMPILE_OPTIMIZER: u32 = 0x4000;
    /// JIT tracking is enabled
    pub const ENABLE_JIT_COMPILE_TRACKING: u32 = 0x8000;
}

/// Hash algorithm identifiers (ECMA-335 II.23.1.1)
#[allow(non_snake_case)]
pub mod AssemblyHashAlgorithm {
    /// No hash
    pub const NONE: u32 = 0x0000;
    /// MD5
    pub const MD5: u32 = 0x8003;
    /// SHA-1
    pub const SHA1: u32 = 0x8004;
}
