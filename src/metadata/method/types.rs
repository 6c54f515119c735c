//! Flag sets of method definitions and method bodies (ECMA-335 II.23.1.10, II.23.1.11, II.25.4).

use bitflags::bitflags;

/// Mask of the code type bits of `ImplFlags`
pub const METHOD_IMPL_CODE_TYPE_MASK: u32 = 0x0003;
/// Mask of the managed bit of `ImplFlags`
pub const METHOD_IMPL_MANAGED_MASK: u32 = 0x0004;
/// Mask of the member access bits of `Flags`
pub const METHOD_ACCESS_MASK: u32 = 0x0007;
/// Mask of the vtable layout bit of `Flags`
pub const METHOD_VTABLE_LAYOUT_MASK: u32 = 0x0100;

bitflags! {
    /// Code type of a method implementation
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MethodImplCodeType: u32 {
        /// `cil`
        const IL = 0x0000;
        /// `native`
        const NATIVE = 0x0001;
        /// `optil`
        const OPTIL = 0x0002;
        /// `runtime`
        const RUNTIME = 0x0003;
    }
}

impl MethodImplCodeType {
    /// Extract the code type from `ImplFlags`
    #[must_use]
    pub fn from_impl_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & METHOD_IMPL_CODE_TYPE_MASK)
    }
}

bitflags! {
    /// Implementation options, printed after the code type
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MethodImplOptions: u32 {
        /// `unmanaged`
        const UNMANAGED = 0x0004;
        /// `noinlining`
        const NO_INLINING = 0x0008;
        /// `forwardref`
        const FORWARD_REF = 0x0010;
        /// `synchronized`
        const SYNCHRONIZED = 0x0020;
        /// `nooptimization`
        const NO_OPTIMIZATION = 0x0040;
        /// `preservesig`
        const PRESERVE_SIG = 0x0080;
        /// `aggressiveinlining`
        const AGGRESSIVE_INLINING = 0x0100;
        /// `internalcall`
        const INTERNAL_CALL = 0x1000;
    }
}

impl MethodImplOptions {
    /// Extract the options from `ImplFlags`
    #[must_use]
    pub fn from_impl_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !METHOD_IMPL_CODE_TYPE_MASK)
    }
}

/// Member access of a method, field or nested type.
///
/// The access bits are an enumeration, not a flag set; they are compared after masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAccess {
    /// `privatescope`
    CompilerControlled,
    /// `private`
    Private,
    /// `famandassem`
    FamAndAssem,
    /// `assembly`
    Assem,
    /// `family`
    Family,
    /// `famorassem`
    FamOrAssem,
    /// `public`
    Public,
}

impl MemberAccess {
    /// Extract the access from method or field `Flags`
    #[must_use]
    pub fn from_flags(flags: u32) -> Self {
        match flags & METHOD_ACCESS_MASK {
            1 => MemberAccess::Private,
            2 => MemberAccess::FamAndAssem,
            3 => MemberAccess::Assem,
            4 => MemberAccess::Family,
            5 => MemberAccess::FamOrAssem,
            6 => MemberAccess::Public,
            _ => MemberAccess::CompilerControlled,
        }
    }

    /// The ILAsm keyword of this access
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            MemberAccess::CompilerControlled => "privatescope",
            MemberAccess::Private => "private",
            MemberAccess::FamAndAssem => "famandassem",
            MemberAccess::Assem => "assembly",
            MemberAccess::Family => "family",
            MemberAccess::FamOrAssem => "famorassem",
            MemberAccess::Public => "public",
        }
    }
}

bitflags! {
    /// Method attributes other than access
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MethodModifiers: u32 {
        /// `unmanagedexp`
        const UNMANAGED_EXPORT = 0x0008;
        /// `static`
        const STATIC = 0x0010;
        /// `final`
        const FINAL = 0x0020;
        /// `virtual`
        const VIRTUAL = 0x0040;
        /// `hidebysig`
        const HIDE_BY_SIG = 0x0080;
        /// `newslot`
        const NEW_SLOT = 0x0100;
        /// `strict`
        const STRICT = 0x0200;
        /// `abstract`
        const ABSTRACT = 0x0400;
        /// `specialname`
        const SPECIAL_NAME = 0x0800;
        /// `rtspecialname`
        const RTSPECIAL_NAME = 0x1000;
        /// `pinvokeimpl`
        const PINVOKE_IMPL = 0x2000;
        /// Declarative security is attached
        const HAS_SECURITY = 0x4000;
        /// `reqsecobj`
        const REQUIRE_SEC_OBJECT = 0x8000;
    }
}

impl MethodModifiers {
    /// Extract the modifiers from method `Flags`
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !METHOD_ACCESS_MASK)
    }
}

bitflags! {
    /// Flags of a method body header
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MethodBodyFlags: u16 {
        /// Tiny header, in the low two bits
        const TINY_FORMAT = 0x2;
        /// Fat header, in the low two bits
        const FAT_FORMAT = 0x3;
        /// Data sections follow the code
        const MORE_SECTS = 0x8;
        /// Locals are zero initialised
        const INIT_LOCALS = 0x10;
    }
}

bitflags! {
    /// Flags of an extra data section after the code
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SectionFlags: u8 {
        /// Exception handling table
        const EHTABLE = 0x1;
        /// Reserved, optimised IL table
        const OPT_ILTABLE = 0x2;
        /// Fat clauses and a 24-bit section size
        const FAT_FORMAT = 0x40;
        /// Another section follows
        const MORE_SECTS = 0x80;
    }
}
