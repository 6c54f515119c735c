//! ILAsm identifier quoting for member and parameter names.

/// Words ILAsm reserves; a name spelled like one of them must be quoted.
const KEYWORDS: &[&str] = &[
    "abstract", "add", "algorithm", "alignment", "and", "ansi", "any", "arglist", "array",
    "as", "assembly", "assert", "at", "auto", "autochar", "beforefieldinit", "beq", "bge",
    "bgt", "ble", "blob", "blob_object", "blt", "bne", "bool", "box", "br", "break", "brfalse",
    "brinst", "brnull", "brtrue", "brzero", "bstr", "bytearray", "byvalstr", "call", "calli",
    "callmostderived", "callvirt", "carray", "castclass", "catch", "cdecl", "ceq", "cf", "cgt",
    "char", "cil", "ckfinite", "class", "clsid", "clt", "const", "conv", "cpblk", "cpobj",
    "currency", "custom", "date", "decimal", "default", "demand", "deny", "div", "dup",
    "endfault", "endfilter", "endfinally", "enum", "error", "explicit", "extends", "extern",
    "false", "famandassem", "family", "famorassem", "fastcall", "fault", "field", "filetime",
    "filter", "final", "finally", "fixed", "float", "float32", "float64", "forwardref",
    "fromunmanaged", "handler", "hidebysig", "hresult", "idispatch", "il", "illegal",
    "implements", "implicitcom", "implicitres", "import", "in", "inheritcheck", "init",
    "initblk", "initobj", "initonly", "instance", "int", "int16", "int32", "int64", "int8",
    "interface", "internalcall", "isinst", "iunknown", "jmp", "lasterr", "lcid", "ldarg",
    "ldarga", "ldc", "ldelem", "ldelema", "ldfld", "ldflda", "ldftn", "ldind", "ldlen",
    "ldloc", "ldloca", "ldnull", "ldobj", "ldsfld", "ldsflda", "ldstr", "ldtoken",
    "ldvirtftn", "leave", "linkcheck", "literal", "localloc", "lpstr", "lpstruct", "lptstr",
    "lpvoid", "lpwstr", "managed", "marshal", "method", "mkrefany", "modopt", "modreq", "mul",
    "native", "neg", "nested", "newarr", "newobj", "newslot", "noappdomain", "noinlining",
    "nomachine", "nomangle", "nometadata", "noncasdemand", "noncasinheritance",
    "noncaslinkdemand", "nop", "noprocess", "not", "notremotable", "notserialized", "null",
    "nullref", "object", "objectref", "opt", "optil", "or", "out", "permitonly", "pinned",
    "pinvokeimpl", "pop", "prejitdeny", "prejitgrant", "preservesig", "private",
    "privatescope", "protected", "public", "record", "refany", "refanytype", "refanyval",
    "rem", "reqmin", "reqopt", "reqrefuse", "reqsecobj", "request", "ret", "rethrow",
    "retval", "rtspecialname", "runtime", "safearray", "sealed", "sequential", "serializable",
    "shl", "shr", "sizeof", "special", "specialname", "starg", "static", "stdcall", "stelem",
    "stfld", "stind", "stloc", "stobj", "storage", "stored_object", "stream",
    "streamed_object", "string", "struct", "stsfld", "sub", "switch", "synchronized",
    "syschar", "sysstring", "tail", "tbstr", "thiscall", "throw", "tls", "to", "true",
    "typedref", "unaligned", "unbox", "unicode", "unmanaged", "unmanagedexp", "unsigned",
    "unused", "userdefined", "value", "valuetype", "vararg", "variant", "vector", "virtual",
    "void", "volatile", "wchar", "winapi", "with", "wrapper", "xor",
];

/// Return `name` as ILAsm accepts it.
///
/// Names made of identifier characters that are not keywords pass through unchanged.
/// Everything else is wrapped in single quotes with `'` and `\` escaped. `.ctor` and
/// `.cctor` are special and never quoted.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    if is_plain_identifier(name) {
        return name.to_string();
    }

    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('\'');
    for c in name.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

fn is_plain_identifier(name: &str) -> bool {
    if name == ".ctor" || name == ".cctor" {
        return true;
    }

    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !(first.is_alphabetic() || matches!(first, '_' | '$' | '@' | '`' | '?')) {
        return false;
    }
    if !chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '@' | '`' | '?' | '.')) {
        return false;
    }

    KEYWORDS.binary_search(&name).is_err()
}
