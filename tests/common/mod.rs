//! Shared fixtures for the integration tests.

#![allow(dead_code)]

#[path = "../../src/test/image.rs"]
mod image;

pub use image::*;

/// `Demo.Program` with an entry point, a guarded method, a switch, a literal field, a
/// property and a custom attribute, referencing `mscorlib` and `kernel32.dll`.
pub fn sample() -> ImageBuilder {
    let mut builder = ImageBuilder::new();
    builder.module("Sample.exe");
    builder.assembly("Sample", [1, 0, 0, 0], &[]);
    builder.assembly_ref(
        "mscorlib",
        [4, 0, 0, 0],
        &[0xB7, 0x7A, 0x5C, 0x56, 0x19, 0x34, 0xE0, 0x89],
    );
    builder.module_ref("kernel32.dll");

    let mscorlib = coded::resolution_scope(table::ASSEMBLY_REF, 1);
    builder.type_ref(mscorlib, "Object", "System"); // 1
    builder.type_ref(mscorlib, "Console", "System"); // 2
    builder.type_ref(mscorlib, "Exception", "System"); // 3
    builder.type_ref(mscorlib, "ObsoleteAttribute", "System"); // 4

    builder.type_def(0, "<Module>", "", 0, 1, 1);
    let object = coded::type_def_or_ref(table::TYPE_REF, 1);
    builder.type_def(0x0010_0001, "Program", "Demo", object, 1, 1);

    builder.field(0x0056, "Max", &[0x06, 0x08]);
    builder.constant(0x08, coded::has_constant(table::FIELD, 1), &10i32.to_le_bytes());

    let hello = builder.add_user_string("Hello");
    let mut main = vec![0x72];
    main.extend_from_slice(&hello.to_le_bytes()[..3]);
    main.push(0x70);
    main.extend_from_slice(&[0x28, 0x01, 0x00, 0x00, 0x0A, 0x2A]);
    let main = builder.add_method_body(&tiny_body(&main));

    let guarded = builder.add_method_body(&fat_body(
        1,
        0,
        false,
        &[0x00, 0xDE, 0x03, 0x26, 0xDE, 0x00, 0x2A],
        &[Clause {
            flags: 0,
            try_offset: 0,
            try_length: 3,
            handler_offset: 3,
            handler_length: 3,
            extra: 0x0100_0003,
        }],
    ));

    let choose = builder.add_method_body(&tiny_body(&[
        0x02, // ldarg.0
        0x45, 0x02, 0x00, 0x00, 0x00, // switch, two targets
        0x00, 0x00, 0x00, 0x00, //
        0x02, 0x00, 0x00, 0x00, //
        0x17, 0x2A, // ldc.i4.1; ret
        0x18, 0x2A, // ldc.i4.2; ret
    ]));

    let count = builder.add_method_body(&tiny_body(&[0x1F, 0x2A, 0x2A]));

    builder.method_def(main, 0, 0x0096, "Main", &[0x00, 0x01, 0x01, 0x1D, 0x0E], 1);
    builder.method_def(guarded, 0, 0x0091, "Guarded", &[0x00, 0x00, 0x01], 2);
    builder.method_def(choose, 0, 0x0091, "Choose", &[0x00, 0x01, 0x08, 0x08], 2);
    builder.method_def(count, 0, 0x0886, "get_Count", &[0x20, 0x00, 0x08], 2);
    builder.param(0, 1, "args");

    builder.member_ref(
        coded::member_ref_parent(table::TYPE_REF, 2),
        "WriteLine",
        &[0x00, 0x01, 0x01, 0x0E],
    );
    builder.member_ref(
        coded::member_ref_parent(table::TYPE_REF, 4),
        ".ctor",
        &[0x20, 0x01, 0x01, 0x0E],
    );
    builder.custom_attribute(
        coded::has_custom_attribute(table::TYPE_DEF, 2),
        coded::custom_attribute_type(table::MEMBER_REF, 2),
        &[0x01, 0x00, 0x02, 0x68, 0x69, 0x00, 0x00],
    );

    builder.property_map(2, 1);
    builder.property(0, "Count", &[0x28, 0x00, 0x08]);
    builder.method_semantics(2, 4, coded::has_semantics(table::PROPERTY, 1));

    builder.set_entry_point(0x0600_0001);
    builder
}
