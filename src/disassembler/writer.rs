//! Text listings of methods, types and whole assemblies.
//!
//! [`Writer`] walks the entities of [`crate::disassembler::entities`] and writes ILAsm-like
//! text into any [`std::fmt::Write`] sink. Nesting is expressed with the indent unit of the
//! active [`DumpOptions`].

use std::fmt::{self, Write as _};

use tracing::debug;

use crate::{
    disassembler::{
        config::DumpOptions,
        constant::quote_string,
        entities::{
            hex_bytes, Assembly, AssemblyReference, CustomAttribute, Event, Field,
            MethodDefinition, Property, TypeDefinition,
        },
        instruction::{Instruction, Operand},
        regions::{ExceptionRegion, HandlerKind},
        resolver::Resolver,
    },
    metadata::{
        source::MetadataSource,
        tables::{AssemblyFlags, TableId},
        token::Token,
    },
    Result,
};

/// Column of the first operand, counted from the mnemonic
const MNEMONIC_WIDTH: usize = 10;
/// Width of the `IL_xxxx:  ` label
const LABEL_WIDTH: usize = 10;
/// Continuation indent of `.locals` after the opening parenthesis
const LOCALS_CONTINUATION: usize = 13;

/// Line sink that tracks the current nesting depth.
struct Listing<'w, W: fmt::Write> {
    out: &'w mut W,
    indent: &'w str,
    show_bytes: bool,
    depth: usize,
}

impl<'w, W: fmt::Write> Listing<'w, W> {
    fn new(out: &'w mut W, options: &'w DumpOptions) -> Self {
        Listing {
            out,
            indent: &options.indent,
            show_bytes: options.show_bytes,
            depth: 0,
        }
    }

    fn padding(&self) -> String {
        self.indent.repeat(self.depth)
    }

    fn line(&mut self, text: impl fmt::Display) -> Result<()> {
        for _ in 0..self.depth {
            self.out.write_str(self.indent)?;
        }
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    fn blank(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    fn open(&mut self) -> Result<()> {
        self.line("{")?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self, trailer: &str) -> Result<()> {
        self.depth = self.depth.saturating_sub(1);
        self.line(format_args!("}}{trailer}"))
    }

    /// `/*06000001*/ ` when tokens are shown, empty otherwise
    fn token(&self, token: Token) -> String {
        if self.show_bytes {
            format!("/*{:08X}*/ ", token.value())
        } else {
            String::new()
        }
    }
}

/// Writes listings according to a set of [`DumpOptions`].
///
/// ```rust,no_run
/// use cildasm::{Assembly, DumpOptions, Writer};
///
/// let assembly = Assembly::from_file(std::path::Path::new("app.dll"))?;
/// let mut text = String::new();
/// Writer::new(DumpOptions::with_bytes()).dump_assembly(&assembly, &mut text)?;
/// print!("{text}");
/// # Ok::<(), cildasm::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Writer {
    options: DumpOptions,
}

impl Writer {
    /// Create a writer with the given options
    #[must_use]
    pub fn new(options: DumpOptions) -> Self {
        Writer { options }
    }

    /// The active options
    #[must_use]
    pub fn options(&self) -> &DumpOptions {
        &self.options
    }

    /// Write the `.method` block of `method`, including its body.
    ///
    /// # Errors
    /// Returns an error if the method's metadata, signature or body cannot be decoded.
    pub fn dump_method<S, W>(&self, method: &MethodDefinition<'_, S>, out: &mut W) -> Result<()>
    where
        S: MetadataSource + ?Sized,
        W: fmt::Write,
    {
        let mut listing = Listing::new(out, &self.options);
        write_method(&mut listing, method)
    }

    /// Write the `.class` block of `type_definition` with its nested types and members.
    ///
    /// # Errors
    /// Returns an error if any member of the type cannot be decoded.
    pub fn dump_type<S, W>(&self, type_definition: &TypeDefinition<'_, S>, out: &mut W) -> Result<()>
    where
        S: MetadataSource + ?Sized,
        W: fmt::Write,
    {
        let mut listing = Listing::new(out, &self.options);
        write_type(&mut listing, type_definition)
    }

    /// Write the full listing of `assembly`: references, manifest, module header, then
    /// global members and every top-level type.
    ///
    /// # Errors
    /// Returns the first error met while decoding any part of the image.
    pub fn dump_assembly<W: fmt::Write>(&self, assembly: &Assembly, out: &mut W) -> Result<()> {
        let mut listing = Listing::new(out, &self.options);

        for module in assembly.module_references()? {
            let token = listing.token(module.token());
            listing.line(format_args!(".module extern {token}{}", module.name()?))?;
        }
        for reference in assembly.assembly_references()? {
            write_assembly_reference(&mut listing, &reference)?;
        }
        if assembly.has_manifest() {
            write_manifest(&mut listing, assembly)?;
        }
        write_module_header(&mut listing, assembly)?;

        listing.blank()?;
        listing.line("// =============== CLASS MEMBERS DECLARATION ===================")?;
        listing.blank()?;

        let types = assembly.type_definitions()?;
        debug!(types = types.len(), "writing class members");
        for type_definition in &types {
            if type_definition.is_global() {
                for field in type_definition.fields()? {
                    write_field(&mut listing, &field)?;
                }
                for method in type_definition.methods()? {
                    write_method(&mut listing, &method)?;
                }
            } else {
                write_type(&mut listing, type_definition)?;
            }
        }
        Ok(())
    }

    /// [`Writer::dump_method`] into a new `String`
    ///
    /// # Errors
    /// See [`Writer::dump_method`].
    pub fn method_to_string<S: MetadataSource + ?Sized>(
        &self,
        method: &MethodDefinition<'_, S>,
    ) -> Result<String> {
        let mut text = String::new();
        self.dump_method(method, &mut text)?;
        Ok(text)
    }

    /// [`Writer::dump_type`] into a new `String`
    ///
    /// # Errors
    /// See [`Writer::dump_type`].
    pub fn type_to_string<S: MetadataSource + ?Sized>(
        &self,
        type_definition: &TypeDefinition<'_, S>,
    ) -> Result<String> {
        let mut text = String::new();
        self.dump_type(type_definition, &mut text)?;
        Ok(text)
    }

    /// [`Writer::dump_assembly`] into a new `String`
    ///
    /// # Errors
    /// See [`Writer::dump_assembly`].
    pub fn assembly_to_string(&self, assembly: &Assembly) -> Result<String> {
        let mut text = String::new();
        self.dump_assembly(assembly, &mut text)?;
        Ok(text)
    }
}

fn write_assembly_reference<S, W>(
    listing: &mut Listing<'_, W>,
    reference: &AssemblyReference<'_, S>,
) -> Result<()>
where
    S: MetadataSource + ?Sized,
    W: fmt::Write,
{
    let token = listing.token(reference.token());
    let retargetable = if reference.flags() & AssemblyFlags::RETARGETABLE != 0 {
        "retargetable "
    } else {
        ""
    };
    listing.line(format_args!(".assembly extern {token}{retargetable}{}", reference.name()?))?;
    listing.open()?;

    let key = reference.public_key_or_token()?;
    if !key.is_empty() {
        let directive = if reference.has_full_public_key() {
            ".publickey"
        } else {
            ".publickeytoken"
        };
        listing.line(format_args!("{directive} = ({} )", spaced_hex(key)))?;
    }
    let culture = reference.culture()?;
    if !culture.is_empty() {
        listing.line(format_args!(".locale '{culture}'"))?;
    }
    let hash = reference.hash_value()?;
    if !hash.is_empty() {
        listing.line(format_args!(".hash = ({} )", spaced_hex(hash)))?;
    }
    listing.line(format_args!(".ver {}", reference.version()))?;
    for attribute in reference.custom_attributes()? {
        write_custom_attribute(listing, &attribute)?;
    }

    listing.close("")?;
    listing.blank()
}

fn write_manifest<W: fmt::Write>(listing: &mut Listing<'_, W>, assembly: &Assembly) -> Result<()> {
    let token = listing.token(TableId::Assembly.token(1));
    let retargetable = if assembly.flags()? & AssemblyFlags::RETARGETABLE != 0 {
        "retargetable "
    } else {
        ""
    };
    listing.line(format_args!(".assembly {token}{retargetable}{}", assembly.name()?))?;
    listing.open()?;

    for attribute in assembly.custom_attributes()? {
        write_custom_attribute(listing, &attribute)?;
    }
    listing.line(format_args!(".hash algorithm 0x{:08X}", assembly.hash_algorithm()?))?;
    let public_key = assembly.public_key()?;
    if !public_key.is_empty() {
        listing.line(format_args!(".publickey = ({} )", spaced_hex(public_key)))?;
    }
    let culture = assembly.culture()?;
    if !culture.is_empty() {
        listing.line(format_args!(".locale '{culture}'"))?;
    }
    listing.line(format_args!(".ver {}", assembly.version()?))?;

    listing.close("")?;
    Ok(())
}

fn write_module_header<W: fmt::Write>(
    listing: &mut Listing<'_, W>,
    assembly: &Assembly,
) -> Result<()> {
    listing.line(format_args!(".module {}", assembly.module_name()?))?;
    let mvid = assembly.mvid()?.to_string().to_uppercase();
    listing.line(format_args!("// MVID: {{{mvid}}}"))?;
    for attribute in assembly.module_custom_attributes()? {
        write_custom_attribute(listing, &attribute)?;
    }

    let info = assembly.image_info();
    listing.line(format_args!(".imagebase 0x{:08X}", info.image_base))?;
    listing.line(format_args!(".file alignment 0x{:08X}", info.file_alignment))?;
    listing.line(format_args!(".stackreserve 0x{:08X}", info.stack_reserve))?;
    listing.line(format_args!(".subsystem 0x{:04X}", info.subsystem))?;
    listing.line(format_args!(".corflags 0x{:08X}", info.cor_flags))
}

fn write_custom_attribute<S, W>(
    listing: &mut Listing<'_, W>,
    attribute: &CustomAttribute<'_, S>,
) -> Result<()>
where
    S: MetadataSource + ?Sized,
    W: fmt::Write,
{
    let tokens = if listing.show_bytes {
        format!(
            "/*{:08X}:{:08X}*/ ",
            attribute.token().value(),
            attribute.constructor_token().value()
        )
    } else {
        String::new()
    };
    listing.line(format_args!(
        ".custom {tokens}{} = ({} )",
        attribute.constructor()?,
        spaced_hex(attribute.value()?)
    ))
}

fn write_type<S, W>(listing: &mut Listing<'_, W>, type_definition: &TypeDefinition<'_, S>) -> Result<()>
where
    S: MetadataSource + ?Sized,
    W: fmt::Write,
{
    let token = listing.token(type_definition.token());
    let mut header = format!(".class {token}{}", type_definition.header_text()?);
    if let Some(base) = type_definition.base_type()? {
        header.push_str(" extends ");
        header.push_str(&base);
    }
    listing.line(header)?;
    listing.open()?;

    if let Some((packing_size, class_size)) = type_definition.layout()? {
        listing.line(format_args!(".pack {packing_size}"))?;
        listing.line(format_args!(".size {class_size}"))?;
    }
    for attribute in type_definition.custom_attributes()? {
        write_custom_attribute(listing, &attribute)?;
    }
    for nested in type_definition.nested_types()? {
        write_type(listing, &nested)?;
    }
    for field in type_definition.fields()? {
        write_field(listing, &field)?;
    }
    for method in type_definition.methods()? {
        write_method(listing, &method)?;
    }
    for event in type_definition.events()? {
        write_event(listing, &event)?;
    }
    for property in type_definition.properties()? {
        write_property(listing, &property)?;
    }

    listing.close(&format!(" // end of class {}", type_definition.full_name()?))?;
    listing.blank()
}

fn write_field<S, W>(listing: &mut Listing<'_, W>, field: &Field<'_, S>) -> Result<()>
where
    S: MetadataSource + ?Sized,
    W: fmt::Write,
{
    let token = listing.token(field.token());
    listing.line(format_args!(".field {token}{}", field.declaration()?))?;
    for attribute in field.custom_attributes()? {
        write_custom_attribute(listing, &attribute)?;
    }
    Ok(())
}

fn write_event<S, W>(listing: &mut Listing<'_, W>, event: &Event<'_, S>) -> Result<()>
where
    S: MetadataSource + ?Sized,
    W: fmt::Write,
{
    let token = listing.token(event.token());
    listing.line(format_args!(".event {token}{}", event.declaration()?))?;
    listing.open()?;
    for attribute in event.custom_attributes()? {
        write_custom_attribute(listing, &attribute)?;
    }
    for accessor in event.accessors()? {
        listing.line(format_args!("{} {}", accessor.directive(), accessor.text))?;
    }
    listing.close(&format!(" // end of event {}", event.name()?))
}

fn write_property<S, W>(listing: &mut Listing<'_, W>, property: &Property<'_, S>) -> Result<()>
where
    S: MetadataSource + ?Sized,
    W: fmt::Write,
{
    let token = listing.token(property.token());
    listing.line(format_args!(".property {token}{}", property.declaration()?))?;
    listing.open()?;
    for attribute in property.custom_attributes()? {
        write_custom_attribute(listing, &attribute)?;
    }
    for accessor in property.accessors()? {
        listing.line(format_args!("{} {}", accessor.directive(), accessor.text))?;
    }
    listing.close(&format!(" // end of property {}", property.name()?))
}

fn write_method<S, W>(listing: &mut Listing<'_, W>, method: &MethodDefinition<'_, S>) -> Result<()>
where
    S: MetadataSource + ?Sized,
    W: fmt::Write,
{
    let token = listing.token(method.token());
    listing.line(format_args!(".method {token}{}", method.header_text()?))?;
    listing.open()?;

    for attribute in method.custom_attributes()? {
        write_custom_attribute(listing, &attribute)?;
    }

    if let Some(body) = method.body()? {
        for target in method.overrides()? {
            listing.line(format_args!(".override {target}"))?;
        }
        if method.is_entry_point() {
            listing.line(".entrypoint")?;
        }
        listing.line(format_args!(
            "// code size {:>8} (0x{:x})",
            body.size_code, body.size_code
        ))?;
        listing.line(format_args!(".maxstack {:>2}", body.max_stack))?;

        let locals = method.locals()?;
        if !locals.is_empty() {
            let separator = format!(",\n{}{}", listing.padding(), " ".repeat(LOCALS_CONTINUATION));
            let declarations: Vec<String> = locals.iter().map(ToString::to_string).collect();
            let init = if body.is_init_local { " init" } else { "" };
            listing.line(format_args!(".locals{init} ({})", declarations.join(separator.as_str())))?;
        }

        write_instructions(listing, method, &body.code)?;
    }

    listing.close(&format!(" // end of method {}", method.name()?))?;
    listing.blank()
}

/// Instructions interleaved with the braces of their protected regions.
///
/// Regions are kept on a stack: before each instruction every region ending at or before
/// its offset is closed, a filter switches to its handler at the handler start, and every
/// region opening at the offset is opened in sorted order.
fn write_instructions<S, W>(
    listing: &mut Listing<'_, W>,
    method: &MethodDefinition<'_, S>,
    code: &[u8],
) -> Result<()>
where
    S: MetadataSource + ?Sized,
    W: fmt::Write,
{
    let resolver = Resolver::new(method.source());
    let regions = method.exception_regions()?;
    let mut opened = vec![false; regions.len()];
    let mut stack: Vec<usize> = Vec::new();

    for instruction in method.instructions()? {
        let offset = instruction.offset;
        close_regions(listing, &regions, &mut stack, offset)?;

        if let Some(&top) = stack.last() {
            let region = &regions[top];
            if region.kind == HandlerKind::Filter && region.start == offset {
                listing.close(" // end filter")?;
                listing.line("{ // handler")?;
                listing.depth += 1;
            }
        }

        for (index, region) in regions.iter().enumerate() {
            if !opened[index] && region.opening_offset() == offset {
                opened[index] = true;
                listing.line(region.header_text(&resolver)?)?;
                listing.open()?;
                stack.push(index);
            }
        }

        write_instruction(listing, instruction, code)?;
    }

    close_regions(listing, &regions, &mut stack, u32::MAX)
}

fn close_regions<W: fmt::Write>(
    listing: &mut Listing<'_, W>,
    regions: &[ExceptionRegion],
    stack: &mut Vec<usize>,
    offset: u32,
) -> Result<()> {
    while let Some(&top) = stack.last() {
        let region = &regions[top];
        if region.end > offset {
            break;
        }
        stack.pop();
        if region.kind == HandlerKind::Try {
            listing.close(" // end .try")?;
        } else {
            listing.close(" // end handler")?;
        }
    }
    Ok(())
}

fn write_instruction<W: fmt::Write>(
    listing: &mut Listing<'_, W>,
    instruction: &Instruction,
    code: &[u8],
) -> Result<()> {
    let mut text = format!("IL_{:04x}:  ", instruction.offset);
    if listing.show_bytes {
        text.push_str(&bytes_comment(instruction, code));
    }

    if let Some(targets) = instruction.switch_targets() {
        let continuation = format!(
            "\n{}{}",
            listing.padding(),
            " ".repeat(LABEL_WIDTH + MNEMONIC_WIDTH + 1)
        );
        let labels: Vec<String> = targets.iter().map(|target| format!("IL_{target:04x}")).collect();
        write!(
            text,
            "{:<width$} ({}{})",
            instruction.mnemonic(),
            continuation,
            labels.join(format!(",{continuation}").as_str()),
            width = MNEMONIC_WIDTH
        )?;
        return listing.line(text);
    }

    match operand_text(instruction, code) {
        Some(operand) => write!(
            text,
            "{:<width$} {operand}",
            instruction.mnemonic(),
            width = MNEMONIC_WIDTH
        )?,
        None => text.push_str(instruction.mnemonic()),
    }
    listing.line(text)
}

/// Operand bytes of `instruction` within `code`
fn operand_bytes<'c>(instruction: &Instruction, code: &'c [u8]) -> &'c [u8] {
    let start = instruction.offset as usize + instruction.opcode.size() as usize;
    let end = instruction.offset as usize + instruction.size as usize;
    code.get(start..end).unwrap_or(&[])
}

fn operand_text(instruction: &Instruction, code: &[u8]) -> Option<String> {
    let text = match &instruction.operand {
        Operand::None | Operand::Switch(_) => return None,
        Operand::Int8(value) => value.to_string(),
        Operand::UInt8(value) => value.to_string(),
        Operand::Int32(value) => value.to_string(),
        Operand::Int64(value) => format!("0x{value:x}"),
        Operand::Float32(value) => float_text(
            value.is_finite(),
            *value == 0.0,
            value.is_sign_negative(),
            value.fract() == 0.0,
            value,
            operand_bytes(instruction, code),
        ),
        Operand::Float64(value) => float_text(
            value.is_finite(),
            *value == 0.0,
            value.is_sign_negative(),
            value.fract() == 0.0,
            value,
            operand_bytes(instruction, code),
        ),
        Operand::Branch(_) => {
            let target = instruction.branch_target()?;
            format!("IL_{target:04x}")
        }
        Operand::Variable { name, .. } => name.clone(),
        Operand::String {
            text, printable, ..
        } => {
            if *printable {
                quote_string(text)
            } else {
                text.clone()
            }
        }
        Operand::Token { text, .. } => text.clone(),
    };
    Some(text)
}

/// Float literal: byte dump for NaN and infinities, signed zero, and a trailing `.` on
/// integral values so they read back as floats.
fn float_text(
    finite: bool,
    zero: bool,
    negative: bool,
    integral: bool,
    value: impl fmt::Display,
    bytes: &[u8],
) -> String {
    if !finite {
        format!("({})", hex_bytes(bytes))
    } else if zero {
        let text = if negative { "-0.0" } else { "0.0" };
        text.to_string()
    } else if integral {
        format!("{value}.")
    } else {
        value.to_string()
    }
}

/// `/* 72   | (70)000001       */ `
fn bytes_comment(instruction: &Instruction, code: &[u8]) -> String {
    let value = match (&instruction.operand, instruction.token()) {
        (Operand::Switch(_), _) => operand_bytes(instruction, code)
            .iter()
            .take(4)
            .map(|byte| format!("{byte:02X}"))
            .collect(),
        (_, Some(token)) => format!("({:02X}){:06X}", token.table(), token.row()),
        _ => operand_bytes(instruction, code)
            .iter()
            .map(|byte| format!("{byte:02X}"))
            .collect(),
    };
    let opcode = format!("{:02X}", instruction.opcode.value);
    format!("/* {opcode:<4} | {value:<16} */ ")
}

/// `01 02 03` with a leading space, the form used inside `( .. )`
fn spaced_hex(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        String::new()
    } else {
        format!(" {}", hex_bytes(bytes))
    }
}
