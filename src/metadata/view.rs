//! A loaded module: the PE image together with its parsed metadata root, heaps and tables.
//!
//! [`CilView`] keeps the [`File`] alive and borrows the heaps and tables directly from its
//! bytes through an `ouroboros` self-reference, so nothing is copied after load. It is the
//! [`MetadataSource`] used by [`crate::Assembly::from_file`] and [`crate::Assembly::from_mem`].
//!
//! ```rust,ignore
//! use cildasm::metadata::{source::MetadataSource, tables::TableId, view::CilView};
//!
//! let view = CilView::from_file(std::path::Path::new("app.dll"))?;
//! println!("{} methods", view.row_count(TableId::MethodDef));
//! # Ok::<(), cildasm::Error>(())
//! ```

use std::{path::Path, sync::Arc};

use ouroboros::self_referencing;
use tracing::debug;

use crate::{
    file::{File, ImageInfo},
    metadata::{
        cor20header::Cor20Header,
        method::MethodBody,
        root::Root,
        source::MetadataSource,
        streams::{Blob, Guid, Strings, TablesHeader, UserStrings},
        tables::{
            AssemblyRaw, AssemblyRefRaw, ClassLayoutRaw, ConstantRaw, CustomAttributeRaw,
            EventMapRaw, EventRaw, FieldRaw, GenericParamRaw, ImplMapRaw, MemberRefRaw,
            MethodDefRaw, MethodImplRaw, MethodSemanticsRaw, MethodSpecRaw, ModuleRaw,
            ModuleRefRaw, NestedClassRaw, ParamRaw, PropertyMapRaw, PropertyRaw,
            StandAloneSigRaw, TableId, TypeDefRaw, TypeRefRaw, TypeSpecRaw,
        },
        token::Token,
    },
    Error::OutOfBounds,
    Result,
};

/// The parsed metadata of a [`CilView`], borrowing from the image bytes.
pub struct CilViewData<'a> {
    /// The CLR runtime header
    pub cor20header: Cor20Header,
    /// The metadata root and its stream directory
    pub metadata_root: Root,
    /// The `#~` (or `#-`) stream
    pub metadata_tables: Option<TablesHeader<'a>>,
    /// The `#Strings` heap
    pub strings: Option<Strings<'a>>,
    /// The `#US` heap
    pub userstrings: Option<UserStrings<'a>>,
    /// The `#GUID` heap
    pub guids: Option<Guid<'a>>,
    /// The `#Blob` heap
    pub blobs: Option<Blob<'a>>,
}

impl<'a> CilViewData<'a> {
    /// Locate and parse the metadata of `file`, whose bytes are `data`.
    ///
    /// # Errors
    /// Returns an error if the CLR header, the metadata root or one of the streams is invalid.
    pub fn from_file(file: &File, data: &'a [u8]) -> Result<Self> {
        let (clr_rva, clr_size) = file.clr()?;
        let clr_offset = file.rva_to_offset(clr_rva)?;
        let Some(clr_slice) = clr_offset
            .checked_add(clr_size)
            .and_then(|clr_end| data.get(clr_offset..clr_end))
        else {
            return Err(OutOfBounds);
        };
        let cor20header = Cor20Header::read(clr_slice)?;

        let metadata_offset = file.rva_to_offset(cor20header.meta_data_rva as usize)?;
        let Some(metadata_slice) = metadata_offset
            .checked_add(cor20header.meta_data_size as usize)
            .and_then(|metadata_end| data.get(metadata_offset..metadata_end))
        else {
            return Err(OutOfBounds);
        };
        let metadata_root = Root::read(metadata_slice)?;

        let mut metadata_tables = None;
        let mut strings = None;
        let mut userstrings = None;
        let mut guids = None;
        let mut blobs = None;

        for stream in &metadata_root.stream_headers {
            let start = stream.offset as usize;
            let Some(stream_data) = metadata_slice.get(start..start + stream.size as usize) else {
                return Err(OutOfBounds);
            };

            match stream.name.as_str() {
                "#~" | "#-" => metadata_tables = Some(TablesHeader::from(stream_data)?),
                "#Strings" => strings = Some(Strings::from(stream_data)?),
                "#US" => userstrings = Some(UserStrings::from(stream_data)?),
                "#GUID" => guids = Some(Guid::from(stream_data)?),
                "#Blob" => blobs = Some(Blob::from(stream_data)?),
                _ => {}
            }
        }

        debug!(
            version = %metadata_root.version,
            streams = metadata_root.stream_headers.len(),
            tables = metadata_tables.as_ref().map_or(0, TablesHeader::table_count),
            "loaded metadata"
        );

        Ok(CilViewData {
            cor20header,
            metadata_root,
            metadata_tables,
            strings,
            userstrings,
            guids,
            blobs,
        })
    }
}

/// A PE image with CLI metadata, read in place.
#[self_referencing]
pub struct CilView {
    file: Arc<File>,

    #[borrows(file)]
    #[not_covariant]
    data: CilViewData<'this>,
}

impl CilView {
    /// Load the assembly at `file`.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] for images without a CLR header and other errors
    /// for unreadable or corrupt files.
    pub fn from_file(file: &Path) -> Result<Self> {
        let input = Arc::new(File::from_file(file)?);
        Self::load(input)
    }

    /// Load an assembly that is already in memory.
    ///
    /// # Errors
    /// See [`CilView::from_file`].
    pub fn from_mem(data: Vec<u8>) -> Result<Self> {
        let input = Arc::new(File::from_mem(data)?);
        Self::load(input)
    }

    fn load(file: Arc<File>) -> Result<Self> {
        CilView::try_new(file, |file| CilViewData::from_file(file, file.data()))
    }

    /// The underlying image
    #[must_use]
    pub fn file(&self) -> &Arc<File> {
        self.borrow_file()
    }

    /// The CLR runtime header
    #[must_use]
    pub fn cor20header(&self) -> &Cor20Header {
        self.with_data(|data| &data.cor20header)
    }

    /// The metadata root
    #[must_use]
    pub fn metadata_root(&self) -> &Root {
        self.with_data(|data| &data.metadata_root)
    }

    /// The tables stream, if present
    #[must_use]
    pub fn tables(&self) -> Option<&TablesHeader> {
        self.with_data(|data| data.metadata_tables.as_ref())
    }

    /// The `#Strings` heap, if present
    #[must_use]
    pub fn strings(&self) -> Option<&Strings> {
        self.with_data(|data| data.strings.as_ref())
    }

    /// The `#US` heap, if present
    #[must_use]
    pub fn userstrings(&self) -> Option<&UserStrings> {
        self.with_data(|data| data.userstrings.as_ref())
    }

    /// The `#GUID` heap, if present
    #[must_use]
    pub fn guids(&self) -> Option<&Guid> {
        self.with_data(|data| data.guids.as_ref())
    }

    /// The `#Blob` heap, if present
    #[must_use]
    pub fn blobs(&self) -> Option<&Blob> {
        self.with_data(|data| data.blobs.as_ref())
    }
}

macro_rules! row_accessors {
    ($($name:ident => $raw:ty),* $(,)?) => {
        $(
            fn $name(&self, rid: u32) -> Result<$raw> {
                self.with_data(|data| {
                    let tables = data.metadata_tables.as_ref().ok_or(OutOfBounds)?;
                    tables.table::<$raw>().ok_or(OutOfBounds)?.get(rid)
                })
            }
        )*
    };
}

impl MetadataSource for CilView {
    fn row_count(&self, table: TableId) -> u32 {
        self.with_data(|data| {
            data.metadata_tables
                .as_ref()
                .map_or(0, |tables| tables.row_count(table))
        })
    }

    row_accessors!(
        module => ModuleRaw,
        type_ref => TypeRefRaw,
        type_def => TypeDefRaw,
        field => FieldRaw,
        method_def => MethodDefRaw,
        param => ParamRaw,
        member_ref => MemberRefRaw,
        constant => ConstantRaw,
        custom_attribute => CustomAttributeRaw,
        class_layout => ClassLayoutRaw,
        standalone_sig => StandAloneSigRaw,
        event_map => EventMapRaw,
        event => EventRaw,
        property_map => PropertyMapRaw,
        property => PropertyRaw,
        method_semantics => MethodSemanticsRaw,
        method_impl => MethodImplRaw,
        module_ref => ModuleRefRaw,
        type_spec => TypeSpecRaw,
        impl_map => ImplMapRaw,
        assembly => AssemblyRaw,
        assembly_ref => AssemblyRefRaw,
        nested_class => NestedClassRaw,
        generic_param => GenericParamRaw,
        method_spec => MethodSpecRaw,
    );

    fn string(&self, index: u32) -> Result<&str> {
        self.with_data(|data| data.strings.as_ref().ok_or(OutOfBounds)?.get(index as usize))
    }

    fn blob(&self, index: u32) -> Result<&[u8]> {
        self.with_data(|data| data.blobs.as_ref().ok_or(OutOfBounds)?.get(index as usize))
    }

    fn user_string(&self, index: u32) -> Result<String> {
        self.with_data(|data| {
            let heap = data.userstrings.as_ref().ok_or(OutOfBounds)?;
            Ok(heap.get(index as usize)?.to_string_lossy())
        })
    }

    fn guid(&self, index: u32) -> Result<uguid::Guid> {
        self.with_data(|data| data.guids.as_ref().ok_or(OutOfBounds)?.get(index as usize))
    }

    fn method_body(&self, rva: u32) -> Result<MethodBody> {
        let file = self.borrow_file();
        let offset = file.rva_to_offset(rva as usize)?;
        let Some(body) = file.data().get(offset..) else {
            return Err(OutOfBounds);
        };

        MethodBody::from(body)
    }

    fn entry_point(&self) -> Token {
        Token::new(self.cor20header().entry_point_token)
    }

    fn image_info(&self) -> ImageInfo {
        ImageInfo {
            cor_flags: self.cor20header().flags,
            ..self.borrow_file().image_info()
        }
    }
}
