//! Building blocks shared by all metadata tables: identifiers, index widths, coded indices
//! and the generic [`MetadataTable`] container.

mod access;
mod codedindex;
mod tabledata;
mod tableid;
mod tableinfo;

use std::marker::PhantomData;

use crate::{Error::OutOfBounds, Result};

pub use access::TableAccess;
pub use codedindex::{CodedIndex, CodedIndexType};
pub use tabledata::{unmodelled_row_size, TableData};
pub use tableid::TableId;
pub use tableinfo::{TableInfo, TableInfoRef, TableRowInfo};

/// A row type that can be read from a metadata table.
pub trait RowReadable: Sized {
    /// Size in bytes of one row, given the index widths in `sizes`
    fn row_size(sizes: &TableInfoRef) -> u32;

    /// Read one row at `offset`, advancing it past the row.
    ///
    /// ## Arguments
    /// * `data`   - The table data
    /// * `offset` - Read position, advanced by the row size
    /// * `rid`    - The 1-based row id of this row
    /// * `sizes`  - Index widths used to read variable sized columns
    ///
    /// # Errors
    /// Returns an error if the data is truncated or a coded index is invalid.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self>;
}

/// A typed view over the rows of one table.
pub struct MetadataTable<'a, T> {
    data: &'a [u8],
    row_count: u32,
    row_size: u32,
    sizes: TableInfoRef,
    _phantom: PhantomData<T>,
}

impl<'a, T: RowReadable> MetadataTable<'a, T> {
    /// Create a table over `data` holding `row_count` rows.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than the table.
    pub fn new(data: &'a [u8], row_count: u32, sizes: TableInfoRef) -> Result<Self> {
        let row_size = T::row_size(&sizes);
        let needed = u64::from(row_count) * u64::from(row_size);
        if (data.len() as u64) < needed {
            return Err(OutOfBounds);
        }

        Ok(MetadataTable {
            data,
            row_count,
            row_size,
            sizes,
            _phantom: PhantomData,
        })
    }

    /// Total size of the table in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.row_count) * u64::from(self.row_size)
    }

    /// Size of a single row in bytes
    #[must_use]
    pub fn row_size(&self) -> u32 {
        self.row_size
    }

    /// Number of rows in this table
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Read the row with 1-based id `rid`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for rid 0 or past the row count.
    pub fn get(&self, rid: u32) -> Result<T> {
        if rid == 0 || rid > self.row_count {
            return Err(OutOfBounds);
        }

        T::row_read(
            self.data,
            &mut ((rid as usize - 1) * self.row_size as usize),
            rid,
            &self.sizes,
        )
    }

    /// Iterate all rows in order
    #[must_use]
    pub fn iter(&'a self) -> TableIterator<'a, T> {
        TableIterator {
            table: self,
            current_row: 0,
            current_offset: 0,
        }
    }
}

impl<'a, T: RowReadable> IntoIterator for &'a MetadataTable<'a, T> {
    type Item = T;
    type IntoIter = TableIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the rows of a [`MetadataTable`]. Stops at the first unreadable row.
pub struct TableIterator<'a, T> {
    table: &'a MetadataTable<'a, T>,
    current_row: u32,
    current_offset: usize,
}

impl<T: RowReadable> Iterator for TableIterator<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.table.row_count {
            return None;
        }

        match T::row_read(
            self.table.data,
            &mut self.current_offset,
            self.current_row + 1,
            &self.table.sizes,
        ) {
            Ok(row) => {
                self.current_row += 1;
                Some(row)
            }
            Err(_) => None,
        }
    }
}
