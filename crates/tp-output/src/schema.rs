//! Fixed text-typed table schemas and the [`TableRow`] trait.
//!
//! Every extracted table stores all of its columns as non-null UTF-8 text.
//! Numeric precision is carried by the text formatting, which keeps the five
//! event tables uniform regardless of which backend writes them.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

/// Name and ordered column list of one table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableSchema {
    pub name:   &'static str,
    pub fields: &'static [&'static str],
}

impl TableSchema {
    pub const fn new(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self { name, fields }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| *f == field)
    }

    /// The equivalent Arrow schema: one non-nullable `Utf8` field per column.
    pub fn arrow_schema(&self) -> SchemaRef {
        Arc::new(Schema::new(
            self.fields
                .iter()
                .map(|name| Field::new(*name, DataType::Utf8, false))
                .collect::<Vec<_>>(),
        ))
    }
}

/// A typed row of a fixed-schema table.
///
/// Implemented by the [`table_row!`](crate::table_row) macro; hand-written
/// implementations must keep `into_values` and `from_values` in
/// `SCHEMA.fields` order.
pub trait TableRow: Sized {
    const SCHEMA: TableSchema;

    /// Column values in schema order.
    fn into_values(self) -> Vec<String>;

    /// Rebuild a row from column values in schema order.  Missing trailing
    /// values become empty strings.
    fn from_values(values: Vec<String>) -> Self;
}

/// Declare a row struct whose fields are all `String`, together with its
/// [`TableRow`] implementation.
///
/// ```
/// tp_output::table_row! {
///     /// One boarding.
///     pub struct Boarding("boardings") {
///         person_id  => "person_id",
///         vehicle_id => "vehicle_id",
///     }
/// }
/// use tp_output::TableRow;
/// assert_eq!(Boarding::SCHEMA.fields, ["person_id", "vehicle_id"]);
/// ```
#[macro_export]
macro_rules! table_row {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident($table:literal) {
            $( $(#[$fattr:meta])* $field:ident => $column:literal ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Debug, PartialEq, Eq, Default)]
        $vis struct $name {
            $( $(#[$fattr])* pub $field: String, )+
        }

        impl $crate::TableRow for $name {
            const SCHEMA: $crate::TableSchema =
                $crate::TableSchema::new($table, &[$($column),+]);

            fn into_values(self) -> Vec<String> {
                vec![$(self.$field),+]
            }

            fn from_values(values: Vec<String>) -> Self {
                let mut it = values.into_iter();
                Self {
                    $( $field: it.next().unwrap_or_default(), )+
                }
            }
        }
    };
}
