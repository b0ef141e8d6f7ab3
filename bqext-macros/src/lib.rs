mod decode_field;
mod decode_model;
mod from_row_trait;

use decode_model::decode_model;
use from_row_trait::from_row_trait;
use proc_macro::TokenStream;
use syn::{ItemStruct, parse_macro_input};

/// Derives `FromRow` and `Model` for a struct with named fields.
///
/// Field attributes:
/// - `#[bq(name = "Column")]` binds the field to the column `Column`.
/// - `#[bq(skip)]` never binds the field, it keeps its default value.
///
/// Struct attributes:
/// - `#[bq(rename_all = "PascalCase")]` derives the column of every field
///   without an explicit name from its identifier (`camelCase`,
///   `snake_case`, `SCREAMING_SNAKE_CASE` and `kebab-case` work too).
/// - `#[bq(default)]` starts from `Self::default()` instead of requiring
///   every field type to implement `Default`.
#[proc_macro_derive(Model, attributes(bq))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let model = decode_model(item);
    from_row_trait(&model).into()
}
