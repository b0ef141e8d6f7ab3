use crate::decode_model::rename;
use quote::ToTokens;
use syn::{Field, Ident, LitStr, Type, parse::ParseBuffer};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    /// Column label the field binds to.
    pub(crate) column: String,
    pub(crate) skip: bool,
}

pub(crate) fn decode_field(field: &Field, rename_all: Option<&str>) -> FieldMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Model can only be derived for structs with named fields");
    let mut column = ident.to_string();
    if column.starts_with('_') {
        column.remove(0);
    }
    if let Some(rename_all) = rename_all {
        column = rename(&column, rename_all);
    }
    let mut metadata = FieldMetadata {
        ident,
        ty: field.ty.clone(),
        column,
        skip: false,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("bq") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `bq`, use it like: `#[bq(attribute = value, ...)]`");
            };
            let result = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `name`, use it like: `#[bq(name = \"MyColumn\")]`");
                    };
                    metadata.column = v.value();
                } else if arg.path.is_ident("skip") {
                    let Err(..) = arg.value() else {
                        // value() is Err for Meta::Path
                        panic!("Error while parsing `skip`, use it like: `#[bq(skip)]`");
                    };
                    metadata.skip = true;
                } else {
                    panic!(
                        "Unknown attribute `{}` inside bq macro",
                        arg.path.to_token_stream()
                    );
                }
                Ok(())
            });
            if let Err(e) = result {
                panic!("Error while parsing the `bq` attribute of a field: {e}");
            }
        }
    }
    metadata
}
