use crate::decode_field::{FieldMetadata, decode_field};
use convert_case::{Case, Casing};
use quote::ToTokens;
use syn::{Fields, ItemStruct, LitStr, parse::ParseBuffer};

/// Applies a `rename_all` value (`PascalCase`, `camelCase`, ..) to a field name.
pub(crate) fn rename(name: &str, rename_all: &str) -> String {
    name.to_case(decode_case(rename_all))
}

pub(crate) struct ModelMetadata {
    pub(crate) item: ItemStruct,
    pub(crate) fields: Vec<FieldMetadata>,
    /// Start decoding from `Self::default()` instead of defaulting every field.
    pub(crate) use_default: bool,
}

impl ModelMetadata {
    pub(crate) fn bound(&self) -> impl Iterator<Item = &FieldMetadata> + Clone {
        self.fields.iter().filter(|f| !f.skip)
    }
}

fn decode_case(value: &str) -> Case {
    match value {
        "PascalCase" => Case::Pascal,
        "camelCase" => Case::Camel,
        "snake_case" => Case::Snake,
        "SCREAMING_SNAKE_CASE" => Case::UpperSnake,
        "kebab-case" => Case::Kebab,
        _ => panic!(
            "Unknown case `{value}` for `rename_all`, expected one of: \"PascalCase\", \"camelCase\", \"snake_case\", \"SCREAMING_SNAKE_CASE\", \"kebab-case\""
        ),
    }
}

pub(crate) fn decode_model(item: ItemStruct) -> ModelMetadata {
    if !matches!(item.fields, Fields::Named(..)) {
        panic!(
            "Model can only be derived for structs with named fields, `{}` is not one",
            item.ident
        );
    }
    let mut rename_all = None;
    let mut use_default = false;
    for attr in &item.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("bq") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `bq`, use it like: `#[bq(attribute = value, ..)]`");
            };
            let result = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("rename_all") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `rename_all`, use it like: `#[bq(rename_all = \"PascalCase\")]`"
                        );
                    };
                    let value = value.value();
                    let _ = decode_case(&value);
                    rename_all = Some(value);
                } else if arg.path.is_ident("default") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `default`, use it like: `#[bq(default)]`");
                    };
                    use_default = true;
                } else {
                    panic!(
                        "Unknown attribute `{}` inside bq macro",
                        arg.path.to_token_stream()
                    );
                }
                Ok(())
            });
            if let Err(e) = result {
                panic!("Error while parsing the `bq` attribute of `{}`: {e}", item.ident);
            }
        }
    }
    let fields: Vec<_> = item
        .fields
        .iter()
        .map(|f| decode_field(f, rename_all.as_deref()))
        .collect();
    let metadata = ModelMetadata {
        item,
        fields,
        use_default,
    };
    let bound: Vec<_> = metadata.bound().collect();
    for (i, field) in bound.iter().enumerate() {
        if let Some(other) = bound[..i].iter().find(|f| f.column == field.column) {
            panic!(
                "Column `{}` is bound to both `{}` and `{}`",
                field.column, other.ident, field.ident
            );
        }
    }
    metadata
}
