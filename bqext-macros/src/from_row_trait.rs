use crate::decode_model::ModelMetadata;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

/// Generates the `FromRow` and `Model` implementations of a struct.
///
/// Every bound field is decoded into a local holder first, the struct is
/// assembled only after the whole row went through, so a failing column
/// never leaves a partially filled value behind.
pub(crate) fn from_row_trait(model: &ModelMetadata) -> TokenStream {
    let item = &model.item;
    let struct_name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let field_assignment = model
        .bound()
        .map(|f| {
            let ident = &f.ident;
            let ty = &f.ty;
            let column = &f.column;
            let assign = if model.use_default {
                quote!(__result__.#ident = ::bqext::decode_column::<#ty>(__n__, __v__)?)
            } else {
                quote!(#ident = Some(::bqext::decode_column::<#ty>(__n__, __v__)?))
            };
            quote! {
                if __n__ == #column {
                    #assign;
                }
            }
        })
        .reduce(|acc, cur| quote!(#acc else #cur))
        .unwrap_or(quote!(let _ = (__n__, __v__);));
    let body = if model.use_default {
        quote! {
            let mut __result__ = <Self as ::std::default::Default>::default();
            for (__n__, __v__) in ::std::iter::zip(row.labels.iter(), row.values.into_vec()) {
                #field_assignment
            }
            Ok(__result__)
        }
    } else {
        let holders = model.bound().map(|f| {
            let ident = &f.ident;
            let ty = &f.ty;
            quote!(let mut #ident: ::std::option::Option<#ty> = None;)
        });
        let create_result = model.fields.iter().map(|f| {
            let ident = &f.ident;
            if f.skip {
                quote!(#ident: ::std::default::Default::default())
            } else {
                quote!(#ident: #ident.unwrap_or_default())
            }
        });
        quote! {
            #(#holders)*
            for (__n__, __v__) in ::std::iter::zip(row.labels.iter(), row.values.into_vec()) {
                #field_assignment
            }
            Ok(#struct_name {
                #(#create_result,)*
            })
        }
    };
    let bindings = model.bound().map(|f| {
        let field = f.ident.to_string();
        let column = &f.column;
        let ty = f.ty.to_token_stream().to_string().replace(' ', "");
        quote! {
            ::bqext::ColumnBinding {
                field: #field,
                column: #column,
                ty: #ty,
            }
        }
    });
    quote! {
        impl #impl_generics ::bqext::FromRow for #struct_name #ty_generics #where_clause {
            fn from_row(row: ::bqext::RowLabeled) -> ::bqext::Result<Self> {
                #body
            }
        }

        impl #impl_generics ::bqext::Model for #struct_name #ty_generics #where_clause {
            fn columns() -> &'static [::bqext::ColumnBinding] {
                &[#(#bindings),*]
            }
        }
    }
}
