use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, LitInt, LitStr, Result, Token, Type,
    parse::{Parse, ParseStream},
};

pub(crate) fn expand_flags(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`Flags` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`Flags` may only be derived on structs with named fields.",
        ))?
    };

    let total = fields.named.len();

    let flags = fields
        .named
        .iter()
        .map(FlagMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();
    for flag in &flags {
        if !seen.insert(flag.value) {
            Err(Error::new(flag.bit.span(), "Flag bits must be unique."))?
        }
    }

    let entries = flags.iter().map(|FlagMetadata { label, bit, .. }| {
        quote! { (#label, #bit) }
    });

    let reads = flags.iter().map(|FlagMetadata { name, bit, .. }| {
        quote! { #name: bits & #bit != 0 }
    });

    let writes = flags.iter().map(|FlagMetadata { name, bit, .. }| {
        quote! { if self.#name { bits |= #bit; } }
    });

    // Fields without an attribute are filled from `Default`.
    let rest = (flags.len() != total).then(|| quote! { ..Default::default() });

    let name = &input.ident;

    let expanded = quote! {
        impl Flags for #name {
            const FLAGS: &'static [(&'static str, u16)] = &[#(#entries),*];

            fn from_bits(bits: u16) -> Self {
                Self {
                    #(#reads,)*
                    #rest
                }
            }

            fn bits(&self) -> u16 {
                let mut bits = 0u16;
                #(#writes)*
                bits
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FlagMetadata {
    name: Ident,
    label: LitStr,
    bit: LitInt,
    value: u16,
}

impl FlagMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let name = field.ident.clone().unwrap();

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("flag")) else {
            return Ok(None);
        };

        let is_bool = matches!(&field.ty, Type::Path(path) if path.path.is_ident("bool"));
        if !is_bool {
            Err(Error::new_spanned(
                &field.ty,
                "Field with a `flag` attribute must have type `bool`.",
            ))?
        }

        let FlagAttribute { bit, label } = attr.meta.require_list()?.parse_args()?;

        let value = bit.base10_parse::<u16>()?;
        if value.count_ones() != 1 {
            Err(Error::new_spanned(
                &bit,
                "Flag value must set exactly one bit.",
            ))?
        }

        let label = label.unwrap_or_else(|| {
            let ident = name.to_string();
            LitStr::new(ident.trim_start_matches("r#"), name.span())
        });

        Ok(Some(Self {
            name,
            label,
            bit,
            value,
        }))
    }
}

#[derive(Debug)]
struct FlagAttribute {
    bit: LitInt,
    label: Option<LitStr>,
}

impl Parse for FlagAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let bit = input.parse::<LitInt>()?;

        let label = if !input.is_empty() {
            input.parse::<Token![,]>()?;
            let key = input.parse::<Ident>()?;
            if key != "rename" {
                Err(Error::new_spanned(
                    key,
                    "Expected `rename = \"...\"` after the flag value.",
                ))?
            }
            input.parse::<Token![=]>()?;
            Some(input.parse::<LitStr>()?)
        } else {
            None
        };

        Ok(Self { bit, label })
    }
}
