use proc_macro2::TokenStream;
use proc_macro_error::abort;
use quote::{quote, ToTokens};
use syn::{self, Expr, Field, Ident};

use crate::field::Arg;

/// A `bitflags` field backed by an `u8`.
pub struct Flags<'a> {
    field: &'a Field,
    default: Option<Expr>,
}

impl<'a> Flags<'a> {
    pub fn from_args(field: &'a Field, args: impl Iterator<Item = Arg>) -> Self {
        let mut default = None;

        for arg in args {
            let name = arg.name.to_string();
            match name.as_str() {
                "default" => default = Some(arg.value_or_abort(field)),
                other => {
                    abort!(
                        field,
                        "Incompatible arg `{other}` for flags field {}",
                        field.ident.to_token_stream(),
                    );
                }
            }
        }

        Flags { field, default }
    }

    fn ident(&self) -> &Ident {
        self.field.ident.as_ref().expect("named field")
    }

    pub fn default_value(&self) -> TokenStream {
        let ty = &self.field.ty;
        match &self.default {
            Some(default) => default.to_token_stream(),
            None => quote! { <#ty>::empty() },
        }
    }

    pub fn get(&self) -> TokenStream {
        let ident = self.ident();

        quote! { f32::from(self.#ident.bits()) }
    }

    pub fn set(&self) -> TokenStream {
        let ident = self.ident();
        let ty = &self.field.ty;

        quote! {
            if !value.is_finite() {
                return crate::pedal::data::ValueStatus::Unchanged;
            }

            let new = <#ty>::from_bits_truncate(value as u8);
            if self.#ident == new {
                return crate::pedal::data::ValueStatus::Unchanged;
            }

            self.#ident = new;

            crate::pedal::data::ValueStatus::Changed
        }
    }

    pub fn serialize(&self) -> TokenStream {
        let ident = self.ident();

        quote! {
            buf.push(self.#ident.bits());
        }
    }

    pub fn parse(&self) -> TokenStream {
        let ident = self.ident();
        let ty = &self.field.ty;

        quote! {
            let (i, raw) = nom::number::complete::le_u8(i)?;
            record.#ident = <#ty>::from_bits_truncate(raw);
        }
    }
}
