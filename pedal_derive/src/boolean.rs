use proc_macro2::TokenStream;
use proc_macro_error::abort;
use quote::{quote, ToTokens};
use syn::{self, Expr, Field, Ident};

use crate::field::Arg;

pub struct Boolean<'a> {
    field: &'a Field,
    default: Option<Expr>,
}

impl<'a> Boolean<'a> {
    pub fn from_args(field: &'a Field, args: impl Iterator<Item = Arg>) -> Self {
        let mut default = None;

        for arg in args {
            let name = arg.name.to_string();
            match name.as_str() {
                "default" => default = Some(arg.value_or_abort(field)),
                other => {
                    abort!(
                        field,
                        "Incompatible arg `{other}` for boolean field {}",
                        field.ident.to_token_stream(),
                    );
                }
            }
        }

        Boolean { field, default }
    }

    fn ident(&self) -> &Ident {
        self.field.ident.as_ref().expect("named field")
    }

    pub fn default_value(&self) -> TokenStream {
        match &self.default {
            Some(default) => default.to_token_stream(),
            None => quote! { false },
        }
    }

    pub fn get(&self) -> TokenStream {
        let ident = self.ident();

        quote! { f32::from(u8::from(self.#ident)) }
    }

    pub fn set(&self) -> TokenStream {
        let ident = self.ident();

        quote! {
            if value.is_nan() {
                return crate::pedal::data::ValueStatus::Unchanged;
            }

            let new = value >= 0.5;
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
            buf.push(u8::from(self.#ident));
        }
    }

    pub fn parse(&self) -> TokenStream {
        let ident = self.ident();

        quote! {
            let (i, raw) = nom::number::complete::le_u8(i)?;
            record.#ident = raw != 0;
        }
    }
}
