use proc_macro2::TokenStream;
use proc_macro_error::abort;
use quote::{quote, ToTokens};
use syn::{self, Expr, Field, Ident};

use crate::field::{literal_value, Arg};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scalar {
    U8,
    I16,
    F32,
}

impl Scalar {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "u8" => Some(Scalar::U8),
            "i16" => Some(Scalar::I16),
            "f32" => Some(Scalar::F32),
            _ => None,
        }
    }

    fn size(self) -> usize {
        match self {
            Scalar::U8 => 1,
            Scalar::I16 => 2,
            Scalar::F32 => 4,
        }
    }

    fn parser(self) -> TokenStream {
        match self {
            Scalar::U8 => quote! { nom::number::complete::le_u8 },
            Scalar::I16 => quote! { nom::number::complete::le_i16 },
            Scalar::F32 => quote! { nom::number::complete::le_f32 },
        }
    }

    fn is_integer(self) -> bool {
        !matches!(self, Scalar::F32)
    }
}

pub struct Numeric<'a> {
    field: &'a Field,
    scalar: Scalar,
    default: Expr,
    min: Expr,
    max: Expr,
}

impl<'a> Numeric<'a> {
    pub fn from_args(field: &'a Field, scalar: Scalar, args: impl Iterator<Item = Arg>) -> Self {
        let mut default = None;
        let mut min = None;
        let mut max = None;

        for arg in args {
            let name = arg.name.to_string();
            match name.as_str() {
                "default" => default = Some(arg.value_or_abort(field)),
                "min" => min = Some(arg.value_or_abort(field)),
                "max" => max = Some(arg.value_or_abort(field)),
                other => {
                    abort!(
                        field,
                        "Incompatible arg `{other}` for numeric field {}",
                        field.ident.to_token_stream(),
                    );
                }
            }
        }

        let min =
            min.unwrap_or_else(|| abort!(field, "Undefined `min` attribute for {}", name(field)));
        let max =
            max.unwrap_or_else(|| abort!(field, "Undefined `max` attribute for {}", name(field)));
        let default = default
            .unwrap_or_else(|| abort!(field, "Undefined `default` attribute for {}", name(field)));

        if let (Some(min_val), Some(max_val)) = (literal_value(&min), literal_value(&max)) {
            if max_val <= min_val {
                abort!(field, "`max` must be greater than `min` for {}", name(field));
            }

            if let Some(default_val) = literal_value(&default) {
                if !(min_val..=max_val).contains(&default_val) {
                    abort!(field, "`default` is out of range for {}", name(field));
                }
            }
        }

        Numeric {
            field,
            scalar,
            default,
            min,
            max,
        }
    }

    fn ident(&self) -> &Ident {
        self.field.ident.as_ref().expect("named field")
    }

    pub fn size(&self) -> usize {
        self.scalar.size()
    }

    pub fn default_value(&self) -> TokenStream {
        let ty = &self.field.ty;
        let default = &self.default;

        quote! { (#default) as #ty }
    }

    pub fn get(&self) -> TokenStream {
        let ident = self.ident();

        quote! { self.#ident as f32 }
    }

    pub fn set(&self) -> TokenStream {
        let ident = self.ident();
        let ty = &self.field.ty;
        let min = &self.min;
        let max = &self.max;

        // Integral fields accept the nearest integer.
        let value = if self.scalar.is_integer() {
            quote! { value.round() }
        } else {
            quote! { value }
        };

        // `-0.0 == 0.0` but they are stored differently.
        let is_unchanged = if self.scalar.is_integer() {
            quote! { self.#ident == new }
        } else {
            quote! { self.#ident.to_bits() == new.to_bits() }
        };

        quote! {
            if !value.is_finite() {
                return crate::pedal::data::ValueStatus::Unchanged;
            }

            let new = (#value).clamp((#min) as f32, (#max) as f32) as #ty;
            if #is_unchanged {
                return crate::pedal::data::ValueStatus::Unchanged;
            }

            self.#ident = new;

            crate::pedal::data::ValueStatus::Changed
        }
    }

    pub fn range(&self) -> TokenStream {
        let min = &self.min;
        let max = &self.max;

        quote! {
            Some(crate::pedal::data::ValueRange::new((#min) as f32, (#max) as f32))
        }
    }

    pub fn serialize(&self) -> TokenStream {
        let ident = self.ident();

        quote! {
            buf.extend_from_slice(&self.#ident.to_le_bytes());
        }
    }

    pub fn parse(&self, variant: &Ident) -> TokenStream {
        let parser = self.scalar.parser();

        // Stored values go through the setter so that they are clamped.
        quote! {
            let (i, raw) = #parser(i)?;
            <Self as crate::pedal::data::Record>::set(&mut record, Field::#variant, raw as f32);
        }
    }
}

fn name(field: &Field) -> String {
    field.ident.to_token_stream().to_string()
}
