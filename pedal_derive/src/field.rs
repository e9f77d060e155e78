use heck::ToUpperCamelCase;
use proc_macro2::TokenStream;
use proc_macro_error::{abort, ResultExt};
use quote::{format_ident, quote, ToTokens};
use syn::{
    self,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute, Expr, Field, Ident, Lit, Token, Type, UnOp,
};

use crate::{numeric::Scalar, Boolean, Flags, Numeric};

pub enum Kind<'a> {
    Boolean(Boolean<'a>),
    Flags(Flags<'a>),
    Numeric(Numeric<'a>),
}

pub struct RecordField<'a> {
    field: &'a Field,
    variant: Ident,
    kind: Kind<'a>,
}

impl<'a> RecordField<'a> {
    pub fn from_struct_field(field: &'a Field) -> Self {
        let ident = field
            .ident
            .as_ref()
            .unwrap_or_else(|| abort!(field, "`Record` fields must be named"));

        let attrs = field
            .attrs
            .iter()
            .filter(|attr| attr.path.is_ident("field"))
            .collect::<Vec<&Attribute>>();
        let attr = match attrs.as_slice() {
            [attr] => *attr,
            [] => abort!(field, "Missing `field` attribute for {}", ident),
            _ => abort!(
                field,
                "Expected only one `field` attribute for {}, found {}",
                ident,
                attrs.len()
            ),
        };

        let args = attr
            .parse_args_with(Punctuated::<Arg, Token![,]>::parse_terminated)
            .unwrap_or_abort();

        let kind = if args.iter().any(|arg| arg.name == "flags") {
            Kind::Flags(Flags::from_args(
                field,
                args.into_iter().filter(|arg| arg.name != "flags"),
            ))
        } else {
            match type_name(&field.ty).as_deref() {
                Some("bool") => Kind::Boolean(Boolean::from_args(field, args.into_iter())),
                Some(name) => match Scalar::from_name(name) {
                    Some(scalar) => {
                        Kind::Numeric(Numeric::from_args(field, scalar, args.into_iter()))
                    }
                    None => abort!(
                        field,
                        "Unsupported type {} for field {}",
                        field.ty.to_token_stream(),
                        ident,
                    ),
                },
                None => abort!(
                    field,
                    "Unsupported type {} for field {}",
                    field.ty.to_token_stream(),
                    ident,
                ),
            }
        };

        RecordField {
            field,
            variant: Ident::new(&ident.to_string().to_upper_camel_case(), ident.span()),
            kind,
        }
    }

    pub fn ident(&self) -> &Ident {
        self.field.ident.as_ref().expect("named field")
    }

    pub fn variant(&self) -> &Ident {
        &self.variant
    }

    pub fn name(&self) -> String {
        self.ident().to_string()
    }

    pub fn size(&self) -> usize {
        match &self.kind {
            Kind::Boolean(_) | Kind::Flags(_) => 1,
            Kind::Numeric(field) => field.size(),
        }
    }

    pub fn default_value(&self) -> TokenStream {
        match &self.kind {
            Kind::Boolean(field) => field.default_value(),
            Kind::Flags(field) => field.default_value(),
            Kind::Numeric(field) => field.default_value(),
        }
    }

    pub fn get(&self) -> TokenStream {
        match &self.kind {
            Kind::Boolean(field) => field.get(),
            Kind::Flags(field) => field.get(),
            Kind::Numeric(field) => field.get(),
        }
    }

    pub fn set(&self) -> TokenStream {
        match &self.kind {
            Kind::Boolean(field) => field.set(),
            Kind::Flags(field) => field.set(),
            Kind::Numeric(field) => field.set(),
        }
    }

    pub fn range(&self) -> TokenStream {
        match &self.kind {
            Kind::Boolean(_) => quote! {
                Some(crate::pedal::data::ValueRange::new(0.0, 1.0))
            },
            Kind::Flags(_) => quote! { None },
            Kind::Numeric(field) => field.range(),
        }
    }

    pub fn serialize(&self) -> TokenStream {
        match &self.kind {
            Kind::Boolean(field) => field.serialize(),
            Kind::Flags(field) => field.serialize(),
            Kind::Numeric(field) => field.serialize(),
        }
    }

    pub fn parse(&self) -> TokenStream {
        match &self.kind {
            Kind::Boolean(field) => field.parse(),
            Kind::Flags(field) => field.parse(),
            Kind::Numeric(field) => field.parse(&self.variant),
        }
    }

    pub fn accessors(&self) -> TokenStream {
        let ident = self.ident();
        let ty = &self.field.ty;
        let setter = format_ident!("set_{}", ident);
        let variant = &self.variant;

        let set_body = match &self.kind {
            Kind::Boolean(_) => quote! {
                <Self as crate::pedal::data::Record>::set(
                    self,
                    Field::#variant,
                    f32::from(u8::from(value)),
                )
            },
            Kind::Flags(_) => quote! {
                if self.#ident == value {
                    return crate::pedal::data::ValueStatus::Unchanged;
                }

                self.#ident = value;

                crate::pedal::data::ValueStatus::Changed
            },
            Kind::Numeric(_) => quote! {
                <Self as crate::pedal::data::Record>::set(self, Field::#variant, value as f32)
            },
        };

        quote! {
            pub fn #ident(&self) -> #ty {
                self.#ident
            }

            pub fn #setter(&mut self, value: #ty) -> crate::pedal::data::ValueStatus {
                #set_body
            }
        }
    }
}

fn type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(path) => path.path.get_ident().map(Ident::to_string),
        _ => None,
    }
}

/// Evaluates literal numeric expressions such as `-96.0` or `15`.
///
/// Returns `None` for anything else, in which case range checks are left to the compiler.
pub fn literal_value(expr: &Expr) -> Option<f64> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(int) => int.base10_parse::<f64>().ok(),
            Lit::Float(float) => float.base10_parse::<f64>().ok(),
            _ => None,
        },
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => {
            literal_value(&unary.expr).map(|value| -value)
        }
        Expr::Paren(paren) => literal_value(&paren.expr),
        _ => None,
    }
}

#[derive(Clone)]
pub struct Arg {
    pub name: Ident,
    pub value: Option<Expr>,
}

impl Arg {
    pub fn value_or_abort(&self, field: &Field) -> Expr {
        self.value
            .as_ref()
            .cloned()
            .unwrap_or_else(|| abort!(field, "attribute `{}` requires a value", self.name))
    }
}

impl Parse for Arg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;

        let value = if input.peek(Token![=]) {
            // `name = value` attributes.
            let assign_token = input.parse::<Token![=]>()?; // skip '='
            let value = input.parse::<Expr>().ok();
            if value.is_none() {
                abort! {
                    assign_token,
                    "expected an expression after `=`"
                }
            }

            value
        } else {
            None
        };

        Ok(Self { name, value })
    }
}
