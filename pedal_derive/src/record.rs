use proc_macro2::TokenStream;
use proc_macro_error::abort_call_site;
use quote::{quote, ToTokens};
use syn::{Data, DataStruct, DeriveInput, Fields, Ident};

use crate::RecordField;

pub fn derive_struct(input: &DeriveInput) -> TokenStream {
    match input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(ref fields),
            ..
        }) => {
            if fields.named.is_empty() {
                abort_call_site!("`#[derive(Record)]` requires at least one field");
            }

            let record = Record::from_struct(
                &input.ident,
                fields.named.iter().map(RecordField::from_struct_field),
            );

            record.into_token_stream()
        }
        _ => abort_call_site!("`#[derive(Record)]` only supports structs with named fields"),
    }
}

pub struct Record<'a> {
    name: &'a Ident,
    fields: Vec<RecordField<'a>>,
}

impl<'a> Record<'a> {
    fn from_struct(name: &'a Ident, fields: impl Iterator<Item = RecordField<'a>>) -> Self {
        Self {
            name,
            fields: Vec::from_iter(fields),
        }
    }
}

impl<'a> ToTokens for Record<'a> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let record_name = self.name;
        let variants = self.fields.iter().map(RecordField::variant).collect::<Vec<_>>();
        let names = self.fields.iter().map(RecordField::name).collect::<Vec<_>>();
        let count = self.fields.len();

        // Field identification
        tokens.extend(quote! {
            #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
            pub enum Field {
                #( #variants, )*
            }

            impl Field {
                pub const ALL: [Field; #count] = [ #( Field::#variants, )* ];

                pub const fn name(self) -> &'static str {
                    match self {
                        #( Field::#variants => #names, )*
                    }
                }

                pub fn from_name(name: &str) -> Option<Self> {
                    match name {
                        #( #names => Some(Field::#variants), )*
                        _ => None,
                    }
                }
            }

            impl std::fmt::Display for Field {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.name())
                }
            }
        });

        // Defaults and typed accessors
        tokens.extend({
            let idents = self.fields.iter().map(RecordField::ident);
            let defaults = self.fields.iter().map(RecordField::default_value);
            let accessors = self.fields.iter().map(RecordField::accessors);

            quote! {
                impl Default for #record_name {
                    fn default() -> Self {
                        #record_name {
                            #( #idents: #defaults, )*
                        }
                    }
                }

                impl #record_name {
                    #( #accessors )*
                }
            }
        });

        // Record specifics
        tokens.extend({
            let sizes = self.fields.iter().map(RecordField::size);
            let gets = self.fields.iter().map(RecordField::get);
            let sets = self.fields.iter().map(RecordField::set);
            let ranges = self.fields.iter().map(RecordField::range);
            let serializes = self.fields.iter().map(RecordField::serialize);
            let parses = self.fields.iter().map(RecordField::parse);

            quote! {
                impl crate::pedal::data::Record for #record_name {
                    type Field = Field;

                    const LEN: usize = 0 #( + #sizes )*;

                    fn fields() -> &'static [Field] {
                        &Field::ALL
                    }

                    fn get(&self, field: Field) -> f32 {
                        match field {
                            #( Field::#variants => #gets, )*
                        }
                    }

                    fn set(&mut self, field: Field, value: f32) -> crate::pedal::data::ValueStatus {
                        match field {
                            #( Field::#variants => { #sets } )*
                        }
                    }

                    fn range(field: Field) -> Option<crate::pedal::data::ValueRange> {
                        match field {
                            #( Field::#variants => #ranges, )*
                        }
                    }

                    fn serialize(&self) -> crate::pedal::data::RecordBuf {
                        let mut buf = crate::pedal::data::RecordBuf::new();
                        #( #serializes )*

                        buf
                    }

                    fn parse(i: &[u8]) -> nom::IResult<&[u8], Self> {
                        let mut record = Self::default();
                        #( #parses )*

                        Ok((i, record))
                    }
                }
            }
        });
    }
}
