use proc_macro::TokenStream;
use proc_macro_error::proc_macro_error;
use syn::{parse_macro_input, DeriveInput};

mod boolean;
pub(crate) use boolean::Boolean;

mod flags;
pub(crate) use flags::Flags;

mod numeric;
pub(crate) use numeric::Numeric;

mod field;
pub(crate) use field::RecordField;

mod record;

/// Derives `Record` for a struct whose named fields all carry a `#[field(..)]` attribute.
///
/// Fields are serialized in declaration order.
#[proc_macro_derive(Record, attributes(field))]
#[proc_macro_error]
pub fn record(input: TokenStream) -> TokenStream {
    let input: DeriveInput = parse_macro_input!(input);
    record::derive_struct(&input).into()
}
