use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::{DeriveCommand, DeriveValue};

fn optional(value: Option<DeriveValue>) -> TokenStream2 {
    match value {
        Some(DeriveValue { tokens }) => quote! { Some(#tokens) },
        None => quote! { None },
    }
}

impl From<DeriveCommand> for TokenStream2 {
    fn from(value: DeriveCommand) -> Self {
        let DeriveCommand {
            struct_name,
            command_name: DeriveValue { tokens: name },
            short_description,
            long_description,
        } = value;
        let short_description = optional(short_description);
        let long_description = optional(long_description);

        quote! {
            impl ::argpromise::prelude::CommandDescription for #struct_name {
                fn name() -> &'static str {
                    #name
                }

                fn short_description() -> Option<&'static str> {
                    #short_description
                }

                fn long_description() -> Option<&'static str> {
                    #long_description
                }
            }
        }
    }
}
