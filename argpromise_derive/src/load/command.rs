use crate::load::{documentation, kebab_case, single_value};
use crate::model::{DeriveCommand, DeriveValue, IntermediateAttributes};
use quote::quote;

const NAME: &str = "name";
const SHORT: &str = "short";
const LONG: &str = "long";

impl TryFrom<syn::DeriveInput> for DeriveCommand {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let mut attributes = IntermediateAttributes::default();

        for attribute in &value.attrs {
            if attribute.path().is_ident("command") {
                let IntermediateAttributes { singletons, pairs } =
                    IntermediateAttributes::try_from(attribute)?;
                attributes.singletons.extend(singletons);
                for (key, values) in pairs {
                    attributes.pairs.entry(key).or_default().extend(values);
                }
            }
        }

        if let Some(singleton) = attributes.singletons.iter().next() {
            return Err(syn::Error::new(
                value.ident.span(),
                format!("Invalid - unknown command attribute `{singleton}`."),
            ));
        }

        if let Some(key) = attributes
            .pairs
            .keys()
            .find(|key| ![NAME, SHORT, LONG].contains(&key.as_str()))
        {
            return Err(syn::Error::new(
                value.ident.span(),
                format!("Invalid - unknown command attribute `{key}`."),
            ));
        }

        if !value.generics.params.is_empty() {
            return Err(syn::Error::new(
                value.ident.span(),
                "Invalid - command cannot be generic.",
            ));
        }

        let struct_name = value.ident.clone();
        let command_name = match single_value(&attributes, NAME) {
            Some(name) => name,
            None => {
                let name = kebab_case(&struct_name.to_string());
                DeriveValue {
                    tokens: quote! { #name },
                }
            }
        };
        let short_description = single_value(&attributes, SHORT);
        let long_description = match single_value(&attributes, LONG) {
            Some(long) => Some(long),
            None => documentation(&value.attrs).map(|doc| DeriveValue {
                tokens: quote! { #doc },
            }),
        };

        Ok(DeriveCommand {
            struct_name,
            command_name,
            short_description,
            long_description,
        })
    }
}
