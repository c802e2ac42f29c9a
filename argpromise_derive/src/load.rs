mod attribute;
mod command;

use crate::model::{DeriveValue, IntermediateAttributes};

// The final value wins when an attribute is repeated.
fn single_value(attributes: &IntermediateAttributes, key: &str) -> Option<DeriveValue> {
    attributes
        .pairs
        .get(key)
        .and_then(|values| values.last())
        .cloned()
}

// `RemoteAdd` to `remote-add`, keeping acronyms together (`HTTPGet` to `http-get`).
fn kebab_case(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::default();

    for (i, c) in chars.iter().enumerate() {
        if *c == '_' {
            out.push('-');
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let previous = chars[i - 1];
            let next_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());

            if previous.is_lowercase()
                || previous.is_ascii_digit()
                || (previous.is_uppercase() && next_lower)
            {
                out.push('-');
            }
        }

        out.extend(c.to_lowercase());
    }

    out
}

fn documentation(attributes: &[syn::Attribute]) -> Option<String> {
    let lines: Vec<String> = attributes
        .iter()
        .filter(|attribute| attribute.path().is_ident("doc"))
        .filter_map(|attribute| match &attribute.meta {
            syn::Meta::NameValue(syn::MetaNameValue {
                value:
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(line),
                        ..
                    }),
                ..
            }) => Some(line.value().trim().to_string()),
            _ => None,
        })
        .collect();
    let documentation = lines.join("\n").trim().to_string();

    if documentation.is_empty() {
        None
    } else {
        Some(documentation)
    }
}
