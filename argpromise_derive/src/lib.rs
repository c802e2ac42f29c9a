extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveCommand;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

/// Derive `argpromise::prelude::CommandDescription`.
///
/// * `#[command(name = "..")]`: the token which selects the command (default: the type name in kebab case).
/// * `#[command(short = "..")]`: the one-line description (default: none).
/// * `#[command(long = "..")]`: the full description (default: the doc comment, if any).
#[proc_macro_derive(CommandDescription, attributes(command))]
pub fn command_description(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);

    match DeriveCommand::try_from(ast) {
        Ok(command) => TokenStream2::from(command).into(),
        Err(error) => error.to_compile_error().into(),
    }
}
