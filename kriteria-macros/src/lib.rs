use convert_case::{Case, Casing};
use darling::util::Flag;
use darling::{FromDeriveInput, FromVariant};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{parse_macro_input, Data, DataEnum, DeriveInput};

#[proc_macro_derive(Choices, attributes(choice, choices))]
pub fn derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = ContainerOpts::from_derive_input(&input).expect("Unable to parse container options");

    let data = match &input.data {
        Data::Enum(data) => data,
        _ => panic!("Derive can only be used on enum types"),
    };

    let choices = collect(data);

    let expanded_choices = expand_choices(&input.ident, &opts, &choices);
    let expanded_values = expand_values(&input.ident, &opts, &choices);

    let expanded = quote! {
        #expanded_choices

        #expanded_values
    };

    proc_macro::TokenStream::from(expanded)
}

fn expand_value(ident: &Ident, opts: &ContainerOpts, choice: &Choice) -> TokenStream {
    match opts.integer.is_present() {
        true => {
            let variant = &choice.ident;
            quote! { kriteria::value::Value::Integer(#ident::#variant as i64) }
        }
        false => {
            let token = &choice.token;
            quote! { kriteria::value::Value::Text(#token.to_string()) }
        }
    }
}

fn expand_choices(ident: &Ident, opts: &ContainerOpts, choices: &[Choice]) -> TokenStream {
    let mappings = choices.iter().flat_map(|choice| {
        let value = expand_value(ident, opts, choice);
        std::iter::once(&choice.token)
            .chain(&choice.aliases)
            .map(move |token| {
                quote! {
                    (#token, #value)
                }
            })
    });

    let tokens = choices.iter().map(|choice| {
        let variant = &choice.ident;
        let token = &choice.token;
        quote! {
            Self::#variant => #token
        }
    });

    quote! {
        impl kriteria::choice::Choices for #ident {
            fn choice_type() -> Result<kriteria::choice::ChoiceType, kriteria::error::Error> {
                kriteria::choice::ChoiceType::new([ #(#mappings, )* ])
            }
        }

        impl #ident {
            /// The primary choice token of this variant.
            pub fn token(&self) -> &'static str {
                match self {
                    #(#tokens, )*
                }
            }
        }
    }
}

fn expand_values(ident: &Ident, opts: &ContainerOpts, choices: &[Choice]) -> TokenStream {
    let values = choices.iter().map(|choice| {
        let variant = &choice.ident;
        let value = expand_value(ident, opts, choice);
        quote! {
            #ident::#variant => #value
        }
    });

    quote! {
        impl From<#ident> for kriteria::value::Value {
            fn from(value: #ident) -> Self {
                match value {
                    #(#values, )*
                }
            }
        }

        impl From<#ident> for kriteria::value::Field {
            fn from(value: #ident) -> Self {
                kriteria::value::Field::Value(value.into())
            }
        }
    }
}

struct Choice {
    ident: Ident,
    token: String,
    aliases: Vec<String>,
}

#[derive(FromDeriveInput, Default)]
#[darling(default, attributes(choices))]
struct ContainerOpts {
    // Map to the variant's discriminant instead of its token
    integer: Flag,
}

#[derive(FromVariant, Default)]
#[darling(default, attributes(choice))]
struct VariantOpts {
    rename: Option<String>,
    #[darling(multiple)]
    alias: Vec<String>,
}

fn collect(data: &DataEnum) -> Vec<Choice> {
    let mut choices = vec![];

    for variant in &data.variants {
        if !variant.fields.is_empty() {
            panic!("Variant must not have any fields");
        }

        let opts = VariantOpts::from_variant(variant).expect("Unable to parse variant options");

        let token = opts
            .rename
            .unwrap_or_else(|| variant.ident.to_string().to_case(Case::Snake));

        choices.push(Choice {
            ident: variant.ident.clone(),
            token,
            aliases: opts.alias,
        });
    }

    choices
}
