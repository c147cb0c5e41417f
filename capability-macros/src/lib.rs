use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, Expr, ExprLit, ItemFn, Lit, Meta,
    punctuated::Punctuated, Token,
};

/// Procedural macro to define conversion capabilities with minimal
/// boilerplate.
///
/// Usage:
/// ```ignore
/// #[capability(kind = "Merge", name = "Merge PDF", from_type = "pdf[]", to_type = "pdf")]
/// async fn merge_pdf(request: &ConversionRequest, workspace: &Workspace) -> CapResult<ConversionOutput> {
///     // implementation
/// }
/// ```
///
/// This generates a struct implementing the CapabilityHandler trait, with the
/// endpoint and form schema derived from the named CapabilityKind variant.
#[proc_macro_attribute]
pub fn capability(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args with Punctuated::<Meta, Token![,]>::parse_terminated);
    let input_fn = parse_macro_input!(input as ItemFn);

    // Extract attributes
    let mut kind: Option<String> = None;
    let mut name: Option<String> = None;
    let mut from_type: Option<String> = None;
    let mut to_type: Option<String> = None;

    for meta in args {
        if let Meta::NameValue(nv) = meta {
            let value = match nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit_str),
                    ..
                }) => lit_str.value(),
                _ => continue,
            };
            if nv.path.is_ident("kind") {
                kind = Some(value);
            } else if nv.path.is_ident("name") {
                name = Some(value);
            } else if nv.path.is_ident("from_type") {
                from_type = Some(value);
            } else if nv.path.is_ident("to_type") {
                to_type = Some(value);
            }
        }
    }

    let kind = kind.expect("capability macro requires 'kind' attribute");
    let name = name.expect("capability macro requires 'name' attribute");
    let from_type = from_type.expect("capability macro requires 'from_type' attribute");
    let to_type = to_type.expect("capability macro requires 'to_type' attribute");

    // Derive struct name from the kind variant
    // "Merge" -> "MergeCapability"
    let struct_name = derive_struct_name(&kind);
    let kind_ident = format_ident!("{}", kind);

    // Get the handler function name
    let fn_name = &input_fn.sig.ident;

    // Generate the code
    let expanded = quote! {
        // Generate the capability struct
        pub struct #struct_name;

        // Implement CapabilityHandler trait
        #[async_trait::async_trait]
        impl crate::capabilities::core::CapabilityHandler for #struct_name {
            fn kind(&self) -> crate::models::CapabilityKind {
                crate::models::CapabilityKind::#kind_ident
            }

            fn name(&self) -> &str {
                #name
            }

            fn from_type(&self) -> &str {
                #from_type
            }

            fn to_type(&self) -> &str {
                #to_type
            }

            async fn execute(
                &self,
                request: &crate::models::ConversionRequest,
                workspace: &crate::tools::Workspace,
            ) -> crate::capabilities::core::CapResult<crate::models::ConversionOutput> {
                #fn_name(request, workspace).await
            }
        }

        // Keep the original function
        #input_fn
    };

    TokenStream::from(expanded)
}

/// Derive a struct name from a capability kind.
///
/// Examples:
/// - "Merge" -> "MergeCapability"
/// - "WordToPdf" -> "WordToPdfCapability"
fn derive_struct_name(kind: &str) -> proc_macro2::Ident {
    format_ident!("{}Capability", kind)
}
