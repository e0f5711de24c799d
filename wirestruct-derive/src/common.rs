use {
    darling::{
        ast::{Data, Fields},
        FromDeriveInput, FromField,
    },
    syn::{ext::IdentExt, parse_quote, Generics, Ident, Path, Type},
};

#[derive(FromField)]
#[darling(attributes(wirestruct))]
pub(crate) struct Field {
    pub(crate) ident: Option<Ident>,
    pub(crate) ty: Type,
    /// Explicit byte offset.
    #[darling(default)]
    pub(crate) offset: Option<usize>,
    /// Per-field byte order.
    #[darling(default)]
    pub(crate) little_endian: Option<bool>,
    /// Name of the field in the record, if not the Rust identifier.
    #[darling(default)]
    pub(crate) rename: Option<String>,
}

impl Field {
    /// The name the field is registered under.
    pub(crate) fn record_name(&self) -> Option<String> {
        self.rename
            .clone()
            .or_else(|| self.ident.as_ref().map(|ident| ident.unraw().to_string()))
    }
}

#[derive(FromDeriveInput)]
#[darling(attributes(wirestruct), supports(struct_named))]
pub(crate) struct RecordArgs {
    pub(crate) ident: Ident,
    pub(crate) generics: Generics,
    pub(crate) data: Data<(), Field>,
    /// Byte order for the whole record type.
    #[darling(default)]
    pub(crate) little_endian: Option<bool>,
    /// Record type name, if not the struct name.
    #[darling(default)]
    pub(crate) name: Option<String>,
    /// Path to the `wirestruct` crate, for re-exports.
    #[darling(rename = "crate", default)]
    pub(crate) crate_path: Option<Path>,
}

impl RecordArgs {
    pub(crate) fn fields(&self) -> Option<&Fields<Field>> {
        match &self.data {
            Data::Struct(fields) => Some(fields),
            Data::Enum(_) => None,
        }
    }
}

pub(crate) fn get_crate_name(args: &RecordArgs) -> Path {
    args.crate_path
        .clone()
        .unwrap_or_else(|| parse_quote!(::wirestruct))
}
