use {
    crate::common::{get_crate_name, RecordArgs},
    darling::{Error, FromDeriveInput, Result},
    proc_macro2::TokenStream,
    quote::quote,
    syn::DeriveInput,
};

/// Generate `Schema` and `Field` impls for a struct.
///
/// The record type is built in a lazily initialized static inside
/// `Schema::record_type`, registering one field per struct field in
/// declaration order. Generic structs are rejected since a static cannot
/// depend on type parameters.
pub(crate) fn generate(input: DeriveInput) -> Result<TokenStream> {
    let args = RecordArgs::from_derive_input(&input)?;
    let crate_name = get_crate_name(&args);
    let ident = &args.ident;

    if !args.generics.params.is_empty() {
        return Err(Error::custom("`Record` cannot be derived for generic structs")
            .with_span(&args.generics));
    }
    let Some(fields) = args.fields() else {
        return Err(Error::custom("`Record` can only be derived for structs"));
    };

    let mut errors = Error::accumulator();
    let mut members = Vec::with_capacity(fields.len());
    for field in fields.iter() {
        match (&field.ident, field.record_name()) {
            (Some(member), Some(name)) => members.push((member, name, field)),
            _ => errors.push(Error::custom("fields must be named").with_span(&field.ty)),
        }
    }
    errors.finish()?;

    let record_name = args.name.clone().unwrap_or_else(|| ident.to_string());
    let record_endian = args.little_endian.map(|little| {
        quote! { .with_endian(#crate_name::Endian::from_little(#little)) }
    });

    let registrations = members.iter().map(|(_, name, field)| {
        let ty = &field.ty;
        let offset = field.offset.map(|offset| quote! { .at(#offset) });
        let endian = field.little_endian.map(|little| {
            quote! { .with_endian(#crate_name::Endian::from_little(#little)) }
        });
        quote! {
            .register(<#ty as #crate_name::Field>::declare(#name) #offset #endian)
        }
    });

    let to_record = members.iter().map(|(member, name, field)| {
        let ty = &field.ty;
        quote! {
            .with(#name, <#ty as #crate_name::Field>::to_value(&self.#member))
        }
    });

    let from_record = members.iter().map(|(member, name, field)| {
        let ty = &field.ty;
        quote! {
            #member: <#ty as #crate_name::Field>::from_value(#name, record.take(#name))?
        }
    });

    Ok(quote! {
        impl #crate_name::Schema for #ident {
            fn record_type() -> &'static #crate_name::RecordTypeRef {
                static RECORD_TYPE: #crate_name::__private::Lazy<#crate_name::RecordTypeRef> =
                    #crate_name::__private::Lazy::new(|| {
                        #crate_name::RecordType::builder(#record_name)
                            #record_endian
                            #(#registrations)*
                            .build()
                    });
                &RECORD_TYPE
            }

            fn to_record(&self) -> #crate_name::Record {
                #crate_name::Record::new(<Self as #crate_name::Schema>::record_type())
                    #(#to_record)*
            }

            #[allow(unused_mut, unused_variables)]
            fn from_record(mut record: #crate_name::Record) -> #crate_name::Result<Self> {
                ::core::result::Result::Ok(Self {
                    #(#from_record,)*
                })
            }
        }

        impl #crate_name::Field for #ident {
            fn declare(name: &str) -> #crate_name::FieldDecl {
                #crate_name::FieldDecl::record(
                    name,
                    <Self as #crate_name::Schema>::record_type(),
                )
            }

            fn to_value(&self) -> #crate_name::Value {
                #crate_name::Value::Record(<Self as #crate_name::Schema>::to_record(self))
            }

            fn from_value(
                name: &str,
                value: ::core::option::Option<#crate_name::Value>,
            ) -> #crate_name::Result<Self> {
                #crate_name::__private::nested_from_value::<Self>(name, value)
            }
        }
    })
}
