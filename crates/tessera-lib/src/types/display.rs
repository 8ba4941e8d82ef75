//! Structural rendering of types for diagnostics and debugging.

use std::fmt::Write;

use tessera_core::Symbol;

use super::data::TypeData;
use super::id::TypeId;
use super::kind::CollectionForm;

/// Read access shared by the builder and the locked system.
pub(crate) trait TypeLookup {
    fn data(&self, ty: TypeId) -> &TypeData;
    fn symbol(&self, sym: Symbol) -> &str;
}

pub(crate) fn display(lookup: &impl TypeLookup, ty: TypeId) -> String {
    let mut out = String::new();
    write_type(lookup, ty, &mut out);
    out
}

fn write_type(lookup: &impl TypeLookup, ty: TypeId, out: &mut String) {
    match lookup.data(ty) {
        TypeData::Any => out.push_str("object"),
        TypeData::Basic(basic) => out.push_str(basic.name()),
        TypeData::Enum { name, .. }
        | TypeData::NamedRecord { name, .. }
        | TypeData::PrimaryInterface { name, .. }
        | TypeData::SecondaryInterface { name, .. }
        | TypeData::AbstractInterface { name, .. } => out.push_str(lookup.symbol(*name)),
        TypeData::AnonymousRecord { elements } => {
            out.push('(');
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_type(lookup, element.ty, out);
                if let Some(name) = element.name {
                    let _ = write!(out, " {}", lookup.symbol(name));
                }
            }
            out.push(')');
        }
        TypeData::Array { item } => {
            write_type(lookup, *item, out);
            out.push_str("[]");
        }
        TypeData::List { item, form } => {
            out.push_str(collection_name(*form, "List", "IList", "IReadOnlyList"));
            write_args(lookup, &[*item], out);
        }
        TypeData::Set { item, form } => {
            out.push_str(collection_name(*form, "HashSet", "ISet", "IReadOnlySet"));
            write_args(lookup, &[*item], out);
        }
        TypeData::Dictionary { key, value, form } => {
            out.push_str(collection_name(
                *form,
                "Dictionary",
                "IDictionary",
                "IReadOnlyDictionary",
            ));
            write_args(lookup, &[*key, *value], out);
        }
        TypeData::Union { members } => {
            out.push_str("Union<");
            for (i, member) in members.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                write_type(lookup, *member, out);
            }
            out.push('>');
        }
    }
    if ty.is_nullable() {
        out.push('?');
    }
}

fn collection_name(
    form: CollectionForm,
    concrete: &'static str,
    abstraction: &'static str,
    read_only: &'static str,
) -> &'static str {
    match form {
        CollectionForm::Concrete => concrete,
        CollectionForm::Abstract => abstraction,
        CollectionForm::ReadOnly => read_only,
    }
}

fn write_args(lookup: &impl TypeLookup, args: &[TypeId], out: &mut String) {
    out.push('<');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_type(lookup, *arg, out);
    }
    out.push('>');
}
