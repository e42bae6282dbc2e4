use crate::doc::{DocContext, Skip};
use crate::extractors::base::{ClassDecl, TypeKind};
use crate::model::extraction::ModelContext;
use crate::model::Quickfix;

/// Whether the class is a concrete implementation of a quickfix marker type
pub fn is_quickfix(cx: &ModelContext<'_>, class: &ClassDecl) -> bool {
    class.kind == TypeKind::Class
        && !class.is_abstract()
        && cx
            .index
            .is_subclass_of_any(class, &cx.config.quickfix_base_types)
}

/// Build the quickfix record of a class; the label is its `@cs-label`, or the qualified name
pub fn build_quickfix<'a>(cx: &ModelContext<'a>, class: &'a ClassDecl) -> Result<Quickfix, Skip> {
    let context = DocContext::of_class(class);
    let doc_comment = class.doc_comment.as_deref();

    let label = cx
        .html
        .optional_tag(doc_comment, "cs-label", &context)?
        .unwrap_or_else(|| class.qualified_name.clone());
    let descriptions = cx.html.descriptions(doc_comment, &context);

    Ok(Quickfix {
        class_name: class.qualified_name.clone(),
        simple_name: class.name.clone(),
        position: class.position.clone(),
        label,
        short_description: descriptions.short,
        long_description: descriptions.long,
    })
}
