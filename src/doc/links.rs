//! Link targets of `{@link}` references

use crate::extractors::base::{ClassDecl, EnumConstantDecl, FieldDecl, MethodDecl};
use crate::extractors::index::DeclarationIndex;

/// What a doc reference designates
#[derive(Debug, Clone, Copy)]
pub enum DocTarget<'a> {
    Package(&'a str),
    Class(&'a ClassDecl),
    Field(&'a ClassDecl, &'a FieldDecl),
    Method(&'a ClassDecl, &'a MethodDecl),
    EnumConstant(&'a ClassDecl, &'a EnumConstantDecl),
}

impl<'a> DocTarget<'a> {
    /// Default link label, relative to the class the reference appears in
    pub fn label(&self, from: &ClassDecl) -> String {
        let member = |class: &ClassDecl, name: &str| {
            if class.qualified_name == from.qualified_name {
                name.to_string()
            } else {
                format!("{}.{}", class.name, name)
            }
        };

        match self {
            DocTarget::Package(name) => name.to_string(),
            DocTarget::Class(class) => class.name.clone(),
            DocTarget::Field(class, field) => member(class, &field.name),
            DocTarget::Method(class, method) => member(class, &format!("{}()", method.name)),
            DocTarget::EnumConstant(class, constant) => member(class, &constant.name),
        }
    }
}

/// Computes hrefs between the generated pages
///
/// Rule pages live in `checks/` or `filters/`, quickfix pages in `quickfixes/`. Other
/// targets have no page of their own.
pub struct LinkMaker<'a> {
    index: &'a DeclarationIndex,
    check_base_types: &'a [String],
    filter_base_types: &'a [String],
    quickfix_base_types: &'a [String],
}

impl<'a> LinkMaker<'a> {
    pub fn new(
        index: &'a DeclarationIndex,
        check_base_types: &'a [String],
        filter_base_types: &'a [String],
        quickfix_base_types: &'a [String],
    ) -> Self {
        Self {
            index,
            check_base_types,
            filter_base_types,
            quickfix_base_types,
        }
    }

    /// Href of the page documenting `target`, if there is one
    ///
    /// Hrefs are relative to the output root; pages below the root rebase them when
    /// they embed the text (see `render::html`).
    pub fn make_link(&self, target: &DocTarget) -> Option<String> {
        let DocTarget::Class(class) = target else {
            return None;
        };

        let directory = if class.annotation("Rule").is_some()
            && self.index.is_subclass_of_any(class, self.check_base_types)
        {
            "checks"
        } else if class.annotation("Rule").is_some()
            && self.index.is_subclass_of_any(class, self.filter_base_types)
        {
            "filters"
        } else if !class.is_abstract()
            && self.index.is_subclass_of_any(class, self.quickfix_base_types)
        {
            "quickfixes"
        } else {
            return None;
        };

        Some(format!("{}/{}.html", directory, class.name))
    }
}
