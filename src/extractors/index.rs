//! DeclarationIndex - all type declarations of the source roots, by qualified name
//!
//! Provides Java-style simple-name resolution (member types, imports, same package,
//! `java.lang`) and supertype queries over the indexed declarations.

use crate::extractors::base::{Annotation, ClassDecl, CompilationUnit, ConstantExpr, ConstantValue, ElementValue, FieldDecl};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// Index of the type declarations found below the source roots
#[derive(Debug, Default)]
pub struct DeclarationIndex {
    classes: BTreeMap<String, ClassDecl>,
    packages: BTreeSet<String>,
}

impl DeclarationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add all types of a compilation unit; a type that is already indexed is kept
    pub fn add_unit(&mut self, unit: CompilationUnit) {
        self.packages.insert(unit.package.clone());
        for class in unit.classes {
            if let Some(existing) = self.classes.get(&class.qualified_name) {
                tracing::warn!(
                    "{}: duplicate declaration of '{}', previously declared at {}",
                    class.position,
                    class.qualified_name,
                    existing.position
                );
                continue;
            }
            self.classes.insert(class.qualified_name.clone(), class);
        }
    }

    /// Replace references to constant fields by their values
    ///
    /// Runs once all units are added: field initializers such as `PREFIX + ".x"` and
    /// annotation elements such as `defaultValue = DEFAULT` are folded wherever every
    /// name resolves to a constant field.
    pub fn resolve_constants(&mut self) {
        let resolved: Vec<ClassDecl> = {
            let resolver = ConstantResolver::new(self);
            self.classes
                .values()
                .filter(|c| has_unresolved_constants(c))
                .map(|c| resolver.resolve(c))
                .collect()
        };

        tracing::debug!("Resolved constant references in {} types", resolved.len());
        for class in resolved {
            self.classes.insert(class.qualified_name.clone(), class);
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, qualified_name: &str) -> Option<&ClassDecl> {
        self.classes.get(qualified_name)
    }

    /// Look up a class by canonical or binary name
    pub fn get_by_binary_or_qualified(&self, name: &str) -> Option<&ClassDecl> {
        self.get(name).or_else(|| self.get(&name.replace('$', ".")))
    }

    /// Package names, sorted
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(String::as_str)
    }

    pub fn has_package(&self, package: &str) -> bool {
        self.packages.contains(package)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.classes.values()
    }

    /// All types of a package, member types included, sorted by package-relative name
    pub fn classes_in_package(&self, package: &str) -> Vec<&ClassDecl> {
        let mut classes: Vec<&ClassDecl> = self
            .classes
            .values()
            .filter(|c| c.package == package)
            .collect();
        classes.sort_by(|a, b| a.package_relative_name().cmp(b.package_relative_name()));
        classes
    }

    /// Candidate qualified names for a type name used inside `context`, in lookup order
    ///
    /// A dotted name is resolved by its first segment, and is also tried as a
    /// fully qualified name.
    pub fn type_candidates(&self, context: &ClassDecl, name: &str) -> Vec<String> {
        let name = name.replace('$', ".");
        let mut candidates = Vec::new();

        match name.split_once('.') {
            Some((first, rest)) => {
                for head in self.simple_name_candidates(context, first) {
                    candidates.push(format!("{}.{}", head, rest));
                }
                candidates.push(name.clone());
            }
            None => candidates = self.simple_name_candidates(context, &name),
        }

        let mut seen = HashSet::new();
        candidates.retain(|c| seen.insert(c.clone()));
        candidates
    }

    fn simple_name_candidates(&self, context: &ClassDecl, simple: &str) -> Vec<String> {
        let mut candidates = Vec::new();

        // The class itself, its member types, then the same for each enclosing class
        let mut scope = Some(context);
        while let Some(class) = scope {
            if class.name == simple {
                candidates.push(class.qualified_name.clone());
            }
            for member in &class.member_types {
                if member.rsplit('.').next() == Some(simple) {
                    candidates.push(member.clone());
                }
            }
            scope = class.enclosing.as_deref().and_then(|e| self.get(e));
        }

        for import in context.imports.iter().filter(|i| !i.on_demand && !i.is_static) {
            if import.path.rsplit('.').next() == Some(simple) {
                candidates.push(import.path.clone());
            }
        }

        candidates.push(if context.package.is_empty() {
            simple.to_string()
        } else {
            format!("{}.{}", context.package, simple)
        });

        for import in context.imports.iter().filter(|i| i.on_demand && !i.is_static) {
            candidates.push(format!("{}.{}", import.path, simple));
        }

        candidates.push(format!("java.lang.{}", simple));
        candidates
    }

    /// Resolve a type name used inside `context` to an indexed declaration
    pub fn resolve_class(&self, context: &ClassDecl, name: &str) -> Option<&ClassDecl> {
        self.type_candidates(context, name)
            .iter()
            .find_map(|candidate| self.get(candidate))
    }

    /// Whether `class` is, extends or implements one of the `markers` (qualified names)
    ///
    /// Supertypes that are not part of the index (e.g. library base classes) are
    /// matched by their candidate qualified names.
    pub fn is_subclass_of_any(&self, class: &ClassDecl, markers: &[String]) -> bool {
        let markers: HashSet<String> = markers.iter().map(|m| m.replace('$', ".")).collect();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([class]);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.qualified_name.as_str()) {
                continue;
            }
            if markers.contains(&current.qualified_name) {
                return true;
            }

            for supertype in current.superclass.iter().chain(&current.interfaces) {
                let candidates = self.type_candidates(current, supertype);
                if candidates.iter().any(|c| markers.contains(c)) {
                    return true;
                }
                if let Some(resolved) = candidates.iter().find_map(|c| self.get(c)) {
                    queue.push_back(resolved);
                }
            }
        }

        false
    }

    /// The class followed by its indexed superclasses, nearest first
    pub fn superclass_chain<'a>(&'a self, class: &'a ClassDecl) -> Vec<&'a ClassDecl> {
        let mut chain = vec![class];
        let mut current = class;

        while let Some(superclass) = current
            .superclass
            .as_deref()
            .and_then(|name| self.resolve_class(current, name))
        {
            if chain.iter().any(|c| c.qualified_name == superclass.qualified_name) {
                break;
            }
            chain.push(superclass);
            current = superclass;
        }

        chain
    }
}

fn has_unresolved_constants(class: &ClassDecl) -> bool {
    fn unresolved(value: &ElementValue) -> bool {
        match value {
            ElementValue::Name(_) | ElementValue::Expression(_) => true,
            ElementValue::Array(values) => values.iter().any(unresolved),
            _ => false,
        }
    }

    class.fields.iter().any(|f| f.initializer.is_some())
        || annotations_of(class).any(|a| a.elements.iter().any(|(_, v)| unresolved(v)))
}

fn annotations_of(class: &ClassDecl) -> impl Iterator<Item = &Annotation> {
    class
        .annotations
        .iter()
        .chain(class.methods.iter().flat_map(|m| &m.annotations))
        .chain(class.fields.iter().flat_map(|f| &f.annotations))
        .chain(class.enum_constants.iter().flat_map(|c| &c.annotations))
}

/// Evaluates constant references the way `javac` looks up names: the class and its
/// supertypes, the enclosing classes, then static imports
struct ConstantResolver<'a> {
    index: &'a DeclarationIndex,
    /// By (class, field); `None` while a field is being evaluated, so cycles end
    values: RefCell<HashMap<(String, String), Option<ConstantValue>>>,
}

impl<'a> ConstantResolver<'a> {
    fn new(index: &'a DeclarationIndex) -> Self {
        Self {
            index,
            values: RefCell::new(HashMap::new()),
        }
    }

    /// A copy of `class` with every resolvable reference folded
    fn resolve(&self, class: &ClassDecl) -> ClassDecl {
        let mut resolved = class.clone();

        for (field, original) in resolved.fields.iter_mut().zip(&class.fields) {
            if field.initializer.is_some() {
                field.constant_value = self.field_value(class, original);
                if field.constant_value.is_some() {
                    field.initializer = None;
                }
            }
        }

        let annotations = resolved
            .annotations
            .iter_mut()
            .chain(resolved.methods.iter_mut().flat_map(|m| &mut m.annotations))
            .chain(resolved.fields.iter_mut().flat_map(|f| &mut f.annotations))
            .chain(resolved.enum_constants.iter_mut().flat_map(|c| &mut c.annotations));
        for annotation in annotations {
            for (_, value) in &mut annotation.elements {
                self.resolve_element(class, value);
            }
        }

        resolved
    }

    fn resolve_element(&self, context: &ClassDecl, value: &mut ElementValue) {
        let constant = match value {
            ElementValue::Name(name) => self.name_value(context, name),
            ElementValue::Expression(expression) => self.fold(context, expression),
            ElementValue::Array(values) => {
                for value in values {
                    self.resolve_element(context, value);
                }
                None
            }
            _ => None,
        };
        if let Some(constant) = constant {
            *value = ElementValue::Constant(constant);
        }
    }

    fn fold(&self, context: &ClassDecl, expression: &ConstantExpr) -> Option<ConstantValue> {
        expression.fold(&mut |name| self.name_value(context, name))
    }

    fn field_value(&self, class: &ClassDecl, field: &FieldDecl) -> Option<ConstantValue> {
        if let Some(value) = &field.constant_value {
            return Some(value.clone());
        }
        let initializer = field.initializer.as_ref()?;

        let key = (class.qualified_name.clone(), field.name.clone());
        let cached = self.values.borrow().get(&key).cloned();
        if let Some(cached) = cached {
            return cached;
        }
        self.values.borrow_mut().insert(key.clone(), None);
        let value = self.fold(class, initializer);
        self.values.borrow_mut().insert(key, value.clone());
        value
    }

    /// Value of a simple or qualified name used inside `context`
    fn name_value(&self, context: &ClassDecl, name: &str) -> Option<ConstantValue> {
        if let Some((qualifier, field)) = name.rsplit_once('.') {
            let class = self.index.resolve_class(context, qualifier)?;
            return self.member_value(class, field);
        }

        let mut scope = Some(context);
        while let Some(class) = scope {
            if let Some(value) = self.member_value(class, name) {
                return Some(value);
            }
            scope = class.enclosing.as_deref().and_then(|e| self.index.get(e));
        }

        for import in context.imports.iter().filter(|i| i.is_static) {
            let class_name = if import.on_demand {
                import.path.as_str()
            } else {
                match import.path.rsplit_once('.') {
                    Some((class_name, member)) if member == name => class_name,
                    _ => continue,
                }
            };
            if let Some(value) = self
                .index
                .get(class_name)
                .and_then(|class| self.member_value(class, name))
            {
                return Some(value);
            }
        }

        None
    }

    /// A constant field of `class`, or one inherited from its supertypes
    fn member_value(&self, class: &ClassDecl, name: &str) -> Option<ConstantValue> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([class]);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.qualified_name.as_str()) {
                continue;
            }
            if let Some(field) = current.field(name) {
                return self.field_value(current, field);
            }
            for supertype in current.superclass.iter().chain(&current.interfaces) {
                if let Some(resolved) = self.index.resolve_class(current, supertype) {
                    queue.push_back(resolved);
                }
            }
        }

        None
    }
}
