//! Symbol/type registry consulted by the translator.
//!
//! The registry is the translator's only source of type information. It maps bound names to [`Declaration`]s and,
//! optionally, type names to [`TypeInfo`] shapes (fields and zero-argument methods). It is built once before
//! translation and never mutated while a translation runs, so a single registry can be shared read-only across
//! threads.
//!
//! ## Examples
//!
//! ```rust
//! use mvel::registry::{Declaration, Registry, TypeDescriptor, TypeInfo};
//!
//! let registry = Registry::build([Declaration::new("p", TypeDescriptor::new("Person"))])
//!     .unwrap()
//!     .with_type(TypeInfo::new("Person").with_field("salary", TypeDescriptor::new("BigDecimal")));
//!
//! let p = registry.lookup("p").unwrap();
//! assert_eq!(registry.field_type(p, "salary").map(|t| t.name.as_str()), Some("BigDecimal"));
//! assert!(registry.field_type(p, "unknown").is_none());
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use mvel_core::lang::conventions;
use thiserror::Error;

// ============================================================================
// Declarations
// ============================================================================

/// A nominal type name plus an optional generic-argument annotation (`List` + `"String"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Type name as written by the host, possibly qualified and possibly with `[]` suffixes.
    pub name: String,
    /// Generic arguments as a comma-separated annotation, e.g. `"String, Integer"`.
    pub generics: Option<String>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generics: None,
        }
    }

    pub fn with_generics(mut self, generics: impl Into<String>) -> Self {
        self.generics = Some(generics.into());
        self
    }

    /// Name without package qualifier or generic arguments.
    pub fn simple_name(&self) -> &str {
        conventions::simple_name(&self.name)
    }

    pub fn is_array(&self) -> bool {
        self.name.ends_with("[]")
    }

    /// `Map`, `HashMap`, `SortedMap`, ...
    pub fn is_map(&self) -> bool {
        !self.is_array() && self.simple_name().ends_with("Map")
    }

    pub fn is_arbitrary_precision(&self) -> bool {
        !self.is_array() && conventions::is_arbitrary_precision(&self.name)
    }

    pub fn is_textual(&self) -> bool {
        !self.is_array() && matches!(self.simple_name(), "String" | "CharSequence")
    }

    /// Element type of an array or generic collection, if it can be read off the descriptor.
    ///
    /// ## Notes
    /// - Arrays drop one `[]`.
    /// - Maps yield their last generic argument (the value type); other generics yield the first.
    pub fn element_type(&self) -> Option<TypeDescriptor> {
        if let Some(element) = self.name.strip_suffix("[]") {
            return Some(TypeDescriptor::new(element));
        }
        let generics = self.generics.as_deref()?;
        let args = split_generic_args(generics);
        let arg = if self.is_map() { args.last() } else { args.first() }?;
        Some(parse_descriptor(arg))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.generics {
            Some(generics) => match self.name.find("[]") {
                Some(dims) => write!(f, "{}<{}>{}", &self.name[..dims], generics, &self.name[dims..]),
                None => write!(f, "{}<{}>", self.name, generics),
            },
            None => write!(f, "{}", self.name),
        }
    }
}

/// A name bound to a type, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub name: String,
    pub ty: TypeDescriptor,
}

impl Declaration {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self { name: name.into(), ty }
    }
}

// ============================================================================
// Type shapes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub ty: TypeDescriptor,
    pub is_public: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub arity: usize,
    pub returns: Option<TypeDescriptor>,
}

/// Members of one type, standing in for runtime reflection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: String,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Add a non-public instance field (read and written through accessor/mutator).
    pub fn with_field(self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.with_field_info(name, ty, false, false)
    }

    /// Add a public instance field (read and written directly).
    pub fn with_public_field(self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.with_field_info(name, ty, true, false)
    }

    /// Add a public static field.
    pub fn with_static_field(self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.with_field_info(name, ty, true, true)
    }

    fn with_field_info(mut self, name: impl Into<String>, ty: TypeDescriptor, is_public: bool, is_static: bool) -> Self {
        self.fields.push(FieldInfo {
            name: name.into(),
            ty,
            is_public,
            is_static,
        });
        self
    }

    pub fn with_method(mut self, name: impl Into<String>, arity: usize, returns: Option<TypeDescriptor>) -> Self {
        self.methods.push(MethodInfo {
            name: name.into(),
            arity,
            returns,
        });
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str, arity: usize) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name == name && m.arity == arity)
    }
}

// ============================================================================
// Registry
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate declaration for '{0}'")]
    DuplicateDeclaration(String),
}

/// Declarations, type shapes, and the set of available type names for one translation.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    declarations: Vec<Declaration>,
    index: HashMap<String, usize>,
    types: HashMap<String, TypeInfo>,
    type_names: HashSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from caller-supplied bindings.
    ///
    /// ## Errors
    /// - [`RegistryError::DuplicateDeclaration`] if two declarations share a name.
    pub fn build(declarations: impl IntoIterator<Item = Declaration>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for decl in declarations {
            if registry.index.contains_key(&decl.name) {
                return Err(RegistryError::DuplicateDeclaration(decl.name));
            }
            registry.index.insert(decl.name.clone(), registry.declarations.len());
            registry.declarations.push(decl);
        }
        Ok(registry)
    }

    /// Register the shape of a type, keyed by its name (qualified or simple).
    pub fn with_type(mut self, info: TypeInfo) -> Self {
        self.type_names.insert(info.name.clone());
        self.types.insert(info.name.clone(), info);
        self
    }

    /// Register names that denote types (for bare type references in coercions and construction).
    pub fn with_type_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&Declaration> {
        self.index.get(name).map(|&i| &self.declarations[i])
    }

    /// Look up a root identifier; `$name` falls back to `name`.
    pub fn resolve_root(&self, name: &str) -> Option<&Declaration> {
        self.lookup(name)
            .or_else(|| name.strip_prefix('$').and_then(|bare| self.lookup(bare)))
    }

    /// Best-effort type of `owner.field`: a declared field, else the return type of its accessor.
    pub fn field_type(&self, owner: &Declaration, field: &str) -> Option<&TypeDescriptor> {
        self.member_type(&owner.ty, field)
    }

    /// [`Registry::field_type`] for an owner known only by its type.
    pub fn member_type(&self, owner: &TypeDescriptor, field: &str) -> Option<&TypeDescriptor> {
        let info = self.type_info(owner)?;
        if let Some(f) = info.field(field) {
            return Some(&f.ty);
        }
        info.method(&conventions::accessor_name(field), 0)
            .and_then(|m| m.returns.as_ref())
    }

    /// Shape of a type, matched by exact name first and then by simple name when exactly one type has it.
    pub fn type_info(&self, ty: &TypeDescriptor) -> Option<&TypeInfo> {
        self.types.get(&ty.name).or_else(|| {
            let simple = ty.simple_name();
            let mut matches = self
                .types
                .values()
                .filter(|info| conventions::simple_name(&info.name) == simple);
            let first = matches.next()?;
            matches.next().is_none().then_some(first)
        })
    }

    /// Whether `name` (simple or qualified) is an available type name.
    pub fn is_type_name(&self, name: &str) -> bool {
        self.type_names.contains(name) || self.type_names.iter().any(|t| conventions::simple_name(t) == name)
    }

    /// Expand a bare type name to the registered qualified spelling, if exactly one matches.
    pub fn qualify_type(&self, name: &str) -> Option<&str> {
        if name.contains('.') {
            return None;
        }
        let mut matches = self
            .type_names
            .iter()
            .filter(|t| t.contains('.') && conventions::simple_name(t) == name);
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first.as_str()),
        }
    }

    /// Declarations in the order they were supplied.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Split `"String, Map<String, Integer>"` at top-level commas.
fn split_generic_args(generics: &str) -> Vec<&str> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in generics.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(generics[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(generics[start..].trim());
    args.retain(|a| !a.is_empty());
    args
}

/// Parse `"List<String>"` into a descriptor with generics.
fn parse_descriptor(text: &str) -> TypeDescriptor {
    match (text.find('<'), text.rfind('>')) {
        (Some(open), Some(close)) if open < close => {
            let name = format!("{}{}", &text[..open], &text[close + 1..]);
            TypeDescriptor::new(name).with_generics(&text[open + 1..close])
        }
        _ => TypeDescriptor::new(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_registry() -> Registry {
        Registry::build([
            Declaration::new("p", TypeDescriptor::new("org.mvel3.Person")),
            Declaration::new("names", TypeDescriptor::new("List").with_generics("String")),
        ])
        .unwrap()
        .with_type(
            TypeInfo::new("org.mvel3.Person")
                .with_field("salary", TypeDescriptor::new("java.math.BigDecimal"))
                .with_public_field("nickName", TypeDescriptor::new("String"))
                .with_method("getAge", 0, Some(TypeDescriptor::new("int"))),
        )
    }

    #[test]
    fn test_lookup_and_resolve_root() {
        let registry = person_registry();
        assert_eq!(registry.lookup("p").unwrap().ty.name, "org.mvel3.Person");
        assert!(registry.lookup("$p").is_none());
        assert_eq!(registry.resolve_root("$p").unwrap().name, "p");
        assert!(registry.resolve_root("q").is_none());
    }

    #[test]
    fn test_duplicate_declaration_is_rejected() {
        let err = Registry::build([
            Declaration::new("a", TypeDescriptor::new("int")),
            Declaration::new("a", TypeDescriptor::new("long")),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateDeclaration("a".to_string()));
    }

    #[test]
    fn test_field_type_prefers_field_then_accessor() {
        let registry = person_registry();
        let p = registry.lookup("p").unwrap();
        assert_eq!(registry.field_type(p, "salary").unwrap().simple_name(), "BigDecimal");
        assert_eq!(registry.field_type(p, "age").unwrap().name, "int");
        assert!(registry.field_type(p, "missing").is_none());

        let names = registry.lookup("names").unwrap();
        assert!(registry.field_type(names, "size").is_none());
    }

    #[test]
    fn test_type_info_matches_simple_name() {
        let registry = person_registry();
        assert!(registry.type_info(&TypeDescriptor::new("Person")).is_some());
        assert!(registry.is_type_name("Person"));
        assert_eq!(registry.qualify_type("Person"), Some("org.mvel3.Person"));
        assert_eq!(registry.qualify_type("Address"), None);
    }

    #[test]
    fn test_ambiguous_simple_name_has_no_type_info() {
        let registry = Registry::new()
            .with_type(TypeInfo::new("org.a.Item").with_field("price", TypeDescriptor::new("int")))
            .with_type(TypeInfo::new("org.b.Item").with_field("price", TypeDescriptor::new("java.math.BigDecimal")));
        assert!(registry.type_info(&TypeDescriptor::new("Item")).is_none());
        assert_eq!(
            registry.member_type(&TypeDescriptor::new("org.b.Item"), "price").map(TypeDescriptor::simple_name),
            Some("BigDecimal")
        );
        assert_eq!(registry.qualify_type("Item"), None);
    }

    #[test]
    fn test_declarations_keep_insertion_order() {
        let registry = person_registry();
        let names: Vec<_> = registry.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["p", "names"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_element_types() {
        assert_eq!(TypeDescriptor::new("int[][]").element_type().unwrap().name, "int[]");
        let list = TypeDescriptor::new("List").with_generics("BigDecimal");
        assert_eq!(list.element_type().unwrap().name, "BigDecimal");
        let map = TypeDescriptor::new("Map").with_generics("String, List<Integer>");
        let value = map.element_type().unwrap();
        assert_eq!(value.name, "List");
        assert_eq!(value.generics.as_deref(), Some("Integer"));
        assert!(TypeDescriptor::new("Person").element_type().is_none());
    }

    #[test]
    fn test_descriptor_display() {
        assert_eq!(TypeDescriptor::new("List").with_generics("String").to_string(), "List<String>");
        assert_eq!(TypeDescriptor::new("int[]").to_string(), "int[]");
    }

    #[test]
    fn test_descriptor_classification() {
        assert!(TypeDescriptor::new("java.util.HashMap").is_map());
        assert!(TypeDescriptor::new("BigInteger").is_arbitrary_precision());
        assert!(!TypeDescriptor::new("BigDecimal[]").is_arbitrary_precision());
        assert!(TypeDescriptor::new("java.lang.String").is_textual());
    }
}
