//! Shared naming conventions (well-known identifiers) used to disambiguate translated code.
//!
//! Translation has no live type introspection. When the symbol registry does not know a member, the translator falls
//! back to these JavaBeans-style conventions and well-known host-library names.
//!
//! ## Examples
//! ```rust
//! use mvel_core::lang::conventions;
//!
//! assert_eq!(conventions::accessor_name("name"), "getName");
//! assert_eq!(conventions::mutator_name("name"), "setName");
//! assert!(conventions::is_builtin_zero_arg_method("size"));
//! ```

/// Prefix for property read accessors (`getName()`).
pub const ACCESSOR_PREFIX: &str = "get";

/// Prefix for property mutators (`setName(v)`).
pub const MUTATOR_PREFIX: &str = "set";

/// Lambda parameter bound inside projections and selections.
pub const ITERATION_VARIABLE: &str = "item";

/// Rounding context passed to arbitrary-precision decimal arithmetic.
pub const DECIMAL_CONTEXT: &str = "java.math.MathContext.DECIMAL128";

/// Arbitrary-precision decimal type name.
pub const BIG_DECIMAL: &str = "BigDecimal";

/// Arbitrary-precision integer type name.
pub const BIG_INTEGER: &str = "BigInteger";

/// Textual type name.
pub const STRING: &str = "String";

/// Zero-argument methods every object (or common library type) exposes; `x.size` means `x.size()`.
pub const ZERO_ARG_BUILTIN_METHODS: &[&str] = &[
    "length",
    "size",
    "isEmpty",
    "toString",
    "hashCode",
    "equals",
    "clone",
    "notify",
    "notifyAll",
    "wait",
    "getClass",
];

/// Member names that are conventionally static or public fields (`System.out`, `Integer.MAX_VALUE`).
pub const STATIC_FIELD_NAMES: &[&str] = &[
    "out",
    "err",
    "in",
    "TYPE",
    "class",
    "MAX_VALUE",
    "MIN_VALUE",
    "POSITIVE_INFINITY",
    "NEGATIVE_INFINITY",
    "NaN",
];

/// Segments that conventionally name packages, so `java.util` stays a dotted path.
pub const NAMESPACE_SEGMENTS: &[&str] = &[
    "org",
    "com",
    "net",
    "java",
    "javax",
    "sun",
    "mvel3",
    "transpiler",
    "test",
    "main",
    "util",
    "lang",
    "io",
];

/// Field-name prefix that conventionally marks a public field.
pub const PUBLIC_FIELD_PREFIX: &str = "public";

/// Individual field names that are conventionally public.
pub const PUBLIC_FIELD_NAMES: &[&str] = &["nickName", "parentPublic"];

/// Describe a boxed numeric (or boolean) host type and how to parse it from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxedType {
    pub primitive: &'static str,
    pub boxed: &'static str,
    /// Static parse method taking a `String`, if the type has one.
    pub parse_method: Option<&'static str>,
}

/// Registry of boxed primitive types.
pub const BOXED_TYPES: &[BoxedType] = &[
    boxed("int", "Integer", Some("Integer.parseInt")),
    boxed("long", "Long", Some("Long.parseLong")),
    boxed("short", "Short", Some("Short.parseShort")),
    boxed("byte", "Byte", Some("Byte.parseByte")),
    boxed("float", "Float", Some("Float.parseFloat")),
    boxed("double", "Double", Some("Double.parseDouble")),
    boxed("boolean", "Boolean", Some("Boolean.parseBoolean")),
    boxed("char", "Character", None),
];

/// Method names for arbitrary-precision arithmetic, keyed by infix spelling.
pub const ARBITRARY_PRECISION_METHODS: &[(&str, &str)] = &[
    ("+", "add"),
    ("-", "subtract"),
    ("*", "multiply"),
    ("/", "divide"),
    ("%", "remainder"),
];

/// Capitalize the first character of a property name (`name` → `Name`).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the read-accessor name for a property.
pub fn accessor_name(property: &str) -> String {
    format!("{ACCESSOR_PREFIX}{}", capitalize(property))
}

/// Build the mutator name for a property.
pub fn mutator_name(property: &str) -> String {
    format!("{MUTATOR_PREFIX}{}", capitalize(property))
}

/// Check whether `name` is a well-known zero-argument method.
pub fn is_builtin_zero_arg_method(name: &str) -> bool {
    ZERO_ARG_BUILTIN_METHODS.contains(&name)
}

/// Check whether `name` conventionally denotes a static/public field.
pub fn is_static_field_name(name: &str) -> bool {
    STATIC_FIELD_NAMES.contains(&name)
}

/// Check whether `name` conventionally denotes a package segment.
pub fn is_namespace_segment(name: &str) -> bool {
    NAMESPACE_SEGMENTS.contains(&name)
}

/// Check whether `name` conventionally denotes a public instance field.
pub fn is_conventionally_public_field(name: &str) -> bool {
    name.starts_with(PUBLIC_FIELD_PREFIX) || PUBLIC_FIELD_NAMES.contains(&name)
}

/// Look up a boxed type by either its primitive or boxed spelling.
pub fn boxed_type(name: &str) -> Option<&'static BoxedType> {
    BOXED_TYPES.iter().find(|b| b.primitive == name || b.boxed == name)
}

/// Return the arbitrary-precision method for an infix spelling (`+` → `add`).
pub fn arbitrary_precision_method(spelling: &str) -> Option<&'static str> {
    ARBITRARY_PRECISION_METHODS
        .iter()
        .find(|(op, _)| *op == spelling)
        .map(|(_, method)| *method)
}

/// Check whether a type name is one of the arbitrary-precision numeric types.
pub fn is_arbitrary_precision(type_name: &str) -> bool {
    simple_name(type_name) == BIG_DECIMAL || simple_name(type_name) == BIG_INTEGER
}

/// Strip a package qualifier: `java.math.BigDecimal` → `BigDecimal`.
pub fn simple_name(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}

const fn boxed(primitive: &'static str, boxed: &'static str, parse_method: Option<&'static str>) -> BoxedType {
    BoxedType {
        primitive,
        boxed,
        parse_method,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("salary"), "Salary");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("x"), "X");
    }

    #[test]
    fn test_public_field_conventions() {
        assert!(is_conventionally_public_field("publicName"));
        assert!(is_conventionally_public_field("nickName"));
        assert!(!is_conventionally_public_field("name"));
    }

    #[test]
    fn test_boxed_lookup_by_either_spelling() {
        assert_eq!(boxed_type("int").map(|b| b.boxed), Some("Integer"));
        assert_eq!(boxed_type("Double").and_then(|b| b.parse_method), Some("Double.parseDouble"));
        assert_eq!(boxed_type("char").and_then(|b| b.parse_method), None);
        assert!(boxed_type("String").is_none());
    }

    #[test]
    fn test_arbitrary_precision_names() {
        assert!(is_arbitrary_precision("java.math.BigDecimal"));
        assert!(is_arbitrary_precision("BigInteger"));
        assert!(!is_arbitrary_precision("Integer"));
        assert_eq!(arbitrary_precision_method("%"), Some("remainder"));
        assert_eq!(arbitrary_precision_method("**"), None);
    }
}
