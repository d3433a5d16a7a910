//! Disambiguation policies: the name-based guesses the translator falls back to when the registry is silent.
//!
//! Type information always wins. A policy is consulted only after the registry has no answer, and every guess it
//! makes is isolated here so it can be swapped or tested on its own.
//!
//! ## Notes
//! - [`ConventionPolicy`] (the default) reproduces the established naming heuristics: receivers named like arrays use
//!   `[]`, receivers named like maps use `put`, a few field names are treated as public, and operands named like text
//!   are parsed before multiplication. These heuristics are known to be fragile.
//! - [`RegistryOnlyPolicy`] makes no name-based guesses beyond the well-known host library names.

use std::fmt::Debug;

use mvel_core::lang::conventions;

/// Name-based disambiguation used when the registry has no type information.
///
/// The well-known host names (zero-argument builtins, static field names, package segments) have default
/// implementations backed by `mvel_core::lang::conventions`; the fragile heuristics must be chosen explicitly.
pub trait DisambiguationPolicy: Debug + Send + Sync {
    /// `x.size` reads as `x.size()`.
    fn is_zero_arg_method(&self, name: &str) -> bool {
        conventions::is_builtin_zero_arg_method(name)
    }

    /// `System.out` reads as a field, not an accessor.
    fn is_static_field(&self, name: &str) -> bool {
        conventions::is_static_field_name(name)
    }

    /// `java.util` stays a dotted path.
    fn is_namespace_segment(&self, name: &str) -> bool {
        conventions::is_namespace_segment(name)
    }

    /// Whether `field` is read and written directly rather than through accessor and mutator.
    fn looks_public_field(&self, field: &str) -> bool;

    /// Whether an indexed receiver (given as translated text) is an array.
    fn looks_array_like(&self, receiver: &str) -> bool;

    /// Whether an indexed receiver (given as translated text) is a map.
    fn looks_map_like(&self, receiver: &str) -> bool;

    /// Element type of an array receiver, guessed from its name.
    fn array_element_type(&self, receiver: &str) -> Option<&'static str>;

    /// Whether a multiplication operand (given as translated text) holds text that must be parsed first.
    fn looks_textual_operand(&self, operand: &str) -> bool;
}

// ============================================================================
// Convention policy
// ============================================================================

/// Substring and exact-name heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionPolicy;

/// Receiver names conventionally used for arrays.
const ARRAY_NAMES: &[&str] = &["x", "a"];

/// Accessor calls conventionally returning maps.
const MAP_ACCESSORS: &[&str] = &["getItems()", "getPrices()", "getBigDecimalMap()", "getBigIntegerMap()"];

/// Receiver name fragments conventionally used for maps.
const MAP_NAME_FRAGMENTS: &[&str] = &["map", "Map", "items", "prices"];

/// Operand names conventionally holding numeric text.
const TEXTUAL_NAMES: &[&str] = &["y"];

impl DisambiguationPolicy for ConventionPolicy {
    fn looks_public_field(&self, field: &str) -> bool {
        conventions::is_conventionally_public_field(field)
    }

    fn looks_array_like(&self, receiver: &str) -> bool {
        let has_letter = receiver.chars().any(|c| c.is_ascii_alphabetic());
        receiver.contains("[]")
            || receiver.ends_with("Array")
            || (has_letter && (receiver.contains("array") || receiver.contains("Array")))
            || ARRAY_NAMES.contains(&receiver)
            || has_numeric_index(receiver)
    }

    fn looks_map_like(&self, receiver: &str) -> bool {
        if MAP_ACCESSORS.iter().any(|a| receiver.contains(a)) {
            return true;
        }
        let root = root_name(receiver);
        root == "m" || MAP_NAME_FRAGMENTS.iter().any(|f| root.contains(f))
    }

    fn array_element_type(&self, receiver: &str) -> Option<&'static str> {
        let root = root_name(receiver);
        if root == "x" || root.starts_with("int") {
            Some("int")
        } else if root.contains("String") {
            Some("String")
        } else if root.contains("BigDecimal") {
            Some("BigDecimal")
        } else if root.contains("BigInteger") {
            Some("BigInteger")
        } else {
            None
        }
    }

    fn looks_textual_operand(&self, operand: &str) -> bool {
        TEXTUAL_NAMES.contains(&operand) || operand.contains("String") || operand.ends_with("Str")
    }
}

// ============================================================================
// Registry-only policy
// ============================================================================

/// No name-based guesses: unknown receivers index with `get`, unknown fields go through accessors.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryOnlyPolicy;

impl DisambiguationPolicy for RegistryOnlyPolicy {
    fn looks_public_field(&self, _field: &str) -> bool {
        false
    }

    fn looks_array_like(&self, _receiver: &str) -> bool {
        false
    }

    fn looks_map_like(&self, _receiver: &str) -> bool {
        false
    }

    fn array_element_type(&self, _receiver: &str) -> Option<&'static str> {
        None
    }

    fn looks_textual_operand(&self, _operand: &str) -> bool {
        false
    }
}

/// Leading identifier of a receiver text (`$items.get(0)` → `items`).
fn root_name(receiver: &str) -> &str {
    let end = receiver.find(['.', '[', '(']).unwrap_or(receiver.len());
    let root = &receiver[..end];
    root.strip_prefix('$').unwrap_or(root)
}

/// `a[0]`-style text: an already-indexed receiver.
fn has_numeric_index(receiver: &str) -> bool {
    receiver.match_indices('[').any(|(i, _)| {
        let rest = &receiver[i + 1..];
        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        digits > 0 && rest[digits..].starts_with(']')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convention_array_names() {
        let policy = ConventionPolicy;
        assert!(policy.looks_array_like("x"));
        assert!(policy.looks_array_like("intArray"));
        assert!(policy.looks_array_like("values[0]"));
        assert!(!policy.looks_array_like("list"));
        assert!(!policy.looks_array_like("p.getAddresses()"));
    }

    #[test]
    fn test_convention_map_names() {
        let policy = ConventionPolicy;
        assert!(policy.looks_map_like("m"));
        assert!(policy.looks_map_like("$priceMap"));
        assert!(policy.looks_map_like("order.getItems()"));
        assert!(!policy.looks_map_like("list"));
    }

    #[test]
    fn test_convention_public_fields_and_text() {
        let policy = ConventionPolicy;
        assert!(policy.looks_public_field("nickName"));
        assert!(policy.looks_public_field("publicId"));
        assert!(!policy.looks_public_field("name"));
        assert!(policy.looks_textual_operand("ageStr"));
        assert!(!policy.looks_textual_operand("age"));
    }

    #[test]
    fn test_convention_array_element_type() {
        let policy = ConventionPolicy;
        assert_eq!(policy.array_element_type("x[2]"), Some("int"));
        assert_eq!(policy.array_element_type("bigDecimalValues"), None);
        assert_eq!(policy.array_element_type("BigDecimalValues"), Some("BigDecimal"));
    }

    #[test]
    fn test_registry_only_guesses_nothing() {
        let policy = RegistryOnlyPolicy;
        assert!(!policy.looks_array_like("x"));
        assert!(!policy.looks_map_like("m"));
        assert!(!policy.looks_public_field("nickName"));
        // Well-known host names still apply
        assert!(policy.is_zero_arg_method("size"));
        assert!(policy.is_static_field("MAX_VALUE"));
        assert!(policy.is_namespace_segment("java"));
    }
}
