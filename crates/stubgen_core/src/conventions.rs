//! Naming conventions for generated test units.
//!
//! Every renderer derives the generated unit's namespace, type name and stub names through these helpers, so the
//! shape consumers depend on (namespace suffix, `<Type>Test`, one stub per public method) is identical across test
//! frameworks.
//!
//! ## Examples
//! ```rust
//! use stubgen_core::conventions;
//!
//! assert_eq!(conventions::test_namespace("Shop"), "Shop.Tests");
//! assert_eq!(conventions::test_type_name("Cart"), "CartTest");
//! ```

/// Suffix appended to the source namespace.
pub const TEST_NAMESPACE_SUFFIX: &str = "Tests";

/// Suffix appended to the source type name to form the generated type.
pub const TEST_TYPE_SUFFIX: &str = "Test";

/// Suffix appended to each public method name to form its stub test.
pub const TEST_METHOD_SUFFIX: &str = "Test";

/// Message every generated stub fails with.
pub const FAILURE_MARKER: &str = "autogenerated";

/// Namespace of the generated unit for a type declared in `namespace`.
pub fn test_namespace(namespace: &str) -> String {
    format!("{namespace}.{TEST_NAMESPACE_SUFFIX}")
}

/// Name of the generated test type for `type_name`.
pub fn test_type_name(type_name: &str) -> String {
    format!("{type_name}{TEST_TYPE_SUFFIX}")
}

/// Stub test names for `methods`, one per entry, in order.
///
/// ## Notes
/// - Overloads share a method name; the second and later occurrences get a numeric suffix (`AddTest`, `AddTest2`)
///   so the generated unit still compiles.
/// - A numbered name that collides with a later method's natural name is skipped past.
pub fn stub_names(methods: &[String]) -> Vec<String> {
    let mut taken = std::collections::HashSet::new();
    let mut names = Vec::with_capacity(methods.len());

    for method in methods {
        let base = format!("{method}{TEST_METHOD_SUFFIX}");
        let mut candidate = base.clone();
        let mut n = 2;
        while !taken.insert(candidate.clone()) {
            candidate = format!("{base}{n}");
            n += 1;
        }
        names.push(candidate);
    }

    names
}
