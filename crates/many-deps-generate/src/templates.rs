use askama::Template;

/// Template for a generated `src/lib.rs`, shared by ranked crates and the root.
#[derive(Template)]
#[template(path = "lib.rs.jinja", escape = "none")]
pub struct LibRsTemplate<'a> {
    /// `use` paths, one statement each.
    pub imports: &'a [String],
    /// Macro defined and exported by this crate.
    pub exported_macro: Option<&'a str>,
    pub function: &'a str,
    /// Functions called from the body, in rank order.
    pub calls: &'a [String],
    /// Macros invoked from the body after the calls, in rank order.
    pub macro_calls: &'a [String],
    /// Literal printed last.
    pub message: Option<&'a str>,
}

/// Template for a generated `BUILD.bazel`.
#[derive(Template)]
#[template(path = "BUILD.bazel.jinja", escape = "none")]
pub struct BuildBazelTemplate<'a> {
    /// rules_rust rule, `rust_library` or `rust_shared_library`.
    pub rule: &'a str,
    pub name: &'a str,
    pub edition: &'a str,
    /// Package names of the dependencies, in rank order.
    pub deps: &'a [String],
    pub rustc_flags: &'a [String],
}
