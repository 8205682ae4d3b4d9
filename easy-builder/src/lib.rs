//! A procedural macro which creates a fluent builder for a struct.
//!
//! The builder has one setter per member, each taking the member's declared type and returning the builder so calls
//! chain, and a `build` method that moves the collected values into a new instance. Members marked `required` must be
//! set before `build` succeeds; every other member falls back to its default. Setters are named after their member
//! with the first character upper-cased, so `age` gets an `Age` setter; `setter_case = "snake"` opts into snake case.
//!
//! See the documentation for [`#[easy_builder]`](easy_builder) for more details.
//!
//! # Examples
//!
//! ```
//! use easy_builder::easy_builder;
//!
//! #[easy_builder]
//! struct Person {
//!     #[builder(required)]
//!     name: String,
//!     #[builder(default = 18)]
//!     age: u32,
//!     employer: Option<String>,
//! }
//!
//! # fn main() {
//! let person = Person::builder()
//!     .Name("John Doe".to_string())
//!     .build()
//!     .unwrap();
//! assert_eq!(person.age, 18);
//!
//! let error = Person::builder().Age(25).build().err().unwrap();
//! assert_eq!(error.missing_fields(), ["name"]);
//! # }
//! ```
use thiserror::Error;

// Not part of the public API.
#[doc(hidden)]
pub use easy_builder_internals::__EasyBuilderInternalDerive;
#[doc(inline)]
pub use easy_builder_internals::easy_builder;

// Not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use core::default::Default;
    pub use core::result::Result;
    pub use std::vec::Vec;
}

/// The error returned by a builder's `build` method when required fields were never set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot build `{type_name}`: missing required field(s) {}", .missing.join(", "))]
pub struct BuildError {
    type_name: &'static str,
    missing: Vec<&'static str>,
}

impl BuildError {
    #[doc(hidden)]
    pub fn new(type_name: &'static str, missing: Vec<&'static str>) -> Self {
        BuildError { type_name, missing }
    }

    /// Returns the name of the type that failed to build.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the names of the required fields that were never set, in declaration order.
    pub fn missing_fields(&self) -> &[&'static str] {
        &self.missing
    }
}
