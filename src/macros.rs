//! Declarative helper macros
//!
//! These macros eliminate repetitive match and field-by-field code for node
//! enums, string-keyed prop enums and sparse style structs.
//! All macros use `paste` internally for identifier concatenation.

// =============================================================================
// Node accessor generation
// =============================================================================

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with typed variants
///
/// Uses paste's `:camel` modifier to convert method name to variant name.
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// # Example
/// ```ignore
/// impl<B: Backend> Node<B> {
///     // text_path -> TextPath
///     impl_enum_accessors!(group: GroupNode, text_path: TextPathNode<B>);
/// }
/// ```
#[macro_export]
macro_rules! impl_enum_accessors {
    ($($variant:ident : $ty:ty),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " [<$variant:camel>] " node"]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>](_))
                }

                #[doc = "Try to get as " $variant " reference"]
                pub fn [<as_ $variant>](&self) -> Option<&$ty> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }

                #[doc = "Try to get as mutable " $variant " reference"]
                pub fn [<as_ $variant _mut>](&mut self) -> Option<&mut $ty> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }
            )*
        }
    };
}

// =============================================================================
// String-keyed enums
// =============================================================================

/// Generate `key()` and `FromStr` for an enum whose props arrive as
/// camelCase string keys from the UI layer.
///
/// # Example
/// ```ignore
/// impl_str_enum!(TextAlign, "textAlign" {
///     Left => "left",
///     Center => "center",
/// });
/// ```
#[macro_export]
macro_rules! impl_str_enum {
    ($name:ident, $prop:literal { $($variant:ident => $key:literal),* $(,)? }) => {
        impl $name {
            /// All variants in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// The prop key for this variant
            pub fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key,)*
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::DrawError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key => Ok($name::$variant),)*
                    _ => Err($crate::error::DrawError::unknown_value($prop, s)),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

// =============================================================================
// Sparse style structs
// =============================================================================

/// Define a style struct where every attribute is optional.
///
/// Unset fields never overwrite set ones: `merge` copies only the fields
/// present in `other`, and the field list is written once so no attribute
/// can be forgotten by the merge.
///
/// # Generated items
/// - the struct with `Option<T>` fields, `Default`, `Clone`, `Debug`, `PartialEq`
/// - `with_xxx(self, value) -> Self` per field
/// - `merge(&mut self, other)`, `merged(&self, other) -> Self`
/// - `is_empty()`, `set_field_count()`
#[macro_export]
macro_rules! sparse_style {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: Option<$ty>,
            )*
        }

        impl $name {
            /// Create an empty style (every field unset).
            pub fn new() -> Self {
                Self::default()
            }

            ::paste::paste! {
                $(
                    #[doc = "Set `" $field "`"]
                    pub fn [<with_ $field>](mut self, value: impl Into<$ty>) -> Self {
                        self.$field = Some(value.into());
                        self
                    }
                )*
            }

            /// Overlay the fields set in `other` onto `self`.
            pub fn merge(&mut self, other: &Self) {
                $(
                    if let Some(value) = &other.$field {
                        self.$field = Some(value.clone());
                    }
                )*
            }

            /// Copy of `self` with `other` overlaid.
            pub fn merged(&self, other: &Self) -> Self {
                let mut out = self.clone();
                out.merge(other);
                out
            }

            /// Check if no field is set
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())*
            }

            /// Number of fields that are set
            pub fn set_field_count(&self) -> usize {
                0 $(+ usize::from(self.$field.is_some()))*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Fruit {
        Apple,
        Pear,
    }

    impl_str_enum!(Fruit, "fruit" {
        Apple => "apple",
        Pear => "pear",
    });

    sparse_style! {
        pub struct Probe {
            size: f32,
            name: String,
        }
    }

    #[test]
    fn test_str_enum() {
        assert_eq!(Fruit::from_str("pear").unwrap(), Fruit::Pear);
        assert_eq!(Fruit::Apple.key(), "apple");
        assert_eq!(Fruit::ALL.len(), 2);
        assert!(Fruit::from_str("plum").is_err());
    }

    #[test]
    fn test_sparse_merge_keeps_unset() {
        let base = Probe::new().with_size(12.0).with_name("base");
        let over = Probe::new().with_size(20.0);
        let merged = base.merged(&over);
        assert_eq!(merged.size, Some(20.0));
        assert_eq!(merged.name.as_deref(), Some("base"));
        assert_eq!(merged.set_field_count(), 2);
        assert!(Probe::new().is_empty());
    }
}
