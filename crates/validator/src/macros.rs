//! Macros for declaring records with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`record!`]: declare a struct and implement [`Record`](crate::object::Record) for it

// ============================================================================
// RECORD MACRO
// ============================================================================

/// Declares a struct and implements [`Record`](crate::object::Record) for it.
///
/// `#[derive(Debug, Clone)]` is always applied. Add extra derives and
/// attributes above the struct as usual. Every field type must be `'static`,
/// `Clone`, `Debug`, `Send` and `Sync`.
///
/// # Examples
///
/// ```
/// use fieldwise_validator::object::Record;
///
/// fieldwise_validator::record! {
///     #[derive(PartialEq)]
///     pub struct Point {
///         pub x: i64,
///         pub y: i64,
///         label: Option<String>,
///     }
/// }
///
/// let shape = Point::shape();
/// assert_eq!(shape.name(), "Point");
/// assert_eq!(shape.fields().len(), 3);
///
/// let p = Point { x: 1, y: 2, label: None };
/// assert_eq!(p.field("y").and_then(|v| v.downcast_ref::<i64>()), Some(&2));
/// assert!(p.field("z").is_none());
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $fty,
            )*
        }

        impl $crate::object::Record for $name {
            fn shape() -> $crate::object::RecordShape {
                $crate::object::RecordShape::new(
                    ::core::stringify!($name),
                    [$($crate::object::FieldSpec::of::<$fty>(::core::stringify!($field))),*],
                )
            }

            fn field(&self, name: &str) -> ::core::option::Option<&dyn ::core::any::Any> {
                match name {
                    $(
                        ::core::stringify!($field) => {
                            ::core::option::Option::Some(&self.$field as &dyn ::core::any::Any)
                        }
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::object::Record;

    crate::record! {
        struct Empty {}
    }

    crate::record! {
        /// Documented.
        #[derive(PartialEq, Eq)]
        pub(crate) struct Tagged {
            pub(crate) id: u32,
            /// Free-form labels.
            tags: Vec<String>,
        }
    }

    #[test]
    fn empty_record() {
        assert!(Empty::shape().fields().is_empty());
        assert!(Empty {}.field("anything").is_none());
    }

    #[test]
    fn attributes_and_visibility_pass_through() {
        let t = Tagged {
            id: 7,
            tags: vec!["a".into()],
        };
        assert_eq!(t.clone(), t);
        assert!(Tagged::shape().field("tags").is_some_and(|f| f.ty().is::<Vec<String>>()));
        assert_eq!(t.field("id").and_then(|v| v.downcast_ref::<u32>()), Some(&7));
    }
}
