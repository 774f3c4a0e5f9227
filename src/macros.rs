//! Accessor macros for the block and node sum types
//!
//! Uses `paste` internally for identifier concatenation.

/// Generate is_xxx, as_xxx, as_xxx_mut for enums whose variants wrap a type of
/// the same name.
///
/// Uses paste's `:camel` modifier to convert method name to variant name.
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// # Example
/// ```ignore
/// impl Block {
///     // leaf -> Leaf, container -> Container, ...
///     impl_enum_accessors!(leaf, container, text);
/// }
/// ```
macro_rules! impl_enum_accessors {
    ($($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " [<$variant:camel>]]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>](_))
                }

                #[doc = "Try to get as " $variant " reference"]
                pub fn [<as_ $variant>](&self) -> Option<&[<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }

                #[doc = "Try to get as mutable " $variant " reference"]
                pub fn [<as_ $variant _mut>](&mut self) -> Option<&mut [<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }
            )*
        }
    };
}

/// Generate a method that reads the same field from every variant.
///
/// Variants listed after `; shared` wrap an `Arc`; their mutable accessor goes
/// through `Arc::make_mut`, detaching the value if it is shared.
///
/// # Example
/// ```ignore
/// impl_variant_field!(attrs, Attrs, Leaf, Container, Text; shared Asset);
/// // Expands to: pub fn attrs(&self) -> &Attrs { match self { ... &v.attrs ... } }
/// //             pub fn attrs_mut(&mut self) -> &mut Attrs { ... }
/// ```
macro_rules! impl_variant_field {
    ($field:ident, $ty:ty, $($variant:ident),+ $(; shared $($shared:ident),+)?) => {
        ::paste::paste! {
            #[doc = concat!("Get `", stringify!($field), "` from any variant")]
            pub fn $field(&self) -> &$ty {
                match self {
                    $(Self::$variant(v) => &v.$field,)+
                    $($(Self::$shared(v) => &v.$field,)+)?
                }
            }

            #[doc = concat!("Get mutable `", stringify!($field), "` from any variant")]
            pub fn [<$field _mut>](&mut self) -> &mut $ty {
                match self {
                    $(Self::$variant(v) => &mut v.$field,)+
                    $($(Self::$shared(v) => &mut ::std::sync::Arc::make_mut(v).$field,)+)?
                }
            }
        }
    };
}
