//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Generated enum is [`Copy`], lists its variants in `ALL` and is converted
/// to/from its `SCREAMING_SNAKE_CASE` name via [`Display`] and [`FromStr`].
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
/// define_kind! {
///     #[doc = "Fuel kind."]
///     enum Fuel {
///         #[doc = "Petrol engine."]
///         Petrol = 1,
///
///         #[doc = "Battery powered."]
///         Electric = 2,
///     }
/// }
///
/// assert_eq!(Fuel::Electric.to_string(), "ELECTRIC");
/// assert_eq!("PETROL".parse::<Fuel>().unwrap(), Fuel::Petrol);
/// ```
///
/// [`Display`]: std::fmt::Display
/// [`FromStr`]: std::str::FromStr
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[cfg_attr(
            feature = "serde",
            derive(
                $crate::private::serde::Deserialize,
                $crate::private::serde::Serialize,
            ),
            serde(rename_all = "SCREAMING_SNAKE_CASE"),
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// All the variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];
        }
    };
}
