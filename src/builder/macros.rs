//! Macros for ergonomic state machine construction.

/// Generate a state enum with its [`State`](crate::core::State) implementation.
///
/// Besides the trait the macro provides `from_name`, usable directly as the
/// state parser for schema and snapshot import, an `ALL` constant listing
/// the variants in declaration order, and a `Display` impl printing the name.
///
/// # Example
///
/// ```
/// use turnstile::state_enum;
/// use turnstile::core::State;
///
/// state_enum! {
///     pub enum DoorState {
///         Open,
///         Ajar,
///         Closed,
///     }
/// }
///
/// assert_eq!(DoorState::Ajar.name(), "Ajar");
/// assert_eq!(DoorState::from_name("Closed"), Some(DoorState::Closed));
/// assert_eq!(DoorState::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$(Self::$variant),*];

            /// Parse a variant from its name.
            #[allow(dead_code)]
            pub fn from_name(name: &str) -> ::std::option::Option<Self> {
                match name {
                    $(stringify!($variant) => ::std::option::Option::Some(Self::$variant),)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
