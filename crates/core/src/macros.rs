//! Helper macro for enums persisted as `TEXT` columns.

/// Define a `Copy` enum whose variants map one-to-one onto database strings.
///
/// Generates `as_str`, `from_str_db`, `ALL`, `Display`, serde renames, and a
/// `TryFrom<String>` impl so models can decode the column with
/// `#[sqlx(try_from = "String")]`.
macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $val)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Convert to the value stored in the database.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $val ),+
                }
            }

            /// Parse a value read from the database.
            pub fn from_str_db(s: &str) -> Result<Self, $crate::error::CoreError> {
                match s {
                    $( $val => Ok(Self::$variant), )+
                    _ => Err($crate::error::CoreError::Validation(format!(
                        "Invalid {} '{}'. Must be one of: {:?}",
                        $label,
                        s,
                        [$($val),+]
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::CoreError;

            fn try_from(value: String) -> Result<Self, $crate::error::CoreError> {
                Self::from_str_db(&value)
            }
        }
    };
}
