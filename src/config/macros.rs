/// Configuration macros
///
/// `config_struct!` defines a config section with its defaults in one place.

/// Define a configuration struct with embedded defaults
///
/// Generates the struct with public fields, a `Default` impl built from the
/// listed values, and serde support with `#[serde(default)]` so a partial
/// TOML section falls back field by field.
///
/// # Example
/// ```
/// pool_decoder::config_struct! {
///     pub struct CacheConfig {
///         capacity: usize = 1024,
///         enabled: bool = true,
///     }
/// }
///
/// assert_eq!(CacheConfig::default().capacity, 1024);
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
