use crate::util::trim;

/// Types a raw string value can be converted into.
///
/// Conversions succeed only when the whole value (after trimming spaces) is consumed, so
/// `"3 with leading"` is not an integer.
pub trait FromValue: Sized {
    /// Human-readable name of the target type, used in error messages.
    const TARGET: &'static str;

    fn from_value(value: &str) -> Option<Self>;
}

impl FromValue for String {
    const TARGET: &'static str = "String";

    fn from_value(value: &str) -> Option<Self> {
        Some(value.to_owned())
    }
}

impl FromValue for bool {
    const TARGET: &'static str = "bool";

    fn from_value(value: &str) -> Option<Self> {
        match trim(value).to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

macro_rules! impl_from_str {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromValue for $t {
                const TARGET: &'static str = stringify!($t);

                fn from_value(value: &str) -> Option<Self> {
                    trim(value).parse().ok()
                }
            }
        )*
    };
}

impl_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char,
);
