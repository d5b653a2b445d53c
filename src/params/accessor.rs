//! Typed access to normalized parameter values
//!
//! Conversion scans the first whitespace-delimited token of the value and
//! requires that whole token to convert. An empty value never converts.

use crate::error::{ParError, Result};
use crate::params::store::ParameterStore;

/// Types that can be read from a normalized parameter value.
pub trait FromParameter: Sized {
    fn from_parameter(value: &str) -> Result<Self>;
}

fn first_token(value: &str) -> Option<&str> {
    value.split_whitespace().next()
}

macro_rules! scan_with_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromParameter for $ty {
                fn from_parameter(value: &str) -> Result<Self> {
                    first_token(value)
                        .and_then(|token| token.parse::<$ty>().ok())
                        .ok_or_else(|| ParError::conversion::<$ty>(value))
                }
            }
        )*
    };
}

scan_with_from_str!(i32, i64, u32, u64, usize, f32, f64);

/// Booleans are stored as `1` / `0` after normalization.
impl FromParameter for bool {
    fn from_parameter(value: &str) -> Result<Self> {
        match first_token(value) {
            Some("1") => Ok(true),
            Some("0") => Ok(false),
            _ => Err(ParError::conversion::<bool>(value)),
        }
    }
}

impl FromParameter for String {
    fn from_parameter(value: &str) -> Result<Self> {
        first_token(value)
            .map(str::to_string)
            .ok_or_else(|| ParError::conversion::<String>(value))
    }
}

impl ParameterStore {
    /// Read `key` as `T`. A missing key is reported as [`ParError::MissingKey`];
    /// guard with [`ParameterStore::exists`] or use [`ParameterStore::get_opt`].
    pub fn get<T: FromParameter>(&self, key: &str) -> Result<T> {
        let value = self
            .value(key)
            .ok_or_else(|| ParError::MissingKey(key.to_lowercase()))?;
        T::from_parameter(value)
    }

    /// Read `key` as `T` if it is present.
    pub fn get_opt<T: FromParameter>(&self, key: &str) -> Result<Option<T>> {
        self.value(key).map(T::from_parameter).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(pairs: &[(&str, &str)]) -> ParameterStore {
        let mut store: ParameterStore = pairs.iter().copied().collect();
        store.normalize();
        store
    }

    #[test]
    fn test_numbers() {
        let params = store(&[
            ("driver::global_nx", " 42 "),
            ("grid::dx", "0.125"),
            ("grid::xmin", "-1e-2"),
            ("cactus::cctk_itlast", "100 iterations"),
        ]);

        assert_eq!(params.get::<i32>("driver::global_nx").unwrap(), 42);
        assert_eq!(params.get::<f64>("Grid::DX").unwrap(), 0.125);
        assert_eq!(params.get::<f64>("grid::xmin").unwrap(), -0.01);
        assert_eq!(params.get::<u32>("cactus::cctk_itlast").unwrap(), 100);
    }

    #[test]
    fn test_conversion_failures() {
        let params = store(&[("grid::dx", "abc"), ("grid::dy", "1.5"), ("grid::dz", "\"\"")]);

        let err = params.get::<f64>("grid::dx").unwrap_err();
        assert_eq!(err.to_string(), "failed to convert \"abc\" to f64");

        assert!(params.get::<i32>("grid::dy").unwrap_err().is_conversion());
        assert!(params.get::<String>("grid::dz").unwrap_err().is_conversion());
    }

    #[test]
    fn test_booleans_after_normalization() {
        let params = store(&[
            ("grid::avoid_origin", "no"),
            ("grid::avoid_originx", "\"Yes\""),
            ("grid::avoid_originy", "2"),
        ]);

        assert!(!params.get::<bool>("grid::avoid_origin").unwrap());
        assert!(params.get::<bool>("grid::avoid_originx").unwrap());
        assert!(params.get::<bool>("grid::avoid_originy").is_err());
    }

    #[test]
    fn test_strings_take_first_token() {
        let params = store(&[("grid::type", "\"ByRange\""), ("activethorns", "PUGH Time")]);

        assert_eq!(params.get::<String>("grid::type").unwrap(), "ByRange");
        assert_eq!(params.get::<String>("activethorns").unwrap(), "PUGH");
    }

    #[test]
    fn test_missing_keys() {
        let params = store(&[]);

        assert!(matches!(
            params.get::<f64>("Time::DTFAC"),
            Err(ParError::MissingKey(key)) if key == "time::dtfac"
        ));
        assert_eq!(params.get_opt::<f64>("time::dtfac").unwrap(), None);
    }
}
