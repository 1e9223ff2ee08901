use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How a kernel reads samples that fall outside the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolation {
    /// Out-of-range taps are an error.
    None,
    /// Out-of-range samples read as zero.
    ByZero,
    /// Out-of-range samples repeat the nearest edge sample.
    #[default]
    ByLastValue,
    /// The signal is treated as periodic.
    Cyclic,
}

/// Maps a possibly out-of-range index onto the signal.
///
/// `Ok(Some(idx))` reads sample `idx`, `Ok(None)` contributes zero.
pub fn map_index(i: isize, len: usize, mode: Extrapolation) -> Result<Option<usize>> {
    if i >= 0 && (i as usize) < len {
        return Ok(Some(i as usize));
    }

    match mode {
        Extrapolation::ByZero => Ok(None),
        Extrapolation::None => Err(Error::OutOfRange { index: i, len }),
        _ if len == 0 => Err(Error::OutOfRange { index: i, len }),
        Extrapolation::ByLastValue => Ok(Some(if i < 0 { 0 } else { len - 1 })),
        Extrapolation::Cyclic => Ok(Some(i.rem_euclid(len as isize) as usize)),
    }
}

#[cfg(test)]
mod tests {
    use super::{Extrapolation, map_index};
    use crate::error::Error;

    #[test]
    fn by_last_value_clamps_both_ends() {
        let mode = Extrapolation::ByLastValue;

        assert_eq!(map_index(-3, 5, mode), Ok(Some(0)));
        assert_eq!(map_index(-1, 5, mode), Ok(Some(0)));
        assert_eq!(map_index(0, 5, mode), Ok(Some(0)));
        assert_eq!(map_index(4, 5, mode), Ok(Some(4)));
        assert_eq!(map_index(5, 5, mode), Ok(Some(4)));
        assert_eq!(map_index(99, 5, mode), Ok(Some(4)));
    }

    #[test]
    fn cyclic_wraps_negative_and_overflow() {
        let mode = Extrapolation::Cyclic;

        let cases_len4 = [(-5, 3), (-4, 0), (-1, 3), (0, 0), (3, 3), (4, 0), (9, 1)];
        for (i, expected) in cases_len4 {
            assert_eq!(map_index(i, 4, mode), Ok(Some(expected)));
        }
        for i in -3..=3 {
            assert_eq!(map_index(i, 1, mode), Ok(Some(0)));
        }
    }

    #[test]
    fn by_zero_and_none_outside() {
        assert_eq!(map_index(-1, 3, Extrapolation::ByZero), Ok(None));
        assert_eq!(map_index(3, 3, Extrapolation::ByZero), Ok(None));
        assert_eq!(map_index(0, 0, Extrapolation::ByZero), Ok(None));
        assert_eq!(map_index(1, 3, Extrapolation::None), Ok(Some(1)));
        assert_eq!(
            map_index(3, 3, Extrapolation::None),
            Err(Error::OutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn empty_signal_cannot_be_extended() {
        for mode in [Extrapolation::ByLastValue, Extrapolation::Cyclic] {
            assert!(map_index(0, 0, mode).is_err());
        }
    }

    #[test]
    fn serde_names_are_snake_case() {
        let json = serde_json::to_string(&Extrapolation::ByLastValue).expect("serialize");
        assert_eq!(json, "\"by_last_value\"");
    }
}
