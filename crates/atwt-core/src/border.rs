/// Boundary extension used when a kernel tap falls outside the sample grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Out-of-range taps read the nearest edge sample: `aaa|abcd|ddd`.
    #[default]
    Clamp,
    /// Mirror about the edge sample without repeating it: `dcb|abcd|cba`.
    ///
    /// For a single reflection this is `-i` below zero and `2 * len - i - 2`
    /// past the end.
    Reflect101,
}

pub fn map_index(i: isize, len: usize, mode: BorderMode) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match mode {
        BorderMode::Clamp => {
            if i < 0 {
                Some(0)
            } else {
                let idx = i as usize;
                Some(idx.min(len - 1))
            }
        }
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len {
                Some(r)
            } else {
                Some((2 * len - 2) - r)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, map_index};

    #[test]
    fn clamp_mapping_handles_negative_and_overflow() {
        let mode = BorderMode::Clamp;

        assert_eq!(map_index(-3, 5, mode), Some(0));
        assert_eq!(map_index(-1, 5, mode), Some(0));
        assert_eq!(map_index(0, 5, mode), Some(0));
        assert_eq!(map_index(4, 5, mode), Some(4));
        assert_eq!(map_index(5, 5, mode), Some(4));
        assert_eq!(map_index(99, 5, mode), Some(4));
    }

    #[test]
    fn empty_signal_has_no_mapping() {
        assert_eq!(map_index(0, 0, BorderMode::Clamp), None);
        assert_eq!(map_index(-1, 0, BorderMode::Reflect101), None);
    }

    #[test]
    fn reflect101_len1_len2_len5() {
        let mode = BorderMode::Reflect101;

        for i in -8..=8 {
            assert_eq!(map_index(i, 1, mode), Some(0));
        }

        let expected_len2 = [0, 1, 0, 1, 0, 1, 0, 1, 0];
        for (offset, expected) in (-4..=4).zip(expected_len2) {
            assert_eq!(map_index(offset, 2, mode), Some(expected));
        }

        let cases_len5 = [
            (-4, 4),
            (-3, 3),
            (-2, 2),
            (-1, 1),
            (0, 0),
            (4, 4),
            (5, 3),
            (6, 2),
            (7, 1),
            (8, 0),
        ];

        for (i, expected) in cases_len5 {
            assert_eq!(map_index(i, 5, mode), Some(expected));
        }
    }

    #[test]
    fn reflect101_matches_single_reflection_formula() {
        // Within one reflection: i < 0 -> -i, i >= n -> 2n - i - 2.
        for n in 2usize..12 {
            let n_i = n as isize;
            for i in -(n_i - 1)..(2 * n_i - 1) {
                let expected = if i < 0 {
                    -i
                } else if i >= n_i {
                    2 * n_i - i - 2
                } else {
                    i
                };
                assert_eq!(
                    map_index(i, n, BorderMode::Reflect101),
                    Some(expected as usize),
                    "n={n} i={i}"
                );
            }
        }
    }
}
