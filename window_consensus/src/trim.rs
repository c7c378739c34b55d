/// Inclusive span of positions between the first and the last one with at
/// least `min_coverage`. `None` when no such span of two or more positions
/// exists, which marks the window as chimeric.
pub fn coverage_span(coverages: &[u32], min_coverage: u32) -> Option<(usize, usize)> {
    let begin = coverages.iter().position(|&c| c >= min_coverage)?;
    let end = coverages.iter().rposition(|&c| c >= min_coverage)?;
    if begin < end {
        Some((begin, end))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn middle_third() {
        let mut coverages = vec![1; 30];
        for c in coverages[10..20].iter_mut() {
            *c = 6;
        }
        assert_eq!(coverage_span(&coverages, 3), Some((10, 19)));
    }
    #[test]
    fn threshold_is_inclusive() {
        let coverages = vec![2, 3, 1, 3, 2];
        assert_eq!(coverage_span(&coverages, 3), Some((1, 3)));
        assert_eq!(coverage_span(&coverages, 0), Some((0, 4)));
    }
    #[test]
    fn chimeric() {
        assert_eq!(coverage_span(&[1, 2, 2, 1], 3), None);
        assert_eq!(coverage_span(&[1, 5, 1], 3), None);
        assert_eq!(coverage_span(&[], 0), None);
    }
}
