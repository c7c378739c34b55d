use super::*;
use poa_graph::gen_sample::*;
use poa_graph::PartialOrderGraph;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use rayon::prelude::*;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn edit_distance(xs: &[u8], ys: &[u8]) -> usize {
    let mut dp: Vec<usize> = (0..=ys.len()).collect();
    for (i, x) in xs.iter().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        for (j, y) in ys.iter().enumerate() {
            let current = dp[j + 1];
            dp[j + 1] = (prev + (x != y) as usize).min(dp[j] + 1).min(current + 1);
            prev = current;
        }
    }
    dp[ys.len()]
}

fn substitute(base: u8) -> u8 {
    match base {
        b'A' => b'C',
        b'C' => b'G',
        b'G' => b'T',
        _ => b'A',
    }
}

const SHORT: &[u8] = b"ACGTACGTAC";
const LONG: &[u8] = b"ACGTTGCAAGCTTACGGATCCATGCAGTCA";

#[test]
fn single_substitutions_are_outvoted() {
    init();
    let mut w = Window::new(0, 0, WindowType::Tgs, SHORT, &uniform_quality(10, 0)).unwrap();
    w.add_layer(b"ACTTACGTAC", None, 0, 10).unwrap();
    w.add_layer(b"ACGTAAGTAC", None, 0, 10).unwrap();
    w.add_layer(b"ACGTACGAAC", None, 0, 10).unwrap();
    assert!(w.generate_consensus(&DEFAULT_CONFIG, false).unwrap());
    assert_eq!(w.consensus(), Some(SHORT));
    assert_eq!(w.coverages().len(), 10);
    assert!(w.coverages()[1..].iter().all(|&c| c >= 3), "{:?}", w.coverages());
    // Every position reaches the average coverage, nothing to trim.
    assert!(w.generate_consensus(&DEFAULT_CONFIG, true).unwrap());
    assert_eq!(w.consensus(), Some(SHORT));
}

#[test]
fn backbone_error_is_corrected() {
    let backbone = b"ACGTTCGTAC";
    let mut w = Window::new(1, 0, WindowType::Ngs, backbone, &uniform_quality(10, 0)).unwrap();
    for _ in 0..3 {
        w.add_layer(SHORT, None, 0, 10).unwrap();
    }
    assert!(w.generate_consensus(&DEFAULT_CONFIG, true).unwrap());
    assert_eq!(w.consensus(), Some(SHORT));
}

#[test]
fn qualities_weigh_the_votes() {
    let backbone = b"ACGTTCGTAC";
    let mut w = Window::new(2, 0, WindowType::Ngs, backbone, &uniform_quality(10, 40)).unwrap();
    for _ in 0..3 {
        w.add_layer(SHORT, None, 0, 10).unwrap();
    }
    w.generate_consensus(&DEFAULT_CONFIG, false).unwrap();
    assert_eq!(w.consensus(), Some(&backbone[..]));
    let quality = uniform_quality(10, 40);
    for _ in 0..3 {
        w.add_layer(SHORT, Some(quality.as_slice()), 0, 10).unwrap();
    }
    w.generate_consensus(&DEFAULT_CONFIG, false).unwrap();
    assert_eq!(w.consensus(), Some(SHORT));
}

#[test]
fn low_coverage_flanks_are_trimmed() {
    init();
    let quality = uniform_quality(LONG.len(), 0);
    let mut w = Window::new(3, 1, WindowType::Tgs, LONG, &quality).unwrap();
    for _ in 0..4 {
        w.add_layer(&LONG[10..20], None, 10, 20).unwrap();
    }
    assert!(w.generate_consensus(&DEFAULT_CONFIG, true).unwrap());
    assert_eq!(w.consensus(), Some(&LONG[11..19]));
    assert_eq!(w.coverages(), &[5; 8]);
    assert!(w.generate_consensus(&DEFAULT_CONFIG, false).unwrap());
    assert_eq!(w.consensus(), Some(LONG));
    let mut w = Window::new(3, 1, WindowType::Ngs, LONG, &quality).unwrap();
    for _ in 0..4 {
        w.add_layer(&LONG[10..20], None, 10, 20).unwrap();
    }
    assert!(w.generate_consensus(&DEFAULT_CONFIG, true).unwrap());
    assert_eq!(w.consensus(), Some(LONG));
}

#[test]
fn chimeric_window_is_kept() {
    init();
    let quality = uniform_quality(LONG.len(), 0);
    let mut w = Window::new(4, 3, WindowType::Tgs, LONG, &quality).unwrap();
    for begin in (0..30).step_by(5) {
        w.add_layer(&LONG[begin..begin + 5], None, begin as u32, begin as u32 + 5)
            .unwrap();
    }
    assert_eq!(w.num_layers(), 7);
    assert!(w.generate_consensus(&DEFAULT_CONFIG, true).unwrap());
    assert_eq!(w.consensus(), Some(LONG));
    assert!(w.coverages().iter().all(|&c| c <= 2));
}

#[test]
fn layers_without_interior_are_skipped() {
    let mut w = Window::new(5, 0, WindowType::Tgs, SHORT, &uniform_quality(10, 0)).unwrap();
    for _ in 0..3 {
        w.add_layer(b"TA", None, 3, 5).unwrap();
    }
    assert!(w.generate_consensus(&DEFAULT_CONFIG, false).unwrap());
    assert_eq!(w.consensus(), Some(SHORT));
    assert_eq!(w.coverages(), &[1; 10]);
}

#[test]
fn fragments_fix_backbone() {
    init();
    let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(9_348);
    let template = generate_seq(&mut rng, 120);
    let mut backbone = template.clone();
    for &pos in &[30, 60, 90] {
        backbone[pos] = substitute(backbone[pos]);
    }
    let quality = uniform_quality(backbone.len(), 0);
    let mut w = Window::new(6, 0, WindowType::Ngs, &backbone, &quality).unwrap();
    for _ in 0..2 {
        for begin in (0..=50).step_by(10) {
            let end = begin + 60;
            w.add_layer(&template[begin..end], None, begin as u32, end as u32)
                .unwrap();
        }
    }
    for _ in 0..3 {
        w.add_layer(&template[60..], None, 60, 120).unwrap();
    }
    assert!(w.generate_consensus(&DEFAULT_CONFIG, true).unwrap());
    assert_eq!(w.consensus(), Some(&template[..]));
}

fn noisy_window<R: Rng>(rng: &mut R, id: u64, len: usize, num_reads: usize) -> (Vec<u8>, Window) {
    let template = generate_seq(rng, len);
    let backbone = introduce_randomness(&template, rng, &PROFILE);
    let quality = uniform_quality(backbone.len(), 0);
    let mut w = Window::new(id, id as u32, WindowType::Tgs, &backbone, &quality).unwrap();
    let end = backbone.len() as u32;
    for _ in 0..num_reads {
        let read = introduce_randomness(&template, rng, &PROFILE);
        w.add_layer(&read, None, 0, end).unwrap();
    }
    (template, w)
}

#[test]
fn noisy_reads_improve_backbone() {
    init();
    let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(1212132);
    let (template, mut w) = noisy_window(&mut rng, 0, 200, 20);
    assert!(w
        .generate_consensus_with::<PartialOrderGraph>(&DEFAULT_CONFIG, false)
        .unwrap());
    let before = edit_distance(w.backbone(), &template);
    let after = edit_distance(w.consensus().unwrap(), &template);
    debug!("{}\t{}\t{}", w, before, after);
    assert!(after < before, "{} -> {}", before, after);
    assert_eq!(w.coverages().len(), w.consensus().unwrap().len());
}

#[test]
fn regeneration_is_deterministic() {
    let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(34);
    let (_, mut w) = noisy_window(&mut rng, 0, 150, 10);
    w.generate_consensus(&DEFAULT_CONFIG, true).unwrap();
    let first = (w.consensus().map(|c| c.to_vec()), w.coverages().to_vec());
    w.generate_consensus(&DEFAULT_CONFIG, true).unwrap();
    let second = (w.consensus().map(|c| c.to_vec()), w.coverages().to_vec());
    assert_eq!(first, second);
}

#[test]
fn windows_in_parallel() {
    init();
    let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(2_020);
    let windows: Vec<Window> = (0..8)
        .map(|id| noisy_window(&mut rng, id, 150, 10).1)
        .collect();
    let mut sequential = windows.clone();
    for w in sequential.iter_mut() {
        assert!(w.generate_consensus(&STRICT_CONFIG, true).unwrap());
    }
    let mut parallel = windows;
    let results: Vec<bool> = parallel
        .par_iter_mut()
        .map(|w| w.generate_consensus(&STRICT_CONFIG, true))
        .collect::<Result<_>>()
        .unwrap();
    assert!(results.iter().all(|&x| x));
    for (s, p) in sequential.iter().zip(parallel.iter()) {
        assert_eq!(s.consensus(), p.consensus());
        assert_eq!(s.coverages(), p.coverages());
    }
}

#[test]
fn config_from_json() {
    let config = AlignmentConfig::from_json(r#"{"match_score": 2, "band_width": 16}"#).unwrap();
    let mut w = Window::new(9, 0, WindowType::Ngs, SHORT, &uniform_quality(10, 0)).unwrap();
    for _ in 0..2 {
        w.add_layer(SHORT, None, 0, 10).unwrap();
    }
    assert!(w.generate_consensus(&config, false).unwrap());
    assert_eq!(w.consensus(), Some(SHORT));
}
