//! Simulated reads for tests and benchmarks.
use rand::seq::SliceRandom;
use rand::Rng;

pub struct Profile {
    pub sub: f64,
    pub del: f64,
    pub ins: f64,
}
pub const PROFILE: Profile = Profile {
    sub: 0.03,
    del: 0.05,
    ins: 0.06,
};

pub const CLEAN_PROFILE: Profile = Profile {
    sub: 0.01,
    del: 0.01,
    ins: 0.01,
};

pub fn introduce_randomness<T: Rng>(seq: &[u8], rng: &mut T, p: &Profile) -> Vec<u8> {
    let mut res = Vec::with_capacity(seq.len());
    let mut remainings: Vec<_> = seq.iter().copied().rev().collect();
    while let Some(&base) = remainings.last() {
        let roll: f64 = rng.gen();
        if roll < p.sub {
            remainings.pop();
            res.push(choose_base(rng, base));
        } else if roll < p.sub + p.del {
            remainings.pop();
        } else if roll < p.sub + p.del + p.ins {
            res.push(random_base(rng));
        } else {
            remainings.pop();
            res.push(base);
        }
    }
    res
}

pub fn generate_seq<T: Rng>(rng: &mut T, len: usize) -> Vec<u8> {
    (0..len).map(|_| random_base(rng)).collect()
}

/// Quality string of the given length, every base scored `phred`.
pub fn uniform_quality(len: usize, phred: u8) -> Vec<u8> {
    vec![phred.saturating_add(33); len]
}

fn choose_base<T: Rng>(rng: &mut T, base: u8) -> u8 {
    let bases: Vec<u8> = b"ATCG".iter().filter(|&&e| e != base).copied().collect();
    bases.choose(rng).copied().unwrap_or(b'A')
}
fn random_base<T: Rng>(rng: &mut T) -> u8 {
    b"ATGC"[rng.gen_range(0..4)]
}
