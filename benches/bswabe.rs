extern crate bswabe;
#[macro_use]
extern crate criterion;

use criterion::{criterion_group, criterion_main, Criterion, BenchmarkId};
use bswabe::schemes::bsw;
use bswabe::utils::policy::pest::PolicyLanguage;

fn policy_of_width(width: usize) -> String {
    let leaves: Vec<String> = (0..width).map(|v| format!("attr{}", v)).collect();
    format!("{} {}of{}", leaves.join(" "), (width + 1) / 2, width)
}

fn attributes_of_width(width: usize) -> Vec<String> {
    (0..width).map(|v| format!("attr{}", v)).collect()
}

fn criterion_setup(c: &mut Criterion) {
    let mut group = c.benchmark_group("setup");
    group.bench_with_input(BenchmarkId::new("BSW", 1), &1_usize, |b, &_usize| {
        b.iter(|| {
            bsw::setup()
        } );
    });
    group.finish();
}

fn criterion_keygen(c: &mut Criterion) {
    let mut group = c.benchmark_group("keygen");
    let (pk, msk) = bsw::setup();
    for width in [2_usize, 5, 10].iter() {
        group.bench_with_input(BenchmarkId::new("BSW", width), width, |b, &width| {
            let attributes = attributes_of_width(width);
            b.iter(|| {
                bsw::keygen(&pk, &msk, &attributes).unwrap()
            } );
        });
    }
    group.finish();
}

fn criterion_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("encrypt");
    let (pk, _msk) = bsw::setup();
    for width in [2_usize, 5, 10].iter() {
        group.bench_with_input(BenchmarkId::new("BSW", width), width, |b, &width| {
            let policy = policy_of_width(width);
            b.iter(|| {
                bsw::encrypt(&pk, &policy, PolicyLanguage::PostfixPolicy).unwrap()
            } );
        });
    }
    group.finish();
}

fn criterion_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrypt");
    let (pk, msk) = bsw::setup();
    for width in [2_usize, 5, 10].iter() {
        group.bench_with_input(BenchmarkId::new("BSW", width), width, |b, &width| {
            let policy = policy_of_width(width);
            let sk = bsw::keygen(&pk, &msk, &attributes_of_width(width)).unwrap();
            let (ct, _key) = bsw::encrypt(&pk, &policy, PolicyLanguage::PostfixPolicy).unwrap();
            b.iter(|| {
                bsw::decrypt(&sk, &ct).unwrap()
            } );
        });
    }
    group.finish();
}

criterion_group!(benches,
    criterion_setup,
    criterion_keygen,
    criterion_encrypt,
    criterion_decrypt,
);

criterion_main!(benches);
