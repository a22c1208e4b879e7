use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sagashi_core::{similarity, TitleMatcher};

fn bench_similarity(c: &mut Criterion) {
    let catalog = vec![
        "Naruto",
        "Naruto Shippuden",
        "Boruto: Naruto Next Generations",
        "One Piece",
        "One Punch Man",
        "Shingeki no Kyojin",
        "Sousou no Frieren",
        "Jujutsu Kaisen 2nd Season",
        "Bleach: Sennen Kessen-hen",
        "Kimetsu no Yaiba: Hashira Geiko-hen",
    ];

    c.bench_function("similarity_pair", |b| {
        b.iter(|| {
            similarity(
                black_box("jujutsu kaisen"),
                black_box("Jujutsu Kaisen 2nd Season"),
            )
        });
    });

    let matcher = TitleMatcher::default();
    c.bench_function("best_match_catalog_10", |b| {
        b.iter(|| matcher.best_match(black_box("frieren"), black_box(&catalog)));
    });
}

criterion_group!(benches, bench_similarity);
criterion_main!(benches);
