use criterion::{criterion_group, criterion_main, Criterion};
use keytags::{IdfTable, TagExtractor, TextRanker};

const WORDS: &[(&str, &str)] = &[
    ("机器", "n"), ("学习", "v"), ("机器学习", "n"), ("算法", "n"), ("数据", "n"),
    ("模型", "n"), ("训练", "vn"), ("神经", "n"), ("网络", "n"), ("神经网络", "n"),
];

fn sentence() -> String {
    "机器学习算法需要大量数据训练模型，神经网络是一种常见的模型。".repeat(20)
}

fn bench_extract(c: &mut Criterion) {
    let tags = TagExtractor::new();
    for (word, pos) in WORDS {
        tags.segmenter().add_word(word, 100.0, pos);
    }
    tags.set_idf(IdfTable::from_entries(WORDS.iter().enumerate().map(|(i, (w, _))| (*w, 1.0 + i as f64))).unwrap());
    let ranker = TextRanker::with_segmenter(tags.segmenter().clone());
    let text = sentence();

    c.bench_function("extract_tags", |b| b.iter(|| tags.extract_tags(&text, 20)));
    c.bench_function("text_rank", |b| b.iter(|| ranker.text_rank(&text, 20)));
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
