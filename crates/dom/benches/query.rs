use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dom::{find_first_tag_content, find_scoped_tag_content, DomParser};

/// Channel with `items` entries, the description placed in the last one
fn synthetic_feed(items: usize) -> String {
    let mut xml = String::from("<rss version=\"2.0\"><channel><title>Bench</title>");
    for i in 0..items {
        xml.push_str(&format!(
            "<item><title>Entry {i}</title><link>https://example.com/{i}</link>\
             <guid>{i}</guid><pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate></item>"
        ));
    }
    xml.push_str("<item><description>Needle</description></item></channel></rss>");
    xml
}

fn bench_query(c: &mut Criterion) {
    let xml = synthetic_feed(2_000);
    let arena = DomParser::new().parse_str(&xml).unwrap();
    let root = arena.root().unwrap();

    c.bench_function("parse 2k items", |b| {
        b.iter(|| DomParser::new().parse_str(black_box(&xml)).unwrap())
    });

    c.bench_function("find description (worst case)", |b| {
        b.iter(|| find_first_tag_content(black_box(root), black_box("description")))
    });

    c.bench_function("scoped search (first item)", |b| {
        b.iter(|| find_scoped_tag_content(black_box(root), "item", "title"))
    });
}

criterion_group!(benches, bench_query);
criterion_main!(benches);
