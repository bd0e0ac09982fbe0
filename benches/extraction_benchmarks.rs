use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rule34video_extractor::extractor::native::listing::parse_listing_fragment;
use rule34video_extractor::extractor::native::rule34video::parse_video_page;

const URL: &str = "https://rule34video.com/video/3065157/shot-it-mmd-hmv/";

fn video_page(tag_count: usize) -> String {
    let mut page = String::from(
        r#"<html><head><title>Shot It-(mmd hmv)</title>
<script type="application/ld+json">{"@type": "VideoObject", "name": "Shot It", "uploadDate": "2021-12-19"}</script>
</head><body>
<div><i class="icon-clock"></i> <span>5:47</span></div>
<div><i class="icon-eye"></i> <span>12 345</span></div>
<div class="col"><div class="label">Categories</div><a class="item">3D</a><a class="item">MMD</a></div>
<div class="col"><div class="label">Uploaded by</div><a class="item btn_link" href="https://rule34video.com/members/22119/">Sweet HMV</a></div>
<div><a href="https://rule34video.com/get_file/1/x/3065157_720p.mp4/?download=true&amp;f=a.mp4">MP4 720p</a></div>
"#,
    );
    for i in 0..tag_count {
        page.push_str(&format!(
            "<a class=\"tag_item\" href=\"https://rule34video.com/tags/{}/\">tag {}</a>\n",
            i, i
        ));
    }
    page.push_str("</body></html>");
    page
}

fn listing_fragment(count: usize) -> String {
    let mut html = String::new();
    for id in 0..count {
        html.push_str(&format!(
            "<a class=\"th\" href=\"https://rule34video.com/video/{}/clip/\"></a>\n",
            id
        ));
    }
    html.push_str("<a data-parameters=\"sort_by:;from_videos:02\">2</a>");
    html
}

fn benchmark_video_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("Video Page Parsing");

    for tags in [10usize, 100, 1000] {
        let page = video_page(tags);
        group.bench_with_input(BenchmarkId::new("parse_video_page", tags), &page, |b, page| {
            b.iter(|| parse_video_page(black_box(page), "3065157", URL))
        });
    }

    group.finish();
}

fn benchmark_listing_fragment(c: &mut Criterion) {
    let mut group = c.benchmark_group("Listing Fragment Parsing");

    for count in [24usize, 96] {
        let html = listing_fragment(count);
        group.bench_with_input(BenchmarkId::new("entries", count), &html, |b, html| {
            b.iter(|| parse_listing_fragment(black_box(html), 1))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_video_page, benchmark_listing_fragment);
criterion_main!(benches);
