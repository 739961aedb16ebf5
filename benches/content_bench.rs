//! Benchmarks for HTML-to-markdown conversion at varying payload sizes.
//!
//! Run with: `cargo bench --bench content_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use snipdown::rules::code_snippet;
use snipdown::Converter;

/// One GitHub code-snippet widget as rendered in issue comments.
fn snippet_widget(line: usize) -> String {
    format!(
        r#"<div class="border rounded-1 my-2">
  <div class="f6 px-3 py-2 lh-condensed border-bottom color-bg-subtle">
    <p class="mb-0 color-fg-default"><strong><a class="Link--secondary no-underline" href="https://github.com/org/repo/blob/0123abc/src/lib.rs#L{line}-L{end}">repo/src/lib.rs</a></strong></p>
  </div>
  <div itemprop="text" class="Box-body p-0 blob-wrapper blob-wrapper-embedded data">
    <table class="highlight tab-size mb-0 js-file-line-container"><tbody>
      <tr class="border-0"><td id="L{line}" class="blob-num" data-line-number="{line}"></td><td class="blob-code"><span class="pl-k">let</span> x = {line};</td></tr>
      <tr class="border-0"><td id="L{end}" class="blob-num" data-line-number="{end}"></td><td class="blob-code"><span class="pl-k">let</span> y = {end};</td></tr>
    </tbody></table>
  </div>
</div>
"#,
        end = line + 1
    )
}

/// Generate a comment thread of approximately `target_bytes`, alternating
/// prose, lists and snippet widgets.
fn generate_html(target_bytes: usize) -> String {
    let paragraph = "<p>Lorem ipsum dolor sit amet, <em>consectetur</em> adipiscing elit. \
        Sed do eiusmod tempor incididunt ut <code>labore_et</code> dolore magna aliqua.</p>\n";

    let list_block = "<ul>\n\
        <li>First item with some text</li>\n\
        <li>Second item with <a href=\"https://example.com\">a link</a></li>\n\
        </ul>\n";

    let mut html = String::with_capacity(target_bytes + 2048);
    html.push_str("<!DOCTYPE html><html><body>\n");

    let mut block_idx = 0;
    while html.len() < target_bytes {
        match block_idx % 3 {
            0 => html.push_str(paragraph),
            1 => html.push_str(list_block),
            _ => html.push_str(&snippet_widget(block_idx * 10)),
        }
        block_idx += 1;
    }

    html.push_str("</body></html>");
    html
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    let sizes: &[(usize, &str)] = &[
        (1_024, "1KB"),
        (10_240, "10KB"),
        (51_200, "50KB"),
        (204_800, "200KB"),
    ];

    let mut with_rule = Converter::new();
    with_rule.use_plugin(code_snippet::install);
    let without_rule = Converter::new();

    for &(size, label) in sizes {
        let html = generate_html(size);

        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("code_snippet", label), &html, |b, html| {
            b.iter(|| black_box(with_rule.convert(black_box(html)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("builtin_only", label), &html, |b, html| {
            b.iter(|| black_box(without_rule.convert(black_box(html)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
