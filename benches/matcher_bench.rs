use criterion::{Criterion, black_box, criterion_group, criterion_main};

use phonefinder::{Leniency, PHONE_NUMBER_UTIL, PhoneNumberMatcher};

/// A mix of prose, real-looking numbers and numeric noise, so the scan
/// exercises candidate production, classification and verification.
fn setup_corpus() -> Vec<&'static str> {
    vec![
        "My number is 650-253-0000, call me tomorrow.",
        "Reach me at (650) 253-0000 x123 or 415-555-1212.",
        "Computing Complete Answers. Chen Li. VLDB J. 12(3): 211-227 (2003).",
        "Meeting at 2012-01-02 08:00 in room 5.",
        "Mountain View, CA 94041 650-253-0000 is the address line.",
        "Call 1-800-FLOWERS or +44 20 8765 4321 from abroad.",
        "No numbers in this sentence at all, just words.",
        "Posted 3/10/2011, updated 31/10/96, cost $650.",
    ]
}

fn matching_benchmark(c: &mut Criterion) {
    let corpus = setup_corpus();

    let mut group = c.benchmark_group("Matcher scan");

    for (name, leniency) in [
        ("leniency: POSSIBLE", Leniency::Possible),
        ("leniency: VALID", Leniency::Valid),
        ("leniency: EXACT_GROUPING", Leniency::ExactGrouping),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                for text in &corpus {
                    let matcher = PhoneNumberMatcher::with_options(
                        &PHONE_NUMBER_UTIL,
                        black_box(text),
                        black_box("US"),
                        leniency,
                        i64::MAX,
                    );
                    // Drain the iterator; the matches themselves are not
                    // interesting for the benchmark.
                    for phone_match in matcher {
                        black_box(phone_match);
                    }
                }
            })
        });
    }

    group.finish();
}

fn parsing_benchmark(c: &mut Criterion) {
    let numbers = [
        ("(650) 253-0000", "US"),
        ("+44 20 8765 4321", "GB"),
        ("020 8765 4321", "GB"),
        ("02 12345678", "IT"),
        ("03 331 6005 ext 3456", "NZ"),
    ];

    c.bench_function("PhoneNumberUtil: parse()", |b| {
        b.iter(|| {
            for (number, region) in &numbers {
                let _ = PHONE_NUMBER_UTIL.parse(black_box(number), black_box(region));
            }
        })
    });
}

criterion_group!(benches, matching_benchmark, parsing_benchmark);
criterion_main!(benches);
