//! Integration tests for the normalize -> match -> map -> render pipeline.

use archivist::analysis::{map_range, normalize, normalize_with_mapping};
use archivist::highlight::{
    ContextConfig, ContextExtractor, Highlighter, KeywordMatcher, extract_contexts, find_matches,
    highlight,
};

const SAMPLES: &[&str] = &[
    "",
    "the quick brown fox",
    "İstanbul Çalışma ğüşöiç",
    "Ankara'da kış, İzmir'de yaz",
    "Æsop's Fables and Œdipus in Straße",
    "ΣΟΦΙΑ και λόγος",
    "naïve café crème brûlée",
    "日本語 mixed with ASCII",
    "3.14 is pi, (a+b)*c",
];

#[test]
fn test_normalize_is_idempotent() {
    for sample in SAMPLES {
        let once = normalize(sample);
        assert_eq!(normalize(&once), once, "{sample}");
    }
}

#[test]
fn test_index_map_length_matches_normalized_length() {
    for sample in SAMPLES {
        let result = normalize_with_mapping(sample);
        assert_eq!(result.index_map().len(), result.len(), "{sample}");
        assert_eq!(result.as_str(), normalize(sample), "{sample}");
    }
}

#[test]
fn test_turkish_folding() {
    assert_eq!(normalize("İstanbul Çalışma ğüşöiç"), "istanbul calisma gusoic");
    assert_eq!(normalize("İ"), "i");
    assert_eq!(normalize("I"), "i");
}

#[test]
fn test_mapped_ranges_renormalize_to_the_match() {
    for sample in SAMPLES {
        let normalized = normalize_with_mapping(sample);
        let folded = normalized.as_str();

        // Every two character window of the folded text that lies on char
        // boundaries is a valid match to map back.
        let boundaries: Vec<usize> = folded
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(folded.len()))
            .collect();

        for pair in boundaries.windows(3) {
            let (start, end) = (pair[0], pair[2]);
            let needle = &folded[start..end];
            let original = map_range(normalized.index_map(), start, end, sample.len());

            assert!(
                normalize(&sample[original.clone()]).contains(needle),
                "{sample:?}: {needle:?} not found in {:?}",
                &sample[original]
            );
        }
    }
}

#[test]
fn test_no_matches() {
    let none: [&str; 0] = [];
    assert!(find_matches("anything", &none).is_empty());
    assert!(find_matches("", &["abc"]).is_empty());
    assert!(find_matches("abc", &["xyz"]).is_empty());
}

#[test]
fn test_keywords_are_literal() {
    let text = normalize("3.14 is pi, not 3x14 or 3514");
    let matches = find_matches(&text, &["3.14"]);
    assert_eq!(matches.len(), 1);
    assert_eq!(&text[matches[0].range()], "3.14");
}

#[test]
fn test_highlight_example() {
    assert_eq!(
        highlight("the quick brown fox", &[4..9]),
        "the <mark>quick</mark> brown fox"
    );
}

#[test]
fn test_context_snaps_to_words() {
    let text = "...the treaty of Westphalia ended the war in 1648 completely...";
    let snippets = extract_contexts(text, &["westphalia"], 10);

    assert_eq!(snippets.len(), 1);
    let snippet = &snippets[0];
    assert!(snippet.contains("Westphalia"));
    for word in snippet.split_whitespace() {
        assert!(text.contains(&format!("{word} ")) || text.contains(&format!(" {word}")));
    }
    assert_eq!(snippet, "treaty of Westphalia ended the");

    let narrow = extract_contexts(text, &["westphalia"], 8);
    assert_eq!(narrow, vec!["of Westphalia ended".to_string()]);
}

#[test]
fn test_multi_keyword_matches_are_sorted() {
    let matches = find_matches("the quick brown fox", &["fox", "quick"]);
    let starts: Vec<usize> = matches.iter().map(|m| m.start).collect();
    assert_eq!(starts, vec![4, 16]);
}

#[test]
fn test_full_pipeline_on_turkish_text() {
    let original = "Ankara'da kış, İzmir'de yaz. ANKARA soğuk!";
    let matcher = KeywordMatcher::new(["ankarada", "izmirde", "soguk"]);
    let normalized = normalize_with_mapping(original);

    let ranges = matcher.find_original_ranges(&normalized);
    let found: Vec<&str> = ranges.iter().map(|r| &original[r.clone()]).collect();
    assert_eq!(found, vec!["Ankara'da", "İzmir'de", "soğuk"]);

    assert_eq!(
        Highlighter::default().highlight(original, &ranges),
        "<mark>Ankara'da</mark> kış, <mark>İzmir'de</mark> yaz. ANKARA <mark>soğuk</mark>!"
    );

    let snippets = ContextExtractor::new(ContextConfig::new().context_chars(6))
        .extract(original, &matcher);
    assert_eq!(
        snippets,
        vec![
            "Ankara'da kış, ".to_string(),
            " kış, İzmir'de yaz. ".to_string(),
            // "NKARA " starts mid-word and holds nothing after its space.
            "soğuk!".to_string(),
        ]
    );
}

#[test]
fn test_overlapping_keywords_render_well_formed() {
    let matcher = KeywordMatcher::new(["sunflower", "flow", "flower"]);
    let highlighted = Highlighter::default().highlight_keywords("Sunflowers grow", &matcher);
    assert_eq!(highlighted, "<mark>Sunflower</mark>s grow");
}
