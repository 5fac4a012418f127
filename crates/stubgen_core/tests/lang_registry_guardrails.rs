use std::collections::HashMap;

use stubgen_core::lang::keywords;
use stubgen_core::lang::punctuation;

#[test]
fn keywords_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, keywords::KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(
            keywords::from_str(info.canonical),
            Some(info.id),
            "keyword canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(
            keywords::as_str(info.id),
            info.canonical,
            "keyword as_str mismatch for {:?}",
            info.id
        );

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate keyword spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn keyword_spellings_are_lowercase_words() {
    for info in keywords::KEYWORDS {
        assert!(
            info.canonical.chars().all(|c| c.is_ascii_lowercase()),
            "keyword spelling should be a lowercase word: {}",
            info.canonical
        );
    }
}

#[test]
fn punctuation_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, punctuation::PunctuationId> = HashMap::new();

    for info in punctuation::PUNCTUATION {
        assert_eq!(
            punctuation::from_str(info.canonical),
            Some(info.id),
            "punctuation spelling not resolvable: {}",
            info.canonical
        );

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate punctuation spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn every_opening_delimiter_has_a_registered_closer() {
    for info in punctuation::PUNCTUATION {
        if let Some(close) = punctuation::closing(info.id) {
            assert_eq!(
                punctuation::category(close),
                punctuation::PunctuationCategory::Delimiter,
                "closer of {:?} is not a delimiter",
                info.id
            );
        }
    }
}
