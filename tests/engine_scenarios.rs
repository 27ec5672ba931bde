// file: tests/engine_scenarios.rs
// description: end-to-end answering scenarios through the public engine api

use adamai::{
    AnswerSource, BundledDataset, DocumentIndex, DocumentRecord, Engine, EngineError,
    InMemorySource, SelectionPolicy, StoreState, SynthesisConfig, Synthesizer, Theme,
    ThemeClassifier, VerseNormalizer, VerseRecord, VerseStore,
};
use pretty_assertions::assert_eq;

fn creation_engine(documents: Vec<DocumentRecord>) -> Engine {
    Engine::builder()
        .verses(vec![VerseRecord::new(
            Theme::Creation,
            "Surah 15 Ayah 26: We created man from clay.",
            "Surah 15 Ayah 26",
        )])
        .verse_source(Box::new(BundledDataset))
        .documents(documents)
        .build()
        .expect("engine builds")
}

#[test]
fn creation_question_returns_stripped_verse() {
    let engine = creation_engine(vec![]);

    assert_eq!(engine.classify("how was man created"), Some(Theme::Creation));

    let answer = engine.answer("how was man created");
    assert!(answer.contains("We created man from clay."));
    assert!(!answer.contains("Surah 15 Ayah 26:"));
    assert!(!answer.contains("Surah"));
}

#[test]
fn unmatched_question_uses_default_or_fallback() {
    let engine = Engine::builder()
        .documents(vec![DocumentRecord::new(None, "Potters fire clay in a kiln.")])
        .build()
        .unwrap();

    let answer = engine.respond("tell me about the weather today");
    assert!(!answer.text.trim().is_empty());
    assert!(matches!(
        answer.source,
        AnswerSource::DefaultVerse { .. } | AnswerSource::Fallback
    ));
}

#[test]
fn empty_store_never_answers_with_mercy_verse() {
    let store = VerseStore::new(Box::new(InMemorySource::default()));
    assert!(!store.is_populated());
    assert!(store.get_verses_by_theme(Theme::Mercy).is_empty());

    let mut documents = DocumentIndex::new();
    documents.load(vec![DocumentRecord::new(
        Some("compassion".to_string()),
        "Compassion toward travellers and orphans is praised.",
    )]);

    let synthesizer = Synthesizer::new(
        ThemeClassifier::default(),
        VerseNormalizer::default(),
        &SynthesisConfig::default(),
    );

    let answer = synthesizer.respond("show me compassion", &store, &documents);
    assert!(matches!(answer.source, AnswerSource::Document { ref id, .. } if id == "compassion"));

    let answer = synthesizer.respond("is there mercy", &store, &DocumentIndex::new());
    assert_eq!(answer.source, AnswerSource::Fallback);
}

#[test]
fn repeated_term_ranks_first() {
    let engine = Engine::builder()
        .documents(vec![
            DocumentRecord::new(Some("b".to_string()), "clay pottery kiln glaze"),
            DocumentRecord::new(Some("a".to_string()), "clay clay clay pottery"),
        ])
        .build()
        .unwrap();

    let results = engine.search("clay", 2);
    let ids: Vec<&str> = results.iter().map(|r| r.document.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert!(results[0].score >= results[1].score);
}

#[test]
fn bundled_store_answers_every_theme() {
    let engine = Engine::builder().build().unwrap();

    for theme in Theme::ALL {
        let verses = engine.verse_store().get_verses_by_theme(theme);
        assert!(!verses.is_empty());
        assert!(verses.iter().all(|v| v.theme == theme));
    }

    let answer = engine.respond("what happens in hell");
    assert!(matches!(answer.source, AnswerSource::Verse { theme: Theme::Hell, .. }));
}

#[test]
fn rebuild_is_idempotent_and_recovers_cold_store() {
    let mut store = VerseStore::new(Box::new(BundledDataset));
    assert_eq!(store.state(), StoreState::Empty);

    assert!(store.emergency_rebuild());
    let first: Vec<VerseRecord> = Theme::ALL
        .into_iter()
        .flat_map(|t| store.get_verses_by_theme(t).into_iter().cloned())
        .collect();

    assert!(store.emergency_rebuild());
    let second: Vec<VerseRecord> = Theme::ALL
        .into_iter()
        .flat_map(|t| store.get_verses_by_theme(t).into_iter().cloned())
        .collect();

    assert_eq!(first, second);
    assert!(store.is_populated());
}

#[test]
fn recovery_failure_is_fatal_at_startup() {
    let result = Engine::builder()
        .verse_source(Box::new(InMemorySource::new(vec![VerseRecord::new(
            Theme::Mercy,
            "   ",
            "Surah 39 Ayah 53",
        )])))
        .build();

    assert!(matches!(result, Err(EngineError::RecoveryFailure(_))));
}

#[test]
fn answers_are_never_empty() {
    let engine = creation_engine(vec![DocumentRecord::new(None, "Patience and prayer.")]);
    let questions = [
        "",
        " ",
        "???",
        "how was man created",
        "is there mercy",
        "patience",
        "qwerty asdf",
        "tell me about the weather today",
    ];

    for question in questions {
        assert!(!engine.answer(question).trim().is_empty(), "empty answer for {:?}", question);
    }
}

#[test]
fn question_hash_selection_is_deterministic() {
    let synthesis = SynthesisConfig {
        selection: SelectionPolicy::QuestionHash,
        ..SynthesisConfig::default()
    };
    let engine = Engine::builder().synthesis(synthesis).build().unwrap();

    let first = engine.answer("what does love mean");
    assert_eq!(engine.answer("what does love mean"), first);
}

#[test]
fn term_map_does_not_mutate_stored_text() {
    let engine = Engine::builder().build().unwrap();
    let answer = engine.answer("is allah merciful");

    assert!(!answer.contains("Allah"));
    let stored = engine.verse_store().get_verses_by_theme(Theme::Mercy);
    assert!(stored[0].text.contains("Allah"));
}
